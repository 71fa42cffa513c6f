//! RDF loading
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)
//!
//! Loading exists for fixtures and the command line; the object model itself
//! only ever talks to a [`Graph`](super::Graph).

mod turtle;

pub use turtle::{load_ntriples, load_turtle, Document};

use super::store::RdfStore;
use std::path::Path;
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
}

impl RdfFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nt" | "ntriples" => Some(RdfFormat::NTriples),
            _ => None,
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Syntax error reported by the parser
    #[error("Syntax error: {0}")]
    Syntax(#[from] rio_turtle::TurtleError),

    /// A term the store cannot represent
    #[error("Invalid term: {0}")]
    Term(String),

    /// Unknown format
    #[error("Cannot determine RDF format of {0}")]
    UnknownFormat(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// RDF parser entry points
pub struct RdfParser;

impl RdfParser {
    /// Parse a document held in memory
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<Document> {
        match format {
            RdfFormat::Turtle => load_turtle(input.as_bytes()),
            RdfFormat::NTriples => load_ntriples(input.as_bytes()),
        }
    }

    /// Parse a file; the format comes from its extension
    pub fn parse_file(path: &Path) -> ParseResult<Document> {
        let format = RdfFormat::from_path(path)
            .ok_or_else(|| ParseError::UnknownFormat(path.display().to_string()))?;
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        match format {
            RdfFormat::Turtle => load_turtle(reader),
            RdfFormat::NTriples => load_ntriples(reader),
        }
    }

    /// Parse straight into a fresh store
    pub fn parse_store(input: &str, format: RdfFormat) -> ParseResult<RdfStore> {
        Ok(RdfStore::from_triples(Self::parse(input, format)?.triples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Graph;
    use std::io::Write;

    #[test]
    fn test_format_from_path() {
        assert_eq!(RdfFormat::from_path(Path::new("a/b.ttl")), Some(RdfFormat::Turtle));
        assert_eq!(RdfFormat::from_path(Path::new("b.NT")), Some(RdfFormat::NTriples));
        assert_eq!(RdfFormat::from_path(Path::new("b.owl")), None);
        assert_eq!(RdfFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_parse_store() {
        let store = RdfParser::parse_store(
            "<http://example.org/a> <http://example.org/b> \"c\" .\n",
            RdfFormat::NTriples,
        )
        .unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::Builder::new().suffix(".ttl").tempfile().unwrap();
        writeln!(file, "@prefix ex: <http://example.org/> .").unwrap();
        writeln!(file, "ex:Dog ex:p ex:Animal .").unwrap();
        let doc = RdfParser::parse_file(file.path()).unwrap();
        assert_eq!(doc.triples.len(), 1);

        let other = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();
        assert!(matches!(
            RdfParser::parse_file(other.path()),
            Err(ParseError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            RdfParser::parse("ex:a ex:b", RdfFormat::Turtle),
            Err(ParseError::Syntax(_))
        ));
    }
}
