//! Turtle and N-Triples readers on top of rio

use super::{ParseError, ParseResult};
use crate::rdf::namespace::NamespaceManager;
use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use rio_api::model as rio;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesParser, TurtleParser};
use std::io::BufRead;
use tracing::debug;

/// A parsed document: triples in document order plus the prefixes it declared
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub triples: Vec<Triple>,
    pub prefixes: NamespaceManager,
}

/// Read Turtle; `@prefix` declarations are kept on top of the standard ones
pub fn load_turtle(reader: impl BufRead) -> ParseResult<Document> {
    let mut parser = TurtleParser::new(reader, None);
    let mut triples = Vec::new();
    parser.parse_all(&mut |t| -> Result<(), ParseError> {
        triples.push(convert_triple(t)?);
        Ok(())
    })?;

    let mut prefixes = NamespaceManager::standard();
    for (prefix, iri) in parser.prefixes() {
        // the empty prefix is legal Turtle but useless for display
        if !prefix.is_empty() {
            prefixes
                .add_prefix(prefix.clone(), iri.clone())
                .map_err(|e| ParseError::Term(e.to_string()))?;
        }
    }
    debug!("Loaded {} triples from Turtle", triples.len());
    Ok(Document { triples, prefixes })
}

/// Read N-Triples
pub fn load_ntriples(reader: impl BufRead) -> ParseResult<Document> {
    let mut parser = NTriplesParser::new(reader);
    let mut triples = Vec::new();
    parser.parse_all(&mut |t| -> Result<(), ParseError> {
        triples.push(convert_triple(t)?);
        Ok(())
    })?;
    debug!("Loaded {} triples from N-Triples", triples.len());
    Ok(Document {
        triples,
        prefixes: NamespaceManager::standard(),
    })
}

fn term_error(e: impl std::fmt::Display) -> ParseError {
    ParseError::Term(e.to_string())
}

fn convert_triple(t: rio::Triple) -> ParseResult<Triple> {
    Ok(Triple::new(
        convert_subject(t.subject)?,
        convert_predicate(t.predicate)?,
        convert_object(t.object)?,
    ))
}

fn convert_subject(s: rio::Subject) -> ParseResult<RdfSubject> {
    match s {
        rio::Subject::NamedNode(n) => Ok(NamedNode::new(n.iri).map_err(term_error)?.into()),
        rio::Subject::BlankNode(b) => Ok(BlankNode::from_str(b.id).map_err(term_error)?.into()),
        other => Err(ParseError::Term(format!("unsupported subject {}", other))),
    }
}

fn convert_predicate(p: rio::NamedNode) -> ParseResult<RdfPredicate> {
    RdfPredicate::new(p.iri).map_err(term_error)
}

fn convert_object(o: rio::Term) -> ParseResult<RdfObject> {
    match o {
        rio::Term::NamedNode(n) => Ok(NamedNode::new(n.iri).map_err(term_error)?.into()),
        rio::Term::BlankNode(b) => Ok(BlankNode::from_str(b.id).map_err(term_error)?.into()),
        rio::Term::Literal(rio::Literal::Simple { value }) => {
            Ok(Literal::new_simple_literal(value).into())
        }
        rio::Term::Literal(rio::Literal::LanguageTaggedString { value, language }) => Ok(
            Literal::new_language_tagged_literal(value, language)
                .map_err(term_error)?
                .into(),
        ),
        rio::Term::Literal(rio::Literal::Typed { value, datatype }) => {
            let dt = NamedNode::new(datatype.iri).map_err(term_error)?;
            Ok(Literal::new_typed_literal(value, dt).into())
        }
        other => Err(ParseError::Term(format!("unsupported object {}", other))),
    }
}
