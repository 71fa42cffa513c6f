//! ontgraph CLI: browse an ontology file from the command line
//!
//! Loads a Turtle or N-Triples document into an [`OntModel`] and prints
//! hierarchy, list and annotation views of it.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use ontgraph::ont::{OntClass, OntConfig, OntModel, OntProfile, ViewKind};
use ontgraph::rdf::{InfGraph, RdfObject, RdfParser, RdfPredicate, RdfStore, RdfSubject, RdfsReasoner};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ontgraph", version, about = "Ontology browser over RDF files")]
struct Cli {
    /// Ontology file (.ttl or .nt)
    #[arg(global = true, long, short = 'i', env = "ONTGRAPH_INPUT")]
    input: Option<PathBuf>,

    /// Ontology profile
    #[arg(long, global = true)]
    profile: Option<ProfileArg>,

    /// YAML or JSON model configuration; --profile overrides its profile
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Apply RDFS entailment and answer direct queries from it
    #[arg(long, global = true)]
    reason: bool,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log verbosity (-v debug, -vv trace); RUST_LOG overrides it
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ProfileArg {
    Owl2Full,
    Owl2Dl,
    Owl2Ql,
    Owl2Rl,
    Owl1,
    Rdfs,
}

impl From<ProfileArg> for OntProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Owl2Full => OntProfile::Owl2Full,
            ProfileArg::Owl2Dl => OntProfile::Owl2Dl,
            ProfileArg::Owl2Ql => OntProfile::Owl2Ql,
            ProfileArg::Owl2Rl => OntProfile::Owl2Rl,
            ProfileArg::Owl1 => OntProfile::Owl1,
            ProfileArg::Rdfs => OntProfile::Rdfs,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Named classes with no parent other than a top class
    Roots,
    /// Every class with its label and parents
    Classes,
    /// Super classes of a class
    Supers {
        /// Class IRI, compact (ex:Dog) or absolute
        class: String,

        /// Only direct super classes
        #[arg(long)]
        direct: bool,
    },
    /// Sub classes of a class
    Subs {
        class: String,

        #[arg(long)]
        direct: bool,
    },
    /// Individuals of a class
    Individuals {
        class: String,

        #[arg(long)]
        direct: bool,
    },
    /// Members of the list at `subject predicate`
    List { subject: String, predicate: String },
    /// Annotations of an object
    Annotations {
        iri: String,

        /// Language tag filter; an empty tag selects untagged values
        #[arg(long)]
        lang: Option<String>,
    },
    /// Ontology header: IRI, version and imports
    Ontology,
    /// Object counts per view kind
    Summary,
}

fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = cli
        .input
        .as_deref()
        .ok_or_else(|| anyhow!("no input file, pass --input or set ONTGRAPH_INPUT"))?;
    let model = load_model(input, cli)?;
    let format = &cli.format;

    match &cli.command {
        Commands::Roots => run_classes(&model, model.hierarchy_roots(), format),
        Commands::Classes => run_classes(&model, model.classes(), format),
        Commands::Supers { class, direct } => {
            let class = find_class(&model, class)?;
            run_classes(&model, class.super_classes(*direct), format)
        }
        Commands::Subs { class, direct } => {
            let class = find_class(&model, class)?;
            run_classes(&model, class.sub_classes(*direct), format)
        }
        Commands::Individuals { class, direct } => {
            let class = find_class(&model, class)?;
            let rows = class
                .individuals(*direct)
                .iter()
                .map(|i| vec![short(&model, i.node()), i.label(None).unwrap_or_default()])
                .collect();
            print_rows(&["individual", "label"], rows, format)
        }
        Commands::List { subject, predicate } => run_list(&model, subject, predicate, format),
        Commands::Annotations { iri, lang } => run_annotations(&model, iri, lang.as_deref(), format),
        Commands::Ontology => {
            let id = model.id().ok_or_else(|| anyhow!("no unique owl:Ontology header"))?;
            let mut rows = vec![vec!["id".to_string(), short(&model, id.node())]];
            if let Some(version) = id.version_iri() {
                rows.push(vec!["version".to_string(), version.to_string()]);
            }
            rows.extend(id.imports().into_iter().map(|i| vec!["import".to_string(), i.to_string()]));
            print_rows(&["field", "value"], rows, format)
        }
        Commands::Summary => {
            let rows = ViewKind::all()
                .into_iter()
                .map(|kind| vec![kind.to_string(), model.objects(kind).len().to_string()])
                .collect();
            print_rows(&["kind", "count"], rows, format)
        }
    }
}

fn load_model(path: &Path, cli: &Cli) -> Result<OntModel> {
    let mut config = match &cli.config {
        Some(file) => OntConfig::from_file(file)
            .with_context(|| format!("reading config {}", file.display()))?,
        None => OntConfig::default(),
    };
    if let Some(profile) = cli.profile {
        config.profile = profile.into();
    }

    let document = RdfParser::parse_file(path).with_context(|| format!("loading {}", path.display()))?;
    if !cli.reason {
        return Ok(OntModel::from_document(document, config));
    }
    let graph = InfGraph::new(RdfStore::from_triples(document.triples), RdfsReasoner::new());
    let mut model = OntModel::with_config(graph, config);
    *model.prefixes_mut() = document.prefixes;
    Ok(model)
}

fn find_class<'m>(model: &'m OntModel, text: &str) -> Result<OntClass<'m>> {
    let iri = model.iri(text)?;
    model
        .as_class(&iri.into())
        .ok_or_else(|| anyhow!("{} is not a class under {}", text, model.profile()))
}

fn run_classes(model: &OntModel, classes: Vec<OntClass<'_>>, format: &OutputFormat) -> Result<()> {
    let rows = classes
        .iter()
        .map(|c| {
            let parents: Vec<String> = c
                .super_classes(true)
                .iter()
                .map(|p| short(model, p.node()))
                .collect();
            vec![
                short(model, c.node()),
                c.expression().name().to_string(),
                c.label(None).unwrap_or_default(),
                parents.join(" "),
            ]
        })
        .collect();
    print_rows(&["class", "kind", "label", "parents"], rows, format)
}

fn run_list(model: &OntModel, subject: &str, predicate: &str, format: &OutputFormat) -> Result<()> {
    let subject: RdfSubject = model.iri(subject)?.into();
    let predicate = RdfPredicate::from(model.iri(predicate)?);
    let list = model
        .as_list(&subject, &predicate)
        .ok_or_else(|| anyhow!("no list at {} {}", subject, predicate))?;

    let mut cells = list.safe_cells();
    let rows = cells
        .by_ref()
        .enumerate()
        .map(|(i, cell)| vec![i.to_string(), short(model, cell.first())])
        .collect();
    if cells.is_malformed() {
        eprintln!("warning: list at {} {} is malformed", subject, predicate);
    }
    print_rows(&["index", "member"], rows, format)
}

fn run_annotations(model: &OntModel, iri: &str, lang: Option<&str>, format: &OutputFormat) -> Result<()> {
    let node: RdfObject = model.iri(iri)?.into();
    let object = model
        .try_as(&node, ViewKind::Object)
        .and_then(|v| v.into_object())
        .ok_or_else(|| anyhow!("{} is not in the graph", iri))?;

    let rows = object
        .annotations()
        .iter()
        .filter(|a| match (lang, a.object().as_literal()) {
            (None, _) => true,
            (Some(lang), Some(literal)) => {
                let tag = literal.language().unwrap_or("");
                if lang.is_empty() {
                    tag.is_empty()
                } else {
                    tag.to_ascii_lowercase().starts_with(&lang.to_ascii_lowercase())
                }
            }
            (Some(_), None) => false,
        })
        .map(|a| {
            vec![
                model.prefixes().shorten_iri(a.predicate().as_named_node()),
                short(model, a.object()),
            ]
        })
        .collect();
    print_rows(&["property", "value"], rows, format)
}

fn short(model: &OntModel, node: &RdfObject) -> String {
    model.prefixes().shorten(node)
}

fn print_rows(header: &[&str], rows: Vec<Vec<String>>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let records: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| {
                    let map: serde_json::Map<String, serde_json::Value> = header
                        .iter()
                        .zip(row)
                        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                        .collect();
                    serde_json::Value::Object(map)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Csv => {
            println!("{}", header.join(","));
            for row in &rows {
                let cells: Vec<String> = row.iter().map(|v| format_csv_value(v)).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("(no results)");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(header);
            for row in &rows {
                table.add_row(row);
            }
            println!("{}", table);
            println!("{} row(s)", rows.len());
        }
    }
    Ok(())
}

fn format_csv_value(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
