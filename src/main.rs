use clap::{Parser, Subcommand};
use deckfill::api::{self, DeckService, RequestModel, TemplateRequest};
use deckfill::config::{Config, DEFAULT_TEMPLATES_DIR};
use deckfill::template::PlaceholderRule;
use deckfill::{DeckError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// List template fields and generate decks from PowerPoint templates
#[derive(Parser)]
#[command(name = "deckfill", version, about)]
struct Cli {
    /// Directory holding the .pptx templates
    #[arg(long, global = true, env = "DECKFILL_TEMPLATES_DIR", default_value = DEFAULT_TEMPLATES_DIR)]
    templates_dir: PathBuf,

    /// Placeholder pattern: greedy or per-pair
    #[arg(long, global = true, env = "DECKFILL_PLACEHOLDER_RULE", default_value_t = PlaceholderRule::Greedy)]
    placeholder_rule: PlaceholderRule,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the fields every template declares, as JSON
    Templates {
        /// TemplateRequest JSON file, or - for stdin
        #[arg(long, conflicts_with = "name")]
        request: Option<String>,

        /// Request name to echo back when no request file is given
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Fill a template and write the .pptx
    Generate {
        /// RequestModel JSON file, or - for stdin
        #[arg(long, default_value = "-")]
        request: String,

        /// Output file, or - for stdout
        #[arg(long, short, default_value = "-")]
        output: String,
    },

    /// List every file below a directory with size and last write time
    Tree {
        /// Directory to list
        #[arg(long, env = "DECKFILL_TREE_ROOT", default_value = ".")]
        root: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr; stdout carries JSON and deck bytes
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(source: &str) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    if source == "-" {
        io::stdin().lock().read_to_end(&mut data)?;
    } else {
        File::open(source)?.read_to_end(&mut data)?;
    }
    Ok(data)
}

fn open_output(target: &str) -> Result<Box<dyn Write>> {
    Ok(if target == "-" {
        Box::new(BufWriter::new(io::stdout().lock()))
    } else {
        Box::new(BufWriter::new(File::create(Path::new(target))?))
    })
}

fn run(cli: Cli) -> Result<()> {
    let config = Config {
        templates_dir: cli.templates_dir,
        placeholder_rule: cli.placeholder_rule,
        ..Config::default()
    };

    match cli.command {
        Command::Templates { request, name } => {
            let request = match request {
                Some(source) => serde_json::from_slice::<TemplateRequest>(&read_input(&source)?)?,
                None => TemplateRequest { name },
            };
            let response = DeckService::from_config(&config).template_details(request)?;

            let mut out = io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, &response)?;
            writeln!(out)?;
        },
        Command::Generate { request, output } => {
            let request: RequestModel = serde_json::from_slice(&read_input(&request)?)?;
            let (bytes, _stats) = DeckService::from_config(&config).generate_deck(&request)?;

            let mut out = open_output(&output)?;
            out.write_all(&bytes)?;
            out.flush()?;
        },
        Command::Tree { root } => {
            let config = Config { tree_root: root, ..config };
            api::list_tree(&config.tree_root, BufWriter::new(io::stdout().lock()))?;
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "request failed");
            eprintln!("deckfill: {}", err);
            match err {
                DeckError::TemplateNotFound(_) | DeckError::InvalidTemplateName(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        },
    }
}
