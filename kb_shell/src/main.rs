//! `kb` - query a knowledge base file from the command line.
//!
//! Each invocation loads the given file into a fresh term tree, runs one
//! command against it, and prints the result. Nothing is written back.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use kb_shell::{render, KbConfig, LoadPolicy, LoadReport, Loader, OutputFormat};
use term_tree::TermTree;

/// Query a tab-delimited knowledge base of terms, sentences, and confidence scores
#[derive(Parser)]
#[command(name = "kb")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Stop loading at the first malformed line
    #[arg(long, global = true)]
    abort_on_error: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a term and list partial matches
    Lookup { file: PathBuf, term: String },
    /// Check whether a term's statement contains the given text
    Statement {
        file: PathBuf,
        term: String,
        sentence: String,
    },
    /// Add or update a statement, then show the stored fact
    Add {
        file: PathBuf,
        term: String,
        sentence: String,
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
    /// Load a file and report tree statistics
    Stats { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => KbConfig::from_file(path)?,
        None => KbConfig::default(),
    };
    if cli.abort_on_error {
        config.loader.policy = LoadPolicy::Abort;
    }
    if cli.json {
        config.output.format = OutputFormat::Json;
    }

    let loader = Loader::new(config.loader.clone());
    let format = config.output.format;

    let output = match cli.command {
        Commands::Lookup { file, term } => {
            let (tree, _) = load(&loader, &file)?;
            render::lookup(&term, tree.find(&term), &tree.find_similar(&term), format)
        }
        Commands::Statement {
            file,
            term,
            sentence,
        } => {
            let (tree, _) = load(&loader, &file)?;
            render::statement(&term, &sentence, tree.find_statement(&term, &sentence), format)
        }
        Commands::Add {
            file,
            term,
            sentence,
            score,
        } => {
            if !score.is_finite() {
                bail!("confidence score must be a finite number, got {score}");
            }
            let (mut tree, _) = load(&loader, &file)?;
            let outcome = tree.insert_or_update(term.clone(), sentence, score);
            render::added(outcome, tree.get(&term), format)
        }
        Commands::Stats { file } => {
            let (tree, report) = load(&loader, &file)?;
            render::stats(tree.len(), tree.height(), &report, format)
        }
    };

    println!("{output}");
    Ok(())
}

fn load(loader: &Loader, path: &Path) -> Result<(TermTree, LoadReport)> {
    let mut tree = TermTree::new();
    let report = loader
        .load_path(path, &mut tree)
        .with_context(|| format!("loading knowledge base from {}", path.display()))?;
    Ok((tree, report))
}
