//! `dict-path` — dot-path queries and transforms over a JSON document.
//!
//! Usage:
//!   dict-path [--input FILE] [-v] <command> [args]
//!
//! The document is read from stdin unless `--input` is given. The result is
//! written to stdout as JSON.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dict_utils::cli::{self, CliError};
use dict_utils::FlattenOptions;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "dict-path", version, about = "Query and reshape nested JSON by dot path")]
struct Args {
    /// Read the document from a file instead of stdin.
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Log to stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the value at PATH.
    Get {
        path: String,
        /// JSON value to print when the path is missing.
        #[arg(long)]
        default: Option<String>,
    },
    /// Print whether PATH exists.
    Has { path: String },
    /// Apply PATH=VALUE assignments; VALUE is JSON or a plain string.
    Set {
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Remove the value at PATH.
    Delete { path: String },
    /// Print every value stored under KEY at any depth.
    Collect { key: String },
    /// Flatten nested maps into joined keys.
    Flatten {
        #[arg(long, default_value = ".")]
        sep: String,
    },
    /// Rebuild nested maps from joined keys.
    Unflatten {
        #[arg(long, default_value = ".")]
        sep: String,
    },
    /// Drop null and empty values.
    Compact,
    /// Print the map nesting depth.
    Depth,
    /// Print every nested key path.
    Keys {
        #[arg(long, default_value = ".")]
        sep: String,
    },
    /// Deep-merge FILE over the document.
    Merge { file: PathBuf },
    /// Shallow diff from the document to FILE.
    Diff { file: PathBuf },
}

fn read_input(input: Option<&Path>) -> Result<String, CliError> {
    match input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run(args: Args) -> Result<String, CliError> {
    let doc = read_input(args.input.as_deref())?;
    let doc = doc.trim();
    match args.command {
        Command::Get { path, default } => cli::get(doc, &path, default.as_deref()),
        Command::Has { path } => cli::has(doc, &path),
        Command::Set { assignments } => cli::set(doc, &assignments),
        Command::Delete { path } => cli::delete(doc, &path),
        Command::Collect { key } => cli::collect(doc, &key),
        Command::Flatten { sep } => cli::flatten(doc, &FlattenOptions::with_separator(sep)),
        Command::Unflatten { sep } => cli::unflatten(doc, &FlattenOptions::with_separator(sep)),
        Command::Compact => cli::compact(doc),
        Command::Depth => cli::depth(doc),
        Command::Keys { sep } => cli::keys(doc, &FlattenOptions::with_separator(sep)),
        Command::Merge { file } => cli::merge(doc, &fs::read_to_string(file)?),
        Command::Diff { file } => cli::diff(doc, &fs::read_to_string(file)?),
    }
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{output}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
