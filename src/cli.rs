//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `symload`.
#[derive(Debug, Parser)]
#[command(name = "symload", version, about = "Resolve symbols to source files and inflect nouns")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the file a symbol resolves to.
    Resolve {
        /// Fully-qualified symbol name.
        symbol: String,
        /// Resolver tables and options.
        #[command(flatten)]
        tables: TableArgs,
    },
    /// Load symbols once each and report where they came from.
    Load {
        /// Fully-qualified symbol names, loaded in order.
        #[arg(required = true)]
        symbols: Vec<String>,
        /// Resolver tables and options.
        #[command(flatten)]
        tables: TableArgs,
    },
    /// List the registered namespaces and overrides.
    Namespaces {
        /// Resolver tables and options.
        #[command(flatten)]
        tables: TableArgs,
    },
    /// Print the plural form of a noun.
    Plural {
        /// Noun to inflect.
        word: String,
    },
    /// Print the singular form of a noun.
    Singular {
        /// Noun to inflect.
        word: String,
    },
}

impl Command {
    /// Short description used to label recorded traces.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Resolve { symbol, .. } => format!("resolve {symbol}"),
            Self::Load { symbols, .. } => format!("load {}", symbols.join(" ")),
            Self::Namespaces { .. } => "namespaces".to_string(),
            Self::Plural { word } => format!("plural {word}"),
            Self::Singular { word } => format!("singular {word}"),
        }
    }
}

/// Flags describing the resolver's tables, layered over an optional manifest.
#[derive(Debug, Clone, Default, Args)]
pub struct TableArgs {
    /// YAML loader manifest to start from.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Append a directory to a namespace prefix.
    #[arg(short = 'n', long = "namespace", value_name = "PREFIX=DIR", value_parser = parse_pair)]
    pub namespaces: Vec<(String, String)>,
    /// Map an exact symbol to a file.
    #[arg(short = 'o', long = "override", value_name = "SYMBOL=PATH", value_parser = parse_pair)]
    pub overrides: Vec<(String, String)>,
    /// Namespace separator.
    #[arg(long)]
    pub separator: Option<String>,
    /// Source file extension, without the leading dot.
    #[arg(long)]
    pub extension: Option<String>,
    /// Fall back to the namespace search when an override file is missing.
    #[arg(long)]
    pub lenient_overrides: bool,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}
