use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    str::FromStr,
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::{query::DEFAULT_BASE_URL, render::Format};

#[derive(Parser, Debug)]
#[command(version, about = "Search Google Books from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log more (-v for debug, -vv for trace). RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for books matching a term and list them
    Search {
        /// Words to search for; several words form one search term
        #[arg(value_name = "TERM", required = true)]
        term: Vec<String>,

        /// Volume search endpoint to query
        #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Seconds to wait for the connection
        #[arg(long, value_name = "SECS", default_value_t = 15)]
        connect_timeout: u64,

        /// Seconds to wait for the response head and again for its body
        #[arg(long, value_name = "SECS", default_value_t = 10)]
        read_timeout: u64,

        #[command(flatten)]
        output: Output,
    },
    /// List the books in a saved search response
    Parse {
        /// Response file, or `-` for standard input
        #[arg(value_name = "SRC")]
        from: Source,

        #[command(flatten)]
        output: Output,
    },
}

#[derive(Args, Debug)]
pub struct Output {
    /// How to print the results
    #[arg(long, value_enum, default_value_t = Format::Plain)]
    pub format: Format,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where a raw search response is read from, which can either be
///
/// - standard input, written as `-`, or
/// - a file holding a previously saved response body.
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl FromStr for Source {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Source::Stdin);
        }
        // Resolve early so the error names the path the user typed.
        fs::canonicalize(s)
            .map(Source::File)
            .map_err(|e| format!("cannot open {s}: {e}"))
    }
}

impl Source {
    pub fn read_to_string(&self) -> anyhow::Result<String> {
        match self {
            Source::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("read response from stdin")?;
                Ok(buf)
            }
            Source::File(path) => fs::read_to_string(path)
                .with_context(|| format!("read response from {}", path.display())),
        }
    }
}
