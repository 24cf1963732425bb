use std::{io, time::Duration};

use clap::Parser;
use indicatif::ProgressBar;
use owo_colors::{OwoColorize, Stream};
use tracing::debug;

use crate::{
    book::Book,
    cli::{Cli, Command},
    fetcher::FetchConfig,
    render::Format,
};

mod book;
mod cli;
mod extractor;
mod fetcher;
mod query;
mod render;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // RUST_LOG wins over the flags.
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    debug!(?args, "CLI arguments parsed");

    let (books, format) = match args.command {
        Command::Search {
            term,
            base_url,
            connect_timeout,
            read_timeout,
            output,
        } => {
            let term = term.join(" ");
            let url = query::query_url(&base_url, &term)?;
            let config = FetchConfig {
                connect_timeout: Duration::from_secs(connect_timeout),
                read_timeout: Duration::from_secs(read_timeout),
            };

            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("Searching for \"{}\"", term.trim()));
            spinner.enable_steady_tick(Duration::from_millis(100));
            let books = fetcher::fetch_books(&config, &url);
            spinner.finish_and_clear();
            (books, output.format)
        }
        Command::Parse { from, output } => {
            let raw = from.read_to_string()?;
            (extractor::extract(Some(&raw)), output.format)
        }
    };

    show(books, format)
}

/// Print the result list. No books, for whatever reason, is not an error.
fn show(books: Option<Vec<Book>>, format: Format) -> anyhow::Result<()> {
    let books = books.unwrap_or_default();
    render::render(&mut io::stdout().lock(), &books, format)?;
    if books.is_empty() {
        eprintln!("No books found.");
        return Ok(());
    }
    eprintln!(
        "{}",
        format!("✓ {}", books.len()).if_supports_color(Stream::Stderr, |t| t.green())
    );
    Ok(())
}
