use std::io::Write;

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::book::Book;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// One block per book: title, author and year, then the preview link
    #[default]
    Plain,
    /// A JSON array of books
    Json,
}

#[derive(Serialize)]
struct Row<'a> {
    title: &'a str,
    author: &'a str,
    url: &'a str,
    date: &'a str,
    year: &'a str,
}

/// Write `books` to `out` in list order.
pub fn render(out: &mut impl Write, books: &[Book], format: Format) -> anyhow::Result<()> {
    match format {
        Format::Plain => {
            for book in books {
                writeln!(
                    out,
                    "{}",
                    book.title().if_supports_color(Stream::Stdout, |t| t.bold())
                )?;
                writeln!(out, "  {}  ({})", book.author(), book.year())?;
                writeln!(
                    out,
                    "  {}",
                    book.url().if_supports_color(Stream::Stdout, |t| t.dimmed())
                )?;
            }
        }
        Format::Json => {
            let rows: Vec<Row<'_>> = books
                .iter()
                .map(|book| Row {
                    title: book.title(),
                    author: book.author(),
                    url: book.url(),
                    date: book.date(),
                    year: book.year(),
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &rows).context("serialise books")?;
            writeln!(out)?;
        }
    }
    Ok(())
}
