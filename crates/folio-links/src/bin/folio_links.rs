//! folio-links command line
//!
//! Resolves citation text the same way the publication list does.

use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use folio_links::{extract_journal_name, extract_year, Resolver, ResolverConfig};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio-links", version, about = "Resolve the best link for a citation")]
struct Cli {
    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Resolver configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the best external link (reads stdin when TEXT is omitted)
    Resolve { text: Option<String> },
    /// Extract the normalized title
    Title { text: Option<String> },
    /// Extract the journal name
    Journal { text: Option<String> },
    /// Infer the publication year
    Year {
        text: Option<String>,
        #[arg(long, default_value_t = 1990)]
        earliest: i32,
        #[arg(long, default_value_t = 2030)]
        latest: i32,
    },
}

fn input(text: Option<String>) -> io::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf.trim().to_string())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ResolverConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ResolverConfig::default(),
    };
    let resolver = Resolver::new(&config);

    match cli.command {
        Command::Resolve { text } => {
            let resolution = resolver.resolve_text(&input(text)?);
            if cli.json {
                println!(
                    "{}",
                    json!({
                        "url": resolution.url,
                        "type": resolution.label(),
                        "tooltip": resolution.tooltip(),
                    })
                );
            } else {
                println!("{}\t{}", resolution.label(), resolution.url);
            }
        }
        Command::Title { text } => {
            let title = resolver.title(&input(text)?);
            if cli.json {
                println!("{}", json!({ "title": title }));
            } else {
                println!("{}", title);
            }
        }
        Command::Journal { text } => {
            let journal = extract_journal_name(&input(text)?);
            if cli.json {
                println!("{}", json!({ "journal": journal }));
            } else if let Some(journal) = journal {
                println!("{}", journal);
            }
        }
        Command::Year {
            text,
            earliest,
            latest,
        } => {
            let year = extract_year(&input(text)?, earliest..=latest);
            if cli.json {
                println!("{}", json!({ "year": year }));
            } else if let Some(year) = year {
                println!("{}", year);
            }
        }
    }

    Ok(())
}
