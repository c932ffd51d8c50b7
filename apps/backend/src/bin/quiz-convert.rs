//! Convert a quiz DOCX on disk into `{ "listas": [...] }` JSON.
//!
//! ```text
//! quiz-convert questions/pack-1.docx -o output.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use quiz_core::{parse_docx, ConvertResponse};

#[derive(Debug, Parser)]
#[command(name = "quiz-convert", version, about = "Convert a quiz DOCX into JSON")]
struct Args {
    /// DOCX file to convert
    input: PathBuf,

    /// Write the JSON to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let listas = parse_docx(&bytes)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;
    let response = ConvertResponse::from(listas);

    let json = if args.compact {
        serde_json::to_string(&response)?
    } else {
        serde_json::to_string_pretty(&response)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                lists = response.listas.len(),
                "Conversion finished, saved to {}",
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
