//! roster - contact list cleaner
//!
//! Reads a CSV or Excel contact export, fixes the casing of the first and
//! last names, labels every row Person / Business / Undetermined, and writes
//! `<input>_output.csv` with three extra columns.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use roster_cli::{
    open_source, output_path, same_file, CsvSink, InputFormat, PipelineOptions,
    ReferenceLoader, DEFAULT_CHUNK_SIZE,
};
use roster_core::NameDictionaryProvider;
use roster_types::{ColumnNames, ReferenceSources};
use tracing::{error, info};

/// Command-line arguments for roster
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Classify contact lists and normalize name casing")]
#[command(version)]
struct Args {
    /// Source file (.csv, .xls, .xlsx); prompted for when omitted
    input: Option<PathBuf>,

    /// Output CSV path [default: <input stem>_output.csv]
    #[arg(short, long, env = "ROSTER_OUTPUT")]
    output: Option<PathBuf>,

    /// Rows per chunk when streaming CSV input
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, env = "ROSTER_CHUNK_SIZE")]
    chunk_size: usize,

    /// Header of the first-name column
    #[arg(long, default_value = ColumnNames::DEFAULT_FIRST_NAME, env = "ROSTER_FIRST_COLUMN")]
    first_column: String,

    /// Header of the last-name column
    #[arg(long, default_value = ColumnNames::DEFAULT_LAST_NAME, env = "ROSTER_LAST_COLUMN")]
    last_column: String,

    /// Header of the email column
    #[arg(long, default_value = ColumnNames::DEFAULT_EMAIL, env = "ROSTER_EMAIL_COLUMN")]
    email_column: String,

    /// Extra given-name list URL (repeatable)
    #[arg(long = "given-url", env = "ROSTER_GIVEN_URLS", value_delimiter = ',')]
    given_urls: Vec<String>,

    /// Extra surname list URL (repeatable)
    #[arg(long = "surname-url", env = "ROSTER_SURNAME_URLS", value_delimiter = ',')]
    surname_urls: Vec<String>,

    /// Local given-name file, one name per line (repeatable)
    #[arg(long = "given-file", env = "ROSTER_GIVEN_FILES", value_delimiter = ',')]
    given_files: Vec<PathBuf>,

    /// Local surname file, one name per line (repeatable)
    #[arg(long = "surname-file", env = "ROSTER_SURNAME_FILES", value_delimiter = ',')]
    surname_files: Vec<PathBuf>,

    /// Skip the built-in US name lists
    #[arg(long, env = "ROSTER_NO_DEFAULT_LISTS")]
    no_default_lists: bool,
}

impl Args {
    fn reference_sources(&self) -> ReferenceSources {
        ReferenceSources {
            include_defaults: !self.no_default_lists,
            given_urls: self.given_urls.clone(),
            surname_urls: self.surname_urls.clone(),
            given_files: self.given_files.clone(),
            surname_files: self.surname_files.clone(),
        }
    }

    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            columns: ColumnNames {
                first_name: self.first_column.clone(),
                last_name: self.last_column.clone(),
                email: self.email_column.clone(),
            },
            chunk_size: self.chunk_size,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("roster=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let input = match &args.input {
        Some(path) => path.clone(),
        None => prompt_for_path()?,
    };

    if !input.exists() {
        println!("File not found.");
        return Ok(ExitCode::FAILURE);
    }

    let format = match InputFormat::from_path(&input) {
        Ok(format) => format,
        Err(_) => {
            println!("Unsupported file type. Please provide .csv, .xls, or .xlsx.");
            return Ok(ExitCode::FAILURE);
        }
    };

    let output = args.output.clone().unwrap_or_else(|| output_path(&input));
    if same_file(&input, &output) {
        println!("Output path must differ from the input file.");
        return Ok(ExitCode::FAILURE);
    }
    info!(input = %input.display(), ?format, output = %output.display(), "starting");

    println!("Loading reference name lists...");
    let dictionary = ReferenceLoader::new(args.reference_sources())
        .load()
        .context("failed to load reference name lists")?;

    let mut source = open_source(&input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let mut sink = CsvSink::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    let report = roster_cli::run(
        source.as_mut(),
        &mut sink,
        &dictionary,
        &args.pipeline_options(),
    )?;

    println!("Done. Wrote {}", output.display());
    println!("{} rows: {}", report.rows, report.tally);

    Ok(ExitCode::SUCCESS)
}

/// Asks for the source path on stdin.
fn prompt_for_path() -> Result<PathBuf> {
    print!("Enter path to source file (CSV or XLSX): ");
    io::stdout().flush().context("failed to flush prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read source path")?;

    Ok(PathBuf::from(line.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["roster", "contacts.csv"]);
        assert_eq!(args.input, Some(PathBuf::from("contacts.csv")));
        assert_eq!(args.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(args.pipeline_options(), PipelineOptions::default());
        assert_eq!(args.reference_sources(), ReferenceSources::default());
    }

    #[test]
    fn list_and_column_overrides() {
        let args = Args::parse_from([
            "roster",
            "--no-default-lists",
            "--given-file",
            "a.txt",
            "--given-file",
            "b.txt",
            "--surname-url",
            "https://example.com/s.txt",
            "--first-column",
            "First",
            "--chunk-size",
            "10",
        ]);
        assert!(args.input.is_none());

        let sources = args.reference_sources();
        assert!(!sources.include_defaults);
        assert_eq!(sources.given_files, [PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(sources.surname_urls, ["https://example.com/s.txt"]);

        let options = args.pipeline_options();
        assert_eq!(options.columns.first_name, "First");
        assert_eq!(options.columns.last_name, "LastName");
        assert_eq!(options.chunk_size, 10);
    }
}
