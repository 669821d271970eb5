//! Chunked classify-and-write driver.
//!
//! Reads a chunk, classifies it, writes it, repeats. Output rows keep the
//! input order; the header is written exactly once, before the first chunk.

use std::io::Write;

use anyhow::{Context, Result};
use roster_core::{ClassificationTally, NameDictionary, RawRecord, RecordClassifier};
use roster_types::ColumnNames;
use tracing::{debug, info, warn};

use crate::table::{ColumnIndex, CsvSink, RecordSource};

/// Rows per chunk when streaming CSV input.
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

/// Knobs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Headers of the contact columns.
    pub columns: ColumnNames,
    /// Rows read, classified and written per step; `0` is treated as `1`.
    pub chunk_size: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Chunks processed.
    pub chunks: u64,
    /// Data rows written, header excluded.
    pub rows: u64,
    /// Per-label counts over all rows.
    pub tally: ClassificationTally,
}

/// Classifies every row of `source` into `sink`.
pub fn run<S, W>(
    source: &mut S,
    sink: &mut CsvSink<W>,
    dictionary: &NameDictionary,
    options: &PipelineOptions,
) -> Result<PipelineReport>
where
    S: RecordSource + ?Sized,
    W: Write,
{
    let chunk_size = options.chunk_size.max(1);
    let headers = source.headers().to_vec();
    let columns = ColumnIndex::resolve(&headers, &options.columns);

    if columns.first_name.is_none() {
        warn!(column = %options.columns.first_name, "first-name column not found; treating as empty");
    }
    if columns.last_name.is_none() {
        warn!(column = %options.columns.last_name, "last-name column not found; treating as empty");
    }
    if columns.email.is_none() {
        debug!(column = %options.columns.email, "email column not found");
    }

    sink.write_header(&headers).context("failed to write output header")?;

    let classifier = RecordClassifier::new(dictionary);
    let mut report = PipelineReport::default();

    while let Some(rows) = source
        .next_chunk(chunk_size)
        .with_context(|| format!("failed to read chunk {}", report.chunks + 1))?
    {
        let records: Vec<RawRecord> = rows.iter().map(|row| columns.record(row)).collect();
        let (cleaned, tally) = classifier.classify_batch_tallied(&records);

        sink.write_chunk(&rows, &cleaned)
            .with_context(|| format!("failed to write chunk {}", report.chunks + 1))?;

        report.chunks += 1;
        report.rows += rows.len() as u64;
        report.tally.merge(tally);

        info!(chunk = report.chunks, rows = report.rows, "processed chunk");
    }

    sink.flush().context("failed to flush output")?;
    Ok(report)
}
