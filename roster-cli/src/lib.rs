//! `roster-cli`: file and network plumbing around `roster-core`.
//!
//! - **sources**: reference name lists over HTTP and from local files
//! - **table**: CSV/Excel record sources and the CSV output sink
//! - **pipeline**: the chunked read, classify, write loop

#![warn(missing_docs)]

pub mod pipeline;
pub mod sources;
pub mod table;

pub use pipeline::{run, PipelineOptions, PipelineReport, DEFAULT_CHUNK_SIZE};
pub use sources::ReferenceLoader;
pub use table::{open_source, output_path, same_file, CsvSink, InputFormat, RecordSource};
