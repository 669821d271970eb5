//! Tabular record sources (CSV, Excel) and the CSV output sink.
//!
//! Sources hand out rows in chunks so large CSV exports never have to be held
//! in memory at once. Excel workbooks are read whole (calamine has no
//! streaming reader) and then chunked the same way.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use roster_types::{
    CleanedRecord, ColumnNames, RawRecord, SourceError, FIRST_NAME_CLEAN_COLUMN,
    LAST_NAME_CLEAN_COLUMN, TYPE_COLUMN,
};

/// One input row, every cell as text.
pub type Row = Vec<String>;

/// Supported input file families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated text, streamed.
    Csv,
    /// Spreadsheet workbook (xlsx, xls, xlsb, ods), first sheet only.
    Workbook,
}

impl InputFormat {
    /// Detects the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xls" | "xlsx" | "xlsb" | "ods" => Ok(InputFormat::Workbook),
            _ => Err(SourceError::UnsupportedFormat { extension }),
        }
    }
}

/// Where the cleaned output goes by default: `<stem>_output.csv` beside the input.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_output.csv", stem))
}

/// Returns `true` if `a` and `b` name the same file.
///
/// A path that does not exist yet is resolved through its parent directory,
/// so `out.csv` and `./out.csv` still compare equal.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (resolve_path(a), resolve_path(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn resolve_path(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Some(canonical);
    }

    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Some(parent.canonicalize().ok()?.join(name))
}

/// Decode a cell as UTF-8, falling back to Windows-1252 (common for Excel-exported CSVs).
pub fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// A table that yields its rows in bounded chunks.
pub trait RecordSource {
    /// Header row, as read.
    fn headers(&self) -> &[String];

    /// Next chunk of at most `max_rows` rows, or `None` when exhausted.
    fn next_chunk(&mut self, max_rows: usize) -> Result<Option<Vec<Row>>, SourceError>;
}

/// Opens `path` as the record source matching its extension.
pub fn open_source(path: &Path) -> Result<Box<dyn RecordSource>, SourceError> {
    match InputFormat::from_path(path)? {
        InputFormat::Csv => Ok(Box::new(CsvSource::open(path)?)),
        InputFormat::Workbook => Ok(Box::new(WorkbookSource::open(path)?)),
    }
}

/// Streaming CSV source. The first line is the header.
pub struct CsvSource<R: Read> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    record: csv::ByteRecord,
}

impl CsvSource<File> {
    /// Opens a CSV file for streaming.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvSource<R> {
    /// Wraps any reader; reads the header row immediately.
    pub fn from_reader(rdr: R) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(rdr);

        let mut headers: Vec<String> = reader
            .byte_headers()
            .map_err(parse_error)?
            .iter()
            .map(decode_field)
            .collect();

        if let Some(first) = headers.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }

        Ok(Self {
            reader,
            headers,
            record: csv::ByteRecord::new(),
        })
    }
}

impl<R: Read> RecordSource for CsvSource<R> {
    fn headers(&self) -> &[String] {
        &self.headers
    }

    fn next_chunk(&mut self, max_rows: usize) -> Result<Option<Vec<Row>>, SourceError> {
        let mut rows = Vec::with_capacity(max_rows.min(4096));

        while rows.len() < max_rows {
            let more = self
                .reader
                .read_byte_record(&mut self.record)
                .map_err(parse_error)?;
            if !more {
                break;
            }
            rows.push(self.record.iter().map(decode_field).collect());
        }

        Ok(if rows.is_empty() { None } else { Some(rows) })
    }
}

fn parse_error(e: csv::Error) -> SourceError {
    SourceError::Parse {
        reason: e.to_string(),
    }
}

/// Workbook source over the first worksheet. The first row is the header.
pub struct WorkbookSource {
    headers: Vec<String>,
    rows: std::vec::IntoIter<Row>,
}

impl WorkbookSource {
    /// Reads the first sheet of an Excel or ODS workbook.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| SourceError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SourceError::EmptyWorkbook)?
            .map_err(|e| SourceError::Parse {
                reason: format!("failed to read first sheet: {}", e),
            })?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        Ok(Self::from_rows(rows))
    }

    /// Builds a source from in-memory rows; the first row is the header.
    pub fn from_rows(mut rows: Vec<Row>) -> Self {
        let headers = if rows.is_empty() {
            Vec::new()
        } else {
            rows.remove(0)
        };

        Self {
            headers,
            rows: rows.into_iter(),
        }
    }
}

impl RecordSource for WorkbookSource {
    fn headers(&self) -> &[String] {
        &self.headers
    }

    fn next_chunk(&mut self, max_rows: usize) -> Result<Option<Vec<Row>>, SourceError> {
        let chunk: Vec<Row> = self.rows.by_ref().take(max_rows).collect();
        Ok(if chunk.is_empty() { None } else { Some(chunk) })
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Positions of the contact columns within a header row.
///
/// A column that is absent reads as an empty string in every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    /// Position of the first-name column.
    pub first_name: Option<usize>,
    /// Position of the last-name column.
    pub last_name: Option<usize>,
    /// Position of the email column.
    pub email: Option<usize>,
}

impl ColumnIndex {
    /// Locates `names` in `headers` (exact match, first occurrence wins).
    pub fn resolve(headers: &[String], names: &ColumnNames) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            first_name: find(&names.first_name),
            last_name: find(&names.last_name),
            email: find(&names.email),
        }
    }

    /// Extracts the contact fields from one row.
    pub fn record(&self, row: &[String]) -> RawRecord {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .cloned()
                .unwrap_or_default()
        };
        RawRecord {
            first_name: cell(self.first_name),
            last_name: cell(self.last_name),
            email: cell(self.email),
        }
    }
}

/// CSV writer that appends the three cleaned columns to every input row.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    width: usize,
    rows_written: u64,
}

impl CsvSink<File> {
    /// Creates (or truncates) the output file.
    pub fn create(path: &Path) -> csv::Result<Self> {
        Ok(Self::from_writer(File::create(path)?))
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps any writer.
    pub fn from_writer(wtr: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().flexible(true).from_writer(wtr),
            width: 0,
            rows_written: 0,
        }
    }

    /// Writes the original headers followed by the cleaned column headers.
    ///
    /// Rows shorter than the header are padded to this width.
    pub fn write_header(&mut self, headers: &[String]) -> csv::Result<()> {
        self.width = headers.len();
        self.writer.write_record(
            headers
                .iter()
                .map(String::as_str)
                .chain([FIRST_NAME_CLEAN_COLUMN, LAST_NAME_CLEAN_COLUMN, TYPE_COLUMN]),
        )
    }

    /// Writes one chunk, pairing each row with its classification.
    pub fn write_chunk(&mut self, rows: &[Row], cleaned: &[CleanedRecord]) -> csv::Result<()> {
        debug_assert_eq!(rows.len(), cleaned.len(), "every row needs one cleaned record");

        for (row, clean) in rows.iter().zip(cleaned) {
            let padding = self.width.saturating_sub(row.len());
            self.writer.write_record(
                row.iter()
                    .map(String::as_str)
                    .chain(std::iter::repeat("").take(padding))
                    .chain([
                        clean.first_name_clean.as_str(),
                        clean.last_name_clean.as_str(),
                        clean.record_type.label(),
                    ]),
            )?;
            self.rows_written += 1;
        }

        Ok(())
    }

    /// Data rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flushes buffered output.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, std::io::Error> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_types::RecordType;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.csv")), Ok(InputFormat::Csv));
        assert_eq!(InputFormat::from_path(Path::new("a.CSV")), Ok(InputFormat::Csv));
        assert_eq!(InputFormat::from_path(Path::new("a.xlsx")), Ok(InputFormat::Workbook));
        assert_eq!(InputFormat::from_path(Path::new("a.xls")), Ok(InputFormat::Workbook));
        assert_eq!(
            InputFormat::from_path(Path::new("a.txt")),
            Err(SourceError::UnsupportedFormat { extension: "txt".into() })
        );
        assert_eq!(
            InputFormat::from_path(Path::new("noext")),
            Err(SourceError::UnsupportedFormat { extension: String::new() })
        );
    }

    #[test]
    fn output_beside_input() {
        assert_eq!(
            output_path(Path::new("/data/contacts.csv")),
            PathBuf::from("/data/contacts_output.csv")
        );
        assert_eq!(
            output_path(Path::new("list.xlsx")),
            PathBuf::from("list_output.csv")
        );
    }

    #[test]
    fn same_file_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("contacts.csv");
        std::fs::write(&input, "FirstName\n").unwrap();

        let dotted = dir.path().join(".").join("contacts.csv");
        assert!(same_file(&input, &dotted));
        assert!(same_file(&input, &input));
        assert!(!same_file(&input, &output_path(&input)));

        let fresh = dir.path().join("new.csv");
        assert!(same_file(&fresh, &dir.path().join(".").join("new.csv")));
        assert!(!same_file(&input, Path::new("/definitely/not/here/contacts.csv")));
    }

    #[test]
    fn decode_windows_1252_fallback() {
        assert_eq!(decode_field(b"Zoe"), "Zoe");
        assert_eq!(decode_field("Zoë".as_bytes()), "Zoë");
        assert_eq!(decode_field(b"Zo\xEB"), "Zoë");
    }

    #[test]
    fn csv_source_chunks_in_order() {
        let data = "FirstName,LastName\na,b\nc,d\ne,f\n";
        let mut src = CsvSource::from_reader(data.as_bytes()).unwrap();
        assert_eq!(src.headers(), ["FirstName", "LastName"]);

        let c1 = src.next_chunk(2).unwrap().unwrap();
        assert_eq!(c1, vec![row(&["a", "b"]), row(&["c", "d"])]);
        let c2 = src.next_chunk(2).unwrap().unwrap();
        assert_eq!(c2, vec![row(&["e", "f"])]);
        assert!(src.next_chunk(2).unwrap().is_none());
    }

    #[test]
    fn csv_source_strips_bom_and_allows_ragged_rows() {
        let data = "\u{feff}FirstName,LastName,Email\nJohn\nMary,Smith,m@x.com,extra\n";
        let mut src = CsvSource::from_reader(data.as_bytes()).unwrap();
        assert_eq!(src.headers()[0], "FirstName");

        let rows = src.next_chunk(10).unwrap().unwrap();
        assert_eq!(rows[0], row(&["John"]));
        assert_eq!(rows[1].len(), 4);
    }

    #[test]
    fn workbook_source_from_rows() {
        let mut src = WorkbookSource::from_rows(vec![
            row(&["FirstName", "LastName"]),
            row(&["a", "b"]),
            row(&["c", "d"]),
        ]);
        assert_eq!(src.headers(), ["FirstName", "LastName"]);
        assert_eq!(src.next_chunk(1).unwrap().unwrap(), vec![row(&["a", "b"])]);
        assert_eq!(src.next_chunk(5).unwrap().unwrap(), vec![row(&["c", "d"])]);
        assert!(src.next_chunk(5).unwrap().is_none());
    }

    #[test]
    fn empty_workbook_has_no_headers() {
        let mut src = WorkbookSource::from_rows(Vec::new());
        assert!(src.headers().is_empty());
        assert!(src.next_chunk(5).unwrap().is_none());
    }

    #[test]
    fn cell_text_renders_values() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("Ann".into())), "Ann");
        assert_eq!(cell_text(&Data::Int(7)), "7");
    }

    #[test]
    fn column_index_missing_columns_read_empty() {
        let headers = row(&["Email", "FirstName", "Company"]);
        let idx = ColumnIndex::resolve(&headers, &ColumnNames::default());
        assert_eq!(idx.first_name, Some(1));
        assert_eq!(idx.last_name, None);
        assert_eq!(idx.email, Some(0));

        let rec = idx.record(&row(&["j@x.com", "John", "Acme"]));
        assert_eq!(rec, RawRecord::new("John", "", "j@x.com"));

        let short = idx.record(&row(&["j@x.com"]));
        assert_eq!(short, RawRecord::new("", "", "j@x.com"));
    }

    #[test]
    fn sink_appends_cleaned_columns() {
        let mut sink = CsvSink::from_writer(Vec::new());
        sink.write_header(&row(&["FirstName", "LastName", "Email"])).unwrap();
        sink.write_chunk(
            &[row(&["JOHN", "smith", ""]), row(&["acme"])],
            &[
                CleanedRecord {
                    first_name_clean: "John".into(),
                    last_name_clean: "Smith".into(),
                    record_type: RecordType::Person,
                },
                CleanedRecord {
                    first_name_clean: "Acme".into(),
                    last_name_clean: String::new(),
                    record_type: RecordType::Undetermined,
                },
            ],
        )
        .unwrap();
        assert_eq!(sink.rows_written(), 2);

        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "FirstName,LastName,Email,FirstName_Clean,LastName_Clean,Type\n\
             JOHN,smith,,John,Smith,Person\n\
             acme,,,Acme,,Undetermined\n"
        );
    }
}
