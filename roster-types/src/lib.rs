//! Core types shared by the roster contact classifier.
//!
//! This crate provides the plain data that crosses crate boundaries:
//!
//! - **Records**: [`RawRecord`] in, [`CleanedRecord`] out
//! - **Labels**: [`RecordType`] and its literal output strings
//! - **Configuration**: [`ColumnNames`] and [`ReferenceSources`]
//! - **Errors**: [`DictionaryError`] and [`SourceError`] for the outer surfaces
//!
//! It has no dependencies so the core and the CLI can share it freely.

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;
use std::path::PathBuf;

/// Classification outcome for a single contact record.
///
/// `#[repr(u8)]` keeps the label one byte wide inside result vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordType {
    /// The names look like a human being.
    Person = 0,
    /// The names carry organizational keywords or non-person characters.
    Business = 1,
    /// No rule produced a firm signal.
    Undetermined = 2,
}

impl RecordType {
    /// All labels, in declaration order.
    pub const ALL: [RecordType; 3] = [
        RecordType::Person,
        RecordType::Business,
        RecordType::Undetermined,
    ];

    /// The literal label written to output files.
    #[must_use]
    #[inline(always)]
    pub const fn label(self) -> &'static str {
        match self {
            RecordType::Person => "Person",
            RecordType::Business => "Business",
            RecordType::Undetermined => "Undetermined",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not one of the three record labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRecordTypeError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseRecordTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown record type: {:?}", self.input)
    }
}

impl core::error::Error for ParseRecordTypeError {}

impl FromStr for RecordType {
    type Err = ParseRecordTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Person" => Ok(RecordType::Person),
            "Business" => Ok(RecordType::Business),
            "Undetermined" => Ok(RecordType::Undetermined),
            other => Err(ParseRecordTypeError {
                input: other.to_string(),
            }),
        }
    }
}

/// A contact row as read from the source file.
///
/// Every field may be empty. Missing columns are represented as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Raw first-name cell.
    pub first_name: String,
    /// Raw last-name cell.
    pub last_name: String,
    /// Raw email cell.
    pub email: String,
}

impl RawRecord {
    /// Creates a record from its three fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// The classifier's output for one [`RawRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRecord {
    /// First name with display casing applied.
    pub first_name_clean: String,
    /// Last name with display casing applied.
    pub last_name_clean: String,
    /// Classification label.
    pub record_type: RecordType,
}

impl fmt::Display for CleanedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}]",
            self.first_name_clean, self.last_name_clean, self.record_type
        )
    }
}

/// Header of the appended cleaned first-name column.
pub const FIRST_NAME_CLEAN_COLUMN: &str = "FirstName_Clean";
/// Header of the appended cleaned last-name column.
pub const LAST_NAME_CLEAN_COLUMN: &str = "LastName_Clean";
/// Header of the appended classification column.
pub const TYPE_COLUMN: &str = "Type";

/// Input column names used to locate the contact fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    /// First-name column header.
    pub first_name: String,
    /// Last-name column header.
    pub last_name: String,
    /// Email column header.
    pub email: String,
}

impl ColumnNames {
    /// Default first-name header.
    pub const DEFAULT_FIRST_NAME: &'static str = "FirstName";
    /// Default last-name header.
    pub const DEFAULT_LAST_NAME: &'static str = "LastName";
    /// Default email header.
    pub const DEFAULT_EMAIL: &'static str = "Email";
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            first_name: Self::DEFAULT_FIRST_NAME.to_string(),
            last_name: Self::DEFAULT_LAST_NAME.to_string(),
            email: Self::DEFAULT_EMAIL.to_string(),
        }
    }
}

/// Built-in list of US given names.
pub const DEFAULT_GIVEN_NAMES_URL: &str =
    "https://raw.githubusercontent.com/smashew/NameDatabases/master/NamesDatabases/first%20names/us.txt";
/// Built-in list of US surnames.
pub const DEFAULT_SURNAMES_URL: &str =
    "https://raw.githubusercontent.com/smashew/NameDatabases/master/NamesDatabases/surnames/us.txt";

/// Where reference name lists are loaded from.
///
/// Lists from every source are unioned into one dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSources {
    /// Fetch the built-in default lists in addition to the extras.
    pub include_defaults: bool,
    /// Extra given-name list URLs.
    pub given_urls: Vec<String>,
    /// Extra surname list URLs.
    pub surname_urls: Vec<String>,
    /// Extra local given-name files, one name per line.
    pub given_files: Vec<PathBuf>,
    /// Extra local surname files, one name per line.
    pub surname_files: Vec<PathBuf>,
}

impl Default for ReferenceSources {
    fn default() -> Self {
        Self {
            include_defaults: true,
            given_urls: Vec::new(),
            surname_urls: Vec::new(),
            given_files: Vec::new(),
            surname_files: Vec::new(),
        }
    }
}

impl ReferenceSources {
    /// Sources with no network defaults; only explicitly added lists are used.
    pub const fn offline() -> Self {
        Self {
            include_defaults: false,
            given_urls: Vec::new(),
            surname_urls: Vec::new(),
            given_files: Vec::new(),
            surname_files: Vec::new(),
        }
    }

    /// Given-name URLs to fetch, defaults first.
    pub fn given_url_list(&self) -> Vec<&str> {
        Self::with_default(self.include_defaults, DEFAULT_GIVEN_NAMES_URL, &self.given_urls)
    }

    /// Surname URLs to fetch, defaults first.
    pub fn surname_url_list(&self) -> Vec<&str> {
        Self::with_default(self.include_defaults, DEFAULT_SURNAMES_URL, &self.surname_urls)
    }

    fn with_default<'a>(include: bool, default: &'a str, extra: &'a [String]) -> Vec<&'a str> {
        let mut out = Vec::with_capacity(extra.len() + 1);
        if include {
            out.push(default);
        }
        out.extend(extra.iter().map(String::as_str));
        out
    }
}

/// Errors raised while loading reference name lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    /// The request for a remote list failed before a response arrived.
    Fetch {
        /// URL of the list.
        source: String,
        /// Transport error message.
        reason: String,
    },
    /// The remote list answered with a non-success status.
    Status {
        /// URL of the list.
        source: String,
        /// HTTP status code.
        status: u16,
    },
    /// A local list exists but could not be read.
    Read {
        /// Path of the list.
        path: PathBuf,
        /// I/O error message.
        reason: String,
    },
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryError::Fetch { source, reason } => {
                write!(f, "failed to fetch name list {}: {}", source, reason)
            }
            DictionaryError::Status { source, status } => {
                write!(f, "name list {} returned HTTP {}", source, status)
            }
            DictionaryError::Read { path, reason } => {
                write!(f, "failed to read name list {}: {}", path.display(), reason)
            }
        }
    }
}

impl core::error::Error for DictionaryError {}

/// Errors raised while opening or reading a record source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The file extension is not a supported tabular format.
    UnsupportedFormat {
        /// The extension that was seen, lowercased (may be empty).
        extension: String,
    },
    /// The file could not be opened.
    Open {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error message.
        reason: String,
    },
    /// A row or cell could not be decoded.
    Parse {
        /// Underlying error message.
        reason: String,
    },
    /// The workbook contains no worksheets.
    EmptyWorkbook,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::UnsupportedFormat { extension } => {
                write!(
                    f,
                    "unsupported file type {:?}: expected .csv, .xls or .xlsx",
                    extension
                )
            }
            SourceError::Open { path, reason } => {
                write!(f, "cannot open {}: {}", path.display(), reason)
            }
            SourceError::Parse { reason } => write!(f, "malformed input: {}", reason),
            SourceError::EmptyWorkbook => write!(f, "workbook contains no sheets"),
        }
    }
}

impl core::error::Error for SourceError {}
