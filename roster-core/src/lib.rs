//! Contact classification core.
//!
//! Decides whether a contact row names a person, a business, or neither,
//! and produces display-cased first and last names.
//!
//! ## Pipeline
//!
//! - **[`casing`]**: raw names to display casing (`"O'BRIEN"` to `"O'Brien"`)
//! - **[`detect`]**: business keywords and surname shape checks
//! - **[`matcher`]**: dictionary and email based person signals
//! - **[`classify`]**: the ordered rule chain producing a [`CleanedRecord`]
//!
//! The [`dictionary::NameDictionary`] is built once by the caller and passed
//! by reference; nothing here performs I/O or keeps state between records.
//!
//! ```
//! use roster_core::{NameDictionary, RecordClassifier};
//! use roster_types::{RawRecord, RecordType};
//!
//! let dict = NameDictionary::from_names(["john"], ["smith"]);
//! let classifier = RecordClassifier::new(&dict);
//!
//! let out = classifier.classify_record(&RawRecord::new("JOHN", "smith", ""));
//! assert_eq!(out.first_name_clean, "John");
//! assert_eq!(out.record_type, RecordType::Person);
//! ```

#![warn(missing_docs)]

pub mod casing;
pub mod classify;
pub mod detect;
pub mod dictionary;
pub mod matcher;

pub use casing::{case_full_name, case_token};
pub use classify::{classify, ClassificationTally, RecordClassifier, Rule};
pub use dictionary::{NameDictionary, NameDictionaryProvider};

pub use roster_types::{CleanedRecord, RawRecord, RecordType};
