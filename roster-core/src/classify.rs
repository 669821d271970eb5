//! Per-record classification.
//!
//! Rules run in a fixed order and the first one that fires decides:
//!
//! | order | rule              | input            | outcome      |
//! |-------|-------------------|------------------|--------------|
//! | 1     | business signals  | raw names        | Business     |
//! | 2     | dictionary match  | cleaned names    | Person       |
//! | 3     | email match       | email + cleaned  | Person       |
//! | 4     | fallback          | cleaned names    | Person       |
//! | 5     | no signal         |                  | Undetermined |
//!
//! The fallback fires when the first word of the cleaned first name is a
//! known given name and the cleaned last name is a plausible surname.
//!
//! Cleaned names are computed once and returned whatever the outcome.

use core::fmt;

use roster_types::{CleanedRecord, RawRecord, RecordType};
use tracing::{debug, trace};

use crate::casing::case_full_name;
use crate::detect::{looks_like_business, plausible_surname};
use crate::dictionary::NameDictionary;
use crate::matcher::{email_supports_person, is_person};

/// The rule that decided a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rule {
    /// Business keywords or non-person characters in the raw names.
    Business = 0,
    /// Cleaned names found in the reference dictionary.
    DictionaryMatch = 1,
    /// Email local part spells out the cleaned names.
    EmailMatch = 2,
    /// Known first word plus a plausible surname.
    Fallback = 3,
    /// Nothing fired.
    NoSignal = 4,
}

impl Rule {
    /// Label produced by this rule.
    #[must_use]
    #[inline(always)]
    pub const fn record_type(self) -> RecordType {
        match self {
            Rule::Business => RecordType::Business,
            Rule::DictionaryMatch | Rule::EmailMatch | Rule::Fallback => RecordType::Person,
            Rule::NoSignal => RecordType::Undetermined,
        }
    }
}

/// Runs the rule chain on one record whose names are already cleaned.
pub fn decide(
    first_raw: &str,
    last_raw: &str,
    email: &str,
    first_clean: &str,
    last_clean: &str,
    dictionary: &NameDictionary,
) -> Rule {
    let business = looks_like_business(first_raw, last_raw);
    if business {
        return Rule::Business;
    }

    if is_person(first_clean, last_clean, dictionary) {
        return Rule::DictionaryMatch;
    }

    if email_supports_person(email, first_clean, last_clean) {
        return Rule::EmailMatch;
    }

    let known_first_word = first_clean
        .split_whitespace()
        .next()
        .is_some_and(|word| dictionary.is_given_name(&word.to_lowercase()));

    if known_first_word && plausible_surname(last_clean) && !business {
        return Rule::Fallback;
    }

    Rule::NoSignal
}

/// Cleans and classifies one contact.
///
/// # Examples
///
/// ```
/// use roster_core::classify::classify;
/// use roster_core::dictionary::NameDictionary;
/// use roster_types::RecordType;
///
/// let dict = NameDictionary::from_names(["mary", "jane"], ["obrien"]);
/// let out = classify("MARY-JANE", "O'BRIEN", "", &dict);
///
/// assert_eq!(out.first_name_clean, "Mary-Jane");
/// assert_eq!(out.last_name_clean, "O'Brien");
/// assert_eq!(out.record_type, RecordType::Person);
/// ```
pub fn classify(
    first_raw: &str,
    last_raw: &str,
    email: &str,
    dictionary: &NameDictionary,
) -> CleanedRecord {
    let first_clean = case_full_name(first_raw);
    let last_clean = case_full_name(last_raw);

    let rule = decide(first_raw, last_raw, email, &first_clean, &last_clean, dictionary);
    trace!(first = %first_clean, last = %last_clean, ?rule, "classified record");

    CleanedRecord {
        first_name_clean: first_clean,
        last_name_clean: last_clean,
        record_type: rule.record_type(),
    }
}

/// Classifier bound to one shared dictionary.
///
/// Holds no per-record state; any number of classifiers may borrow the same
/// dictionary from different threads.
#[derive(Debug, Clone, Copy)]
pub struct RecordClassifier<'d> {
    dictionary: &'d NameDictionary,
}

impl<'d> RecordClassifier<'d> {
    /// Creates a classifier over `dictionary`.
    #[inline]
    pub const fn new(dictionary: &'d NameDictionary) -> Self {
        Self { dictionary }
    }

    /// The dictionary this classifier reads.
    #[inline(always)]
    pub const fn dictionary(&self) -> &'d NameDictionary {
        self.dictionary
    }

    /// Cleans and classifies one record.
    #[inline]
    pub fn classify_record(&self, record: &RawRecord) -> CleanedRecord {
        classify(
            &record.first_name,
            &record.last_name,
            &record.email,
            self.dictionary,
        )
    }

    /// Cleans and classifies a batch, preserving order and count.
    pub fn classify_batch(&self, records: &[RawRecord]) -> Vec<CleanedRecord> {
        records.iter().map(|r| self.classify_record(r)).collect()
    }

    /// Like [`classify_batch`](Self::classify_batch), also returning the
    /// batch's per-label counts.
    pub fn classify_batch_tallied(
        &self,
        records: &[RawRecord],
    ) -> (Vec<CleanedRecord>, ClassificationTally) {
        let out = self.classify_batch(records);
        let tally = ClassificationTally::from_records(&out);
        debug!(records = out.len(), %tally, "classified batch");
        (out, tally)
    }
}

/// Per-label counts over classified records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationTally {
    /// Records labeled Person.
    pub person: u64,
    /// Records labeled Business.
    pub business: u64,
    /// Records labeled Undetermined.
    pub undetermined: u64,
}

impl ClassificationTally {
    /// Counts the labels of `records`.
    pub fn from_records(records: &[CleanedRecord]) -> Self {
        let mut tally = Self::default();
        for r in records {
            tally.add(r.record_type);
        }
        tally
    }

    /// Counts one label.
    #[inline(always)]
    pub fn add(&mut self, record_type: RecordType) {
        match record_type {
            RecordType::Person => self.person += 1,
            RecordType::Business => self.business += 1,
            RecordType::Undetermined => self.undetermined += 1,
        }
    }

    /// Adds another tally into this one.
    pub fn merge(&mut self, other: ClassificationTally) {
        self.person += other.person;
        self.business += other.business;
        self.undetermined += other.undetermined;
    }

    /// Total records counted.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.person + self.business + self.undetermined
    }

    /// Count for one label.
    #[must_use]
    pub const fn count(&self, record_type: RecordType) -> u64 {
        match record_type {
            RecordType::Person => self.person,
            RecordType::Business => self.business,
            RecordType::Undetermined => self.undetermined,
        }
    }
}

impl fmt::Display for ClassificationTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} person, {} business, {} undetermined",
            self.person, self.business, self.undetermined
        )
    }
}
