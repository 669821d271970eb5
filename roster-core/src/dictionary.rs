//! Reference name dictionaries.
//!
//! A [`NameDictionary`] holds two sets of lowercase names: given names and
//! surnames. It is built once by a [`NameDictionaryProvider`], then shared
//! read-only by every classification call.
//!
//! ## List formats
//!
//! - [`parse_name_list`]: published lists with one row per name, where only
//!   the first comma-separated field is the name
//! - [`parse_name_lines`]: plain local files, one name per line
//!
//! Both trim and lowercase every entry and skip blank lines.

use roster_types::DictionaryError;
use rustc_hash::FxHashSet;

/// Immutable sets of known given names and surnames.
///
/// All entries are trimmed and lowercased on insertion; lookups expect
/// lowercase input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameDictionary {
    given_names: FxHashSet<Box<str>>,
    surnames: FxHashSet<Box<str>>,
}

impl NameDictionary {
    /// Creates an empty dictionary.
    ///
    /// Every dictionary lookup fails, so classification falls back to the
    /// email and fallback rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from two name iterators.
    pub fn from_names<G, S>(given_names: G, surnames: S) -> Self
    where
        G: IntoIterator,
        G::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let mut dict = Self::new();
        dict.extend_given_names(given_names);
        dict.extend_surnames(surnames);
        dict
    }

    /// Adds given names, normalizing each entry.
    pub fn extend_given_names<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        insert_normalized(&mut self.given_names, names);
    }

    /// Adds surnames, normalizing each entry.
    pub fn extend_surnames<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        insert_normalized(&mut self.surnames, names);
    }

    /// Unions `other` into this dictionary.
    pub fn merge(&mut self, other: NameDictionary) {
        self.given_names.extend(other.given_names);
        self.surnames.extend(other.surnames);
    }

    /// Returns `true` if `token` is a known given name.
    #[inline(always)]
    #[must_use]
    pub fn is_given_name(&self, token: &str) -> bool {
        self.given_names.contains(token)
    }

    /// Returns `true` if `token` is a known surname.
    #[inline(always)]
    #[must_use]
    pub fn is_surname(&self, token: &str) -> bool {
        self.surnames.contains(token)
    }

    /// Number of distinct given names.
    #[inline(always)]
    #[must_use]
    pub fn given_name_count(&self) -> usize {
        self.given_names.len()
    }

    /// Number of distinct surnames.
    #[inline(always)]
    #[must_use]
    pub fn surname_count(&self) -> usize {
        self.surnames.len()
    }

    /// Returns `true` if both sets are empty.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.given_names.is_empty() && self.surnames.is_empty()
    }
}

impl core::fmt::Display for NameDictionary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} given names, {} surnames",
            self.given_names.len(),
            self.surnames.len()
        )
    }
}

fn insert_normalized<I>(set: &mut FxHashSet<Box<str>>, names: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for name in names {
        let trimmed = name.as_ref().trim();
        if !trimmed.is_empty() {
            set.insert(trimmed.to_lowercase().into_boxed_str());
        }
    }
}

/// Source of a loaded [`NameDictionary`].
///
/// Loading failures (network, file system) belong to the provider; the
/// classifier only ever sees a fully built dictionary.
pub trait NameDictionaryProvider {
    /// Loads both name sets.
    fn load(&self) -> Result<NameDictionary, DictionaryError>;
}

impl<F> NameDictionaryProvider for F
where
    F: Fn() -> Result<NameDictionary, DictionaryError>,
{
    fn load(&self) -> Result<NameDictionary, DictionaryError> {
        self()
    }
}

/// Parses a published name list: first comma-separated field of each line.
///
/// # Examples
///
/// ```
/// use roster_core::dictionary::parse_name_list;
///
/// let names: Vec<String> = parse_name_list("JOHN,1.2\n  Mary \n\n").collect();
/// assert_eq!(names, ["john", "mary"]);
/// ```
pub fn parse_name_list(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(|line| line.split(',').next().unwrap_or_default().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase)
}

/// Parses a plain name file: one name per line.
pub fn parse_name_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_normalized() {
        let dict = NameDictionary::from_names(["  John ", "MARY"], ["Smith\t"]);
        assert!(dict.is_given_name("john"));
        assert!(dict.is_given_name("mary"));
        assert!(dict.is_surname("smith"));
        assert!(!dict.is_given_name("John"));
    }

    #[test]
    fn blank_entries_skipped() {
        let dict = NameDictionary::from_names(["", "   "], Vec::<String>::new());
        assert!(dict.is_empty());
        assert_eq!(dict.given_name_count(), 0);
    }

    #[test]
    fn duplicates_collapse() {
        let dict = NameDictionary::from_names(["ann", "ANN", "Ann "], ["lee"]);
        assert_eq!(dict.given_name_count(), 1);
        assert_eq!(dict.surname_count(), 1);
    }

    #[test]
    fn merge_unions_both_sets() {
        let mut a = NameDictionary::from_names(["john"], ["smith"]);
        let b = NameDictionary::from_names(["mary", "john"], ["jones"]);
        a.merge(b);
        assert_eq!(a.given_name_count(), 2);
        assert_eq!(a.surname_count(), 2);
        assert!(a.is_surname("jones"));
    }

    #[test]
    fn sets_are_independent() {
        let dict = NameDictionary::from_names(["jordan"], ["smith"]);
        assert!(!dict.is_surname("jordan"));
        assert!(!dict.is_given_name("smith"));
    }

    #[test]
    fn display_reports_sizes() {
        let dict = NameDictionary::from_names(["a", "b"], ["c"]);
        assert_eq!(dict.to_string(), "2 given names, 1 surnames");
    }

    #[test]
    fn name_list_uses_first_field() {
        let names: Vec<String> = parse_name_list("AARON,0.2\nABBY\n,empty\n\n  Zoe  ,x").collect();
        assert_eq!(names, ["aaron", "abby", "zoe"]);
    }

    #[test]
    fn name_lines_keep_whole_line() {
        let names: Vec<String> = parse_name_lines("De La Cruz\r\n\n  O'Brien\n").collect();
        assert_eq!(names, ["de la cruz", "o'brien"]);
    }

    #[test]
    fn closure_provider() {
        let provider = || -> Result<NameDictionary, DictionaryError> {
            Ok(NameDictionary::from_names(["john"], ["smith"]))
        };
        let dict = provider.load().expect("closure provider loads");
        assert!(dict.is_given_name("john"));

        let failing = || -> Result<NameDictionary, DictionaryError> {
            Err(DictionaryError::Status {
                source: "https://example.com/names.txt".into(),
                status: 503,
            })
        };
        assert!(failing.load().is_err());
    }

    #[test]
    fn dictionary_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NameDictionary>();
    }
}
