//! Dictionary match on cleaned name tokens.
//!
//! A cleaned field is split into lookup tokens:
//!
//! ```text
//! "Mary-Jane"   -> ["mary", "jane"]
//! "O'Brien"     -> ["obrien"]
//! "van der Berg"-> ["van", "der", "berg"]
//! ```
//!
//! Every first-name token must be a known given name, and at least one
//! last-name token must be a known surname.

use smallvec::SmallVec;

use crate::dictionary::NameDictionary;

/// Lookup tokens of one name field. Most names fit inline.
pub type NameTokens = SmallVec<[String; 4]>;

/// Splits a cleaned name into lowercase lookup tokens.
///
/// Splits on whitespace, then on hyphens; apostrophes are removed and
/// empty pieces dropped.
pub fn name_tokens(value: &str) -> NameTokens {
    let mut tokens = NameTokens::new();

    for word in value.split_whitespace() {
        for piece in word.split('-') {
            let core: String = piece.chars().filter(|&c| c != '\'').collect();
            if !core.is_empty() {
                tokens.push(core.to_lowercase());
            }
        }
    }

    tokens
}

/// Returns `true` if the cleaned names match the reference dictionary.
///
/// Either field being empty, or tokenizing to nothing, is a non-match.
pub fn is_person(first_clean: &str, last_clean: &str, dictionary: &NameDictionary) -> bool {
    if first_clean.is_empty() || last_clean.is_empty() {
        return false;
    }

    let first_tokens = name_tokens(first_clean);
    let last_tokens = name_tokens(last_clean);

    if first_tokens.is_empty() || last_tokens.is_empty() {
        return false;
    }

    first_tokens.iter().all(|t| dictionary.is_given_name(t))
        && last_tokens.iter().any(|t| dictionary.is_surname(t))
}
