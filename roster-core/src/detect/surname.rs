//! Surname shape check for the fallback rule.

/// Department words that disqualify a last name.
///
/// Overlaps the business keyword list; both checks run independently.
pub const DEPARTMENT_KEYWORDS: [&str; 9] = [
    "support",
    "team",
    "dept",
    "department",
    "customer",
    "service",
    "billing",
    "sales",
    "marketing",
];

/// Minimum letters in a plausible surname.
pub const MIN_SURNAME_LETTERS: usize = 2;

/// Maximum letters in a plausible surname.
pub const MAX_SURNAME_LETTERS: usize = 40;

#[inline(always)]
const fn is_surname_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, ' ' | '-' | '\'')
}

/// Returns `true` if `last_clean` could be a human surname.
///
/// Characters other than ASCII letters, spaces, hyphens and apostrophes are
/// dropped first. The remainder must be non-empty, contain no department
/// word, and hold between 2 and 40 letters.
pub fn plausible_surname(last_clean: &str) -> bool {
    let kept: String = last_clean.chars().filter(|&c| is_surname_char(c)).collect();
    let kept = kept.trim();

    if kept.is_empty() {
        return false;
    }

    let has_department_word = kept
        .split_whitespace()
        .any(|word| DEPARTMENT_KEYWORDS.contains(&word.to_ascii_lowercase().as_str()));
    if has_department_word {
        return false;
    }

    let letters = kept.bytes().filter(u8::is_ascii_alphabetic).count();
    (MIN_SURNAME_LETTERS..=MAX_SURNAME_LETTERS).contains(&letters)
}
