//! Email local-part match.
//!
//! A contact whose email reads `john.smith@…` or `smithjohn@…` is almost
//! certainly the person named in the row, even when the name is missing from
//! the reference dictionary.

use memchr::{memchr, memmem};

/// Separators accepted between the first and last name in the local part.
const SEPARATORS: [u8; 3] = [b'-', b'.', b'_'];

/// Keeps only `a-z` from an already lowercased string.
#[inline]
fn ascii_letters(lower: &str) -> String {
    lower.chars().filter(char::is_ascii_lowercase).collect()
}

#[inline(always)]
fn contains(haystack: &str, needle: &str) -> bool {
    memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
}

#[inline(always)]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `first`, one separator, then `last`, as a standalone word in `local`.
///
/// Neither neighbour of the match may be a word character.
fn separated_match(local: &str, first: &str, last: &str) -> bool {
    let bytes = local.as_bytes();

    for start in memmem::find_iter(bytes, first.as_bytes()) {
        let sep = start + first.len();
        if !bytes.get(sep).is_some_and(|b| SEPARATORS.contains(b)) {
            continue;
        }

        let end = sep + 1 + last.len();
        if !bytes[sep + 1..].starts_with(last.as_bytes()) {
            continue;
        }

        // `first` and `last` are ASCII, so both offsets are char boundaries.
        let before_ok = !local[..start].chars().next_back().is_some_and(is_word_char);
        let after_ok = !local[end..].chars().next().is_some_and(is_word_char);
        if before_ok && after_ok {
            return true;
        }
    }

    false
}

/// Returns `true` if the email's local part encodes both cleaned names.
///
/// Both names (letters only) must occur in the local part, and either
/// appear concatenated (`johnsmith`, `smithjohn`, ignoring punctuation) or
/// joined by a single `-`, `.` or `_` as a standalone word.
///
/// # Examples
///
/// ```
/// use roster_core::matcher::email_supports_person;
///
/// assert!(email_supports_person("john.smith@example.com", "John", "Smith"));
/// assert!(!email_supports_person("js@example.com", "John", "Smith"));
/// ```
pub fn email_supports_person(email: &str, first_clean: &str, last_clean: &str) -> bool {
    let Some(at) = memchr(b'@', email.as_bytes()) else {
        return false;
    };

    let local = email[..at].to_lowercase();
    let local_alpha = ascii_letters(&local);
    let first = ascii_letters(&first_clean.to_lowercase());
    let last = ascii_letters(&last_clean.to_lowercase());

    if first.is_empty() || last.is_empty() {
        return false;
    }

    if !contains(&local, &first) || !contains(&local, &last) {
        return false;
    }

    let mut joined = String::with_capacity(first.len() + last.len());
    joined.push_str(&first);
    joined.push_str(&last);
    if contains(&local_alpha, &joined) {
        return true;
    }

    joined.clear();
    joined.push_str(&last);
    joined.push_str(&first);
    if contains(&local_alpha, &joined) {
        return true;
    }

    separated_match(&local, &first, &last)
}
