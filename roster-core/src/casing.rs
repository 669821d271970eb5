//! Display casing for personal names.
//!
//! Turns inconsistently cased name cells (`"MARY-JANE"`, `"o'brien"`,
//! `"jane VAN DER BERG"`) into readable names (`"Mary-Jane"`, `"O'Brien"`,
//! `"Jane van der Berg"`).
//!
//! ## Rules
//!
//! [`case_token`] lowercases the token and then applies the first matching rule:
//!
//! 1. **Apostrophe**: capitalize every apostrophe-separated segment (`O'Neill`)
//! 2. **Hyphen**: case every hyphen-separated segment recursively (`Jean-Luc`)
//! 3. **Mc**: `Mc` + capitalized remainder (`McDonald`)
//! 4. **Mac**: `Mac` + capitalized remainder (`MacArthur`)
//! 5. **Default**: first letter upper, rest lower
//!
//! The Mc/Mac rules are best-effort heuristics. `"mack"` becomes `"MacK"`;
//! callers that care about such surnames must post-correct them.
//!
//! [`case_full_name`] collapses whitespace, cases every word, and keeps the
//! particles `van, von, der, den, de, del, della, du, la, le, di, da, dos, das`
//! lowercase unless they open the name.

/// Lowercase name particles, kept lowercase when not leading the name.
pub const PARTICLES: [&str; 14] = [
    "van", "von", "der", "den", "de", "del", "della", "du", "la", "le", "di", "da", "dos", "das",
];

/// Returns `true` if `word` (already lowercase) is a name particle.
#[inline]
pub fn is_particle(word: &str) -> bool {
    PARTICLES.contains(&word)
}

/// Applies display casing to a single space-free token.
///
/// Empty input yields an empty string.
///
/// # Examples
///
/// ```
/// use roster_core::casing::case_token;
///
/// assert_eq!(case_token("o'neill"), "O'Neill");
/// assert_eq!(case_token("MCDONALD"), "McDonald");
/// assert_eq!(case_token("jean-luc"), "Jean-Luc");
/// ```
pub fn case_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    case_token_into(token, &mut out);
    out
}

/// Appends the cased form of `token` to `out`.
pub fn case_token_into(token: &str, out: &mut String) {
    if token.is_empty() {
        return;
    }

    let lower = token.to_lowercase();

    if lower.contains('\'') {
        for (i, segment) in lower.split('\'').enumerate() {
            if i > 0 {
                out.push('\'');
            }
            capitalize_into(segment, out);
        }
        return;
    }

    if lower.contains('-') {
        for (i, segment) in lower.split('-').enumerate() {
            if i > 0 {
                out.push('-');
            }
            case_token_into(segment, out);
        }
        return;
    }

    if let Some(rest) = lower.strip_prefix("mc").filter(|r| !r.is_empty()) {
        out.push_str("Mc");
        capitalize_into(rest, out);
        return;
    }

    if let Some(rest) = lower.strip_prefix("mac").filter(|r| !r.is_empty()) {
        out.push_str("Mac");
        capitalize_into(rest, out);
        return;
    }

    capitalize_into(&lower, out);
}

/// Applies display casing to a whole name field.
///
/// Leading/trailing whitespace is removed and internal runs of whitespace
/// collapse to one space. Whitespace-only input yields an empty string.
///
/// # Examples
///
/// ```
/// use roster_core::casing::case_full_name;
///
/// assert_eq!(case_full_name("jane VAN DER BERG"), "Jane van der Berg");
/// assert_eq!(case_full_name("  de   la cruz "), "De la Cruz");
/// ```
pub fn case_full_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    case_full_name_into(name, &mut out);
    out
}

/// Cases `name` into an existing buffer, clearing it first.
///
/// Reuses the buffer's capacity across calls.
pub fn case_full_name_into(name: &str, out: &mut String) {
    out.clear();

    for (i, word) in name.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
            let lower = word.to_lowercase();
            if is_particle(&lower) {
                out.push_str(&lower);
                continue;
            }
        }
        case_token_into(word, out);
    }
}

/// First character uppercased, the rest lowercased.
#[inline]
fn capitalize_into(segment: &str, out: &mut String) {
    let mut chars = segment.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        for c in chars {
            out.extend(c.to_lowercase());
        }
    }
}
