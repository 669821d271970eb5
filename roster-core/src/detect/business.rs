//! Organization detection on raw name fields.

/// Substrings that mark a name pair as an organization.
///
/// Matched as substrings of the lowercased `"first last"` string, so
/// `"acmecorp"` matches `corp`. Short keywords also hit inside ordinary
/// words (`"Vincent"` contains `inc`); that is accepted.
pub const BUSINESS_KEYWORDS: [&str; 28] = [
    "inc", "inc.", "ltd", "ltd.", "corp", "corporation", "llc", "group", "holdings",
    "consulting", "agency", "studio", "marketing", "solutions", "company", "co.", "partners",
    "associates", "enterprise", "enterprises", "support", "team", "dept", "department",
    "customer", "service", "billing", "sales",
];

/// Bytes that never appear in a person's name.
#[inline(always)]
const fn is_non_person_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'/' || b == b'&'
}

/// Returns `true` if the raw first/last pair looks like an organization.
///
/// Checked before any person rule. Two empty fields are never a business.
///
/// # Examples
///
/// ```
/// use roster_core::detect::looks_like_business;
///
/// assert!(looks_like_business("Acme", "CORP"));
/// assert!(looks_like_business("John", "Smith & Co"));
/// assert!(!looks_like_business("John", "Smith"));
/// ```
pub fn looks_like_business(first_raw: &str, last_raw: &str) -> bool {
    let mut combined = String::with_capacity(first_raw.len() + last_raw.len() + 1);
    combined.push_str(first_raw);
    combined.push(' ');
    combined.push_str(last_raw);
    let combined = combined.to_lowercase();

    if BUSINESS_KEYWORDS.iter().any(|kw| combined.contains(kw)) {
        return true;
    }

    combined.bytes().any(is_non_person_byte)
}
