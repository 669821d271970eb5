//! Non-dictionary signals.
//!
//! - **Business**: organizational keywords and non-person characters in the raw names
//! - **Surname**: shape check used by the fallback rule when the surname is unknown

pub mod business;
pub mod surname;

pub use business::looks_like_business;
pub use surname::plausible_surname;
