//! Person signals.
//!
//! - **Person**: cleaned name tokens checked against the reference dictionary
//! - **Email**: the email's local part spells out the cleaned names

pub mod email;
pub mod person;

pub use email::email_supports_person;
pub use person::{is_person, name_tokens, NameTokens};
