//! Response decoders
//!
//! Pure functions from a classified [`Envelope`] to the typed result of one
//! action. Absent elements become empty strings or `None`.

pub mod app;
pub mod auth;
pub mod fields;
pub mod records;
pub mod schema;
pub mod users;

use crate::xml::Envelope;

/// Decoder for actions whose only result is success.
pub fn nothing(_: &Envelope<'_>) {}

/// Pass-through decoder for raw actions.
pub fn body(body: String) -> String {
    body
}
