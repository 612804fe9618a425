//! API error classification
//!
//! QuickBase reports application failures inside HTTP 200 responses. The
//! envelope is checked before any decoder runs.

use qbase_domain::{ErrorCode, QuickBaseError, Result};

use crate::xml::Envelope;

/// Check a structured response for an embedded error.
///
/// An absent `errcode` element or the text `0` is success. Any other value
/// fails with [`QuickBaseError::Api`], carrying the parsed code, `errtext`
/// as the message and `errdetail` when present.
///
/// # Errors
///
/// Returns the API error described above.
pub fn check(envelope: &Envelope<'_>) -> Result<()> {
    let Some(code) = envelope.opt_text("errcode") else {
        return Ok(());
    };
    let code = code.trim();
    if code == "0" {
        return Ok(());
    }

    Err(QuickBaseError::Api {
        code: ErrorCode::parse(code),
        message: envelope.text("errtext"),
        detail: envelope.opt_text("errdetail").filter(|detail| !detail.is_empty()),
    })
}
