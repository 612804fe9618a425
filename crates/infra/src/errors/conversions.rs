//! Conversions from external infrastructure errors into domain errors.

use qbase_domain::QuickBaseError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub QuickBaseError);

impl From<InfraError> for QuickBaseError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<QuickBaseError> for InfraError {
    fn from(value: QuickBaseError) -> Self {
        InfraError(value)
    }
}

trait IntoQuickBaseError {
    fn into_quickbase(self) -> QuickBaseError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → QuickBaseError */
/* -------------------------------------------------------------------------- */

impl IntoQuickBaseError for HttpError {
    fn into_quickbase(self) -> QuickBaseError {
        let status = self.status().map(|status| status.as_u16());

        if self.is_timeout() {
            return QuickBaseError::transport(status, "HTTP request timed out");
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return QuickBaseError::transport(status, format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return QuickBaseError::transport(status, format!("Invalid HTTP request: {self}"));
        }

        if let Some(code) = status {
            let reason = self.status().and_then(|s| s.canonical_reason()).unwrap_or("unknown status");
            return QuickBaseError::transport(status, format!("HTTP {code} {reason}"));
        }

        QuickBaseError::transport(None, self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_quickbase())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → QuickBaseError */
/* -------------------------------------------------------------------------- */

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(QuickBaseError::Config(format!("I/O error: {value}")))
    }
}
