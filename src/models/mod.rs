//! Records read from the JSON data files.

mod certificate;
mod project;

pub use certificate::{Certificate, CertificateKind};
pub use project::Project;

use serde_json::Value;
use thiserror::Error;

/// The literal link target meaning "nowhere".
pub const PLACEHOLDER_URL: &str = "#";

/// True when `url` points somewhere real (not empty, not the `#` placeholder).
pub fn is_real_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && url != PLACEHOLDER_URL
}

/// Why a single record was rejected. The record is skipped; its siblings
/// still render.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown certificate type {0:?}")]
    UnknownType(String),
    #[error("{kind} certificate has no usable `{field}`")]
    MissingLocator {
        kind: &'static str,
        field: &'static str,
    },
}

/// A record kind that can be decoded from one element of a JSON array.
pub trait Record: Sized {
    /// Plural label used in diagnostics ("projects", "certificates").
    const KIND: &'static str;

    fn from_value(value: Value) -> Result<Self, RecordError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_not_real() {
        assert!(!is_real_url("#"));
        assert!(!is_real_url(" # "));
        assert!(!is_real_url(""));
        assert!(is_real_url("https://example.com/verify/1"));
        assert!(is_real_url("#anchor"));
    }
}
