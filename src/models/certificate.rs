use serde::Deserialize;
use serde_json::Value;

use super::{is_real_url, Record, RecordError};

/// What a certificate links to. Each variant carries only the locator its
/// type needs, so a PDF without a file cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum CertificateKind {
    Image {
        image: String,
    },
    Pdf {
        file: String,
        thumbnail: Option<String>,
    },
    /// `credential_url` is `None` when the data gave no real target.
    Link {
        credential_url: Option<String>,
        thumbnail: Option<String>,
    },
}

impl CertificateKind {
    pub fn label(&self) -> &'static str {
        match self {
            CertificateKind::Image { .. } => "image",
            CertificateKind::Pdf { .. } => "pdf",
            CertificateKind::Link { .. } => "link",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    pub name: String,
    pub issuer: String,
    /// Kept as written; formatting decides how to show a bad value.
    pub date: String,
    pub kind: CertificateKind,
}

impl Certificate {
    /// Image shown on the card, if the record has one.
    pub fn thumbnail(&self) -> Option<&str> {
        match &self.kind {
            CertificateKind::Image { image } => Some(image.as_str()),
            CertificateKind::Pdf { thumbnail, .. } | CertificateKind::Link { thumbnail, .. } => {
                thumbnail.as_deref()
            }
        }
    }
}

/// Wire shape of a certificate: a flat object discriminated by `type`.
#[derive(Debug, Deserialize)]
struct RawCertificate {
    name: String,
    issuer: String,
    #[serde(default)]
    date: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    file: Option<String>,
    #[serde(default, rename = "credentialUrl")]
    credential_url: Option<String>,
}

fn real(value: Option<String>) -> Option<String> {
    value.filter(|v| is_real_url(v))
}

impl TryFrom<RawCertificate> for Certificate {
    type Error = RecordError;

    fn try_from(raw: RawCertificate) -> Result<Self, Self::Error> {
        let kind = match raw.kind.as_str() {
            "image" => CertificateKind::Image {
                image: real(raw.image).ok_or(RecordError::MissingLocator {
                    kind: "image",
                    field: "image",
                })?,
            },
            "pdf" => CertificateKind::Pdf {
                file: real(raw.file).ok_or(RecordError::MissingLocator {
                    kind: "pdf",
                    field: "file",
                })?,
                thumbnail: real(raw.image),
            },
            "link" => CertificateKind::Link {
                credential_url: real(raw.credential_url),
                thumbnail: real(raw.image),
            },
            other => return Err(RecordError::UnknownType(other.to_string())),
        };
        Ok(Certificate {
            name: raw.name,
            issuer: raw.issuer,
            date: raw.date,
            kind,
        })
    }
}

impl Record for Certificate {
    const KIND: &'static str = "certificates";

    fn from_value(value: Value) -> Result<Self, RecordError> {
        let raw: RawCertificate = serde_json::from_value(value)?;
        Certificate::try_from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pdf_certificate() {
        let c = Certificate::from_value(json!({
            "name": "AWS Cert",
            "issuer": "Amazon",
            "date": "2023-05-01",
            "type": "pdf",
            "file": "cert.pdf",
        }))
        .unwrap();
        assert_eq!(
            c.kind,
            CertificateKind::Pdf {
                file: "cert.pdf".to_string(),
                thumbnail: None
            }
        );
        assert_eq!(c.thumbnail(), None);
    }

    #[test]
    fn test_link_placeholder_becomes_none() {
        let c = Certificate::from_value(json!({
            "name": "N",
            "issuer": "I",
            "date": "2022-01-01",
            "type": "link",
            "credentialUrl": "#",
            "image": "thumb.png",
        }))
        .unwrap();
        assert_eq!(
            c.kind,
            CertificateKind::Link {
                credential_url: None,
                thumbnail: Some("thumb.png".to_string())
            }
        );
    }

    #[test]
    fn test_pdf_without_file_is_rejected() {
        let err = Certificate::from_value(json!({
            "name": "N",
            "issuer": "I",
            "date": "2022-01-01",
            "type": "pdf",
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            RecordError::MissingLocator { kind: "pdf", field: "file" }
        ));
    }

    #[test]
    fn test_image_with_placeholder_is_rejected() {
        let err = Certificate::from_value(json!({
            "name": "N",
            "issuer": "I",
            "type": "image",
            "image": "#",
        }))
        .unwrap_err();
        assert!(matches!(err, RecordError::MissingLocator { kind: "image", .. }));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = Certificate::from_value(json!({
            "name": "N",
            "issuer": "I",
            "type": "video",
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "unknown certificate type \"video\"");
    }

    #[test]
    fn test_missing_date_is_kept_empty() {
        let c = Certificate::from_value(json!({
            "name": "N",
            "issuer": "I",
            "type": "image",
            "image": "a.jpg",
        }))
        .unwrap();
        assert_eq!(c.date, "");
    }
}
