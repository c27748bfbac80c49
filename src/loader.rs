//! Data loader: one GET per resource, no retries, no caching.
//!
//! Transport failures, non-2xx statuses and malformed JSON all surface as a
//! `LoadError`; the page treats every variant the same way. Individual
//! records that do not validate are skipped with a warning.

use log::{debug, warn};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::models::Record;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request for {url} failed: {reason}")]
    Fetch { url: String, reason: String },
    #[error("{url} is not a valid record list: {reason}")]
    Parse { url: String, reason: String },
}

impl LoadError {
    fn fetch(url: &str, reason: impl ToString) -> Self {
        LoadError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    fn parse(url: &str, reason: impl ToString) -> Self {
        LoadError::Parse {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result of a successful load.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Records(Vec<T>),
    /// Valid data with nothing to show.
    Empty,
}

/// Raw HTTP outcome, before status and body are judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub status: u16,
    pub body: String,
}

/// Source of resource bodies.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<Fetched, LoadError>;
}

/// `Fetch` over reqwest. In the browser reqwest goes through `window.fetch`,
/// which needs absolute URLs, so relative paths are joined onto the page URL.
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Option<Url>,
}

impl HttpFetcher {
    pub fn new(base: Option<Url>) -> Self {
        HttpFetcher {
            client: reqwest::Client::new(),
            base,
        }
    }

    pub fn resolve(&self, url: &str) -> Result<Url, LoadError> {
        match &self.base {
            Some(base) => base.join(url),
            None => Url::parse(url),
        }
        .map_err(|e| LoadError::fetch(url, e))
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched, LoadError> {
        let target = self.resolve(url)?;
        debug!("GET {}", target);
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| LoadError::fetch(url, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LoadError::fetch(url, e))?;
        Ok(Fetched { status, body })
    }
}

/// Fetch `url` and decode it as a list of `T`.
pub async fn load<T: Record, F: Fetch>(fetcher: &F, url: &str) -> Result<Loaded<T>, LoadError> {
    let fetched = fetcher.fetch(url).await?;
    if !(200..300).contains(&fetched.status) {
        return Err(LoadError::fetch(url, format!("HTTP {}", fetched.status)));
    }
    decode(url, &fetched.body)
}

/// Decode a JSON body into records. `null` and `[]` are the empty condition.
pub fn decode<T: Record>(url: &str, body: &str) -> Result<Loaded<T>, LoadError> {
    let value: Value = serde_json::from_str(body).map_err(|e| LoadError::parse(url, e))?;
    let items = match value {
        Value::Null => return Ok(Loaded::Empty),
        Value::Array(items) => items,
        other => {
            return Err(LoadError::parse(
                url,
                format!("expected an array, found {}", json_kind(&other)),
            ))
        }
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match T::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping {} entry #{} in {}: {}", T::KIND, i, url, e);
                None
            }
        })
        .collect();

    if records.is_empty() {
        if total > 0 {
            warn!("All {} {} entries in {} were skipped", total, T::KIND, url);
        }
        return Ok(Loaded::Empty);
    }
    debug!("Loaded {} of {} {} from {}", records.len(), total, T::KIND, url);
    Ok(Loaded::Records(records))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Certificate, Project};

    #[test]
    fn test_decode_keeps_order() {
        let body = r#"[
            {"title": "B", "description": "", "image": "b.png"},
            {"title": "A", "description": "", "image": "a.png"}
        ]"#;
        let Loaded::Records(projects) = decode::<Project>("p.json", body).unwrap() else {
            panic!("expected records");
        };
        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_decode_empty_and_null() {
        assert_eq!(decode::<Project>("p.json", "[]").unwrap(), Loaded::Empty);
        assert_eq!(decode::<Project>("p.json", "null").unwrap(), Loaded::Empty);
    }

    #[test]
    fn test_decode_malformed_json() {
        let err = decode::<Project>("p.json", "[{").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        let err = decode::<Project>("p.json", r#"{"title": "x"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "p.json is not a valid record list: expected an array, found an object"
        );
    }

    #[test]
    fn test_decode_skips_invalid_records() {
        let body = r#"[
            {"name": "A", "issuer": "X", "date": "2021-01-01", "type": "pdf"},
            {"name": "B", "issuer": "X", "date": "2021-01-01", "type": "image", "image": "b.jpg"}
        ]"#;
        match decode::<Certificate>("c.json", body).unwrap() {
            Loaded::Records(certs) => {
                assert_eq!(certs.len(), 1);
                assert_eq!(certs[0].name, "B");
            }
            Loaded::Empty => panic!("expected one certificate"),
        }
    }

    #[test]
    fn test_decode_all_invalid_is_empty() {
        let body = r#"[{"name": "A", "issuer": "X", "type": "hologram"}]"#;
        assert_eq!(decode::<Certificate>("c.json", body).unwrap(), Loaded::Empty);
    }

    #[test]
    fn test_resolve_against_page() {
        let fetcher = HttpFetcher::new(Some(Url::parse("https://me.example.io/site/").unwrap()));
        assert_eq!(
            fetcher.resolve("data/projects.json").unwrap().as_str(),
            "https://me.example.io/site/data/projects.json"
        );
        let bare = HttpFetcher::new(None);
        assert!(matches!(
            bare.resolve("data/projects.json"),
            Err(LoadError::Fetch { .. })
        ));
    }
}
