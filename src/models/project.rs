use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{is_real_url, Record, RecordError, PLACEHOLDER_URL};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub technologies: Option<Vec<String>>,
    #[serde(default)]
    pub page: Option<String>,
}

impl Project {
    /// Technology tags in input order; empty when absent.
    pub fn tags(&self) -> &[String] {
        self.technologies.as_deref().unwrap_or(&[])
    }

    /// Target of the "View Project" link, `#` when the project has no page.
    pub fn page_href(&self) -> &str {
        self.page
            .as_deref()
            .filter(|p| is_real_url(p))
            .unwrap_or(PLACEHOLDER_URL)
    }
}

impl Record for Project {
    const KIND: &'static str = "projects";

    fn from_value(value: Value) -> Result<Self, RecordError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_default() {
        let p = Project::from_value(json!({
            "title": "App",
            "description": "desc",
            "image": "x.png",
        }))
        .unwrap();
        assert!(p.tags().is_empty());
        assert_eq!(p.page_href(), "#");
    }

    #[test]
    fn test_null_technologies_is_absent() {
        let p = Project::from_value(json!({
            "title": "App",
            "description": "desc",
            "image": "x.png",
            "technologies": null,
            "page": "projects/app.html",
        }))
        .unwrap();
        assert!(p.tags().is_empty());
        assert_eq!(p.page_href(), "projects/app.html");
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let err = Project::from_value(json!({"description": "d", "image": "i"})).unwrap_err();
        assert!(matches!(err, RecordError::Malformed(_)));
    }
}
