use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How an image certificate is presented when opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageViewer {
    /// Header with title, close button and download link.
    #[default]
    Modal,
    /// Bare image; a click anywhere closes it.
    Fullscreen,
}

/// User-facing text for one section's empty and failed states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionMessages {
    pub empty: String,
    pub error: String,
}

impl SectionMessages {
    fn for_kind(plural: &str, singular: &str) -> Self {
        SectionMessages {
            empty: format!("No {} yet. Add your first {}!", plural, singular),
            error: format!(
                "Unable to load {}. Please check your internet connection.",
                plural
            ),
        }
    }
}

impl Default for SectionMessages {
    fn default() -> Self {
        SectionMessages::for_kind("items", "item")
    }
}

/// Page configuration. Every field has a default matching the stock page,
/// so the host may pass a partial object (or nothing at all).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub projects_url: String,
    pub certificates_url: String,
    pub projects_container: String,
    pub certificates_container: String,
    pub projects_messages: SectionMessages,
    pub certificates_messages: SectionMessages,
    /// Substituted when a card image is missing or fails to load.
    pub fallback_image: String,
    /// External proxy that renders documents; receives `?url=<doc>&embedded=true`.
    pub document_viewer: String,
    pub image_viewer: ImageViewer,
    pub reveal_class: String,
    pub reveal_offset: f64,
    pub header_hide_after: f64,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            projects_url: "data/projects.json".to_string(),
            certificates_url: "data/certificates.json".to_string(),
            projects_container: "projects-container".to_string(),
            certificates_container: "certificates-container".to_string(),
            projects_messages: SectionMessages::for_kind("projects", "project"),
            certificates_messages: SectionMessages::for_kind("certificates", "certificate"),
            fallback_image: "images/pdf-icon.png".to_string(),
            document_viewer: "https://docs.google.com/viewer".to_string(),
            image_viewer: ImageViewer::Modal,
            reveal_class: "reveal".to_string(),
            reveal_offset: 150.0,
            header_hide_after: 100.0,
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Build a config from a JSON object; `null` yields the defaults.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(SiteConfig::default());
        }
        serde_json::from_value(value)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_stock_page() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.projects_container, "projects-container");
        assert_eq!(cfg.certificates_url, "data/certificates.json");
        assert_eq!(
            cfg.projects_messages.empty,
            "No projects yet. Add your first project!"
        );
        assert_eq!(
            cfg.certificates_messages.error,
            "Unable to load certificates. Please check your internet connection."
        );
    }

    #[test]
    fn test_partial_object_keeps_other_defaults() {
        let cfg = SiteConfig::from_value(json!({
            "projects_url": "/api/projects.json",
            "image_viewer": "fullscreen",
        }))
        .unwrap();
        assert_eq!(cfg.projects_url, "/api/projects.json");
        assert_eq!(cfg.image_viewer, ImageViewer::Fullscreen);
        assert_eq!(cfg.certificates_url, "data/certificates.json");
        assert_eq!(cfg.fallback_image, "images/pdf-icon.png");
    }

    #[test]
    fn test_null_is_default() {
        assert_eq!(SiteConfig::from_value(Value::Null).unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_bad_log_level_falls_back_to_info() {
        let cfg = SiteConfig {
            log_level: "chatty".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(cfg.log_level(), log::LevelFilter::Info);
        let cfg = SiteConfig {
            log_level: "debug".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(cfg.log_level(), log::LevelFilter::Debug);
    }
}
