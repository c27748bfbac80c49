//! Full-viewport viewers for certificate images and documents.
//!
//! Every opened overlay gets an `OverlayId`, which doubles as its dismiss
//! handle. Closing goes through `OverlayController::dismiss` no matter which
//! path triggered it (close button, backdrop, Escape), so the view and its
//! Escape listener are always released together and only once.

use log::{debug, info};
use url::Url;

use crate::config::SiteConfig;
use crate::dom::{Action, Element};
use crate::surface::{Surface, SurfaceError};

const BACKDROP_STYLE: &str = "position:fixed;top:0;left:0;width:100%;height:100%;\
background:rgba(0,0,0,0.95);z-index:10000;display:flex;flex-direction:column;\
align-items:center;justify-content:center";
const FULLSCREEN_STYLE: &str = "position:fixed;top:0;left:0;width:100%;height:100%;\
background:rgba(0,0,0,0.95);display:flex;justify-content:center;align-items:center;\
z-index:10000;cursor:pointer";
const HEADER_STYLE: &str = "width:90%;display:flex;justify-content:space-between;\
align-items:center;margin-bottom:10px;color:white";
const TITLE_STYLE: &str = "color:#9b5cff";
const CLOSE_STYLE: &str = "background:#9b5cff;color:white;border:none;padding:10px 20px;\
border-radius:5px;cursor:pointer";
const IMAGE_STYLE: &str = "max-width:90%;max-height:80vh;border-radius:10px;\
box-shadow:0 0 30px rgba(155,92,255,0.3)";
const FULLSCREEN_IMAGE_STYLE: &str = "max-width:90%;max-height:90%;border-radius:10px;\
box-shadow:0 0 30px rgba(155,92,255,0.5)";
const FRAME_STYLE: &str = "width:90%;max-width:900px;height:80vh;border:none;\
border-radius:10px;box-shadow:0 0 30px rgba(155,92,255,0.3)";
const DOWNLOAD_STYLE: &str = "display:inline-block;margin-top:20px;padding:10px 20px;\
background:#9b5cff;color:white;text-decoration:none;border-radius:5px;font-weight:bold";

/// Handle for one open overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "overlay-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayKind {
    /// Titled image viewer with a download link.
    Image { src: String },
    /// Document shown through the external viewer proxy.
    Document { url: String },
    /// Bare image; clicking the backdrop closes it.
    Fullscreen { src: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    pub kind: OverlayKind,
}

/// Where documents are sent for rendering, and the page URL relative
/// document paths are resolved against.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub document_viewer: Url,
    pub base: Option<Url>,
}

impl ViewerSettings {
    pub fn from_config(config: &SiteConfig, base: Option<Url>) -> Result<Self, url::ParseError> {
        Ok(ViewerSettings {
            document_viewer: Url::parse(&config.document_viewer)?,
            base,
        })
    }
}

/// File name offered for download: whitespace runs become `-`, then the
/// extension is appended. "AWS  Cert" -> "AWS-Cert.pdf".
pub fn download_name(title: &str, extension: &str) -> String {
    let mut name = String::with_capacity(title.len() + extension.len() + 1);
    let mut in_space = false;
    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_space {
                name.push('-');
            }
            in_space = true;
        } else {
            name.push(ch);
            in_space = false;
        }
    }
    name.push('.');
    name.push_str(extension);
    name
}

/// URL of the viewer proxy page for `document`.
pub fn viewer_url(proxy: &Url, document: &str, base: Option<&Url>) -> String {
    let target = base
        .and_then(|b| b.join(document).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| document.to_string());
    let mut url = proxy.clone();
    url.query_pairs_mut()
        .append_pair("url", &target)
        .append_pair("embedded", "true");
    url.to_string()
}

impl Overlay {
    pub fn image(src: impl Into<String>, title: impl Into<String>) -> Self {
        Overlay {
            title: title.into(),
            kind: OverlayKind::Image { src: src.into() },
        }
    }

    pub fn document(url: impl Into<String>, title: impl Into<String>) -> Self {
        Overlay {
            title: title.into(),
            kind: OverlayKind::Document { url: url.into() },
        }
    }

    pub fn fullscreen(src: impl Into<String>, title: impl Into<String>) -> Self {
        Overlay {
            title: title.into(),
            kind: OverlayKind::Fullscreen { src: src.into() },
        }
    }

    /// Link target and file name for the download control, if the variant has one.
    pub fn download(&self) -> Option<(&str, String)> {
        match &self.kind {
            OverlayKind::Image { src } => Some((src.as_str(), download_name(&self.title, "jpg"))),
            OverlayKind::Document { url } => {
                Some((url.as_str(), download_name(&self.title, "pdf")))
            }
            OverlayKind::Fullscreen { .. } => None,
        }
    }

    pub fn view(&self, id: OverlayId, settings: &ViewerSettings) -> Element {
        let dismiss = Action::Dismiss(id);
        let view = match &self.kind {
            OverlayKind::Fullscreen { src } => Element::new("div")
                .class("fullscreen-certificate")
                .attr("id", id.to_string())
                .style(FULLSCREEN_STYLE)
                .on_click(dismiss)
                .child(
                    Element::new("img")
                        .attr("src", src.as_str())
                        .attr("alt", self.title.as_str())
                        .style(FULLSCREEN_IMAGE_STYLE),
                ),
            OverlayKind::Image { src } => self.modal("certificate-modal", "800px", id).child(
                Element::new("img")
                    .attr("src", src.as_str())
                    .attr("alt", self.title.as_str())
                    .style(IMAGE_STYLE),
            ),
            OverlayKind::Document { url } => self.modal("pdf-modal", "900px", id).child(
                Element::new("iframe")
                    .attr("title", self.title.as_str())
                    .attr(
                        "src",
                        viewer_url(&settings.document_viewer, url, settings.base.as_ref()),
                    )
                    .style(FRAME_STYLE),
            ),
        };
        view.child_opt(self.download().map(|(href, file_name)| {
            let label = match self.kind {
                OverlayKind::Document { .. } => "📥 Download PDF",
                _ => "📥 Download Image",
            };
            Element::new("a")
                .class("overlay-download")
                .attr("href", href)
                .attr("download", file_name)
                .style(DOWNLOAD_STYLE)
                .text(label)
        }))
    }

    /// Backdrop and titled header row; the content goes in after it.
    fn modal(&self, class: &str, max_width: &str, id: OverlayId) -> Element {
        Element::new("div")
            .class(class)
            .attr("id", id.to_string())
            .attr("role", "dialog")
            .attr("aria-modal", "true")
            .style(BACKDROP_STYLE)
            .child(
                Element::new("div")
                    .class("overlay-header")
                    .style(&format!("{};max-width:{}", HEADER_STYLE, max_width))
                    .child(
                        Element::new("h3")
                            .style(TITLE_STYLE)
                            .text(self.title.as_str()),
                    )
                    .child(
                        Element::new("button")
                            .class("overlay-close")
                            .attr("type", "button")
                            .style(CLOSE_STYLE)
                            .on_click(Action::Dismiss(id))
                            .text("✕ Close"),
                    ),
            )
    }
}

/// Opens overlays on a `Surface` and tears them down again.
///
/// No exclusivity is enforced: several overlays may be open at once, each
/// with its own Escape listener.
pub struct OverlayController<S> {
    surface: S,
    settings: ViewerSettings,
    next_id: u64,
    open: Vec<OverlayId>,
}

impl<S: Surface> OverlayController<S> {
    pub fn new(surface: S, settings: ViewerSettings) -> Self {
        OverlayController {
            surface,
            settings,
            next_id: 1,
            open: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn open_image(&mut self, src: &str, title: &str) -> Result<OverlayId, SurfaceError> {
        self.open(Overlay::image(src, title))
    }

    pub fn open_document(&mut self, url: &str, title: &str) -> Result<OverlayId, SurfaceError> {
        self.open(Overlay::document(url, title))
    }

    pub fn open_fullscreen(&mut self, src: &str, title: &str) -> Result<OverlayId, SurfaceError> {
        self.open(Overlay::fullscreen(src, title))
    }

    pub fn open(&mut self, overlay: Overlay) -> Result<OverlayId, SurfaceError> {
        let id = OverlayId(self.next_id);
        self.next_id += 1;

        self.surface.mount_overlay(id, overlay.view(id, &self.settings))?;
        if let Err(e) = self.surface.listen_escape(id) {
            self.surface.unmount_overlay(id);
            return Err(e);
        }
        self.open.push(id);
        if self.open.len() == 1 {
            self.surface.lock_scroll(true);
        }
        debug!("Opened {} ({:?})", id, overlay.title);
        Ok(id)
    }

    /// Close an overlay. Returns false if it was already closed.
    pub fn dismiss(&mut self, id: OverlayId) -> bool {
        let Some(pos) = self.open.iter().position(|o| *o == id) else {
            return false;
        };
        self.open.remove(pos);
        self.surface.unlisten_escape(id);
        self.surface.unmount_overlay(id);
        if self.open.is_empty() {
            self.surface.lock_scroll(false);
        }
        debug!("Closed {}", id);
        true
    }

    /// Keydown delivered to the listener registered for `id`.
    pub fn handle_key(&mut self, id: OverlayId, key: &str) -> bool {
        key == "Escape" && self.dismiss(id)
    }

    /// Run a click action. Returns the id of an overlay it opened, if any.
    pub fn dispatch(&mut self, action: &Action) -> Result<Option<OverlayId>, SurfaceError> {
        match action {
            Action::OpenImage { src, title } => self.open_image(src, title).map(Some),
            Action::OpenFullscreen { src, title } => self.open_fullscreen(src, title).map(Some),
            Action::OpenDocument { url, title } => self.open_document(url, title).map(Some),
            Action::OpenExternal { url } => {
                info!("Opening {} in a new tab", url);
                self.surface.open_external(url)?;
                Ok(None)
            }
            Action::Dismiss(id) => {
                self.dismiss(*id);
                Ok(None)
            }
        }
    }

    pub fn is_open(&self, id: OverlayId) -> bool {
        self.open.contains(&id)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ViewerSettings {
        ViewerSettings::from_config(
            &SiteConfig::default(),
            Some(Url::parse("https://me.example.io/site/index.html").unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_download_name_collapses_whitespace() {
        assert_eq!(download_name("AWS Cert", "pdf"), "AWS-Cert.pdf");
        assert_eq!(download_name("Deep \t Learning  II", "jpg"), "Deep-Learning-II.jpg");
        assert_eq!(download_name(" Lead", "jpg"), "-Lead.jpg");
    }

    #[test]
    fn test_viewer_url_resolves_relative_document() {
        let s = settings();
        assert_eq!(
            viewer_url(&s.document_viewer, "certs/a b.pdf", s.base.as_ref()),
            "https://docs.google.com/viewer?url=https%3A%2F%2Fme.example.io%2Fsite%2Fcerts%2Fa%2520b.pdf&embedded=true"
        );
    }

    #[test]
    fn test_viewer_url_keeps_absolute_document() {
        let s = settings();
        assert_eq!(
            viewer_url(&s.document_viewer, "https://cdn.example/c.pdf", None),
            "https://docs.google.com/viewer?url=https%3A%2F%2Fcdn.example%2Fc.pdf&embedded=true"
        );
    }

    #[test]
    fn test_document_view_structure() {
        let id = OverlayId(7);
        let view = Overlay::document("cert.pdf", "AWS Cert").view(id, &settings());
        assert!(view.has_class("pdf-modal"));
        assert_eq!(view.get_attr("id"), Some("overlay-7"));
        assert!(view.on_click.is_none());
        assert_eq!(view.find_tag("h3").unwrap().text_content(), "AWS Cert");
        assert_eq!(
            view.find_class("overlay-close").unwrap().on_click,
            Some(Action::Dismiss(id))
        );
        let frame = view.find_tag("iframe").unwrap();
        assert!(frame
            .get_attr("src")
            .unwrap()
            .starts_with("https://docs.google.com/viewer?url="));
        let download = view.find_class("overlay-download").unwrap();
        assert_eq!(download.get_attr("href"), Some("cert.pdf"));
        assert_eq!(download.get_attr("download"), Some("AWS-Cert.pdf"));
    }

    #[test]
    fn test_image_view_offers_jpg_download() {
        let view = Overlay::image("c.png", "My Cert").view(OverlayId(1), &settings());
        assert!(view.has_class("certificate-modal"));
        assert_eq!(view.find_tag("img").unwrap().get_attr("src"), Some("c.png"));
        assert_eq!(
            view.find_class("overlay-download").unwrap().get_attr("download"),
            Some("My-Cert.jpg")
        );
    }

    #[test]
    fn test_fullscreen_backdrop_dismisses() {
        let id = OverlayId(3);
        let view = Overlay::fullscreen("c.png", "My Cert").view(id, &settings());
        assert_eq!(view.on_click, Some(Action::Dismiss(id)));
        assert!(view.find_class("overlay-download").is_none());
        assert!(view.find_class("overlay-close").is_none());
    }
}
