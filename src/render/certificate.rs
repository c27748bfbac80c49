use super::{card_image, format_month_year, Card, RenderContext};
use crate::config::ImageViewer;
use crate::dom::{Action, Element};
use crate::models::{Certificate, CertificateKind};

/// What activating a certificate does. Both the image region and the
/// explicit button dispatch this same action.
pub fn primary_action(cert: &Certificate, viewer: ImageViewer) -> Option<Action> {
    match &cert.kind {
        CertificateKind::Pdf { file, .. } => Some(Action::OpenDocument {
            url: file.clone(),
            title: cert.name.clone(),
        }),
        CertificateKind::Image { image } => Some(match viewer {
            ImageViewer::Modal => Action::OpenImage {
                src: image.clone(),
                title: cert.name.clone(),
            },
            ImageViewer::Fullscreen => Action::OpenFullscreen {
                src: image.clone(),
                title: cert.name.clone(),
            },
        }),
        CertificateKind::Link { credential_url, .. } => credential_url
            .as_ref()
            .map(|url| Action::OpenExternal { url: url.clone() }),
    }
}

fn type_icon(kind: &CertificateKind) -> &'static str {
    match kind {
        CertificateKind::Image { .. } => "📄",
        CertificateKind::Pdf { .. } => "📊",
        CertificateKind::Link { .. } => "🔗",
    }
}

/// Button or link for the card's action row; `None` when the record has no
/// usable target.
fn action_control(cert: &Certificate, action: Option<Action>) -> Option<Element> {
    let action = action?;
    let control = match (&cert.kind, action) {
        (_, Action::OpenExternal { url }) => Element::new("a")
            .class("btn-small")
            .attr("href", url)
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .text("🔗 Verify Online"),
        (CertificateKind::Pdf { .. }, action) => Element::new("button")
            .class("btn-small")
            .attr("type", "button")
            .on_click(action)
            .text("📖 View PDF"),
        (_, action) => Element::new("button")
            .class("btn-small")
            .attr("type", "button")
            .on_click(action)
            .text("👁️ View"),
    };
    Some(control)
}

impl Card for Certificate {
    fn card(&self, ctx: &RenderContext) -> Element {
        let action = primary_action(self, ctx.image_viewer);
        let is_pdf = matches!(self.kind, CertificateKind::Pdf { .. });
        let caption = if is_pdf { "View PDF" } else { "View Certificate" };
        let thumbnail = self.thumbnail().unwrap_or(ctx.fallback_image);

        let image_region = Element::new("div")
            .class("certificate-image")
            .on_click_opt(action.clone())
            .child(card_image(thumbnail, &self.name, ctx))
            .child(
                Element::new("div")
                    .class("certificate-overlay")
                    .text(format!("{} {}", type_icon(&self.kind), caption)),
            )
            .child_opt(is_pdf.then(|| Element::new("div").class("pdf-badge").text("PDF")));

        let info = Element::new("div")
            .class("certificate-info")
            .child(Element::new("h4").text(self.name.as_str()))
            .child(
                Element::new("p")
                    .class("certificate-issuer")
                    .child(Element::new("strong").text("Issued by:"))
                    .text(format!(" {}", self.issuer)),
            )
            .child(
                Element::new("p")
                    .child(Element::new("strong").text("Date:"))
                    .text(" ")
                    .child(
                        Element::new("span")
                            .class("certificate-date")
                            .text(format_month_year(&self.date)),
                    ),
            )
            .child(
                Element::new("div")
                    .class("certificate-actions")
                    .child_opt(action_control(self, action)),
            );

        Element::new("div")
            .class("certificate-card")
            .attr("data-type", self.kind.label())
            .child(image_region)
            .child(info)
    }
}
