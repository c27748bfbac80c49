//! Card renderer: one card per record, in input order.

mod certificate;
mod project;

pub use certificate::primary_action;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::config::{ImageViewer, SiteConfig};
use crate::dom::{Element, Node};

/// Shown for dates that cannot be parsed, as a browser would.
pub const INVALID_DATE: &str = "Invalid Date";

/// Settings the card templates need.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub fallback_image: &'a str,
    pub image_viewer: ImageViewer,
}

impl<'a> RenderContext<'a> {
    pub fn from_config(config: &'a SiteConfig) -> Self {
        RenderContext {
            fallback_image: &config.fallback_image,
            image_viewer: config.image_viewer,
        }
    }
}

/// A record that knows how to draw itself as a card.
pub trait Card {
    fn card(&self, ctx: &RenderContext) -> Element;
}

pub fn render_cards<T: Card>(records: &[T], ctx: &RenderContext) -> Vec<Node> {
    records.iter().map(|r| Node::Element(r.card(ctx))).collect()
}

/// `<img>` that swaps to the placeholder icon if `src` fails to load.
pub(crate) fn card_image(src: &str, alt: &str, ctx: &RenderContext) -> Element {
    Element::new("img")
        .attr("src", src)
        .attr("alt", alt)
        .attr("loading", "lazy")
        .fallback(ctx.fallback_image)
}

/// Format an ISO-ish date as "May 2023" (English month names).
/// Anything unparseable becomes "Invalid Date" rather than an error.
pub fn format_month_year(raw: &str) -> String {
    match parse_date(raw.trim()) {
        Some(date) => date.format("%B %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    // Dates are taken as written, so a zone suffix only needs removing.
    let local = strip_zone(raw);
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(local, fmt) {
            return Some(dt.date());
        }
    }
    // Year-month and bare year resolve to the first day.
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d") {
        return Some(d);
    }
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(&format!("{}-01-01", raw), "%Y-%m-%d").ok();
    }
    None
}

/// Drop a trailing `Z`, `+hh:mm`, `+hhmm` or `+hh` from a `T` timestamp.
fn strip_zone(raw: &str) -> &str {
    let Some(t) = raw.find('T') else {
        return raw;
    };
    if let Some(rest) = raw.strip_suffix(['Z', 'z']) {
        return rest;
    }
    match raw[t..].rfind(['+', '-']) {
        Some(i) => &raw[..t + i],
        None => raw,
    }
}
