//! Fills the page's list containers: cards, the empty state, or the fixed
//! error message.

use log::{error, info};

use crate::config::{SectionMessages, SiteConfig};
use crate::dom::{Element, Node};
use crate::loader::{self, Fetch, LoadError, Loaded};
use crate::models::Record;
use crate::render::{render_cards, Card, RenderContext};
use crate::surface::{Surface, SurfaceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Projects,
    Certificates,
}

/// One list on the page: where it goes and what it says when there is
/// nothing to show.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    pub url: &'a str,
    pub container: &'a str,
    pub messages: &'a SectionMessages,
}

impl<'a> Section<'a> {
    pub fn of(kind: SectionKind, config: &'a SiteConfig) -> Self {
        match kind {
            SectionKind::Projects => Section::projects(config),
            SectionKind::Certificates => Section::certificates(config),
        }
    }

    pub fn projects(config: &'a SiteConfig) -> Self {
        Section {
            url: &config.projects_url,
            container: &config.projects_container,
            messages: &config.projects_messages,
        }
    }

    pub fn certificates(config: &'a SiteConfig) -> Self {
        Section {
            url: &config.certificates_url,
            container: &config.certificates_container,
            messages: &config.certificates_messages,
        }
    }
}

fn message(class: &str, text: &str) -> Node {
    Element::new("p").class(class).text(text).into()
}

/// Replace the container with the fixed "unable to load" message.
pub fn show_error<S: Surface>(
    surface: &mut S,
    container: &str,
    text: &str,
) -> Result<(), SurfaceError> {
    surface.replace_contents(container, vec![message("error", text)])
}

pub fn show_empty<S: Surface>(
    surface: &mut S,
    container: &str,
    text: &str,
) -> Result<(), SurfaceError> {
    surface.replace_contents(container, vec![message("no-data", text)])
}

/// Render a load outcome into its section. Returns the number of cards.
/// Load errors are logged in full; the user only sees the section's message.
pub fn present<T, S>(
    surface: &mut S,
    section: &Section,
    outcome: Result<Loaded<T>, LoadError>,
    ctx: &RenderContext,
) -> Result<usize, SurfaceError>
where
    T: Record + Card,
    S: Surface,
{
    match outcome {
        Ok(Loaded::Records(records)) => {
            let cards = render_cards(&records, ctx);
            let count = cards.len();
            surface.replace_contents(section.container, cards)?;
            info!("Rendered {} {}", count, T::KIND);
            Ok(count)
        }
        Ok(Loaded::Empty) => {
            show_empty(surface, section.container, &section.messages.empty)?;
            info!("No {} to show", T::KIND);
            Ok(0)
        }
        Err(e) => {
            error!("Error loading {}: {}", T::KIND, e);
            show_error(surface, section.container, &section.messages.error)?;
            Ok(0)
        }
    }
}

/// Load a section's resource and render it.
pub async fn populate<T, F, S>(
    fetcher: &F,
    surface: &mut S,
    section: &Section<'_>,
    ctx: &RenderContext<'_>,
) -> Result<usize, SurfaceError>
where
    T: Record + Card,
    F: Fetch,
    S: Surface,
{
    let outcome = loader::load::<T, F>(fetcher, section.url).await;
    present(surface, section, outcome, ctx)
}
