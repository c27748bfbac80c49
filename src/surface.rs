use thiserror::Error;

use crate::dom::{Element, Node};
use crate::overlay::OverlayId;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("no element with id {0:?} in the page")]
    MissingContainer(String),
    #[error("document operation failed: {0}")]
    Dom(String),
}

/// The document as seen by the renderers and the overlay controller.
///
/// The browser implementation lives in `web`; tests use an in-memory one.
/// Implementations hold any event closures they create and must release
/// them when the element they belong to goes away.
pub trait Surface {
    /// Replace everything inside the element with id `container`.
    fn replace_contents(&mut self, container: &str, nodes: Vec<Node>) -> Result<(), SurfaceError>;

    /// Attach an overlay's view above the page.
    fn mount_overlay(&mut self, id: OverlayId, view: Element) -> Result<(), SurfaceError>;

    /// Remove an overlay's view. Unknown ids are ignored.
    fn unmount_overlay(&mut self, id: OverlayId);

    /// Register a document-level Escape listener that reports back for `id`.
    fn listen_escape(&mut self, id: OverlayId) -> Result<(), SurfaceError>;

    /// Deregister the listener added by `listen_escape`. Unknown ids are ignored.
    fn unlisten_escape(&mut self, id: OverlayId);

    /// Open `url` in a new browsing context.
    fn open_external(&mut self, url: &str) -> Result<(), SurfaceError>;

    /// Stop or restore page scrolling behind overlays.
    fn lock_scroll(&mut self, locked: bool);
}
