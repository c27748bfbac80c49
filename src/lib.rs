//! Folio renders a personal portfolio page in the browser.
//!
//! Two JSON resources (projects, certificates) are fetched, each record is
//! turned into a card, and certificate cards open modal viewers for images
//! and PDFs. All logic works on a virtual node tree so it runs natively under
//! test; the `web` module binds that tree to the real document on wasm32.

pub mod config;
pub mod dom;
pub mod loader;
pub mod logging;
pub mod models;
pub mod overlay;
pub mod page;
pub mod render;
pub mod scroll;
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod web;


pub use config::SiteConfig;
pub use dom::{Action, Element, Node};
pub use loader::{LoadError, Loaded};
pub use models::{Certificate, CertificateKind, Project};
pub use overlay::{OverlayController, OverlayId};
pub use surface::{Surface, SurfaceError};
