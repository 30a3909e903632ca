//! Reinhardt Islands - client side
//!
//! Locates server-rendered islands in a document and revives them by handing
//! each reconstructed component tree to a hydration collaborator.
//!
//! - [`document`]: document and element access (static HTML, browser on wasm32)
//! - [`locator`]: flagged element discovery and marker parsing
//! - [`mapper`]: identifier to component mapping
//! - [`hydrate`]: the hydration collaborator and its verifying implementation
//! - [`reviver`]: multi-island and single-root revival
//!
//! ## Architecture
//!
//! ```text
//! Document → Locator → [FlaggedIsland] → ComponentMapper → View → Hydrator
//! ```
//!
//! Errors are never swallowed here. See [`ReviveError`].

#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod hydrate;
pub mod locator;
pub mod mapper;
pub mod reviver;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub use document::BrowserDocument;
pub use document::{Document, DomElement, HtmlDocument, StaticElement};
pub use error::{ReviveError, ReviveResult};
pub use hydrate::{HYDRATION_MISMATCH_KIND, Hydrator, MarkupHydrator, RevivedIsland};
pub use locator::{FlaggedIsland, Locator};
pub use mapper::{ComponentMap, ComponentMapper};
pub use reviver::Reviver;
pub use settings::ClientSettings;
