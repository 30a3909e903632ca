//! Reinhardt Islands - server side
//!
//! Resolves component identifiers to component definitions and renders them
//! to markup behind a single fault-capturing boundary.
//!
//! - [`module`]: identifier canonicalization, module exports, loaders
//! - [`registry`]: the per-identifier module cache
//! - [`resolver`]: development/production resolution policy
//! - [`renderer`]: the render entry points returning [`RenderResult`]
//! - [`settings`]: runtime mode and renderer settings
//!
//! In development mode every resolution evicts the cached module for that
//! identifier before loading it again. Eviction and reload happen under the
//! identifier's slot lock, so concurrent requests never observe a
//! half-evicted entry.
//!
//! [`RenderResult`]: reinhardt_islands_core::RenderResult

#![warn(missing_docs)]

pub mod error;
pub mod module;
pub mod registry;
pub mod renderer;
pub mod resolver;
pub mod settings;

pub use error::{
	PAYLOAD_ERROR_KIND, RESOLUTION_ERROR_KIND, ResolutionError, ResolutionResult, SettingsError,
};
pub use module::{ComponentLoader, Module, ModuleFactory, ModuleKey, StaticLoader};
pub use registry::ComponentRegistry;
pub use renderer::ServerRenderer;
pub use resolver::ComponentResolver;
pub use settings::{ENV_VAR, RuntimeMode, ServerSettings};
