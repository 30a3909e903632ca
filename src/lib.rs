//! # Reinhardt Islands
//!
//! Server rendering and client revival for component islands.
//!
//! A page is rendered on the server one component at a time. Each rendered
//! component is wrapped in a marker element that names the component and
//! carries its props, and on the client every marker is revived in place
//! without throwing the server markup away.
//!
//! ## Feature Flags
//!
//! - `server` (default) - component resolution, module cache, render boundary
//! - `client` (default) - island location, component mapping, revival
//!
//! The shared protocol is always available as [`protocol`].
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use reinhardt_islands::prelude::*;
//!
//! let header = ComponentDefinition::new(FnComponent::new(
//! 	"Header",
//! 	|props: &Props, _: &RenderContext| {
//! 		let title = props.get("title").and_then(|v| v.as_str()).unwrap_or_default();
//! 		Ok(format!("<h1>{}</h1>", title))
//! 	},
//! ));
//!
//! // Server
//! let loader = Arc::new(StaticLoader::new());
//! loader
//! 	.register_module("components/Header", Module::Component(header.clone()))
//! 	.unwrap();
//! let renderer = ServerRenderer::new(ComponentResolver::new(loader, RuntimeMode::Production));
//! let island = renderer.render_island("components/Header", Props::new().with("title", "Hi"));
//!
//! // Client
//! let html = format!("<html><body>{}</body></html>", island.markup().unwrap());
//! let document = HtmlDocument::parse(&html);
//! let mut components = ComponentMap::new();
//! components.insert("components/Header", header);
//!
//! let mut reviver = Reviver::new(&document, MarkupHydrator::new());
//! assert_eq!(reviver.revive(&components).unwrap(), 1);
//! ```

#![warn(missing_docs)]

pub use reinhardt_islands_core as protocol;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "server")]
pub mod server;

pub mod prelude;
