//! Reinhardt Islands - shared render/revival protocol
//!
//! This crate holds everything the server renderer and the client reviver must
//! agree on without depending on each other's internals:
//!
//! - [`markers`]: the DOM marker contract (`data-rendered`, `data-component`, `data-props`)
//! - [`props`]: the JSON props payload carried by a marker
//! - [`component`]: component definitions and function components
//! - [`view`]: the element tree handed to the rendering and hydration collaborators
//! - [`render`]: the markup-rendering collaborator trait and its default implementation
//! - [`fault`]: faults captured from component code
//! - [`result`]: the structured `RenderResult` contract returned by the server
//!
//! ## Architecture
//!
//! ```text
//! Server                                     Client
//! ComponentResolver → ServerRenderer         Locator → ComponentMapper → Reviver
//!                          │                     ▲
//!                          ▼                     │
//!          <div data-rendered data-component=".." data-props="..">…</div>
//! ```

#![warn(missing_docs)]

pub mod component;
pub mod error;
pub mod fault;
pub mod markers;
pub mod props;
pub mod render;
pub mod result;
pub mod view;

pub use component::{Component, ComponentDefinition, FnComponent};
pub use error::{InvalidRenderResult, PayloadError};
pub use fault::{Fault, PANIC_KIND};
pub use markers::{
	ATTR_COMPONENT, ATTR_PROPS, ATTR_RENDERED, DEFAULT_ROOT_ELEMENT_ID, FLAGGED_SELECTOR,
	IslandMarker, RootMarker,
};
pub use props::Props;
pub use render::{MarkupRenderer, ROUTER_NESTING_KIND, RenderContext, StringRenderer};
pub use result::{ErrorInfo, RenderArgs, RenderResult};
pub use view::{Location, View};
