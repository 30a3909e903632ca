//! Markup rendering collaborator.
//!
//! The [`MarkupRenderer`] trait is the seam to the UI framework's
//! string-rendering primitive. [`StringRenderer`] is the default: it walks the
//! [`View`] and asks each component for its markup, threading the routing
//! context down the tree.

use crate::fault::Fault;
use crate::view::{Location, View};

/// Kind reported when a router is rendered inside another router.
pub const ROUTER_NESTING_KIND: &str = "RouterNestingError";

/// Context visible to a component while it renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
	location: Option<Location>,
}

impl RenderContext {
	/// Creates an empty context with no router.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a context inside a router seeded with `location`.
	pub fn with_location(mut self, location: Location) -> Self {
		self.location = Some(location);
		self
	}

	/// The current routing location, if rendering inside a router.
	pub fn location(&self) -> Option<&Location> {
		self.location.as_ref()
	}

	/// Returns `true` if rendering inside a router.
	pub fn is_routed(&self) -> bool {
		self.location.is_some()
	}
}

/// Serializes a view to markup.
pub trait MarkupRenderer: Send + Sync {
	/// Renders the view to an HTML string.
	fn render_to_string(&self, view: &View) -> Result<String, Fault>;
}

/// Default renderer delegating to each component's `render`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringRenderer;

impl StringRenderer {
	/// Creates a new renderer.
	pub fn new() -> Self {
		Self
	}

	fn render_in(&self, view: &View, cx: &RenderContext) -> Result<String, Fault> {
		match view {
			View::Component { definition, props } => definition.component().render(props, cx),
			View::Router { location, child } => {
				if cx.is_routed() {
					return Err(Fault::new(
						ROUTER_NESTING_KIND,
						"a router cannot be rendered inside another router",
					));
				}
				let cx = cx.clone().with_location(location.clone());
				self.render_in(child, &cx)
			}
		}
	}
}

impl MarkupRenderer for StringRenderer {
	fn render_to_string(&self, view: &View) -> Result<String, Fault> {
		self.render_in(view, &RenderContext::new())
	}
}
