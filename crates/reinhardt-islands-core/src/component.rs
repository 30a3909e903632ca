//! Component definitions.
//!
//! A component turns props into markup. How it does so (templates, a builder
//! API, a foreign UI framework) is outside this crate; the protocol only needs
//! a declared name and a fallible render entry point.

use std::fmt;
use std::sync::Arc;

use crate::fault::Fault;
use crate::props::Props;
use crate::render::RenderContext;

/// A renderable unit of UI.
pub trait Component: Send + Sync {
	/// The component's declared name, reported back in successful render results.
	fn name(&self) -> &str;

	/// Renders the component with the given props.
	///
	/// `cx` carries the routing context when the tree was wrapped in a router.
	fn render(&self, props: &Props, cx: &RenderContext) -> Result<String, Fault>;
}

/// A resolved component, independent of how its defining module exported it.
#[derive(Clone)]
pub struct ComponentDefinition {
	component: Arc<dyn Component>,
}

impl ComponentDefinition {
	/// Creates a definition from a component value.
	pub fn new<C: Component + 'static>(component: C) -> Self {
		Self {
			component: Arc::new(component),
		}
	}

	/// Creates a definition from a shared component.
	pub fn from_arc(component: Arc<dyn Component>) -> Self {
		Self { component }
	}

	/// The component's declared name.
	pub fn name(&self) -> &str {
		self.component.name()
	}

	/// Borrows the component.
	pub fn component(&self) -> &dyn Component {
		self.component.as_ref()
	}

	/// Returns `true` if both definitions share the same component instance.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.component, &other.component)
	}
}

impl fmt::Debug for ComponentDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentDefinition")
			.field("name", &self.name())
			.finish()
	}
}

/// A component backed by a closure.
///
/// ```
/// use reinhardt_islands_core::{Component, FnComponent, Props, RenderContext};
///
/// let greeting = FnComponent::new("Greeting", |props: &Props, _cx: &RenderContext| {
///     let name = props.get("name").and_then(|v| v.as_str()).unwrap_or("stranger");
///     Ok(format!("<p>Hello, {}</p>", name))
/// });
///
/// let html = greeting.render(&Props::new().with("name", "Ada"), &RenderContext::new());
/// assert_eq!(html.unwrap(), "<p>Hello, Ada</p>");
/// ```
pub struct FnComponent<F> {
	name: String,
	render: F,
}

impl<F> FnComponent<F>
where
	F: Fn(&Props, &RenderContext) -> Result<String, Fault> + Send + Sync,
{
	/// Creates a named function component.
	pub fn new(name: impl Into<String>, render: F) -> Self {
		Self {
			name: name.into(),
			render,
		}
	}
}

impl<F> Component for FnComponent<F>
where
	F: Fn(&Props, &RenderContext) -> Result<String, Fault> + Send + Sync,
{
	fn name(&self) -> &str {
		&self.name
	}

	fn render(&self, props: &Props, cx: &RenderContext) -> Result<String, Fault> {
		(self.render)(props, cx)
	}
}

impl<F> fmt::Debug for FnComponent<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnComponent")
			.field("name", &self.name)
			.finish()
	}
}
