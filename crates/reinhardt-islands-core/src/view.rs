//! Element trees handed to the rendering and hydration collaborators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::ComponentDefinition;
use crate::props::Props;

/// A navigation location used to seed a routing context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
	/// Creates a location from a path.
	pub fn new(path: impl Into<String>) -> Self {
		Self(path.into())
	}

	/// The root location, `/`.
	pub fn root() -> Self {
		Self("/".to_string())
	}

	/// The location as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for Location {
	fn default() -> Self {
		Self::root()
	}
}

impl From<&str> for Location {
	fn from(path: &str) -> Self {
		Self::new(path)
	}
}

impl From<String> for Location {
	fn from(path: String) -> Self {
		Self(path)
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// An element tree: a component applied to props, optionally inside a router.
#[derive(Debug, Clone)]
pub enum View {
	/// `Component(props)`.
	Component {
		/// The component to render.
		definition: ComponentDefinition,
		/// The props to render it with.
		props: Props,
	},
	/// A routing context whose single child is another view.
	Router {
		/// The location the router is seeded with.
		location: Location,
		/// The routed subtree.
		child: Box<View>,
	},
}

impl View {
	/// Builds `Component(props)`.
	pub fn component(definition: ComponentDefinition, props: Props) -> Self {
		Self::Component { definition, props }
	}

	/// Wraps a view in a routing context seeded with `location`.
	pub fn routed(location: impl Into<Location>, child: View) -> Self {
		Self::Router {
			location: location.into(),
			child: Box::new(child),
		}
	}

	/// The innermost component of the tree.
	pub fn root_component(&self) -> &ComponentDefinition {
		match self {
			Self::Component { definition, .. } => definition,
			Self::Router { child, .. } => child.root_component(),
		}
	}

	/// The props of the innermost component.
	pub fn props(&self) -> &Props {
		match self {
			Self::Component { props, .. } => props,
			Self::Router { child, .. } => child.props(),
		}
	}

	/// The outermost routing location, if the tree is routed.
	pub fn location(&self) -> Option<&Location> {
		match self {
			Self::Component { .. } => None,
			Self::Router { location, .. } => Some(location),
		}
	}
}
