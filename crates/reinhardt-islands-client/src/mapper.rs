//! Client component mapping.
//!
//! The server emits module identifiers; the client decides which component
//! each identifier revives as. Any `Fn(&str) -> Option<ComponentDefinition>`
//! is a mapper, and [`ComponentMap`] covers the common lookup-table case.

use std::collections::HashMap;

use reinhardt_islands_core::{Component, ComponentDefinition};

/// Maps component identifiers to client-side component definitions.
pub trait ComponentMapper {
	/// Returns the component for `identifier`, or `None` if unknown.
	fn map(&self, identifier: &str) -> Option<ComponentDefinition>;
}

impl<F> ComponentMapper for F
where
	F: Fn(&str) -> Option<ComponentDefinition>,
{
	fn map(&self, identifier: &str) -> Option<ComponentDefinition> {
		self(identifier)
	}
}

/// A lookup table of components keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct ComponentMap {
	components: HashMap<String, ComponentDefinition>,
}

impl ComponentMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a component, builder style.
	pub fn with<C: Component + 'static>(mut self, identifier: impl Into<String>, component: C) -> Self {
		self.insert(identifier, ComponentDefinition::new(component));
		self
	}

	/// Adds a component definition, returning the one it replaced.
	pub fn insert(
		&mut self,
		identifier: impl Into<String>,
		definition: ComponentDefinition,
	) -> Option<ComponentDefinition> {
		self.components.insert(identifier.into(), definition)
	}

	/// Returns `true` if `identifier` is mapped.
	pub fn contains(&self, identifier: &str) -> bool {
		self.components.contains_key(identifier)
	}

	/// Number of mapped identifiers.
	pub fn len(&self) -> usize {
		self.components.len()
	}

	/// Returns `true` if nothing is mapped.
	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}
}

impl ComponentMapper for ComponentMap {
	fn map(&self, identifier: &str) -> Option<ComponentDefinition> {
		self.components.get(identifier).cloned()
	}
}
