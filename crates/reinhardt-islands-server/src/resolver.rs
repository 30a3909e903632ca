//! Component resolution.

use std::fmt;
use std::sync::Arc;

use reinhardt_islands_core::ComponentDefinition;

use crate::error::ResolutionResult;
use crate::module::{ComponentLoader, ModuleKey};
use crate::registry::ComponentRegistry;
use crate::settings::RuntimeMode;

/// Turns component identifiers into component definitions.
///
/// In [`RuntimeMode::Development`] every resolution evicts the cached module
/// first, so edits to a component are visible on the next request. In
/// [`RuntimeMode::Production`] the first successful load is reused.
pub struct ComponentResolver {
	loader: Arc<dyn ComponentLoader>,
	registry: Arc<ComponentRegistry>,
	mode: RuntimeMode,
}

impl ComponentResolver {
	/// Creates a resolver with a private registry.
	pub fn new(loader: Arc<dyn ComponentLoader>, mode: RuntimeMode) -> Self {
		Self {
			loader,
			registry: Arc::new(ComponentRegistry::new()),
			mode,
		}
	}

	/// Shares `registry` instead of the private one.
	pub fn with_registry(mut self, registry: Arc<ComponentRegistry>) -> Self {
		self.registry = registry;
		self
	}

	/// The runtime mode.
	pub fn mode(&self) -> RuntimeMode {
		self.mode
	}

	/// The module cache.
	pub fn registry(&self) -> &Arc<ComponentRegistry> {
		&self.registry
	}

	/// Resolves an identifier to the component its module provides.
	pub fn resolve(&self, identifier: &str) -> ResolutionResult<ComponentDefinition> {
		let key = ModuleKey::resolve(identifier)?;
		let module = if self.mode.evicts_on_resolve() {
			self.registry.reload(&key, self.loader.as_ref())?
		} else {
			self.registry.get_or_load(&key, self.loader.as_ref())?
		};
		module.into_definition(&key)
	}
}

impl fmt::Debug for ComponentResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentResolver")
			.field("registry", &self.registry)
			.field("mode", &self.mode)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ResolutionError;
	use crate::module::{Module, StaticLoader};
	use reinhardt_islands_core::{Fault, FnComponent, Props, RenderContext};
	use rstest::rstest;

	fn text(
		name: &'static str,
		body: &'static str,
	) -> FnComponent<impl Fn(&Props, &RenderContext) -> Result<String, Fault> + Send + Sync> {
		FnComponent::new(name, move |_: &Props, _: &RenderContext| Ok(body.to_string()))
	}

	fn loader_with(body: &'static str) -> Arc<StaticLoader> {
		let loader = Arc::new(StaticLoader::new());
		loader
			.register_module("Banner", Module::component(text("Banner", body)))
			.unwrap();
		loader
	}

	fn body_of(resolver: &ComponentResolver) -> String {
		let definition = resolver.resolve("./Banner").unwrap();
		definition
			.component()
			.render(&Props::new(), &RenderContext::new())
			.unwrap()
	}

	#[rstest]
	fn test_development_observes_changes() {
		let loader = loader_with("v1");
		let resolver = ComponentResolver::new(loader.clone(), RuntimeMode::Development);
		assert_eq!(body_of(&resolver), "v1");

		loader
			.register_module("Banner", Module::component(text("Banner", "v2")))
			.unwrap();
		assert_eq!(body_of(&resolver), "v2");
	}

	#[rstest]
	fn test_production_keeps_first_load() {
		let loader = loader_with("v1");
		let resolver = ComponentResolver::new(loader.clone(), RuntimeMode::Production);
		assert_eq!(body_of(&resolver), "v1");

		loader
			.register_module("Banner", Module::component(text("Banner", "v2")))
			.unwrap();
		assert_eq!(body_of(&resolver), "v1");
		assert!(resolver.registry().contains(&ModuleKey::resolve("Banner").unwrap()));
	}

	#[rstest]
	fn test_resolve_unwraps_default_export() {
		let loader = Arc::new(StaticLoader::new());
		loader
			.register_module(
				"Page",
				Module::namespace()
					.with_default(text("Page", ""))
					.with_export("PageTitle", text("PageTitle", "")),
			)
			.unwrap();

		let resolver = ComponentResolver::new(loader, RuntimeMode::Production);
		assert_eq!(resolver.resolve("Page").unwrap().name(), "Page");
	}

	#[rstest]
	#[case(RuntimeMode::Development)]
	#[case(RuntimeMode::Production)]
	fn test_resolve_unknown(#[case] mode: RuntimeMode) {
		let resolver = ComponentResolver::new(Arc::new(StaticLoader::new()), mode);
		assert!(matches!(
			resolver.resolve("Nowhere"),
			Err(ResolutionError::NotFound(_))
		));
	}

	#[rstest]
	fn test_shared_registry() {
		let registry = Arc::new(ComponentRegistry::new());
		let resolver = ComponentResolver::new(loader_with("v1"), RuntimeMode::Production)
			.with_registry(Arc::clone(&registry));

		resolver.resolve("Banner").unwrap();
		assert_eq!(registry.len(), 1);
	}
}
