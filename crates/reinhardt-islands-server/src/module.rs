//! Component modules and loaders.
//!
//! A component identifier names a module, not a component: the module may
//! export its component directly, or as a `default` export next to other
//! named exports. [`Module::into_definition`] normalizes both shapes into a
//! [`ComponentDefinition`] so the renderer never sees a wrapper.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use reinhardt_islands_core::{Component, ComponentDefinition, Fault};

use crate::error::{ResolutionError, ResolutionResult};

/// Canonical cache key for a component identifier.
///
/// `./` segments are dropped and `..` segments collapse their parent, so
/// `"./Greeting"`, `"Greeting"` and `"./widgets/../Greeting"` all name the
/// same module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey(String);

impl ModuleKey {
	/// Canonicalizes an identifier.
	pub fn resolve(identifier: &str) -> ResolutionResult<Self> {
		let trimmed = identifier.trim();
		let invalid = |reason| ResolutionError::InvalidIdentifier {
			identifier: identifier.to_string(),
			reason,
		};

		if trimmed.is_empty() {
			return Err(invalid("identifier is empty"));
		}

		let absolute = trimmed.starts_with('/');
		let mut segments: Vec<&str> = Vec::new();
		for segment in trimmed.split('/') {
			match segment {
				"" | "." => {}
				".." => {
					if segments.pop().is_none() {
						return Err(invalid("identifier escapes the component root"));
					}
				}
				segment => segments.push(segment),
			}
		}

		if segments.is_empty() {
			return Err(invalid("identifier names no module"));
		}

		let joined = segments.join("/");
		Ok(Self(if absolute {
			format!("/{}", joined)
		} else {
			joined
		}))
	}

	/// The canonical key.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ModuleKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// The exports of a loaded component module.
#[derive(Debug, Clone)]
pub enum Module {
	/// The module itself is the component.
	Component(ComponentDefinition),
	/// The module exports a namespace with an optional `default` component.
	Namespace {
		/// The `default` export.
		default: Option<ComponentDefinition>,
		/// Other named exports.
		named: BTreeMap<String, ComponentDefinition>,
	},
}

impl Module {
	/// A module whose top-level export is `component`.
	pub fn component<C: Component + 'static>(component: C) -> Self {
		Self::Component(ComponentDefinition::new(component))
	}

	/// An empty namespace module.
	pub fn namespace() -> Self {
		Self::Namespace {
			default: None,
			named: BTreeMap::new(),
		}
	}

	/// Sets the `default` export, turning the module into a namespace if needed.
	pub fn with_default<C: Component + 'static>(self, component: C) -> Self {
		match self {
			Self::Namespace { named, .. } => Self::Namespace {
				default: Some(ComponentDefinition::new(component)),
				named,
			},
			Self::Component(_) => Self::Namespace {
				default: Some(ComponentDefinition::new(component)),
				named: BTreeMap::new(),
			},
		}
	}

	/// Adds a named export, turning the module into a namespace if needed.
	pub fn with_export<C: Component + 'static>(self, name: impl Into<String>, component: C) -> Self {
		let (default, mut named) = match self {
			Self::Namespace { default, named } => (default, named),
			Self::Component(definition) => (Some(definition), BTreeMap::new()),
		};
		named.insert(name.into(), ComponentDefinition::new(component));
		Self::Namespace { default, named }
	}

	/// Normalizes the module's exports into the component it provides.
	///
	/// A `default` export wins; a top-level component is returned as is.
	pub fn into_definition(self, key: &ModuleKey) -> ResolutionResult<ComponentDefinition> {
		match self {
			Self::Component(definition) => Ok(definition),
			Self::Namespace {
				default: Some(definition),
				..
			} => Ok(definition),
			Self::Namespace {
				default: None,
				named,
			} => Err(ResolutionError::MissingDefaultExport {
				identifier: key.to_string(),
				exports: named.into_keys().collect(),
			}),
		}
	}
}

/// Loads component modules by canonical key.
///
/// Each call must evaluate the module afresh; caching is the registry's job.
pub trait ComponentLoader: Send + Sync {
	/// Loads the module named by `key`.
	fn load(&self, key: &ModuleKey) -> ResolutionResult<Module>;
}

/// Evaluates a module. May fail like a module whose top level throws.
pub type ModuleFactory = Arc<dyn Fn() -> Result<Module, Fault> + Send + Sync>;

/// A loader over modules registered in process.
///
/// Registering a new factory under an existing identifier replaces the
/// backing definition; a development-mode resolver observes the change on its
/// next resolution, a production-mode resolver keeps its cached module.
#[derive(Default)]
pub struct StaticLoader {
	modules: RwLock<HashMap<ModuleKey, ModuleFactory>>,
}

impl StaticLoader {
	/// Creates an empty loader.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a module factory, returning whether one was replaced.
	pub fn register<F>(&self, identifier: &str, factory: F) -> ResolutionResult<bool>
	where
		F: Fn() -> Result<Module, Fault> + Send + Sync + 'static,
	{
		let key = ModuleKey::resolve(identifier)?;
		Ok(self.modules.write().insert(key, Arc::new(factory)).is_some())
	}

	/// Registers a ready-made module, returning whether one was replaced.
	pub fn register_module(&self, identifier: &str, module: Module) -> ResolutionResult<bool> {
		self.register(identifier, move || Ok(module.clone()))
	}

	/// Removes a module, returning whether it was registered.
	pub fn unregister(&self, identifier: &str) -> ResolutionResult<bool> {
		let key = ModuleKey::resolve(identifier)?;
		Ok(self.modules.write().remove(&key).is_some())
	}

	/// Returns `true` if a module is registered under the identifier.
	pub fn contains(&self, identifier: &str) -> bool {
		ModuleKey::resolve(identifier)
			.map(|key| self.modules.read().contains_key(&key))
			.unwrap_or(false)
	}
}

impl ComponentLoader for StaticLoader {
	fn load(&self, key: &ModuleKey) -> ResolutionResult<Module> {
		// Clone the factory out so evaluation runs without the lock held.
		let factory = self
			.modules
			.read()
			.get(key)
			.cloned()
			.ok_or_else(|| ResolutionError::NotFound(key.to_string()))?;

		factory().map_err(|fault| ResolutionError::LoadFailed {
			identifier: key.to_string(),
			fault,
		})
	}
}

impl fmt::Debug for StaticLoader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let modules = self.modules.read();
		let mut keys: Vec<&str> = modules.keys().map(ModuleKey::as_str).collect();
		keys.sort_unstable();
		f.debug_struct("StaticLoader").field("modules", &keys).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_islands_core::{FnComponent, Props, RenderContext};
	use rstest::rstest;

	fn named(
		name: &'static str,
	) -> FnComponent<impl Fn(&Props, &RenderContext) -> Result<String, Fault> + Send + Sync> {
		FnComponent::new(name, |_: &Props, _: &RenderContext| Ok(String::new()))
	}

	#[rstest]
	#[case("Greeting", "Greeting")]
	#[case("./Greeting", "Greeting")]
	#[case("./widgets/../Greeting", "Greeting")]
	#[case("widgets//Card", "widgets/Card")]
	#[case("/srv/app/Card", "/srv/app/Card")]
	#[case("  ./Card  ", "Card")]
	fn test_module_key_canonicalizes(#[case] identifier: &str, #[case] expected: &str) {
		assert_eq!(ModuleKey::resolve(identifier).unwrap().as_str(), expected);
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	#[case("./")]
	#[case("../Greeting")]
	#[case("widgets/../../Greeting")]
	fn test_module_key_rejects(#[case] identifier: &str) {
		assert!(matches!(
			ModuleKey::resolve(identifier),
			Err(ResolutionError::InvalidIdentifier { .. })
		));
	}

	#[rstest]
	fn test_into_definition_accepts_both_shapes() {
		let key = ModuleKey::resolve("Card").unwrap();

		let bare = Module::component(named("Card")).into_definition(&key).unwrap();
		assert_eq!(bare.name(), "Card");

		let namespaced = Module::namespace()
			.with_export("CardHeader", named("CardHeader"))
			.with_default(named("Card"))
			.into_definition(&key)
			.unwrap();
		assert_eq!(namespaced.name(), "Card");
	}

	#[rstest]
	fn test_into_definition_without_default() {
		let key = ModuleKey::resolve("Card").unwrap();
		let err = Module::namespace()
			.with_export("CardHeader", named("CardHeader"))
			.into_definition(&key)
			.unwrap_err();

		match err {
			ResolutionError::MissingDefaultExport { identifier, exports } => {
				assert_eq!(identifier, "Card");
				assert_eq!(exports, vec!["CardHeader".to_string()]);
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[rstest]
	fn test_with_export_keeps_top_level_component_as_default() {
		let key = ModuleKey::resolve("Card").unwrap();
		let definition = Module::component(named("Card"))
			.with_export("CardBody", named("CardBody"))
			.into_definition(&key)
			.unwrap();
		assert_eq!(definition.name(), "Card");
	}

	#[rstest]
	fn test_static_loader_register_and_load() {
		let loader = StaticLoader::new();
		assert!(!loader.register_module("./Card", Module::component(named("Card"))).unwrap());
		assert!(loader.contains("Card"));

		let key = ModuleKey::resolve("Card").unwrap();
		let module = loader.load(&key).unwrap();
		assert_eq!(module.into_definition(&key).unwrap().name(), "Card");

		assert!(loader.unregister("Card").unwrap());
		assert!(matches!(loader.load(&key), Err(ResolutionError::NotFound(_))));
	}

	#[rstest]
	fn test_static_loader_load_failure() {
		let loader = StaticLoader::new();
		loader
			.register("Broken", || Err(Fault::new("SyntaxError", "unexpected token '<'")))
			.unwrap();

		let key = ModuleKey::resolve("Broken").unwrap();
		match loader.load(&key) {
			Err(ResolutionError::LoadFailed { identifier, fault }) => {
				assert_eq!(identifier, "Broken");
				assert_eq!(fault.kind(), "SyntaxError");
			}
			other => panic!("unexpected result: {other:?}"),
		}
	}
}
