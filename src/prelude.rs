//! Commonly used types.

pub use crate::protocol::{
	Component, ComponentDefinition, ErrorInfo, Fault, FnComponent, IslandMarker, Location,
	MarkupRenderer, Props, RenderContext, RenderResult, RootMarker, StringRenderer, View,
};

#[cfg(feature = "server")]
pub use crate::server::{
	ComponentLoader, ComponentRegistry, ComponentResolver, Module, ModuleKey, ResolutionError,
	RuntimeMode, ServerRenderer, ServerSettings, StaticLoader,
};

#[cfg(feature = "client")]
pub use crate::client::{
	ClientSettings, ComponentMap, ComponentMapper, Document, DomElement, HtmlDocument, Hydrator,
	Locator, MarkupHydrator, ReviveError, Reviver,
};
