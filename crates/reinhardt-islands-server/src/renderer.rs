//! Server renderer.
//!
//! Every entry point here returns a [`RenderResult`]. Resolution failures,
//! faults from components or the markup collaborator, and panics are all
//! caught at one boundary and reported as [`ErrorInfo`], so the HTTP layer
//! always has something to respond with.
//!
//! [`ErrorInfo`]: reinhardt_islands_core::ErrorInfo
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use reinhardt_islands_core::{Fault, FnComponent, Props, RenderContext};
//! use reinhardt_islands_server::{
//! 	ComponentResolver, Module, RuntimeMode, ServerRenderer, StaticLoader,
//! };
//!
//! let loader = Arc::new(StaticLoader::new());
//! loader
//! 	.register_module(
//! 		"Greeting",
//! 		Module::component(FnComponent::new("Greeting", |props: &Props, _: &RenderContext| {
//! 			let name = props.get("name").and_then(|v| v.as_str()).unwrap_or("stranger");
//! 			Ok::<_, Fault>(format!("<p>Hello, {}</p>", name))
//! 		})),
//! 	)
//! 	.unwrap();
//!
//! let renderer = ServerRenderer::new(ComponentResolver::new(loader, RuntimeMode::Production));
//! let result = renderer.render("./Greeting", Props::new().with("name", "Ada"));
//! assert_eq!(result.markup(), Some("<p>Hello, Ada</p>"));
//! assert_eq!(result.component_name(), Some("Greeting"));
//! ```

use std::fmt;
use std::sync::Arc;

use reinhardt_islands_core::{
	DEFAULT_ROOT_ELEMENT_ID, Fault, IslandMarker, Location, MarkupRenderer, Props,
	RenderArgs, RenderResult, RootMarker, StringRenderer, View,
};

use crate::error::RenderError;
use crate::module::ComponentLoader;
use crate::resolver::ComponentResolver;
use crate::settings::ServerSettings;

/// Renders components to markup behind a fault-capturing boundary.
pub struct ServerRenderer {
	resolver: ComponentResolver,
	markup: Arc<dyn MarkupRenderer>,
	settings: ServerSettings,
}

impl ServerRenderer {
	/// Creates a renderer using [`StringRenderer`] and default settings.
	///
	/// The resolver keeps its own runtime mode; `settings.mode` only matters
	/// when building a resolver from settings.
	pub fn new(resolver: ComponentResolver) -> Self {
		Self {
			resolver,
			markup: Arc::new(StringRenderer::new()),
			settings: ServerSettings::default(),
		}
	}

	/// Creates a renderer whose resolver follows `settings.mode`.
	pub fn from_settings(loader: Arc<dyn ComponentLoader>, settings: ServerSettings) -> Self {
		Self::new(ComponentResolver::new(loader, settings.mode)).with_settings(settings)
	}

	/// Replaces the markup collaborator.
	pub fn with_markup_renderer(mut self, markup: Arc<dyn MarkupRenderer>) -> Self {
		self.markup = markup;
		self
	}

	/// Replaces the settings.
	pub fn with_settings(mut self, settings: ServerSettings) -> Self {
		self.settings = settings;
		self
	}

	/// The component resolver.
	pub fn resolver(&self) -> &ComponentResolver {
		&self.resolver
	}

	/// The settings.
	pub fn settings(&self) -> &ServerSettings {
		&self.settings
	}

	/// Renders `Component(props)`.
	///
	/// Failed results carry the original request in `error.args`.
	pub fn render(&self, component_path: &str, props: Props) -> RenderResult {
		match self.try_render(component_path, &props, None) {
			Ok((markup, name)) => RenderResult::success(markup, name),
			Err(err) => Self::failure_with_args(err, component_path, props),
		}
	}

	/// Renders `Component(props)` inside a routing context seeded with
	/// `location`, or the configured default location when `None`.
	///
	/// Failed results do not carry the original request.
	pub fn render_with_routing(
		&self,
		component_path: &str,
		props: Props,
		location: Option<&str>,
	) -> RenderResult {
		let location = Location::from(location.unwrap_or(&self.settings.default_location));
		Self::finish(self.try_render(component_path, &props, Some(location)))
	}

	/// Renders a component and wraps it in an island marker.
	pub fn render_island(&self, component_path: &str, props: Props) -> RenderResult {
		let marker = match IslandMarker::new(component_path, &props) {
			Ok(marker) => marker,
			Err(err) => return Self::payload_failure(component_path, Some(props), RenderError::from(err)),
		};
		self.render(component_path, props)
			.map_markup(|markup| marker.wrap(&markup))
	}

	/// Renders a component and wraps it in a root marker.
	///
	/// The root element id defaults to `react-root`.
	pub fn render_root(
		&self,
		component_path: &str,
		props: Props,
		root_element_id: Option<&str>,
	) -> RenderResult {
		let id = root_element_id.unwrap_or(DEFAULT_ROOT_ELEMENT_ID);
		let marker = match RootMarker::new(id, &props) {
			Ok(marker) => marker,
			Err(err) => return Self::payload_failure(component_path, Some(props), RenderError::from(err)),
		};
		self.render(component_path, props)
			.map_markup(|markup| marker.wrap(&markup))
	}

	/// Renders a routed app into a root marker.
	///
	/// Unlike [`render_root`](Self::render_root) the root element id is required.
	/// Like every routed render, failures do not carry the original request.
	pub fn render_router_root(
		&self,
		component_path: &str,
		props: Props,
		location: Option<&str>,
		root_element_id: &str,
	) -> RenderResult {
		let marker = match RootMarker::new(root_element_id, &props) {
			Ok(marker) => marker,
			Err(err) => return Self::payload_failure(component_path, None, RenderError::from(err)),
		};
		self.render_with_routing(component_path, props, location)
			.map_markup(|markup| marker.wrap(&markup))
	}

	fn try_render(
		&self,
		component_path: &str,
		props: &Props,
		location: Option<Location>,
	) -> Result<(String, String), RenderError> {
		let outcome = Fault::catch(|| -> Result<(String, String), RenderError> {
			let definition = self.resolver.resolve(component_path)?;
			let name = definition.name().to_string();
			let view = View::component(definition, props.clone());
			let view = match location {
				Some(location) => View::routed(location, view),
				None => view,
			};
			let markup = self.markup.render_to_string(&view)?;
			Ok((markup, name))
		});

		let result = outcome.unwrap_or_else(|fault| Err(RenderError::Render(fault)));
		match &result {
			Ok((_, name)) => tracing::debug!(component = component_path, name = %name, "rendered component"),
			Err(err) => tracing::warn!(component = component_path, kind = err.kind(), error = %err, "render failed"),
		}
		result
	}

	fn finish(result: Result<(String, String), RenderError>) -> RenderResult {
		match result {
			Ok((markup, name)) => RenderResult::success(markup, name),
			Err(err) => RenderResult::failure(err.into_error_info()),
		}
	}

	fn failure_with_args(err: RenderError, component_path: &str, props: Props) -> RenderResult {
		let info = err.into_error_info().with_args(RenderArgs {
			component_path: component_path.to_string(),
			props,
		});
		RenderResult::failure(info)
	}

	/// `props` is `None` on the routed path, which never carries the request.
	fn payload_failure(component_path: &str, props: Option<Props>, err: RenderError) -> RenderResult {
		tracing::warn!(component = component_path, kind = err.kind(), error = %err, "props cannot be embedded");
		match props {
			Some(props) => Self::failure_with_args(err, component_path, props),
			None => RenderResult::failure(err.into_error_info()),
		}
	}
}

impl fmt::Debug for ServerRenderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ServerRenderer")
			.field("resolver", &self.resolver)
			.field("settings", &self.settings)
			.finish_non_exhaustive()
	}
}
