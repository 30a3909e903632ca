//! Client reviver.
//!
//! Reattaches live components to server-rendered markup, either island by
//! island ([`Reviver::revive`]) or at a single whole-page root
//! ([`Reviver::revive_root`]).
//!
//! ## Failure policy
//!
//! Revival is fail-fast. The first island that cannot be revived aborts the
//! pass with a [`ReviveError`]; islands earlier in document order stay
//! revived and later ones are never touched.
//!
//! ## Example
//!
//! ```
//! use reinhardt_islands_client::{ComponentMap, HtmlDocument, MarkupHydrator, Reviver};
//! use reinhardt_islands_core::{FnComponent, Props, RenderContext};
//!
//! let document = HtmlDocument::parse(
//! 	r#"<body><div data-rendered data-component="Hello" data-props="{}"><p>hello</p></div></body>"#,
//! );
//! let components = ComponentMap::new().with(
//! 	"Hello",
//! 	FnComponent::new("Hello", |_: &Props, _: &RenderContext| Ok("<p>hello</p>".to_string())),
//! );
//!
//! let mut reviver = Reviver::new(&document, MarkupHydrator::new());
//! assert_eq!(reviver.revive(&components).unwrap(), 1);
//! ```

use reinhardt_islands_core::{ComponentDefinition, Location, Props, View};

use crate::document::Document;
use crate::error::{ReviveError, ReviveResult};
use crate::hydrate::Hydrator;
use crate::locator::{FlaggedIsland, Locator};
use crate::mapper::ComponentMapper;
use crate::settings::ClientSettings;

/// Revives server-rendered markup in a document.
pub struct Reviver<'d, D: Document, H> {
	document: &'d D,
	hydrator: H,
	settings: ClientSettings,
}

impl<'d, D, H> Reviver<'d, D, H>
where
	D: Document,
	H: Hydrator<D::Element>,
{
	/// Creates a reviver over `document` using `hydrator`.
	pub fn new(document: &'d D, hydrator: H) -> Self {
		Self {
			document,
			hydrator,
			settings: ClientSettings::default(),
		}
	}

	/// Replaces the settings.
	pub fn with_settings(mut self, settings: ClientSettings) -> Self {
		self.settings = settings;
		self
	}

	/// The hydration collaborator.
	pub fn hydrator(&self) -> &H {
		&self.hydrator
	}

	/// Consumes the reviver, returning the hydration collaborator.
	pub fn into_hydrator(self) -> H {
		self.hydrator
	}

	/// Revives every flagged element, returning how many were revived.
	pub fn revive<M>(&mut self, mapper: &M) -> ReviveResult<usize>
	where
		M: ComponentMapper + ?Sized,
	{
		self.revive_islands(mapper, None)
	}

	/// Like [`revive`](Self::revive), with each island inside a routing
	/// context seeded with the document's current location.
	pub fn revive_with_routing<M>(&mut self, mapper: &M) -> ReviveResult<usize>
	where
		M: ComponentMapper + ?Sized,
	{
		let location = self.document.location();
		self.revive_islands(mapper, Some(location))
	}

	/// Revives `app` at the root element, `react-root` unless configured otherwise.
	pub fn revive_root(
		&mut self,
		app: &ComponentDefinition,
		root_element_id: Option<&str>,
	) -> ReviveResult<()> {
		let id = root_element_id
			.unwrap_or(&self.settings.root_element_id)
			.to_string();
		self.revive_at_root(app, &id, None)
	}

	/// Revives `app` inside a routing context at an explicitly named root.
	pub fn revive_router_root(
		&mut self,
		app: &ComponentDefinition,
		root_element_id: &str,
	) -> ReviveResult<()> {
		let location = self.document.location();
		self.revive_at_root(app, root_element_id, Some(location))
	}

	fn revive_islands<M>(&mut self, mapper: &M, location: Option<Location>) -> ReviveResult<usize>
	where
		M: ComponentMapper + ?Sized,
	{
		let islands = Locator::locate(self.document);
		let total = islands.len();

		for island in &islands {
			let identifier = island.require_identifier()?;
			let props = island.props()?;
			let definition = mapper
				.map(identifier)
				.ok_or_else(|| ReviveError::UnknownComponent(identifier.to_string()))?;

			self.hydrate(island, definition, props, location.clone())?;
			tracing::debug!(component = identifier, "revived island");
		}

		tracing::info!(count = total, "revived server-rendered islands");
		Ok(total)
	}

	fn revive_at_root(
		&mut self,
		app: &ComponentDefinition,
		id: &str,
		location: Option<Location>,
	) -> ReviveResult<()> {
		let element = self
			.document
			.element_by_id(id)
			.ok_or_else(|| ReviveError::RootNotFound(id.to_string()))?;
		let root = FlaggedIsland::from_element(element);
		let props = root.props()?;

		self.hydrate(&root, app.clone(), props, location)?;
		tracing::info!(root = id, component = app.name(), "revived root");
		Ok(())
	}

	fn hydrate(
		&mut self,
		target: &FlaggedIsland<D::Element>,
		definition: ComponentDefinition,
		props: Props,
		location: Option<Location>,
	) -> ReviveResult<()> {
		let component = definition.name().to_string();
		let view = View::component(definition, props);
		let view = match location {
			Some(location) => View::routed(location, view),
			None => view,
		};

		self.hydrator
			.hydrate(view, &target.element)
			.map_err(|fault| ReviveError::Hydration { component, fault })
	}
}
