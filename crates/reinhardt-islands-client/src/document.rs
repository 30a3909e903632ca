//! Document access for revival.
//!
//! The reviver never touches a DOM API directly. It goes through [`Document`]
//! and [`DomElement`], which are implemented for:
//!
//! - [`HtmlDocument`]: a parsed static HTML string (server-side tests, tooling)
//! - `BrowserDocument`: the live `web_sys::Document` (wasm32 only)
//!
//! ## Snapshot semantics
//!
//! [`Document::flagged_elements`] returns a snapshot in document order, taken
//! when it is called. Elements inserted while a revival pass runs are not
//! picked up by that pass.

use std::collections::BTreeMap;

use reinhardt_islands_core::{ATTR_RENDERED, Location};
use scraper::{ElementRef, Html};

/// An element of a document.
pub trait DomElement {
	/// Returns the value of an attribute, or `None` if it is absent.
	fn attribute(&self, name: &str) -> Option<String>;

	/// The element's current inner HTML.
	fn inner_html(&self) -> String;

	/// Short human-readable description for errors and logs.
	fn describe(&self) -> String;
}

/// A document that can be scanned for flagged elements.
pub trait Document {
	/// The element type handed to the hydration collaborator.
	type Element: DomElement;

	/// Every element carrying the rendered flag, in document order.
	fn flagged_elements(&self) -> Vec<Self::Element>;

	/// The element with the given id, if any.
	fn element_by_id(&self, id: &str) -> Option<Self::Element>;

	/// The document's current navigation location.
	fn location(&self) -> Location;
}

/// An owned snapshot of one element of an [`HtmlDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticElement {
	tag: String,
	position: usize,
	attributes: BTreeMap<String, String>,
	inner_html: String,
}

impl StaticElement {
	fn snapshot(element: ElementRef<'_>, position: usize) -> Self {
		Self {
			tag: element.value().name().to_string(),
			position,
			attributes: element
				.value()
				.attrs()
				.map(|(name, value)| (name.to_string(), value.to_string()))
				.collect(),
			inner_html: element.inner_html(),
		}
	}

	/// The lowercase tag name.
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Index of the element among all elements of the document, in document order.
	pub fn position(&self) -> usize {
		self.position
	}

	/// All attributes of the element.
	pub fn attributes(&self) -> &BTreeMap<String, String> {
		&self.attributes
	}
}

impl DomElement for StaticElement {
	fn attribute(&self, name: &str) -> Option<String> {
		self.attributes.get(name).cloned()
	}

	fn inner_html(&self) -> String {
		self.inner_html.clone()
	}

	fn describe(&self) -> String {
		match self.attributes.get("id") {
			Some(id) => format!("<{} id=\"{}\">", self.tag, id),
			None => format!("<{}> element #{}", self.tag, self.position),
		}
	}
}

/// A parsed static HTML document.
#[derive(Debug)]
pub struct HtmlDocument {
	html: Html,
	location: Location,
}

impl HtmlDocument {
	/// Parses a full HTML document. Parsing is lenient and never fails.
	pub fn parse(source: &str) -> Self {
		Self {
			html: Html::parse_document(source),
			location: Location::root(),
		}
	}

	/// Sets the location reported to routed revival.
	pub fn with_location(mut self, location: impl Into<Location>) -> Self {
		self.location = location.into();
		self
	}

	fn elements(&self) -> impl Iterator<Item = (usize, ElementRef<'_>)> {
		self.html
			.root_element()
			.descendants()
			.filter_map(ElementRef::wrap)
			.enumerate()
	}
}

impl Document for HtmlDocument {
	type Element = StaticElement;

	fn flagged_elements(&self) -> Vec<StaticElement> {
		self.elements()
			.filter(|(_, element)| element.value().attr(ATTR_RENDERED).is_some())
			.map(|(position, element)| StaticElement::snapshot(element, position))
			.collect()
	}

	fn element_by_id(&self, id: &str) -> Option<StaticElement> {
		self.elements()
			.find(|(_, element)| element.value().id() == Some(id))
			.map(|(position, element)| StaticElement::snapshot(element, position))
	}

	fn location(&self) -> Location {
		self.location.clone()
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserDocument;

#[cfg(target_arch = "wasm32")]
mod browser {
	use reinhardt_islands_core::{FLAGGED_SELECTOR, Location};
	use wasm_bindgen::JsCast;
	use web_sys::Element;

	use super::{Document, DomElement};

	impl DomElement for Element {
		fn attribute(&self, name: &str) -> Option<String> {
			self.get_attribute(name)
		}

		fn inner_html(&self) -> String {
			Element::inner_html(self)
		}

		fn describe(&self) -> String {
			let tag = self.tag_name().to_lowercase();
			let id = self.id();
			if id.is_empty() {
				format!("<{}>", tag)
			} else {
				format!("<{} id=\"{}\">", tag, id)
			}
		}
	}

	/// The live browser document.
	#[derive(Debug, Clone)]
	pub struct BrowserDocument {
		document: web_sys::Document,
	}

	impl BrowserDocument {
		/// Wraps a DOM document.
		pub fn new(document: web_sys::Document) -> Self {
			Self { document }
		}

		/// The current window's document, if running in a window.
		pub fn from_window() -> Option<Self> {
			web_sys::window()?.document().map(Self::new)
		}
	}

	impl Document for BrowserDocument {
		type Element = Element;

		fn flagged_elements(&self) -> Vec<Element> {
			let node_list = match self.document.query_selector_all(FLAGGED_SELECTOR) {
				Ok(node_list) => node_list,
				Err(err) => {
					tracing::warn!(error = ?err, "querySelectorAll failed");
					return Vec::new();
				}
			};

			(0..node_list.length())
				.filter_map(|i| node_list.item(i))
				.filter_map(|node| node.dyn_into::<Element>().ok())
				.collect()
		}

		fn element_by_id(&self, id: &str) -> Option<Element> {
			self.document.get_element_by_id(id)
		}

		fn location(&self) -> Location {
			self.document
				.location()
				.and_then(|location| location.pathname().ok())
				.map(Location::from)
				.unwrap_or_default()
		}
	}
}
