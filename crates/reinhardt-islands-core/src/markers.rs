//! DOM marker contract.
//!
//! These attributes are the only channel between the server renderer and the
//! client locator. A server-rendered island looks like:
//!
//! ```text
//! <div data-rendered data-component="Header" data-props="{&quot;title&quot;:&quot;Hi&quot;}">
//!   ...server markup...
//! </div>
//! ```
//!
//! A whole-page root carries only an id and the payload:
//!
//! ```text
//! <div id="react-root" data-props="{...}">...</div>
//! ```

use crate::error::PayloadError;
use crate::props::Props;

/// Presence flag marking an element as server-rendered.
pub const ATTR_RENDERED: &str = "data-rendered";

/// The attribute name for the component identifier.
pub const ATTR_COMPONENT: &str = "data-component";

/// The attribute name for the serialized props.
pub const ATTR_PROPS: &str = "data-props";

/// CSS selector matching every flagged element.
pub const FLAGGED_SELECTOR: &str = "[data-rendered]";

/// Root element id used when none is given.
pub const DEFAULT_ROOT_ELEMENT_ID: &str = "react-root";

/// Marker attributes for one independently revived island.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IslandMarker {
	component: String,
	payload: String,
}

impl IslandMarker {
	/// Creates a marker for a component identifier and its props.
	pub fn new(component: impl Into<String>, props: &Props) -> Result<Self, PayloadError> {
		Ok(Self {
			component: component.into(),
			payload: props.to_payload()?,
		})
	}

	/// The component identifier.
	pub fn component(&self) -> &str {
		&self.component
	}

	/// The serialized props payload.
	pub fn payload(&self) -> &str {
		&self.payload
	}

	/// Generates the HTML attributes for this marker.
	///
	/// The rendered flag is a presence attribute and carries an empty value.
	pub fn to_attrs(&self) -> Vec<(&'static str, String)> {
		vec![
			(ATTR_RENDERED, String::new()),
			(ATTR_COMPONENT, self.component.clone()),
			(ATTR_PROPS, self.payload.clone()),
		]
	}

	/// Generates the HTML attribute string for this marker.
	pub fn to_attr_string(&self) -> String {
		format!(
			"{} {}=\"{}\" {}=\"{}\"",
			ATTR_RENDERED,
			ATTR_COMPONENT,
			html_escape_attr(&self.component),
			ATTR_PROPS,
			html_escape_attr(&self.payload)
		)
	}

	/// Wraps server markup in a flagged container element.
	pub fn wrap(&self, markup: &str) -> String {
		format!("<div {}>{}</div>", self.to_attr_string(), markup)
	}
}

/// Marker attributes for a single whole-page root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootMarker {
	id: String,
	payload: String,
}

impl RootMarker {
	/// Creates a root marker for an element id and the app's props.
	pub fn new(id: impl Into<String>, props: &Props) -> Result<Self, PayloadError> {
		Ok(Self {
			id: id.into(),
			payload: props.to_payload()?,
		})
	}

	/// The root element id.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// The serialized props payload.
	pub fn payload(&self) -> &str {
		&self.payload
	}

	/// Wraps server markup in the root container element.
	pub fn wrap(&self, markup: &str) -> String {
		format!(
			"<div id=\"{}\" {}=\"{}\">{}</div>",
			html_escape_attr(&self.id),
			ATTR_PROPS,
			html_escape_attr(&self.payload),
			markup
		)
	}
}

/// Escapes a string for use in a double-quoted HTML attribute value.
fn html_escape_attr(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('"', "&quot;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}
