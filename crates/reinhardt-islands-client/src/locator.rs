//! Client locator.
//!
//! Finds every element the server flagged as rendered and pulls the marker
//! attributes off it. Nothing else in the document is read.

use reinhardt_islands_core::{ATTR_COMPONENT, ATTR_PROPS, PayloadError, Props};

use crate::document::{Document, DomElement};
use crate::error::{ReviveError, ReviveResult};

/// A flagged element with its raw marker attributes.
#[derive(Debug, Clone)]
pub struct FlaggedIsland<E> {
	/// The flagged element.
	pub element: E,
	/// The `data-component` value, if present.
	pub identifier: Option<String>,
	/// The raw `data-props` value, if present.
	pub payload: Option<String>,
}

impl<E: DomElement> FlaggedIsland<E> {
	/// Reads the marker attributes of `element`.
	pub fn from_element(element: E) -> Self {
		let identifier = element.attribute(ATTR_COMPONENT);
		let payload = element.attribute(ATTR_PROPS);
		Self {
			element,
			identifier,
			payload,
		}
	}

	/// The component identifier, or [`ReviveError::MissingIdentifier`].
	pub fn require_identifier(&self) -> ReviveResult<&str> {
		self.identifier
			.as_deref()
			.ok_or_else(|| ReviveError::MissingIdentifier(self.element.describe()))
	}

	/// Parses the props payload. A missing payload is a parse error.
	pub fn props(&self) -> ReviveResult<Props> {
		let payload = self.payload.as_deref().ok_or(PayloadError::Missing);
		payload
			.and_then(Props::from_payload)
			.map_err(|source| ReviveError::PayloadParse {
				element: self.element.describe(),
				source,
			})
	}
}

/// Scans documents for flagged elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Locator;

impl Locator {
	/// Every flagged element of `document`, in document order.
	pub fn locate<D: Document>(document: &D) -> Vec<FlaggedIsland<D::Element>> {
		document
			.flagged_elements()
			.into_iter()
			.map(FlaggedIsland::from_element)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::document::HtmlDocument;
	use rstest::rstest;

	fn locate_one(body: &str) -> FlaggedIsland<crate::document::StaticElement> {
		let document = HtmlDocument::parse(&format!("<html><body>{}</body></html>", body));
		let mut islands = Locator::locate(&document);
		assert_eq!(islands.len(), 1);
		islands.remove(0)
	}

	#[rstest]
	fn test_reads_marker_attributes() {
		let island = locate_one(
			r#"<div data-rendered data-component="widgets/Card" data-props="{&quot;id&quot;:7}"></div>"#,
		);

		assert_eq!(island.require_identifier().unwrap(), "widgets/Card");
		assert_eq!(island.payload.as_deref(), Some(r#"{"id":7}"#));
		assert_eq!(island.props().unwrap(), Props::new().with("id", 7));
	}

	#[rstest]
	fn test_missing_identifier() {
		let island = locate_one(r#"<div data-rendered data-props="{}"></div>"#);
		assert!(matches!(
			island.require_identifier(),
			Err(ReviveError::MissingIdentifier(_))
		));
	}

	#[rstest]
	#[case(r#"<div data-rendered data-component="Card"></div>"#)]
	#[case(r#"<div data-rendered data-component="Card" data-props="{oops"></div>"#)]
	#[case(r#"<div data-rendered data-component="Card" data-props="[1]"></div>"#)]
	fn test_bad_payload(#[case] body: &str) {
		let island = locate_one(body);
		assert!(matches!(island.props(), Err(ReviveError::PayloadParse { .. })));
	}

	#[rstest]
	fn test_unflagged_elements_are_ignored() {
		let document = HtmlDocument::parse(
			r#"<html><body><div data-component="Card" data-props="{}"></div></body></html>"#,
		);
		assert!(Locator::locate(&document).is_empty());
	}
}
