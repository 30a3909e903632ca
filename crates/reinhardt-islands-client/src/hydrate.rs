//! Hydration collaborator.
//!
//! [`Hydrator`] is the seam to the UI framework's "attach behavior to existing
//! markup" primitive. The reviver reconstructs a [`View`] for each flagged
//! element and hands it over together with the element; whatever the
//! framework does from there is its own business.
//!
//! [`MarkupHydrator`] is the native implementation. It re-renders the view,
//! checks that the result matches the markup already in the element and
//! records what it revived.
//!
//! Markup is compared after both sides go through the HTML parser, so
//! `<br/>` and `<br>`, single- and double-quoted attributes, and `&#38;` and
//! `&amp;` all count as the same markup.

use reinhardt_islands_core::{Fault, Location, MarkupRenderer, Props, StringRenderer, View};
use scraper::Html;

use crate::document::DomElement;

/// Kind reported when server markup and the client render disagree.
pub const HYDRATION_MISMATCH_KIND: &str = "HydrationMismatch";

/// Attaches a component tree to an existing element without re-rendering it.
pub trait Hydrator<E: DomElement> {
	/// Hydrates `target` with `view`.
	fn hydrate(&mut self, view: View, target: &E) -> Result<(), Fault>;
}

impl<E, F> Hydrator<E> for F
where
	E: DomElement,
	F: FnMut(View, &E) -> Result<(), Fault>,
{
	fn hydrate(&mut self, view: View, target: &E) -> Result<(), Fault> {
		self(view, target)
	}
}

/// Record of one successfully hydrated element.
#[derive(Debug, Clone, PartialEq)]
pub struct RevivedIsland {
	/// Declared name of the revived component.
	pub component_name: String,
	/// Props the component was revived with.
	pub props: Props,
	/// Routing location, if revived inside a router.
	pub location: Option<Location>,
	/// Description of the target element.
	pub target: String,
}

/// Hydrator that verifies existing markup against a fresh render.
#[derive(Debug)]
pub struct MarkupHydrator<R = StringRenderer> {
	renderer: R,
	verify: bool,
	revived: Vec<RevivedIsland>,
}

impl MarkupHydrator {
	/// Creates a verifying hydrator using [`StringRenderer`].
	pub fn new() -> Self {
		Self::with_renderer(StringRenderer::new())
	}
}

impl Default for MarkupHydrator {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: MarkupRenderer> MarkupHydrator<R> {
	/// Creates a verifying hydrator using `renderer`.
	pub fn with_renderer(renderer: R) -> Self {
		Self {
			renderer,
			verify: true,
			revived: Vec::new(),
		}
	}

	/// Records revivals without comparing markup.
	pub fn skip_verification(mut self) -> Self {
		self.verify = false;
		self
	}

	/// Islands revived so far, in revival order.
	pub fn revived(&self) -> &[RevivedIsland] {
		&self.revived
	}

	/// Consumes the hydrator, returning its records.
	pub fn into_revived(self) -> Vec<RevivedIsland> {
		self.revived
	}
}

impl<R, E> Hydrator<E> for MarkupHydrator<R>
where
	R: MarkupRenderer,
	E: DomElement,
{
	fn hydrate(&mut self, view: View, target: &E) -> Result<(), Fault> {
		if self.verify {
			let expected = self.renderer.render_to_string(&view)?;
			let actual = target.inner_html();
			if normalize(&expected) != normalize(&actual) {
				return Err(Fault::new(
					HYDRATION_MISMATCH_KIND,
					format!(
						"{} holds {:?} but the client renders {:?}",
						target.describe(),
						actual,
						expected
					),
				));
			}
		}

		self.revived.push(RevivedIsland {
			component_name: view.root_component().name().to_string(),
			props: view.props().clone(),
			location: view.location().cloned(),
			target: target.describe(),
		});
		Ok(())
	}
}

/// Re-serializes `markup` as parsed HTML.
fn normalize(markup: &str) -> String {
	Html::parse_fragment(markup).root_element().inner_html()
}
