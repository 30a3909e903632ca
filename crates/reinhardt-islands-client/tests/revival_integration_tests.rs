//! Revival Integration Tests
//!
//! Markup produced by the server renderer is revived by the client reviver.
//!
//! Test Categories:
//! 1. Islands - several independently rendered components on one page
//!    (including markup the HTML parser re-serializes differently)
//! 2. Roots - one whole-page app, plain and routed
//! 3. Identifier Stability - the emitted identifier is the one the mapper sees

use std::sync::Arc;

use reinhardt_islands_client::{
	ComponentMap, ComponentMapper, HtmlDocument, MarkupHydrator, ReviveError, Reviver,
};
use reinhardt_islands_core::{ComponentDefinition, FnComponent, Props, RenderContext};
use reinhardt_islands_server::{
	ComponentResolver, Module, RuntimeMode, ServerRenderer, StaticLoader,
};
use rstest::*;

// ============================================================================
// Shared Components
// ============================================================================

fn header() -> ComponentDefinition {
	ComponentDefinition::new(FnComponent::new("Header", |props: &Props, _: &RenderContext| {
		let title = props.get("title").and_then(|v| v.as_str()).unwrap_or_default();
		Ok(format!("<h1>{}</h1>", title))
	}))
}

fn footer() -> ComponentDefinition {
	ComponentDefinition::new(FnComponent::new("Footer", |props: &Props, _: &RenderContext| {
		let year = props.get("year").and_then(|v| v.as_i64()).unwrap_or_default();
		Ok(format!("<small>{}</small>", year))
	}))
}

fn shell() -> ComponentDefinition {
	ComponentDefinition::new(FnComponent::new("Shell", |props: &Props, cx: &RenderContext| {
		let user = props.get("user").and_then(|v| v.as_str()).unwrap_or("guest");
		match cx.location() {
			Some(location) => Ok(format!("<main><p>{}</p><p>{}</p></main>", user, location)),
			None => Ok(format!("<main><p>{}</p></main>", user)),
		}
	}))
}

/// Markup with void elements, single-quoted attributes and character
/// references, none of which survive a parse byte for byte.
fn profile_card() -> ComponentDefinition {
	ComponentDefinition::new(FnComponent::new("ProfileCard", |props: &Props, _: &RenderContext| {
		let name = props.get("name").and_then(|v| v.as_str()).unwrap_or("anonymous");
		Ok(format!(
			"<figure class='card'><img src='/avatars/{0}.png' alt='{0}'/>\
			 <figcaption>{0} &#38; co<br/>R&amp;D</figcaption>\
			 <input type='checkbox' disabled checked/></figure>",
			name
		))
	}))
}

fn module_of(definition: ComponentDefinition) -> Module {
	Module::Component(definition)
}

#[fixture]
fn renderer() -> ServerRenderer {
	let loader = Arc::new(StaticLoader::new());
	loader.register_module("components/Header", module_of(header())).unwrap();
	loader.register_module("components/Footer", module_of(footer())).unwrap();
	loader.register_module("Shell", module_of(shell())).unwrap();
	loader.register_module("ProfileCard", module_of(profile_card())).unwrap();
	ServerRenderer::new(ComponentResolver::new(loader, RuntimeMode::Production))
}

#[fixture]
fn components() -> ComponentMap {
	let mut map = ComponentMap::new();
	map.insert("components/Header", header());
	map.insert("components/Footer", footer());
	map
}

fn page(fragments: &[String]) -> String {
	format!(
		"<!DOCTYPE html><html><head><title>t</title></head><body>{}</body></html>",
		fragments.concat()
	)
}

// ============================================================================
// Islands
// ============================================================================

#[rstest]
fn test_server_islands_revive_on_client(renderer: ServerRenderer, components: ComponentMap) {
	let header = renderer.render_island("components/Header", Props::new().with("title", "Hi"));
	let footer = renderer.render_island("components/Footer", Props::new().with("year", 2024));
	let html = page(&[
		header.markup().unwrap().to_string(),
		"<article><p>static body</p></article>".to_string(),
		footer.markup().unwrap().to_string(),
	]);

	let document = HtmlDocument::parse(&html);
	let mut reviver = Reviver::new(&document, MarkupHydrator::new());
	assert_eq!(reviver.revive(&components).unwrap(), 2);

	let revived = reviver.into_hydrator().into_revived();
	assert_eq!(revived[0].component_name, "Header");
	assert_eq!(revived[0].props, Props::new().with("title", "Hi"));
	assert_eq!(revived[1].component_name, "Footer");
	assert_eq!(revived[1].props, Props::new().with("year", 2024));
}

#[rstest]
fn test_reparsed_markup_revives_with_verification(renderer: ServerRenderer) {
	let island = renderer.render_island("ProfileCard", Props::new().with("name", "ada"));
	let root = renderer.render_root("ProfileCard", Props::new().with("name", "grace"), Some("app"));
	let document = HtmlDocument::parse(&page(&[
		island.markup().unwrap().to_string(),
		root.markup().unwrap().to_string(),
	]));
	let mut components = ComponentMap::new();
	components.insert("ProfileCard", profile_card());

	let mut reviver = Reviver::new(&document, MarkupHydrator::new());
	assert_eq!(reviver.revive(&components).unwrap(), 1);
	reviver.revive_root(&profile_card(), Some("app")).unwrap();

	let revived = reviver.into_hydrator().into_revived();
	assert_eq!(revived.len(), 2);
	assert_eq!(revived[0].props, Props::new().with("name", "ada"));
	assert_eq!(revived[1].props, Props::new().with("name", "grace"));
}

#[rstest]
fn test_payload_with_markup_characters_survives(renderer: ServerRenderer, components: ComponentMap) {
	let title = r#"<script>alert("x")</script> & 'more'"#;
	let island = renderer.render_island("components/Header", Props::new().with("title", title));
	let document = HtmlDocument::parse(&page(&[island.markup().unwrap().to_string()]));

	let mut reviver = Reviver::new(&document, MarkupHydrator::new().skip_verification());
	reviver.revive(&components).unwrap();

	let revived = reviver.into_hydrator().into_revived();
	assert_eq!(revived[0].props.get("title").unwrap(), title);
}

#[rstest]
fn test_failed_server_render_leaves_nothing_to_revive(
	renderer: ServerRenderer,
	components: ComponentMap,
) {
	let missing = renderer.render_island("components/Sidebar", Props::new());
	assert!(missing.markup().is_none());

	let document = HtmlDocument::parse(&page(&[]));
	let mut reviver = Reviver::new(&document, MarkupHydrator::new());
	assert_eq!(reviver.revive(&components).unwrap(), 0);
}

// ============================================================================
// Roots
// ============================================================================

#[rstest]
fn test_root_round_trip(renderer: ServerRenderer) {
	let root = renderer.render_root("Shell", Props::new().with("user", "ada"), None);
	let document = HtmlDocument::parse(&page(&[root.markup().unwrap().to_string()]));

	let mut reviver = Reviver::new(&document, MarkupHydrator::new());
	reviver.revive_root(&shell(), None).unwrap();

	let revived = reviver.into_hydrator().into_revived();
	assert_eq!(revived[0].props, Props::new().with("user", "ada"));
	assert_eq!(revived[0].location, None);
}

#[rstest]
fn test_router_root_round_trip(renderer: ServerRenderer) {
	let root = renderer.render_router_root("Shell", Props::new(), Some("/account"), "app");
	let document =
		HtmlDocument::parse(&page(&[root.markup().unwrap().to_string()])).with_location("/account");

	let mut reviver = Reviver::new(&document, MarkupHydrator::new());
	reviver.revive_router_root(&shell(), "app").unwrap();

	let revived = reviver.into_hydrator().into_revived();
	assert_eq!(revived[0].location.as_ref().unwrap().as_str(), "/account");
}

#[rstest]
fn test_router_root_location_mismatch_is_detected(renderer: ServerRenderer) {
	let root = renderer.render_router_root("Shell", Props::new(), Some("/account"), "app");
	let document =
		HtmlDocument::parse(&page(&[root.markup().unwrap().to_string()])).with_location("/elsewhere");

	let mut reviver = Reviver::new(&document, MarkupHydrator::new());
	assert!(matches!(
		reviver.revive_router_root(&shell(), "app"),
		Err(ReviveError::Hydration { .. })
	));
}

// ============================================================================
// Identifier Stability
// ============================================================================

#[rstest]
fn test_mapper_sees_emitted_identifier(renderer: ServerRenderer) {
	let island = renderer.render_island("components/Header", Props::new().with("title", "Hi"));
	let document = HtmlDocument::parse(&page(&[island.markup().unwrap().to_string()]));

	let seen = std::cell::RefCell::new(Vec::new());
	let mapper = |id: &str| {
		seen.borrow_mut().push(id.to_string());
		(id == "components/Header").then(header)
	};

	let mut reviver = Reviver::new(&document, MarkupHydrator::new());
	reviver.revive(&mapper).unwrap();
	assert_eq!(seen.into_inner(), vec!["components/Header"]);
}

#[rstest]
fn test_client_mapping_gap_is_reported(renderer: ServerRenderer) {
	let island = renderer.render_island("components/Header", Props::new().with("title", "Hi"));
	let document = HtmlDocument::parse(&page(&[island.markup().unwrap().to_string()]));
	let empty = ComponentMap::new();
	assert!(empty.map("components/Header").is_none());

	let mut reviver = Reviver::new(&document, MarkupHydrator::new());
	assert!(matches!(
		reviver.revive(&empty),
		Err(ReviveError::UnknownComponent(ref id)) if id == "components/Header"
	));
}
