// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribution: element in, structured result out.
//!
//! Composes the render-tree walker with the source map resolver. The walk
//! and classification are synchronous; only source resolution suspends.

use locus_core::{AttributionResult, ElementKind, OriginalLocation};
use locus_sourcemap::SourceMapResolver;

use crate::frame::first_user_frame;
use crate::host::{same_node, HostElement, Owner, RenderNode, TypeInfo};
use crate::walker::{component_name, composite_ancestor, node_from_element};

/// Attributes one element.
///
/// `None` when no render node is attached or no composite ancestor exists —
/// a legitimate terminal outcome, not an error.
pub async fn attribute(
	resolver: &SourceMapResolver,
	element: &dyn HostElement,
) -> Option<AttributionResult> {
	let dom_node = node_from_element(element)?;
	let composite = composite_ancestor(dom_node)?;

	// A composite parent means the element is a component's root DOM output.
	let is_component_root = dom_node
		.parent()
		.is_some_and(|parent| parent.tag().is_composite());

	if is_component_root {
		return Some(AttributionResult {
			kind: ElementKind::Component,
			name: component_name(composite),
			element_tag: None,
			source: composite_debug_source(resolver, composite).await,
			call_site: None,
		});
	}

	let owner = dom_node.owner();
	let element_tag = match dom_node.type_info() {
		TypeInfo::HostTag(tag) => Some(tag),
		_ => None,
	};

	// Owner identical to the nearest composite: the element sits directly
	// in that component's render output.
	if let Some(Owner::Node(owner_node)) = &owner {
		if same_node(*owner_node, composite) {
			return Some(AttributionResult {
				kind: ElementKind::Element,
				name: component_name(*owner_node),
				element_tag,
				source: dom_debug_source(resolver, dom_node).await,
				call_site: composite_debug_source(resolver, composite).await,
			});
		}
	}

	// Nested output from some ancestor's render.
	let name = match &owner {
		Some(Owner::ServerPlaceholder { name }) => name.clone(),
		Some(Owner::Node(owner_node)) if owner_node.tag().is_composite() => {
			component_name(*owner_node)
		}
		_ => component_name(composite),
	};

	Some(AttributionResult {
		kind: ElementKind::Children,
		name,
		element_tag,
		source: dom_debug_source(resolver, dom_node).await,
		call_site: None,
	})
}

/// Debug source for a composite node.
///
/// Preference order: the node's own embedded record, the owner's embedded
/// record (server placeholders carry none), the node's first user stack
/// frame, the owner's first user stack frame.
pub(crate) async fn composite_debug_source(
	resolver: &SourceMapResolver,
	node: &dyn RenderNode,
) -> Option<OriginalLocation> {
	if let Some(source) = node.debug_source() {
		return Some(source);
	}

	let owner_node = match node.owner() {
		Some(Owner::Node(owner)) => Some(owner),
		_ => None,
	};

	if let Some(source) = owner_node.and_then(|owner| owner.debug_source()) {
		return Some(source);
	}

	if let Some(frame) = node.debug_stack().as_deref().and_then(first_user_frame) {
		return Some(resolver.resolve_frame(&frame).await);
	}

	if let Some(owner) = owner_node {
		if let Some(frame) = owner.debug_stack().as_deref().and_then(first_user_frame) {
			return Some(resolver.resolve_frame(&frame).await);
		}
	}

	None
}

/// Debug source for a host (DOM) node: its own record, else its own stack.
pub(crate) async fn dom_debug_source(
	resolver: &SourceMapResolver,
	node: &dyn RenderNode,
) -> Option<OriginalLocation> {
	if let Some(source) = node.debug_source() {
		return Some(source);
	}

	if let Some(frame) = node.debug_stack().as_deref().and_then(first_user_frame) {
		return Some(resolver.resolve_frame(&frame).await);
	}

	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testutil::{null_resolver, MockElement, MockNode, MockOwner};
	use std::rc::Rc;

	fn location(file: &str, line: u32) -> OriginalLocation {
		OriginalLocation::new(file, line, Some(1))
	}

	#[tokio::test]
	async fn element_without_a_node_yields_nothing() {
		let resolver = null_resolver();
		let element = MockElement::without_node(vec!["className".into()]);
		assert!(attribute(&resolver, &element).await.is_none());
	}

	#[tokio::test]
	async fn element_without_a_composite_ancestor_yields_nothing() {
		let resolver = null_resolver();
		let root = Rc::new(MockNode::host("body", None));
		let node = Rc::new(MockNode::host("div", Some(root)));
		let element = MockElement::with_node(node);
		assert!(attribute(&resolver, &element).await.is_none());
	}

	#[tokio::test]
	async fn component_root_classifies_as_component() {
		let resolver = null_resolver();
		let mut component = MockNode::function_component("Card", None);
		component.debug_source = Some(location("src/card.tsx", 3));
		let component = Rc::new(component);
		let node = Rc::new(MockNode::host("div", Some(Rc::clone(&component))));
		let element = MockElement::with_node(node);

		let result = attribute(&resolver, &element).await.unwrap();
		assert_eq!(result.kind, ElementKind::Component);
		assert_eq!(result.name, "Card");
		assert_eq!(result.element_tag, None);
		assert_eq!(result.source, Some(location("src/card.tsx", 3)));
		assert_eq!(result.call_site, None);
	}

	#[tokio::test]
	async fn owner_matching_the_composite_classifies_as_element() {
		let resolver = null_resolver();
		let mut component = MockNode::function_component("Card", None);
		component.debug_source = Some(location("src/app.tsx", 20));
		let component = Rc::new(component);

		let intermediate = Rc::new(MockNode::host("div", Some(Rc::clone(&component))));
		let mut node = MockNode::host("button", Some(intermediate));
		node.debug_source = Some(location("src/card.tsx", 9));
		node.owner = Some(MockOwner::Node(Rc::clone(&component)));
		let element = MockElement::with_node(Rc::new(node));

		let result = attribute(&resolver, &element).await.unwrap();
		assert_eq!(result.kind, ElementKind::Element);
		assert_eq!(result.name, "Card");
		assert_eq!(result.element_tag.as_deref(), Some("button"));
		assert_eq!(result.source, Some(location("src/card.tsx", 9)));
		assert_eq!(result.call_site, Some(location("src/app.tsx", 20)));
	}

	#[tokio::test]
	async fn foreign_owner_classifies_as_children() {
		let resolver = null_resolver();
		let outer = Rc::new(MockNode::function_component("Layout", None));
		let inner = Rc::new(MockNode::function_component(
			"Slot",
			Some(Rc::clone(&outer)),
		));
		let intermediate = Rc::new(MockNode::host("div", Some(Rc::clone(&inner))));

		let mut node = MockNode::host("p", Some(intermediate));
		node.debug_source = Some(location("src/layout.tsx", 14));
		node.owner = Some(MockOwner::Node(outer));
		let element = MockElement::with_node(Rc::new(node));

		let result = attribute(&resolver, &element).await.unwrap();
		assert_eq!(result.kind, ElementKind::Children);
		assert_eq!(result.name, "Layout");
		assert_eq!(result.element_tag.as_deref(), Some("p"));
		assert_eq!(result.source, Some(location("src/layout.tsx", 14)));
		assert_eq!(result.call_site, None);
	}

	#[tokio::test]
	async fn missing_owner_falls_back_to_the_composite_name() {
		let resolver = null_resolver();
		let component = Rc::new(MockNode::function_component("Page", None));
		let intermediate = Rc::new(MockNode::host("div", Some(Rc::clone(&component))));
		let node = Rc::new(MockNode::host("span", Some(intermediate)));
		let element = MockElement::with_node(node);

		let result = attribute(&resolver, &element).await.unwrap();
		assert_eq!(result.kind, ElementKind::Children);
		assert_eq!(result.name, "Page");
	}

	#[tokio::test]
	async fn server_placeholder_owner_names_children_verbatim() {
		let resolver = null_resolver();
		let component = Rc::new(MockNode::function_component("Shell", None));
		let intermediate = Rc::new(MockNode::host("div", Some(Rc::clone(&component))));

		let mut node = MockNode::host("article", Some(intermediate));
		node.owner = Some(MockOwner::Server("ServerCard".into()));
		let element = MockElement::with_node(Rc::new(node));

		let result = attribute(&resolver, &element).await.unwrap();
		assert_eq!(result.kind, ElementKind::Children);
		assert_eq!(result.name, "ServerCard");
	}

	#[tokio::test]
	async fn composite_source_falls_back_to_the_owner_record() {
		let resolver = null_resolver();
		let mut owner = MockNode::function_component("App", None);
		owner.debug_source = Some(location("src/app.tsx", 2));
		let owner = Rc::new(owner);

		let mut component = MockNode::function_component("Card", None);
		component.owner = Some(MockOwner::Node(owner));

		let source = composite_debug_source(&resolver, &component).await;
		assert_eq!(source, Some(location("src/app.tsx", 2)));
	}

	#[tokio::test]
	async fn server_placeholder_owner_contributes_no_source() {
		let resolver = null_resolver();
		let mut component = MockNode::function_component("Card", None);
		component.owner = Some(MockOwner::Server("ServerCard".into()));

		assert!(composite_debug_source(&resolver, &component).await.is_none());
	}

	#[tokio::test]
	async fn stack_frames_resolve_when_no_record_is_embedded() {
		let resolver = null_resolver();
		let mut component = MockNode::function_component("Card", None);
		component.debug_stack =
			Some("    at Card (https://app.invalid/src/card.tsx:8:4)".to_string());

		// The null resolver finds no map, so the literal fallback applies.
		let source = composite_debug_source(&resolver, &component).await.unwrap();
		assert_eq!(source.file_name, "src/card.tsx");
		assert_eq!(source.line_number, 8);
		assert_eq!(source.column_number, Some(4));
	}
}
