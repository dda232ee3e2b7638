// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Render-tree walking and component naming.

use crate::host::{HostElement, RenderNode, TypeInfo, NODE_KEY_PREFIX};

/// Fallback name when a component exposes nothing better.
pub const ANONYMOUS: &str = "Anonymous";

/// Locates the render node attached to an element.
///
/// Scans the element's own keys for the fixed internal prefix. Absence of a
/// key, or a host that cannot produce the node, yields `None`.
pub fn node_from_element(element: &dyn HostElement) -> Option<&dyn RenderNode> {
	let key = element
		.property_keys()
		.into_iter()
		.find(|key| key.starts_with(NODE_KEY_PREFIX))?;
	element.node_for_key(&key)
}

/// Walks parent links, starting at `node` inclusive, to the nearest
/// composite (component-producing) node.
pub fn composite_ancestor(node: &dyn RenderNode) -> Option<&dyn RenderNode> {
	let mut current = Some(node);
	while let Some(candidate) = current {
		if candidate.tag().is_composite() {
			return Some(candidate);
		}
		current = candidate.parent();
	}
	None
}

/// Derives a human-readable component name from a node's type descriptor.
///
/// Callable types prefer their display name, then their identifier name.
/// Wrapper descriptors prefer their own display name, then their wrapped
/// function by the same rule. Everything else is anonymous.
pub fn component_name(node: &dyn RenderNode) -> String {
	match node.type_info() {
		TypeInfo::Function(function) => {
			non_empty(function.display_name)
				.or_else(|| non_empty(function.name))
				.unwrap_or_else(|| ANONYMOUS.to_string())
		}
		TypeInfo::Descriptor { display_name, inner } => {
			non_empty(display_name)
				.or_else(|| {
					inner.and_then(|function| {
						non_empty(function.display_name).or_else(|| non_empty(function.name))
					})
				})
				.unwrap_or_else(|| ANONYMOUS.to_string())
		}
		TypeInfo::HostTag(_) | TypeInfo::Opaque => ANONYMOUS.to_string(),
	}
}

fn non_empty(name: Option<String>) -> Option<String> {
	name.filter(|value| !value.is_empty())
}
