// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read-only model of the host framework's render tree.
//!
//! The tree is owned and mutated by the inspected application; the engine
//! only reads it, one synchronous classification pass at a time, and never
//! retains a node. The original environment duck-types an untrusted object
//! graph and converts property-access exceptions to absence; here the host
//! implements these traits and signals absence with `None` directly.
//!
//! Two node shapes exist: a full render node, and a lightweight placeholder
//! carrying only the name of non-local (server-rendered) provenance.

use locus_core::OriginalLocation;

/// Render node property key prefix the host attaches to its elements.
pub const NODE_KEY_PREFIX: &str = "__reactFiber$";

/// Numeric kind tag of a render node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeTag(pub u32);

impl NodeTag {
	pub const FUNCTION_COMPONENT: NodeTag = NodeTag(0);
	pub const CLASS_COMPONENT: NodeTag = NodeTag(1);
	pub const HOST_COMPONENT: NodeTag = NodeTag(5);
	pub const FORWARD_REF: NodeTag = NodeTag(11);
	pub const MEMO_COMPONENT: NodeTag = NodeTag(14);
	pub const SIMPLE_MEMO_COMPONENT: NodeTag = NodeTag(15);

	/// Whether this node corresponds to a user-authored component rather
	/// than host (DOM) output.
	pub fn is_composite(self) -> bool {
		matches!(self.0, 0 | 1 | 11 | 14 | 15)
	}
}

/// Name metadata of a component function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionInfo {
	/// Explicit display name, when assigned.
	pub display_name: Option<String>,
	/// The function's identifier name.
	pub name: Option<String>,
}

/// The `type` descriptor of a render node, reduced to what naming needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeInfo {
	/// A plain tag-name string; the node is host output.
	HostTag(String),
	/// A directly callable component.
	Function(FunctionInfo),
	/// A wrapper descriptor (forward-ref, memo) with an optional own display
	/// name and the wrapped render/type function.
	Descriptor {
		display_name: Option<String>,
		inner: Option<FunctionInfo>,
	},
	/// Anything else, including absent or unreadable types.
	Opaque,
}

/// The node (or placeholder) that logically rendered a given node.
pub enum Owner<'a> {
	Node(&'a dyn RenderNode),
	/// Non-local provenance; carries only a name.
	ServerPlaceholder { name: String },
}

/// One node of the framework-internal render tree.
///
/// Hosts that cannot read a property return `None`; the engine treats every
/// absence as "nothing to show", never as an error.
pub trait RenderNode {
	fn tag(&self) -> NodeTag;
	fn type_info(&self) -> TypeInfo;
	fn parent(&self) -> Option<&dyn RenderNode>;
	/// Embedded debug-source record, when the build produced one.
	fn debug_source(&self) -> Option<OriginalLocation>;
	/// Raw call-stack text captured at render time.
	fn debug_stack(&self) -> Option<String>;
	fn owner(&self) -> Option<Owner<'_>>;
}

/// A DOM-like element the engine can inspect.
pub trait HostElement {
	/// The element's own enumerable property keys, in enumeration order.
	fn property_keys(&self) -> Vec<String>;
	/// The render node attached under `key`, if any.
	fn node_for_key(&self, key: &str) -> Option<&dyn RenderNode>;
}

/// Reference identity between two nodes of the host's graph.
pub fn same_node(a: &dyn RenderNode, b: &dyn RenderNode) -> bool {
	std::ptr::eq(a as *const dyn RenderNode as *const (), b as *const dyn RenderNode as *const ())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testutil::MockNode;
	use std::rc::Rc;

	#[test]
	fn composite_tag_set_matches_component_kinds() {
		assert!(NodeTag::FUNCTION_COMPONENT.is_composite());
		assert!(NodeTag::CLASS_COMPONENT.is_composite());
		assert!(NodeTag::FORWARD_REF.is_composite());
		assert!(NodeTag::MEMO_COMPONENT.is_composite());
		assert!(NodeTag::SIMPLE_MEMO_COMPONENT.is_composite());
		assert!(!NodeTag::HOST_COMPONENT.is_composite());
		assert!(!NodeTag(3).is_composite());
	}

	#[test]
	fn same_node_is_reference_identity() {
		let a = Rc::new(MockNode::function_component("A", None));
		let b = Rc::new(MockNode::function_component("A", None));
		assert!(same_node(a.as_ref(), a.as_ref()));
		assert!(!same_node(a.as_ref(), b.as_ref()));
	}
}
