// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Test doubles for the host's render tree and the network.

use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;

use locus_core::OriginalLocation;
use locus_sourcemap::{
	FetcherConfig, SourceMapError, SourceMapResolver, Transport, TransportResponse,
};

use crate::host::{FunctionInfo, HostElement, NodeTag, Owner, RenderNode, TypeInfo};

/// A render node with settable fields, linked by `Rc`.
pub(crate) struct MockNode {
	pub tag: NodeTag,
	pub type_info: TypeInfo,
	pub parent: Option<Rc<MockNode>>,
	pub debug_source: Option<OriginalLocation>,
	pub debug_stack: Option<String>,
	pub owner: Option<MockOwner>,
}

pub(crate) enum MockOwner {
	Node(Rc<MockNode>),
	Server(String),
}

impl MockNode {
	pub fn host(tag: &str, parent: Option<Rc<MockNode>>) -> Self {
		Self {
			tag: NodeTag::HOST_COMPONENT,
			type_info: TypeInfo::HostTag(tag.to_string()),
			parent,
			debug_source: None,
			debug_stack: None,
			owner: None,
		}
	}

	pub fn function_component(name: &str, parent: Option<Rc<MockNode>>) -> Self {
		Self {
			tag: NodeTag::FUNCTION_COMPONENT,
			type_info: TypeInfo::Function(FunctionInfo {
				display_name: None,
				name: Some(name.to_string()),
			}),
			parent,
			debug_source: None,
			debug_stack: None,
			owner: None,
		}
	}
}

impl RenderNode for MockNode {
	fn tag(&self) -> NodeTag {
		self.tag
	}

	fn type_info(&self) -> TypeInfo {
		self.type_info.clone()
	}

	fn parent(&self) -> Option<&dyn RenderNode> {
		self.parent.as_deref().map(|node| node as &dyn RenderNode)
	}

	fn debug_source(&self) -> Option<OriginalLocation> {
		self.debug_source.clone()
	}

	fn debug_stack(&self) -> Option<String> {
		self.debug_stack.clone()
	}

	fn owner(&self) -> Option<Owner<'_>> {
		match &self.owner {
			Some(MockOwner::Node(node)) => Some(Owner::Node(node.as_ref())),
			Some(MockOwner::Server(name)) => Some(Owner::ServerPlaceholder { name: name.clone() }),
			None => None,
		}
	}
}

/// An element that, at most, carries one render node under the standard key.
pub(crate) struct MockElement {
	keys: Vec<String>,
	node: Option<Rc<MockNode>>,
}

impl MockElement {
	pub fn with_node(node: Rc<MockNode>) -> Self {
		Self {
			keys: vec![
				"className".to_string(),
				"__reactFiber$k3xp9".to_string(),
			],
			node: Some(node),
		}
	}

	pub fn without_node(keys: Vec<String>) -> Self {
		Self { keys, node: None }
	}
}

impl HostElement for MockElement {
	fn property_keys(&self) -> Vec<String> {
		self.keys.clone()
	}

	fn node_for_key(&self, key: &str) -> Option<&dyn RenderNode> {
		if !key.starts_with(crate::host::NODE_KEY_PREFIX) {
			return None;
		}
		self.node.as_deref().map(|node| node as &dyn RenderNode)
	}
}

/// A transport with no network behind it; every request fails.
pub(crate) struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
	async fn get(&self, _url: &str) -> locus_sourcemap::Result<TransportResponse> {
		Err(SourceMapError::Transport("test transport is offline".into()))
	}
}

/// A transport that parks every request until `gate` is notified, then
/// fails it. Lets tests interleave slow and fast attributions.
pub(crate) struct GatedTransport {
	pub gate: Arc<tokio::sync::Notify>,
}

#[async_trait]
impl Transport for GatedTransport {
	async fn get(&self, _url: &str) -> locus_sourcemap::Result<TransportResponse> {
		self.gate.notified().await;
		Err(SourceMapError::Transport("gated transport is offline".into()))
	}
}

/// A resolver whose every lookup degrades to the literal fallback.
pub(crate) fn null_resolver() -> SourceMapResolver {
	SourceMapResolver::new(Arc::new(FailingTransport), FetcherConfig::default())
}
