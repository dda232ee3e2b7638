// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source attribution engine for on-hover UI inspection.
//!
//! Given an element of a running UI application, the engine names the
//! component that produced it and recovers the original file/line/column
//! behind the bundled code:
//!
//! - The render-tree walker classifies the element against the
//!   framework-internal node graph the host exposes (read-only)
//! - The source map resolver from `locus-sourcemap` maps raw stack frames
//!   back to pre-transform sources
//! - The request coordinator guarantees that overlapping attribution
//!   requests never surface a stale result over a newer one
//!
//! All state lives on an [`Engine`] instance: cache, counters and config
//! are scoped to it, and `stop` tears the interaction state down. One
//! engine per inspected page is the intended pattern.
//!
//! # Example
//!
//! ```ignore
//! use locus_engine::{Engine, Interaction};
//!
//! let engine = Engine::builder().endpoint_origin("https://localhost:3000").build();
//! engine.start();
//!
//! // On each pointer movement the presentation layer drives:
//! engine.dispatch(Interaction::PointerMove, element, |result| {
//!     overlay.show(result);
//! }).await;
//! ```

pub mod attribution;
pub mod coordinate;
pub mod frame;
pub mod host;
pub mod walker;

#[cfg(test)]
pub(crate) mod testutil;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use locus_sourcemap::{FetcherConfig, HttpTransport, SourceMapResolver, Transport};

pub use coordinate::{Interaction, RequestCoordinator, Ticket};
pub use host::{
	same_node, FunctionInfo, HostElement, NodeTag, Owner, RenderNode, TypeInfo, NODE_KEY_PREFIX,
};
pub use locus_core::{AttributionResult, ElementKind, GeneratedPosition, OriginalLocation};

/// Builder for an [`Engine`].
pub struct EngineBuilder {
	transport: Option<Arc<dyn Transport>>,
	config: FetcherConfig,
}

impl EngineBuilder {
	pub fn new() -> Self {
		Self {
			transport: None,
			config: FetcherConfig::default(),
		}
	}

	/// Substitutes the HTTP transport (tests, embedders with their own stack).
	pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
		self.transport = Some(transport);
		self
	}

	/// Bounds the mapping-table cache.
	pub fn cache_capacity(mut self, capacity: usize) -> Self {
		self.config.cache_capacity = capacity;
		self
	}

	/// Origin for the dev server's server-module source map endpoint,
	/// normally the inspected page's own origin.
	pub fn endpoint_origin(mut self, origin: impl Into<String>) -> Self {
		self.config.endpoint_origin = origin.into();
		self
	}

	pub fn build(self) -> Engine {
		let transport = self
			.transport
			.unwrap_or_else(|| Arc::new(HttpTransport::new()));
		Engine {
			resolver: SourceMapResolver::new(transport, self.config),
			coordinator: RequestCoordinator::new(),
			started: AtomicBool::new(false),
		}
	}
}

impl Default for EngineBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// One attribution engine instance.
///
/// Owns the mapping-table cache and the per-interaction sequence counters;
/// dropping the engine releases both.
pub struct Engine {
	resolver: SourceMapResolver,
	coordinator: RequestCoordinator,
	started: AtomicBool,
}

impl Engine {
	pub fn builder() -> EngineBuilder {
		EngineBuilder::new()
	}

	/// Begins accepting interactions.
	pub fn start(&self) {
		self.started.store(true, Ordering::SeqCst);
		debug!("attribution engine started");
	}

	/// Stops accepting interactions and stales every outstanding request.
	///
	/// In-flight attributions run to completion but deliver nothing. This
	/// is the engine's dispose path; cached tables are freed on drop.
	pub fn stop(&self) {
		self.started.store(false, Ordering::SeqCst);
		self.coordinator.invalidate_all();
		debug!("attribution engine stopped");
	}

	pub fn is_started(&self) -> bool {
		self.started.load(Ordering::SeqCst)
	}

	/// Attributes one element, ungated.
	pub async fn attribute(&self, element: &dyn HostElement) -> Option<AttributionResult> {
		attribution::attribute(&self.resolver, element).await
	}

	/// Attributes one element and delivers the result to `sink` only when
	/// no newer request of the same interaction class has been issued in
	/// the meantime (and the engine is still started).
	pub async fn dispatch<F>(&self, interaction: Interaction, element: &dyn HostElement, sink: F)
	where
		F: FnOnce(Option<AttributionResult>),
	{
		if !self.is_started() {
			return;
		}

		let ticket = self.coordinator.begin(interaction);
		let result = self.attribute(element).await;

		if self.coordinator.is_current(&ticket) && self.is_started() {
			sink(result);
		}
	}
}
