// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transport seam for source map retrieval.
//!
//! The fetcher only needs plain GETs; hiding them behind a trait keeps the
//! discovery logic testable without a network and lets embedders substitute
//! their own HTTP stack.

use async_trait::async_trait;

use crate::error::{Result, SourceMapError};

/// What the discovery chain needs from one GET.
#[derive(Debug, Clone)]
pub struct TransportResponse {
	/// Whether the response carried a success status.
	pub ok: bool,
	/// Response body text.
	pub body: String,
	/// Value of the `SourceMap` header, falling back to `X-SourceMap`.
	pub source_map_header: Option<String>,
}

/// Issues GET requests for the source map fetcher.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn get(&self, url: &str) -> Result<TransportResponse>;
}

/// Production transport backed by `reqwest`.
pub struct HttpTransport {
	client: reqwest::Client,
}

impl HttpTransport {
	pub fn new() -> Self {
		let client = reqwest::Client::builder()
			.user_agent(user_agent())
			.build()
			.expect("failed to build HTTP client");
		Self { client }
	}

	/// Wraps an existing client, keeping whatever defaults it was built with.
	pub fn with_client(client: reqwest::Client) -> Self {
		Self { client }
	}
}

impl Default for HttpTransport {
	fn default() -> Self {
		Self::new()
	}
}

/// Returns the standard Locus User-Agent string.
///
/// Format: `locus/{version}`
pub fn user_agent() -> String {
	format!("locus/{}", env!("CARGO_PKG_VERSION"))
}

#[async_trait]
impl Transport for HttpTransport {
	async fn get(&self, url: &str) -> Result<TransportResponse> {
		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(|e| SourceMapError::Transport(e.to_string()))?;

		let ok = response.status().is_success();
		let source_map_header = response
			.headers()
			.get("SourceMap")
			.or_else(|| response.headers().get("X-SourceMap"))
			.and_then(|value| value.to_str().ok())
			.map(str::to_string);

		let body = response
			.text()
			.await
			.map_err(|e| SourceMapError::Transport(e.to_string()))?;

		Ok(TransportResponse {
			ok,
			body,
			source_map_header,
		})
	}
}
