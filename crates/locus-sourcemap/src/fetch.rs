// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map discovery.
//!
//! Given a bundled file's URL, finds its mapping table. Discovery order,
//! first success wins:
//!
//! 1. Trailing `//# sourceMappingURL=` (or legacy `//@`) comment in the
//!    file's text; inline base64 `data:` payloads decode directly
//! 2. `SourceMap` / `X-SourceMap` response header
//! 3. The `{url}.map` convention
//! 4. For server-module locator URLs, the dev server's source map endpoint
//!
//! References found in steps 1 and 2 resolve relative to the bundled file
//! and are rejected when their origin differs — a trust boundary, not an
//! optimization. Every failure falls through to the next step and finally
//! to `None`; nothing here raises to the caller.

use std::sync::{Arc, LazyLock};

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use tracing::debug;
use url::Url;

use crate::cache::MapCache;
use crate::map::SourceMap;
use crate::transport::Transport;

static SOURCE_MAPPING_URL_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?m)//[#@]\s*sourceMappingURL=(\S+)$").unwrap());

static DATA_URI_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^data:application/json[^,]*;base64,([A-Za-z0-9+/=]+)$").unwrap());

/// Opaque locator scheme for server-rendered modules.
static SERVER_LOCATOR_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^about://React/Server/file:///").unwrap());

/// Build-output directory marker inside a decoded server-module path.
static BUILD_OUTPUT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[/\\](\.next[/\\].+?)(?:\?.*)?$").unwrap());

/// Dev server endpoint answering source map queries for server modules.
const SERVER_MAP_ENDPOINT: &str = "/__nextjs_source-map";

/// Percent-encoding set matching JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Fetcher configuration.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
	/// Maximum number of cached mapping tables.
	pub cache_capacity: usize,
	/// Origin the server-module endpoint is queried against, e.g. the page
	/// origin of the inspected application. Empty disables step 4's query.
	pub endpoint_origin: String,
}

impl Default for FetcherConfig {
	fn default() -> Self {
		Self {
			cache_capacity: 100,
			endpoint_origin: String::new(),
		}
	}
}

/// Discovers and caches mapping tables per bundled-file URL.
pub struct SourceMapFetcher {
	transport: Arc<dyn Transport>,
	cache: MapCache,
	config: FetcherConfig,
}

impl SourceMapFetcher {
	pub fn new(transport: Arc<dyn Transport>, config: FetcherConfig) -> Self {
		let cache = MapCache::new(config.cache_capacity);
		Self {
			transport,
			cache,
			config,
		}
	}

	/// Returns the mapping table for `url`, or `None` if unavailable.
	///
	/// Memoized: the cache slot is claimed before any network traffic, so
	/// concurrent calls for one URL share a single retrieval, and a
	/// not-found outcome is remembered until evicted.
	pub async fn source_map(&self, url: &str) -> Option<Arc<SourceMap>> {
		let slot = self.cache.slot(url);
		slot.get_or_init(|| async {
			let map = if SERVER_LOCATOR_RE.is_match(url) {
				self.fetch_server_module(url).await
			} else {
				self.discover(url).await
			};
			if map.is_none() {
				debug!(url, "no source map found");
			}
			map.map(Arc::new)
		})
		.await
		.clone()
	}

	/// Steps 1–3 of discovery for ordinary bundled files.
	async fn discover(&self, url: &str) -> Option<SourceMap> {
		let response = match self.transport.get(url).await {
			Ok(response) => response,
			Err(e) => {
				debug!(url, error = %e, "generated file fetch failed");
				return None;
			}
		};

		// Step 1: trailing comment reference
		if let Some(caps) = SOURCE_MAPPING_URL_RE.captures(&response.body) {
			if let Some(json) = self.load_reference(caps[1].trim(), url).await {
				if let Ok(map) = SourceMap::parse(&json) {
					debug!(url, "source map found via trailing comment");
					return Some(map);
				}
			}
		}

		// Step 2: response header reference
		if let Some(reference) = response.source_map_header.as_deref() {
			if let Some(json) = self.load_reference(reference.trim(), url).await {
				if let Ok(map) = SourceMap::parse(&json) {
					debug!(url, "source map found via response header");
					return Some(map);
				}
			}
		}

		// Step 3: convention fallback
		let convention = format!("{url}.map");
		match self.transport.get(&convention).await {
			Ok(response) if response.ok => {
				let map = SourceMap::parse(&response.body).ok();
				if map.is_some() {
					debug!(url, "source map found via convention fallback");
				}
				map
			}
			_ => None,
		}
	}

	/// Loads the JSON text behind a sourceMappingURL-style reference.
	async fn load_reference(&self, reference: &str, base_url: &str) -> Option<String> {
		if reference.starts_with("data:") {
			let caps = DATA_URI_RE.captures(reference)?;
			let bytes = BASE64_STANDARD.decode(&caps[1]).ok()?;
			return String::from_utf8(bytes).ok();
		}

		let base = Url::parse(base_url).ok()?;
		let map_url = base.join(reference).ok()?;
		if map_url.origin() != base.origin() {
			debug!(base = base_url, reference, "rejecting cross-origin source map reference");
			return None;
		}

		let response = self.transport.get(map_url.as_str()).await.ok()?;
		if !response.ok {
			return None;
		}
		Some(response.body)
	}

	/// Step 4: server-module locator side channel.
	///
	/// Only reachable when the decoded path contains the build-output
	/// marker; otherwise not-found without any network call.
	async fn fetch_server_module(&self, url: &str) -> Option<SourceMap> {
		if self.config.endpoint_origin.is_empty() {
			return None;
		}

		let stripped = SERVER_LOCATOR_RE.replace(url, "");
		let path = percent_decode_str(&stripped).decode_utf8().ok()?;

		let caps = BUILD_OUTPUT_RE.captures(&path)?;
		let endpoint = format!(
			"{}{}?filename={}",
			self.config.endpoint_origin,
			SERVER_MAP_ENDPOINT,
			utf8_percent_encode(&caps[1], COMPONENT),
		);

		let response = self.transport.get(&endpoint).await.ok()?;
		if !response.ok || response.body.is_empty() {
			return None;
		}
		SourceMap::parse(&response.body).ok()
	}
}
