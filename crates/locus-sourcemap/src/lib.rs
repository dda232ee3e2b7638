// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map discovery, decoding and position resolution for Locus.
//!
//! This crate maps positions in bundled, minified code back to the original
//! file/line/column, the way a developer overlay needs it:
//!
//! - Base64 VLQ decoding of the Source Map v3 `mappings` field, including
//!   indexed (sectioned) maps flattened into one lookup table
//! - Discovery of a bundled file's map via the trailing
//!   `sourceMappingURL` comment, the `SourceMap`/`X-SourceMap` response
//!   headers, the `{url}.map` convention, or the dev server's
//!   server-module side channel — behind a same-origin trust boundary
//! - A bounded, insertion-order cache that memoizes in-flight retrievals
//!
//! Every failure on the lookup path degrades to `None`; callers never see a
//! transport or parse error.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use locus_sourcemap::{FetcherConfig, HttpTransport, SourceMapResolver};
//!
//! let resolver = SourceMapResolver::new(Arc::new(HttpTransport::new()), FetcherConfig::default());
//! let original = resolver
//!     .resolve_original_position("https://app.example/bundle.js", 1, 491)
//!     .await;
//! ```

pub mod cache;
pub mod error;
pub mod fetch;
pub mod map;
pub mod resolve;
pub mod transport;
pub mod vlq;

pub use cache::MapCache;
pub use error::{Result, SourceMapError};
pub use fetch::{FetcherConfig, SourceMapFetcher};
pub use map::SourceMap;
pub use resolve::SourceMapResolver;
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use vlq::{decode_mappings, Segment};
