// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for source map retrieval and parsing.
//!
//! These circulate inside the crate only. The fetcher folds every variant
//! into "map unavailable" (`None`) before a result reaches the resolver's
//! caller; nothing here is ever surfaced to the end user.

use thiserror::Error;

/// Errors that can occur while retrieving or parsing a source map.
#[derive(Debug, Error)]
pub enum SourceMapError {
	#[error("Invalid source map JSON: {0}")]
	InvalidJson(#[from] serde_json::Error),

	#[error("Source map payload has neither sections nor sources/mappings")]
	UnrecognizedPayload,

	#[error("Transport error: {0}")]
	Transport(String),
}

pub type Result<T> = std::result::Result<T, SourceMapError>;
