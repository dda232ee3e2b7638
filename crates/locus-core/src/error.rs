// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types shared across the attribution engine.
//!
//! The engine's public surface never raises these: every failure mode
//! degrades to absence (`None`) before it reaches a caller. They exist for
//! the internals, where a decode or transport problem still needs a name.

use thiserror::Error;

/// Errors produced by the core types.
#[derive(Debug, Error)]
pub enum CoreError {
	#[error("Invalid position: {0} must be >= 1")]
	InvalidPosition(&'static str),
}

pub type Result<T> = std::result::Result<T, CoreError>;
