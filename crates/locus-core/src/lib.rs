// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Locus source attribution engine.
//!
//! Locus answers one question about a running UI application: for a given
//! on-screen element, which component produced it and where is that component
//! defined or invoked in the original, pre-bundle sources? This crate holds
//! the shared value types that flow between the render-tree walker
//! (`locus-engine`) and the source-map resolver (`locus-sourcemap`):
//!
//! - Positions in generated (bundled, minified) code
//! - Locations in original source files
//! - The structured attribution result handed to the presentation layer

pub mod attribution;
pub mod error;
pub mod location;

pub use attribution::{AttributionResult, ElementKind};
pub use error::{CoreError, Result};
pub use location::{GeneratedPosition, OriginalLocation};
