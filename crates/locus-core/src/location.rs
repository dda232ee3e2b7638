// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Positions in generated code and locations in original source.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// A position in generated (bundled, minified) code.
///
/// Line and column are 1-indexed, matching how stack traces report them.
/// Produced per lookup and discarded once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPosition {
	/// URL of the generated file, as it appears in a stack frame.
	pub url: String,
	/// Line in the generated file (1-indexed).
	pub line: u32,
	/// Column in the generated file (1-indexed).
	pub column: u32,
}

impl GeneratedPosition {
	/// Creates a position, rejecting 0-valued line or column.
	pub fn new(url: impl Into<String>, line: u32, column: u32) -> Result<Self> {
		if line < 1 {
			return Err(CoreError::InvalidPosition("line"));
		}
		if column < 1 {
			return Err(CoreError::InvalidPosition("column"));
		}
		Ok(Self {
			url: url.into(),
			line,
			column,
		})
	}
}

/// A point in original, pre-transform source.
///
/// Immutable once produced. The column is optional: embedded debug metadata
/// does not always carry one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalLocation {
	/// Original source file path.
	pub file_name: String,
	/// Line in the original file (1-indexed).
	pub line_number: u32,
	/// Column in the original file (1-indexed), when known.
	pub column_number: Option<u32>,
}

impl OriginalLocation {
	pub fn new(file_name: impl Into<String>, line_number: u32, column_number: Option<u32>) -> Self {
		Self {
			file_name: file_name.into(),
			line_number,
			column_number,
		}
	}
}

impl fmt::Display for OriginalLocation {
	/// Renders `file:line` or `file:line:column`, the form the overlay copies
	/// to the clipboard.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.column_number {
			Some(col) => write!(f, "{}:{}:{}", self.file_name, self.line_number, col),
			None => write!(f, "{}:{}", self.file_name, self.line_number),
		}
	}
}
