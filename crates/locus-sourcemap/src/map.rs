// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map payload parsing and position lookup.
//!
//! Accepts the two Source Map v3 payload shapes: a plain map
//! (`{sources, mappings}`) and an indexed map (`{sections: [{offset, map}]}`).
//! Indexed maps are flattened into a single per-line table before lookup.

use serde::Deserialize;

use crate::error::{Result, SourceMapError};
use crate::vlq::{decode_mappings, Segment};

#[derive(Debug, Deserialize)]
struct RawMap {
	sources: Vec<String>,
	mappings: String,
}

#[derive(Debug, Deserialize)]
struct RawOffset {
	line: u32,
	column: u32,
}

#[derive(Debug, Deserialize)]
struct RawSection {
	offset: RawOffset,
	map: RawMap,
}

/// Top-level payload. Exactly one of the two shapes must be present.
#[derive(Debug, Deserialize)]
struct RawPayload {
	#[serde(default)]
	sections: Option<Vec<RawSection>>,
	#[serde(default)]
	sources: Option<Vec<String>>,
	#[serde(default)]
	mappings: Option<String>,
}

/// A normalized mapping table for one generated file.
///
/// Built once per bundled file and cached until evicted.
#[derive(Debug, Clone)]
pub struct SourceMap {
	/// Original source file names, index-addressed by segments.
	pub sources: Vec<String>,
	/// Per generated line, segments sorted ascending by generated column.
	lines: Vec<Vec<Segment>>,
}

impl SourceMap {
	/// Parses a source map JSON payload, plain or indexed.
	///
	/// A payload lacking both `sources`/`mappings` and `sections` is invalid.
	pub fn parse(json: &str) -> Result<Self> {
		let raw: RawPayload = serde_json::from_str(json)?;

		if let Some(sections) = raw.sections {
			return Ok(Self::flatten(sections));
		}

		match (raw.sources, raw.mappings) {
			(Some(sources), Some(mappings)) => Ok(Self {
				sources,
				lines: decode_mappings(&mappings),
			}),
			_ => Err(SourceMapError::UnrecognizedPayload),
		}
	}

	/// Flattens an indexed map's sections into one table.
	///
	/// Each section decodes independently; its source indices shift by the
	/// sources already merged, and its column offset applies only to
	/// segments on the section's first line. Lines are re-sorted afterwards
	/// because interleaved sections can violate column order.
	fn flatten(sections: Vec<RawSection>) -> Self {
		let mut sources: Vec<String> = Vec::new();
		let mut lines: Vec<Vec<Segment>> = Vec::new();

		for section in sections {
			let decoded = decode_mappings(&section.map.mappings);
			let line_offset = section.offset.line as usize;
			let source_offset = sources.len() as u32;

			if lines.len() < line_offset + decoded.len() {
				lines.resize_with(line_offset + decoded.len(), Vec::new);
			}

			for (i, decoded_line) in decoded.into_iter().enumerate() {
				let target = &mut lines[line_offset + i];
				for mut segment in decoded_line {
					if i == 0 {
						segment.generated_column += section.offset.column;
					}
					segment.source_index += source_offset;
					target.push(segment);
				}
			}

			sources.extend(section.map.sources);
		}

		for line in &mut lines {
			if line.len() > 1 {
				line.sort_by_key(|s| s.generated_column);
			}
		}

		Self { sources, lines }
	}

	/// Number of generated lines covered by the table.
	pub fn line_count(&self) -> usize {
		self.lines.len()
	}

	/// Finds the nearest segment at or before `column` on `line`.
	///
	/// Both inputs are 0-indexed. Returns `None` for a line outside the
	/// table or one with no segments. A column before the line's first
	/// segment clamps to that first segment.
	pub fn lookup(&self, line: usize, column: u32) -> Option<&Segment> {
		let segments = self.lines.get(line)?;
		if segments.is_empty() {
			return None;
		}

		let idx = segments.partition_point(|s| s.generated_column <= column);
		Some(&segments[idx.saturating_sub(1)])
	}
}
