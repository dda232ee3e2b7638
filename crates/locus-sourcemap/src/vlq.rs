// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Base64 VLQ decoding for Source Map v3 `mappings` strings.
//!
//! Values are signed (sign in the low bit), 5 data bits per digit, with the
//! 6th bit signaling continuation. Lines are separated by semicolons,
//! segments within a line by commas. Decoding never fails: a value run
//! truncated by end of input yields 0, and a segment containing a character
//! outside the base64 alphabet is dropped.

/// One decoded mapping segment, absolute-valued.
///
/// All positions are 0-indexed, matching the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
	/// Column in the generated file.
	pub generated_column: u32,
	/// Index into the map's `sources` array.
	pub source_index: u32,
	/// Line in the original file.
	pub original_line: u32,
	/// Column in the original file.
	pub original_column: u32,
}

fn base64_value(byte: u8) -> Option<i64> {
	match byte {
		b'A'..=b'Z' => Some(i64::from(byte - b'A')),
		b'a'..=b'z' => Some(i64::from(byte - b'a') + 26),
		b'0'..=b'9' => Some(i64::from(byte - b'0') + 52),
		b'+' => Some(62),
		b'/' => Some(63),
		_ => None,
	}
}

/// Decodes one VLQ value starting at `*pos`, advancing past it.
///
/// A run cut off by end of input yields `Some(0)`. A byte outside the
/// base64 alphabet yields `None`.
fn decode_value(bytes: &[u8], pos: &mut usize) -> Option<i64> {
	let mut shift = 0u32;
	let mut value = 0i64;

	while *pos < bytes.len() {
		let digit = base64_value(bytes[*pos])?;
		*pos += 1;

		value += (digit & 31) << shift;

		// Bit 6 signals continuation
		if digit & 32 == 0 {
			let negated = value & 1 != 0;
			value >>= 1;
			return Some(if negated { -value } else { value });
		}
		shift += 5;
	}

	// Truncated run
	Some(0)
}

/// Decodes a full `mappings` string into per-line, absolute-valued segments.
///
/// The generated column resets at the start of each line; the source index
/// and original line/column accumulate across the whole table. Segments with
/// only a generated-column field advance the accumulator but emit nothing.
/// A 5th field (name index) is consumed and ignored. Empty lines decode to
/// empty vectors so line indexing into the result stays positional.
pub fn decode_mappings(raw: &str) -> Vec<Vec<Segment>> {
	let mut result = Vec::new();

	let mut source_index = 0i64;
	let mut original_line = 0i64;
	let mut original_column = 0i64;

	for line in raw.split(';') {
		let mut segments = Vec::new();
		let mut generated_column = 0i64;

		for raw_segment in line.split(',') {
			if raw_segment.is_empty() {
				continue;
			}

			let bytes = raw_segment.as_bytes();
			let mut pos = 0usize;

			let Some(gen_delta) = decode_value(bytes, &mut pos) else {
				continue;
			};
			generated_column += gen_delta;

			// 1-field segment: column-only, nothing to resolve against
			if pos >= bytes.len() {
				continue;
			}

			let (Some(src_delta), Some(line_delta), Some(col_delta)) = (
				decode_value(bytes, &mut pos),
				decode_value(bytes, &mut pos),
				decode_value(bytes, &mut pos),
			) else {
				continue;
			};

			source_index += src_delta;
			original_line += line_delta;
			original_column += col_delta;

			// Optional name index, irrelevant to position resolution
			if pos < bytes.len() {
				let _ = decode_value(bytes, &mut pos);
			}

			segments.push(Segment {
				generated_column: clamp(generated_column),
				source_index: clamp(source_index),
				original_line: clamp(original_line),
				original_column: clamp(original_column),
			});
		}

		result.push(segments);
	}

	result
}

fn clamp(value: i64) -> u32 {
	u32::try_from(value).unwrap_or(0)
}
