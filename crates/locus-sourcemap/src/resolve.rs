// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Position resolution: generated (url, line, column) to original location.

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use url::Url;

use locus_core::{GeneratedPosition, OriginalLocation};

use crate::fetch::{FetcherConfig, SourceMapFetcher};
use crate::transport::Transport;

/// Public entry point of the source map pipeline.
///
/// Owns the fetcher (and through it the cache); one resolver serves a whole
/// engine instance.
pub struct SourceMapResolver {
	fetcher: SourceMapFetcher,
}

impl SourceMapResolver {
	pub fn new(transport: Arc<dyn Transport>, config: FetcherConfig) -> Self {
		Self {
			fetcher: SourceMapFetcher::new(transport, config),
		}
	}

	/// Resolves a 1-indexed generated position to its original location.
	///
	/// `None` when no map can be found, the line is outside the table, or
	/// the line has no segments. Resolved `file:///` source names are
	/// replaced by their percent-decoded path component.
	pub async fn resolve_original_position(
		&self,
		url: &str,
		line: u32,
		column: u32,
	) -> Option<OriginalLocation> {
		let map = self.fetcher.source_map(url).await?;

		let line0 = line.checked_sub(1)? as usize;
		let column0 = column.checked_sub(1)?;
		let segment = map.lookup(line0, column0)?;

		let mut file_name = map.sources.get(segment.source_index as usize)?.clone();
		if file_name.starts_with("file:///") {
			if let Ok(parsed) = Url::parse(&file_name) {
				if let Ok(path) = percent_decode_str(parsed.path()).decode_utf8() {
					file_name = path.into_owned();
				}
			}
		}

		Some(OriginalLocation::new(
			file_name,
			segment.original_line + 1,
			Some(segment.original_column + 1),
		))
	}

	/// Resolves a raw stack frame, falling back to a literal location.
	///
	/// When no map resolves the frame, the frame's URL is decoded as a
	/// path: percent-decoded, query suffix stripped, `../` and a leading
	/// `/` removed. Unparseable URLs pass through as raw text.
	pub async fn resolve_frame(&self, frame: &GeneratedPosition) -> OriginalLocation {
		if let Some(location) = self
			.resolve_original_position(&frame.url, frame.line, frame.column)
			.await
		{
			return location;
		}

		let mut file_name = match Url::parse(&frame.url) {
			Ok(parsed) => percent_decode_str(parsed.path())
				.decode_utf8()
				.map(|path| path.into_owned())
				.unwrap_or_else(|_| frame.url.clone()),
			Err(_) => frame.url.clone(),
		};

		if let Some(query) = file_name.find('?') {
			file_name.truncate(query);
		}
		file_name = file_name.replace("../", "");
		let file_name = file_name.strip_prefix('/').unwrap_or(&file_name).to_string();

		OriginalLocation::new(file_name, frame.line, Some(frame.column))
	}
}
