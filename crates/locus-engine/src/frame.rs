// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stack-frame extraction from render-time call-stack text.
//!
//! Debug stacks captured by the framework interleave user frames with
//! JSX-runtime internals and dependency code. The first frame that is
//! neither is the one worth attributing.

use std::sync::LazyLock;

use regex::Regex;

use locus_core::GeneratedPosition;

static FRAME_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"at (?:(\S+) )?\(?(.+):(\d+):(\d+)\)?$").unwrap());

/// Frame names belonging to the JSX runtime, never to user code.
const SKIP_FRAMES: &[&str] = &[
	"jsxDEV",
	"jsxs",
	"jsx",
	"react-stack-top-frame",
	"react_stack_bottom_frame",
];

/// Dependency directory marker; frames inside it are not user code.
const DEPENDENCY_DIR: &str = "/node_modules/";

/// Extracts the first user frame from raw stack text.
pub fn first_user_frame(stack: &str) -> Option<GeneratedPosition> {
	for line in stack.lines() {
		let Some(caps) = FRAME_RE.captures(line.trim()) else {
			continue;
		};

		if let Some(name) = caps.get(1) {
			if SKIP_FRAMES.contains(&name.as_str()) {
				continue;
			}
		}

		let url = &caps[2];
		if url.contains(DEPENDENCY_DIR) {
			continue;
		}

		let (Ok(line_no), Ok(column)) = (caps[3].parse::<u32>(), caps[4].parse::<u32>()) else {
			continue;
		};
		if let Ok(frame) = GeneratedPosition::new(url, line_no, column) {
			return Some(frame);
		}
	}

	None
}
