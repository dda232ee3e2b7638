// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribution results delivered to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::location::OriginalLocation;

/// How the inspected element relates to the component that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
	/// The element is the root DOM output of a component.
	Component,
	/// The element was rendered directly by the nearest composite ancestor.
	Element,
	/// The element is nested output from some further ancestor's render.
	Children,
}

/// The answer for one inspected element.
///
/// Produced fresh per query; never mutated afterwards. Absent fields are a
/// legitimate outcome ("no source known"), not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionResult {
	pub kind: ElementKind,
	/// Human-readable component name ("Anonymous" when nothing better exists).
	pub name: String,
	/// The element's own tag name, when the element is host output.
	pub element_tag: Option<String>,
	/// Where the element (or its component) is defined.
	pub source: Option<OriginalLocation>,
	/// Where the element is invoked, when that differs from `source`.
	pub call_site: Option<OriginalLocation>,
}
