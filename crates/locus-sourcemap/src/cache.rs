// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bounded cache of mapping tables, keyed by generated-file URL.
//!
//! Entries memoize the retrieval itself, not just its result: the cell is
//! inserted before the fetch runs, so concurrent resolutions of one URL
//! share a single underlying retrieval. Eviction is by insertion order —
//! oldest inserted key first, independent of access recency.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;
use tracing::trace;

use crate::map::SourceMap;

/// A memoized retrieval slot. `None` inside the cell means the map was
/// looked for and is unavailable; that outcome is cached too.
pub(crate) type MapSlot = Arc<OnceCell<Option<Arc<SourceMap>>>>;

struct Inner {
	entries: HashMap<String, MapSlot>,
	order: VecDeque<String>,
}

/// Insertion-order-bounded cache of mapping tables.
pub struct MapCache {
	capacity: usize,
	inner: Mutex<Inner>,
}

impl MapCache {
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			inner: Mutex::new(Inner {
				entries: HashMap::new(),
				order: VecDeque::new(),
			}),
		}
	}

	/// Returns the slot for `url`, inserting (and possibly evicting) first.
	///
	/// The lock is never held across an await; callers fetch through the
	/// returned slot after this releases.
	pub(crate) fn slot(&self, url: &str) -> MapSlot {
		let mut inner = self.inner.lock().expect("map cache lock poisoned");

		if let Some(slot) = inner.entries.get(url) {
			trace!(url, "source map cache hit");
			return Arc::clone(slot);
		}

		if inner.entries.len() >= self.capacity {
			if let Some(oldest) = inner.order.pop_front() {
				trace!(url = %oldest, "evicting oldest source map entry");
				inner.entries.remove(&oldest);
			}
		}

		trace!(url, "source map cache miss");
		let slot: MapSlot = Arc::new(OnceCell::new());
		inner.entries.insert(url.to_string(), Arc::clone(&slot));
		inner.order.push_back(url.to_string());
		slot
	}

	pub fn len(&self) -> usize {
		self.inner
			.lock()
			.expect("map cache lock poisoned")
			.entries
			.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_url_returns_the_same_slot() {
		let cache = MapCache::new(4);
		let a = cache.slot("https://app.example/a.js");
		let b = cache.slot("https://app.example/a.js");
		assert!(Arc::ptr_eq(&a, &b));
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn eviction_removes_the_oldest_inserted_key() {
		let cache = MapCache::new(2);
		let a = cache.slot("a");
		cache.slot("b");

		// Re-reading "a" must not refresh its age
		cache.slot("a");
		cache.slot("c");

		assert_eq!(cache.len(), 2);
		let a_again = cache.slot("a");
		assert!(!Arc::ptr_eq(&a, &a_again), "oldest entry should be gone");
	}

	#[test]
	fn entries_within_the_bound_survive() {
		let cache = MapCache::new(2);
		cache.slot("a");
		let b = cache.slot("b");
		cache.slot("c"); // evicts "a"

		let b_again = cache.slot("b");
		assert!(Arc::ptr_eq(&b, &b_again));
	}
}
