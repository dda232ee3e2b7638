// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request coordination: only the most recently issued request per
//! interaction class may surface its result.
//!
//! Rapid pointer movement issues overlapping attribution requests whose
//! completions arrive in arbitrary order. Each request captures the
//! counter value at dispatch; a completion whose value no longer matches
//! the live counter is discarded unconditionally. In-flight work is never
//! cancelled — stale results compute to completion and are dropped, which
//! is the system's sole ordering guarantee.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

/// Interaction classes with independent sequence counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
	PointerMove,
	Click,
}

const INTERACTION_COUNT: usize = 2;

/// A request's claim on being the most recent of its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
	interaction: Interaction,
	sequence: u64,
}

impl Ticket {
	pub fn interaction(&self) -> Interaction {
		self.interaction
	}
}

/// Per-interaction monotonic counters.
#[derive(Debug, Default)]
pub struct RequestCoordinator {
	counters: [AtomicU64; INTERACTION_COUNT],
}

impl RequestCoordinator {
	pub fn new() -> Self {
		Self::default()
	}

	fn counter(&self, interaction: Interaction) -> &AtomicU64 {
		&self.counters[interaction as usize]
	}

	/// Registers a new request, superseding every earlier one of its class.
	pub fn begin(&self, interaction: Interaction) -> Ticket {
		let sequence = self.counter(interaction).fetch_add(1, Ordering::SeqCst) + 1;
		Ticket {
			interaction,
			sequence,
		}
	}

	/// Whether `ticket` still belongs to the most recently issued request.
	pub fn is_current(&self, ticket: &Ticket) -> bool {
		let current = self.counter(ticket.interaction).load(Ordering::SeqCst) == ticket.sequence;
		if !current {
			trace!(interaction = ?ticket.interaction, "discarding stale attribution result");
		}
		current
	}

	/// Invalidates every outstanding ticket, all classes.
	pub fn invalidate_all(&self) {
		for counter in &self.counters {
			counter.fetch_add(1, Ordering::SeqCst);
		}
	}
}
