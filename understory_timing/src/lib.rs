// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! UI code frequently needs "run this in N milliseconds" without owning an
//! event loop. [`TimerQueue`] stores payloads keyed by a deadline and hands
//! them back once the host reports that time has passed. The crate never
//! reads a clock: every call takes a host-supplied timestamp in milliseconds,
//! which keeps behavior deterministic and makes tests trivial to drive.
//!
//! ## Ordering
//!
//! - Earliest deadline fires first.
//! - Equal deadlines fire in the order they were scheduled.
//! - A timer is due when `deadline <= now`.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule_after(1_000, 60, "reveal");
//! timers.schedule_after(1_000, 560, "settle");
//!
//! assert_eq!(timers.next_deadline(), Some(1_060));
//! assert!(timers.pop_due(1_059).is_none());
//!
//! let (_, first) = timers.pop_due(1_060).unwrap();
//! assert_eq!(first, "reveal");
//!
//! // Advancing far past both deadlines still yields them one at a time.
//! let (_, second) = timers.pop_due(5_000).unwrap();
//! assert_eq!(second, "settle");
//! assert!(timers.is_empty());
//! ```
//!
//! ## Cancellation
//!
//! [`TimerQueue::schedule_at`] returns a [`TimerId`] that can be passed to
//! [`TimerQueue::cancel`]. Ids are never reused within one queue, so a stale
//! id can't cancel an unrelated timer.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Opaque handle for a scheduled timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    deadline: u64,
    id: TimerId,
    payload: T,
}

/// A deadline-ordered queue of pending payloads.
///
/// Entries are kept sorted by `(deadline, id)`; since ids grow monotonically
/// this gives FIFO order among equal deadlines.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedules `payload` to become due at `deadline` (milliseconds).
    pub fn schedule_at(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // Insert after every entry whose deadline is <= ours to keep FIFO ties.
        let idx = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(
            idx,
            Entry {
                deadline,
                id,
                payload,
            },
        );
        id
    }

    /// Schedules `payload` to become due `delay` milliseconds after `now`.
    pub fn schedule_after(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        self.schedule_at(now.saturating_add(delay), payload)
    }

    /// Removes a pending timer, returning its payload if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx).payload)
    }

    /// Returns `true` if `id` is still pending.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Pops the earliest timer if its deadline is `<= now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(TimerId, T)> {
        if self.entries.first()?.deadline > now {
            return None;
        }
        let entry = self.entries.remove(0);
        Some((entry.id, entry.payload))
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn empty_queue_has_no_deadline() {
        let mut q = TimerQueue::<u32>::new();
        assert!(q.is_empty());
        assert_eq!(q.next_deadline(), None);
        assert_eq!(q.pop_due(u64::MAX), None);
    }

    #[test]
    fn pops_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule_at(30, 'c');
        q.schedule_at(10, 'a');
        q.schedule_at(20, 'b');

        let mut out = Vec::new();
        while let Some((_, p)) = q.pop_due(100) {
            out.push(p);
        }
        assert_eq!(out, vec!['a', 'b', 'c']);
    }

    #[test]
    fn equal_deadlines_are_fifo() {
        let mut q = TimerQueue::new();
        q.schedule_at(10, 1);
        q.schedule_at(5, 0);
        q.schedule_at(10, 2);
        q.schedule_at(10, 3);

        let mut out = Vec::new();
        while let Some((_, p)) = q.pop_due(10) {
            out.push(p);
        }
        assert_eq!(out, vec![0, 1, 2, 3]);
    }

    #[test]
    fn timer_is_due_exactly_at_deadline() {
        let mut q = TimerQueue::new();
        q.schedule_after(100, 60, ());
        assert!(q.pop_due(159).is_none());
        assert!(q.pop_due(160).is_some());
    }

    #[test]
    fn cancel_removes_only_that_timer() {
        let mut q = TimerQueue::new();
        let a = q.schedule_at(10, "a");
        let b = q.schedule_at(10, "b");

        assert_eq!(q.cancel(a), Some("a"));
        assert_eq!(q.cancel(a), None);
        assert!(q.contains(b));
        assert_eq!(q.pop_due(10).map(|(_, p)| p), Some("b"));
    }

    #[test]
    fn ids_are_not_reused_after_firing() {
        let mut q = TimerQueue::new();
        let a = q.schedule_at(0, ());
        q.pop_due(0);
        let b = q.schedule_at(0, ());
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn schedule_after_saturates() {
        let mut q = TimerQueue::new();
        q.schedule_after(u64::MAX - 1, 10, ());
        assert_eq!(q.next_deadline(), Some(u64::MAX));
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        q.schedule_at(1, ());
        q.schedule_at(2, ());
        q.clear();
        assert_eq!(q.len(), 0);
        assert_eq!(q.next_deadline(), None);
    }
}
