// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style patches and captured snapshots.

use alloc::string::String;
use core::ops::Deref;

use smallvec::SmallVec;

use crate::StyleProperty;

/// An ordered set of inline style writes.
///
/// Entries are kept sorted by [`StyleProperty`] and each property appears at
/// most once; setting a property twice keeps the last value. An empty string
/// value clears the property back to its stylesheet-derived default when
/// applied.
///
/// ```rust
/// use understory_inline_style::{StylePatch, StyleProperty};
///
/// let patch = StylePatch::new()
///     .with(StyleProperty::Transition, "none")
///     .with(StyleProperty::PointerEvents, "none")
///     .with(StyleProperty::Transition, "");
///
/// assert_eq!(patch.len(), 2);
/// assert_eq!(patch.get(StyleProperty::Transition), Some(""));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StylePatch {
    entries: SmallVec<[(StyleProperty, String); 4]>,
}

impl StylePatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `property` to `value`, replacing any previous value.
    pub fn set(&mut self, property: StyleProperty, value: impl Into<String>) {
        let value = value.into();
        match self.entries.binary_search_by_key(&property, |(p, _)| *p) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (property, value)),
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Returns the value this patch writes for `property`.
    #[must_use]
    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.entries
            .binary_search_by_key(&property, |(p, _)| *p)
            .ok()
            .map(|idx| self.entries[idx].1.as_str())
    }

    /// Returns `true` if this patch writes `property`.
    #[must_use]
    pub fn contains(&self, property: StyleProperty) -> bool {
        self.get(property).is_some()
    }

    /// Overlays `other` onto `self`; values in `other` win.
    pub fn merge(&mut self, other: &Self) {
        for (p, v) in other.iter() {
            self.set(p, v);
        }
    }

    /// Iterates `(property, value)` pairs in property order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &str)> + '_ {
        self.entries.iter().map(|(p, v)| (*p, v.as_str()))
    }

    /// Number of properties written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the patch writes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Into<String>> FromIterator<(StyleProperty, V)> for StylePatch {
    fn from_iter<I: IntoIterator<Item = (StyleProperty, V)>>(iter: I) -> Self {
        let mut patch = Self::new();
        for (p, v) in iter {
            patch.set(p, v);
        }
        patch
    }
}

/// Inline style values captured from one target.
///
/// Produced only by [`capture`](crate::capture). A snapshot is immutable; it
/// dereferences to the [`StylePatch`] that restores the captured state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSnapshot(StylePatch);

impl StyleSnapshot {
    pub(crate) fn from_patch(patch: StylePatch) -> Self {
        Self(patch)
    }

    /// The restoring patch.
    #[must_use]
    pub fn as_patch(&self) -> &StylePatch {
        &self.0
    }
}

impl Deref for StyleSnapshot {
    type Target = StylePatch;

    fn deref(&self) -> &StylePatch {
        &self.0
    }
}
