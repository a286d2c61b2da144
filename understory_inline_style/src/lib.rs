// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_inline_style --heading-base-level=0

//! Understory Inline Style: typed inline-style patches with snapshot and restore.
//!
//! Interactive surfaces often write inline styles for the duration of a gesture
//! or animation and must later put the element back exactly as it was. This
//! crate provides the pieces for that:
//!
//! - [`StyleProperty`]: the closed set of properties that may be written.
//! - [`PropertySet`]: a bitset selecting which properties to capture.
//! - [`StylePatch`]: an ordered, de-duplicated list of property writes.
//! - [`StyleSnapshot`]: an immutable capture of a target's current values.
//! - [`StyleTarget`]: the seam to whatever owns the real inline style
//!   (a DOM element, a retained-mode node, or [`InlineStyle`] in memory).
//!
//! ## Capture and restore
//!
//! ```rust
//! use understory_inline_style::{
//!     apply, capture, InlineStyle, PropertySet, StylePatch, StyleProperty, StyleTarget,
//! };
//!
//! let mut el = InlineStyle::new();
//! el.set_inline_style(StyleProperty::Opacity, "0.8");
//!
//! let before = capture(&el, PropertySet::OPACITY | PropertySet::TRANSITION);
//!
//! let dragging = StylePatch::new()
//!     .with(StyleProperty::Transition, "none")
//!     .with(StyleProperty::Opacity, "0.3");
//! apply(Some(&mut el), &dragging);
//! assert_eq!(el.inline_style(StyleProperty::Transition), "none");
//!
//! // Restoring writes the empty string for properties that were unset,
//! // which clears them again.
//! apply(Some(&mut el), &before);
//! assert_eq!(el.inline_style(StyleProperty::Opacity), "0.8");
//! assert_eq!(el.inline_style(StyleProperty::Transition), "");
//! ```
//!
//! ## Absent targets
//!
//! [`apply`] takes an `Option` and does nothing for `None`. Surfaces can be
//! unmounted while a deferred write is still pending, and that write must be
//! harmless.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod inline;
mod patch;
mod property;

use alloc::format;
use alloc::string::String;

pub use inline::InlineStyle;
pub use patch::{StylePatch, StyleSnapshot};
pub use property::{PropertySet, StyleProperty};

/// Something that owns inline style declarations.
pub trait StyleTarget {
    /// Returns the current inline value of `property`, or `""` if unset.
    fn inline_style(&self, property: StyleProperty) -> String;

    /// Writes `value` to `property`; an empty string clears it.
    fn set_inline_style(&mut self, property: StyleProperty, value: &str);
}

/// Captures the current inline values of every property in `properties`.
///
/// The snapshot contains exactly those keys; unset properties are captured as
/// the empty string so that restoring clears them.
pub fn capture<T: StyleTarget + ?Sized>(target: &T, properties: PropertySet) -> StyleSnapshot {
    StyleSnapshot::from_patch(
        properties
            .properties()
            .map(|p| (p, target.inline_style(p)))
            .collect(),
    )
}

/// Writes every entry of `patch` onto `target`, if present.
///
/// Properties not named by the patch are left untouched.
pub fn apply<T: StyleTarget + ?Sized>(target: Option<&mut T>, patch: &StylePatch) {
    let Some(target) = target else {
        return;
    };
    for (property, value) in patch.iter() {
        target.set_inline_style(property, value);
    }
}

/// Formats a number the way script engines stringify it for style values.
///
/// Integral values have no fractional part, negative zero prints as `0`, and
/// infinities print as `Infinity`/`-Infinity`.
#[must_use]
pub fn number(value: f64) -> String {
    if value == 0.0 {
        String::from("0")
    } else if value.is_infinite() {
        String::from(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        format!("{value}")
    }
}

/// Formats a pixel length, e.g. `px(14.0) == "14px"`.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{}px", number(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_contains_exactly_requested_keys() {
        let mut el = InlineStyle::new();
        el.set_inline_style(StyleProperty::Opacity, "0.5");
        el.set_inline_style(StyleProperty::Overflow, "hidden");

        let snap = capture(&el, PropertySet::OPACITY | PropertySet::TRANSFORM);

        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get(StyleProperty::Opacity), Some("0.5"));
        assert_eq!(snap.get(StyleProperty::Transform), Some(""));
        assert!(!snap.contains(StyleProperty::Overflow));
    }

    #[test]
    fn apply_leaves_unnamed_properties_alone() {
        let mut el = InlineStyle::new();
        el.set_inline_style(StyleProperty::Overflow, "clip");

        apply(
            Some(&mut el),
            &StylePatch::new().with(StyleProperty::Opacity, "0"),
        );

        assert_eq!(el.inline_style(StyleProperty::Overflow), "clip");
        assert_eq!(el.inline_style(StyleProperty::Opacity), "0");
    }

    #[test]
    fn apply_to_absent_target_is_a_no_op() {
        let patch = StylePatch::new().with(StyleProperty::Opacity, "0");
        apply::<InlineStyle>(None, &patch);
    }

    #[test]
    fn numbers_format_like_script_engines() {
        assert_eq!(number(14.0), "14");
        assert_eq!(number(0.5), "0.5");
        assert_eq!(number(-0.0), "0");
        assert_eq!(number(-3.25), "-3.25");
        assert_eq!(number(f64::INFINITY), "Infinity");
        assert_eq!(px(7.5), "7.5px");
        assert_eq!(px(0.0), "0px");
    }
}
