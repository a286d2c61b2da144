// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capture/restore laws for `understory_inline_style`.
//!
//! Restoring a capture must put every captured property back exactly, no
//! matter what was written in between, and restoring twice must change
//! nothing further.

use understory_inline_style::{
    InlineStyle, PropertySet, StylePatch, StyleProperty, StyleTarget, apply, capture,
};

fn styled() -> InlineStyle {
    let mut el = InlineStyle::new();
    el.set_inline_style(StyleProperty::Transform, "scale(0.9)");
    el.set_inline_style(StyleProperty::BorderRadius, "8px");
    el.set_inline_style(StyleProperty::Overflow, "hidden");
    el
}

fn scribble() -> StylePatch {
    StyleProperty::ALL
        .into_iter()
        .map(|p| (p, "scribbled"))
        .collect()
}

#[test]
fn restore_after_arbitrary_writes_matches_baseline() {
    let subsets = [
        PropertySet::all(),
        PropertySet::empty(),
        PropertySet::TRANSFORM,
        PropertySet::OPACITY | PropertySet::POINTER_EVENTS,
        PropertySet::BORDER_RADIUS | PropertySet::OVERFLOW | PropertySet::TRANSITION,
    ];

    for props in subsets {
        let baseline = styled();
        let mut el = baseline.clone();

        let snap = capture(&el, props);
        apply(Some(&mut el), &scribble());
        apply(Some(&mut el), &snap);

        for p in props.properties() {
            assert_eq!(
                el.inline_style(p),
                baseline.inline_style(p),
                "{p} was not restored for {props:?}"
            );
        }
    }
}

#[test]
fn apply_of_own_capture_is_idempotent() {
    let mut el = styled();
    let before = el.clone();

    let snap = capture(&el, PropertySet::all());
    apply(Some(&mut el), &snap);
    assert_eq!(el, before);
    apply(Some(&mut el), &snap);
    assert_eq!(el, before);
}

#[test]
fn uncaptured_properties_keep_later_writes() {
    let mut el = styled();
    let snap = capture(&el, PropertySet::TRANSFORM);

    apply(Some(&mut el), &scribble());
    apply(Some(&mut el), &snap);

    assert_eq!(el.inline_style(StyleProperty::Transform), "scale(0.9)");
    assert_eq!(el.inline_style(StyleProperty::Opacity), "scribbled");
}
