// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing, geometry, and threshold constants.
//!
//! Staged phases are driven by these fixed durations rather than by
//! animation-end notifications, so tests can advance time by exactly these
//! amounts.

use understory_inline_style::PropertySet;

/// Duration of every drawer transition, in milliseconds.
pub const TRANSITION_DURATION_MS: u64 = 500;

/// Extra time the close cycle waits past [`TRANSITION_DURATION_MS`] before
/// finalizing.
pub const CLOSE_SETTLE_SLACK_MS: u64 = 50;

/// CSS form of [`TRANSITION_DURATION_MS`].
pub const TRANSITION_DURATION: &str = "0.5s";

/// Easing shared by every drawer transition.
pub const TIMING_FUNCTION: &str = "cubic-bezier(0.32,0.72,0,1)";

/// `duration timing-function`, for use in `transition` shorthands.
pub const BASE_TRANSITION: &str = "0.5s cubic-bezier(0.32,0.72,0,1)";

/// Release speed (px/ms) above which a drag always dismisses.
pub const VELOCITY_THRESHOLD: f64 = 0.4;

/// Default fraction of the visible content that must be dragged to dismiss.
pub const CLOSE_THRESHOLD: f64 = 0.55;

/// Default stagger before a transition's visual stage starts, in milliseconds.
pub const ANIMATION_DELAY_MS: u64 = 60;

/// Corner radius of the root while the drawer is open, in pixels.
pub const BORDER_RADIUS_PX: f64 = 8.0;

/// Vertical offset of the root while the drawer is open, in pixels.
pub const ROOT_OFFSET_PX: f64 = 14.0;

/// Vertical offset used by nested drawers, in pixels.
pub const NESTED_DISPLACEMENT_PX: f64 = 16.0;

/// Horizontal inset used to derive the open-state root scale, in pixels.
pub const WINDOW_TOP_OFFSET_PX: f64 = 26.0;

/// Band at the bottom of the drag handle that counts as a grab, in pixels.
pub const HANDLE_SAFE_BAND_PX: f64 = 15.0;

/// Movement below which a gesture is still a tap, in pixels.
pub const DEAD_ZONE_PX: f64 = 4.0;

/// Every property the drawer may write on root, overlay, and content.
pub const MODIFIED_PROPERTIES: PropertySet = PropertySet::WILL_CHANGE
    .union(PropertySet::POINTER_EVENTS)
    .union(PropertySet::BORDER_RADIUS)
    .union(PropertySet::OVERFLOW)
    .union(PropertySet::OPACITY)
    .union(PropertySet::TRANSITION)
    .union(PropertySet::TRANSFORM)
    .union(PropertySet::TRANSFORM_ORIGIN)
    .union(PropertySet::TRANSITION_PROPERTY)
    .union(PropertySet::TRANSITION_DURATION)
    .union(PropertySet::TRANSITION_TIMING_FUNCTION);

/// Properties the drawer may write on the document body.
pub const BODY_PROPERTIES: PropertySet = PropertySet::POINTER_EVENTS.union(PropertySet::OVERFLOW);
