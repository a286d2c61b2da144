// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: live feedback while dragging and the dismiss decision on release.
//!
//! A [`DragSession`] holds everything one gesture needs and nothing that
//! touches a surface, so the math here can be exercised directly. The
//! [`Drawer`](crate::Drawer) turns [`MoveFeedback`] into style writes and
//! [`DragOutcome`] into a close request or a snap-back.
//!
//! ## Sign convention
//!
//! The drawer rests at the bottom. `start_y - current_y` is positive when the
//! pointer moved up, i.e. tried to open the sheet further than fully open.
//! That direction gets rubber-band resistance and never dismisses. Moving down
//! fades the overlay, grows the root back toward full scale, and makes the
//! content follow the pointer 1:1.
//!
//! ## Release decision
//!
//! The first matching rule wins:
//!
//! 1. Pressed outside the grab band and never left the dead zone: [`DragOutcome::TapClose`].
//! 2. Net movement upward: [`DragOutcome::SnapBack`] with [`SnapBackReason::ForbiddenDirection`].
//! 3. Release speed above the velocity threshold: [`DragOutcome::FlickClose`].
//! 4. Dragged more than `close_threshold` of the visible content: [`DragOutcome::DistanceClose`].
//! 5. Otherwise: [`DragOutcome::SnapBack`] with [`SnapBackReason::BelowThreshold`].
//!
//! ```rust
//! use understory_drawer::config::DrawerConfig;
//! use understory_drawer::drag::{DragOutcome, DragSession, DragToken, PointerId, PointerSample};
//!
//! let config = DrawerConfig::default();
//! let down = PointerSample::new(PointerId(1), 0.0, 500.0, 1_000);
//! let mut session = DragSession::new(DragToken::new(0, PointerId(1)), &down, 400.0, false);
//!
//! // A quick 50px flick in 50ms is a dismiss even though it's far below 55%.
//! session.on_move(550.0, config.edge_scale());
//! let up = PointerSample::new(PointerId(1), 0.0, 550.0, 1_050);
//! let release = session.resolve(&up, 800.0, &config);
//! assert_eq!(release.outcome, DragOutcome::FlickClose);
//! assert_eq!(release.velocity, 1.0);
//! ```

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Rect};
use understory_inline_style::{StylePatch, StyleProperty, number, px};

use crate::config::DrawerConfig;
use crate::constants::{BORDER_RADIUS_PX, DEAD_ZONE_PX, HANDLE_SAFE_BAND_PX, ROOT_OFFSET_PX};
use crate::damping::overshoot_translate;

/// Identifies one pointer for the lifetime of a press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// A pointer position at a point in time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    /// Which pointer.
    pub pointer_id: PointerId,
    /// Position in viewport coordinates.
    pub position: Point,
    /// Host timestamp in milliseconds.
    pub time_ms: u64,
}

impl PointerSample {
    /// Creates a sample at `(x, y)`.
    #[must_use]
    pub fn new(pointer_id: PointerId, x: f64, y: f64, time_ms: u64) -> Self {
        Self {
            pointer_id,
            position: Point::new(x, y),
            time_ms,
        }
    }
}

/// Proof of holding the current drag session.
///
/// Only events carrying the token of the live session are allowed to write to
/// the drawer's surfaces; anything else is ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DragToken {
    generation: u64,
    pointer_id: PointerId,
}

impl DragToken {
    /// Creates a token for session number `generation`.
    #[must_use]
    pub const fn new(generation: u64, pointer_id: PointerId) -> Self {
        Self {
            generation,
            pointer_id,
        }
    }

    /// The pointer this session follows.
    #[must_use]
    pub const fn pointer_id(self) -> PointerId {
        self.pointer_id
    }

    /// Session number.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// Where a drawer's gesture handling currently stands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No gesture.
    #[default]
    Idle,
    /// Pointer is down; no movement seen yet.
    Armed,
    /// At least one move was processed.
    Moving,
}

/// Per-move visual response.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveFeedback {
    /// Pointer is above its start: only the content moves, with resistance.
    Overshoot {
        /// Content vertical translate in px (`<= 0`).
        content_translate: f64,
    },
    /// Pointer is at or below its start: the whole scene follows.
    Dismissing {
        /// Dragged distance as a fraction of content height.
        progress: f64,
        /// Overlay opacity.
        overlay_opacity: f64,
        /// Root scale.
        root_scale: f64,
        /// Root corner radius in px.
        root_radius: f64,
        /// Root vertical offset in px.
        root_offset: f64,
        /// Content vertical translate in px (`>= 0`).
        content_translate: f64,
    },
}

fn translate_y(y: f64) -> String {
    format!("translate3d(0, {}, 0)", px(y))
}

impl MoveFeedback {
    /// Writes for the content surface.
    #[must_use]
    pub fn content_patch(&self) -> StylePatch {
        let y = match *self {
            Self::Overshoot { content_translate } | Self::Dismissing { content_translate, .. } => {
                content_translate
            }
        };
        StylePatch::new().with(StyleProperty::Transform, translate_y(y))
    }

    /// Writes for the overlay, if this frame touches it.
    #[must_use]
    pub fn overlay_patch(&self) -> Option<StylePatch> {
        match *self {
            Self::Overshoot { .. } => None,
            Self::Dismissing {
                overlay_opacity, ..
            } => Some(StylePatch::new().with(StyleProperty::Opacity, number(overlay_opacity))),
        }
    }

    /// Writes for the root, if this frame touches it.
    #[must_use]
    pub fn root_patch(&self) -> Option<StylePatch> {
        match *self {
            Self::Overshoot { .. } => None,
            Self::Dismissing {
                root_scale,
                root_radius,
                root_offset,
                ..
            } => Some(
                StylePatch::new()
                    .with(StyleProperty::BorderRadius, px(root_radius))
                    .with(
                        StyleProperty::Transform,
                        format!("scale({}) {}", number(root_scale), translate_y(root_offset)),
                    ),
            ),
        }
    }
}

/// Why a release put everything back instead of closing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SnapBackReason {
    /// Net movement was toward "more open".
    ForbiddenDirection,
    /// Neither fast nor far enough.
    BelowThreshold,
}

/// Result of a finished gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragOutcome {
    /// Pressed outside the grab band without moving.
    TapClose,
    /// Released faster than the velocity threshold.
    FlickClose,
    /// Dragged past the close threshold.
    DistanceClose,
    /// Restore the pre-drag state.
    SnapBack(SnapBackReason),
    /// The release never arrived; the fallback restored the pre-drag state.
    Abandoned,
}

impl DragOutcome {
    /// Returns `true` if this outcome requests a close.
    #[must_use]
    pub const fn closes(self) -> bool {
        matches!(self, Self::TapClose | Self::FlickClose | Self::DistanceClose)
    }
}

/// Outcome plus the measurements it was based on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragRelease {
    /// The decision.
    pub outcome: DragOutcome,
    /// Release speed in px/ms.
    pub velocity: f64,
    /// `start_y - release_y`.
    pub distance: f64,
}

/// Returns `true` when a press at `y` lands above the grab band at the bottom
/// of `handle`, i.e. on the handle's tap-to-close area.
#[must_use]
pub fn clicked_outside_handle(handle: Rect, y: f64) -> bool {
    handle.y1 - HANDLE_SAFE_BAND_PX >= y
}

/// One active gesture.
#[derive(Clone, Debug)]
pub struct DragSession {
    token: DragToken,
    start_y: f64,
    start_time_ms: u64,
    content_height: f64,
    last_translate: f64,
    moved_past_dead_zone: bool,
    clicked_outside_handle: bool,
    phase: DragPhase,
}

impl DragSession {
    /// Starts a session from a pointer-down.
    ///
    /// `content_height` is measured once here; re-measuring mid-drag would make
    /// feedback and the release threshold disagree between frames.
    #[must_use]
    pub fn new(
        token: DragToken,
        down: &PointerSample,
        content_height: f64,
        clicked_outside_handle: bool,
    ) -> Self {
        Self {
            token,
            start_y: down.position.y,
            start_time_ms: down.time_ms,
            content_height,
            last_translate: 0.0,
            moved_past_dead_zone: false,
            clicked_outside_handle,
            phase: DragPhase::Armed,
        }
    }

    /// The session's token.
    #[must_use]
    pub fn token(&self) -> DragToken {
        self.token
    }

    /// `Armed` until the first move, `Moving` afterwards.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Pointer-down y coordinate.
    #[must_use]
    pub fn start_y(&self) -> f64 {
        self.start_y
    }

    /// Content height measured at pointer-down.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Most recent downward content translate, in px.
    #[must_use]
    pub fn last_translate(&self) -> f64 {
        self.last_translate
    }

    /// Whether movement ever exceeded the dead zone.
    #[must_use]
    pub fn moved_past_dead_zone(&self) -> bool {
        self.moved_past_dead_zone
    }

    /// Whether the press landed outside the grab band.
    #[must_use]
    pub fn clicked_outside_handle(&self) -> bool {
        self.clicked_outside_handle
    }

    /// Processes a move to `y` and returns the visual response.
    pub fn on_move(&mut self, y: f64, edge_scale: f64) -> MoveFeedback {
        self.phase = DragPhase::Moving;
        let dragged = self.start_y - y;
        let abs_dragged = dragged.abs();

        if abs_dragged > DEAD_ZONE_PX {
            self.moved_past_dead_zone = true;
        }

        if dragged > 0.0 {
            return MoveFeedback::Overshoot {
                content_translate: overshoot_translate(dragged),
            };
        }

        let progress = if self.content_height > 0.0 {
            abs_dragged / self.content_height
        } else {
            0.0
        };
        self.last_translate = abs_dragged;

        MoveFeedback::Dismissing {
            progress,
            overlay_opacity: (1.0 - progress).max(0.0),
            root_scale: (edge_scale + progress * (1.0 - edge_scale)).min(1.0),
            root_radius: (BORDER_RADIUS_PX - progress * BORDER_RADIUS_PX).max(0.0),
            root_offset: (ROOT_OFFSET_PX - progress * ROOT_OFFSET_PX).max(0.0),
            content_translate: abs_dragged,
        }
    }

    /// Decides what a release at `up` means.
    ///
    /// `viewport_height` caps the content height used for the distance rule,
    /// so content taller than the viewport uses only its visible part.
    #[must_use]
    pub fn resolve(
        &self,
        up: &PointerSample,
        viewport_height: f64,
        config: &DrawerConfig,
    ) -> DragRelease {
        let distance = self.start_y - up.position.y;
        let elapsed = up.time_ms.saturating_sub(self.start_time_ms) as f64;
        // Zero elapsed time follows IEEE rules: any movement is infinitely fast.
        let velocity = distance.abs() / elapsed;

        let outcome = if self.clicked_outside_handle && !self.moved_past_dead_zone {
            DragOutcome::TapClose
        } else if distance > 0.0 {
            DragOutcome::SnapBack(SnapBackReason::ForbiddenDirection)
        } else if velocity > config.velocity_threshold() {
            DragOutcome::FlickClose
        } else {
            let visible = self.content_height.min(viewport_height);
            let ratio = if visible > 0.0 {
                self.last_translate / visible
            } else {
                0.0
            };
            if ratio > config.close_threshold() {
                DragOutcome::DistanceClose
            } else {
                DragOutcome::SnapBack(SnapBackReason::BelowThreshold)
            }
        };

        DragRelease {
            outcome,
            velocity,
            distance,
        }
    }
}
