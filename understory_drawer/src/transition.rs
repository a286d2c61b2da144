// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Staged open/close transitions across root, overlay, and content.
//!
//! ## Phases
//!
//! `Closed → Opening → Open → Closing → Closed`. While `Opening` or `Closing`
//! the drawer is *running an animation* and every open-state change request is
//! suppressed; that guard is the only thing keeping two cycles from
//! interleaving, since staged timers are never cancelled.
//!
//! ## Timeline
//!
//! With `d` = animation delay:
//!
//! | At | Open cycle | Close cycle |
//! |----|------------|-------------|
//! | 0 | cycle starts | cycle starts |
//! | `d` | content marked visible, root shrinks | content marked hidden, close visuals |
//! | `500 + d` | pointer events back, phase `Open` | |
//! | `550 + d` | | root/body restored, `on_closed`, phase `Closed` |
//!
//! Stages fire from a [`TimerQueue`] advanced by the host; each stage carries
//! the cycle it was scheduled for and does nothing if that cycle is over.

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;

use understory_inline_style::{StylePatch, StyleProperty, StyleSnapshot, apply, number, px};
use understory_timing::TimerQueue;

use crate::config::DrawerConfig;
use crate::constants::{
    BASE_TRANSITION, BORDER_RADIUS_PX, CLOSE_SETTLE_SLACK_MS, ROOT_OFFSET_PX, TIMING_FUNCTION,
    TRANSITION_DURATION, TRANSITION_DURATION_MS,
};
use crate::surface::{DataAttribute, Surface, SurfaceKind, SurfaceSlots};

/// Where the drawer is in its open/close cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// Fully closed.
    #[default]
    Closed,
    /// Open requested; staged reveal in progress.
    Opening,
    /// Fully open and interactive.
    Open,
    /// Close requested; staged hide in progress.
    Closing,
}

impl TransitionPhase {
    /// Returns `true` for `Opening` and `Closing`.
    #[must_use]
    pub const fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

/// Lifecycle notifications, drained with [`Drawer::take_events`](crate::Drawer::take_events).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DrawerEvent {
    /// An open cycle began.
    OpenStarted,
    /// The open cycle settled.
    Opened,
    /// A close cycle began.
    CloseStarted,
    /// The close cycle finalized.
    Closed,
    /// `on_before_close` refused a close.
    CloseRejected,
    /// An open request arrived mid-animation and was ignored.
    OpenSuppressed,
    /// A close request arrived mid-animation and was ignored.
    CloseSuppressed,
}

/// Host callbacks around the close cycle.
#[derive(Default)]
pub struct DrawerHooks {
    on_closed: Option<Box<dyn FnMut()>>,
    on_before_close: Option<Box<dyn FnMut() -> bool>>,
}

impl fmt::Debug for DrawerHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerHooks")
            .field("on_closed", &self.on_closed.is_some())
            .field("on_before_close", &self.on_before_close.is_some())
            .finish()
    }
}

impl DrawerHooks {
    /// No callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once at the end of every close cycle.
    #[must_use]
    pub fn on_closed(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_closed = Some(Box::new(f));
        self
    }

    /// Consulted before committing a close; `false` aborts it.
    #[must_use]
    pub fn on_before_close(mut self, f: impl FnMut() -> bool + 'static) -> Self {
        self.on_before_close = Some(Box::new(f));
        self
    }

    pub(crate) fn may_close(&mut self) -> bool {
        self.on_before_close.as_mut().is_none_or(|guard| guard())
    }

    fn closed(&mut self) {
        if let Some(f) = self.on_closed.as_mut() {
            f();
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    OpenReveal,
    OpenSettle,
    CloseReveal,
    CloseFinalize,
}

/// Inline styles each surface had before the drawer first touched it.
#[derive(Clone, Debug, Default)]
pub(crate) struct BaseStyles {
    pub(crate) root: Option<StyleSnapshot>,
    pub(crate) overlay: Option<StyleSnapshot>,
    pub(crate) content: Option<StyleSnapshot>,
    pub(crate) body: Option<StyleSnapshot>,
}

impl BaseStyles {
    pub(crate) fn slot_mut(&mut self, kind: SurfaceKind) -> &mut Option<StyleSnapshot> {
        match kind {
            SurfaceKind::Root => &mut self.root,
            SurfaceKind::Overlay => &mut self.overlay,
            SurfaceKind::Content => &mut self.content,
            SurfaceKind::Body => &mut self.body,
        }
    }
}

/// Restores `kind` to its base snapshot, if both exist.
pub(crate) fn restore_base<S: Surface>(
    slots: &mut SurfaceSlots<S>,
    bases: &BaseStyles,
    kind: SurfaceKind,
) {
    let base = match kind {
        SurfaceKind::Root => bases.root.as_ref(),
        SurfaceKind::Overlay => bases.overlay.as_ref(),
        SurfaceKind::Content => bases.content.as_ref(),
        SurfaceKind::Body => bases.body.as_ref(),
    };
    if let Some(base) = base {
        apply(slots.get_mut(kind), base);
    }
}

fn set_visible<S: Surface>(slots: &mut SurfaceSlots<S>, visible: bool) {
    if let Some(content) = slots.get_mut(SurfaceKind::Content) {
        content.set_data(
            DataAttribute::Visible,
            if visible { "true" } else { "false" },
        );
    }
}

/// Root and content styles for the fully open state.
pub(crate) fn apply_open_animation<S: Surface>(slots: &mut SurfaceSlots<S>, config: &DrawerConfig) {
    apply(
        slots.get_mut(SurfaceKind::Content),
        &StylePatch::new().with(StyleProperty::PointerEvents, "none"),
    );

    let root = StylePatch::new()
        .with(StyleProperty::BorderRadius, px(BORDER_RADIUS_PX))
        .with(StyleProperty::Overflow, config.wrapper_overflow().as_str())
        .with(
            StyleProperty::Transform,
            format!(
                "scale({}) translate3d(0, calc(env(safe-area-inset-top) + {}), 0)",
                number(config.edge_scale()),
                px(ROOT_OFFSET_PX)
            ),
        )
        .with(StyleProperty::TransformOrigin, "top")
        .with(StyleProperty::TransitionProperty, "transform, border-radius")
        .with(StyleProperty::TransitionDuration, TRANSITION_DURATION)
        .with(StyleProperty::TransitionTimingFunction, TIMING_FUNCTION);
    apply(slots.get_mut(SurfaceKind::Root), &root);
}

/// Slides content fully off-screen.
pub(crate) fn apply_content_close_animation<S: Surface>(slots: &mut SurfaceSlots<S>) {
    apply(
        slots.get_mut(SurfaceKind::Content),
        &StylePatch::new()
            .with(StyleProperty::Transform, "translate3d(0, 100%, 0)")
            .with(StyleProperty::Transition, format!("transform {BASE_TRANSITION}")),
    );
}

/// Returns the root to its pre-open transform and radius.
pub(crate) fn apply_root_close_animation<S: Surface>(
    slots: &mut SurfaceSlots<S>,
    bases: &BaseStyles,
) {
    let base = bases.root.as_ref();
    let transform = base
        .and_then(|b| b.get(StyleProperty::Transform))
        .filter(|t| !t.is_empty())
        .unwrap_or("translate3d(0, 0, 0)");
    let radius = base
        .and_then(|b| b.get(StyleProperty::BorderRadius))
        .unwrap_or("");
    apply(
        slots.get_mut(SurfaceKind::Root),
        &StylePatch::new()
            .with(StyleProperty::Transform, transform)
            .with(StyleProperty::BorderRadius, radius)
            .with(
                StyleProperty::Transition,
                format!("transform {BASE_TRANSITION}, border-radius {BASE_TRANSITION}"),
            ),
    );
}

fn apply_close_animation<S: Surface>(slots: &mut SurfaceSlots<S>, bases: &BaseStyles) {
    apply_content_close_animation(slots);
    apply(
        slots.get_mut(SurfaceKind::Overlay),
        &StylePatch::new()
            .with(StyleProperty::Opacity, "0")
            .with(StyleProperty::Transition, format!("opacity {BASE_TRANSITION}")),
    );
    apply_root_close_animation(slots, bases);
}

/// Drives content back to its resting open position.
pub(crate) fn apply_reopen_animation<S: Surface>(slots: &mut SurfaceSlots<S>) {
    apply(
        slots.get_mut(SurfaceKind::Content),
        &StylePatch::new()
            .with(StyleProperty::Transform, "translate3d(0, 0, 0)")
            .with(StyleProperty::Transition, format!("transform {BASE_TRANSITION}")),
    );
}

/// Owns the phase, the staged timers, and the base snapshots.
#[derive(Debug, Default)]
pub(crate) struct Orchestrator {
    phase: TransitionPhase,
    cycle: u64,
    timers: TimerQueue<(u64, Stage)>,
    pub(crate) bases: BaseStyles,
    events: Vec<DrawerEvent>,
}

impl Orchestrator {
    /// Creates a closed orchestrator.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub(crate) fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// `true` while opening or closing.
    #[must_use]
    pub(crate) fn is_running_animation(&self) -> bool {
        self.phase.is_animating()
    }

    /// Resolves an open-state change request against the re-entrancy guard.
    ///
    /// Returns `current` while an animation is running, `next` otherwise.
    #[must_use]
    pub(crate) fn guard_open_change(&self, current: bool, next: bool) -> bool {
        if self.is_running_animation() {
            current
        } else {
            next
        }
    }

    /// Deadline of the next pending stage.
    #[must_use]
    pub(crate) fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Marks a drawer that starts out open.
    pub(crate) fn assume_open(&mut self) {
        self.phase = TransitionPhase::Open;
    }

    pub(crate) fn push_event(&mut self, event: DrawerEvent) {
        self.events.push(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<DrawerEvent> {
        core::mem::take(&mut self.events)
    }

    /// Starts an open cycle at `now`.
    pub(crate) fn begin_open<S: Surface>(
        &mut self,
        now: u64,
        slots: &mut SurfaceSlots<S>,
        config: &DrawerConfig,
    ) {
        self.cycle += 1;
        self.phase = TransitionPhase::Opening;
        // Leftovers from the previous close cycle.
        restore_base(slots, &self.bases, SurfaceKind::Content);
        restore_base(slots, &self.bases, SurfaceKind::Overlay);

        let delay = config.animation_delay_ms();
        self.timers
            .schedule_after(now, delay, (self.cycle, Stage::OpenReveal));
        self.timers.schedule_after(
            now,
            TRANSITION_DURATION_MS + delay,
            (self.cycle, Stage::OpenSettle),
        );
        self.events.push(DrawerEvent::OpenStarted);
        tracing::debug!(cycle = self.cycle, now, "drawer opening");
    }

    /// Starts a close cycle at `now`.
    pub(crate) fn begin_close(&mut self, now: u64, config: &DrawerConfig) {
        self.cycle += 1;
        self.phase = TransitionPhase::Closing;

        let delay = config.animation_delay_ms();
        self.timers
            .schedule_after(now, delay, (self.cycle, Stage::CloseReveal));
        self.timers.schedule_after(
            now,
            TRANSITION_DURATION_MS + CLOSE_SETTLE_SLACK_MS + delay,
            (self.cycle, Stage::CloseFinalize),
        );
        self.events.push(DrawerEvent::CloseStarted);
        tracing::debug!(cycle = self.cycle, now, "drawer closing");
    }

    /// Runs every stage due at `now`.
    pub(crate) fn advance<S: Surface>(
        &mut self,
        now: u64,
        slots: &mut SurfaceSlots<S>,
        config: &DrawerConfig,
        hooks: &mut DrawerHooks,
    ) {
        while let Some((_, (cycle, stage))) = self.timers.pop_due(now) {
            if cycle != self.cycle {
                tracing::debug!(cycle, current = self.cycle, ?stage, "stale drawer stage");
                continue;
            }
            self.run_stage(stage, slots, config, hooks);
        }
    }

    fn run_stage<S: Surface>(
        &mut self,
        stage: Stage,
        slots: &mut SurfaceSlots<S>,
        config: &DrawerConfig,
        hooks: &mut DrawerHooks,
    ) {
        tracing::trace!(cycle = self.cycle, ?stage, "drawer stage");
        match (stage, self.phase) {
            (Stage::OpenReveal, TransitionPhase::Opening) => {
                set_visible(slots, true);
                apply_open_animation(slots, config);
            }
            (Stage::OpenSettle, TransitionPhase::Opening) => {
                let interactive = StylePatch::new().with(StyleProperty::PointerEvents, "");
                apply(slots.get_mut(SurfaceKind::Content), &interactive);
                apply(slots.get_mut(SurfaceKind::Body), &interactive);
                self.phase = TransitionPhase::Open;
                self.events.push(DrawerEvent::Opened);
                tracing::debug!(cycle = self.cycle, "drawer open");
            }
            (Stage::CloseReveal, TransitionPhase::Closing) => {
                set_visible(slots, false);
                apply_close_animation(slots, &self.bases);
            }
            (Stage::CloseFinalize, TransitionPhase::Closing) => {
                self.phase = TransitionPhase::Closed;
                restore_base(slots, &self.bases, SurfaceKind::Root);
                restore_base(slots, &self.bases, SurfaceKind::Body);
                self.events.push(DrawerEvent::Closed);
                tracing::debug!(cycle = self.cycle, "drawer closed");
                hooks.closed();
            }
            (stage, phase) => {
                tracing::debug!(?stage, ?phase, "drawer stage out of phase");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessSurface;
    use alloc::rc::Rc;
    use core::cell::Cell;
    use kurbo::Rect;
    use understory_inline_style::{StyleTarget, capture};

    use crate::constants::MODIFIED_PROPERTIES;

    struct Scene {
        root: HeadlessSurface,
        overlay: HeadlessSurface,
        content: HeadlessSurface,
        slots: SurfaceSlots<HeadlessSurface>,
    }

    fn scene() -> Scene {
        let root = HeadlessSurface::new(Rect::new(0.0, 0.0, 390.0, 800.0));
        let overlay = HeadlessSurface::new(Rect::new(0.0, 0.0, 390.0, 800.0));
        let content = HeadlessSurface::new(Rect::new(0.0, 400.0, 390.0, 800.0));
        let slots = SurfaceSlots {
            root: Some(root.clone()),
            overlay: Some(overlay.clone()),
            content: Some(content.clone()),
            body: None,
        };
        Scene {
            root,
            overlay,
            content,
            slots,
        }
    }

    #[test]
    fn guard_keeps_current_value_while_animating() {
        let mut o = Orchestrator::new();
        assert!(o.guard_open_change(false, true));
        o.begin_close(0, &DrawerConfig::default());
        assert!(!o.guard_open_change(false, true));
        assert!(o.guard_open_change(true, false));
    }

    #[test]
    fn open_cycle_stages_on_schedule() {
        let mut s = scene();
        let config = DrawerConfig::builder().edge_scale(0.5).build().unwrap();
        let mut hooks = DrawerHooks::new();
        let mut o = Orchestrator::new();

        o.begin_open(1_000, &mut s.slots, &config);
        assert_eq!(o.phase(), TransitionPhase::Opening);
        assert_eq!(o.next_deadline(), Some(1_060));

        o.advance(1_059, &mut s.slots, &config, &mut hooks);
        assert_eq!(s.content.data(DataAttribute::Visible), None);

        o.advance(1_060, &mut s.slots, &config, &mut hooks);
        assert_eq!(s.content.data(DataAttribute::Visible).as_deref(), Some("true"));
        assert_eq!(s.content.style(StyleProperty::PointerEvents), "none");
        assert_eq!(
            s.root.style(StyleProperty::Transform),
            "scale(0.5) translate3d(0, calc(env(safe-area-inset-top) + 14px), 0)"
        );
        assert_eq!(s.root.style(StyleProperty::BorderRadius), "8px");
        assert_eq!(s.root.style(StyleProperty::TransformOrigin), "top");
        assert!(o.is_running_animation());

        o.advance(1_560, &mut s.slots, &config, &mut hooks);
        assert_eq!(o.phase(), TransitionPhase::Open);
        assert_eq!(s.content.style(StyleProperty::PointerEvents), "");
        assert_eq!(
            o.take_events(),
            [DrawerEvent::OpenStarted, DrawerEvent::Opened]
        );
    }

    #[test]
    fn close_cycle_finalizes_once_and_restores_root() {
        let mut s = scene();
        let config = DrawerConfig::default();
        let closed = Rc::new(Cell::new(0));
        let counter = closed.clone();
        let mut hooks = DrawerHooks::new().on_closed(move || counter.set(counter.get() + 1));
        let mut o = Orchestrator::new();

        s.root.clone().set_inline_style(StyleProperty::Transform, "none");
        o.bases.root = Some(capture(&s.root, MODIFIED_PROPERTIES));
        apply_open_animation(&mut s.slots, &config);

        o.begin_close(0, &config);
        o.advance(60, &mut s.slots, &config, &mut hooks);
        assert_eq!(s.content.data(DataAttribute::Visible).as_deref(), Some("false"));
        assert_eq!(
            s.content.style(StyleProperty::Transform),
            "translate3d(0, 100%, 0)"
        );
        assert_eq!(s.overlay.style(StyleProperty::Opacity), "0");
        assert_eq!(s.root.style(StyleProperty::Transform), "none");
        assert_eq!(closed.get(), 0);

        o.advance(609, &mut s.slots, &config, &mut hooks);
        assert!(o.is_running_animation());
        o.advance(610, &mut s.slots, &config, &mut hooks);
        assert_eq!(o.phase(), TransitionPhase::Closed);
        assert_eq!(closed.get(), 1);
        assert_eq!(s.root.style(StyleProperty::TransformOrigin), "");
        assert_eq!(s.root.style(StyleProperty::Transition), "");

        o.advance(10_000, &mut s.slots, &config, &mut hooks);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn stages_from_an_earlier_cycle_are_ignored() {
        let mut s = scene();
        let config = DrawerConfig::default();
        let mut hooks = DrawerHooks::new();
        let mut o = Orchestrator::new();

        o.begin_open(0, &mut s.slots, &config);
        // Force a second cycle without letting the first finish.
        o.begin_close(10, &config);
        o.advance(60, &mut s.slots, &config, &mut hooks);
        // The open reveal belonged to cycle 1 and must not mark content visible.
        assert_eq!(s.content.data(DataAttribute::Visible), None);
        o.advance(560, &mut s.slots, &config, &mut hooks);
        assert_eq!(o.phase(), TransitionPhase::Closing);
    }

    #[test]
    fn root_close_falls_back_to_identity_transform() {
        let mut s = scene();
        apply_root_close_animation(&mut s.slots, &BaseStyles::default());
        assert_eq!(
            s.root.style(StyleProperty::Transform),
            "translate3d(0, 0, 0)"
        );
        assert_eq!(
            s.root.style(StyleProperty::Transition),
            "transform 0.5s cubic-bezier(0.32,0.72,0,1), border-radius 0.5s cubic-bezier(0.32,0.72,0,1)"
        );
    }

    #[test]
    fn writes_to_unmounted_surfaces_are_ignored() {
        let mut slots = SurfaceSlots::<HeadlessSurface>::default();
        let config = DrawerConfig::default();
        let mut hooks = DrawerHooks::new();
        let mut o = Orchestrator::new();
        o.begin_open(0, &mut slots, &config);
        o.advance(1_000, &mut slots, &config, &mut hooks);
        assert_eq!(o.phase(), TransitionPhase::Open);
    }
}
