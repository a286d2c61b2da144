// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawer controller: surface binding, drag routing, and open/close requests.

use alloc::vec::Vec;

use understory_inline_style::{PropertySet, StylePatch, StyleProperty, StyleSnapshot, apply, capture};

use crate::config::{DialogOptions, DrawerConfig};
use crate::constants::{BODY_PROPERTIES, MODIFIED_PROPERTIES};
use crate::dialog::OpenState;
use crate::drag::{
    DragOutcome, DragPhase, DragRelease, DragSession, DragToken, MoveFeedback, PointerSample,
    clicked_outside_handle,
};
use crate::surface::{DataAttribute, Surface, SurfaceKind, SurfaceSlots};
use crate::transition::{
    DrawerEvent, DrawerHooks, Orchestrator, TransitionPhase, apply_content_close_animation,
    apply_reopen_animation, apply_root_close_animation, restore_base,
};

/// Why a close was attempted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CloseCause {
    Request,
    Drag(DragOutcome),
}

/// What happened to a close attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CloseAttempt {
    Started,
    AlreadyClosed,
    Suppressed,
    Rejected,
}

/// Inline styles captured at pointer-down.
#[derive(Debug)]
struct DragSnapshots {
    root: StyleSnapshot,
    overlay: StyleSnapshot,
    content: StyleSnapshot,
    body: Option<StyleSnapshot>,
}

#[derive(Debug)]
struct ActiveDrag {
    session: DragSession,
    snapshots: DragSnapshots,
}

/// A bottom-sheet drawer bound to host surfaces.
///
/// The drawer never reads a clock. Every time-dependent entry point takes the
/// host's current time in milliseconds; pointer samples carry their own.
/// Staged transitions only progress when the host calls [`advance`](Self::advance).
///
/// At most one drag session is active at a time. Pointer entry points take the
/// [`DragToken`] returned by [`pointer_down`](Self::pointer_down) and ignore
/// calls with any other token.
pub struct Drawer<S, D> {
    config: DrawerConfig,
    dialog: D,
    slots: SurfaceSlots<S>,
    handle: Option<S>,
    orchestrator: Orchestrator,
    hooks: DrawerHooks,
    drag: Option<ActiveDrag>,
    next_generation: u64,
    microtasks: Vec<DragToken>,
}

impl<S: core::fmt::Debug, D: core::fmt::Debug> core::fmt::Debug for Drawer<S, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Drawer")
            .field("config", &self.config)
            .field("dialog", &self.dialog)
            .field("slots", &self.slots)
            .field("handle", &self.handle)
            .field("phase", &self.orchestrator.phase())
            .field("hooks", &self.hooks)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl<S: Surface, D: OpenState> Drawer<S, D> {
    /// Creates an unbound drawer.
    pub fn new(config: DrawerConfig, dialog: D) -> Self {
        let phase = if dialog.is_open() {
            TransitionPhase::Open
        } else {
            TransitionPhase::Closed
        };
        let mut orchestrator = Orchestrator::new();
        if phase == TransitionPhase::Open {
            orchestrator.assume_open();
        }
        Self {
            config,
            dialog,
            slots: SurfaceSlots::default(),
            handle: None,
            orchestrator,
            hooks: DrawerHooks::default(),
            drag: None,
            next_generation: 0,
            microtasks: Vec::new(),
        }
    }

    /// Replaces the host callbacks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: DrawerHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replaces the host callbacks in place.
    pub fn set_hooks(&mut self, hooks: DrawerHooks) {
        self.hooks = hooks;
    }

    /// The drawer's configuration.
    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// Options the host's dialog primitive should be created with.
    pub fn dialog_options(&self) -> DialogOptions {
        self.config.dialog_options()
    }

    /// The open-state owner.
    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    /// Whether the dialog currently reports open.
    pub fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    /// Current transition phase.
    pub fn phase(&self) -> TransitionPhase {
        self.orchestrator.phase()
    }

    /// `true` while an open or close animation is in flight.
    pub fn is_running_animation(&self) -> bool {
        self.orchestrator.is_running_animation()
    }

    /// Phase of the active drag session, or `Idle`.
    pub fn drag_phase(&self) -> DragPhase {
        self.drag
            .as_ref()
            .map_or(DragPhase::Idle, |d| d.session.phase())
    }

    /// The active drag session.
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref().map(|d| &d.session)
    }

    /// Bound surfaces.
    pub fn surfaces(&self) -> &SurfaceSlots<S> {
        &self.slots
    }

    /// Time at which [`advance`](Self::advance) next has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.orchestrator.next_deadline()
    }

    /// Drains lifecycle events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<DrawerEvent> {
        self.orchestrator.take_events()
    }

    // --- binding ---

    fn bind(&mut self, kind: SurfaceKind, mut surface: S, properties: PropertySet) -> Option<S> {
        let previous = self.unbind(kind);
        *self.orchestrator.bases.slot_mut(kind) = Some(capture(&surface, properties));
        match kind {
            SurfaceKind::Root => surface.set_data(DataAttribute::Wrapper, ""),
            SurfaceKind::Overlay => surface.set_data(DataAttribute::Overlay, ""),
            SurfaceKind::Content => {
                surface.set_data(DataAttribute::Content, "");
                surface.set_data(DataAttribute::Direction, self.config.direction().as_str());
                let visible = self.orchestrator.phase() == TransitionPhase::Open;
                surface.set_data(
                    DataAttribute::Visible,
                    if visible { "true" } else { "false" },
                );
            }
            SurfaceKind::Body => {}
        }
        *self.slots.slot_mut(kind) = Some(surface);
        tracing::trace!(?kind, "surface bound");
        previous
    }

    fn unbind(&mut self, kind: SurfaceKind) -> Option<S> {
        if matches!(kind, SurfaceKind::Root | SurfaceKind::Body) {
            restore_base(&mut self.slots, &self.orchestrator.bases, kind);
        }
        *self.orchestrator.bases.slot_mut(kind) = None;
        let surface = self.slots.slot_mut(kind).take();
        if surface.is_some() {
            tracing::trace!(?kind, "surface unbound");
        }
        surface
    }

    /// Mounts the root container, returning any previously bound root.
    ///
    /// The root's current inline styles become its base: they are restored when
    /// a close cycle finalizes and when the root is unbound.
    pub fn bind_root(&mut self, root: S) -> Option<S> {
        self.bind(SurfaceKind::Root, root, MODIFIED_PROPERTIES)
    }

    /// Unmounts the root container, restoring its base styles.
    pub fn unbind_root(&mut self) -> Option<S> {
        self.unbind(SurfaceKind::Root)
    }

    /// Mounts the overlay.
    pub fn bind_overlay(&mut self, overlay: S) -> Option<S> {
        self.bind(SurfaceKind::Overlay, overlay, MODIFIED_PROPERTIES)
    }

    /// Unmounts the overlay.
    pub fn unbind_overlay(&mut self) -> Option<S> {
        self.unbind(SurfaceKind::Overlay)
    }

    /// Mounts the content panel.
    pub fn bind_content(&mut self, content: S) -> Option<S> {
        self.bind(SurfaceKind::Content, content, MODIFIED_PROPERTIES)
    }

    /// Unmounts the content panel.
    pub fn unbind_content(&mut self) -> Option<S> {
        self.unbind(SurfaceKind::Content)
    }

    /// Mounts the document body used for scroll and pointer locking.
    pub fn bind_body(&mut self, body: S) -> Option<S> {
        self.bind(SurfaceKind::Body, body, BODY_PROPERTIES)
    }

    /// Unmounts the body, restoring its base styles.
    pub fn unbind_body(&mut self) -> Option<S> {
        self.unbind(SurfaceKind::Body)
    }

    /// Mounts the drag handle.
    pub fn bind_drag_handle(&mut self, mut handle: S) -> Option<S> {
        let previous = self.unbind_drag_handle();
        handle.set_data(DataAttribute::DragHandle, "");
        self.handle = Some(handle);
        previous
    }

    /// Unmounts the drag handle, abandoning any drag it owns.
    pub fn unbind_drag_handle(&mut self) -> Option<S> {
        if let Some(token) = self.drag.as_ref().map(|d| d.session.token()) {
            self.abandon(token);
        }
        self.handle.take()
    }

    // --- open / close ---

    /// Asks for the drawer to open at `now`.
    ///
    /// Returns `true` if an open cycle started.
    pub fn open(&mut self, now: u64) -> bool {
        self.try_open(now)
    }

    /// Asks for the drawer to close at `now`.
    ///
    /// Returns `true` if a close cycle started. A close refused by
    /// `on_before_close` slides the content back to rest.
    pub fn close(&mut self, now: u64) -> bool {
        match self.try_close(now, CloseCause::Request) {
            CloseAttempt::Started => true,
            CloseAttempt::Rejected => {
                apply_reopen_animation(&mut self.slots);
                false
            }
            CloseAttempt::AlreadyClosed | CloseAttempt::Suppressed => false,
        }
    }

    /// Routes an open-state change request from the dialog layer.
    ///
    /// Returns the open state after the request.
    pub fn request_open_change(&mut self, next: bool, now: u64) -> bool {
        if next {
            self.open(now);
        } else {
            self.close(now);
        }
        self.dialog.is_open()
    }

    /// Applies the re-entrancy guard to a change from `current` to `next`.
    ///
    /// Returns `false`, and records the suppression, if the request must be
    /// ignored.
    fn admit_open_change(&mut self, current: bool, next: bool) -> bool {
        if self.orchestrator.guard_open_change(current, next) == next {
            return true;
        }
        tracing::debug!(next, phase = ?self.orchestrator.phase(), "open change suppressed");
        self.orchestrator.push_event(if next {
            DrawerEvent::OpenSuppressed
        } else {
            DrawerEvent::CloseSuppressed
        });
        false
    }

    /// Abandons any live drag so a starting cycle is the only writer.
    fn end_drag_for_cycle(&mut self) {
        if let Some(token) = self.drag.as_ref().map(|d| d.session.token()) {
            self.abandon(token);
        }
    }

    fn try_open(&mut self, now: u64) -> bool {
        if self.dialog.is_open() || !self.admit_open_change(false, true) {
            return false;
        }
        self.end_drag_for_cycle();

        apply(
            self.slots.get_mut(SurfaceKind::Body),
            &StylePatch::new()
                .with(StyleProperty::Overflow, "hidden")
                .with(StyleProperty::PointerEvents, "none"),
        );
        self.dialog.set_open(true);
        self.orchestrator
            .begin_open(now, &mut self.slots, &self.config);
        true
    }

    fn try_close(&mut self, now: u64, cause: CloseCause) -> CloseAttempt {
        if !self.dialog.is_open() {
            return CloseAttempt::AlreadyClosed;
        }
        if !self.admit_open_change(true, false) {
            return CloseAttempt::Suppressed;
        }
        if !self.hooks.may_close() {
            tracing::debug!(?cause, "close rejected");
            self.orchestrator.push_event(DrawerEvent::CloseRejected);
            return CloseAttempt::Rejected;
        }
        if cause == CloseCause::Request {
            self.end_drag_for_cycle();
        }

        if cause == CloseCause::Drag(DragOutcome::FlickClose) {
            apply_content_close_animation(&mut self.slots);
            apply_root_close_animation(&mut self.slots, &self.orchestrator.bases);
        }
        self.dialog.set_open(false);
        self.orchestrator.begin_close(now, &self.config);
        CloseAttempt::Started
    }

    // --- pointer input ---

    /// Starts a drag on the handle.
    ///
    /// `direct_hit` is `true` when the press landed on the handle itself rather
    /// than a descendant. Returns `None` while another session is active, while
    /// an open or close cycle is running, when no handle is bound, or when
    /// root, overlay, or content is missing.
    pub fn pointer_down(&mut self, down: PointerSample, direct_hit: bool) -> Option<DragToken> {
        if self.drag.is_some()
            || self.orchestrator.is_running_animation()
            || !self.slots.is_complete()
        {
            return None;
        }
        let handle = self.handle.as_mut()?;
        handle.set_pointer_capture(down.pointer_id);
        let handle_rect = handle.bounding_rect();

        let content_height = self
            .slots
            .get(SurfaceKind::Content)
            .map_or(0.0, |c| c.bounding_rect().height());
        let snapshots = DragSnapshots {
            root: self.snapshot(SurfaceKind::Root, MODIFIED_PROPERTIES),
            overlay: self.snapshot(SurfaceKind::Overlay, MODIFIED_PROPERTIES),
            content: self.snapshot(SurfaceKind::Content, MODIFIED_PROPERTIES),
            body: self
                .slots
                .get(SurfaceKind::Body)
                .map(|b| capture(b, PropertySet::POINTER_EVENTS)),
        };

        let active = StylePatch::new()
            .with(StyleProperty::Transition, "none")
            .with(StyleProperty::PointerEvents, "none");
        for kind in [SurfaceKind::Content, SurfaceKind::Overlay, SurfaceKind::Root] {
            apply(self.slots.get_mut(kind), &active);
        }
        apply(
            self.slots.get_mut(SurfaceKind::Body),
            &StylePatch::new().with(StyleProperty::PointerEvents, "none"),
        );

        self.next_generation += 1;
        let token = DragToken::new(self.next_generation, down.pointer_id);
        let outside = direct_hit && clicked_outside_handle(handle_rect, down.position.y);
        self.drag = Some(ActiveDrag {
            session: DragSession::new(token, &down, content_height, outside),
            snapshots,
        });
        tracing::debug!(
            generation = token.generation(),
            y = down.position.y,
            content_height,
            outside,
            "drag started"
        );
        Some(token)
    }

    fn snapshot(&self, kind: SurfaceKind, properties: PropertySet) -> StyleSnapshot {
        self.slots
            .get(kind)
            .map(|s| capture(s, properties))
            .unwrap_or_default()
    }

    fn active_mut(&mut self, token: DragToken) -> Option<&mut ActiveDrag> {
        self.drag.as_mut().filter(|d| d.session.token() == token)
    }

    /// Feeds a pointer move into the session owning `token`.
    pub fn pointer_move(&mut self, token: DragToken, sample: PointerSample) -> Option<MoveFeedback> {
        if sample.pointer_id != token.pointer_id() {
            return None;
        }
        let edge_scale = self.config.edge_scale();
        let feedback = self
            .active_mut(token)?
            .session
            .on_move(sample.position.y, edge_scale);

        apply(self.slots.get_mut(SurfaceKind::Content), &feedback.content_patch());
        if let Some(patch) = feedback.overlay_patch() {
            apply(self.slots.get_mut(SurfaceKind::Overlay), &patch);
        }
        if let Some(patch) = feedback.root_patch() {
            apply(self.slots.get_mut(SurfaceKind::Root), &patch);
        }
        tracing::trace!(y = sample.position.y, ?feedback, "drag move");
        Some(feedback)
    }

    /// Ends the session owning `token` with a release at `up`.
    ///
    /// `viewport_height` bounds the visible part of the content. A closing
    /// outcome starts the close cycle at `up.time_ms`; if the close is suppressed
    /// or refused, every surface returns to its pointer-down styles.
    pub fn pointer_up(
        &mut self,
        token: DragToken,
        up: PointerSample,
        viewport_height: f64,
    ) -> Option<DragRelease> {
        if up.pointer_id != token.pointer_id() {
            return None;
        }
        if self.active_mut(token).is_none() {
            return None;
        }
        let active = self.finish_session()?;
        let release = active
            .session
            .resolve(&up, viewport_height, &self.config);
        tracing::debug!(
            generation = token.generation(),
            outcome = ?release.outcome,
            velocity = release.velocity,
            distance = release.distance,
            "drag released"
        );

        if release.outcome.closes() {
            match self.try_close(up.time_ms, CloseCause::Drag(release.outcome)) {
                CloseAttempt::Started => {}
                CloseAttempt::Rejected => {
                    self.restore_drag(&active.snapshots);
                    apply_reopen_animation(&mut self.slots);
                }
                CloseAttempt::AlreadyClosed | CloseAttempt::Suppressed => {
                    self.restore_drag(&active.snapshots);
                }
            }
        } else {
            self.restore_drag(&active.snapshots);
        }
        Some(release)
    }

    /// Notes that the touch driving `token` ended.
    ///
    /// Queues a check for [`run_microtasks`](Self::run_microtasks): if no
    /// pointer-up has arrived for the session by then, it is abandoned.
    pub fn touch_end(&mut self, token: DragToken) {
        if self.active_mut(token).is_some() {
            self.microtasks.push(token);
        }
    }

    /// Runs queued end-of-touch checks.
    ///
    /// Returns how many sessions were abandoned.
    pub fn run_microtasks(&mut self) -> usize {
        let mut abandoned = 0;
        for token in core::mem::take(&mut self.microtasks) {
            if self.abandon(token) {
                abandoned += 1;
            }
        }
        abandoned
    }

    /// Drops the session owning `token` without a decision.
    fn abandon(&mut self, token: DragToken) -> bool {
        if self.active_mut(token).is_none() {
            return false;
        }
        let Some(active) = self.finish_session() else {
            return false;
        };
        tracing::debug!(
            generation = token.generation(),
            outcome = ?DragOutcome::Abandoned,
            "drag abandoned"
        );
        self.restore_drag(&active.snapshots);
        true
    }

    /// Takes the active session and releases its pointer capture.
    fn finish_session(&mut self) -> Option<ActiveDrag> {
        let active = self.drag.take()?;
        if let Some(handle) = self.handle.as_mut() {
            handle.release_pointer_capture(active.session.token().pointer_id());
        }
        Some(active)
    }

    fn restore_drag(&mut self, snapshots: &DragSnapshots) {
        apply(self.slots.get_mut(SurfaceKind::Root), &snapshots.root);
        apply(self.slots.get_mut(SurfaceKind::Overlay), &snapshots.overlay);
        apply(self.slots.get_mut(SurfaceKind::Content), &snapshots.content);
        if let Some(body) = snapshots.body.as_ref() {
            apply(self.slots.get_mut(SurfaceKind::Body), body);
        }
    }

    // --- time ---

    /// Runs queued microtasks, then every transition stage due at `now`.
    pub fn advance(&mut self, now: u64) {
        self.run_microtasks();
        self.orchestrator
            .advance(now, &mut self.slots, &self.config, &mut self.hooks);
    }
}
