// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the drawer and whatever renders it.
//!
//! A drawer coordinates three surfaces (root, overlay, content), an optional
//! document body, and one drag handle. Each is anything implementing
//! [`Surface`]: a DOM element wrapper, a retained-mode node, or
//! [`HeadlessSurface`](crate::headless::HeadlessSurface) for tests.

use kurbo::Rect;
use understory_inline_style::StyleTarget;

use crate::drag::PointerId;

/// Data attributes the drawer publishes on its surfaces for host styling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataAttribute {
    /// Marks the root (background) container.
    Wrapper,
    /// Marks the dimming overlay.
    Overlay,
    /// Marks the content panel.
    Content,
    /// Slide direction of the content panel (`"bottom"`).
    Direction,
    /// `"true"` while the content is revealed, `"false"` otherwise.
    Visible,
    /// Marks the drag handle.
    DragHandle,
}

impl DataAttribute {
    /// The attribute name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wrapper => "data-drawer-wrapper",
            Self::Overlay => "data-drawer-overlay",
            Self::Content => "data-drawer",
            Self::Direction => "data-drawer-direction",
            Self::Visible => "data-drawer-visible",
            Self::DragHandle => "data-drawer-handle",
        }
    }
}

/// A styleable, measurable element the drawer can drive.
pub trait Surface: StyleTarget {
    /// Sets a data attribute.
    fn set_data(&mut self, attribute: DataAttribute, value: &str);

    /// Current layout bounds in viewport coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Routes all further events for `pointer` to this surface.
    fn set_pointer_capture(&mut self, pointer: PointerId) {
        let _ = pointer;
    }

    /// Undoes [`set_pointer_capture`](Self::set_pointer_capture).
    fn release_pointer_capture(&mut self, pointer: PointerId) {
        let _ = pointer;
    }
}

/// Which drawer surface a slot holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Background container scaled while the drawer is open.
    Root,
    /// Dimming layer between root and content.
    Overlay,
    /// The sheet itself.
    Content,
    /// Document body, for scroll and pointer locking.
    Body,
}

/// The drawer's surface slots.
///
/// Slots are filled on mount and emptied on unmount. Operations borrow a slot
/// only for the duration of one call; a slot that is empty turns every write
/// aimed at it into a no-op.
#[derive(Debug)]
pub struct SurfaceSlots<S> {
    pub(crate) root: Option<S>,
    pub(crate) overlay: Option<S>,
    pub(crate) content: Option<S>,
    pub(crate) body: Option<S>,
}

impl<S> Default for SurfaceSlots<S> {
    fn default() -> Self {
        Self {
            root: None,
            overlay: None,
            content: None,
            body: None,
        }
    }
}

impl<S> SurfaceSlots<S> {
    /// Returns the surface in `kind`'s slot.
    #[must_use]
    pub fn get(&self, kind: SurfaceKind) -> Option<&S> {
        match kind {
            SurfaceKind::Root => self.root.as_ref(),
            SurfaceKind::Overlay => self.overlay.as_ref(),
            SurfaceKind::Content => self.content.as_ref(),
            SurfaceKind::Body => self.body.as_ref(),
        }
    }

    /// Mutable access to `kind`'s slot.
    pub fn get_mut(&mut self, kind: SurfaceKind) -> Option<&mut S> {
        match kind {
            SurfaceKind::Root => self.root.as_mut(),
            SurfaceKind::Overlay => self.overlay.as_mut(),
            SurfaceKind::Content => self.content.as_mut(),
            SurfaceKind::Body => self.body.as_mut(),
        }
    }

    pub(crate) fn slot_mut(&mut self, kind: SurfaceKind) -> &mut Option<S> {
        match kind {
            SurfaceKind::Root => &mut self.root,
            SurfaceKind::Overlay => &mut self.overlay,
            SurfaceKind::Content => &mut self.content,
            SurfaceKind::Body => &mut self.body,
        }
    }

    /// Returns `true` when root, overlay, and content are all mounted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.root.is_some() && self.overlay.is_some() && self.content.is_some()
    }
}
