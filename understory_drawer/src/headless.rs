// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Surface`] for tests and hosts without a DOM.
//!
//! [`HeadlessSurface`] is a shared handle: clones refer to the same state, so
//! a test can bind one clone into a drawer and inspect the other.
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_drawer::headless::HeadlessSurface;
//! use understory_drawer::surface::Surface;
//! use understory_inline_style::{StyleProperty, StyleTarget};
//!
//! let el = HeadlessSurface::new(Rect::new(0.0, 400.0, 390.0, 800.0));
//! let mut bound = el.clone();
//! bound.set_inline_style(StyleProperty::Opacity, "0.4");
//!
//! assert_eq!(el.style(StyleProperty::Opacity), "0.4");
//! assert_eq!(el.bounding_rect().height(), 400.0);
//! ```

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use kurbo::Rect;
use understory_inline_style::{InlineStyle, StyleProperty, StyleTarget};

use crate::drag::PointerId;
use crate::surface::{DataAttribute, Surface};

#[derive(Debug)]
struct State {
    style: InlineStyle,
    data: BTreeMap<DataAttribute, String>,
    rect: Rect,
    captured: Option<PointerId>,
    capture_calls: usize,
    release_calls: usize,
    style_writes: usize,
}

impl Default for State {
    fn default() -> Self {
        Self {
            style: InlineStyle::new(),
            data: BTreeMap::new(),
            rect: Rect::ZERO,
            captured: None,
            capture_calls: 0,
            release_calls: 0,
            style_writes: 0,
        }
    }
}

/// Shared in-memory element.
#[derive(Clone, Debug, Default)]
pub struct HeadlessSurface {
    state: Rc<RefCell<State>>,
}

impl HeadlessSurface {
    /// Creates a surface laid out at `rect`.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        let surface = Self::default();
        surface.state.borrow_mut().rect = rect;
        surface
    }

    /// Moves the surface.
    pub fn set_rect(&self, rect: Rect) {
        self.state.borrow_mut().rect = rect;
    }

    /// Current inline value of `property`.
    #[must_use]
    pub fn style(&self, property: StyleProperty) -> String {
        self.state.borrow().style.inline_style(property)
    }

    /// Copy of the whole inline style block.
    #[must_use]
    pub fn inline(&self) -> InlineStyle {
        self.state.borrow().style.clone()
    }

    /// Serialized inline style.
    #[must_use]
    pub fn css_text(&self) -> String {
        self.state.borrow().style.css_text()
    }

    /// Current value of a data attribute.
    #[must_use]
    pub fn data(&self, attribute: DataAttribute) -> Option<String> {
        self.state.borrow().data.get(&attribute).cloned()
    }

    /// Pointer currently captured by this surface.
    #[must_use]
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.state.borrow().captured
    }

    /// How many times pointer capture was requested.
    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.state.borrow().capture_calls
    }

    /// How many times pointer capture was released.
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.state.borrow().release_calls
    }

    /// Total inline style writes seen so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state.borrow().style_writes
    }
}

impl StyleTarget for HeadlessSurface {
    fn inline_style(&self, property: StyleProperty) -> String {
        self.style(property)
    }

    fn set_inline_style(&mut self, property: StyleProperty, value: &str) {
        let mut state = self.state.borrow_mut();
        state.style_writes += 1;
        state.style.set_inline_style(property, value);
    }
}

impl Surface for HeadlessSurface {
    fn set_data(&mut self, attribute: DataAttribute, value: &str) {
        self.state
            .borrow_mut()
            .data
            .insert(attribute, String::from(value));
    }

    fn bounding_rect(&self) -> Rect {
        self.state.borrow().rect
    }

    fn set_pointer_capture(&mut self, pointer: PointerId) {
        let mut state = self.state.borrow_mut();
        state.capture_calls += 1;
        state.captured = Some(pointer);
    }

    fn release_pointer_capture(&mut self, pointer: PointerId) {
        let mut state = self.state.borrow_mut();
        state.release_calls += 1;
        if state.captured == Some(pointer) {
            state.captured = None;
        }
    }
}
