// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drawer --heading-base-level=0

//! Understory Drawer: a headless, draggable bottom-sheet drawer.
//!
//! A drawer coordinates three surfaces: a *root* container that shrinks back
//! while the drawer is open, a dimming *overlay*, and the *content* panel that
//! slides up from the bottom edge. A *drag handle* on the content lets the user
//! pull the panel down to dismiss it.
//!
//! This crate owns the behavior and none of the rendering:
//! - [`drag`]: the gesture decision engine. A drag session turns pointer moves
//!   into visual feedback and decides on release whether to close or snap back.
//! - [`transition`]: staged open/close transitions driven by host time, with a
//!   re-entrancy guard that suppresses open-state changes mid-animation.
//! - [`Drawer`]: binds host [`Surface`](surface::Surface)s, routes pointer
//!   input, and talks to the [`OpenState`](dialog::OpenState) owner.
//!
//! Styles are written as inline declarations through
//! [`understory_inline_style`]; timing goes through [`understory_timing`]. The
//! drawer never reads a clock and never spawns anything: the host passes the
//! current time in milliseconds and calls [`Drawer::advance`] when
//! [`Drawer::next_deadline`] has passed.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_drawer::dialog::OpenFlag;
//! use understory_drawer::drag::{DragOutcome, PointerId, PointerSample};
//! use understory_drawer::headless::HeadlessSurface;
//! use understory_drawer::{Drawer, DrawerConfig, TransitionPhase};
//!
//! let root = HeadlessSurface::new(Rect::new(0.0, 0.0, 390.0, 844.0));
//! let overlay = HeadlessSurface::new(Rect::new(0.0, 0.0, 390.0, 844.0));
//! let content = HeadlessSurface::new(Rect::new(0.0, 444.0, 390.0, 844.0));
//! let handle = HeadlessSurface::new(Rect::new(170.0, 452.0, 220.0, 462.0));
//!
//! let mut drawer = Drawer::new(DrawerConfig::default(), OpenFlag(false));
//! drawer.bind_root(root);
//! drawer.bind_overlay(overlay);
//! drawer.bind_content(content.clone());
//! drawer.bind_drag_handle(handle);
//!
//! assert!(drawer.open(0));
//! drawer.advance(560);
//! assert_eq!(drawer.phase(), TransitionPhase::Open);
//!
//! // A quick 100px downward flick dismisses the drawer.
//! let pointer = PointerId(1);
//! let token = drawer
//!     .pointer_down(PointerSample::new(pointer, 195.0, 460.0, 1_000), false)
//!     .unwrap();
//! drawer.pointer_move(token, PointerSample::new(pointer, 195.0, 560.0, 1_100));
//! let release = drawer
//!     .pointer_up(token, PointerSample::new(pointer, 195.0, 560.0, 1_100), 844.0)
//!     .unwrap();
//!
//! assert_eq!(release.outcome, DragOutcome::FlickClose);
//! assert!(!drawer.is_open());
//! drawer.advance(1_100 + 610);
//! assert_eq!(drawer.phase(), TransitionPhase::Closed);
//! ```
//!
//! ## Features
//!
//! - `std` (default): use `std` for floating point math.
//! - `libm`: use `libm` for floating point math in `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("understory_drawer requires either the `std` or `libm` feature");

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod constants;
mod controller;
pub mod damping;
pub mod dialog;
pub mod drag;
pub mod headless;
pub mod surface;
pub mod transition;

pub use config::{ConfigError, DrawerConfig, DrawerConfigBuilder};
pub use controller::Drawer;
pub use transition::{DrawerEvent, DrawerHooks, TransitionPhase};
