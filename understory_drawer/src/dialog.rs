// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The external open/closed state owner.
//!
//! Focus trapping, portals, and the open boolean itself belong to a dialog
//! primitive outside this crate. The drawer only writes the boolean through
//! [`OpenState`], after its own re-entrancy guard has had a say.

/// Owner of the drawer's open/closed boolean.
pub trait OpenState {
    /// Whether the dialog is currently open.
    fn is_open(&self) -> bool;

    /// Sets the dialog's open state.
    fn set_open(&mut self, open: bool);
}

/// A plain boolean [`OpenState`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenFlag(pub bool);

impl OpenState for OpenFlag {
    fn is_open(&self) -> bool {
        self.0
    }

    fn set_open(&mut self, open: bool) {
        self.0 = open;
    }
}
