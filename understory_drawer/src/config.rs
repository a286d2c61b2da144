// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time drawer configuration.
//!
//! [`DrawerConfig`] is immutable once built. Use [`DrawerConfig::builder`] to
//! override defaults; [`DrawerConfigBuilder::build`] validates ranges.
//!
//! ```rust
//! use understory_drawer::config::{DrawerConfig, WrapperOverflow};
//!
//! let config = DrawerConfig::builder()
//!     .close_threshold(0.4)
//!     .animation_delay_ms(0)
//!     .wrapper_overflow(WrapperOverflow::Clip)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.close_threshold(), 0.4);
//! assert_eq!(config.velocity_threshold(), 0.4);
//!
//! assert!(DrawerConfig::builder().edge_scale(0.0).build().is_err());
//! ```

use core::fmt;

use crate::constants::{
    ANIMATION_DELAY_MS, CLOSE_THRESHOLD, VELOCITY_THRESHOLD, WINDOW_TOP_OFFSET_PX,
};

/// Edge the drawer slides in from. Only `Bottom` is supported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Slides up from the bottom edge.
    #[default]
    Bottom,
}

impl Direction {
    /// The value exposed through the direction data attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
        }
    }
}

/// Overflow applied to the root while the drawer is open.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapperOverflow {
    /// Leave overflow to the stylesheet (`""`).
    #[default]
    Visible,
    /// `hidden`
    Hidden,
    /// `clip`
    Clip,
}

impl WrapperOverflow {
    /// The inline style value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "",
            Self::Hidden => "hidden",
            Self::Clip => "clip",
        }
    }
}

/// Options the host's dialog primitive should be created with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DialogOptions {
    /// Scroll prevention is handled by the drawer's body lock, not the dialog.
    pub prevent_scroll: bool,
    /// Keep content mounted while closed so close transitions can run.
    pub force_visible: bool,
}

/// Root scale for a viewport of the given width.
///
/// The open root is inset by [`WINDOW_TOP_OFFSET_PX`] horizontally. Widths that
/// can't be inset yield `1.0`.
#[must_use]
pub fn edge_scale_for_viewport(width: f64) -> f64 {
    if width > WINDOW_TOP_OFFSET_PX {
        (width - WINDOW_TOP_OFFSET_PX) / width
    } else {
        1.0
    }
}

/// Reasons a [`DrawerConfigBuilder`] refused to build.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Edge scale must be in `(0, 1]`.
    EdgeScale(f64),
    /// Close threshold must be in `(0, 1)`.
    CloseThreshold(f64),
    /// Velocity threshold must be finite and positive.
    VelocityThreshold(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeScale(v) => write!(f, "edge scale {v} is outside (0, 1]"),
            Self::CloseThreshold(v) => write!(f, "close threshold {v} is outside (0, 1)"),
            Self::VelocityThreshold(v) => {
                write!(f, "velocity threshold {v} is not a positive finite speed")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Validated drawer configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawerConfig {
    direction: Direction,
    edge_scale: f64,
    close_threshold: f64,
    animation_delay_ms: u64,
    velocity_threshold: f64,
    force_visible: bool,
    wrapper_overflow: WrapperOverflow,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Bottom,
            edge_scale: 1.0,
            close_threshold: CLOSE_THRESHOLD,
            animation_delay_ms: ANIMATION_DELAY_MS,
            velocity_threshold: VELOCITY_THRESHOLD,
            force_visible: true,
            wrapper_overflow: WrapperOverflow::Visible,
        }
    }
}

impl DrawerConfig {
    /// Starts a builder seeded with the defaults.
    #[must_use]
    pub fn builder() -> DrawerConfigBuilder {
        DrawerConfigBuilder::default()
    }

    /// Slide direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// How far the root shrinks while open (`1.0` means not at all).
    #[must_use]
    pub fn edge_scale(&self) -> f64 {
        self.edge_scale
    }

    /// Fraction of visible content that must be dragged to dismiss.
    #[must_use]
    pub fn close_threshold(&self) -> f64 {
        self.close_threshold
    }

    /// Stagger before each transition's visual stage, in milliseconds.
    #[must_use]
    pub fn animation_delay_ms(&self) -> u64 {
        self.animation_delay_ms
    }

    /// Release speed (px/ms) above which a drag always dismisses.
    #[must_use]
    pub fn velocity_threshold(&self) -> f64 {
        self.velocity_threshold
    }

    /// Whether content stays mounted while closed.
    #[must_use]
    pub fn force_visible(&self) -> bool {
        self.force_visible
    }

    /// Overflow applied to the root while open.
    #[must_use]
    pub fn wrapper_overflow(&self) -> WrapperOverflow {
        self.wrapper_overflow
    }

    /// Options for the host's dialog primitive.
    #[must_use]
    pub fn dialog_options(&self) -> DialogOptions {
        DialogOptions {
            prevent_scroll: false,
            force_visible: self.force_visible,
        }
    }
}

/// Builder for [`DrawerConfig`].
#[derive(Clone, Debug, Default)]
pub struct DrawerConfigBuilder {
    config: DrawerConfig,
}

impl DrawerConfigBuilder {
    /// Sets the root scale used while open; see [`edge_scale_for_viewport`].
    #[must_use]
    pub fn edge_scale(mut self, scale: f64) -> Self {
        self.config.edge_scale = scale;
        self
    }

    /// Sets the fraction of visible content that must be dragged to dismiss.
    #[must_use]
    pub fn close_threshold(mut self, threshold: f64) -> Self {
        self.config.close_threshold = threshold;
        self
    }

    /// Sets the stagger before each transition's visual stage.
    #[must_use]
    pub fn animation_delay_ms(mut self, delay: u64) -> Self {
        self.config.animation_delay_ms = delay;
        self
    }

    /// Sets the flick speed (px/ms) above which a release always dismisses.
    #[must_use]
    pub fn velocity_threshold(mut self, threshold: f64) -> Self {
        self.config.velocity_threshold = threshold;
        self
    }

    /// Sets whether content stays mounted while closed.
    #[must_use]
    pub fn force_visible(mut self, force: bool) -> Self {
        self.config.force_visible = force;
        self
    }

    /// Sets the overflow applied to the root while open.
    #[must_use]
    pub fn wrapper_overflow(mut self, overflow: WrapperOverflow) -> Self {
        self.config.wrapper_overflow = overflow;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<DrawerConfig, ConfigError> {
        let c = self.config;
        if !(c.edge_scale > 0.0 && c.edge_scale <= 1.0) {
            return Err(ConfigError::EdgeScale(c.edge_scale));
        }
        if !(c.close_threshold > 0.0 && c.close_threshold < 1.0) {
            return Err(ConfigError::CloseThreshold(c.close_threshold));
        }
        if !(c.velocity_threshold.is_finite() && c.velocity_threshold > 0.0) {
            return Err(ConfigError::VelocityThreshold(c.velocity_threshold));
        }
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn defaults_match_documented_values() {
        let c = DrawerConfig::default();
        assert_eq!(c.direction(), Direction::Bottom);
        assert_eq!(c.close_threshold(), 0.55);
        assert_eq!(c.animation_delay_ms(), 60);
        assert_eq!(c.velocity_threshold(), 0.4);
        assert!(c.force_visible());
        assert_eq!(c.wrapper_overflow().as_str(), "");
        assert_eq!(DrawerConfig::builder().build(), Ok(c));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(
            DrawerConfig::builder().edge_scale(1.5).build(),
            Err(ConfigError::EdgeScale(1.5))
        );
        assert!(DrawerConfig::builder().edge_scale(f64::NAN).build().is_err());
        assert!(DrawerConfig::builder().close_threshold(1.0).build().is_err());
        assert!(DrawerConfig::builder().close_threshold(0.0).build().is_err());
        assert!(
            DrawerConfig::builder()
                .velocity_threshold(f64::INFINITY)
                .build()
                .is_err()
        );
        assert!(DrawerConfig::builder().edge_scale(1.0).build().is_ok());
    }

    #[test]
    fn errors_describe_the_bad_value() {
        let msg = ConfigError::CloseThreshold(1.2).to_string();
        assert!(msg.contains("1.2"));
    }

    #[test]
    fn edge_scale_derives_from_width() {
        assert!((edge_scale_for_viewport(390.0) - 364.0 / 390.0).abs() < 1e-12);
        assert_eq!(edge_scale_for_viewport(0.0), 1.0);
        assert_eq!(edge_scale_for_viewport(-5.0), 1.0);
    }

    #[test]
    fn dialog_options_forward_force_visible() {
        let c = DrawerConfig::builder().force_visible(false).build().unwrap();
        assert_eq!(
            c.dialog_options(),
            DialogOptions {
                prevent_scroll: false,
                force_visible: false
            }
        );
    }
}
