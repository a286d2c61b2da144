// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rubber-band resistance for drags past the fully open position.
//!
//! [`damp`] maps a raw overshoot distance to a resisted one:
//! `8 * (ln(d + 1) - 2)`. It is strictly increasing, starts well below zero,
//! and its slope falls off as `8 / (d + 1)`, so the sheet follows the finger
//! quickly at first and then stiffens.
//!
//! ```rust
//! use understory_drawer::damping::{damp, overshoot_translate};
//!
//! assert!(damp(0.0) < 0.0);
//! assert!(damp(10.0) < damp(100.0));
//!
//! // Small overshoots don't move the content at all.
//! assert_eq!(overshoot_translate(5.0), 0.0);
//! // Larger ones lift it, but by far less than the pointer moved.
//! let lifted = overshoot_translate(200.0);
//! assert!(lifted < 0.0 && lifted > -30.0);
//! ```

#[cfg(feature = "std")]
fn ln(x: f64) -> f64 {
    x.ln()
}

#[cfg(not(feature = "std"))]
fn ln(x: f64) -> f64 {
    libm::log(x)
}

/// Resisted displacement for a raw overshoot of `raw` pixels.
#[must_use]
pub fn damp(raw: f64) -> f64 {
    8.0 * (ln(raw + 1.0) - 2.0)
}

/// Content translate (px) for an overshoot of `raw` pixels.
///
/// Overshoot moves content up (negative translate) and never below the rest
/// translate of 0.
#[must_use]
pub fn overshoot_translate(raw: f64) -> f64 {
    (-damp(raw)).min(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damp_matches_closed_form() {
        assert!((damp(0.0) + 16.0).abs() < 1e-12);
        // ln(e^2) == 2, so the curve crosses zero at e^2 - 1.
        let crossing = core::f64::consts::E * core::f64::consts::E - 1.0;
        assert!(damp(crossing).abs() < 1e-9);
    }

    #[test]
    fn damp_is_monotonic() {
        let mut prev = damp(0.0);
        let mut d = 0.0;
        while d < 2_000.0 {
            d += 0.75;
            let next = damp(d);
            assert!(next >= prev, "damp({d}) = {next} < {prev}");
            prev = next;
        }
    }

    #[test]
    fn overshoot_translate_never_pushes_down() {
        for d in [0.0, 1.0, 6.0, 6.5, 50.0, 1_000.0] {
            assert!(overshoot_translate(d) <= 0.0);
        }
        assert_eq!(overshoot_translate(0.0), 0.0);
    }

    #[test]
    fn growth_slows_down() {
        let near = damp(20.0) - damp(10.0);
        let far = damp(210.0) - damp(200.0);
        assert!(far < near);
    }
}
