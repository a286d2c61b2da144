// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of inline style properties a surface can be patched with.

use core::fmt;

/// An inline style property.
///
/// The set is deliberately closed: every property a drawer surface writes is
/// listed here, so every legal patch is enumerable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    /// `will-change`
    WillChange,
    /// `pointer-events`
    PointerEvents,
    /// `border-radius`
    BorderRadius,
    /// `overflow`
    Overflow,
    /// `opacity`
    Opacity,
    /// `transition` (shorthand)
    Transition,
    /// `transform`
    Transform,
    /// `transform-origin`
    TransformOrigin,
    /// `transition-property`
    TransitionProperty,
    /// `transition-duration`
    TransitionDuration,
    /// `transition-timing-function`
    TransitionTimingFunction,
}

impl StyleProperty {
    /// Every property, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::WillChange,
        Self::PointerEvents,
        Self::BorderRadius,
        Self::Overflow,
        Self::Opacity,
        Self::Transition,
        Self::Transform,
        Self::TransformOrigin,
        Self::TransitionProperty,
        Self::TransitionDuration,
        Self::TransitionTimingFunction,
    ];

    /// The kebab-case CSS name.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::WillChange => "will-change",
            Self::PointerEvents => "pointer-events",
            Self::BorderRadius => "border-radius",
            Self::Overflow => "overflow",
            Self::Opacity => "opacity",
            Self::Transition => "transition",
            Self::Transform => "transform",
            Self::TransformOrigin => "transform-origin",
            Self::TransitionProperty => "transition-property",
            Self::TransitionDuration => "transition-duration",
            Self::TransitionTimingFunction => "transition-timing-function",
        }
    }

    /// Looks a property up by its CSS name.
    #[must_use]
    pub fn from_css_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.css_name() == name)
    }

    /// The single-member [`PropertySet`] for this property.
    #[must_use]
    pub const fn bit(self) -> PropertySet {
        match self {
            Self::WillChange => PropertySet::WILL_CHANGE,
            Self::PointerEvents => PropertySet::POINTER_EVENTS,
            Self::BorderRadius => PropertySet::BORDER_RADIUS,
            Self::Overflow => PropertySet::OVERFLOW,
            Self::Opacity => PropertySet::OPACITY,
            Self::Transition => PropertySet::TRANSITION,
            Self::Transform => PropertySet::TRANSFORM,
            Self::TransformOrigin => PropertySet::TRANSFORM_ORIGIN,
            Self::TransitionProperty => PropertySet::TRANSITION_PROPERTY,
            Self::TransitionDuration => PropertySet::TRANSITION_DURATION,
            Self::TransitionTimingFunction => PropertySet::TRANSITION_TIMING_FUNCTION,
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

bitflags::bitflags! {
    /// A set of [`StyleProperty`] values, used to select what to capture.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct PropertySet: u16 {
        /// `will-change`
        const WILL_CHANGE = 1 << 0;
        /// `pointer-events`
        const POINTER_EVENTS = 1 << 1;
        /// `border-radius`
        const BORDER_RADIUS = 1 << 2;
        /// `overflow`
        const OVERFLOW = 1 << 3;
        /// `opacity`
        const OPACITY = 1 << 4;
        /// `transition`
        const TRANSITION = 1 << 5;
        /// `transform`
        const TRANSFORM = 1 << 6;
        /// `transform-origin`
        const TRANSFORM_ORIGIN = 1 << 7;
        /// `transition-property`
        const TRANSITION_PROPERTY = 1 << 8;
        /// `transition-duration`
        const TRANSITION_DURATION = 1 << 9;
        /// `transition-timing-function`
        const TRANSITION_TIMING_FUNCTION = 1 << 10;
    }
}

impl PropertySet {
    /// Iterates the member properties in declaration order.
    pub fn properties(self) -> impl Iterator<Item = StyleProperty> {
        StyleProperty::ALL
            .into_iter()
            .filter(move |p| self.contains(p.bit()))
    }
}

impl From<StyleProperty> for PropertySet {
    fn from(property: StyleProperty) -> Self {
        property.bit()
    }
}

impl FromIterator<StyleProperty> for PropertySet {
    fn from_iter<I: IntoIterator<Item = StyleProperty>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, p| set.union(p.bit()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn every_property_has_a_distinct_bit() {
        let all: PropertySet = StyleProperty::ALL.into_iter().collect();
        assert_eq!(all, PropertySet::all());
        assert_eq!(all.bits().count_ones() as usize, StyleProperty::ALL.len());
    }

    #[test]
    fn css_names_round_trip() {
        for p in StyleProperty::ALL {
            assert_eq!(StyleProperty::from_css_name(p.css_name()), Some(p));
        }
        assert_eq!(StyleProperty::from_css_name("color"), None);
    }

    #[test]
    fn properties_iterate_in_declaration_order() {
        let set = PropertySet::TRANSFORM | PropertySet::WILL_CHANGE | PropertySet::OPACITY;
        let props: Vec<_> = set.properties().collect();
        assert_eq!(
            props,
            [
                StyleProperty::WillChange,
                StyleProperty::Opacity,
                StyleProperty::Transform
            ]
        );
    }
}
