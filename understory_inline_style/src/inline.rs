// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`StyleTarget`] for headless hosts and tests.

use alloc::string::String;

use hashbrown::HashMap;

use crate::{StyleProperty, StyleTarget};

/// Inline style declarations held in memory.
///
/// Behaves like an element's `style` attribute: unset properties read as the
/// empty string, and writing an empty string removes the declaration.
///
/// ```rust
/// use understory_inline_style::{InlineStyle, StyleProperty, StyleTarget};
///
/// let mut style = InlineStyle::new();
/// style.set_inline_style(StyleProperty::Opacity, "0.5");
/// style.set_inline_style(StyleProperty::Transform, "translate3d(0, 12px, 0)");
/// assert_eq!(style.css_text(), "opacity: 0.5; transform: translate3d(0, 12px, 0);");
///
/// style.set_inline_style(StyleProperty::Opacity, "");
/// assert_eq!(style.inline_style(StyleProperty::Opacity), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: HashMap<StyleProperty, String>,
}

impl InlineStyle {
    /// Creates an empty declaration block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the declared value, if any.
    #[must_use]
    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.declarations.get(&property).map(String::as_str)
    }

    /// Number of declared properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serializes the block as `name: value;` pairs in property order.
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        for property in StyleProperty::ALL {
            if let Some(value) = self.declarations.get(&property) {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(property.css_name());
                out.push_str(": ");
                out.push_str(value);
                out.push(';');
            }
        }
        out
    }
}

impl StyleTarget for InlineStyle {
    fn inline_style(&self, property: StyleProperty) -> String {
        self.get(property).map(String::from).unwrap_or_default()
    }

    fn set_inline_style(&mut self, property: StyleProperty, value: &str) {
        if value.is_empty() {
            self.declarations.remove(&property);
        } else {
            self.declarations.insert(property, String::from(value));
        }
    }
}
