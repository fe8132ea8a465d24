// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Computed-style introspection and the typography snapshot.

use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

use hashbrown::HashMap;

/// The CSS properties that influence the advance width of an input's text.
///
/// These are copied from the input's computed style onto the measurement
/// probe. Computed values are already inherited, so ancestors' typography is
/// captured through this set.
///
/// This list is versioned: new typography properties must be revalidated
/// against real inputs before they are added here.
pub const TYPOGRAPHY_PROPERTIES: [&str; 14] = [
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "font-variant",
    "font-stretch",
    "font-synthesis",
    "font-optical-sizing",
    "font-size-adjust",
    "font-kerning",
    "font-variation-settings",
    "letter-spacing",
    "text-transform",
    "text-indent",
];

/// CSS `box-sizing`.
pub const BOX_SIZING: &str = "box-sizing";
/// CSS `padding-left`.
pub const PADDING_LEFT: &str = "padding-left";
/// CSS `padding-right`.
pub const PADDING_RIGHT: &str = "padding-right";
/// CSS `border-left-width`.
pub const BORDER_LEFT_WIDTH: &str = "border-left-width";
/// CSS `border-right-width`.
pub const BORDER_RIGHT_WIDTH: &str = "border-right-width";

/// Read access to an element's fully resolved style.
pub trait ComputedStyle {
    /// Returns the computed value of a CSS property (kebab-case name).
    ///
    /// Unknown or missing properties yield the empty string.
    fn property_value(&self, name: &str) -> String;
}

impl<T: ComputedStyle + ?Sized> ComputedStyle for &T {
    fn property_value(&self, name: &str) -> String {
        (**self).property_value(name)
    }
}

impl<K, V, S> ComputedStyle for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn property_value(&self, name: &str) -> String {
        self.get(name)
            .map(|value| String::from(value.as_ref()))
            .unwrap_or_default()
    }
}

/// CSS `box-sizing` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoxSizing {
    /// The specified width excludes padding and border.
    #[default]
    ContentBox,
    /// The specified width includes padding and border.
    BorderBox,
}

impl BoxSizing {
    /// Parses a computed `box-sizing` value. Anything but `border-box` is
    /// treated as `content-box`, the initial value.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("border-box") {
            Self::BorderBox
        } else {
            Self::ContentBox
        }
    }
}

/// A one-shot copy of everything measurement needs from a computed style.
///
/// Capturing reads each property once, so a style that changes while a
/// measurement is in progress cannot produce a mixed result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    typography: [String; TYPOGRAPHY_PROPERTIES.len()],
    box_sizing: BoxSizing,
    padding_left: String,
    padding_right: String,
    border_left_width: String,
    border_right_width: String,
}

impl StyleSnapshot {
    /// Reads the typography set, `box-sizing`, and the horizontal padding and
    /// border widths from `style`.
    pub fn capture<S: ComputedStyle + ?Sized>(style: &S) -> Self {
        Self {
            typography: core::array::from_fn(|i| style.property_value(TYPOGRAPHY_PROPERTIES[i])),
            box_sizing: BoxSizing::from_css(&style.property_value(BOX_SIZING)),
            padding_left: style.property_value(PADDING_LEFT),
            padding_right: style.property_value(PADDING_RIGHT),
            border_left_width: style.property_value(BORDER_LEFT_WIDTH),
            border_right_width: style.property_value(BORDER_RIGHT_WIDTH),
        }
    }

    /// Iterates the typography properties as `(name, value)` pairs, in
    /// [`TYPOGRAPHY_PROPERTIES`] order.
    pub fn typography(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        TYPOGRAPHY_PROPERTIES
            .iter()
            .copied()
            .zip(self.typography.iter().map(String::as_str))
    }

    /// Returns the captured value of one typography property, if it is part of
    /// the set.
    #[must_use]
    pub fn typography_value(&self, name: &str) -> Option<&str> {
        let index = TYPOGRAPHY_PROPERTIES.iter().position(|p| *p == name)?;
        Some(&self.typography[index])
    }

    /// The element's `box-sizing`.
    #[must_use]
    pub fn box_sizing(&self) -> BoxSizing {
        self.box_sizing
    }

    /// The horizontal edge terms in `calc()` order: padding-left,
    /// padding-right, border-left-width, border-right-width.
    #[must_use]
    pub fn horizontal_edges(&self) -> [&str; 4] {
        [
            &self.padding_left,
            &self.padding_right,
            &self.border_left_width,
            &self.border_right_width,
        ]
    }
}
