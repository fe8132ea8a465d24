// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for off-screen probe surfaces.
//!
//! In a browser, `fieldsize` measures an input's content by asking the page
//! for a hidden probe's scroll width. Hosts without a DOM (native toolkits,
//! headless tests) still need the same answer, so they plug a measurer into
//! the headless probe surface in `fieldsize_core`.
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - backend-agnostic (shaping engines and heuristics implement the same trait).

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

/// A minimal single-line text measurement interface.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate), or
/// - backed by a shaping engine (e.g. Parley).
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line. Letter spacing from `style` is
    /// included in the returned advance width.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Text styling inputs relevant to measurement.
///
/// This covers the typography an input's probe can resolve to glyph advances.
/// Features like variation settings or kerning toggles are left to shaping
/// backends that understand them.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in CSS pixels.
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
    /// Extra advance added after every character, in CSS pixels.
    pub letter_spacing: f64,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::Serif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            letter_spacing: 0.0,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    /// Sets the letter spacing in CSS pixels.
    #[must_use]
    pub fn with_letter_spacing(mut self, letter_spacing: f64) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }
}

impl Default for TextStyle {
    /// The CSS initial values: `medium` (16px) serif text.
    fn default() -> Self {
        Self::new(16.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Parses a single CSS family name, recognizing the generic keywords.
    ///
    /// Surrounding quotes and whitespace are stripped.
    #[must_use]
    pub fn from_css_family(name: &str) -> Self {
        let name = name.trim().trim_matches(|c| c == '"' || c == '\'');
        match name {
            "serif" => Self::Serif,
            "sans-serif" => Self::SansSerif,
            "monospace" => Self::Monospace,
            other => Self::Named(Arc::from(other)),
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Metrics for an empty line.
    pub const EMPTY: Self = Self {
        advance_width: 0.0,
        ascent: 0.0,
        descent: 0.0,
        leading: 0.0,
    };
}

/// A tiny heuristic text measurer suitable for tests and early layout.
///
/// It assumes an average glyph width of ~0.6em (a monospace advance) and a
/// baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let chars = text.chars().count() as f64;
        let advance_width = (0.6 * style.font_size + style.letter_spacing) * chars;
        TextMetrics {
            advance_width,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}
