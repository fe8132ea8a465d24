// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A probe surface for hosts without a DOM.
//!
//! [`HeadlessSurface`] resolves a probe's inline styles the way a browser
//! would for the small set of properties a measurer understands, then asks a
//! [`TextMeasurer`] for the advance. Properties it does not understand are
//! accepted and ignored.

use alloc::string::String;
use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use fieldsize_text::{FontFamily, FontStyle, FontWeight, TextMeasurer, TextStyle};
use hashbrown::HashMap;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::probe::ProbeSurface;

/// A probe created by [`HeadlessSurface`].
#[derive(Debug, Default)]
pub struct HeadlessProbe {
    styles: RefCell<HashMap<String, String>>,
    text: RefCell<String>,
    attached: Cell<bool>,
}

impl HeadlessProbe {
    /// Returns the inline value of `name`, if set.
    #[must_use]
    pub fn style(&self, name: &str) -> Option<String> {
        self.styles.borrow().get(name).cloned()
    }

    /// Returns the probe's text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Returns `true` while the probe is attached to its surface.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

/// An off-screen [`ProbeSurface`] backed by a [`TextMeasurer`].
#[derive(Debug, Default)]
pub struct HeadlessSurface<M> {
    measurer: M,
    attached: Cell<usize>,
}

impl<M: TextMeasurer> HeadlessSurface<M> {
    /// Creates a surface that measures with `measurer`.
    #[must_use]
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            attached: Cell::new(0),
        }
    }

    /// The number of probes currently attached.
    #[must_use]
    pub fn attached_probes(&self) -> usize {
        self.attached.get()
    }
}

impl<M: TextMeasurer> ProbeSurface for HeadlessSurface<M> {
    type Probe = HeadlessProbe;
    type Error = Infallible;

    fn create_probe(&self) -> Result<HeadlessProbe, Infallible> {
        Ok(HeadlessProbe::default())
    }

    fn set_style(&self, probe: &HeadlessProbe, name: &str, value: &str) -> Result<(), Infallible> {
        let mut styles = probe.styles.borrow_mut();
        if name == "all" {
            // Every value of `all` discards earlier inline declarations here.
            styles.clear();
        }
        styles.insert(String::from(name), String::from(value.trim()));
        Ok(())
    }

    fn set_text(&self, probe: &HeadlessProbe, text: &str) {
        *probe.text.borrow_mut() = String::from(text);
    }

    fn attach(&self, probe: &HeadlessProbe) -> Result<(), Infallible> {
        if !probe.attached.replace(true) {
            self.attached.set(self.attached.get() + 1);
        }
        Ok(())
    }

    fn scroll_width(&self, probe: &HeadlessProbe) -> f64 {
        if !probe.is_attached() {
            return 0.0;
        }
        let styles = probe.styles.borrow();
        let resolved = ResolvedProbe::resolve(&styles);
        let text = probe.text.borrow();
        let line = text.split('\n').next().unwrap_or("");
        let line = resolved.transform.apply(line);
        let advance = self.measurer.measure(&line, &resolved.style).advance_width;
        (advance + resolved.text_indent).max(0.0).ceil()
    }

    fn detach(&self, probe: &HeadlessProbe) {
        if probe.attached.replace(false) {
            self.attached.set(self.attached.get().saturating_sub(1));
        }
    }
}

/// CSS `text-transform`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    fn from_css(value: &str) -> Self {
        match value {
            "uppercase" => Self::Uppercase,
            "lowercase" => Self::Lowercase,
            "capitalize" => Self::Capitalize,
            _ => Self::None,
        }
    }

    fn apply(self, text: &str) -> String {
        match self {
            Self::None => String::from(text),
            Self::Uppercase => text.to_uppercase(),
            Self::Lowercase => text.to_lowercase(),
            Self::Capitalize => {
                let mut out = String::with_capacity(text.len());
                let mut at_word_start = true;
                for c in text.chars() {
                    if at_word_start && c.is_alphanumeric() {
                        out.extend(c.to_uppercase());
                    } else {
                        out.push(c);
                    }
                    at_word_start = c.is_whitespace();
                }
                out
            }
        }
    }
}

/// The subset of a probe's style that affects the headless measurement.
#[derive(Clone, Debug, PartialEq)]
struct ResolvedProbe {
    style: TextStyle,
    text_indent: f64,
    transform: TextTransform,
}

impl ResolvedProbe {
    /// Resolves inline declarations on top of the CSS initial values.
    fn resolve(styles: &HashMap<String, String>) -> Self {
        let get = |name: &str| styles.get(name).map(String::as_str).unwrap_or("");

        let mut style = TextStyle::default();
        if let Some(size) = font_size(get("font-size")) {
            style.font_size = size;
        }
        if let Some(first) = get("font-family").split(',').next()
            && !first.trim().is_empty()
        {
            style.font_family = FontFamily::from_css_family(first);
        }
        style.font_weight = font_weight(get("font-weight"));
        style.font_style = font_style(get("font-style"));
        style.letter_spacing = length_px(get("letter-spacing"), style.font_size).unwrap_or(0.0);

        Self {
            text_indent: length_px(get("text-indent"), style.font_size).unwrap_or(0.0),
            transform: TextTransform::from_css(get("text-transform")),
            style,
        }
    }
}

/// Resolves a `font-size`, including the absolute-size keywords.
fn font_size(value: &str) -> Option<f64> {
    let keyword = match value {
        "xx-small" => Some(9.0),
        "x-small" => Some(10.0),
        "small" => Some(13.0),
        "medium" => Some(16.0),
        "large" => Some(18.0),
        "x-large" => Some(24.0),
        "xx-large" => Some(32.0),
        _ => None,
    };
    keyword
        .or_else(|| length_px(value, TextStyle::default().font_size))
        .filter(|size| *size >= 0.0)
}

fn font_weight(value: &str) -> FontWeight {
    match value {
        "bold" => FontWeight::BOLD,
        other => other
            .parse::<u16>()
            .ok()
            .filter(|w| (1..=1000).contains(w))
            .map_or(FontWeight::NORMAL, FontWeight),
    }
}

fn font_style(value: &str) -> FontStyle {
    if value == "italic" {
        FontStyle::Italic
    } else if value.starts_with("oblique") {
        FontStyle::Oblique
    } else {
        FontStyle::Normal
    }
}

/// Resolves an absolute or font-relative length to CSS pixels.
///
/// `normal`, percentages, and anything unparsable yield `None`.
fn length_px(value: &str, font_size: f64) -> Option<f64> {
    let number = |n: &str| n.trim().parse::<f64>().ok().filter(|n| n.is_finite());
    let value = value.trim();
    if let Some(n) = value.strip_suffix("px") {
        number(n)
    } else if let Some(n) = value.strip_suffix("pt") {
        number(n).map(|n| n * 4.0 / 3.0)
    } else if let Some(n) = value.strip_suffix("rem") {
        number(n).map(|n| n * TextStyle::default().font_size)
    } else if let Some(n) = value.strip_suffix("em") {
        number(n).map(|n| n * font_size)
    } else if value == "0" {
        Some(0.0)
    } else {
        None
    }
}
