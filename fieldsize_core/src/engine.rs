// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The measurement engine.
//!
//! Each call creates a fresh probe, copies the input's typography onto it,
//! reads its scroll width, and removes it again before returning. Nothing is
//! cached between calls.

use alloc::string::String;
use core::fmt;

use crate::probe::{AttachedProbe, PROBE_STYLES, ProbeSurface};
use crate::style::{ComputedStyle, StyleSnapshot};
use crate::width::{WidthExpression, fix_width_for_box_sizing};

/// A live, mounted text input.
pub trait InputElement {
    /// The computed style type exposed by the host.
    type Style: ComputedStyle;

    /// The current value.
    fn value(&self) -> String;

    /// The placeholder text.
    fn placeholder(&self) -> String;

    /// The fully resolved style, or `None` when the element is not rendered.
    fn computed_style(&self) -> Option<Self::Style>;

    /// Assigns the inline `width` style. An empty string clears it.
    fn set_inline_width(&self, width: &str);
}

/// Returns the text an input displays: its value, or its placeholder when the
/// value is empty.
#[must_use]
pub fn effective_text<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

/// Everything needed to measure one input, captured at a single point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeasurementInput {
    /// The text to measure.
    pub text: String,
    /// The input's style snapshot.
    pub style: StyleSnapshot,
}

impl MeasurementInput {
    /// Creates an input from already captured parts.
    #[must_use]
    pub fn new(text: impl Into<String>, style: StyleSnapshot) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Captures the displayed text and a style snapshot from `element`.
    ///
    /// Returns `None` when the element has no computed style.
    pub fn capture<E: InputElement + ?Sized>(element: &E) -> Option<Self> {
        let style = element.computed_style()?;
        let value = element.value();
        let placeholder = element.placeholder();
        Some(Self {
            text: String::from(effective_text(&value, &placeholder)),
            style: StyleSnapshot::capture(&style),
        })
    }
}

/// Errors returned by [`measure`] and [`measure_input`].
#[derive(Clone, Debug, PartialEq)]
pub enum MeasureError<E> {
    /// The probe surface rejected an operation.
    Surface(E),
}

impl<E: fmt::Debug> fmt::Display for MeasureError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(err) => write!(f, "probe surface error: {err:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for MeasureError<E> {}

/// Computes the width `element` needs to show its current text unclipped.
///
/// An element without a computed style (detached, not rendered) measures as
/// [`WidthExpression::ZERO`] and the surface is not touched.
pub fn measure<E, S>(element: &E, surface: &S) -> Result<WidthExpression, MeasureError<S::Error>>
where
    E: InputElement + ?Sized,
    S: ProbeSurface + ?Sized,
{
    let Some(input) = MeasurementInput::capture(element) else {
        log::warn!("measuring an input without a computed style; using 0px");
        return Ok(WidthExpression::ZERO);
    };
    measure_input(&input, surface)
}

/// Measures a captured input on `surface`.
///
/// The probe is detached before this returns, including on error.
pub fn measure_input<S>(
    input: &MeasurementInput,
    surface: &S,
) -> Result<WidthExpression, MeasureError<S::Error>>
where
    S: ProbeSurface + ?Sized,
{
    let probe = surface.create_probe().map_err(MeasureError::Surface)?;
    for (name, value) in PROBE_STYLES {
        surface
            .set_style(&probe, name, value)
            .map_err(MeasureError::Surface)?;
    }
    for (name, value) in input.style.typography() {
        surface
            .set_style(&probe, name, value)
            .map_err(MeasureError::Surface)?;
    }
    surface.set_text(&probe, &input.text);

    let intrinsic = {
        let attached = AttachedProbe::attach(surface, &probe).map_err(MeasureError::Surface)?;
        attached.scroll_width()
    };

    let width = fix_width_for_box_sizing(intrinsic, &input.style);
    log::trace!(
        "measured {} chars: scroll width {intrinsic}px -> {width}",
        input.text.chars().count()
    );
    Ok(width)
}
