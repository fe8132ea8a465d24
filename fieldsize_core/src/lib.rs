// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content-width measurement for auto-sizing text inputs.
//!
//! This crate emulates CSS `field-sizing: content` for single-line inputs on
//! platforms without native support:
//! - The **measurement engine** ([`measure`]) copies an input's typography onto
//!   a hidden probe, reads the probe's scroll width, and turns it into a CSS
//!   width expression that accounts for `box-sizing`.
//! - The **lifecycle controller** ([`FieldSizing`]) decides when to re-measure
//!   and restores the caller's width when management stops.
//!
//! Probes live on a [`ProbeSurface`]. Browsers provide one backed by the page
//! body (see `fieldsize_web`); other hosts can use [`HeadlessSurface`] with any
//! [`fieldsize_text::TextMeasurer`].

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod engine;
#[cfg(not(feature = "std"))]
mod float;
mod headless;
mod lifecycle;
mod mode;
mod probe;
mod style;
#[cfg(test)]
mod test_support;
mod width;

pub use engine::{
    InputElement, MeasureError, MeasurementInput, effective_text, measure, measure_input,
};
pub use headless::{HeadlessProbe, HeadlessSurface};
pub use lifecycle::{FieldSizing, ManagementState, Signals, StyleWidth, Transition};
pub use mode::{ParseSizingModeError, SizingMode};
pub use probe::{PROBE_STYLES, ProbeSurface};
pub use style::{
    BORDER_LEFT_WIDTH, BORDER_RIGHT_WIDTH, BOX_SIZING, BoxSizing, ComputedStyle, PADDING_LEFT,
    PADDING_RIGHT, StyleSnapshot, TYPOGRAPHY_PROPERTIES,
};
pub use width::{WidthExpression, fix_width_for_box_sizing};
