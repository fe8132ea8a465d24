// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Width expressions and the `box-sizing` fix-up.

use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;

use crate::style::{BoxSizing, StyleSnapshot};

/// A CSS width value produced by measurement.
///
/// The rendered form is part of the public contract: downstream styling code
/// may match on it.
/// - [`WidthExpression::Pixels`] renders as `48px`.
/// - [`WidthExpression::Calc`] renders as
///   `calc(48px + 20px + 20px + 10px + 10px)`.
#[derive(Clone, Debug, PartialEq)]
pub enum WidthExpression {
    /// A plain pixel length.
    Pixels(f64),
    /// The intrinsic text width plus symbolic length terms.
    Calc {
        /// Intrinsic text width in CSS pixels.
        intrinsic: f64,
        /// Additional CSS length terms, emitted verbatim.
        terms: SmallVec<[String; 4]>,
    },
}

impl WidthExpression {
    /// `0px`.
    pub const ZERO: Self = Self::Pixels(0.0);

    /// The intrinsic (text) component in CSS pixels.
    #[must_use]
    pub fn intrinsic_px(&self) -> f64 {
        match self {
            Self::Pixels(px) | Self::Calc { intrinsic: px, .. } => clamp_px(*px),
        }
    }

    /// The symbolic terms added to the intrinsic width, if any.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        match self {
            Self::Pixels(_) => &[],
            Self::Calc { terms, .. } => terms,
        }
    }
}

impl fmt::Display for WidthExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => write!(f, "{}px", clamp_px(*px)),
            Self::Calc { intrinsic, terms } => {
                write!(f, "calc({}px", clamp_px(*intrinsic))?;
                for term in terms {
                    write!(f, " + {term}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Negative, NaN, and infinite widths render as zero.
fn clamp_px(px: f64) -> f64 {
    if px.is_finite() && px > 0.0 { px } else { 0.0 }
}

/// Turns a probe's intrinsic width into the width to assign to the input.
///
/// `content-box` widths already exclude padding and border, so the intrinsic
/// width is used as is. `border-box` widths must include them, so the
/// horizontal padding and border are appended as unresolved `calc()` terms.
/// Terms are emitted exactly as computed; blank terms (a partially missing
/// style) are skipped.
pub fn fix_width_for_box_sizing(intrinsic: f64, style: &StyleSnapshot) -> WidthExpression {
    if style.box_sizing() == BoxSizing::ContentBox {
        return WidthExpression::Pixels(intrinsic);
    }
    let terms: SmallVec<[String; 4]> = style
        .horizontal_edges()
        .into_iter()
        .filter(|term| !term.trim().is_empty())
        .map(String::from)
        .collect();
    if terms.is_empty() {
        WidthExpression::Pixels(intrinsic)
    } else {
        WidthExpression::Calc { intrinsic, terms }
    }
}
