// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

/// The `field-sizing` mode requested for an input.
///
/// Only [`SizingMode::Content`] engages measurement; the other modes leave the
/// input to its native sizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SizingMode {
    /// Width tracks the current value (or placeholder).
    Content,
    /// The platform's fixed default sizing.
    Fixed,
    /// No mode was given.
    #[default]
    Unset,
}

impl SizingMode {
    /// Returns the CSS keyword for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Fixed => "fixed",
            Self::Unset => "unset",
        }
    }

    /// Returns `true` for [`SizingMode::Content`].
    #[must_use]
    pub const fn is_content(self) -> bool {
        matches!(self, Self::Content)
    }
}

impl fmt::Display for SizingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known sizing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseSizingModeError;

impl fmt::Display for ParseSizingModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of `content`, `fixed`, or `unset`")
    }
}

impl core::error::Error for ParseSizingModeError {}

impl FromStr for SizingMode {
    type Err = ParseSizingModeError;

    /// Parses a mode keyword. An empty string means no mode was given.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("unset") {
            Ok(Self::Unset)
        } else if s.eq_ignore_ascii_case("content") {
            Ok(Self::Content)
        } else if s.eq_ignore_ascii_case("fixed") {
            Ok(Self::Fixed)
        } else {
            Err(ParseSizingModeError)
        }
    }
}
