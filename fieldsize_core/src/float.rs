// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers for `no_std` builds.
//!
//! `f64::ceil` is not available in `core`; this dispatches to `libm`.

/// Float math helpers for `f64` in `no_std` mode.
pub(crate) trait FloatExt {
    fn ceil(self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    fn ceil(self) -> Self {
        libm::ceil(self)
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("fieldsize_core requires either the `std` or `libm` feature");
