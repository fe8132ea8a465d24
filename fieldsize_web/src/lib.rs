// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM bindings for `fieldsize`.
//!
//! This crate measures live `<input>` elements the way the browser would for
//! `field-sizing: content`: a hidden `<span>` probe is appended to
//! `document.body`, measured with `scrollWidth`, and removed again.
//!
//! - [`DomSurface`] is the [`fieldsize_core::ProbeSurface`] for a document.
//! - [`WebInput`] adapts an `HtmlInputElement` to
//!   [`fieldsize_core::InputElement`].
//! - [`FieldSizingInput`] keeps one input sized while it is mounted.
//!
//! Notes:
//! - Everything here is only available on `wasm32` targets; other targets can
//!   use [`fieldsize_core::HeadlessSurface`].

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod input;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomSurface, WebComputedStyle, WebInput};
#[cfg(target_arch = "wasm32")]
pub use input::{FieldSizingInput, measure_field_width};
