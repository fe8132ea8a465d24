// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by the engine and lifecycle tests.

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use hashbrown::HashMap;

use crate::engine::InputElement;
use crate::probe::ProbeSurface;

pub(crate) type StyleMap = HashMap<&'static str, &'static str>;

/// A computed style for 16px monospace text, plus `extra` declarations.
pub(crate) fn monospace(extra: &[(&'static str, &'static str)]) -> StyleMap {
    let mut style: StyleMap = [("font-family", "monospace"), ("font-size", "16px")]
        .into_iter()
        .collect();
    style.extend(extra.iter().copied());
    style
}

/// The border-box configuration from the demo: 20px padding, 10px borders.
pub(crate) fn padded_border_box() -> StyleMap {
    monospace(&[
        ("box-sizing", "border-box"),
        ("padding-left", "20px"),
        ("padding-right", "20px"),
        ("border-left-width", "10px"),
        ("border-right-width", "10px"),
    ])
}

/// An in-memory text input.
#[derive(Debug, Default)]
pub(crate) struct FakeInput {
    value: RefCell<String>,
    placeholder: String,
    style: Option<StyleMap>,
    width: RefCell<String>,
    width_writes: Cell<usize>,
}

impl FakeInput {
    pub(crate) fn new(value: &str, style: StyleMap) -> Self {
        Self {
            value: RefCell::new(String::from(value)),
            style: Some(style),
            ..Self::default()
        }
    }

    /// An input that is not rendered and so has no computed style.
    pub(crate) fn detached(value: &str) -> Self {
        Self {
            value: RefCell::new(String::from(value)),
            ..Self::default()
        }
    }

    pub(crate) fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = String::from(placeholder);
        self
    }

    pub(crate) fn type_text(&self, value: &str) {
        *self.value.borrow_mut() = String::from(value);
    }

    pub(crate) fn width(&self) -> String {
        self.width.borrow().clone()
    }

    pub(crate) fn width_writes(&self) -> usize {
        self.width_writes.get()
    }
}

impl InputElement for FakeInput {
    type Style = StyleMap;

    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn placeholder(&self) -> String {
        self.placeholder.clone()
    }

    fn computed_style(&self) -> Option<StyleMap> {
        self.style.clone()
    }

    fn set_inline_width(&self, width: &str) {
        *self.width.borrow_mut() = String::from(width);
        self.width_writes.set(self.width_writes.get() + 1);
    }
}

/// Probe operations seen by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
    Create,
    Style(String, String),
    Text(String),
    Attach,
    Read,
    Detach,
}

/// A surface that records every call and reports a fixed scroll width.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub(crate) ops: RefCell<Vec<Op>>,
    pub(crate) scroll_width: f64,
    pub(crate) reject_style: Option<&'static str>,
    pub(crate) panic_on_read: bool,
}

impl RecordingSurface {
    pub(crate) fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    pub(crate) fn count(&self, op: &Op) -> usize {
        self.ops.borrow().iter().filter(|seen| *seen == op).count()
    }
}

impl ProbeSurface for RecordingSurface {
    type Probe = ();
    type Error = &'static str;

    fn create_probe(&self) -> Result<(), &'static str> {
        self.ops.borrow_mut().push(Op::Create);
        Ok(())
    }

    fn set_style(&self, _: &(), name: &str, value: &str) -> Result<(), &'static str> {
        if self.reject_style == Some(name) {
            return Err("style rejected");
        }
        self.ops
            .borrow_mut()
            .push(Op::Style(String::from(name), String::from(value)));
        Ok(())
    }

    fn set_text(&self, _: &(), text: &str) {
        self.ops.borrow_mut().push(Op::Text(String::from(text)));
    }

    fn attach(&self, _: &()) -> Result<(), &'static str> {
        self.ops.borrow_mut().push(Op::Attach);
        Ok(())
    }

    fn scroll_width(&self, _: &()) -> f64 {
        self.ops.borrow_mut().push(Op::Read);
        assert!(!self.panic_on_read, "layout failed");
        self.scroll_width
    }

    fn detach(&self, _: &()) {
        self.ops.borrow_mut().push(Op::Detach);
    }
}
