// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;

use fieldsize_core::{FieldSizing, MeasureError, Signals, measure};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlInputElement};

use crate::dom::{DomSurface, WebInput};

/// Measures `input` and returns the CSS width it needs for its current text.
///
/// This is the one-shot form for JavaScript callers that manage their own
/// lifecycle; it does not modify the input.
#[wasm_bindgen(js_name = measureFieldWidth)]
pub fn measure_field_width(input: &HtmlInputElement) -> Result<String, JsValue> {
    let surface = DomSurface::for_node(input)?;
    let width = measure(&WebInput::new(input.clone()), &surface)
        .map_err(|MeasureError::Surface(err)| err)?;
    Ok(width.to_string())
}

struct Shared {
    input: WebInput,
    surface: DomSurface,
    sizing: RefCell<FieldSizing>,
}

/// Keeps one mounted `<input>` sized to its content.
///
/// Call [`FieldSizingInput::update`] whenever the tracked value, mode, or
/// width style changes. While the mode is `content`, the input's own `input`
/// events also trigger a re-measure, which covers uncontrolled inputs.
/// Dropping the binding (or calling [`FieldSizingInput::detach`]) restores
/// the caller's width and removes the listener.
pub struct FieldSizingInput {
    shared: Rc<Shared>,
    listener: Option<Closure<dyn FnMut(Event)>>,
}

impl core::fmt::Debug for FieldSizingInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldSizingInput")
            .field("input", &self.shared.input)
            .field("state", &self.shared.sizing.borrow().state())
            .field("listening", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl FieldSizingInput {
    /// Mounts the binding on `element` with its initial signals.
    ///
    /// The element must be connected to the document.
    pub fn attach(element: HtmlInputElement, signals: Signals) -> Result<Self, JsValue> {
        let surface = DomSurface::for_node(&element)?;
        let mut this = Self {
            shared: Rc::new(Shared {
                input: WebInput::new(element),
                surface,
                sizing: RefCell::new(FieldSizing::new()),
            }),
            listener: None,
        };
        this.update(signals)?;
        Ok(this)
    }

    /// Feeds new tracked signals to the binding.
    ///
    /// On a measurement error the input keeps its previous width; the listener
    /// still follows the new mode.
    pub fn update(&mut self, signals: Signals) -> Result<(), JsValue> {
        let result = {
            let shared = &self.shared;
            shared
                .sizing
                .borrow_mut()
                .update(&shared.input, &shared.surface, signals)
        };
        self.sync_listener()?;
        result.map(drop).map_err(|MeasureError::Surface(err)| err)
    }

    /// The wrapped input element.
    #[must_use]
    pub fn element(&self) -> &HtmlInputElement {
        self.shared.input.element()
    }

    /// Restores the caller's width and stops listening.
    pub fn detach(self) {
        drop(self);
    }

    fn sync_listener(&mut self) -> Result<(), JsValue> {
        let listening = self.shared.sizing.borrow().is_listening();
        if listening && self.listener.is_none() {
            self.listen()
        } else {
            if !listening {
                self.unlisten();
            }
            Ok(())
        }
    }

    fn listen(&mut self) -> Result<(), JsValue> {
        let shared = Rc::clone(&self.shared);
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            let Ok(sizing) = shared.sizing.try_borrow() else {
                return;
            };
            if let Err(err) = sizing.handle_native_input(&shared.input, &shared.surface) {
                log::warn!("re-measuring after input event failed: {err}");
            }
        }) as Box<dyn FnMut(_)>);
        self.element()
            .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        self.listener = Some(closure);
        Ok(())
    }

    fn unlisten(&mut self) {
        let Some(closure) = self.listener.take() else {
            return;
        };
        if let Err(err) = self
            .element()
            .remove_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove input listener: {err:?}");
        }
    }
}

impl Drop for FieldSizingInput {
    fn drop(&mut self) {
        self.unlisten();
        let shared = &self.shared;
        if let Ok(mut sizing) = shared.sizing.try_borrow_mut() {
            sizing.teardown(&shared.input);
        }
    }
}
