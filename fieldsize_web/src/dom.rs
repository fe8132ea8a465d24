// Copyright 2025 the fieldsize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use fieldsize_core::{ComputedStyle, InputElement, ProbeSurface};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{CssStyleDeclaration, Document, HtmlElement, HtmlInputElement, Node};

/// A [`ProbeSurface`] that lays probes out in `document.body`.
#[derive(Clone, Debug)]
pub struct DomSurface {
    document: Document,
    body: HtmlElement,
}

impl DomSurface {
    /// Uses the current window's document.
    ///
    /// This requires a browser-like environment with `window`, `document`,
    /// and a `body`.
    pub fn new() -> Result<Self, JsValue> {
        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("fieldsize_web: missing window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("fieldsize_web: missing document"))?;
        Self::from_document(document)
    }

    /// Uses the document that owns `node`, so inputs inside an iframe are
    /// measured in the iframe's body.
    pub fn for_node(node: &Node) -> Result<Self, JsValue> {
        let document = node
            .owner_document()
            .ok_or_else(|| JsValue::from_str("fieldsize_web: node has no owner document"))?;
        Self::from_document(document)
    }

    /// Uses an existing document, e.g. one inside an iframe.
    pub fn from_document(document: Document) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("fieldsize_web: missing document body"))?;
        Ok(Self { document, body })
    }
}

impl ProbeSurface for DomSurface {
    type Probe = HtmlElement;
    type Error = JsValue;

    fn create_probe(&self) -> Result<HtmlElement, JsValue> {
        let probe = self
            .document
            .create_element("span")?
            .dyn_into::<HtmlElement>()?;
        probe.set_attribute("aria-hidden", "true")?;
        Ok(probe)
    }

    fn set_style(&self, probe: &HtmlElement, name: &str, value: &str) -> Result<(), JsValue> {
        probe.style().set_property(name, value)
    }

    fn set_text(&self, probe: &HtmlElement, text: &str) {
        probe.set_text_content(Some(text));
    }

    fn attach(&self, probe: &HtmlElement) -> Result<(), JsValue> {
        self.body.append_child(probe)?;
        Ok(())
    }

    fn scroll_width(&self, probe: &HtmlElement) -> f64 {
        f64::from(probe.scroll_width())
    }

    fn detach(&self, probe: &HtmlElement) {
        probe.remove();
    }
}

/// A resolved `CssStyleDeclaration` from `getComputedStyle`.
#[derive(Clone, Debug)]
pub struct WebComputedStyle(pub CssStyleDeclaration);

impl ComputedStyle for WebComputedStyle {
    fn property_value(&self, name: &str) -> String {
        self.0.get_property_value(name).unwrap_or_default()
    }
}

/// An `<input>` element seen through [`InputElement`].
#[derive(Clone, Debug)]
pub struct WebInput {
    element: HtmlInputElement,
}

impl WebInput {
    /// Wraps `element`.
    #[must_use]
    pub fn new(element: HtmlInputElement) -> Self {
        Self { element }
    }

    /// The wrapped element.
    #[must_use]
    pub fn element(&self) -> &HtmlInputElement {
        &self.element
    }
}

impl InputElement for WebInput {
    type Style = WebComputedStyle;

    fn value(&self) -> String {
        self.element.value()
    }

    fn placeholder(&self) -> String {
        self.element.placeholder()
    }

    fn computed_style(&self) -> Option<WebComputedStyle> {
        // Detached elements report an empty computed style.
        if !self.element.is_connected() {
            return None;
        }
        let window = self.element.owner_document()?.default_view()?;
        match window.get_computed_style(&self.element) {
            Ok(style) => style.map(WebComputedStyle),
            Err(err) => {
                log::warn!("getComputedStyle failed: {err:?}");
                None
            }
        }
    }

    fn set_inline_width(&self, width: &str) {
        let style = self.element.style();
        let result = if width.is_empty() {
            style.remove_property("width").map(drop)
        } else {
            style.set_property("width", width)
        };
        if let Err(err) = result {
            log::warn!("failed to set input width to {width:?}: {err:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
    use web_sys::HtmlIFrameElement;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// An input mounted inside a fresh same-origin iframe.
    fn iframe_input() -> (Document, HtmlInputElement) {
        let document = web_sys::window().unwrap().document().unwrap();
        let iframe = document
            .create_element("iframe")
            .unwrap()
            .dyn_into::<HtmlIFrameElement>()
            .unwrap();
        document.body().unwrap().append_child(&iframe).unwrap();
        let inner = iframe.content_document().unwrap();
        let input = inner
            .create_element("input")
            .unwrap()
            .dyn_into::<HtmlInputElement>()
            .unwrap();
        inner.body().unwrap().append_child(&input).unwrap();
        (inner, input)
    }

    #[wasm_bindgen_test]
    fn probes_are_laid_out_in_the_inputs_document() {
        let (inner, input) = iframe_input();
        let surface = DomSurface::for_node(&input).unwrap();
        assert_ne!(surface.document, DomSurface::new().unwrap().document);

        let probe = surface.create_probe().unwrap();
        surface.attach(&probe).unwrap();
        assert_eq!(probe.owner_document(), Some(inner.clone()));
        assert_eq!(probe.parent_node(), inner.body().map(Node::from));

        surface.detach(&probe);
        assert!(probe.parent_node().is_none());
    }

    #[wasm_bindgen_test]
    fn computed_style_is_read_from_the_inputs_window() {
        let (_inner, input) = iframe_input();
        input.style().set_property("font-size", "23px").unwrap();
        let style = WebInput::new(input)
            .computed_style()
            .expect("connected input has a computed style");
        assert_eq!(style.property_value("font-size"), "23px");
    }

    #[wasm_bindgen_test]
    fn detached_inputs_have_no_computed_style() {
        let (_inner, input) = iframe_input();
        input.remove();
        assert!(WebInput::new(input).computed_style().is_none());
    }
}
