use folio_core::FolioError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::style;

fn dom_err(context: &str) -> impl Fn(JsValue) -> FolioError + '_ {
    move |e| FolioError::Dom(format!("{context}: {e:?}"))
}

/// The fixed, full-viewport element behind the page.
///
/// Starts in the static look (gradient overlays, no canvas). `show_canvas`
/// swaps in the canvas with the vignette overlays, at opacity 0.
pub struct BackgroundLayer {
    document: Document,
    root: HtmlElement,
    canvas: Option<HtmlCanvasElement>,
}

impl BackgroundLayer {
    pub fn attach() -> Result<Self, FolioError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| FolioError::HostUnavailable("no document".into()))?;
        let body = document
            .body()
            .ok_or_else(|| FolioError::HostUnavailable("no <body>".into()))?;

        let root = create_div(&document, style::ROOT_STYLE)?;
        root.set_attribute("aria-hidden", "true")
            .map_err(dom_err("aria-hidden"))?;
        body.prepend_with_node_1(&root)
            .map_err(dom_err("prepend layer"))?;

        let layer = Self {
            document,
            root,
            canvas: None,
        };
        layer.fill_static()?;
        Ok(layer)
    }

    fn fill_static(&self) -> Result<(), FolioError> {
        self.root.set_inner_html("");
        for overlay in [style::STATIC_GLOW, style::STATIC_SHADE] {
            self.append_overlay(overlay)?;
        }
        Ok(())
    }

    fn append_overlay(&self, extra: &str) -> Result<(), FolioError> {
        let div = create_div(&self.document, &format!("{}{extra}", style::OVERLAY_BASE))?;
        self.root
            .append_child(&div)
            .map_err(dom_err("append overlay"))?;
        Ok(())
    }

    /// Replace the static look with a transparent canvas plus vignette.
    /// Returns the canvas; calling twice returns the same element.
    pub fn show_canvas(&mut self) -> Result<HtmlCanvasElement, FolioError> {
        if let Some(canvas) = &self.canvas {
            return Ok(canvas.clone());
        }
        self.root.set_inner_html("");

        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .map_err(dom_err("create canvas"))?
            .dyn_into()
            .map_err(|_| FolioError::Dom("element is not a canvas".into()))?;
        canvas
            .set_attribute("style", style::CANVAS_STYLE)
            .map_err(dom_err("canvas style"))?;
        self.root
            .append_child(&canvas)
            .map_err(dom_err("append canvas"))?;

        for overlay in [style::VIGNETTE, style::ANIMATED_SHADE] {
            self.append_overlay(overlay)?;
        }

        self.canvas = Some(canvas.clone());
        self.set_opacity(0.0);
        Ok(canvas)
    }

    pub fn set_opacity(&self, opacity: f32) {
        let Some(canvas) = &self.canvas else {
            return;
        };
        if let Err(e) = canvas
            .style()
            .set_property("opacity", &style::opacity_value(opacity))
        {
            log::warn!("Failed to set opacity: {e:?}");
        }
    }

    /// Go back to the static look, e.g. after GPU init failed.
    pub fn revert_to_static(&mut self) -> Result<(), FolioError> {
        self.canvas = None;
        self.fill_static()
    }

    /// Current canvas size in CSS pixels.
    pub fn css_size(&self) -> (f32, f32) {
        match &self.canvas {
            Some(c) => (c.client_width() as f32, c.client_height() as f32),
            None => (0.0, 0.0),
        }
    }

    pub fn canvas(&self) -> Option<&HtmlCanvasElement> {
        self.canvas.as_ref()
    }

    pub fn remove(&mut self) {
        self.canvas = None;
        self.root.remove();
    }
}

fn create_div(document: &Document, css: &str) -> Result<HtmlElement, FolioError> {
    let div: HtmlElement = document
        .create_element("div")
        .map_err(dom_err("create div"))?
        .dyn_into()
        .map_err(|_| FolioError::Dom("element is not an HtmlElement".into()))?;
    div.set_attribute("style", css)
        .map_err(dom_err("div style"))?;
    Ok(div)
}
