/// Quote3D Web - WASM bindings for the browser quoting widget
///
/// The page keeps one `QuoteWidget` instead of global scene variables. It
/// hands over the bytes of a selected file, receives the centered vertex
/// buffer for its renderer, and asks for quotes as the form changes.
///
/// Exported methods convert errors to `JsValue` strings. The `*_internal`
/// methods return core errors so native tests do not need a JS host.

use log::info;
use quote3d_core::{
    load_mesh, Error, Mesh, MeshReport, QuoteConfig, QuotePipeline, QuoteRequest,
};
use wasm_bindgen::prelude::*;

mod quote_view;

pub use quote_view::QuoteView;

fn to_js(err: Error) -> JsValue {
    let message = err.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Form fields arrive as JS numbers; negative counts are rejected here
fn quantity_from_js(quantity: i32) -> quote3d_core::Result<u32> {
    u32::try_from(quantity)
        .ok()
        .filter(|&q| q > 0)
        .ok_or_else(|| Error::invalid_input(format!("quantity must be at least 1 (got {quantity})")))
}

struct LoadedModel {
    name: String,
    mesh: Mesh,
    report: MeshReport,
}

#[wasm_bindgen]
pub struct QuoteWidget {
    pipeline: QuotePipeline,
    model: Option<LoadedModel>,
}

impl QuoteWidget {
    pub fn with_config_internal(config: QuoteConfig) -> quote3d_core::Result<Self> {
        Ok(Self {
            pipeline: QuotePipeline::new(config)?,
            model: None,
        })
    }

    pub fn with_config_json_internal(json: &str) -> quote3d_core::Result<Self> {
        QuoteConfig::from_json_str(json).and_then(Self::with_config_internal)
    }

    /// Replace the current model; the previous one is kept if loading fails
    pub fn load_model_internal(&mut self, file_name: &str, bytes: &[u8]) -> quote3d_core::Result<()> {
        let mut mesh = load_mesh(file_name, bytes)?;
        let report = self.pipeline.analyze(&mut mesh)?;
        info!(
            "{file_name}: {} triangles, {:.3} cm³",
            report.triangle_count, report.volume.volume_cm3
        );

        self.model = Some(LoadedModel {
            name: file_name.to_string(),
            mesh,
            report,
        });
        Ok(())
    }

    pub fn quote_internal(
        &self,
        material: &str,
        scale_percent: f64,
        quantity: i32,
    ) -> quote3d_core::Result<QuoteView> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| Error::invalid_mesh("no model loaded"))?;
        let request = QuoteRequest::new(material, scale_percent, quantity_from_js(quantity)?);
        self.pipeline.quote(&model.report, &request).map(QuoteView::from)
    }

    pub fn quote_dimensions_internal(
        &self,
        length_mm: f64,
        width_mm: f64,
        height_mm: f64,
        material: &str,
        scale_percent: f64,
        quantity: i32,
    ) -> quote3d_core::Result<QuoteView> {
        let request = QuoteRequest::new(material, scale_percent, quantity_from_js(quantity)?);
        self.pipeline
            .quote_dimensions(length_mm, width_mm, height_mm, &request)
            .map(QuoteView::from)
    }

    pub fn positions_f32(&self) -> Vec<f32> {
        self.model
            .as_ref()
            .map(|m| m.mesh.positions().iter().map(|&v| v as f32).collect())
            .unwrap_or_default()
    }
}

#[wasm_bindgen]
impl QuoteWidget {
    /// Widget with the default price table and millimeter units
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<QuoteWidget, JsValue> {
        Self::with_config_internal(QuoteConfig::default()).map_err(to_js)
    }

    /// Widget configured from a JSON document
    pub fn with_config(json: &str) -> Result<QuoteWidget, JsValue> {
        Self::with_config_json_internal(json).map_err(to_js)
    }

    /// Parse a selected file; the extension picks the loader
    pub fn load_model(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), JsValue> {
        self.load_model_internal(file_name, bytes).map_err(to_js)
    }

    pub fn clear_model(&mut self) {
        self.model = None;
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn model_name(&self) -> Option<String> {
        self.model.as_ref().map(|m| m.name.clone())
    }

    pub fn triangle_count(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.report.triangle_count)
    }

    /// Normalized vertex buffer for the renderer, three floats per vertex
    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.positions_f32()[..])
    }

    /// Quote the loaded model
    pub fn quote(&self, material: &str, scale_percent: f64, quantity: i32) -> Result<QuoteView, JsValue> {
        self.quote_internal(material, scale_percent, quantity)
            .map_err(to_js)
    }

    /// Quote a box from the form's length, width and height in millimeters
    pub fn quote_dimensions(
        &self,
        length_mm: f64,
        width_mm: f64,
        height_mm: f64,
        material: &str,
        scale_percent: f64,
        quantity: i32,
    ) -> Result<QuoteView, JsValue> {
        self.quote_dimensions_internal(length_mm, width_mm, height_mm, material, scale_percent, quantity)
            .map_err(to_js)
    }

    /// Material names in the configured price table
    pub fn materials(&self) -> Vec<String> {
        self.pipeline
            .config()
            .prices
            .materials()
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Forward Rust panics to the browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    Ok(())
}
