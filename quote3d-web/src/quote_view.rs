/// JavaScript view of a quote summary
use quote3d_core::QuoteSummary;
use wasm_bindgen::prelude::*;

/// Quote returned to the page.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const view = widget.quote("PLA", 100, 1);
/// // label.textContent = `${view.total_price().toFixed(2)} ${view.currency()}`;
/// // alert(view.disclaimer());
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct QuoteView {
    summary: QuoteSummary,
}

impl From<QuoteSummary> for QuoteView {
    fn from(summary: QuoteSummary) -> Self {
        Self { summary }
    }
}

impl QuoteView {
    pub fn summary(&self) -> &QuoteSummary {
        &self.summary
    }
}

#[wasm_bindgen]
impl QuoteView {
    pub fn volume_cm3(&self) -> f64 {
        self.summary.volume_cm3
    }

    pub fn scaled_volume_cm3(&self) -> f64 {
        self.summary.scaled_volume_cm3
    }

    /// Bounding-box extents as `[x, y, z]` in `extents_unit()`
    pub fn extents(&self) -> Vec<f64> {
        let e = &self.summary.bounding_box_extents;
        vec![e.x, e.y, e.z]
    }

    pub fn extents_unit(&self) -> String {
        self.summary.extents_unit.to_string()
    }

    pub fn unit_price(&self) -> f64 {
        self.summary.unit_price
    }

    pub fn total_price(&self) -> f64 {
        self.summary.total_price
    }

    pub fn currency(&self) -> String {
        self.summary.currency.clone()
    }

    pub fn disclaimer(&self) -> String {
        self.summary.disclaimer.clone()
    }

    /// Whole summary as JSON, e.g. for an order-intake request body
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.summary).unwrap_or_default()
    }
}
