/// Load, normalize, measure and price a model
use log::info;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::bounds::{center_in_place, compute_bounds, BoundingBox, Extents};
use crate::config::QuoteConfig;
use crate::error::Result;
use crate::geometry::Mesh;
use crate::loader::load_mesh;
use crate::quote::{estimate_price, volume_from_dimensions, QUOTE_DISCLAIMER};
use crate::transform::ScaleFactor;
use crate::units::LengthUnit;
use crate::volume::{measure_volume, VolumeResult};

/// What the customer asked to be quoted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    pub material: String,
    pub scale_percent: f64,
    pub quantity: u32,
}

impl QuoteRequest {
    pub fn new(material: impl Into<String>, scale_percent: f64, quantity: u32) -> Self {
        Self {
            material: material.into(),
            scale_percent,
            quantity,
        }
    }
}

impl Default for QuoteRequest {
    fn default() -> Self {
        Self::new("PLA", 100.0, 1)
    }
}

/// Geometry facts about one normalized mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshReport {
    pub triangle_count: usize,
    /// Bounds after normalization
    pub bounds: BoundingBox,
    /// Translation applied while centering (zero when centering is off)
    pub translation: Vector3<f64>,
    pub volume: VolumeResult,
}

/// Plain structured quote handed to the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// Unscaled model volume
    pub volume_cm3: f64,
    /// Volume after the scale factor
    pub scaled_volume_cm3: f64,
    /// Size of the part as printed, in `extents_unit`
    pub bounding_box_extents: Extents,
    pub extents_unit: LengthUnit,
    pub unit_price: f64,
    pub total_price: f64,
    pub currency: String,
    pub material: String,
    pub price_per_cm3: f64,
    pub scale_percent: f64,
    pub quantity: u32,
    pub disclaimer: String,
}

/// The one context object a front end holds.
///
/// It carries the configuration; meshes pass through and are never retained.
///
/// ```
/// use quote3d_core::{Mesh, QuoteConfig, QuotePipeline, QuoteRequest};
///
/// let pipeline = QuotePipeline::new(QuoteConfig::default()).unwrap();
/// let mut part = Mesh::cube(20.0); // 20 mm cube, 8 cm³
/// let report = pipeline.analyze(&mut part).unwrap();
/// let summary = pipeline.quote(&report, &QuoteRequest::new("PLA", 100.0, 3)).unwrap();
/// assert!((summary.total_price - 2.40).abs() < 1e-9);
/// ```
pub struct QuotePipeline {
    config: QuoteConfig,
}

impl QuotePipeline {
    pub fn new(config: QuoteConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Bound, optionally center, and measure a mesh in place
    pub fn analyze(&self, mesh: &mut Mesh) -> Result<MeshReport> {
        let bounds = compute_bounds(mesh.positions())?;

        let (translation, bounds) = if self.config.center_on_load {
            let offset = center_in_place(mesh.positions_mut(), &bounds);
            (offset, bounds.translated(&offset))
        } else {
            (Vector3::zeros(), bounds)
        };

        let volume = measure_volume(mesh.positions(), self.config.source_unit)?;

        Ok(MeshReport {
            triangle_count: mesh.triangle_count(),
            bounds,
            translation,
            volume,
        })
    }

    /// Price an analyzed mesh
    pub fn quote(&self, report: &MeshReport, request: &QuoteRequest) -> Result<QuoteSummary> {
        let extents = report
            .bounds
            .extents_between(self.config.source_unit, self.config.display_unit);
        self.summarize(report.volume.volume_cm3, extents, request)
    }

    /// Parse a model file and quote it
    pub fn run(&self, file_name: &str, bytes: &[u8], request: &QuoteRequest) -> Result<QuoteSummary> {
        let mut mesh = load_mesh(file_name, bytes)?;
        let report = self.analyze(&mut mesh)?;
        info!(
            "{file_name}: {} triangles, {:.3} cm³",
            report.triangle_count, report.volume.volume_cm3
        );
        self.quote(&report, request)
    }

    /// Quote a box described by its edge lengths in millimeters
    pub fn quote_dimensions(
        &self,
        length_mm: f64,
        width_mm: f64,
        height_mm: f64,
        request: &QuoteRequest,
    ) -> Result<QuoteSummary> {
        let volume_cm3 = volume_from_dimensions(length_mm, width_mm, height_mm)?;
        let factor = LengthUnit::Millimeter.length_factor(self.config.display_unit);
        let extents = Extents {
            x: length_mm * factor,
            y: width_mm * factor,
            z: height_mm * factor,
        };
        self.summarize(volume_cm3, extents, request)
    }

    fn summarize(
        &self,
        volume_cm3: f64,
        extents: Extents,
        request: &QuoteRequest,
    ) -> Result<QuoteSummary> {
        let price_per_cm3 = self.config.prices.price_for(&request.material)?;
        let estimate = estimate_price(
            volume_cm3,
            price_per_cm3,
            request.scale_percent,
            request.quantity,
        )?;
        let linear = ScaleFactor::from_percent(request.scale_percent)?.linear();

        Ok(QuoteSummary {
            volume_cm3,
            scaled_volume_cm3: estimate.scaled_volume_cm3,
            bounding_box_extents: Extents {
                x: extents.x * linear,
                y: extents.y * linear,
                z: extents.z * linear,
            },
            extents_unit: self.config.display_unit,
            unit_price: estimate.unit_price,
            total_price: estimate.total,
            currency: self.config.currency.clone(),
            material: request.material.clone(),
            price_per_cm3,
            scale_percent: request.scale_percent,
            quantity: request.quantity,
            disclaimer: QUOTE_DISCLAIMER.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    #[test]
    fn test_analyze_centers_mesh() {
        let pipeline = QuotePipeline::new(QuoteConfig::default()).unwrap();
        let mut mesh = Mesh::cube(10.0);
        mesh.translate(&Vector3::new(50.0, 50.0, 5.0));

        let report = pipeline.analyze(&mut mesh).unwrap();
        assert_eq!(report.triangle_count, 12);
        assert_relative_eq!(report.translation, Vector3::new(-50.0, -50.0, -5.0), epsilon = 1e-9);
        assert_relative_eq!(report.bounds.center().coords, Vector3::zeros(), epsilon = 1e-9);
        assert_relative_eq!(report.volume.volume_cm3, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_analyze_without_centering() {
        let config = QuoteConfig {
            center_on_load: false,
            ..QuoteConfig::default()
        };
        let pipeline = QuotePipeline::new(config).unwrap();
        let mut mesh = Mesh::cube(10.0);
        mesh.translate(&Vector3::new(50.0, 0.0, 0.0));
        let before = mesh.clone();

        let report = pipeline.analyze(&mut mesh).unwrap();
        assert_eq!(report.translation, Vector3::zeros());
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_quote_reports_display_extents() {
        let config = QuoteConfig {
            display_unit: LengthUnit::Centimeter,
            ..QuoteConfig::default()
        };
        let pipeline = QuotePipeline::new(config).unwrap();
        let mut mesh = Mesh::cube(20.0);
        let report = pipeline.analyze(&mut mesh).unwrap();

        let summary = pipeline
            .quote(&report, &QuoteRequest::new("abs", 50.0, 2))
            .unwrap();
        assert_eq!(summary.extents_unit, LengthUnit::Centimeter);
        assert_relative_eq!(summary.bounding_box_extents.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(summary.scaled_volume_cm3, 1.0, epsilon = 1e-9);
        assert_relative_eq!(summary.unit_price, 0.12, epsilon = 1e-9);
        assert_relative_eq!(summary.total_price, 0.24, epsilon = 1e-9);
        assert_eq!(summary.disclaimer, QUOTE_DISCLAIMER);
    }

    #[test]
    fn test_quote_dimensions_matches_form_arithmetic() {
        let pipeline = QuotePipeline::new(QuoteConfig::default()).unwrap();
        let summary = pipeline
            .quote_dimensions(100.0, 100.0, 100.0, &QuoteRequest::default())
            .unwrap();
        assert_relative_eq!(summary.volume_cm3, 1000.0);
        assert_relative_eq!(summary.total_price, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unknown_material() {
        let pipeline = QuotePipeline::new(QuoteConfig::default()).unwrap();
        let result = pipeline.quote_dimensions(1.0, 1.0, 1.0, &QuoteRequest::new("Gold", 100.0, 1));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_run_rejects_unsupported_file() {
        let pipeline = QuotePipeline::new(QuoteConfig::default()).unwrap();
        let result = pipeline.run("model.glb", &[0u8; 16], &QuoteRequest::default());
        assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
    }
}
