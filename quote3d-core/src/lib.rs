/// Quote3D Core Library - Mesh metrology and print-quote estimation
///
/// This library provides the stateless core of the quoting widget: mesh
/// loading, volume and bounding-box measurement, centering, unit and scale
/// adjustment, and price estimation.

pub mod bounds;
pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod obj;
pub mod pipeline;
pub mod quote;
pub mod stl;
pub mod transform;
pub mod units;
pub mod volume;

// Re-export commonly used types
pub use bounds::{center_in_place, compute_bounds, BoundingBox, Extents};
pub use config::QuoteConfig;
pub use error::{Error, Result};
pub use geometry::{Mesh, Triangle, FLOATS_PER_TRIANGLE};
pub use loader::{load_mesh, MeshFormat, MeshLoader, ObjLoader, StlLoader};
pub use pipeline::{MeshReport, QuotePipeline, QuoteRequest, QuoteSummary};
pub use quote::{estimate_price, volume_from_dimensions, PriceEstimate, PriceTable, QUOTE_DISCLAIMER};
pub use transform::{ScaleFactor, Transform};
pub use units::LengthUnit;
pub use volume::{compute_volume, measure_volume, signed_volume, VolumeResult};
