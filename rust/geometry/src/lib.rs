//! Adjacency Dissolve Geometry
//!
//! Reference geometry engine and shape union for planar polygon features,
//! using i_overlay for polygon booleans and nalgebra for points.

pub mod attributes;
pub mod bool2d;
pub mod contact;
pub mod dissolve;
pub mod engine;
pub mod error;
pub mod feature;
pub mod polygon;

// Re-export nalgebra types for convenience
pub use nalgebra::Point2;

pub use attributes::{AttrValue, AttributeMerge, Attributes};
pub use contact::{classify_contact, classify_self};
pub use dissolve::{adjacency_dissolve, DissolveOptions, DissolvedFeature, PolygonUnion};
pub use engine::{PolygonOverlayEngine, DEFAULT_TOLERANCE};
pub use error::{Error, Result};
pub use feature::Feature;
pub use polygon::Polygon;
