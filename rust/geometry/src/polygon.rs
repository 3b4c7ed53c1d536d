// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar polygon features

use crate::bool2d::{compute_signed_area, contour_bounds};
use crate::error::{Error, Result};
use nalgebra::Point2;

/// Polygons with less area than this are treated as degenerate (points or lines)
pub const MIN_AREA_THRESHOLD: f64 = 1e-10;

/// Planar polygon with optional holes
///
/// Rings are implicitly closed: the last vertex connects back to the first.
/// A one-vertex outer ring is a point feature, a two-vertex ring a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Outer boundary
    pub outer: Vec<Point2<f64>>,
    /// Holes
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Polygon {
    /// Create a polygon without holes
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Create a polygon from `[x, y]` coordinate pairs
    pub fn from_coords(coords: &[[f64; 2]]) -> Self {
        Self::new(coords.iter().map(|c| Point2::new(c[0], c[1])).collect())
    }

    /// Axis-aligned rectangle
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    /// Add a hole to the polygon
    pub fn add_hole(&mut self, hole: Vec<Point2<f64>>) {
        self.holes.push(hole);
    }

    pub fn with_hole(mut self, hole: Vec<Point2<f64>>) -> Self {
        self.add_hole(hole);
        self
    }

    /// Check that the polygon can be overlaid
    pub fn validate(&self) -> Result<()> {
        if self.outer.is_empty() {
            return Err(Error::InvalidPolygon(
                "Outer ring has no vertices".to_string(),
            ));
        }
        let all_finite = std::iter::once(&self.outer)
            .chain(self.holes.iter())
            .flatten()
            .all(|p| p.x.is_finite() && p.y.is_finite());
        if !all_finite {
            return Err(Error::InvalidPolygon(
                "Coordinates must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Enclosed area (outer minus holes)
    pub fn area(&self) -> f64 {
        let holes: f64 = self
            .holes
            .iter()
            .map(|h| compute_signed_area(h).abs())
            .sum();
        (compute_signed_area(&self.outer).abs() - holes).max(0.0)
    }

    /// Zero-area polygon: a point or a line
    pub fn is_degenerate(&self) -> bool {
        self.area() <= MIN_AREA_THRESHOLD
    }

    /// Bounding box of the outer ring
    pub fn bounds(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        contour_bounds(&self.outer)
    }

    /// All rings, outer first
    pub fn rings(&self) -> impl Iterator<Item = &[Point2<f64>]> {
        std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(|h| h.as_slice()))
    }

    /// Edges of every ring, including the closing edge
    ///
    /// A one-vertex ring yields a single zero-length segment.
    pub fn boundary_segments(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        self.rings().flat_map(|ring| {
            let n = ring.len();
            (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
        })
    }
}
