// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Boolean Operations for Overlap Detection and Dissolve
//!
//! Polygon intersection and union using the i_overlay crate, plus the small
//! contour helpers (winding, bounds, point-in-ring) that the overlay engine
//! and the dissolve step share.
//!
//! All overlays use the NonZero fill rule with outer rings counter-clockwise
//! and holes clockwise, so overlapping inputs union instead of cancelling.

use crate::polygon::{Polygon, MIN_AREA_THRESHOLD};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

/// Area of the region shared by two polygons
///
/// Degenerate inputs (points, lines) have no area and return 0.
pub fn intersection_area(a: &Polygon, b: &Polygon) -> f64 {
    if a.is_degenerate() || b.is_degenerate() {
        return 0.0;
    }

    let subject = polygon_to_paths(a);
    let clip = polygon_to_paths(b);
    let shapes = subject.overlay(&clip, OverlayRule::Intersect, FillRule::NonZero);

    shapes.iter().map(|shape| shape_area(shape)).sum()
}

/// Union a set of polygons into as few polygons as possible
///
/// Degenerate members are unioned by dropping those that lie inside the
/// merged area; the rest are carried through unchanged.
pub fn union_polygons(polygons: &[&Polygon]) -> Vec<Polygon> {
    let (solid, degenerate): (Vec<&Polygon>, Vec<&Polygon>) =
        polygons.iter().copied().partition(|p| !p.is_degenerate());

    let mut merged: Vec<Polygon> = match solid.as_slice() {
        [] => Vec::new(),
        [only] => vec![normalize_winding(only)],
        [first, rest @ ..] => {
            let subject = polygon_to_paths(first);
            let clip: Vec<Vec<[f64; 2]>> = rest.iter().flat_map(|p| polygon_to_paths(p)).collect();
            let shapes = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
            shapes_to_polygons(&shapes)
        }
    };

    for poly in degenerate {
        let covered = poly
            .outer
            .iter()
            .all(|p| merged.iter().any(|m| point_in_polygon(p, m)));
        if !covered {
            merged.push(poly.clone());
        }
    }

    merged
}

/// Compute the signed area of a 2D contour
/// Positive = counter-clockwise, Negative = clockwise
pub fn compute_signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let n = contour.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            contour[i].x * contour[j].y - contour[j].x * contour[i].y
        })
        .sum();

    twice * 0.5
}

/// Ensure contour has counter-clockwise winding (positive area)
pub fn ensure_ccw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if compute_signed_area(contour) < 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Ensure contour has clockwise winding (for holes)
pub fn ensure_cw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if compute_signed_area(contour) > 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Check if a point is strictly inside a contour using ray casting
pub fn point_in_contour(point: &Point2<f64>, contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = contour.len() - 1;
    for (i, pi) in contour.iter().enumerate() {
        let pj = &contour[j];
        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Check if a point is inside the outer ring and outside every hole
pub fn point_in_polygon(point: &Point2<f64>, polygon: &Polygon) -> bool {
    point_in_contour(point, &polygon.outer)
        && !polygon.holes.iter().any(|h| point_in_contour(point, h))
}

/// Compute bounding box of a contour
pub fn contour_bounds(contour: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    let (first, rest) = contour.split_first()?;
    let mut min = *first;
    let mut max = *first;

    for p in rest {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    Some((min, max))
}

/// Check if two bounding boxes overlap or lie within `tolerance` of each other
pub fn bounds_overlap(
    a: &(Point2<f64>, Point2<f64>),
    b: &(Point2<f64>, Point2<f64>),
    tolerance: f64,
) -> bool {
    a.0.x <= b.1.x + tolerance
        && a.1.x + tolerance >= b.0.x
        && a.0.y <= b.1.y + tolerance
        && a.1.y + tolerance >= b.0.y
}

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Polygon with outer ring counter-clockwise and holes clockwise
fn normalize_winding(polygon: &Polygon) -> Polygon {
    Polygon {
        outer: ensure_ccw(&polygon.outer),
        holes: polygon.holes.iter().map(|h| ensure_cw(h)).collect(),
    }
}

/// Convert a polygon to i_overlay path format
fn polygon_to_paths(polygon: &Polygon) -> Vec<Vec<[f64; 2]>> {
    let mut paths = Vec::with_capacity(1 + polygon.holes.len());
    paths.push(contour_to_path(&ensure_ccw(&polygon.outer)));
    for hole in polygon.holes.iter().filter(|h| h.len() >= 3) {
        paths.push(contour_to_path(&ensure_cw(hole)));
    }
    paths
}

/// Convert a Point2 contour to i_overlay path format
fn contour_to_path(contour: &[Point2<f64>]) -> Vec<[f64; 2]> {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

fn path_to_contour(path: &[[f64; 2]]) -> Vec<Point2<f64>> {
    path.iter().map(|p| Point2::new(p[0], p[1])).collect()
}

/// Area of one i_overlay shape: first contour is the outer boundary, the rest are holes
fn shape_area(shape: &[Vec<[f64; 2]>]) -> f64 {
    let Some((outer, holes)) = shape.split_first() else {
        return 0.0;
    };
    let outer_area = compute_signed_area(&path_to_contour(outer)).abs();
    let hole_area: f64 = holes
        .iter()
        .map(|h| compute_signed_area(&path_to_contour(h)).abs())
        .sum();
    (outer_area - hole_area).max(0.0)
}

/// Convert i_overlay result shapes into polygons, dropping slivers
fn shapes_to_polygons(shapes: &[Vec<Vec<[f64; 2]>>]) -> Vec<Polygon> {
    shapes
        .iter()
        .filter(|shape| shape_area(shape) > MIN_AREA_THRESHOLD)
        .filter_map(|shape| {
            let (outer, holes) = shape.split_first()?;
            Some(Polygon {
                outer: ensure_ccw(&path_to_contour(outer)),
                holes: holes
                    .iter()
                    .map(|h| path_to_contour(h))
                    .filter(|h| compute_signed_area(h).abs() > MIN_AREA_THRESHOLD)
                    .map(|h| ensure_cw(&h))
                    .collect(),
            })
        })
        .collect()
}
