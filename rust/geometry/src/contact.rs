// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contact classification between two polygons.
//!
//! Reports the dimension of what two polygons share: a region (`Area`), a
//! boundary stretch (`Line`), isolated touch points (`Point`), or nothing.

use adjacency_dissolve_core::OverlapKind;
use nalgebra::Point2;

use crate::bool2d::{bounds_overlap, intersection_area, point_in_polygon};
use crate::polygon::{Polygon, MIN_AREA_THRESHOLD};

/// Dimension of a feature's overlap with itself.
pub fn classify_self(polygon: &Polygon, tolerance: f64) -> OverlapKind {
    if !polygon.is_degenerate() {
        return OverlapKind::Area;
    }
    match polygon.bounds() {
        Some((min, max)) if (max - min).norm() > tolerance => OverlapKind::Line,
        _ => OverlapKind::Point,
    }
}

/// Dimension of the overlap between two different polygons, if any.
///
/// Area wins over line, line over point.
pub fn classify_contact(a: &Polygon, b: &Polygon, tolerance: f64) -> Option<OverlapKind> {
    let (Some(bounds_a), Some(bounds_b)) = (a.bounds(), b.bounds()) else {
        return None;
    };
    if !bounds_overlap(&bounds_a, &bounds_b, tolerance) {
        return None;
    }

    if intersection_area(a, b) > MIN_AREA_THRESHOLD {
        return Some(OverlapKind::Area);
    }

    let mut best: Option<OverlapKind> = None;
    for (p1, p2) in a.boundary_segments() {
        for (q1, q2) in b.boundary_segments() {
            match segment_contact(&p1, &p2, &q1, &q2, tolerance) {
                Some(OverlapKind::Line) => return Some(OverlapKind::Line),
                Some(kind) => best = best.max(Some(kind)),
                None => {}
            }
        }
    }
    let interior =
        degenerate_overlap(a, b, tolerance).or_else(|| degenerate_overlap(b, a, tolerance));
    best.max(interior)
}

/// Overlap of a point or line feature with the interior of a polygon.
///
/// A line is a `Line` overlap when more than `tolerance` of its length lies
/// inside `outer`, whether or not it also crosses the boundary.
fn degenerate_overlap(inner: &Polygon, outer: &Polygon, tolerance: f64) -> Option<OverlapKind> {
    if !inner.is_degenerate() || outer.is_degenerate() {
        return None;
    }
    match classify_self(inner, tolerance) {
        OverlapKind::Line => {
            (interior_length(inner, outer) > tolerance).then_some(OverlapKind::Line)
        }
        _ => inside(inner, outer).then_some(OverlapKind::Point),
    }
}

fn inside(inner: &Polygon, outer: &Polygon) -> bool {
    inner.outer.iter().all(|p| point_in_polygon(p, outer))
}

/// Length of the path through `line`'s vertices that lies inside `outer`.
///
/// Each segment is split where it crosses a boundary of `outer`; pieces whose
/// midpoint falls inside count toward the total.
fn interior_length(line: &Polygon, outer: &Polygon) -> f64 {
    let mut total = 0.0;
    for pair in line.outer.windows(2) {
        let (p1, p2) = (&pair[0], &pair[1]);
        let d = p2 - p1;

        let mut cuts = vec![0.0, 1.0];
        for (q1, q2) in outer.boundary_segments() {
            let e = q2 - q1;
            let denom = d.perp(&e);
            if denom.abs() <= f64::EPSILON {
                continue;
            }
            let w = q1 - p1;
            let t = w.perp(&e) / denom;
            let u = w.perp(&d) / denom;
            if (0.0..=1.0).contains(&u) && t > 0.0 && t < 1.0 {
                cuts.push(t);
            }
        }
        cuts.sort_by(f64::total_cmp);

        for span in cuts.windows(2) {
            let (t0, t1) = (span[0], span[1]);
            if t1 <= t0 {
                continue;
            }
            let mid = p1 + d * ((t0 + t1) / 2.0);
            if point_in_polygon(&mid, outer) {
                total += d.norm() * (t1 - t0);
            }
        }
    }
    total
}

/// Contact between two segments within `tolerance`.
///
/// Collinear segments overlapping for more than `tolerance` are a `Line`;
/// any other touch or crossing is a `Point`.
pub fn segment_contact(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    q1: &Point2<f64>,
    q2: &Point2<f64>,
    tolerance: f64,
) -> Option<OverlapKind> {
    let d = p2 - p1;
    let e = q2 - q1;
    let len_p = d.norm();
    let len_q = e.norm();

    if len_p <= tolerance || len_q <= tolerance {
        return (segment_distance(p1, p2, q1, q2) <= tolerance).then_some(OverlapKind::Point);
    }

    let off_q1 = d.perp(&(q1 - p1)).abs() / len_p;
    let off_q2 = d.perp(&(q2 - p1)).abs() / len_p;
    if off_q1 <= tolerance && off_q2 <= tolerance {
        let dir = d / len_p;
        let t1 = (q1 - p1).dot(&dir);
        let t2 = (q2 - p1).dot(&dir);
        let overlap = t1.max(t2).min(len_p) - t1.min(t2).max(0.0);
        return if overlap > tolerance {
            Some(OverlapKind::Line)
        } else if overlap >= -tolerance {
            Some(OverlapKind::Point)
        } else {
            None
        };
    }

    (segment_distance(p1, p2, q1, q2) <= tolerance).then_some(OverlapKind::Point)
}

/// Orientation of `c` relative to the directed line `a -> b`.
fn orient(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b - a).perp(&(c - a))
}

fn point_segment_distance(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (a + ab * t - p).norm()
}

/// Shortest distance between two closed segments.
fn segment_distance(p1: &Point2<f64>, p2: &Point2<f64>, q1: &Point2<f64>, q2: &Point2<f64>) -> f64 {
    let o1 = orient(p1, p2, q1);
    let o2 = orient(p1, p2, q2);
    let o3 = orient(q1, q2, p1);
    let o4 = orient(q1, q2, p2);
    if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
        return 0.0;
    }

    point_segment_distance(q1, p1, p2)
        .min(point_segment_distance(q2, p1, p2))
        .min(point_segment_distance(p1, q1, q2))
        .min(point_segment_distance(p2, q1, q2))
}
