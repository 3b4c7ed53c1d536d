// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! All-against-all polygon overlay.
//!
//! Produces the overlap rows the grouping stage consumes: one self record per
//! feature and two symmetric records for every touching pair.

use adjacency_dissolve_core::{
    ensure_no_reserved_names, ensure_unique_ids, FeatureId, OverlapKind, OverlapRecord,
    OverlapSource,
};
use nalgebra::Point2;
use rayon::prelude::*;

use crate::bool2d::bounds_overlap;
use crate::contact::{classify_contact, classify_self};
use crate::error::{Error, Result};
use crate::feature::Feature;

/// Default snapping tolerance for contact detection
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Overlay engine over a validated set of polygon features
#[derive(Debug, Clone)]
pub struct PolygonOverlayEngine<I> {
    features: Vec<Feature<I>>,
    bounds: Vec<(Point2<f64>, Point2<f64>)>,
    tolerance: f64,
}

impl<I: FeatureId + Send + Sync> PolygonOverlayEngine<I> {
    /// Validate features and build the engine
    ///
    /// Fails on duplicate ids, reserved attribute names, empty rings or
    /// non-finite coordinates.
    pub fn new(features: Vec<Feature<I>>, tolerance: f64) -> Result<Self> {
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(Error::InvalidPolygon(format!(
                "Tolerance must be finite and non-negative, got {tolerance}"
            )));
        }

        ensure_unique_ids(features.iter().map(|f| f.id.clone()))?;
        for feature in &features {
            ensure_no_reserved_names(feature.attributes.keys().map(String::as_str))?;
        }

        let mut bounds = Vec::with_capacity(features.len());
        for feature in &features {
            feature.geometry.validate().map_err(|e| match e {
                Error::InvalidPolygon(msg) => {
                    Error::InvalidPolygon(format!("feature {:?}: {}", feature.id, msg))
                }
                other => other,
            })?;
            // validate() guarantees a non-empty outer ring
            if let Some(b) = feature.geometry.bounds() {
                bounds.push(b);
            }
        }

        Ok(Self {
            features,
            bounds,
            tolerance,
        })
    }

    pub fn features(&self) -> &[Feature<I>] {
        &self.features
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Touching pairs `(i, j, kind)` with `i < j`, by feature position
    pub fn contacts(&self) -> Vec<(usize, usize, OverlapKind)> {
        let n = self.features.len();
        let tolerance = self.tolerance;

        (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                (i + 1..n).filter_map(move |j| {
                    if !bounds_overlap(&self.bounds[i], &self.bounds[j], tolerance) {
                        return None;
                    }
                    classify_contact(&self.features[i].geometry, &self.features[j].geometry, tolerance)
                        .map(|kind| (i, j, kind))
                })
            })
            .collect()
    }
}

impl<I: FeatureId + Send + Sync> OverlapSource<I> for PolygonOverlayEngine<I> {
    fn feature_ids(&self) -> Vec<I> {
        self.features.iter().map(|f| f.id.clone()).collect()
    }

    fn overlap_records(&self) -> Vec<OverlapRecord<I>> {
        let n = self.features.len();
        let mut rows: Vec<Vec<(usize, OverlapKind)>> = self
            .features
            .iter()
            .enumerate()
            .map(|(i, f)| vec![(i, classify_self(&f.geometry, self.tolerance))])
            .collect();

        let contacts = self.contacts();
        for &(i, j, kind) in &contacts {
            rows[i].push((j, kind));
            rows[j].push((i, kind));
        }

        let mut records = Vec::with_capacity(n + contacts.len() * 2);
        for (i, mut row) in rows.into_iter().enumerate() {
            row.sort_by_key(|&(j, _)| j);
            let left = &self.features[i].id;
            records.extend(
                row.into_iter()
                    .map(|(j, kind)| OverlapRecord::new(left.clone(), self.features[j].id.clone(), kind)),
            );
        }

        tracing::debug!(
            features = n,
            contacts = contacts.len(),
            records = records.len(),
            "computed polygon overlay"
        );

        records
    }
}
