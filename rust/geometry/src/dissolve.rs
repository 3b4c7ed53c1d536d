// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adjacency dissolve of polygon features.
//!
//! Features that touch (directly or through a chain of neighbours) are merged
//! into one output feature. Untouched features pass through on their own.

use adjacency_dissolve_core::{
    AdjacencyGrouper, DissolveConfig, FeatureId, GroupAssignment, GroupLabel, ShapeUnion,
};
use rustc_hash::FxHashMap;

use crate::attributes::{AttributeMerge, Attributes};
use crate::bool2d::union_polygons;
use crate::engine::{PolygonOverlayEngine, DEFAULT_TOLERANCE};
use crate::error::{Error, Result};
use crate::feature::Feature;
use crate::polygon::Polygon;

/// Options for [`adjacency_dissolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct DissolveOptions {
    /// Adjacency grouping settings
    pub grouping: DissolveConfig,
    /// Snapping tolerance for contact detection
    pub tolerance: f64,
    /// Attribute policy for merged groups
    pub attributes: AttributeMerge,
}

impl DissolveOptions {
    /// Load options from environment variables.
    ///
    /// Reads the grouping variables of [`DissolveConfig::from_env`] plus
    /// `DISSOLVE_TOLERANCE` (default `1e-9`) and `DISSOLVE_ATTRIBUTES`
    /// (`first` or `drop`, default `first`).
    pub fn from_env() -> Self {
        Self {
            grouping: DissolveConfig::from_env(),
            tolerance: std::env::var("DISSOLVE_TOLERANCE")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|t| t.is_finite() && *t >= 0.0)
                .unwrap_or(DEFAULT_TOLERANCE),
            attributes: std::env::var("DISSOLVE_ATTRIBUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }

    pub fn with_point_adjacency(mut self, include: bool) -> Self {
        self.grouping.include_point_adjacency = include;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_attributes(mut self, attributes: AttributeMerge) -> Self {
        self.attributes = attributes;
        self
    }
}

impl Default for DissolveOptions {
    fn default() -> Self {
        Self {
            grouping: DissolveConfig::default(),
            tolerance: DEFAULT_TOLERANCE,
            attributes: AttributeMerge::default(),
        }
    }
}

/// One output feature: the union of a group's members.
#[derive(Debug, Clone, PartialEq)]
pub struct DissolvedFeature<I> {
    pub label: GroupLabel,
    /// Member ids, ascending
    pub members: Vec<I>,
    /// Merged geometry; several parts if members only touch at points
    pub geometry: Vec<Polygon>,
    pub attributes: Attributes,
}

impl<I> DissolvedFeature<I> {
    pub fn area(&self) -> f64 {
        self.geometry.iter().map(Polygon::area).sum()
    }
}

/// Shape union over a borrowed feature set
pub struct PolygonUnion<'a, I> {
    by_id: FxHashMap<&'a I, &'a Feature<I>>,
    policy: AttributeMerge,
}

impl<'a, I: FeatureId> PolygonUnion<'a, I> {
    pub fn new(features: &'a [Feature<I>], policy: AttributeMerge) -> Self {
        Self {
            by_id: features.iter().map(|f| (&f.id, f)).collect(),
            policy,
        }
    }

    fn lookup(&self, id: &I) -> Result<&'a Feature<I>> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| Error::MissingFeature(format!("{:?}", id)))
    }
}

impl<I: FeatureId> ShapeUnion<I> for PolygonUnion<'_, I> {
    type Output = Vec<DissolvedFeature<I>>;
    type Error = Error;

    fn union_groups(&self, assignment: &GroupAssignment<I>) -> Result<Self::Output> {
        let mut dissolved = Vec::with_capacity(assignment.group_count());

        for (label, members) in assignment.groups() {
            let features = members
                .iter()
                .map(|id| self.lookup(id))
                .collect::<Result<Vec<_>>>()?;

            let shapes: Vec<&Polygon> = features.iter().map(|f| &f.geometry).collect();
            let geometry = union_polygons(&shapes);

            let attributes = self.policy.merge(features.iter().map(|f| &f.attributes));

            dissolved.push(DissolvedFeature {
                label,
                members: members.to_vec(),
                geometry,
                attributes,
            });
        }

        tracing::debug!(groups = dissolved.len(), "dissolved feature groups");
        Ok(dissolved)
    }
}

/// Dissolve every group of mutually adjacent features into one feature
///
/// Ids must be unique and attribute names must not collide with the reserved
/// names. Output is ordered by group label: adjacency clusters first (by
/// smallest member id), then untouched features (by id).
pub fn adjacency_dissolve<I>(
    features: Vec<Feature<I>>,
    options: &DissolveOptions,
) -> Result<Vec<DissolvedFeature<I>>>
where
    I: FeatureId + Send + Sync,
{
    let engine = PolygonOverlayEngine::new(features, options.tolerance)?;
    let union = PolygonUnion::new(engine.features(), options.attributes);
    AdjacencyGrouper::new(options.grouping.clone()).dissolve(&engine, &union)
}
