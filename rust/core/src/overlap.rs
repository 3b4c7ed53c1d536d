// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feature ids and the raw overlap records reported by a geometry engine.

use std::fmt::Debug;
use std::hash::Hash;

/// Identifier of one input feature.
///
/// Any cloneable, totally ordered, hashable type qualifies: integer indices,
/// string keys, or caller newtypes.
pub trait FeatureId: Clone + Eq + Ord + Hash + Debug {}

impl<T: Clone + Eq + Ord + Hash + Debug> FeatureId for T {}

/// Dimension of the shared region between two overlapping features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlapKind {
    /// Features touch at one or more isolated points.
    Point = 0,
    /// Features share a boundary stretch of positive length.
    Line = 1,
    /// Features share a region of positive area.
    Area = 2,
}

impl OverlapKind {
    pub fn is_point(&self) -> bool {
        matches!(self, OverlapKind::Point)
    }

    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlapKind::Point => "Point",
            OverlapKind::Line => "Line",
            OverlapKind::Area => "Area",
        }
    }
}

impl std::fmt::Display for OverlapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the geometry engine's all-against-all overlay.
///
/// Every feature is also reported against itself (`left == right`); those
/// self records are what isolation detection counts against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlapRecord<I> {
    pub left: I,
    pub right: I,
    pub kind: OverlapKind,
}

impl<I: FeatureId> OverlapRecord<I> {
    pub fn new(left: I, right: I, kind: OverlapKind) -> Self {
        Self { left, right, kind }
    }

    /// Self-overlap record for a single feature.
    pub fn reflexive(id: I, kind: OverlapKind) -> Self {
        Self {
            left: id.clone(),
            right: id,
            kind,
        }
    }

    pub fn is_self(&self) -> bool {
        self.left == self.right
    }
}
