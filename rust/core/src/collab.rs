// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Seams to the geometry engine and the shape-union operation.

use crate::assign::GroupAssignment;
use crate::error::Error;
use crate::overlap::{FeatureId, OverlapRecord};

/// Geometry engine boundary: reports which features overlap.
pub trait OverlapSource<I: FeatureId> {
    /// Every feature id the source knows about.
    fn feature_ids(&self) -> Vec<I>;

    /// All-against-all overlay rows, including one self record per feature.
    fn overlap_records(&self) -> Vec<OverlapRecord<I>>;
}

/// Shape-union boundary: merges the features of each group.
pub trait ShapeUnion<I: FeatureId> {
    type Output;
    type Error: From<Error>;

    fn union_groups(&self, assignment: &GroupAssignment<I>) -> Result<Self::Output, Self::Error>;
}
