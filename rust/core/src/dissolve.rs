// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end grouping: overlap records → pairs → clusters → labels.

use rustc_hash::FxHashSet;

use crate::assign::{GroupAssignment, GroupLabelAssigner};
use crate::collab::{OverlapSource, ShapeUnion};
use crate::config::DissolveConfig;
use crate::error::Result;
use crate::extract::AdjacencyPairExtractor;
use crate::merge::ClusterMerger;
use crate::overlap::{FeatureId, OverlapRecord};
use crate::precondition::ensure_unique_ids;

/// Runs the three grouping stages in order.
///
/// Stateless apart from its configuration; every call owns its own
/// intermediate data.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGrouper {
    config: DissolveConfig,
}

impl AdjacencyGrouper {
    pub fn new(config: DissolveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DissolveConfig {
        &self.config
    }

    /// Labels every id in `all_ids` from the engine's overlap records.
    pub fn group<I, R>(&self, records: R, all_ids: &FxHashSet<I>) -> Result<GroupAssignment<I>>
    where
        I: FeatureId,
        R: IntoIterator<Item = OverlapRecord<I>>,
    {
        let extraction = AdjacencyPairExtractor::from_config(&self.config).extract(records);
        let clusters = ClusterMerger::from_config(&self.config).merge(&extraction.pairs);
        let assignment =
            GroupLabelAssigner::new().assign(&clusters, &extraction.isolated, all_ids)?;
        Ok(assignment)
    }

    /// Validates ids, groups them, and hands the labels to `union`.
    pub fn dissolve<I, S, U>(&self, source: &S, union: &U) -> std::result::Result<U::Output, U::Error>
    where
        I: FeatureId,
        S: OverlapSource<I>,
        U: ShapeUnion<I>,
    {
        let all_ids = ensure_unique_ids(source.feature_ids())?;
        let span = tracing::debug_span!("dissolve", features = all_ids.len());
        let _guard = span.enter();

        let assignment = self.group(source.overlap_records(), &all_ids)?;
        union.union_groups(&assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::GroupLabel;
    use crate::error::{AssignmentError, Error};
    use crate::overlap::OverlapKind::{self, Area, Line, Point};

    fn records(raw: &[(u32, u32, OverlapKind)]) -> Vec<OverlapRecord<u32>> {
        raw.iter()
            .map(|&(l, r, k)| OverlapRecord::new(l, r, k))
            .collect()
    }

    fn all(ids: &[u32]) -> FxHashSet<u32> {
        ids.iter().copied().collect()
    }

    #[test]
    fn isolated_and_adjacent_groups() {
        let recs = records(&[
            (1, 1, Area),
            (1, 2, Line),
            (2, 1, Line),
            (2, 2, Area),
            (7, 7, Area),
        ]);
        let assignment = AdjacencyGrouper::default().group(recs, &all(&[1, 2, 7])).unwrap();
        assert_eq!(assignment.group_count(), 2);
        assert!(assignment.same_group(&1, &2));
        assert_eq!(assignment.label(&7), Some(GroupLabel(1)));
    }

    #[test]
    fn point_filter_splits_group() {
        let recs = records(&[
            (1, 1, Area),
            (1, 2, Point),
            (2, 1, Point),
            (2, 2, Area),
        ]);
        let with_points = AdjacencyGrouper::default()
            .group(recs.clone(), &all(&[1, 2]))
            .unwrap();
        assert_eq!(with_points.group_count(), 1);

        let grouper = AdjacencyGrouper::new(DissolveConfig::new().with_point_adjacency(false));
        let without = grouper.group(recs, &all(&[1, 2])).unwrap();
        assert_eq!(without.group_count(), 2);
        assert!(!without.same_group(&1, &2));
    }

    #[test]
    fn feature_missing_from_records_fails() {
        let recs = records(&[(1, 1, Area)]);
        let err = AdjacencyGrouper::default()
            .group(recs, &all(&[1, 3]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Assignment(AssignmentError::Uncovered { count: 1, .. })
        ));
    }

    struct FixedSource {
        ids: Vec<u32>,
        records: Vec<OverlapRecord<u32>>,
    }

    impl OverlapSource<u32> for FixedSource {
        fn feature_ids(&self) -> Vec<u32> {
            self.ids.clone()
        }

        fn overlap_records(&self) -> Vec<OverlapRecord<u32>> {
            self.records.clone()
        }
    }

    struct CountGroups;

    impl ShapeUnion<u32> for CountGroups {
        type Output = Vec<Vec<u32>>;
        type Error = Error;

        fn union_groups(&self, assignment: &GroupAssignment<u32>) -> Result<Self::Output> {
            Ok(assignment.groups().map(|(_, m)| m.to_vec()).collect())
        }
    }

    #[test]
    fn dissolve_hands_groups_to_union() {
        let source = FixedSource {
            ids: vec![1, 2, 3],
            records: records(&[
                (1, 1, Area),
                (1, 3, Line),
                (3, 1, Line),
                (2, 2, Area),
                (3, 3, Area),
            ]),
        };
        let groups = AdjacencyGrouper::default()
            .dissolve(&source, &CountGroups)
            .unwrap();
        assert_eq!(groups, vec![vec![1, 3], vec![2]]);
    }

    #[test]
    fn dissolve_rejects_duplicate_ids() {
        let source = FixedSource {
            ids: vec![1, 1],
            records: records(&[(1, 1, Area)]),
        };
        let err = AdjacencyGrouper::default()
            .dissolve(&source, &CountGroups)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentifier(_)));
    }
}
