// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Group labels for clusters and isolated features.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::AssignmentError;
use crate::merge::Cluster;
use crate::overlap::FeatureId;

/// Opaque label shared by every feature of one dissolve group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupLabel(pub u32);

impl GroupLabel {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Total mapping from feature id to group label.
///
/// Labels are dense (`0..group_count`) and each group's members are sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAssignment<I: FeatureId> {
    labels: FxHashMap<I, GroupLabel>,
    groups: Vec<Vec<I>>,
}

impl<I: FeatureId> GroupAssignment<I> {
    pub fn label(&self, id: &I) -> Option<GroupLabel> {
        self.labels.get(id).copied()
    }

    /// Members of a group, ascending. Empty for an unknown label.
    pub fn members(&self, label: GroupLabel) -> &[I] {
        self.groups
            .get(label.index())
            .map(|g| g.as_slice())
            .unwrap_or(&[])
    }

    /// Groups in label order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupLabel, &[I])> {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, g)| (GroupLabel(i as u32), g.as_slice()))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of labelled features.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn same_group(&self, a: &I, b: &I) -> bool {
        match (self.label(a), self.label(b)) {
            (Some(la), Some(lb)) => la == lb,
            _ => false,
        }
    }

    /// `(id, label)` entries in label order, then id order.
    pub fn iter(&self) -> impl Iterator<Item = (&I, GroupLabel)> {
        self.groups()
            .flat_map(|(label, members)| members.iter().map(move |id| (id, label)))
    }
}

/// Hands out one label per cluster and per isolated feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupLabelAssigner;

impl GroupLabelAssigner {
    pub fn new() -> Self {
        Self
    }

    /// Labels clusters `0..k` in the given order, then isolated ids in
    /// ascending order.
    ///
    /// Fails if any id is labelled twice, if an id outside `all_ids` is
    /// labelled, or if any id in `all_ids` is left unlabelled.
    pub fn assign<I: FeatureId>(
        &self,
        clusters: &[Cluster<I>],
        isolated: &[I],
        all_ids: &FxHashSet<I>,
    ) -> Result<GroupAssignment<I>, AssignmentError> {
        let mut labels: FxHashMap<I, GroupLabel> = FxHashMap::default();
        labels.reserve(all_ids.len());
        let mut groups: Vec<Vec<I>> = Vec::with_capacity(clusters.len() + isolated.len());

        let mut sorted_isolated: Vec<&I> = isolated.iter().collect();
        sorted_isolated.sort();

        let members = clusters
            .iter()
            .map(|c| c.ids().iter().collect::<Vec<_>>())
            .chain(sorted_isolated.into_iter().map(|id| vec![id]));

        for group in members {
            let label = GroupLabel(groups.len() as u32);
            for id in &group {
                if !all_ids.contains(*id) {
                    return Err(AssignmentError::UnknownFeature {
                        id: format!("{:?}", id),
                    });
                }
                if labels.insert((*id).clone(), label).is_some() {
                    return Err(AssignmentError::DoubleAssigned {
                        id: format!("{:?}", id),
                    });
                }
            }
            groups.push(group.into_iter().cloned().collect());
        }

        if labels.len() != all_ids.len() {
            let mut uncovered: Vec<&I> = all_ids.iter().filter(|id| !labels.contains_key(*id)).collect();
            uncovered.sort();
            if let Some(first) = uncovered.first() {
                return Err(AssignmentError::Uncovered {
                    id: format!("{:?}", first),
                    count: uncovered.len(),
                });
            }
        }

        tracing::debug!(
            features = labels.len(),
            groups = groups.len(),
            clusters = clusters.len(),
            isolated = isolated.len(),
            "assigned group labels"
        );

        Ok(GroupAssignment { labels, groups })
    }
}
