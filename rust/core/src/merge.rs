// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reduction of adjacency pairs to maximal connected clusters.
//!
//! Treats the pairs as edges of an undirected graph over feature ids and
//! returns its connected components. Output is canonical regardless of input
//! order: ids ascend within each cluster and clusters ascend by their
//! smallest id.

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::config::{DissolveConfig, MergeStrategy};
use crate::overlap::FeatureId;
use crate::pair::AdjacencyPair;
use crate::union_find::DisjointSet;

/// A maximal set of transitively adjacent features.
///
/// Never empty; ids are sorted and unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster<I> {
    ids: Vec<I>,
}

impl<I: FeatureId> Cluster<I> {
    /// Builds a cluster from ids in any order. Returns `None` when empty.
    pub fn from_ids(ids: impl IntoIterator<Item = I>) -> Option<Self> {
        let mut ids: Vec<I> = ids.into_iter().collect();
        if ids.is_empty() {
            return None;
        }
        ids.sort();
        ids.dedup();
        Some(Self { ids })
    }

    pub fn ids(&self) -> &[I] {
        &self.ids
    }

    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Smallest id, used as the cluster's sort key.
    pub fn min(&self) -> &I {
        &self.ids[0]
    }

    pub fn contains(&self, id: &I) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    pub fn into_ids(self) -> Vec<I> {
        self.ids
    }

    /// Star of pairs from the smallest id to every other member.
    ///
    /// Feeding these back into the merger reproduces this cluster. A
    /// singleton yields its one-element pair.
    pub fn spanning_pairs(&self) -> Vec<AdjacencyPair<I>> {
        let root = self.min();
        if self.ids.len() == 1 {
            return vec![AdjacencyPair::new(root.clone(), root.clone())];
        }
        self.ids[1..]
            .iter()
            .map(|id| AdjacencyPair::new(root.clone(), id.clone()))
            .collect()
    }
}

impl<'a, I> IntoIterator for &'a Cluster<I> {
    type Item = &'a I;
    type IntoIter = std::slice::Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

/// Reduces adjacency pairs to disjoint clusters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterMerger {
    strategy: MergeStrategy,
}

impl ClusterMerger {
    pub fn new(strategy: MergeStrategy) -> Self {
        Self { strategy }
    }

    pub fn from_config(config: &DissolveConfig) -> Self {
        Self::new(config.merge_strategy)
    }

    pub fn strategy(&self) -> MergeStrategy {
        self.strategy
    }

    /// Returns the connected components of the graph whose edges are `pairs`.
    ///
    /// Duplicate pairs are redundant and harmless. Ids that appear in no pair
    /// are not part of any cluster.
    pub fn merge<I: FeatureId>(&self, pairs: &[AdjacencyPair<I>]) -> Vec<Cluster<I>> {
        let clusters = match self.strategy {
            MergeStrategy::UnionFind => merge_union_find(pairs),
            MergeStrategy::Incremental => merge_incremental(pairs),
        };
        tracing::debug!(
            strategy = %self.strategy,
            pairs = pairs.len(),
            clusters = clusters.len(),
            "merged adjacency pairs"
        );
        clusters
    }
}

/// Disjoint-set union over a dense remap of ids to slots.
pub fn merge_union_find<I: FeatureId>(pairs: &[AdjacencyPair<I>]) -> Vec<Cluster<I>> {
    let mut slots: FxHashMap<&I, usize> = FxHashMap::default();
    let mut ids: Vec<&I> = Vec::new();
    let mut sets = DisjointSet::with_capacity(pairs.len() * 2);

    for pair in pairs {
        let a = intern(pair.lo(), &mut slots, &mut ids, &mut sets);
        let b = intern(pair.hi(), &mut slots, &mut ids, &mut sets);
        sets.union(a, b);
    }

    let mut buckets: Vec<Vec<I>> = vec![Vec::new(); ids.len()];
    for (slot, id) in ids.iter().enumerate() {
        let root = sets.find(slot);
        buckets[root].push((*id).clone());
    }

    canonicalize(buckets.into_iter().filter_map(Cluster::from_ids).collect())
}

fn intern<'a, I: FeatureId>(
    id: &'a I,
    slots: &mut FxHashMap<&'a I, usize>,
    ids: &mut Vec<&'a I>,
    sets: &mut DisjointSet,
) -> usize {
    *slots.entry(id).or_insert_with(|| {
        ids.push(id);
        sets.make_set()
    })
}

/// Two-phase merge: return the pairs as-is when no two share an id,
/// otherwise fold them one by one into an accumulator of disjoint sets.
pub fn merge_incremental<I: FeatureId>(pairs: &[AdjacencyPair<I>]) -> Vec<Cluster<I>> {
    if pairwise_disjoint(pairs) {
        tracing::trace!(pairs = pairs.len(), "pairs already disjoint, skipping merge");
        return canonicalize(
            pairs
                .iter()
                .filter_map(|pair| Cluster::from_ids(pair.ids().cloned()))
                .collect(),
        );
    }

    // Disjoint partition of every id seen so far.
    let mut accumulator: Vec<BTreeSet<I>> = Vec::new();

    for pair in pairs {
        let touched: SmallVec<[usize; 4]> = accumulator
            .iter()
            .enumerate()
            .filter(|(_, set)| pair.ids().any(|id| set.contains(id)))
            .map(|(idx, _)| idx)
            .collect();

        match touched.split_first() {
            None => accumulator.push(pair.ids().cloned().collect()),
            Some((&first, rest)) => {
                accumulator[first].extend(pair.ids().cloned());
                // `pair` bridges several entries: fold them into the first.
                // Descending removal keeps the remaining indices valid.
                for &idx in rest.iter().rev() {
                    let bridged = accumulator.remove(idx);
                    accumulator[first].extend(bridged);
                }
            }
        }
    }

    canonicalize(accumulator.into_iter().filter_map(Cluster::from_ids).collect())
}

/// True when no id occurs in more than one pair.
fn pairwise_disjoint<I: FeatureId>(pairs: &[AdjacencyPair<I>]) -> bool {
    let mut seen: FxHashSet<&I> = FxHashSet::default();
    pairs.iter().all(|pair| pair.ids().all(|id| seen.insert(id)))
}

fn canonicalize<I: FeatureId>(mut clusters: Vec<Cluster<I>>) -> Vec<Cluster<I>> {
    clusters.sort_by(|a, b| a.min().cmp(b.min()));
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [MergeStrategy; 2] = [MergeStrategy::UnionFind, MergeStrategy::Incremental];

    fn pairs(raw: &[(u32, u32)]) -> Vec<AdjacencyPair<u32>> {
        raw.iter().map(|&(a, b)| AdjacencyPair::new(a, b)).collect()
    }

    fn ids(clusters: &[Cluster<u32>]) -> Vec<Vec<u32>> {
        clusters.iter().map(|c| c.ids().to_vec()).collect()
    }

    #[test]
    fn chained_pairs_merge() {
        for strategy in STRATEGIES {
            let out = ClusterMerger::new(strategy).merge(&pairs(&[(1, 9), (1, 5), (3, 6)]));
            assert_eq!(ids(&out), vec![vec![1, 5, 9], vec![3, 6]], "{strategy}");
        }
    }

    #[test]
    fn disjoint_pairs_pass_through() {
        for strategy in STRATEGIES {
            let out = ClusterMerger::new(strategy).merge(&pairs(&[(3, 4), (2, 1)]));
            assert_eq!(ids(&out), vec![vec![1, 2], vec![3, 4]], "{strategy}");
        }
    }

    #[test]
    fn triangle_collapses() {
        for strategy in STRATEGIES {
            let out = ClusterMerger::new(strategy).merge(&pairs(&[(1, 2), (2, 3), (3, 1)]));
            assert_eq!(ids(&out), vec![vec![1, 2, 3]], "{strategy}");
        }
    }

    #[test]
    fn bridging_pair_joins_clusters() {
        for strategy in STRATEGIES {
            let out = ClusterMerger::new(strategy)
                .merge(&pairs(&[(1, 2), (3, 4), (5, 6), (7, 8), (2, 5), (4, 6)]));
            assert_eq!(ids(&out), vec![vec![1, 2, 3, 4, 5, 6], vec![7, 8]], "{strategy}");
        }
    }

    #[test]
    fn bridge_across_three_entries() {
        // (2, 5) touches two entries, then (6, 8) touches the merged one and
        // a third.
        for strategy in STRATEGIES {
            let out = ClusterMerger::new(strategy)
                .merge(&pairs(&[(1, 2), (5, 6), (8, 9), (2, 5), (6, 8)]));
            assert_eq!(ids(&out), vec![vec![1, 2, 5, 6, 8, 9]], "{strategy}");
        }
    }

    #[test]
    fn duplicate_pairs_are_redundant() {
        for strategy in STRATEGIES {
            let out = ClusterMerger::new(strategy).merge(&pairs(&[(1, 2), (2, 1), (1, 2)]));
            assert_eq!(ids(&out), vec![vec![1, 2]], "{strategy}");
        }
    }

    #[test]
    fn singleton_pair_yields_singleton_cluster() {
        for strategy in STRATEGIES {
            let out = ClusterMerger::new(strategy).merge(&pairs(&[(4, 4), (1, 2)]));
            assert_eq!(ids(&out), vec![vec![1, 2], vec![4]], "{strategy}");
        }
    }

    #[test]
    fn empty_input() {
        for strategy in STRATEGIES {
            let out = ClusterMerger::new(strategy).merge::<u32>(&[]);
            assert!(out.is_empty());
        }
    }

    #[test]
    fn string_ids() {
        let input = vec![
            AdjacencyPair::new("b".to_string(), "c".to_string()),
            AdjacencyPair::new("a".to_string(), "b".to_string()),
        ];
        let out = ClusterMerger::default().merge(&input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].ids(), ["a", "b", "c"]);
    }

    #[test]
    fn pairwise_disjoint_detection() {
        assert!(pairwise_disjoint(&pairs(&[(1, 2), (3, 4)])));
        assert!(!pairwise_disjoint(&pairs(&[(1, 2), (2, 3)])));
        assert!(!pairwise_disjoint(&pairs(&[(1, 2), (1, 2)])));
        assert!(pairwise_disjoint::<u32>(&[]));
    }

    #[test]
    fn cluster_accessors() {
        let cluster = Cluster::from_ids(vec![9, 1, 5, 1]).unwrap();
        assert_eq!(cluster.ids(), &[1, 5, 9]);
        assert_eq!(cluster.len(), 3);
        assert!(!cluster.is_empty());
        assert_eq!(*cluster.min(), 1);
        assert!(cluster.contains(&5));
        assert!(!cluster.contains(&4));
        assert!(Cluster::<u32>::from_ids(Vec::new()).is_none());
    }

    #[test]
    fn spanning_pairs_rebuild_cluster() {
        let cluster = Cluster::from_ids(vec![3, 7, 5]).unwrap();
        assert_eq!(
            cluster.spanning_pairs(),
            vec![AdjacencyPair::new(3, 5), AdjacencyPair::new(3, 7)]
        );
        let single = Cluster::from_ids(vec![2]).unwrap();
        assert_eq!(single.spanning_pairs(), vec![AdjacencyPair::new(2, 2)]);
    }
}
