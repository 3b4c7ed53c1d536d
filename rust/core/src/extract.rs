// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adjacency extraction from raw overlap records.
//!
//! Turns the geometry engine's all-against-all overlay rows into unordered
//! adjacency pairs plus the list of features that touch nothing but
//! themselves.

use rustc_hash::FxHashMap;

use crate::config::DissolveConfig;
use crate::overlap::{FeatureId, OverlapRecord};
use crate::pair::AdjacencyPair;

/// Output of [`AdjacencyPairExtractor::extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<I> {
    /// One pair per surviving non-self record, in record order. The symmetric
    /// rows of the overlay produce each pair twice.
    pub pairs: Vec<AdjacencyPair<I>>,
    /// Features whose only surviving record is their self record, ascending.
    pub isolated: Vec<I>,
}

/// Converts overlap records into adjacency pairs and isolated ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyPairExtractor {
    include_point_adjacency: bool,
}

impl AdjacencyPairExtractor {
    pub fn new(include_point_adjacency: bool) -> Self {
        Self {
            include_point_adjacency,
        }
    }

    pub fn from_config(config: &DissolveConfig) -> Self {
        Self::new(config.include_point_adjacency)
    }

    /// Returns true if the record survives the point filter.
    ///
    /// Self records always survive: they carry the feature's presence, not a
    /// relationship with another feature.
    fn keeps(&self, record: &OverlapRecord<impl FeatureId>) -> bool {
        self.include_point_adjacency || record.is_self() || !record.kind.is_point()
    }

    pub fn extract<I, R>(&self, records: R) -> Extraction<I>
    where
        I: FeatureId,
        R: IntoIterator<Item = OverlapRecord<I>>,
    {
        let mut counts: FxHashMap<I, usize> = FxHashMap::default();
        let mut pairs = Vec::new();
        let mut total = 0usize;
        let mut dropped = 0usize;

        for record in records {
            total += 1;
            if !self.keeps(&record) {
                dropped += 1;
                continue;
            }
            // Counting runs on filtered records only, so a feature whose sole
            // neighbour was a point contact becomes isolated.
            *counts.entry(record.left.clone()).or_insert(0) += 1;
            if !record.is_self() {
                pairs.push(AdjacencyPair::new(record.left, record.right));
            }
        }

        let mut isolated: Vec<I> = counts
            .into_iter()
            .filter_map(|(id, n)| (n == 1).then_some(id))
            .collect();
        isolated.sort();

        tracing::debug!(
            records = total,
            point_records_dropped = dropped,
            pairs = pairs.len(),
            isolated = isolated.len(),
            "extracted adjacency pairs"
        );

        Extraction { pairs, isolated }
    }
}

impl Default for AdjacencyPairExtractor {
    fn default() -> Self {
        Self::new(true)
    }
}
