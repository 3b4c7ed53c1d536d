// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grouping configuration, optionally loaded from environment variables.

use std::str::FromStr;

/// Algorithm used to reduce adjacency pairs to clusters.
///
/// Both strategies produce identical, canonically ordered clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MergeStrategy {
    /// Disjoint-set union over a dense remap of the ids.
    #[default]
    UnionFind,
    /// Disjointness fast path followed by an online accumulator merge.
    Incremental,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::UnionFind => "union-find",
            MergeStrategy::Incremental => "incremental",
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "union-find" | "union_find" | "unionfind" | "dsu" => Ok(MergeStrategy::UnionFind),
            "incremental" | "online" => Ok(MergeStrategy::Incremental),
            other => Err(format!("unknown merge strategy: {other}")),
        }
    }
}

impl std::fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grouping configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DissolveConfig {
    /// Treat features that only touch at a point as adjacent.
    pub include_point_adjacency: bool,
    /// Cluster reduction algorithm.
    pub merge_strategy: MergeStrategy,
}

impl DissolveConfig {
    pub fn new() -> Self {
        Self {
            include_point_adjacency: true,
            merge_strategy: MergeStrategy::UnionFind,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `DISSOLVE_INCLUDE_POINT_ADJACENCY`: `true`/`false`/`1`/`0` (default `true`)
    /// - `DISSOLVE_MERGE_STRATEGY`: `union-find` or `incremental` (default `union-find`)
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::new();
        Self {
            include_point_adjacency: std::env::var("DISSOLVE_INCLUDE_POINT_ADJACENCY")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.include_point_adjacency),
            merge_strategy: std::env::var("DISSOLVE_MERGE_STRATEGY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.merge_strategy),
        }
    }

    pub fn with_point_adjacency(mut self, include: bool) -> Self {
        self.include_point_adjacency = include;
        self
    }

    pub fn with_merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.merge_strategy = strategy;
        self
    }
}

impl Default for DissolveConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
