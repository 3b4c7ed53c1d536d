// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Adjacency Dissolve Core
//!
//! Groups spatial features into clusters of mutual adjacency so touching
//! features can be dissolved into single shapes.
//!
//! ## Overview
//!
//! Geometry is someone else's job. This crate takes the overlap rows a
//! geometry engine reports and turns them into a total, deterministic
//! feature → group mapping:
//!
//! - **Extraction** ([`AdjacencyPairExtractor`]): overlap records become
//!   unordered adjacency pairs and a list of isolated features
//! - **Merging** ([`ClusterMerger`]): pairs are reduced to the connected
//!   components of the adjacency graph
//! - **Labelling** ([`GroupLabelAssigner`]): every feature gets exactly one
//!   [`GroupLabel`], ready for a shape-union step
//!
//! ## Quick Start
//!
//! ```rust
//! use adjacency_dissolve_core::{AdjacencyGrouper, OverlapKind, OverlapRecord};
//! use rustc_hash::FxHashSet;
//!
//! let records = vec![
//!     OverlapRecord::new(1, 1, OverlapKind::Area),
//!     OverlapRecord::new(1, 2, OverlapKind::Line),
//!     OverlapRecord::new(2, 1, OverlapKind::Line),
//!     OverlapRecord::new(2, 2, OverlapKind::Area),
//!     OverlapRecord::new(7, 7, OverlapKind::Area),
//! ];
//! let ids: FxHashSet<u32> = [1, 2, 7].into_iter().collect();
//!
//! let assignment = AdjacencyGrouper::default().group(records, &ids).unwrap();
//! assert!(assignment.same_group(&1, &2));
//! assert_eq!(assignment.group_count(), 2);
//! ```

pub mod assign;
pub mod collab;
pub mod config;
pub mod dissolve;
pub mod error;
pub mod extract;
pub mod merge;
pub mod overlap;
pub mod pair;
pub mod precondition;
pub mod union_find;

pub use assign::{GroupAssignment, GroupLabel, GroupLabelAssigner};
pub use collab::{OverlapSource, ShapeUnion};
pub use config::{DissolveConfig, MergeStrategy};
pub use dissolve::AdjacencyGrouper;
pub use error::{AssignmentError, Error, Result};
pub use extract::{AdjacencyPairExtractor, Extraction};
pub use merge::{Cluster, ClusterMerger};
pub use overlap::{FeatureId, OverlapKind, OverlapRecord};
pub use pair::AdjacencyPair;
pub use precondition::{ensure_no_reserved_names, ensure_unique_ids, RESERVED_NAMES};
pub use union_find::DisjointSet;
