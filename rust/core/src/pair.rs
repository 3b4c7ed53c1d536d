// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unordered adjacency pairs.

use crate::overlap::FeatureId;

/// An unordered set `{a, b}` of two features reported as touching.
///
/// Stored normalized as `(min, max)`, so `{a, b}` and `{b, a}` compare equal.
/// Building a pair from the same id twice yields the one-element set `{a}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyPair<I> {
    lo: I,
    hi: I,
}

impl<I: FeatureId> AdjacencyPair<I> {
    pub fn new(a: I, b: I) -> Self {
        if b < a {
            Self { lo: b, hi: a }
        } else {
            Self { lo: a, hi: b }
        }
    }

    /// Smaller member.
    pub fn lo(&self) -> &I {
        &self.lo
    }

    /// Larger member (equal to `lo` for a one-element pair).
    pub fn hi(&self) -> &I {
        &self.hi
    }

    pub fn is_singleton(&self) -> bool {
        self.lo == self.hi
    }

    /// Distinct members, smallest first.
    pub fn ids(&self) -> impl Iterator<Item = &I> {
        let hi = if self.is_singleton() {
            None
        } else {
            Some(&self.hi)
        };
        std::iter::once(&self.lo).chain(hi)
    }

    pub fn contains(&self, id: &I) -> bool {
        &self.lo == id || &self.hi == id
    }

    /// True when the two sets intersect.
    pub fn shares_id(&self, other: &Self) -> bool {
        other.contains(&self.lo) || other.contains(&self.hi)
    }
}

impl<I: FeatureId> From<(I, I)> for AdjacencyPair<I> {
    fn from((a, b): (I, I)) -> Self {
        Self::new(a, b)
    }
}
