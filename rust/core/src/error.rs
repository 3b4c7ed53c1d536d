// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for adjacency grouping.

/// Result type alias for grouping operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the grouping boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Feature ids handed to the grouper are not unique.
    #[error("duplicate feature identifier: {0}")]
    DuplicateIdentifier(String),

    /// A caller-supplied name collides with a name reserved for internal use.
    #[error("name '{0}' is reserved")]
    ReservedName(String),

    /// Clusters and isolated ids do not partition the feature set.
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
}

/// Coverage violations detected while labelling groups.
///
/// These indicate that extraction and merging disagree with the caller's
/// feature set. They are defects, not recoverable conditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    /// The same id was handed out twice (two clusters, or cluster + isolated).
    #[error("feature {id} is assigned to more than one group")]
    DoubleAssigned { id: String },

    /// An id was grouped that the caller never declared.
    #[error("feature {id} was grouped but is not a known feature")]
    UnknownFeature { id: String },

    /// Some declared ids ended up in no group at all.
    #[error("feature {id} is not covered by any group ({count} uncovered in total)")]
    Uncovered { id: String, count: usize },
}
