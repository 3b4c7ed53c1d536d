// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary checks run before any clustering.

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::overlap::FeatureId;

/// Attribute name holding a feature's identity in tabular hosts.
pub const INDEX_NAME: &str = "index";

/// Attribute name stamped with the group label on dissolved output.
pub const ASSIGNMENT_NAME: &str = "dissolve_assignment";

/// Names callers may not use for their own attributes.
pub const RESERVED_NAMES: [&str; 2] = [INDEX_NAME, ASSIGNMENT_NAME];

/// Collects ids into a set, failing on the first repeat.
pub fn ensure_unique_ids<I, It>(ids: It) -> Result<FxHashSet<I>>
where
    I: FeatureId,
    It: IntoIterator<Item = I>,
{
    let iter = ids.into_iter();
    let mut seen = FxHashSet::default();
    seen.reserve(iter.size_hint().0);
    for id in iter {
        if seen.contains(&id) {
            return Err(Error::DuplicateIdentifier(format!("{:?}", id)));
        }
        seen.insert(id);
    }
    Ok(seen)
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// Rejects caller-supplied names that collide with [`RESERVED_NAMES`].
pub fn ensure_no_reserved_names<'a, It>(names: It) -> Result<()>
where
    It: IntoIterator<Item = &'a str>,
{
    match names.into_iter().find(|name| is_reserved(name)) {
        Some(name) => Err(Error::ReservedName(name.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ids_pass() {
        let ids = ensure_unique_ids(vec![3u32, 1, 2]).unwrap();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&1));
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = ensure_unique_ids(vec!["a", "b", "a"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentifier(ref id) if id == "\"a\""));
    }

    #[test]
    fn reserved_names() {
        assert!(is_reserved("index"));
        assert!(is_reserved("dissolve_assignment"));
        assert!(!is_reserved("zoning"));

        assert!(ensure_no_reserved_names(["zoning", "area"]).is_ok());
        let err = ensure_no_reserved_names(["zoning", "dissolve_assignment"]).unwrap_err();
        assert!(matches!(err, Error::ReservedName(ref n) if n == "dissolve_assignment"));
    }
}
