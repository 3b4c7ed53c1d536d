// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed non-geometric attributes carried by features through a dissolve.

use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    List(Vec<AttrValue>),
}

/// Attribute table of one feature.
pub type Attributes = FxHashMap<String, AttrValue>;

/// How the attributes of a dissolved group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttributeMerge {
    /// Keep the attributes of the member with the smallest id.
    #[default]
    First,
    /// Discard member attributes.
    Drop,
}

impl AttributeMerge {
    /// Combines member attributes; `members` must be in ascending id order.
    pub fn merge<'a>(&self, mut members: impl Iterator<Item = &'a Attributes>) -> Attributes {
        match self {
            AttributeMerge::First => members.next().cloned().unwrap_or_default(),
            AttributeMerge::Drop => Attributes::default(),
        }
    }
}

impl FromStr for AttributeMerge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(AttributeMerge::First),
            "drop" | "none" => Ok(AttributeMerge::Drop),
            other => Err(format!("unknown attribute merge policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, AttrValue)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn first_keeps_leading_member() {
        let a = attrs(&[("zone", AttrValue::String("R1".to_string()))]);
        let b = attrs(&[("zone", AttrValue::String("C2".to_string()))]);
        let merged = AttributeMerge::First.merge([&a, &b].into_iter());
        assert_eq!(merged.get("zone"), Some(&AttrValue::String("R1".to_string())));
    }

    #[test]
    fn drop_discards() {
        let a = attrs(&[("height", AttrValue::Double(3.5))]);
        assert!(AttributeMerge::Drop.merge([&a].into_iter()).is_empty());
    }

    #[test]
    fn first_of_nothing_is_empty() {
        assert!(AttributeMerge::First.merge(std::iter::empty::<&Attributes>()).is_empty());
    }

    #[test]
    fn parse_policy() {
        assert_eq!("First".parse::<AttributeMerge>(), Ok(AttributeMerge::First));
        assert_eq!("drop".parse::<AttributeMerge>(), Ok(AttributeMerge::Drop));
        assert!("sum".parse::<AttributeMerge>().is_err());
    }

    #[test]
    fn nested_list_values() {
        let list = AttrValue::List(vec![
            AttrValue::Int(1),
            AttrValue::Bool(true),
            AttrValue::List(vec![AttrValue::Null]),
        ]);
        if let AttrValue::List(items) = &list {
            assert_eq!(items.len(), 3);
            assert_eq!(items[0], AttrValue::Int(1));
        } else {
            panic!("expected list");
        }
    }
}
