// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input features: an id, a polygon and attributes.

use crate::attributes::{AttrValue, Attributes};
use crate::polygon::Polygon;

/// One input feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature<I> {
    pub id: I,
    pub geometry: Polygon,
    pub attributes: Attributes,
}

impl<I> Feature<I> {
    pub fn new(id: I, geometry: Polygon) -> Self {
        Self {
            id,
            geometry,
            attributes: Attributes::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }
}
