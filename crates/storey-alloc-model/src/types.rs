// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core identifier and classification types
//!
//! This module defines the small value types shared by the element tree,
//! the host traits and the allocation engine.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Type-safe host element identifier
///
/// Wraps the raw id the host modelling tool hands out for an element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize, Default)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(id: u64) -> Self {
        ElementId(id)
    }
}

impl From<ElementId> for u64 {
    fn from(id: ElementId) -> Self {
        id.0
    }
}

/// Globally unique element identifier
///
/// Host tools often print guids wrapped in braces (`{...}`); [`Guid::parse`]
/// accepts both forms.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Guid(Uuid);

impl Guid {
    /// Parse a guid, tolerating surrounding whitespace and one pair of braces
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .unwrap_or(trimmed);
        Uuid::parse_str(inner)
            .map(Guid)
            .map_err(|_| Error::InvalidGuid(value.to_string()))
    }

    /// Generate a fresh random guid
    pub fn new_v4() -> Self {
        Guid(Uuid::new_v4())
    }

    /// Hyphenated lowercase form
    pub fn value(&self) -> String {
        self.0.hyphenated().to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Guid(uuid)
    }
}

impl FromStr for Guid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Guid::parse(s)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Kind of model element
///
/// `Leaf` elements never own children; every other kind is a composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Plain part with no children (beam, plate, stud, ...)
    Leaf,
    /// Wall composite
    Wall,
    /// Floor / slab composite
    Slab,
    /// Roof composite
    Roof,
    /// Container composite (never assigned to a storey)
    Container,
    /// Composite with no more specific classification
    GenericNode,
}

impl ElementKind {
    /// Get display name for logs
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Leaf => "Leaf",
            ElementKind::Wall => "Wall",
            ElementKind::Slab => "Slab",
            ElementKind::Roof => "Roof",
            ElementKind::Container => "Container",
            ElementKind::GenericNode => "Node",
        }
    }

    /// Whether elements of this kind may own children
    pub fn is_composite(&self) -> bool {
        !matches!(self, ElementKind::Leaf)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classification predicates reported by the host for one element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementClass {
    pub is_wall: bool,
    pub is_floor: bool,
    pub is_roof: bool,
    pub is_container: bool,
}

impl ElementClass {
    pub fn wall() -> Self {
        Self {
            is_wall: true,
            ..Self::default()
        }
    }

    pub fn floor() -> Self {
        Self {
            is_floor: true,
            ..Self::default()
        }
    }

    pub fn roof() -> Self {
        Self {
            is_roof: true,
            ..Self::default()
        }
    }

    pub fn container() -> Self {
        Self {
            is_container: true,
            ..Self::default()
        }
    }

    /// Whether the element should become a composite in the element tree
    pub fn is_composite(&self) -> bool {
        self.is_wall || self.is_floor || self.is_roof || self.is_container
    }

    /// Element kind for this classification
    ///
    /// Wall wins over floor, floor over roof, roof over container.
    pub fn kind(&self) -> ElementKind {
        if self.is_wall {
            ElementKind::Wall
        } else if self.is_floor {
            ElementKind::Slab
        } else if self.is_roof {
            ElementKind::Roof
        } else if self.is_container {
            ElementKind::Container
        } else {
            ElementKind::Leaf
        }
    }
}

/// Which host tag is used to associate leaves with their composite
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    /// Group by the element's subgroup tag
    #[default]
    Subgroup,
    /// Group by the element's group tag
    Group,
}
