// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial hierarchy: buildings, storeys and storey boundaries

use crate::{BoundingBox, Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A building storey (floor level)
///
/// Identity is `(building_name, storey_name)`; two storeys with the same
/// names are equal whatever their elevation. Ordering by elevation is
/// available through [`BuildingStorey::cmp_elevation`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildingStorey {
    pub building_name: String,
    pub storey_name: String,
    /// Elevation in model units
    pub elevation: f64,
}

impl BuildingStorey {
    /// Create a new storey
    pub fn new(
        building_name: impl Into<String>,
        storey_name: impl Into<String>,
        elevation: f64,
    ) -> Self {
        Self {
            building_name: building_name.into(),
            storey_name: storey_name.into(),
            elevation,
        }
    }

    /// Total order by elevation, lowest first
    pub fn cmp_elevation(&self, other: &Self) -> Ordering {
        self.elevation.total_cmp(&other.elevation)
    }
}

impl PartialEq for BuildingStorey {
    fn eq(&self, other: &Self) -> bool {
        self.building_name == other.building_name && self.storey_name == other.storey_name
    }
}

impl Eq for BuildingStorey {}

impl Hash for BuildingStorey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.building_name.hash(state);
        self.storey_name.hash(state);
    }
}

/// A building with its storeys
///
/// Storeys are kept sorted ascending by elevation at all times.
#[derive(Clone, Debug, Serialize)]
pub struct Building {
    name: String,
    storeys: Vec<BuildingStorey>,
}

impl Building {
    /// Create a building; `storeys` may arrive in any order
    pub fn new(name: impl Into<String>, mut storeys: Vec<BuildingStorey>) -> Self {
        storeys.sort_by(BuildingStorey::cmp_elevation);
        Self {
            name: name.into(),
            storeys,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storeys, lowest elevation first
    pub fn storeys(&self) -> &[BuildingStorey] {
        &self.storeys
    }

    /// Look up a storey by name
    pub fn storey(&self, storey_name: &str) -> Option<&BuildingStorey> {
        self.storeys.iter().find(|s| s.storey_name == storey_name)
    }

    /// Add a storey, replacing one with the same identity
    pub fn insert_storey(&mut self, storey: BuildingStorey) {
        self.storeys.retain(|s| *s != storey);
        let at = self
            .storeys
            .partition_point(|s| s.cmp_elevation(&storey) != Ordering::Greater);
        self.storeys.insert(at, storey);
    }

    /// Highest storey
    pub fn top_storey(&self) -> Option<&BuildingStorey> {
        self.storeys.last()
    }

    pub fn len(&self) -> usize {
        self.storeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storeys.is_empty()
    }
}

impl PartialEq for Building {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Building {}

impl Hash for Building {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Vertical span `[bottom_z, top_z]` owned by one storey
///
/// The span runs from the storey's elevation up to the next storey's
/// elevation. `top_z > bottom_z` always holds for a constructed boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingStoreyBoundary {
    storey: BuildingStorey,
    bottom_z: f64,
    top_z: f64,
}

impl BuildingStoreyBoundary {
    /// Create a boundary owned by `storey`
    ///
    /// # Errors
    /// [`Error::InvalidBoundary`] unless both values are finite and
    /// `top_z > bottom_z`.
    pub fn new(storey: BuildingStorey, bottom_z: f64, top_z: f64) -> Result<Self> {
        if !(bottom_z.is_finite() && top_z.is_finite()) || top_z <= bottom_z {
            return Err(Error::InvalidBoundary {
                storey: storey.storey_name.clone(),
                bottom_z,
                top_z,
            });
        }
        Ok(Self {
            storey,
            bottom_z,
            top_z,
        })
    }

    /// Owning storey
    pub fn storey(&self) -> &BuildingStorey {
        &self.storey
    }

    pub fn bottom_z(&self) -> f64 {
        self.bottom_z
    }

    pub fn top_z(&self) -> f64 {
        self.top_z
    }

    /// `(bottom_z, top_z)`
    pub fn z_range(&self) -> (f64, f64) {
        (self.bottom_z, self.top_z)
    }

    pub fn height(&self) -> f64 {
        self.top_z - self.bottom_z
    }

    /// `"<building>_<storey>"`, used in log lines
    pub fn identifier(&self) -> String {
        format!("{}_{}", self.storey.building_name, self.storey.storey_name)
    }

    /// Fraction of the box's vertical extent lying inside this boundary
    ///
    /// Always within `[0, 1]`. A flat box covers nothing.
    pub fn coverage_of(&self, bbox: &BoundingBox) -> f64 {
        let (z_min, z_max) = bbox.z_extent();
        if z_max <= z_min {
            return 0.0;
        }
        let overlap = (z_max.min(self.top_z) - z_min.max(self.bottom_z)).max(0.0);
        overlap / (z_max - z_min)
    }

    /// Whether the box's whole vertical extent lies inside this boundary
    pub fn contains_bbox_fully(&self, bbox: &BoundingBox) -> bool {
        let (z_min, z_max) = bbox.z_extent();
        z_min >= self.bottom_z && z_max <= self.top_z
    }

    /// Whether at least `fraction` of the box's height lies inside
    ///
    /// # Errors
    /// [`Error::InvalidThreshold`] when `fraction` is outside `[0, 1]`.
    pub fn contains_bbox_fraction(&self, bbox: &BoundingBox, fraction: f64) -> Result<bool> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::InvalidThreshold(fraction));
        }
        if bbox.is_flat() {
            return Ok(false);
        }
        Ok(self.coverage_of(bbox) >= fraction)
    }
}

/// Outcome of one assignment decision
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreyCoverage {
    pub building_name: String,
    pub storey_name: String,
    /// Covered fraction in `[0, 1]`
    pub coverage: f64,
}

impl StoreyCoverage {
    /// Decision for the storey owning `boundary`
    pub fn new(boundary: &BuildingStoreyBoundary, coverage: f64) -> Self {
        Self {
            building_name: boundary.storey.building_name.clone(),
            storey_name: boundary.storey.storey_name.clone(),
            coverage,
        }
    }
}
