// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Name-keyed building registry

use rustc_hash::FxHashMap;
use storey_alloc_model::{Building, BuildingStorey, Error, Result};

/// Buildings by name, iterated in registration order
#[derive(Clone, Debug, Default)]
pub struct BuildingRegistry {
    buildings: Vec<Building>,
    /// Building name -> position in `buildings`
    index: FxHashMap<String, usize>,
}

impl BuildingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a building under its name
    ///
    /// # Errors
    /// [`Error::EmptyBuildingName`] or [`Error::DuplicateBuilding`].
    pub fn register(&mut self, building: Building) -> Result<()> {
        if building.name().is_empty() {
            return Err(Error::EmptyBuildingName);
        }
        if self.contains(building.name()) {
            return Err(Error::DuplicateBuilding(building.name().to_string()));
        }
        self.index
            .insert(building.name().to_string(), self.buildings.len());
        self.buildings.push(building);
        Ok(())
    }

    /// Register or replace a building; a replaced building keeps its position
    pub fn upsert(&mut self, building: Building) -> Result<()> {
        if building.name().is_empty() {
            return Err(Error::EmptyBuildingName);
        }
        match self.index.get(building.name()) {
            Some(&at) => self.buildings[at] = building,
            None => {
                self.index
                    .insert(building.name().to_string(), self.buildings.len());
                self.buildings.push(building);
            }
        }
        Ok(())
    }

    /// # Errors
    /// [`Error::BuildingNotFound`] for an unknown name.
    pub fn get(&self, name: &str) -> Result<&Building> {
        self.try_get(name)
            .ok_or_else(|| Error::BuildingNotFound(name.to_string()))
    }

    pub fn try_get(&self, name: &str) -> Option<&Building> {
        self.index.get(name).map(|&at| &self.buildings[at])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a storey by building and storey name
    ///
    /// # Errors
    /// [`Error::BuildingNotFound`] or [`Error::StoreyNotFound`].
    pub fn storey(&self, building: &str, storey: &str) -> Result<&BuildingStorey> {
        self.get(building)?
            .storey(storey)
            .ok_or_else(|| Error::StoreyNotFound {
                building: building.to_string(),
                storey: storey.to_string(),
            })
    }

    /// Remove a building, returning it
    ///
    /// # Errors
    /// [`Error::BuildingNotFound`] for an unknown name.
    pub fn unregister(&mut self, name: &str) -> Result<Building> {
        let at = self
            .index
            .remove(name)
            .ok_or_else(|| Error::BuildingNotFound(name.to_string()))?;
        let removed = self.buildings.remove(at);
        for position in self.index.values_mut() {
            if *position > at {
                *position -= 1;
            }
        }
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.buildings.clear();
        self.index.clear();
    }

    /// Building names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buildings.iter().map(|b| b.name())
    }

    /// Buildings in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, Building> {
        self.buildings.iter()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

impl<'a> IntoIterator for &'a BuildingRegistry {
    type Item = &'a Building;
    type IntoIter = std::slice::Iter<'a, Building>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
