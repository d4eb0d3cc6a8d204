// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host used by unit and integration tests

#![allow(dead_code)]

use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Mutex;
use storey_alloc_model::{
    BuildingResolver, ElementClass, ElementClassifier, ElementId, ElementSource, Error,
    GroupingMode, Guid, HostModel, Point, RawElementGeometry, Result, StoreyWriter, Vector,
};

/// One element as the mock host knows it
#[derive(Clone, Debug)]
pub struct MockElement {
    pub guid: Guid,
    pub name: String,
    pub class: ElementClass,
    pub subgroup: Option<String>,
    pub group: Option<String>,
    pub z_range: (f64, f64),
    pub building: Option<String>,
    pub zero_axes: bool,
    pub geometry_fails: bool,
    pub classify_fails: bool,
}

impl MockElement {
    pub fn new(class: ElementClass, z_min: f64, z_max: f64) -> Self {
        Self {
            guid: Guid::new_v4(),
            name: String::new(),
            class,
            subgroup: None,
            group: None,
            z_range: (z_min, z_max),
            building: None,
            zero_axes: false,
            geometry_fails: false,
            classify_fails: false,
        }
    }

    pub fn leaf(z_min: f64, z_max: f64) -> Self {
        Self::new(ElementClass::default(), z_min, z_max)
    }

    pub fn wall(z_min: f64, z_max: f64) -> Self {
        Self::new(ElementClass::wall(), z_min, z_max)
    }

    pub fn floor(z_min: f64, z_max: f64) -> Self {
        Self::new(ElementClass::floor(), z_min, z_max)
    }

    pub fn roof(z_min: f64, z_max: f64) -> Self {
        Self::new(ElementClass::roof(), z_min, z_max)
    }

    pub fn container(z_min: f64, z_max: f64) -> Self {
        Self::new(ElementClass::container(), z_min, z_max)
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn subgroup(mut self, key: &str) -> Self {
        self.subgroup = Some(key.to_string());
        self
    }

    pub fn group(mut self, key: &str) -> Self {
        self.group = Some(key.to_string());
        self
    }

    pub fn in_building(mut self, building: &str) -> Self {
        self.building = Some(building.to_string());
        self
    }

    pub fn with_zero_axes(mut self) -> Self {
        self.zero_axes = true;
        self
    }

    pub fn with_failing_geometry(mut self) -> Self {
        self.geometry_fails = true;
        self
    }

    pub fn with_failing_classification(mut self) -> Self {
        self.classify_fails = true;
        self
    }
}

/// Recorded write-back call
pub type WriteCall = (Vec<ElementId>, String, String);

#[derive(Default)]
pub struct MockHost {
    buildings: Vec<(String, Vec<(String, Option<f64>)>)>,
    failing_elevations: FxHashSet<(String, String)>,
    fail_buildings: bool,
    elements: FxHashMap<ElementId, MockElement>,
    failing_write_storeys: FxHashSet<String>,
    writes: Mutex<Vec<WriteCall>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storey(mut self, building: &str, storey: &str, elevation: Option<f64>) -> Self {
        let at = match self.buildings.iter().position(|(b, _)| b == building) {
            Some(at) => at,
            None => {
                self.buildings.push((building.to_string(), Vec::new()));
                self.buildings.len() - 1
            }
        };
        self.buildings[at]
            .1
            .push((storey.to_string(), elevation));
        self
    }

    pub fn failing_elevation(mut self, building: &str, storey: &str) -> Self {
        self.failing_elevations
            .insert((building.to_string(), storey.to_string()));
        self
    }

    pub fn failing_buildings(mut self) -> Self {
        self.fail_buildings = true;
        self
    }

    pub fn with_element(mut self, id: u64, element: MockElement) -> Self {
        self.elements.insert(ElementId(id), element);
        self
    }

    pub fn failing_writes_to(mut self, storey: &str) -> Self {
        self.failing_write_storeys.insert(storey.to_string());
        self
    }

    pub fn guid_of(&self, id: u64) -> Guid {
        self.elements[&ElementId(id)].guid
    }

    pub fn writes(&self) -> Vec<WriteCall> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    fn element(&self, id: ElementId) -> Result<&MockElement> {
        self.elements
            .get(&id)
            .ok_or_else(|| Error::host(id, "unknown element"))
    }
}

impl HostModel for MockHost {
    fn all_buildings(&self) -> Result<Vec<String>> {
        if self.fail_buildings {
            return Err(Error::host_query("building list unavailable"));
        }
        Ok(self.buildings.iter().map(|(b, _)| b.clone()).collect())
    }

    fn storeys_for_building(&self, building: &str) -> Result<Vec<String>> {
        self.buildings
            .iter()
            .find(|(b, _)| b == building)
            .map(|(_, storeys)| storeys.iter().map(|(s, _)| s.clone()).collect())
            .ok_or_else(|| Error::host_query(format!("unknown building {building}")))
    }

    fn storey_elevation(&self, building: &str, storey: &str) -> Result<Option<f64>> {
        if self
            .failing_elevations
            .contains(&(building.to_string(), storey.to_string()))
        {
            return Err(Error::host_query(format!("no elevation for {building}/{storey}")));
        }
        Ok(self
            .buildings
            .iter()
            .find(|(b, _)| b == building)
            .and_then(|(_, storeys)| storeys.iter().find(|(s, _)| s == storey))
            .and_then(|(_, z)| *z))
    }
}

impl ElementClassifier for MockHost {
    fn classify(&self, id: ElementId) -> Result<ElementClass> {
        let element = self.element(id)?;
        if element.classify_fails {
            return Err(Error::host(id, "classification failed"));
        }
        Ok(element.class)
    }

    fn grouping_key(&self, id: ElementId, mode: GroupingMode) -> Result<Option<String>> {
        let element = self.element(id)?;
        Ok(match mode {
            GroupingMode::Subgroup => element.subgroup.clone(),
            GroupingMode::Group => element.group.clone(),
        })
    }
}

impl ElementSource for MockHost {
    fn guid(&self, id: ElementId) -> Result<String> {
        Ok(format!("{{{}}}", self.element(id)?.guid))
    }

    fn name(&self, id: ElementId) -> Result<String> {
        Ok(self.element(id)?.name.clone())
    }

    fn geometry(&self, id: ElementId) -> Result<RawElementGeometry> {
        let element = self.element(id)?;
        if element.geometry_fails {
            return Err(Error::host(id, "geometry unavailable"));
        }
        let (z_min, z_max) = element.z_range;
        let axis = |v: Vector| if element.zero_axes { Vector::zeros() } else { v };
        Ok(RawElementGeometry {
            origin: Point::new(0.0, 0.0, z_min),
            x_axis: axis(Vector::x()),
            y_axis: axis(Vector::y()),
            z_axis: axis(Vector::z()),
            bbox_corners: vec![Point::new(0.0, 0.0, z_min), Point::new(1.0, 1.0, z_max)],
        })
    }
}

impl BuildingResolver for MockHost {
    fn building_for_element(&self, id: ElementId) -> Result<Option<String>> {
        Ok(self.element(id)?.building.clone())
    }
}

impl StoreyWriter for MockHost {
    fn write_building_and_storey(
        &self,
        ids: &[ElementId],
        building: &str,
        storey: &str,
    ) -> Result<()> {
        if self.failing_write_storeys.contains(storey) {
            return Err(Error::host_query(format!("write to {building}/{storey} rejected")));
        }
        if let Ok(mut writes) = self.writes.lock() {
            writes.push((ids.to_vec(), building.to_string(), storey.to_string()));
        }
        Ok(())
    }
}
