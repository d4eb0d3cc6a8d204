// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building/storey discovery from the host model

use crate::registry::BuildingRegistry;
use crate::report::{Failure, Partial};
use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use storey_alloc_model::{Building, BuildingStorey, HostModel, Result};

/// Read every building and its storeys from the host
///
/// Storeys without an elevation are skipped with a warning. Repeated storey
/// names keep their first occurrence. A host error for one building or one
/// storey is recorded and the rest of the model is still read.
pub fn load_buildings(host: &dyn HostModel) -> Result<Partial<Building>> {
    let mut loaded = Partial::new();

    for building_name in host.all_buildings()? {
        let storey_names = match host.storeys_for_building(&building_name) {
            Ok(names) => names,
            Err(e) => {
                warn!("Failed to read storeys of building {building_name}: {e}");
                loaded.fail(building_name, e);
                continue;
            }
        };

        let mut seen = FxHashSet::default();
        let mut storeys = Vec::with_capacity(storey_names.len());
        for storey_name in storey_names {
            if !seen.insert(storey_name.clone()) {
                debug!("Duplicate storey {building_name}/{storey_name} ignored");
                continue;
            }
            match host.storey_elevation(&building_name, &storey_name) {
                Ok(Some(elevation)) => {
                    storeys.push(BuildingStorey::new(&building_name, storey_name, elevation))
                }
                Ok(None) => {
                    warn!("Storey {building_name}/{storey_name} has no elevation, skipped");
                }
                Err(e) => {
                    warn!("Failed to read elevation of {building_name}/{storey_name}: {e}");
                    loaded
                        .failures
                        .push(Failure::new(format!("{building_name}/{storey_name}"), e));
                }
            }
        }

        let building = Building::new(building_name, storeys);
        info!("Building {}", building.name());
        for storey in building.storeys() {
            info!("  Storey: {}, Elevation: {}", storey.storey_name, storey.elevation);
        }
        loaded.push(building);
    }

    Ok(loaded)
}

impl BuildingRegistry {
    /// Registry populated from the host model
    ///
    /// Buildings the host reports twice are upserted, so the last one wins.
    pub fn from_host(host: &dyn HostModel) -> Result<(Self, Vec<Failure>)> {
        let (buildings, mut failures) = load_buildings(host)?.into_parts();
        let mut registry = BuildingRegistry::new();
        for building in buildings {
            let name = building.name().to_string();
            if let Err(e) = registry.upsert(building) {
                warn!("Building {name:?} not registered: {e}");
                failures.push(Failure::new(name, e));
            }
        }
        Ok((registry, failures))
    }
}
