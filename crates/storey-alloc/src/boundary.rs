// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storey boundary construction
//!
//! Each pair of consecutive storeys `(lower, upper)` yields one boundary
//! owned by `lower`, spanning `[lower.elevation, upper.elevation]`. The top
//! storey owns no boundary.

use crate::report::Partial;
use log::{debug, warn};
use storey_alloc_model::{Building, BuildingStorey, BuildingStoreyBoundary, Result};

/// Builds storey boundaries for a building
pub struct BoundaryBuilder;

impl BoundaryBuilder {
    /// Boundary between two storeys, owned by the lower one
    pub fn between(
        lower: &BuildingStorey,
        upper: &BuildingStorey,
    ) -> Result<BuildingStoreyBoundary> {
        BuildingStoreyBoundary::new(lower.clone(), lower.elevation, upper.elevation)
    }

    /// All boundaries of `building`, lowest first
    ///
    /// Pairs whose elevations do not strictly increase are rejected with a
    /// warning and recorded as failures; the remaining pairs are still built.
    pub fn from_building(building: &Building) -> Partial<BuildingStoreyBoundary> {
        let mut boundaries = Partial::new();

        for pair in building.storeys().windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            match Self::between(lower, upper) {
                Ok(boundary) => {
                    debug!(
                        "Boundary {}: z_range=({:.3}, {:.3}), height={:.3}",
                        boundary.identifier(),
                        boundary.bottom_z(),
                        boundary.top_z(),
                        boundary.height()
                    );
                    boundaries.push(boundary);
                }
                Err(e) => {
                    warn!(
                        "Skipping boundary {}/{} -> {}: {e}",
                        building.name(),
                        lower.storey_name,
                        upper.storey_name
                    );
                    boundaries.fail(
                        format!(
                            "{}/{} -> {}",
                            building.name(),
                            lower.storey_name,
                            upper.storey_name
                        ),
                        e,
                    );
                }
            }
        }

        boundaries
    }
}

/// All valid boundaries of `building`, lowest first
pub fn build_boundaries(building: &Building) -> Vec<BuildingStoreyBoundary> {
    BoundaryBuilder::from_building(building).items
}
