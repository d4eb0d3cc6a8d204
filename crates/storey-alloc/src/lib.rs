// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Storey-Alloc
//!
//! Assigns building elements to the building storey whose vertical span best
//! covers them. The host tool is reached only through the traits in
//! `storey-alloc-model`, so the engine runs the same against a live model or
//! an in-memory one.
//!
//! ## Overview
//!
//! - **Hierarchy**: Read buildings and storeys from the host into a [`BuildingRegistry`]
//! - **Boundaries**: Derive one vertical span per storey from consecutive elevations
//! - **Element trees**: Attach leaves to walls, slabs, roofs and containers by grouping key
//! - **Coverage**: Pick the storey with the greatest covered fraction of each element
//! - **Write-back**: One batch per storey, failures collected in an [`AssignmentReport`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storey_alloc::{AllocationConfig, BuildingRegistry, StoreyAssignmentService};
//!
//! let (registry, _failures) = BuildingRegistry::from_host(&host)?;
//! let config = AllocationConfig::new().with_threshold(0.6)?;
//! let service = StoreyAssignmentService::new(&registry, config)?;
//!
//! let report = service.assign_elements(&host, &element_ids);
//! println!("{} elements written", report.written_count());
//! ```
//!
//! ## Features
//!
//! - `parallel`: Run per-building decision passes on the rayon thread pool

pub mod assignment;
pub mod boundary;
pub mod config;
pub mod coverage;
pub mod factory;
pub mod hierarchy;
pub mod registry;
pub mod report;
pub mod tree;

#[cfg(test)]
mod test_support;

// Re-export the model crate for convenience
pub use storey_alloc_model as model;
pub use storey_alloc_model::{Error, Result};

// Re-export main types
pub use assignment::{map_trees_to_buildings, AssignmentPlan, StoreyAssignmentService};
pub use boundary::{build_boundaries, BoundaryBuilder};
pub use config::{
    AllocationConfig, CoverageThreshold, DEFAULT_COVERAGE_THRESHOLD, ORPHAN_CONTAINER_NAME,
    UNASSIGNED_BUILDING,
};
pub use coverage::{coverage, AssignmentPolicy, VerticalCoverageAssigner};
pub use factory::ElementFactory;
pub use hierarchy::load_buildings;
pub use registry::BuildingRegistry;
pub use report::{AssignmentReport, Failure, Partial, StoreyBatch, Unassigned};
pub use tree::{build_model_tree, ModelTreeBuilder, TreeBuild};
