// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storey-Alloc Model - Value types and trait definitions for storey allocation
//!
//! This crate provides the shared vocabulary for assigning building elements to
//! buildings and storeys. It holds no allocation logic and never calls a host
//! tool; those concerns live in `storey-alloc`.
//!
//! # Architecture
//!
//! - [`BoundingBox`] / [`ModelElementGeometry`] - Geometry primitives
//! - [`ModelElement`] - Element tree (leaves and typed composites)
//! - [`Building`] / [`BuildingStorey`] - Spatial hierarchy, storeys sorted by elevation
//! - [`BuildingStoreyBoundary`] - Vertical span owned by a storey
//! - [`StoreyCoverage`] - One assignment decision
//! - [`HostModel`], [`ElementClassifier`], [`ElementSource`], [`BuildingResolver`],
//!   [`StoreyWriter`] - Host tool seams
//!
//! # Example
//!
//! ```ignore
//! use storey_alloc_model::{Building, BuildingStorey, BuildingStoreyBoundary};
//!
//! let building = Building::new("B1", vec![
//!     BuildingStorey::new("B1", "Level 1", 3.0),
//!     BuildingStorey::new("B1", "Ground", 0.0),
//! ]);
//! let ground = &building.storeys()[0];
//! let boundary = BuildingStoreyBoundary::new(ground.clone(), 0.0, 3.0)?;
//! ```

pub mod element;
pub mod error;
pub mod geometry;
pub mod spatial;
pub mod traits;
pub mod types;

// Re-export all public types
pub use element::*;
pub use error::*;
pub use geometry::*;
pub use spatial::*;
pub use traits::*;
pub use types::*;
