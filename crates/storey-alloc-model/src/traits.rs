// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host collaborator traits
//!
//! The allocation engine never talks to a modelling tool directly. Each
//! concern the host provides is a separate trait so tests and alternative
//! backends can implement only what they need.
//!
//! # Example
//!
//! ```ignore
//! use storey_alloc_model::{ElementClassifier, ElementId, GroupingMode};
//!
//! fn describe(host: &dyn ElementClassifier, id: ElementId) -> storey_alloc_model::Result<()> {
//!     let class = host.classify(id)?;
//!     let key = host.grouping_key(id, GroupingMode::Subgroup)?;
//!     println!("{id}: {:?} in group {:?}", class.kind(), key.unwrap_or_default());
//!     Ok(())
//! }
//! ```

use crate::{ElementClass, ElementId, GroupingMode, RawElementGeometry, Result};

/// Building and storey queries used to discover the spatial hierarchy
pub trait HostModel {
    /// Names of all buildings in the host model
    fn all_buildings(&self) -> Result<Vec<String>>;

    /// Names of the storeys of one building
    fn storeys_for_building(&self, building: &str) -> Result<Vec<String>>;

    /// Elevation of a storey, `None` when the host has no value
    fn storey_elevation(&self, building: &str, storey: &str) -> Result<Option<f64>>;
}

/// Element classification and grouping
pub trait ElementClassifier {
    /// Classification predicates for an element
    fn classify(&self, id: ElementId) -> Result<ElementClass>;

    /// Grouping tag for an element under the given mode
    ///
    /// # Returns
    /// `None` when the element carries no tag
    fn grouping_key(&self, id: ElementId, mode: GroupingMode) -> Result<Option<String>>;
}

/// Element attributes and geometry
pub trait ElementSource {
    /// Host guid string (may be wrapped in braces)
    fn guid(&self, id: ElementId) -> Result<String>;

    /// Display name
    fn name(&self, id: ElementId) -> Result<String>;

    /// Raw local frame and bounding box corners
    fn geometry(&self, id: ElementId) -> Result<RawElementGeometry>;
}

/// Element to building lookup
pub trait BuildingResolver {
    /// Building the host currently files the element under
    fn building_for_element(&self, id: ElementId) -> Result<Option<String>>;
}

/// The one mutating call: tag a set of elements with a building and storey
pub trait StoreyWriter {
    fn write_building_and_storey(&self, ids: &[ElementId], building: &str, storey: &str)
        -> Result<()>;
}

/// Everything the assignment pass needs from the host
pub trait ElementHost: ElementClassifier + ElementSource + BuildingResolver + StoreyWriter {}

// Blanket implementation for anything providing all element facets
impl<T: ElementClassifier + ElementSource + BuildingResolver + StoreyWriter + ?Sized> ElementHost
    for T
{
}
