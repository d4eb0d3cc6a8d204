// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model element construction from host data

use storey_alloc_model::{
    ElementId, ElementKind, ElementSource, Error, Guid, ModelElement, ModelElementGeometry, Result,
};

/// Creates [`ModelElement`]s from host element ids
pub struct ElementFactory<'h, S: ?Sized> {
    source: &'h S,
}

impl<'h, S: ElementSource + ?Sized> ElementFactory<'h, S> {
    pub fn new(source: &'h S) -> Self {
        Self { source }
    }

    /// Validated geometry of one element
    pub fn geometry(&self, id: ElementId) -> Result<ModelElementGeometry> {
        let raw = self.source.geometry(id)?;
        ModelElementGeometry::try_from(raw).map_err(|e| attribute_to(id, e))
    }

    /// Leaf element for `id`
    pub fn leaf(&self, id: ElementId) -> Result<ModelElement> {
        let (guid, name, geometry) = self.parts(id)?;
        Ok(ModelElement::leaf(guid, Some(id), name, geometry))
    }

    /// Composite element of `kind` owning `children`
    pub fn composite(
        &self,
        id: ElementId,
        kind: ElementKind,
        children: Vec<ModelElement>,
    ) -> Result<ModelElement> {
        let (guid, name, geometry) = self.parts(id)?;
        ModelElement::composite(kind, guid, Some(id), name, geometry, children)
    }

    fn parts(&self, id: ElementId) -> Result<(Guid, String, ModelElementGeometry)> {
        let guid = Guid::parse(&self.source.guid(id)?).map_err(|e| attribute_to(id, e))?;
        let name = self.source.name(id)?;
        let geometry = self.geometry(id)?;
        Ok((guid, name, geometry))
    }
}

/// Tag a validation error with the element it came from
fn attribute_to(id: ElementId, error: Error) -> Error {
    match error {
        Error::InvalidGeometry(msg) => Error::geometry(format!("element {id}: {msg}")),
        Error::InvalidGuid(guid) => Error::host(id, format!("invalid guid {guid:?}")),
        other => other,
    }
}
