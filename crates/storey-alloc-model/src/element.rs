// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model element tree
//!
//! A composite exclusively owns its children; there are no back references
//! and no sharing, so dropping a root releases its whole subtree.

use crate::{ElementId, ElementKind, Error, Guid, ModelElementGeometry, Result};
use std::hash::{Hash, Hasher};

/// Node in the element tree
///
/// Identity and equality are by [`Guid`].
#[derive(Clone, Debug)]
pub struct ModelElement {
    guid: Guid,
    /// Raw host id; `None` for synthetic nodes
    element_id: Option<ElementId>,
    name: String,
    geometry: ModelElementGeometry,
    kind: ElementKind,
    children: Vec<ModelElement>,
}

impl ModelElement {
    /// Create a leaf element
    pub fn leaf(
        guid: Guid,
        element_id: Option<ElementId>,
        name: impl Into<String>,
        geometry: ModelElementGeometry,
    ) -> Self {
        Self {
            guid,
            element_id,
            name: name.into(),
            geometry,
            kind: ElementKind::Leaf,
            children: Vec::new(),
        }
    }

    /// Create a composite element owning `children`
    ///
    /// # Errors
    /// [`Error::InvalidComposite`] when `kind` is [`ElementKind::Leaf`] and
    /// children are supplied.
    pub fn composite(
        kind: ElementKind,
        guid: Guid,
        element_id: Option<ElementId>,
        name: impl Into<String>,
        geometry: ModelElementGeometry,
        children: Vec<ModelElement>,
    ) -> Result<Self> {
        if !kind.is_composite() && !children.is_empty() {
            return Err(Error::InvalidComposite(format!(
                "leaf element {guid} cannot own {} children",
                children.len()
            )));
        }
        Ok(Self {
            guid,
            element_id,
            name: name.into(),
            geometry,
            kind,
            children,
        })
    }

    pub fn guid(&self) -> &Guid {
        &self.guid
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &ModelElementGeometry {
        &self.geometry
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Direct children in insertion order
    pub fn children(&self) -> &[ModelElement] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == ElementKind::Leaf
    }

    /// Number of elements below this one (recursive)
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    /// Find an element by guid in this subtree
    pub fn find(&self, guid: &Guid) -> Option<&ModelElement> {
        self.iter().find(|e| e.guid == *guid)
    }

    /// Iterate this element and its descendants (depth-first)
    pub fn iter(&self) -> ModelElementIter<'_> {
        ModelElementIter { stack: vec![self] }
    }

    /// Host ids of this element and all descendants, depth-first
    ///
    /// Synthetic nodes contribute nothing themselves.
    pub fn element_ids(&self) -> Vec<ElementId> {
        self.iter().filter_map(|e| e.element_id).collect()
    }
}

impl PartialEq for ModelElement {
    fn eq(&self, other: &Self) -> bool {
        self.guid == other.guid
    }
}

impl Eq for ModelElement {}

impl Hash for ModelElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.guid.hash(state);
    }
}

/// Iterator over model elements (depth-first)
pub struct ModelElementIter<'a> {
    stack: Vec<&'a ModelElement>,
}

impl<'a> Iterator for ModelElementIter<'a> {
    type Item = &'a ModelElement;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the first child comes out first
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: u64) -> ModelElement {
        ModelElement::leaf(
            Guid::new_v4(),
            Some(ElementId(id)),
            format!("leaf {id}"),
            ModelElementGeometry::placeholder(),
        )
    }

    #[test]
    fn test_composite_owns_children() {
        let wall = ModelElement::composite(
            ElementKind::Wall,
            Guid::new_v4(),
            Some(ElementId(1)),
            "Wall",
            ModelElementGeometry::placeholder(),
            vec![leaf(2), leaf(3)],
        )
        .unwrap();

        assert_eq!(wall.children().len(), 2);
        assert_eq!(wall.descendant_count(), 2);
        assert_eq!(
            wall.element_ids(),
            vec![ElementId(1), ElementId(2), ElementId(3)]
        );
        assert!(!wall.is_leaf());
    }

    #[test]
    fn test_leaf_kind_rejects_children() {
        let result = ModelElement::composite(
            ElementKind::Leaf,
            Guid::new_v4(),
            None,
            "bad",
            ModelElementGeometry::placeholder(),
            vec![leaf(1)],
        );
        assert!(matches!(result, Err(Error::InvalidComposite(_))));
    }

    #[test]
    fn test_synthetic_node_contributes_no_id() {
        let node = ModelElement::composite(
            ElementKind::GenericNode,
            Guid::new_v4(),
            None,
            "Orphans",
            ModelElementGeometry::placeholder(),
            vec![leaf(5)],
        )
        .unwrap();
        assert_eq!(node.element_ids(), vec![ElementId(5)]);
    }

    #[test]
    fn test_equality_by_guid() {
        let guid = Guid::new_v4();
        let geometry = ModelElementGeometry::placeholder();
        let a = ModelElement::leaf(guid, Some(ElementId(1)), "a", geometry.clone());
        let b = ModelElement::leaf(guid, Some(ElementId(2)), "b", geometry);
        assert_eq!(a, b);
        assert_ne!(a, leaf(1));
    }

    #[test]
    fn test_find_nested() {
        let inner = leaf(9);
        let target = *inner.guid();
        let node = ModelElement::composite(
            ElementKind::Container,
            Guid::new_v4(),
            Some(ElementId(8)),
            "Container",
            ModelElementGeometry::placeholder(),
            vec![inner],
        )
        .unwrap();
        assert_eq!(node.find(&target).map(|e| e.name()), Some("leaf 9"));
        assert!(node.find(&Guid::new_v4()).is_none());
    }
}
