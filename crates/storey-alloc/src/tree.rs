// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element tree construction
//!
//! Turns a flat list of host element ids into composites with their leaves:
//!
//! 1. classify every id as composite candidate (wall, floor, roof,
//!    container) or leaf
//! 2. group leaves by their grouping key (missing key = `""`)
//! 3. give every composite the leaves whose key equals its own key
//! 4. collect leaves from unclaimed groups into one synthetic container

use crate::config::ORPHAN_CONTAINER_NAME;
use crate::factory::ElementFactory;
use crate::report::{Failure, Partial};
use log::{debug, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use storey_alloc_model::{
    ElementClass, ElementClassifier, ElementId, ElementKind, ElementSource, GroupingMode, Guid,
    ModelElement, ModelElementGeometry, Result,
};

/// Roots produced by one tree build plus the items that failed
#[derive(Debug, Default)]
pub struct TreeBuild {
    /// Composites with their leaves, then the orphan container if any
    pub roots: Vec<ModelElement>,
    pub failures: Vec<Failure>,
}

impl TreeBuild {
    /// The synthetic container of unmatched leaves, if one was created
    pub fn orphans(&self, container_name: &str) -> Option<&ModelElement> {
        self.roots
            .iter()
            .find(|r| r.element_id().is_none() && r.name() == container_name)
    }
}

/// Builds element trees from host ids
pub struct ModelTreeBuilder<'h, H: ?Sized> {
    host: &'h H,
    grouping_mode: GroupingMode,
    orphan_container_name: String,
}

impl<'h, H: ElementClassifier + ElementSource + ?Sized> ModelTreeBuilder<'h, H> {
    pub fn new(host: &'h H, grouping_mode: GroupingMode) -> Self {
        Self {
            host,
            grouping_mode,
            orphan_container_name: ORPHAN_CONTAINER_NAME.to_string(),
        }
    }

    /// Set the name of the orphan container
    pub fn with_orphan_container_name(mut self, name: impl Into<String>) -> Self {
        self.orphan_container_name = name.into();
        self
    }

    /// Build element trees for `ids`
    ///
    /// An id whose classification, grouping key or geometry cannot be read is
    /// skipped and recorded in [`TreeBuild::failures`].
    pub fn build(&self, ids: &[ElementId]) -> TreeBuild {
        let mut failures = Vec::new();
        let factory = ElementFactory::new(self.host);

        let (parents, leaf_ids) = self.classify(ids, &mut failures);

        // Leaves in input order with their key; `groups` indexes into it
        let mut leaves: Vec<(String, ModelElement)> = Vec::with_capacity(leaf_ids.len());
        let mut groups: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for id in leaf_ids {
            let built = self
                .grouping_key(id)
                .and_then(|key| factory.leaf(id).map(|leaf| (key, leaf)));
            match built {
                Ok((key, leaf)) => {
                    groups.entry(key.clone()).or_default().push(leaves.len());
                    leaves.push((key, leaf));
                }
                Err(e) => {
                    warn!("Failed to create leaf element for {id}: {e}");
                    failures.push(Failure::new(id.to_string(), e));
                }
            }
        }

        let mut roots = Vec::with_capacity(parents.len() + 1);
        let mut claimed: FxHashSet<String> = FxHashSet::default();
        for (id, class) in parents {
            let key = match self.grouping_key(id) {
                Ok(key) => key,
                Err(e) => {
                    warn!("Failed to read grouping key of parent element {id}: {e}");
                    failures.push(Failure::new(id.to_string(), e));
                    continue;
                }
            };
            let children: Vec<ModelElement> = groups
                .get(&key)
                .map(|members| members.iter().map(|&at| leaves[at].1.clone()).collect())
                .unwrap_or_default();

            let kind = match class.kind() {
                ElementKind::Leaf => ElementKind::GenericNode,
                kind => kind,
            };
            match factory.composite(id, kind, children) {
                Ok(parent) => {
                    debug!(
                        "{} {id} ({:?}) owns {} leaves in group {key:?}",
                        parent.kind(),
                        parent.name(),
                        parent.children().len()
                    );
                    claimed.insert(key);
                    roots.push(parent);
                }
                Err(e) => {
                    warn!("Failed to create parent element for {id}: {e}");
                    failures.push(Failure::new(id.to_string(), e));
                }
            }
        }

        let orphans: Vec<ModelElement> = leaves
            .into_iter()
            .filter(|(key, _)| !claimed.contains(key))
            .map(|(_, leaf)| leaf)
            .collect();
        if !orphans.is_empty() {
            debug!("{} leaves have no parent element", orphans.len());
            match self.orphan_container(orphans) {
                Ok(container) => roots.push(container),
                Err(e) => failures.push(Failure::new(self.orphan_container_name.clone(), e)),
            }
        }

        info!(
            "Built {} element trees from {} ids ({} failures)",
            roots.len(),
            ids.len(),
            failures.len()
        );
        TreeBuild { roots, failures }
    }

    fn classify(
        &self,
        ids: &[ElementId],
        failures: &mut Vec<Failure>,
    ) -> (Vec<(ElementId, ElementClass)>, Vec<ElementId>) {
        let mut split = Partial::new();
        let mut leaves = Vec::new();
        for &id in ids {
            match self.host.classify(id) {
                Ok(class) if class.is_composite() => split.push((id, class)),
                Ok(_) => leaves.push(id),
                Err(e) => {
                    warn!("Failed to classify element {id}: {e}");
                    split.fail(id.to_string(), e);
                }
            }
        }
        let (parents, classify_failures) = split.into_parts();
        failures.extend(classify_failures);
        (parents, leaves)
    }

    fn grouping_key(&self, id: ElementId) -> Result<String> {
        Ok(self
            .host
            .grouping_key(id, self.grouping_mode)?
            .unwrap_or_default())
    }

    fn orphan_container(&self, orphans: Vec<ModelElement>) -> Result<ModelElement> {
        ModelElement::composite(
            ElementKind::GenericNode,
            Guid::new_v4(),
            None,
            self.orphan_container_name.clone(),
            ModelElementGeometry::placeholder(),
            orphans,
        )
    }
}

/// Build element trees with the default orphan container name
pub fn build_model_tree<H>(host: &H, grouping_mode: GroupingMode, ids: &[ElementId]) -> TreeBuild
where
    H: ElementClassifier + ElementSource + ?Sized,
{
    ModelTreeBuilder::new(host, grouping_mode).build(ids)
}
