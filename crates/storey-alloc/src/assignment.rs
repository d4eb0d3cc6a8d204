// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storey assignment pass
//!
//! One run:
//! - builds the element trees once for all input ids
//! - files every tree under the building the host reports for it
//! - per registered building, builds boundaries and lets the policy place
//!   each direct child of the building's root (a child moves together with
//!   its own children)
//! - writes one batch per non-empty storey bucket

use crate::boundary::BoundaryBuilder;
use crate::config::AllocationConfig;
use crate::coverage::{coverage, AssignmentPolicy, VerticalCoverageAssigner};
use crate::registry::BuildingRegistry;
use crate::report::{AssignmentReport, Failure, StoreyBatch, Unassigned};
use crate::tree::ModelTreeBuilder;
use log::{debug, error, info, warn};
use rustc_hash::FxHashMap;
use storey_alloc_model::{
    Building, BuildingResolver, BuildingStoreyBoundary, ElementClassifier, ElementHost, ElementId,
    ElementKind, ElementSource, Error, Guid, ModelElement, ModelElementGeometry, Result,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Decisions of one run before anything is written
#[derive(Clone, Debug, Default)]
pub struct AssignmentPlan {
    /// Non-empty storey buckets, registry order then elevation order
    pub batches: Vec<StoreyBatch>,
    pub unassigned: Vec<Unassigned>,
    pub skipped_buildings: Vec<String>,
    pub failures: Vec<Failure>,
}

/// Assigns elements to storeys of registered buildings
pub struct StoreyAssignmentService<'r, P = VerticalCoverageAssigner> {
    registry: &'r BuildingRegistry,
    config: AllocationConfig,
    policy: P,
}

impl<'r> StoreyAssignmentService<'r> {
    /// Create a service using vertical coverage with the configured threshold
    ///
    /// # Errors
    /// Fails before any work is done if `config` is invalid.
    pub fn new(registry: &'r BuildingRegistry, config: AllocationConfig) -> Result<Self> {
        config.validate()?;
        let policy = VerticalCoverageAssigner::new(config.coverage_threshold);
        Ok(Self {
            registry,
            config,
            policy,
        })
    }
}

impl<'r, P: AssignmentPolicy> StoreyAssignmentService<'r, P> {
    /// Replace the assignment policy
    pub fn with_policy<Q: AssignmentPolicy>(self, policy: Q) -> StoreyAssignmentService<'r, Q> {
        StoreyAssignmentService {
            registry: self.registry,
            config: self.config,
            policy,
        }
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Assign `ids` to storeys and write the result back to the host
    pub fn assign_elements<H: ElementHost + ?Sized>(
        &self,
        host: &H,
        ids: &[ElementId],
    ) -> AssignmentReport {
        let plan = self.plan(host, ids);
        let mut report = AssignmentReport {
            written: Vec::new(),
            failed_batches: Vec::new(),
            unassigned: plan.unassigned,
            skipped_buildings: plan.skipped_buildings,
            failures: plan.failures,
        };

        for batch in plan.batches {
            info!(
                "Setting {} elements to {}/{}",
                batch.ids.len(),
                batch.building,
                batch.storey
            );
            match host.write_building_and_storey(&batch.ids, &batch.building, &batch.storey) {
                Ok(()) => report.written.push(batch),
                Err(e) => {
                    error!(
                        "Failed assigning {} elements to {}/{}: {e}",
                        batch.ids.len(),
                        batch.building,
                        batch.storey
                    );
                    report.failures.push(Failure::new(
                        format!("{}/{}", batch.building, batch.storey),
                        e,
                    ));
                    report.failed_batches.push(batch);
                }
            }
        }

        info!(
            "Assignment finished: {} elements written in {} batches, {} unassigned, {} failures",
            report.written_count(),
            report.written.len(),
            report.unassigned.len(),
            report.failures.len()
        );
        report
    }

    /// Compute every storey decision without writing anything
    pub fn plan<H>(&self, host: &H, ids: &[ElementId]) -> AssignmentPlan
    where
        H: ElementClassifier + ElementSource + BuildingResolver + ?Sized,
    {
        let mut plan = AssignmentPlan::default();

        let tree = ModelTreeBuilder::new(host, self.config.grouping_mode)
            .with_orphan_container_name(self.config.orphan_container_name.clone())
            .build(ids);
        plan.failures.extend(tree.failures);

        let (building_roots, lookup_failures) =
            map_trees_to_buildings(tree.roots, host, &self.config.unassigned_building);
        plan.failures.extend(lookup_failures);

        let mut work = Vec::with_capacity(self.registry.len());
        for building in self.registry {
            if building.name() == self.config.unassigned_building {
                warn!(
                    "Building {} shares the unassigned bucket name, skipping",
                    building.name()
                );
                plan.skipped_buildings.push(building.name().to_string());
                continue;
            }
            info!("Processing building: {}", building.name());

            let (boundaries, rejected) = BoundaryBuilder::from_building(building).into_parts();
            plan.failures.extend(rejected);
            if boundaries.is_empty() {
                warn!("No boundaries for building {}", building.name());
                plan.skipped_buildings.push(building.name().to_string());
                continue;
            }

            match building_roots.get(building.name()) {
                Some(root) => work.push((building, boundaries, root)),
                None => debug!("No elements filed under building {}", building.name()),
            }
        }

        #[cfg(feature = "parallel")]
        let decisions: Vec<BuildingDecision> = work
            .par_iter()
            .map(|(building, boundaries, root)| self.decide(building, boundaries, root))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let decisions: Vec<BuildingDecision> = work
            .iter()
            .map(|(building, boundaries, root)| self.decide(building, boundaries, root))
            .collect();

        for decision in decisions {
            plan.batches.extend(decision.batches);
            plan.unassigned.extend(decision.unassigned);
            plan.failures.extend(decision.failures);
        }
        plan
    }

    /// Place every direct child of one building's root
    fn decide(
        &self,
        building: &Building,
        boundaries: &[BuildingStoreyBoundary],
        root: &ModelElement,
    ) -> BuildingDecision {
        let threshold = self.config.coverage_threshold.value();
        let mut buckets: Vec<Vec<ElementId>> = vec![Vec::new(); boundaries.len()];
        let mut decision = BuildingDecision::default();

        for child in root.children() {
            let Some(chosen) = self.policy.assign(child, boundaries) else {
                let best = boundaries
                    .iter()
                    .map(|b| coverage(child, b))
                    .fold(0.0_f64, f64::max);
                warn!(
                    "Element {} ({}) not assigned in {} (best={:.3}% thr={:.3}%)",
                    child.guid(),
                    child.kind(),
                    building.name(),
                    best * 100.0,
                    threshold * 100.0
                );
                decision.unassigned.push(Unassigned {
                    building: building.name().to_string(),
                    guid: *child.guid(),
                    element_id: child.element_id(),
                    best_coverage: (!boundaries.is_empty()).then_some(best),
                });
                continue;
            };

            let Some(at) = boundaries
                .iter()
                .position(|b| b.storey().storey_name == chosen.storey_name)
            else {
                let e = Error::StoreyNotFound {
                    building: building.name().to_string(),
                    storey: chosen.storey_name,
                };
                warn!("Element {} assigned to an unknown storey: {e}", child.guid());
                decision.failures.push(Failure::new(child.guid().to_string(), e));
                continue;
            };

            info!(
                "Element {} assigned to {}/{} (coverage={:.3}% thr={:.3}%)",
                child.guid(),
                building.name(),
                chosen.storey_name,
                chosen.coverage * 100.0,
                threshold * 100.0
            );
            buckets[at].extend(child.element_ids());
        }

        decision.batches = boundaries
            .iter()
            .zip(buckets)
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(boundary, ids)| StoreyBatch {
                building: building.name().to_string(),
                storey: boundary.storey().storey_name.clone(),
                ids,
            })
            .collect();
        decision
    }
}

#[derive(Debug, Default)]
struct BuildingDecision {
    batches: Vec<StoreyBatch>,
    unassigned: Vec<Unassigned>,
    failures: Vec<Failure>,
}

/// File element trees under the building that owns them
///
/// Each building gets one synthetic root whose children are the trees filed
/// under it. Trees without a resolvable building (including synthetic ones
/// such as the orphan container) go under `unassigned_building`.
pub fn map_trees_to_buildings<R: BuildingResolver + ?Sized>(
    roots: Vec<ModelElement>,
    resolver: &R,
    unassigned_building: &str,
) -> (FxHashMap<String, ModelElement>, Vec<Failure>) {
    let mut failures = Vec::new();
    let mut grouped: FxHashMap<String, Vec<ModelElement>> = FxHashMap::default();

    for root in roots {
        let building = match root.element_id() {
            Some(id) => match resolver.building_for_element(id) {
                Ok(building) => building,
                Err(e) => {
                    warn!("Failed to resolve building of element {id}: {e}");
                    failures.push(Failure::new(id.to_string(), e));
                    None
                }
            },
            None => None,
        };
        let building = building
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| unassigned_building.to_string());
        grouped.entry(building).or_default().push(root);
    }

    let mut building_roots = FxHashMap::default();
    for (building, trees) in grouped {
        match building_root(&building, trees) {
            Ok(root) => {
                building_roots.insert(building, root);
            }
            Err(e) => failures.push(Failure::new(building, e)),
        }
    }
    (building_roots, failures)
}

fn building_root(building: &str, trees: Vec<ModelElement>) -> Result<ModelElement> {
    ModelElement::composite(
        ElementKind::GenericNode,
        Guid::new_v4(),
        None,
        building,
        ModelElementGeometry::placeholder(),
        trees,
    )
}
