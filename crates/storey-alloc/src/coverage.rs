// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertical coverage and per-kind assignment policy

use crate::config::CoverageThreshold;
use log::debug;
use storey_alloc_model::{BuildingStoreyBoundary, ElementKind, ModelElement, StoreyCoverage};

/// Fraction of `element`'s vertical extent inside `boundary`, in `[0, 1]`
///
/// Zero when the element's bounding box is flat or lies outside the span.
pub fn coverage(element: &ModelElement, boundary: &BuildingStoreyBoundary) -> f64 {
    boundary.coverage_of(element.geometry().bbx())
}

/// Decides which storey an element belongs to
///
/// Implementations must be deterministic: the same element and boundaries
/// always produce the same decision.
pub trait AssignmentPolicy: Send + Sync {
    /// Storey decision for `element`, or `None` to leave it unassigned
    ///
    /// # Arguments
    /// * `element` - The element to place
    /// * `boundaries` - Boundaries of one building, lowest first
    fn assign(
        &self,
        element: &ModelElement,
        boundaries: &[BuildingStoreyBoundary],
    ) -> Option<StoreyCoverage>;
}

/// Assigns elements by the vertical coverage of their bounding box
///
/// | Kind | Policy |
/// |------|--------|
/// | Wall, Leaf, GenericNode | best coverage, if at least the threshold |
/// | Slab | not yet assigned (centroid rule undecided) |
/// | Roof | not yet assigned (top storey rule undecided) |
/// | Container | never assigned |
#[derive(Clone, Copy, Debug, Default)]
pub struct VerticalCoverageAssigner {
    threshold: CoverageThreshold,
}

impl VerticalCoverageAssigner {
    pub fn new(threshold: CoverageThreshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> CoverageThreshold {
        self.threshold
    }

    /// Boundary with the strictly greatest coverage, earliest on ties
    ///
    /// Returns the boundary index and its coverage; `None` when nothing is
    /// covered at all.
    pub fn best_boundary(
        element: &ModelElement,
        boundaries: &[BuildingStoreyBoundary],
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (at, boundary) in boundaries.iter().enumerate() {
            let covered = coverage(element, boundary);
            debug!(
                "Element {} vs {}: coverage={:.3}%",
                element.guid(),
                boundary.identifier(),
                covered * 100.0
            );
            if covered > best.map_or(0.0, |(_, c)| c) {
                best = Some((at, covered));
            }
        }
        best
    }

    fn by_vertical_coverage(
        &self,
        element: &ModelElement,
        boundaries: &[BuildingStoreyBoundary],
    ) -> Option<StoreyCoverage> {
        let (at, best) = Self::best_boundary(element, boundaries)?;
        self.threshold
            .is_met_by(best)
            .then(|| StoreyCoverage::new(&boundaries[at], best))
    }
}

impl AssignmentPolicy for VerticalCoverageAssigner {
    fn assign(
        &self,
        element: &ModelElement,
        boundaries: &[BuildingStoreyBoundary],
    ) -> Option<StoreyCoverage> {
        match element.kind() {
            ElementKind::Wall | ElementKind::Leaf | ElementKind::GenericNode => {
                self.by_vertical_coverage(element, boundaries)
            }
            ElementKind::Slab | ElementKind::Roof => {
                debug!(
                    "{} {} left unassigned: no storey rule for this kind yet",
                    element.kind(),
                    element.guid()
                );
                None
            }
            ElementKind::Container => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use storey_alloc_model::{BuildingStorey, ElementId, Guid, ModelElementGeometry, Point, Vector};

    fn element(kind: ElementKind, z_min: f64, z_max: f64) -> ModelElement {
        let geometry = ModelElementGeometry::new(
            Point::origin(),
            Vector::x(),
            Vector::y(),
            Vector::z(),
            &[Point::new(0.0, 0.0, z_min), Point::new(1.0, 1.0, z_max)],
        )
        .unwrap();
        ModelElement::composite(kind, Guid::new_v4(), Some(ElementId(1)), "e", geometry, Vec::new())
            .unwrap()
    }

    fn boundaries(elevations: &[f64]) -> Vec<BuildingStoreyBoundary> {
        elevations
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                BuildingStoreyBoundary::new(
                    BuildingStorey::new("B1", format!("L{i}"), pair[0]),
                    pair[0],
                    pair[1],
                )
                .unwrap()
            })
            .collect()
    }

    fn assigner(threshold: f64) -> VerticalCoverageAssigner {
        VerticalCoverageAssigner::new(CoverageThreshold::new(threshold).unwrap())
    }

    #[test]
    fn test_coverage_fraction() {
        let b = boundaries(&[0.0, 3.0]);
        assert_relative_eq!(coverage(&element(ElementKind::Leaf, 1.0, 4.0), &b[0]), 2.0 / 3.0);
        assert_relative_eq!(coverage(&element(ElementKind::Leaf, 0.0, 3.0), &b[0]), 1.0);
        assert_relative_eq!(coverage(&element(ElementKind::Leaf, 5.0, 7.0), &b[0]), 0.0);
    }

    #[test]
    fn test_threshold_decides() {
        let b = boundaries(&[0.0, 3.0]);
        let wall = element(ElementKind::Wall, 1.0, 4.0);

        let decision = assigner(0.60).assign(&wall, &b).unwrap();
        assert_eq!(decision.building_name, "B1");
        assert_eq!(decision.storey_name, "L0");
        assert_relative_eq!(decision.coverage, 2.0 / 3.0);

        assert!(assigner(0.70).assign(&wall, &b).is_none());
    }

    #[test]
    fn test_exact_threshold_is_assigned() {
        let b = boundaries(&[0.0, 4.0]);
        let leaf = element(ElementKind::Leaf, 2.0, 6.0);
        assert!(assigner(0.5).assign(&leaf, &b).is_some());
        assert!(assigner(0.5 + 1e-9).assign(&leaf, &b).is_none());
    }

    #[test]
    fn test_tie_goes_to_lower_storey() {
        let b = boundaries(&[0.0, 3.0, 6.0]);
        let leaf = element(ElementKind::Leaf, 2.0, 4.0);
        let decision = assigner(0.5).assign(&leaf, &b).unwrap();
        assert_eq!(decision.storey_name, "L0");
        assert_eq!(VerticalCoverageAssigner::best_boundary(&leaf, &b), Some((0, 0.5)));
    }

    #[test]
    fn test_higher_coverage_wins() {
        let b = boundaries(&[0.0, 3.0, 6.0]);
        let leaf = element(ElementKind::GenericNode, 2.5, 5.5);
        assert_eq!(assigner(0.6).assign(&leaf, &b).unwrap().storey_name, "L1");
    }

    #[test]
    fn test_flat_element_never_assigned() {
        let b = boundaries(&[0.0, 3.0, 6.0]);
        let flat = element(ElementKind::Wall, 3.0, 3.0);
        assert!(b.iter().all(|boundary| coverage(&flat, boundary) == 0.0));
        assert!(assigner(0.0).assign(&flat, &b).is_none());
    }

    #[test]
    fn test_kind_policies() {
        let b = boundaries(&[0.0, 3.0]);
        for kind in [ElementKind::Slab, ElementKind::Roof, ElementKind::Container] {
            assert!(assigner(0.0).assign(&element(kind, 0.0, 3.0), &b).is_none());
        }
    }

    #[test]
    fn test_no_boundaries() {
        assert!(assigner(0.0)
            .assign(&element(ElementKind::Leaf, 0.0, 3.0), &[])
            .is_none());
    }
}
