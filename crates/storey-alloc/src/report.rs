// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partial-failure results and run summaries
//!
//! Every loop in the engine that talks to the host keeps going when one item
//! fails. The failures are collected here instead of being swallowed.

use serde::Serialize;
use storey_alloc_model::{ElementId, Error, Guid};

/// One item that could not be processed
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Failure {
    /// What failed, e.g. `"#12"` or `"B1/L0 -> L1"`
    pub subject: String,
    /// Rendered error
    pub message: String,
    #[serde(skip)]
    pub error: Error,
}

impl Failure {
    pub fn new(subject: impl Into<String>, error: Error) -> Self {
        Self {
            subject: subject.into(),
            message: error.to_string(),
            error,
        }
    }
}

/// Successes plus per-item failures of one loop
#[derive(Clone, Debug, PartialEq)]
pub struct Partial<T> {
    pub items: Vec<T>,
    pub failures: Vec<Failure>,
}

impl<T> Default for Partial<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> Partial<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn fail(&mut self, subject: impl Into<String>, error: Error) {
        self.failures.push(Failure::new(subject, error));
    }

    /// Whether no item failed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<Failure>) {
        (self.items, self.failures)
    }
}

/// Element ids destined for one storey
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StoreyBatch {
    pub building: String,
    pub storey: String,
    pub ids: Vec<ElementId>,
}

/// Element left without a storey
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Unassigned {
    pub building: String,
    pub guid: Guid,
    pub element_id: Option<ElementId>,
    /// Best coverage seen, if any boundary was evaluated
    pub best_coverage: Option<f64>,
}

/// Summary of one assignment run
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AssignmentReport {
    /// Batches the host accepted
    pub written: Vec<StoreyBatch>,
    /// Batches the host rejected
    pub failed_batches: Vec<StoreyBatch>,
    /// Direct children that met no storey
    pub unassigned: Vec<Unassigned>,
    /// Buildings with no usable boundaries
    pub skipped_buildings: Vec<String>,
    /// Per-item failures from tree building and writing
    pub failures: Vec<Failure>,
}

impl AssignmentReport {
    /// Number of element ids successfully written
    pub fn written_count(&self) -> usize {
        self.written.iter().map(|b| b.ids.len()).sum()
    }

    /// Whether every attempted item succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.failed_batches.is_empty()
    }

    /// Ids written to one storey, empty when none
    pub fn ids_for(&self, building: &str, storey: &str) -> Vec<ElementId> {
        self.written
            .iter()
            .filter(|b| b.building == building && b.storey == storey)
            .flat_map(|b| b.ids.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_collects_both_sides() {
        let mut partial = Partial::new();
        partial.push(1);
        partial.fail("#2", Error::EmptyBoundingBox);
        partial.push(3);

        assert!(!partial.is_clean());
        let (items, failures) = partial.into_parts();
        assert_eq!(items, vec![1, 3]);
        assert_eq!(failures[0].subject, "#2");
        assert_eq!(failures[0].message, "Bounding box requires at least one point");
    }

    #[test]
    fn test_report_counts() {
        let report = AssignmentReport {
            written: vec![
                StoreyBatch {
                    building: "B1".into(),
                    storey: "L0".into(),
                    ids: vec![ElementId(1), ElementId(2)],
                },
                StoreyBatch {
                    building: "B1".into(),
                    storey: "L1".into(),
                    ids: vec![ElementId(3)],
                },
            ],
            ..AssignmentReport::default()
        };
        assert_eq!(report.written_count(), 3);
        assert!(report.is_clean());
        assert_eq!(report.ids_for("B1", "L1"), vec![ElementId(3)]);
        assert!(report.ids_for("B2", "L1").is_empty());
    }
}
