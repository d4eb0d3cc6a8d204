// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Allocation configuration

use serde::{Deserialize, Serialize};
use storey_alloc_model::{Error, GroupingMode, Result};

/// Default minimum covered fraction for an assignment
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 0.60;

/// Bucket for tree roots whose building cannot be resolved
pub const UNASSIGNED_BUILDING: &str = "UnassignedBuilding";

/// Name of the synthetic container collecting unmatched leaves
pub const ORPHAN_CONTAINER_NAME: &str = "Orphans";

/// Validated coverage threshold in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CoverageThreshold(f64);

impl CoverageThreshold {
    /// # Errors
    /// [`Error::InvalidThreshold`] when `value` is outside `[0, 1]` or NaN.
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidThreshold(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether `coverage` meets the threshold (inclusive)
    pub fn is_met_by(&self, coverage: f64) -> bool {
        coverage >= self.0
    }
}

impl Default for CoverageThreshold {
    fn default() -> Self {
        Self(DEFAULT_COVERAGE_THRESHOLD)
    }
}

impl<'de> Deserialize<'de> for CoverageThreshold {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        CoverageThreshold::new(value).map_err(serde::de::Error::custom)
    }
}

/// Settings for one allocation run
///
/// # Example
///
/// ```ignore
/// use storey_alloc::AllocationConfig;
/// use storey_alloc_model::GroupingMode;
///
/// let config = AllocationConfig::new()
///     .with_threshold(0.75)?
///     .with_grouping_mode(GroupingMode::Group);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Minimum covered fraction for an element to be assigned
    pub coverage_threshold: CoverageThreshold,
    /// Host tag used to attach leaves to composites
    pub grouping_mode: GroupingMode,
    /// Bucket name for roots with no resolvable building
    pub unassigned_building: String,
    /// Name given to the container of unmatched leaves
    pub orphan_container_name: String,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            coverage_threshold: CoverageThreshold::default(),
            grouping_mode: GroupingMode::default(),
            unassigned_building: UNASSIGNED_BUILDING.to_string(),
            orphan_container_name: ORPHAN_CONTAINER_NAME.to_string(),
        }
    }
}

impl AllocationConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the coverage threshold
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        self.coverage_threshold = CoverageThreshold::new(threshold)?;
        Ok(self)
    }

    /// Set the grouping mode
    pub fn with_grouping_mode(mut self, mode: GroupingMode) -> Self {
        self.grouping_mode = mode;
        self
    }

    /// Set the orphan container name
    pub fn with_orphan_container_name(mut self, name: impl Into<String>) -> Self {
        self.orphan_container_name = name.into();
        self
    }

    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that cannot be encoded in the types
    pub fn validate(&self) -> Result<()> {
        if self.unassigned_building.is_empty() {
            return Err(Error::config("unassigned_building must not be empty"));
        }
        Ok(())
    }
}
