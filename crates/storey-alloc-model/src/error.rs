// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for storey allocation

use crate::ElementId;
use thiserror::Error;

/// Result type alias for allocation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while modelling or allocating elements
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Boundary whose top does not lie strictly above its bottom
    #[error("Invalid boundary for storey {storey}: top_z {top_z} not above bottom_z {bottom_z}")]
    InvalidBoundary {
        storey: String,
        bottom_z: f64,
        top_z: f64,
    },

    /// Element geometry that cannot be used (degenerate axes, NaN coordinates)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Bounding box requested from an empty point set
    #[error("Bounding box requires at least one point")]
    EmptyBoundingBox,

    /// Coverage threshold or fraction outside [0, 1]
    #[error("Coverage threshold {0} must be within [0, 1]")]
    InvalidThreshold(f64),

    /// Unknown building name
    #[error("Building not found: {0:?}")]
    BuildingNotFound(String),

    /// Unknown storey name within a known building
    #[error("Storey {storey:?} not found in building {building:?}")]
    StoreyNotFound { building: String, storey: String },

    /// Building name registered twice
    #[error("Building already registered: {0:?}")]
    DuplicateBuilding(String),

    /// Building without a name
    #[error("Building must have a non-empty name")]
    EmptyBuildingName,

    /// Unparseable globally unique identifier
    #[error("Invalid guid {0:?}")]
    InvalidGuid(String),

    /// Composite construction that breaks the leaf/composite contract
    #[error("Invalid composite: {0}")]
    InvalidComposite(String),

    /// Failure reported by the host modelling tool
    #[error("Host error for element {element}: {message}")]
    Host { element: ElementId, message: String },

    /// Failure reported by the host outside any single element
    #[error("Host error: {0}")]
    HostQuery(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a host error attributed to one element
    pub fn host(element: ElementId, msg: impl Into<String>) -> Self {
        Error::Host {
            element,
            message: msg.into(),
        }
    }

    /// Create a host error for a model level query
    pub fn host_query(msg: impl Into<String>) -> Self {
        Error::HostQuery(msg.into())
    }

    /// Create a geometry error
    pub fn geometry(msg: impl Into<String>) -> Self {
        Error::InvalidGeometry(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Whether this error came from the host tool rather than local validation
    pub fn is_host(&self) -> bool {
        matches!(self, Error::Host { .. } | Error::HostQuery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_message_names_element() {
        let err = Error::host(ElementId(42), "geometry query failed");
        assert_eq!(
            err.to_string(),
            "Host error for element #42: geometry query failed"
        );
        assert!(err.is_host());
    }

    #[test]
    fn test_validation_errors_are_not_host_errors() {
        assert!(!Error::InvalidThreshold(1.5).is_host());
        assert!(!Error::EmptyBoundingBox.is_host());
    }
}
