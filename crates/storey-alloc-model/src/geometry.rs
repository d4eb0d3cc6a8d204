// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry primitives for model elements
//!
//! Elements carry a local frame (origin plus three axis vectors) and a
//! world-space axis-aligned bounding box. Allocation only ever looks at the
//! box's Z extent; the frame is kept so callers can tell valid geometry from
//! host garbage.

use crate::{Error, Result};
use nalgebra::{Point3, Vector3};

/// World-space point
pub type Point = Point3<f64>;

/// World-space direction vector
pub type Vector = Vector3<f64>;

/// Minimum length for a local axis to count as non-degenerate
pub const MIN_AXIS_LENGTH: f64 = 1e-6;

/// Axis-aligned bounding box
///
/// Built as the smallest axis-aligned box containing a non-empty point set.
/// Zero-volume boxes are legal; they simply cover nothing vertically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: Point,
    max: Point,
}

impl BoundingBox {
    /// Construct the box containing all `points`
    ///
    /// # Errors
    /// [`Error::EmptyBoundingBox`] when `points` is empty, and
    /// [`Error::InvalidGeometry`] when a coordinate is not finite.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let (first, rest) = points.split_first().ok_or(Error::EmptyBoundingBox)?;

        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.inf(p);
            max = max.sup(p);
        }

        if !min.coords.iter().chain(max.coords.iter()).all(|c| c.is_finite()) {
            return Err(Error::geometry("bounding box coordinates must be finite"));
        }

        Ok(Self { min, max })
    }

    /// Box collapsed onto a single point
    pub fn degenerate_at(point: Point) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Minimum corner
    pub fn min(&self) -> Point {
        self.min
    }

    /// Maximum corner
    pub fn max(&self) -> Point {
        self.max
    }

    /// The eight corner points, bottom face first (counter-clockwise from min)
    pub fn corners(&self) -> [Point; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point::new(lo.x, lo.y, lo.z),
            Point::new(hi.x, lo.y, lo.z),
            Point::new(hi.x, hi.y, lo.z),
            Point::new(lo.x, hi.y, lo.z),
            Point::new(lo.x, lo.y, hi.z),
            Point::new(hi.x, lo.y, hi.z),
            Point::new(hi.x, hi.y, hi.z),
            Point::new(lo.x, hi.y, hi.z),
        ]
    }

    /// Vertical extent as `(z_min, z_max)`
    pub fn z_extent(&self) -> (f64, f64) {
        (self.min.z, self.max.z)
    }

    /// Vertical size of the box
    pub fn height(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Center of the box
    pub fn centroid(&self) -> Point {
        nalgebra::center(&self.min, &self.max)
    }

    /// Whether the box has no vertical extent
    pub fn is_flat(&self) -> bool {
        self.max.z <= self.min.z
    }
}

/// Raw geometry as reported by the host for one element
#[derive(Clone, Debug, PartialEq)]
pub struct RawElementGeometry {
    pub origin: Point,
    pub x_axis: Vector,
    pub y_axis: Vector,
    pub z_axis: Vector,
    pub bbox_corners: Vec<Point>,
}

/// Validated element geometry: local frame plus world bounding box
#[derive(Clone, Debug, PartialEq)]
pub struct ModelElementGeometry {
    local_origin: Point,
    local_x: Vector,
    local_y: Vector,
    local_z: Vector,
    bbx: BoundingBox,
}

impl ModelElementGeometry {
    /// Build geometry from a local frame and bounding box corner points
    ///
    /// # Errors
    /// Fails if the corner set is empty or non-finite, or if all three local
    /// axes are shorter than [`MIN_AXIS_LENGTH`].
    pub fn new(
        local_origin: Point,
        local_x: Vector,
        local_y: Vector,
        local_z: Vector,
        bbox_corners: &[Point],
    ) -> Result<Self> {
        let bbx = BoundingBox::from_points(bbox_corners)
            .map_err(|e| Error::geometry(format!("invalid bounding box data: {e}")))?;

        if [local_x, local_y, local_z]
            .iter()
            .all(|v| v.norm() < MIN_AXIS_LENGTH)
        {
            return Err(Error::geometry("at least one local axis must be non-zero"));
        }

        Ok(Self {
            local_origin,
            local_x,
            local_y,
            local_z,
            bbx,
        })
    }

    /// Placeholder geometry for synthetic nodes
    ///
    /// Origin at world zero, unit axes and a zero-volume box at the origin.
    pub fn placeholder() -> Self {
        let origin = Point::origin();
        Self {
            local_origin: origin,
            local_x: Vector::x(),
            local_y: Vector::y(),
            local_z: Vector::z(),
            bbx: BoundingBox::degenerate_at(origin),
        }
    }

    pub fn local_origin(&self) -> Point {
        self.local_origin
    }

    pub fn local_x(&self) -> Vector {
        self.local_x
    }

    pub fn local_y(&self) -> Vector {
        self.local_y
    }

    pub fn local_z(&self) -> Vector {
        self.local_z
    }

    /// World-space bounding box
    pub fn bbx(&self) -> &BoundingBox {
        &self.bbx
    }
}

impl TryFrom<RawElementGeometry> for ModelElementGeometry {
    type Error = Error;

    fn try_from(raw: RawElementGeometry) -> Result<Self> {
        Self::new(
            raw.origin,
            raw.x_axis,
            raw.y_axis,
            raw.z_axis,
            &raw.bbox_corners,
        )
    }
}
