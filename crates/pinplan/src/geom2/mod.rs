//! Image-space 2D geometry kernel.
//!
//! Purpose
//! - Provide the small set of line/polygon operations the planner needs:
//!   segment extension, line/segment and line/line intersection, boundary
//!   extension of a ray against a polygon, vector angles, bounds and centroids.
//! - Stay free of anatomical meaning; callers interpret parameters (e.g. a
//!   line parameter `t >= 1` means "beyond the far endpoint").
//!
//! Conventions
//! - Image coordinates: x grows to the right, y grows downwards.
//! - Degenerate inputs (zero-length vectors, parallel lines, zero-area polygons)
//!   yield `None` or a documented fallback, never a panic.

mod boundary;
mod lines;
mod types;

pub use boundary::extend_to_polygon_boundary;
pub use lines::{
    angle_between, extend_line, infinite_line_intersection, segment_intersection, LineHit,
};
pub use types::{Bounds2, Point2, Polygon, PolygonError};

#[cfg(test)]
mod tests;
