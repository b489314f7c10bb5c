//! Basic 2D types for image-space geometry.
//!
//! - `Point2`: image-space point (x right, y down), an alias of `nalgebra::Vector2<f64>`.
//! - `Polygon`: owned, validated vertex ring; closed implicitly.
//! - `Bounds2`: axis-aligned bounds with cached width/height.

use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Image-space point. Serialized as `[x, y]`.
pub type Point2 = Vector2<f64>;

/// Determinant magnitude below which two directions count as parallel.
pub(crate) const EPS_DET: f64 = 1e-12;
/// Area magnitude below which a polygon counts as degenerate for centroids.
pub(crate) const EPS_AREA: f64 = 1e-12;

/// Errors raised when a vertex ring cannot form a polygon.
#[derive(Clone, Debug, PartialEq)]
pub enum PolygonError {
    /// Fewer than three vertices.
    TooFewVertices { got: usize },
    /// A coordinate is NaN or infinite.
    NonFinite { index: usize },
}

impl fmt::Display for PolygonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolygonError::TooFewVertices { got } => {
                write!(f, "polygon needs at least 3 vertices, got {got}")
            }
            PolygonError::NonFinite { index } => {
                write!(f, "polygon vertex {index} has a non-finite coordinate")
            }
        }
    }
}

impl std::error::Error for PolygonError {}

/// Simple polygon as an ordered vertex ring.
///
/// Invariants:
/// - At least three vertices, all finite.
/// - Insertion order is boundary order; the last edge wraps to the first vertex.
/// - No self-intersection check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2>", into = "Vec<Point2>")]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point2>) -> Result<Self, PolygonError> {
        if vertices.len() < 3 {
            return Err(PolygonError::TooFewVertices {
                got: vertices.len(),
            });
        }
        if let Some(index) = vertices
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(PolygonError::NonFinite { index });
        }
        Ok(Self { vertices })
    }

    /// Convenience constructor from `(x, y)` tuples.
    pub fn from_xy(points: &[(f64, f64)]) -> Result<Self, PolygonError> {
        Self::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Edges `(v[k], v[k+1])` in boundary order, including the wrap-around edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |k| (self.vertices[k], self.vertices[(k + 1) % n]))
    }

    /// Smallest y over all vertices (image "top").
    pub fn top(&self) -> f64 {
        self.vertices
            .iter()
            .map(|p| p.y)
            .fold(f64::INFINITY, f64::min)
    }

    /// Largest y over all vertices (image "bottom").
    pub fn bottom(&self) -> f64 {
        self.vertices
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn bounds(&self) -> Bounds2 {
        Bounds2::of_points(&self.vertices)
    }

    /// Shoelace signed area; positive for counterclockwise order in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        let twice: f64 = self
            .edges()
            .map(|(p, q)| p.x * q.y - q.x * p.y)
            .sum();
        0.5 * twice
    }

    /// Arithmetic mean of the vertices.
    pub fn vertex_mean(&self) -> Point2 {
        let sum = self
            .vertices
            .iter()
            .fold(Point2::zeros(), |acc, p| acc + p);
        sum / self.vertices.len() as f64
    }

    /// Area-weighted centroid (first polygon moments).
    ///
    /// Falls back to the vertex mean when the signed area vanishes.
    pub fn centroid(&self) -> Point2 {
        let area = self.signed_area();
        if area.abs() < EPS_AREA {
            return self.vertex_mean();
        }
        let (mut cx, mut cy) = (0.0, 0.0);
        for (p, q) in self.edges() {
            let w = p.x * q.y - q.x * p.y;
            cx += (p.x + q.x) * w;
            cy += (p.y + q.y) * w;
        }
        Point2::new(cx / (6.0 * area), cy / (6.0 * area))
    }
}

impl TryFrom<Vec<Point2>> for Polygon {
    type Error = PolygonError;

    fn try_from(vertices: Vec<Point2>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

impl From<Polygon> for Vec<Point2> {
    fn from(poly: Polygon) -> Self {
        poly.vertices
    }
}

/// Axis-aligned bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds2 {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds2 {
    fn of_points(points: &[Point2]) -> Self {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }
}
