//! Planar element geometry: points, bounding rectangles and polygons.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type ElementId = i32;
pub type NodeId = i32;

/// Elements of one geometry file keyed by element id.
pub type ElementMap = BTreeMap<ElementId, Element2D>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle in model coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Smallest rectangle enclosing `points`, or `None` for an empty slice.
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in rest {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// A plate element projected onto the XY plane.
///
/// Vertices are stored in ascending angle around their centroid, so the
/// polygon winding never depends on the column order of the source file.
/// `node_ids` is permuted together with the vertices and always has the same
/// length; missing node ids are stored as `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element2D {
    id: ElementId,
    points: Vec<Point2>,
    node_ids: Vec<NodeId>,
}

impl Element2D {
    pub fn new(id: ElementId, points: Vec<Point2>, mut node_ids: Vec<NodeId>) -> Self {
        node_ids.resize(points.len(), 0);
        let (points, node_ids) = order_by_angle(points, node_ids);
        Self {
            id,
            points,
            node_ids,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn centroid(&self) -> Option<Point2> {
        centroid(&self.points)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    /// True when no vertex coordinate is NaN or infinite.
    pub fn has_finite_points(&self) -> bool {
        self.points.iter().all(Point2::is_finite)
    }
}

fn centroid(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point2::new(sx / n, sy / n))
}

fn order_by_angle(points: Vec<Point2>, node_ids: Vec<NodeId>) -> (Vec<Point2>, Vec<NodeId>) {
    let Some(c) = centroid(&points) else {
        return (points, node_ids);
    };

    let mut paired: Vec<(f64, Point2, NodeId)> = points
        .into_iter()
        .zip(node_ids)
        .map(|(p, n)| ((p.y - c.y).atan2(p.x - c.x), p, n))
        .collect();
    paired.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    paired.into_iter().map(|(_, p, n)| (p, n)).unzip()
}
