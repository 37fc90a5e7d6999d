// Copyright 2016-2018 Matthew D. Michelotti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{PhysicsError, Result};
use crate::geom::{Aabb, Transform, Vec2};

mod placed;
mod polygon;

#[cfg(test)]
mod tests;

pub use self::placed::PlacedShape;
pub use self::polygon::ConvexPolygon;
pub(crate) use self::polygon::nearest_on_segment;

/// Enumeration of kinds of shapes used by a `Collider`.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum ShapeKind {
    /// Circle.
    Circle,
    /// Axis-aligned rectangle. Ignores the rotation of its transform.
    Rect,
    /// Rectangle that rotates with its transform.
    OrientedBox,
    /// Convex polygon with at least three vertices.
    Polygon,
    /// Line segment.
    Edge,
}

#[derive(PartialEq, Clone, Debug)]
enum Repr {
    Circle { radius: f64 },
    Rect { half_dims: Vec2 },
    OrientedBox { half_dims: Vec2 },
    Polygon { vertices: Vec<Vec2> },
    Edge { start: Vec2, end: Vec2 },
}

/// Represents a shape in local space, without any placement.
///
/// Shapes are immutable once constructed. The `try_*` constructors reject
/// degenerate input with a `PhysicsError`; the plain constructors panic on
/// the same input.
#[derive(PartialEq, Clone, Debug)]
pub struct Shape {
    repr: Repr,
}

impl Shape {
    /// Constructs a circle with the given `radius`, which must be positive.
    pub fn try_circle(radius: f64) -> Result<Shape> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        Ok(Shape { repr: Repr::Circle { radius } })
    }

    /// Constructs an axis-aligned rectangle with the given `dims` (width and
    /// height).
    pub fn try_rect(dims: Vec2) -> Result<Shape> {
        Ok(Shape { repr: Repr::Rect { half_dims: checked_half_dims(dims)? } })
    }

    /// Constructs a rectangle that rotates with its transform.
    pub fn try_oriented_box(dims: Vec2) -> Result<Shape> {
        Ok(Shape { repr: Repr::OrientedBox { half_dims: checked_half_dims(dims)? } })
    }

    /// Constructs a convex polygon. Vertices may be given in either winding
    /// order and are stored counter-clockwise.
    pub fn try_polygon(mut vertices: Vec<Vec2>) -> Result<Shape> {
        if vertices.len() < 3 {
            return Err(PhysicsError::TooFewVertices(vertices.len()));
        }
        if !vertices.iter().all(Vec2::is_finite) {
            return Err(PhysicsError::NonConvexPolygon);
        }
        let double_area: f64 = (0..vertices.len())
            .map(|i| vertices[i].cross(vertices[(i + 1) % vertices.len()]))
            .sum();
        if double_area.abs() <= crate::float::EPSILON {
            return Err(PhysicsError::NonConvexPolygon);
        }
        if double_area < 0.0 {
            vertices.reverse();
        }
        if !is_convex_ccw(&vertices) {
            return Err(PhysicsError::NonConvexPolygon);
        }
        Ok(Shape { repr: Repr::Polygon { vertices } })
    }

    /// Constructs a line segment between two distinct points.
    pub fn try_edge(start: Vec2, end: Vec2) -> Result<Shape> {
        if !start.is_finite() || !end.is_finite() || start == end {
            return Err(PhysicsError::DegenerateEdge);
        }
        Ok(Shape { repr: Repr::Edge { start, end } })
    }

    /// Constructs a new circle shape. Panics if `radius` is not positive.
    #[inline]
    pub fn circle(radius: f64) -> Shape {
        Shape::try_circle(radius).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Constructs a new axis-aligned rectangle shape with the given `dims`.
    #[inline]
    pub fn rect(dims: Vec2) -> Shape {
        Shape::try_rect(dims).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Constructs a new axis-aligned square shape with the given `width`.
    #[inline]
    pub fn square(width: f64) -> Shape {
        Shape::rect(Vec2::new(width, width))
    }

    /// Constructs a new oriented box shape with the given `dims`.
    #[inline]
    pub fn oriented_box(dims: Vec2) -> Shape {
        Shape::try_oriented_box(dims).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Constructs a new convex polygon shape.
    #[inline]
    pub fn polygon(vertices: Vec<Vec2>) -> Shape {
        Shape::try_polygon(vertices).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Constructs a new edge shape.
    #[inline]
    pub fn edge(start: Vec2, end: Vec2) -> Shape {
        Shape::try_edge(start, end).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Returns the kind of shape.
    pub fn kind(&self) -> ShapeKind {
        match self.repr {
            Repr::Circle { .. } => ShapeKind::Circle,
            Repr::Rect { .. } => ShapeKind::Rect,
            Repr::OrientedBox { .. } => ShapeKind::OrientedBox,
            Repr::Polygon { .. } => ShapeKind::Polygon,
            Repr::Edge { .. } => ShapeKind::Edge,
        }
    }

    /// Returns the centroid of the shape in local space.
    pub fn centroid(&self) -> Vec2 {
        match self.repr {
            Repr::Circle { .. } | Repr::Rect { .. } | Repr::OrientedBox { .. } => Vec2::zero(),
            Repr::Polygon { ref vertices } => ConvexPolygon::from_ccw(vertices.clone()).centroid(),
            Repr::Edge { start, end } => (start + end) * 0.5,
        }
    }

    /// Resolves the shape into world space: translated by the transform's
    /// position, rotated about the centroid, and scaled per axis.
    ///
    /// Circles scale by the largest absolute scale factor. Rectangles ignore
    /// rotation.
    pub fn place(&self, transform: &Transform) -> PlacedShape {
        let scale = transform.scale;
        let place_point = |centroid: Vec2, local: Vec2| {
            transform.position + centroid.scale(scale) + (local - centroid).scale(scale).rotate(transform.rotation)
        };
        match self.repr {
            Repr::Circle { radius } => PlacedShape::Circle {
                center: transform.position,
                radius: radius * scale.x.abs().max(scale.y.abs()),
            },
            Repr::Rect { half_dims } => {
                PlacedShape::Rect(Aabb::from_center(transform.position, half_dims.scale(scale)))
            }
            Repr::OrientedBox { half_dims } => {
                let corners = Aabb::from_center(Vec2::zero(), half_dims).corners();
                let vertices = corners.iter().map(|&corner| place_point(Vec2::zero(), corner)).collect();
                PlacedShape::Polygon(ConvexPolygon::from_ccw(keep_ccw(vertices, scale)))
            }
            Repr::Polygon { ref vertices } => {
                let centroid = self.centroid();
                let vertices = vertices.iter().map(|&vertex| place_point(centroid, vertex)).collect();
                PlacedShape::Polygon(ConvexPolygon::from_ccw(keep_ccw(vertices, scale)))
            }
            Repr::Edge { start, end } => {
                let centroid = (start + end) * 0.5;
                PlacedShape::Edge { start: place_point(centroid, start), end: place_point(centroid, end) }
            }
        }
    }

    /// Shorthand for placing the shape at `position` with no rotation or
    /// scale.
    pub fn place_at(&self, position: Vec2) -> PlacedShape {
        self.place(&Transform::new(position))
    }

    /// Returns the area of the unscaled shape. Edges have no area.
    pub fn area(&self) -> f64 {
        self.place(&Transform::default()).area()
    }

    /// Returns the moment of inertia about the centroid for a uniform shape
    /// of the given `mass`.
    pub fn moment_of_inertia(&self, mass: f64) -> f64 {
        self.place(&Transform::default()).moment_of_inertia(mass)
    }
}

fn checked_half_dims(dims: Vec2) -> Result<Vec2> {
    if dims.x > 0.0 && dims.y > 0.0 && dims.is_finite() {
        Ok(dims * 0.5)
    } else {
        Err(PhysicsError::InvalidDimensions(dims.x, dims.y))
    }
}

// Mirroring through a negative scale flips the winding order.
fn keep_ccw(mut vertices: Vec<Vec2>, scale: Vec2) -> Vec<Vec2> {
    if scale.x * scale.y < 0.0 {
        vertices.reverse();
    }
    vertices
}

// Every turn must bend left (collinear runs allowed), no edge may have zero
// length, and the boundary must wind around exactly once.
fn is_convex_ccw(vertices: &[Vec2]) -> bool {
    let count = vertices.len();
    let mut turning = 0.0;
    for i in 0..count {
        let a = vertices[(i + 1) % count] - vertices[i];
        let b = vertices[(i + 2) % count] - vertices[(i + 1) % count];
        if a.len_sq() == 0.0 {
            return false;
        }
        let cross = a.cross(b);
        if cross < -crate::float::EPSILON * a.len() * b.len() {
            return false;
        }
        turning += cross.atan2(a.dot(b));
    }
    turning < 2.0 * std::f64::consts::PI + 1e-6
}
