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

use super::polygon::{nearest_on_segment, segments_intersect, ConvexPolygon};
use crate::float::{approx_zero, quad_roots, EPSILON};
use crate::geom::{pick_hit_distance, v2, Aabb, Ray, RayHit, Vec2};
use crate::manifold;
use std::f64::consts::PI;

/// A shape resolved into world space by a `Transform`.
///
/// Oriented boxes and polygons both become `Polygon`, since once placed they
/// are handled identically.
#[derive(PartialEq, Clone, Debug)]
pub enum PlacedShape {
    /// A circle with the given world-space center and radius.
    Circle { center: Vec2, radius: f64 },
    /// An axis-aligned rectangle.
    Rect(Aabb),
    /// A convex polygon.
    Polygon(ConvexPolygon),
    /// A line segment.
    Edge { start: Vec2, end: Vec2 },
}

impl PlacedShape {
    /// Shorthand for a circle placed at `center`.
    pub fn circle(center: Vec2, radius: f64) -> PlacedShape {
        PlacedShape::Circle { center, radius }
    }

    /// Shorthand for a rectangle with the given `center` and full `dims`.
    pub fn rect(center: Vec2, dims: Vec2) -> PlacedShape {
        PlacedShape::Rect(Aabb::from_center(center, dims * 0.5))
    }

    /// Returns the smallest axis-aligned box enclosing the shape.
    pub fn bounding_box(&self) -> Aabb {
        match *self {
            PlacedShape::Circle { center, radius } => Aabb::from_center(center, v2(radius, radius)),
            PlacedShape::Rect(bounds) => bounds,
            PlacedShape::Polygon(ref polygon) => polygon.bounding_box(),
            PlacedShape::Edge { start, end } => Aabb::new(start, end),
        }
    }

    /// Returns the center of mass of the shape.
    pub fn centroid(&self) -> Vec2 {
        match *self {
            PlacedShape::Circle { center, .. } => center,
            PlacedShape::Rect(bounds) => bounds.center(),
            PlacedShape::Polygon(ref polygon) => polygon.centroid(),
            PlacedShape::Edge { start, end } => (start + end) * 0.5,
        }
    }

    /// Returns `true` if `point` is inside the shape or on its boundary,
    /// subject to negligible numerical error.
    pub fn contains(&self, point: Vec2) -> bool {
        match *self {
            PlacedShape::Circle { center, radius } => {
                point.dist_sq(center) <= (radius + EPSILON) * (radius + EPSILON)
            }
            PlacedShape::Rect(bounds) => {
                Aabb::from_center(bounds.center(), bounds.half_dims() + v2(EPSILON, EPSILON)).contains(point)
            }
            PlacedShape::Polygon(ref polygon) => polygon.contains(point),
            PlacedShape::Edge { start, end } => nearest_on_segment(point, start, end).dist(point) <= EPSILON,
        }
    }

    /// Returns the point on the shape closest to `point`. Points inside the
    /// shape map to themselves.
    pub fn nearest_point(&self, point: Vec2) -> Vec2 {
        if self.contains(point) {
            return point;
        }
        match *self {
            PlacedShape::Circle { center, radius } => center + (point - center).normalize() * radius,
            PlacedShape::Rect(bounds) => bounds.clamp(point),
            PlacedShape::Polygon(ref polygon) => polygon.nearest_point(point),
            PlacedShape::Edge { start, end } => nearest_on_segment(point, start, end),
        }
    }

    /// Casts `ray` against the shape, up to `max_distance` along it
    /// (non-positive means unlimited).
    ///
    /// A ray that starts inside the shape reports the point where it exits.
    pub fn raycast(&self, ray: &Ray, max_distance: f64) -> Option<RayHit> {
        if ray.is_degenerate() {
            return None;
        }
        match *self {
            PlacedShape::Circle { center, radius } => raycast_circle(center, radius, ray, max_distance),
            PlacedShape::Rect(ref bounds) => raycast_rect(bounds, ray, max_distance),
            PlacedShape::Polygon(ref polygon) => polygon.raycast(ray, max_distance),
            PlacedShape::Edge { start, end } => raycast_edge(start, end, ray, max_distance),
        }
    }

    /// World-space corners of the shape in counter-clockwise order. Circles
    /// have none; edges report their two endpoints.
    pub fn vertices(&self) -> Vec<Vec2> {
        match *self {
            PlacedShape::Circle { .. } => Vec::new(),
            PlacedShape::Rect(bounds) => bounds.corners().to_vec(),
            PlacedShape::Polygon(ref polygon) => polygon.vertices().to_vec(),
            PlacedShape::Edge { start, end } => vec![start, end],
        }
    }

    /// Returns `true` if the segment from `start` to `end` touches the shape.
    pub fn intersects_segment(&self, start: Vec2, end: Vec2) -> bool {
        if let PlacedShape::Edge { start: edge_start, end: edge_end } = *self {
            return segments_intersect(edge_start, edge_end, start, end);
        }
        if self.contains(start) || self.contains(end) {
            return true;
        }
        let (ray, length) = Ray::from_segment(start, end);
        length > 0.0 && self.raycast(&ray, length).is_some()
    }

    /// Returns `true` if the two shapes overlap, subject to negligible
    /// numerical error.
    pub fn overlaps(&self, other: &PlacedShape) -> bool {
        match (self, other) {
            (&PlacedShape::Edge { start: a1, end: a2 }, &PlacedShape::Edge { start: b1, end: b2 }) => {
                segments_intersect(a1, a2, b1, b2)
            }
            _ => manifold::collide(self, other).is_some(),
        }
    }

    pub fn area(&self) -> f64 {
        match *self {
            PlacedShape::Circle { radius, .. } => PI * radius * radius,
            PlacedShape::Rect(bounds) => bounds.area(),
            PlacedShape::Polygon(ref polygon) => polygon.area(),
            PlacedShape::Edge { .. } => 0.0,
        }
    }

    /// Moment of inertia about the centroid for a uniform shape of `mass`.
    pub fn moment_of_inertia(&self, mass: f64) -> f64 {
        match *self {
            PlacedShape::Circle { radius, .. } => 0.5 * mass * radius * radius,
            PlacedShape::Rect(bounds) => {
                let half_dims = bounds.half_dims();
                mass * half_dims.len_sq() / 3.0
            }
            PlacedShape::Polygon(ref polygon) => polygon.moment_of_inertia(mass),
            PlacedShape::Edge { start, end } => mass * start.dist_sq(end) / 12.0,
        }
    }
}

fn raycast_circle(center: Vec2, radius: f64, ray: &Ray, max_distance: f64) -> Option<RayHit> {
    let offset = ray.origin() - center;
    let (entry, exit) = quad_roots(1.0, 2.0 * ray.direction().dot(offset), offset.len_sq() - radius * radius)?;
    let (distance, _) = pick_hit_distance(entry, exit, max_distance)?;
    Some(RayHit::new(ray, distance, ray.point_at(distance) - center))
}

fn raycast_rect(bounds: &Aabb, ray: &Ray, max_distance: f64) -> Option<RayHit> {
    let mut entry = (f64::NEG_INFINITY, Vec2::zero());
    let mut exit = (f64::INFINITY, Vec2::zero());
    let slabs = [
        (ray.origin().x, ray.direction().x, bounds.min.x, bounds.max.x, v2(1.0, 0.0)),
        (ray.origin().y, ray.direction().y, bounds.min.y, bounds.max.y, v2(0.0, 1.0)),
    ];
    for &(origin, dir, low, high, axis) in slabs.iter() {
        if dir == 0.0 {
            if origin < low || origin > high {
                return None;
            }
            continue;
        }
        let (t_low, t_high) = ((low - origin) / dir, (high - origin) / dir);
        let (near, far) = if t_low < t_high {
            ((t_low, -axis), (t_high, axis))
        } else {
            ((t_high, axis), (t_low, -axis))
        };
        if near.0 > entry.0 {
            entry = near;
        }
        if far.0 < exit.0 {
            exit = far;
        }
    }
    let (distance, is_entry) = pick_hit_distance(entry.0, exit.0, max_distance)?;
    Some(RayHit::new(ray, distance, if is_entry { entry.1 } else { exit.1 }))
}

// Parallel rays miss, including ones running along the edge.
fn raycast_edge(start: Vec2, end: Vec2, ray: &Ray, max_distance: f64) -> Option<RayHit> {
    let edge = end - start;
    let denom = ray.direction().cross(edge);
    if approx_zero(denom) {
        return None;
    }
    let to_start = start - ray.origin();
    let distance = to_start.cross(edge) / denom;
    let along = to_start.cross(ray.direction()) / denom;
    if distance < 0.0 || along < 0.0 || along > 1.0 {
        return None;
    }
    let (distance, _) = pick_hit_distance(distance, distance, max_distance)?;
    let mut normal = edge.perp();
    if normal.dot(ray.direction()) > 0.0 {
        normal = -normal;
    }
    Some(RayHit::new(ray, distance, normal))
}
