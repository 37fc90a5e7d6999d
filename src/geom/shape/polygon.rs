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

use crate::float::{approx_zero, key, EPSILON};
use crate::geom::{pick_hit_distance, Aabb, Ray, RayHit, Vec2};

/// A convex polygon in world space, with vertices in counter-clockwise order.
///
/// Face `i` runs from vertex `i` to vertex `i + 1` (wrapping), and
/// `normals()[i]` is its outward unit normal.
#[derive(PartialEq, Clone, Debug)]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl ConvexPolygon {
    // caller guarantees convexity and counter-clockwise order
    pub(crate) fn from_ccw(vertices: Vec<Vec2>) -> ConvexPolygon {
        let count = vertices.len();
        let normals = (0..count)
            .map(|i| {
                let dir = vertices[(i + 1) % count] - vertices[i];
                Vec2::new(dir.y, -dir.x).normalize()
            })
            .collect();
        ConvexPolygon { vertices, normals }
    }

    // A segment seen as a polygon with two opposite faces.
    pub(crate) fn segment(start: Vec2, end: Vec2) -> ConvexPolygon {
        ConvexPolygon::from_ccw(vec![start, end])
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    #[inline]
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex at `index`, wrapping around.
    pub fn vertex(&self, index: usize) -> Vec2 {
        self.vertices[index % self.vertices.len()]
    }

    /// Endpoints of face `index`, wrapping around.
    pub fn face(&self, index: usize) -> (Vec2, Vec2) {
        (self.vertex(index), self.vertex(index + 1))
    }

    /// Returns the vertex furthest along `dir`.
    pub fn support(&self, dir: Vec2) -> Vec2 {
        self.vertices
            .iter()
            .cloned()
            .max_by_key(|&vertex| key(vertex.dot(dir)))
            .unwrap_or_default()
    }

    /// Sum of the cross products of consecutive vertices, i.e. twice the
    /// signed area.
    fn double_area(&self) -> f64 {
        (0..self.len()).map(|i| self.vertex(i).cross(self.vertex(i + 1))).sum()
    }

    pub fn area(&self) -> f64 {
        self.double_area().abs() * 0.5
    }

    pub fn centroid(&self) -> Vec2 {
        let double_area = self.double_area();
        if approx_zero(double_area) {
            let sum = self.vertices.iter().fold(Vec2::zero(), |sum, &v| sum + v);
            return sum / self.len().max(1) as f64;
        }
        let weighted = (0..self.len()).fold(Vec2::zero(), |sum, i| {
            let (a, b) = self.face(i);
            sum + (a + b) * a.cross(b)
        });
        weighted / (3.0 * double_area)
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::enclosing(self.vertices.iter().cloned())
            .unwrap_or_else(|| Aabb::new(Vec2::zero(), Vec2::zero()))
    }

    /// Boundary-inclusive containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        if self.len() == 2 {
            return nearest_on_segment(point, self.vertices[0], self.vertices[1]).dist(point) <= EPSILON;
        }
        (0..self.len()).all(|i| self.normals[i].dot(point - self.vertices[i]) <= EPSILON)
    }

    /// Returns `point` itself when inside, otherwise the closest point on the
    /// boundary.
    pub fn nearest_point(&self, point: Vec2) -> Vec2 {
        if self.contains(point) {
            return point;
        }
        (0..self.len())
            .map(|i| {
                let (a, b) = self.face(i);
                nearest_on_segment(point, a, b)
            })
            .min_by_key(|&candidate| key(candidate.dist_sq(point)))
            .unwrap_or(point)
    }

    /// Clips the ray against every face half-plane.
    pub fn raycast(&self, ray: &Ray, max_distance: f64) -> Option<RayHit> {
        if ray.is_degenerate() {
            return None;
        }
        let mut entry = (f64::NEG_INFINITY, Vec2::zero());
        let mut exit = (f64::INFINITY, Vec2::zero());
        for (&vertex, &normal) in self.vertices.iter().zip(self.normals.iter()) {
            let denom = normal.dot(ray.direction());
            let offset = normal.dot(vertex - ray.origin());
            if denom == 0.0 {
                if offset < 0.0 {
                    return None;
                }
                continue;
            }
            let t = offset / denom;
            if denom < 0.0 {
                if t > entry.0 {
                    entry = (t, normal);
                }
            } else if t < exit.0 {
                exit = (t, normal);
            }
        }
        let (distance, is_entry) = pick_hit_distance(entry.0, exit.0, max_distance)?;
        let normal = if is_entry { entry.1 } else { exit.1 };
        Some(RayHit::new(ray, distance, normal))
    }

    /// Moment of inertia about the centroid for a uniform polygon of `mass`.
    pub(crate) fn moment_of_inertia(&self, mass: f64) -> f64 {
        let centroid = self.centroid();
        let (numer, denom) = (0..self.len()).fold((0.0, 0.0), |(numer, denom), i| {
            let (a, b) = self.face(i);
            let (a, b) = (a - centroid, b - centroid);
            let cross = a.cross(b);
            (numer + cross * (a.dot(a) + a.dot(b) + b.dot(b)), denom + cross)
        });
        if approx_zero(denom) {
            0.0
        } else {
            mass * numer / (6.0 * denom)
        }
    }
}

/// Closest point to `point` on the segment from `a` to `b`.
pub(crate) fn nearest_on_segment(point: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let dir = b - a;
    let len_sq = dir.len_sq();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((point - a).dot(dir) / len_sq).max(0.0).min(1.0);
    a + dir * t
}

fn orientation(a: Vec2, b: Vec2, point: Vec2) -> i8 {
    let cross = (b - a).cross(point - a);
    if approx_zero(cross) {
        0
    } else if cross > 0.0 {
        1
    } else {
        -1
    }
}

fn within_segment_bounds(a: Vec2, b: Vec2, point: Vec2) -> bool {
    Aabb::new(a, b).contains(point)
}

/// Returns true if the two segments share any point, including collinear
/// overlap and touching endpoints.
pub(crate) fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);
    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && within_segment_bounds(a1, a2, b1))
        || (o2 == 0 && within_segment_bounds(a1, a2, b2))
        || (o3 == 0 && within_segment_bounds(b1, b2, a1))
        || (o4 == 0 && within_segment_bounds(b1, b2, a2))
}
