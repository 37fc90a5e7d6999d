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

use crate::geom::Vec2;

/// A half-line starting at `origin` and extending along a unit `direction`.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Ray {
    origin: Vec2,
    direction: Vec2,
}

impl Ray {
    /// Constructs a new ray. `direction` is normalized; a zero direction
    /// produces a ray that never hits anything.
    pub fn new(origin: Vec2, direction: Vec2) -> Ray {
        Ray { origin, direction: direction.normalize() }
    }

    /// Constructs the ray running along the segment from `start` to `end`,
    /// returning it along with the segment length.
    pub fn from_segment(start: Vec2, end: Vec2) -> (Ray, f64) {
        (Ray::new(start, end - start), start.dist(end))
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec2::zero()
    }

    /// Returns the point `distance` units along the ray.
    pub fn point_at(&self, distance: f64) -> Vec2 {
        self.origin + self.direction * distance
    }
}

/// Where a ray struck a shape.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct RayHit {
    /// The contact point in world space.
    pub point: Vec2,
    /// Unit surface normal at the contact point, pointing out of the shape.
    pub normal: Vec2,
    /// Distance along the ray from its origin.
    pub distance: f64,
}

impl RayHit {
    pub(crate) fn new(ray: &Ray, distance: f64, normal: Vec2) -> RayHit {
        RayHit { point: ray.point_at(distance), normal: normal.normalize(), distance }
    }
}

// Picks the reported distance out of a parametric [entry, exit] interval:
// the entry when it lies ahead of the origin, the exit for rays that start
// inside, nothing for empty or unbounded intervals or ones behind the
// origin or past `max_distance`.
pub(crate) fn pick_hit_distance(entry: f64, exit: f64, max_distance: f64) -> Option<(f64, bool)> {
    if entry > exit || exit < 0.0 {
        return None;
    }
    let (distance, is_entry) = if entry >= 0.0 { (entry, true) } else { (exit, false) };
    if !distance.is_finite() || distance > effective_limit(max_distance) {
        None
    } else {
        Some((distance, is_entry))
    }
}

// Non-positive limits mean the ray is unbounded.
pub(crate) fn effective_limit(max_distance: f64) -> f64 {
    if max_distance <= 0.0 {
        f64::INFINITY
    } else {
        max_distance
    }
}
