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

use crate::geom::{v2, Card, Vec2};
use std::cmp::Ordering;

/// An axis-aligned bounding box in world space.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Aabb {
    /// Lower-left corner.
    pub min: Vec2,
    /// Upper-right corner.
    pub max: Vec2,
}

impl Aabb {
    /// Constructs a box from any two opposite corners.
    pub fn new(a: Vec2, b: Vec2) -> Aabb {
        Aabb { min: a.min(b), max: a.max(b) }
    }

    /// Constructs a box from its center and half extents.
    pub fn from_center(center: Vec2, half_dims: Vec2) -> Aabb {
        let half_dims = half_dims.abs();
        Aabb { min: center - half_dims, max: center + half_dims }
    }

    /// Returns the smallest box containing all `points`, or `None` if there
    /// are none.
    pub fn enclosing<I: IntoIterator<Item = Vec2>>(points: I) -> Option<Aabb> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Aabb { min: first, max: first }, |bounds, point| Aabb {
            min: bounds.min.min(point),
            max: bounds.max.max(point),
        }))
    }

    pub fn min_x(&self) -> f64 { self.min.x }
    pub fn min_y(&self) -> f64 { self.min.y }
    pub fn max_x(&self) -> f64 { self.max.x }
    pub fn max_y(&self) -> f64 { self.max.y }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn half_dims(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    pub fn area(&self) -> f64 {
        let dims = self.max - self.min;
        dims.x * dims.y
    }

    /// Boundary-inclusive overlap test.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Boundary-inclusive containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Clamps `point` into the box.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.max(self.min).min(self.max)
    }

    /// Returns the smallest box containing both boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    /// Returns the region shared by both boxes, if any.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        if self.overlaps(other) {
            Some(Aabb { min: self.min.max(other.min), max: self.max.min(other.max) })
        } else {
            None
        }
    }

    /// Corners in counter-clockwise order, starting at `min`.
    pub fn corners(&self) -> [Vec2; 4] {
        [self.min, v2(self.max.x, self.min.y), self.max, v2(self.min.x, self.max.y)]
    }

    /// Signed distance of the box's extreme edge along `card`.
    pub fn edge(&self, card: Card) -> f64 {
        match card {
            Card::MinusX => -self.min.x,
            Card::MinusY => -self.min.y,
            Card::PlusX => self.max.x,
            Card::PlusY => self.max.y,
        }
    }

    /// How far `self` would need to move along `card` to stop overlapping
    /// `src`. Negative if the boxes are already apart along that direction.
    pub fn card_overlap(&self, src: &Aabb, card: Card) -> f64 {
        src.edge(card) + self.edge(card.flip())
    }

    pub(crate) fn sector(&self, point: Vec2) -> Sector {
        let x = interval_sector(self.min.x, self.max.x, point.x);
        let y = interval_sector(self.min.y, self.max.y, point.y);
        Sector::new(x, y)
    }

    pub(crate) fn corner(&self, sector: Sector) -> Vec2 {
        let x = match sector.x {
            Ordering::Less => self.min.x,
            Ordering::Greater => self.max.x,
            Ordering::Equal => panic!("expected corner sector"),
        };
        let y = match sector.y {
            Ordering::Less => self.min.y,
            Ordering::Greater => self.max.y,
            Ordering::Equal => panic!("expected corner sector"),
        };
        v2(x, y)
    }
}

fn interval_sector(left: f64, right: f64, val: f64) -> Ordering {
    if val < left {
        Ordering::Less
    } else if val > right {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

// Which of the nine regions around a box a point falls in.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub(crate) struct Sector {
    x: Ordering,
    y: Ordering,
}

impl Sector {
    pub fn new(x: Ordering, y: Ordering) -> Sector {
        Sector { x, y }
    }

    pub fn is_corner(&self) -> bool {
        self.x != Ordering::Equal && self.y != Ordering::Equal
    }
}
