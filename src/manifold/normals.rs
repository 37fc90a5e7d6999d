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

use super::Manifold;
use crate::float::key;
use crate::geom::{v2, Aabb, Card, DirVec2, Vec2};
use crate::util::OneOrTwo;

// This module contains methods to solve for the normal vector and contact
// points between circles and axis-aligned rectangles.
//
// The `*_normal` functions return a normal pointing from `src` to `dst`. Its
// length is the minimum distance `dst` would need to move along it to stop
// overlapping `src`, and is negative if they are apart.

pub fn rect_rect_normal(dst: &Aabb, src: &Aabb) -> DirVec2 {
    let values = Card::values();
    let (card, overlap) = values[1..].iter().fold(
        (values[0], dst.card_overlap(src, values[0])),
        |best, &card| {
            let overlap = dst.card_overlap(src, card);
            if key(overlap) < key(best.1) {
                (card, overlap)
            } else {
                best
            }
        },
    );
    DirVec2::new(card.into(), overlap)
}

pub fn circle_circle_normal(dst: Vec2, dst_radius: f64, src: Vec2, src_radius: f64) -> DirVec2 {
    let mut dir = dst - src;
    let dist = dir.len();
    if dist == 0.0 {
        dir = v2(1.0, 0.0);
    }
    DirVec2::new(dir, src_radius + dst_radius - dist)
}

pub fn rect_circle_normal(dst: &Aabb, src: Vec2, src_radius: f64) -> DirVec2 {
    let sector = dst.sector(src);
    if sector.is_corner() {
        circle_circle_normal(dst.corner(sector), 0.0, src, src_radius)
    } else {
        rect_rect_normal(dst, &Aabb::from_center(src, v2(src_radius, src_radius)))
    }
}

pub fn circle_circle(a: Vec2, a_radius: f64, b: Vec2, b_radius: f64) -> Option<Manifold> {
    let normal = circle_circle_normal(b, b_radius, a, a_radius);
    if normal.len() < 0.0 {
        return None;
    }
    // middle of the overlap of both diameters along the normal
    let dist = (b - a).len();
    let near = (-a_radius).max(dist - b_radius);
    let far = a_radius.min(dist + b_radius);
    let contact = a + normal.dir() * ((near + far) * 0.5);
    Some(Manifold::new(normal.dir(), normal.len(), OneOrTwo::One(contact)))
}

// Contacts lie on the mid-line of the overlap region, across the normal.
pub fn rect_rect(a: &Aabb, b: &Aabb) -> Option<Manifold> {
    let normal = rect_rect_normal(b, a);
    if normal.len() < 0.0 {
        return None;
    }
    let overlap = a.intersection(b)?;
    let center = overlap.center();
    let (first, second) = if normal.dir().x != 0.0 {
        (v2(center.x, overlap.min.y), v2(center.x, overlap.max.y))
    } else {
        (v2(overlap.min.x, center.y), v2(overlap.max.x, center.y))
    };
    let contacts = if first == second {
        OneOrTwo::One(first)
    } else {
        OneOrTwo::Two(first, second)
    };
    Some(Manifold::new(normal.dir(), normal.len(), contacts))
}

pub fn rect_circle(rect: &Aabb, center: Vec2, radius: f64) -> Option<Manifold> {
    let normal = rect_circle_normal(rect, center, radius).flip();
    if normal.len() < 0.0 {
        return None;
    }
    let sector = rect.sector(center);
    let contact = if sector.is_corner() {
        rect.corner(sector)
    } else {
        rect.clamp(center - normal.dir() * radius)
    };
    Some(Manifold::new(normal.dir(), normal.len(), OneOrTwo::One(contact)))
}
