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

//! Narrow-phase contact generation between placed shapes.

use crate::geom::{ConvexPolygon, PlacedShape, Vec2};
use crate::util::OneOrTwo;

mod normals;
mod sat;


/// Contact geometry between two overlapping shapes.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Manifold {
    /// Unit normal pointing from the first shape towards the second.
    pub normal: Vec2,
    /// How deep the shapes overlap along `normal`. Never negative.
    pub penetration: f64,
    /// World-space contact points, each inside both shapes.
    pub contacts: OneOrTwo<Vec2>,
}

impl Manifold {
    pub(crate) fn new(normal: Vec2, penetration: f64, contacts: OneOrTwo<Vec2>) -> Manifold {
        Manifold { normal: normal.normalize(), penetration: penetration.max(0.0), contacts }
    }

    /// Returns the same manifold seen from the other shape.
    pub fn flip(&self) -> Manifold {
        Manifold { normal: -self.normal, ..*self }
    }

    /// Number of contact points, 1 or 2.
    #[inline]
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }
}

/// Computes the contact manifold between `a` and `b`, or `None` if they do
/// not touch. The normal points from `a` to `b`.
///
/// Two edges never produce a manifold, since a segment has no interior to
/// push out of; use `PlacedShape::overlaps` to test them for crossing.
pub fn collide(a: &PlacedShape, b: &PlacedShape) -> Option<Manifold> {
    use crate::geom::PlacedShape::*;
    match (a, b) {
        (&Circle { center: ca, radius: ra }, &Circle { center: cb, radius: rb }) => {
            normals::circle_circle(ca, ra, cb, rb)
        }
        (&Rect(ref ra), &Rect(ref rb)) => normals::rect_rect(ra, rb),
        (&Rect(ref rect), &Circle { center, radius }) => normals::rect_circle(rect, center, radius),
        (&Circle { center, radius }, &Rect(ref rect)) => {
            normals::rect_circle(rect, center, radius).map(|m| m.flip())
        }
        (&Circle { center, radius }, &Polygon(ref polygon)) => sat::circle_polygon(center, radius, polygon),
        (&Polygon(ref polygon), &Circle { center, radius }) => {
            sat::circle_polygon(center, radius, polygon).map(|m| m.flip())
        }
        (&Circle { center, radius }, &Edge { start, end }) => sat::circle_edge(center, radius, start, end),
        (&Edge { start, end }, &Circle { center, radius }) => {
            sat::circle_edge(center, radius, start, end).map(|m| m.flip())
        }
        (&Edge { .. }, &Edge { .. }) => None,
        _ => match (as_polygon(a), as_polygon(b)) {
            (Some(pa), Some(pb)) => sat::polygon_polygon(&pa, &pb),
            _ => None,
        },
    }
}

// Rectangles become four-sided polygons and edges two-faced ones.
fn as_polygon(shape: &PlacedShape) -> Option<ConvexPolygon> {
    match *shape {
        PlacedShape::Circle { .. } => None,
        PlacedShape::Rect(ref bounds) => Some(ConvexPolygon::from_ccw(bounds.corners().to_vec())),
        PlacedShape::Polygon(ref polygon) => Some(polygon.clone()),
        PlacedShape::Edge { start, end } => Some(ConvexPolygon::segment(start, end)),
    }
}
