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
use crate::float::{bias_greater_than, key};
use crate::geom::{ConvexPolygon, Vec2};
use crate::util::OneOrTwo;

// Separating-axis contact generation for circles, edges and convex polygons.
// All geometry is already in world space.

// Returns the face of `polygon` that `center` lies furthest in front of,
// along with that separation.
fn max_separation_face(center: Vec2, polygon: &ConvexPolygon) -> (usize, f64) {
    (0..polygon.len())
        .map(|i| (i, polygon.normals()[i].dot(center - polygon.vertex(i))))
        .max_by_key(|&(_, separation)| key(separation))
        .unwrap_or((0, f64::INFINITY))
}

/// Circle against a convex polygon, normal from the circle to the polygon.
pub fn circle_polygon(center: Vec2, radius: f64, polygon: &ConvexPolygon) -> Option<Manifold> {
    let (face, separation) = max_separation_face(center, polygon);
    if separation > radius {
        return None;
    }
    let (v1, v2) = polygon.face(face);
    let face_normal = polygon.normals()[face];

    if separation > 0.0 {
        // voronoi regions of the two face endpoints
        let vertex = if (center - v1).dot(v2 - v1) <= 0.0 {
            Some(v1)
        } else if (center - v2).dot(v1 - v2) <= 0.0 {
            Some(v2)
        } else {
            None
        };
        if let Some(vertex) = vertex {
            let offset = vertex - center;
            let dist = offset.len();
            if dist > radius {
                return None;
            }
            let normal = if dist == 0.0 { -face_normal } else { offset };
            return Some(Manifold::new(normal, radius - dist, OneOrTwo::One(vertex)));
        }
    }

    let on_face = center - face_normal * separation;
    let contact = if -separation > radius { center } else { on_face };
    Some(Manifold::new(-face_normal, radius - separation, OneOrTwo::One(contact)))
}

/// Circle against a segment, normal from the circle to the segment.
pub fn circle_edge(center: Vec2, radius: f64, start: Vec2, end: Vec2) -> Option<Manifold> {
    let nearest = crate::geom::nearest_on_segment(center, start, end);
    let offset = nearest - center;
    let dist = offset.len();
    if dist > radius {
        return None;
    }
    let normal = if dist == 0.0 { (end - start).perp() } else { offset };
    Some(Manifold::new(normal, radius - dist, OneOrTwo::One(nearest)))
}

// Finds the face of `a` along which `b` penetrates least. The returned
// distance is positive when that face separates the two shapes.
fn axis_least_penetration(a: &ConvexPolygon, b: &ConvexPolygon) -> (usize, f64) {
    (0..a.len())
        .map(|i| {
            let normal = a.normals()[i];
            let support = b.support(-normal);
            (i, normal.dot(support - a.vertex(i)))
        })
        .max_by_key(|&(_, distance)| key(distance))
        .unwrap_or((0, f64::INFINITY))
}

// The face of `incident` whose normal is most anti-parallel to `normal`.
fn incident_face(incident: &ConvexPolygon, normal: Vec2) -> (Vec2, Vec2) {
    let index = (0..incident.len())
        .min_by_key(|&i| key(normal.dot(incident.normals()[i])))
        .unwrap_or(0);
    incident.face(index)
}

// Clips the segment to the half-plane `normal . x <= offset`, returning
// `None` if fewer than two points survive.
fn clip(normal: Vec2, offset: f64, face: (Vec2, Vec2)) -> Option<(Vec2, Vec2)> {
    let (a, b) = face;
    let dist_a = normal.dot(a) - offset;
    let dist_b = normal.dot(b) - offset;
    let mut out = Vec::with_capacity(2);
    if dist_a <= 0.0 {
        out.push(a);
    }
    if dist_b <= 0.0 {
        out.push(b);
    }
    if dist_a * dist_b < 0.0 {
        let alpha = dist_a / (dist_a - dist_b);
        out.push(a + (b - a) * alpha);
    }
    if out.len() < 2 {
        None
    } else {
        Some((out[0], out[1]))
    }
}

// Vertices of the region shared by `a` and `b`, found by clipping `a`
// against every face of `b`. Empty if they only touch within rounding.
fn shared_region(a: &ConvexPolygon, b: &ConvexPolygon) -> Vec<Vec2> {
    let mut region = a.vertices().to_vec();
    for (&vertex, &normal) in b.vertices().iter().zip(b.normals().iter()) {
        let dist = |point: Vec2| normal.dot(point - vertex);
        let mut clipped = Vec::with_capacity(region.len() + 1);
        for (i, &p) in region.iter().enumerate() {
            let q = region[(i + 1) % region.len()];
            let (dist_p, dist_q) = (dist(p), dist(q));
            if dist_p <= 0.0 {
                clipped.push(p);
            }
            if dist_p * dist_q < 0.0 {
                clipped.push(p + (q - p) * (dist_p / (dist_p - dist_q)));
            }
        }
        region = clipped;
        if region.is_empty() {
            break;
        }
    }
    region
}

/// Convex polygon against convex polygon, normal from `a` to `b`.
///
/// Picks a reference face (preferring `a` on near ties), clips the other
/// polygon's incident face against its side planes and keeps the points lying
/// inside both polygons. When none do, as with a narrow reference polygon
/// whose side planes reach past its other faces, the single contact is the
/// middle of the shared region.
pub fn polygon_polygon(a: &ConvexPolygon, b: &ConvexPolygon) -> Option<Manifold> {
    let (face_a, penetration_a) = axis_least_penetration(a, b);
    if penetration_a > 0.0 {
        return None;
    }
    let (face_b, penetration_b) = axis_least_penetration(b, a);
    if penetration_b > 0.0 {
        return None;
    }

    let (reference, incident, index, flip, axis_penetration) = if bias_greater_than(penetration_a, penetration_b) {
        (a, b, face_a, false, penetration_a)
    } else {
        (b, a, face_b, true, penetration_b)
    };

    let (v1, v2) = reference.face(index);
    let side_normal = (v2 - v1).normalize();
    let face_normal = reference.normals()[index];
    let face_offset = face_normal.dot(v1);
    let normal = if flip { -face_normal } else { face_normal };

    let depth = |point: Vec2| face_offset - face_normal.dot(point);
    let clipped = clip(-side_normal, -side_normal.dot(v1), incident_face(incident, face_normal))
        .and_then(|face| clip(side_normal, side_normal.dot(v2), face));
    let inside = |point: &Vec2| depth(*point) >= 0.0 && a.contains(*point) && b.contains(*point);
    let contacts = match clipped {
        Some((p1, p2)) => match (inside(&p1), inside(&p2)) {
            (true, true) => Some(OneOrTwo::Two(p1, p2)),
            (true, false) => Some(OneOrTwo::One(p1)),
            (false, true) => Some(OneOrTwo::One(p2)),
            (false, false) => None,
        },
        None => None,
    };
    if let Some(contacts) = contacts {
        let penetration = contacts.iter().map(depth).fold(0.0, f64::max);
        return Some(Manifold::new(normal, penetration, contacts));
    }

    // segments have no lateral faces, so they are the ones clipped
    let region = if a.len() == 2 { shared_region(a, b) } else { shared_region(b, a) };
    if region.is_empty() {
        return None;
    }
    let center = region.iter().fold(Vec2::zero(), |sum, &point| sum + point) * (1.0 / region.len() as f64);
    Some(Manifold::new(normal, -axis_penetration, OneOrTwo::One(center)))
}
