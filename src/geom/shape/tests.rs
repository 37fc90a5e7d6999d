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

use crate::error::PhysicsError;
use crate::geom::*;
use std::f64::consts::PI;

fn assert_close(actual: Vec2, expected: Vec2) {
    assert!(actual.dist(expected) < 1e-9, "expected {:?}, got {:?}", expected, actual);
}

fn square_vertices() -> Vec<Vec2> {
    vec![v2(1.0, 1.0), v2(-1.0, 1.0), v2(-1.0, -1.0), v2(1.0, -1.0)]
}

fn placed_vertices(shape: &Shape, transform: Transform) -> Vec<Vec2> {
    shape.place(&transform).vertices()
}

#[test]
fn test_rect_bounds() {
    let shape = Shape::rect(v2(4.0, 6.0)).place_at(v2(3.0, 5.0));
    let bounds = shape.bounding_box();
    assert_eq!(bounds.min_x(), 1.0);
    assert_eq!(bounds.min_y(), 2.0);
    assert_eq!(bounds.max_x(), 5.0);
    assert_eq!(bounds.max_y(), 8.0);
}

#[test]
fn test_rect_contains_boundary() {
    let shape = Shape::rect(v2(4.0, 3.0)).place_at(v2(3.0, 1.5));
    assert!(shape.contains(v2(1.0, 1.0)));
    assert!(shape.contains(v2(1.0, 0.0)));
    assert!(!shape.contains(v2(0.9, 1.0)));
}

#[test]
fn test_rect_corners_inside() {
    let shape = Shape::square(4.0).place_at(v2(0.0, 0.0));
    for &corner in [v2(-2.0, -2.0), v2(-2.0, 2.0), v2(2.0, 2.0), v2(2.0, -2.0)].iter() {
        assert!(shape.contains(corner));
    }
    for &outside in [v2(3.0, -3.0), v2(-3.0, 3.0), v2(-3.0, -3.0), v2(3.0, 3.0)].iter() {
        assert!(!shape.contains(outside));
    }
}

#[test]
fn test_rect_ignores_rotation() {
    let shape = Shape::rect(v2(4.0, 2.0));
    let placed = shape.place(&Transform::new(v2(1.0, 1.0)).with_rotation(PI / 3.0));
    assert_eq!(placed, shape.place_at(v2(1.0, 1.0)));
}

#[test]
fn test_polygon_vertices() {
    let shape = Shape::polygon(square_vertices());
    assert_eq!(placed_vertices(&shape, Transform::default()), square_vertices());
}

#[test]
fn test_translated_polygon_vertices() {
    let shape = Shape::polygon(square_vertices());
    let expected = vec![v2(2.0, 2.0), v2(0.0, 2.0), v2(0.0, 0.0), v2(2.0, 0.0)];
    assert_eq!(placed_vertices(&shape, Transform::new(v2(1.0, 1.0))), expected);
}

#[test]
fn test_scaled_polygon_vertices() {
    let shape = Shape::polygon(square_vertices());
    let expected = vec![v2(2.0, 2.0), v2(-2.0, 2.0), v2(-2.0, -2.0), v2(2.0, -2.0)];
    assert_eq!(placed_vertices(&shape, Transform::default().with_scale(v2(2.0, 2.0))), expected);
}

#[test]
fn test_rotated_polygon_vertices() {
    let shape = Shape::polygon(square_vertices());
    let actual = placed_vertices(&shape, Transform::default().with_rotation(PI / 4.0));
    for (&vertex, &original) in actual.iter().zip(square_vertices().iter()) {
        assert_close(vertex, original.rotate(PI / 4.0));
    }
    let half_diag = 2.0f64.sqrt();
    assert_close(actual[0], v2(0.0, half_diag));
}

#[test]
fn test_oriented_box_matches_polygon() {
    let transform = Transform::new(v2(-3.0, 2.0)).with_rotation(0.7);
    let from_box = Shape::oriented_box(v2(2.0, 2.0)).place(&transform).vertices();
    let from_polygon = Shape::polygon(square_vertices()).place(&transform).vertices();
    for vertex in from_box {
        assert!(from_polygon.iter().any(|&other| other.dist(vertex) < 1e-9));
    }
}

#[test]
fn test_polygon_winding_normalized() {
    let mut clockwise = square_vertices();
    clockwise.reverse();
    let shape = Shape::polygon(clockwise);
    assert_eq!(placed_vertices(&shape, Transform::default())[0], v2(1.0, 1.0));
}

#[test]
fn test_mirrored_polygon_stays_convex() {
    let shape = Shape::polygon(vec![v2(0.0, 0.0), v2(2.0, 0.0), v2(0.0, 1.0)]);
    let placed = shape.place(&Transform::default().with_scale(v2(-1.0, 1.0)));
    assert!(placed.contains(placed.centroid()));
    assert!(placed.contains(v2(-0.5, 0.25)));
}

#[test]
fn test_invalid_shapes() {
    assert_eq!(Shape::try_circle(0.0), Err(PhysicsError::InvalidRadius(0.0)));
    assert_eq!(Shape::try_rect(v2(1.0, -1.0)), Err(PhysicsError::InvalidDimensions(1.0, -1.0)));
    assert_eq!(Shape::try_polygon(vec![v2(0.0, 0.0), v2(1.0, 0.0)]), Err(PhysicsError::TooFewVertices(2)));
    assert_eq!(
        Shape::try_polygon(vec![v2(0.0, 0.0), v2(2.0, 0.0), v2(1.0, 0.5), v2(2.0, 2.0), v2(0.0, 2.0)]),
        Err(PhysicsError::NonConvexPolygon)
    );
    assert_eq!(
        Shape::try_polygon(vec![v2(0.0, 0.0), v2(1.0, 1.0), v2(2.0, 2.0)]),
        Err(PhysicsError::NonConvexPolygon)
    );
    assert_eq!(Shape::try_edge(v2(1.0, 1.0), v2(1.0, 1.0)), Err(PhysicsError::DegenerateEdge));
}

#[test]
fn test_pentagram_rejected() {
    let points: Vec<Vec2> = (0..5)
        .map(|i| v2(0.0, 1.0).rotate(2.0 * PI * (2 * i) as f64 / 5.0))
        .collect();
    assert_eq!(Shape::try_polygon(points), Err(PhysicsError::NonConvexPolygon));
}

#[test]
#[should_panic]
fn test_illegal_circle() {
    Shape::circle(-1.0);
}

#[test]
fn test_circle_scale() {
    let placed = Shape::circle(1.0).place(&Transform::default().with_scale(v2(0.5, -3.0)));
    assert_eq!(placed, PlacedShape::circle(Vec2::zero(), 3.0));
    assert!(placed.vertices().is_empty());
}

#[test]
fn test_mass_properties() {
    assert!((Shape::circle(2.0).area() - 4.0 * PI).abs() < 1e-12);
    assert_eq!(Shape::rect(v2(2.0, 4.0)).area(), 8.0);
    assert!((Shape::polygon(square_vertices()).area() - 4.0).abs() < 1e-12);
    assert_eq!(Shape::edge(v2(0.0, 0.0), v2(3.0, 0.0)).area(), 0.0);

    assert_eq!(Shape::circle(2.0).moment_of_inertia(3.0), 6.0);
    let rect_inertia = Shape::square(2.0).moment_of_inertia(3.0);
    let polygon_inertia = Shape::polygon(square_vertices()).moment_of_inertia(3.0);
    assert!((rect_inertia - 2.0).abs() < 1e-12);
    assert!((polygon_inertia - 2.0).abs() < 1e-12);
}

#[test]
fn test_nearest_point() {
    let circle = Shape::circle(2.0).place_at(v2(1.0, 1.0));
    assert_close(circle.nearest_point(v2(5.0, 1.0)), v2(3.0, 1.0));
    assert_close(circle.nearest_point(v2(1.5, 1.0)), v2(1.5, 1.0));

    let rect = Shape::square(2.0).place_at(Vec2::zero());
    assert_close(rect.nearest_point(v2(3.0, 4.0)), v2(1.0, 1.0));
    assert_close(rect.nearest_point(v2(0.5, -0.25)), v2(0.5, -0.25));

    let polygon = Shape::polygon(square_vertices()).place(&Transform::default().with_rotation(PI / 4.0));
    let corner = 2.0f64.sqrt();
    assert_close(polygon.nearest_point(v2(0.0, 5.0)), v2(0.0, corner));
    assert_close(polygon.nearest_point(v2(0.1, 0.2)), v2(0.1, 0.2));
}

#[test]
fn test_edge_contains() {
    let oblique = Shape::edge(v2(0.0, 0.0), v2(2.0, 2.0)).place_at(Vec2::zero());
    assert!(oblique.contains(v2(1.0, 1.0)));
    assert!(oblique.contains(v2(2.0, 2.0)));
    assert!(!oblique.contains(v2(3.0, 3.0)));
    assert!(!oblique.contains(v2(1.0, 0.0)));

    let horizontal = PlacedShape::Edge { start: v2(0.0, 0.0), end: v2(2.0, 0.0) };
    assert!(horizontal.contains(v2(1.0, 0.0)));
}

#[test]
fn test_edge_placement() {
    let shape = Shape::edge(v2(0.0, 0.0), v2(2.0, 0.0));
    let placed = shape.place(&Transform::new(v2(1.0, 0.0)).with_rotation(PI / 2.0));
    let vertices = placed.vertices();
    assert_close(vertices[0], v2(2.0, -1.0));
    assert_close(vertices[1], v2(2.0, 1.0));
}

#[test]
fn test_edge_nearest_point() {
    let edge = PlacedShape::Edge { start: v2(0.0, 0.0), end: v2(4.0, 0.0) };
    assert_close(edge.nearest_point(v2(1.0, 3.0)), v2(1.0, 0.0));
    assert_close(edge.nearest_point(v2(-2.0, 1.0)), v2(0.0, 0.0));
    assert_close(edge.nearest_point(v2(6.0, -1.0)), v2(4.0, 0.0));
}

#[test]
fn test_edge_segment_intersection() {
    let edge = |a: Vec2, b: Vec2| PlacedShape::Edge { start: a, end: b };
    assert!(edge(v2(0.0, 0.0), v2(4.0, 3.0)).intersects_segment(v2(4.0, 0.0), v2(0.0, 3.0)));
    assert!(edge(v2(0.0, 0.0), v2(2.0, 2.0)).intersects_segment(v2(1.0, 1.0), v2(-1.0, 3.0)));
    assert!(edge(v2(0.0, 0.0), v2(2.0, 2.0)).intersects_segment(v2(1.0, 1.0), v2(3.0, 3.0)));
    assert!(!edge(v2(0.0, 0.0), v2(4.0, 3.0)).intersects_segment(v2(9.0, 1.0), v2(5.0, 4.0)));
    assert!(!edge(v2(0.0, 0.0), v2(2.0, 2.0)).intersects_segment(v2(0.0, 1.0), v2(2.0, 3.0)));
}

#[test]
fn test_edge_edge_overlap() {
    let a = Shape::edge(v2(0.0, 0.0), v2(2.0, 2.0)).place_at(Vec2::zero());
    let b = PlacedShape::Edge { start: v2(1.0, 1.0), end: v2(3.0, 3.0) };
    let c = PlacedShape::Edge { start: v2(0.0, 1.0), end: v2(2.0, 3.0) };
    assert_eq!(a, PlacedShape::Edge { start: v2(0.0, 0.0), end: v2(2.0, 2.0) });
    assert!(a.overlaps(&b));
    assert!(!a.overlaps(&c));
}

#[test]
fn test_box_segment_intersection() {
    let rect = Shape::square(4.0).place_at(Vec2::zero());
    assert!(rect.intersects_segment(v2(-1.0, 3.0), v2(3.0, -1.0)));
    assert!(rect.intersects_segment(v2(-1.0, 3.0), v2(1.0, -3.0)));
    assert!(rect.intersects_segment(v2(0.0, 3.0), v2(0.0, -3.0)));
    assert!(rect.intersects_segment(v2(-1.0, 2.0), v2(3.0, 2.0)));
    assert!(rect.intersects_segment(v2(1.0, 3.0), v2(3.0, 1.0)));
    assert!(rect.intersects_segment(v2(-1.0, -3.0), v2(-3.0, -1.0)));
    assert!(rect.intersects_segment(v2(-2.0, -2.0), v2(2.0, 2.0)));
    assert!(!rect.intersects_segment(v2(1.0, 8.0), v2(3.0, 2.5)));
}

#[test]
fn test_circle_segment_intersection() {
    let circle = Shape::circle(2.0).place_at(Vec2::zero());
    assert!(circle.intersects_segment(v2(1.0, 3.0), v2(1.0, -3.0)));
    assert!(circle.intersects_segment(v2(2.0, 3.0), v2(2.0, -3.0)));
    assert!(!circle.intersects_segment(v2(3.0, 3.0), v2(3.0, -3.0)));
}

#[test]
fn test_triangle_segment_intersection() {
    let triangle = Shape::polygon(vec![v2(0.0, 0.0), v2(1.0, 3.0), v2(2.0, 0.0)]).place_at(Vec2::zero());
    assert!(triangle.intersects_segment(v2(0.0, 2.0), v2(2.0, 2.0)));
    assert!(!triangle.intersects_segment(v2(0.0, 4.0), v2(2.0, 4.0)));
}

#[test]
fn test_raycast_rect() {
    let rect = Shape::square(2.0).place_at(v2(5.0, 0.0));
    let hit = rect.raycast(&Ray::new(Vec2::zero(), v2(1.0, 0.0)), 0.0).unwrap();
    assert_eq!(hit.distance, 4.0);
    assert_eq!(hit.point, v2(4.0, 0.0));
    assert_eq!(hit.normal, v2(-1.0, 0.0));

    assert!(rect.raycast(&Ray::new(Vec2::zero(), v2(1.0, 0.0)), 3.0).is_none());
    assert!(rect.raycast(&Ray::new(Vec2::zero(), v2(-1.0, 0.0)), 0.0).is_none());
    assert!(rect.raycast(&Ray::new(Vec2::zero(), v2(0.0, 1.0)), 0.0).is_none());
}

#[test]
fn test_raycast_from_inside_reports_exit() {
    let rect = Shape::square(2.0).place_at(Vec2::zero());
    let hit = rect.raycast(&Ray::new(Vec2::zero(), v2(0.0, 1.0)), 0.0).unwrap();
    assert_eq!(hit.point, v2(0.0, 1.0));
    assert_eq!(hit.normal, v2(0.0, 1.0));

    let circle = Shape::circle(3.0).place_at(Vec2::zero());
    let hit = circle.raycast(&Ray::new(Vec2::zero(), v2(-1.0, 0.0)), 0.0).unwrap();
    assert_close(hit.point, v2(-3.0, 0.0));
    assert_close(hit.normal, v2(-1.0, 0.0));
}

#[test]
fn test_raycast_circle() {
    let circle = Shape::circle(1.0).place_at(v2(0.0, 5.0));
    let hit = circle.raycast(&Ray::new(Vec2::zero(), v2(0.0, 2.0)), 10.0).unwrap();
    assert!((hit.distance - 4.0).abs() < 1e-12);
    assert_close(hit.normal, v2(0.0, -1.0));
    assert!(circle.raycast(&Ray::new(v2(2.0, 0.0), v2(0.0, 1.0)), 0.0).is_none());
}

#[test]
fn test_raycast_polygon() {
    let polygon = Shape::polygon(square_vertices()).place(&Transform::new(v2(5.0, 0.0)).with_rotation(PI / 4.0));
    let hit = polygon.raycast(&Ray::new(Vec2::zero(), v2(1.0, 0.0)), 0.0).unwrap();
    let corner = 5.0 - 2.0f64.sqrt();
    assert!((hit.distance - corner).abs() < 1e-9);
    assert!(polygon.raycast(&Ray::new(v2(0.0, 3.0), v2(1.0, 0.0)), 0.0).is_none());
}

#[test]
fn test_raycast_edge() {
    let edge = PlacedShape::Edge { start: v2(2.0, -1.0), end: v2(2.0, 1.0) };
    let hit = edge.raycast(&Ray::new(Vec2::zero(), v2(1.0, 0.0)), 0.0).unwrap();
    assert_close(hit.point, v2(2.0, 0.0));
    assert_close(hit.normal, v2(-1.0, 0.0));
    assert!(edge.raycast(&Ray::new(v2(0.0, 0.0), v2(0.0, 1.0)), 0.0).is_none());
}

#[test]
fn test_zero_direction_ray_never_hits() {
    let rect = Shape::square(2.0).place_at(Vec2::zero());
    assert!(rect.raycast(&Ray::new(Vec2::zero(), Vec2::zero()), 0.0).is_none());
}
