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

use crate::core::arena::Arena;
use crate::core::{BodyHandle, ColliderHandle, RigidBody};
use crate::float::{approx_zero, EPSILON};
use crate::geom::Vec2;
use crate::manifold::Manifold;

/// A touching pair of colliders found during the last step.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Contact {
    pub a: ColliderHandle,
    pub b: ColliderHandle,
    /// Contact geometry with the normal pointing from `a` to `b`.
    pub manifold: Manifold,
    /// Whether either collider is a trigger, in which case the contact is
    /// reported but never solved.
    pub is_trigger: bool,
}

// Impulse resolution for one contact, rebuilt every step. A missing or
// static body acts as an immovable object.
#[derive(Clone, Debug)]
pub(crate) struct CollisionSolver {
    a: Option<BodyHandle>,
    b: Option<BodyHandle>,
    manifold: Manifold,
    restitution: f64,
    static_friction: f64,
    dynamic_friction: f64,
    gravity_sink: f64,
}

type BodyArena = Arena<BodyHandle, RigidBody>;

struct Side<'a> {
    body: Option<&'a mut RigidBody>,
    center: Vec2,
}

impl<'a> Side<'a> {
    fn new(body: Option<&'a mut RigidBody>) -> Side<'a> {
        let body = body.filter(|body| !body.is_static());
        let center = body.as_ref().and_then(|body| body.center_of_mass()).unwrap_or_default();
        Side { body, center }
    }

    fn inverse_mass(&self) -> f64 {
        self.body.as_ref().map_or(0.0, |body| body.inverse_mass())
    }

    fn inverse_inertia(&self) -> f64 {
        self.body.as_ref().map_or(0.0, |body| body.inverse_inertia())
    }

    fn gravity(&self, gravity: Vec2) -> Vec2 {
        match self.body {
            Some(ref body) if body.follows_gravity => gravity,
            _ => Vec2::zero(),
        }
    }

    fn velocity_at(&self, offset: Vec2) -> Vec2 {
        self.body.as_ref().map_or(Vec2::zero(), |body| body.velocity_at_offset(offset))
    }

    fn apply_impulse(&mut self, impulse: Vec2, offset: Vec2) {
        if let Some(body) = self.body.as_mut() {
            body.apply_impulse_at_offset(impulse, offset);
        }
    }

    fn move_by(&mut self, displacement: Vec2) {
        if let Some(body) = self.body.as_mut() {
            body.move_by(displacement);
        }
    }
}

// Per-point data of one impulse pass.
struct ContactPoint {
    offset_a: Vec2,
    offset_b: Vec2,
    inverse_mass_sum: f64,
    impulse: f64,
}

impl CollisionSolver {
    /// Restitution is dropped for contacts whose relative speed is no more
    /// than what gravity adds in one step, so resting bodies do not bounce.
    pub fn new(
        a: Option<BodyHandle>,
        b: Option<BodyHandle>,
        manifold: Manifold,
        (restitution, static_friction, dynamic_friction): (f64, f64, f64),
        bodies: &mut BodyArena,
        gravity: Vec2,
        dt: f64,
    ) -> CollisionSolver {
        let mut solver = CollisionSolver {
            a,
            b,
            manifold,
            restitution,
            static_friction,
            dynamic_friction,
            gravity_sink: 0.0,
        };
        let resting_speed_sq = (gravity * dt).len_sq() + EPSILON;
        let (side_a, side_b) = solver.sides(bodies);
        let resting = manifold.contacts.iter().any(|contact| {
            let relative = side_b.velocity_at(contact - side_b.center) - side_a.velocity_at(contact - side_a.center);
            relative.len_sq() < resting_speed_sq
        });
        let relative_gravity = side_b.gravity(gravity) - side_a.gravity(gravity);
        solver.gravity_sink = relative_gravity.dot(manifold.normal).abs() * dt * dt;
        if resting {
            solver.restitution = 0.0;
        }
        solver
    }

    fn sides<'b>(&self, bodies: &'b mut BodyArena) -> (Side<'b>, Side<'b>) {
        let (a, b) = bodies.pair_mut(self.a, self.b);
        (Side::new(a), Side::new(b))
    }

    #[cfg(test)]
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Applies normal and then friction impulses. Every contact point of a
    /// pass sees the same starting velocities, so symmetric contacts push
    /// symmetrically.
    pub fn resolve_velocity(&self, bodies: &mut BodyArena) {
        let (mut a, mut b) = self.sides(bodies);
        if approx_zero(a.inverse_mass() + b.inverse_mass()) {
            return;
        }
        let normal = self.manifold.normal;
        let count = self.manifold.contact_count() as f64;
        let points: Vec<ContactPoint> = self
            .manifold
            .contacts
            .iter()
            .filter_map(|contact| {
                let (offset_a, offset_b) = (contact - a.center, contact - b.center);
                let relative = b.velocity_at(offset_b) - a.velocity_at(offset_a);
                let normal_speed = relative.dot(normal);
                if normal_speed > 0.0 {
                    return None;
                }
                let (cross_a, cross_b) = (offset_a.cross(normal), offset_b.cross(normal));
                let inverse_mass_sum = a.inverse_mass()
                    + b.inverse_mass()
                    + cross_a * cross_a * a.inverse_inertia()
                    + cross_b * cross_b * b.inverse_inertia();
                if approx_zero(inverse_mass_sum) {
                    return None;
                }
                let impulse = -(1.0 + self.restitution) * normal_speed / inverse_mass_sum / count;
                Some(ContactPoint { offset_a, offset_b, inverse_mass_sum, impulse })
            })
            .collect();

        for point in &points {
            a.apply_impulse(-(normal * point.impulse), point.offset_a);
            b.apply_impulse(normal * point.impulse, point.offset_b);
        }

        let frictions: Vec<Vec2> = points
            .iter()
            .map(|point| {
                let relative = b.velocity_at(point.offset_b) - a.velocity_at(point.offset_a);
                let tangent = (relative - normal * relative.dot(normal)).normalize();
                let tangent_impulse = -relative.dot(tangent) / point.inverse_mass_sum / count;
                if approx_zero(tangent_impulse) {
                    Vec2::zero()
                } else if tangent_impulse.abs() < point.impulse * self.static_friction {
                    tangent * tangent_impulse
                } else {
                    tangent * -(point.impulse * self.dynamic_friction).min(tangent_impulse.abs())
                }
            })
            .collect();
        for (point, &friction) in points.iter().zip(frictions.iter()) {
            a.apply_impulse(-friction, point.offset_a);
            b.apply_impulse(friction, point.offset_b);
        }
    }

    /// Pushes the bodies apart along the normal, split by inverse mass.
    ///
    /// Each call removes `percent` of the penetration in excess of `slop`,
    /// plus the depth gravity adds over one step, without pushing past
    /// `slop`. A resting contact therefore ends every step at most `slop`
    /// deep.
    pub fn correct_position(&self, bodies: &mut BodyArena, slop: f64, percent: f64) {
        let (mut a, mut b) = self.sides(bodies);
        let inverse_mass_sum = a.inverse_mass() + b.inverse_mass();
        if approx_zero(inverse_mass_sum) {
            return;
        }
        let excess = (self.manifold.penetration - slop).max(0.0);
        let depth = (excess * percent + self.gravity_sink).min(excess);
        let correction = self.manifold.normal * (depth / inverse_mass_sum);
        a.move_by(-(correction * a.inverse_mass()));
        b.move_by(correction * b.inverse_mass());
    }
}
