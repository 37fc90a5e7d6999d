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

use crate::core::Material;
use crate::error::{PhysicsError, Result};
use crate::geom::{cross_scalar, Shape, Transform, TransformRef, Vec2};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Mass, velocity and accumulated forces of a simulated object.
///
/// The body does not own its position. It refers to the entity's
/// `Transform` through a weak handle, and moves it during integration. Once
/// every strong `TransformRef` is dropped the body stops simulating and is
/// removed from its world on the next step.
#[derive(Clone, Debug)]
pub struct RigidBody {
    transform: Weak<RefCell<Transform>>,
    mass: f64,
    inverse_mass: f64,
    inertia: f64,
    inverse_inertia: f64,
    /// Linear velocity in world units per second.
    pub velocity: Vec2,
    /// Angular velocity in radians per second, counter-clockwise.
    pub angular_velocity: f64,
    force: Vec2,
    torque: f64,
    /// Whether the world's gravity accelerates this body.
    pub follows_gravity: bool,
    fixed_rotation: bool,
    center_offset: Vec2,
}

fn inverse(val: f64) -> f64 {
    if val == 0.0 || val.is_infinite() {
        0.0
    } else {
        1.0 / val
    }
}

impl RigidBody {
    /// Constructs a body of the given `mass` attached to `transform`. The
    /// moment of inertia defaults to the mass.
    ///
    /// A mass of `0.0` or infinity makes the body static. Panics on negative
    /// or NaN masses; see `try_new`.
    pub fn new(transform: &TransformRef, mass: f64) -> RigidBody {
        RigidBody::try_new(transform, mass).unwrap_or_else(|err| panic!("{}", err))
    }

    pub fn try_new(transform: &TransformRef, mass: f64) -> Result<RigidBody> {
        if !(mass >= 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        Ok(RigidBody {
            transform: Rc::downgrade(transform),
            mass,
            inverse_mass: inverse(mass),
            inertia: mass,
            inverse_inertia: inverse(mass),
            velocity: Vec2::zero(),
            angular_velocity: 0.0,
            force: Vec2::zero(),
            torque: 0.0,
            follows_gravity: true,
            fixed_rotation: false,
            center_offset: Vec2::zero(),
        })
    }

    /// Constructs a body with infinite mass, which never moves.
    pub fn new_static(transform: &TransformRef) -> RigidBody {
        let mut body = RigidBody::new(transform, 0.0);
        body.follows_gravity = false;
        body
    }

    /// Derives mass and inertia from `shape` as placed by `transform`
    /// (so scale is accounted for) and the material's density. The center
    /// of mass is the shape's centroid.
    ///
    /// Shapes without area, such as edges, produce a static body.
    pub fn from_shape(transform: &TransformRef, shape: &Shape, material: &Material) -> RigidBody {
        let placed = shape.place(&transform.borrow());
        let mass = material.density() * placed.area();
        let inertia = placed.moment_of_inertia(mass);
        RigidBody::new(transform, mass).with_inertia(inertia).with_center_offset(shape.centroid())
    }

    /// Sets the center of mass in the transform's local space, before
    /// scaling. Shapes rotate about their centroid, so this should match
    /// the centroid of the body's collider.
    pub fn with_center_offset(mut self, offset: Vec2) -> RigidBody {
        self.center_offset = offset;
        self
    }

    /// Overrides the moment of inertia. Zero or infinity means the body
    /// never rotates from impulses.
    pub fn with_inertia(mut self, inertia: f64) -> RigidBody {
        self.inertia = inertia.abs();
        self.inverse_inertia = if self.fixed_rotation { 0.0 } else { inverse(self.inertia) };
        self
    }

    pub fn with_fixed_rotation(mut self, fixed_rotation: bool) -> RigidBody {
        self.set_fixed_rotation(fixed_rotation);
        self
    }

    pub fn with_gravity(mut self, follows_gravity: bool) -> RigidBody {
        self.follows_gravity = follows_gravity;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> RigidBody {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// `1 / mass`, or zero for static bodies.
    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    #[inline]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    #[inline]
    pub fn inverse_inertia(&self) -> f64 {
        self.inverse_inertia
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        if !(mass >= 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        self.mass = mass;
        self.inverse_mass = inverse(mass);
        Ok(())
    }

    /// Returns true if the body has infinite mass.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    #[inline]
    pub fn fixed_rotation(&self) -> bool {
        self.fixed_rotation
    }

    pub fn set_fixed_rotation(&mut self, fixed_rotation: bool) {
        self.fixed_rotation = fixed_rotation;
        self.inverse_inertia = if fixed_rotation { 0.0 } else { inverse(self.inertia) };
        if fixed_rotation {
            self.angular_velocity = 0.0;
        }
    }

    /// The force accumulated since the last step.
    #[inline]
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// The torque accumulated since the last step.
    #[inline]
    pub fn torque(&self) -> f64 {
        self.torque
    }

    /// Returns the transform handle, or `None` once its owner has dropped it.
    pub fn transform(&self) -> Option<TransformRef> {
        self.transform.upgrade()
    }

    #[inline]
    pub fn center_offset(&self) -> Vec2 {
        self.center_offset
    }

    /// World position of the center of mass, about which impulses turn the
    /// body. `None` once the transform is gone.
    pub fn center_of_mass(&self) -> Option<Vec2> {
        self.transform.upgrade().map(|transform| {
            let transform = transform.borrow();
            transform.position + self.center_offset.scale(transform.scale)
        })
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.transform.strong_count() > 0
    }

    /// World position of the body, or `None` once its transform is gone.
    pub fn position(&self) -> Option<Vec2> {
        self.transform.upgrade().map(|transform| transform.borrow().position)
    }

    /// Rotation of the body in radians, or `None` once its transform is gone.
    pub fn rotation(&self) -> Option<f64> {
        self.transform.upgrade().map(|transform| transform.borrow().rotation)
    }

    /// Accumulates a force, applied over the next step.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Accumulates a torque, applied over the next step.
    pub fn apply_torque(&mut self, torque: f64) {
        self.torque += torque;
    }

    /// Changes the velocity immediately.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse * self.inverse_mass;
    }

    /// Changes the angular velocity immediately.
    pub fn apply_angular_impulse(&mut self, impulse: f64) {
        self.angular_velocity += impulse * self.inverse_inertia;
    }

    /// Applies `impulse` at `offset` from the center of mass, changing both
    /// linear and angular velocity.
    pub fn apply_impulse_at_offset(&mut self, impulse: Vec2, offset: Vec2) {
        self.apply_impulse(impulse);
        self.apply_angular_impulse(offset.cross(impulse));
    }

    /// Applies `impulse` at the world-space `point`.
    pub fn apply_impulse_at(&mut self, impulse: Vec2, point: Vec2) {
        let offset = point - self.center_of_mass().unwrap_or(point);
        self.apply_impulse_at_offset(impulse, offset);
    }

    /// Velocity of the world-space `point` if it were fixed to the body:
    /// linear velocity plus the contribution of the rotation about the
    /// center of mass.
    pub fn velocity_at(&self, point: Vec2) -> Vec2 {
        let offset = point - self.center_of_mass().unwrap_or(point);
        self.velocity_at_offset(offset)
    }

    pub(crate) fn velocity_at_offset(&self, offset: Vec2) -> Vec2 {
        self.velocity + cross_scalar(self.angular_velocity, offset)
    }

    /// Semi-implicit Euler, first half: turns accumulated forces and gravity
    /// into velocity, then clears the accumulators. Static bodies only clear.
    pub fn integrate_forces(&mut self, dt: f64, gravity: Vec2) {
        if !self.is_static() {
            let gravity = if self.follows_gravity { gravity } else { Vec2::zero() };
            self.velocity += (self.force * self.inverse_mass + gravity) * dt;
            self.angular_velocity += self.torque * self.inverse_inertia * dt;
        }
        self.force = Vec2::zero();
        self.torque = 0.0;
    }

    /// Semi-implicit Euler, second half: moves the transform by the current
    /// velocity.
    pub fn integrate_velocity(&mut self, dt: f64) {
        if self.is_static() {
            return;
        }
        if let Some(transform) = self.transform.upgrade() {
            let mut transform = transform.borrow_mut();
            transform.move_by(self.velocity * dt);
            if !self.fixed_rotation {
                transform.rotate_by(self.angular_velocity * dt);
            }
        }
    }

    pub(crate) fn move_by(&mut self, displacement: Vec2) {
        if let Some(transform) = self.transform.upgrade() {
            transform.borrow_mut().move_by(displacement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::v2;

    fn body(mass: f64) -> (TransformRef, RigidBody) {
        let transform = Transform::default().shared();
        let body = RigidBody::new(&transform, mass).with_gravity(false);
        (transform, body)
    }

    #[test]
    fn test_force_to_velocity() {
        let (_transform, mut body) = body(2.0);
        body.apply_force(v2(2.0, 0.0));
        body.integrate_forces(1.0, Vec2::zero());
        assert_eq!(body.velocity, v2(1.0, 0.0));
        assert_eq!(body.force(), Vec2::zero());
    }

    #[test]
    fn test_torque_to_angular_velocity() {
        let (_transform, mut body) = body(2.0);
        body.apply_torque(3.0);
        body.integrate_forces(0.5, Vec2::zero());
        assert_eq!(body.angular_velocity, 0.75);
        assert_eq!(body.torque(), 0.0);
    }

    #[test]
    fn test_impulses() {
        let (_transform, mut body) = body(4.0);
        body.apply_impulse(v2(2.0, -4.0));
        assert_eq!(body.velocity, v2(0.5, -1.0));
        body.apply_angular_impulse(2.0);
        assert_eq!(body.angular_velocity, 0.5);
    }

    #[test]
    fn test_point_velocity() {
        let (transform, mut body) = body(1.0);
        transform.borrow_mut().position = v2(1.0, 1.0);
        body.angular_velocity = 2.0;
        let velocity = body.velocity_at(v2(4.0, 1.0));
        assert_eq!(velocity, v2(0.0, 6.0));
        assert_eq!(velocity.len(), 2.0 * 3.0);
        assert_eq!(velocity.dot(v2(3.0, 0.0)), 0.0);
    }

    #[test]
    fn test_integrate_moves_transform() {
        let (transform, mut body) = body(1.0);
        body.velocity = v2(2.0, 0.0);
        body.angular_velocity = 1.0;
        body.integrate_velocity(0.5);
        assert_eq!(transform.borrow().position, v2(1.0, 0.0));
        assert_eq!(transform.borrow().rotation, 0.5);
    }

    #[test]
    fn test_gravity() {
        let transform = Transform::default().shared();
        let mut falling = RigidBody::new(&transform, 3.0);
        falling.integrate_forces(0.5, v2(0.0, -10.0));
        assert_eq!(falling.velocity, v2(0.0, -5.0));

        let mut floating = RigidBody::new(&transform, 3.0).with_gravity(false);
        floating.integrate_forces(0.5, v2(0.0, -10.0));
        assert_eq!(floating.velocity, Vec2::zero());
    }

    #[test]
    fn test_static_body_never_moves() {
        let transform = Transform::new(v2(1.0, 2.0)).shared();
        let mut body = RigidBody::new_static(&transform);
        body.apply_force(v2(100.0, 0.0));
        body.apply_impulse(v2(100.0, 0.0));
        body.integrate_forces(1.0, v2(0.0, -10.0));
        body.integrate_velocity(1.0);
        assert!(body.is_static());
        assert_eq!(transform.borrow().position, v2(1.0, 2.0));
    }

    #[test]
    fn test_fixed_rotation() {
        let (_transform, mut body) = body(1.0);
        body.set_fixed_rotation(true);
        body.apply_angular_impulse(5.0);
        body.apply_torque(5.0);
        body.integrate_forces(1.0, Vec2::zero());
        assert_eq!(body.angular_velocity, 0.0);
        assert_eq!(body.inverse_inertia(), 0.0);
    }

    #[test]
    fn test_from_shape() {
        let transform = Transform::default().with_scale(v2(2.0, 2.0)).shared();
        let material = Material::new(2.0, 0.5, 0.3, 0.0).unwrap();
        let body = RigidBody::from_shape(&transform, &Shape::square(1.0), &material);
        assert_eq!(body.mass(), 8.0);
        assert!((body.inertia() - 16.0 / 3.0).abs() < 1e-12);
        assert_eq!(body.center_offset(), Vec2::zero());
    }

    #[test]
    fn test_center_of_mass_offset() {
        let transform = Transform::new(v2(1.0, 0.0)).with_scale(v2(2.0, 2.0)).shared();
        let material = Material::new(1.0, 0.5, 0.3, 0.0).unwrap();
        let square = Shape::polygon(vec![v2(10.0, 10.0), v2(12.0, 10.0), v2(12.0, 12.0), v2(10.0, 12.0)]);
        let mut body = RigidBody::from_shape(&transform, &square, &material).with_gravity(false);
        assert!(body.center_offset().dist(v2(11.0, 11.0)) < 1e-12);
        assert!(body.center_of_mass().unwrap().dist(v2(23.0, 22.0)) < 1e-12);

        body.angular_velocity = 1.0;
        assert!(body.velocity_at(v2(23.0, 22.0)).len() < 1e-12);
        assert!(body.velocity_at(v2(24.0, 22.0)).dist(v2(0.0, 1.0)) < 1e-12);

        body.angular_velocity = 0.0;
        body.apply_impulse_at(v2(0.0, 1.0), v2(23.0, 25.0));
        assert_eq!(body.angular_velocity, 0.0);
    }

    #[test]
    fn test_invalid_mass() {
        let transform = Transform::default().shared();
        let err = RigidBody::try_new(&transform, -1.0).err();
        assert_eq!(err, Some(PhysicsError::InvalidMass(-1.0)));
        assert_eq!(err.unwrap().to_string(), "mass must be non-negative, got -1");
        assert!(RigidBody::try_new(&transform, f64::NAN).is_err());
        assert!(RigidBody::try_new(&transform, f64::INFINITY).unwrap().is_static());
    }

    #[test]
    fn test_dropped_transform() {
        let (transform, body) = body(1.0);
        assert!(body.is_alive());
        drop(transform);
        assert!(!body.is_alive());
        assert_eq!(body.position(), None);
    }
}
