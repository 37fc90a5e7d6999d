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
use crate::core::commands::Command;
use crate::core::ids::world_ids;
use crate::core::solver::CollisionSolver;
use crate::core::{
    BodyHandle, BroadPhase, BruteForce, Collider, ColliderHandle, CollisionContext, CollisionListener, Commands,
    Contact, Proxy, RigidBody, WorldConfig,
};
use crate::error::Result;
use crate::float::key;
use crate::geom::{Ray, RayHit, Vec2};
use crate::manifold::{self, Manifold};
use log::{debug, trace, warn};

/// Owns every registered body and collider and advances them in time.
///
/// Entities are referred to by `BodyHandle` and `ColliderHandle`. Handles
/// stay valid until the entity is removed, and a handle never refers to a
/// different entity later on, even when its slot is reused.
///
/// Each call to `step` integrates motion, finds touching pairs, notifies
/// listeners, and resolves the collisions. Listeners cannot borrow the world
/// while it steps; changes they request through `Commands` are applied once
/// the step completes.
pub struct PhysicsWorld {
    id: u64,
    config: WorldConfig,
    bodies: Arena<BodyHandle, RigidBody>,
    colliders: Arena<ColliderHandle, Collider>,
    commands: Commands,
    broad_phase: Box<dyn BroadPhase>,
    pairs: Vec<(ColliderHandle, ColliderHandle)>,
    contacts: Vec<Contact>,
    solvers: Vec<CollisionSolver>,
}

impl PhysicsWorld {
    /// Constructs an empty world with the default configuration.
    pub fn new() -> PhysicsWorld {
        PhysicsWorld::build(WorldConfig::default())
    }

    /// Constructs an empty world, rejecting an invalid `config`.
    pub fn with_config(config: WorldConfig) -> Result<PhysicsWorld> {
        config.validate()?;
        Ok(PhysicsWorld::build(config))
    }

    fn build(config: WorldConfig) -> PhysicsWorld {
        let id = world_ids().next();
        debug!("created physics world {}", id);
        PhysicsWorld {
            id,
            config,
            bodies: Arena::new(id),
            colliders: Arena::new(id),
            commands: Commands::new(),
            broad_phase: Box::new(BruteForce),
            pairs: Vec::new(),
            contacts: Vec::new(),
            solvers: Vec::new(),
        }
    }

    /// Replaces the broad phase used to find candidate pairs.
    pub fn with_broad_phase<B: BroadPhase + 'static>(mut self, broad_phase: B) -> PhysicsWorld {
        self.broad_phase = Box::new(broad_phase);
        self
    }

    /// The id stamped into every handle this world issues.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[inline]
    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// A `dt` that is not a positive finite number skips the step entirely.
    pub fn step(&mut self, dt: f64) {
        if !(dt > 0.0 && dt.is_finite()) {
            warn!("skipping physics step with invalid dt {}", dt);
            return;
        }
        self.apply_commands();
        self.sweep_dead();
        self.pairs.clear();
        self.contacts.clear();
        self.solvers.clear();

        let gravity = self.config.gravity;
        for body in self.bodies.values_mut() {
            body.integrate_forces(dt, gravity);
            body.integrate_velocity(dt);
        }

        self.find_contacts();
        for index in 0..self.contacts.len() {
            let contact = self.contacts[index];
            self.dispatch(contact, dt);
        }

        for _ in 0..self.config.velocity_iterations {
            for solver in &self.solvers {
                solver.resolve_velocity(&mut self.bodies);
            }
        }
        for solver in &self.solvers {
            solver.correct_position(&mut self.bodies, self.config.slop, self.config.correction_percent);
        }

        self.apply_commands();
        trace!(
            "world {} stepped {}: {} bodies, {} colliders, {} pairs, {} contacts, {} solved",
            self.id,
            dt,
            self.bodies.len(),
            self.colliders.len(),
            self.pairs.len(),
            self.contacts.len(),
            self.solvers.len()
        );
    }

    fn find_contacts(&mut self) {
        let bodies = &self.bodies;
        let proxies: Vec<Proxy> = self
            .colliders
            .iter()
            .filter_map(|(handle, collider)| {
                let shape = collider.placed()?;
                let body = collider.body().filter(|&body| bodies.contains(body));
                let is_static = body.and_then(|body| bodies.get(body)).map_or(true, |body| body.is_static());
                Some(Proxy { handle, bounds: shape.bounding_box(), shape, body, is_static, collider })
            })
            .collect();

        let mut candidates = Vec::new();
        self.broad_phase.find_pairs(&proxies, &mut candidates);
        for (i, j) in candidates {
            let (a, b) = (&proxies[i], &proxies[j]);
            self.pairs.push((a.handle, b.handle));
            if let Some(manifold) = manifold::collide(&a.shape, &b.shape) {
                let is_trigger = a.collider.is_trigger || b.collider.is_trigger;
                self.contacts.push(Contact { a: a.handle, b: b.handle, manifold, is_trigger });
            }
        }
    }

    fn dispatch(&mut self, contact: Contact, dt: f64) {
        let Contact { a, b, manifold, is_trigger } = contact;
        if is_trigger {
            self.notify(a, b, manifold, true);
            self.notify(b, a, manifold.flip(), true);
            return;
        }

        let vetoed = [a, b]
            .iter()
            .any(|&handle| self.colliders.get(handle).map_or(false, |collider| collider.ignores_next_collision()));
        if vetoed {
            for &handle in &[a, b] {
                if let Some(collider) = self.colliders.get_mut(handle) {
                    collider.clear_ignore_next();
                }
            }
            debug!("ignored collision between {:?} and {:?}", a, b);
            return;
        }

        self.notify(a, b, manifold, false);
        self.notify(b, a, manifold.flip(), false);

        let (body_a, body_b, coefficients) = match (self.colliders.get(a), self.colliders.get(b)) {
            (Some(ca), Some(cb)) => {
                let combine = &self.config.combine;
                let coefficients = (
                    combine.restitution(&ca.material, &cb.material),
                    combine.static_friction(&ca.material, &cb.material),
                    combine.dynamic_friction(&ca.material, &cb.material),
                );
                (ca.body(), cb.body(), coefficients)
            }
            _ => return,
        };
        let solver =
            CollisionSolver::new(body_a, body_b, manifold, coefficients, &mut self.bodies, self.config.gravity, dt);
        self.solvers.push(solver);
    }

    fn notify(&mut self, this: ColliderHandle, other: ColliderHandle, manifold: Manifold, trigger: bool) {
        let mut listener = match self.colliders.get_mut(this).and_then(|collider| collider.take_listener()) {
            Some(listener) => listener,
            None => return,
        };
        {
            let mut ctx = CollisionContext { this, other, manifold, commands: &mut self.commands };
            if trigger {
                listener.on_trigger(&mut ctx);
            } else {
                listener.on_collision(&mut ctx);
            }
        }
        if let Some(collider) = self.colliders.get_mut(this) {
            collider.restore_listener(listener);
        }
    }

    fn apply_commands(&mut self) {
        for command in self.commands.take() {
            match command {
                Command::AddBody(body) => {
                    self.add_body(body);
                }
                Command::AddCollider(collider) => {
                    self.add_collider(collider);
                }
                Command::RemoveBody(handle) => {
                    self.remove_body(handle);
                }
                Command::RemoveCollider(handle) => {
                    self.remove_collider(handle);
                }
                Command::IgnoreNextCollision(handle) => {
                    if let Some(collider) = self.colliders.get_mut(handle) {
                        collider.ignore_next_collision();
                    }
                }
                Command::SetEnabled(handle, enabled) => {
                    if let Some(collider) = self.colliders.get_mut(handle) {
                        collider.enabled = enabled;
                    }
                }
            }
        }
    }

    fn sweep_dead(&mut self) {
        let dead_colliders: Vec<ColliderHandle> =
            self.colliders.iter().filter(|(_, collider)| !collider.is_alive()).map(|(handle, _)| handle).collect();
        for handle in dead_colliders {
            debug!("collider {:?} lost its transform", handle);
            self.remove_collider(handle);
        }
        let dead_bodies: Vec<BodyHandle> =
            self.bodies.iter().filter(|(_, body)| !body.is_alive()).map(|(handle, _)| handle).collect();
        for handle in dead_bodies {
            debug!("body {:?} lost its transform", handle);
            self.remove_body(handle);
        }
    }

    /// Registers `body` and returns its handle.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.bodies.insert(body);
        debug!("added body {:?}", handle);
        handle
    }

    /// Removes a body, returning it if it was registered. Colliders attached
    /// to it stay registered and become static.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let body = self.bodies.remove(handle)?;
        for collider in self.colliders.values_mut() {
            if collider.body() == Some(handle) {
                collider.set_body(None);
            }
        }
        debug!("removed body {:?}", handle);
        Some(body)
    }

    /// Registers `collider` and returns its handle.
    pub fn add_collider(&mut self, collider: Collider) -> ColliderHandle {
        if let Some(body) = collider.body() {
            if !self.bodies.contains(body) {
                warn!("collider references unregistered body {:?}, treating it as static", body);
            }
        }
        let handle = self.colliders.insert(collider);
        debug!("added collider {:?}", handle);
        handle
    }

    /// Removes a collider, returning it if it was registered.
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Option<Collider> {
        let collider = self.colliders.remove(handle)?;
        debug!("removed collider {:?}", handle);
        Some(collider)
    }

    /// Removes every body and collider. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.colliders.clear();
        self.commands.clear();
        self.pairs.clear();
        self.contacts.clear();
        self.solvers.clear();
        debug!("cleared physics world {}", self.id);
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    pub fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle)
    }

    /// Iterates over registered bodies in the order they were added.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter()
    }

    /// Iterates over registered colliders in the order they were added.
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders.iter()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Sets or clears the listener of a collider. Returns false if the
    /// handle is unknown.
    pub fn set_listener(&mut self, handle: ColliderHandle, listener: Option<Box<dyn CollisionListener>>) -> bool {
        match self.colliders.get_mut(handle) {
            Some(collider) => {
                collider.set_listener(listener);
                true
            }
            None => false,
        }
    }

    /// Returns true if the collider is static: it has no registered body or
    /// its body has infinite mass. Unknown handles count as static.
    pub fn is_static(&self, handle: ColliderHandle) -> bool {
        self.colliders
            .get(handle)
            .and_then(|collider| collider.body())
            .and_then(|body| self.bodies.get(body))
            .map_or(true, |body| body.is_static())
    }

    /// Casts `ray` against every enabled collider and returns the nearest
    /// hit. A `max_distance` of zero or less means unlimited.
    pub fn raycast(&self, ray: &Ray, max_distance: f64) -> Option<(ColliderHandle, RayHit)> {
        self.colliders
            .iter()
            .filter(|(_, collider)| collider.enabled)
            .filter_map(|(handle, collider)| collider.raycast(ray, max_distance).map(|hit| (handle, hit)))
            .min_by_key(|(_, hit)| key(hit.distance))
    }

    /// Returns every enabled collider containing `point`, in insertion order.
    pub fn colliders_containing(&self, point: Vec2) -> Vec<ColliderHandle> {
        self.colliders
            .iter()
            .filter(|(_, collider)| collider.enabled && collider.contains(point))
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Candidate pairs reported by the broad phase during the last step.
    pub fn pairs(&self) -> &[(ColliderHandle, ColliderHandle)] {
        &self.pairs
    }

    /// Touching pairs found during the last step, triggers included.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Number of contacts resolved during the last step.
    pub fn solved_count(&self) -> usize {
        self.solvers.len()
    }

    /// Commands waiting to be applied at the start of the next step.
    pub fn commands_mut(&mut self) -> &mut Commands {
        &mut self.commands
    }
}

impl Default for PhysicsWorld {
    fn default() -> PhysicsWorld {
        PhysicsWorld::new()
    }
}
