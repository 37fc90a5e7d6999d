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

use crate::core::{BodyHandle, Collider, ColliderHandle, RigidBody};
use crate::manifold::Manifold;
use std::mem;

/// Receives collision and trigger notifications for a `Collider`.
///
/// Both methods default to doing nothing. They are invoked synchronously
/// while the world is stepping, so they cannot touch the world directly;
/// changes go through `CollisionContext::commands` and take effect once the
/// step completes.
pub trait CollisionListener {
    /// Called when this collider touches a non-trigger collider and neither
    /// side has vetoed the collision.
    fn on_collision(&mut self, _ctx: &mut CollisionContext) {}

    /// Called when this collider touches another collider and at least one of
    /// the two is a trigger.
    fn on_trigger(&mut self, _ctx: &mut CollisionContext) {}
}

/// What a `CollisionListener` is told about a contact.
#[derive(Debug)]
pub struct CollisionContext<'a> {
    /// The collider owning the listener.
    pub this: ColliderHandle,
    /// The collider it touched.
    pub other: ColliderHandle,
    /// Contact geometry, with the normal pointing from `this` to `other`.
    pub manifold: Manifold,
    /// Changes to apply once the current step completes.
    pub commands: &'a mut Commands,
}

#[derive(Debug)]
pub(crate) enum Command {
    AddBody(RigidBody),
    AddCollider(Collider),
    RemoveBody(BodyHandle),
    RemoveCollider(ColliderHandle),
    IgnoreNextCollision(ColliderHandle),
    SetEnabled(ColliderHandle, bool),
}

/// A queue of world changes requested while the world is stepping.
///
/// Commands are applied in the order they were queued. Deferred additions
/// do not hand back a handle; register entities outside of callbacks when
/// the handle is needed right away.
#[derive(Default, Debug)]
pub struct Commands {
    queue: Vec<Command>,
}

impl Commands {
    pub fn new() -> Commands {
        Commands { queue: Vec::new() }
    }

    pub fn add_body(&mut self, body: RigidBody) {
        self.queue.push(Command::AddBody(body));
    }

    pub fn add_collider(&mut self, collider: Collider) {
        self.queue.push(Command::AddCollider(collider));
    }

    pub fn remove_body(&mut self, handle: BodyHandle) {
        self.queue.push(Command::RemoveBody(handle));
    }

    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.queue.push(Command::RemoveCollider(handle));
    }

    /// Queues a veto on `handle`. See
    /// `Collider::ignore_next_collision`: only the first collision of that
    /// collider is skipped, whatever the other collider is.
    pub fn ignore_next_collision(&mut self, handle: ColliderHandle) {
        self.queue.push(Command::IgnoreNextCollision(handle));
    }

    pub fn set_enabled(&mut self, handle: ColliderHandle, enabled: bool) {
        self.queue.push(Command::SetEnabled(handle, enabled));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.queue.clear();
    }

    pub(crate) fn take(&mut self) -> Vec<Command> {
        mem::replace(&mut self.queue, Vec::new())
    }
}
