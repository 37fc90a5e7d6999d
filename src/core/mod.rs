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

mod arena;
mod body;
mod broad_phase;
mod collider;
mod commands;
mod config;
mod ids;
mod material;
mod solver;
mod world;

pub use self::arena::{BodyHandle, ColliderHandle};
pub use self::body::RigidBody;
pub use self::broad_phase::{BroadPhase, BruteForce, Proxy};
pub use self::collider::Collider;
pub use self::commands::{CollisionContext, CollisionListener, Commands};
pub use self::config::WorldConfig;
pub use self::ids::{world_ids, IdCounter};
pub use self::material::{CombinePolicy, CombineRule, Material};
pub use self::solver::Contact;
pub use self::world::PhysicsWorld;
