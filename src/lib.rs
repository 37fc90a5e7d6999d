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

//! Impulse2d is a library for discrete 2D rigid-body simulation for games.
//!
//! Bodies and colliders are registered in a `PhysicsWorld` and refer to
//! transforms owned by the caller's entities. Each call to
//! `PhysicsWorld::step` integrates motion, finds touching colliders,
//! reports them to listeners, and resolves the collisions with impulses.
//!
//! Supported shapes are circles, axis-aligned rectangles, oriented boxes,
//! convex polygons, and edges (see `geom::Shape`).
//!
//! Logging goes through the `log` facade; no logger is installed here.

pub mod error;
mod float;
pub mod geom;
pub mod manifold;
mod util;
mod core;

pub use crate::core::*;
pub use crate::util::OneOrTwo;
