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

//! Module containing geometry primitives.

mod aabb;
mod card;
mod ray;
mod shape;
mod transform;
mod vec;

pub use self::aabb::*;
pub use self::card::*;
pub use self::ray::{Ray, RayHit};
pub use self::shape::*;
pub use self::transform::*;
pub use self::vec::*;

pub(crate) use self::ray::pick_hit_distance;
pub(crate) use self::shape::nearest_on_segment;
