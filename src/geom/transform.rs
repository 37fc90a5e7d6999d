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

use crate::geom::{v2, Vec2};
use std::cell::RefCell;
use std::rc::Rc;

/// A shared handle to a `Transform`, owned by whatever entity the transform
/// belongs to.
///
/// Bodies and colliders only ever keep a `Weak` reference to it, so dropping
/// the last `TransformRef` detaches them from the world.
pub type TransformRef = Rc<RefCell<Transform>>;

/// Placement of an entity in world space.
#[derive(PartialEq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    /// World position of the entity's local origin.
    pub position: Vec2,
    /// Counter-clockwise rotation in radians.
    pub rotation: f64,
    /// Per-axis scale factor.
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Transform {
        Transform { position: Vec2::zero(), rotation: 0.0, scale: v2(1.0, 1.0) }
    }
}

impl Transform {
    /// Constructs an unrotated, unscaled transform at `position`.
    pub fn new(position: Vec2) -> Transform {
        Transform { position, ..Transform::default() }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Transform {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Transform {
        self.scale = scale;
        self
    }

    /// Wraps the transform in a shareable handle.
    pub fn shared(self) -> TransformRef {
        Rc::new(RefCell::new(self))
    }

    pub fn move_by(&mut self, displacement: Vec2) {
        self.position += displacement;
    }

    pub fn rotate_by(&mut self, angle: f64) {
        self.rotation += angle;
    }

    /// Converts a point from local space (relative to the entity origin) into
    /// world space: scale, then rotate, then translate.
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        self.position + local.scale(self.scale).rotate(self.rotation)
    }

    /// Inverse of `to_world`. Axes with a zero scale map to zero.
    pub fn to_local(&self, world: Vec2) -> Vec2 {
        let unrotated = (world - self.position).rotate(-self.rotation);
        v2(safe_div(unrotated.x, self.scale.x), safe_div(unrotated.y, self.scale.y))
    }

    /// Converts a direction from local space into world space, ignoring
    /// position and scale.
    pub fn dir_to_world(&self, local: Vec2) -> Vec2 {
        local.rotate(self.rotation)
    }
}

fn safe_div(num: f64, denom: f64) -> f64 {
    if denom == 0.0 {
        0.0
    } else {
        num / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_world_local_round_trip() {
        let transform = Transform::new(v2(3.0, -2.0)).with_rotation(PI / 3.0).with_scale(v2(2.0, 0.5));
        let local = v2(1.5, -4.0);
        let back = transform.to_local(transform.to_world(local));
        assert!(back.dist(local) < 1e-12);
    }

    #[test]
    fn test_to_world_order() {
        let transform = Transform::new(v2(1.0, 1.0)).with_rotation(PI / 2.0).with_scale(v2(2.0, 2.0));
        assert!(transform.to_world(v2(1.0, 0.0)).dist(v2(1.0, 3.0)) < 1e-12);
    }
}
