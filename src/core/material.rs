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

use crate::error::{PhysicsError, Result};

/// Surface and bulk properties of a collider.
#[derive(PartialEq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    density: f64,
    static_friction: f64,
    dynamic_friction: f64,
    restitution: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material { density: 1.0, static_friction: 0.5, dynamic_friction: 0.3, restitution: 0.25 }
    }
}

impl Material {
    /// Constructs a material. Density must be positive, frictions
    /// non-negative, and restitution within `[0, 1]`.
    pub fn new(density: f64, static_friction: f64, dynamic_friction: f64, restitution: f64) -> Result<Material> {
        if !(density > 0.0 && density.is_finite()) {
            return Err(PhysicsError::InvalidMaterial(format!("density must be positive, got {}", density)));
        }
        if !(static_friction >= 0.0 && static_friction.is_finite())
            || !(dynamic_friction >= 0.0 && dynamic_friction.is_finite())
        {
            return Err(PhysicsError::InvalidMaterial(format!(
                "friction must be non-negative, got {} / {}",
                static_friction, dynamic_friction
            )));
        }
        if !(0.0..=1.0).contains(&restitution) {
            return Err(PhysicsError::InvalidMaterial(format!(
                "restitution must be within [0, 1], got {}",
                restitution
            )));
        }
        Ok(Material { density, static_friction, dynamic_friction, restitution })
    }

    /// Mass per unit area.
    #[inline]
    pub fn density(&self) -> f64 {
        self.density
    }

    #[inline]
    pub fn static_friction(&self) -> f64 {
        self.static_friction
    }

    #[inline]
    pub fn dynamic_friction(&self) -> f64 {
        self.dynamic_friction
    }

    /// Bounciness, from 0 (none) to 1 (perfectly elastic).
    #[inline]
    pub fn restitution(&self) -> f64 {
        self.restitution
    }
}

/// How a material property from each side of a contact becomes one value.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombineRule {
    Max,
    Min,
    Average,
    Multiply,
    /// `sqrt(a * b)`.
    GeometricMean,
}

impl CombineRule {
    pub fn combine(self, a: f64, b: f64) -> f64 {
        match self {
            CombineRule::Max => a.max(b),
            CombineRule::Min => a.min(b),
            CombineRule::Average => (a + b) * 0.5,
            CombineRule::Multiply => a * b,
            CombineRule::GeometricMean => (a * b).sqrt(),
        }
    }
}

/// The rules used for restitution and friction when two materials meet.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinePolicy {
    pub restitution: CombineRule,
    pub friction: CombineRule,
}

impl Default for CombinePolicy {
    fn default() -> CombinePolicy {
        CombinePolicy { restitution: CombineRule::Max, friction: CombineRule::GeometricMean }
    }
}

impl CombinePolicy {
    pub fn restitution(&self, a: &Material, b: &Material) -> f64 {
        self.restitution.combine(a.restitution, b.restitution)
    }

    pub fn static_friction(&self, a: &Material, b: &Material) -> f64 {
        self.friction.combine(a.static_friction, b.static_friction)
    }

    pub fn dynamic_friction(&self, a: &Material, b: &Material) -> f64 {
        self.friction.combine(a.dynamic_friction, b.dynamic_friction)
    }
}
