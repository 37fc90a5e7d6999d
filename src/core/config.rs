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

use crate::core::CombinePolicy;
use crate::error::{PhysicsError, Result};
use crate::geom::{v2, Vec2};

/// Tuning parameters for a `PhysicsWorld`.
#[derive(PartialEq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    /// Acceleration applied to bodies that follow gravity.
    pub gravity: Vec2,
    /// Number of impulse passes over all contacts per step.
    pub velocity_iterations: u32,
    /// Penetration left uncorrected, to keep resting contacts from jittering.
    pub slop: f64,
    /// Fraction of the remaining penetration corrected each step.
    pub correction_percent: f64,
    /// How materials combine at a contact.
    pub combine: CombinePolicy,
}

impl Default for WorldConfig {
    fn default() -> WorldConfig {
        WorldConfig {
            gravity: v2(0.0, -9.8),
            velocity_iterations: 8,
            slop: 0.05,
            correction_percent: 0.4,
            combine: CombinePolicy::default(),
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig(format!("gravity must be finite, got {:?}", self.gravity)));
        }
        if self.velocity_iterations == 0 {
            return Err(PhysicsError::InvalidConfig("velocity_iterations must be at least 1".to_string()));
        }
        if !(self.slop >= 0.0 && self.slop.is_finite()) {
            return Err(PhysicsError::InvalidConfig(format!("slop must be non-negative, got {}", self.slop)));
        }
        if !(self.correction_percent > 0.0 && self.correction_percent <= 1.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "correction_percent must be within (0, 1], got {}",
                self.correction_percent
            )));
        }
        Ok(())
    }
}
