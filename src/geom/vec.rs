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

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 2-D vector, used for positions, directions and velocities.
#[derive(PartialEq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

/// Shorthand for `Vec2::new(x, y)`.
#[inline]
pub fn v2(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

impl Vec2 {
    /// Constructs a new vector.
    #[inline]
    pub fn new(x: f64, y: f64) -> Vec2 {
        Vec2 { x, y }
    }

    /// The zero vector.
    #[inline]
    pub fn zero() -> Vec2 {
        Vec2::default()
    }

    /// Returns the squared length of the vector.
    pub fn len_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Returns the length of the vector.
    pub fn len(&self) -> f64 {
        self.len_sq().sqrt()
    }

    /// Returns a unit vector with the same direction, or the zero vector if
    /// the length is zero.
    pub fn normalize(&self) -> Vec2 {
        let len = self.len();
        if len == 0.0 {
            Vec2::zero()
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }

    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the 3-D cross product.
    pub fn cross(&self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Rotates the vector a quarter turn counter-clockwise.
    pub fn perp(&self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    /// Rotates the vector counter-clockwise by `angle` radians.
    pub fn rotate(&self, angle: f64) -> Vec2 {
        if angle == 0.0 {
            return *self;
        }
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Component-wise product.
    pub fn scale(&self, factor: Vec2) -> Vec2 {
        Vec2::new(self.x * factor.x, self.y * factor.y)
    }

    pub fn abs(&self) -> Vec2 {
        Vec2::new(self.x.abs(), self.y.abs())
    }

    pub fn min(&self, other: Vec2) -> Vec2 {
        Vec2::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(&self, other: Vec2) -> Vec2 {
        Vec2::new(self.x.max(other.x), self.y.max(other.y))
    }

    pub fn dist_sq(&self, other: Vec2) -> f64 {
        (*self - other).len_sq()
    }

    pub fn dist(&self, other: Vec2) -> f64 {
        (*self - other).len()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Cross product of a scalar (z axis) with a vector.
pub fn cross_scalar(s: f64, v: Vec2) -> Vec2 {
    Vec2::new(-s * v.y, s * v.x)
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for Vec2 {
    type Output = f64;
    fn mul(self, rhs: Vec2) -> f64 {
        self.dot(rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        *self = *self - rhs;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// A unit direction paired with a length, used for contact normals where the
/// length is the penetration depth.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct DirVec2 {
    dir: Vec2,
    len: f64,
}

impl DirVec2 {
    /// Constructs a new `DirVec2`, normalizing `dir`.
    pub fn new(dir: Vec2, len: f64) -> DirVec2 {
        DirVec2 { dir: dir.normalize(), len }
    }

    /// The direction, a unit vector (or zero if constructed from zero).
    #[inline]
    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    #[inline]
    pub fn len(&self) -> f64 {
        self.len
    }

    pub fn flip(&self) -> DirVec2 {
        DirVec2 { dir: -self.dir, len: self.len }
    }
}

impl From<DirVec2> for Vec2 {
    fn from(dir_vec: DirVec2) -> Vec2 {
        dir_vec.dir * dir_vec.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Vec2::zero().normalize(), Vec2::zero());
        assert_eq!(v2(3.0, 4.0).normalize(), v2(0.6, 0.8));
    }

    #[test]
    fn test_rotate() {
        let rotated = v2(1.0, 0.0).rotate(PI * 0.5);
        assert!(rotated.dist(v2(0.0, 1.0)) < 1e-12);
    }

    #[test]
    fn test_cross() {
        assert_eq!(v2(1.0, 0.0).cross(v2(0.0, 1.0)), 1.0);
        assert_eq!(cross_scalar(2.0, v2(1.0, 0.0)), v2(0.0, 2.0));
        assert_eq!(v2(1.0, 2.0).perp(), v2(-2.0, 1.0));
    }

    #[test]
    fn test_dir_vec() {
        let normal = DirVec2::new(v2(0.0, -5.0), 2.0);
        assert_eq!(normal.dir(), v2(0.0, -1.0));
        assert_eq!(Vec2::from(normal.flip()), v2(0.0, 2.0));
    }
}
