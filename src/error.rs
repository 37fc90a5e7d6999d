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

//! Error type returned by fallible constructors.

/// Shorthand for results carrying a `PhysicsError`.
pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Reasons a shape, body, material or world configuration may be rejected.
#[derive(PartialEq, Clone, Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("circle radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    #[error("box extents must be positive and finite, got ({0}, {1})")]
    InvalidDimensions(f64, f64),
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("polygon must be convex with non-zero area")]
    NonConvexPolygon,
    #[error("edge endpoints must be distinct and finite")]
    DegenerateEdge,
    #[error("mass must be non-negative, got {0}")]
    InvalidMass(f64),
    #[error("invalid material: {0}")]
    InvalidMaterial(String),
    #[error("invalid world configuration: {0}")]
    InvalidConfig(String),
}
