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

use noisy_float::prelude::*;

// Tolerance used for boundary-inclusive geometric tests.
pub const EPSILON: f64 = 1e-9;

pub fn approx_zero(val: f64) -> bool {
    val.abs() <= EPSILON
}

// Orders finite floats for min_by_key/max_by_key; panics on NaN like the rest
// of the crate's ordering helpers.
pub fn key(val: f64) -> N64 {
    n64(val)
}

// Prefers `a` unless `b` is meaningfully better, which keeps reference face
// selection from flip-flopping between nearly equal axes.
pub fn bias_greater_than(a: f64, b: f64) -> bool {
    a >= b - (0.05 * a.abs().max(b.abs()) + 1e-6)
}

// Returns both roots of a*t^2 + b*t + c in ascending order, using the form
// that stays accurate when `a` is near zero.
pub fn quad_roots(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    if a == 0.0 {
        return if b == 0.0 { None } else { Some((-c / b, -c / b)) };
    }
    let determinant = b * b - 4.0 * a * c;
    if determinant < 0.0 {
        return None;
    }
    let q = -0.5 * (b + b.signum() * determinant.sqrt());
    if q == 0.0 {
        return Some((0.0, 0.0));
    }
    let (r1, r2) = (q / a, c / q);
    Some((r1.min(r2), r1.max(r2)))
}
