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

use crate::core::{BodyHandle, Collider, ColliderHandle};
use crate::geom::{Aabb, PlacedShape};

/// A collider as seen by the broad phase during one step.
///
/// The world shape and its bounding box are computed once per step, so
/// broad and narrow phase work from the same snapshot.
#[derive(Debug)]
pub struct Proxy<'a> {
    pub handle: ColliderHandle,
    pub bounds: Aabb,
    pub shape: PlacedShape,
    /// The body this collider belongs to, if that body is registered.
    pub body: Option<BodyHandle>,
    pub is_static: bool,
    pub collider: &'a Collider,
}

impl<'a> Proxy<'a> {
    /// Returns true if the two colliders are allowed to interact at all,
    /// regardless of where they are.
    pub fn can_pair(&self, other: &Proxy) -> bool {
        if self.is_static && other.is_static {
            return false;
        }
        if !self.collider.enabled || !other.collider.enabled {
            return false;
        }
        if self.body.is_some() && self.body == other.body {
            return false;
        }
        !self.collider.excludes(other.collider) && !other.collider.excludes(self.collider)
    }
}

/// Finds the pairs of colliders that may be touching.
///
/// Implementations must only report pairs that pass `Proxy::can_pair` and
/// whose bounds overlap, each pair once, as indices into `proxies` with the
/// lower index first.
pub trait BroadPhase {
    fn find_pairs(&mut self, proxies: &[Proxy], pairs: &mut Vec<(usize, usize)>);
}

/// Tests every pair of proxies. Pairs come out in proxy order.
#[derive(Copy, Clone, Default, Debug)]
pub struct BruteForce;

impl BroadPhase for BruteForce {
    fn find_pairs(&mut self, proxies: &[Proxy], pairs: &mut Vec<(usize, usize)>) {
        for (i, a) in proxies.iter().enumerate() {
            for (j, b) in proxies.iter().enumerate().skip(i + 1) {
                if a.bounds.overlaps(&b.bounds) && a.can_pair(b) {
                    pairs.push((i, j));
                }
            }
        }
    }
}
