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

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing counter that hands out unique ids.
#[derive(Debug)]
pub struct IdCounter {
    next: AtomicU64,
}

impl IdCounter {
    pub const fn new() -> IdCounter {
        IdCounter { next: AtomicU64::new(0) }
    }

    /// Returns a fresh id.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Restarts the counter at zero.
    pub fn reset(&self) {
        self.next.store(0, Ordering::Relaxed);
    }
}

impl Default for IdCounter {
    fn default() -> IdCounter {
        IdCounter::new()
    }
}

static WORLD_IDS: IdCounter = IdCounter::new();

/// The process-wide counter that stamps each `PhysicsWorld` with its id.
///
/// Handles carry the id of the world that issued them, so a handle from one
/// world is never mistaken for a slot in another. Resetting is intended for
/// test isolation only.
pub fn world_ids() -> &'static IdCounter {
    &WORLD_IDS
}
