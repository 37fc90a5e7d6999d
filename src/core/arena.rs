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

use std::fmt;
use std::marker::PhantomData;

// Slot storage with stable, generation-checked handles. Iteration follows
// insertion order so that stepping a world is deterministic.

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Debug)]
pub(crate) struct RawHandle {
    world: u64,
    index: u32,
    generation: u32,
}

pub(crate) trait Handle: Copy {
    fn from_raw(raw: RawHandle) -> Self;
    fn raw(self) -> RawHandle;
}

macro_rules! handle_type {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
        pub struct $name(RawHandle);

        impl Handle for $name {
            fn from_raw(raw: RawHandle) -> $name {
                $name(raw)
            }

            fn raw(self) -> RawHandle {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}({}v{}@{})", stringify!($name), self.0.index, self.0.generation, self.0.world)
            }
        }
    };
}

handle_type!(
    /// Stable identifier of a `RigidBody` registered in a `PhysicsWorld`.
    BodyHandle
);

handle_type!(
    /// Stable identifier of a `Collider` registered in a `PhysicsWorld`.
    ColliderHandle
);

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

pub(crate) struct Arena<H: Handle, T> {
    world: u64,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    order: Vec<u32>,
    marker: PhantomData<H>,
}

impl<H: Handle, T> Arena<H, T> {
    pub fn new(world: u64) -> Arena<H, T> {
        Arena { world, slots: Vec::new(), free: Vec::new(), order: Vec::new(), marker: PhantomData }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn insert(&mut self, value: T) -> H {
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].value = Some(value);
                index
            }
            None => {
                self.slots.push(Slot { generation: 0, value: Some(value) });
                (self.slots.len() - 1) as u32
            }
        };
        self.order.push(index);
        H::from_raw(RawHandle { world: self.world, index, generation: self.slots[index as usize].generation })
    }

    fn slot_index(&self, handle: H) -> Option<usize> {
        let raw = handle.raw();
        let slot = self.slots.get(raw.index as usize)?;
        if raw.world == self.world && slot.generation == raw.generation && slot.value.is_some() {
            Some(raw.index as usize)
        } else {
            None
        }
    }

    pub fn contains(&self, handle: H) -> bool {
        self.slot_index(handle).is_some()
    }

    /// Removes the value, returning `None` for stale or foreign handles.
    pub fn remove(&mut self, handle: H) -> Option<T> {
        let index = self.slot_index(handle)?;
        let slot = &mut self.slots[index];
        let value = slot.value.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index as u32);
        self.order.retain(|&i| i as usize != index);
        value
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        let index = self.slot_index(handle)?;
        self.slots[index].value.as_ref()
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        let index = self.slot_index(handle)?;
        self.slots[index].value.as_mut()
    }

    /// Borrows two values mutably at once. Missing handles yield `None`; if
    /// both handles name the same value only the first side is borrowed.
    pub fn pair_mut(&mut self, a: Option<H>, b: Option<H>) -> (Option<&mut T>, Option<&mut T>) {
        let a = a.and_then(|h| self.slot_index(h));
        let b = b.and_then(|h| self.slot_index(h));
        match (a, b) {
            (Some(a), Some(b)) if a == b => (self.slots[a].value.as_mut(), None),
            (Some(a), Some(b)) => {
                let (low, high, swapped) = if a < b { (a, b, false) } else { (b, a, true) };
                let (head, tail) = self.slots.split_at_mut(high);
                let (first, second) = (head[low].value.as_mut(), tail[0].value.as_mut());
                if swapped {
                    (second, first)
                } else {
                    (first, second)
                }
            }
            (Some(a), None) => (self.slots[a].value.as_mut(), None),
            (None, Some(b)) => (None, self.slots[b].value.as_mut()),
            (None, None) => (None, None),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> {
        let world = self.world;
        let slots = &self.slots;
        self.order.iter().filter_map(move |&index| {
            let slot = &slots[index as usize];
            let handle = H::from_raw(RawHandle { world, index, generation: slot.generation });
            slot.value.as_ref().map(|value| (handle, value))
        })
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        let mut refs: Vec<Option<&mut T>> = self.slots.iter_mut().map(|slot| slot.value.as_mut()).collect();
        let order = self.order.clone();
        order.into_iter().filter_map(move |index| refs[index as usize].take())
    }

    pub fn clear(&mut self) {
        for index in self.order.drain(..) {
            let slot = &mut self.slots[index as usize];
            slot.value = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_handles() {
        let mut arena: Arena<BodyHandle, &str> = Arena::new(7);
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.remove(a), None);
        let c = arena.insert("c");
        assert_ne!(a, c);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(c), Some(&"c"));
        assert_eq!(arena.iter().map(|(_, &v)| v).collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(arena.iter().map(|(handle, _)| handle).collect::<Vec<_>>(), vec![b, c]);
    }

    #[test]
    fn test_foreign_world_handle() {
        let mut first: Arena<ColliderHandle, u32> = Arena::new(1);
        let mut second: Arena<ColliderHandle, u32> = Arena::new(2);
        let handle = first.insert(5);
        second.insert(6);
        assert_eq!(second.get(handle), None);
        assert_eq!(second.remove(handle), None);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_pair_mut() {
        let mut arena: Arena<BodyHandle, u32> = Arena::new(0);
        let a = arena.insert(1);
        let b = arena.insert(2);
        {
            let (x, y) = arena.pair_mut(Some(b), Some(a));
            *x.unwrap() += 10;
            *y.unwrap() += 20;
        }
        assert_eq!(arena.get(a), Some(&21));
        assert_eq!(arena.get(b), Some(&12));
        for value in arena.values_mut() {
            *value = 0;
        }
        assert_eq!(arena.get(a), Some(&0));
    }
}
