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

/// Holds either one or two values, used for contact points.
#[derive(PartialEq, Copy, Clone, Debug)]
pub enum OneOrTwo<T> {
    /// A single value.
    One(T),
    /// Two values.
    Two(T, T),
}

impl<T: Copy> OneOrTwo<T> {
    /// Returns the number of values held.
    pub fn len(&self) -> usize {
        match *self {
            OneOrTwo::One(_) => 1,
            OneOrTwo::Two(_, _) => 2,
        }
    }

    /// Returns the first value.
    pub fn first(&self) -> T {
        match *self {
            OneOrTwo::One(a) | OneOrTwo::Two(a, _) => a,
        }
    }

    /// Returns an iterator over the held values.
    pub fn iter(&self) -> Iter<T> {
        Iter { values: *self, index: 0 }
    }

    /// Applies `f` to every held value.
    pub fn map<U, F: Fn(T) -> U>(self, f: F) -> OneOrTwo<U> {
        match self {
            OneOrTwo::One(a) => OneOrTwo::One(f(a)),
            OneOrTwo::Two(a, b) => OneOrTwo::Two(f(a), f(b)),
        }
    }
}

pub struct Iter<T> {
    values: OneOrTwo<T>,
    index: usize,
}

impl<T: Copy> Iterator for Iter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        let result = match (self.values, self.index) {
            (OneOrTwo::One(a), 0) | (OneOrTwo::Two(a, _), 0) => Some(a),
            (OneOrTwo::Two(_, b), 1) => Some(b),
            _ => None,
        };
        self.index += 1;
        result
    }
}
