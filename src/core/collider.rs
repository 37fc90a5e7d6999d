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

use crate::core::{BodyHandle, CollisionListener, Material};
use crate::geom::{Aabb, PlacedShape, Ray, RayHit, Shape, Transform, TransformRef, Vec2};
use fnv::FnvHashSet;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A collision shape attached to an entity's transform.
///
/// A `Collider` with no body, or whose body has infinite mass, is static: it
/// stops other bodies but never moves in response to contacts. Trigger
/// colliders report overlaps to listeners but are never resolved.
///
/// Tags allow coarse filtering: two colliders never pair if either one
/// ignores a tag the other carries.
pub struct Collider {
    shape: Shape,
    transform: Weak<RefCell<Transform>>,
    /// Surface properties used when resolving contacts.
    pub material: Material,
    body: Option<BodyHandle>,
    /// Trigger colliders only notify listeners and are never solved.
    pub is_trigger: bool,
    /// Disabled colliders are skipped by the broad phase.
    pub enabled: bool,
    tags: FnvHashSet<String>,
    ignored_tags: FnvHashSet<String>,
    ignore_next: bool,
    listener: Option<Box<dyn CollisionListener>>,
}

impl Collider {
    /// Constructs an enabled, non-trigger collider with the default material
    /// and no body.
    pub fn new(shape: Shape, transform: &TransformRef) -> Collider {
        Collider {
            shape,
            transform: Rc::downgrade(transform),
            material: Material::default(),
            body: None,
            is_trigger: false,
            enabled: true,
            tags: FnvHashSet::default(),
            ignored_tags: FnvHashSet::default(),
            ignore_next: false,
            listener: None,
        }
    }

    pub fn with_material(mut self, material: Material) -> Collider {
        self.material = material;
        self
    }

    /// Attaches the collider to `body`, whose motion it then follows and whose
    /// mass it uses in contacts.
    pub fn with_body(mut self, body: BodyHandle) -> Collider {
        self.body = Some(body);
        self
    }

    pub fn as_trigger(mut self, is_trigger: bool) -> Collider {
        self.is_trigger = is_trigger;
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Collider {
        self.add_tag(tag);
        self
    }

    pub fn ignoring_tag(mut self, tag: &str) -> Collider {
        self.ignore_tag(tag);
        self
    }

    pub fn with_listener<L: CollisionListener + 'static>(mut self, listener: L) -> Collider {
        self.listener = Some(Box::new(listener));
        self
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    pub fn set_body(&mut self, body: Option<BodyHandle>) {
        self.body = body;
    }

    /// Returns the transform handle, or `None` once its owner has dropped it.
    pub fn transform(&self) -> Option<TransformRef> {
        self.transform.upgrade()
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.transform.strong_count() > 0
    }

    /// The shape resolved into world space, or `None` once the transform is
    /// gone.
    pub fn placed(&self) -> Option<PlacedShape> {
        self.transform.upgrade().map(|transform| self.shape.place(&transform.borrow()))
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        self.placed().map(|shape| shape.bounding_box())
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.placed().map_or(false, |shape| shape.contains(point))
    }

    pub fn nearest_point(&self, point: Vec2) -> Option<Vec2> {
        self.placed().map(|shape| shape.nearest_point(point))
    }

    pub fn raycast(&self, ray: &Ray, max_distance: f64) -> Option<RayHit> {
        self.placed()?.raycast(ray, max_distance)
    }

    /// World-space vertices. Empty for circles and detached colliders.
    pub fn vertices(&self) -> Vec<Vec2> {
        self.placed().map_or_else(Vec::new, |shape| shape.vertices())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.as_str())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn add_tag(&mut self, tag: &str) {
        self.tags.insert(tag.to_string());
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Stops this collider from pairing with any collider tagged `tag`.
    pub fn ignore_tag(&mut self, tag: &str) {
        self.ignored_tags.insert(tag.to_string());
    }

    pub fn unignore_tag(&mut self, tag: &str) -> bool {
        self.ignored_tags.remove(tag)
    }

    /// Returns true if `other` carries a tag this collider ignores.
    pub fn excludes(&self, other: &Collider) -> bool {
        other.tags.iter().any(|tag| self.ignored_tags.contains(tag))
    }

    /// Vetoes the next non-trigger collision of this collider.
    ///
    /// The veto belongs to the collider, not to a pair. It skips whichever
    /// of this collider's collisions is dispatched first, in the order the
    /// broad phase reports pairs, and is then spent. Any other collision of this
    /// collider in the same step is resolved as usual. A skipped collision
    /// also spends a veto held by the other side.
    pub fn ignore_next_collision(&mut self) {
        self.ignore_next = true;
    }

    #[inline]
    pub fn ignores_next_collision(&self) -> bool {
        self.ignore_next
    }

    pub(crate) fn clear_ignore_next(&mut self) {
        self.ignore_next = false;
    }

    pub fn set_listener(&mut self, listener: Option<Box<dyn CollisionListener>>) {
        self.listener = listener;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    pub(crate) fn take_listener(&mut self) -> Option<Box<dyn CollisionListener>> {
        self.listener.take()
    }

    pub(crate) fn restore_listener(&mut self, listener: Box<dyn CollisionListener>) {
        if self.listener.is_none() {
            self.listener = Some(listener);
        }
    }
}

impl fmt::Debug for Collider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Collider")
            .field("shape", &self.shape)
            .field("material", &self.material)
            .field("body", &self.body)
            .field("is_trigger", &self.is_trigger)
            .field("enabled", &self.enabled)
            .field("tags", &self.tags)
            .field("ignored_tags", &self.ignored_tags)
            .field("ignore_next", &self.ignore_next)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::v2;

    #[test]
    fn test_queries_follow_transform() {
        let transform = Transform::new(v2(5.0, 0.0)).shared();
        let collider = Collider::new(Shape::circle(1.0), &transform);
        assert!(collider.contains(v2(5.5, 0.0)));
        transform.borrow_mut().position = v2(0.0, 0.0);
        assert!(!collider.contains(v2(5.5, 0.0)));
        assert_eq!(collider.nearest_point(v2(3.0, 0.0)), Some(v2(1.0, 0.0)));
        assert!(collider.vertices().is_empty());
    }

    #[test]
    fn test_detached_collider() {
        let transform = Transform::default().shared();
        let collider = Collider::new(Shape::square(2.0), &transform);
        assert_eq!(collider.vertices().len(), 4);
        drop(transform);
        assert!(!collider.is_alive());
        assert_eq!(collider.placed(), None);
        assert_eq!(collider.bounding_box(), None);
        assert!(!collider.contains(Vec2::zero()));
        assert!(collider.vertices().is_empty());
    }

    #[test]
    fn test_tag_exclusion() {
        let transform = Transform::default().shared();
        let player = Collider::new(Shape::circle(1.0), &transform).with_tag("player");
        let ghost = Collider::new(Shape::circle(1.0), &transform).ignoring_tag("player");
        assert!(ghost.excludes(&player));
        assert!(!player.excludes(&ghost));

        let mut ghost = ghost;
        assert!(ghost.unignore_tag("player"));
        assert!(!ghost.excludes(&player));
    }

    #[test]
    fn test_ignore_next() {
        let transform = Transform::default().shared();
        let mut collider = Collider::new(Shape::circle(1.0), &transform);
        assert!(!collider.ignores_next_collision());
        collider.ignore_next_collision();
        assert!(collider.ignores_next_collision());
        collider.clear_ignore_next();
        assert!(!collider.ignores_next_collision());
    }
}
