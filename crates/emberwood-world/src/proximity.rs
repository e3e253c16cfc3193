use emberwood_core::types::{CapabilityKind, EntityHandle};
use glam::Vec3;

/// Collision geometry class of a body, as far as targeting cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderShape {
    /// Valid single-point distance target.
    Convex,
    /// Mesh colliders have no meaningful closest point; never targeted.
    NonConvex,
    /// Ground surfaces; never targeted.
    Terrain,
}

/// One object returned by a radius query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityHit {
    pub handle: EntityHandle,
    pub position: Vec3,
    pub shape: ColliderShape,
    pub capability: Option<CapabilityKind>,
}

/// Spatial collaborator that answers "what is near this point".
///
/// Implementations must append hits in a stable order: the resolver breaks
/// distance ties by first occurrence.
pub trait ProximityIndex {
    fn query(&self, center: Vec3, radius: f32, out: &mut Vec<ProximityHit>);
}

/// A fixed list of hits is its own index. Used by callers that already
/// ran a physics overlap query.
impl ProximityIndex for [ProximityHit] {
    fn query(&self, center: Vec3, radius: f32, out: &mut Vec<ProximityHit>) {
        let r2 = radius * radius;
        out.extend(
            self.iter()
                .filter(|h| h.position.distance_squared(center) <= r2)
                .copied(),
        );
    }
}

impl ProximityIndex for Vec<ProximityHit> {
    fn query(&self, center: Vec3, radius: f32, out: &mut Vec<ProximityHit>) {
        self.as_slice().query(center, radius, out);
    }
}

/// Registered world body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub handle: EntityHandle,
    pub position: Vec3,
    pub shape: ColliderShape,
    pub capability: Option<CapabilityKind>,
}

/// Insertion-ordered set of bodies with a linear radius query.
///
/// Campsite scenes hold a few dozen bodies, so a flat scan beats any
/// spatial structure here.
#[derive(Debug, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body. Re-inserting an existing handle replaces it in place.
    pub fn insert(&mut self, body: Body) {
        if let Some(existing) = self.get_mut(body.handle) {
            *existing = body;
        } else {
            self.bodies.push(body);
        }
    }

    pub fn remove(&mut self, handle: EntityHandle) -> Option<Body> {
        let idx = self.bodies.iter().position(|b| b.handle == handle)?;
        Some(self.bodies.remove(idx))
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Body> {
        self.bodies.iter().find(|b| b.handle == handle)
    }

    fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.handle == handle)
    }

    /// Returns false if the handle is unknown.
    pub fn set_position(&mut self, handle: EntityHandle, position: Vec3) -> bool {
        match self.get_mut(handle) {
            Some(body) => {
                body.position = position;
                true
            }
            None => false,
        }
    }

    /// Attach, swap or clear a body's capability. Returns false if the
    /// handle is unknown.
    pub fn set_capability(
        &mut self,
        handle: EntityHandle,
        capability: Option<CapabilityKind>,
    ) -> bool {
        match self.get_mut(handle) {
            Some(body) => {
                if body.capability != capability {
                    log::debug!("body {handle} capability -> {capability:?}");
                }
                body.capability = capability;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }
}

impl ProximityIndex for BodyRegistry {
    fn query(&self, center: Vec3, radius: f32, out: &mut Vec<ProximityHit>) {
        let r2 = radius * radius;
        out.extend(
            self.bodies
                .iter()
                .filter(|b| b.position.distance_squared(center) <= r2)
                .map(|b| ProximityHit {
                    handle: b.handle,
                    position: b.position,
                    shape: b.shape,
                    capability: b.capability,
                }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(id: u32, x: f32, capability: Option<CapabilityKind>) -> Body {
        Body {
            handle: EntityHandle(id),
            position: Vec3::new(x, 0.0, 0.0),
            shape: ColliderShape::Convex,
            capability,
        }
    }

    #[test]
    fn test_query_radius_inclusive_and_ordered() {
        let mut reg = BodyRegistry::new();
        reg.insert(body(3, 2.0, None));
        reg.insert(body(1, 1.0, None));
        reg.insert(body(2, 5.0, None));

        let mut out = Vec::new();
        reg.query(Vec3::ZERO, 2.0, &mut out);
        let ids: Vec<u32> = out.iter().map(|h| h.handle.0).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut reg = BodyRegistry::new();
        reg.insert(body(1, 1.0, None));
        reg.insert(body(2, 2.0, None));
        reg.insert(body(1, 9.0, Some(CapabilityKind::Collectible)));
        assert_eq!(reg.len(), 2);
        let first = reg.iter().next().expect("body");
        assert_eq!(first.handle, EntityHandle(1));
        assert_eq!(first.position.x, 9.0);
    }

    #[test]
    fn test_set_capability_and_position() {
        let mut reg = BodyRegistry::new();
        reg.insert(body(1, 1.0, Some(CapabilityKind::Interactable)));
        assert!(reg.set_capability(EntityHandle(1), None));
        assert_eq!(reg.get(EntityHandle(1)).expect("body").capability, None);
        assert!(reg.set_position(EntityHandle(1), Vec3::splat(4.0)));
        assert!(!reg.set_position(EntityHandle(99), Vec3::ZERO));
        assert!(!reg.set_capability(EntityHandle(99), None));
    }

    #[test]
    fn test_remove() {
        let mut reg = BodyRegistry::new();
        reg.insert(body(1, 1.0, None));
        assert!(reg.remove(EntityHandle(1)).is_some());
        assert!(reg.remove(EntityHandle(1)).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_slice_index() {
        let hits = vec![
            ProximityHit {
                handle: EntityHandle(1),
                position: Vec3::new(0.5, 0.0, 0.0),
                shape: ColliderShape::Convex,
                capability: None,
            },
            ProximityHit {
                handle: EntityHandle(2),
                position: Vec3::new(10.0, 0.0, 0.0),
                shape: ColliderShape::Convex,
                capability: None,
            },
        ];
        let mut out = Vec::new();
        hits.query(Vec3::ZERO, 1.0, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].handle, EntityHandle(1));
    }
}
