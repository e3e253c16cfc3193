use emberwood_core::types::{CapabilityKind, EntityHandle};
use glam::Vec3;

use crate::proximity::{ColliderShape, ProximityHit, ProximityIndex};

/// The one candidate picked for this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTarget {
    pub handle: EntityHandle,
    pub kind: CapabilityKind,
    pub position: Vec3,
    pub distance: f32,
}

/// Pick the best candidate out of `hits`.
///
/// One pass tracks the nearest candidate per capability kind; afterwards a
/// collectible wins over an interactable regardless of which is nearer.
/// Equal distances keep the first candidate encountered. `exclude` is the
/// querying body itself. Non-convex and terrain bodies, and bodies with no
/// capability, are skipped.
pub fn select_target(
    hits: &[ProximityHit],
    origin: Vec3,
    exclude: Option<EntityHandle>,
) -> Option<ResolvedTarget> {
    let mut best_collectible: Option<ResolvedTarget> = None;
    let mut best_interactable: Option<ResolvedTarget> = None;

    for hit in hits {
        if Some(hit.handle) == exclude {
            continue;
        }
        if hit.shape != ColliderShape::Convex {
            continue;
        }
        let Some(kind) = hit.capability else {
            continue;
        };
        let distance = origin.distance(hit.position);
        if !distance.is_finite() {
            continue;
        }

        let slot = match kind {
            CapabilityKind::Collectible => &mut best_collectible,
            CapabilityKind::Interactable => &mut best_interactable,
        };
        let closer = match slot {
            Some(best) => distance < best.distance,
            None => true,
        };
        if closer {
            *slot = Some(ResolvedTarget {
                handle: hit.handle,
                kind,
                position: hit.position,
                distance,
            });
        }
    }

    best_collectible.or(best_interactable)
}

/// Per-tick detector owned by the player. Recomputes the target every call;
/// nothing about candidates survives between ticks except the last result,
/// kept to report changes.
#[derive(Debug)]
pub struct TargetResolver {
    radius: f32,
    owner: Option<EntityHandle>,
    scratch: Vec<ProximityHit>,
    current: Option<ResolvedTarget>,
    changed: bool,
}

impl TargetResolver {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
            owner: None,
            scratch: Vec::with_capacity(16),
            current: None,
            changed: false,
        }
    }

    /// Exclude the owning body from its own queries.
    pub fn with_owner(mut self, owner: EntityHandle) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Query `index` around `origin` and pick this tick's target.
    pub fn resolve<I>(&mut self, index: &I, origin: Vec3) -> Option<ResolvedTarget>
    where
        I: ProximityIndex + ?Sized,
    {
        self.scratch.clear();
        index.query(origin, self.radius, &mut self.scratch);
        let next = select_target(&self.scratch, origin, self.owner);

        let before = self.current.map(|t| t.handle);
        let after = next.map(|t| t.handle);
        self.changed = before != after;
        if self.changed {
            log::debug!("target {before:?} -> {after:?}");
        }
        self.current = next;
        next
    }

    /// Result of the most recent `resolve`.
    pub fn current(&self) -> Option<ResolvedTarget> {
        self.current
    }

    /// Whether the last `resolve` picked a different handle than the one before.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Forget the current target, e.g. after the target entity is removed.
    pub fn clear(&mut self) {
        self.changed = self.current.is_some();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proximity::{Body, BodyRegistry};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn hit(id: u32, x: f32, kind: Option<CapabilityKind>) -> ProximityHit {
        ProximityHit {
            handle: EntityHandle(id),
            position: Vec3::new(x, 0.0, 0.0),
            shape: ColliderShape::Convex,
            capability: kind,
        }
    }

    const C: Option<CapabilityKind> = Some(CapabilityKind::Collectible);
    const I: Option<CapabilityKind> = Some(CapabilityKind::Interactable);

    #[test]
    fn test_collectible_beats_closer_interactables() {
        // Two collectibles at 3 and 5, three interactables at 1, 2, 4.
        let hits = vec![
            hit(1, 1.0, I),
            hit(2, 5.0, C),
            hit(3, 2.0, I),
            hit(4, 3.0, C),
            hit(5, 4.0, I),
        ];
        let target = select_target(&hits, Vec3::ZERO, None).expect("target");
        assert_eq!(target.handle, EntityHandle(4));
        assert_eq!(target.kind, CapabilityKind::Collectible);
        assert!((target.distance - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_interactable_without_collectibles() {
        let hits = vec![hit(1, 4.0, I), hit(2, 1.5, I), hit(3, 2.0, I)];
        let target = select_target(&hits, Vec3::ZERO, None).expect("target");
        assert_eq!(target.handle, EntityHandle(2));
        assert_eq!(target.kind, CapabilityKind::Interactable);
    }

    #[test]
    fn test_tie_keeps_first_encountered() {
        let hits = vec![hit(7, 2.0, I), hit(3, -2.0, I), hit(5, 2.0, I)];
        for _ in 0..10 {
            let target = select_target(&hits, Vec3::ZERO, None).expect("target");
            assert_eq!(target.handle, EntityHandle(7));
        }
    }

    #[test]
    fn test_excluded_and_invalid_shapes_skipped() {
        let mut terrain = hit(2, 0.1, C);
        terrain.shape = ColliderShape::Terrain;
        let mut mesh = hit(3, 0.2, C);
        mesh.shape = ColliderShape::NonConvex;
        let hits = vec![hit(1, 0.0, C), terrain, mesh, hit(4, 3.0, I)];

        let target = select_target(&hits, Vec3::ZERO, Some(EntityHandle(1))).expect("target");
        assert_eq!(target.handle, EntityHandle(4));
    }

    #[test]
    fn test_no_capability_ignored_and_empty_is_none() {
        let hits = vec![hit(1, 1.0, None), hit(2, 2.0, None)];
        assert!(select_target(&hits, Vec3::ZERO, None).is_none());
        assert!(select_target(&[], Vec3::ZERO, None).is_none());
    }

    #[test]
    fn test_collectible_priority_holds_for_generated_sets() {
        let mut rng = SmallRng::seed_from_u64(0x1234_5678);
        for round in 0..200 {
            let mut hits = Vec::new();
            let count = 1 + round % 9;
            for i in 0..count {
                let kind = if rng.gen_bool(0.3) { C } else { I };
                hits.push(hit(i as u32 + 1, rng.gen_range(-5.0..5.0), kind));
            }
            let radius = rng.gen_range(0.5..6.5);
            let mut in_range = Vec::new();
            hits.query(Vec3::ZERO, radius, &mut in_range);

            let any_collectible = in_range.iter().any(|h| h.capability == C);
            let result = select_target(&in_range, Vec3::ZERO, None);
            match result {
                Some(t) if any_collectible => assert_eq!(t.kind, CapabilityKind::Collectible),
                Some(t) => assert_eq!(t.kind, CapabilityKind::Interactable),
                None => assert!(in_range.is_empty()),
            }
            assert_eq!(result, select_target(&in_range, Vec3::ZERO, None));
        }
    }

    #[test]
    fn test_resolver_reports_changes_and_excludes_owner() {
        let mut reg = BodyRegistry::new();
        let player = EntityHandle(1);
        reg.insert(Body {
            handle: player,
            position: Vec3::ZERO,
            shape: ColliderShape::Convex,
            capability: Some(CapabilityKind::Collectible),
        });
        reg.insert(Body {
            handle: EntityHandle(2),
            position: Vec3::new(1.0, 0.0, 0.0),
            shape: ColliderShape::Convex,
            capability: I,
        });

        let mut resolver = TargetResolver::new(2.0).with_owner(player);
        let t = resolver.resolve(&reg, Vec3::ZERO).expect("target");
        assert_eq!(t.handle, EntityHandle(2));
        assert!(resolver.changed());

        resolver.resolve(&reg, Vec3::ZERO);
        assert!(!resolver.changed());

        // Moving out of range clears the target.
        assert!(resolver.resolve(&reg, Vec3::new(10.0, 0.0, 0.0)).is_none());
        assert!(resolver.changed());
        assert!(resolver.current().is_none());
    }

    #[test]
    fn test_disabled_capability_not_targeted() {
        let mut reg = BodyRegistry::new();
        reg.insert(Body {
            handle: EntityHandle(5),
            position: Vec3::new(0.5, 0.0, 0.0),
            shape: ColliderShape::Convex,
            capability: I,
        });
        let mut resolver = TargetResolver::new(2.0);
        assert!(resolver.resolve(&reg, Vec3::ZERO).is_some());
        reg.set_capability(EntityHandle(5), None);
        assert!(resolver.resolve(&reg, Vec3::ZERO).is_none());
    }
}
