use emberwood_core::events::{EventQueue, GameEvent};
use emberwood_core::types::{EntityHandle, HeldFood};
use glam::Vec3;

/// What the player carries: a wood count and at most one food item.
#[derive(Debug, Clone)]
pub struct PlayerState {
    handle: EntityHandle,
    pub position: Vec3,
    wood: u32,
    held: Option<HeldFood>,
}

impl PlayerState {
    pub fn new(handle: EntityHandle, position: Vec3) -> Self {
        Self {
            handle,
            position,
            wood: 0,
            held: None,
        }
    }

    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    pub fn wood(&self) -> u32 {
        self.wood
    }

    pub fn held(&self) -> Option<HeldFood> {
        self.held
    }

    pub fn has_free_hands(&self) -> bool {
        self.held.is_none()
    }

    pub fn add_wood(&mut self, count: u32, events: &mut EventQueue) {
        if count == 0 {
            return;
        }
        self.wood = self.wood.saturating_add(count);
        events.push(GameEvent::WoodCountChanged { count: self.wood });
    }

    /// Take one log. False when out of wood.
    pub fn take_wood(&mut self, events: &mut EventQueue) -> bool {
        if self.wood == 0 {
            return false;
        }
        self.wood -= 1;
        events.push(GameEvent::WoodCountChanged { count: self.wood });
        true
    }

    /// Pick up a food item. False if the hands are already full.
    pub fn hold(&mut self, food: HeldFood, events: &mut EventQueue) -> bool {
        if self.held.is_some() {
            return false;
        }
        self.held = Some(food);
        events.push(GameEvent::HeldFoodChanged { held: self.held });
        true
    }

    pub fn take_held(&mut self, events: &mut EventQueue) -> Option<HeldFood> {
        let food = self.held.take()?;
        events.push(GameEvent::HeldFoodChanged { held: None });
        Some(food)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberwood_core::types::{CookState, FoodKind};

    #[test]
    fn test_wood_count() {
        let mut p = PlayerState::new(EntityHandle(1), Vec3::ZERO);
        let mut events = EventQueue::new();
        assert!(!p.take_wood(&mut events));
        p.add_wood(2, &mut events);
        assert!(p.take_wood(&mut events));
        assert_eq!(p.wood(), 1);
        let counts: Vec<GameEvent> = events.drain().collect();
        assert_eq!(
            counts,
            vec![
                GameEvent::WoodCountChanged { count: 2 },
                GameEvent::WoodCountChanged { count: 1 },
            ]
        );
    }

    #[test]
    fn test_one_food_at_a_time() {
        let mut p = PlayerState::new(EntityHandle(1), Vec3::ZERO);
        let mut events = EventQueue::new();
        let food = HeldFood {
            kind: FoodKind::Sausage,
            state: CookState::Raw,
        };
        assert!(p.hold(food, &mut events));
        assert!(!p.hold(food, &mut events));
        assert_eq!(p.take_held(&mut events), Some(food));
        assert!(p.has_free_hands());
        assert_eq!(p.take_held(&mut events), None);
    }
}
