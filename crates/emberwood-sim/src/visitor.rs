use emberwood_core::config::VisitorConfig;
use emberwood_core::events::{EventQueue, GameEvent};
use emberwood_core::timer::Timer;
use emberwood_core::types::{CookState, EntityHandle, FoodKind, VisitorRequest};
use rand::Rng;

/// One visitor's request loop: idle, wait a random while, ask for one of
/// the foods, get served (or not), leave after a delay.
///
/// The wait timer only turns into a request if the visitor is still idle
/// and unresolved when it fires.
#[derive(Debug, Clone)]
pub struct RequestCycle {
    visitor: EntityHandle,
    request: VisitorRequest,
    wait: Option<Timer>,
    /// Runs while a request is open; only drives the UI warning.
    alert: Timer,
    alerted: bool,
    departure: Option<Timer>,
    resolved: bool,
    departed: bool,
    wait_range: (f32, f32),
    alert_after: f32,
    depart_delay: f32,
}

impl RequestCycle {
    /// Spawn idle with the wait timer armed.
    pub fn new<R: Rng + ?Sized>(visitor: EntityHandle, config: &VisitorConfig, rng: &mut R) -> Self {
        let lo = config.wait_min.min(config.wait_max).max(0.0);
        let hi = config.wait_min.max(config.wait_max).max(0.0);
        let mut cycle = Self {
            visitor,
            request: VisitorRequest::Idle,
            wait: None,
            alert: Timer::stopwatch(),
            alerted: false,
            departure: None,
            resolved: false,
            departed: false,
            wait_range: (lo, hi),
            alert_after: config.alert_after,
            depart_delay: config.depart_delay.max(0.0),
        };
        cycle.rearm(rng);
        cycle
    }

    pub fn visitor(&self) -> EntityHandle {
        self.visitor
    }

    pub fn request(&self) -> VisitorRequest {
        self.request
    }

    /// Served at least once; no further requests will be made.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Departure delay has elapsed; the owner should remove the visitor.
    pub fn has_departed(&self) -> bool {
        self.departed
    }

    pub fn is_waiting(&self) -> bool {
        self.wait.is_some()
    }

    /// Seconds the open request has been waiting, for the UI.
    pub fn alert_elapsed(&self) -> f32 {
        self.alert.elapsed()
    }

    pub fn is_impatient(&self) -> bool {
        self.alerted
    }

    /// Arm a fresh random wait. Ignored once resolved or while a request
    /// is open.
    pub fn rearm<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.resolved || !self.request.is_idle() {
            return;
        }
        let (lo, hi) = self.wait_range;
        let duration = if hi > lo { rng.gen_range(lo..=hi) } else { lo };
        self.wait = Some(Timer::new(duration));
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R, events: &mut EventQueue) {
        let was_open = !self.request.is_idle();
        if let Some(wait) = self.wait.as_mut() {
            wait.tick(dt);
            if wait.finished() {
                self.wait = None;
                if self.request.is_idle() && !self.resolved {
                    let kind = FoodKind::ALL[rng.gen_range(0..FoodKind::ALL.len())];
                    self.open_request(kind, events);
                }
            }
        }

        if was_open && !self.request.is_idle() {
            self.alert.tick(dt);
            if !self.alerted && self.alert.reached(self.alert_after) {
                self.alerted = true;
                events.push(GameEvent::VisitorImpatient {
                    visitor: self.visitor,
                });
            }
        }

        if let Some(departure) = self.departure.as_mut() {
            departure.tick(dt);
            if departure.finished() {
                self.departure = None;
                self.departed = true;
                log::debug!("visitor {} departed", self.visitor);
                events.push(GameEvent::VisitorDeparted {
                    visitor: self.visitor,
                });
            }
        }
    }

    /// Hand an item to the visitor. Only a cooked item of the requested
    /// kind is correct. Any serve ends the open request; returns false
    /// without side effects if nothing was requested.
    pub fn serve(&mut self, kind: FoodKind, state: CookState, events: &mut EventQueue) -> bool {
        let Some(wanted) = self.request.food() else {
            log::debug!("visitor {} served with no open request", self.visitor);
            return false;
        };
        let correct = state == CookState::Cooked && kind == wanted;

        self.close_request(events);
        self.resolved = true;
        self.departure = Some(Timer::new(self.depart_delay));
        log::info!(
            "visitor {} served {:?} ({:?}), wanted {:?}: {}",
            self.visitor,
            kind,
            state,
            wanted,
            if correct { "correct" } else { "wrong" }
        );
        events.push(GameEvent::VisitorServed {
            visitor: self.visitor,
            correct,
        });
        correct
    }

    /// External interruption: drop any open request and cancel the wait
    /// and alert timers. Call `rearm` to resume asking.
    pub fn force_idle(&mut self, events: &mut EventQueue) {
        self.wait = None;
        self.close_request(events);
    }

    fn open_request(&mut self, kind: FoodKind, events: &mut EventQueue) {
        self.request = VisitorRequest::Wants(kind);
        self.alert.reset();
        self.alerted = false;
        log::debug!("visitor {} requests {:?}", self.visitor, kind);
        events.push(GameEvent::VisitorRequestChanged {
            visitor: self.visitor,
            request: self.request,
        });
    }

    fn close_request(&mut self, events: &mut EventQueue) {
        self.alert.reset();
        self.alerted = false;
        if self.request.is_idle() {
            return;
        }
        self.request = VisitorRequest::Idle;
        events.push(GameEvent::VisitorRequestChanged {
            visitor: self.visitor,
            request: self.request,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn config() -> VisitorConfig {
        VisitorConfig {
            wait_min: 2.0,
            wait_max: 4.0,
            alert_after: 5.0,
            depart_delay: 3.0,
            ..VisitorConfig::default()
        }
    }

    fn requesting(seed: u64) -> (RequestCycle, SmallRng, EventQueue) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut events = EventQueue::new();
        let mut cycle = RequestCycle::new(EntityHandle(20), &config(), &mut rng);
        cycle.tick(4.5, &mut rng, &mut events);
        assert!(!cycle.request().is_idle());
        (cycle, rng, events)
    }

    #[test]
    fn test_request_fires_within_wait_range() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut cycle = RequestCycle::new(EntityHandle(20), &config(), &mut rng);
        cycle.tick(1.99, &mut rng, &mut events);
        assert!(cycle.request().is_idle());
        assert!(events.is_empty());
        cycle.tick(2.5, &mut rng, &mut events);
        assert!(cycle.request().food().is_some());
        assert!(!cycle.is_waiting());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_correct_serve() {
        let (mut cycle, mut rng, mut events) = requesting(7);
        let wanted = cycle.request().food().expect("open request");
        assert!(cycle.serve(wanted, CookState::Cooked, &mut events));
        assert!(cycle.request().is_idle());
        assert!(cycle.is_resolved());

        cycle.tick(2.9, &mut rng, &mut events);
        assert!(!cycle.has_departed());
        cycle.tick(0.2, &mut rng, &mut events);
        assert!(cycle.has_departed());
    }

    #[test]
    fn test_wrong_state_or_kind_is_incorrect() {
        for state in [CookState::Raw, CookState::Burnt] {
            let (mut cycle, _, mut events) = requesting(3);
            let wanted = cycle.request().food().expect("open request");
            assert!(!cycle.serve(wanted, state, &mut events));
            assert!(cycle.is_resolved());
        }
        let (mut cycle, _, mut events) = requesting(3);
        let wanted = cycle.request().food().expect("open request");
        let other = FoodKind::ALL
            .into_iter()
            .find(|k| *k != wanted)
            .expect("three kinds");
        assert!(!cycle.serve(other, CookState::Cooked, &mut events));
        assert!(cycle.request().is_idle());
    }

    #[test]
    fn test_serve_without_request_is_noop() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut events = EventQueue::new();
        let mut cycle = RequestCycle::new(EntityHandle(20), &config(), &mut rng);
        assert!(!cycle.serve(FoodKind::Sausage, CookState::Cooked, &mut events));
        assert!(!cycle.is_resolved());
        assert!(cycle.is_waiting());
        assert!(events.is_empty());
    }

    #[test]
    fn test_no_request_after_resolution() {
        let (mut cycle, mut rng, mut events) = requesting(11);
        let wanted = cycle.request().food().expect("open request");
        cycle.serve(wanted, CookState::Cooked, &mut events);
        cycle.rearm(&mut rng);
        assert!(!cycle.is_waiting());
        for _ in 0..20 {
            cycle.tick(1.0, &mut rng, &mut events);
            assert!(cycle.request().is_idle());
        }
    }

    #[test]
    fn test_force_idle_cancels_timers() {
        let (mut cycle, mut rng, mut events) = requesting(2);
        cycle.tick(1.0, &mut rng, &mut events);
        assert!(cycle.alert_elapsed() > 0.0);
        cycle.force_idle(&mut events);
        assert!(cycle.request().is_idle());
        assert_eq!(cycle.alert_elapsed(), 0.0);
        assert!(!cycle.is_waiting());
        assert!(!cycle.is_resolved());

        for _ in 0..20 {
            cycle.tick(1.0, &mut rng, &mut events);
        }
        assert!(cycle.request().is_idle());

        cycle.rearm(&mut rng);
        assert!(cycle.is_waiting());
        cycle.tick(4.5, &mut rng, &mut events);
        assert!(!cycle.request().is_idle());
    }

    #[test]
    fn test_impatience_raised_once() {
        let (mut cycle, mut rng, mut events) = requesting(9);
        for _ in 0..20 {
            cycle.tick(1.0, &mut rng, &mut events);
        }
        assert!(cycle.is_impatient());
        let warnings = events
            .iter()
            .filter(|e| matches!(e, GameEvent::VisitorImpatient { .. }))
            .count();
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_same_seed_same_requests() {
        let pick = |seed| {
            let (cycle, _, _) = requesting(seed);
            cycle.request()
        };
        for seed in 0..20 {
            assert_eq!(pick(seed), pick(seed));
        }
    }

    #[test]
    fn test_all_kinds_requested_over_many_seeds() {
        let mut seen = Vec::new();
        for seed in 0..200 {
            let (cycle, _, _) = requesting(seed);
            let kind = cycle.request().food().expect("open request");
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert_eq!(seen.len(), FoodKind::ALL.len());
    }
}
