/// Count-up timer advanced once per tick by caller-supplied elapsed time.
///
/// Every wait in the game (cook time, regrowth, visitor patience) is one of
/// these compared against a threshold inside `tick`, so a global pause is
/// just the caller not supplying time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    elapsed: f32,
    duration: f32,
    paused: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::stopwatch()
    }
}

impl Timer {
    /// Timer that finishes once `duration` seconds have accumulated.
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
            paused: false,
        }
    }

    /// Timer with no finishing point, for threshold queries only.
    pub fn stopwatch() -> Self {
        Self::new(f32::INFINITY)
    }

    /// Advance by `dt` seconds and return the new elapsed time.
    /// Negative or non-finite deltas count as zero.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if !self.paused && dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Change the finishing point without touching elapsed time.
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
    }

    /// Whether at least `threshold` seconds have accumulated.
    pub fn reached(&self, threshold: f32) -> bool {
        self.elapsed >= threshold
    }

    pub fn finished(&self) -> bool {
        self.reached(self.duration)
    }

    /// Seconds left until `finished`, never negative.
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Progress in 0.0..=1.0. A zero-length timer is always complete;
    /// a stopwatch never is.
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        if !self.duration.is_finite() {
            return 0.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_accumulates() {
        let mut t = Timer::new(2.0);
        t.tick(0.5);
        t.tick(0.5);
        assert_eq!(t.elapsed(), 1.0);
        assert!(!t.finished());
        t.tick(1.0);
        assert!(t.finished());
        assert_eq!(t.remaining(), 0.0);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut t = Timer::new(5.0);
        t.tick(1.0);
        t.pause();
        t.tick(3.0);
        assert_eq!(t.elapsed(), 1.0);
        assert!(t.is_paused());
        t.resume();
        t.tick(1.0);
        assert_eq!(t.elapsed(), 2.0);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut t = Timer::stopwatch();
        t.tick(-1.0);
        t.tick(f32::NAN);
        t.tick(f32::INFINITY);
        assert_eq!(t.elapsed(), 0.0);
    }

    #[test]
    fn test_reset_and_reached() {
        let mut t = Timer::stopwatch();
        t.tick(1.25);
        assert!(t.reached(1.2));
        assert!(!t.reached(1.3));
        t.reset();
        assert_eq!(t.elapsed(), 0.0);
        assert!(!t.finished());
    }

    #[test]
    fn test_fraction_edges() {
        assert_eq!(Timer::new(0.0).fraction(), 1.0);
        assert_eq!(Timer::stopwatch().fraction(), 0.0);
        let mut t = Timer::new(4.0);
        t.tick(1.0);
        assert!((t.fraction() - 0.25).abs() < f32::EPSILON);
        t.tick(10.0);
        assert_eq!(t.fraction(), 1.0);
    }

    #[test]
    fn test_negative_duration_clamped() {
        let t = Timer::new(-3.0);
        assert_eq!(t.duration(), 0.0);
        assert!(t.finished());
    }
}
