/// Explicit scheduler tick for driving the animation
///
/// The host loop owns real time and feeds deltas in through [`FrameClock::tick`];
/// everything downstream samples the clock's elapsed seconds.

/// Accumulated animation time, advanced one frame at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    elapsed: f64,
    speed: f64,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            speed: 1.0,
            paused: false,
        }
    }

    /// Advance by `dt` real seconds scaled by the playback speed.
    /// Negative or non-finite deltas are ignored.
    pub fn tick(&mut self, dt: f64) -> f64 {
        if !self.paused && dt.is_finite() && dt > 0.0 {
            self.elapsed += dt * self.speed;
        }
        self.elapsed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed >= 0.0 {
            self.speed = speed;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle(&mut self) {
        self.paused = !self.paused;
    }

    /// Rewind to zero, keeping speed and pause state
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer counter that climbs from `start` to `end` over `duration` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    pub start: i64,
    pub end: i64,
    pub duration: f64,
}

impl CountUp {
    pub const DEFAULT_DURATION: f64 = 2.0;

    pub fn new(end: i64) -> Self {
        Self {
            start: 0,
            end,
            duration: Self::DEFAULT_DURATION,
        }
    }

    pub fn with_start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    fn progress(&self, elapsed: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Displayed value `elapsed` seconds after the counter became visible
    pub fn value_at(&self, elapsed: f64) -> i64 {
        let span = self.end as f64 - self.start as f64;
        (self.progress(elapsed) * span + self.start as f64).floor() as i64
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        self.progress(elapsed) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_accumulates() {
        let mut clock = FrameClock::new();
        clock.tick(0.25);
        clock.tick(0.25);
        assert_eq!(clock.elapsed(), 0.5);
    }

    #[test]
    fn test_pause_and_speed() {
        let mut clock = FrameClock::new();
        clock.set_speed(2.0);
        clock.tick(1.0);
        clock.toggle();
        assert!(clock.is_paused());
        clock.tick(1.0);
        assert_eq!(clock.elapsed(), 2.0);
        clock.resume();
        clock.tick(0.5);
        assert_eq!(clock.elapsed(), 3.0);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut clock = FrameClock::new();
        clock.tick(-1.0);
        clock.tick(f64::NAN);
        clock.set_speed(f64::INFINITY);
        assert_eq!(clock.tick(1.0), 1.0);
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_count_up() {
        let counter = CountUp::new(10);
        assert_eq!(counter.value_at(0.0), 0);
        assert_eq!(counter.value_at(1.0), 5);
        assert_eq!(counter.value_at(1.9), 9);
        assert_eq!(counter.value_at(2.0), 10);
        assert_eq!(counter.value_at(30.0), 10);
        assert!(counter.is_finished(2.0));
        assert!(!counter.is_finished(1.0));
    }

    #[test]
    fn test_count_up_with_start() {
        let counter = CountUp::new(100).with_start(50).with_duration(1.0);
        assert_eq!(counter.value_at(0.5), 75);
        assert_eq!(counter.value_at(-1.0), 50);
    }

    #[test]
    fn test_count_up_full_i64_range() {
        let counter = CountUp::new(i64::MAX).with_start(i64::MIN);
        assert_eq!(counter.value_at(0.0), i64::MIN);
        assert_eq!(counter.value_at(2.0), i64::MAX);
        assert!(counter.value_at(1.0).abs() < 1 << 12);
    }
}
