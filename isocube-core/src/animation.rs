/// Keyframe tracks, easing curves and timing for the cube animation
///
/// All sampling is a pure function of elapsed seconds; nothing here keeps
/// state between calls.
use nalgebra::Point2;

use crate::geometry::Point2D;

const SUBDIVISION_PRECISION: f64 = 1e-7;
const SUBDIVISION_MAX_ITERATIONS: usize = 12;

/// A CSS-style cubic bezier timing curve anchored at (0,0) and (1,1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const EASE_IN: CubicBezier = CubicBezier::new(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);
    pub const BACK_OUT: CubicBezier = CubicBezier::new(0.33, 1.53, 0.69, 0.99);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Bezier component at parameter `t` for control values `a1`, `a2`
    fn component(t: f64, a1: f64, a2: f64) -> f64 {
        (((1.0 - 3.0 * a2 + 3.0 * a1) * t + (3.0 * a2 - 6.0 * a1)) * t + 3.0 * a1) * t
    }

    /// Find the curve parameter whose x equals `x` by binary subdivision
    fn solve_t(&self, x: f64) -> f64 {
        let (mut lower, mut upper) = (0.0, 1.0);
        let mut t = 0.5;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            t = lower + (upper - lower) / 2.0;
            let error = Self::component(t, self.x1, self.x2) - x;
            if error.abs() <= SUBDIVISION_PRECISION {
                break;
            }
            if error > 0.0 {
                upper = t;
            } else {
                lower = t;
            }
        }
        t
    }

    pub fn apply(&self, x: f64) -> f64 {
        if x <= 0.0 || x >= 1.0 {
            return x.clamp(0.0, 1.0);
        }
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x;
        }
        Self::component(self.solve_t(x), self.y1, self.y2)
    }
}

/// Named easing curves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    BackOut,
    Custom(CubicBezier),
}

impl Easing {
    /// Map linear progress in [0, 1] to eased progress. `0` and `1` map to themselves.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Easing::Linear => x.clamp(0.0, 1.0),
            Easing::EaseIn => CubicBezier::EASE_IN.apply(x),
            Easing::EaseOut => CubicBezier::EASE_OUT.apply(x),
            Easing::EaseInOut => CubicBezier::EASE_IN_OUT.apply(x),
            Easing::BackOut => CubicBezier::BACK_OUT.apply(x),
            Easing::Custom(curve) => curve.apply(x),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::EaseInOut
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Forever,
}

/// When a track runs: `delay` seconds of waiting, then cycles of `duration`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub duration: f64,
    pub delay: f64,
    pub repeat: Repeat,
}

impl Timing {
    pub const fn once(duration: f64) -> Self {
        Self {
            duration,
            delay: 0.0,
            repeat: Repeat::Once,
        }
    }

    pub const fn forever(duration: f64) -> Self {
        Self {
            duration,
            delay: 0.0,
            repeat: Repeat::Forever,
        }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Linear progress through the current cycle, or `None` while still
    /// waiting out the delay. The delay only applies before the first cycle.
    pub fn progress(&self, t: f64) -> Option<f64> {
        let local = t - self.delay;
        if !(local >= 0.0) {
            return None;
        }
        if self.duration <= 0.0 {
            return Some(1.0);
        }
        match self.repeat {
            Repeat::Once => Some((local / self.duration).min(1.0)),
            Repeat::Forever => Some(local.rem_euclid(self.duration) / self.duration),
        }
    }

    /// Whether a `Once` track has reached its final keyframe
    pub fn is_finished(&self, t: f64) -> bool {
        self.repeat == Repeat::Once && t - self.delay >= self.duration
    }
}

/// Values that can be blended linearly
pub trait Lerp: Copy {
    fn interpolate(self, other: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn interpolate(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point2D {
    fn interpolate(self, other: Self, t: f64) -> Self {
        Point2::new(self.x.interpolate(other.x, t), self.y.interpolate(other.y, t))
    }
}

/// Evenly spaced keyframes sampled with one easing per segment
#[derive(Debug, Clone, PartialEq)]
pub struct Track<T> {
    keyframes: Vec<T>,
    timing: Timing,
    easing: Easing,
    initial: Option<T>,
}

impl<T: Lerp> Track<T> {
    /// Panics if `keyframes` is empty.
    pub fn new(keyframes: impl Into<Vec<T>>, timing: Timing) -> Self {
        let keyframes = keyframes.into();
        assert!(!keyframes.is_empty(), "a track needs at least one keyframe");
        Self {
            keyframes,
            timing,
            easing: Easing::default(),
            initial: None,
        }
    }

    /// Two-keyframe track from `from` to `to`
    pub fn tween(from: T, to: T, timing: Timing) -> Self {
        Self::new(vec![from, to], timing)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Value shown before the delay elapses. Defaults to the first keyframe.
    pub fn with_initial(mut self, initial: T) -> Self {
        self.initial = Some(initial);
        self
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn sample(&self, t: f64) -> T {
        match self.timing.progress(t) {
            Some(p) => self.at_progress(p),
            None => self.initial.unwrap_or(self.keyframes[0]),
        }
    }

    /// Value at linear cycle progress `p` in [0, 1]
    pub fn at_progress(&self, p: f64) -> T {
        let segments = self.keyframes.len() - 1;
        if segments == 0 {
            return self.keyframes[0];
        }
        let scaled = p.clamp(0.0, 1.0) * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f64;
        self.keyframes[index].interpolate(self.keyframes[index + 1], self.easing.apply(local))
    }
}
