//! Eased interpolation behind style transitions.
//!
//! An element property with a transition enabled does not jump to its new
//! value; it follows one of these curves over the transition duration.

use serde::{Deserialize, Serialize};

/// Timing function of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// CSS `ease`: `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    #[default]
    Ease,
    /// CSS `ease-in`: `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// CSS `ease-out`: `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// CSS `ease-in-out`: `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// Jump straight to the target.
    Instant,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::Instant => 1.0,
        }
    }

    /// Returns the CSS keyword for this timing function.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::Instant => "step-end",
        }
    }
}

/// Evaluates a unit cubic bezier (P0 = 0, P3 = 1) at progress `x`.
///
/// Solves `x(s) = x` for the curve parameter with Newton's method, falling
/// back to bisection when the slope is too flat, then returns `y(s)`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample_x = |s: f32| ((ax * s + bx) * s + cx) * s;
    let slope_x = |s: f32| (3.0 * ax * s + 2.0 * bx) * s + cx;
    let sample_y = |s: f32| ((ay * s + by) * s + cy) * s;

    let mut s = x;
    for _ in 0..8 {
        let err = sample_x(s) - x;
        if err.abs() < 1e-6 {
            return sample_y(s);
        }
        let d = slope_x(s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let v = sample_x(s);
        if (v - x).abs() < 1e-6 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    sample_y(s)
}

/// A single animated value.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Current value.
    current: f32,
    /// Target value.
    target: f32,
    /// Animation progress (0-1).
    progress: f32,
    /// Animation duration (seconds).
    duration: f32,
    /// Easing function.
    easing: Easing,
    /// Start value (for interpolation).
    start: f32,
}

impl Animation {
    /// Creates a settled animation at the given value.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self {
            current: value,
            target: value,
            progress: 1.0,
            duration: 0.0,
            easing: Easing::Instant,
            start: value,
        }
    }

    /// Returns the current (rendered) value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Returns the value the animation is heading to.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Returns true if the animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Starts animating from the current value towards `target`.
    pub fn animate_to(&mut self, target: f32, duration: f32, easing: Easing) {
        if duration <= 0.0 || easing == Easing::Instant {
            self.set_immediate(target);
            return;
        }
        if (target - self.target).abs() > 0.0001 || !self.is_complete() {
            self.start = self.current;
            self.target = target;
            self.duration = duration;
            self.easing = easing;
            self.progress = 0.0;
        }
    }

    /// Immediately sets the value without animation.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.start = value;
        self.progress = 1.0;
    }

    /// Updates the animation.
    ///
    /// `dt` is delta time in seconds.
    pub fn update(&mut self, dt: f32) {
        if self.progress >= 1.0 {
            return;
        }

        self.progress = (self.progress + dt / self.duration).min(1.0);

        let eased = self.easing.apply(self.progress);
        self.current = self.start + (self.target - self.start) * eased;

        // Snap to target when complete
        if self.progress >= 1.0 {
            self.current = self.target;
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        for easing in [Easing::Linear, Easing::Ease, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert!(easing.apply(0.0).abs() < 1e-4, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_ease_is_front_loaded_and_monotonic() {
        // CSS `ease` is ~80% done halfway through
        let mid = Easing::Ease.apply(0.5);
        assert!(mid > 0.75 && mid < 0.85, "ease(0.5) = {mid}");

        let mut prev = 0.0;
        for step in 1..=20 {
            let v = Easing::Ease.apply(step as f32 / 20.0);
            assert!(v >= prev, "ease must not go backwards at step {step}");
            prev = v;
        }
    }

    #[test]
    fn test_animation_reaches_target() {
        let mut anim = Animation::new(0.0);
        anim.animate_to(1.0, 0.6, Easing::Ease);
        assert!(!anim.is_complete());

        for _ in 0..40 {
            anim.update(0.016);
        }

        assert!((anim.value() - 1.0).abs() < f32::EPSILON);
        assert!(anim.is_complete());
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let mut anim = Animation::new(20.0);
        anim.animate_to(0.0, 0.0, Easing::Ease);
        assert!(anim.is_complete());
        assert!(anim.value().abs() < f32::EPSILON);
    }
}
