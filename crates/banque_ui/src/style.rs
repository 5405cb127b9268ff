//! Presentation attributes of an element.
//!
//! These are the *specified* values, what a script wrote into the element's
//! inline style. The rendered values live in the element's animations.

use std::fmt;
use std::time::Duration;

use crate::animation::Easing;

/// Transition descriptor: every property animates over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// How long a property change takes to settle.
    pub duration: Duration,
    /// Timing function.
    pub easing: Easing,
}

impl Transition {
    /// Creates a transition applying to all properties.
    #[must_use]
    pub const fn all(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Duration in seconds, as the animation system consumes it.
    #[must_use]
    pub fn seconds(&self) -> f32 {
        self.duration.as_secs_f32()
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "all {}s {}", self.seconds(), self.easing.css_name())
    }
}

/// Transform applied to an element.
///
/// Vertical offset and scale are tracked separately; the card reveal only
/// touches the offset and the hover effect only touches the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Vertical offset in layout units, positive is downward.
    pub translate_y: f32,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Transform {
    /// No offset, no scaling.
    pub const IDENTITY: Self = Self {
        translate_y: 0.0,
        scale: 1.0,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translateY({}px) scale({})", self.translate_y, self.scale)
    }
}

/// Specified inline style of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Opacity (0 transparent, 1 opaque).
    pub opacity: f32,
    /// Offset and scale.
    pub transform: Transform,
    /// Active transition, if any.
    pub transition: Option<Transition>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            transform: Transform::IDENTITY,
            transition: None,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "opacity: {}; transform: {}", self.opacity, self.transform)?;
        if let Some(transition) = self.transition {
            write!(f, "; transition: {transition}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_rendering() {
        let style = Style {
            opacity: 0.0,
            transform: Transform {
                translate_y: 20.0,
                scale: 1.05,
            },
            transition: Some(Transition::all(Duration::from_millis(600), Easing::Ease)),
        };

        assert_eq!(
            style.to_string(),
            "opacity: 0; transform: translateY(20px) scale(1.05); transition: all 0.6s ease"
        );
    }

    #[test]
    fn test_default_is_visible_and_untransformed() {
        let style = Style::default();
        assert!((style.opacity - 1.0).abs() < f32::EPSILON);
        assert_eq!(style.transform, Transform::IDENTITY);
        assert!(style.transition.is_none());
    }
}
