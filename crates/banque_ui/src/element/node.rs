//! Element node type and the presentation capability.

use std::fmt;

use crate::animation::Animation;
use crate::style::{Style, Transition};

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Creates a new element ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element state flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementFlags(u32);

impl ElementFlags {
    /// Pointer is over the element.
    pub const HOVERED: u32 = 1 << 0;
    /// At least one property is mid-transition.
    pub const ANIMATING: u32 = 1 << 1;

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }
}

/// The narrow capability every displayable element exposes to scripts.
///
/// Setters write the specified style. With a transition enabled the rendered
/// value follows over the transition's duration, otherwise it jumps.
pub trait Presentable {
    /// Sets opacity (0 transparent, 1 opaque).
    fn set_opacity(&mut self, opacity: f32);

    /// Sets the vertical offset in layout units.
    fn set_offset_y(&mut self, offset: f32);

    /// Sets the uniform scale factor.
    fn set_scale(&mut self, scale: f32);

    /// Enables (or with `None`, disables) transitions on all properties.
    fn set_transition(&mut self, transition: Option<Transition>);
}

/// A node of the page.
#[derive(Debug, Clone)]
pub struct Element {
    /// Element identifier.
    pub id: ElementId,
    /// Tag name, lowercase.
    pub tag: String,
    /// Class list in markup order.
    pub classes: Vec<String>,
    /// Parent element ID (None for root).
    pub parent: Option<ElementId>,
    /// State flags.
    pub flags: ElementFlags,
    /// Specified inline style.
    style: Style,
    opacity: Animation,
    offset_y: Animation,
    scale: Animation,
}

impl Element {
    /// Creates an element with the default (visible, untransformed) style.
    #[must_use]
    pub fn new(id: ElementId, tag: &str) -> Self {
        let style = Style::default();
        Self {
            id,
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            parent: None,
            flags: ElementFlags::default(),
            opacity: Animation::new(style.opacity),
            offset_y: Animation::new(style.transform.translate_y),
            scale: Animation::new(style.transform.scale),
            style,
        }
    }

    /// Adds a class.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_owned());
        self
    }

    /// Returns true if the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Specified style.
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Rendered opacity at the current animation step.
    #[must_use]
    pub fn rendered_opacity(&self) -> f32 {
        self.opacity.value()
    }

    /// Rendered vertical offset at the current animation step.
    #[must_use]
    pub fn rendered_offset_y(&self) -> f32 {
        self.offset_y.value()
    }

    /// Rendered scale at the current animation step.
    #[must_use]
    pub fn rendered_scale(&self) -> f32 {
        self.scale.value()
    }

    /// Returns true if the pointer is over the element.
    #[inline]
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.flags.has(ElementFlags::HOVERED)
    }

    /// Returns true if any property is still transitioning.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.flags.has(ElementFlags::ANIMATING)
    }

    /// Advances running transitions by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if !self.is_animating() {
            return;
        }
        self.opacity.update(dt);
        self.offset_y.update(dt);
        self.scale.update(dt);
        if self.opacity.is_complete() && self.offset_y.is_complete() && self.scale.is_complete() {
            self.flags.clear(ElementFlags::ANIMATING);
        }
    }

    fn drive(&mut self, pick: fn(&mut Self) -> &mut Animation, value: f32) {
        let transition = self.style.transition;
        let anim = pick(self);
        match transition {
            Some(t) => anim.animate_to(value, t.seconds(), t.easing),
            None => anim.set_immediate(value),
        }
        if !anim.is_complete() {
            self.flags.set(ElementFlags::ANIMATING);
        }
    }
}

impl Presentable for Element {
    fn set_opacity(&mut self, opacity: f32) {
        self.style.opacity = opacity;
        self.drive(|e| &mut e.opacity, opacity);
    }

    fn set_offset_y(&mut self, offset: f32) {
        self.style.transform.translate_y = offset;
        self.drive(|e| &mut e.offset_y, offset);
    }

    fn set_scale(&mut self, scale: f32) {
        self.style.transform.scale = scale;
        self.drive(|e| &mut e.scale, scale);
    }

    fn set_transition(&mut self, transition: Option<Transition>) {
        self.style.transition = transition;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;
    use std::time::Duration;

    #[test]
    fn test_setters_without_transition_jump() {
        let mut el = Element::new(ElementId::new(1), "DIV").with_class("card");
        assert_eq!(el.tag, "div");
        assert!(el.has_class("card"));

        el.set_opacity(0.0);
        el.set_offset_y(20.0);

        assert!(el.rendered_opacity().abs() < f32::EPSILON);
        assert!((el.rendered_offset_y() - 20.0).abs() < f32::EPSILON);
        assert!(!el.is_animating());
    }

    #[test]
    fn test_transition_animates_rendered_value() {
        let mut el = Element::new(ElementId::new(1), "div");
        el.set_opacity(0.0);
        el.set_transition(Some(Transition::all(Duration::from_millis(600), Easing::Ease)));
        el.set_opacity(1.0);

        // Specified value changes at once, rendered value follows.
        assert!((el.style().opacity - 1.0).abs() < f32::EPSILON);
        assert!(el.rendered_opacity() < 0.5);
        assert!(el.is_animating());

        el.advance(0.3);
        let halfway = el.rendered_opacity();
        assert!(halfway > 0.5 && halfway < 1.0, "halfway = {halfway}");

        el.advance(0.31);
        assert!((el.rendered_opacity() - 1.0).abs() < f32::EPSILON);
        assert!(!el.is_animating());
    }
}
