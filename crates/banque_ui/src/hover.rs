//! Hover scaling for buttons.
//!
//! Each button gets its own enter/leave pair. Handlers are level-triggered:
//! every enter sets the hover scale, every leave restores the rest scale.

use crate::config::HoverConfig;
use crate::element::{Document, ElementId, Presentable};
use crate::error::{UiError, UiResult};
use crate::input::PointerKind;

/// Binds hover feedback to buttons.
#[derive(Debug, Clone, Copy)]
pub struct HoverScaler {
    scale: f32,
    rest_scale: f32,
}

impl HoverScaler {
    /// Creates a scaler from its configuration.
    #[must_use]
    pub fn new(config: &HoverConfig) -> Self {
        Self {
            scale: config.scale,
            rest_scale: config.rest_scale,
        }
    }

    /// Attaches enter/leave handlers to every id in `buttons`.
    ///
    /// Returns the number of buttons bound. Nothing is bound unless every id
    /// is in `doc`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownElement`] if an id is not in `doc`.
    pub fn attach(&self, doc: &mut Document, buttons: &[ElementId]) -> UiResult<usize> {
        if let Some(missing) = buttons.iter().find(|id| doc.get(**id).is_none()) {
            return Err(UiError::UnknownElement(missing.raw()));
        }
        for &id in buttons {
            let scale = self.scale;
            let rest = self.rest_scale;
            doc.add_listener(
                id,
                PointerKind::Enter,
                Box::new(move |el: &mut dyn Presentable| el.set_scale(scale)),
            )?;
            doc.add_listener(
                id,
                PointerKind::Leave,
                Box::new(move |el: &mut dyn Presentable| el.set_scale(rest)),
            )?;
        }
        tracing::debug!("hover scaling bound to {} buttons", buttons.len());
        Ok(buttons.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementSpec;
    use crate::input::PointerEvent;

    fn scale_of(doc: &Document, id: ElementId) -> f32 {
        doc.get(id).unwrap().style().transform.scale
    }

    fn rendered_scale_of(doc: &Document, id: ElementId) -> f32 {
        doc.get(id).unwrap().rendered_scale()
    }

    #[test]
    fn test_enter_and_leave_set_exact_scales() {
        let mut doc = Document::from_specs(&[
            ElementSpec::new("a", &["btn"]),
            ElementSpec::new("a", &["btn"]),
        ]);
        let ids: Vec<_> = doc.iter_dfs().collect();
        let bound = HoverScaler::new(&HoverConfig::default()).attach(&mut doc, &ids).unwrap();
        assert_eq!(bound, 2);
        assert_eq!(doc.listener_count(ids[0]), 2);

        doc.dispatch(PointerEvent::enter(ids[0]));
        assert!((scale_of(&doc, ids[0]) - 1.05).abs() < f32::EPSILON);
        // No transition on buttons, so the rendered scale jumps too.
        assert!((rendered_scale_of(&doc, ids[0]) - 1.05).abs() < f32::EPSILON);
        assert!(!doc.is_animating());
        // Other button untouched.
        assert!((scale_of(&doc, ids[1]) - 1.0).abs() < f32::EPSILON);

        doc.dispatch(PointerEvent::leave(ids[0]));
        assert!((scale_of(&doc, ids[0]) - 1.0).abs() < f32::EPSILON);
        assert!((rendered_scale_of(&doc, ids[0]) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_button_binds_nothing() {
        let mut doc = Document::from_specs(&[ElementSpec::new("a", &["btn"])]);
        let known = doc.roots()[0];

        let err = HoverScaler::new(&HoverConfig::default())
            .attach(&mut doc, &[known, ElementId::new(999)])
            .unwrap_err();
        assert!(matches!(err, UiError::UnknownElement(999)));
        assert_eq!(doc.listener_count(known), 0);
        assert_eq!(doc.dispatch(PointerEvent::enter(known)), 0);
    }

    #[test]
    fn test_repeated_events_are_idempotent() {
        let mut doc = Document::from_specs(&[ElementSpec::new("button", &["btn"])]);
        let id = doc.roots()[0];
        HoverScaler::new(&HoverConfig::default()).attach(&mut doc, &[id]).unwrap();

        for _ in 0..3 {
            assert_eq!(doc.dispatch(PointerEvent::enter(id)), 1);
            assert!((scale_of(&doc, id) - 1.05).abs() < f32::EPSILON);
        }
        for _ in 0..3 {
            assert_eq!(doc.dispatch(PointerEvent::leave(id)), 1);
            assert!((scale_of(&doc, id) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_no_buttons_binds_nothing() {
        let mut doc = Document::new();
        let bound = HoverScaler::new(&HoverConfig::default()).attach(&mut doc, &[]).unwrap();
        assert_eq!(bound, 0);
    }
}
