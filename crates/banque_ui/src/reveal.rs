//! Staggered fade/slide-in of card elements.
//!
//! Every card is hidden and pushed down at once; card `i` is then scheduled
//! to slide back up and fade in `i × step` later. Reveals fire once and are
//! never cancelled here.

use std::time::Duration;

use crate::config::RevealConfig;
use crate::element::{Document, ElementId, Presentable};
use crate::style::Transition;
use crate::timer::{TimerId, TimerQueue};

/// One scheduled reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReveal {
    /// Card being revealed.
    pub element: ElementId,
    /// Delay from the moment the reveal was set up.
    pub delay: Duration,
    /// Timer that performs it.
    pub timer: TimerId,
}

/// Hides cards and schedules their staggered reveal.
#[derive(Debug, Clone, Copy)]
pub struct StaggeredReveal {
    step: Duration,
    offset: f32,
    transition: Transition,
}

impl StaggeredReveal {
    /// Creates a reveal from its configuration.
    #[must_use]
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            step: config.step(),
            offset: config.offset,
            transition: Transition::all(config.transition(), config.easing),
        }
    }

    /// Delay for the card at `index`.
    #[must_use]
    pub fn delay_for(&self, index: usize) -> Duration {
        self.step * u32::try_from(index).unwrap_or(u32::MAX)
    }

    /// Applies the reveal to `cards`, in the order given.
    ///
    /// Ids missing from the document are skipped without consuming a slot.
    pub fn apply(
        &self,
        doc: &mut Document,
        cards: &[ElementId],
        timers: &mut TimerQueue<Document>,
    ) -> Vec<ScheduledReveal> {
        let mut scheduled = Vec::with_capacity(cards.len());

        for &id in cards {
            let Some(card) = doc.get_mut(id) else {
                tracing::debug!("card {id} vanished before reveal");
                continue;
            };
            card.set_opacity(0.0);
            card.set_offset_y(self.offset);

            let delay = self.delay_for(scheduled.len());
            let transition = self.transition;
            let timer = timers.set_timeout(delay, move |doc: &mut Document| {
                if let Some(card) = doc.get_mut(id) {
                    card.set_transition(Some(transition));
                    card.set_opacity(1.0);
                    card.set_offset_y(0.0);
                }
            });
            scheduled.push(ScheduledReveal {
                element: id,
                delay,
                timer,
            });
        }

        tracing::debug!("scheduled {} card reveals", scheduled.len());
        scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementSpec;

    fn cards(n: usize) -> (Document, Vec<ElementId>) {
        let specs: Vec<_> = (0..n).map(|_| ElementSpec::new("div", &["card"])).collect();
        let doc = Document::from_specs(&specs);
        let ids = doc.iter_dfs().collect();
        (doc, ids)
    }

    #[test]
    fn test_delays_are_index_times_step() {
        let reveal = StaggeredReveal::new(&RevealConfig::default());
        let (mut doc, ids) = cards(5);
        let mut timers = TimerQueue::new();

        let scheduled = reveal.apply(&mut doc, &ids, &mut timers);

        let delays: Vec<u128> = scheduled.iter().map(|s| s.delay.as_millis()).collect();
        assert_eq!(delays, [0, 200, 400, 600, 800]);
        assert!(scheduled.windows(2).all(|w| w[0].delay < w[1].delay));
        assert_eq!(timers.len(), 5);
    }

    #[test]
    fn test_cards_hidden_then_revealed_once() {
        let reveal = StaggeredReveal::new(&RevealConfig::default());
        let (mut doc, ids) = cards(2);
        let mut timers = TimerQueue::new();
        reveal.apply(&mut doc, &ids, &mut timers);

        for id in &ids {
            let style = doc.get(*id).unwrap().style();
            assert!(style.opacity.abs() < f32::EPSILON);
            assert!((style.transform.translate_y - 20.0).abs() < f32::EPSILON);
            assert!(style.transition.is_none());
        }

        assert_eq!(timers.advance_to(Duration::ZERO, &mut doc), 1);
        let first = doc.get(ids[0]).unwrap();
        assert!((first.style().opacity - 1.0).abs() < f32::EPSILON);
        assert!(first.style().transform.translate_y.abs() < f32::EPSILON);
        assert_eq!(first.style().transition.unwrap().duration, Duration::from_millis(600));
        assert!(first.is_animating());
        assert!(doc.get(ids[1]).unwrap().style().opacity.abs() < f32::EPSILON);

        assert_eq!(timers.advance_to(Duration::from_secs(10), &mut doc), 1);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_empty_sequence_schedules_nothing() {
        let reveal = StaggeredReveal::new(&RevealConfig::default());
        let mut doc = Document::new();
        let mut timers = TimerQueue::new();

        assert!(reveal.apply(&mut doc, &[], &mut timers).is_empty());
        assert!(timers.is_empty());
    }
}
