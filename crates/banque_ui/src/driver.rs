//! # Update Driver
//!
//! Composes reveal, hover and clock behind the page's content-loaded signal.
//!
//! ```text
//! content loaded ──▶ announce ──▶ reveal cards ──▶ bind buttons
//!                                                     │
//!                  clock every period ◀── clock now ◀─┘
//! ```
//!
//! The driver owns the repeating clock timer and cancels it on
//! [`UpdateDriver::shutdown`]; whoever owns the page lifecycle calls it.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::clock::{ChronoFormatter, ClockEmitter, ClockSource, LineSink};
use crate::config::UiConfig;
use crate::element::{Document, ElementEnumerator, Selector};
use crate::error::{UiError, UiResult};
use crate::hover::HoverScaler;
use crate::reveal::{ScheduledReveal, StaggeredReveal};
use crate::timer::{TimerId, TimerQueue};

/// Lifecycle of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// Waiting for content-loaded.
    Waiting,
    /// Loaded; the clock interval is live.
    Running {
        /// The repeating clock timer.
        clock_timer: TimerId,
    },
    /// Shut down; nothing left scheduled by the driver.
    Stopped,
}

/// What the content-loaded handler did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Card reveals, in document order.
    pub reveals: Vec<ScheduledReveal>,
    /// Number of buttons given hover handlers.
    pub buttons_bound: usize,
    /// The repeating clock timer.
    pub clock_timer: TimerId,
}

/// Runs the page's load-time behaviour.
pub struct UpdateDriver {
    cards: Selector,
    buttons: Selector,
    reveal: StaggeredReveal,
    hover: HoverScaler,
    clock: Arc<Mutex<ClockEmitter>>,
    clock_period: std::time::Duration,
    announcement: String,
    sink: Arc<dyn LineSink>,
    phase: DriverPhase,
}

impl UpdateDriver {
    /// Builds a driver from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownLocale`] if the clock locale is unsupported.
    pub fn new(config: &UiConfig, source: Arc<dyn ClockSource>, sink: Arc<dyn LineSink>) -> UiResult<Self> {
        let formatter = ChronoFormatter::new(
            &config.clock.locale,
            &config.clock.date_format,
            &config.clock.time_format,
        )?;
        let emitter = ClockEmitter::new(source, Arc::new(formatter), Arc::clone(&sink));

        Ok(Self {
            cards: config.selectors.cards.clone(),
            buttons: config.selectors.buttons.clone(),
            reveal: StaggeredReveal::new(&config.reveal),
            hover: HoverScaler::new(&config.hover),
            clock: Arc::new(Mutex::new(emitter)),
            clock_period: config.clock.period(),
            announcement: format!("🏦 {} - Page chargée", config.page.name),
            sink,
            phase: DriverPhase::Waiting,
        })
    }

    /// Handles the content-loaded signal.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::AlreadyLoaded`] on any call after the first; the
    /// page is left untouched.
    pub fn on_content_loaded(
        &mut self,
        doc: &mut Document,
        timers: &mut TimerQueue<Document>,
    ) -> UiResult<LoadReport> {
        if self.phase != DriverPhase::Waiting {
            tracing::warn!("content-loaded delivered again, ignoring");
            return Err(UiError::AlreadyLoaded);
        }

        self.sink.write_line(&self.announcement);

        let cards = doc.query_all(&self.cards);
        let reveals = self.reveal.apply(doc, &cards, timers);

        let buttons = doc.query_all(&self.buttons);
        let buttons_bound = self.hover.attach(doc, &buttons)?;

        self.clock.lock().emit();
        let clock = Arc::clone(&self.clock);
        let clock_timer = timers.set_interval(self.clock_period, move |_: &mut Document| {
            clock.lock().emit();
        });

        self.phase = DriverPhase::Running { clock_timer };
        tracing::info!(
            cards = reveals.len(),
            buttons = buttons_bound,
            "page driver running"
        );

        Ok(LoadReport {
            reveals,
            buttons_bound,
            clock_timer,
        })
    }

    /// Stops the repeating clock.
    ///
    /// Returns true if a live interval was cancelled. Pending card reveals
    /// are left to fire.
    pub fn shutdown(&mut self, timers: &mut TimerQueue<Document>) -> bool {
        let cancelled = match self.phase {
            DriverPhase::Running { clock_timer } => timers.clear(clock_timer),
            DriverPhase::Waiting | DriverPhase::Stopped => false,
        };
        self.phase = DriverPhase::Stopped;
        tracing::debug!(cancelled, "page driver stopped");
        cancelled
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    /// Number of clock lines emitted so far.
    #[must_use]
    pub fn clock_emissions(&self) -> u64 {
        self.clock.lock().emissions()
    }
}

impl std::fmt::Debug for UpdateDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateDriver")
            .field("cards", &self.cards)
            .field("buttons", &self.buttons)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, MemorySink};
    use crate::element::ElementSpec;
    use chrono::{FixedOffset, TimeZone};
    use std::time::Duration;

    fn driver(sink: &Arc<MemorySink>) -> UpdateDriver {
        let at = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 15, 8, 30, 0)
            .unwrap();
        let lines: Arc<dyn LineSink> = sink.clone();
        UpdateDriver::new(&UiConfig::default(), Arc::new(ManualClock::new(at)), lines).unwrap()
    }

    #[test]
    fn test_second_load_is_rejected() {
        let sink = Arc::new(MemorySink::new());
        let mut driver = driver(&sink);
        let mut doc = Document::from_specs(&[ElementSpec::new("div", &["card"])]);
        let mut timers = TimerQueue::new();

        driver.on_content_loaded(&mut doc, &mut timers).unwrap();
        let pending = timers.len();
        let lines = sink.len();

        assert!(matches!(
            driver.on_content_loaded(&mut doc, &mut timers),
            Err(UiError::AlreadyLoaded)
        ));
        assert_eq!(timers.len(), pending);
        assert_eq!(sink.len(), lines);
    }

    #[test]
    fn test_announcement_then_clock_line() {
        let sink = Arc::new(MemorySink::new());
        let mut driver = driver(&sink);
        let mut doc = Document::new();
        let mut timers = TimerQueue::new();

        driver.on_content_loaded(&mut doc, &mut timers).unwrap();

        assert_eq!(
            sink.lines(),
            [
                "🏦 Microservice Banque - Page chargée",
                "🕒 jeudi 15 janvier 2026 - 08:30:00",
            ]
        );
    }

    #[test]
    fn test_shutdown_stops_the_clock() {
        let sink = Arc::new(MemorySink::new());
        let mut driver = driver(&sink);
        let mut doc = Document::new();
        let mut timers = TimerQueue::new();

        let report = driver.on_content_loaded(&mut doc, &mut timers).unwrap();
        assert_eq!(driver.phase(), DriverPhase::Running { clock_timer: report.clock_timer });

        timers.advance_to(Duration::from_secs(120), &mut doc);
        assert_eq!(driver.clock_emissions(), 3);
        assert!(timers.is_pending(report.clock_timer));

        assert!(driver.shutdown(&mut timers));
        assert!(!driver.shutdown(&mut timers));
        assert_eq!(driver.phase(), DriverPhase::Stopped);
        assert!(!timers.is_pending(report.clock_timer));

        timers.advance_to(Duration::from_secs(3600), &mut doc);
        assert_eq!(driver.clock_emissions(), 3);
    }
}
