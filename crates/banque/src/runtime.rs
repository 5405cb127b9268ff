//! # Page Runtime
//!
//! One loop, one thread, one owner:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. ADVANCE                                                          │
//! │    ├─ Fire timers due by wall-clock elapsed time                    │
//! │    └─ Tick running transitions                                      │
//! │                                                                     │
//! │ 2. WAIT                                                             │
//! │    └─ Block on the event bus until the earliest of:                 │
//! │       next frame (while animating), next timer, run limit           │
//! │                                                                     │
//! │ 3. HANDLE                                                           │
//! │    ├─ ContentLoaded → driver                                        │
//! │    ├─ Pointer       → document listeners                            │
//! │    └─ Shutdown      → stop the clock, leave the loop                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::{Duration, Instant};

use banque_ui::{Document, DriverPhase, ElementSpec, TimerQueue, UiConfig, UpdateDriver};

use crate::events::{EventReceiver, PageEvent, Received};

/// Frame interval while something is animating (60 FPS).
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// Longest step a transition is advanced in one frame, in seconds.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Configuration for the runtime loop.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Event bus capacity.
    pub event_capacity: usize,
    /// Frame interval while animating.
    pub frame_time: Duration,
    /// Stop after this much wall-clock time; `None` runs until shutdown.
    pub run_for: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_capacity: 256,
            frame_time: TARGET_FRAME_TIME,
            run_for: None,
        }
    }
}

/// Counters kept by the runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    /// Events taken off the bus.
    pub events: u64,
    /// Pointer events among them.
    pub pointer_events: u64,
    /// Content-loaded signals the driver refused.
    pub rejected_loads: u64,
    /// Timer callbacks run.
    pub timers_fired: u64,
    /// Animation frames ticked.
    pub frames: u64,
}

impl RuntimeStats {
    /// Logs the counters at info level.
    pub fn log_summary(&self) {
        tracing::info!(
            events = self.events,
            pointer_events = self.pointer_events,
            rejected_loads = self.rejected_loads,
            timers_fired = self.timers_fired,
            frames = self.frames,
            "page runtime summary"
        );
    }
}

/// Owns the page and drives it from the event bus.
pub struct PageRuntime {
    doc: Document,
    timers: TimerQueue<Document>,
    driver: UpdateDriver,
    events: EventReceiver,
    config: RuntimeConfig,
    stats: RuntimeStats,
    /// Virtual time of the last animation tick.
    last_tick: Duration,
    stopped: bool,
}

impl PageRuntime {
    /// Creates a runtime around an already built document.
    #[must_use]
    pub fn new(doc: Document, driver: UpdateDriver, events: EventReceiver, config: RuntimeConfig) -> Self {
        Self {
            doc,
            timers: TimerQueue::new(),
            driver,
            events,
            config,
            stats: RuntimeStats::default(),
            last_tick: Duration::ZERO,
            stopped: false,
        }
    }

    /// Builds the document from the configured outline, or the stock home
    /// page when the outline is empty.
    #[must_use]
    pub fn build_document(config: &UiConfig) -> Document {
        if config.page.layout.is_empty() {
            Document::from_specs(&home_page())
        } else {
            Document::from_specs(&config.page.layout)
        }
    }

    /// Handles one event. Returns false once the page is shut down.
    pub fn handle(&mut self, event: PageEvent) -> bool {
        self.stats.events += 1;
        match event {
            PageEvent::ContentLoaded => {
                match self.driver.on_content_loaded(&mut self.doc, &mut self.timers) {
                    Ok(report) => tracing::debug!(
                        reveals = report.reveals.len(),
                        buttons = report.buttons_bound,
                        "content loaded"
                    ),
                    Err(err) => {
                        self.stats.rejected_loads += 1;
                        tracing::warn!(%err, "content-loaded rejected");
                    }
                }
            }
            PageEvent::Pointer(pointer) => {
                self.stats.pointer_events += 1;
                if self.doc.dispatch(pointer) == 0 {
                    tracing::trace!(element = %pointer.target, "no listener for {}", pointer.kind.event_name());
                }
            }
            PageEvent::Shutdown => {
                self.stop();
                return false;
            }
        }
        true
    }

    /// Handles every event already queued without blocking.
    ///
    /// Returns false if a shutdown was among them.
    pub fn pump(&mut self) -> bool {
        while let Some(event) = self.events.try_recv() {
            if !self.handle(event) {
                return false;
            }
        }
        true
    }

    /// Moves the page to virtual time `now`.
    ///
    /// Timers fire in deadline order, and transitions are ticked up to each
    /// deadline first, so a transition started by a timer only runs for the
    /// time left after it fired.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some(due) = self.timers.next_deadline().filter(|due| *due <= now) {
            self.tick(due);
            self.timers.advance_to(due, &mut self.doc);
        }
        self.timers.advance_to(now, &mut self.doc);
        self.tick(now);
        self.stats.timers_fired = self.timers.fired();
    }

    /// Advances running transitions by the time since the last tick.
    fn tick(&mut self, at: Duration) {
        let dt = at.saturating_sub(self.last_tick).as_secs_f32().min(MAX_FRAME_DT);
        self.last_tick = self.last_tick.max(at);
        if dt > 0.0 && self.doc.is_animating() {
            self.doc.advance(dt);
            self.stats.frames += 1;
        }
    }

    /// Runs until shutdown, a closed bus, or the configured run limit.
    pub fn run(&mut self) -> RuntimeStats {
        let started = Instant::now();
        tracing::info!(run_for = ?self.config.run_for, "page runtime started");

        loop {
            let now = started.elapsed();
            self.advance_to(now);

            if self.config.run_for.is_some_and(|limit| now >= limit) {
                tracing::info!("run time elapsed");
                self.stop();
                break;
            }

            let received = match self.wait_budget(now) {
                Some(wait) => self.events.recv_timeout(wait),
                None => self.events.recv(),
            };
            match received {
                Received::Event(event) => {
                    if !self.handle(event) {
                        break;
                    }
                }
                Received::Timeout => {}
                Received::Disconnected => {
                    tracing::info!("event bus closed");
                    self.stop();
                    break;
                }
            }
        }

        self.stats
    }

    /// How long the loop may block before it has work to do.
    fn wait_budget(&self, now: Duration) -> Option<Duration> {
        let frame = self.doc.is_animating().then_some(self.config.frame_time);
        let timer = self.timers.next_deadline().map(|due| due.saturating_sub(now));
        let limit = self.config.run_for.map(|limit| limit.saturating_sub(now));
        [frame, timer, limit].into_iter().flatten().min()
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        let cancelled = self.driver.shutdown(&mut self.timers);
        tracing::info!(cancelled, "page runtime stopped");
    }

    /// The page.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Pending timers.
    #[must_use]
    pub fn timers(&self) -> &TimerQueue<Document> {
        &self.timers
    }

    /// Driver lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> DriverPhase {
        self.driver.phase()
    }

    /// Number of clock lines emitted.
    #[must_use]
    pub fn clock_emissions(&self) -> u64 {
        self.driver.clock_emissions()
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> RuntimeStats {
        self.stats
    }

    /// Returns true after shutdown.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl std::fmt::Debug for PageRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRuntime")
            .field("elements", &self.doc.len())
            .field("timers", &self.timers)
            .field("driver", &self.driver)
            .field("stats", &self.stats)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

/// Stock home page: account cards, each with its action button.
fn home_page() -> Vec<ElementSpec> {
    let card = |action: &str| {
        ElementSpec::new("div", &["card"])
            .child(ElementSpec::new("h5", &["card-title"]))
            .child(ElementSpec::new("p", &["card-text"]))
            .child(ElementSpec::new("a", &["btn", action]))
    };
    vec![ElementSpec::new("main", &["container"])
        .child(ElementSpec::new("h1", &["display-4"]))
        .child(card("btn-primary"))
        .child(card("btn-success"))
        .child(card("btn-info"))]
}
