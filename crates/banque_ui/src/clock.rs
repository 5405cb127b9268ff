//! # Localized Clock
//!
//! Reads the current instant, renders it in the configured locale, and
//! writes one line per emission:
//!
//! ```text
//! 🕒 dimanche 18 octobre 2026 - 14:05:09
//! ```
//!
//! The emitter is a two-state machine (`Idle` → `Emitting` → `Idle`); the
//! driver runs it once at load and then from a repeating timer.

use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Locale};
use parking_lot::Mutex;

use crate::error::{UiError, UiResult};

/// Source of the current instant.
pub trait ClockSource: Send + Sync {
    /// The current date and time with its UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Host wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().into()
    }
}

/// Clock that reads whatever it was last set to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl ManualClock {
    /// Creates a clock stopped at `at`.
    #[must_use]
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self { now: Mutex::new(at) }
    }

    /// Moves the clock to `at`.
    pub fn set(&self, at: DateTime<FixedOffset>) {
        *self.now.lock() = at;
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock();
        *now = *now + by;
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock()
    }
}

/// Renders instants as locale-specific text.
pub trait LocaleFormatter: Send + Sync {
    /// Long date: weekday, day, month name, year.
    fn format_date(&self, at: &DateTime<FixedOffset>) -> String;

    /// Time of day.
    fn format_time(&self, at: &DateTime<FixedOffset>) -> String;
}

/// Formatter backed by chrono's locale tables.
#[derive(Debug, Clone)]
pub struct ChronoFormatter {
    locale: Locale,
    date_pattern: String,
    time_pattern: String,
}

impl ChronoFormatter {
    /// Creates a formatter for a locale tag such as `fr-FR` or `fr_FR`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownLocale`] if chrono has no table for the tag,
    /// or [`UiError::InvalidConfig`] if either pattern has a bad specifier.
    pub fn new(tag: &str, date_pattern: &str, time_pattern: &str) -> UiResult<Self> {
        let locale = parse_locale(tag)?;
        check_pattern("clock.date_format", date_pattern, locale)?;
        check_pattern("clock.time_format", time_pattern, locale)?;
        Ok(Self {
            locale,
            date_pattern: date_pattern.to_owned(),
            time_pattern: time_pattern.to_owned(),
        })
    }
}

impl LocaleFormatter for ChronoFormatter {
    fn format_date(&self, at: &DateTime<FixedOffset>) -> String {
        at.format_localized(&self.date_pattern, self.locale).to_string()
    }

    fn format_time(&self, at: &DateTime<FixedOffset>) -> String {
        at.format_localized(&self.time_pattern, self.locale).to_string()
    }
}

/// Rejects patterns chrono would fail on at format time.
fn check_pattern(field: &str, pattern: &str, locale: Locale) -> UiResult<()> {
    if StrftimeItems::new_with_locale(pattern, locale).any(|item| matches!(item, Item::Error)) {
        return Err(UiError::InvalidConfig(format!(
            "{field}: unsupported specifier in {pattern:?}"
        )));
    }
    Ok(())
}

/// Maps a BCP 47 style tag (`fr-FR`) to chrono's POSIX name (`fr_FR`).
fn parse_locale(tag: &str) -> UiResult<Locale> {
    let posix = tag.trim().replace('-', "_");
    Locale::try_from(posix.as_str()).map_err(|_| UiError::UnknownLocale(tag.to_owned()))
}

/// Destination for the driver's text output.
pub trait LineSink: Send + Sync {
    /// Writes one line.
    fn write_line(&self, line: &str);
}

/// Sink that logs every line at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LineSink for TracingSink {
    fn write_line(&self, line: &str) {
        tracing::info!(target: "banque_ui::page", "{line}");
    }
}

/// Sink that keeps lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every line written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Number of lines written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Returns true if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl LineSink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines.lock().push(line.to_owned());
    }
}

/// One rendering of the current instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSnapshot {
    /// Long localized date.
    pub date: String,
    /// Localized time of day.
    pub time: String,
}

impl ClockSnapshot {
    /// The line written to the sink.
    #[must_use]
    pub fn message(&self) -> String {
        format!("🕒 {} - {}", self.date, self.time)
    }
}

/// Emitter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockState {
    /// Waiting for the next tick.
    #[default]
    Idle,
    /// Reading the clock and writing the line.
    Emitting,
}

/// Reads, formats and writes the current instant.
pub struct ClockEmitter {
    source: Arc<dyn ClockSource>,
    formatter: Arc<dyn LocaleFormatter>,
    sink: Arc<dyn LineSink>,
    state: ClockState,
    emissions: u64,
}

impl ClockEmitter {
    /// Creates an idle emitter.
    #[must_use]
    pub fn new(
        source: Arc<dyn ClockSource>,
        formatter: Arc<dyn LocaleFormatter>,
        sink: Arc<dyn LineSink>,
    ) -> Self {
        Self {
            source,
            formatter,
            sink,
            state: ClockState::Idle,
            emissions: 0,
        }
    }

    /// Formats the current instant without emitting it.
    #[must_use]
    pub fn snapshot(&self) -> ClockSnapshot {
        let now = self.source.now();
        ClockSnapshot {
            date: self.formatter.format_date(&now),
            time: self.formatter.format_time(&now),
        }
    }

    /// Runs one Idle → Emitting → Idle cycle and returns what was written.
    pub fn emit(&mut self) -> ClockSnapshot {
        self.state = ClockState::Emitting;
        let snapshot = self.snapshot();
        self.sink.write_line(&snapshot.message());
        self.emissions += 1;
        self.state = ClockState::Idle;
        snapshot
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Number of completed emissions.
    #[must_use]
    pub fn emissions(&self) -> u64 {
        self.emissions
    }
}

impl std::fmt::Debug for ClockEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockEmitter")
            .field("state", &self.state)
            .field("emissions", &self.emissions)
            .finish_non_exhaustive()
    }
}
