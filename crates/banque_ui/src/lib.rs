//! # BANQUE UI
//!
//! Load-time behaviour of the Banque home page:
//! - Cards fade and slide in, one after another
//! - Buttons grow slightly while hovered
//! - A French-localized clock line is written at load and every minute
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UPDATE DRIVER                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Document ──query──▶ StaggeredReveal ──set_timeout──┐        │
//! │     │                                               ▼        │
//! │     └────query──▶ HoverScaler ──listeners      TimerQueue    │
//! │                                                     ▲        │
//! │  ClockSource → LocaleFormatter → LineSink ─interval─┘        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here reads the wall clock except [`clock::SystemClock`]; time
//! moves only when the owner advances the [`TimerQueue`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod clock;
pub mod config;
pub mod driver;
pub mod element;
pub mod error;
pub mod hover;
pub mod input;
pub mod reveal;
pub mod style;
pub mod timer;

pub use animation::{Animation, Easing};
pub use clock::{
    ChronoFormatter, ClockEmitter, ClockSnapshot, ClockSource, ClockState, LineSink, LocaleFormatter,
    ManualClock, MemorySink, SystemClock, TracingSink,
};
pub use config::UiConfig;
pub use driver::{DriverPhase, LoadReport, UpdateDriver};
pub use element::{Document, Element, ElementEnumerator, ElementId, ElementSpec, Presentable, Selector};
pub use error::{UiError, UiResult};
pub use hover::HoverScaler;
pub use input::{PointerEvent, PointerKind};
pub use reveal::{ScheduledReveal, StaggeredReveal};
pub use style::{Style, Transform, Transition};
pub use timer::{PendingTimer, TimerId, TimerQueue};
