//! # BANQUE
//!
//! Runtime for the Banque home page behaviour.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  PageEvent   ┌──────────────────────────────────────┐
//! │ EventSender  │─────────────>│ PageRuntime                          │
//! │ (any thread) │   bounded    │  ├─ Document   (elements, listeners) │
//! └──────────────┘   channel    │  ├─ TimerQueue (reveals, clock)      │
//!                               │  └─ UpdateDriver                     │
//!                               └──────────────────────────────────────┘
//! ```
//!
//! The runtime converts wall-clock elapsed time into the timer queue's
//! virtual time; everything below it is deterministic.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod events;
pub mod runtime;

pub use events::{EventBus, EventReceiver, EventSender, PageEvent, Received};
pub use runtime::{PageRuntime, RuntimeConfig, RuntimeStats};
