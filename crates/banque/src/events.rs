//! # Page Event Bus
//!
//! External signals reach the page runtime through one bounded channel.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │  Host page  │─────>│   Event     │─────>│   Page      │
//! │  (any thr.) │      │   Channel   │      │   Runtime   │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Producers may live on any thread; the runtime is the only consumer.

use std::time::Duration;

use banque_ui::PointerEvent;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};

/// Signals delivered to the page runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEvent {
    /// The document finished loading. Expected exactly once.
    ContentLoaded,
    /// Pointer entered or left an element.
    Pointer(PointerEvent),
    /// The page is going away; stop every repeating task.
    Shutdown,
}

/// Result of waiting on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Received {
    /// An event arrived.
    Event(PageEvent),
    /// Nothing arrived before the deadline.
    Timeout,
    /// Every sender is gone.
    Disconnected,
}

/// Event bus for the page runtime.
///
/// Bounded so a flood of pointer events cannot grow memory without limit.
pub struct EventBus {
    sender: Sender<PageEvent>,
    receiver: Receiver<PageEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates the receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a sender/receiver pair without keeping the bus around.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Handle for sending events.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: Sender<PageEvent>,
}

impl EventSender {
    /// Sends an event without blocking.
    ///
    /// Returns `false` if the channel is full or the runtime is gone.
    #[inline]
    pub fn send(&self, event: PageEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(?event, "page event bus full, dropping event");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Sends an event, waiting for room.
    ///
    /// Use for lifecycle events that must not be dropped.
    #[inline]
    pub fn send_blocking(&self, event: PageEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Handle for receiving events.
#[derive(Clone, Debug)]
pub struct EventReceiver {
    receiver: Receiver<PageEvent>,
}

impl EventReceiver {
    /// Receives one event without blocking.
    #[inline]
    pub fn try_recv(&self) -> Option<PageEvent> {
        self.receiver.try_recv().ok()
    }

    /// Waits up to `timeout` for one event.
    pub fn recv_timeout(&self, timeout: Duration) -> Received {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Received::Event(event),
            Err(RecvTimeoutError::Timeout) => Received::Timeout,
            Err(RecvTimeoutError::Disconnected) => Received::Disconnected,
        }
    }

    /// Waits for one event with no deadline.
    pub fn recv(&self) -> Received {
        self.receiver
            .recv()
            .map_or(Received::Disconnected, Received::Event)
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}
