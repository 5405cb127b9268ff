//! Pointer input delivered to elements.

use crate::element::ElementId;

/// Kind of pointer transition over an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Pointer moved onto the element (`mouseenter`).
    Enter,
    /// Pointer moved off the element (`mouseleave`).
    Leave,
}

impl PointerKind {
    /// DOM event name.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Enter => "mouseenter",
            Self::Leave => "mouseleave",
        }
    }
}

/// A pointer event targeted at one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Element the pointer entered or left.
    pub target: ElementId,
    /// Enter or leave.
    pub kind: PointerKind,
}

impl PointerEvent {
    /// Pointer entered `target`.
    #[must_use]
    pub const fn enter(target: ElementId) -> Self {
        Self {
            target,
            kind: PointerKind::Enter,
        }
    }

    /// Pointer left `target`.
    #[must_use]
    pub const fn leave(target: ElementId) -> Self {
        Self {
            target,
            kind: PointerKind::Leave,
        }
    }
}
