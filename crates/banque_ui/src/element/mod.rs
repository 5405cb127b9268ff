//! Element system for the page.
//!
//! Elements are the cards and buttons the driver animates.

mod node;
mod document;
mod selector;

pub use node::{Element, ElementFlags, ElementId, Presentable};
pub use document::{Document, ElementEnumerator, ElementSpec, Listener};
pub use selector::Selector;
