//! The page's element tree.
//!
//! Owns every element, the parent/child structure, and the pointer listeners
//! bound to each element. Structural queries walk the tree depth-first so
//! results come back in document order.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use super::{Element, ElementFlags, ElementId, Presentable, Selector};
use crate::error::{UiError, UiResult};
use crate::input::{PointerEvent, PointerKind};

/// Handler bound to one element; it only ever sees that element.
pub type Listener = Box<dyn FnMut(&mut dyn Presentable)>;

/// Returns the elements matching a structural selector, in document order.
pub trait ElementEnumerator {
    /// All matches for `selector`; empty when nothing matches.
    fn query_all(&self, selector: &Selector) -> Vec<ElementId>;
}

/// Declarative outline of an element and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    /// Tag name.
    pub tag: String,
    /// Class list.
    pub classes: Vec<String>,
    /// Child elements in order.
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    /// Creates a leaf outline.
    #[must_use]
    pub fn new(tag: &str, classes: &[&str]) -> Self {
        Self {
            tag: tag.to_owned(),
            classes: classes.iter().map(|c| (*c).to_owned()).collect(),
            children: Vec::new(),
        }
    }

    /// Appends a child outline.
    #[must_use]
    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// Manages the element hierarchy.
pub struct Document {
    /// Elements indexed by ID.
    elements: HashMap<ElementId, Element>,
    /// Root element IDs.
    roots: Vec<ElementId>,
    /// Parent-child relationships.
    children: HashMap<ElementId, Vec<ElementId>>,
    /// Pointer listeners per element, in registration order.
    listeners: HashMap<ElementId, Vec<(PointerKind, Listener)>>,
    /// ID counter for generating unique IDs.
    next_id: u64,
}

impl Document {
    /// Creates a new empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: HashMap::with_capacity(64),
            roots: Vec::with_capacity(4),
            children: HashMap::with_capacity(64),
            listeners: HashMap::new(),
            next_id: 1,
        }
    }

    /// Builds a document from outlines; each outline becomes a root.
    #[must_use]
    pub fn from_specs(specs: &[ElementSpec]) -> Self {
        let mut doc = Self::new();
        for spec in specs {
            doc.insert_spec(None, spec);
        }
        doc
    }

    fn insert_spec(&mut self, parent: Option<ElementId>, spec: &ElementSpec) {
        let mut element = self.create(&spec.tag);
        element.classes.clone_from(&spec.classes);
        let id = match parent {
            Some(parent) => self.append_child(parent, element),
            None => self.add_root(element),
        };
        for child in &spec.children {
            self.insert_spec(Some(id), child);
        }
    }

    /// Creates a detached element with a fresh ID.
    pub fn create(&mut self, tag: &str) -> Element {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        Element::new(id, tag)
    }

    /// Registers a root element.
    pub fn add_root(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.insert(id, element);
        self.roots.push(id);
        self.children.insert(id, Vec::new());
        id
    }

    /// Appends a child element to a parent.
    pub fn append_child(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let id = element.id;
        element.parent = Some(parent);

        self.elements.insert(id, element);
        self.children.entry(parent).or_default().push(id);
        self.children.insert(id, Vec::new());
        id
    }

    /// Gets an element by ID.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Gets mutable access to an element.
    #[must_use]
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Returns the children of an element.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns all root elements.
    #[must_use]
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns all element IDs in depth-first (document) order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = ElementId> + '_ {
        DocumentOrder {
            doc: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Binds a pointer listener to one element.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownElement`] if `id` is not in the document.
    pub fn add_listener(&mut self, id: ElementId, kind: PointerKind, listener: Listener) -> UiResult<()> {
        if !self.elements.contains_key(&id) {
            return Err(UiError::UnknownElement(id.raw()));
        }
        self.listeners.entry(id).or_default().push((kind, listener));
        Ok(())
    }

    /// Number of listeners bound to `id`.
    #[must_use]
    pub fn listener_count(&self, id: ElementId) -> usize {
        self.listeners.get(&id).map_or(0, Vec::len)
    }

    /// Delivers a pointer event to its target, returning how many listeners ran.
    ///
    /// Events for unknown elements are dropped.
    pub fn dispatch(&mut self, event: PointerEvent) -> usize {
        let Some(element) = self.elements.get_mut(&event.target) else {
            return 0;
        };
        match event.kind {
            PointerKind::Enter => element.flags.set(ElementFlags::HOVERED),
            PointerKind::Leave => element.flags.clear(ElementFlags::HOVERED),
        }

        let Some(listeners) = self.listeners.get_mut(&event.target) else {
            return 0;
        };
        let mut ran = 0;
        for (kind, listener) in listeners.iter_mut() {
            if *kind == event.kind {
                listener(&mut *element);
                ran += 1;
            }
        }
        ran
    }

    /// Advances every running transition by `dt` seconds.
    ///
    /// Returns true while any element is still animating.
    pub fn advance(&mut self, dt: f32) -> bool {
        let mut animating = false;
        for element in self.elements.values_mut() {
            element.advance(dt);
            animating |= element.is_animating();
        }
        animating
    }

    /// Returns true if any element is mid-transition.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.elements.values().any(Element::is_animating)
    }
}

impl ElementEnumerator for Document {
    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.iter_dfs()
            .filter(|id| self.elements.get(id).is_some_and(|el| selector.matches(el)))
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.elements.len())
            .field("roots", &self.roots)
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

/// Depth-first iterator over the document.
struct DocumentOrder<'a> {
    doc: &'a Document,
    stack: Vec<ElementId>,
}

impl Iterator for DocumentOrder<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Push children in reverse order so they're processed left-to-right
        if let Some(children) = self.doc.children.get(&id) {
            for &child in children.iter().rev() {
                self.stack.push(child);
            }
        }

        Some(id)
    }
}
