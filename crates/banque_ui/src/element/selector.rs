//! Structural selectors.
//!
//! Supported grammar, one compound per selector: an optional tag name
//! followed by any number of `.class` parts (`.card`, `button`,
//! `a.btn.btn-primary`). `*` matches every element.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::Element;
use crate::error::{UiError, UiResult};

/// A parsed structural selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    /// Parses selector text.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidSelector`] for empty input, empty class
    /// names, or characters outside `[A-Za-z0-9_-]`.
    pub fn parse(text: &str) -> UiResult<Self> {
        let invalid = |reason| UiError::InvalidSelector {
            selector: text.to_owned(),
            reason,
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty selector"));
        }
        if trimmed == "*" {
            return Ok(Self {
                tag: None,
                classes: Vec::new(),
            });
        }

        let mut parts = trimmed.split('.');
        let tag = match parts.next() {
            Some("") | None => None,
            Some(tag) => {
                if !is_ident(tag) {
                    return Err(invalid("tag name must be [A-Za-z0-9_-]+"));
                }
                Some(tag.to_ascii_lowercase())
            }
        };

        let mut classes = Vec::new();
        for class in parts {
            if class.is_empty() {
                return Err(invalid("empty class name"));
            }
            if !is_ident(class) {
                return Err(invalid("class name must be [A-Za-z0-9_-]+"));
            }
            classes.push(class.to_owned());
        }

        Ok(Self { tag, classes })
    }

    /// Selector matching a single class, `.name`.
    #[must_use]
    pub fn class(name: &str) -> Self {
        Self {
            tag: None,
            classes: vec![name.to_owned()],
        }
    }

    /// Returns true if `element` matches every part of the selector.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if *tag != element.tag {
                return false;
            }
        }
        self.classes.iter().all(|c| element.has_class(c))
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromStr for Selector {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => f.write_str(tag)?,
            None if self.classes.is_empty() => f.write_str("*")?,
            None => {}
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementId;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Selector::parse(".card").unwrap().to_string(), ".card");
        assert_eq!(Selector::parse("BUTTON").unwrap().to_string(), "button");
        assert_eq!(Selector::parse("a.btn.btn-primary").unwrap().to_string(), "a.btn.btn-primary");
        assert_eq!(Selector::parse("*").unwrap().to_string(), "*");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse(".").is_err());
        assert!(Selector::parse("div..card").is_err());
        assert!(Selector::parse("div > .card").is_err());
    }

    #[test]
    fn test_matching() {
        let el = Element::new(ElementId::new(1), "a")
            .with_class("btn")
            .with_class("btn-primary");

        assert!(Selector::parse(".btn").unwrap().matches(&el));
        assert!(Selector::parse("a.btn-primary").unwrap().matches(&el));
        assert!(Selector::parse("*").unwrap().matches(&el));
        assert!(!Selector::parse("button.btn").unwrap().matches(&el));
        assert!(!Selector::parse(".card").unwrap().matches(&el));
    }
}
