//! # Page Configuration
//!
//! Every constant the driver uses, loaded once at startup from TOML.
//! Missing sections and fields fall back to the values the home page has
//! always shipped with.
//!
//! ```toml
//! [selectors]
//! cards = ".card"
//! buttons = ".btn"
//!
//! [reveal]
//! step_ms = 200
//! offset = 20.0
//! transition_ms = 600
//! easing = "ease"
//!
//! [hover]
//! scale = 1.05
//! rest_scale = 1.0
//!
//! [clock]
//! locale = "fr-FR"
//! period_ms = 60000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::animation::Easing;
use crate::clock::ChronoFormatter;
use crate::element::{ElementSpec, Selector};
use crate::error::{UiError, UiResult};

/// Complete driver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Structural selectors for the two element classes.
    pub selectors: SelectorConfig,
    /// Card reveal timing.
    pub reveal: RevealConfig,
    /// Button hover feedback.
    pub hover: HoverConfig,
    /// Localized clock.
    pub clock: ClockConfig,
    /// Page identity and outline.
    pub page: PageConfig,
}

impl UiConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] on syntax errors, unknown fields,
    /// bad selectors, or out-of-range values.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Io`] if the file exists but cannot be read, or any
    /// error of [`UiConfig::from_toml_str`].
    pub fn load(path: &Path) -> UiResult<Self> {
        if !path.exists() {
            tracing::debug!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] naming the offending field, or
    /// [`UiError::UnknownLocale`] if the clock locale has no table.
    pub fn validate(&self) -> UiResult<()> {
        let bad = |msg: &str| Err(UiError::InvalidConfig(msg.to_owned()));

        if self.clock.period_ms == 0 {
            return bad("clock.period_ms must be greater than zero");
        }
        if !(0.0..=1000.0).contains(&self.reveal.offset) {
            return bad("reveal.offset must be within 0..=1000");
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.hover.scale) || !positive(self.hover.rest_scale) {
            return bad("hover scales must be positive and finite");
        }
        if self.clock.locale.trim().is_empty() {
            return bad("clock.locale must not be empty");
        }
        ChronoFormatter::new(
            &self.clock.locale,
            &self.clock.date_format,
            &self.clock.time_format,
        )?;
        Ok(())
    }
}

/// Selectors for the element enumerator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    /// Elements revealed on load.
    pub cards: Selector,
    /// Elements that scale on hover.
    pub buttons: Selector,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            cards: Selector::class("card"),
            buttons: Selector::class("btn"),
        }
    }
}

/// Card reveal timing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Delay between consecutive cards, in ms.
    pub step_ms: u64,
    /// Initial downward displacement, in layout units.
    pub offset: f32,
    /// Fade/slide transition length, in ms.
    pub transition_ms: u64,
    /// Transition timing function.
    pub easing: Easing,
}

impl RevealConfig {
    /// Delay between consecutive cards.
    #[must_use]
    pub const fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    /// Transition length.
    #[must_use]
    pub const fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            step_ms: 200,
            offset: 20.0,
            transition_ms: 600,
            easing: Easing::Ease,
        }
    }
}

/// Button hover feedback.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoverConfig {
    /// Scale while the pointer is over the button.
    pub scale: f32,
    /// Scale once the pointer leaves.
    pub rest_scale: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            scale: 1.05,
            rest_scale: 1.0,
        }
    }
}

/// Localized clock.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// BCP 47 style locale tag (`fr-FR`).
    pub locale: String,
    /// strftime pattern for the date line.
    pub date_format: String,
    /// strftime pattern for the time.
    pub time_format: String,
    /// Refresh period, in ms.
    pub period_ms: u64,
}

impl ClockConfig {
    /// Refresh period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            locale: "fr-FR".to_owned(),
            date_format: "%A %-d %B %Y".to_owned(),
            time_format: "%H:%M:%S".to_owned(),
            period_ms: 60_000,
        }
    }
}

/// Page identity and outline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Name used in the load announcement.
    pub name: String,
    /// Element outline the runtime builds the document from.
    pub layout: Vec<ElementSpec>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            name: "Microservice Banque".to_owned(),
            layout: Vec::new(),
        }
    }
}
