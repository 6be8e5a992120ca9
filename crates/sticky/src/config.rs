//! Controller configuration.
//!
//! A configuration names the parent containers, the child to move inside each
//! of them, and the pixel offset from the viewport top at which children stick.
//! It can be built programmatically, parsed from JSON, or read from the
//! environment.

use core::time::Duration;
use std::env;

use anyhow::{Context as _, Result};
use serde::Deserialize;

use crate::error::StickyError;
use crate::throttle::DEFAULT_RESIZE_DURATION;

/// Options for a [`StickyController`](crate::StickyController).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct StickyConfig {
    /// Selector matching the parent containers.
    pub parent: String,
    /// Selector matching the moving child inside each parent.
    pub child: String,
    /// Pixel offset from the viewport top while a child floats.
    #[serde(default)]
    pub interval: f64,
    /// Duration spread over the throttle's frame ticks for resize handling.
    #[serde(default = "default_resize_duration_ms")]
    pub resize_duration_ms: f64,
    /// Fail construction when a parent has zero or several matching children
    /// instead of skipping it.
    #[serde(default)]
    pub strict: bool,
}

fn default_resize_duration_ms() -> f64 {
    DEFAULT_RESIZE_DURATION.as_millis() as f64
}

impl StickyConfig {
    /// Construct a configuration with a zero offset and default resize timing.
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
            interval: 0.0,
            resize_duration_ms: default_resize_duration_ms(),
            strict: false,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: f64) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_resize_duration_ms(mut self, millis: f64) -> Self {
        self.resize_duration_ms = millis;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse a JSON object such as `{"parent": ".section", "child": ".nav", "interval": 20}`.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed, carries unknown keys, or
    /// fails [`validate`](Self::validate).
    pub fn from_json(source: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(source).context("failed to parse sticky configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `STICKY_PARENT`: parent selector (required)
    /// - `STICKY_CHILD`: child selector (required)
    /// - `STICKY_INTERVAL`: pixel offset (default: 0)
    /// - `STICKY_RESIZE_DURATION_MS`: resize throttle duration (default: 1000)
    /// - `STICKY_STRICT`: set to "1" to reject malformed parents
    ///
    /// # Errors
    /// Returns an error if a required variable is missing, a number does not
    /// parse, or the result fails [`validate`](Self::validate).
    pub fn from_env() -> Result<Self> {
        let parent = env::var("STICKY_PARENT").context("STICKY_PARENT is not set")?;
        let child = env::var("STICKY_CHILD").context("STICKY_CHILD is not set")?;
        let interval = match env::var("STICKY_INTERVAL") {
            Ok(val) => val
                .trim()
                .parse::<f64>()
                .with_context(|| format!("STICKY_INTERVAL is not a number: {val:?}"))?,
            Err(_) => 0.0,
        };
        let resize_duration_ms = match env::var("STICKY_RESIZE_DURATION_MS") {
            Ok(val) => val
                .trim()
                .parse::<f64>()
                .with_context(|| format!("STICKY_RESIZE_DURATION_MS is not a number: {val:?}"))?,
            Err(_) => default_resize_duration_ms(),
        };
        let strict = env::var("STICKY_STRICT").ok().as_deref() == Some("1");
        let config = Self {
            parent,
            child,
            interval,
            resize_duration_ms,
            strict,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that both selectors are present and the numbers are usable.
    ///
    /// # Errors
    /// Returns [`StickyError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<(), StickyError> {
        if self.parent.trim().is_empty() {
            return Err(StickyError::Config(String::from("parent selector is empty")));
        }
        if self.child.trim().is_empty() {
            return Err(StickyError::Config(String::from("child selector is empty")));
        }
        if !self.interval.is_finite() || self.interval < 0.0 {
            return Err(StickyError::Config(format!(
                "interval must be a finite, non-negative number of pixels, got {}",
                self.interval
            )));
        }
        if !self.resize_duration_ms.is_finite() || self.resize_duration_ms <= 0.0 {
            return Err(StickyError::Config(format!(
                "resize duration must be a positive number of milliseconds, got {}",
                self.resize_duration_ms
            )));
        }
        Ok(())
    }

    /// Get the resize throttle duration as a `Duration`.
    pub fn resize_duration(&self) -> Duration {
        Duration::from_micros((self.resize_duration_ms * 1000.0).round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_json() {
        let config = StickyConfig::from_json(r#"{"parent": ".section", "child": ".nav"}"#)
            .unwrap();
        assert_eq!(config, StickyConfig::new(".section", ".nav"));
        assert_eq!(config.resize_duration(), Duration::from_millis(1000));
    }

    #[test]
    fn camel_case_keys() {
        let config = StickyConfig::from_json(
            r#"{"parent": ".a", "child": ".b", "interval": 20, "resizeDurationMs": 600, "strict": true}"#,
        )
        .unwrap();
        assert!((config.interval - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.resize_duration(), Duration::from_millis(600));
        assert!(config.strict);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = StickyConfig::from_json(r#"{"parent": ".a", "child": ".b", "offset": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_child_is_rejected() {
        assert!(StickyConfig::from_json(r#"{"parent": ".a"}"#).is_err());
        let err = StickyConfig::new(".a", "  ").validate().unwrap_err();
        assert_eq!(err, StickyError::Config(String::from("child selector is empty")));
    }

    #[test]
    fn negative_interval_is_rejected() {
        let err = StickyConfig::new(".a", ".b")
            .with_interval(-1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, StickyError::Config(_)));
        assert!(
            StickyConfig::new(".a", ".b")
                .with_resize_duration_ms(0.0)
                .validate()
                .is_err()
        );
    }
}
