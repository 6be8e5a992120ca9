//! Error type for controller construction.

use core::error::Error;
use core::fmt::{Display, Formatter, Result as FmtResult};

use crate::host::ElementKey;

/// Errors raised while building a [`StickyController`](crate::StickyController).
///
/// Runtime evaluation never fails; only malformed configuration is reported.
#[derive(Debug, Clone, PartialEq)]
pub enum StickyError {
    /// The configuration is missing a selector or carries an invalid number.
    Config(String),
    /// A parent did not contain exactly one element matching the child selector.
    ChildMatch {
        /// The offending parent.
        parent: ElementKey,
        /// How many children matched (anything other than one).
        matches: usize,
    },
}

impl Display for StickyError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Config(message) => write!(formatter, "ConfigError: {message}"),
            Self::ChildMatch { parent, matches } => write!(
                formatter,
                "ChildMatchError: parent {} has {matches} matching children, expected 1",
                parent.0
            ),
        }
    }
}

impl Error for StickyError {}
