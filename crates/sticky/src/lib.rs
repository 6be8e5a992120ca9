//! Scroll-following "sticky" children for parent/child element pairs.
//!
//! As the document scrolls, each tracked child moves between three phases:
//! resting at the top of its parent ([`Phase::Before`]), following the
//! viewport at a fixed offset ([`Phase::Sticky`]), and resting at the bottom of
//! its parent ([`Phase::After`]). The phase lives in memory on each
//! [`TrackedPair`]; the `start`/`end` class markers on the parent and the
//! inline `position`/`top`/`width` styles on the child are written as side
//! effects of phase transitions.
//!
//! All document access goes through a [`StickyHost`].

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

pub mod bounds;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod phase;
pub mod throttle;

pub use bounds::Bounds;
pub use config::StickyConfig;
pub use controller::{SkippedParent, StickyController, TrackedPair};
pub use error::StickyError;
pub use host::{ElementKey, HostEvent, Position, StickyHost, StyleProperty, StyleValue};
pub use phase::{ChildStyle, END_MARKER, Phase, START_MARKER, StickyPlacement};
pub use throttle::ResizeThrottle;
