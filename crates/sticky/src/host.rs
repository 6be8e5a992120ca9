//! Capabilities the controller consumes from its rendering host.
//!
//! The controller never touches a real document directly. Everything it reads
//! (geometry, scroll offset, time) and everything it writes (inline styles and
//! class markers) goes through [`StickyHost`], so any document model can drive
//! it and tests can substitute an in-memory one.

use core::fmt::{Display, Formatter, Result as FmtResult};
use core::time::Duration;

/// A stable handle for an element owned by the host.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct ElementKey(pub u64);

/// Window-level events the controller listens to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum HostEvent {
    Scroll,
    Resize,
}

impl HostEvent {
    /// The DOM event type name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
        }
    }
}

/// Inline style properties written on child elements.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum StyleProperty {
    Position,
    Top,
    Width,
}

impl StyleProperty {
    /// The CSS property name.
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Top => "top",
            Self::Width => "width",
        }
    }
}

/// The `position` keywords the controller uses.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Position {
    Absolute,
    Fixed,
}

/// A value for one of the [`StyleProperty`] slots.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum StyleValue {
    Position(Position),
    Px(f64),
    Percent(f64),
}

impl Display for StyleValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Position(Position::Absolute) => formatter.write_str("absolute"),
            Self::Position(Position::Fixed) => formatter.write_str("fixed"),
            Self::Px(pixels) => write!(formatter, "{pixels}px"),
            Self::Percent(percent) => write!(formatter, "{percent}%"),
        }
    }
}

/// Document, viewport and clock access for a [`StickyController`](crate::StickyController).
///
/// Hosts must tolerate unknown keys: geometry queries return `0.0` and
/// mutations are no-ops for elements that no longer exist.
pub trait StickyHost {
    /// All elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<ElementKey>;

    /// Descendants of `scope` matching `selector`, in document order.
    fn query_selector_within(&self, scope: ElementKey, selector: &str) -> Vec<ElementKey>;

    /// Top edge of the element's bounding rectangle, relative to the viewport.
    fn bounding_rect_top(&self, element: ElementKey) -> f64;

    fn client_height(&self, element: ElementKey) -> f64;

    fn client_width(&self, element: ElementKey) -> f64;

    /// Current vertical scroll offset of the document.
    fn scroll_offset(&self) -> f64;

    /// Monotonic time since an arbitrary host origin.
    fn now(&self) -> Duration;

    /// Register interest in a window event. Registrations are not deduplicated.
    fn add_event_listener(&mut self, event: HostEvent);

    fn set_style(&mut self, element: ElementKey, property: StyleProperty, value: StyleValue);

    fn add_class(&mut self, element: ElementKey, class: &str);

    fn remove_class(&mut self, element: ElementKey, class: &str);

    fn has_class(&self, element: ElementKey, class: &str) -> bool;
}
