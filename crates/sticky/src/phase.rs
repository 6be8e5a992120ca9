//! Positioning phases and the child styles that realise them.

use crate::host::{ElementKey, Position, StickyHost, StyleProperty, StyleValue};

/// Class added to a parent whose child rests at the parent's top.
pub const START_MARKER: &str = "start";
/// Class added to a parent whose child rests at the parent's bottom.
pub const END_MARKER: &str = "end";

/// Where a child sits relative to its parent and the viewport.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    /// The parent is still below the scroll position; the child rests at its top.
    Before,
    /// The scroll position is inside the parent; the child follows the viewport.
    Sticky,
    /// The parent has scrolled past; the child rests at its bottom.
    After,
}

impl Phase {
    /// The class marker written on the parent while in this phase.
    pub const fn marker(self) -> Option<&'static str> {
        match self {
            Self::Before => Some(START_MARKER),
            Self::Sticky => None,
            Self::After => Some(END_MARKER),
        }
    }
}

/// Sub-state of [`Phase::Sticky`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StickyPlacement {
    /// Fixed to the viewport at the configured offset.
    Floating,
    /// Absolutely positioned against the parent's bottom edge.
    Docked,
}

/// The three inline properties the controller owns on a child element.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ChildStyle {
    pub position: Position,
    pub top: f64,
    pub width: StyleValue,
}

impl ChildStyle {
    /// Resting at the top of the parent.
    pub const fn at_start() -> Self {
        Self {
            position: Position::Absolute,
            top: 0.0,
            width: StyleValue::Percent(100.0),
        }
    }

    /// Resting at the bottom of the parent.
    pub const fn at_end(rest_bottom: f64) -> Self {
        Self {
            position: Position::Absolute,
            top: rest_bottom,
            width: StyleValue::Percent(100.0),
        }
    }

    /// Following the viewport, sized to the parent's rendered width.
    pub const fn sticky(placement: StickyPlacement, offset: f64, rest_bottom: f64, width: f64) -> Self {
        match placement {
            StickyPlacement::Floating => Self {
                position: Position::Fixed,
                top: offset,
                width: StyleValue::Px(width),
            },
            StickyPlacement::Docked => Self {
                position: Position::Absolute,
                top: rest_bottom,
                width: StyleValue::Px(width),
            },
        }
    }
}

/// Last values written to a child, per property.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct WrittenStyle {
    position: Option<StyleValue>,
    top: Option<StyleValue>,
    width: Option<StyleValue>,
}

impl WrittenStyle {
    fn slot(&mut self, property: StyleProperty) -> &mut Option<StyleValue> {
        match property {
            StyleProperty::Position => &mut self.position,
            StyleProperty::Top => &mut self.top,
            StyleProperty::Width => &mut self.width,
        }
    }

    /// Write `value` unless it is already what we last wrote (or `force` is set).
    /// Returns whether the host was touched.
    pub fn write<H: StickyHost + ?Sized>(
        &mut self,
        host: &mut H,
        element: ElementKey,
        property: StyleProperty,
        value: StyleValue,
        force: bool,
    ) -> bool {
        let slot = self.slot(property);
        if !force && *slot == Some(value) {
            return false;
        }
        host.set_style(element, property, value);
        *slot = Some(value);
        true
    }
}
