//! An in-memory document: element tree, class lists, inline styles and
//! precomputed layout boxes, plus a scroll offset and a manual clock.
//!
//! There is no layout engine. Each element carries a [`LayoutBox`] in document
//! coordinates that callers set directly, and inline styles written through
//! [`StickyHost`] are stored but never fed back into geometry.

use core::mem;
use core::time::Duration;

use anyhow::{Result, anyhow};
use indextree::{Arena, Node, NodeId};
use log::{trace, warn};
use smallvec::SmallVec;
use sticky::{ElementKey, HostEvent, StickyHost, StyleProperty, StyleValue};

use crate::selector::Selector;

/// Document-absolute geometry of an element.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct LayoutBox {
    pub top: f64,
    pub height: f64,
    pub width: f64,
}

impl LayoutBox {
    pub const fn new(top: f64, height: f64, width: f64) -> Self {
        Self { top, height, width }
    }
}

/// A host call that changed (or tried to change) the document.
#[derive(Clone, PartialEq, Debug)]
pub enum Mutation {
    SetStyle {
        element: ElementKey,
        property: StyleProperty,
        value: StyleValue,
    },
    AddClass {
        element: ElementKey,
        class: String,
    },
    RemoveClass {
        element: ElementKey,
        class: String,
    },
}

#[derive(Clone, Debug)]
pub struct ElementData {
    key: ElementKey,
    tag: String,
    id: Option<String>,
    classes: SmallVec<String, 4>,
    styles: SmallVec<(StyleProperty, StyleValue), 3>,
    layout: LayoutBox,
}

impl ElementData {
    fn new(key: ElementKey, tag: &str) -> Self {
        Self {
            key,
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: SmallVec::new(),
            styles: SmallVec::new(),
            layout: LayoutBox::default(),
        }
    }

    pub const fn key(&self) -> ElementKey {
        self.key
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(class))
    }

    pub fn style(&self, property: StyleProperty) -> Option<StyleValue> {
        self.styles
            .iter()
            .find(|(existing, _)| *existing == property)
            .map(|(_, value)| *value)
    }

    pub const fn layout(&self) -> LayoutBox {
        self.layout
    }

    /// Inline styles rendered as a `style` attribute, in property order.
    pub fn css_text(&self) -> String {
        let mut styles: Vec<_> = self.styles.iter().collect();
        styles.sort_by_key(|(property, _)| *property);
        styles
            .iter()
            .map(|(property, value)| format!("{}: {value}", property.css_name()))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn set_style(&mut self, property: StyleProperty, value: StyleValue) {
        if let Some(slot) = self
            .styles
            .iter_mut()
            .find(|(existing, _)| *existing == property)
        {
            slot.1 = value;
        } else {
            self.styles.push((property, value));
        }
    }
}

/// The document tree and the window state around it.
#[derive(Debug)]
pub struct Document {
    pub(crate) arena: Arena<ElementData>,
    pub(crate) root: NodeId,
    /// `ElementKey(n)` lives at `nodes[n]`.
    nodes: Vec<NodeId>,
    scroll: f64,
    clock: Duration,
    listeners: Vec<HostEvent>,
    journal: Vec<Mutation>,
}

impl Document {
    /// The root element key (always present).
    pub const ROOT: ElementKey = ElementKey(0);

    /// Create an empty document whose root is an `html` element.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(ElementData::new(Self::ROOT, "html"));
        Self {
            arena,
            root,
            nodes: vec![root],
            scroll: 0.0,
            clock: Duration::ZERO,
            listeners: Vec::new(),
            journal: Vec::new(),
        }
    }

    fn node(&self, element: ElementKey) -> Option<NodeId> {
        usize::try_from(element.0)
            .ok()
            .and_then(|index| self.nodes.get(index))
            .copied()
    }

    pub fn element(&self, element: ElementKey) -> Option<&ElementData> {
        self.node(element)
            .and_then(|node| self.arena.get(node))
            .map(Node::get)
    }

    fn element_mut(&mut self, element: ElementKey) -> Option<&mut ElementData> {
        let node = self.node(element)?;
        self.arena.get_mut(node).map(Node::get_mut)
    }

    /// Create a detached element. It is invisible to queries until appended.
    pub fn create_element(&mut self, tag: &str) -> ElementKey {
        let key = ElementKey(self.nodes.len() as u64);
        let node = self.arena.new_node(ElementData::new(key, tag));
        self.nodes.push(node);
        key
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    /// Returns an error if either key is unknown or the append would create a cycle.
    pub fn append_child(&mut self, parent: ElementKey, child: ElementKey) -> Result<()> {
        let parent_node = self
            .node(parent)
            .ok_or_else(|| anyhow!("unknown parent element {}", parent.0))?;
        let child_node = self
            .node(child)
            .ok_or_else(|| anyhow!("unknown child element {}", child.0))?;
        parent_node
            .checked_append(child_node, &mut self.arena)
            .map_err(|error| anyhow!("cannot append {} to {}: {error}", child.0, parent.0))
    }

    /// Create an element with the given classes and box and append it to `parent`.
    ///
    /// # Errors
    /// Returns an error if `parent` is unknown.
    pub fn append_element(
        &mut self,
        parent: ElementKey,
        tag: &str,
        class: &str,
        layout: LayoutBox,
    ) -> Result<ElementKey> {
        let element = self.create_element(tag);
        self.set_attribute(element, "class", class);
        self.set_layout(element, layout);
        self.append_child(parent, element)?;
        Ok(element)
    }

    /// Set an attribute. Only `id` and `class` are modelled; others are ignored.
    pub fn set_attribute(&mut self, element: ElementKey, name: &str, value: &str) {
        let Some(data) = self.element_mut(element) else {
            warn!("sticky_dom: set_attribute on unknown element {}", element.0);
            return;
        };
        match name.to_ascii_lowercase().as_str() {
            "id" => data.id = (!value.is_empty()).then(|| value.to_owned()),
            "class" => {
                data.classes.clear();
                for token in value.split_whitespace() {
                    if !data.has_class(token) {
                        data.classes.push(token.to_ascii_lowercase());
                    }
                }
            }
            other => trace!("sticky_dom: ignoring attribute '{other}'"),
        }
    }

    pub fn set_layout(&mut self, element: ElementKey, layout: LayoutBox) {
        if let Some(data) = self.element_mut(element) {
            data.layout = layout;
        }
    }

    pub fn layout(&self, element: ElementKey) -> LayoutBox {
        self.element(element)
            .map(ElementData::layout)
            .unwrap_or_default()
    }

    pub fn style(&self, element: ElementKey, property: StyleProperty) -> Option<StyleValue> {
        self.element(element)
            .and_then(|data| data.style(property))
    }

    pub fn css_text(&self, element: ElementKey) -> String {
        self.element(element)
            .map(ElementData::css_text)
            .unwrap_or_default()
    }

    /// Scroll the window to `offset`, clamped at the top of the document.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll = offset.max(0.0);
    }

    /// Move the clock forward.
    pub fn advance(&mut self, elapsed: Duration) {
        self.clock = self.clock.saturating_add(elapsed);
    }

    pub fn listeners(&self) -> &[HostEvent] {
        &self.listeners
    }

    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    /// Drain the recorded mutations.
    pub fn take_journal(&mut self) -> Vec<Mutation> {
        mem::take(&mut self.journal)
    }

    fn query_from(&self, scope: NodeId, selector: &str) -> Vec<ElementKey> {
        let Some(parsed) = Selector::parse(selector) else {
            warn!("sticky_dom: unsupported selector '{selector}'");
            return Vec::new();
        };
        scope
            .descendants(&self.arena)
            .skip(1)
            .filter_map(|node| self.arena.get(node))
            .map(Node::get)
            .filter(|data| parsed.matches(data))
            .map(ElementData::key)
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl StickyHost for Document {
    fn query_selector_all(&self, selector: &str) -> Vec<ElementKey> {
        self.query_from(self.root, selector)
    }

    fn query_selector_within(&self, scope: ElementKey, selector: &str) -> Vec<ElementKey> {
        self.node(scope)
            .map(|node| self.query_from(node, selector))
            .unwrap_or_default()
    }

    fn bounding_rect_top(&self, element: ElementKey) -> f64 {
        self.element(element)
            .map_or(0.0, |data| data.layout.top - self.scroll)
    }

    fn client_height(&self, element: ElementKey) -> f64 {
        self.layout(element).height
    }

    fn client_width(&self, element: ElementKey) -> f64 {
        self.layout(element).width
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn now(&self) -> Duration {
        self.clock
    }

    fn add_event_listener(&mut self, event: HostEvent) {
        trace!("sticky_dom: addEventListener('{}')", event.name());
        self.listeners.push(event);
    }

    fn set_style(&mut self, element: ElementKey, property: StyleProperty, value: StyleValue) {
        self.journal.push(Mutation::SetStyle {
            element,
            property,
            value,
        });
        if let Some(data) = self.element_mut(element) {
            data.set_style(property, value);
        }
    }

    fn add_class(&mut self, element: ElementKey, class: &str) {
        self.journal.push(Mutation::AddClass {
            element,
            class: class.to_owned(),
        });
        if let Some(data) = self.element_mut(element)
            && !data.has_class(class)
        {
            data.classes.push(class.to_ascii_lowercase());
        }
    }

    fn remove_class(&mut self, element: ElementKey, class: &str) {
        self.journal.push(Mutation::RemoveClass {
            element,
            class: class.to_owned(),
        });
        if let Some(data) = self.element_mut(element) {
            data.classes
                .retain(|existing| !existing.eq_ignore_ascii_case(class));
        }
    }

    fn has_class(&self, element: ElementKey, class: &str) -> bool {
        self.element(element)
            .is_some_and(|data| data.has_class(class))
    }
}
