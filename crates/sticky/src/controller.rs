//! Registry of tracked parent/child pairs and the scroll-driven state machine.

use log::{debug, info, trace, warn};
use smallvec::SmallVec;

use crate::bounds::Bounds;
use crate::config::StickyConfig;
use crate::error::StickyError;
use crate::host::{ElementKey, HostEvent, StickyHost, StyleProperty, StyleValue};
use crate::phase::{ChildStyle, END_MARKER, Phase, START_MARKER, StickyPlacement, WrittenStyle};
use crate::throttle::ResizeThrottle;

/// One parent container and the child that follows the viewport inside it.
#[derive(Clone, Debug)]
pub struct TrackedPair {
    parent: ElementKey,
    child: ElementKey,
    bounds: Bounds,
    /// `None` until the first evaluation unless the parent already carried a marker.
    phase: Option<Phase>,
    placement: Option<StickyPlacement>,
    written: WrittenStyle,
}

impl TrackedPair {
    fn new<H: StickyHost>(host: &H, parent: ElementKey, child: ElementKey) -> Self {
        let phase = if host.has_class(parent, START_MARKER) {
            Some(Phase::Before)
        } else if host.has_class(parent, END_MARKER) {
            Some(Phase::After)
        } else {
            None
        };
        Self {
            parent,
            child,
            bounds: Bounds::default(),
            phase,
            placement: None,
            written: WrittenStyle::default(),
        }
    }

    pub const fn parent(&self) -> ElementKey {
        self.parent
    }

    pub const fn child(&self) -> ElementKey {
        self.child
    }

    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub const fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// How the child is held while [`Phase::Sticky`]; `None` in the other phases.
    pub const fn placement(&self) -> Option<StickyPlacement> {
        self.placement
    }

    /// Swap the parent's class marker for `next`'s and record the new phase.
    fn enter<H: StickyHost>(&mut self, host: &mut H, next: Phase) {
        if self.phase == Some(next) {
            return;
        }
        if let Some(marker) = self.phase.and_then(Phase::marker) {
            host.remove_class(self.parent, marker);
        }
        if let Some(marker) = next.marker() {
            host.add_class(self.parent, marker);
        }
        debug!(
            "sticky: parent {} {:?} -> {next:?}",
            self.parent.0, self.phase
        );
        self.phase = Some(next);
    }

    fn apply<H: StickyHost>(&mut self, host: &mut H, style: ChildStyle, force: bool) {
        let child = self.child;
        self.written.write(
            host,
            child,
            StyleProperty::Position,
            StyleValue::Position(style.position),
            force,
        );
        self.written
            .write(host, child, StyleProperty::Width, style.width, force);
        self.written
            .write(host, child, StyleProperty::Top, StyleValue::Px(style.top), force);
    }

    /// Evaluate this pair at `scroll_position`. The three branches are tried
    /// in order and at most one fires.
    fn evaluate<H: StickyHost>(&mut self, host: &mut H, scroll_position: f64, offset: f64) {
        let bounds = self.bounds;
        if bounds.contains_sticky(scroll_position, offset) {
            self.enter(host, Phase::Sticky);
            let width = host.client_width(self.parent);
            let child_height = host.client_height(self.child);
            let rest_bottom = host.client_height(self.parent) - child_height;
            let placement = if bounds.bottom - offset <= scroll_position + child_height {
                StickyPlacement::Docked
            } else {
                StickyPlacement::Floating
            };
            if self.placement != Some(placement) {
                trace!("sticky: parent {} placement {placement:?}", self.parent.0);
            }
            self.placement = Some(placement);
            self.apply(
                host,
                ChildStyle::sticky(placement, offset, rest_bottom, width),
                false,
            );
        } else if bounds.top > scroll_position {
            if self.phase != Some(Phase::Before) {
                self.enter(host, Phase::Before);
                self.placement = None;
                self.apply(host, ChildStyle::at_start(), true);
            }
        } else if bounds.bottom < scroll_position && self.phase != Some(Phase::After) {
            let rest_bottom = host.client_height(self.parent) - host.client_height(self.child);
            self.enter(host, Phase::After);
            self.placement = None;
            self.apply(host, ChildStyle::at_end(rest_bottom), true);
        }
    }
}

/// A parent left out of the registry because it did not contain exactly one child.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SkippedParent {
    pub parent: ElementKey,
    pub matches: usize,
}

/// Drives sticky children for every parent matched by a [`StickyConfig`].
///
/// The controller owns its host. Scroll and resize notifications reach it
/// through [`dispatch`](Self::dispatch) once [`init`](Self::init) has
/// registered the listeners.
pub struct StickyController<H: StickyHost> {
    host: H,
    config: StickyConfig,
    scroll_position: f64,
    throttle: ResizeThrottle,
    pairs: Vec<TrackedPair>,
    skipped: Vec<SkippedParent>,
    listeners: SmallVec<HostEvent, 2>,
}

impl<H: StickyHost> StickyController<H> {
    /// Resolve every parent/child pair and capture the initial scroll position.
    ///
    /// Parents that do not contain exactly one child are skipped with a
    /// warning, or rejected when `config.strict` is set.
    ///
    /// # Errors
    /// Returns [`StickyError::Config`] for an invalid configuration and
    /// [`StickyError::ChildMatch`] for a malformed parent in strict mode.
    pub fn new(host: H, config: StickyConfig) -> Result<Self, StickyError> {
        config.validate()?;
        let parents = host.query_selector_all(&config.parent);
        let mut pairs = Vec::with_capacity(parents.len());
        let mut skipped = Vec::new();
        for parent in parents {
            let children = host.query_selector_within(parent, &config.child);
            if let [child] = children.as_slice() {
                pairs.push(TrackedPair::new(&host, parent, *child));
                continue;
            }
            if config.strict {
                return Err(StickyError::ChildMatch {
                    parent,
                    matches: children.len(),
                });
            }
            warn!(
                "sticky: parent {} has {} elements matching '{}', skipping",
                parent.0,
                children.len(),
                config.child
            );
            skipped.push(SkippedParent {
                parent,
                matches: children.len(),
            });
        }
        info!(
            "sticky: tracking {} pair(s) for '{}' / '{}' (offset {}px, {} skipped)",
            pairs.len(),
            config.parent,
            config.child,
            config.interval,
            skipped.len()
        );
        Ok(Self {
            scroll_position: host.scroll_offset(),
            throttle: ResizeThrottle::from_duration(config.resize_duration()),
            host,
            config,
            pairs,
            skipped,
            listeners: SmallVec::new(),
        })
    }

    /// Measure every parent and register scroll and resize listeners.
    ///
    /// Meant to run once. Calling it again re-measures and registers the
    /// listeners a second time, so every later event is handled twice.
    pub fn init(&mut self) {
        if !self.listeners.is_empty() {
            warn!("sticky: init() called again, listeners will be registered twice");
        }
        self.refresh();
        for event in [HostEvent::Resize, HostEvent::Scroll] {
            self.host.add_event_listener(event);
            self.listeners.push(event);
        }
    }

    /// Run the handler for `event` once per registered listener of that kind.
    /// Returns how many handlers ran; zero before [`init`](Self::init).
    pub fn dispatch(&mut self, event: HostEvent) -> usize {
        let count = self
            .listeners
            .iter()
            .filter(|registered| **registered == event)
            .count();
        for _ in 0..count {
            match event {
                HostEvent::Scroll => self.on_scroll(),
                HostEvent::Resize => {
                    self.on_resize();
                }
            }
        }
        count
    }

    /// Read the current scroll offset and re-evaluate every pair.
    pub fn on_scroll(&mut self) {
        self.scroll_position = self.host.scroll_offset();
        self.evaluate();
    }

    /// Re-measure and re-evaluate, unless the previous resize ran within the
    /// throttle window. Returns whether the work ran.
    pub fn on_resize(&mut self) -> bool {
        let now = self.host.now();
        if !self.throttle.allow(now) {
            trace!("sticky: resize at {now:?} dropped by throttle");
            return false;
        }
        self.refresh();
        self.evaluate();
        true
    }

    /// Re-measure the cached bounds of every parent.
    pub fn refresh(&mut self) {
        for pair in &mut self.pairs {
            pair.bounds = Bounds::measure(&self.host, pair.parent);
        }
    }

    /// Evaluate every pair against the last observed scroll position.
    pub fn evaluate(&mut self) {
        let offset = self.config.interval;
        for pair in &mut self.pairs {
            pair.evaluate(&mut self.host, self.scroll_position, offset);
        }
    }

    pub fn pairs(&self) -> &[TrackedPair] {
        &self.pairs
    }

    /// Phase of the pair at `index`, in document order.
    pub fn phase(&self, index: usize) -> Option<Phase> {
        self.pairs.get(index).and_then(TrackedPair::phase)
    }

    pub fn skipped(&self) -> &[SkippedParent] {
        &self.skipped
    }

    pub const fn scroll_position(&self) -> f64 {
        self.scroll_position
    }

    pub const fn offset(&self) -> f64 {
        self.config.interval
    }

    pub const fn config(&self) -> &StickyConfig {
        &self.config
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: HostEvent) -> usize {
        self.listeners
            .iter()
            .filter(|registered| **registered == event)
            .count()
    }

    /// Resize calls dropped by the throttle so far.
    pub const fn dropped_resizes(&self) -> u64 {
        self.throttle.dropped()
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
