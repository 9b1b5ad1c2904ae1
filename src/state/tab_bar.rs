// Tab bar widget state.
// Tracks active/hovered tabs, measures highlight geometry, and runs content transitions.

use std::fmt;
use std::time::Instant;

use super::geometry::{ElementHandle, Geometry, LayoutProbe};
use super::motion::{Curve, HIGHLIGHT_DURATION, Spring, Tween};
use super::settle::SettleSchedule;
use super::transition::{ContentTransition, ContentVisual, Direction, Phase};

/// A single tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Unique identifier within one tab bar.
    pub id: String,
    pub label: String,
    /// Body shown below the bar while this tab is active.
    pub content: Option<String>,
}

impl Tab {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// One content layer to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentLayer {
    /// Index of the tab whose content this layer shows.
    pub index: usize,
    pub visual: ContentVisual,
}

/// The animated content area below the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRegion {
    pub height: f32,
    /// Layers in draw order: outgoing first, incoming last.
    pub layers: Vec<ContentLayer>,
}

type ChangeHandler = Box<dyn FnMut(&str)>;

/// Horizontal tab bar with hover highlight, active underline, and sliding content.
pub struct TabBar {
    tabs: Vec<Tab>,
    active_index: usize,
    hovered_index: Option<usize>,
    direction: Direction,
    /// Active tab id supplied by the owner, if the bar is controlled.
    controlled_id: Option<String>,
    on_change: Option<ChangeHandler>,
    hover_geometry: Tween<Geometry>,
    hover_opacity: Tween<f32>,
    active_geometry: Tween<Geometry>,
    content_height: Tween<f32>,
    height_measured: bool,
    transition: ContentTransition,
    settle: SettleSchedule,
    mounted: bool,
}

impl TabBar {
    pub fn new(tabs: Vec<Tab>) -> Self {
        let highlight = Curve::EaseOut(HIGHLIGHT_DURATION);
        let spring = Spring::default();
        Self {
            tabs,
            active_index: 0,
            hovered_index: None,
            direction: Direction::None,
            controlled_id: None,
            on_change: None,
            hover_geometry: Tween::new(Geometry::default(), highlight),
            hover_opacity: Tween::new(0.0, highlight),
            active_geometry: Tween::new(Geometry::default(), highlight),
            content_height: Tween::new(0.0, Curve::Spring(spring)),
            height_measured: false,
            transition: ContentTransition::new(spring),
            settle: SettleSchedule::new(),
            mounted: false,
        }
    }

    /// Start with the tab whose id matches `id` active, falling back to the first tab.
    pub fn with_active_tab(mut self, id: Option<&str>) -> Self {
        self.controlled_id = id.map(str::to_string);
        self.active_index = self
            .controlled_id
            .as_deref()
            .and_then(|id| self.position(id))
            .unwrap_or(0);
        self
    }

    /// Callback invoked with the tab id whenever the user selects a tab.
    pub fn with_on_change<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Attach to a rendered layout: measure the active tab and animate its content in.
    pub fn mount(&mut self, probe: &impl LayoutProbe, now: Instant) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.activate(probe, now);

        if self.has_content(self.active_index) {
            self.transition
                .start(Some(self.active_index), None, self.direction, now);
        }
    }

    /// Detach from the layout. Pending measurements are cancelled.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.settle.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Select the tab at `index` on behalf of the user.
    ///
    /// Ignored when `index` is already active, out of range, or a content
    /// transition is still running. Returns whether the selection happened.
    pub fn select(&mut self, index: usize, probe: &impl LayoutProbe, now: Instant) -> bool {
        if index >= self.tabs.len() || index == self.active_index {
            return false;
        }
        if self.is_animating() {
            tracing::debug!(index, "Selection rejected while transition is running");
            return false;
        }

        self.move_to(index, probe, now);

        if let Some(handler) = self.on_change.as_mut() {
            handler(&self.tabs[index].id);
        }
        true
    }

    /// Select the tab to the right of the active one.
    pub fn select_next(&mut self, probe: &impl LayoutProbe, now: Instant) -> bool {
        self.select(self.active_index + 1, probe, now)
    }

    /// Select the tab to the left of the active one.
    pub fn select_previous(&mut self, probe: &impl LayoutProbe, now: Instant) -> bool {
        match self.active_index.checked_sub(1) {
            Some(index) => self.select(index, probe, now),
            None => false,
        }
    }

    /// Point at a tab, or at nothing. Only moves the hover highlight.
    pub fn hover(&mut self, index: Option<usize>, probe: &impl LayoutProbe, now: Instant) {
        let index = index.filter(|i| *i < self.tabs.len());
        if index == self.hovered_index {
            return;
        }
        self.hovered_index = index;

        match index {
            Some(index) => {
                if let Some(geometry) = self.measure(index, probe) {
                    self.hover_geometry.retarget(geometry, now);
                }
                self.hover_opacity.retarget(1.0, now);
            }
            None => self.hover_opacity.retarget(0.0, now),
        }
    }

    /// Follow an owner-supplied active tab id.
    ///
    /// Moves to the matching tab without invoking the change callback.
    /// Unknown ids leave the selection alone. Returns whether the active tab changed.
    pub fn sync_active_tab(
        &mut self,
        id: Option<&str>,
        probe: &impl LayoutProbe,
        now: Instant,
    ) -> bool {
        self.controlled_id = id.map(str::to_string);
        self.apply_controlled(probe, now)
    }

    /// Replace the tab collection.
    pub fn set_tabs(&mut self, tabs: Vec<Tab>, probe: &impl LayoutProbe, now: Instant) {
        self.tabs = tabs;

        if self.hovered_index.is_some_and(|i| i >= self.tabs.len()) {
            self.hovered_index = None;
            self.hover_opacity.retarget(0.0, now);
        }
        if self.active_index >= self.tabs.len() {
            self.active_index = self.tabs.len().saturating_sub(1);
        }
        if self.tabs.is_empty() {
            self.transition.clear();
        }

        if !self.apply_controlled(probe, now) {
            self.activate(probe, now);
        }
    }

    /// Advance timers: fire due settle samples and finish completed animations.
    pub fn tick(&mut self, probe: &impl LayoutProbe, now: Instant) {
        if !self.mounted {
            return;
        }
        if self.settle.poll_timers(now) > 0 {
            self.measure_active(probe, now);
        }
        self.transition.advance(now);
    }

    /// Notify the bar that a frame was rendered.
    pub fn frame(&mut self, probe: &impl LayoutProbe, now: Instant) {
        if self.mounted && self.settle.poll_frame() > 0 {
            self.measure_active(probe, now);
        }
    }

    /// Feed the measured height of the displayed content.
    /// The first measurement is applied immediately, later ones animate.
    pub fn set_content_height(&mut self, height: f32, now: Instant) {
        if self.height_measured {
            self.content_height.retarget(height, now);
        } else {
            self.content_height.snap(height);
            self.height_measured = true;
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active_index)
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_animating()
    }

    pub fn phase(&self) -> Phase {
        self.transition.phase()
    }

    /// Number of settle samples still waiting to fire.
    pub fn pending_samples(&self) -> usize {
        self.settle.pending()
    }

    /// Underline placement, or `None` when there are no tabs.
    pub fn active_geometry(&self, now: Instant) -> Option<Geometry> {
        if self.tabs.is_empty() {
            None
        } else {
            Some(self.active_geometry.value(now))
        }
    }

    /// Hover highlight placement. Pair with [`TabBar::hover_opacity`].
    pub fn hover_geometry(&self, now: Instant) -> Geometry {
        self.hover_geometry.value(now)
    }

    pub fn hover_opacity(&self, now: Instant) -> f32 {
        self.hover_opacity.value(now).clamp(0.0, 1.0)
    }

    pub fn content_height(&self, now: Instant) -> f32 {
        self.content_height.value(now).max(0.0)
    }

    /// Content area to draw, or `None` when the active tab has no content.
    pub fn content_region(&self, now: Instant) -> Option<ContentRegion> {
        if !self.has_content(self.active_index) {
            return None;
        }

        let mut layers = Vec::with_capacity(2);
        if let Some((index, visual)) = self.transition.outgoing(now) {
            if self.has_content(index) {
                layers.push(ContentLayer { index, visual });
            }
        }
        let incoming = self
            .transition
            .incoming(now)
            .filter(|(index, _)| *index == self.active_index);
        let (index, visual) = incoming.unwrap_or((self.active_index, ContentVisual::ACTIVE));
        layers.push(ContentLayer { index, visual });

        Some(ContentRegion {
            height: self.content_height(now),
            layers,
        })
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    fn has_content(&self, index: usize) -> bool {
        self.tabs
            .get(index)
            .is_some_and(|tab| tab.content.is_some())
    }

    fn apply_controlled(&mut self, probe: &impl LayoutProbe, now: Instant) -> bool {
        let target = self
            .controlled_id
            .as_deref()
            .and_then(|id| self.position(id));
        match target {
            Some(index) if index != self.active_index => {
                self.move_to(index, probe, now);
                true
            }
            _ => false,
        }
    }

    fn move_to(&mut self, index: usize, probe: &impl LayoutProbe, now: Instant) {
        let previous = self.active_index;
        self.direction = Direction::between(previous, index);
        self.active_index = index;
        tracing::debug!(
            from = previous,
            to = index,
            direction = self.direction.sign(),
            "Active tab changed"
        );

        self.activate(probe, now);

        if !self.mounted {
            return;
        }
        if self.has_content(index) {
            let outgoing = self.has_content(previous).then_some(previous);
            self.transition
                .start(Some(index), outgoing, self.direction, now);
        } else {
            // No content region is rendered, so there is nothing to animate.
            self.transition.clear();
        }
    }

    /// Measure the active tab now and schedule settle samples.
    fn activate(&mut self, probe: &impl LayoutProbe, now: Instant) {
        if !self.mounted {
            return;
        }
        self.measure_active(probe, now);
        self.settle.activate(now);
    }

    fn measure_active(&mut self, probe: &impl LayoutProbe, now: Instant) {
        if let Some(geometry) = self.measure(self.active_index, probe) {
            self.active_geometry.retarget(geometry, now);
        }
    }

    fn measure(&self, index: usize, probe: &impl LayoutProbe) -> Option<Geometry> {
        if index >= self.tabs.len() {
            return None;
        }
        probe.measure(ElementHandle::for_tab(index))
    }
}

impl fmt::Debug for TabBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabBar")
            .field("tabs", &self.tabs)
            .field("active_index", &self.active_index)
            .field("hovered_index", &self.hovered_index)
            .field("direction", &self.direction)
            .field("controlled_id", &self.controlled_id)
            .field("phase", &self.transition.phase())
            .field("mounted", &self.mounted)
            .finish()
    }
}
