// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slider widget: construction, drag state machine, and programmatic moves.

use alloc::format;

use hashbrown::HashMap;
use kurbo::Point;
use log::{debug, trace};

use crate::error::SliderError;
use crate::event::{EventResponse, PointerEvent};
use crate::geometry::{self, Extents, Side};
use crate::options::{Config, SliderOptions};
use crate::platform::{Platform, Standard};
use crate::surface::{ClassSet, StyleProp, Surface};
use crate::topics::{Subscription, Topic, Topics};
use crate::value::RangeInfo;

/// Elements a slider created inside its container.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Elements<N> {
    /// The `slider` root.
    pub root: N,
    /// The left handle container.
    pub handle_left: N,
    /// The decorative element inside the left handle.
    pub circle_left: N,
    /// The right handle container.
    pub handle_right: N,
    /// The decorative element inside the right handle.
    pub circle_right: N,
    /// The fill bar.
    pub fill: N,
}

/// A target position for [`RangeSlider::move_to`], in domain units.
///
/// Date axes take epoch milliseconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveTo {
    /// Move either or both handles; `None` leaves a handle where it is.
    Range {
        /// New value of the left handle.
        left: Option<f64>,
        /// New value of the right handle.
        right: Option<f64>,
    },
    /// One-way positioning: the fill spans from the start of the axis to this value, which
    /// the right handle marks.
    Single(f64),
}

impl MoveTo {
    /// Moves both handles.
    #[must_use]
    pub const fn range(left: f64, right: f64) -> Self {
        Self::Range {
            left: Some(left),
            right: Some(right),
        }
    }

    /// Moves only the left handle.
    #[must_use]
    pub const fn left(value: f64) -> Self {
        Self::Range {
            left: Some(value),
            right: None,
        }
    }

    /// Moves only the right handle.
    #[must_use]
    pub const fn right(value: f64) -> Self {
        Self::Range {
            left: None,
            right: Some(value),
        }
    }
}

impl From<f64> for MoveTo {
    fn from(value: f64) -> Self {
        Self::Single(value)
    }
}

/// Reference frame of an active drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession {
    /// The handle being dragged.
    pub side: Side,
    /// Cursor position when the drag started, in page coordinates.
    pub cursor_start: Point,
    /// Offset of the handle when the drag started, in percent.
    pub handle_start: f64,
}

/// Drag state of a slider.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A handle is being dragged.
    Dragging(DragSession),
}

#[derive(Copy, Clone)]
enum Part {
    Root,
    HandleLeft,
    HandleRight,
    Fill,
}

impl Part {
    const fn index(self) -> usize {
        match self {
            Self::Root => 0,
            Self::HandleLeft => 1,
            Self::HandleRight => 2,
            Self::Fill => 3,
        }
    }

    const fn handle(side: Side) -> Self {
        match side {
            Side::Left => Self::HandleLeft,
            Side::Right => Self::HandleRight,
        }
    }
}

/// A dual-handle range slider rendered into a [`Surface`].
///
/// ## Usage
///
/// - Construct with [`RangeSlider::new`] (silently `None` for an unsuitable container) or
///   [`RangeSlider::try_new`] (reports why).
/// - Forward pointer-down events on the slider's elements to [`RangeSlider::pointer_down`].
///   While a drag is active the slider asks the surface for page-level move/up events;
///   forward those to [`RangeSlider::pointer_move`] and [`RangeSlider::pointer_up`].
/// - Apply the returned [`EventResponse`] to the native event.
/// - Observe the selection with [`RangeSlider::subscribe`], or read it with
///   [`RangeSlider::info`].
///
/// Only one drag runs at a time: a pointer-down during a drag is ignored, and move/up events
/// outside a drag do nothing.
///
/// ```
/// use core::cell::RefCell;
/// use std::rc::Rc;
/// use kurbo::Point;
/// use understory_range_slider::{
///     PointerEvent, RangeSlider, SliderOptions, SliderValue, Standard, Topic,
///     surface::MemorySurface,
/// };
///
/// let mut surface = MemorySurface::new(200.0, 10.0);
/// let container = surface.add_block(200.0);
/// let mut slider = RangeSlider::new(surface, container, &SliderOptions::new(), Standard)
///     .expect("block container");
///
/// let lefts = Rc::new(RefCell::new(Vec::new()));
/// let sink = lefts.clone();
/// slider.subscribe(Topic::Moving, move |info| sink.borrow_mut().push(info.left));
///
/// let handle = slider.elements().handle_left;
/// slider.pointer_down(handle, &PointerEvent::mouse(Point::new(0.0, 5.0)));
/// slider.pointer_move(&PointerEvent::mouse(Point::new(50.0, 5.0)));
/// slider.pointer_up(&PointerEvent::mouse(Point::new(50.0, 5.0)));
///
/// assert_eq!(*lefts.borrow(), [SliderValue::Number(25.0)]);
/// ```
pub struct RangeSlider<S: Surface, P: Platform = Standard> {
    surface: S,
    platform: P,
    config: Config,
    elements: Elements<S::Node>,
    handles: HashMap<S::Node, Side>,
    classes: [ClassSet; 4],
    extents: Extents,
    drag: DragState,
    disabled: bool,
    topics: Topics<RangeInfo>,
}

impl<S: Surface, P: Platform> core::fmt::Debug for RangeSlider<S, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RangeSlider")
            .field("config", &self.config)
            .field("elements", &self.elements)
            .field("extents", &self.extents)
            .field("drag", &self.drag)
            .field("disabled", &self.disabled)
            .field("topics", &self.topics)
            .finish_non_exhaustive()
    }
}

impl<S: Surface, P: Platform> RangeSlider<S, P> {
    /// Builds a slider inside `container`.
    ///
    /// Returns `None` if `container` is not a block-level element. Invalid options are
    /// repaired as described in [`SliderOptions::normalize`].
    pub fn new(
        surface: S,
        container: S::Node,
        options: &SliderOptions,
        platform: P,
    ) -> Option<Self> {
        if !surface.is_block_container(container) {
            debug!("slider container {container:?} is not a block element");
            return None;
        }
        Some(Self::build(surface, container, options.normalize(), platform))
    }

    /// Builds a slider inside `container`, reporting invalid input instead of repairing it.
    pub fn try_new(
        surface: S,
        container: S::Node,
        options: &SliderOptions,
        platform: P,
    ) -> Result<Self, SliderError> {
        let config = options.validate()?;
        if !surface.is_block_container(container) {
            return Err(SliderError::InvalidContainer);
        }
        Ok(Self::build(surface, container, config, platform))
    }

    fn build(mut surface: S, container: S::Node, config: Config, platform: P) -> Self {
        let mut root_classes = ClassSet::SLIDER;
        root_classes.set(ClassSet::ONE_WAY, config.one_way);
        let handle_left = ClassSet::HANDLE | ClassSet::HANDLE_LEFT;
        let handle_right = ClassSet::HANDLE | ClassSet::HANDLE_RIGHT;

        let mut element = |classes: ClassSet| {
            let node = surface.create_element();
            platform.write_classes(&mut surface, node, ClassSet::empty(), classes);
            node
        };
        let elements = Elements {
            root: element(root_classes),
            handle_left: element(handle_left),
            circle_left: element(ClassSet::CIRCLE),
            handle_right: element(handle_right),
            circle_right: element(ClassSet::CIRCLE),
            fill: element(ClassSet::FILL),
        };

        surface.append_child(elements.handle_left, elements.circle_left);
        surface.append_child(elements.root, elements.handle_left);
        surface.append_child(elements.handle_right, elements.circle_right);
        surface.append_child(elements.root, elements.handle_right);
        surface.append_child(elements.root, elements.fill);
        surface.append_child(container, elements.root);

        // Center each handle on its offset so its midpoint marks the value.
        let half = surface.offset_width(elements.handle_left) / 2.0;
        surface.set_style(elements.handle_left, StyleProp::MarginLeft, &format!("-{half}px"));
        let half = surface.offset_width(elements.handle_right) / 2.0;
        surface.set_style(elements.handle_right, StyleProp::MarginRight, &format!("-{half}px"));

        let mut handles = HashMap::new();
        handles.insert(elements.handle_left, Side::Left);
        handles.insert(elements.circle_left, Side::Left);
        handles.insert(elements.handle_right, Side::Right);
        handles.insert(elements.circle_right, Side::Right);

        let mut slider = Self {
            surface,
            platform,
            config,
            elements,
            handles,
            classes: [root_classes, handle_left, handle_right, ClassSet::FILL],
            extents: Extents::FULL,
            drag: DragState::Idle,
            disabled: false,
            topics: Topics::new(),
        };
        slider.move_to(MoveTo::range(config.start, config.end), true);
        debug!("slider created: {config:?}");
        slider
    }

    /// The normalized configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The elements this slider created.
    #[must_use]
    pub fn elements(&self) -> &Elements<S::Node> {
        &self.elements
    }

    /// Current handle offsets.
    #[must_use]
    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// Current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    /// The surface the slider renders into.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, for example to update layout.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The current selection in domain units (`getInfo` in web bindings).
    ///
    /// Listeners receive the same value.
    #[must_use]
    pub fn info(&self) -> RangeInfo {
        self.config.axis().info(self.extents)
    }

    /// Moves the handles programmatically, clamping values into the axis.
    ///
    /// Position changes are animated through the `slider-transition` class. If overlap is not
    /// allowed and the handles would intersect, both reset to the full range. Publishes
    /// [`Topic::Moving`] unless `suppress_publish` is set.
    pub fn move_to(&mut self, target: impl Into<MoveTo>, suppress_publish: bool) {
        for part in [Part::Fill, Part::HandleLeft, Part::HandleRight] {
            self.update_classes(part, |c| c.insert(ClassSet::TRANSITION));
        }

        let axis = self.config.axis();
        match target.into() {
            MoveTo::Range { left, right } => {
                if let Some(value) = left {
                    self.extents.left = axis.to_percent(Side::Left, value);
                }
                if let Some(value) = right {
                    self.extents.right = axis.to_percent(Side::Right, value);
                }
                if !self.config.overlap && self.handles_intersect() {
                    debug!("handles at {:?} intersect, resetting to full range", self.extents);
                    self.extents = Extents::FULL;
                }
            }
            MoveTo::Single(value) => {
                self.extents = Extents {
                    left: 0.0,
                    right: axis.to_percent(Side::Right, value),
                };
            }
        }
        self.render(Side::Left);
        self.render(Side::Right);

        if !suppress_publish {
            self.notify(Topic::Moving);
        }
    }

    /// Enables or disables dragging. A drag already in progress runs to completion.
    pub fn disable(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.update_classes(Part::Root, |c| c.set(ClassSet::DISABLED, disabled));
    }

    /// Whether dragging is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Handles a pointer-down (mouse-down or touch-start) on `target`.
    ///
    /// Starts a drag if `target` is one of the handles (or the element inside one), the slider
    /// is enabled, no drag is running, and the event carries coordinates. Publishes
    /// [`Topic::Start`].
    pub fn pointer_down(&mut self, target: S::Node, event: &PointerEvent) -> EventResponse {
        if self.disabled {
            trace!("pointer down ignored: slider disabled");
            return EventResponse::empty();
        }
        if self.is_dragging() {
            debug!("pointer down ignored: a drag is already in progress");
            return EventResponse::empty();
        }
        let Some(&side) = self.handles.get(&target) else {
            return EventResponse::empty();
        };
        let Some(cursor_start) = self.platform.page_point(&self.surface, event) else {
            trace!("pointer down ignored: no coordinates");
            return EventResponse::empty();
        };

        self.drag = DragState::Dragging(DragSession {
            side,
            cursor_start,
            handle_start: self.extents.get(side),
        });
        debug!("drag start: {side:?} at {cursor_start:?}");

        for s in [Side::Left, Side::Right] {
            self.update_classes(Part::handle(s), |c| c.set(ClassSet::ONTOP, s == side));
        }
        let (events, mode) = self.platform.drag_events();
        self.surface.listen_page(events, mode);
        for part in [Part::Fill, Part::HandleLeft, Part::HandleRight] {
            self.update_classes(part, |c| c.remove(ClassSet::TRANSITION));
        }

        self.notify(Topic::Start);
        self.platform.suppress_default()
    }

    /// Handles a page-level pointer move during a drag. Publishes [`Topic::Moving`].
    pub fn pointer_move(&mut self, event: &PointerEvent) -> EventResponse {
        let DragState::Dragging(session) = self.drag else {
            return EventResponse::empty();
        };
        let Some(cursor) = self.platform.page_point(&self.surface, event) else {
            trace!("pointer move ignored: no coordinates");
            return EventResponse::empty();
        };

        let side = session.side;
        let track = self.surface.offset_width(self.elements.root);
        let handle = self.surface.offset_width(self.handle_node(side));
        let raw = geometry::compute_delta(
            side,
            session.cursor_start,
            cursor,
            track,
            session.handle_start,
        );
        let margin = geometry::overlap_margin(self.config.overlap, handle, track);
        let opposing = self.extents.get(side.opposite());
        let pct = geometry::apply_overlap_constraint(raw, margin, opposing);
        trace!("drag move: {side:?} {raw}% -> {pct}%");

        self.extents.set(side, pct);
        self.render(side);

        self.notify(Topic::Moving);
        self.platform.suppress_default()
    }

    /// Handles a page-level pointer up (mouse-up or touch-end), ending the drag. Publishes
    /// [`Topic::Stop`].
    pub fn pointer_up(&mut self, _event: &PointerEvent) -> EventResponse {
        let DragState::Dragging(session) = self.drag else {
            return EventResponse::empty();
        };
        let (events, mode) = self.platform.drag_events();
        self.surface.unlisten_page(events, mode);
        self.drag = DragState::Idle;
        debug!("drag stop: {:?} at {:?}", session.side, self.extents);

        self.notify(Topic::Stop);
        self.platform.suppress_default()
    }

    /// Registers a listener for `topic`.
    pub fn subscribe(
        &mut self,
        topic: Topic,
        listener: impl FnMut(&RangeInfo) + 'static,
    ) -> Subscription {
        self.topics.subscribe(topic, listener)
    }

    /// Registers a listener for the topic called `name`; unknown names return `None`.
    pub fn subscribe_named(
        &mut self,
        name: &str,
        listener: impl FnMut(&RangeInfo) + 'static,
    ) -> Option<Subscription> {
        self.topics.subscribe_named(name, listener)
    }

    /// Removes a listener. Returns `false` if it was already removed or belongs to another
    /// slider.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.topics.unsubscribe(subscription)
    }

    /// Calls the listeners of `topic` with `data`.
    pub fn publish(&mut self, topic: Topic, data: &RangeInfo) {
        self.topics.publish(topic, data);
    }

    /// Calls the listeners of the topic called `name`; unknown names are ignored.
    pub fn publish_named(&mut self, name: &str, data: &RangeInfo) -> bool {
        self.topics.publish_named(name, data)
    }

    fn notify(&mut self, topic: Topic) {
        let info = self.info();
        self.topics.publish(topic, &info);
    }

    fn handle_node(&self, side: Side) -> S::Node {
        match side {
            Side::Left => self.elements.handle_left,
            Side::Right => self.elements.handle_right,
        }
    }

    fn handles_intersect(&self) -> bool {
        geometry::handles_intersect(
            self.extents,
            self.surface.offset_width(self.elements.root),
            self.surface.offset_width(self.elements.handle_left),
            self.surface.offset_width(self.elements.handle_right),
        )
    }

    /// Projects one side of the extents onto its handle and fill edge.
    fn render(&mut self, side: Side) {
        let value = format!("{}%", self.extents.get(side));
        let prop = match side {
            Side::Left => StyleProp::Left,
            Side::Right => StyleProp::Right,
        };
        let handle = self.handle_node(side);
        self.surface.set_style(handle, prop, &value);
        self.surface.set_style(self.elements.fill, prop, &value);
    }

    fn update_classes(&mut self, part: Part, f: impl FnOnce(&mut ClassSet)) {
        let before = self.classes[part.index()];
        let mut after = before;
        f(&mut after);
        if before == after {
            return;
        }
        self.classes[part.index()] = after;
        let node = match part {
            Part::Root => self.elements.root,
            Part::HandleLeft => self.elements.handle_left,
            Part::HandleRight => self.elements.handle_right,
            Part::Fill => self.elements.fill,
        };
        self.platform.write_classes(&mut self.surface, node, before, after);
    }
}

impl Subscription {
    /// Removes this listener from `slider`.
    ///
    /// Returns `false` if it was already removed or was registered on another slider.
    pub fn remove<S: Surface, P: Platform>(self, slider: &mut RangeSlider<S, P>) -> bool {
        slider.unsubscribe(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Legacy;
    use crate::surface::{ListenMode, MemoryNodeId, MemorySurface, PageEvents};
    use crate::value::SliderValue;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    type Log = Rc<RefCell<Vec<(Topic, RangeInfo)>>>;

    fn surface() -> (MemorySurface, MemoryNodeId) {
        let mut surface = MemorySurface::new(200.0, 10.0);
        let container = surface.add_block(200.0);
        (surface, container)
    }

    fn slider_with(options: SliderOptions) -> RangeSlider<MemorySurface> {
        let (surface, container) = surface();
        RangeSlider::new(surface, container, &options, Standard).unwrap()
    }

    fn record<P: Platform>(slider: &mut RangeSlider<MemorySurface, P>) -> Log {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        for topic in Topic::ALL {
            let sink = log.clone();
            slider.subscribe(topic, move |info| sink.borrow_mut().push((topic, *info)));
        }
        log
    }

    fn at(x: f64) -> PointerEvent {
        PointerEvent::mouse(Point::new(x, 0.0))
    }

    fn num(v: f64) -> SliderValue {
        SliderValue::Number(v)
    }

    fn topics(log: &Log) -> Vec<Topic> {
        log.borrow().iter().map(|(t, _)| *t).collect()
    }

    #[test]
    fn default_slider_selects_the_full_axis() {
        let slider = slider_with(SliderOptions::new());
        let info = slider.info();
        assert_eq!(info.left, num(0.0));
        assert_eq!(info.right, num(100.0));
        assert_eq!(slider.extents(), Extents::FULL);
        assert_eq!(slider.info(), info);
    }

    #[test]
    fn builds_the_expected_structure() {
        let slider = slider_with(SliderOptions::new());
        let e = *slider.elements();
        let s = slider.surface();

        assert_eq!(s.node(e.root).children, [e.handle_left, e.handle_right, e.fill]);
        assert_eq!(s.node(e.handle_left).children, [e.circle_left]);
        assert_eq!(s.node(e.handle_right).children, [e.circle_right]);
        assert!(s.node(e.root).parent.is_some());

        assert!(s.has_class(e.root, "slider"));
        assert!(!s.has_class(e.root, "one-way"));
        assert!(s.has_class(e.handle_left, "handle-left"));
        assert!(s.has_class(e.handle_right, "handle-right"));
        assert!(s.has_class(e.circle_left, "slider-circle"));
        assert!(s.has_class(e.fill, "slider-fill"));

        assert_eq!(s.style(e.handle_left, StyleProp::MarginLeft), Some("-5px"));
        assert_eq!(s.style(e.handle_right, StyleProp::MarginRight), Some("-5px"));
        assert_eq!(s.style(e.fill, StyleProp::Left), Some("0%"));
        assert_eq!(s.style(e.fill, StyleProp::Right), Some("0%"));
    }

    #[test]
    fn inline_containers_are_rejected() {
        let mut surface = MemorySurface::new(200.0, 10.0);
        let span = surface.add_inline();
        let options = SliderOptions::new();
        assert!(RangeSlider::new(surface.clone(), span, &options, Standard).is_none());
        assert_eq!(
            RangeSlider::try_new(surface, span, &options, Standard).unwrap_err(),
            SliderError::InvalidContainer
        );
    }

    #[test]
    fn strict_construction_rejects_bad_options() {
        let (surface, container) = surface();
        let options = SliderOptions::new().with_min(10).with_max(5);
        assert_eq!(
            RangeSlider::try_new(surface, container, &options, Standard).unwrap_err(),
            SliderError::InvertedBounds {
                min: 10.0,
                max: 5.0
            }
        );
    }

    #[test]
    fn drag_publishes_start_moving_stop_in_order() {
        let mut slider = slider_with(SliderOptions::new());
        let log = record(&mut slider);
        let handle = slider.elements().handle_left;

        let down = slider.pointer_down(handle, &at(20.0));
        assert_eq!(down, EventResponse::DEFAULT_PREVENTED);
        assert!(slider.is_dragging());
        slider.pointer_move(&at(40.0));
        slider.pointer_move(&at(60.0));
        let up = slider.pointer_up(&at(60.0));
        assert_eq!(up, EventResponse::DEFAULT_PREVENTED);
        assert!(!slider.is_dragging());

        assert_eq!(
            topics(&log),
            [Topic::Start, Topic::Moving, Topic::Moving, Topic::Stop]
        );
        let log = log.borrow();
        assert_eq!(log[0].1.left, num(0.0));
        assert_eq!(log[1].1.left, num(10.0));
        assert_eq!(log[2].1.left, num(20.0));
        assert_eq!(log[3].1.left, num(20.0));
        assert_eq!(log[3].1.right, num(100.0));
    }

    #[test]
    fn dragging_writes_handle_and_fill_edges() {
        let mut slider = slider_with(SliderOptions::new());
        let e = *slider.elements();
        slider.pointer_down(e.handle_right, &at(200.0));
        slider.pointer_move(&at(150.0));

        let s = slider.surface();
        assert_eq!(s.style(e.handle_right, StyleProp::Right), Some("25%"));
        assert_eq!(s.style(e.fill, StyleProp::Right), Some("25%"));
        assert_eq!(s.style(e.fill, StyleProp::Left), Some("0%"));
        assert_eq!(slider.info().right, num(75.0));
    }

    #[test]
    fn left_drag_stops_one_handle_short_of_the_right_handle() {
        let mut slider = slider_with(SliderOptions::new().with_start(0).with_end(20));
        assert_eq!(slider.extents().right, 80.0);

        let handle = slider.elements().handle_left;
        slider.pointer_down(handle, &at(0.0));
        // Half the track would be 50%, but the right handle is 80% in and one handle is 5%.
        slider.pointer_move(&at(100.0));
        assert_eq!(slider.extents().left, 15.0);
        assert_eq!(slider.info().left, num(15.0));
    }

    #[test]
    fn overlapping_handles_may_meet() {
        let mut slider = slider_with(
            SliderOptions::new()
                .with_overlap(true)
                .with_start(0)
                .with_end(20),
        );
        let handle = slider.elements().handle_left;
        slider.pointer_down(handle, &at(0.0));
        slider.pointer_move(&at(100.0));
        assert_eq!(slider.extents().left, 20.0);
    }

    #[test]
    fn drag_is_clamped_to_the_track() {
        let mut slider = slider_with(SliderOptions::new().with_overlap(true));
        let handle = slider.elements().handle_right;
        slider.pointer_down(handle, &at(200.0));
        slider.pointer_move(&at(1_000.0));
        assert_eq!(slider.extents().right, 0.0);
        slider.pointer_move(&at(-1_000.0));
        assert_eq!(slider.extents().right, 100.0);
    }

    #[test]
    fn inner_element_resolves_to_its_handle() {
        let mut slider = slider_with(SliderOptions::new());
        let circle = slider.elements().circle_right;
        slider.pointer_down(circle, &at(200.0));
        match slider.drag_state() {
            DragState::Dragging(session) => {
                assert_eq!(session.side, Side::Right);
                assert_eq!(session.cursor_start, Point::new(200.0, 0.0));
                assert_eq!(session.handle_start, 0.0);
            }
            DragState::Idle => panic!("expected a drag"),
        }
    }

    #[test]
    fn pointer_down_elsewhere_is_ignored() {
        let mut slider = slider_with(SliderOptions::new());
        let log = record(&mut slider);
        let fill = slider.elements().fill;
        assert_eq!(
            slider.pointer_down(fill, &at(10.0)),
            EventResponse::empty()
        );
        assert!(!slider.is_dragging());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn second_pointer_down_during_a_drag_is_ignored() {
        let mut slider = slider_with(SliderOptions::new());
        let log = record(&mut slider);
        let e = *slider.elements();
        slider.pointer_down(e.handle_left, &at(0.0));
        let again = slider.pointer_down(e.handle_right, &at(200.0));
        assert_eq!(again, EventResponse::empty());
        match slider.drag_state() {
            DragState::Dragging(session) => assert_eq!(session.side, Side::Left),
            DragState::Idle => panic!("expected a drag"),
        }
        assert_eq!(topics(&log), [Topic::Start]);
        assert_eq!(slider.surface().listeners().len(), 1);
    }

    #[test]
    fn page_listeners_live_only_during_a_drag() {
        let mut slider = slider_with(SliderOptions::new());
        let log = record(&mut slider);
        assert_eq!(slider.pointer_move(&at(50.0)), EventResponse::empty());
        assert_eq!(slider.pointer_up(&at(50.0)), EventResponse::empty());
        assert!(log.borrow().is_empty());

        let handle = slider.elements().handle_left;
        slider.pointer_down(handle, &at(0.0));
        assert_eq!(
            slider.surface().listeners(),
            [(PageEvents::all(), ListenMode::Capture)]
        );
        slider.pointer_up(&at(0.0));
        assert!(slider.surface().listeners().is_empty());
    }

    #[test]
    fn drag_raises_the_active_handle_and_drops_transitions() {
        let mut slider = slider_with(SliderOptions::new());
        let e = *slider.elements();
        assert!(slider.surface().has_class(e.fill, "slider-transition"));

        slider.pointer_down(e.handle_right, &at(200.0));
        let s = slider.surface();
        assert!(s.has_class(e.handle_right, "ontop"));
        assert!(!s.has_class(e.handle_left, "ontop"));
        for node in [e.fill, e.handle_left, e.handle_right] {
            assert!(!s.has_class(node, "slider-transition"));
        }
        slider.pointer_up(&at(200.0));

        slider.pointer_down(e.handle_left, &at(0.0));
        let s = slider.surface();
        assert!(s.has_class(e.handle_left, "ontop"));
        assert!(!s.has_class(e.handle_right, "ontop"));
        slider.pointer_up(&at(0.0));

        slider.move_to(MoveTo::left(10.0), true);
        assert!(slider.surface().has_class(e.handle_left, "slider-transition"));
    }

    #[test]
    fn touch_events_use_the_first_touch_point() {
        let mut slider = slider_with(SliderOptions::new());
        let handle = slider.elements().handle_left;
        slider.pointer_down(handle, &PointerEvent::touch(Point::new(0.0, 0.0)));
        slider.pointer_move(&PointerEvent::touch(Point::new(50.0, 30.0)));
        assert_eq!(slider.info().left, num(25.0));
    }

    #[test]
    fn events_without_coordinates_are_ignored() {
        let mut slider = slider_with(SliderOptions::new());
        let handle = slider.elements().handle_left;
        slider.pointer_down(handle, &PointerEvent::default());
        assert!(!slider.is_dragging());

        slider.pointer_down(handle, &at(0.0));
        assert_eq!(
            slider.pointer_move(&PointerEvent::default()),
            EventResponse::empty()
        );
        assert_eq!(slider.extents(), Extents::FULL);
    }

    #[test]
    fn disabled_slider_does_not_start_drags() {
        let mut slider = slider_with(SliderOptions::new());
        let log = record(&mut slider);
        let e = *slider.elements();

        slider.disable(true);
        assert!(slider.is_disabled());
        assert!(slider.surface().has_class(e.root, "slider-disabled"));
        slider.pointer_down(e.handle_left, &at(0.0));
        assert!(!slider.is_dragging());
        assert!(log.borrow().is_empty());

        slider.disable(false);
        assert!(!slider.surface().has_class(e.root, "slider-disabled"));
        slider.pointer_down(e.handle_left, &at(0.0));
        assert!(slider.is_dragging());
    }

    #[test]
    fn disabling_mid_drag_lets_the_drag_finish() {
        let mut slider = slider_with(SliderOptions::new());
        let log = record(&mut slider);
        let handle = slider.elements().handle_left;
        slider.pointer_down(handle, &at(0.0));
        slider.disable(true);
        slider.pointer_move(&at(20.0));
        slider.pointer_up(&at(20.0));
        assert_eq!(topics(&log), [Topic::Start, Topic::Moving, Topic::Stop]);
        assert_eq!(slider.info().left, num(10.0));
    }

    #[test]
    fn move_to_clamps_and_publishes() {
        let mut slider = slider_with(SliderOptions::new().with_min(100).with_max(200));
        let log = record(&mut slider);

        slider.move_to(MoveTo::range(-5.0, 500.0), false);
        assert_eq!(slider.extents(), Extents::FULL);
        slider.move_to(MoveTo::left(125.0), false);
        slider.move_to(MoveTo::right(150.0), true);

        let info = slider.info();
        assert_eq!(info.left, num(125.0));
        assert_eq!(info.right, num(150.0));
        assert_eq!(topics(&log), [Topic::Moving, Topic::Moving]);
        assert_eq!(log.borrow()[1].1.left, num(125.0));
    }

    #[test]
    fn move_to_resets_intersecting_handles() {
        let mut slider = slider_with(SliderOptions::new().with_start(20).with_end(80));
        let log = record(&mut slider);
        slider.move_to(MoveTo::range(60.0, 40.0), false);
        assert_eq!(slider.extents(), Extents::FULL);
        let e = *slider.elements();
        assert_eq!(slider.surface().style(e.handle_left, StyleProp::Left), Some("0%"));
        assert_eq!(slider.surface().style(e.handle_right, StyleProp::Right), Some("0%"));
        let published = log.borrow()[0].1;
        assert_eq!(published.left, num(0.0));
        assert_eq!(published.right, num(100.0));
    }

    #[test]
    fn initial_overlap_resets_to_full_range() {
        let slider = slider_with(SliderOptions::new().with_start(50).with_end(50));
        assert_eq!(slider.extents(), Extents::FULL);

        let overlapping = slider_with(
            SliderOptions::new()
                .with_overlap(true)
                .with_start(50)
                .with_end(50),
        );
        assert_eq!(overlapping.info().left, num(50.0));
        assert_eq!(overlapping.info().right, num(50.0));
    }

    #[test]
    fn one_way_slider_tracks_a_single_value() {
        let mut slider = slider_with(SliderOptions::new().with_one_way(true).with_start(20));
        let e = *slider.elements();
        assert!(slider.config().overlap);
        assert!(slider.surface().has_class(e.root, "one-way"));

        let info = slider.info();
        assert_eq!(info.left, num(0.0));
        assert_eq!(info.right, num(20.0));

        slider.move_to(40.0, true);
        assert_eq!(slider.info().right, num(40.0));
        let s = slider.surface();
        assert_eq!(s.style(e.fill, StyleProp::Left), Some("0%"));
        assert_eq!(s.style(e.fill, StyleProp::Right), Some("60%"));
        assert_eq!(s.style(e.handle_right, StyleProp::Right), Some("60%"));
    }

    #[test]
    fn removed_listener_is_not_called() {
        let mut slider = slider_with(SliderOptions::new());
        let calls = Rc::new(RefCell::new(0));
        let sink = calls.clone();
        let sub = slider.subscribe(Topic::Moving, move |_| *sink.borrow_mut() += 1);
        let info = slider.info();

        slider.publish(Topic::Moving, &info);
        assert!(sub.remove(&mut slider));
        assert!(!slider.unsubscribe(sub));
        slider.publish(Topic::Moving, &info);
        assert!(!slider.publish_named("moved", &info));
        assert_eq!(*calls.borrow(), 1);
        assert!(slider.subscribe_named("finish", |_| {}).is_none());
    }

    #[test]
    fn subscriptions_do_not_cross_sliders() {
        let mut a = slider_with(SliderOptions::new());
        let mut b = slider_with(SliderOptions::new());
        let from_a = a.subscribe(Topic::Moving, |_| {});
        let hits = Rc::new(RefCell::new(0));
        let sink = hits.clone();
        b.subscribe(Topic::Moving, move |_| *sink.borrow_mut() += 1);

        assert!(!from_a.remove(&mut b));
        b.move_to(50.0, false);
        assert_eq!(*hits.borrow(), 1);
        assert!(from_a.remove(&mut a));
    }

    #[test]
    fn date_axis_reports_dates() {
        let mut slider = slider_with(
            SliderOptions::new()
                .with_date_axis(true)
                .with_min("2024-01-01")
                .with_max("2024-01-03"),
        );
        let info = slider.info();
        assert_eq!(info.left.as_date().unwrap().to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(info.right.as_date().unwrap().to_rfc3339(), "2024-01-03T00:00:00+00:00");

        let handle = slider.elements().handle_left;
        slider.pointer_down(handle, &at(0.0));
        slider.pointer_move(&at(50.0));
        let left = slider.info().left.as_date().unwrap();
        assert_eq!(left.to_rfc3339(), "2024-01-01T12:00:00+00:00");
    }

    #[test]
    fn legacy_platform_rewrites_classes_and_attaches_mouse_listeners() {
        let (surface, container) = surface();
        let mut slider =
            RangeSlider::new(surface, container, &SliderOptions::new(), Legacy).unwrap();
        let e = *slider.elements();
        assert_eq!(
            slider.surface().node(e.handle_left).classes,
            ["handle", "handle-left", "slider-transition"]
        );

        // Legacy engines have no touch input.
        slider.pointer_down(e.handle_left, &PointerEvent::touch(Point::ORIGIN));
        assert!(!slider.is_dragging());

        let response = slider.pointer_down(e.handle_left, &at(0.0));
        assert_eq!(
            response,
            EventResponse::DEFAULT_PREVENTED | EventResponse::PROPAGATION_STOPPED
        );
        assert_eq!(
            slider.surface().listeners(),
            [(PageEvents::MOUSE_MOVE | PageEvents::MOUSE_UP, ListenMode::Attach)]
        );
        assert_eq!(
            slider.surface().node(e.handle_left).classes,
            ["handle", "handle-left", "ontop"]
        );
        slider.pointer_up(&at(0.0));
        assert!(slider.surface().listeners().is_empty());
    }
}
