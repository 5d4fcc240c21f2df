// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine capability adapters.
//!
//! Old engines differ from standard ones in four places the slider cares about: how cursor
//! coordinates are read, how classes are changed, how page-level listeners are registered,
//! and how an event's default action is cancelled. A [`Platform`] answers those questions once,
//! so the rest of the slider never branches on the engine.
//!
//! - [`Standard`]: client or touch coordinates plus the window scroll, `classList`-style
//!   class edits, capture-phase mouse and touch listeners, `preventDefault`.
//! - [`Legacy`]: client coordinates plus document and body scroll, whole-attribute class
//!   rewrites, attach-style mouse listeners, and cancelling both the default and bubbling.
//! - [`Detected`]: picks one of the two from a user-agent string.
//!
//! ```
//! use understory_range_slider::platform::{Detected, Platform};
//! use understory_range_slider::surface::ListenMode;
//!
//! let ie = Detected::from_user_agent("Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1)");
//! assert_eq!(ie, Detected::Legacy);
//! assert_eq!(ie.drag_events().1, ListenMode::Attach);
//! ```

use kurbo::Point;

use crate::event::{EventResponse, PointerEvent};
use crate::surface::{ClassSet, ListenMode, PageEvents, ScrollSource, Surface};

/// Engine-specific behavior, resolved once per slider.
pub trait Platform {
    /// Cursor position of `event` in page coordinates, if the event carries one.
    fn page_point<S: Surface>(&self, surface: &S, event: &PointerEvent) -> Option<Point>;

    /// Moves the classes of `node` from `before` to `after`.
    fn write_classes<S: Surface>(
        &self,
        surface: &mut S,
        node: S::Node,
        before: ClassSet,
        after: ClassSet,
    );

    /// Page-level events to listen to while dragging, and how to register them.
    fn drag_events(&self) -> (PageEvents, ListenMode);

    /// How to cancel an event the slider consumed.
    fn suppress_default(&self) -> EventResponse;
}

/// Standards-compliant engines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Standard;

impl Platform for Standard {
    fn page_point<S: Surface>(&self, surface: &S, event: &PointerEvent) -> Option<Point> {
        let base = event.client.or_else(|| event.touches.first().copied())?;
        Some(base + surface.scroll_offset(ScrollSource::Window))
    }

    fn write_classes<S: Surface>(
        &self,
        surface: &mut S,
        node: S::Node,
        before: ClassSet,
        after: ClassSet,
    ) {
        for name in (before - after).class_names() {
            surface.remove_class(node, name);
        }
        for name in (after - before).class_names() {
            surface.add_class(node, name);
        }
    }

    fn drag_events(&self) -> (PageEvents, ListenMode) {
        (PageEvents::all(), ListenMode::Capture)
    }

    fn suppress_default(&self) -> EventResponse {
        EventResponse::DEFAULT_PREVENTED
    }
}

/// Legacy engines without `classList`, capture-phase listeners, or touch input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Legacy;

impl Platform for Legacy {
    fn page_point<S: Surface>(&self, surface: &S, event: &PointerEvent) -> Option<Point> {
        let client = event.client?;
        Some(
            client
                + surface.scroll_offset(ScrollSource::DocumentElement)
                + surface.scroll_offset(ScrollSource::Body),
        )
    }

    fn write_classes<S: Surface>(
        &self,
        surface: &mut S,
        node: S::Node,
        before: ClassSet,
        after: ClassSet,
    ) {
        if before != after {
            surface.set_class_attr(node, &after.to_class_attr());
        }
    }

    fn drag_events(&self) -> (PageEvents, ListenMode) {
        (PageEvents::MOUSE_MOVE | PageEvents::MOUSE_UP, ListenMode::Attach)
    }

    fn suppress_default(&self) -> EventResponse {
        EventResponse::DEFAULT_PREVENTED | EventResponse::PROPAGATION_STOPPED
    }
}

/// A platform chosen at runtime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Detected {
    /// Use [`Standard`].
    #[default]
    Standard,
    /// Use [`Legacy`].
    Legacy,
}

impl Detected {
    /// Picks [`Legacy`] for user agents that identify as old Internet Explorer (`MSIE`).
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.contains("MSIE") {
            Self::Legacy
        } else {
            Self::Standard
        }
    }
}

impl Platform for Detected {
    fn page_point<S: Surface>(&self, surface: &S, event: &PointerEvent) -> Option<Point> {
        match self {
            Self::Standard => Standard.page_point(surface, event),
            Self::Legacy => Legacy.page_point(surface, event),
        }
    }

    fn write_classes<S: Surface>(
        &self,
        surface: &mut S,
        node: S::Node,
        before: ClassSet,
        after: ClassSet,
    ) {
        match self {
            Self::Standard => Standard.write_classes(surface, node, before, after),
            Self::Legacy => Legacy.write_classes(surface, node, before, after),
        }
    }

    fn drag_events(&self) -> (PageEvents, ListenMode) {
        match self {
            Self::Standard => Standard.drag_events(),
            Self::Legacy => Legacy.drag_events(),
        }
    }

    fn suppress_default(&self) -> EventResponse {
        match self {
            Self::Standard => Standard.suppress_default(),
            Self::Legacy => Legacy.suppress_default(),
        }
    }
}
