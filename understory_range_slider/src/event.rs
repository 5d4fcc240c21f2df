// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input as delivered by the host, and what the slider did with it.

use kurbo::Point;
use smallvec::SmallVec;

/// A mouse or touch event forwarded to the slider.
///
/// Mouse events carry client coordinates. Touch events usually do not; their first touch
/// point (in page coordinates) is used instead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerEvent {
    /// Client coordinates of a mouse event.
    pub client: Option<Point>,
    /// Page coordinates of the active touch points.
    pub touches: SmallVec<[Point; 2]>,
}

impl PointerEvent {
    /// A mouse event at `client`.
    #[must_use]
    pub fn mouse(client: Point) -> Self {
        Self {
            client: Some(client),
            touches: SmallVec::new(),
        }
    }

    /// A single-finger touch event at `page`.
    #[must_use]
    pub fn touch(page: Point) -> Self {
        let mut touches = SmallVec::new();
        touches.push(page);
        Self {
            client: None,
            touches,
        }
    }
}

bitflags::bitflags! {
    /// What the host should do with the native event after the slider handled it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventResponse: u8 {
        /// Cancel the default action (page scroll, text selection).
        const DEFAULT_PREVENTED   = 1 << 0;
        /// Stop the event from bubbling further.
        const PROPAGATION_STOPPED = 1 << 1;
    }
}
