// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track geometry: pointer displacement to percentages, bounds, overlap, and domain values.
//!
//! Everything here is pure. Positions are percentages of the track width:
//! the left handle is measured from the left edge of the track and the right handle from the
//! right edge, so `Extents { left: 0.0, right: 0.0 }` selects the full range.
//!
//! ```
//! use kurbo::Point;
//! use understory_range_slider::geometry::{Side, apply_overlap_constraint, compute_delta};
//!
//! // Dragging the left handle 100px right on a 200px track moves it by half the track.
//! let raw = compute_delta(Side::Left, Point::new(10.0, 0.0), Point::new(110.0, 0.0), 200.0, 0.0);
//! assert_eq!(raw, 50.0);
//!
//! // With the right handle 80% in from the right edge and a 5% handle margin, it stops at 15%.
//! assert_eq!(apply_overlap_constraint(raw, 5.0, 80.0), 15.0);
//! ```

use kurbo::Point;

use crate::value::{RangeInfo, SliderValue};

/// Which handle of the slider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The handle anchored to the left edge of the track.
    Left,
    /// The handle anchored to the right edge of the track.
    Right,
}

impl Side {
    /// The other handle.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Handle offsets as percentages from their own edge of the track.
///
/// The fill bar mirrors these offsets, so a single `Extents` describes the whole visual state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extents {
    /// Left handle offset from the left edge, in percent.
    pub left: f64,
    /// Right handle offset from the right edge, in percent.
    pub right: f64,
}

impl Extents {
    /// Both handles at their edges: the full range is selected.
    pub const FULL: Self = Self {
        left: 0.0,
        right: 0.0,
    };

    /// Offset of one handle.
    #[must_use]
    pub const fn get(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Sets the offset of one handle.
    pub fn set(&mut self, side: Side, pct: f64) {
        match side {
            Side::Left => self.left = pct,
            Side::Right => self.right = pct,
        }
    }
}

impl Default for Extents {
    fn default() -> Self {
        Self::FULL
    }
}

/// Computes a handle's new offset from the cursor displacement since the drag started.
///
/// Moving the cursor right grows the left handle's offset and shrinks the right handle's.
/// The result is clamped to `[0, 100]`. A track without a positive, finite width cannot map
/// pixels to percentages, so `handle_start` is returned unchanged.
#[must_use]
pub fn compute_delta(
    side: Side,
    cursor_start: Point,
    cursor_now: Point,
    track_width: f64,
    handle_start: f64,
) -> f64 {
    if !(track_width.is_finite() && track_width > 0.0) {
        return handle_start;
    }
    let dx = match side {
        Side::Left => cursor_now.x - cursor_start.x,
        Side::Right => cursor_start.x - cursor_now.x,
    };
    let pct = (handle_start + dx / track_width * 100.0).clamp(0.0, 100.0);
    // Clamping can leave `-0.0` behind; offsets are never negative.
    if pct == 0.0 { 0.0 } else { pct }
}

/// Space reserved between the handles, in percent of the track.
///
/// Zero when overlap is allowed; otherwise one handle width.
#[must_use]
pub fn overlap_margin(overlap: bool, handle_width: f64, track_width: f64) -> f64 {
    if overlap || !(track_width.is_finite() && track_width > 0.0) {
        0.0
    } else {
        handle_width / track_width * 100.0
    }
}

/// Caps a handle offset so it cannot travel past the opposing handle plus `margin`.
///
/// The result never goes below zero, even when the opposing handle already sits inside the
/// margin.
#[must_use]
pub fn apply_overlap_constraint(pct: f64, margin: f64, opposing: f64) -> f64 {
    let remaining = (100.0 - margin) - opposing;
    pct.min(remaining).max(0.0)
}

/// Whether the rendered handle boxes touch or cross.
///
/// Handles are centered on their offsets, so the left handle covers
/// `left ± left_width / 2` and the right handle `track - right ± right_width / 2` (in pixels).
/// Boxes closer than one pixel count as intersecting. Without a laid-out track nothing can
/// be decided and this returns `false`.
#[must_use]
pub fn handles_intersect(
    extents: Extents,
    track_width: f64,
    left_width: f64,
    right_width: f64,
) -> bool {
    if !(track_width.is_finite() && track_width > 0.0) {
        return false;
    }
    let left_edge = extents.left / 100.0 * track_width + left_width / 2.0;
    let right_edge = track_width - extents.right / 100.0 * track_width - right_width / 2.0;
    left_edge > right_edge - 1.0
}

/// The domain axis of a slider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axis {
    /// Lower bound, in domain units.
    pub min: f64,
    /// Upper bound, in domain units.
    pub max: f64,
    /// Domain values are epoch-millisecond dates.
    pub is_date: bool,
}

impl Axis {
    /// Width of the axis in domain units.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Converts a handle offset to a raw domain value.
    #[must_use]
    pub fn to_domain(&self, side: Side, pct: f64) -> f64 {
        let delta = pct / 100.0 * self.span();
        match side {
            Side::Left => self.min + delta,
            Side::Right => self.max - delta,
        }
    }

    /// Converts a domain value to a handle offset, clamping it into `[min, max]` first.
    ///
    /// A zero-width axis maps everything to `0%`.
    #[must_use]
    pub fn to_percent(&self, side: Side, value: f64) -> f64 {
        let span = self.span();
        if !span.is_finite() || span <= 0.0 || value.is_nan() {
            return 0.0;
        }
        let value = value.clamp(self.min, self.max);
        let pct = match side {
            Side::Left => (value - self.min) / span * 100.0,
            Side::Right => (self.max - value) / span * 100.0,
        };
        pct.clamp(0.0, 100.0)
    }

    /// Wraps a raw domain value for reporting.
    #[must_use]
    pub fn value(&self, raw: f64) -> SliderValue {
        if self.is_date {
            SliderValue::from_timestamp_millis(raw)
        } else {
            SliderValue::Number(raw)
        }
    }

    /// The selection described by `extents`.
    #[must_use]
    pub fn info(&self, extents: Extents) -> RangeInfo {
        RangeInfo {
            left: self.value(self.to_domain(Side::Left, extents.left)),
            right: self.value(self.to_domain(Side::Right, extents.right)),
        }
    }
}
