// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Range Slider: a headless, dual-handle range selection widget.
//!
//! ## Overview
//!
//! A [`RangeSlider`] renders two handles and a fill bar into a container element and lets the
//! user drag either handle to select a sub-range of a bounded numeric or date axis.
//! Observers are told about the selection when a drag starts, on every step, and when it stops.
//!
//! The crate owns the interaction logic and nothing else:
//!
//! - **Options** ([`SliderOptions`] → [`Config`]): defaults, numeric vs. date axes, and the
//!   repair rules for inverted bounds and out-of-range initial values.
//! - **Geometry** ([`geometry`]): cursor displacement to percentages, the `[0, 100]` bounds,
//!   the overlap margin between handles, and percentage ↔ domain value conversion.
//! - **Interaction** ([`RangeSlider`]): the idle → dragging → idle state machine.
//! - **Notifications** ([`topics`]): `start`, `moving`, and `stop` listeners.
//!
//! Rendering and input delivery stay with the host. The host implements [`Surface`] for its
//! DOM binding or scene graph and forwards pointer events; engine differences are captured by
//! a [`Platform`] chosen once at construction.
//!
//! ## Positions
//!
//! Positions are percentages of the track width. The left handle is measured from the left
//! edge and the right handle from the right edge; the fill bar spans between them. These
//! numeric offsets are the source of truth: `left`/`right` style strings on the surface are
//! only a projection of them.
//!
//! When overlap is disallowed, a dragged handle stops one handle width short of the other.
//! A programmatic [`RangeSlider::move_to`] that would make the handles intersect resets both to
//! the full range instead.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_range_slider::{
//!     PointerEvent, RangeSlider, SliderOptions, SliderValue, Standard, surface::MemorySurface,
//! };
//!
//! let mut surface = MemorySurface::new(400.0, 16.0);
//! let container = surface.add_block(400.0);
//! let options = SliderOptions::new().with_min(0).with_max(1000).with_start(250).with_end(750);
//! let mut slider = RangeSlider::new(surface, container, &options, Standard).unwrap();
//!
//! // Drag the right handle 100px to the right: a quarter of the track.
//! let handle = slider.elements().handle_right;
//! slider.pointer_down(handle, &PointerEvent::mouse(Point::new(300.0, 0.0)));
//! slider.pointer_move(&PointerEvent::mouse(Point::new(400.0, 0.0)));
//! slider.pointer_up(&PointerEvent::mouse(Point::new(400.0, 0.0)));
//!
//! let info = slider.info();
//! assert_eq!(info.left, SliderValue::Number(250.0));
//! assert_eq!(info.right, SliderValue::Number(1000.0));
//! ```
//!
//! ## Error handling
//!
//! The default entry points never fail loudly: an unsuitable container yields `None`, invalid
//! options are repaired, unknown topic names are ignored, and out-of-range moves are clamped.
//! [`RangeSlider::try_new`], [`SliderOptions::validate`], and `str::parse::<Topic>` report the
//! same problems as [`SliderError`]s.
//!
//! ## Logging
//!
//! Lifecycle transitions are logged at `debug` and drag steps at `trace` through the [`log`]
//! facade; install any logger to see them.
//!
//! ## Features
//!
//! - `std`: enables `std` support for `kurbo`.
//! - `libm`: `no_std` floating-point support for `kurbo`.
//!
//! No feature is on by default; enable exactly one of `std` or `libm`.
//! - `serde`: deserialize [`SliderOptions`] from the camelCase option objects web hosts use.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod event;
pub mod geometry;
mod options;
pub mod platform;
mod slider;
pub mod surface;
pub mod topics;
mod value;

pub use error::{Bound, SliderError};
pub use event::{EventResponse, PointerEvent};
pub use geometry::{Axis, Extents, Side};
pub use options::{AxisValue, Config, DEFAULT_MAX, DEFAULT_MIN, SliderOptions};
pub use platform::{Detected, Legacy, Platform, Standard};
pub use slider::{DragSession, DragState, Elements, MoveTo, RangeSlider};
pub use surface::Surface;
pub use topics::{Subscription, Topic};
pub use value::{RangeInfo, SliderValue};
