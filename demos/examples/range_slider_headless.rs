// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless range slider: options from JSON, an in-memory surface, and a scripted drag.
//!
//! This example shows how to:
//! - deserialize `SliderOptions` from the camelCase objects a web host passes around,
//! - render a `RangeSlider` into a `MemorySurface`,
//! - forward pointer events and observe `start`/`moving`/`stop`.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_range_slider_demos --example range_slider_headless`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use log::info;
use understory_range_slider::surface::{MemorySurface, StyleProp};
use understory_range_slider::{
    MoveTo, PointerEvent, RangeInfo, RangeSlider, SliderOptions, SliderValue, Standard, Topic,
};

const TRACK: f64 = 400.0;
const HANDLE: f64 = 16.0;

fn show(value: &SliderValue) -> String {
    match value {
        SliderValue::Number(n) => format!("{n:.1}"),
        SliderValue::Date(d) => d.format("%Y-%m-%d %H:%M").to_string(),
    }
}

fn describe(info: &RangeInfo) -> String {
    format!("[{} .. {}]", show(&info.left), show(&info.right))
}

fn main() {
    env_logger::init();

    let json = r#"{ "min": 0, "max": "1000", "start": 200, "end": "800px" }"#;
    let options: SliderOptions = match serde_json::from_str(json) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("bad options: {err}");
            return;
        }
    };

    let mut surface = MemorySurface::new(TRACK, HANDLE);
    let container = surface.add_block(TRACK);
    let mut slider = match RangeSlider::try_new(surface, container, &options, Standard) {
        Ok(slider) => slider,
        Err(err) => {
            eprintln!("cannot build slider: {err}");
            return;
        }
    };
    info!("initial selection {}", describe(&slider.info()));

    let steps = Rc::new(RefCell::new(0_usize));
    let counter = steps.clone();
    slider.subscribe(Topic::Start, |info| println!("start  {}", describe(info)));
    slider.subscribe(Topic::Moving, move |info| {
        *counter.borrow_mut() += 1;
        println!("moving {}", describe(info));
    });
    let stop = slider.subscribe(Topic::Stop, |info| println!("stop   {}", describe(info)));

    // Drag the left handle towards the right one; it stops a handle width short.
    let handle = slider.elements().handle_left;
    let grab = Point::new(80.0, 10.0);
    slider.pointer_down(handle, &PointerEvent::mouse(grab));
    for x in [120.0, 200.0, 280.0, 360.0] {
        slider.pointer_move(&PointerEvent::mouse(Point::new(x, 10.0)));
    }
    slider.pointer_up(&PointerEvent::mouse(Point::new(360.0, 10.0)));

    let fill = slider.elements().fill;
    println!(
        "fill spans left={} right={}",
        slider.surface().style(fill, StyleProp::Left).unwrap_or("?"),
        slider.surface().style(fill, StyleProp::Right).unwrap_or("?"),
    );

    // Programmatic moves animate and can be kept quiet.
    slider.unsubscribe(stop);
    slider.move_to(MoveTo::range(100.0, 900.0), false);
    slider.move_to(MoveTo::right(950.0), true);
    println!("after move_to {}", describe(&slider.info()));
    println!("{} moving notifications", steps.borrow());

    // A date axis reports dates.
    let mut surface = MemorySurface::new(TRACK, HANDLE);
    let container = surface.add_block(TRACK);
    let options = SliderOptions::new()
        .with_date_axis(true)
        .with_min("2025-01-01")
        .with_max("2025-12-31");
    if let Some(dates) = RangeSlider::new(surface, container, &options, Standard) {
        println!("date axis {}", describe(&dates.info()));
    }
}
