// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider options and their normalization into a [`Config`].
//!
//! [`SliderOptions`] mirrors the loosely typed option bag a host usually has on hand: every
//! field is optional and axis values may arrive as numbers or as text. Two entry points turn
//! it into the immutable [`Config`] a slider runs on:
//!
//! - [`SliderOptions::normalize`] never fails. Unparseable bounds fall back to the defaults,
//!   an inverted axis collapses onto `max`, and initial values that are out of range or out of
//!   order reset to the full range.
//! - [`SliderOptions::validate`] reports the same problems as [`SliderError`]s instead.
//!
//! ```
//! use understory_range_slider::SliderOptions;
//!
//! let config = SliderOptions::new().with_min(10).with_max(5).normalize();
//! assert_eq!((config.min, config.max), (5.0, 5.0));
//! assert_eq!((config.start, config.end), (5.0, 5.0));
//!
//! assert!(SliderOptions::new().with_min(10).with_max(5).validate().is_err());
//! ```
//!
//! ## Date axes
//!
//! With `is_date` set, text values are parsed as RFC 3339 timestamps, as
//! `YYYY-MM-DDTHH:MM[:SS[.fff]]`, or as a bare `YYYY-MM-DD`; values without an offset are
//! taken as UTC. Numbers are epoch milliseconds. Internally every date is an epoch-millisecond
//! `f64`.

use alloc::string::String;
use core::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{Bound, SliderError};
use crate::geometry::Axis;

/// Default lower bound of the axis.
pub const DEFAULT_MIN: f64 = 0.0;
/// Default upper bound of the axis.
pub const DEFAULT_MAX: f64 = 100.0;

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A raw axis value, as supplied by the host.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(untagged))]
pub enum AxisValue {
    /// A number; epoch milliseconds on a date axis.
    Number(f64),
    /// Text to be parsed as a number or a date, depending on the axis.
    Text(String),
}

impl AxisValue {
    /// Parses the value for a numeric or date axis.
    ///
    /// Returns `None` for anything that does not produce a finite value.
    #[must_use]
    pub fn parse(&self, is_date: bool) -> Option<f64> {
        let value = match (self, is_date) {
            (Self::Number(n), false) => Some(*n),
            (Self::Text(s), false) => parse_float_prefix(s),
            (Self::Number(n), true) => {
                // Reject timestamps chrono cannot represent so that every date-axis value can
                // be reported as a date later.
                DateTime::from_timestamp_millis(crate::value::round_millis(*n)).map(|_| *n)
            }
            (Self::Text(s), true) => parse_date(s),
        };
        value.filter(|v| v.is_finite())
    }
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AxisValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for AxisValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for AxisValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Number(value.timestamp_millis() as f64)
    }
}

impl From<NaiveDateTime> for AxisValue {
    fn from(value: NaiveDateTime) -> Self {
        value.and_utc().into()
    }
}

/// User-facing slider options. Unset fields take their defaults.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct SliderOptions {
    /// Single-handle "threshold" mode. Implies `overlap`.
    #[cfg_attr(feature = "serde", serde(rename = "isOneWay"))]
    pub one_way: Option<bool>,
    /// Treat axis values as dates.
    pub is_date: Option<bool>,
    /// Allow the handles to overlap each other.
    pub overlap: Option<bool>,
    /// Lower bound of the axis. Defaults to [`DEFAULT_MIN`].
    pub min: Option<AxisValue>,
    /// Upper bound of the axis. Defaults to [`DEFAULT_MAX`].
    pub max: Option<AxisValue>,
    /// Initial left handle value. Defaults to `min`.
    pub start: Option<AxisValue>,
    /// Initial right handle value. Defaults to `max`.
    pub end: Option<AxisValue>,
}

impl SliderOptions {
    /// Creates an empty option set; every field takes its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one-way mode.
    #[must_use]
    pub fn with_one_way(mut self, one_way: bool) -> Self {
        self.one_way = Some(one_way);
        self
    }

    /// Sets whether the axis holds dates.
    #[must_use]
    pub fn with_date_axis(mut self, is_date: bool) -> Self {
        self.is_date = Some(is_date);
        self
    }

    /// Sets whether handles may overlap.
    #[must_use]
    pub fn with_overlap(mut self, overlap: bool) -> Self {
        self.overlap = Some(overlap);
        self
    }

    /// Sets the lower bound.
    #[must_use]
    pub fn with_min(mut self, min: impl Into<AxisValue>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Sets the upper bound.
    #[must_use]
    pub fn with_max(mut self, max: impl Into<AxisValue>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Sets the initial left handle value.
    #[must_use]
    pub fn with_start(mut self, start: impl Into<AxisValue>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Sets the initial right handle value.
    #[must_use]
    pub fn with_end(mut self, end: impl Into<AxisValue>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Resolves the options into a [`Config`], repairing anything invalid.
    #[must_use]
    pub fn normalize(&self) -> Config {
        let flags = self.flags();
        let (start, end) = flags.start_end(self);

        let mut min = self
            .min
            .as_ref()
            .and_then(|v| v.parse(flags.is_date))
            .unwrap_or(DEFAULT_MIN);
        let max = self
            .max
            .as_ref()
            .and_then(|v| v.parse(flags.is_date))
            .unwrap_or(DEFAULT_MAX);
        if max < min {
            min = max;
        }

        let start = start.map_or(Some(min), |v| v.parse(flags.is_date));
        let end = end.map_or(Some(max), |v| v.parse(flags.is_date));
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) if s <= e && s >= min && e <= max => (s, e),
            _ => (min, max),
        };

        flags.into_config(min, max, start, end)
    }

    /// Resolves the options into a [`Config`], rejecting anything [`normalize`](Self::normalize)
    /// would have to repair.
    pub fn validate(&self) -> Result<Config, SliderError> {
        let flags = self.flags();
        let (start, end) = flags.start_end(self);
        let parse = |which: Bound, value: Option<&AxisValue>, default: f64| match value {
            None => Ok(default),
            Some(v) => v.parse(flags.is_date).ok_or_else(|| SliderError::InvalidBound {
                which,
                input: alloc::format!("{v}"),
            }),
        };

        let min = parse(Bound::Min, self.min.as_ref(), DEFAULT_MIN)?;
        let max = parse(Bound::Max, self.max.as_ref(), DEFAULT_MAX)?;
        if max < min {
            return Err(SliderError::InvertedBounds { min, max });
        }
        let start = parse(Bound::Start, start, min)?;
        let end = parse(Bound::End, end, max)?;
        if start > end {
            return Err(SliderError::StartAfterEnd { start, end });
        }
        if start < min || start > max {
            return Err(SliderError::StartOutOfRange { start, min, max });
        }
        if end < min || end > max {
            return Err(SliderError::EndOutOfRange { end, min, max });
        }

        Ok(flags.into_config(min, max, start, end))
    }

    fn flags(&self) -> Flags {
        let one_way = self.one_way.unwrap_or(false);
        Flags {
            one_way,
            is_date: self.is_date.unwrap_or(false),
            overlap: one_way || self.overlap.unwrap_or(false),
        }
    }
}

#[derive(Copy, Clone)]
struct Flags {
    one_way: bool,
    is_date: bool,
    overlap: bool,
}

impl Flags {
    /// One-way sliders keep a single value; it lives in `end` and `start` falls back to `min`.
    fn start_end<'a>(
        &self,
        options: &'a SliderOptions,
    ) -> (Option<&'a AxisValue>, Option<&'a AxisValue>) {
        if self.one_way {
            (None, options.end.as_ref().or(options.start.as_ref()))
        } else {
            (options.start.as_ref(), options.end.as_ref())
        }
    }

    fn into_config(self, min: f64, max: f64, start: f64, end: f64) -> Config {
        Config {
            one_way: self.one_way,
            is_date: self.is_date,
            overlap: self.overlap,
            min,
            max,
            start,
            end,
        }
    }
}

/// Normalized, immutable slider configuration.
///
/// Invariant: `min <= start <= end <= max`. Dates are epoch milliseconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Single-handle mode.
    pub one_way: bool,
    /// Values are dates.
    pub is_date: bool,
    /// Handles may overlap.
    pub overlap: bool,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Initial left handle value.
    pub start: f64,
    /// Initial right handle value.
    pub end: f64,
}

impl Config {
    /// The axis used to convert between percentages and domain values.
    #[must_use]
    pub fn axis(&self) -> Axis {
        Axis {
            min: self.min,
            max: self.max,
            is_date: self.is_date,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        SliderOptions::default().normalize()
    }
}

/// Parses the longest numeric prefix of `s`, ignoring leading whitespace.
///
/// `"12.5px"` parses as `12.5` and `"abc"` does not parse at all.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    if bytes.get(int_end) == Some(&b'.') {
        mantissa_end = digits_from(int_end + 1);
    }
    // A mantissa needs at least one digit on either side of the point.
    let has_digits = s[end..mantissa_end].bytes().any(|b| b.is_ascii_digit());
    if !has_digits {
        return None;
    }
    end = mantissa_end;

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

fn parse_date(s: &str) -> Option<f64> {
    let s = s.trim();
    let date_time = DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })?;
    Some(date_time.timestamp_millis() as f64)
}
