// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Values reported to listeners and callers.

use chrono::{DateTime, Utc};

/// A position on the slider axis, in domain units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SliderValue {
    /// A value on a numeric axis.
    Number(f64),
    /// A value on a date axis.
    Date(DateTime<Utc>),
}

impl SliderValue {
    /// Wraps an epoch-millisecond timestamp as a date.
    ///
    /// Timestamps outside the range `chrono` can represent stay numeric.
    #[must_use]
    pub fn from_timestamp_millis(millis: f64) -> Self {
        DateTime::from_timestamp_millis(round_millis(millis))
            .map_or(Self::Number(millis), Self::Date)
    }

    /// Returns the value as a plain number; dates become epoch milliseconds.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Date(d) => d.timestamp_millis() as f64,
        }
    }

    /// Returns the date, if this is a value on a date axis.
    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Number(_) => None,
            Self::Date(d) => Some(*d),
        }
    }
}

/// The current selection: the values under the left and right handles.
///
/// This is the payload handed to every [`Topic`](crate::Topic) listener and the result of
/// [`RangeSlider::info`](crate::RangeSlider::info).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RangeInfo {
    /// Value under the left handle.
    pub left: SliderValue,
    /// Value under the right handle.
    pub right: SliderValue,
}

/// Rounds to the nearest whole millisecond without relying on `std` float intrinsics.
#[allow(
    clippy::cast_possible_truncation,
    reason = "The cast saturates and timestamps outside i64 are rejected by chrono anyway"
)]
pub(crate) fn round_millis(millis: f64) -> i64 {
    let whole = millis as i64;
    let frac = millis - whole as f64;
    if frac >= 0.5 {
        whole.saturating_add(1)
    } else if frac <= -0.5 {
        whole.saturating_sub(1)
    } else {
        whole
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_goes_to_nearest_millisecond() {
        assert_eq!(round_millis(1_699_999_999_999.9998), 1_700_000_000_000);
        assert_eq!(round_millis(10.4), 10);
        assert_eq!(round_millis(-10.6), -11);
        assert_eq!(round_millis(0.0), 0);
    }

    #[test]
    fn dates_convert_back_to_numbers() {
        let v = SliderValue::from_timestamp_millis(86_400_000.0);
        let date = v.as_date().unwrap();
        assert_eq!(date.timestamp(), 86_400);
        assert_eq!(v.as_f64(), 86_400_000.0);
    }

    #[test]
    fn unrepresentable_timestamps_stay_numeric() {
        let v = SliderValue::from_timestamp_millis(1e300);
        assert_eq!(v, SliderValue::Number(1e300));
        assert!(v.as_date().is_none());
    }
}
