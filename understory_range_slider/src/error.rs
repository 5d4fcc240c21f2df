// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the strict construction and parsing paths.
//!
//! The default paths ([`SliderOptions::normalize`](crate::SliderOptions::normalize),
//! [`RangeSlider::new`](crate::RangeSlider::new),
//! [`RangeSlider::subscribe_named`](crate::RangeSlider::subscribe_named)) never fail: they repair
//! or ignore bad input. Typed hosts that would rather surface mistakes use the strict variants,
//! which return these errors instead.

use alloc::string::String;
use core::fmt;

/// Names one of the configured axis values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Bound {
    /// Lower bound of the axis.
    Min,
    /// Upper bound of the axis.
    Max,
    /// Initial position of the left handle.
    Start,
    /// Initial position of the right handle.
    End,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// Error returned by the strict slider APIs.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SliderError {
    /// The container handed to [`RangeSlider::try_new`](crate::RangeSlider::try_new) is not a
    /// block-level element.
    #[error("slider container must be a block-level element")]
    InvalidContainer,
    /// A topic name other than `start`, `moving` or `stop`.
    #[error("unknown topic `{0}`, expected `start`, `moving` or `stop`")]
    UnknownTopic(String),
    /// An axis value that could not be parsed as a number or a date.
    #[error("{which} value `{input}` could not be parsed")]
    InvalidBound {
        /// Which value failed.
        which: Bound,
        /// The offending input, as given.
        input: String,
    },
    /// `max` is smaller than `min`.
    #[error("max ({max}) is smaller than min ({min})")]
    InvertedBounds {
        /// Parsed lower bound.
        min: f64,
        /// Parsed upper bound.
        max: f64,
    },
    /// `start` lies outside `[min, max]`.
    #[error("start ({start}) lies outside [{min}, {max}]")]
    StartOutOfRange {
        /// Parsed start value.
        start: f64,
        /// Parsed lower bound.
        min: f64,
        /// Parsed upper bound.
        max: f64,
    },
    /// `end` lies outside `[min, max]`.
    #[error("end ({end}) lies outside [{min}, {max}]")]
    EndOutOfRange {
        /// Parsed end value.
        end: f64,
        /// Parsed lower bound.
        min: f64,
        /// Parsed upper bound.
        max: f64,
    },
    /// `start` is greater than `end`.
    #[error("start ({start}) is greater than end ({end})")]
    StartAfterEnd {
        /// Parsed start value.
        start: f64,
        /// Parsed end value.
        end: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_offending_value() {
        let err = SliderError::InvalidBound {
            which: Bound::Start,
            input: "soon".to_string(),
        };
        assert_eq!(err.to_string(), "start value `soon` could not be parsed");

        let err = SliderError::UnknownTopic("end".to_string());
        assert!(err.to_string().contains("`end`"));
    }
}
