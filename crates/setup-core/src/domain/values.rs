//! Identifier and bounded-numeric value types.
//!
//! Every value that enters the domain goes through a smart constructor.  The
//! numeric types reject anything outside `1..=1000`; the identifier types are
//! opaque strings and accept any input.
//!
//! # Why wrap a plain number? (for beginners)
//!
//! A `u16` could hold a screen height, a segment width or an audio channel.
//! Giving each quantity its own type means the compiler refuses to pass a width
//! where a height is expected, and the only way to obtain one is through
//! [`ScreenHeight::new`] (or its siblings), so an out-of-range value can never
//! reach the entities.
//!
//! Deserialization is routed through the same constructors via
//! `#[serde(try_from = "i64")]`, so JSON input cannot bypass validation either.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueError;

/// Largest accepted screen height.
pub const MAX_SCREEN_HEIGHT: i64 = 1000;

/// Largest accepted segment width.
pub const MAX_SEGMENT_WIDTH: i64 = 1000;

/// Largest accepted audio channel number.
pub const MAX_AUDIO_CHANNEL: i64 = 1000;

// ── Identifiers ───────────────────────────────────────────────────────────────

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps `value` as an identifier.  Never fails.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generates a fresh random identifier (UUID v4).
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

string_identifier!(
    /// Identifies a [`crate::Setup`] aggregate.
    SetupUuid
);
string_identifier!(
    /// Identifies a [`crate::Screen`] within its setup.
    ScreenUuid
);
string_identifier!(
    /// Identifies a [`crate::Segment`] within its screen.
    SegmentUuid
);

// ── Bounded numerics ──────────────────────────────────────────────────────────

/// Checks `value` against `1..=max`, reporting the matching low/high error.
fn check_bounds(
    value: i64,
    max: i64,
    not_positive: ValueError,
    too_big: ValueError,
) -> Result<u16, ValueError> {
    if value <= 0 {
        return Err(not_positive);
    }
    if value > max {
        return Err(too_big);
    }
    // max <= 1000, so the narrowing cannot truncate.
    Ok(value as u16)
}

/// Height of a screen, in `1..=1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ScreenHeight(u16);

impl ScreenHeight {
    /// Validates `value` as a screen height.
    ///
    /// # Errors
    ///
    /// [`ValueError::HeightIsNotPositiveNumber`] for `value <= 0`,
    /// [`ValueError::HeightIsBiggerThanMax`] for `value > 1000`.
    pub fn new(value: i64) -> Result<Self, ValueError> {
        check_bounds(
            value,
            MAX_SCREEN_HEIGHT,
            ValueError::HeightIsNotPositiveNumber,
            ValueError::HeightIsBiggerThanMax,
        )
        .map(Self)
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

/// Width of a segment, in `1..=1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SegmentWidth(u16);

impl SegmentWidth {
    /// Validates `value` as a segment width.
    ///
    /// # Errors
    ///
    /// [`ValueError::SegmentWidthIsNotPositiveNumber`] for `value <= 0`,
    /// [`ValueError::SegmentWidthIsBiggerThanMax`] for `value > 1000`.
    pub fn new(value: i64) -> Result<Self, ValueError> {
        check_bounds(
            value,
            MAX_SEGMENT_WIDTH,
            ValueError::SegmentWidthIsNotPositiveNumber,
            ValueError::SegmentWidthIsBiggerThanMax,
        )
        .map(Self)
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

/// Dante audio channel assigned to a segment, in `1..=1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SegmentAudioChannel(u16);

impl SegmentAudioChannel {
    /// Channel assigned to every segment when Dante gets switched on.
    pub const DANTE_DEFAULT: SegmentAudioChannel = SegmentAudioChannel(1);

    /// Validates `value` as an audio channel.
    ///
    /// # Errors
    ///
    /// [`ValueError::AudioChannelIsNotPositiveNumber`] for `value <= 0`,
    /// [`ValueError::AudioChannelIsBiggerThanMax`] for `value > 1000`.
    pub fn new(value: i64) -> Result<Self, ValueError> {
        check_bounds(
            value,
            MAX_AUDIO_CHANNEL,
            ValueError::AudioChannelIsNotPositiveNumber,
            ValueError::AudioChannelIsBiggerThanMax,
        )
        .map(Self)
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<i64> for ScreenHeight {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for SegmentWidth {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for SegmentAudioChannel {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScreenHeight> for i64 {
    fn from(value: ScreenHeight) -> Self {
        i64::from(value.0)
    }
}

impl From<SegmentWidth> for i64 {
    fn from(value: SegmentWidth) -> Self {
        i64::from(value.0)
    }
}

impl From<SegmentAudioChannel> for i64 {
    fn from(value: SegmentAudioChannel) -> Self {
        i64::from(value.0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
