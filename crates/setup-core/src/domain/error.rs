//! Error types shared by every domain entity.
//!
//! All failures in the domain are plain values.  A mutator that detects a
//! problem returns it immediately and every composing operation (reducer step,
//! action fold) hands it back to the caller unchanged.

use thiserror::Error;

/// Validation failure raised by one of the bounded numeric constructors.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("screen height must be a positive number")]
    HeightIsNotPositiveNumber,

    #[error("screen height is bigger than the maximum")]
    HeightIsBiggerThanMax,

    #[error("segment width must be a positive number")]
    SegmentWidthIsNotPositiveNumber,

    #[error("segment width is bigger than the maximum")]
    SegmentWidthIsBiggerThanMax,

    #[error("audio channel must be a positive number")]
    AudioChannelIsNotPositiveNumber,

    #[error("audio channel is bigger than the maximum")]
    AudioChannelIsBiggerThanMax,
}

/// Errors raised by entity constructors, mutators and the reducer.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Dante is on but at least one live segment has no audio channel.
    #[error("dante is enabled but some segments have no audio channel")]
    DanteEnabledButInvalidSegments,

    /// Dante is off but at least one live segment still carries an audio channel.
    #[error("dante is disabled but some segments have an audio channel")]
    DanteDisabledButInvalidSegments,

    /// The referenced screen (or the screen owning a referenced segment) does not exist.
    #[error("screen not found")]
    ScreenNoFound,

    #[error("setup not editable")]
    SetupNotEditable,

    #[error("screen not editable")]
    ScreenNotEditable,

    #[error("segment not found")]
    SegmentNotFound,

    /// An editable setup must own at least one screen.
    #[error("there is no screen")]
    ThereIsNoScreen,

    /// A screen must own at least one segment.
    #[error("screen has no segments")]
    ScreenHasNoSegments,

    /// A raw value failed its smart constructor.
    #[error("invalid value: {0}")]
    InvalidValue(#[from] ValueError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_error_converts_into_domain_error() {
        let err: DomainError = ValueError::HeightIsBiggerThanMax.into();
        assert_eq!(err, DomainError::InvalidValue(ValueError::HeightIsBiggerThanMax));
    }

    #[test]
    fn test_domain_error_display_is_human_readable() {
        assert_eq!(DomainError::ScreenNoFound.to_string(), "screen not found");
        assert_eq!(
            DomainError::InvalidValue(ValueError::SegmentWidthIsNotPositiveNumber).to_string(),
            "invalid value: segment width must be a positive number"
        );
    }
}
