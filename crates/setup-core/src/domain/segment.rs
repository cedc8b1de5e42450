//! Segment leaf entity.
//!
//! A segment has no lifecycle of its own: it lives inside a screen's segment
//! list and is added, updated or removed by that screen.

use serde::{Deserialize, Serialize};

use super::values::{SegmentAudioChannel, SegmentUuid, SegmentWidth};

/// A horizontal slice of a screen, optionally routed to a Dante audio channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub uuid: SegmentUuid,
    pub width: SegmentWidth,
    #[serde(default)]
    pub audio_channel: Option<SegmentAudioChannel>,
}

impl Segment {
    pub fn create(
        uuid: SegmentUuid,
        width: SegmentWidth,
        audio_channel: Option<SegmentAudioChannel>,
    ) -> Self {
        Self {
            uuid,
            width,
            audio_channel,
        }
    }

    /// Replaces width and audio channel, keeping the identifier.
    pub fn update(self, width: SegmentWidth, audio_channel: Option<SegmentAudioChannel>) -> Self {
        Self {
            uuid: self.uuid,
            width,
            audio_channel,
        }
    }

    pub fn unset_audio_channel(self) -> Self {
        Self {
            audio_channel: None,
            ..self
        }
    }

    pub fn set_audio_channel(self, audio_channel: SegmentAudioChannel) -> Self {
        Self {
            audio_channel: Some(audio_channel),
            ..self
        }
    }

    /// Returns `true` when `other` carries the same width and audio channel.
    ///
    /// Two absent channels are equal; two present channels are equal when their
    /// numbers match.
    pub fn same_properties(&self, other: &Segment) -> bool {
        self.width == other.width && self.audio_channel == other.audio_channel
    }
}
