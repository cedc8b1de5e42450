//! Desired-setup drafts: the JSON a user writes to describe a setup.
//!
//! A draft carries raw numbers and optional identifiers.  [`SetupDraft::into_setup`]
//! pushes every value through the `setup_core` smart constructors, so an
//! invalid draft is reported as the first [`DomainError`] it hits rather than
//! a serde error.  Screens and segments without a `uuid` receive a fresh
//! UUID v4, which makes them "new" to the update diff.
//!
//! ```json
//! {
//!   "uuid": "main-hall",
//!   "danteEnabled": true,
//!   "screens": [
//!     { "uuid": "left", "height": 120, "segments": [ { "width": 80, "audioChannel": 2 } ] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use setup_core::{
    DomainError, EditableScreen, EditableSetup, Screen, ScreenHeight, ScreenUuid, Segment,
    SegmentAudioChannel, SegmentUuid, SegmentWidth, SetupUuid,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupDraft {
    pub uuid: String,
    pub dante_enabled: bool,
    pub screens: Vec<ScreenDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub height: i64,
    pub segments: Vec<SegmentDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub width: i64,
    #[serde(default)]
    pub audio_channel: Option<i64>,
}

impl SetupDraft {
    /// Validates the draft and builds the desired setup.
    ///
    /// # Errors
    ///
    /// The first [`DomainError`] raised by a value constructor, a screen or the
    /// setup itself.
    pub fn into_setup(self) -> Result<EditableSetup, DomainError> {
        let screens = self
            .screens
            .into_iter()
            .map(ScreenDraft::into_screen)
            .collect::<Result<Vec<_>, _>>()?;
        EditableSetup::new(SetupUuid::new(self.uuid), self.dante_enabled, screens)
    }
}

impl ScreenDraft {
    fn into_screen(self) -> Result<Screen, DomainError> {
        let uuid = self.uuid.map_or_else(ScreenUuid::new_v4, ScreenUuid::new);
        let height = ScreenHeight::new(self.height)?;
        let segments = self
            .segments
            .into_iter()
            .map(SegmentDraft::into_segment)
            .collect::<Result<Vec<_>, _>>()?;
        EditableScreen::new(uuid, height, segments).map(Screen::Editable)
    }
}

impl SegmentDraft {
    fn into_segment(self) -> Result<Segment, DomainError> {
        let uuid = self.uuid.map_or_else(SegmentUuid::new_v4, SegmentUuid::new);
        let width = SegmentWidth::new(self.width)?;
        let audio_channel = self
            .audio_channel
            .map(SegmentAudioChannel::new)
            .transpose()?;
        Ok(Segment::create(uuid, width, audio_channel))
    }
}
