//! Screen entity: an ordered, non-empty list of segments with a two-state
//! lifecycle.
//!
//! ```text
//!   EditableScreen ──delete──▶ DeletedScreen   (terminal)
//! ```
//!
//! Only an [`EditableScreen`] exposes mutators.  A [`Screen`] value of unknown
//! state has to go through [`Screen::assert_editable`] (or
//! [`Screen::into_editable`]) first, which fails with
//! [`DomainError::ScreenNotEditable`] for a deleted screen.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::segment::Segment;
use super::values::{ScreenHeight, ScreenUuid, SegmentAudioChannel, SegmentUuid, SegmentWidth};

/// A screen that still accepts changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableScreen {
    uuid: ScreenUuid,
    height: ScreenHeight,
    segments: Vec<Segment>,
}

/// A screen that has been removed from its setup.  Its last known fields are
/// kept so the history stays inspectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedScreen {
    uuid: ScreenUuid,
    height: ScreenHeight,
    segments: Vec<Segment>,
}

/// A screen in either lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScreenRecord", into = "ScreenRecord")]
pub enum Screen {
    Editable(EditableScreen),
    Deleted(DeletedScreen),
}

impl EditableScreen {
    /// Builds an editable screen.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ScreenHasNoSegments`] if `segments` is empty.
    pub fn new(
        uuid: ScreenUuid,
        height: ScreenHeight,
        segments: Vec<Segment>,
    ) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::ScreenHasNoSegments);
        }
        Ok(Self {
            uuid,
            height,
            segments,
        })
    }

    /// Same as [`EditableScreen::new`]; named after the `create` operation the
    /// reducer applies for `ScreenAdded`.
    pub fn create(
        uuid: ScreenUuid,
        height: ScreenHeight,
        segments: Vec<Segment>,
    ) -> Result<Self, DomainError> {
        Self::new(uuid, height, segments)
    }

    pub fn uuid(&self) -> &ScreenUuid {
        &self.uuid
    }

    pub fn height(&self) -> ScreenHeight {
        self.height
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Replaces identifier and height, keeping the segments.
    pub fn update_properties(
        self,
        uuid: ScreenUuid,
        height: ScreenHeight,
    ) -> Result<Self, DomainError> {
        Self::new(uuid, height, self.segments)
    }

    pub fn update_height(self, height: ScreenHeight) -> Result<Self, DomainError> {
        Self::new(self.uuid, height, self.segments)
    }

    /// Appends `segment` to the end of the segment list.
    pub fn add_segment(mut self, segment: Segment) -> Result<Self, DomainError> {
        self.segments.push(segment);
        Self::new(self.uuid, self.height, self.segments)
    }

    /// Updates width and audio channel of the segment identified by `uuid`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SegmentNotFound`] if no segment has that identifier.
    pub fn update_segment_properties(
        mut self,
        uuid: &SegmentUuid,
        width: SegmentWidth,
        audio_channel: Option<SegmentAudioChannel>,
    ) -> Result<Self, DomainError> {
        let position = self.segment_position(uuid)?;
        let segment = self.segments.remove(position);
        self.segments
            .insert(position, segment.update(width, audio_channel));
        Self::new(self.uuid, self.height, self.segments)
    }

    /// Removes the segment identified by `uuid`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SegmentNotFound`] if no segment has that identifier,
    /// or [`DomainError::ScreenHasNoSegments`] when it was the last one.
    pub fn remove_segment(mut self, uuid: &SegmentUuid) -> Result<Self, DomainError> {
        self.segment_position(uuid)?;
        self.segments.retain(|segment| &segment.uuid != uuid);
        Self::new(self.uuid, self.height, self.segments)
    }

    /// Clears the audio channel of every segment.
    pub fn disable_segments_dante(self) -> Result<Self, DomainError> {
        let segments = self
            .segments
            .into_iter()
            .map(Segment::unset_audio_channel)
            .collect();
        Self::new(self.uuid, self.height, segments)
    }

    /// Assigns `audio_channel` to every segment.
    pub fn set_segments_dante(
        self,
        audio_channel: SegmentAudioChannel,
    ) -> Result<Self, DomainError> {
        let segments = self
            .segments
            .into_iter()
            .map(|segment| segment.set_audio_channel(audio_channel))
            .collect();
        Self::new(self.uuid, self.height, segments)
    }

    /// Moves the screen to its terminal deleted state.
    pub fn delete(self) -> Result<DeletedScreen, DomainError> {
        DeletedScreen::new(self.uuid, self.height, self.segments)
    }

    fn segment_position(&self, uuid: &SegmentUuid) -> Result<usize, DomainError> {
        self.segments
            .iter()
            .position(|segment| &segment.uuid == uuid)
            .ok_or(DomainError::SegmentNotFound)
    }
}

impl DeletedScreen {
    /// Builds a deleted screen.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ScreenHasNoSegments`] if `segments` is empty.
    pub fn new(
        uuid: ScreenUuid,
        height: ScreenHeight,
        segments: Vec<Segment>,
    ) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::ScreenHasNoSegments);
        }
        Ok(Self {
            uuid,
            height,
            segments,
        })
    }

    pub fn uuid(&self) -> &ScreenUuid {
        &self.uuid
    }

    pub fn height(&self) -> ScreenHeight {
        self.height
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl Screen {
    /// Returns the editable view of this screen.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ScreenNotEditable`] for a deleted screen.
    pub fn assert_editable(&self) -> Result<&EditableScreen, DomainError> {
        match self {
            Screen::Editable(screen) => Ok(screen),
            Screen::Deleted(_) => Err(DomainError::ScreenNotEditable),
        }
    }

    /// Owned variant of [`Screen::assert_editable`].
    pub fn into_editable(self) -> Result<EditableScreen, DomainError> {
        match self {
            Screen::Editable(screen) => Ok(screen),
            Screen::Deleted(_) => Err(DomainError::ScreenNotEditable),
        }
    }

    pub fn uuid(&self) -> &ScreenUuid {
        match self {
            Screen::Editable(screen) => screen.uuid(),
            Screen::Deleted(screen) => screen.uuid(),
        }
    }

    pub fn height(&self) -> ScreenHeight {
        match self {
            Screen::Editable(screen) => screen.height(),
            Screen::Deleted(screen) => screen.height(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        match self {
            Screen::Editable(screen) => screen.segments(),
            Screen::Deleted(screen) => screen.segments(),
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Screen::Deleted(_))
    }

    pub fn contains_segment(&self, uuid: &SegmentUuid) -> bool {
        self.segments().iter().any(|segment| &segment.uuid == uuid)
    }
}

impl From<EditableScreen> for Screen {
    fn from(screen: EditableScreen) -> Self {
        Screen::Editable(screen)
    }
}

impl From<DeletedScreen> for Screen {
    fn from(screen: DeletedScreen) -> Self {
        Screen::Deleted(screen)
    }
}

// ── Serde representation ──────────────────────────────────────────────────────

/// Flat JSON shape of a [`Screen`]; the lifecycle state is a `deleted` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScreenRecord {
    uuid: ScreenUuid,
    height: ScreenHeight,
    segments: Vec<Segment>,
    #[serde(default)]
    deleted: bool,
}

impl TryFrom<ScreenRecord> for Screen {
    type Error = DomainError;

    fn try_from(record: ScreenRecord) -> Result<Self, Self::Error> {
        if record.deleted {
            DeletedScreen::new(record.uuid, record.height, record.segments).map(Screen::Deleted)
        } else {
            EditableScreen::new(record.uuid, record.height, record.segments).map(Screen::Editable)
        }
    }
}

impl From<Screen> for ScreenRecord {
    fn from(screen: Screen) -> Self {
        let (deleted, uuid, height, segments) = match screen {
            Screen::Editable(s) => (false, s.uuid, s.height, s.segments),
            Screen::Deleted(s) => (true, s.uuid, s.height, s.segments),
        };
        Self {
            uuid,
            height,
            segments,
            deleted,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
