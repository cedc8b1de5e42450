//! Setup aggregate root.
//!
//! A setup owns an ordered list of screens and the Dante flag.  Every
//! operation rebuilds the setup through [`EditableSetup::new`], which is where
//! the cross-entity rules live:
//!
//! 1. Dante consistency over the segments of **non-deleted** screens:
//!    - `dante_enabled == true`  → every segment has an audio channel;
//!    - `dante_enabled == false` → no segment has one.
//! 2. An editable setup has at least one screen.
//!
//! Deleted screens stay in the list (in their [`Screen::Deleted`] form) and are
//! ignored by rule 1; their segments are frozen.
//!
//! # Finding the screen that owns a segment
//!
//! Segment events only carry the segment identifier, so the setup scans every
//! screen's segment list to find its owner.  That is O(screens × segments),
//! which is fine for the handful of screens an AV setup has.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::screen::{EditableScreen, Screen};
use super::segment::Segment;
use super::values::{
    ScreenHeight, ScreenUuid, SegmentAudioChannel, SegmentUuid, SegmentWidth, SetupUuid,
};

/// A setup that still accepts changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableSetup {
    uuid: SetupUuid,
    dante_enabled: bool,
    screens: Vec<Screen>,
}

/// A setup that has been removed.  Terminal: no event can revive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedSetup {
    uuid: SetupUuid,
    dante_enabled: bool,
    screens: Vec<Screen>,
}

/// A setup in either lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SetupRecord", into = "SetupRecord")]
pub enum Setup {
    Editable(EditableSetup),
    Deleted(DeletedSetup),
}

/// Validates the Dante rule against the segments of live screens.
fn check_dante_consistency(dante_enabled: bool, screens: &[Screen]) -> Result<(), DomainError> {
    let mut live_segments = screens
        .iter()
        .filter(|screen| !screen.is_deleted())
        .flat_map(|screen| screen.segments());

    if dante_enabled {
        if live_segments.any(|segment| segment.audio_channel.is_none()) {
            return Err(DomainError::DanteEnabledButInvalidSegments);
        }
    } else if live_segments.any(|segment| segment.audio_channel.is_some()) {
        return Err(DomainError::DanteDisabledButInvalidSegments);
    }
    Ok(())
}

impl EditableSetup {
    /// Builds an editable setup, enforcing every aggregate invariant.
    ///
    /// # Errors
    ///
    /// - [`DomainError::DanteEnabledButInvalidSegments`] /
    ///   [`DomainError::DanteDisabledButInvalidSegments`] when the Dante rule is
    ///   violated (checked first);
    /// - [`DomainError::ThereIsNoScreen`] when `screens` is empty.
    pub fn new(
        uuid: SetupUuid,
        dante_enabled: bool,
        screens: Vec<Screen>,
    ) -> Result<Self, DomainError> {
        check_dante_consistency(dante_enabled, &screens)?;
        if screens.is_empty() {
            return Err(DomainError::ThereIsNoScreen);
        }
        Ok(Self {
            uuid,
            dante_enabled,
            screens,
        })
    }

    pub fn uuid(&self) -> &SetupUuid {
        &self.uuid
    }

    pub fn dante_enabled(&self) -> bool {
        self.dante_enabled
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// Appends a new editable screen.
    pub fn create_screen(
        mut self,
        uuid: ScreenUuid,
        height: ScreenHeight,
        segments: Vec<Segment>,
    ) -> Result<Self, DomainError> {
        let screen = EditableScreen::create(uuid, height, segments)?;
        self.screens.push(Screen::Editable(screen));
        Self::new(self.uuid, self.dante_enabled, self.screens)
    }

    /// Changes the height of the screen identified by `uuid`.
    ///
    /// # Errors
    ///
    /// [`DomainError::ScreenNoFound`] if no screen matches,
    /// [`DomainError::ScreenNotEditable`] if it was deleted.
    pub fn update_screen_properties(
        self,
        uuid: &ScreenUuid,
        height: ScreenHeight,
    ) -> Result<Self, DomainError> {
        let index = self.screen_index(uuid)?;
        self.replace_screen(index, |screen| {
            screen
                .update_properties(uuid.clone(), height)
                .map(Screen::Editable)
        })
    }

    /// Marks the screen identified by `uuid` as deleted, keeping it in place.
    ///
    /// # Errors
    ///
    /// [`DomainError::ScreenNoFound`] if no screen matches,
    /// [`DomainError::ScreenNotEditable`] if it was already deleted.
    pub fn remove_screen(self, uuid: &ScreenUuid) -> Result<Self, DomainError> {
        let index = self.screen_index(uuid)?;
        self.replace_screen(index, |screen| screen.delete().map(Screen::Deleted))
    }

    /// Appends a new segment to the screen identified by `screen_uuid`.
    pub fn add_segment_to_screen(
        self,
        screen_uuid: &ScreenUuid,
        uuid: SegmentUuid,
        width: SegmentWidth,
        audio_channel: Option<SegmentAudioChannel>,
    ) -> Result<Self, DomainError> {
        let index = self.screen_index(screen_uuid)?;
        let segment = Segment::create(uuid, width, audio_channel);
        self.replace_screen(index, |screen| {
            screen.add_segment(segment).map(Screen::Editable)
        })
    }

    /// Updates the segment identified by `uuid`, wherever it lives.
    ///
    /// # Errors
    ///
    /// [`DomainError::ScreenNoFound`] if no screen owns the segment,
    /// [`DomainError::ScreenNotEditable`] if its owner was deleted.
    pub fn update_segment_properties(
        self,
        uuid: &SegmentUuid,
        width: SegmentWidth,
        audio_channel: Option<SegmentAudioChannel>,
    ) -> Result<Self, DomainError> {
        let index = self.owning_screen_index(uuid)?;
        self.replace_screen(index, |screen| {
            screen
                .update_segment_properties(uuid, width, audio_channel)
                .map(Screen::Editable)
        })
    }

    /// Removes the segment identified by `uuid` from its owning screen.
    ///
    /// # Errors
    ///
    /// [`DomainError::ScreenNoFound`] if no screen owns the segment,
    /// [`DomainError::ScreenNotEditable`] if its owner was deleted,
    /// [`DomainError::ScreenHasNoSegments`] if it was the owner's last segment.
    pub fn remove_segment(self, uuid: &SegmentUuid) -> Result<Self, DomainError> {
        let index = self.owning_screen_index(uuid)?;
        self.replace_screen(index, |screen| {
            screen.remove_segment(uuid).map(Screen::Editable)
        })
    }

    /// Turns Dante off, clearing the audio channel of every live segment.
    pub fn disable_dante(self) -> Result<Self, DomainError> {
        let screens = self
            .screens
            .into_iter()
            .map(|screen| match screen {
                Screen::Editable(s) => s.disable_segments_dante().map(Screen::Editable),
                deleted @ Screen::Deleted(_) => Ok(deleted),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(self.uuid, false, screens)
    }

    /// Turns Dante on, assigning `default_audio_channel` to every live segment.
    pub fn enable_dante(
        self,
        default_audio_channel: SegmentAudioChannel,
    ) -> Result<Self, DomainError> {
        let screens = self
            .screens
            .into_iter()
            .map(|screen| match screen {
                Screen::Editable(s) => s
                    .set_segments_dante(default_audio_channel)
                    .map(Screen::Editable),
                deleted @ Screen::Deleted(_) => Ok(deleted),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(self.uuid, true, screens)
    }

    /// Moves the setup to its terminal deleted state.
    pub fn delete(self) -> Result<DeletedSetup, DomainError> {
        DeletedSetup::new(self.uuid, self.dante_enabled, self.screens)
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn screen_index(&self, uuid: &ScreenUuid) -> Result<usize, DomainError> {
        self.screens
            .iter()
            .position(|screen| screen.uuid() == uuid)
            .ok_or(DomainError::ScreenNoFound)
    }

    fn owning_screen_index(&self, uuid: &SegmentUuid) -> Result<usize, DomainError> {
        self.screens
            .iter()
            .position(|screen| screen.contains_segment(uuid))
            .ok_or(DomainError::ScreenNoFound)
    }

    /// Runs `change` on the editable screen at `index` and rebuilds the setup.
    fn replace_screen<F>(mut self, index: usize, change: F) -> Result<Self, DomainError>
    where
        F: FnOnce(EditableScreen) -> Result<Screen, DomainError>,
    {
        let editable = self.screens[index].clone().into_editable()?;
        self.screens[index] = change(editable)?;
        Self::new(self.uuid, self.dante_enabled, self.screens)
    }
}

impl DeletedSetup {
    /// Builds a deleted setup.  The Dante rule is still checked; the
    /// "at least one screen" rule is not.
    pub fn new(
        uuid: SetupUuid,
        dante_enabled: bool,
        screens: Vec<Screen>,
    ) -> Result<Self, DomainError> {
        check_dante_consistency(dante_enabled, &screens)?;
        Ok(Self {
            uuid,
            dante_enabled,
            screens,
        })
    }

    pub fn uuid(&self) -> &SetupUuid {
        &self.uuid
    }

    pub fn dante_enabled(&self) -> bool {
        self.dante_enabled
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }
}

impl Setup {
    /// The single gate for every mutation of the aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SetupNotEditable`] for a deleted setup.
    pub fn assert_editable(&self) -> Result<&EditableSetup, DomainError> {
        match self {
            Setup::Editable(setup) => Ok(setup),
            Setup::Deleted(_) => Err(DomainError::SetupNotEditable),
        }
    }

    /// Owned variant of [`Setup::assert_editable`].
    pub fn into_editable(self) -> Result<EditableSetup, DomainError> {
        match self {
            Setup::Editable(setup) => Ok(setup),
            Setup::Deleted(_) => Err(DomainError::SetupNotEditable),
        }
    }

    pub fn uuid(&self) -> &SetupUuid {
        match self {
            Setup::Editable(setup) => setup.uuid(),
            Setup::Deleted(setup) => setup.uuid(),
        }
    }

    pub fn dante_enabled(&self) -> bool {
        match self {
            Setup::Editable(setup) => setup.dante_enabled(),
            Setup::Deleted(setup) => setup.dante_enabled(),
        }
    }

    pub fn screens(&self) -> &[Screen] {
        match self {
            Setup::Editable(setup) => setup.screens(),
            Setup::Deleted(setup) => setup.screens(),
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Setup::Deleted(_))
    }

    /// Returns the screen identified by `uuid`, deleted or not.
    pub fn screen(&self, uuid: &ScreenUuid) -> Option<&Screen> {
        self.screens().iter().find(|screen| screen.uuid() == uuid)
    }
}

impl From<EditableSetup> for Setup {
    fn from(setup: EditableSetup) -> Self {
        Setup::Editable(setup)
    }
}

impl From<DeletedSetup> for Setup {
    fn from(setup: DeletedSetup) -> Self {
        Setup::Deleted(setup)
    }
}

// ── Serde representation ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetupRecord {
    uuid: SetupUuid,
    dante_enabled: bool,
    screens: Vec<Screen>,
    #[serde(default)]
    deleted: bool,
}

impl TryFrom<SetupRecord> for Setup {
    type Error = DomainError;

    fn try_from(record: SetupRecord) -> Result<Self, Self::Error> {
        if record.deleted {
            DeletedSetup::new(record.uuid, record.dante_enabled, record.screens).map(Setup::Deleted)
        } else {
            EditableSetup::new(record.uuid, record.dante_enabled, record.screens)
                .map(Setup::Editable)
        }
    }
}

impl From<Setup> for SetupRecord {
    fn from(setup: Setup) -> Self {
        let (deleted, uuid, dante_enabled, screens) = match setup {
            Setup::Editable(s) => (false, s.uuid, s.dante_enabled, s.screens),
            Setup::Deleted(s) => (true, s.uuid, s.dante_enabled, s.screens),
        };
        Self {
            uuid,
            dante_enabled,
            screens,
            deleted,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: &str, channel: Option<i64>) -> Segment {
        Segment::create(
            SegmentUuid::new(id),
            SegmentWidth::new(100).unwrap(),
            channel.map(|c| SegmentAudioChannel::new(c).unwrap()),
        )
    }

    fn screen(id: &str, segments: Vec<Segment>) -> Screen {
        Screen::Editable(
            EditableScreen::new(ScreenUuid::new(id), ScreenHeight::new(100).unwrap(), segments)
                .unwrap(),
        )
    }

    fn setup(dante_enabled: bool, screens: Vec<Screen>) -> EditableSetup {
        EditableSetup::new(SetupUuid::new("setup"), dante_enabled, screens).unwrap()
    }

    fn height(value: i64) -> ScreenHeight {
        ScreenHeight::new(value).unwrap()
    }

    // ── Invariants ────────────────────────────────────────────────────────────

    #[test]
    fn test_new_rejects_missing_channel_when_dante_enabled() {
        let result = EditableSetup::new(
            SetupUuid::new("s"),
            true,
            vec![screen("a", vec![segment("x", None)])],
        );
        assert_eq!(result, Err(DomainError::DanteEnabledButInvalidSegments));
    }

    #[test]
    fn test_new_rejects_channel_when_dante_disabled() {
        let result = EditableSetup::new(
            SetupUuid::new("s"),
            false,
            vec![screen("a", vec![segment("x", Some(2))])],
        );
        assert_eq!(result, Err(DomainError::DanteDisabledButInvalidSegments));
    }

    #[test]
    fn test_new_rejects_empty_screen_list() {
        let result = EditableSetup::new(SetupUuid::new("s"), true, vec![]);
        assert_eq!(result, Err(DomainError::ThereIsNoScreen));
    }

    #[test]
    fn test_new_ignores_segments_of_deleted_screens() {
        let deleted = screen("old", vec![segment("x", Some(4))])
            .into_editable()
            .unwrap()
            .delete()
            .unwrap();
        let result = EditableSetup::new(
            SetupUuid::new("s"),
            false,
            vec![screen("a", vec![segment("y", None)]), Screen::Deleted(deleted)],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_reconstruction_from_own_fields_is_idempotent() {
        let original = setup(true, vec![screen("a", vec![segment("x", Some(1))])]);
        let rebuilt = EditableSetup::new(
            original.uuid().clone(),
            original.dante_enabled(),
            original.screens().to_vec(),
        )
        .unwrap();
        assert_eq!(original, rebuilt);

        let deleted = original.delete().unwrap();
        let rebuilt_deleted = DeletedSetup::new(
            deleted.uuid().clone(),
            deleted.dante_enabled(),
            deleted.screens().to_vec(),
        )
        .unwrap();
        assert_eq!(deleted, rebuilt_deleted);
    }

    #[test]
    fn test_deleted_setup_allows_empty_screen_list_but_checks_dante() {
        assert!(DeletedSetup::new(SetupUuid::new("s"), false, vec![]).is_ok());
        assert_eq!(
            DeletedSetup::new(
                SetupUuid::new("s"),
                true,
                vec![screen("a", vec![segment("x", None)])]
            ),
            Err(DomainError::DanteEnabledButInvalidSegments)
        );
    }

    // ── Screen operations ─────────────────────────────────────────────────────

    #[test]
    fn test_create_screen_appends_editable_screen() {
        let updated = setup(false, vec![screen("a", vec![segment("x", None)])])
            .create_screen(ScreenUuid::new("b"), height(300), vec![segment("y", None)])
            .unwrap();
        assert_eq!(updated.screens().len(), 2);
        assert_eq!(updated.screens()[1].uuid(), &ScreenUuid::new("b"));
        assert!(!updated.screens()[1].is_deleted());
    }

    #[test]
    fn test_create_screen_violating_dante_fails() {
        let result = setup(true, vec![screen("a", vec![segment("x", Some(1))])]).create_screen(
            ScreenUuid::new("b"),
            height(300),
            vec![segment("y", None)],
        );
        assert_eq!(result, Err(DomainError::DanteEnabledButInvalidSegments));
    }

    #[test]
    fn test_update_screen_properties_changes_height() {
        let updated = setup(false, vec![screen("a", vec![segment("x", None)])])
            .update_screen_properties(&ScreenUuid::new("a"), height(640))
            .unwrap();
        assert_eq!(updated.screens()[0].height().get(), 640);
    }

    #[test]
    fn test_update_screen_properties_unknown_screen_fails() {
        let result = setup(false, vec![screen("a", vec![segment("x", None)])])
            .update_screen_properties(&ScreenUuid::new("nope"), height(640));
        assert_eq!(result, Err(DomainError::ScreenNoFound));
    }

    #[test]
    fn test_remove_screen_keeps_it_in_place_as_deleted() {
        let updated = setup(
            false,
            vec![
                screen("a", vec![segment("x", None)]),
                screen("b", vec![segment("y", None)]),
            ],
        )
        .remove_screen(&ScreenUuid::new("a"))
        .unwrap();
        assert_eq!(updated.screens().len(), 2);
        assert!(updated.screens()[0].is_deleted());
        assert!(!updated.screens()[1].is_deleted());
    }

    #[test]
    fn test_mutating_deleted_screen_fails_with_screen_not_editable() {
        let updated = setup(
            false,
            vec![
                screen("a", vec![segment("x", None)]),
                screen("b", vec![segment("y", None)]),
            ],
        )
        .remove_screen(&ScreenUuid::new("a"))
        .unwrap();

        assert_eq!(
            updated.clone().remove_screen(&ScreenUuid::new("a")),
            Err(DomainError::ScreenNotEditable)
        );
        assert_eq!(
            updated
                .clone()
                .update_screen_properties(&ScreenUuid::new("a"), height(5)),
            Err(DomainError::ScreenNotEditable)
        );
        assert_eq!(
            updated.clone().add_segment_to_screen(
                &ScreenUuid::new("a"),
                SegmentUuid::new("new"),
                SegmentWidth::new(3).unwrap(),
                None
            ),
            Err(DomainError::ScreenNotEditable)
        );
        assert_eq!(
            updated.remove_segment(&SegmentUuid::new("x")),
            Err(DomainError::ScreenNotEditable)
        );
    }

    // ── Segment operations ────────────────────────────────────────────────────

    #[test]
    fn test_add_segment_to_unknown_screen_fails_with_screen_not_found() {
        let result = setup(false, vec![screen("a", vec![segment("x", None)])])
            .add_segment_to_screen(
                &ScreenUuid::new("ghost"),
                SegmentUuid::new("y"),
                SegmentWidth::new(10).unwrap(),
                None,
            );
        assert_eq!(result, Err(DomainError::ScreenNoFound));
    }

    #[test]
    fn test_update_segment_properties_locates_owning_screen() {
        let updated = setup(
            false,
            vec![
                screen("a", vec![segment("x", None)]),
                screen("b", vec![segment("y", None)]),
            ],
        )
        .update_segment_properties(&SegmentUuid::new("y"), SegmentWidth::new(999).unwrap(), None)
        .unwrap();
        assert_eq!(updated.screens()[1].segments()[0].width.get(), 999);
        assert_eq!(updated.screens()[0].segments()[0].width.get(), 100);
    }

    #[test]
    fn test_update_unknown_segment_fails_with_screen_not_found() {
        let result = setup(false, vec![screen("a", vec![segment("x", None)])])
            .update_segment_properties(&SegmentUuid::new("nope"), SegmentWidth::new(1).unwrap(), None);
        assert_eq!(result, Err(DomainError::ScreenNoFound));
    }

    #[test]
    fn test_remove_unknown_segment_fails_with_screen_not_found() {
        let result = setup(false, vec![screen("a", vec![segment("x", None)])])
            .remove_segment(&SegmentUuid::new("nope"));
        assert_eq!(result, Err(DomainError::ScreenNoFound));
    }

    #[test]
    fn test_update_segment_channel_violating_dante_fails() {
        let result = setup(false, vec![screen("a", vec![segment("x", None)])])
            .update_segment_properties(
                &SegmentUuid::new("x"),
                SegmentWidth::new(100).unwrap(),
                Some(SegmentAudioChannel::new(3).unwrap()),
            );
        assert_eq!(result, Err(DomainError::DanteDisabledButInvalidSegments));
    }

    // ── Dante ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_enable_dante_sets_default_channel_on_live_segments_only() {
        let deleted = screen("old", vec![segment("z", None)])
            .into_editable()
            .unwrap()
            .delete()
            .unwrap();
        let updated = setup(
            false,
            vec![
                screen("a", vec![segment("x", None), segment("y", None)]),
                Screen::Deleted(deleted.clone()),
            ],
        )
        .enable_dante(SegmentAudioChannel::DANTE_DEFAULT)
        .unwrap();

        assert!(updated.dante_enabled());
        assert!(updated.screens()[0]
            .segments()
            .iter()
            .all(|s| s.audio_channel == Some(SegmentAudioChannel::DANTE_DEFAULT)));
        assert_eq!(updated.screens()[1], Screen::Deleted(deleted));
    }

    #[test]
    fn test_disable_dante_clears_all_live_channels() {
        let updated = setup(true, vec![screen("a", vec![segment("x", Some(8))])])
            .disable_dante()
            .unwrap();
        assert!(!updated.dante_enabled());
        assert_eq!(updated.screens()[0].segments()[0].audio_channel, None);
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    #[test]
    fn test_delete_preserves_fields_and_blocks_mutation() {
        let editable = setup(false, vec![screen("a", vec![segment("x", None)])]);
        let deleted = Setup::from(editable.clone().delete().unwrap());
        assert!(deleted.is_deleted());
        assert_eq!(deleted.uuid(), editable.uuid());
        assert_eq!(deleted.screens(), editable.screens());
        assert_eq!(deleted.assert_editable(), Err(DomainError::SetupNotEditable));
    }

    // ── Serde ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_setup_json_round_trips_through_validation() {
        let original = Setup::from(setup(true, vec![screen("a", vec![segment("x", Some(1))])]));
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"danteEnabled\":true"));
        let back: Setup = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_setup_json_violating_dante_is_rejected() {
        let json = r#"{
            "uuid": "s",
            "danteEnabled": true,
            "screens": [{"uuid": "a", "height": 10, "segments": [{"uuid": "x", "width": 5}]}]
        }"#;
        let result: Result<Setup, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
