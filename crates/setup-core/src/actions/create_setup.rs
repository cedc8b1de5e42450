use crate::domain::error::DomainError;
use crate::reducer::{create_initial_setup, CreateSetupProps, SetupState};

/// Creates a new setup.  The resulting log is exactly `[SetupAdded]`.
///
/// # Errors
///
/// Whatever [`create_initial_setup`] rejects.
pub fn create_setup_action(props: CreateSetupProps) -> Result<SetupState, DomainError> {
    create_initial_setup(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::screen::{EditableScreen, Screen};
    use crate::domain::segment::Segment;
    use crate::domain::user::AuditUser;
    use crate::domain::values::{
        ScreenHeight, ScreenUuid, SegmentAudioChannel, SegmentUuid, SegmentWidth, SetupUuid,
    };
    use crate::events::types::DomainEventType;

    fn props(dante_enabled: bool, channel: Option<i64>) -> CreateSetupProps {
        let segment = Segment::create(
            SegmentUuid::new("segment-uuid"),
            SegmentWidth::new(100).unwrap(),
            channel.map(|c| SegmentAudioChannel::new(c).unwrap()),
        );
        let screen = EditableScreen::new(
            ScreenUuid::new("screen-uuid"),
            ScreenHeight::new(100).unwrap(),
            vec![segment],
        )
        .unwrap();
        CreateSetupProps {
            user: AuditUser::new("user-uuid", "user-email"),
            uuid: SetupUuid::new("setup-uuid"),
            dante_enabled,
            screens: vec![Screen::Editable(screen)],
        }
    }

    #[test]
    fn test_create_setup_action_emits_setup_added() {
        let state = create_setup_action(props(false, None)).unwrap();

        assert_eq!(state.events.len(), 1);
        assert_eq!(state.events[0].event_type(), DomainEventType::SetupAdded);
        assert_eq!(state.state.uuid(), &SetupUuid::new("setup-uuid"));
        assert_eq!(state.events[0].user().email, "user-email");
    }

    #[test]
    fn test_create_setup_action_rejects_dante_violation() {
        assert_eq!(
            create_setup_action(props(true, None)),
            Err(DomainError::DanteEnabledButInvalidSegments)
        );
        assert_eq!(
            create_setup_action(props(false, Some(3))),
            Err(DomainError::DanteDisabledButInvalidSegments)
        );
    }
}
