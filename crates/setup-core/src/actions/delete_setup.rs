use crate::domain::error::DomainError;
use crate::domain::user::AuditUser;
use crate::domain::values::SetupUuid;
use crate::events::types::{EntityEvent, SetupRemoved};
use crate::reducer::{reduce_domain_event, SetupState};

#[derive(Debug, Clone)]
pub struct DeleteSetupProps {
    pub user: AuditUser,
    pub uuid: SetupUuid,
}

/// Deletes the setup by folding a single `SetupRemoved` event.
///
/// # Errors
///
/// [`DomainError::SetupNotEditable`] if the setup is already deleted.
pub fn delete_setup_action(
    props: DeleteSetupProps,
    state: &SetupState,
) -> Result<SetupState, DomainError> {
    let event = EntityEvent::SetupRemoved(SetupRemoved {
        user: props.user,
        uuid: props.uuid,
    });
    reduce_domain_event(state, event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::create_setup::create_setup_action;
    use crate::domain::screen::{EditableScreen, Screen};
    use crate::domain::segment::Segment;
    use crate::domain::values::{ScreenHeight, ScreenUuid, SegmentUuid, SegmentWidth};
    use crate::events::types::DomainEventType;
    use crate::reducer::CreateSetupProps;

    fn user() -> AuditUser {
        AuditUser::new("user-uuid", "user-email")
    }

    fn created() -> SetupState {
        let screen = EditableScreen::new(
            ScreenUuid::new("screen-uuid"),
            ScreenHeight::new(100).unwrap(),
            vec![Segment::create(
                SegmentUuid::new("segment-uuid"),
                SegmentWidth::new(100).unwrap(),
                None,
            )],
        )
        .unwrap();
        create_setup_action(CreateSetupProps {
            user: user(),
            uuid: SetupUuid::new("setup-uuid"),
            dante_enabled: false,
            screens: vec![Screen::Editable(screen)],
        })
        .unwrap()
    }

    fn props() -> DeleteSetupProps {
        DeleteSetupProps {
            user: user(),
            uuid: SetupUuid::new("setup-uuid"),
        }
    }

    #[test]
    fn test_delete_setup_action_appends_setup_removed() {
        let state = delete_setup_action(props(), &created()).unwrap();

        assert_eq!(state.events.len(), 2);
        assert_eq!(state.events[1].event_type(), DomainEventType::SetupRemoved);
        assert!(state.state.is_deleted());
    }

    #[test]
    fn test_delete_setup_action_twice_fails() {
        let deleted = delete_setup_action(props(), &created()).unwrap();
        assert_eq!(
            delete_setup_action(props(), &deleted),
            Err(DomainError::SetupNotEditable)
        );
    }
}
