//! Integration tests for the setup service.
//!
//! These tests exercise the application layer end to end: a history is
//! written to disk through the event codec, loaded back by
//! `JsonFileHistory` and driven through `SetupService`.

use std::path::PathBuf;

use setup_core::{
    create_setup_action, encode_history, update_setup_action, AuditUser, CreateSetupProps,
    DomainEvent, DomainEventType, EditableScreen, Screen, ScreenHeight, ScreenUuid, Segment,
    SegmentUuid, SegmentWidth, SetupUuid, UpdateSetupProps,
};
use setup_service::application::draft::SetupDraft;
use setup_service::application::setup_service::{HistoryError, ServiceError, SetupService};
use setup_service::infrastructure::storage::history::JsonFileHistory;

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn user() -> AuditUser {
    AuditUser::new("7c1d", "stagehand@venue.example")
}

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("setupctl_it_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn draft(json: &str) -> SetupDraft {
    serde_json::from_str(json).expect("draft JSON")
}

/// Writes a two-event history for setup `hall` and returns its directory.
fn write_hall_history() -> (PathBuf, Vec<DomainEvent>) {
    let screen = EditableScreen::new(
        ScreenUuid::new("left"),
        ScreenHeight::new(100).expect("height"),
        vec![Segment::create(
            SegmentUuid::new("l1"),
            SegmentWidth::new(100).expect("width"),
            None,
        )],
    )
    .expect("screen");
    let created = create_setup_action(CreateSetupProps {
        user: user(),
        uuid: SetupUuid::new("hall"),
        dante_enabled: false,
        screens: vec![Screen::Editable(screen)],
    })
    .expect("create");
    let updated = update_setup_action(
        UpdateSetupProps {
            user: user(),
            setup: draft(
                r#"{"uuid":"hall","danteEnabled":false,
                    "screens":[{"uuid":"left","height":250,"segments":[{"uuid":"l1","width":100}]}]}"#,
            )
            .into_setup()
            .expect("valid draft"),
        },
        &created,
    )
    .expect("update");

    let dir = scratch_dir();
    std::fs::write(
        dir.join("hall.json"),
        encode_history(&updated.events).expect("encode"),
    )
    .expect("write history");
    (dir, updated.events)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_snapshot_and_replay_from_json_files() {
    let (dir, events) = write_hall_history();
    let service = SetupService::new(JsonFileHistory::new(&dir));
    let hall = SetupUuid::new("hall");

    let first = service.snapshot(&hall, 1).expect("snapshot 1");
    let current = service.replay(&hall).expect("replay");

    assert_eq!(first.screens()[0].height().get(), 100);
    assert_eq!(current.state.screens()[0].height().get(), 250);
    assert_eq!(current.events, events);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_plan_update_from_draft_adds_screen_and_enables_dante() {
    let (dir, _) = write_hall_history();
    let service = SetupService::new(JsonFileHistory::new(&dir));

    let desired = draft(
        r#"{"uuid":"hall","danteEnabled":true,
            "screens":[
              {"uuid":"left","height":250,"segments":[{"uuid":"l1","width":100,"audioChannel":1}]},
              {"uuid":"right","height":90,"segments":[{"width":60,"audioChannel":4}]}
            ]}"#,
    )
    .into_setup()
    .expect("valid draft");

    let planned = service
        .plan_update(&SetupUuid::new("hall"), user(), desired)
        .expect("plan");

    let tags: Vec<_> = planned.iter().map(DomainEvent::event_type).collect();
    assert_eq!(
        tags,
        vec![
            DomainEventType::DanteEnabled,
            DomainEventType::SegmentUpdated,
            DomainEventType::ScreenAdded,
        ]
    );
    assert!(planned.iter().all(|e| e.user() == &user()));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_plan_update_rejected_by_reducer_is_reported() {
    // History: hall gets a second screen, then loses it again.
    let (dir, events) = write_hall_history();
    let two_screens = draft(
        r#"{"uuid":"hall","danteEnabled":false,
            "screens":[
              {"uuid":"left","height":250,"segments":[{"uuid":"l1","width":100}]},
              {"uuid":"right","height":90,"segments":[{"uuid":"r1","width":60}]}
            ]}"#,
    );
    let left_only = draft(
        r#"{"uuid":"hall","danteEnabled":false,
            "screens":[{"uuid":"left","height":250,"segments":[{"uuid":"l1","width":100}]}]}"#,
    );
    let mut state = setup_core::StateWithEvents {
        state: setup_core::get_history_snapshot(&events, events.len()).expect("replay"),
        events,
    };
    for desired in [two_screens, left_only.clone()] {
        state = update_setup_action(
            UpdateSetupProps {
                user: user(),
                setup: desired.into_setup().expect("valid draft"),
            },
            &state,
        )
        .expect("update");
    }
    std::fs::write(
        dir.join("hall.json"),
        encode_history(&state.events).expect("encode"),
    )
    .expect("write history");
    let service = SetupService::new(JsonFileHistory::new(&dir));

    // The deleted "right" screen is still in the setup, so omitting it from the
    // desired draft asks to remove it a second time.
    let result = service.plan_update(
        &SetupUuid::new("hall"),
        user(),
        left_only.into_setup().expect("valid draft"),
    );

    assert!(matches!(
        result,
        Err(ServiceError::Domain(setup_core::DomainError::ScreenNotEditable))
    ));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_history_file_is_not_found() {
    let dir = scratch_dir();
    let service = SetupService::new(JsonFileHistory::new(&dir));

    let result = service.replay(&SetupUuid::new("nowhere"));

    assert!(matches!(
        result,
        Err(ServiceError::History(HistoryError::NotFound(_)))
    ));
    std::fs::remove_dir_all(&dir).ok();
}
