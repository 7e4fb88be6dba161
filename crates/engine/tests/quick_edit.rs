use std::sync::Arc;

use chrono::NaiveDate;
use engine::{
    Engine, EngineError, ExportFormat, Member, MemoryStore, NewAssignment, NewService,
    PlanningStatus, Profile, QuickEditRequest, QuickEditTarget, RecordStore, SessionPhase,
    StoreOp, TaskPreset,
};
use uuid::Uuid;

struct Fixture {
    engine: Engine,
    store: Arc<MemoryStore>,
    service_id: Uuid,
    alice: Profile,
    alice_member: Member,
    bruno_member: Member,
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

async fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let engine = Engine::builder()
        .store(store.clone())
        .build()
        .await
        .unwrap();

    let service = engine
        .create_service(NewService {
            name: "accueil".to_string(),
            display_name: "Accueil".to_string(),
            emoji: None,
            description: None,
        })
        .await
        .unwrap();
    let alice = engine
        .create_profile(Some("Alice Martin"), Some("alice@example.org"), None)
        .await
        .unwrap();
    let bruno = engine
        .create_profile(Some("Bruno Petit"), None, None)
        .await
        .unwrap();
    let alice_member = engine
        .add_member(service.id, alice.id, None, None)
        .await
        .unwrap();
    let bruno_member = engine
        .add_member(service.id, bruno.id, None, None)
        .await
        .unwrap();

    Fixture {
        engine,
        store,
        service_id: service.id,
        alice,
        alice_member,
        bruno_member,
    }
}

fn cell(member: &Member, day: &str) -> QuickEditTarget {
    QuickEditTarget::Cell {
        date: date(day),
        member_id: member.id,
    }
}

#[tokio::test]
async fn commit_on_empty_cell_creates_one_planning_and_one_assignment() {
    let f = fixture().await;
    let mut session = f
        .engine
        .open_quick_edit(f.service_id, cell(&f.alice_member, "2025-06-24"))
        .await
        .unwrap();
    assert!(!session.is_editing());
    session.apply_preset(TaskPreset::Participant).unwrap();

    f.store.clear_calls().await;
    let saved = session
        .commit(&f.engine, Some("admin"), date("2025-06-29"))
        .await
        .unwrap();

    let calls = f.store.calls().await;
    assert_eq!(
        &calls[..3],
        &[
            StoreOp::InsertPlanning,
            StoreOp::DeleteAssignments,
            StoreOp::InsertAssignment
        ]
    );
    assert_eq!(session.phase(), SessionPhase::Closed);
    assert_eq!(saved.planning.task, "Participant");
    assert_eq!(saved.planning.status, PlanningStatus::Planned);
    assert_eq!(saved.planning.created_by.as_deref(), Some("admin"));

    let assignments = f.store.list_assignments(saved.planning.id).await.unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].member_id, f.alice.id);
    assert_eq!(assignments[0].individual_status, PlanningStatus::Planned);

    let shown = saved
        .board
        .cell_for(f.alice_member.id, date("2025-06-24"))
        .unwrap();
    assert_eq!(shown.planning.id, saved.planning.id);
    assert!(
        saved
            .board
            .cell_for(f.bruno_member.id, date("2025-06-24"))
            .is_none()
    );
}

#[tokio::test]
async fn recommit_keeps_the_planning_and_a_single_assignment() {
    let f = fixture().await;
    let first = f
        .engine
        .save_planning(
            f.service_id,
            QuickEditRequest {
                target: cell(&f.alice_member, "2025-06-24"),
                task: "Leader".to_string(),
                status: PlanningStatus::Planned,
                notes: None,
            },
            None,
            date("2025-06-24"),
        )
        .await
        .unwrap();

    let mut session = f
        .engine
        .open_quick_edit(f.service_id, cell(&f.alice_member, "2025-06-24"))
        .await
        .unwrap();
    assert!(session.is_editing());
    assert_eq!(session.draft().task, "Leader");
    session.set_status(PlanningStatus::Completed).unwrap();
    session.set_notes("  clés au bureau ").unwrap();
    let second = session
        .commit(&f.engine, None, date("2025-06-24"))
        .await
        .unwrap();

    assert_eq!(second.planning.id, first.planning.id);
    assert_eq!(second.planning.notes.as_deref(), Some("clés au bureau"));
    let plannings = f.engine.list_plannings(f.service_id).await.unwrap();
    assert_eq!(plannings.len(), 1);
    assert_eq!(plannings[0].planning.status, PlanningStatus::Completed);
    assert_eq!(plannings[0].assignments.len(), 1);
}

#[tokio::test]
async fn blank_task_is_refused_without_store_calls() {
    let f = fixture().await;
    let mut session = f
        .engine
        .open_quick_edit(f.service_id, cell(&f.alice_member, "2025-06-24"))
        .await
        .unwrap();
    session.set_task("   ").unwrap();

    f.store.clear_calls().await;
    let result = session.commit(&f.engine, None, date("2025-06-24")).await;

    assert_eq!(result.err(), Some(EngineError::MissingTask));
    assert!(f.store.calls().await.is_empty());
    assert_eq!(session.phase(), SessionPhase::Open);
    assert_eq!(session.warning(), Some("La tâche est requise"));
}

fn leader_on(target: QuickEditTarget) -> QuickEditRequest {
    QuickEditRequest {
        target,
        task: "Leader".to_string(),
        status: PlanningStatus::Planned,
        notes: None,
    }
}

#[tokio::test]
async fn recommit_collapses_several_assignments_into_one() {
    let f = fixture().await;
    let first = f
        .engine
        .save_planning(
            f.service_id,
            leader_on(cell(&f.alice_member, "2025-06-24")),
            None,
            date("2025-06-24"),
        )
        .await
        .unwrap();
    for member_id in [f.alice.id, f.bruno_member.user_id, Uuid::new_v4()] {
        f.store
            .insert_assignment(NewAssignment {
                planning_id: first.planning.id,
                member_id,
                individual_status: PlanningStatus::InProgress,
            })
            .await
            .unwrap();
    }
    assert_eq!(
        f.store
            .list_assignments(first.planning.id)
            .await
            .unwrap()
            .len(),
        4
    );

    let second = f
        .engine
        .save_planning(
            f.service_id,
            leader_on(cell(&f.alice_member, "2025-06-24")),
            None,
            date("2025-06-24"),
        )
        .await
        .unwrap();

    assert_eq!(second.planning.id, first.planning.id);
    let assignments = f.store.list_assignments(first.planning.id).await.unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].member_id, f.alice.id);
    assert_eq!(assignments[0].individual_status, PlanningStatus::Planned);
}

#[tokio::test]
async fn save_with_blank_task_makes_no_store_call() {
    let f = fixture().await;
    f.store.clear_calls().await;

    let result = f
        .engine
        .save_planning(
            f.service_id,
            QuickEditRequest {
                task: " \t ".to_string(),
                ..leader_on(cell(&f.alice_member, "2025-06-24"))
            },
            None,
            date("2025-06-24"),
        )
        .await;

    assert_eq!(result.err(), Some(EngineError::MissingTask));
    assert!(f.store.calls().await.is_empty());
}

#[tokio::test]
async fn edited_planning_keeps_its_contested_cell() {
    let f = fixture().await;
    let first = f
        .engine
        .save_planning(
            f.service_id,
            leader_on(cell(&f.alice_member, "2025-06-24")),
            None,
            date("2025-06-24"),
        )
        .await
        .unwrap();
    let rival = f
        .engine
        .save_planning(
            f.service_id,
            leader_on(cell(&f.bruno_member, "2025-06-24")),
            None,
            date("2025-06-24"),
        )
        .await
        .unwrap();
    f.store
        .insert_assignment(NewAssignment {
            planning_id: rival.planning.id,
            member_id: f.alice.id,
            individual_status: PlanningStatus::Planned,
        })
        .await
        .unwrap();

    let saved = f
        .engine
        .save_planning(
            f.service_id,
            QuickEditRequest {
                task: "Participant".to_string(),
                ..leader_on(cell(&f.alice_member, "2025-06-24"))
            },
            None,
            date("2025-06-24"),
        )
        .await
        .unwrap();

    assert_eq!(saved.planning.id, first.planning.id);
    let shown = saved
        .board
        .cell_for(f.alice_member.id, date("2025-06-24"))
        .unwrap();
    assert_eq!(shown.planning.id, first.planning.id);
    assert_eq!(shown.planning.task, "Participant");
}

#[tokio::test]
async fn delete_removes_stale_assignments_before_the_planning() {
    let f = fixture().await;
    let saved = f
        .engine
        .save_planning(
            f.service_id,
            QuickEditRequest {
                target: cell(&f.alice_member, "2025-06-25"),
                task: "Leader".to_string(),
                status: PlanningStatus::Planned,
                notes: None,
            },
            None,
            date("2025-06-25"),
        )
        .await
        .unwrap();
    f.store
        .insert_assignment(NewAssignment {
            planning_id: saved.planning.id,
            member_id: Uuid::new_v4(),
            individual_status: PlanningStatus::Planned,
        })
        .await
        .unwrap();

    f.store.clear_calls().await;
    f.engine.delete_planning(saved.planning.id).await.unwrap();

    assert_eq!(
        f.store.calls().await,
        vec![
            StoreOp::GetPlanning,
            StoreOp::DeleteAssignments,
            StoreOp::DeletePlanning
        ]
    );
    assert!(
        f.store
            .list_assignments(saved.planning.id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        f.store
            .get_planning(saved.planning.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn session_delete_requires_an_existing_planning() {
    let f = fixture().await;
    let mut session = f
        .engine
        .open_quick_edit(f.service_id, cell(&f.bruno_member, "2025-06-26"))
        .await
        .unwrap();
    assert!(matches!(
        session.delete(&f.engine, date("2025-06-26")).await,
        Err(EngineError::SessionState(_))
    ));
}

#[tokio::test]
async fn failed_assignment_insert_leaves_partial_state_and_retry_converges() {
    let f = fixture().await;
    let mut session = f
        .engine
        .open_quick_edit(f.service_id, cell(&f.alice_member, "2025-06-27"))
        .await
        .unwrap();
    session.set_task("Leader").unwrap();

    f.store.fail_on(StoreOp::InsertAssignment).await;
    let failed = session.commit(&f.engine, None, date("2025-06-27")).await;
    assert!(matches!(failed, Err(EngineError::Store(_))));
    assert_eq!(session.phase(), SessionPhase::Open);
    assert!(session.error().is_some());

    let partial = f.engine.list_plannings(f.service_id).await.unwrap();
    assert_eq!(partial.len(), 1);
    assert!(partial[0].assignments.is_empty());

    f.store.recover(StoreOp::InsertAssignment).await;
    let saved = session
        .commit(&f.engine, None, date("2025-06-27"))
        .await
        .unwrap();
    assert_eq!(saved.planning.id, partial[0].planning.id);

    let plannings = f.engine.list_plannings(f.service_id).await.unwrap();
    assert_eq!(plannings.len(), 1);
    assert_eq!(plannings[0].assignments.len(), 1);
}

#[tokio::test]
async fn failed_assignment_fetch_renders_planning_unassigned() {
    let f = fixture().await;
    f.engine
        .save_planning(
            f.service_id,
            QuickEditRequest {
                target: cell(&f.alice_member, "2025-06-24"),
                task: "Leader".to_string(),
                status: PlanningStatus::InProgress,
                notes: None,
            },
            None,
            date("2025-06-24"),
        )
        .await
        .unwrap();

    f.store.fail_on(StoreOp::ListAssignments).await;
    let board = f
        .engine
        .planning_board(f.service_id, date("2025-06-24"))
        .await
        .unwrap();
    assert_eq!(board.plannings.len(), 1);
    assert_eq!(board.populated_cells(), 0);
}

#[tokio::test]
async fn opening_from_the_list_uses_the_first_assignee() {
    let f = fixture().await;
    let saved = f
        .engine
        .save_planning(
            f.service_id,
            QuickEditRequest {
                target: cell(&f.alice_member, "2025-06-28"),
                task: "Participant".to_string(),
                status: PlanningStatus::Planned,
                notes: None,
            },
            None,
            date("2025-06-28"),
        )
        .await
        .unwrap();

    let session = f
        .engine
        .open_quick_edit(
            f.service_id,
            QuickEditTarget::Planning {
                planning_id: saved.planning.id,
            },
        )
        .await
        .unwrap();
    let target = session.target().unwrap();
    assert_eq!(target.member.member.id, f.alice_member.id);
    assert_eq!(target.date, date("2025-06-28"));

    f.store.delete_assignments(saved.planning.id).await.unwrap();
    let orphan = f
        .engine
        .open_quick_edit(
            f.service_id,
            QuickEditTarget::Planning {
                planning_id: saved.planning.id,
            },
        )
        .await;
    assert!(matches!(orphan, Err(EngineError::KeyNotFound(_))));
}

#[tokio::test]
async fn membership_is_unique_and_removal_is_soft() {
    let f = fixture().await;
    assert_eq!(
        f.engine
            .add_member(f.service_id, f.alice.id, None, None)
            .await
            .err(),
        Some(EngineError::ExistingKey(f.alice.id.to_string()))
    );
    assert!(
        f.engine
            .available_profiles(f.service_id, "")
            .await
            .unwrap()
            .is_empty()
    );

    f.engine.remove_member(f.alice_member.id).await.unwrap();
    let active = f.engine.list_active_members(f.service_id).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].display_name(), "Bruno Petit");

    let stored = f.store.get_member(f.alice_member.id).await.unwrap().unwrap();
    assert_eq!(stored.status, engine::MemberStatus::Inactive);

    let available = f
        .engine
        .available_profiles(f.service_id, "ALICE")
        .await
        .unwrap();
    assert_eq!(available, vec![f.alice.clone()]);
}

#[tokio::test]
async fn profile_search_ignores_accents() {
    let f = fixture().await;
    let zoe = f
        .engine
        .create_profile(Some("Zoé Lefèvre"), None, Some("admin"))
        .await
        .unwrap();
    assert_eq!(zoe.role, "admin");
    let found = f.engine.search_profiles("zoe lefevre").await.unwrap();
    assert_eq!(found, vec![zoe]);
}

#[tokio::test]
async fn service_names_are_unique_and_deactivation_hides_them() {
    let f = fixture().await;
    let duplicate = f
        .engine
        .create_service(NewService {
            name: "Accueil".to_string(),
            display_name: "Autre".to_string(),
            emoji: None,
            description: None,
        })
        .await;
    assert_eq!(
        duplicate.err(),
        Some(EngineError::ExistingKey("Accueil".to_string()))
    );

    f.engine
        .set_service_active(f.service_id, false)
        .await
        .unwrap();
    assert!(f.engine.list_services(true).await.unwrap().is_empty());
    assert_eq!(f.engine.list_services(false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn csv_export_lists_plannings_with_assignee_names() {
    let f = fixture().await;
    for (member, day, task) in [
        (&f.alice_member, "2025-06-20", "Leader"),
        (&f.bruno_member, "2025-06-29", "Participant"),
    ] {
        f.engine
            .save_planning(
                f.service_id,
                QuickEditRequest {
                    target: cell(member, day),
                    task: task.to_string(),
                    status: PlanningStatus::Planned,
                    notes: None,
                },
                None,
                date(day),
            )
            .await
            .unwrap();
    }

    let csv = f
        .engine
        .export_plannings(f.service_id, ExportFormat::Csv)
        .await
        .unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "date,task,status,assignees,notes",
            "2025-06-29,Participant,Planifié,Bruno Petit,",
            "2025-06-20,Leader,Planifié,Alice Martin,",
        ]
    );
}

#[tokio::test]
async fn unknown_service_is_not_found() {
    let f = fixture().await;
    assert_eq!(
        f.engine
            .planning_board(Uuid::new_v4(), date("2025-06-29"))
            .await
            .err(),
        Some(EngineError::KeyNotFound("service not exists".to_string()))
    );
}
