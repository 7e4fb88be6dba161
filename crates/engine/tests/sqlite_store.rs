use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};

use engine::{
    Engine, EngineError, MemberStatus, NewAssignment, NewService, PlanningStatus,
    QuickEditRequest, QuickEditTarget, RecordStore,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

async fn service(engine: &Engine, name: &str) -> Uuid {
    engine
        .create_service(NewService {
            name: name.to_string(),
            display_name: name.to_uppercase(),
            emoji: Some("🎵".to_string()),
            description: None,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn builder_without_store_fails() {
    assert!(matches!(
        Engine::builder().build().await,
        Err(EngineError::Store(_))
    ));
}

#[tokio::test]
async fn services_roundtrip_through_the_database() {
    let (engine, _db) = engine_with_db().await;
    let louange = service(&engine, "louange").await;
    service(&engine, "accueil").await;

    let names: Vec<String> = engine
        .list_services(false)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.display_name)
        .collect();
    assert_eq!(names, vec!["ACCUEIL", "LOUANGE"]);

    let updated = engine
        .update_service(louange, "Louange", None, Some("  Dimanche matin "))
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("Dimanche matin"));
    assert_eq!(updated.emoji, None);

    engine.set_service_active(louange, false).await.unwrap();
    let active = engine.list_services(true).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "accueil");
}

#[tokio::test]
async fn weekly_board_and_quick_edit_on_sqlite() {
    let (engine, _db) = engine_with_db().await;
    let service_id = service(&engine, "technique").await;
    let alice = engine
        .create_profile(Some("Alice"), None, None)
        .await
        .unwrap();
    let member = engine
        .add_member(service_id, alice.id, Some("son"), Some("admin"))
        .await
        .unwrap();
    assert_eq!(member.status, MemberStatus::Active);

    let saved = engine
        .save_planning(
            service_id,
            QuickEditRequest {
                target: QuickEditTarget::Cell {
                    date: date("2025-06-24"),
                    member_id: member.id,
                },
                task: "Leader".to_string(),
                status: PlanningStatus::Planned,
                notes: Some("répétition".to_string()),
            },
            Some("admin"),
            date("2025-06-29"),
        )
        .await
        .unwrap();

    let board = saved.board;
    assert_eq!(board.week.first(), Some(&date("2025-06-23")));
    assert_eq!(board.axis.len(), 7);
    assert_eq!(board.members.len(), 1);
    let cell = board.cell_for(member.id, date("2025-06-24")).unwrap();
    assert_eq!(cell.planning.notes.as_deref(), Some("répétition"));
    assert_eq!(cell.assignments[0].display_name(), "Alice");

    let resaved = engine
        .save_planning(
            service_id,
            QuickEditRequest {
                target: QuickEditTarget::Planning {
                    planning_id: saved.planning.id,
                },
                task: "Participant".to_string(),
                status: PlanningStatus::Completed,
                notes: None,
            },
            None,
            date("2025-06-29"),
        )
        .await
        .unwrap();
    assert_eq!(resaved.planning.id, saved.planning.id);
    assert_eq!(resaved.planning.created_by.as_deref(), Some("admin"));

    let groups = engine.plannings_by_date(service_id).await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].plannings[0].assignments.len(), 1);
    assert_eq!(
        groups[0].plannings[0].planning.status,
        PlanningStatus::Completed
    );

    engine.delete_planning(saved.planning.id).await.unwrap();
    assert!(engine.list_plannings(service_id).await.unwrap().is_empty());
    assert_eq!(
        engine.delete_planning(saved.planning.id).await.err(),
        Some(EngineError::KeyNotFound("planning not exists".to_string()))
    );
}

#[tokio::test]
async fn removed_member_disappears_from_board_but_row_stays() {
    let (engine, _db) = engine_with_db().await;
    let service_id = service(&engine, "enfants").await;
    let bruno = engine
        .create_profile(Some("Bruno"), Some("bruno@example.org"), None)
        .await
        .unwrap();
    let member = engine
        .add_member(service_id, bruno.id, None, None)
        .await
        .unwrap();

    engine.remove_member(member.id).await.unwrap();
    let board = engine
        .planning_board(service_id, date("2025-01-01"))
        .await
        .unwrap();
    assert!(board.members.is_empty());
    assert_eq!(
        engine.store().get_member(member.id).await.unwrap().unwrap().status,
        MemberStatus::Inactive
    );

    let again = engine
        .add_member(service_id, bruno.id, None, None)
        .await
        .unwrap();
    assert_ne!(again.id, member.id);
}

#[tokio::test]
async fn contested_cell_keeps_the_edited_planning_on_sqlite() {
    let (engine, _db) = engine_with_db().await;
    let service_id = service(&engine, "accueil").await;
    let alice = engine.create_profile(Some("Alice"), None, None).await.unwrap();
    let bruno = engine.create_profile(Some("Bruno"), None, None).await.unwrap();
    let alice_member = engine
        .add_member(service_id, alice.id, None, None)
        .await
        .unwrap();
    let bruno_member = engine
        .add_member(service_id, bruno.id, None, None)
        .await
        .unwrap();

    let on_cell = |member_id, task: &str| QuickEditRequest {
        target: QuickEditTarget::Cell {
            date: date("2025-06-24"),
            member_id,
        },
        task: task.to_string(),
        status: PlanningStatus::Planned,
        notes: None,
    };

    let first = engine
        .save_planning(service_id, on_cell(alice_member.id, "A"), None, date("2025-06-24"))
        .await
        .unwrap();
    let rival = engine
        .save_planning(service_id, on_cell(bruno_member.id, "B"), None, date("2025-06-24"))
        .await
        .unwrap();
    engine
        .store()
        .insert_assignment(NewAssignment {
            planning_id: rival.planning.id,
            member_id: alice.id,
            individual_status: PlanningStatus::Planned,
        })
        .await
        .unwrap();

    let before = engine
        .planning_board(service_id, date("2025-06-24"))
        .await
        .unwrap();
    let shown = before.cell_for(alice_member.id, date("2025-06-24")).unwrap();
    assert_eq!(shown.planning.id, first.planning.id);

    let saved = engine
        .save_planning(service_id, on_cell(alice_member.id, "A2"), None, date("2025-06-24"))
        .await
        .unwrap();
    assert_eq!(saved.planning.id, first.planning.id);

    let shown = saved
        .board
        .cell_for(alice_member.id, date("2025-06-24"))
        .unwrap();
    assert_eq!(shown.planning.id, first.planning.id);
    assert_eq!(shown.planning.task, "A2");
    assert_eq!(
        saved
            .board
            .cell_for(bruno_member.id, date("2025-06-24"))
            .unwrap()
            .planning
            .id,
        rival.planning.id
    );
}
