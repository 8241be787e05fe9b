//! Integration tests for the Team repository using in-memory SurrealDB.

use seatwise_core::error::SeatwiseError;
use seatwise_core::models::team::CreateTeam;
use seatwise_core::repository::TeamRepository;
use seatwise_db::repository::SurrealTeamRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    seatwise_db::run_migrations(&db).await.unwrap();
    db
}

#[tokio::test]
async fn create_and_get_team() {
    let db = setup().await;
    let repo = SurrealTeamRepository::new(db);

    let team = repo
        .create(CreateTeam {
            name: "Platform".into(),
            description: Some("Infrastructure group".into()),
        })
        .await
        .unwrap();

    assert_eq!(team.name, "Platform");
    assert_eq!(team.description.as_deref(), Some("Infrastructure group"));

    let fetched = repo.get_by_id(team.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, team.id);
    assert_eq!(fetched.name, "Platform");
}

#[tokio::test]
async fn get_missing_team_returns_none() {
    let db = setup().await;
    let repo = SurrealTeamRepository::new(db);

    let fetched = repo.get_by_id(uuid::Uuid::new_v4()).await.unwrap();
    assert!(fetched.is_none());
}

#[tokio::test]
async fn duplicate_team_name_is_rejected() {
    let db = setup().await;
    let repo = SurrealTeamRepository::new(db);

    repo.create(CreateTeam {
        name: "Design".into(),
        description: None,
    })
    .await
    .unwrap();

    let result = repo
        .create(CreateTeam {
            name: "Design".into(),
            description: Some("second".into()),
        })
        .await;

    match result {
        Err(SeatwiseError::AlreadyExists { entity, name }) => {
            assert_eq!(entity, "team");
            assert_eq!(name, "Design");
        }
        other => panic!("expected AlreadyExists, got {other:?}"),
    }
}

#[tokio::test]
async fn list_teams_ordered_by_name() {
    let db = setup().await;
    let repo = SurrealTeamRepository::new(db);

    for name in ["Security", "Analytics", "Mobile"] {
        repo.create(CreateTeam {
            name: name.into(),
            description: None,
        })
        .await
        .unwrap();
    }

    let teams = repo.list().await.unwrap();
    let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Analytics", "Mobile", "Security"]);
}
