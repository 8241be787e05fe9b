//! SurrealDB implementation of [`TeamRepository`].

use chrono::{DateTime, Utc};
use seatwise_core::error::SeatwiseResult;
use seatwise_core::models::team::{CreateTeam, Team};
use seatwise_core::repository::TeamRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct TeamRow {
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl TeamRow {
    fn into_team(self, id: Uuid) -> Team {
        Team {
            id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TeamRowWithId {
    record_id: String,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl TeamRowWithId {
    fn try_into_team(self) -> Result<Team, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        Ok(Team {
            id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Team repository.
#[derive(Clone)]
pub struct SurrealTeamRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTeamRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TeamRepository for SurrealTeamRepository<C> {
    async fn create(&self, input: CreateTeam) -> SeatwiseResult<Team> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let name = input.name.clone();

        let result = self
            .db
            .query(
                "CREATE type::record('team', $id) SET \
                 name = $name, description = $description",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("team", &name, e))?;

        let rows: Vec<TeamRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "team".into(),
            id: id_str,
        })?;

        Ok(row.into_team(id))
    }

    async fn get_by_id(&self, id: Uuid) -> SeatwiseResult<Option<Team>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('team', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TeamRow> = result.take(0).map_err(DbError::from)?;

        Ok(rows.into_iter().next().map(|row| row.into_team(id)))
    }

    async fn list(&self) -> SeatwiseResult<Vec<Team>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM team \
                 ORDER BY name ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TeamRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_team())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
