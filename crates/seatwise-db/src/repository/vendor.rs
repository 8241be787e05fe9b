//! SurrealDB implementation of [`VendorRepository`].
//!
//! `get_or_create` is the idempotent lookup-or-insert keyed by the unique
//! vendor name: a race that loses the insert hits the unique index and is
//! retried as a lookup, so two concurrent callers always converge on one
//! vendor row.

use chrono::{DateTime, Utc};
use seatwise_core::error::{SeatwiseError, SeatwiseResult};
use seatwise_core::models::vendor::{CreateVendor, Vendor};
use seatwise_core::repository::VendorRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct VendorRow {
    name: String,
    website: Option<String>,
    contact_email: Option<String>,
    created_at: DateTime<Utc>,
}

impl VendorRow {
    fn into_vendor(self, id: Uuid) -> Vendor {
        Vendor {
            id,
            name: self.name,
            website: self.website,
            contact_email: self.contact_email,
            created_at: self.created_at,
        }
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct VendorRowWithId {
    record_id: String,
    name: String,
    website: Option<String>,
    contact_email: Option<String>,
    created_at: DateTime<Utc>,
}

impl VendorRowWithId {
    fn try_into_vendor(self) -> Result<Vendor, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        Ok(Vendor {
            id,
            name: self.name,
            website: self.website,
            contact_email: self.contact_email,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Vendor repository.
#[derive(Clone)]
pub struct SurrealVendorRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealVendorRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Exact-name lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Vendor>, DbError> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM vendor \
                 WHERE name = $name",
            )
            .bind(("name", name.to_string()))
            .await?;

        let rows: Vec<VendorRowWithId> = result.take(0)?;

        rows.into_iter().next().map(|row| row.try_into_vendor()).transpose()
    }
}

impl<C: Connection> VendorRepository for SurrealVendorRepository<C> {
    async fn create(&self, input: CreateVendor) -> SeatwiseResult<Vendor> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let name = input.name.clone();

        let result = self
            .db
            .query(
                "CREATE type::record('vendor', $id) SET \
                 name = $name, website = $website, \
                 contact_email = $contact_email",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("website", input.website))
            .bind(("contact_email", input.contact_email))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("vendor", &name, e))?;

        let rows: Vec<VendorRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "vendor".into(),
            id: id_str,
        })?;

        Ok(row.into_vendor(id))
    }

    async fn get_by_id(&self, id: Uuid) -> SeatwiseResult<Option<Vendor>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('vendor', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<VendorRow> = result.take(0).map_err(DbError::from)?;

        Ok(rows.into_iter().next().map(|row| row.into_vendor(id)))
    }

    async fn get_or_create(&self, name: &str) -> SeatwiseResult<Vendor> {
        if let Some(vendor) = self.find_by_name(name).await? {
            return Ok(vendor);
        }

        let created = self
            .create(CreateVendor {
                name: name.to_string(),
                website: None,
                contact_email: None,
            })
            .await;

        match created {
            Ok(vendor) => Ok(vendor),
            // Lost the race: another caller inserted the same name between
            // our lookup and insert. The row exists now, so read it.
            Err(SeatwiseError::AlreadyExists { .. }) => {
                self.find_by_name(name).await?.ok_or_else(|| {
                    SeatwiseError::Database(format!(
                        "vendor '{name}' hit unique index but cannot be read back"
                    ))
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn list(&self) -> SeatwiseResult<Vec<Vendor>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM vendor \
                 ORDER BY name ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<VendorRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_vendor())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
