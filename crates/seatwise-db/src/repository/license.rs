//! SurrealDB implementation of [`LicenseRepository`].
//!
//! Calendar dates are stored as ISO-8601 `YYYY-MM-DD` strings; enum
//! fields as their lowercase wire strings (ASSERT-constrained by the
//! schema). The store has no cross-table constraints, so the referenced
//! team and vendor rows are checked before insert.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use seatwise_core::error::SeatwiseResult;
use seatwise_core::models::license::{
    BillingFrequency, CreateLicense, License, LicenseFilter, LicenseStatus, LicenseType,
    UpdateLicense,
};
use seatwise_core::repository::LicenseRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct LicenseRow {
    software_name: String,
    vendor_id: String,
    team_id: String,
    license_type: String,
    total_seats: u32,
    used_seats: u32,
    cost: Decimal,
    billing_frequency: String,
    purchase_date: String,
    expiry_date: Option<String>,
    contact_person: String,
    description: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LicenseRow {
    fn into_license(self, id: Uuid) -> Result<License, DbError> {
        Ok(License {
            id,
            vendor_id: parse_uuid("vendor_id", &self.vendor_id)?,
            team_id: parse_uuid("team_id", &self.team_id)?,
            license_type: LicenseType::parse(&self.license_type)
                .ok_or_else(|| unknown_value("license_type", &self.license_type))?,
            billing_frequency: BillingFrequency::parse(&self.billing_frequency)
                .ok_or_else(|| unknown_value("billing_frequency", &self.billing_frequency))?,
            status: LicenseStatus::parse(&self.status)
                .ok_or_else(|| unknown_value("status", &self.status))?,
            purchase_date: parse_date("purchase_date", &self.purchase_date)?,
            expiry_date: self
                .expiry_date
                .as_deref()
                .map(|d| parse_date("expiry_date", d))
                .transpose()?,
            software_name: self.software_name,
            total_seats: self.total_seats,
            used_seats: self.used_seats,
            cost: self.cost,
            contact_person: self.contact_person,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct LicenseRowWithId {
    record_id: String,
    software_name: String,
    vendor_id: String,
    team_id: String,
    license_type: String,
    total_seats: u32,
    used_seats: u32,
    cost: Decimal,
    billing_frequency: String,
    purchase_date: String,
    expiry_date: Option<String>,
    contact_person: String,
    description: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LicenseRowWithId {
    fn try_into_license(self) -> Result<License, DbError> {
        let id = parse_uuid("id", &self.record_id)?;
        let row = LicenseRow {
            software_name: self.software_name,
            vendor_id: self.vendor_id,
            team_id: self.team_id,
            license_type: self.license_type,
            total_seats: self.total_seats,
            used_seats: self.used_seats,
            cost: self.cost,
            billing_frequency: self.billing_frequency,
            purchase_date: self.purchase_date,
            expiry_date: self.expiry_date,
            contact_person: self.contact_person,
            description: self.description,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        row.into_license(id)
    }
}

/// Row struct for existence probes.
#[derive(Debug, SurrealValue)]
struct IdRow {
    #[allow(dead_code)]
    record_id: String,
}

fn parse_uuid(field: &str, value: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Query(format!("invalid UUID in {field}: {e}")))
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::from_str(value).map_err(|e| DbError::Query(format!("invalid date in {field}: {e}")))
}

fn unknown_value(field: &str, value: &str) -> DbError {
    DbError::Query(format!("unknown {field} value: {value}"))
}

/// SurrealDB implementation of the License repository.
#[derive(Clone)]
pub struct SurrealLicenseRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealLicenseRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Referential check: fail with `NotFound` when the referenced row
    /// is absent.
    async fn ensure_exists(&self, table: &'static str, id: Uuid) -> Result<(), DbError> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id \
                 FROM type::record($table, $id)",
            )
            .bind(("table", table))
            .bind(("id", id_str.clone()))
            .await?;

        let rows: Vec<IdRow> = result.take(0)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: table.into(),
                id: id_str,
            });
        }
        Ok(())
    }
}

impl<C: Connection> LicenseRepository for SurrealLicenseRepository<C> {
    async fn create(&self, input: CreateLicense) -> SeatwiseResult<License> {
        self.ensure_exists("team", input.team_id).await?;
        self.ensure_exists("vendor", input.vendor_id).await?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let software_name = input.software_name.clone();

        let result = self
            .db
            .query(
                "CREATE type::record('license', $id) SET \
                 software_name = $software_name, \
                 vendor_id = $vendor_id, team_id = $team_id, \
                 license_type = $license_type, \
                 total_seats = $total_seats, \
                 used_seats = 0, \
                 cost = $cost, \
                 billing_frequency = $billing_frequency, \
                 purchase_date = $purchase_date, \
                 expiry_date = $expiry_date, \
                 contact_person = $contact_person, \
                 description = $description, \
                 status = 'active'",
            )
            .bind(("id", id_str.clone()))
            .bind(("software_name", input.software_name))
            .bind(("vendor_id", input.vendor_id.to_string()))
            .bind(("team_id", input.team_id.to_string()))
            .bind(("license_type", input.license_type.as_str().to_string()))
            .bind(("total_seats", input.total_seats))
            .bind(("cost", input.cost))
            .bind((
                "billing_frequency",
                input.billing_frequency.as_str().to_string(),
            ))
            .bind(("purchase_date", input.purchase_date.to_string()))
            .bind(("expiry_date", input.expiry_date.map(|d| d.to_string())))
            .bind(("contact_person", input.contact_person))
            .bind(("description", input.description))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("license", &software_name, e))?;

        let rows: Vec<LicenseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "license".into(),
            id: id_str,
        })?;

        Ok(row.into_license(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> SeatwiseResult<Option<License>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('license', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LicenseRow> = result.take(0).map_err(DbError::from)?;

        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_license(id)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: Uuid, input: UpdateLicense) -> SeatwiseResult<License> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.software_name.is_some() {
            sets.push("software_name = $software_name");
        }
        if input.vendor_id.is_some() {
            sets.push("vendor_id = $vendor_id");
        }
        if input.team_id.is_some() {
            sets.push("team_id = $team_id");
        }
        if input.license_type.is_some() {
            sets.push("license_type = $license_type");
        }
        if input.total_seats.is_some() {
            sets.push("total_seats = $total_seats");
        }
        if input.used_seats.is_some() {
            sets.push("used_seats = $used_seats");
        }
        if input.cost.is_some() {
            sets.push("cost = $cost");
        }
        if input.billing_frequency.is_some() {
            sets.push("billing_frequency = $billing_frequency");
        }
        if input.purchase_date.is_some() {
            sets.push("purchase_date = $purchase_date");
        }
        match &input.expiry_date {
            Some(Some(_)) => sets.push("expiry_date = $expiry_date"),
            Some(None) => sets.push("expiry_date = NONE"),
            None => {}
        }
        if input.contact_person.is_some() {
            sets.push("contact_person = $contact_person");
        }
        match &input.description {
            Some(Some(_)) => sets.push("description = $description"),
            Some(None) => sets.push("description = NONE"),
            None => {}
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        sets.push("updated_at = time::now()");

        if let Some(team_id) = input.team_id {
            self.ensure_exists("team", team_id).await?;
        }
        if let Some(vendor_id) = input.vendor_id {
            self.ensure_exists("vendor", vendor_id).await?;
        }

        let query = format!(
            "UPDATE type::record('license', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(software_name) = input.software_name {
            builder = builder.bind(("software_name", software_name));
        }
        if let Some(vendor_id) = input.vendor_id {
            builder = builder.bind(("vendor_id", vendor_id.to_string()));
        }
        if let Some(team_id) = input.team_id {
            builder = builder.bind(("team_id", team_id.to_string()));
        }
        if let Some(license_type) = input.license_type {
            builder = builder.bind(("license_type", license_type.as_str().to_string()));
        }
        if let Some(total_seats) = input.total_seats {
            builder = builder.bind(("total_seats", total_seats));
        }
        if let Some(used_seats) = input.used_seats {
            builder = builder.bind(("used_seats", used_seats));
        }
        if let Some(cost) = input.cost {
            builder = builder.bind(("cost", cost));
        }
        if let Some(billing_frequency) = input.billing_frequency {
            builder = builder.bind(("billing_frequency", billing_frequency.as_str().to_string()));
        }
        if let Some(purchase_date) = input.purchase_date {
            builder = builder.bind(("purchase_date", purchase_date.to_string()));
        }
        if let Some(Some(expiry_date)) = input.expiry_date {
            builder = builder.bind(("expiry_date", expiry_date.to_string()));
        }
        if let Some(contact_person) = input.contact_person {
            builder = builder.bind(("contact_person", contact_person));
        }
        if let Some(Some(description)) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(status) = input.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<LicenseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "license".into(),
            id: id_str,
        })?;

        Ok(row.into_license(id)?)
    }

    async fn delete(&self, id: Uuid) -> SeatwiseResult<()> {
        // Idempotent: deleting a nonexistent id is not an error here.
        self.db
            .query("DELETE type::record('license', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self) -> SeatwiseResult<Vec<License>> {
        self.search(LicenseFilter::default()).await
    }

    async fn search(&self, filter: LicenseFilter) -> SeatwiseResult<Vec<License>> {
        let mut conditions = Vec::new();
        if filter.search.is_some() {
            // Case-preserving substring match, no normalization.
            conditions.push("string::contains(software_name, $search)");
        }
        if filter.team_id.is_some() {
            conditions.push("team_id = $team_id");
        }
        if filter.vendor_id.is_some() {
            conditions.push("vendor_id = $vendor_id");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM license{where_clause} \
             ORDER BY created_at DESC",
        );

        let mut builder = self.db.query(&query);

        if let Some(search) = filter.search {
            builder = builder.bind(("search", search));
        }
        if let Some(team_id) = filter.team_id {
            builder = builder.bind(("team_id", team_id.to_string()));
        }
        if let Some(vendor_id) = filter.vendor_id {
            builder = builder.bind(("vendor_id", vendor_id.to_string()));
        }
        if let Some(status) = filter.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }

        let mut result = builder.await.map_err(DbError::from)?;

        let rows: Vec<LicenseRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_license())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }

    async fn list_by_team(&self, team_id: Uuid) -> SeatwiseResult<Vec<License>> {
        self.search(LicenseFilter {
            team_id: Some(team_id),
            ..Default::default()
        })
        .await
    }
}
