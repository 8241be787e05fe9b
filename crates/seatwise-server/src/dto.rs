//! Data Transfer Objects for API requests and responses.
//!
//! Request payloads deserialize directly into the core validation
//! drafts; the response types below pin the camelCase wire shape.
//! `cost` serializes as a decimal string with 2 fractional digits.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use seatwise_core::analytics::{DuplicateGroup, LicenseMetrics};
use seatwise_core::models::license::{BillingFrequency, License, LicenseStatus, LicenseType};
use seatwise_core::models::team::Team;
use seatwise_core::models::vendor::Vendor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============ Team DTOs ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            description: team.description,
            created_at: team.created_at,
        }
    }
}

// ============ Vendor DTOs ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorResponse {
    pub id: Uuid,
    pub name: String,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Vendor> for VendorResponse {
    fn from(vendor: Vendor) -> Self {
        Self {
            id: vendor.id,
            name: vendor.name,
            website: vendor.website,
            contact_email: vendor.contact_email,
            created_at: vendor.created_at,
        }
    }
}

// ============ License DTOs ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseResponse {
    pub id: Uuid,
    pub software_name: String,
    pub vendor_id: Uuid,
    pub team_id: Uuid,
    pub license_type: LicenseType,
    pub total_seats: u32,
    pub used_seats: u32,
    pub cost: Decimal,
    pub billing_frequency: BillingFrequency,
    pub purchase_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub contact_person: String,
    pub description: Option<String>,
    pub status: LicenseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<License> for LicenseResponse {
    fn from(license: License) -> Self {
        Self {
            id: license.id,
            software_name: license.software_name,
            vendor_id: license.vendor_id,
            team_id: license.team_id,
            license_type: license.license_type,
            total_seats: license.total_seats,
            used_seats: license.used_seats,
            cost: license.cost,
            billing_frequency: license.billing_frequency,
            purchase_date: license.purchase_date,
            expiry_date: license.expiry_date,
            contact_person: license.contact_person,
            description: license.description,
            status: license.status,
            created_at: license.created_at,
            updated_at: license.updated_at,
        }
    }
}

/// Query string for GET /api/licenses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicenseQuery {
    pub search: Option<String>,
    pub team_id: Option<Uuid>,
    pub vendor_id: Option<Uuid>,
    pub status: Option<String>,
}

/// Query string for GET /api/analytics/expiring.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExpiringQuery {
    pub days: Option<u64>,
}

// ============ Analytics DTOs ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub total_licenses: u64,
    pub expiring_soon: u64,
    pub monthly_cost: i64,
    pub utilization_rate: u32,
}

impl From<LicenseMetrics> for MetricsResponse {
    fn from(metrics: LicenseMetrics) -> Self {
        Self {
            total_licenses: metrics.total_licenses,
            expiring_soon: metrics.expiring_soon,
            monthly_cost: metrics.monthly_cost,
            utilization_rate: metrics.utilization_rate,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroupResponse {
    pub software_name: String,
    pub licenses: Vec<LicenseResponse>,
}

impl From<DuplicateGroup> for DuplicateGroupResponse {
    fn from(group: DuplicateGroup) -> Self {
        Self {
            software_name: group.software_name,
            licenses: group.licenses.into_iter().map(Into::into).collect(),
        }
    }
}
