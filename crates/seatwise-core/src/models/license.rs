//! License domain model.
//!
//! `license_type`, `billing_frequency` and `status` are closed sum types
//! over the documented value sets; their wire representation is the
//! lowercase string form. Unrecognized values are rejected at the
//! validation boundary.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LicenseType {
    Subscription,
    Perpetual,
    Enterprise,
}

impl LicenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseType::Subscription => "subscription",
            LicenseType::Perpetual => "perpetual",
            LicenseType::Enterprise => "enterprise",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "subscription" => Some(LicenseType::Subscription),
            "perpetual" => Some(LicenseType::Perpetual),
            "enterprise" => Some(LicenseType::Enterprise),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BillingFrequency {
    Monthly,
    Quarterly,
    Annually,
    OneTime,
}

impl BillingFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingFrequency::Monthly => "monthly",
            BillingFrequency::Quarterly => "quarterly",
            BillingFrequency::Annually => "annually",
            BillingFrequency::OneTime => "one-time",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(BillingFrequency::Monthly),
            "quarterly" => Some(BillingFrequency::Quarterly),
            "annually" => Some(BillingFrequency::Annually),
            "one-time" => Some(BillingFrequency::OneTime),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    Active,
    Expiring,
    Expired,
    Cancelled,
}

impl LicenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseStatus::Active => "active",
            LicenseStatus::Expiring => "expiring",
            LicenseStatus::Expired => "expired",
            LicenseStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(LicenseStatus::Active),
            "expiring" => Some(LicenseStatus::Expiring),
            "expired" => Some(LicenseStatus::Expired),
            "cancelled" => Some(LicenseStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub id: Uuid,
    pub software_name: String,
    pub vendor_id: Uuid,
    pub team_id: Uuid,
    pub license_type: LicenseType,
    pub total_seats: u32,
    pub used_seats: u32,
    /// Fixed-point decimal with 2 fractional digits, never binary float.
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

/// Insert shape. `status` and `used_seats` are server-assigned defaults
/// (active, 0) and deliberately absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLicense {
    pub software_name: String,
    pub vendor_id: Uuid,
    pub team_id: Uuid,
    pub license_type: LicenseType,
    pub total_seats: u32,
    pub cost: Decimal,
    pub billing_frequency: BillingFrequency,
    pub purchase_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub contact_person: String,
    pub description: Option<String>,
}

/// Partial update shape: only supplied fields are applied, and the
/// `updated_at` timestamp is always refreshed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateLicense {
    pub software_name: Option<String>,
    pub vendor_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub license_type: Option<LicenseType>,
    pub total_seats: Option<u32>,
    pub used_seats: Option<u32>,
    pub cost: Option<Decimal>,
    pub billing_frequency: Option<BillingFrequency>,
    pub purchase_date: Option<NaiveDate>,
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub expiry_date: Option<Option<NaiveDate>>,
    pub contact_person: Option<String>,
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub description: Option<Option<String>>,
    pub status: Option<LicenseStatus>,
}

/// Optional predicates for license search; present fields are combined
/// with logical AND, an empty filter degenerates to "all licenses".
#[derive(Debug, Clone, Default)]
pub struct LicenseFilter {
    /// Case-preserving substring match against `software_name`.
    pub search: Option<String>,
    pub team_id: Option<Uuid>,
    pub vendor_id: Option<Uuid>,
    pub status: Option<LicenseStatus>,
}

impl LicenseFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.team_id.is_none()
            && self.vendor_id.is_none()
            && self.status.is_none()
    }
}
