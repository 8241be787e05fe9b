//! Hand-written input validation, one explicit rule set per entity.
//!
//! Nothing here is derived from the persisted shape: each draft struct
//! mirrors the wire payload (camelCase, every field optional, numeric
//! fields as human-entered strings), and each `validate_*` function
//! enumerates the required/optional fields and their constraints. Parsing
//! the string `cost` and `totalSeats` into numeric types is an explicit
//! step here, never an implicit coercion.
//!
//! Failures collect every field-level error before returning, so a 400
//! response can carry the complete list.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{FieldError, SeatwiseError, SeatwiseResult};
use crate::models::license::{
    BillingFrequency, CreateLicense, LicenseStatus, LicenseType, UpdateLicense,
};
use crate::models::team::CreateTeam;
use crate::models::vendor::CreateVendor;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamDraft {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorDraft {
    pub name: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
}

/// Raw license creation payload. The client supplies `vendorName`, not a
/// vendor id; the id is resolved through the vendor get-or-create.
/// `status` and `usedSeats` are server-assigned and never accepted here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicenseDraft {
    pub software_name: Option<String>,
    pub vendor_name: Option<String>,
    pub team_id: Option<String>,
    pub license_type: Option<String>,
    pub total_seats: Option<String>,
    pub cost: Option<String>,
    pub billing_frequency: Option<String>,
    pub purchase_date: Option<String>,
    pub expiry_date: Option<String>,
    pub contact_person: Option<String>,
    pub description: Option<String>,
}

/// Raw partial-update payload: any subset of fields may be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicenseUpdateDraft {
    pub software_name: Option<String>,
    pub vendor_id: Option<String>,
    pub team_id: Option<String>,
    pub license_type: Option<String>,
    pub total_seats: Option<String>,
    pub used_seats: Option<String>,
    pub cost: Option<String>,
    pub billing_frequency: Option<String>,
    pub purchase_date: Option<String>,
    pub expiry_date: Option<String>,
    pub contact_person: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// A fully validated license creation, still keyed by vendor name.
/// Becomes a [`CreateLicense`] once the vendor id is resolved.
#[derive(Debug, Clone)]
pub struct ValidatedLicense {
    pub software_name: String,
    pub vendor_name: String,
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

impl ValidatedLicense {
    pub fn into_create(self, vendor_id: Uuid) -> CreateLicense {
        CreateLicense {
            software_name: self.software_name,
            vendor_id,
            team_id: self.team_id,
            license_type: self.license_type,
            total_seats: self.total_seats,
            cost: self.cost,
            billing_frequency: self.billing_frequency,
            purchase_date: self.purchase_date,
            expiry_date: self.expiry_date,
            contact_person: self.contact_person,
            description: self.description,
        }
    }
}

// -----------------------------------------------------------------------
// Field helpers
// -----------------------------------------------------------------------

fn required(field: &str, value: Option<String>, errors: &mut Vec<FieldError>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
    }
}

fn parse_uuid(field: &str, value: &str, errors: &mut Vec<FieldError>) -> Option<Uuid> {
    match Uuid::parse_str(value) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(FieldError::new(field, "must be a valid UUID"));
            None
        }
    }
}

fn parse_date(field: &str, value: &str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    match NaiveDate::from_str(value) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError::new(field, "must be a date (YYYY-MM-DD)"));
            None
        }
    }
}

fn parse_seats(field: &str, value: &str, errors: &mut Vec<FieldError>) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.push(FieldError::new(field, "must be a non-negative integer"));
            None
        }
    }
}

/// Parse a human-entered cost string into a non-negative fixed-point
/// decimal with exactly 2 fractional digits.
fn parse_cost(field: &str, value: &str, errors: &mut Vec<FieldError>) -> Option<Decimal> {
    let parsed = match Decimal::from_str(value.trim()) {
        Ok(d) => d,
        Err(_) => {
            errors.push(FieldError::new(field, "must be a decimal number"));
            return None;
        }
    };
    if parsed.is_sign_negative() {
        errors.push(FieldError::new(field, "must not be negative"));
        return None;
    }
    let mut cost = parsed.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cost.rescale(2);
    Some(cost)
}

fn parse_license_type(
    field: &str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<LicenseType> {
    LicenseType::parse(value).or_else(|| {
        errors.push(FieldError::new(
            field,
            "must be one of: subscription, perpetual, enterprise",
        ));
        None
    })
}

fn parse_billing_frequency(
    field: &str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<BillingFrequency> {
    BillingFrequency::parse(value).or_else(|| {
        errors.push(FieldError::new(
            field,
            "must be one of: monthly, quarterly, annually, one-time",
        ));
        None
    })
}

fn parse_status(field: &str, value: &str, errors: &mut Vec<FieldError>) -> Option<LicenseStatus> {
    LicenseStatus::parse(value).or_else(|| {
        errors.push(FieldError::new(
            field,
            "must be one of: active, expiring, expired, cancelled",
        ));
        None
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// -----------------------------------------------------------------------
// Entity validators
// -----------------------------------------------------------------------

pub fn validate_create_team(draft: TeamDraft) -> SeatwiseResult<CreateTeam> {
    let mut errors = Vec::new();
    let name = required("name", draft.name, &mut errors);

    match name {
        Some(name) if errors.is_empty() => Ok(CreateTeam {
            name,
            description: non_blank(draft.description),
        }),
        _ => Err(SeatwiseError::validation(errors)),
    }
}

pub fn validate_create_vendor(draft: VendorDraft) -> SeatwiseResult<CreateVendor> {
    let mut errors = Vec::new();
    let name = required("name", draft.name, &mut errors);

    match name {
        Some(name) if errors.is_empty() => Ok(CreateVendor {
            name,
            website: non_blank(draft.website),
            contact_email: non_blank(draft.contact_email),
        }),
        _ => Err(SeatwiseError::validation(errors)),
    }
}

pub fn validate_create_license(draft: LicenseDraft) -> SeatwiseResult<ValidatedLicense> {
    let mut errors = Vec::new();

    let software_name = required("softwareName", draft.software_name, &mut errors);
    let vendor_name = required("vendorName", draft.vendor_name, &mut errors);
    let contact_person = required("contactPerson", draft.contact_person, &mut errors);

    let team_id = required("teamId", draft.team_id, &mut errors)
        .and_then(|v| parse_uuid("teamId", &v, &mut errors));
    let license_type = required("licenseType", draft.license_type, &mut errors)
        .and_then(|v| parse_license_type("licenseType", &v, &mut errors));
    let total_seats = required("totalSeats", draft.total_seats, &mut errors)
        .and_then(|v| parse_seats("totalSeats", &v, &mut errors));
    let cost = required("cost", draft.cost, &mut errors)
        .and_then(|v| parse_cost("cost", &v, &mut errors));
    let billing_frequency = required("billingFrequency", draft.billing_frequency, &mut errors)
        .and_then(|v| parse_billing_frequency("billingFrequency", &v, &mut errors));
    let purchase_date = required("purchaseDate", draft.purchase_date, &mut errors)
        .and_then(|v| parse_date("purchaseDate", &v, &mut errors));

    // Optional: present but malformed is still an error.
    let expiry_date =
        non_blank(draft.expiry_date).and_then(|v| parse_date("expiryDate", &v, &mut errors));

    // Every None above pushed a field error, so this only fails when
    // errors is non-empty.
    let (
        Some(software_name),
        Some(vendor_name),
        Some(contact_person),
        Some(team_id),
        Some(license_type),
        Some(total_seats),
        Some(cost),
        Some(billing_frequency),
        Some(purchase_date),
    ) = (
        software_name,
        vendor_name,
        contact_person,
        team_id,
        license_type,
        total_seats,
        cost,
        billing_frequency,
        purchase_date,
    )
    else {
        return Err(SeatwiseError::validation(errors));
    };

    if !errors.is_empty() {
        return Err(SeatwiseError::validation(errors));
    }

    Ok(ValidatedLicense {
        software_name,
        vendor_name,
        team_id,
        license_type,
        total_seats,
        cost,
        billing_frequency,
        purchase_date,
        expiry_date,
        contact_person,
        description: non_blank(draft.description),
    })
}

pub fn validate_update_license(draft: LicenseUpdateDraft) -> SeatwiseResult<UpdateLicense> {
    let mut errors = Vec::new();

    let update = UpdateLicense {
        software_name: non_blank(draft.software_name),
        vendor_id: non_blank(draft.vendor_id)
            .and_then(|v| parse_uuid("vendorId", &v, &mut errors)),
        team_id: non_blank(draft.team_id).and_then(|v| parse_uuid("teamId", &v, &mut errors)),
        license_type: non_blank(draft.license_type)
            .and_then(|v| parse_license_type("licenseType", &v, &mut errors)),
        total_seats: non_blank(draft.total_seats)
            .and_then(|v| parse_seats("totalSeats", &v, &mut errors)),
        used_seats: non_blank(draft.used_seats)
            .and_then(|v| parse_seats("usedSeats", &v, &mut errors)),
        cost: non_blank(draft.cost).and_then(|v| parse_cost("cost", &v, &mut errors)),
        billing_frequency: non_blank(draft.billing_frequency)
            .and_then(|v| parse_billing_frequency("billingFrequency", &v, &mut errors)),
        purchase_date: non_blank(draft.purchase_date)
            .and_then(|v| parse_date("purchaseDate", &v, &mut errors)),
        expiry_date: non_blank(draft.expiry_date)
            .and_then(|v| parse_date("expiryDate", &v, &mut errors))
            .map(Some),
        contact_person: non_blank(draft.contact_person),
        description: non_blank(draft.description).map(Some),
        status: non_blank(draft.status).and_then(|v| parse_status("status", &v, &mut errors)),
    };

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(SeatwiseError::validation(errors))
    }
}
