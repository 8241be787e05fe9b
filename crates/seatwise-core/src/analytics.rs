//! Derived, read-only computations over the full license set.
//!
//! Everything here is pure: the HTTP layer feeds these functions the
//! repository's bulk read. `today` is always passed in (the server uses
//! its local calendar date), which keeps the window logic testable.

use chrono::{Days, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::license::{BillingFrequency, License, LicenseStatus};

/// Default expiry window when the caller does not specify one.
pub const DEFAULT_EXPIRY_WINDOW_DAYS: u64 = 30;

/// Licenses sharing a software name after case-folding.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    /// The lowercased grouping key, not any member's original casing.
    pub software_name: String,
    pub licenses: Vec<License>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LicenseMetrics {
    pub total_licenses: u64,
    /// Count of active licenses expiring within the default 30-day window.
    pub expiring_soon: u64,
    /// Sum of monthly-equivalent costs, rounded to the nearest integer
    /// once at the end.
    pub monthly_cost: i64,
    /// Used seats over total seats as a whole percentage; 0 when no seats
    /// exist at all.
    pub utilization_rate: u32,
}

fn expires_within(license: &License, today: NaiveDate, days: u64) -> bool {
    if license.status != LicenseStatus::Active {
        return false;
    }
    let until = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
    match license.expiry_date {
        Some(date) => date >= today && date <= until,
        None => false,
    }
}

/// Active licenses whose expiry date falls within the inclusive window
/// `[today, today + days]`.
pub fn expiring_licenses(licenses: &[License], today: NaiveDate, days: u64) -> Vec<License> {
    licenses
        .iter()
        .filter(|l| expires_within(l, today, days))
        .cloned()
        .collect()
}

/// Group licenses by lowercased software name, preserving first-seen key
/// order, and keep only groups with two or more members.
pub fn duplicate_groups(licenses: &[License]) -> Vec<DuplicateGroup> {
    let mut keys: Vec<String> = Vec::new();
    let mut groups: std::collections::HashMap<String, Vec<License>> =
        std::collections::HashMap::new();

    for license in licenses {
        let key = license.software_name.to_lowercase();
        if !groups.contains_key(&key) {
            keys.push(key.clone());
        }
        groups.entry(key).or_default().push(license.clone());
    }

    keys.into_iter()
        .filter_map(|key| {
            let members = groups.remove(&key)?;
            (members.len() >= 2).then(|| DuplicateGroup {
                software_name: key,
                licenses: members,
            })
        })
        .collect()
}

/// Monthly-equivalent cost of a single license by billing frequency.
/// One-time (and any future frequency without a recurrence) contributes
/// nothing.
fn monthly_equivalent(license: &License) -> Decimal {
    match license.billing_frequency {
        BillingFrequency::Monthly => license.cost,
        BillingFrequency::Quarterly => license.cost / Decimal::from(3),
        BillingFrequency::Annually => license.cost / Decimal::from(12),
        BillingFrequency::OneTime => Decimal::ZERO,
    }
}

/// The four derived numbers computed from the full license set.
pub fn license_metrics(licenses: &[License], today: NaiveDate) -> LicenseMetrics {
    let expiring_soon = licenses
        .iter()
        .filter(|l| expires_within(l, today, DEFAULT_EXPIRY_WINDOW_DAYS))
        .count() as u64;

    let monthly_sum: Decimal = licenses.iter().map(monthly_equivalent).sum();
    let monthly_cost = monthly_sum
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX);

    let used: u64 = licenses.iter().map(|l| u64::from(l.used_seats)).sum();
    let total: u64 = licenses.iter().map(|l| u64::from(l.total_seats)).sum();
    let utilization_rate = if total == 0 {
        0
    } else {
        (Decimal::from(used * 100) / Decimal::from(total))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    };

    LicenseMetrics {
        total_licenses: licenses.len() as u64,
        expiring_soon,
        monthly_cost,
        utilization_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::license::LicenseType;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn license(name: &str) -> License {
        License {
            id: Uuid::new_v4(),
            software_name: name.into(),
            vendor_id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            license_type: LicenseType::Subscription,
            total_seats: 10,
            used_seats: 0,
            cost: dec!(100.00),
            billing_frequency: BillingFrequency::Monthly,
            purchase_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            expiry_date: None,
            contact_person: "Ops".into(),
            description: None,
            status: LicenseStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn duplicates_fold_case_and_skip_singletons() {
        let licenses = vec![license("Zoom"), license("zoom"), license("Slack")];

        let groups = duplicate_groups(&licenses);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].software_name, "zoom");
        assert_eq!(groups[0].licenses.len(), 2);
    }

    #[test]
    fn duplicates_preserve_first_seen_key_order() {
        let licenses = vec![
            license("Figma"),
            license("Zoom"),
            license("FIGMA"),
            license("zoom"),
        ];

        let groups = duplicate_groups(&licenses);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].software_name, "figma");
        assert_eq!(groups[1].software_name, "zoom");
    }

    #[test]
    fn expiring_window_is_inclusive_and_active_only() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let mut inside = license("A");
        inside.expiry_date = NaiveDate::from_ymd_opt(2024, 1, 15);

        let mut outside = license("B");
        outside.expiry_date = NaiveDate::from_ymd_opt(2024, 3, 1);

        let mut cancelled = license("C");
        cancelled.expiry_date = NaiveDate::from_ymd_opt(2024, 1, 10);
        cancelled.status = LicenseStatus::Cancelled;

        let mut boundary = license("D");
        boundary.expiry_date = NaiveDate::from_ymd_opt(2024, 1, 31);

        let result = expiring_licenses(&[inside, outside, cancelled, boundary], today, 30);

        let names: Vec<&str> = result.iter().map(|l| l.software_name.as_str()).collect();
        assert_eq!(names, vec!["A", "D"]);
    }

    #[test]
    fn expiring_today_counts() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut l = license("A");
        l.expiry_date = Some(today);

        assert_eq!(expiring_licenses(&[l], today, 30).len(), 1);
    }

    #[test]
    fn metrics_normalize_cost_and_utilization() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let mut monthly = license("A");
        monthly.cost = dec!(120.00);
        monthly.total_seats = 10;
        monthly.used_seats = 10;

        let mut quarterly = license("B");
        quarterly.cost = dec!(300.00);
        quarterly.billing_frequency = BillingFrequency::Quarterly;
        quarterly.total_seats = 10;
        quarterly.used_seats = 5;

        let metrics = license_metrics(&[monthly, quarterly], today);

        assert_eq!(metrics.total_licenses, 2);
        assert_eq!(metrics.expiring_soon, 0);
        // round(120 + 100) = 220
        assert_eq!(metrics.monthly_cost, 220);
        // round((10 + 5) / (10 + 10) * 100) = 75
        assert_eq!(metrics.utilization_rate, 75);
    }

    #[test]
    fn metrics_round_sum_at_the_end_not_per_license() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        // 100 / 12 = 8.33..; three of them sum to 25.0 exactly, whereas
        // per-license rounding would give 8 * 3 = 24.
        let mut annual = license("A");
        annual.cost = dec!(100.00);
        annual.billing_frequency = BillingFrequency::Annually;

        let licenses = vec![annual.clone(), annual.clone(), annual];
        let metrics = license_metrics(&licenses, today);

        assert_eq!(metrics.monthly_cost, 25);
    }

    #[test]
    fn one_time_cost_contributes_nothing() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut one_time = license("A");
        one_time.cost = dec!(9999.99);
        one_time.billing_frequency = BillingFrequency::OneTime;

        let metrics = license_metrics(&[one_time], today);

        assert_eq!(metrics.monthly_cost, 0);
    }

    #[test]
    fn utilization_is_zero_when_no_seats_exist() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut l = license("A");
        l.total_seats = 0;
        l.used_seats = 0;

        let metrics = license_metrics(&[l], today);

        assert_eq!(metrics.utilization_rate, 0);
    }

    #[test]
    fn metrics_on_empty_set() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let metrics = license_metrics(&[], today);

        assert_eq!(
            metrics,
            LicenseMetrics {
                total_licenses: 0,
                expiring_soon: 0,
                monthly_cost: 0,
                utilization_rate: 0,
            }
        );
    }
}
