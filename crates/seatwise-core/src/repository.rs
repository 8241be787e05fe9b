//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async, stateless request/response calls
//! against a shared store. Absence on point lookups is `None`, not an
//! error; the HTTP boundary maps it to a 404 where the route cares.
//! Uniqueness of team/vendor names is delegated to the store's unique
//! indexes, never to application-level locking.

use uuid::Uuid;

use crate::error::SeatwiseResult;
use crate::models::{
    license::{CreateLicense, License, LicenseFilter, UpdateLicense},
    team::{CreateTeam, Team},
    vendor::{CreateVendor, Vendor},
};

pub trait TeamRepository: Send + Sync {
    /// Insert a team. Fails with `AlreadyExists` when the unique name
    /// constraint is violated.
    fn create(&self, input: CreateTeam) -> impl Future<Output = SeatwiseResult<Team>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SeatwiseResult<Option<Team>>> + Send;
    /// All teams ordered by name ascending. No pagination.
    fn list(&self) -> impl Future<Output = SeatwiseResult<Vec<Team>>> + Send;
}

pub trait VendorRepository: Send + Sync {
    fn create(&self, input: CreateVendor) -> impl Future<Output = SeatwiseResult<Vendor>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SeatwiseResult<Option<Vendor>>> + Send;
    /// Look up a vendor by exact name; insert one with only the name
    /// populated on a miss. A lost race against the unique-name index is
    /// retried as a lookup, so concurrent calls with the same name always
    /// converge on a single vendor.
    fn get_or_create(&self, name: &str) -> impl Future<Output = SeatwiseResult<Vendor>> + Send;
    /// All vendors ordered by name ascending.
    fn list(&self) -> impl Future<Output = SeatwiseResult<Vec<Vendor>>> + Send;
}

pub trait LicenseRepository: Send + Sync {
    /// Insert a license with server-assigned defaults (status `active`,
    /// `used_seats` 0). Fails with `NotFound` when the referenced team or
    /// vendor does not exist.
    fn create(&self, input: CreateLicense)
    -> impl Future<Output = SeatwiseResult<License>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SeatwiseResult<Option<License>>> + Send;
    /// Apply only the supplied fields, always bump `updated_at`, return
    /// the full resulting row. Fails with `NotFound` on a missing id.
    fn update(
        &self,
        id: Uuid,
        input: UpdateLicense,
    ) -> impl Future<Output = SeatwiseResult<License>> + Send;
    /// Idempotent at the store level: deleting a nonexistent id is not an
    /// error here.
    fn delete(&self, id: Uuid) -> impl Future<Output = SeatwiseResult<()>> + Send;
    /// All licenses ordered by creation time descending (newest first).
    fn list(&self) -> impl Future<Output = SeatwiseResult<Vec<License>>> + Send;
    /// AND-composition of the filter's present predicates; produces the
    /// same ordered result as `list` when the filter is empty.
    fn search(
        &self,
        filter: LicenseFilter,
    ) -> impl Future<Output = SeatwiseResult<Vec<License>>> + Send;
    fn list_by_team(
        &self,
        team_id: Uuid,
    ) -> impl Future<Output = SeatwiseResult<Vec<License>>> + Send;
}
