//! SurrealDB repository implementations.

mod license;
mod team;
mod vendor;

pub use license::SurrealLicenseRepository;
pub use team::SurrealTeamRepository;
pub use vendor::SurrealVendorRepository;
