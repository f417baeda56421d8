//! iTrack vehicle telemetry sync.
//!
//! [`TrackingClient`] issues authenticated reads and writes against the
//! iTrack API; [`background`] holds the job that copies snapshots into a
//! [`store::VehicleStore`] on a schedule.

pub mod alerts;
pub mod background;
mod client;
pub mod config;
mod error;
pub mod geofence;
pub mod history;
pub mod logging;
pub mod snapshot;
pub mod status;
pub mod store;
mod sync;

pub use client::{TrackingClient, TrackingClientBuilder};
pub use error::TrackingClientError;
pub use itrack_auth::Credential;
pub use status::TrackingStatus;
pub use sync::{SyncOutcome, SyncStatus};

// Always expose testing module (integration tests need it)
pub mod testing;
