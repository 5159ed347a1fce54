//! # IAA Remote Data - Layer 3: Schedule Freshness Coordination
//!
//! Mediates between automation schedules and the remote-data service:
//! - Classifies schedules as remote or local from metadata and message source
//! - Answers freshness, update and refresh queries for remote schedules
//! - Derives per-source in-app snapshots from the remote-data payload feed
//!
//! ## Design Principles
//!
//! - **Stateless**: every answer is a function of the schedule and the
//!   service's current state
//! - **Fail open**: undecodable metadata is logged and treated as absent;
//!   no operation returns an error
//! - **Connectivity aware**: best-effort refreshes only wait when online

pub mod access;
pub mod config;
pub mod in_app;
pub mod prelude;

pub use access::{InAppRemoteDataStream, RemoteDataAccess, RemoteScheduleFreshnessCoordinator};
pub use config::{RemoteDataAccessConfig, IN_APP_MESSAGES_PAYLOAD_TYPE};
pub use in_app::{FrequencyConstraint, InAppData, InAppPayload, InAppRemoteData};
