//! # IAA Core - Layer 1: Foundation Types and Effect Traits
//!
//! Shared vocabulary for in-app automation remote data:
//! - Automation schedules and the in-app message payloads they carry
//! - Remote-data sources, info records, payloads and freshness status
//! - Effect traits for the remote-data service and network reachability
//! - Typed errors for metadata and payload decoding
//!
//! ## Design Principles
//!
//! - **Immutable inputs**: schedules are read, never mutated, by consumers
//! - **Effects at the seams**: external services are reached only through traits
//! - **Typed decode failures**: malformed documents yield errors, not panics

pub mod effects;
pub mod errors;
pub mod message;
pub mod remote_data;
pub mod schedule;

pub use effects::{NetworkCheckEffects, PayloadStream, RemoteDataEffects};
pub use errors::{PayloadError, RemoteInfoError};
pub use message::{InAppMessage, InAppMessageSource};
pub use remote_data::{
    FreshnessStatus, RemoteDataInfo, RemoteDataPayload, RemoteDataSource,
    LEGACY_REMOTE_INFO_METADATA_KEY, REMOTE_INFO_METADATA_KEY,
};
pub use schedule::{AutomationSchedule, ScheduleData};
