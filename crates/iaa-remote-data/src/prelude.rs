//! IAA remote-data prelude.
//!
//! Curated re-exports for schedule freshness coordination.

pub use crate::{
    InAppRemoteData, RemoteDataAccess, RemoteDataAccessConfig, RemoteScheduleFreshnessCoordinator,
};
pub use iaa_core::{
    AutomationSchedule, FreshnessStatus, NetworkCheckEffects, RemoteDataEffects, RemoteDataInfo,
    RemoteDataSource,
};
