//! Remote-data service effect.
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `iaa-effects::InMemoryRemoteData`
//! - **Usage**: freshness checks and refresh waits for remote schedules
//!
//! Implementations must tolerate concurrent callers. Waits are plain futures:
//! dropping one abandons the wait with no further effect.

use crate::remote_data::{FreshnessStatus, RemoteDataInfo, RemoteDataPayload, RemoteDataSource};
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;

/// Stream of payload sets; each item replaces the previous one.
pub type PayloadStream = BoxStream<'static, Vec<RemoteDataPayload>>;

/// Tracks fetch freshness per remote-data source.
#[async_trait]
pub trait RemoteDataEffects: Send + Sync {
    /// Whether `info` still describes the latest data for its source.
    async fn is_current(&self, info: &RemoteDataInfo) -> bool;

    /// Freshness of the data held for `source`.
    async fn status(&self, source: RemoteDataSource) -> FreshnessStatus;

    /// Suspend until `source` has completed a full refresh.
    async fn wait_refresh(&self, source: RemoteDataSource);

    /// Suspend until the next refresh attempt for `source` finishes,
    /// whether or not it succeeds.
    async fn wait_refresh_attempt(&self, source: RemoteDataSource);

    /// Report that data described by `info` turned out to be outdated.
    async fn notify_outdated(&self, info: &RemoteDataInfo);

    /// Subscribe to payload sets restricted to `types`.
    ///
    /// The stream yields the current set first, then every change.
    fn subscribe(&self, types: &[String]) -> PayloadStream;
}

#[async_trait]
impl<T: RemoteDataEffects + ?Sized> RemoteDataEffects for Arc<T> {
    async fn is_current(&self, info: &RemoteDataInfo) -> bool {
        (**self).is_current(info).await
    }

    async fn status(&self, source: RemoteDataSource) -> FreshnessStatus {
        (**self).status(source).await
    }

    async fn wait_refresh(&self, source: RemoteDataSource) {
        (**self).wait_refresh(source).await;
    }

    async fn wait_refresh_attempt(&self, source: RemoteDataSource) {
        (**self).wait_refresh_attempt(source).await;
    }

    async fn notify_outdated(&self, info: &RemoteDataInfo) {
        (**self).notify_outdated(info).await;
    }

    fn subscribe(&self, types: &[String]) -> PayloadStream {
        (**self).subscribe(types)
    }
}
