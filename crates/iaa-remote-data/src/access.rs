//! Freshness coordination for remote-data backed schedules.
//!
//! A schedule is remote when its metadata carries either remote metadata key
//! or its in-app message is tagged as remote-data delivered. Local schedules
//! are always current and never need a refresh. For remote schedules the
//! coordinator resolves the [`RemoteDataInfo`] stored in metadata and asks the
//! remote-data service about it.
//!
//! Metadata that cannot be decoded is logged and treated as missing info, so
//! the schedule is reported as not current and needing an update.

use crate::config::RemoteDataAccessConfig;
use crate::in_app::InAppRemoteData;
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use iaa_core::{
    AutomationSchedule, FreshnessStatus, NetworkCheckEffects, RemoteDataEffects, RemoteDataInfo,
    RemoteDataSource,
};
use std::sync::Arc;

/// Stream of per-source in-app snapshots.
pub type InAppRemoteDataStream = BoxStream<'static, InAppRemoteData>;

/// Remote-data queries for automation schedules.
#[async_trait]
pub trait RemoteDataAccess: Send + Sync {
    /// Whether the data backing `schedule` is current.
    async fn is_current(&self, schedule: &AutomationSchedule) -> bool;

    /// Whether `schedule` must be refreshed before it can be used.
    async fn requires_update(&self, schedule: &AutomationSchedule) -> bool;

    /// Suspend until the schedule's source has fully refreshed.
    async fn wait_full_refresh(&self, schedule: &AutomationSchedule);

    /// Try to bring the schedule's data up to date without requiring success.
    ///
    /// Returns whether the schedule's data is current afterwards.
    async fn best_effort_refresh(&self, schedule: &AutomationSchedule) -> bool;

    /// Report that the data backing `schedule` turned out to be outdated.
    async fn notify_outdated(&self, schedule: &AutomationSchedule);

    /// Contact the schedule's data was fetched for.
    fn contact_id(&self, schedule: &AutomationSchedule) -> Option<String>;

    /// Source of a remote schedule; `None` for local schedules.
    fn source(&self, schedule: &AutomationSchedule) -> Option<RemoteDataSource>;

    /// Subscribe to in-app snapshots derived from the remote-data feed.
    fn subscribe(&self) -> InAppRemoteDataStream;
}

/// [`RemoteDataAccess`] over injected remote-data and network effects.
///
/// Holds no mutable state; concurrent callers are safe as long as the
/// injected remote-data service is.
#[derive(Clone)]
pub struct RemoteScheduleFreshnessCoordinator {
    remote_data: Arc<dyn RemoteDataEffects>,
    network: Arc<dyn NetworkCheckEffects>,
    config: RemoteDataAccessConfig,
}

impl RemoteScheduleFreshnessCoordinator {
    /// Create a coordinator requesting the default payload types.
    pub fn new(
        remote_data: Arc<dyn RemoteDataEffects>,
        network: Arc<dyn NetworkCheckEffects>,
    ) -> Self {
        Self::with_config(remote_data, network, RemoteDataAccessConfig::default())
    }

    /// Create a coordinator with explicit configuration.
    pub fn with_config(
        remote_data: Arc<dyn RemoteDataEffects>,
        network: Arc<dyn NetworkCheckEffects>,
        config: RemoteDataAccessConfig,
    ) -> Self {
        Self {
            remote_data,
            network,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &RemoteDataAccessConfig {
        &self.config
    }

    /// Remote info from the schedule's metadata.
    ///
    /// Absent info is silent; corrupt info is logged.
    fn remote_info(&self, schedule: &AutomationSchedule) -> Option<RemoteDataInfo> {
        match schedule.remote_info() {
            Ok(info) => Some(info),
            Err(error) if error.is_absent() => None,
            Err(error) => {
                tracing::error!(
                    schedule_id = %schedule.identifier,
                    code = error.code(),
                    %error,
                    "failed to parse remote info from schedule"
                );
                None
            }
        }
    }

    /// Remote info that the service still considers current.
    async fn current_remote_info(&self, schedule: &AutomationSchedule) -> Option<RemoteDataInfo> {
        let info = self.remote_info(schedule)?;
        if self.remote_data.is_current(&info).await {
            Some(info)
        } else {
            None
        }
    }
}

impl std::fmt::Debug for RemoteScheduleFreshnessCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteScheduleFreshnessCoordinator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RemoteDataAccess for RemoteScheduleFreshnessCoordinator {
    async fn is_current(&self, schedule: &AutomationSchedule) -> bool {
        if !schedule.is_remote() {
            return true;
        }

        match self.remote_info(schedule) {
            Some(info) => self.remote_data.is_current(&info).await,
            None => false,
        }
    }

    async fn requires_update(&self, schedule: &AutomationSchedule) -> bool {
        if !schedule.is_remote() {
            return false;
        }

        let Some(info) = self.current_remote_info(schedule).await else {
            return true;
        };

        match self.remote_data.status(info.source).await {
            FreshnessStatus::OutOfDate => true,
            FreshnessStatus::Stale | FreshnessStatus::UpToDate => false,
        }
    }

    async fn wait_full_refresh(&self, schedule: &AutomationSchedule) {
        if !schedule.is_remote() {
            return;
        }

        let source = self
            .remote_info(schedule)
            .map(|info| info.source)
            .unwrap_or_default();

        tracing::debug!(schedule_id = %schedule.identifier, %source, "waiting for full refresh");
        self.remote_data.wait_refresh(source).await;
    }

    async fn best_effort_refresh(&self, schedule: &AutomationSchedule) -> bool {
        if !schedule.is_remote() {
            return true;
        }

        let Some(info) = self.current_remote_info(schedule).await else {
            return false;
        };

        let source = info.source;
        if self.remote_data.status(source).await == FreshnessStatus::UpToDate {
            return true;
        }

        // Only wait on an attempt that can actually reach the network.
        if self.network.is_connected().await {
            tracing::debug!(
                schedule_id = %schedule.identifier,
                %source,
                "waiting for refresh attempt"
            );
            self.remote_data.wait_refresh_attempt(source).await;
        }

        self.remote_data.is_current(&info).await
    }

    async fn notify_outdated(&self, schedule: &AutomationSchedule) {
        if let Some(info) = self.remote_info(schedule) {
            self.remote_data.notify_outdated(&info).await;
        }
    }

    fn contact_id(&self, schedule: &AutomationSchedule) -> Option<String> {
        self.remote_info(schedule).and_then(|info| info.contact_id)
    }

    fn source(&self, schedule: &AutomationSchedule) -> Option<RemoteDataSource> {
        if !schedule.is_remote() {
            return None;
        }

        Some(
            self.remote_info(schedule)
                .map(|info| info.source)
                .unwrap_or_default(),
        )
    }

    fn subscribe(&self) -> InAppRemoteDataStream {
        self.remote_data
            .subscribe(&self.config.remote_data_types)
            .map(|payloads| InAppRemoteData::from_payloads(&payloads))
            .boxed()
    }
}
