//! In-memory remote-data service.
//!
//! Tracks, for every [`RemoteDataSource`], the info of the last successful
//! refresh, the freshness status, and the stored payloads. Refresh outcomes
//! are reported by the host through [`InMemoryRemoteData::apply_refresh`] and
//! [`InMemoryRemoteData::record_failed_attempt`]; waiters are woken through
//! `tokio::sync::watch` channels.
//!
//! Channel sends that mirror record state happen under the records write
//! lock, which is never held across an `.await`.

use async_trait::async_trait;
use futures::StreamExt;
use iaa_core::{
    FreshnessStatus, PayloadStream, RemoteDataEffects, RemoteDataInfo, RemoteDataPayload,
    RemoteDataSource,
};
use parking_lot::RwLock;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// One value per source.
#[derive(Debug, Default)]
struct PerSource<T> {
    app: T,
    contact: T,
}

impl<T> PerSource<T> {
    fn get(&self, source: RemoteDataSource) -> &T {
        match source {
            RemoteDataSource::App => &self.app,
            RemoteDataSource::Contact => &self.contact,
        }
    }

    fn get_mut(&mut self, source: RemoteDataSource) -> &mut T {
        match source {
            RemoteDataSource::App => &mut self.app,
            RemoteDataSource::Contact => &mut self.contact,
        }
    }
}

#[derive(Debug)]
struct SourceChannels {
    status: watch::Sender<FreshnessStatus>,
    /// Count of finished refresh attempts
    attempts: watch::Sender<u64>,
}

impl SourceChannels {
    fn new() -> Self {
        let (status, _) = watch::channel(FreshnessStatus::OutOfDate);
        let (attempts, _) = watch::channel(0);
        Self { status, attempts }
    }
}

#[derive(Debug, Default)]
struct SourceRecord {
    current: Option<RemoteDataInfo>,
    payloads: Vec<RemoteDataPayload>,
}

/// Remote-data service holding refreshed payloads in memory
#[derive(Debug)]
pub struct InMemoryRemoteData {
    channels: PerSource<SourceChannels>,
    records: RwLock<PerSource<SourceRecord>>,
    /// All payloads across sources, app first
    feed: watch::Sender<Vec<RemoteDataPayload>>,
}

impl InMemoryRemoteData {
    /// Create a service with no data; every source starts out of date.
    pub fn new() -> Self {
        let (feed, _) = watch::channel(Vec::new());
        Self {
            channels: PerSource {
                app: SourceChannels::new(),
                contact: SourceChannels::new(),
            },
            records: RwLock::new(PerSource::default()),
            feed,
        }
    }

    /// Record a successful refresh of `source`.
    ///
    /// `info` becomes the current info, stored payloads are replaced and
    /// stamped with `info`, and both refresh waiters and feed subscribers are
    /// notified.
    pub fn apply_refresh(
        &self,
        source: RemoteDataSource,
        info: RemoteDataInfo,
        payloads: Vec<RemoteDataPayload>,
    ) {
        let payloads: Vec<RemoteDataPayload> = payloads
            .into_iter()
            .map(|mut payload| {
                payload.remote_data_info = Some(info.clone());
                payload
            })
            .collect();

        let channels = self.channels.get(source);
        let published = {
            let mut records = self.records.write();
            let record = records.get_mut(source);
            record.current = Some(info);
            record.payloads = payloads;

            // Feed and status are published under the write guard.
            let snapshot = Self::collect_payloads(&records);
            let published = snapshot.len();
            self.feed.send_replace(snapshot);
            channels.status.send_replace(FreshnessStatus::UpToDate);
            published
        };

        tracing::debug!(%source, payloads = published, "remote data refreshed");
        channels.attempts.send_modify(|count| *count += 1);
    }

    /// Record a refresh attempt for `source` that did not produce data.
    pub fn record_failed_attempt(&self, source: RemoteDataSource) {
        tracing::debug!(%source, "remote data refresh attempt failed");
        self.channels
            .get(source)
            .attempts
            .send_modify(|count| *count += 1);
    }

    /// Override the freshness status of `source`, e.g. when its data ages.
    pub fn set_status(&self, source: RemoteDataSource, status: FreshnessStatus) {
        let _records = self.records.write();
        self.channels.get(source).status.send_replace(status);
    }

    /// Info of the last successful refresh of `source`, unless since outdated.
    pub fn current_info(&self, source: RemoteDataSource) -> Option<RemoteDataInfo> {
        self.records.read().get(source).current.clone()
    }

    /// Payloads stored for `source`.
    pub fn payloads(&self, source: RemoteDataSource) -> Vec<RemoteDataPayload> {
        self.records.read().get(source).payloads.clone()
    }

    fn collect_payloads(records: &PerSource<SourceRecord>) -> Vec<RemoteDataPayload> {
        RemoteDataSource::ALL
            .iter()
            .flat_map(|source| records.get(*source).payloads.iter().cloned())
            .collect()
    }
}

impl Default for InMemoryRemoteData {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteDataEffects for InMemoryRemoteData {
    async fn is_current(&self, info: &RemoteDataInfo) -> bool {
        self.records.read().get(info.source).current.as_ref() == Some(info)
    }

    async fn status(&self, source: RemoteDataSource) -> FreshnessStatus {
        let status = *self.channels.get(source).status.borrow();
        status
    }

    async fn wait_refresh(&self, source: RemoteDataSource) {
        let mut status = self.channels.get(source).status.subscribe();
        // The sender lives as long as `self`, so the wait cannot fail.
        let _ = status
            .wait_for(|status| *status == FreshnessStatus::UpToDate)
            .await;
    }

    async fn wait_refresh_attempt(&self, source: RemoteDataSource) {
        let mut attempts = self.channels.get(source).attempts.subscribe();
        let _ = attempts.changed().await;
    }

    async fn notify_outdated(&self, info: &RemoteDataInfo) {
        let outdated = {
            let mut records = self.records.write();
            let record = records.get_mut(info.source);
            if record.current.as_ref() == Some(info) {
                record.current = None;
                self.channels
                    .get(info.source)
                    .status
                    .send_replace(FreshnessStatus::OutOfDate);
                true
            } else {
                false
            }
        };

        if outdated {
            tracing::info!(source = %info.source, url = %info.url, "remote data marked outdated");
        } else {
            tracing::debug!(
                source = %info.source,
                url = %info.url,
                "ignoring outdated notice for superseded remote data"
            );
        }
    }

    fn subscribe(&self, types: &[String]) -> PayloadStream {
        let types = types.to_vec();
        WatchStream::new(self.feed.subscribe())
            .map(move |payloads| {
                payloads
                    .into_iter()
                    .filter(|payload| types.contains(&payload.data_type))
                    .collect::<Vec<_>>()
            })
            .boxed()
    }
}
