//! Recording doubles for the remote-data and network effects.
//!
//! Every call is recorded so tests can assert on what the code under test
//! did, including what it did not do.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use iaa_core::{
    FreshnessStatus, NetworkCheckEffects, PayloadStream, RemoteDataEffects, RemoteDataInfo,
    RemoteDataPayload, RemoteDataSource,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Remote-data service operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteDataCall {
    /// `is_current`
    IsCurrent,
    /// `status`
    Status,
    /// `wait_refresh`
    WaitRefresh,
    /// `wait_refresh_attempt`
    WaitRefreshAttempt,
    /// `notify_outdated`
    NotifyOutdated,
    /// `subscribe`
    Subscribe,
}

#[derive(Debug)]
struct MockRemoteDataState {
    current: bool,
    current_after_attempt: Option<bool>,
    statuses: HashMap<RemoteDataSource, FreshnessStatus>,
    payload_sets: Vec<Vec<RemoteDataPayload>>,
    calls: Vec<(RemoteDataCall, Option<RemoteDataSource>)>,
    outdated: Vec<RemoteDataInfo>,
    subscribed_types: Vec<Vec<String>>,
}

/// Scripted remote-data service.
///
/// `is_current` answers a single flag for every info, statuses default to
/// up-to-date, and waits complete immediately.
#[derive(Debug)]
pub struct MockRemoteData {
    state: Mutex<MockRemoteDataState>,
}

impl MockRemoteData {
    /// Every info current, every source up to date, no payloads.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockRemoteDataState {
                current: true,
                current_after_attempt: None,
                statuses: HashMap::new(),
                payload_sets: Vec::new(),
                calls: Vec::new(),
                outdated: Vec::new(),
                subscribed_types: Vec::new(),
            }),
        }
    }

    /// Set the answer to `is_current`
    pub fn with_current(self, current: bool) -> Self {
        self.state.lock().current = current;
        self
    }

    /// Set the status reported for `source`
    pub fn with_status(self, source: RemoteDataSource, status: FreshnessStatus) -> Self {
        self.state.lock().statuses.insert(source, status);
        self
    }

    /// Change the `is_current` answer once a refresh attempt completes
    pub fn with_current_after_attempt(self, current: bool) -> Self {
        self.state.lock().current_after_attempt = Some(current);
        self
    }

    /// Payload sets replayed, in order, to every subscriber
    pub fn with_payload_sets(self, sets: Vec<Vec<RemoteDataPayload>>) -> Self {
        self.state.lock().payload_sets = sets;
        self
    }

    /// All recorded calls in order
    pub fn calls(&self) -> Vec<(RemoteDataCall, Option<RemoteDataSource>)> {
        self.state.lock().calls.clone()
    }

    /// Number of times `call` was made
    pub fn call_count(&self, call: RemoteDataCall) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|(recorded, _)| *recorded == call)
            .count()
    }

    /// Sources passed to `call`, in order
    pub fn sources_for(&self, call: RemoteDataCall) -> Vec<RemoteDataSource> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|(recorded, _)| *recorded == call)
            .filter_map(|(_, source)| *source)
            .collect()
    }

    /// Infos passed to `notify_outdated`
    pub fn outdated_notices(&self) -> Vec<RemoteDataInfo> {
        self.state.lock().outdated.clone()
    }

    /// Type filters passed to `subscribe`
    pub fn subscribed_types(&self) -> Vec<Vec<String>> {
        self.state.lock().subscribed_types.clone()
    }

    fn record(&self, call: RemoteDataCall, source: Option<RemoteDataSource>) {
        self.state.lock().calls.push((call, source));
    }
}

impl Default for MockRemoteData {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteDataEffects for MockRemoteData {
    async fn is_current(&self, info: &RemoteDataInfo) -> bool {
        self.record(RemoteDataCall::IsCurrent, Some(info.source));
        self.state.lock().current
    }

    async fn status(&self, source: RemoteDataSource) -> FreshnessStatus {
        self.record(RemoteDataCall::Status, Some(source));
        self.state
            .lock()
            .statuses
            .get(&source)
            .copied()
            .unwrap_or(FreshnessStatus::UpToDate)
    }

    async fn wait_refresh(&self, source: RemoteDataSource) {
        self.record(RemoteDataCall::WaitRefresh, Some(source));
    }

    async fn wait_refresh_attempt(&self, source: RemoteDataSource) {
        self.record(RemoteDataCall::WaitRefreshAttempt, Some(source));
        let mut state = self.state.lock();
        if let Some(current) = state.current_after_attempt {
            state.current = current;
        }
    }

    async fn notify_outdated(&self, info: &RemoteDataInfo) {
        self.record(RemoteDataCall::NotifyOutdated, Some(info.source));
        self.state.lock().outdated.push(info.clone());
    }

    fn subscribe(&self, types: &[String]) -> PayloadStream {
        self.record(RemoteDataCall::Subscribe, None);
        let mut state = self.state.lock();
        state.subscribed_types.push(types.to_vec());
        stream::iter(state.payload_sets.clone()).boxed()
    }
}

/// Network checker with a fixed answer that counts queries.
#[derive(Debug)]
pub struct MockNetwork {
    connected: bool,
    checks: AtomicUsize,
}

impl MockNetwork {
    /// Checker that always reports a connection.
    pub fn connected() -> Self {
        Self {
            connected: true,
            checks: AtomicUsize::new(0),
        }
    }

    /// Checker that never reports a connection.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            checks: AtomicUsize::new(0),
        }
    }

    /// Number of `is_connected` queries
    pub fn check_count(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkCheckEffects for MockNetwork {
    async fn is_connected(&self) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.connected
    }
}
