//! Reachability handler backed by an atomic flag.

use async_trait::async_trait;
use iaa_core::NetworkCheckEffects;
use std::sync::atomic::{AtomicBool, Ordering};

/// Network checker whose state is pushed in by the host platform.
#[derive(Debug)]
pub struct ReachabilityHandler {
    connected: AtomicBool,
}

impl ReachabilityHandler {
    /// Create a handler with an initial connectivity state.
    pub fn new(connected: bool) -> Self {
        Self {
            connected: AtomicBool::new(connected),
        }
    }

    /// Record a connectivity change.
    pub fn set_connected(&self, connected: bool) {
        let previous = self.connected.swap(connected, Ordering::AcqRel);
        if previous != connected {
            tracing::debug!(connected, "network reachability changed");
        }
    }
}

impl Default for ReachabilityHandler {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl NetworkCheckEffects for ReachabilityHandler {
    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}
