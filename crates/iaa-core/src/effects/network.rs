//! Network reachability effect.
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `iaa-effects::ReachabilityHandler`
//! - **Usage**: best-effort refresh decisions

use async_trait::async_trait;
use std::sync::Arc;

/// Reports whether the device currently has network connectivity.
#[async_trait]
pub trait NetworkCheckEffects: Send + Sync {
    /// Whether a network connection is available right now.
    async fn is_connected(&self) -> bool;
}

#[async_trait]
impl<T: NetworkCheckEffects + ?Sized> NetworkCheckEffects for Arc<T> {
    async fn is_connected(&self) -> bool {
        (**self).is_connected().await
    }
}
