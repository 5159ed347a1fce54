//! # IAA Effects - Layer 2: Effect Handlers
//!
//! Production implementations of the effect traits declared in `iaa-core`:
//! - [`InMemoryRemoteData`]: per-source freshness tracking with refresh signalling
//! - [`ReachabilityHandler`]: connectivity flag fed by the host platform
//!
//! Handlers are `Send + Sync` and are shared behind `Arc` by feature crates.

pub mod network;
pub mod remote_data;

pub use network::ReachabilityHandler;
pub use remote_data::InMemoryRemoteData;
