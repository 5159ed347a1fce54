//! Effect traits for services the coordinator depends on.
//!
//! Implementations live in `iaa-effects` (production handlers) and
//! `iaa-testkit` (recording doubles). Feature crates depend only on these
//! traits and receive implementations through their constructors.

pub mod network;
pub mod remote_data;

pub use network::NetworkCheckEffects;
pub use remote_data::{PayloadStream, RemoteDataEffects};
