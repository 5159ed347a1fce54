//! IAA Testing Infrastructure
//!
//! Shared fixtures for crates that consume the remote-data effect traits:
//! recording doubles, schedule and payload builders, proptest strategies and
//! a tracing initializer.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! iaa-testkit = { workspace = true }
//! ```
//!
//! ```rust,no_run
//! use iaa_testkit::*;
//! use iaa_core::FreshnessStatus;
//! use iaa_core::RemoteDataSource;
//!
//! let remote_data = MockRemoteData::new()
//!     .with_current(true)
//!     .with_status(RemoteDataSource::App, FreshnessStatus::Stale);
//! let schedule = remote_schedule("s1", app_info());
//! ```

pub mod fixtures;
pub mod mocks;
pub mod strategies;
pub mod logging;

pub use fixtures::*;
pub use mocks::*;
pub use logging::init_test_tracing;
