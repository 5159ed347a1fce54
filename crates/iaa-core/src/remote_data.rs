//! Remote-data vocabulary: sources, info records, payloads and freshness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Metadata key holding the encoded [`RemoteDataInfo`] of a remote schedule.
pub const REMOTE_INFO_METADATA_KEY: &str = "com.urbanairship.iaa.REMOTE_DATA_INFO";

/// Legacy metadata key marking a schedule as remote. Its value is never decoded.
pub const LEGACY_REMOTE_INFO_METADATA_KEY: &str = "com.urbanairship.iaa.REMOTE_DATA_METADATA";

/// Scope under which a remote-data feed is fetched and cached
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RemoteDataSource {
    /// App-wide feed
    #[default]
    App,
    /// Per-contact feed
    Contact,
}

impl RemoteDataSource {
    /// All known sources
    pub const ALL: [RemoteDataSource; 2] = [RemoteDataSource::App, RemoteDataSource::Contact];
}

impl fmt::Display for RemoteDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteDataSource::App => write!(f, "app"),
            RemoteDataSource::Contact => write!(f, "contact"),
        }
    }
}

/// Identifies the fetch that produced a set of remote data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteDataInfo {
    /// URL the data was fetched from
    pub url: String,
    /// Last-Modified value returned with the data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Source the data belongs to
    pub source: RemoteDataSource,
    /// Contact the data was fetched for, for contact-scoped sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
}

impl RemoteDataInfo {
    /// Info for an app-scoped fetch
    pub fn app(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            last_modified: None,
            source: RemoteDataSource::App,
            contact_id: None,
        }
    }

    /// Info for a contact-scoped fetch
    pub fn contact(url: impl Into<String>, contact_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            last_modified: None,
            source: RemoteDataSource::Contact,
            contact_id: Some(contact_id.into()),
        }
    }

    /// Set the Last-Modified value
    pub fn with_last_modified(mut self, last_modified: impl Into<String>) -> Self {
        self.last_modified = Some(last_modified.into());
        self
    }
}

/// How recently a source's data was fetched relative to server expectations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessStatus {
    /// Data is fresh
    UpToDate,
    /// Data is usable but a refresh is due
    Stale,
    /// Data must be refreshed before use
    OutOfDate,
}

/// One typed document delivered by the remote-data feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDataPayload {
    /// Payload type, e.g. `in_app_messages`
    #[serde(rename = "type")]
    pub data_type: String,
    /// When the payload was produced
    pub timestamp: DateTime<Utc>,
    /// Payload document
    pub data: Value,
    /// Fetch that produced the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_data_info: Option<RemoteDataInfo>,
}

impl RemoteDataPayload {
    /// Source this payload belongs to, defaulting to the app source.
    pub fn source(&self) -> RemoteDataSource {
        self.remote_data_info
            .as_ref()
            .map(|info| info.source)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn info_decodes_with_optional_fields_absent() {
        let info: RemoteDataInfo = serde_json::from_value(json!({
            "url": "https://remote-data.example/api/remote-data/app/key/ios",
            "source": "app",
        }))
        .unwrap();

        assert_eq!(info.source, RemoteDataSource::App);
        assert!(info.contact_id.is_none());
        assert!(info.last_modified.is_none());
    }

    #[test]
    fn info_rejects_unknown_source() {
        let result = serde_json::from_value::<RemoteDataInfo>(json!({
            "url": "https://remote-data.example",
            "source": "channel",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn payload_source_defaults_to_app() {
        let mut payload = RemoteDataPayload {
            data_type: "in_app_messages".into(),
            timestamp: Utc::now(),
            data: json!({}),
            remote_data_info: None,
        };
        assert_eq!(payload.source(), RemoteDataSource::App);

        payload.remote_data_info = Some(RemoteDataInfo::contact("https://x", "contact-1"));
        assert_eq!(payload.source(), RemoteDataSource::Contact);
    }

    #[test]
    fn freshness_status_uses_snake_case() {
        assert_eq!(
            serde_json::to_value(FreshnessStatus::OutOfDate).unwrap(),
            json!("out_of_date")
        );
    }
}
