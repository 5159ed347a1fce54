//! In-app message payload carried by automation schedules.
//!
//! Only the fields needed for classification are modeled; the display
//! document is kept opaque.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where an in-app message came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InAppMessageSource {
    /// Delivered through the remote-data feed
    #[serde(rename = "remote-data")]
    RemoteData,
    /// Created locally by the application
    #[serde(rename = "app-defined")]
    AppDefined,
    /// Delivered by the legacy remote pipeline
    #[serde(rename = "legacy-remote")]
    LegacyRemote,
}

/// In-app message definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InAppMessage {
    /// Message name
    pub name: String,
    /// Display type (banner, modal, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    /// Display content document
    #[serde(default)]
    pub display: Value,
    /// Message origin, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<InAppMessageSource>,
}

impl InAppMessage {
    /// Create a message with no display content or source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_type: None,
            display: Value::Null,
            source: None,
        }
    }

    /// Set the message source
    pub fn with_source(mut self, source: InAppMessageSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Whether the message was tagged as remote-data delivered.
    pub fn is_remote_data(&self) -> bool {
        self.source == Some(InAppMessageSource::RemoteData)
    }
}
