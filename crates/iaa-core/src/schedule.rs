//! Automation schedule model and remote classification.

use crate::errors::RemoteInfoError;
use crate::message::InAppMessage;
use crate::remote_data::{
    RemoteDataInfo, LEGACY_REMOTE_INFO_METADATA_KEY, REMOTE_INFO_METADATA_KEY,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Content delivered when a schedule fires, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleData {
    /// In-app message
    InAppMessage {
        /// Message definition
        message: InAppMessage,
    },
    /// Action bundle
    Actions {
        /// Actions document
        actions: Value,
    },
    /// Deferred content resolved at display time
    Deferred {
        /// Deferred request document
        deferred: Value,
    },
}

/// A unit of in-app content delivery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationSchedule {
    /// Schedule identifier
    #[serde(rename = "id")]
    pub identifier: String,
    /// Trigger documents
    #[serde(default)]
    pub triggers: Vec<Value>,
    /// Display priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Free-form metadata attached by the delivery pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Schedule content
    #[serde(flatten)]
    pub data: ScheduleData,
}

impl AutomationSchedule {
    /// Create a schedule with no triggers or metadata.
    pub fn new(identifier: impl Into<String>, data: ScheduleData) -> Self {
        Self {
            identifier: identifier.into(),
            triggers: Vec::new(),
            priority: None,
            metadata: None,
            data,
        }
    }

    /// Set the metadata document
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Metadata as an object, if it is one.
    pub fn metadata_object(&self) -> Option<&Map<String, Value>> {
        self.metadata.as_ref().and_then(Value::as_object)
    }

    /// In-app message carried by this schedule, if any.
    pub fn in_app_message(&self) -> Option<&InAppMessage> {
        match &self.data {
            ScheduleData::InAppMessage { message } => Some(message),
            _ => None,
        }
    }

    /// Whether this schedule is backed by remote data.
    ///
    /// Either metadata key marks a schedule remote, as does an in-app message
    /// tagged with the remote-data source.
    pub fn is_remote(&self) -> bool {
        if let Some(map) = self.metadata_object() {
            if map.contains_key(REMOTE_INFO_METADATA_KEY)
                || map.contains_key(LEGACY_REMOTE_INFO_METADATA_KEY)
            {
                return true;
            }
        }

        // legacy way
        self.in_app_message()
            .map(InAppMessage::is_remote_data)
            .unwrap_or(false)
    }

    /// Decode the remote-data info stored under the remote-info metadata key.
    pub fn remote_info(&self) -> Result<RemoteDataInfo, RemoteInfoError> {
        let metadata = self
            .metadata
            .as_ref()
            .ok_or(RemoteInfoError::MissingMetadata)?;
        let map = metadata
            .as_object()
            .ok_or(RemoteInfoError::MetadataNotObject)?;
        let value = map
            .get(REMOTE_INFO_METADATA_KEY)
            .ok_or(RemoteInfoError::MissingRemoteInfo)?;

        Ok(RemoteDataInfo::deserialize(value)?)
    }
}
