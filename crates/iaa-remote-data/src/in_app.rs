//! In-app view of the remote-data feed.
//!
//! Each `in_app_messages` payload is decoded into schedules and frequency
//! constraints. Decoded schedules are stamped with remote metadata and their
//! messages tagged as remote-data delivered, so the freshness coordinator
//! classifies them as remote and resolves the payload's info from them.

use chrono::{DateTime, Utc};
use iaa_core::{
    AutomationSchedule, InAppMessageSource, PayloadError, RemoteDataInfo, RemoteDataPayload,
    RemoteDataSource, ScheduleData, LEGACY_REMOTE_INFO_METADATA_KEY, REMOTE_INFO_METADATA_KEY,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Display frequency limit shared by schedules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyConstraint {
    /// Constraint identifier
    #[serde(rename = "id")]
    pub identifier: String,
    /// Window length in seconds
    pub range: u64,
    /// Maximum displays within the window
    #[serde(rename = "boundary")]
    pub max_count: u32,
}

/// Decoded in-app payload document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InAppData {
    /// Schedules delivered by the payload
    #[serde(rename = "in_app_messages")]
    pub schedules: Vec<AutomationSchedule>,
    /// Frequency constraints referenced by the schedules
    #[serde(
        rename = "frequency_constraints",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub constraints: Option<Vec<FrequencyConstraint>>,
}

/// In-app data from one source
#[derive(Debug, Clone, PartialEq)]
pub struct InAppPayload {
    /// Decoded document
    pub data: InAppData,
    /// When the payload was produced
    pub timestamp: DateTime<Utc>,
    /// Fetch that produced the payload
    pub remote_data_info: Option<RemoteDataInfo>,
}

/// Latest in-app data keyed by source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InAppRemoteData {
    /// Parsed payload per source
    pub payloads: BTreeMap<RemoteDataSource, InAppPayload>,
}

impl InAppRemoteData {
    /// Decode a single remote-data payload.
    pub fn parse_payload(payload: &RemoteDataPayload) -> Result<InAppPayload, PayloadError> {
        let metadata = remote_metadata(payload.remote_data_info.as_ref())?;
        let mut data = InAppData::deserialize(&payload.data)?;

        for schedule in &mut data.schedules {
            schedule.metadata = Some(metadata.clone());
            if let ScheduleData::InAppMessage { message } = &mut schedule.data {
                message.source = Some(InAppMessageSource::RemoteData);
            }
        }

        Ok(InAppPayload {
            data,
            timestamp: payload.timestamp,
            remote_data_info: payload.remote_data_info.clone(),
        })
    }

    /// Build the per-source view of a payload set.
    ///
    /// Later payloads replace earlier ones for the same source. A payload
    /// that fails to parse is logged and clears its source.
    pub fn from_payloads(payloads: &[RemoteDataPayload]) -> Self {
        let mut parsed = BTreeMap::new();
        for payload in payloads {
            let source = payload.source();
            match Self::parse_payload(payload) {
                Ok(in_app) => {
                    parsed.insert(source, in_app);
                }
                Err(error) => {
                    tracing::error!(
                        %source,
                        code = error.code(),
                        %error,
                        "failed to parse in-app remote-data payload"
                    );
                    parsed.remove(&source);
                }
            }
        }

        Self { payloads: parsed }
    }

    /// Payload for `source`, if one parsed.
    pub fn payload(&self, source: RemoteDataSource) -> Option<&InAppPayload> {
        self.payloads.get(&source)
    }

    /// All schedules across sources, app first.
    pub fn schedules(&self) -> impl Iterator<Item = &AutomationSchedule> {
        self.payloads
            .values()
            .flat_map(|payload| payload.data.schedules.iter())
    }

    /// All frequency constraints across sources, app first.
    pub fn constraints(&self) -> impl Iterator<Item = &FrequencyConstraint> {
        self.payloads
            .values()
            .filter_map(|payload| payload.data.constraints.as_ref())
            .flatten()
    }
}

/// Metadata stamped onto every schedule of a payload.
///
/// The remote-info entry is omitted when the payload carries no info; the
/// legacy key still marks such schedules remote.
fn remote_metadata(info: Option<&RemoteDataInfo>) -> Result<Value, PayloadError> {
    let mut map = Map::new();
    map.insert(
        LEGACY_REMOTE_INFO_METADATA_KEY.to_string(),
        Value::String(String::new()),
    );
    if let Some(info) = info {
        let encoded = serde_json::to_value(info)
            .map_err(|error| PayloadError::MetadataEncode(error.to_string()))?;
        map.insert(REMOTE_INFO_METADATA_KEY.to_string(), encoded);
    }
    Ok(Value::Object(map))
}
