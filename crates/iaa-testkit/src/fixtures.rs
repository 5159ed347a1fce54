//! Schedule and payload builders.

use chrono::{TimeZone, Utc};
use iaa_core::{
    AutomationSchedule, InAppMessage, InAppMessageSource, RemoteDataInfo, RemoteDataPayload,
    ScheduleData, LEGACY_REMOTE_INFO_METADATA_KEY, REMOTE_INFO_METADATA_KEY,
};
use serde_json::{json, Value};

/// Payload type carrying in-app schedules.
pub const IN_APP_MESSAGES_TYPE: &str = "in_app_messages";

/// App-scoped info with a fixed URL
pub fn app_info() -> RemoteDataInfo {
    RemoteDataInfo::app("https://remote-data.test/api/remote-data/app/key/ios")
        .with_last_modified("Mon, 19 Oct 2026 08:00:00 GMT")
}

/// Contact-scoped info with a fixed URL
pub fn contact_info(contact_id: &str) -> RemoteDataInfo {
    RemoteDataInfo::contact(
        format!("https://remote-data.test/api/remote-data/contact/{contact_id}"),
        contact_id,
    )
}

/// In-app message schedule with no metadata and no message source.
pub fn local_schedule(id: &str) -> AutomationSchedule {
    AutomationSchedule::new(
        id,
        ScheduleData::InAppMessage {
            message: InAppMessage::new(format!("{id}-message")),
        },
    )
}

/// Schedule whose metadata carries `info` under the remote-info key.
pub fn remote_schedule(id: &str, info: RemoteDataInfo) -> AutomationSchedule {
    local_schedule(id).with_metadata(json!({
        LEGACY_REMOTE_INFO_METADATA_KEY: "",
        REMOTE_INFO_METADATA_KEY: serde_json::to_value(info).unwrap(),
    }))
}

/// Schedule marked remote only by the legacy metadata key.
pub fn legacy_metadata_schedule(id: &str) -> AutomationSchedule {
    local_schedule(id).with_metadata(json!({ LEGACY_REMOTE_INFO_METADATA_KEY: "" }))
}

/// Schedule marked remote only by its message source.
pub fn legacy_source_schedule(id: &str) -> AutomationSchedule {
    AutomationSchedule::new(
        id,
        ScheduleData::InAppMessage {
            message: InAppMessage::new(format!("{id}-message"))
                .with_source(InAppMessageSource::RemoteData),
        },
    )
}

/// Remote schedule whose remote-info entry cannot be decoded.
pub fn malformed_remote_schedule(id: &str) -> AutomationSchedule {
    local_schedule(id).with_metadata(json!({
        REMOTE_INFO_METADATA_KEY: { "source": 42, "url": ["not", "a", "url"] },
    }))
}

/// Raw schedule document as served by the remote-data feed.
pub fn schedule_document(id: &str) -> Value {
    json!({
        "id": id,
        "type": "in_app_message",
        "triggers": [{ "type": "app_init", "goal": 1 }],
        "message": {
            "name": format!("{id}-message"),
            "display_type": "banner",
            "display": { "body": { "text": "hello" } },
        },
    })
}

/// In-app payload containing the given schedule documents.
pub fn in_app_payload(
    schedules: Vec<Value>,
    info: Option<RemoteDataInfo>,
) -> RemoteDataPayload {
    RemoteDataPayload {
        data_type: IN_APP_MESSAGES_TYPE.to_string(),
        timestamp: Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap(),
        data: json!({
            "in_app_messages": schedules,
            "frequency_constraints": [{ "id": "daily", "range": 86400, "boundary": 3 }],
        }),
        remote_data_info: info,
    }
}

/// Payload of an unrelated type.
pub fn other_payload(data_type: &str) -> RemoteDataPayload {
    RemoteDataPayload {
        data_type: data_type.to_string(),
        timestamp: Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap(),
        data: json!({ "unrelated": true }),
        remote_data_info: None,
    }
}
