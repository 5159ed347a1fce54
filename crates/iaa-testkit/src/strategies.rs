//! Property test strategies for schedule and remote-data types.

use proptest::prelude::*;

pub use proptest;

use iaa_core::{
    AutomationSchedule, FreshnessStatus, InAppMessage, InAppMessageSource, RemoteDataInfo,
    RemoteDataSource, ScheduleData,
};
use serde_json::{json, Map, Value};

/// Strategy for any remote-data source
pub fn arb_source() -> impl Strategy<Value = RemoteDataSource> {
    prop_oneof![Just(RemoteDataSource::App), Just(RemoteDataSource::Contact)]
}

/// Strategy for any freshness status
pub fn arb_status() -> impl Strategy<Value = FreshnessStatus> {
    prop_oneof![
        Just(FreshnessStatus::UpToDate),
        Just(FreshnessStatus::Stale),
        Just(FreshnessStatus::OutOfDate),
    ]
}

/// Strategy for decodable remote-data info
pub fn arb_remote_data_info() -> impl Strategy<Value = RemoteDataInfo> {
    (arb_source(), "[a-z]{1,12}", proptest::option::of("[a-z0-9-]{1,16}")).prop_map(
        |(source, path, contact_id)| RemoteDataInfo {
            url: format!("https://remote-data.test/{path}"),
            last_modified: None,
            source,
            contact_id,
        },
    )
}

/// Metadata that never marks a schedule remote.
///
/// Keys are lowercase words, so neither remote metadata key can appear.
fn arb_local_metadata() -> impl Strategy<Value = Option<Value>> {
    let object = proptest::collection::btree_map("[a-z_]{1,10}", any::<i64>(), 0..4).prop_map(
        |entries| {
            let map: Map<String, Value> = entries
                .into_iter()
                .map(|(key, value)| (key, json!(value)))
                .collect();
            Value::Object(map)
        },
    );

    prop_oneof![
        Just(None),
        object.prop_map(Some),
        Just(Some(json!("scalar metadata"))),
        Just(Some(json!([1, 2, 3]))),
    ]
}

fn arb_local_data() -> impl Strategy<Value = ScheduleData> {
    let message_source = prop_oneof![
        Just(None),
        Just(Some(InAppMessageSource::AppDefined)),
        Just(Some(InAppMessageSource::LegacyRemote)),
    ];

    prop_oneof![
        ("[a-z]{1,10}", message_source).prop_map(|(name, source)| {
            let mut message = InAppMessage::new(name);
            message.source = source;
            ScheduleData::InAppMessage { message }
        }),
        Just(ScheduleData::Actions {
            actions: json!({ "add_tags_action": ["a"] }),
        }),
        Just(ScheduleData::Deferred {
            deferred: json!({ "url": "https://deferred.test" }),
        }),
    ]
}

/// Strategy for schedules that are not backed by remote data
pub fn arb_local_schedule() -> impl Strategy<Value = AutomationSchedule> {
    ("[a-z0-9-]{1,20}", arb_local_metadata(), arb_local_data()).prop_map(
        |(id, metadata, data)| {
            let mut schedule = AutomationSchedule::new(id, data);
            schedule.metadata = metadata;
            schedule
        },
    )
}
