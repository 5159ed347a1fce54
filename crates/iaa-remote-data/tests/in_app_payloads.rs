//! In-app payload parsing and snapshot subscription tests.

#![allow(clippy::unwrap_used, missing_docs)]

use assert_matches::assert_matches;
use futures::StreamExt;
use iaa_core::{InAppMessageSource, PayloadError, RemoteDataSource};
use iaa_remote_data::{
    InAppRemoteData, RemoteDataAccess, RemoteDataAccessConfig, RemoteScheduleFreshnessCoordinator,
};
use iaa_testkit::*;
use serde_json::json;
use std::sync::Arc;

#[test]
fn parsed_schedules_are_stamped_remote() {
    let info = contact_info("contact-5");
    let payload = in_app_payload(
        vec![schedule_document("one"), schedule_document("two")],
        Some(info.clone()),
    );

    let parsed = InAppRemoteData::parse_payload(&payload).unwrap();

    assert_eq!(parsed.timestamp, payload.timestamp);
    assert_eq!(parsed.remote_data_info.as_ref(), Some(&info));
    assert_eq!(parsed.data.schedules.len(), 2);
    for schedule in &parsed.data.schedules {
        assert!(schedule.is_remote());
        assert_eq!(schedule.remote_info().unwrap(), info);
        assert_eq!(
            schedule.in_app_message().unwrap().source,
            Some(InAppMessageSource::RemoteData)
        );
    }

    let constraints = parsed.data.constraints.unwrap();
    assert_eq!(constraints[0].identifier, "daily");
    assert_eq!(constraints[0].range, 86400);
    assert_eq!(constraints[0].max_count, 3);
}

#[test]
fn constraints_are_optional() {
    let mut payload = in_app_payload(vec![schedule_document("one")], None);
    payload.data = json!({ "in_app_messages": [schedule_document("one")] });

    let parsed = InAppRemoteData::parse_payload(&payload).unwrap();
    assert!(parsed.data.constraints.is_none());
    assert!(parsed.data.schedules[0].is_remote());
}

#[test]
fn malformed_payload_is_a_decode_error() {
    let mut payload = in_app_payload(vec![], None);
    payload.data = json!({ "in_app_messages": "not a list" });

    assert_matches!(
        InAppRemoteData::parse_payload(&payload),
        Err(PayloadError::Decode(_))
    );
}

#[test]
fn from_payloads_keys_by_source() {
    let snapshot = InAppRemoteData::from_payloads(&[
        in_app_payload(vec![schedule_document("app")], Some(app_info())),
        in_app_payload(
            vec![schedule_document("contact")],
            Some(contact_info("contact-6")),
        ),
    ]);

    assert_eq!(snapshot.payloads.len(), 2);
    assert_eq!(
        snapshot.payload(RemoteDataSource::App).unwrap().data.schedules[0].identifier,
        "app"
    );
    assert_eq!(
        snapshot.payload(RemoteDataSource::Contact).unwrap().data.schedules[0].identifier,
        "contact"
    );
    let ids: Vec<_> = snapshot.schedules().map(|s| s.identifier.as_str()).collect();
    assert_eq!(ids, vec!["app", "contact"]);
    assert_eq!(snapshot.constraints().count(), 2);
}

#[test]
fn payload_without_info_lands_on_app_source() {
    let snapshot =
        InAppRemoteData::from_payloads(&[in_app_payload(vec![schedule_document("x")], None)]);

    let payload = snapshot.payload(RemoteDataSource::App).unwrap();
    assert!(payload.remote_data_info.is_none());
}

#[test]
fn malformed_payload_clears_its_source() {
    init_test_tracing();
    let mut broken = in_app_payload(vec![], Some(app_info()));
    broken.data = json!({ "unexpected": true });

    let snapshot = InAppRemoteData::from_payloads(&[
        in_app_payload(vec![schedule_document("first")], Some(app_info())),
        broken,
        in_app_payload(
            vec![schedule_document("contact")],
            Some(contact_info("contact-7")),
        ),
    ]);

    assert!(snapshot.payload(RemoteDataSource::App).is_none());
    assert!(snapshot.payload(RemoteDataSource::Contact).is_some());
}

#[tokio::test]
async fn subscription_maps_payload_sets_to_snapshots() {
    let remote_data = Arc::new(MockRemoteData::new().with_payload_sets(vec![
        vec![],
        vec![in_app_payload(vec![schedule_document("a")], Some(app_info()))],
    ]));
    let access =
        RemoteScheduleFreshnessCoordinator::new(remote_data.clone(), Arc::new(MockNetwork::connected()));

    let snapshots: Vec<InAppRemoteData> = access.subscribe().collect().await;

    assert_eq!(snapshots.len(), 2);
    assert!(snapshots[0].payloads.is_empty());
    assert_eq!(snapshots[1].schedules().count(), 1);
    assert_eq!(
        remote_data.subscribed_types(),
        vec![vec![IN_APP_MESSAGES_TYPE.to_string()]]
    );
}

#[tokio::test]
async fn subscription_requests_configured_types() {
    let remote_data = Arc::new(MockRemoteData::new());
    let access = RemoteScheduleFreshnessCoordinator::with_config(
        remote_data.clone(),
        Arc::new(MockNetwork::connected()),
        RemoteDataAccessConfig::default().with_remote_data_types(["in_app_messages", "scenes"]),
    );

    let snapshots: Vec<InAppRemoteData> = access.subscribe().collect().await;

    assert!(snapshots.is_empty());
    assert_eq!(
        remote_data.subscribed_types(),
        vec![vec!["in_app_messages".to_string(), "scenes".to_string()]]
    );
}
