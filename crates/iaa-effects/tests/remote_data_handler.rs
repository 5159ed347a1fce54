//! In-memory remote-data handler tests.

#![allow(clippy::unwrap_used, missing_docs)]

use futures::executor::block_on;
use futures::StreamExt;
use iaa_core::{FreshnessStatus, RemoteDataEffects, RemoteDataSource};
use iaa_effects::InMemoryRemoteData;
use iaa_testkit::*;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn sources_start_out_of_date_with_no_current_info() {
    let remote_data = InMemoryRemoteData::new();

    for source in RemoteDataSource::ALL {
        assert_eq!(remote_data.status(source).await, FreshnessStatus::OutOfDate);
        assert!(remote_data.current_info(source).is_none());
    }
    assert!(!remote_data.is_current(&app_info()).await);
}

#[tokio::test]
async fn refresh_makes_info_current_per_source() {
    let remote_data = InMemoryRemoteData::new();
    remote_data.apply_refresh(RemoteDataSource::Contact, contact_info("c1"), vec![]);

    assert!(remote_data.is_current(&contact_info("c1")).await);
    assert!(!remote_data.is_current(&contact_info("c2")).await);
    assert!(!remote_data.is_current(&app_info()).await);
    assert_eq!(
        remote_data.status(RemoteDataSource::Contact).await,
        FreshnessStatus::UpToDate
    );
    assert_eq!(
        remote_data.status(RemoteDataSource::App).await,
        FreshnessStatus::OutOfDate
    );
}

#[tokio::test]
async fn refresh_stamps_payloads_with_info() {
    let remote_data = InMemoryRemoteData::new();
    remote_data.apply_refresh(
        RemoteDataSource::App,
        app_info(),
        vec![in_app_payload(vec![], None)],
    );

    let payloads = remote_data.payloads(RemoteDataSource::App);
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].remote_data_info, Some(app_info()));
    assert!(remote_data.payloads(RemoteDataSource::Contact).is_empty());
}

#[tokio::test]
async fn notify_outdated_only_affects_matching_info() {
    let remote_data = InMemoryRemoteData::new();
    remote_data.apply_refresh(RemoteDataSource::App, app_info(), vec![]);

    remote_data
        .notify_outdated(&app_info().with_last_modified("older"))
        .await;
    assert!(remote_data.is_current(&app_info()).await);

    remote_data.notify_outdated(&app_info()).await;
    assert!(!remote_data.is_current(&app_info()).await);
    assert_eq!(
        remote_data.status(RemoteDataSource::App).await,
        FreshnessStatus::OutOfDate
    );
}

#[tokio::test]
async fn wait_refresh_attempt_resumes_on_failure() {
    let remote_data = Arc::new(InMemoryRemoteData::new());

    let waiter = tokio::spawn({
        let remote_data = remote_data.clone();
        async move { remote_data.wait_refresh_attempt(RemoteDataSource::Contact).await }
    });
    tokio::task::yield_now().await;

    // Attempts on another source do not wake the waiter.
    remote_data.record_failed_attempt(RemoteDataSource::App);
    tokio::task::yield_now().await;
    assert!(!waiter.is_finished());

    remote_data.record_failed_attempt(RemoteDataSource::Contact);
    timeout(Duration::from_secs(1), waiter)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        remote_data.status(RemoteDataSource::Contact).await,
        FreshnessStatus::OutOfDate
    );
}

#[tokio::test]
async fn wait_refresh_ignores_failed_attempts() {
    let remote_data = Arc::new(InMemoryRemoteData::new());

    let waiter = tokio::spawn({
        let remote_data = remote_data.clone();
        async move { remote_data.wait_refresh(RemoteDataSource::App).await }
    });
    tokio::task::yield_now().await;

    remote_data.record_failed_attempt(RemoteDataSource::App);
    tokio::task::yield_now().await;
    assert!(!waiter.is_finished());

    remote_data.apply_refresh(RemoteDataSource::App, app_info(), vec![]);
    timeout(Duration::from_secs(1), waiter)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn subscribe_filters_types_and_replays_current_set() {
    let remote_data = InMemoryRemoteData::new();
    remote_data.apply_refresh(
        RemoteDataSource::App,
        app_info(),
        vec![in_app_payload(vec![], None), other_payload("scenes")],
    );

    let mut stream = remote_data.subscribe(&[IN_APP_MESSAGES_TYPE.to_string()]);
    let first = stream.next().await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].data_type, IN_APP_MESSAGES_TYPE);

    remote_data.apply_refresh(
        RemoteDataSource::Contact,
        contact_info("c3"),
        vec![in_app_payload(vec![], None)],
    );
    let second = timeout(Duration::from_secs(1), stream.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(second[0].source(), RemoteDataSource::App);
    assert_eq!(second[1].source(), RemoteDataSource::Contact);
    assert_eq!(
        serde_json::to_value(&second[1].remote_data_info).unwrap()["contact_id"],
        "c3"
    );
}

// ============================================================================
// Concurrent writers
// ============================================================================

const RACE_ROUNDS: usize = 200;

/// Run `first` and `second` on two threads released together.
fn race<A, B>(first: A, second: B)
where
    A: FnOnce() + Send + 'static,
    B: FnOnce() + Send + 'static,
{
    let barrier = Arc::new(Barrier::new(2));
    let a = {
        let barrier = barrier.clone();
        thread::spawn(move || {
            barrier.wait();
            first();
        })
    };
    let b = thread::spawn(move || {
        barrier.wait();
        second();
    });
    a.join().unwrap();
    b.join().unwrap();
}

#[test]
fn outdated_notice_racing_refresh_leaves_fresh_info_up_to_date() {
    let old = app_info();
    let fresh = app_info().with_last_modified("Tue, 20 Oct 2026 08:00:00 GMT");

    for _ in 0..RACE_ROUNDS {
        let remote_data = Arc::new(InMemoryRemoteData::new());
        remote_data.apply_refresh(RemoteDataSource::App, old.clone(), vec![]);

        let notifier = (remote_data.clone(), old.clone());
        let refresher = (remote_data.clone(), fresh.clone());
        race(
            move || block_on(notifier.0.notify_outdated(&notifier.1)),
            move || refresher.0.apply_refresh(RemoteDataSource::App, refresher.1, vec![]),
        );

        assert_eq!(remote_data.current_info(RemoteDataSource::App), Some(fresh.clone()));
        assert_eq!(
            block_on(remote_data.status(RemoteDataSource::App)),
            FreshnessStatus::UpToDate
        );
    }
}

#[test]
fn concurrent_refreshes_publish_every_source() {
    for _ in 0..RACE_ROUNDS {
        let remote_data = Arc::new(InMemoryRemoteData::new());

        let app = remote_data.clone();
        let contact = remote_data.clone();
        race(
            move || {
                app.apply_refresh(
                    RemoteDataSource::App,
                    app_info(),
                    vec![in_app_payload(vec![], None)],
                )
            },
            move || {
                contact.apply_refresh(
                    RemoteDataSource::Contact,
                    contact_info("c4"),
                    vec![in_app_payload(vec![], None)],
                )
            },
        );

        let mut stream = remote_data.subscribe(&[IN_APP_MESSAGES_TYPE.to_string()]);
        let latest = block_on(stream.next()).unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].source(), RemoteDataSource::App);
        assert_eq!(latest[1].source(), RemoteDataSource::Contact);
    }
}
