//! Contest and artist-class screens against the in-process mock backend.
//!
//! Run with: cargo test --test contest_flow_integration

#![cfg(feature = "mock-server")]

mod helpers;

use helpers::{spawn_backend, toasts_of};
use museume::museume_types::{ContestQuery, RecordId};
use museume::notify::ToastSeverity;
use museume::store::ContestListKind;
use museume::{ArtistClasses, Contests, ListBrowser, MyArtistClasses};

#[tokio::test]
async fn sunset_search_pages_then_narrows_by_status() {
    let backend = spawn_backend().await;
    let mut browser = ListBrowser::<Contests>::new(backend.dispatcher.clone());

    browser.set_search("sunset").await.unwrap();
    let names: Vec<_> = browser.items().iter().filter_map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["Sunset Colors", "Sunset Silhouettes"]);
    assert!(browser.has_more());

    assert!(browser.see_more().await.unwrap());
    let ids: Vec<RecordId> = browser.items().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(!browser.has_more());
    assert_eq!(browser.query().page, 2);

    browser
        .update_filters(|q| q.filter = "open".to_string())
        .await
        .unwrap();
    let ids: Vec<RecordId> = browser.items().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(browser.query().page, 1);
}

#[tokio::test]
async fn out_of_range_page_is_reported_once() {
    let backend = spawn_backend().await;
    let dispatcher = &backend.dispatcher;

    let err = dispatcher.get_contests(ContestQuery::page(9)).await.unwrap_err();
    assert_eq!(err.message(), "Invalid page.");
    assert_eq!(dispatcher.store().read(|s| s.contest.error().map(str::to_string)), Some("Invalid page.".into()));

    let toasts = dispatcher.store().drain_toasts();
    assert_eq!(toasts_of(&toasts, ToastSeverity::Error), vec!["Invalid page.".to_string()]);

    let err = dispatcher.get_contest_detail(77).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message(), "Contest not found");
}

#[tokio::test]
async fn submitting_a_work_enters_the_contest() {
    let backend = spawn_backend().await;
    let dispatcher = &backend.dispatcher;

    dispatcher.submit_contest_work(1, 1).await.unwrap();
    let err = dispatcher.submit_contest_work(1, 1).await.unwrap_err();
    assert_eq!(err.message(), "Work already submitted to this contest");
    let err = dispatcher.submit_contest_work(3, 1).await.unwrap_err();
    assert_eq!(err.message(), "This contest is closed");

    let toasts = dispatcher.store().drain_toasts();
    assert_eq!(toasts_of(&toasts, ToastSeverity::Success), vec!["Work submitted to contest".to_string()]);
    assert_eq!(toasts_of(&toasts, ToastSeverity::Error).len(), 2);

    dispatcher.get_my_contests(ContestQuery::page(1)).await.unwrap();
    dispatcher.store().read(|s| {
        let mine: Vec<RecordId> = s.contest.contests(ContestListKind::Mine).results().iter().map(|c| c.id).collect();
        assert_eq!(mine, vec![1]);
        assert!(s.contest.contests(ContestListKind::All).is_empty());
    });
}

#[tokio::test]
async fn class_filters_skip_unset_values() {
    let backend = spawn_backend().await;
    let mut browser = ListBrowser::<ArtistClasses>::new(backend.dispatcher.clone());

    browser.update_filters(|q| q.is_free = Some(false)).await.unwrap();
    let ids: Vec<RecordId> = browser.items().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 3]);

    browser.update_filters(|q| q.is_free = None).await.unwrap();
    assert_eq!(browser.items().len(), 2);
    assert!(browser.has_more());
}

#[tokio::test]
async fn free_class_signup_then_video_url() {
    let backend = spawn_backend().await;
    let dispatcher = &backend.dispatcher;

    let signup = dispatcher.artist_class_sign_up(1).await.unwrap();
    assert!(!signup.requires_payment());

    let video = dispatcher.get_artist_class_video_url(1).await.unwrap();
    assert_eq!(video.url.as_deref(), Some("https://video.mock/classes/1"));

    let err = dispatcher.artist_class_sign_up(1).await.unwrap_err();
    assert_eq!(err.message(), "You are already signed up for this class");

    let toasts = dispatcher.store().drain_toasts();
    assert_eq!(
        toasts_of(&toasts, ToastSeverity::Success),
        vec![
            "Signed up successfully".to_string(),
            "Video URL sent to your email".to_string()
        ]
    );

    let mut mine = ListBrowser::<MyArtistClasses>::new(dispatcher.clone());
    mine.refresh().await.unwrap();
    let names: Vec<_> = mine.items().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Watercolor Basics"]);

    let detail = dispatcher.get_artist_class_detail(1).await.unwrap();
    assert_eq!(detail.extra.get("is_signed_up"), Some(&serde_json::Value::Bool(true)));
}

#[tokio::test]
async fn paid_class_needs_confirmed_payment() {
    let backend = spawn_backend().await;
    let dispatcher = &backend.dispatcher;

    let signup = dispatcher.artist_class_sign_up(2).await.unwrap();
    assert!(signup.requires_payment());
    assert_eq!(signup.payment_intent_client_secret.as_deref(), Some("pi_mock_2_secret"));
    assert_eq!(signup.amount.map(|a| a.to_string()), Some("3000.00".to_string()));

    let err = dispatcher.get_artist_class_video_url(2).await.unwrap_err();
    assert_eq!(err.status(), Some(403));

    let err = dispatcher.confirm_payment("pi_other").await.unwrap_err();
    assert_eq!(err.message(), "Invalid payment intent");

    dispatcher.confirm_payment("pi_mock_2").await.unwrap();
    dispatcher.get_artist_class_video_url(2).await.unwrap();
    dispatcher.store().read(|s| {
        assert_eq!(
            s.contest.payment_res().and_then(|r| r.message.as_deref()),
            Some("Payment confirmed")
        );
        assert!(s.contest.video_url().is_some());
    });
}
