//! Work screens against the in-process mock backend.
//!
//! Run with: cargo test --test work_flow_integration

#![cfg(feature = "mock-server")]

mod helpers;

use helpers::{anonymous, spawn_backend, toasts_of};
use museume::museume_types::{ImageUpload, RecordId, Work, WorkQuery};
use museume::notify::ToastSeverity;
use museume::store::WorkListKind;
use museume::{AddWorkForm, EditOutcome, EditWorkForm, FormError, ListBrowser, PublicWorks};

fn ids(works: &[Work]) -> Vec<RecordId> {
    works.iter().map(|w| w.id).collect()
}

fn image(name: &str) -> ImageUpload {
    ImageUpload::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
}

#[tokio::test]
async fn public_works_page_append_and_search_reset() {
    let backend = spawn_backend().await;
    let mut browser = ListBrowser::<PublicWorks>::new(backend.dispatcher.clone());

    browser.refresh().await.unwrap();
    assert_eq!(ids(&browser.items()), vec![1, 3]);
    assert!(browser.has_more());

    assert!(browser.see_more().await.unwrap());
    assert_eq!(ids(&browser.items()), vec![1, 3, 4, 5]);
    assert!(!browser.has_more());
    assert!(!browser.see_more().await.unwrap());

    browser.set_search("sunset").await.unwrap();
    assert_eq!(ids(&browser.items()), vec![4, 5]);
    assert_eq!(browser.query().page, 1);

    browser.clear_search().await.unwrap();
    assert_eq!(ids(&browser.items()), vec![1, 3]);

    assert!(backend.dispatcher.store().drain_toasts().is_empty());
}

#[tokio::test]
async fn delete_removes_work_from_every_list() {
    let backend = spawn_backend().await;
    let dispatcher = &backend.dispatcher;
    dispatcher.get_my_works(WorkQuery::page(1)).await.unwrap();
    dispatcher.get_public_works(WorkQuery::page(1)).await.unwrap();

    dispatcher.delete_work(1).await.unwrap();

    dispatcher.store().read(|s| {
        assert!(s.work.delete_work_res());
        assert_eq!(ids(s.work.list(WorkListKind::Mine).results()), vec![2]);
        assert_eq!(ids(s.work.list(WorkListKind::Public).results()), vec![3]);
        assert!(s.work.error().is_none());
    });

    let toasts = dispatcher.store().drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(
        toasts_of(&toasts, ToastSeverity::Success),
        vec!["Work deleted successfully".to_string()]
    );
    assert!(backend.state.data.read().await.works.iter().all(|w| w.id != 1));
}

#[tokio::test]
async fn concurrent_deletes_both_leave_the_lists() {
    let backend = spawn_backend().await;
    let dispatcher = &backend.dispatcher;
    dispatcher.get_my_works(WorkQuery::page(1)).await.unwrap();

    let (first, second) = futures::join!(dispatcher.delete_work(1), dispatcher.delete_work(2));
    first.unwrap();
    second.unwrap();

    dispatcher.store().read(|s| {
        assert!(s.work.list(WorkListKind::Mine).results().is_empty());
    });
    let toasts = dispatcher.store().drain_toasts();
    assert_eq!(toasts_of(&toasts, ToastSeverity::Success).len(), 2);
}

#[tokio::test]
async fn rejected_delete_keeps_lists_and_reports_server_message() {
    let backend = spawn_backend().await;
    let dispatcher = &backend.dispatcher;
    dispatcher.get_my_works(WorkQuery::page(1)).await.unwrap();

    let err = dispatcher.delete_work(99).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    dispatcher.store().read(|s| {
        assert!(!s.work.delete_work_res());
        assert_eq!(s.work.error(), Some("Work not found"));
        assert_eq!(ids(s.work.list(WorkListKind::Mine).results()), vec![1, 2]);
        assert!(!s.work.is_loading());
    });

    let toasts = dispatcher.store().drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts_of(&toasts, ToastSeverity::Error), vec!["Work not found".to_string()]);

    let err = dispatcher.delete_work(4).await.unwrap_err();
    assert_eq!(err.message(), "You can only delete your own works");
}

#[tokio::test]
async fn like_is_mirrored_and_feeds_the_collection() {
    let backend = spawn_backend().await;
    let dispatcher = &backend.dispatcher;
    dispatcher.get_public_works(WorkQuery::page(1)).await.unwrap();

    dispatcher.like_work(3).await.unwrap();
    dispatcher.store().read(|s| {
        let liked = &s.work.list(WorkListKind::Public).results()[1];
        assert_eq!(liked.id, 3);
        assert!(liked.is_liked_by_user);
        assert_eq!(liked.likes_count, 2);
    });
    assert!(dispatcher.store().drain_toasts().is_empty());

    dispatcher.get_my_collection(WorkQuery::page(1)).await.unwrap();
    dispatcher.store().read(|s| {
        assert_eq!(ids(s.work.list(WorkListKind::Collection).results()), vec![3]);
    });

    let err = dispatcher.like_work(3).await.unwrap_err();
    assert_eq!(err.message(), "You have already liked this work");
    assert_eq!(dispatcher.store().drain_toasts().len(), 1);
}

#[tokio::test]
async fn toggle_like_refreshes_first_page_from_server() {
    let backend = spawn_backend().await;
    let mut browser = ListBrowser::<PublicWorks>::new(backend.dispatcher.clone());
    browser.refresh().await.unwrap();
    browser.see_more().await.unwrap();

    browser.toggle_like(1, false).await.unwrap();
    let items = browser.items();
    assert_eq!(ids(&items), vec![1, 3]);
    assert!(items[0].is_liked_by_user);
    assert_eq!(items[0].likes_count, 4);

    browser.toggle_like(1, true).await.unwrap();
    assert!(!browser.items()[0].is_liked_by_user);
}

#[tokio::test]
async fn member_lists_need_a_token() {
    let backend = spawn_backend().await;
    let dispatcher = anonymous(&backend);

    let err = dispatcher.get_my_works(WorkQuery::page(1)).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), "Authentication credentials were not provided.");

    dispatcher.get_public_works(WorkQuery::page(1)).await.unwrap();
}

#[tokio::test]
async fn add_work_form_respects_free_tier_and_submits() {
    let backend = spawn_backend().await;
    let mut form = AddWorkForm::new(backend.dispatcher.clone());
    form.load().await;

    assert!(form.gate().is_free_tier());
    assert_eq!(form.gate().account_images, 3);
    assert_eq!(form.gate().usage_label(), "Free plan: 3 / 5 images used");

    let rejected = form.attach(vec![image("a.png"), image("b.png"), image("c.png")]);
    assert!(matches!(rejected, Err(FormError::Attach(_))));
    assert!(form.images().is_empty());

    form.attach(vec![image("a.png"), image("b.png")]).unwrap();
    form.title = "Evening Tide".into();
    form.comments = "Acrylic".into();
    form.category = Some(1);
    form.select_tag(1);
    form.is_public = true;

    let work = form.submit().await.unwrap();
    assert_eq!(work.title.as_deref(), Some("Evening Tide"));
    assert_eq!(work.images_data.len(), 2);
    assert!(form.images().is_empty());
    assert!(form.title.is_empty());
    assert_eq!(form.gate().account_images, 5);
    assert!(form.gate().limit_reached());
    assert!(form.upload_disabled());
    assert!(form.attach(vec![image("f.png")]).is_err());

    let dispatcher = &backend.dispatcher;
    dispatcher.store().read(|s| {
        assert_eq!(s.work.add_work_res().map(|w| w.id), Some(work.id));
        assert_eq!(s.work.tags().len(), 3);
        assert_eq!(s.work.categories().len(), 3);
    });

    let toasts = dispatcher.store().drain_toasts();
    assert_eq!(toasts.len(), 2);
    assert!(toasts.iter().all(|t| t.severity == ToastSeverity::Warning));

    dispatcher.get_my_works(WorkQuery::page(1)).await.unwrap();
    dispatcher.store().read(|s| {
        assert_eq!(s.work.list(WorkListKind::Mine).results()[0].id, work.id);
        assert_eq!(s.work.list(WorkListKind::Mine).count(), 3);
    });
}

#[tokio::test]
async fn edit_form_updates_then_deletes_after_confirmation() {
    let backend = spawn_backend().await;
    let mut form = EditWorkForm::new(backend.dispatcher.clone());
    form.load(2).await.unwrap();
    assert_eq!(form.title, "Quiet Portrait");
    assert!(!form.is_public);

    form.title = "Quiet Portrait II".into();
    form.is_public = true;
    form.attach(vec![image("detail.png")]).unwrap();
    assert_eq!(form.submit().await.unwrap(), EditOutcome::Updated);

    {
        let data = backend.state.data.read().await;
        let stored = data.works.iter().find(|w| w.id == 2).unwrap();
        assert_eq!(stored.title.as_deref(), Some("Quiet Portrait II"));
        assert!(stored.is_public);
        assert_eq!(stored.images_data.len(), 2);
    }
    backend.dispatcher.store().read(|s| {
        assert!(!s.work.edit_res());
        assert_eq!(
            s.work.last_update().and_then(|u| u.work.as_ref()).map(|w| w.id),
            Some(2)
        );
    });

    assert_eq!(form.confirm_delete().await, Err(FormError::DeleteNotConfirmed));
    form.request_delete();
    assert_eq!(form.confirm_delete().await.unwrap(), EditOutcome::Deleted);
    assert!(backend.state.data.read().await.works.iter().all(|w| w.id != 2));

    let toasts = backend.dispatcher.store().drain_toasts();
    assert_eq!(
        toasts_of(&toasts, ToastSeverity::Success),
        vec![
            "Work updated successfully".to_string(),
            "Work deleted successfully".to_string()
        ]
    );
}

#[tokio::test]
async fn editing_a_missing_work_fails_to_load() {
    let backend = spawn_backend().await;
    let mut form = EditWorkForm::new(backend.dispatcher.clone());
    let err = form.load(42).await.unwrap_err();
    assert_eq!(err, FormError::Rejected("Work not found".into()));
    assert_eq!(form.validate(), Err(FormError::NotLoaded));
}
