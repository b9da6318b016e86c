//! Post workflow properties, including the end-to-end scenario from the
//! acceptance checklist: register, login, create with a 1 MB thumbnail,
//! delete, with the creator's post count moving 0 → 1 → 0.

use bytes::Bytes;
use domains::{AppError, Category, UploadedFile};
use integration_tests::TestEnv;
use services::PostDraft;

fn draft(title: &str) -> PostDraft {
    PostDraft {
        title: title.into(),
        category: "Technology".into(),
        description: "D".into(),
    }
}

fn thumbnail(bytes: &'static [u8]) -> UploadedFile {
    UploadedFile::new("thumb.png", Bytes::from_static(bytes))
}

#[tokio::test]
async fn created_post_reads_back_identically_and_bumps_the_count() {
    let env = TestEnv::new();
    let (alice, _) = env.signed_up_user("Alice", "a@x.com").await;

    let created = env
        .posts
        .create_post(alice, draft("T"), thumbnail(b"image"))
        .await
        .unwrap();

    let fetched = env.posts.get_post(created.id).await.unwrap();
    assert_eq!(fetched.title, "T");
    assert_eq!(fetched.category, Category::Technology);
    assert_eq!(fetched.description, "D");
    assert_eq!(fetched.thumbnail, created.thumbnail);
    assert_eq!(fetched.creator, alice);
    assert!(env.blobs.contains(&fetched.thumbnail));

    let profile = env.users.get_profile(alice).await.unwrap();
    assert_eq!(profile.post_count, 1);
}

#[tokio::test]
async fn delete_by_non_creator_changes_nothing() {
    let env = TestEnv::new();
    let (alice, _) = env.signed_up_user("Alice", "a@x.com").await;
    let (bob, _) = env.signed_up_user("Bob", "b@x.com").await;

    let post = env
        .posts
        .create_post(alice, draft("T"), thumbnail(b"image"))
        .await
        .unwrap();

    assert!(matches!(
        env.posts.delete_post(post.id, bob).await,
        Err(AppError::Forbidden(_))
    ));

    // Post, blob, and counter are all untouched.
    assert!(env.posts.get_post(post.id).await.is_ok());
    assert!(env.blobs.contains(&post.thumbnail));
    let alice_profile = env.users.get_profile(alice).await.unwrap();
    assert_eq!(alice_profile.post_count, 1);
}

#[tokio::test]
async fn delete_by_creator_removes_post_blob_and_count() {
    let env = TestEnv::new();
    let (alice, _) = env.signed_up_user("Alice", "a@x.com").await;
    let post = env
        .posts
        .create_post(alice, draft("T"), thumbnail(b"image"))
        .await
        .unwrap();

    env.posts.delete_post(post.id, alice).await.unwrap();

    assert!(matches!(
        env.posts.get_post(post.id).await,
        Err(AppError::NotFound(_, _))
    ));
    assert!(!env.blobs.contains(&post.thumbnail));
    let profile = env.users.get_profile(alice).await.unwrap();
    assert_eq!(profile.post_count, 0);
}

#[tokio::test]
async fn listings_filter_and_order_as_specified() {
    let env = TestEnv::new();
    let (alice, _) = env.signed_up_user("Alice", "a@x.com").await;
    let (bob, _) = env.signed_up_user("Bob", "b@x.com").await;

    let tech = env
        .posts
        .create_post(alice, draft("tech"), thumbnail(b"1"))
        .await
        .unwrap();
    let art = env
        .posts
        .create_post(
            bob,
            PostDraft {
                title: "art".into(),
                category: "Art".into(),
                description: "D".into(),
            },
            thumbnail(b"2"),
        )
        .await
        .unwrap();

    let all = env.posts.list_posts().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, art.id, "newest first");

    let tech_only = env.posts.list_by_category("technology").await.unwrap();
    assert_eq!(tech_only.len(), 1);
    assert_eq!(tech_only[0].id, tech.id);

    assert!(matches!(
        env.posts.list_by_category("Gardening").await,
        Err(AppError::Validation(_))
    ));

    let by_bob = env.posts.list_by_creator(bob).await.unwrap();
    assert_eq!(by_bob.len(), 1);
    assert_eq!(by_bob[0].id, art.id);
}

#[tokio::test]
async fn editing_with_a_new_thumbnail_swaps_the_blob() {
    let env = TestEnv::new();
    let (alice, _) = env.signed_up_user("Alice", "a@x.com").await;
    let post = env
        .posts
        .create_post(alice, draft("T"), thumbnail(b"old"))
        .await
        .unwrap();

    let updated = env
        .posts
        .edit_post(
            post.id,
            draft("T2"),
            Some(UploadedFile::new("new.png", Bytes::from_static(b"new"))),
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "T2");
    assert_ne!(updated.thumbnail, post.thumbnail);
    assert!(!env.blobs.contains(&post.thumbnail));
    assert!(env.blobs.contains(&updated.thumbnail));
}

#[tokio::test]
async fn editing_without_a_thumbnail_keeps_the_blob() {
    let env = TestEnv::new();
    let (alice, _) = env.signed_up_user("Alice", "a@x.com").await;
    let post = env
        .posts
        .create_post(alice, draft("T"), thumbnail(b"keep"))
        .await
        .unwrap();

    let updated = env.posts.edit_post(post.id, draft("T2"), None).await.unwrap();
    assert_eq!(updated.thumbnail, post.thumbnail);
    assert!(env.blobs.contains(&post.thumbnail));
}

#[tokio::test]
async fn full_scenario_register_login_create_delete() {
    let env = TestEnv::new();
    let profile = env
        .users
        .register(integration_tests::registration("Alice", "a@x.com", "secret1"))
        .await
        .unwrap();
    let session = env.users.login("a@x.com", "secret1").await.unwrap();
    assert_eq!(session.id, profile.id);

    let one_megabyte = vec![0u8; 1_000_000];
    let post = env
        .posts
        .create_post(
            session.id,
            draft("T"),
            UploadedFile::new("big.png", Bytes::from(one_megabyte)),
        )
        .await
        .unwrap();
    assert_eq!(post.creator, profile.id);
    assert_eq!(
        env.users.get_profile(profile.id).await.unwrap().post_count,
        1
    );

    env.posts.delete_post(post.id, profile.id).await.unwrap();
    assert_eq!(
        env.users.get_profile(profile.id).await.unwrap().post_count,
        0
    );
}
