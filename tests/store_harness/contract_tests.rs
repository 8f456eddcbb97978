//! Macro-generated test suite for `BlogStore` contract validation.
//!
//! # Generated Tests
//!
//! ## Users
//! - `test_create_user_without_posts`: name stays absent, id starts at 1
//! - `test_nested_create`: posts get the new author and default to unpublished
//! - `test_duplicate_email_rejected`: no user or post is written
//! - `test_concurrent_duplicate_creates`: exactly one create wins
//! - `test_find_user_by_email`
//!
//! ## Posts
//! - `test_draft_without_author`
//! - `test_draft_with_author`
//! - `test_draft_with_unknown_author`
//! - `test_feed_filter_and_order`
//! - `test_publish_is_idempotent`
//! - `test_publish_unknown_post`
//!
//! ## Relations
//! - `test_connect_post_reassigns_author`
//! - `test_connect_post_unknown_user`
//! - `test_connect_post_unknown_post`

/// Generate a full `BlogStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store. It is re-evaluated for
/// each test to ensure isolation.
#[macro_export]
macro_rules! store_contract_tests {
    ($factory:expr) => {
        mod store_contract_tests {
            use super::*;
            use postboard::core::{NewDraft, NewUser, PostFilter, PostService, UserService};

            // ==================================================================
            // Users
            // ==================================================================

            #[tokio::test]
            async fn test_create_user_without_posts() {
                let store = $factory;

                let user = store.create_user(bob()).await.unwrap();
                assert_eq!(user.id, 1);
                assert_eq!(user.email, "bob@example.com");
                assert!(user.name.is_none());

                let posts = store.find_posts(&PostFilter::by_author(user.id)).await.unwrap();
                assert!(posts.is_empty());
            }

            #[tokio::test]
            async fn test_nested_create() {
                let store = $factory;

                let alice = store.create_user(alice_with_posts()).await.unwrap();
                assert_eq!(alice.name.as_deref(), Some("Alice"));

                let posts = store.find_posts(&PostFilter::by_author(alice.id)).await.unwrap();
                assert_eq!(posts.len(), 2);
                assert_ascending_ids(&posts);
                assert!(posts.iter().all(|p| p.author_id == Some(alice.id)));

                assert_eq!(posts[0].title, "Join the Slack");
                assert!(posts[0].published);
                assert_eq!(posts[1].title, "Work in progress");
                assert!(!posts[1].published);
                assert!(posts[1].content.is_none());
            }

            #[tokio::test]
            async fn test_duplicate_email_rejected() {
                let store = $factory;
                store.create_user(bob()).await.unwrap();

                let err = store
                    .create_user(
                        NewUser::new("bob@example.com")
                            .with_post(postboard::core::NewAuthoredPost::new("Never stored")),
                    )
                    .await
                    .unwrap_err();

                assert_eq!(err.error_code(), "ENTITY_ALREADY_EXISTS");
                let details = err.details().unwrap();
                assert_eq!(details["entityType"], "User");
                assert_eq!(details["field"], "email");

                let all = store.find_posts(&PostFilter::default()).await.unwrap();
                assert!(all.is_empty(), "failed nested create must not leave posts");
            }

            #[tokio::test]
            async fn test_concurrent_duplicate_creates() {
                let store = $factory;

                let attempts = (0..8).map(|_| store.create_user(NewUser::new("race@example.com")));
                let results = futures::future::join_all(attempts).await;

                let created = results.iter().filter(|r| r.is_ok()).count();
                assert_eq!(created, 1, "exactly one create should succeed");
                for err in results.iter().filter_map(|r| r.as_ref().err()) {
                    assert_eq!(err.error_code(), "ENTITY_ALREADY_EXISTS");
                }
            }

            #[tokio::test]
            async fn test_find_user_by_email() {
                let store = $factory;
                let bob = store.create_user(bob()).await.unwrap();

                let found = store.find_user_by_email("bob@example.com").await.unwrap();
                assert_eq!(found, Some(bob.clone()));

                let by_id = store.find_user(bob.id).await.unwrap();
                assert_eq!(by_id, Some(bob));

                assert!(store.find_user_by_email("nobody@example.com").await.unwrap().is_none());
                assert!(store.find_user(999).await.unwrap().is_none());
            }

            // ==================================================================
            // Posts
            // ==================================================================

            #[tokio::test]
            async fn test_draft_without_author() {
                let store = $factory;

                let draft = store.create_draft(orphan_draft("Untitled")).await.unwrap();
                assert_eq!(draft.id, 1);
                assert!(!draft.published);
                assert!(draft.author_id.is_none());
                assert_eq!(draft.content.as_deref(), Some("lorem ipsum"));

                assert_eq!(store.find_post(draft.id).await.unwrap(), Some(draft));
            }

            #[tokio::test]
            async fn test_draft_with_author() {
                let store = $factory;
                let bob = store.create_user(bob()).await.unwrap();

                let draft = store
                    .create_draft(NewDraft::new("Hello").with_author_email("bob@example.com"))
                    .await
                    .unwrap();

                assert_eq!(draft.author_id, Some(bob.id));
                assert!(draft.content.is_none());
            }

            #[tokio::test]
            async fn test_draft_with_unknown_author() {
                let store = $factory;

                let err = store
                    .create_draft(NewDraft::new("Hello").with_author_email("ghost@example.com"))
                    .await
                    .unwrap_err();
                assert_not_found(&err, "User", "email");

                let all = store.find_posts(&PostFilter::default()).await.unwrap();
                assert!(all.is_empty());
            }

            #[tokio::test]
            async fn test_feed_filter_and_order() {
                let store = $factory;
                store.create_user(alice_with_posts()).await.unwrap();
                let draft = store.create_draft(orphan_draft("Later")).await.unwrap();
                store.publish_post(draft.id).await.unwrap();
                store.create_draft(orphan_draft("Hidden")).await.unwrap();

                let feed = store.find_posts(&PostFilter::published()).await.unwrap();
                let titles: Vec<&str> = feed.iter().map(|p| p.title.as_str()).collect();
                assert_eq!(titles, vec!["Join the Slack", "Later"]);
                assert_ascending_ids(&feed);

                let all = store.find_posts(&PostFilter::default()).await.unwrap();
                assert_eq!(all.len(), 4);
                assert_ascending_ids(&all);
            }

            #[tokio::test]
            async fn test_publish_is_idempotent() {
                let store = $factory;
                let draft = store.create_draft(orphan_draft("Draft")).await.unwrap();

                let first = store.publish_post(draft.id).await.unwrap();
                assert!(first.published);
                assert_eq!(first.title, "Draft");

                let second = store.publish_post(draft.id).await.unwrap();
                assert_eq!(first, second);
            }

            #[tokio::test]
            async fn test_publish_unknown_post() {
                let store = $factory;

                let err = store.publish_post(42).await.unwrap_err();
                assert_not_found(&err, "Post", "id");
            }

            // ==================================================================
            // Relations
            // ==================================================================

            #[tokio::test]
            async fn test_connect_post_reassigns_author() {
                let store = $factory;
                let alice = store.create_user(alice_with_posts()).await.unwrap();
                let bob = store.create_user(bob()).await.unwrap();
                let alice_posts = store.find_posts(&PostFilter::by_author(alice.id)).await.unwrap();
                let moved = alice_posts[0].id;

                let user = store.connect_post("bob@example.com", moved).await.unwrap();
                assert_eq!(user, bob);

                let post = store.find_post(moved).await.unwrap().unwrap();
                assert_eq!(post.author_id, Some(bob.id));

                let remaining = store.find_posts(&PostFilter::by_author(alice.id)).await.unwrap();
                assert_eq!(remaining.len(), 1);
            }

            #[tokio::test]
            async fn test_connect_post_unknown_user() {
                let store = $factory;
                let draft = store.create_draft(orphan_draft("Draft")).await.unwrap();

                let err = store
                    .connect_post("ghost@example.com", draft.id)
                    .await
                    .unwrap_err();
                assert_not_found(&err, "User", "email");

                let post = store.find_post(draft.id).await.unwrap().unwrap();
                assert!(post.author_id.is_none());
            }

            #[tokio::test]
            async fn test_connect_post_unknown_post() {
                let store = $factory;
                store.create_user(bob()).await.unwrap();

                let err = store.connect_post("bob@example.com", 7).await.unwrap_err();
                assert_not_found(&err, "Post", "id");
            }
        }
    };
}
