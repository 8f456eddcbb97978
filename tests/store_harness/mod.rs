//! Shared test harness for store backend testing
//!
//! Provides sample inputs plus the `store_contract_tests!` macro, which
//! validates any `BlogStore` implementation against the shared contract.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//!
//! store_contract_tests!(InMemoryStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod contract_tests;

use postboard::core::{ApiError, NewAuthoredPost, NewDraft, NewUser, Post};

/// Alice with one published and one unpublished nested post
pub fn alice_with_posts() -> NewUser {
    NewUser::new("alice@example.com")
        .with_name("Alice")
        .with_post(
            NewAuthoredPost::new("Join the Slack")
                .with_content("https://slack.example.com")
                .published(true),
        )
        .with_post(NewAuthoredPost::new("Work in progress"))
}

/// Bob with no name and no posts
pub fn bob() -> NewUser {
    NewUser::new("bob@example.com")
}

/// A draft with no author
pub fn orphan_draft(title: &str) -> NewDraft {
    NewDraft::new(title).with_content("lorem ipsum")
}

/// Assert an error is an entity-not-found for the given type and field
pub fn assert_not_found(err: &ApiError, entity_type: &str, field: &str) {
    assert_eq!(err.error_code(), "ENTITY_NOT_FOUND", "unexpected error: {}", err);

    let details = err.details().expect("not-found errors carry details");
    assert_eq!(details["entityType"], entity_type);
    assert_eq!(details["field"], field);
}

/// Assert ids are strictly ascending
pub fn assert_ascending_ids(posts: &[Post]) {
    assert!(
        posts.windows(2).all(|w| w[0].id < w[1].id),
        "posts should be ordered by id: {:?}",
        posts.iter().map(|p| p.id).collect::<Vec<_>>()
    );
}
