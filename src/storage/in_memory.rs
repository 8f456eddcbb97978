//! In-memory implementation of the store traits for testing and development

use crate::core::{
    ApiResult, EntityError, NewDraft, NewUser, Post, PostFilter, PostService, StorageError, User,
    UserService,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Both tables live behind one lock so that multi-row writes are atomic.
#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    next_user_id: i64,
    next_post_id: i64,
}

impl Tables {
    fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }

    fn allocate_user_id(&mut self) -> i64 {
        self.next_user_id += 1;
        self.next_user_id
    }

    fn allocate_post_id(&mut self) -> i64 {
        self.next_post_id += 1;
        self.next_post_id
    }
}

/// In-memory store implementation
///
/// Useful for testing and development. Uses a single RwLock over both tables;
/// every write holds it for the whole operation, which gives nested creates
/// their all-or-nothing behavior and makes the email uniqueness check
/// race-free. Ids start at 1 and increase per table.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ApiResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| {
            StorageError::LockPoisoned {
                kind: "read",
                message: e.to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> ApiResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| {
            StorageError::LockPoisoned {
                kind: "write",
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl UserService for InMemoryStore {
    async fn find_user(&self, id: i64) -> ApiResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        Ok(self.read()?.user_by_email(email).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> ApiResult<User> {
        let mut tables = self.write()?;

        if tables.user_by_email(&new_user.email).is_some() {
            return Err(EntityError::already_exists("User", "email", &new_user.email).into());
        }

        let user = User {
            id: tables.allocate_user_id(),
            email: new_user.email,
            name: new_user.name,
        };
        tables.users.insert(user.id, user.clone());

        for nested in new_user.posts {
            let post = Post {
                id: tables.allocate_post_id(),
                title: nested.title,
                content: nested.content,
                published: nested.published,
                author_id: Some(user.id),
            };
            tables.posts.insert(post.id, post);
        }

        tracing::debug!(user_id = user.id, "created user");
        Ok(user)
    }

    async fn connect_post(&self, email: &str, post_id: i64) -> ApiResult<User> {
        let mut tables = self.write()?;

        let user = tables
            .user_by_email(email)
            .cloned()
            .ok_or_else(|| EntityError::not_found("User", "email", email))?;

        let post = tables
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| EntityError::not_found("Post", "id", post_id))?;
        post.author_id = Some(user.id);

        tracing::debug!(user_id = user.id, post_id, "connected post to user");
        Ok(user)
    }
}

#[async_trait]
impl PostService for InMemoryStore {
    async fn find_post(&self, id: i64) -> ApiResult<Option<Post>> {
        Ok(self.read()?.posts.get(&id).cloned())
    }

    async fn find_posts(&self, filter: &PostFilter) -> ApiResult<Vec<Post>> {
        Ok(self
            .read()?
            .posts
            .values()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect())
    }

    async fn create_draft(&self, draft: NewDraft) -> ApiResult<Post> {
        let mut tables = self.write()?;

        let author_id = match draft.author_email.as_deref() {
            Some(email) => Some(
                tables
                    .user_by_email(email)
                    .map(|u| u.id)
                    .ok_or_else(|| EntityError::not_found("User", "email", email))?,
            ),
            None => None,
        };

        let post = Post {
            id: tables.allocate_post_id(),
            title: draft.title,
            content: draft.content,
            published: false,
            author_id,
        };
        tables.posts.insert(post.id, post.clone());

        tracing::debug!(post_id = post.id, "created draft");
        Ok(post)
    }

    async fn publish_post(&self, id: i64) -> ApiResult<Post> {
        let mut tables = self.write()?;

        let post = tables
            .posts
            .get_mut(&id)
            .ok_or_else(|| EntityError::not_found("Post", "id", id))?;
        post.published = true;

        Ok(post.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ApiError, NewAuthoredPost};

    #[tokio::test]
    async fn test_ids_start_at_one_per_table() {
        let store = InMemoryStore::new();

        let user = store.create_user(NewUser::new("a@example.com")).await.unwrap();
        let post = store.create_draft(NewDraft::new("T")).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(post.id, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_stores_nothing() {
        let store = InMemoryStore::new();
        store
            .create_user(NewUser::new("a@example.com").with_name("First"))
            .await
            .unwrap();

        let err = store
            .create_user(
                NewUser::new("a@example.com")
                    .with_name("Second")
                    .with_post(NewAuthoredPost::new("orphan")),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Entity(EntityError::AlreadyExists { .. })
        ));
        assert!(
            store
                .find_posts(&PostFilter::default())
                .await
                .unwrap()
                .is_empty()
        );
        let user = store
            .find_user_by_email("a@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.name.as_deref(), Some("First"));
    }

    #[tokio::test]
    async fn test_draft_with_unknown_author_allocates_no_id() {
        let store = InMemoryStore::new();

        let err = store
            .create_draft(NewDraft::new("T").with_author_email("ghost@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let post = store.create_draft(NewDraft::new("T")).await.unwrap();
        assert_eq!(post.id, 1);
    }

    #[tokio::test]
    async fn test_connect_post_moves_author() {
        let store = InMemoryStore::new();
        let alice = store
            .create_user(NewUser::new("alice@example.com").with_post(NewAuthoredPost::new("A")))
            .await
            .unwrap();
        let bob = store.create_user(NewUser::new("bob@example.com")).await.unwrap();

        let posts = store
            .find_posts(&PostFilter::by_author(alice.id))
            .await
            .unwrap();
        assert_eq!(posts.len(), 1);

        store
            .connect_post("bob@example.com", posts[0].id)
            .await
            .unwrap();

        assert!(
            store
                .find_posts(&PostFilter::by_author(alice.id))
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            store
                .find_posts(&PostFilter::by_author(bob.id))
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_clones_share_tables() {
        let store = InMemoryStore::new();
        let other = store.clone();

        store.create_user(NewUser::new("a@example.com")).await.unwrap();

        assert!(
            other
                .find_user_by_email("a@example.com")
                .await
                .unwrap()
                .is_some()
        );
    }
}
