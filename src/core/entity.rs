//! Domain records for users and posts
//!
//! These are the rows the store hands back. They carry foreign keys, not
//! object graphs: a [`Post`] knows its `author_id`, and a user's posts are
//! always fetched separately through the store.

use serde::{Deserialize, Serialize};

/// A persisted user.
///
/// `email` is unique across all users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
}

/// A persisted post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: Option<i64>,
}

impl Post {
    /// A post that has not been published yet
    pub fn is_draft(&self) -> bool {
        !self.published
    }
}

/// Payload for creating a user, optionally with posts created in the same
/// atomic operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub posts: Vec<NewAuthoredPost>,
}

impl NewUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_post(mut self, post: NewAuthoredPost) -> Self {
        self.posts.push(post);
        self
    }
}

/// A post created together with its author.
///
/// An absent `published` flag on the wire becomes `false` here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewAuthoredPost {
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
}

impl NewAuthoredPost {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }
}

/// Payload for creating a draft post.
///
/// Drafts are always stored with `published = false`. When `author_email`
/// is set, the post is connected to the existing user with that email.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewDraft {
    pub title: String,
    pub content: Option<String>,
    pub author_email: Option<String>,
}

impl NewDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_author_email(mut self, email: impl Into<String>) -> Self {
        self.author_email = Some(email.into());
        self
    }
}

/// Filter for `find_posts`. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub published: Option<bool>,
    pub author_id: Option<i64>,
}

impl PostFilter {
    /// Posts visible in the public feed
    pub fn published() -> Self {
        Self {
            published: Some(true),
            ..Default::default()
        }
    }

    /// Posts written by the given user
    pub fn by_author(author_id: i64) -> Self {
        Self {
            author_id: Some(author_id),
            ..Default::default()
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.published.is_none_or(|p| post.published == p)
            && self.author_id.is_none_or(|a| post.author_id == Some(a))
    }
}
