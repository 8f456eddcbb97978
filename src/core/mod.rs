//! Core module containing the domain records, errors and store traits

pub mod entity;
pub mod error;
pub mod id;
pub mod service;

pub use entity::{NewAuthoredPost, NewDraft, NewUser, Post, PostFilter, User};
pub use error::{
    ApiError, ApiResult, ConfigError, EntityError, StorageError, ValidationError,
};
pub use id::parse_id;
pub use service::{BlogStore, PostService, UserService};
