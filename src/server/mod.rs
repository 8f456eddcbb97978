//! HTTP server assembly
//!
//! `ServerBuilder` wires a store and a configuration into a `ServerHost`,
//! then exposes it over GraphQL plus a few plain REST routes.

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::{GraphQLExposure, RestExposure};
pub use host::ServerHost;
