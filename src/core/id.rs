//! Identifier coercion
//!
//! Identifiers travel as opaque strings at the API boundary and as `i64`
//! keys in storage.

use crate::core::error::ValidationError;

/// Parse a boundary identifier into a storage key.
///
/// Accepts an optionally signed base-10 integer with no surrounding
/// whitespace; anything else is rejected with [`ValidationError::InvalidId`].
pub fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>().map_err(|_| ValidationError::InvalidId {
        value: raw.to_string(),
    })
}
