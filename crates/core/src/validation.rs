//! Input validation shared by the engine and the executor

use crate::error::{Error, Result};

/// Maximum collection name length in bytes
pub const MAX_COLLECTION_NAME_LEN: usize = 128;

/// Maximum record id length in bytes
pub const MAX_RECORD_ID_LEN: usize = 1024;

/// Validate a collection name
///
/// Rules:
/// - 1 to 128 bytes
/// - characters from `[A-Za-z0-9_.-]`
/// - starts and ends with an alphanumeric character
/// - no `..`
pub fn validate_collection_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidArgument(
            "collection name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_COLLECTION_NAME_LEN {
        return Err(Error::InvalidArgument(format!(
            "collection name exceeds {} bytes",
            MAX_COLLECTION_NAME_LEN
        )));
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
    {
        return Err(Error::InvalidArgument(format!(
            "collection name '{}' contains invalid character {:?}",
            name, c
        )));
    }

    let first = name.as_bytes()[0];
    let last = name.as_bytes()[name.len() - 1];
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(Error::InvalidArgument(format!(
            "collection name '{}' must start and end with a letter or digit",
            name
        )));
    }

    if name.contains("..") {
        return Err(Error::InvalidArgument(format!(
            "collection name '{}' cannot contain '..'",
            name
        )));
    }

    Ok(())
}

/// Validate a record id
pub fn validate_record_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidArgument("record id cannot be empty".to_string()));
    }
    if id.len() > MAX_RECORD_ID_LEN {
        return Err(Error::InvalidArgument(format!(
            "record id exceeds {} bytes",
            MAX_RECORD_ID_LEN
        )));
    }
    Ok(())
}

/// Validate a vector: non-empty, all components finite
pub fn validate_vector(vector: &[f32]) -> Result<()> {
    if vector.is_empty() {
        return Err(Error::InvalidArgument("vector cannot be empty".to_string()));
    }
    if let Some(pos) = vector.iter().position(|v| !v.is_finite()) {
        return Err(Error::InvalidArgument(format!(
            "vector component {} is not finite",
            pos
        )));
    }
    Ok(())
}

/// Validate a result count
pub fn validate_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(Error::InvalidArgument("k must be >= 1".to_string()));
    }
    Ok(())
}

/// Validate a dimension supplied at collection creation
pub fn validate_dimension(dimension: usize) -> Result<()> {
    if dimension == 0 {
        return Err(Error::InvalidArgument(
            "dimension must be > 0".to_string(),
        ));
    }
    Ok(())
}
