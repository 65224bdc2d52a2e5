//! Collection command handlers.

use quiver_core::validation::validate_collection_name;
use quiver_core::CollectionOptions;
use quiver_engine::Database;

use crate::{Output, Result};

/// Handle CreateCollection (and get-or-create)
pub fn create(
    db: &Database,
    name: &str,
    options: CollectionOptions,
    get_or_create: bool,
) -> Result<Output> {
    let registry = db.registry();
    let handle = if get_or_create {
        registry.get_or_create(name, options)?
    } else {
        registry.create(name, options)?
    };
    Ok(Output::Collection(handle.info()?))
}

/// Handle GetCollection
pub fn get(db: &Database, name: &str) -> Result<Output> {
    validate_collection_name(name)?;
    let handle = db.registry().get(name)?;
    Ok(Output::Collection(handle.info()?))
}

/// Handle DeleteCollection
pub fn delete(db: &Database, name: &str) -> Result<Output> {
    validate_collection_name(name)?;
    db.registry().delete(name)?;
    Ok(Output::Unit)
}

/// Handle DeleteCollectionIfExists
pub fn delete_if_exists(db: &Database, name: &str) -> Result<Output> {
    validate_collection_name(name)?;
    Ok(Output::Bool(db.registry().delete_if_exists(name)?))
}

/// Handle ListCollections
pub fn list(db: &Database) -> Result<Output> {
    Ok(Output::Collections(db.registry().list()?))
}

/// Handle CollectionExists
pub fn exists(db: &Database, name: &str) -> Result<Output> {
    validate_collection_name(name)?;
    Ok(Output::Bool(db.registry().exists(name)?))
}
