//! Record command handlers: upsert, query, get, delete, count.

use quiver_core::validation::validate_collection_name;
use quiver_core::{CancellationToken, Error, Metadata, MetadataFilter, Record};
use quiver_engine::Database;
use uuid::Uuid;

use crate::{Output, Result};

fn check_column_len<T>(column: &Option<Vec<T>>, what: &str, expected: usize) -> Result<()> {
    match column {
        Some(values) if values.len() != expected => Err(Error::InvalidArgument(format!(
            "{} has {} entries but ids has {}",
            what,
            values.len(),
            expected
        ))),
        _ => Ok(()),
    }
}

/// Handle Upsert
///
/// Returns every record id in request order, with generated ids filled in.
pub fn upsert(
    db: &Database,
    collection: &str,
    ids: Vec<String>,
    vectors: Vec<Vec<f32>>,
    metadatas: Option<Vec<Option<Metadata>>>,
    documents: Option<Vec<Option<String>>>,
) -> Result<Output> {
    validate_collection_name(collection)?;
    if ids.is_empty() {
        return Err(Error::InvalidArgument(
            "upsert requires at least one record".into(),
        ));
    }
    if vectors.len() != ids.len() {
        return Err(Error::InvalidArgument(format!(
            "vectors has {} entries but ids has {}",
            vectors.len(),
            ids.len()
        )));
    }
    check_column_len(&metadatas, "metadatas", ids.len())?;
    check_column_len(&documents, "documents", ids.len())?;

    let handle = db.registry().get(collection)?;

    let mut metadatas = metadatas.map(|m| m.into_iter());
    let mut documents = documents.map(|d| d.into_iter());
    let records: Vec<Record> = ids
        .into_iter()
        .zip(vectors)
        .map(|(id, vector)| {
            let id = if id.is_empty() {
                Uuid::new_v4().to_string()
            } else {
                id
            };
            Record {
                id,
                vector,
                metadata: metadatas.as_mut().and_then(|m| m.next()).flatten(),
                document: documents.as_mut().and_then(|d| d.next()).flatten(),
            }
        })
        .collect();

    let ids = records.iter().map(|r| r.id.clone()).collect();
    handle.upsert_batch(records)?;
    Ok(Output::Ids(ids))
}

/// Handle Query
pub fn query(
    db: &Database,
    collection: &str,
    query_vectors: &[Vec<f32>],
    k: usize,
    filter: Option<&MetadataFilter>,
    cancel: &CancellationToken,
) -> Result<Output> {
    validate_collection_name(collection)?;
    if query_vectors.is_empty() {
        return Err(Error::InvalidArgument(
            "query requires at least one query vector".into(),
        ));
    }

    let handle = db.registry().get(collection)?;
    let results = query_vectors
        .iter()
        .map(|q| handle.query(q, k, filter, cancel))
        .collect::<Result<Vec<_>>>()?;
    Ok(Output::QueryResults(results))
}

/// Handle GetRecords
pub fn get(db: &Database, collection: &str, ids: &[String]) -> Result<Output> {
    validate_collection_name(collection)?;
    let handle = db.registry().get(collection)?;
    Ok(Output::Records(handle.get(ids)?))
}

/// Handle DeleteRecords
///
/// With `strict`, any absent id fails the whole call with `NotFound`.
pub fn delete(db: &Database, collection: &str, ids: &[String], strict: bool) -> Result<Output> {
    validate_collection_name(collection)?;
    let handle = db.registry().get(collection)?;
    let removed = handle.delete_batch(ids, strict)?;
    Ok(Output::Count(removed as u64))
}

/// Handle Count
pub fn count(db: &Database, collection: &str) -> Result<Output> {
    validate_collection_name(collection)?;
    let handle = db.registry().get(collection)?;
    Ok(Output::Count(handle.count()? as u64))
}
