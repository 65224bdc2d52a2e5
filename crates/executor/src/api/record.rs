//! Record operations on [`Quiver`].

use quiver_core::{MetadataFilter, Record, VectorMatch};

use super::{unexpected, Quiver};
use crate::{Command, Output, Result};

impl Quiver {
    /// Insert or replace records, all-or-nothing.
    ///
    /// Records with an empty id get a generated UUID. Returns the ids in
    /// input order.
    pub fn upsert(&self, collection: &str, records: Vec<Record>) -> Result<Vec<String>> {
        match self
            .executor
            .execute(Command::upsert_records(collection, records))?
        {
            Output::Ids(ids) => Ok(ids),
            _ => Err(unexpected("Upsert")),
        }
    }

    /// Nearest-neighbor query, one ranked list per query vector.
    pub fn query(
        &self,
        collection: &str,
        query_vectors: Vec<Vec<f32>>,
        k: usize,
        filter: Option<MetadataFilter>,
    ) -> Result<Vec<Vec<VectorMatch>>> {
        match self.executor.execute(Command::Query {
            collection: collection.to_string(),
            query_vectors,
            k,
            filter,
        })? {
            Output::QueryResults(results) => Ok(results),
            _ => Err(unexpected("Query")),
        }
    }

    /// Fetch records by id; absent ids are skipped.
    pub fn get_records(&self, collection: &str, ids: &[&str]) -> Result<Vec<Record>> {
        match self.executor.execute(Command::GetRecords {
            collection: collection.to_string(),
            ids: ids.iter().map(|id| id.to_string()).collect(),
        })? {
            Output::Records(records) => Ok(records),
            _ => Err(unexpected("GetRecords")),
        }
    }

    /// Delete records by id; returns how many were removed.
    pub fn delete_records(&self, collection: &str, ids: &[&str]) -> Result<u64> {
        match self.executor.execute(Command::DeleteRecords {
            collection: collection.to_string(),
            ids: ids.iter().map(|id| id.to_string()).collect(),
        })? {
            Output::Count(removed) => Ok(removed),
            _ => Err(unexpected("DeleteRecords")),
        }
    }

    /// Number of records in a collection.
    pub fn count(&self, collection: &str) -> Result<u64> {
        match self.executor.execute(Command::Count {
            collection: collection.to_string(),
        })? {
            Output::Count(n) => Ok(n),
            _ => Err(unexpected("Count")),
        }
    }
}
