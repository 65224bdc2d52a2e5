//! Collection operations on [`Quiver`].

use quiver_core::{CollectionInfo, CollectionOptions};

use super::{unexpected, Quiver};
use crate::{Command, Output, Result};

impl Quiver {
    /// Create a collection.
    ///
    /// # Errors
    /// - `AlreadyExists` if the name is taken
    /// - `InvalidArgument` for a malformed name or zero dimension
    pub fn create_collection(&self, name: &str, options: CollectionOptions) -> Result<CollectionInfo> {
        self.create(name, options, false)
    }

    /// Create a collection, or return the existing one.
    pub fn get_or_create_collection(
        &self,
        name: &str,
        options: CollectionOptions,
    ) -> Result<CollectionInfo> {
        self.create(name, options, true)
    }

    fn create(
        &self,
        name: &str,
        options: CollectionOptions,
        get_or_create: bool,
    ) -> Result<CollectionInfo> {
        match self.executor.execute(Command::CreateCollection {
            name: name.to_string(),
            options,
            get_or_create,
        })? {
            Output::Collection(info) => Ok(info),
            _ => Err(unexpected("CreateCollection")),
        }
    }

    /// Look up a collection.
    pub fn get_collection(&self, name: &str) -> Result<CollectionInfo> {
        match self.executor.execute(Command::GetCollection {
            name: name.to_string(),
        })? {
            Output::Collection(info) => Ok(info),
            _ => Err(unexpected("GetCollection")),
        }
    }

    /// Delete a collection and its records.
    ///
    /// # Errors
    /// - `NotFound` if absent
    pub fn delete_collection(&self, name: &str) -> Result<()> {
        match self.executor.execute(Command::DeleteCollection {
            name: name.to_string(),
        })? {
            Output::Unit => Ok(()),
            _ => Err(unexpected("DeleteCollection")),
        }
    }

    /// Delete a collection if present; returns whether it was.
    pub fn delete_collection_if_exists(&self, name: &str) -> Result<bool> {
        match self.executor.execute(Command::DeleteCollectionIfExists {
            name: name.to_string(),
        })? {
            Output::Bool(existed) => Ok(existed),
            _ => Err(unexpected("DeleteCollectionIfExists")),
        }
    }

    /// Summaries of every collection, in creation order.
    pub fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        match self.executor.execute(Command::ListCollections)? {
            Output::Collections(infos) => Ok(infos),
            _ => Err(unexpected("ListCollections")),
        }
    }

    /// Names of every collection, in creation order.
    pub fn list_collection_names(&self) -> Result<Vec<String>> {
        Ok(self
            .list_collections()?
            .into_iter()
            .map(|info| info.name)
            .collect())
    }

    /// Check if a collection exists.
    pub fn collection_exists(&self, name: &str) -> Result<bool> {
        match self.executor.execute(Command::CollectionExists {
            name: name.to_string(),
        })? {
            Output::Bool(exists) => Ok(exists),
            _ => Err(unexpected("CollectionExists")),
        }
    }
}
