//! Catalog persistence.
//!
//! The whole catalog is one JSON document, `{"products": [<record>, ...]}`,
//! rewritten wholesale on every save. Storage backends only move documents;
//! record decoding and store mutation stay in [`crate::Inventory`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use stockroom_core::DomainError;

/// Errors raised while reading or writing a catalog.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// On-disk catalog document. Records stay untyped until the inventory decodes
/// them one at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub products: Vec<JsonValue>,
}

impl CatalogDocument {
    /// Pretty JSON with four-space indentation.
    pub fn encode(&self) -> Result<String, StorageError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Parse a document. Syntax errors and a missing `products` array are
    /// reported as invalid product data.
    pub fn decode(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::invalid_data(format!("malformed catalog document: {e}")))
    }
}

/// Backend that stores exactly one catalog document.
pub trait CatalogStorage {
    fn read_document(&self) -> Result<CatalogDocument, StorageError>;

    /// Replace whatever was stored before with `document`.
    fn write_document(&self, document: &CatalogDocument) -> Result<(), StorageError>;
}

impl<S> CatalogStorage for &S
where
    S: CatalogStorage + ?Sized,
{
    fn read_document(&self) -> Result<CatalogDocument, StorageError> {
        (**self).read_document()
    }

    fn write_document(&self, document: &CatalogDocument) -> Result<(), StorageError> {
        (**self).write_document(document)
    }
}

/// A single JSON file, overwritten in place on every write.
///
/// The write is not atomic: a crash mid-write can leave a truncated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStorage for JsonFileStorage {
    fn read_document(&self) -> Result<CatalogDocument, StorageError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(CatalogDocument::decode(&raw)?)
    }

    fn write_document(&self, document: &CatalogDocument) -> Result<(), StorageError> {
        let encoded = document.encode()?;
        fs::write(&self.path, encoded).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory storage for tests/dev. Holds the encoded text so reads go through
/// the same decoding path as files.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStorage {
    inner: RwLock<Option<String>>,
}

impl InMemoryCatalogStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the storage with raw document text.
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(raw.into())),
        }
    }

    /// Raw text of the last write, if any.
    pub fn contents(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CatalogStorage for InMemoryCatalogStorage {
    fn read_document(&self) -> Result<CatalogDocument, StorageError> {
        match self.contents() {
            Some(raw) => Ok(CatalogDocument::decode(&raw)?),
            None => Err(StorageError::Read {
                path: PathBuf::from("<memory>"),
                source: io::Error::new(io::ErrorKind::NotFound, "no catalog has been written"),
            }),
        }
    }

    fn write_document(&self, document: &CatalogDocument) -> Result<(), StorageError> {
        let encoded = document.encode()?;
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(encoded);
        Ok(())
    }
}
