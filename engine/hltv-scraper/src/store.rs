//! JSON array files holding scraped collections
//!
//! A collection is read once at the start of a run and overwritten in full
//! at the end. Files are pretty-printed with four-space indentation.

use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;
use tracing::{error, info};

/// Read a collection, distinguishing a missing file from a corrupt one
pub async fn try_load_collection<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<Option<Vec<T>>, StoreError> {
    let path = path.as_ref();
    if !tokio::fs::try_exists(path).await? {
        return Ok(None);
    }

    let content = tokio::fs::read_to_string(path).await?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Read a collection, starting empty when the file is missing or unreadable
///
/// Valid JSON whose records do not decode as `T` counts as unreadable, so
/// the next write replaces it.
pub async fn load_collection<T: DeserializeOwned>(path: impl AsRef<Path>) -> Vec<T> {
    let path = path.as_ref();
    match try_load_collection(path).await {
        Ok(Some(records)) => {
            info!("Loaded {} existing records from {:?}", records.len(), path);
            records
        }
        Ok(None) => {
            info!("No existing file at {:?}; starting with an empty list", path);
            Vec::new()
        }
        Err(e) => {
            error!("Failed to load {:?}: {}; starting with an empty list", path, e);
            Vec::new()
        }
    }
}

/// Replace the file's contents with `records`
pub async fn write_collection<T: Serialize>(
    path: impl AsRef<Path>,
    records: &[T],
) -> Result<(), StoreError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let json = to_pretty_json(&records)?;
    tokio::fs::write(path, json).await?;
    info!("Saved {} records to {:?}", records.len(), path);
    Ok(())
}

/// Serialize with four-space indentation
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| serde_json::Error::custom(e.to_string()))
}
