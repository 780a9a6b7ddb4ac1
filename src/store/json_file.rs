//! File-backed collection store.
//!
//! The collection is one pretty-printed JSON array. A save writes the new
//! contents to `<file>.tmp` beside the target and renames it over the target,
//! so readers see either the old collection or the new one.

use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{CollectionStore, StoreError};

pub struct JsonFileCollection<T> {
    path: PathBuf,
    _items: PhantomData<fn() -> T>,
}

impl<T> JsonFileCollection<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileCollection {
            path: path.into(),
            _items: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl<T> CollectionStore<T> for JsonFileCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(items)?;
        let staging = self.staging_path();

        let write = || -> io::Result<()> {
            let mut file = fs::File::create(&staging)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
            fs::rename(&staging, &self.path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&staging);
            self.io_error(e)
        })?;

        tracing::debug!(path = %self.path.display(), items = items.len(), "collection saved");
        Ok(())
    }
}
