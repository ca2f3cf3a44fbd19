//! Local CSV snapshot of the last fetched dataset.

use crate::db::HomeRecord;
use crate::error::AcquireError;
use crate::types::HousingDataset;
use csv::{ReaderBuilder, WriterBuilder};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV cache at a fixed path: comma separated, header row, no index column.
#[derive(Debug, Clone)]
pub struct CsvCache {
    path: PathBuf,
}

impl CsvCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Parse the cache file. Rows are trusted as long as they decode.
    pub fn load(&self) -> Result<HousingDataset, AcquireError> {
        debug!(path = %self.path.display(), "loading cached dataset");
        let read_err = |source| AcquireError::CacheRead {
            path: self.path.clone(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(read_err)?;

        if reader.headers().map_err(read_err)?.is_empty() {
            return Err(read_err(csv::Error::from(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no header row",
            ))));
        }

        reader
            .deserialize::<HomeRecord>()
            .collect::<Result<HousingDataset, csv::Error>>()
            .map_err(read_err)
    }

    /// Overwrite the cache with `dataset`.
    ///
    /// Rows go to a sibling `.tmp` file first, which is then renamed over the
    /// target.
    pub fn store(&self, dataset: &HousingDataset) -> Result<(), AcquireError> {
        let tmp = self.temp_path();
        debug!(path = %tmp.display(), rows = dataset.len(), "writing dataset");

        if let Err(source) = write_csv(&tmp, dataset) {
            let _ = fs::remove_file(&tmp);
            return Err(AcquireError::CacheWrite {
                path: self.path.clone(),
                source,
            });
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(AcquireError::CacheWrite {
                path: self.path.clone(),
                source: e.into(),
            });
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("cache"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_csv(path: &Path, dataset: &HousingDataset) -> Result<(), csv::Error> {
    // Header written by hand so an empty dataset still yields a valid file.
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(HousingDataset::COLUMNS)?;
    for row in dataset.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
