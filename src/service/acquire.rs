use crate::cache::CsvCache;
use crate::config::Config;
use crate::db::{MySqlSource, ZILLOW_QUERY};
use crate::error::AcquireError;
use crate::types::HousingDataset;
use tracing::info;

/// Executes SQL and returns the resulting rows as a dataset.
pub trait HousingSource: Send + Sync {
    fn fetch(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<HousingDataset, AcquireError>> + Send;
}

/// Where an acquired dataset came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Acquisition {
    /// Parsed from the local cache file; the database was not touched.
    Cached(HousingDataset),
    /// Queried from the database and written to the cache file.
    Fresh(HousingDataset),
}

impl Acquisition {
    pub fn dataset(&self) -> &HousingDataset {
        match self {
            Acquisition::Cached(ds) | Acquisition::Fresh(ds) => ds,
        }
    }

    pub fn into_dataset(self) -> HousingDataset {
        match self {
            Acquisition::Cached(ds) | Acquisition::Fresh(ds) => ds,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Acquisition::Cached(_))
    }
}

/// Cache-first acquisition of the zillow dataset.
pub struct Acquirer<S> {
    source: S,
    cache: CsvCache,
}

impl Acquirer<MySqlSource> {
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            MySqlSource::new(cfg.credentials()),
            CsvCache::new(&cfg.cache_path),
        )
    }
}

impl<S: HousingSource> Acquirer<S> {
    pub fn new(source: S, cache: CsvCache) -> Self {
        Self { source, cache }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &CsvCache {
        &self.cache
    }

    /// Return the dataset, reading the cache file when `use_cache` is set and
    /// the file exists. Otherwise query the database and overwrite the cache.
    pub async fn acquire(&self, use_cache: bool) -> Result<Acquisition, AcquireError> {
        if use_cache && self.cache.exists() {
            info!(
                path = %self.cache.path().display(),
                "Status: Acquiring data from cached csv file.."
            );
            return self.cache.load().map(Acquisition::Cached);
        }

        info!("Status: Acquiring data from SQL database..");
        let dataset = self.source.fetch(ZILLOW_QUERY).await?;

        info!(
            path = %self.cache.path().display(),
            rows = dataset.len(),
            "Status: Saving zillow data locally.."
        );
        self.cache.store(&dataset)?;

        Ok(Acquisition::Fresh(dataset))
    }
}

/// Acquire using the MySQL source and cache path from `cfg`.
pub async fn acquire(cfg: &Config, use_cache: bool) -> Result<Acquisition, AcquireError> {
    Acquirer::from_config(cfg).acquire(use_cache).await
}
