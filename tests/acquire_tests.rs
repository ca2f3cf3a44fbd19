use std::{
    fs,
    path::PathBuf,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};
use zillow_acquire::{
    AcquireError, Acquirer, Acquisition, Config, CsvCache, HomeRecord, HousingDataset,
    HousingSource, db::ZILLOW_QUERY, service,
};

/// In-memory source that counts calls and remembers the last query.
struct StubSource {
    dataset: HousingDataset,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl StubSource {
    fn new(dataset: HousingDataset) -> Self {
        Self {
            dataset,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HousingSource for StubSource {
    async fn fetch(&self, query: &str) -> Result<HousingDataset, AcquireError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().expect("poisoned") = Some(query.to_string());
        Ok(self.dataset.clone())
    }
}

/// Source whose database is never reachable.
struct UnreachableSource;

impl HousingSource for UnreachableSource {
    async fn fetch(&self, _query: &str) -> Result<HousingDataset, AcquireError> {
        Err(AcquireError::Connection(sqlx::Error::PoolTimedOut))
    }
}

fn temp_cache_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "zillow-acquire-{tag}-{}-{}.csv",
        std::process::id(),
        nanos
    ));
    temp_path
}

fn sample_dataset() -> HousingDataset {
    HousingDataset::new(vec![
        HomeRecord {
            bedroom_count: Some(4.0),
            bath_count: Some(2.0),
            finished_sq_feet: Some(3633.0),
            home_value: Some(296_425.0),
            yearbuilt: Some(2005.0),
            fips: Some(6037.0),
        },
        HomeRecord {
            bedroom_count: Some(3.0),
            bath_count: Some(2.5),
            finished_sq_feet: None,
            home_value: Some(847_770.0),
            yearbuilt: None,
            fips: Some(6059.0),
        },
    ])
}

fn other_dataset() -> HousingDataset {
    HousingDataset::new(vec![HomeRecord {
        bedroom_count: Some(2.0),
        bath_count: Some(1.0),
        finished_sq_feet: Some(1010.0),
        home_value: Some(255_000.0),
        yearbuilt: Some(1951.0),
        fips: Some(6111.0),
    }])
}

#[tokio::test]
async fn fresh_environment_queries_and_returns_dataset() {
    let path = temp_cache_path("fresh");
    let acquirer = Acquirer::new(StubSource::new(sample_dataset()), CsvCache::new(&path));

    let outcome = acquirer.acquire(true).await.expect("acquire failed");

    assert_eq!(outcome, Acquisition::Fresh(sample_dataset()));
    assert_eq!(acquirer.source().calls(), 1);
    assert_eq!(
        acquirer.source().last_query.lock().expect("poisoned").as_deref(),
        Some(ZILLOW_QUERY)
    );
    assert!(path.exists(), "cache file should be written");

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn existing_cache_is_returned_without_database_calls() {
    let path = temp_cache_path("hit");
    CsvCache::new(&path)
        .store(&sample_dataset())
        .expect("seed cache failed");

    let acquirer = Acquirer::new(StubSource::new(other_dataset()), CsvCache::new(&path));
    let outcome = acquirer.acquire(true).await.expect("acquire failed");

    assert!(outcome.is_cached());
    assert_eq!(outcome.into_dataset(), sample_dataset());
    assert_eq!(acquirer.source().calls(), 0);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn disabled_cache_always_queries_and_overwrites() {
    let path = temp_cache_path("bypass");
    CsvCache::new(&path)
        .store(&sample_dataset())
        .expect("seed cache failed");

    let acquirer = Acquirer::new(StubSource::new(other_dataset()), CsvCache::new(&path));
    let first = acquirer.acquire(false).await.expect("acquire failed");
    let second = acquirer.acquire(false).await.expect("acquire failed");

    assert_eq!(first, Acquisition::Fresh(other_dataset()));
    assert_eq!(second, Acquisition::Fresh(other_dataset()));
    assert_eq!(acquirer.source().calls(), 2);
    assert_eq!(
        CsvCache::new(&path).load().expect("load failed"),
        other_dataset()
    );

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn second_run_reads_back_what_the_first_run_saved() {
    let path = temp_cache_path("roundtrip");
    let acquirer = Acquirer::new(StubSource::new(sample_dataset()), CsvCache::new(&path));

    let fresh = acquirer.acquire(true).await.expect("first acquire failed");
    let cached = acquirer.acquire(true).await.expect("second acquire failed");

    assert!(!fresh.is_cached());
    assert!(cached.is_cached());
    assert_eq!(fresh.dataset(), cached.dataset());
    assert_eq!(cached.dataset().len(), 2);
    assert_eq!(acquirer.source().calls(), 1);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn source_failure_propagates_and_leaves_no_cache() {
    let path = temp_cache_path("unreachable");
    let acquirer = Acquirer::new(UnreachableSource, CsvCache::new(&path));

    let err = acquirer.acquire(true).await.expect_err("should fail");

    assert!(matches!(err, AcquireError::Connection(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn corrupt_cache_is_reported_not_bypassed() {
    let path = temp_cache_path("corrupt");
    fs::write(&path, "bedroom_count,bath_count\nmany,two\n").expect("write failed");

    let acquirer = Acquirer::new(StubSource::new(sample_dataset()), CsvCache::new(&path));
    let err = acquirer.acquire(true).await.expect_err("should fail");

    assert!(matches!(err, AcquireError::CacheRead { .. }));
    assert_eq!(acquirer.source().calls(), 0);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn configured_cache_path_is_used_by_the_mysql_acquirer() {
    let path = temp_cache_path("configured");
    CsvCache::new(&path)
        .store(&sample_dataset())
        .expect("seed cache failed");

    // Nothing listens on this port, so any database access fails.
    let cfg = Config {
        user: "u".to_string(),
        password: "p".to_string(),
        host: "127.0.0.1:1".to_string(),
        cache_path: path.clone(),
        use_cache: true,
        loglevel: "info".to_string(),
    };

    assert_eq!(Acquirer::from_config(&cfg).cache().path(), path.as_path());

    let outcome = service::acquire(&cfg, cfg.use_cache)
        .await
        .expect("cache hit should not touch the database");
    assert_eq!(outcome, Acquisition::Cached(sample_dataset()));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn zero_byte_cache_is_reported() {
    let path = temp_cache_path("zero-byte");
    fs::write(&path, "").expect("write failed");

    let acquirer = Acquirer::new(StubSource::new(sample_dataset()), CsvCache::new(&path));
    let err = acquirer.acquire(true).await.expect_err("should fail");

    assert!(matches!(err, AcquireError::CacheRead { .. }));
    assert_eq!(acquirer.source().calls(), 0);

    let _ = fs::remove_file(&path);
}
