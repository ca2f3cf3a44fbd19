use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use zillow_acquire::{Config, service};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        credentials = ?cfg.credentials(),
        cache_path = %cfg.cache_path.display(),
        use_cache = cfg.use_cache,
        loglevel = %cfg.loglevel
    );

    let outcome = service::acquire(&cfg, cfg.use_cache).await?;

    info!(
        cached = outcome.is_cached(),
        rows = outcome.dataset().len(),
        columns = ?zillow_acquire::HousingDataset::COLUMNS,
        "zillow dataset ready"
    );
    Ok(())
}
