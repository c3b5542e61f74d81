use std::sync::Arc;

use crate::clients::nlu::{NluClient, SentimentAnalyzer};
use crate::config::Config;
use crate::db::Store;
use crate::services::{CatalogService, DealerDirectory, ReviewService, SeaOrmCatalogService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
pub(crate) fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("dealership/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub dealers: Arc<DealerDirectory>,

    pub reviews: Arc<ReviewService>,

    pub catalog: Arc<dyn CatalogService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.dealerships.request_timeout_seconds)?;
        let sentiment: Arc<dyn SentimentAnalyzer> =
            Arc::new(NluClient::new(http_client.clone(), config.nlu.clone()));

        Self::init(config, http_client, sentiment).await
    }

    /// Same as [`SharedState::new`] but with a caller-supplied sentiment analyzer.
    pub async fn with_sentiment(
        config: Config,
        sentiment: Arc<dyn SentimentAnalyzer>,
    ) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.dealerships.request_timeout_seconds)?;
        Self::init(config, http_client, sentiment).await
    }

    async fn init(
        config: Config,
        http_client: reqwest::Client,
        sentiment: Arc<dyn SentimentAnalyzer>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let dealers = Arc::new(DealerDirectory::new(
            http_client.clone(),
            config.dealerships.dealers_url.clone(),
        ));

        let reviews = Arc::new(ReviewService::new(
            http_client,
            config.dealerships.reviews_url.clone(),
            sentiment,
        ));

        let catalog: Arc<dyn CatalogService> = Arc::new(SeaOrmCatalogService::new(store.clone()));

        Ok(Self {
            config: Arc::new(config),
            store,
            dealers,
            reviews,
            catalog,
        })
    }
}
