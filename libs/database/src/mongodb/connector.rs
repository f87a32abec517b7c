use async_trait::async_trait;
use mongodb::{
    Client, Database,
    bson::doc,
    error::{Error as MongoError, ErrorKind},
    options::{ClientOptions, Credential},
};
use std::time::Duration;
use tracing::{info, instrument};

use super::StoreConfig;
use crate::common::{ConnectionError, RetryConfig, retry_if};
use crate::manager::Connector;

/// An authenticated client bound to the catalog database.
///
/// Cheap to clone; all clones share the driver's connection pool.
#[derive(Clone, Debug)]
pub struct StoreHandle {
    client: Client,
    database: Database,
}

impl StoreHandle {
    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn classify(err: MongoError) -> ConnectionError {
    match err.kind.as_ref() {
        ErrorKind::Authentication { .. } => ConnectionError::Authentication(err.to_string()),
        ErrorKind::InvalidArgument { .. } => ConnectionError::Configuration(err.to_string()),
        _ => ConnectionError::Unreachable(err.to_string()),
    }
}

/// Build driver options from a [`StoreConfig`].
pub async fn client_options(config: &StoreConfig) -> Result<ClientOptions, ConnectionError> {
    let mut options = ClientOptions::parse(&config.url).await.map_err(classify)?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    if let Some((username, password)) = config.credentials() {
        let mut credential = Credential::default();
        credential.username = Some(username.to_string());
        credential.password = Some(password.to_string());
        credential.source = config.namespace.clone();
        options.credential = Some(credential);
    }

    Ok(options)
}

/// Connect, authenticate and verify with a `ping` against the catalog database.
///
/// # Example
/// ```ignore
/// use database::mongodb::{StoreConfig, connect_from_config};
///
/// let config = StoreConfig::new("mongodb://localhost:27017", "catalog");
/// let handle = connect_from_config(&config).await?;
/// ```
#[instrument(skip(config), fields(database = %config.database))]
pub async fn connect_from_config(config: &StoreConfig) -> Result<StoreHandle, ConnectionError> {
    info!("Connecting to store at {}", config.url);

    let options = client_options(config).await?;
    let client = Client::with_options(options).map_err(classify)?;
    let database = client.database(&config.database);

    // Authentication happens lazily in the driver; the ping forces it.
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(classify)?;

    info!("Connected to store");
    Ok(StoreHandle { client, database })
}

/// [`Connector`] for the MongoDB-backed catalog store.
///
/// With a [`RetryConfig`], transient failures (unreachable server) are
/// retried with backoff; authentication and configuration errors are not.
#[derive(Clone, Debug)]
pub struct MongoConnector {
    config: StoreConfig,
    retry: Option<RetryConfig>,
}

impl MongoConnector {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            retry: None,
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = StoreHandle;

    async fn connect(&self) -> Result<StoreHandle, ConnectionError> {
        match self.retry.clone() {
            Some(retry) => {
                retry_if(
                    || connect_from_config(&self.config),
                    retry,
                    ConnectionError::is_retryable,
                )
                .await
            }
            None => connect_from_config(&self.config).await,
        }
    }

    async fn close(&self, handle: StoreHandle) {
        handle.client.shutdown().await;
    }
}
