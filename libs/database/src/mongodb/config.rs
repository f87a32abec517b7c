#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or_default, env_required};

/// Connection settings for the catalog store
///
/// # Example
///
/// ```ignore
/// use database::mongodb::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017", "catalog")
///     .with_credentials("root", "secret")
///     .with_namespace("admin");
///
/// // From environment variables (requires `config` feature)
/// let config = StoreConfig::from_env()?;
/// ```
#[derive(Clone)]
pub struct StoreConfig {
    /// Connection string, e.g. mongodb://host:27017
    pub url: String,

    /// Namespace the credentials are registered in (the authentication source)
    pub namespace: Option<String>,

    /// Database holding the product, brands and product_brand collections
    pub database: String,

    pub username: Option<String>,
    pub password: Option<String>,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            namespace: None,
            database: database.into(),
            username: None,
            password: None,
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 5,
            server_selection_timeout_secs: 5,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Username and password, only when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("app_name", &self.app_name)
            .field("max_pool_size", &self.max_pool_size)
            .field("min_pool_size", &self.min_pool_size)
            .finish()
    }
}

/// Load StoreConfig from environment variables
///
/// - `DB_URL` (required)
/// - `DB_NAMESPACE` (required) - authentication source for the credentials
/// - `DB_NAME` (required)
/// - `DB_USERNAME`, `DB_PASSWORD` (optional, applied when both are set)
/// - `DB_APP_NAME` (optional)
/// - `DB_MAX_POOL_SIZE` (default: 100), `DB_MIN_POOL_SIZE` (default: 5)
/// - `DB_CONNECT_TIMEOUT_SECS` (default: 5)
/// - `DB_SERVER_SELECTION_TIMEOUT_SECS` (default: 5)
#[cfg(feature = "config")]
impl FromEnv for StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("DB_URL")?,
            namespace: Some(env_required("DB_NAMESPACE")?),
            database: env_required("DB_NAME")?,
            username: std::env::var("DB_USERNAME").ok(),
            password: std::env::var("DB_PASSWORD").ok(),
            app_name: std::env::var("DB_APP_NAME").ok(),
            max_pool_size: env_parse_or_default("DB_MAX_POOL_SIZE", "100")?,
            min_pool_size: env_parse_or_default("DB_MIN_POOL_SIZE", "5")?,
            connect_timeout_secs: env_parse_or_default("DB_CONNECT_TIMEOUT_SECS", "5")?,
            server_selection_timeout_secs: env_parse_or_default(
                "DB_SERVER_SELECTION_TIMEOUT_SECS",
                "5",
            )?,
        })
    }
}
