use serde::Deserialize;

use crate::error::AppError;

/// Prefix for environment variables (`NOWSTAY_MONGODB_URL`, `NOWSTAY_BIND_ADDR`, ...).
pub const ENV_PREFIX: &str = "NOWSTAY";

/// Runtime configuration, read from the process environment at start-up.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// MongoDB connection string.
    pub mongodb_url: String,
    /// Database name.
    pub database: String,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Local staging directory for uploaded files.
    pub upload_dir: String,
    /// Directory holding the policy texts used by the info page seeder.
    pub content_dir: String,
    /// Bucket backing the media store.
    pub media_bucket: String,
    /// Custom S3 endpoint (MinIO, LocalStack, ...).
    #[serde(default)]
    pub media_endpoint: Option<String>,
    /// Top-level folder every media object is stored under.
    pub media_root_folder: String,
    /// Base URL media objects are publicly served from.
    pub media_public_base_url: String,
    /// Base URL of the marketplace REST API, used by the HTTP clients.
    pub api_base_url: String,
    /// Email of the seeded super admin.
    pub admin_email: String,
    /// Plain-text password of the seeded super admin.
    #[serde(default)]
    pub admin_password: Option<String>,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// The unprefixed `MONGODB_URL` is honoured as a fallback so existing
    /// `.env` files keep working; `NOWSTAY_MONGODB_URL` wins when both are set.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(std::env::vars())
    }

    /// Build the configuration from an explicit set of variables (useful for testing).
    pub fn from_vars<I>(vars: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: config::Map<String, String> = vars.into_iter().collect();

        let mut builder = config::Config::builder()
            .set_default("database", "nowstay")?
            .set_default("bind_addr", "127.0.0.1:5000")?
            .set_default("upload_dir", "uploads")?
            .set_default("content_dir", "content")?
            .set_default("media_bucket", "nowstay-media")?
            .set_default("media_root_folder", "nowstay")?
            .set_default("media_public_base_url", "http://localhost:9000/nowstay-media")?
            .set_default("api_base_url", "http://localhost:5000/api")?
            .set_default("admin_email", "admin@nowstay.in")?;

        if let Some(url) = vars.get("MONGODB_URL") {
            builder = builder.set_default("mongodb_url", url.clone())?;
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
            .build()?;

        if settings.get_string("mongodb_url").is_err() {
            return Err(AppError::Config("MONGODB_URL is missing".into()));
        }

        Ok(settings.try_deserialize()?)
    }
}
