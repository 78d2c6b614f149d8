use anyhow::{Context, Result};
use directories::ProjectDirs;
use sqlx::any::AnyPoolOptions;
use sqlx::{any::AnyConnectOptions, migrate::Migrator, AnyPool, ConnectOptions};
use std::sync::Once;
use std::{path::PathBuf, str::FromStr};

use crate::store::{ApiKeys, KeyStore};

// Ensure drivers are installed exactly once for sqlx::any
static INSTALL_DRIVERS: Once = Once::new();

// Embed SQL migrations from the migrations/ directory
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Credential storage backed by sqlite (or any sqlx-supported database).
#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    /// Create a connection pool. If database_url is None, use a sqlite file
    /// in the user's data directory.
    pub async fn connect(database_url: Option<&str>) -> Result<Self> {
        INSTALL_DRIVERS.call_once(|| sqlx::any::install_default_drivers());

        let url = match database_url {
            Some(u) if !u.trim().is_empty() => u.to_string(),
            _ => default_sqlite_url()?,
        };

        let opts = AnyConnectOptions::from_str(&url)
            .with_context(|| format!("invalid database URL: {url}"))?;
        // Quiet by default; callers can enable SQLX_LOG if they want
        let opts = opts.disable_statement_logging();

        let pool = AnyPoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .with_context(|| format!("failed to connect to database: {url}"))?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.context("running migrations")
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl KeyStore for Database {
    async fn load_keys(&self) -> Result<ApiKeys> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT provider, secret FROM credentials")
                .fetch_all(&self.pool)
                .await?;
        let mut keys = ApiKeys::default();
        for (provider, secret) in rows {
            // Rows for providers this build no longer knows are ignored.
            let _ = keys.set(&provider, &secret);
        }
        Ok(keys)
    }

    async fn save_keys(&self, keys: &ApiKeys) -> Result<()> {
        // Full-mapping write: every provider row is upserted, empty or not.
        for provider in ApiKeys::PROVIDERS {
            let secret = keys.get(provider).unwrap_or_default();
            sqlx::query(
                "INSERT INTO credentials(provider, secret) VALUES (?, ?)\n                 ON CONFLICT(provider) DO UPDATE SET secret=excluded.secret, updated_at=CURRENT_TIMESTAMP",
            )
            .bind(provider)
            .bind(secret)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }
}

fn default_sqlite_url() -> Result<String> {
    let proj = ProjectDirs::from("dev", "clipscout", "clipscout")
        .context("unable to determine data directory for default sqlite path")?;
    let mut path: PathBuf = proj.data_dir().to_path_buf();
    std::fs::create_dir_all(&path)
        .with_context(|| format!("creating data dir: {}", path.display()))?;
    path.push("clipscout.db");

    // Ensure the file exists so SQLite can open it in rw mode
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .open(&path);

    // Encode spaces in the path for a valid sqlite URL
    let mut path_str = path.to_string_lossy().to_string();
    if path_str.contains(' ') {
        path_str = path_str.replace(' ', "%20");
    }
    Ok(format!("sqlite:///{path_str}?mode=rwc"))
}
