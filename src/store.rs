use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Remote-service credentials held in memory for the session.
///
/// Secrets are plain text; nothing here encrypts or validates them. The
/// mapping only reaches disk through an explicit [`KeyStore::save_keys`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default)]
    pub google: String,
    #[serde(default)]
    pub pixabay: String,
    #[serde(default)]
    pub pexels: String,
}

impl ApiKeys {
    /// Provider names in storage order.
    pub const PROVIDERS: [&'static str; 3] = ["google", "pixabay", "pexels"];

    pub fn get(&self, provider: &str) -> Option<&str> {
        match provider {
            "google" => Some(&self.google),
            "pixabay" => Some(&self.pixabay),
            "pexels" => Some(&self.pexels),
            _ => None,
        }
    }

    /// Update one secret; returns false for an unknown provider name.
    pub fn set(&mut self, provider: &str, secret: &str) -> bool {
        match provider {
            "google" => self.google = secret.to_string(),
            "pixabay" => self.pixabay = secret.to_string(),
            "pexels" => self.pexels = secret.to_string(),
            _ => return false,
        }
        true
    }

    pub fn has(&self, provider: &str) -> bool {
        self.get(provider).map(|s| !s.trim().is_empty()).unwrap_or(false)
    }
}

#[async_trait]
pub trait KeyStore: Send + Sync {
    async fn load_keys(&self) -> Result<ApiKeys>;
    /// Persist the full mapping, including empty entries.
    async fn save_keys(&self, keys: &ApiKeys) -> Result<()>;
}
