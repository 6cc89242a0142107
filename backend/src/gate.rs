//! Credential gate: whether a usable API key is selected.
//!
//! The gate is a small state machine over [`KeyStatus`]:
//!
//! - `check` asks the [`CredentialProvider`] once (at startup).
//! - `select` fires the provider's selection request and *optimistically*
//!   assumes it succeeded, without waiting for or reading back a result.
//! - `invalidate` is the correction path: a generation that fails with an
//!   entity-not-found error drops the gate back to "no key".

use async_trait::async_trait;
use shared::models::KeyStatus;
use tokio::sync::RwLock;

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn has_selected_key(&self) -> bool;
    /// Request a key selection. Fire-and-forget: the outcome is not reported.
    async fn open_select_key(&self, candidate: Option<String>);
    /// The key to use for the next generation
    async fn api_key(&self) -> Option<String>;
}

/// In-memory key slot, seeded from configuration and replaced by the UI.
#[derive(Default)]
pub struct SessionCredentials {
    key: RwLock<Option<String>>,
}

impl SessionCredentials {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            key: RwLock::new(initial.filter(|k| !k.trim().is_empty())),
        }
    }
}

#[async_trait]
impl CredentialProvider for SessionCredentials {
    async fn has_selected_key(&self) -> bool {
        self.key.read().await.is_some()
    }

    async fn open_select_key(&self, candidate: Option<String>) {
        // A dismissed form leaves the previous key in place
        if let Some(key) = candidate.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            *self.key.write().await = Some(key);
        }
    }

    async fn api_key(&self) -> Option<String> {
        self.key.read().await.clone()
    }
}

pub struct KeyGate {
    provider: Box<dyn CredentialProvider>,
    status: RwLock<KeyStatus>,
}

impl KeyGate {
    pub fn new(provider: Box<dyn CredentialProvider>) -> Self {
        Self {
            provider,
            status: RwLock::new(KeyStatus::default()),
        }
    }

    pub async fn status(&self) -> KeyStatus {
        self.status.read().await.clone()
    }

    pub async fn has_key(&self) -> bool {
        self.status.read().await.has_key
    }

    /// Ask the provider whether a key is already selected.
    pub async fn check(&self) -> KeyStatus {
        let has_key = self.provider.has_selected_key().await;
        let mut status = self.status.write().await;
        status.has_key = has_key;
        status.checking = false;
        tracing::info!(has_key, "Checked API key selection");
        status.clone()
    }

    /// Open key selection and assume it succeeded.
    ///
    /// If the user dismissed the selection, `has_key` is wrong until the
    /// next credential error, or a submission that finds no stored key,
    /// calls [`KeyGate::invalidate`].
    pub async fn select(&self, candidate: Option<String>) -> KeyStatus {
        self.provider.open_select_key(candidate).await;
        let mut status = self.status.write().await;
        status.has_key = true;
        status.checking = false;
        status.error = None;
        status.clone()
    }

    /// Drop back to "no key" and surface `message` to the user.
    pub async fn invalidate(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "API key rejected by the video service");
        let mut status = self.status.write().await;
        status.has_key = false;
        status.error = Some(message);
    }

    pub async fn api_key(&self) -> Option<String> {
        self.provider.api_key().await
    }
}
