//! Worklane Attachment Store
//!
//! Persists uploaded bytes behind an opaque locator. The rest of the system
//! holds only a `(name, locator)` pair and never inspects file contents.
//!
//! Two implementations are provided:
//! - [`LocalAttachmentStore`]: files under a configurable uploads directory
//! - [`MockAttachmentStore`]: in-memory capture for tests

use async_trait::async_trait;

pub mod local;
pub mod mock;

pub use local::LocalAttachmentStore;
pub use mock::MockAttachmentStore;

/// Errors surfaced by attachment storage
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("Attachment store configuration error: {0}")]
    Configuration(String),

    #[error("Invalid attachment name: {0}")]
    InvalidName(String),

    #[error("Attachment storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Attachment store trait for different backends.
///
/// `store` returns the locator under which the bytes were persisted;
/// `delete` is idempotent — deleting an unknown locator is a no-op success.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Persist bytes under the given display name, returning a locator
    async fn store(&self, name: &str, bytes: &[u8]) -> Result<String, AttachmentError>;

    /// Remove the bytes stored under a locator
    async fn delete(&self, locator: &str) -> Result<(), AttachmentError>;
}

/// Attachment store configuration
#[derive(Debug, Clone)]
pub struct AttachmentConfig {
    /// Backend provider (`local`, `mock`)
    pub provider: String,
    /// Root directory for the local backend
    pub upload_dir: String,
}

impl AttachmentConfig {
    /// Create attachment config from environment variables
    pub fn from_env() -> Result<Self, AttachmentError> {
        dotenvy::dotenv().ok();

        let provider =
            std::env::var("ATTACHMENT_PROVIDER").unwrap_or_else(|_| "local".to_string());
        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        Ok(Self {
            provider,
            upload_dir,
        })
    }
}

/// Attachment store factory
pub struct AttachmentStoreFactory;

impl AttachmentStoreFactory {
    /// Create an attachment store based on configuration
    pub fn create(config: AttachmentConfig) -> Result<Box<dyn AttachmentStore>, AttachmentError> {
        match config.provider.as_str() {
            "local" => {
                tracing::info!(dir = %config.upload_dir, "Creating local attachment store");
                Ok(Box::new(LocalAttachmentStore::new(config.upload_dir)))
            }
            "mock" => {
                tracing::info!("Creating mock attachment store");
                Ok(Box::new(MockAttachmentStore::new()))
            }
            other => Err(AttachmentError::Configuration(format!(
                "Unknown attachment provider: {}",
                other
            ))),
        }
    }
}

/// Strip path components from a client-supplied file name.
///
/// Locators embed the display name for operability; a name like
/// `../../etc/passwd` must not be able to escape the store root.
pub(crate) fn sanitize_name(name: &str) -> Result<String, AttachmentError> {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    if base.is_empty() || base == "." || base == ".." {
        return Err(AttachmentError::InvalidName(name.to_string()));
    }

    Ok(base)
}
