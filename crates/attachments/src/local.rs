//! Local-disk attachment store
//!
//! Stores each attachment under `<root>/<uuid>/<name>`. The locator is the
//! path relative to the root, so the store can be relocated by changing
//! `UPLOAD_DIR` without rewriting stored locators.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{sanitize_name, AttachmentError, AttachmentStore};

/// Attachment store backed by a directory on the local filesystem
#[derive(Clone)]
pub struct LocalAttachmentStore {
    root: PathBuf,
}

impl LocalAttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a locator to an absolute path, refusing locators that
    /// escape the store root.
    fn resolve(&self, locator: &str) -> Result<PathBuf, AttachmentError> {
        let relative = Path::new(locator);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                std::path::Component::ParentDir
                    | std::path::Component::RootDir
                    | std::path::Component::Prefix(_)
            )
        });
        if escapes {
            return Err(AttachmentError::InvalidName(locator.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AttachmentStore for LocalAttachmentStore {
    async fn store(&self, name: &str, bytes: &[u8]) -> Result<String, AttachmentError> {
        let file_name = sanitize_name(name)?;
        let locator = format!("{}/{}", Uuid::new_v4(), file_name);

        let path = self.resolve(&locator)?;
        let parent = path.parent().expect("locator always has a parent segment");
        tokio::fs::create_dir_all(parent).await?;
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(locator = %locator, size = bytes.len(), "Stored attachment");
        Ok(locator)
    }

    async fn delete(&self, locator: &str) -> Result<(), AttachmentError> {
        let path = self.resolve(locator)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                // Drop the per-attachment directory if it is now empty
                if let Some(parent) = path.parent() {
                    let _ = tokio::fs::remove_dir(parent).await;
                }
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AttachmentError::Io(e)),
        }
    }
}
