//! Mock attachment store
//!
//! In-memory byte capture for testing without touching the filesystem.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{sanitize_name, AttachmentError, AttachmentStore};

/// In-memory attachment store.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// assert on what the application stored or deleted.
#[derive(Clone, Default)]
pub struct MockAttachmentStore {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockAttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes currently stored under a locator, if any
    pub fn get(&self, locator: &str) -> Option<Vec<u8>> {
        self.blobs
            .lock()
            .expect("attachment map lock poisoned")
            .get(locator)
            .cloned()
    }

    /// Number of stored attachments
    pub fn len(&self) -> usize {
        self.blobs
            .lock()
            .expect("attachment map lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AttachmentStore for MockAttachmentStore {
    async fn store(&self, name: &str, bytes: &[u8]) -> Result<String, AttachmentError> {
        let file_name = sanitize_name(name)?;
        let locator = format!("{}/{}", Uuid::new_v4(), file_name);
        self.blobs
            .lock()
            .expect("attachment map lock poisoned")
            .insert(locator.clone(), bytes.to_vec());
        Ok(locator)
    }

    async fn delete(&self, locator: &str) -> Result<(), AttachmentError> {
        self.blobs
            .lock()
            .expect("attachment map lock poisoned")
            .remove(locator);
        Ok(())
    }
}
