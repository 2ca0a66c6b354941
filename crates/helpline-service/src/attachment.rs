//! Attachment storage boundary.
//!
//! The ticket operations only ever see an [`Attachment`] reference. Bytes
//! are turned into that reference here, before any ticket write starts.

use std::path::PathBuf;

use futures::future::BoxFuture;
use sha2::{Digest, Sha256};

use helpline_core::config::AttachmentConfig;
use helpline_core::types::Attachment;

use crate::error::{ServiceError, ServiceResult};

/// Longest file extension carried over into a storage key.
const MAX_EXTENSION_CHARS: usize = 10;

pub trait AttachmentStore: Send + Sync {
    /// ## Summary
    /// Stores `bytes` and returns a reference to them. Empty content yields
    /// [`Attachment::None`].
    ///
    /// ## Errors
    /// Returns a validation error naming `attachment` when the content is
    /// too large, or an I/O error if it cannot be written.
    fn store<'a>(
        &'a self,
        file_name: Option<&'a str>,
        bytes: Vec<u8>,
    ) -> BoxFuture<'a, ServiceResult<Attachment>>;
}

/// Content-addressed files below a directory served at `public_base_url`.
#[derive(Debug, Clone)]
pub struct DiskAttachmentStore {
    directory: PathBuf,
    public_base_url: String,
    max_bytes: u64,
}

impl DiskAttachmentStore {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, public_base_url: impl Into<String>, max_bytes: u64) -> Self {
        Self {
            directory: directory.into(),
            public_base_url: public_base_url.into(),
            max_bytes,
        }
    }

    #[must_use]
    pub fn from_config(config: &AttachmentConfig) -> Self {
        Self::new(&config.directory, &config.public_base_url, config.max_bytes)
    }

    #[must_use]
    pub const fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url.trim_end_matches('/'))
    }
}

/// ## Summary
/// Storage key for some content: the hex SHA-256 of the bytes, plus the
/// original extension when it is short and alphanumeric.
#[must_use]
pub fn attachment_key(bytes: &[u8], file_name: Option<&str>) -> String {
    let digest = hex::encode(Sha256::digest(bytes));

    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_CHARS
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });

    match extension {
        Some(ext) => format!("{digest}.{ext}"),
        None => digest,
    }
}

impl AttachmentStore for DiskAttachmentStore {
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    fn store<'a>(
        &'a self,
        file_name: Option<&'a str>,
        bytes: Vec<u8>,
    ) -> BoxFuture<'a, ServiceResult<Attachment>> {
        Box::pin(async move {
            if bytes.is_empty() {
                return Ok(Attachment::None);
            }
            let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
            if size > self.max_bytes {
                return Err(ServiceError::validation(
                    "attachment",
                    format!("attachment exceeds {} bytes", self.max_bytes),
                ));
            }

            let key = attachment_key(&bytes, file_name);
            let path = self.directory.join(&key);

            if tokio::fs::try_exists(&path).await? {
                tracing::trace!(%key, "Attachment already stored");
            } else {
                tokio::fs::create_dir_all(&self.directory).await?;
                tokio::fs::write(&path, &bytes).await?;
                tracing::debug!(%key, size, "Attachment stored");
            }

            Ok(Attachment::Ref(self.url_for(&key)))
        })
    }
}
