use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

use crate::core::AppError;

/// Local cache of image binaries, consulted to tell whether a stored url can
/// still be displayed.
#[async_trait]
pub trait ImageCache: Send + Sync {
    async fn contains(&self, url: &str) -> bool;

    async fn insert(&self, url: &str, bytes: &[u8]) -> Result<(), AppError>;
}

pub struct LocalImageCache {
    directory: PathBuf,
    remote_urls_available: bool,
}

impl LocalImageCache {
    pub fn new(directory: impl Into<PathBuf>, remote_urls_available: bool) -> Self {
        Self {
            directory: directory.into(),
            remote_urls_available,
        }
    }

    fn path_for(&self, url: &str) -> PathBuf {
        self.directory.join(hex::encode(Sha256::digest(url.as_bytes())))
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

#[async_trait]
impl ImageCache for LocalImageCache {
    async fn contains(&self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }
        if self.remote_urls_available && is_remote(url) {
            return true;
        }
        tokio::fs::metadata(self.path_for(url)).await.is_ok()
    }

    async fn insert(&self, url: &str, bytes: &[u8]) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.directory).await?;
        tokio::fs::write(self.path_for(url), bytes).await?;
        tracing::debug!("Cached image for {}", url);
        Ok(())
    }
}
