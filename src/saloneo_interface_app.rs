use std::path::PathBuf;
use std::sync::Arc;

use crate::clients::{build_http_client, HttpFileStorage, HttpProfileApi, LocalImageCache};
use crate::core::config::SnapshotBackend;
use crate::core::{AppConfig, AppError};
use crate::storage::{FileSnapshotStore, MemorySnapshotStore, RedisSnapshotStore, SnapshotStore};
use crate::store::{InterfaceDependencies, InterfaceSettingsService};
use crate::templates::StaticTemplateCatalog;
use crate::theme::DocumentRenderer;

const REDIS_KEY_PREFIX: &str = "saloneo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub restored_from_snapshot: bool,
    pub salon_slug: String,
    pub template_id: Option<String>,
    pub service_count: usize,
    pub output_path: PathBuf,
}

pub struct InterfaceApp {
    service: Arc<InterfaceSettingsService>,
    renderer: Arc<DocumentRenderer>,
    output_path: PathBuf,
}

impl InterfaceApp {
    pub fn build(configuration: &AppConfig) -> Result<Self, AppError> {
        let http = build_http_client(&configuration.api)?;
        let base_url = configuration.api.base_url.as_str();
        let token = configuration.api.auth_token.clone();

        let renderer = Arc::new(DocumentRenderer::new());
        let deps = InterfaceDependencies {
            profile_api: Arc::new(HttpProfileApi::new(http.clone(), base_url, token.clone())),
            file_storage: Arc::new(HttpFileStorage::new(http, base_url, token)),
            image_cache: Arc::new(LocalImageCache::new(
                &configuration.images.directory,
                configuration.images.remote_urls_available,
            )),
            snapshot_store: snapshot_store(configuration)?,
            renderer: renderer.clone(),
            templates: Arc::new(StaticTemplateCatalog),
        };

        Ok(Self {
            service: Arc::new(InterfaceSettingsService::new(deps)),
            renderer,
            output_path: PathBuf::from(&configuration.theme.output_path),
        })
    }

    pub fn service(&self) -> Arc<InterfaceSettingsService> {
        self.service.clone()
    }

    #[tracing::instrument(name = "Synchronize Interface", skip(self))]
    pub async fn run_sync(self) -> Result<SyncOutcome, AppError> {
        let restored_from_snapshot = match self.service.hydrate().await {
            Ok(restored) => restored,
            Err(e) => {
                tracing::warn!("Starting from defaults, snapshot unusable: {}", e);
                false
            }
        };

        self.service.load_settings().await?;
        let template = self.service.restore_template().await?;

        let document = self.renderer.document();
        if let Some(parent) = self.output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.output_path, document.to_head_html()).await?;

        let state = self.service.state().await;
        Ok(SyncOutcome {
            restored_from_snapshot,
            salon_slug: state.settings.salon_slug,
            template_id: template.map(|t| t.id),
            service_count: state.service_settings.len(),
            output_path: self.output_path,
        })
    }
}

fn snapshot_store(configuration: &AppConfig) -> Result<Arc<dyn SnapshotStore>, AppError> {
    let storage = &configuration.storage;
    let store: Arc<dyn SnapshotStore> = match storage.backend {
        SnapshotBackend::File => {
            let directory = storage.directory.as_deref().ok_or_else(|| {
                AppError::config_error("storage.directory is required for the file backend")
            })?;
            Arc::new(FileSnapshotStore::new(directory))
        }
        SnapshotBackend::Redis => {
            let redis = storage.redis.as_ref().ok_or_else(|| {
                AppError::config_error("storage.redis is required for the redis backend")
            })?;
            Arc::new(RedisSnapshotStore::new(redis.connect()?, REDIS_KEY_PREFIX))
        }
        SnapshotBackend::Memory => Arc::new(MemorySnapshotStore::new()),
    };
    Ok(store)
}
