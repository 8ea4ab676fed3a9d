use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::busy::BusyGuard;
use crate::clients::{FileStorage, ImageCache, ProfileApi};
use crate::core::AppError;
use crate::models::profile::{ProfileTheme, ProfileUpdate, SalonProfile};
use crate::models::settings::{
    ImageRef, InterfaceSettings, InterfaceSettingsPatch, InterfaceState, ServiceDisplaySettings,
    ServiceSettingsPatch, DEFAULT_BANNER_ALT, DEFAULT_LOGO_ALT,
};
use crate::models::templates::DesignTemplate;
use crate::models::uploads::{ImageKind, UploadFile};
use crate::storage::{decode_snapshot, encode_snapshot, SnapshotStore, SNAPSHOT_NAMESPACE};
use crate::templates::TemplateCatalog;
use crate::theme::{render_template, ThemeRenderer};

#[derive(Clone)]
pub struct InterfaceDependencies {
    pub profile_api: Arc<dyn ProfileApi>,
    pub file_storage: Arc<dyn FileStorage>,
    pub image_cache: Arc<dyn ImageCache>,
    pub snapshot_store: Arc<dyn SnapshotStore>,
    pub renderer: Arc<dyn ThemeRenderer>,
    pub templates: Arc<dyn TemplateCatalog>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageCheckReport {
    pub logo_reset: bool,
    pub banner_reset: bool,
    pub removed_service_images: usize,
}

impl ImageCheckReport {
    pub fn is_clean(&self) -> bool {
        !self.logo_reset && !self.banner_reset && self.removed_service_images == 0
    }
}

/// Mediates between callers and the remote profile API for the salon's
/// public-page presentation.
///
/// State lives behind an async lock that is never held across a remote call,
/// so concurrent loads and saves interleave freely: the last response to
/// arrive writes last.
pub struct InterfaceSettingsService {
    deps: InterfaceDependencies,
    state: RwLock<InterfaceState>,
    is_loading: AtomicBool,
    is_saving: AtomicBool,
}

impl InterfaceSettingsService {
    pub fn new(deps: InterfaceDependencies) -> Self {
        Self::with_state(deps, InterfaceState::default())
    }

    pub fn with_state(deps: InterfaceDependencies, state: InterfaceState) -> Self {
        Self {
            deps,
            state: RwLock::new(state),
            is_loading: AtomicBool::new(false),
            is_saving: AtomicBool::new(false),
        }
    }

    pub async fn state(&self) -> InterfaceState {
        self.state.read().await.clone()
    }

    pub async fn settings(&self) -> InterfaceSettings {
        self.state.read().await.settings.clone()
    }

    pub async fn service_settings(&self) -> Vec<ServiceDisplaySettings> {
        self.state.read().await.service_settings.clone()
    }

    pub async fn service_setting(&self, service_id: &str) -> Option<ServiceDisplaySettings> {
        self.state.read().await.service(service_id).cloned()
    }

    pub async fn selected_template_id(&self) -> Option<String> {
        self.state.read().await.selected_template_id.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::SeqCst)
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving.load(Ordering::SeqCst)
    }

    pub async fn public_page_path(&self) -> String {
        format!("/salon/{}", self.state.read().await.settings.salon_slug)
    }

    #[tracing::instrument(name = "Hydrate Interface Settings", skip(self))]
    pub async fn hydrate(&self) -> Result<bool, AppError> {
        let raw = match self.deps.snapshot_store.read(SNAPSHOT_NAMESPACE).await? {
            Some(raw) => raw,
            None => return Ok(false),
        };
        let restored = decode_snapshot(&raw).map_err(|e| {
            tracing::warn!("Ignoring unreadable interface snapshot: {}", e);
            AppError::from(e)
        })?;
        *self.state.write().await = restored;
        Ok(true)
    }

    #[tracing::instrument(name = "Update Interface Settings", skip(self, patch))]
    pub async fn update_settings(&self, patch: InterfaceSettingsPatch) -> Result<(), AppError> {
        {
            let mut state = self.state.write().await;
            if state.settings.apply_patch(patch) {
                tracing::debug!("Salon slug is now {}", state.settings.salon_slug);
            }
        }
        self.drop_unresolvable_images().await;
        self.persist_snapshot().await
    }

    /// Returns `false` when no entry exists for `service_id`.
    #[tracing::instrument(name = "Update Service Settings", skip(self, patch))]
    pub async fn update_service_settings(
        &self,
        service_id: &str,
        patch: ServiceSettingsPatch,
    ) -> Result<bool, AppError> {
        {
            let mut state = self.state.write().await;
            match state.service_mut(service_id) {
                Some(service) => service.apply_patch(patch),
                None => return Ok(false),
            }
        }
        self.persist_snapshot().await?;
        Ok(true)
    }

    /// Create the default entry for `service_id` unless one exists. Returns
    /// whether an entry was created.
    #[tracing::instrument(name = "Initialize Service Settings", skip(self))]
    pub async fn initialize_service_settings(&self, service_id: &str) -> Result<bool, AppError> {
        {
            let mut state = self.state.write().await;
            if state.service(service_id).is_some() {
                return Ok(false);
            }
            state
                .service_settings
                .push(ServiceDisplaySettings::new(service_id));
        }
        self.persist_snapshot().await?;
        Ok(true)
    }

    /// Drop entries whose service is not in `active_ids`. Returns how many
    /// were removed.
    pub async fn prune_service_settings(&self, active_ids: &[&str]) -> Result<usize, AppError> {
        let removed = {
            let mut state = self.state.write().await;
            let before = state.service_settings.len();
            state
                .service_settings
                .retain(|s| active_ids.contains(&s.id.as_str()));
            before - state.service_settings.len()
        };
        if removed > 0 {
            tracing::info!("Pruned {} orphaned service settings", removed);
            self.persist_snapshot().await?;
        }
        Ok(removed)
    }

    pub async fn reset_settings(&self) -> Result<(), AppError> {
        *self.state.write().await = InterfaceState::default();
        self.persist_snapshot().await
    }

    #[tracing::instrument(name = "Check Interface Images", skip(self))]
    pub async fn check_images(&self) -> Result<ImageCheckReport, AppError> {
        let report = self.drop_unresolvable_images().await;
        if !report.is_clean() {
            self.persist_snapshot().await?;
        }
        Ok(report)
    }

    #[tracing::instrument(name = "Save Interface Settings", skip(self))]
    pub async fn save_settings(&self) -> Result<(), AppError> {
        let _saving = BusyGuard::raise(&self.is_saving);

        let update = full_profile_update(&*self.state.read().await);
        self.deps
            .profile_api
            .update_profile(&update)
            .await
            .map_err(|e| {
                tracing::error!("Failed to save interface settings: {:?}", e);
                e.context("Failed to save interface settings")
            })?;

        tracing::info!("Interface settings saved");
        Ok(())
    }

    #[tracing::instrument(name = "Load Interface Settings", skip(self))]
    pub async fn load_settings(&self) -> Result<(), AppError> {
        let _loading = BusyGuard::raise(&self.is_loading);

        let api = &self.deps.profile_api;
        let (profile, services) = tokio::try_join!(api.get_profile(), api.get_services())
            .map_err(|e| {
                tracing::error!("Failed to load interface settings: {:?}", e);
                e.context("Failed to load interface settings")
            })?;

        {
            let mut state = self.state.write().await;
            let template_id = profile
                .theme
                .as_ref()
                .and_then(|theme| theme.template_id.clone());
            state.settings.apply_patch(patch_from_profile(profile));
            if template_id.is_some() {
                state.selected_template_id = template_id;
            }
            state.service_settings = services
                .into_iter()
                .map(ServiceDisplaySettings::from)
                .collect();
        }

        self.persist_snapshot().await
    }

    pub async fn upload_logo(&self, file: UploadFile) -> Result<String, AppError> {
        self.upload_image(file, ImageKind::Logo).await
    }

    pub async fn upload_banner(&self, file: UploadFile) -> Result<String, AppError> {
        let url = self.upload_image(file, ImageKind::Banner).await?;
        self.load_settings().await?;
        Ok(url)
    }

    #[tracing::instrument(name = "Upload Interface Image", skip(self, file), fields(kind = kind.as_str()))]
    async fn upload_image(&self, file: UploadFile, kind: ImageKind) -> Result<String, AppError> {
        file.validate()?;
        let url = self.deps.file_storage.upload(&file, kind).await?;
        self.deps.image_cache.insert(&url, &file.bytes).await?;

        let image = ImageRef {
            url: url.clone(),
            alt: kind.default_alt().to_string(),
        };
        let (patch, update) = match kind {
            ImageKind::Logo => (
                InterfaceSettingsPatch {
                    logo: Some(image),
                    ..Default::default()
                },
                ProfileUpdate {
                    logo: Some(url.clone()),
                    ..Default::default()
                },
            ),
            ImageKind::Banner => (
                InterfaceSettingsPatch {
                    banner: Some(image),
                    ..Default::default()
                },
                ProfileUpdate {
                    banner: Some(url.clone()),
                    ..Default::default()
                },
            ),
        };

        self.update_settings(patch).await?;
        self.deps.profile_api.update_profile(&update).await?;
        Ok(url)
    }

    /// Select `template`: mirror its core colors, render it, and record the
    /// choice locally and on the profile. A failed remote write is returned
    /// after the template has been applied locally.
    #[tracing::instrument(name = "Apply Template", skip(self, template), fields(template_id = %template.id))]
    pub async fn apply_template(&self, template: &DesignTemplate) -> Result<(), AppError> {
        let colors = {
            let mut state = self.state.write().await;
            state.selected_template_id = Some(template.id.clone());
            template.core_colors().merge_into(&mut state.settings.colors);
            state.settings.colors.clone()
        };

        render_template(self.deps.renderer.as_ref(), template);
        self.persist_snapshot().await?;

        let update = ProfileUpdate {
            theme: Some(ProfileTheme::from_colors(
                &colors,
                Some(template.id.clone()),
            )),
            ..Default::default()
        };
        self.deps
            .profile_api
            .update_profile(&update)
            .await
            .map_err(|e| {
                tracing::error!("Failed to persist template {}: {:?}", template.id, e);
                e.context("Failed to persist the selected template")
            })?;
        Ok(())
    }

    #[tracing::instrument(name = "Restore Template", skip(self))]
    pub async fn restore_template(&self) -> Result<Option<DesignTemplate>, AppError> {
        let template_id = match self.selected_template_id().await {
            Some(id) => id,
            None => return Ok(None),
        };

        let template = self
            .deps
            .templates
            .find(&template_id)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to restore template {}: {:?}", template_id, e);
                e
            })?;

        render_template(self.deps.renderer.as_ref(), &template);
        Ok(Some(template))
    }

    async fn drop_unresolvable_images(&self) -> ImageCheckReport {
        let (logo, banner, service_urls) = {
            let state = self.state.read().await;
            let service_urls: Vec<String> = state
                .service_settings
                .iter()
                .flat_map(|s| s.images.iter().map(|i| i.url.clone()))
                .collect();
            (
                state.settings.logo.url.clone(),
                state.settings.banner.url.clone(),
                service_urls,
            )
        };

        let mut pending: Vec<&String> = Vec::new();
        for url in [&logo, &banner].into_iter().chain(service_urls.iter()) {
            if !url.is_empty() && !pending.contains(&url) {
                pending.push(url);
            }
        }
        let cache = &self.deps.image_cache;
        let found = join_all(pending.iter().map(|url| cache.contains(url))).await;
        let resolvable: HashMap<String, bool> = pending
            .into_iter()
            .cloned()
            .zip(found)
            .collect();
        let is_missing = |url: &str| !resolvable.get(url).copied().unwrap_or(false);

        let mut report = ImageCheckReport::default();
        let mut state = self.state.write().await;

        // Only reset when the url is still the one that was checked.
        if !logo.is_empty() && state.settings.logo.url == logo && is_missing(&logo) {
            tracing::warn!("Logo {} is no longer available, resetting it", logo);
            state.settings.logo = ImageRef::default_logo();
            report.logo_reset = true;
        }
        if !banner.is_empty() && state.settings.banner.url == banner && is_missing(&banner) {
            tracing::warn!("Banner {} is no longer available, resetting it", banner);
            state.settings.banner = ImageRef::default_banner();
            report.banner_reset = true;
        }

        for service in state.service_settings.iter_mut() {
            let before = service.images.len();
            // Images added after the lookups above are kept.
            service.images.retain(|image| {
                !image.url.is_empty() && resolvable.get(&image.url).copied().unwrap_or(true)
            });
            report.removed_service_images += before - service.images.len();
        }

        report
    }

    async fn persist_snapshot(&self) -> Result<(), AppError> {
        let raw = encode_snapshot(&*self.state.read().await)?;
        self.deps
            .snapshot_store
            .write(SNAPSHOT_NAMESPACE, &raw)
            .await
            .map_err(|e| {
                tracing::error!("Failed to persist interface snapshot: {}", e);
                AppError::from(e)
            })
    }
}

fn patch_from_profile(profile: SalonProfile) -> InterfaceSettingsPatch {
    InterfaceSettingsPatch {
        colors: profile.theme.as_ref().map(ProfileTheme::colors_patch),
        logo: profile.logo.map(|url| ImageRef {
            url,
            alt: DEFAULT_LOGO_ALT.to_string(),
        }),
        banner: profile.banner.map(|url| ImageRef {
            url,
            alt: DEFAULT_BANNER_ALT.to_string(),
        }),
        presentation: profile.presentation,
        service_display: profile.service_display,
        show_team_on_public_page: profile.show_team_on_public_page,
    }
}

fn full_profile_update(state: &InterfaceState) -> ProfileUpdate {
    let settings = &state.settings;
    ProfileUpdate {
        theme: Some(ProfileTheme::from_colors(
            &settings.colors,
            state.selected_template_id.clone(),
        )),
        logo: Some(settings.logo.url.clone()),
        banner: Some(settings.banner.url.clone()),
        presentation: Some(settings.presentation.clone()),
        service_display: Some(settings.service_display.into()),
        show_team_on_public_page: Some(settings.show_team_on_public_page),
    }
}
