use claim::{assert_err, assert_ok, assert_some};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use std::sync::atomic::Ordering;
use std::time::Duration;

use saloneo_interface::core::AppErrorType;
use saloneo_interface::models::profile::{ProfileTheme, RemoteService, SalonProfile};
use saloneo_interface::models::settings::{
    ColorsPatch, ImageRef, InterfaceSettingsPatch, InterfaceState, ServiceDisplaySettings,
    ServiceImage, ServiceSettingsPatch, DEFAULT_BANNER_ALT, DEFAULT_LOGO_ALT,
    DEFAULT_MINIMUM_BOOKING_HOURS,
};
use saloneo_interface::models::uploads::{UploadFile, MAX_IMAGE_SIZE};
use saloneo_interface::storage::{decode_snapshot, encode_snapshot, SnapshotStore, SNAPSHOT_NAMESPACE};

use crate::helpers::{png, spawn_service, spawn_service_with_state};

fn image(url: &str) -> ServiceImage {
    ServiceImage {
        url: url.to_string(),
        alt: String::new(),
    }
}

fn presentation(text: &str) -> InterfaceSettingsPatch {
    InterfaceSettingsPatch {
        presentation: Some(text.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn defaults_point_to_the_generic_salon_page() {
    let app = spawn_service();

    let settings = app.service.settings().await;
    assert_eq!(settings.salon_slug, "salon");
    assert_eq!(settings.logo.alt, DEFAULT_LOGO_ALT);
    assert_eq!(settings.banner.alt, DEFAULT_BANNER_ALT);
    assert!(settings.show_team_on_public_page);
    assert_eq!(app.service.public_page_path().await, "/salon/salon");
    assert!(!app.service.is_loading());
    assert!(!app.service.is_saving());
}

#[tokio::test]
async fn slug_follows_presentation_on_every_update() {
    let app = spawn_service();

    for _ in 0..20 {
        let name: String = CompanyName().fake();
        assert_ok!(app.service.update_settings(presentation(&name)).await);

        let settings = app.service.settings().await;
        assert_eq!(settings.presentation, name);
        assert!(!settings.salon_slug.is_empty());
        assert!(!settings.salon_slug.starts_with('-'));
        assert!(!settings.salon_slug.ends_with('-'));
        assert!(!settings.salon_slug.contains("--"));
        assert!(settings
            .salon_slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }
}

#[tokio::test]
async fn accented_presentation_yields_ascii_slug() {
    let app = spawn_service();

    assert_ok!(app.service.update_settings(presentation("Élégance Coiffure")).await);
    assert_eq!(app.service.settings().await.salon_slug, "elegance-coiffure");

    assert_ok!(app.service.update_settings(presentation("!!!")).await);
    assert_eq!(app.service.settings().await.salon_slug, "salon");
}

#[tokio::test]
async fn color_patch_keeps_the_other_colors() {
    let app = spawn_service();
    let before = app.service.settings().await.colors;

    let patch = InterfaceSettingsPatch {
        colors: Some(ColorsPatch {
            accent: Some("#112233".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_ok!(app.service.update_settings(patch).await);

    let colors = app.service.settings().await.colors;
    assert_eq!(colors.accent, "#112233");
    assert_eq!(colors.primary, before.primary);
    assert_eq!(colors.secondary, before.secondary);
    assert_eq!(colors.background, before.background);
}

#[tokio::test]
async fn every_update_is_mirrored_to_the_snapshot() {
    let app = spawn_service();

    assert_ok!(app.service.update_settings(presentation("Salon Nour")).await);
    assert_ok!(app.service.initialize_service_settings("svc-1").await);

    let raw = assert_some!(app.snapshots.read(SNAPSHOT_NAMESPACE).await.unwrap());
    let restored = decode_snapshot(&raw).unwrap();
    assert_eq!(restored, app.service.state().await);
}

#[tokio::test]
async fn hydrate_restores_the_previous_session() {
    let app = spawn_service();
    assert_ok!(app.service.update_settings(presentation("Salon Nour")).await);
    assert_ok!(app.service.initialize_service_settings("svc-1").await);

    let reloaded = app.reloaded();
    assert_eq!(reloaded.service.settings().await.salon_slug, "salon");

    let restored = assert_ok!(reloaded.service.hydrate().await);
    assert!(restored);
    assert_eq!(reloaded.service.state().await, app.service.state().await);
}

#[tokio::test]
async fn hydrate_without_snapshot_keeps_defaults() {
    let app = spawn_service();

    let restored = assert_ok!(app.service.hydrate().await);
    assert!(!restored);
    assert_eq!(app.service.state().await, InterfaceState::default());
}

#[tokio::test]
async fn initialize_service_settings_is_idempotent() {
    let app = spawn_service();

    assert!(assert_ok!(app.service.initialize_service_settings("svc-1").await));
    assert_ok!(
        app.service
            .update_service_settings(
                "svc-1",
                ServiceSettingsPatch {
                    is_online: Some(true),
                    ..Default::default()
                },
            )
            .await
    );
    assert!(!assert_ok!(app.service.initialize_service_settings("svc-1").await));

    let services = app.service.service_settings().await;
    assert_eq!(services.len(), 1);
    assert!(services[0].is_online);
}

#[tokio::test]
async fn initialized_service_uses_defaults() {
    let app = spawn_service();
    assert_ok!(app.service.initialize_service_settings("svc-7").await);

    let service = assert_some!(app.service.service_setting("svc-7").await);
    assert_eq!(service, ServiceDisplaySettings::new("svc-7"));
    assert!(!service.is_online);
    assert_eq!(service.minimum_booking_time, DEFAULT_MINIMUM_BOOKING_HOURS);
    assert_eq!(service.display_order, 0);
    assert!(service.images.is_empty());
}

#[tokio::test]
async fn updating_an_unknown_service_creates_nothing() {
    let app = spawn_service();

    let patch = ServiceSettingsPatch {
        display_order: Some(3),
        ..Default::default()
    };
    let updated = assert_ok!(app.service.update_service_settings("missing", patch).await);

    assert!(!updated);
    assert!(app.service.service_settings().await.is_empty());
}

#[tokio::test]
async fn service_patch_merges_into_existing_entry() {
    let app = spawn_service();
    assert_ok!(app.service.initialize_service_settings("svc-1").await);

    let patch = ServiceSettingsPatch {
        minimum_booking_time: Some(48),
        ..Default::default()
    };
    assert!(assert_ok!(app.service.update_service_settings("svc-1", patch).await));

    let service = assert_some!(app.service.service_setting("svc-1").await);
    assert_eq!(service.minimum_booking_time, 48);
    assert!(!service.is_online);
}

#[tokio::test]
async fn check_images_drops_only_unresolvable_entries() {
    let mut state = InterfaceState::default();
    state.settings.logo = ImageRef {
        url: "local://logo/gone.png".to_string(),
        alt: "Custom logo".to_string(),
    };
    state.settings.banner = ImageRef {
        url: "local://banner/kept.png".to_string(),
        alt: "Custom banner".to_string(),
    };
    let mut service = ServiceDisplaySettings::new("svc-1");
    service.images = vec![image("local://a"), image("local://b"), image("local://c")];
    state.service_settings.push(service);

    let app = spawn_service_with_state(state);
    app.images.make_available("local://banner/kept.png");
    app.images.make_available("local://a");
    app.images.make_available("local://c");

    let report = assert_ok!(app.service.check_images().await);

    assert!(report.logo_reset);
    assert!(!report.banner_reset);
    assert_eq!(report.removed_service_images, 1);

    let settings = app.service.settings().await;
    assert_eq!(settings.logo, ImageRef::default_logo());
    assert_eq!(settings.banner.url, "local://banner/kept.png");
    assert_eq!(settings.banner.alt, "Custom banner");

    let urls: Vec<String> = assert_some!(app.service.service_setting("svc-1").await)
        .images
        .into_iter()
        .map(|i| i.url)
        .collect();
    assert_eq!(urls, vec!["local://a", "local://c"]);
}

#[tokio::test]
async fn check_images_drops_service_images_without_url() {
    let mut state = InterfaceState::default();
    let mut service = ServiceDisplaySettings::new("svc-1");
    service.images = vec![image(""), image("local://a")];
    state.service_settings.push(service);

    let app = spawn_service_with_state(state);
    app.images.make_available("local://a");

    let report = assert_ok!(app.service.check_images().await);
    assert_eq!(report.removed_service_images, 1);
    assert!(!report.logo_reset);
    assert!(!report.banner_reset);
}

#[tokio::test]
async fn update_settings_resets_a_missing_logo_immediately() {
    let app = spawn_service();

    let patch = InterfaceSettingsPatch {
        logo: Some(ImageRef {
            url: "local://logo/never-uploaded.png".to_string(),
            alt: "Logo".to_string(),
        }),
        ..Default::default()
    };
    assert_ok!(app.service.update_settings(patch).await);

    assert_eq!(app.service.settings().await.logo, ImageRef::default_logo());
}

#[tokio::test]
async fn clean_state_reports_nothing_removed() {
    let app = spawn_service();
    let report = assert_ok!(app.service.check_images().await);
    assert!(report.is_clean());
}

#[tokio::test]
async fn save_sends_the_full_settings() {
    let app = spawn_service();
    assert_ok!(app.service.update_settings(presentation("Salon Nour")).await);

    assert_ok!(app.service.save_settings().await);

    let updates = app.api.recorded_updates();
    assert_eq!(updates.len(), 1);
    let update = &updates[0];
    assert_eq!(update.presentation.as_deref(), Some("Salon Nour"));
    assert_eq!(update.logo.as_deref(), Some(""));
    assert_eq!(update.show_team_on_public_page, Some(true));
    let theme = assert_some!(update.theme.clone());
    assert_eq!(theme.primary_color.as_deref(), Some("#4F46E5"));
    assert!(!app.service.is_saving());
}

#[tokio::test]
async fn failed_save_is_reported_and_clears_the_flag() {
    let app = spawn_service();
    app.api.fail_updates.store(true, Ordering::SeqCst);

    let error = assert_err!(app.service.save_settings().await);

    assert_eq!(error.message(), "Failed to save interface settings");
    assert!(matches!(
        error.error_type,
        AppErrorType::ApiError { status: 500, .. }
    ));
    assert!(!app.service.is_saving());
}

#[tokio::test]
async fn load_overwrites_local_settings_with_the_profile() {
    let app = spawn_service();
    assert_ok!(app.service.initialize_service_settings("stale").await);

    app.api.set_profile(SalonProfile {
        theme: Some(ProfileTheme {
            primary_color: Some("#000000".to_string()),
            template_id: Some("luxury-gold".to_string()),
            ..Default::default()
        }),
        logo: Some("https://cdn.saloneo.test/logo.png".to_string()),
        presentation: Some("Maison Lina".to_string()),
        show_team_on_public_page: Some(false),
        ..Default::default()
    });
    app.api.set_services(vec![RemoteService {
        id: "svc-9".to_string(),
        name: Some("Balayage".to_string()),
        is_online: Some(true),
        minimum_booking_time: None,
        display_order: Some(2),
        images: None,
    }]);

    assert_ok!(app.service.load_settings().await);

    let state = app.service.state().await;
    assert_eq!(state.settings.colors.primary, "#000000");
    assert_eq!(state.settings.colors.secondary, "#F59E0B");
    assert_eq!(state.settings.logo.url, "https://cdn.saloneo.test/logo.png");
    assert_eq!(state.settings.logo.alt, DEFAULT_LOGO_ALT);
    assert_eq!(state.settings.salon_slug, "maison-lina");
    assert!(!state.settings.show_team_on_public_page);
    assert_eq!(state.selected_template_id.as_deref(), Some("luxury-gold"));
    assert_eq!(state.service_settings.len(), 1);
    assert_eq!(state.service_settings[0].id, "svc-9");
    assert_eq!(
        state.service_settings[0].minimum_booking_time,
        DEFAULT_MINIMUM_BOOKING_HOURS
    );
    assert!(!app.service.is_loading());
}

#[tokio::test]
async fn failed_load_leaves_state_untouched() {
    let app = spawn_service();
    assert_ok!(app.service.update_settings(presentation("Salon Nour")).await);
    let before = app.service.state().await;
    app.api.fail_reads.store(true, Ordering::SeqCst);

    let error = assert_err!(app.service.load_settings().await);

    assert_eq!(error.message(), "Failed to load interface settings");
    assert_eq!(error.error_type, AppErrorType::NetworkError);
    assert_eq!(app.service.state().await, before);
    assert!(!app.service.is_loading());
}

#[tokio::test]
async fn concurrent_load_and_save_both_complete() {
    let app = spawn_service();
    app.api.set_profile(SalonProfile {
        presentation: Some("Remote Salon".to_string()),
        ..Default::default()
    });
    *app.api.read_delay.lock().unwrap() = Some(Duration::from_millis(50));
    *app.api.update_delay.lock().unwrap() = Some(Duration::from_millis(10));

    let (loaded, saved) = tokio::join!(app.service.load_settings(), app.service.save_settings());

    assert_ok!(loaded);
    assert_ok!(saved);
    assert_eq!(app.service.settings().await.salon_slug, "remote-salon");
    assert_eq!(app.api.recorded_updates().len(), 1);
    assert!(!app.service.is_loading());
    assert!(!app.service.is_saving());
}

#[tokio::test]
async fn busy_flags_are_visible_while_requests_are_in_flight() {
    let app = spawn_service();
    *app.api.read_delay.lock().unwrap() = Some(Duration::from_millis(100));

    let service = app.service.clone();
    let load = tokio::spawn(async move { service.load_settings().await });
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(app.service.is_loading());
    assert!(!app.service.is_saving());
    assert_ok!(load.await.unwrap());
    assert!(!app.service.is_loading());
}

#[tokio::test]
async fn uploaded_logo_becomes_the_current_logo() {
    let app = spawn_service();

    let url = assert_ok!(app.service.upload_logo(png("logo.png")).await);

    assert_eq!(url, "local://logo/logo.png");
    let settings = app.service.settings().await;
    assert_eq!(settings.logo.url, url);
    assert_eq!(settings.logo.alt, DEFAULT_LOGO_ALT);

    let updates = app.api.recorded_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].logo.as_deref(), Some(url.as_str()));
    assert!(updates[0].banner.is_none());
    assert!(updates[0].theme.is_none());

    let report = assert_ok!(app.service.check_images().await);
    assert!(report.is_clean());
}

#[tokio::test]
async fn uploaded_banner_is_reloaded_from_the_profile() {
    let app = spawn_service();
    app.api.set_profile(SalonProfile {
        presentation: Some("Salon Nour".to_string()),
        ..Default::default()
    });

    let url = assert_ok!(app.service.upload_banner(png("banner.png")).await);

    let settings = app.service.settings().await;
    assert_eq!(settings.banner.url, url);
    assert_eq!(settings.banner.alt, DEFAULT_BANNER_ALT);
    assert_eq!(settings.salon_slug, "salon-nour");
    assert!(!app.service.is_loading());
}

#[tokio::test]
async fn failed_upload_changes_nothing() {
    let app = spawn_service();
    app.files.fail.store(true, Ordering::SeqCst);

    let error = assert_err!(app.service.upload_logo(png("logo.png")).await);

    assert_eq!(error.error_type, AppErrorType::NetworkError);
    assert_eq!(app.service.settings().await.logo, ImageRef::default_logo());
    assert!(app.api.recorded_updates().is_empty());
}

#[tokio::test]
async fn invalid_image_is_rejected_before_upload() {
    let app = spawn_service();
    let test_cases = vec![
        (
            UploadFile::new("huge.png", "image/png", vec![0; MAX_IMAGE_SIZE + 1]),
            "oversized file",
        ),
        (
            UploadFile::new("menu.pdf", "application/pdf", vec![1, 2, 3]),
            "non-image file",
        ),
    ];

    for (file, description) in test_cases {
        let error = assert_err!(app.service.upload_banner(file).await);
        assert_eq!(
            error.error_type,
            AppErrorType::PayloadValidationError,
            "The upload was not rejected for a {}.",
            description
        );
    }

    assert!(app.files.uploaded.lock().unwrap().is_empty());
    assert!(app.images.is_empty());
    assert!(app.api.recorded_updates().is_empty());
    assert_eq!(app.service.state().await, InterfaceState::default());
    assert!(app.snapshots.read(SNAPSHOT_NAMESPACE).await.unwrap().is_none());
}

#[tokio::test]
async fn hydrate_recomputes_a_stale_slug() {
    let mut state = InterfaceState::default();
    state.settings.presentation = "Maison Lina".to_string();
    state.settings.salon_slug = "renamed-long-ago".to_string();
    let app = spawn_service();
    app.snapshots
        .write(SNAPSHOT_NAMESPACE, &encode_snapshot(&state).unwrap())
        .await
        .unwrap();

    assert!(assert_ok!(app.service.hydrate().await));

    assert_eq!(app.service.settings().await.salon_slug, "maison-lina");
    assert_eq!(app.service.public_page_path().await, "/salon/maison-lina");
}

#[tokio::test]
async fn prune_removes_settings_of_deleted_services() {
    let app = spawn_service();
    for id in ["svc-1", "svc-2", "svc-3"] {
        assert_ok!(app.service.initialize_service_settings(id).await);
    }

    let removed = assert_ok!(app.service.prune_service_settings(&["svc-1", "svc-3"]).await);

    assert_eq!(removed, 1);
    let ids: Vec<String> = app
        .service
        .service_settings()
        .await
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["svc-1", "svc-3"]);
}

#[tokio::test]
async fn reset_returns_to_defaults_and_persists() {
    let app = spawn_service();
    assert_ok!(app.service.update_settings(presentation("Salon Nour")).await);
    assert_ok!(app.service.initialize_service_settings("svc-1").await);

    assert_ok!(app.service.reset_settings().await);

    assert_eq!(app.service.state().await, InterfaceState::default());
    let raw = assert_some!(app.snapshots.read(SNAPSHOT_NAMESPACE).await.unwrap());
    assert_eq!(decode_snapshot(&raw).unwrap(), InterfaceState::default());
}
