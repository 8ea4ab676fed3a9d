use serde::{Deserialize, Serialize};

use crate::models::settings::{
    ColorSettings, ColorsPatch, ServiceDisplayPatch, ServiceDisplaySettings, ServiceImage,
    DEFAULT_MINIMUM_BOOKING_HOURS,
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileTheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl ProfileTheme {
    pub fn from_colors(colors: &ColorSettings, template_id: Option<String>) -> Self {
        Self {
            primary_color: Some(colors.primary.clone()),
            secondary_color: Some(colors.secondary.clone()),
            accent_color: Some(colors.accent.clone()),
            background_color: Some(colors.background.clone()),
            template_id,
        }
    }

    pub fn colors_patch(&self) -> ColorsPatch {
        ColorsPatch {
            primary: self.primary_color.clone(),
            secondary: self.secondary_color.clone(),
            accent: self.accent_color.clone(),
            background: self.background_color.clone(),
        }
    }
}

/// Subset of the salon profile this crate reads. Every field is optional:
/// absent fields leave local settings untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SalonProfile {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub theme: Option<ProfileTheme>,
    pub logo: Option<String>,
    pub banner: Option<String>,
    pub presentation: Option<String>,
    pub service_display: Option<ServiceDisplayPatch>,
    pub show_team_on_public_page: Option<bool>,
}

/// Body of `PUT /profile`. Absent fields are omitted so the server leaves
/// them alone.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ProfileTheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_display: Option<ServiceDisplayPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_team_on_public_page: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteService {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_online: Option<bool>,
    #[serde(default)]
    pub minimum_booking_time: Option<u32>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub images: Option<Vec<ServiceImage>>,
}

impl From<RemoteService> for ServiceDisplaySettings {
    fn from(service: RemoteService) -> Self {
        Self {
            id: service.id,
            is_online: service.is_online.unwrap_or(false),
            minimum_booking_time: service
                .minimum_booking_time
                .unwrap_or(DEFAULT_MINIMUM_BOOKING_HOURS),
            display_order: service.display_order.unwrap_or(0),
            images: service.images.unwrap_or_default(),
        }
    }
}
