use serde::{Deserialize, Serialize};

use crate::core::generate_slug;

pub const DEFAULT_LOGO_ALT: &str = "Salon logo";
pub const DEFAULT_BANNER_ALT: &str = "Salon banner";
pub const DEFAULT_MINIMUM_BOOKING_HOURS: u32 = 24;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColorSettings {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            primary: "#4F46E5".to_string(),
            secondary: "#F59E0B".to_string(),
            accent: "#EC4899".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub url: String,
    pub alt: String,
}

impl ImageRef {
    pub fn default_logo() -> Self {
        Self {
            url: String::new(),
            alt: DEFAULT_LOGO_ALT.to_string(),
        }
    }

    pub fn default_banner() -> Self {
        Self {
            url: String::new(),
            alt: DEFAULT_BANNER_ALT.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    #[default]
    Category,
    Price,
    Duration,
    Popularity,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceDisplay {
    #[default]
    Fixed,
    From,
    Range,
    Hidden,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDisplay {
    pub default_view: DefaultView,
    pub price_display: PriceDisplay,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceSettings {
    pub colors: ColorSettings,
    pub logo: ImageRef,
    pub banner: ImageRef,
    pub presentation: String,
    /// Always `generate_slug(presentation)`; never patched directly.
    pub salon_slug: String,
    pub service_display: ServiceDisplay,
    pub show_team_on_public_page: bool,
}

impl Default for InterfaceSettings {
    fn default() -> Self {
        Self {
            colors: ColorSettings::default(),
            logo: ImageRef::default_logo(),
            banner: ImageRef::default_banner(),
            presentation: String::new(),
            salon_slug: generate_slug(None),
            service_display: ServiceDisplay::default(),
            show_team_on_public_page: true,
        }
    }
}

impl InterfaceSettings {
    /// `colors` and `service_display` merge field by field. Returns `true`
    /// when the presentation changed and the slug was recomputed.
    pub fn apply_patch(&mut self, patch: InterfaceSettingsPatch) -> bool {
        if let Some(colors) = patch.colors {
            colors.merge_into(&mut self.colors);
        }
        if let Some(logo) = patch.logo {
            self.logo = logo;
        }
        if let Some(banner) = patch.banner {
            self.banner = banner;
        }
        if let Some(service_display) = patch.service_display {
            service_display.merge_into(&mut self.service_display);
        }
        if let Some(show_team) = patch.show_team_on_public_page {
            self.show_team_on_public_page = show_team;
        }

        match patch.presentation {
            Some(presentation) if presentation != self.presentation => {
                self.salon_slug = generate_slug(Some(&presentation));
                self.presentation = presentation;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ColorsPatch {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub background: Option<String>,
}

impl ColorsPatch {
    pub fn merge_into(self, colors: &mut ColorSettings) {
        if let Some(primary) = self.primary {
            colors.primary = primary;
        }
        if let Some(secondary) = self.secondary {
            colors.secondary = secondary;
        }
        if let Some(accent) = self.accent {
            colors.accent = accent;
        }
        if let Some(background) = self.background {
            colors.background = background;
        }
    }
}

impl From<&ColorSettings> for ColorsPatch {
    fn from(colors: &ColorSettings) -> Self {
        Self {
            primary: Some(colors.primary.clone()),
            secondary: Some(colors.secondary.clone()),
            accent: Some(colors.accent.clone()),
            background: Some(colors.background.clone()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDisplayPatch {
    pub default_view: Option<DefaultView>,
    pub price_display: Option<PriceDisplay>,
}

impl ServiceDisplayPatch {
    pub fn merge_into(self, display: &mut ServiceDisplay) {
        if let Some(default_view) = self.default_view {
            display.default_view = default_view;
        }
        if let Some(price_display) = self.price_display {
            display.price_display = price_display;
        }
    }
}

impl From<ServiceDisplay> for ServiceDisplayPatch {
    fn from(display: ServiceDisplay) -> Self {
        Self {
            default_view: Some(display.default_view),
            price_display: Some(display.price_display),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceSettingsPatch {
    pub colors: Option<ColorsPatch>,
    pub logo: Option<ImageRef>,
    pub banner: Option<ImageRef>,
    pub presentation: Option<String>,
    pub service_display: Option<ServiceDisplayPatch>,
    pub show_team_on_public_page: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ServiceImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDisplaySettings {
    pub id: String,
    pub is_online: bool,
    /// Hours of notice required before a booking.
    pub minimum_booking_time: u32,
    pub display_order: i32,
    pub images: Vec<ServiceImage>,
}

impl ServiceDisplaySettings {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_online: false,
            minimum_booking_time: DEFAULT_MINIMUM_BOOKING_HOURS,
            display_order: 0,
            images: Vec::new(),
        }
    }

    pub fn apply_patch(&mut self, patch: ServiceSettingsPatch) {
        if let Some(is_online) = patch.is_online {
            self.is_online = is_online;
        }
        if let Some(minimum_booking_time) = patch.minimum_booking_time {
            self.minimum_booking_time = minimum_booking_time;
        }
        if let Some(display_order) = patch.display_order {
            self.display_order = display_order;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSettingsPatch {
    pub is_online: Option<bool>,
    pub minimum_booking_time: Option<u32>,
    pub display_order: Option<i32>,
    pub images: Option<Vec<ServiceImage>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceState {
    #[serde(default)]
    pub settings: InterfaceSettings,
    #[serde(default)]
    pub service_settings: Vec<ServiceDisplaySettings>,
    #[serde(default)]
    pub selected_template_id: Option<String>,
}

impl InterfaceState {
    pub fn service(&self, id: &str) -> Option<&ServiceDisplaySettings> {
        self.service_settings.iter().find(|s| s.id == id)
    }

    pub fn service_mut(&mut self, id: &str) -> Option<&mut ServiceDisplaySettings> {
        self.service_settings.iter_mut().find(|s| s.id == id)
    }
}
