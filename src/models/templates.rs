use serde::{Deserialize, Serialize};

use crate::models::settings::ColorsPatch;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Elegant,
    Modern,
    Minimal,
    Luxury,
    Nature,
    Bold,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
    pub text_secondary: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateTypography {
    /// CSS `font-family` value, e.g. `'Playfair Display', serif`.
    pub heading_font: String,
    pub body_font: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEffects {
    pub border_radius: String,
    pub shadow: String,
    pub glassmorphism: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateTheme {
    pub colors: TemplateColors,
    pub typography: TemplateTypography,
    pub effects: TemplateEffects,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DesignTemplate {
    pub id: String,
    pub name: String,
    pub category: TemplateCategory,
    pub theme: TemplateTheme,
    #[serde(rename = "customCSS")]
    pub custom_css: String,
}

impl DesignTemplate {
    pub fn body_class(&self) -> String {
        format!("{}{}", TEMPLATE_BODY_CLASS_PREFIX, self.id)
    }

    pub fn core_colors(&self) -> ColorsPatch {
        let colors = &self.theme.colors;
        ColorsPatch {
            primary: Some(colors.primary.clone()),
            secondary: Some(colors.secondary.clone()),
            accent: Some(colors.accent.clone()),
            background: Some(colors.background.clone()),
        }
    }
}

pub const TEMPLATE_BODY_CLASS_PREFIX: &str = "template-";
