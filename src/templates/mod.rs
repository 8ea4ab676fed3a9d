use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::core::AppError;
use crate::models::templates::{
    DesignTemplate, TemplateCategory, TemplateColors, TemplateEffects, TemplateTheme,
    TemplateTypography,
};

#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    async fn find(&self, template_id: &str) -> Result<DesignTemplate, AppError>;

    fn list(&self) -> Vec<DesignTemplate>;
}

#[derive(Default, Clone, Copy)]
pub struct StaticTemplateCatalog;

#[async_trait]
impl TemplateCatalog for StaticTemplateCatalog {
    async fn find(&self, template_id: &str) -> Result<DesignTemplate, AppError> {
        BUILT_IN_TEMPLATES
            .iter()
            .find(|t| t.id == template_id)
            .cloned()
            .ok_or_else(|| AppError::template_not_found(template_id))
    }

    fn list(&self) -> Vec<DesignTemplate> {
        BUILT_IN_TEMPLATES.clone()
    }
}

fn template(
    id: &str,
    name: &str,
    category: TemplateCategory,
    colors: [&str; 6],
    fonts: (&str, &str),
    effects: TemplateEffects,
    custom_css: &str,
) -> DesignTemplate {
    let [primary, secondary, accent, background, text, text_secondary] = colors;
    DesignTemplate {
        id: id.to_string(),
        name: name.to_string(),
        category,
        theme: TemplateTheme {
            colors: TemplateColors {
                primary: primary.to_string(),
                secondary: secondary.to_string(),
                accent: accent.to_string(),
                background: background.to_string(),
                text: text.to_string(),
                text_secondary: text_secondary.to_string(),
            },
            typography: TemplateTypography {
                heading_font: fonts.0.to_string(),
                body_font: fonts.1.to_string(),
            },
            effects,
        },
        custom_css: custom_css.trim().to_string(),
    }
}

static BUILT_IN_TEMPLATES: Lazy<Vec<DesignTemplate>> = Lazy::new(|| {
    vec![
        template(
            "elegant-rose",
            "Elegant Rose",
            TemplateCategory::Elegant,
            ["#B76E79", "#F4C2C2", "#D4AF37", "#FFF8F6", "#3D2C2E", "#7A6165"],
            ("'Playfair Display', serif", "'Lato', sans-serif"),
            TemplateEffects {
                border_radius: "16px".to_string(),
                shadow: "0 10px 30px rgba(183, 110, 121, 0.15)".to_string(),
                glassmorphism: true,
            },
            r#"
.template-elegant-rose .glass-card {
  background: rgba(255, 255, 255, 0.55);
  backdrop-filter: blur(14px);
  border: 1px solid rgba(183, 110, 121, 0.2);
}
.template-elegant-rose h1, .template-elegant-rose h2 { letter-spacing: 0.02em; }
"#,
        ),
        template(
            "modern-minimal",
            "Modern Minimal",
            TemplateCategory::Minimal,
            ["#111827", "#6B7280", "#10B981", "#FFFFFF", "#111827", "#6B7280"],
            ("'Inter', sans-serif", "'Inter', sans-serif"),
            TemplateEffects {
                border_radius: "8px".to_string(),
                shadow: "0 1px 3px rgba(0, 0, 0, 0.08)".to_string(),
                glassmorphism: false,
            },
            r#"
.template-modern-minimal .service-card { border: 1px solid #E5E7EB; }
"#,
        ),
        template(
            "luxury-gold",
            "Luxury Gold",
            TemplateCategory::Luxury,
            ["#C9A227", "#1C1C1C", "#E8D48B", "#0D0D0D", "#F5F5F5", "#BDBDBD"],
            ("'Cormorant Garamond', serif", "'Montserrat', sans-serif"),
            TemplateEffects {
                border_radius: "4px".to_string(),
                shadow: "0 12px 40px rgba(201, 162, 39, 0.25)".to_string(),
                glassmorphism: true,
            },
            r#"
.template-luxury-gold .glass-card {
  background: rgba(28, 28, 28, 0.6);
  backdrop-filter: blur(18px);
  border: 1px solid rgba(201, 162, 39, 0.35);
}
.template-luxury-gold .btn-primary { text-transform: uppercase; letter-spacing: 0.1em; }
"#,
        ),
        template(
            "nature-zen",
            "Nature Zen",
            TemplateCategory::Nature,
            ["#5B7F5A", "#A3B18A", "#DDA15E", "#F7F5EF", "#2F3E2E", "#6B705C"],
            ("Georgia, serif", "system-ui, sans-serif"),
            TemplateEffects {
                border_radius: "24px".to_string(),
                shadow: "0 6px 20px rgba(91, 127, 90, 0.12)".to_string(),
                glassmorphism: false,
            },
            "",
        ),
    ]
});
