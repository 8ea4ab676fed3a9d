use crate::models::templates::{DesignTemplate, TEMPLATE_BODY_CLASS_PREFIX};
use crate::theme::hosted_fonts_href;

pub const TEMPLATE_STYLE_ELEMENT_ID: &str = "template-custom-css";
pub const TEMPLATE_FONTS_LINK_ID: &str = "template-fonts";

pub trait ThemeRenderer: Send + Sync {
    /// Remove the style element `id` if present, then insert a fresh one
    /// holding `css`.
    fn replace_style_element(&self, id: &str, css: &str);

    /// Drop every body class starting with `prefix`, then add `class`.
    fn replace_body_class(&self, prefix: &str, class: &str);

    fn set_root_property(&self, name: &str, value: &str);

    fn replace_stylesheet_link(&self, id: &str, href: &str);

    fn remove_stylesheet_link(&self, id: &str);
}

pub fn template_root_properties(template: &DesignTemplate) -> [(&'static str, &str); 6] {
    let colors = &template.theme.colors;
    [
        ("--template-primary", colors.primary.as_str()),
        ("--template-secondary", colors.secondary.as_str()),
        ("--template-accent", colors.accent.as_str()),
        ("--template-background", colors.background.as_str()),
        ("--template-text", colors.text.as_str()),
        ("--template-text-secondary", colors.text_secondary.as_str()),
    ]
}

/// Apply every document side effect of `template`. Rendering the same
/// template twice yields the same document.
pub fn render_template(renderer: &dyn ThemeRenderer, template: &DesignTemplate) {
    renderer.replace_style_element(TEMPLATE_STYLE_ELEMENT_ID, &template.custom_css);
    renderer.replace_body_class(TEMPLATE_BODY_CLASS_PREFIX, &template.body_class());

    for (name, value) in template_root_properties(template) {
        renderer.set_root_property(name, value);
    }

    match hosted_fonts_href(&template.theme.typography) {
        Some(href) => renderer.replace_stylesheet_link(TEMPLATE_FONTS_LINK_ID, &href),
        None => renderer.remove_stylesheet_link(TEMPLATE_FONTS_LINK_ID),
    }
    tracing::debug!("Rendered template {}", template.id);
}
