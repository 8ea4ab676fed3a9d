use crate::models::templates::TemplateTypography;

const FONTS_BASE_URL: &str = "https://fonts.googleapis.com/css2";
const FONT_WEIGHTS: &str = "wght@300;400;500;600;700";

// Families every browser already has; never requested from the font host.
const LOCAL_FAMILIES: [&str; 16] = [
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "-apple-system",
    "arial",
    "helvetica",
    "georgia",
    "times new roman",
    "verdana",
    "tahoma",
    "courier new",
];

/// Primary family of a CSS `font-family` value when it must be fetched from
/// the font host. Hosted families are written quoted (`'Playfair Display',
/// serif`); unquoted or web-safe names stay local.
pub fn hosted_font_family(font_family: &str) -> Option<&str> {
    let first = font_family.split(',').next()?.trim();
    let quoted = (first.starts_with('\'') && first.ends_with('\''))
        || (first.starts_with('"') && first.ends_with('"'));
    if !quoted || first.len() < 3 {
        return None;
    }

    let name = first[1..first.len() - 1].trim();
    if name.is_empty() || LOCAL_FAMILIES.contains(&name.to_lowercase().as_str()) {
        return None;
    }
    Some(name)
}

pub fn hosted_fonts_href(typography: &TemplateTypography) -> Option<String> {
    let mut families: Vec<&str> = Vec::with_capacity(2);
    for font in [&typography.heading_font, &typography.body_font] {
        if let Some(family) = hosted_font_family(font) {
            if !families.contains(&family) {
                families.push(family);
            }
        }
    }
    if families.is_empty() {
        return None;
    }

    let query = families
        .iter()
        .map(|family| format!("family={}:{}", family.replace(' ', "+"), FONT_WEIGHTS))
        .collect::<Vec<_>>()
        .join("&");
    Some(format!("{}?{}&display=swap", FONTS_BASE_URL, query))
}
