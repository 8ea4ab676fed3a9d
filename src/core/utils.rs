use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_SALON_SLUG: &str = "salon";

/// Whitespace and hyphens separate words; other punctuation is dropped
/// without separating, so `"L'Atelier"` becomes `"latelier"`.
pub fn generate_slug(text: Option<&str>) -> String {
    let text = match text {
        Some(text) => text,
        None => return DEFAULT_SALON_SLUG.to_string(),
    };

    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        DEFAULT_SALON_SLUG.to_string()
    } else {
        slug
    }
}
