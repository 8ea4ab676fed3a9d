mod document;
mod fonts;
mod renderer;

pub use document::{DocumentRenderer, ThemeDocument};
pub use fonts::{hosted_font_family, hosted_fonts_href};
pub use renderer::*;
