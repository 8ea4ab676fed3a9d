use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::ThemeRenderer;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeDocument {
    pub style_elements: BTreeMap<String, String>,
    pub body_classes: Vec<String>,
    pub root_properties: BTreeMap<String, String>,
    pub stylesheet_links: BTreeMap<String, String>,
}

impl ThemeDocument {
    pub fn to_head_html(&self) -> String {
        let mut html = String::new();

        for (id, href) in &self.stylesheet_links {
            html.push_str(&format!(
                "<link id=\"{}\" rel=\"stylesheet\" href=\"{}\">\n",
                escape_attribute(id),
                escape_attribute(href)
            ));
        }

        if !self.root_properties.is_empty() {
            html.push_str("<style id=\"template-root-properties\">\n:root {\n");
            for (name, value) in &self.root_properties {
                html.push_str(&format!("  {}: {};\n", name, value));
            }
            html.push_str("}\n</style>\n");
        }

        for (id, css) in &self.style_elements {
            html.push_str(&format!(
                "<style id=\"{}\">\n{}\n</style>\n",
                escape_attribute(id),
                css.replace("</style", "<\\/style")
            ));
        }
        html
    }

    pub fn body_class_attribute(&self) -> String {
        self.body_classes.join(" ")
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// In-memory `ThemeRenderer`; the rendered state can be exported as HTML.
#[derive(Debug, Default)]
pub struct DocumentRenderer {
    document: Mutex<ThemeDocument>,
}

impl DocumentRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body_classes(classes: &[&str]) -> Self {
        let document = ThemeDocument {
            body_classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        };
        Self {
            document: Mutex::new(document),
        }
    }

    pub fn document(&self) -> ThemeDocument {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, ThemeDocument> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ThemeRenderer for DocumentRenderer {
    fn replace_style_element(&self, id: &str, css: &str) {
        let mut document = self.lock();
        document.style_elements.remove(id);
        document.style_elements.insert(id.to_string(), css.to_string());
    }

    fn replace_body_class(&self, prefix: &str, class: &str) {
        let mut document = self.lock();
        document.body_classes.retain(|c| !c.starts_with(prefix));
        document.body_classes.push(class.to_string());
    }

    fn set_root_property(&self, name: &str, value: &str) {
        self.lock()
            .root_properties
            .insert(name.to_string(), value.to_string());
    }

    fn replace_stylesheet_link(&self, id: &str, href: &str) {
        self.lock()
            .stylesheet_links
            .insert(id.to_string(), href.to_string());
    }

    fn remove_stylesheet_link(&self, id: &str) {
        self.lock().stylesheet_links.remove(id);
    }
}
