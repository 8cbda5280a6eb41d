//! # HTML Components
//!
//! Small string renderers for page widgets. Every component is plain data
//! plus pure `render_*` functions: no I/O, nothing cached.
//!
//! Configurations derive `Deserialize`, so a component described in JSON
//! fails to load when a required key is missing instead of rendering a
//! broken widget.

mod form;
mod navbar;
mod sidebar;
mod slider;
mod star;

pub use form::{Button, FeedbackForm, FieldSpec, Form, FormStyle, LoginForm};
pub use navbar::Navbar;
pub use sidebar::{Orientation, Sidebar, SidebarStyle};
pub use slider::Slider;
pub use star::StarRating;

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Something that renders to HTML, with optional CSS and JavaScript
pub trait Component {
    /// HTML markup
    fn render_html(&self) -> String;

    /// Stylesheet for the markup
    fn render_css(&self) -> String {
        String::new()
    }

    /// Script for the markup
    fn render_js(&self) -> String {
        String::new()
    }
}

/// A link shown by navigation components
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavItem {
    /// Link target
    pub url: String,
    /// Link text
    pub label: String,
}

impl NavItem {
    /// Create a link
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }
}

/// Decode a component configuration from JSON
///
/// # Errors
///
/// Returns `Error::ComponentConfig` when the JSON is malformed or a
/// required key is missing.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(Error::ComponentConfig)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_slider() {
        let slider: Slider = from_json(
            r#"{"label": "Volume", "min_value": 0, "max_value": 10, "default_value": 5, "step": 1}"#,
        )
        .unwrap();
        assert_eq!(slider.label, "Volume");
    }

    #[test]
    fn test_from_json_missing_key_fails() {
        let err = from_json::<Slider>(r#"{"label": "Volume", "min_value": 0}"#).unwrap_err();
        assert!(matches!(err, Error::ComponentConfig(_)));
        assert!(err.to_string().contains("max_value"));
    }

    #[test]
    fn test_from_json_navbar_defaults() {
        let navbar: Navbar = from_json(r#"{"items": [{"url": "/", "label": "Home"}]}"#).unwrap();
        assert_eq!(navbar.background_color, "#333");
        assert_eq!(navbar.items, vec![NavItem::new("/", "Home")]);
    }

    #[test]
    fn test_default_css_and_js_are_empty() {
        struct Bare;
        impl Component for Bare {
            fn render_html(&self) -> String {
                "<p></p>".to_string()
            }
        }
        assert!(Bare.render_css().is_empty());
        assert!(Bare.render_js().is_empty());
    }
}
