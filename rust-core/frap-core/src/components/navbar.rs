use super::{Component, NavItem};
use serde::Deserialize;
use std::fmt::Write;

fn default_background() -> String {
    "#333".to_string()
}

fn default_text() -> String {
    "#fff".to_string()
}

fn default_hover() -> String {
    "#4CAF50".to_string()
}

/// Horizontal link bar
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Navbar {
    /// Links, left to right
    pub items: Vec<NavItem>,
    /// Bar background
    #[serde(default = "default_background")]
    pub background_color: String,
    /// Link color
    #[serde(default = "default_text")]
    pub text_color: String,
    /// Link background on hover
    #[serde(default = "default_hover")]
    pub hover_color: String,
}

impl Navbar {
    /// Navbar with the default colors
    #[must_use]
    pub fn new(items: Vec<NavItem>) -> Self {
        Self {
            items,
            background_color: default_background(),
            text_color: default_text(),
            hover_color: default_hover(),
        }
    }
}

impl Component for Navbar {
    fn render_html(&self) -> String {
        let mut html = format!(
            r#"<div class="navbar" style="background-color: {};">"#,
            self.background_color
        );
        for item in &self.items {
            let _ = write!(
                html,
                r#"<a href="{}"
                            style="color: {};
                            padding: 14px 16px;
                            text-decoration: none;">{}</a>"#,
                item.url, self.text_color, item.label
            );
        }
        html.push_str("</div>");
        html
    }

    fn render_css(&self) -> String {
        format!(
            "
            .navbar {{
                overflow: hidden;
            }}

            .navbar a {{
                float: left;
                display: block;
                color: {text};
                text-align: center;
                padding: 14px 16px;
                text-decoration: none;
            }}

            .navbar a:hover {{
                background-color: {hover};
                color: black;
            }}
        ",
            text = self.text_color,
            hover = self.hover_color,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_html() {
        let navbar = Navbar::new(vec![NavItem::new("/", "Home"), NavItem::new("/login", "Login")]);
        let html = navbar.render_html();
        assert!(html.starts_with(r##"<div class="navbar" style="background-color: #333;">"##));
        assert!(html.contains(r#"<a href="/login""#));
        assert!(html.contains(">Login</a>"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_render_css_colors() {
        let mut navbar = Navbar::new(Vec::new());
        navbar.hover_color = "#ff0000".to_string();
        let css = navbar.render_css();
        assert!(css.contains("color: #fff;"));
        assert!(css.contains("background-color: #ff0000;"));
    }
}
