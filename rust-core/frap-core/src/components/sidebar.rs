use super::{Component, NavItem};
use serde::Deserialize;
use std::fmt::Write;

/// Sidebar layout direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Full-height column
    #[default]
    Vertical,
    /// Full-width row
    Horizontal,
}

/// Sidebar look and placement
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SidebarStyle {
    /// Width in pixels (vertical only)
    pub width: u32,
    /// Background color
    pub background_color: String,
    /// Link color
    pub text_color: String,
    /// Link color on hover
    pub hover_color: String,
    /// Layout direction
    #[serde(default)]
    pub orientation: Orientation,
    /// CSS top in pixels
    #[serde(default)]
    pub top: Option<i32>,
    /// CSS left in pixels
    #[serde(default)]
    pub left: Option<i32>,
    /// CSS right in pixels
    #[serde(default)]
    pub right: Option<i32>,
    /// CSS bottom in pixels
    #[serde(default)]
    pub bottom: Option<i32>,
}

impl Default for SidebarStyle {
    fn default() -> Self {
        Self {
            width: 200,
            background_color: "#f5f5f5".to_string(),
            text_color: "#818181".to_string(),
            hover_color: "#f1f1f1".to_string(),
            orientation: Orientation::Vertical,
            top: None,
            left: None,
            right: None,
            bottom: None,
        }
    }
}

impl SidebarStyle {
    fn offsets(&self) -> impl Iterator<Item = (&'static str, i32)> {
        [
            ("top", self.top),
            ("left", self.left),
            ("right", self.right),
            ("bottom", self.bottom),
        ]
        .into_iter()
        .filter_map(|(side, px)| px.map(|px| (side, px)))
    }
}

/// Fixed sidebar of links
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sidebar {
    /// Links
    pub items: Vec<NavItem>,
    /// Style
    #[serde(default)]
    pub style: SidebarStyle,
}

impl Sidebar {
    /// Create a sidebar
    #[must_use]
    pub const fn new(items: Vec<NavItem>, style: SidebarStyle) -> Self {
        Self { items, style }
    }
}

impl Component for Sidebar {
    fn render_html(&self) -> String {
        let style = &self.style;
        let mut html = format!(
            r#"<div class="sidebar" style="width: {}px; background-color: {};"#,
            style.width, style.background_color
        );
        for (side, px) in style.offsets() {
            let _ = write!(html, " {side}: {px}px;");
        }
        match style.orientation {
            Orientation::Horizontal => html.push_str(r#" display: flex; flex-direction: row;">"#),
            Orientation::Vertical => html.push_str(r#"">"#),
        }

        for item in &self.items {
            let _ = write!(
                html,
                r#"<a href="{}"
                            style="color: {};
                            display: block;
                            text-decoration: none;
                            padding: 6px 8px 6px 16px;">{}</a>"#,
                item.url, style.text_color, item.label
            );
        }
        html.push_str("</div>");
        html
    }

    fn render_css(&self) -> String {
        let style = &self.style;
        let mut layout = String::new();
        for (side, px) in style.offsets() {
            let _ = write!(layout, "\n            {side}: {px}px;");
        }
        let (height, width, direction, overflow) = match style.orientation {
            Orientation::Vertical => (
                "100%".to_string(),
                format!("{}px", style.width),
                "column",
                "overflow-x",
            ),
            Orientation::Horizontal => ("auto".to_string(), "100%".to_string(), "row", "overflow-y"),
        };

        format!(
            "
        .sidebar {{
            position: fixed;{layout}
            height: {height};
            width: {width};
            flex-direction: {direction};
            background-color: {background};
            {overflow}: hidden;
            padding-top: 20px;
        }}

        .sidebar a {{
            color: {text};
        }}

        .sidebar a:hover {{
            color: {hover};
        }}
        ",
            background = style.background_color,
            text = style.text_color,
            hover = style.hover_color,
        )
    }
}
