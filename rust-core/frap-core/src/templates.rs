//! # Templates
//!
//! Page templates rendered with MiniJinja.
//!
//! The HTML files under `templates/` are embedded at compile time. Values
//! are auto-escaped; component markup must be wrapped with [`markup`] to be
//! emitted verbatim.

use crate::error::Result;
use minijinja::{Environment, Value};
use serde::Serialize;
use tracing::debug;

pub use minijinja::context;

const TEMPLATES: &[(&str, &str)] = &[
    ("index.html", include_str!("../templates/index.html")),
    ("LoginPage.html", include_str!("../templates/LoginPage.html")),
    ("Messageboard.html", include_str!("../templates/Messageboard.html")),
];

/// Embedded template set
#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load the embedded templates
    ///
    /// # Errors
    ///
    /// Returns `Error::Template` if a template fails to parse.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render template `name` with `context`
    ///
    /// # Errors
    ///
    /// Returns `Error::Template` for an unknown template or a render failure.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String> {
        debug!(template = name, "Rendering template");
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }

    /// Names of the loaded templates
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.env.templates().map(|(name, _)| name)
    }
}

/// Trusted HTML, rendered without escaping
pub fn markup(html: impl Into<String>) -> Value {
    Value::from_safe_string(html.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_all_templates_load() {
        let templates = Templates::new().unwrap();
        let mut names: Vec<_> = templates.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["LoginPage.html", "Messageboard.html", "index.html"]);
    }

    #[test]
    fn test_render_index() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render("index.html", context! { login_url => markup("/login") })
            .unwrap();
        assert!(html.contains("Welcome to the site hosted on Frap server"));
        assert!(html.contains(r#"<a href="/login">Login</a>"#));
    }

    #[test]
    fn test_messages_are_escaped() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render(
                "Messageboard.html",
                context! { messages => vec!["hello", "<b>bold</b>"], message_url => markup("/message") },
            )
            .unwrap();
        assert!(html.contains("<title>Message Board</title>"));
        assert!(html.contains("<li>hello</li>"));
        assert!(html.contains("<li>&lt;b&gt;bold"));
        assert!(!html.contains("<b>"));
        assert!(html.contains(r#"action="/message""#));
    }

    #[test]
    fn test_markup_is_not_escaped() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render("LoginPage.html", context! { login_form => markup("<form></form>") })
            .unwrap();
        assert!(html.contains("Login Page"));
        assert!(html.contains("<form></form>"));
    }

    #[test]
    fn test_unknown_template() {
        let templates = Templates::new().unwrap();
        let err = templates.render("missing.html", context! {}).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }
}
