use super::star::StarRating;
use super::Component;
use serde::Deserialize;
use std::fmt::Write;

const LOGIN_CSS: &str = "
            .login-form {
                background-color: #f5f5f5;
                padding: 20px;
                border: 1px solid #ccc;
                border-radius: 5px;
            }

            .login-form .form-group {
                margin-bottom: 15px;
            }

            .login-form label {
                font-weight: bold;
            }

            .login-form .form-control {
                width: 70%;
                padding: 10px;
                border: 1px solid #ccc;
                border-radius: 3px;
            }

            .login-form .btn-primary {
                background-color: #007bff;
                color: #fff;
                padding: 10px 20px;
                border: none;
                border-radius: 3px;
                cursor: pointer;
            }
        ";

fn default_method() -> String {
    "POST".to_string()
}

fn default_input_type() -> String {
    "text".to_string()
}

fn default_button_type() -> String {
    "submit".to_string()
}

/// One labelled `<input>`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldSpec {
    /// Label text
    #[serde(default)]
    pub label: String,
    /// Input name, the submitted form field
    #[serde(default)]
    pub name: String,
    /// Input type (`text`, `password`, `email`, ...)
    #[serde(rename = "type", default = "default_input_type")]
    pub input_type: String,
}

impl FieldSpec {
    /// Create a field
    pub fn new(label: impl Into<String>, name: impl Into<String>, input_type: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            input_type: input_type.into(),
        }
    }
}

/// Form button
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Button {
    /// Button text
    pub label: String,
    /// Button type
    #[serde(rename = "type", default = "default_button_type")]
    pub button_type: String,
}

impl Button {
    /// Create a button
    pub fn new(label: impl Into<String>, button_type: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            button_type: button_type.into(),
        }
    }
}

impl Component for Button {
    fn render_html(&self) -> String {
        format!(
            r#"
            <button type="{}" class="btn btn-primary">{}</button>
        "#,
            self.button_type, self.label
        )
    }
}

/// Placement of a `.dynamic-form`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormStyle {
    /// CSS width
    pub width: String,
    /// CSS margin-top
    pub margin_top: String,
    /// CSS left
    pub left: String,
    /// CSS right
    pub right: String,
    /// CSS top
    pub top: String,
    /// CSS bottom
    pub bottom: String,
    /// CSS z-index
    pub z_index: String,
    /// Hide the form (`visibility: hidden`)
    pub overlap: bool,
}

impl Default for FormStyle {
    fn default() -> Self {
        Self {
            width: "50%".to_string(),
            margin_top: "50px".to_string(),
            left: "auto".to_string(),
            right: "auto".to_string(),
            top: "auto".to_string(),
            bottom: "auto".to_string(),
            z_index: "auto".to_string(),
            overlap: false,
        }
    }
}

/// HTML form assembled from fields, custom markup and buttons
///
/// Rendered in that order: fields, custom components, buttons.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Form {
    /// Submission URL
    pub action: String,
    /// Submission method
    #[serde(default = "default_method")]
    pub method: String,
    /// Input fields
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    /// Raw markup placed after the fields
    #[serde(default)]
    pub custom_components: Vec<String>,
    /// Buttons
    #[serde(default)]
    pub buttons: Vec<Button>,
}

impl Form {
    /// Empty form posting to `action`
    pub fn new(action: impl Into<String>) -> Self {
        Self::with_method(action, "POST")
    }

    /// Empty form with an explicit method
    pub fn with_method(action: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: method.into(),
            fields: Vec::new(),
            custom_components: Vec::new(),
            buttons: Vec::new(),
        }
    }

    /// Append an input field
    pub fn add_field(&mut self, label: impl Into<String>, name: impl Into<String>, input_type: impl Into<String>) {
        self.fields.push(FieldSpec::new(label, name, input_type));
    }

    /// Append a button
    pub fn add_button(&mut self, label: impl Into<String>, button_type: impl Into<String>) {
        self.buttons.push(Button::new(label, button_type));
    }

    /// Append raw markup
    pub fn add_custom_component(&mut self, html: impl Into<String>) {
        self.custom_components.push(html.into());
    }

    /// Stylesheet for `.dynamic-form` with the given placement
    #[must_use]
    pub fn render_css_with(&self, style: &FormStyle) -> String {
        let visibility = if style.overlap { "hidden" } else { "visible" };
        format!(
            "
            .dynamic-form {{
                width: {width};
                margin: auto;
                padding: 20px;
                border: 1px solid #ccc;
                border-radius: 5px;
                margin-top: {margin_top};
                position: absolute;
                left: {left};
                right: {right};
                top: {top};
                bottom: {bottom};
                z-index: {z_index};
                visibility: {visibility};
                background-color: #f2f2f2;
            }}

            .dynamic-form .form-group {{
                margin-bottom: 15px;
            }}

            .dynamic-form label {{
                display: block;
                font-weight: bold;
            }}

            .dynamic-form .form-control {{
                width: 90%;
                padding: 10px;
                border: 1px solid #ccc;
                border-radius: 3px;
            }}

            .dynamic-form button {{
                display: inline-block;
                padding: 10px 20px;
                margin-top: 10px;
                background-color: #007bff;
                color: #fff;
                border: none;
                border-radius: 3px;
                cursor: pointer;
            }}
        ",
            width = style.width,
            margin_top = style.margin_top,
            left = style.left,
            right = style.right,
            top = style.top,
            bottom = style.bottom,
            z_index = style.z_index,
        )
    }
}

impl Component for Form {
    fn render_html(&self) -> String {
        let mut html = format!(
            r#"
            <form action="{}" method="{}" class="dynamic-form">
        "#,
            self.action, self.method
        );

        for field in &self.fields {
            let _ = write!(
                html,
                r#"
                <div class="form-group">
                    <label for="form-{name}">{label}:</label>
                    <input type="{input_type}" name="{name}" id="form-{name}" class="form-control">
                </div>
            "#,
                name = field.name,
                label = field.label,
                input_type = field.input_type,
            );
        }
        for custom in &self.custom_components {
            html.push_str(custom);
        }
        for button in &self.buttons {
            html.push_str(&button.render_html());
        }

        html.push_str(
            "
                </form>
        ",
        );
        html
    }

    fn render_css(&self) -> String {
        self.render_css_with(&FormStyle::default())
    }
}

/// Form with the given fields and a trailing Submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    form: Form,
}

impl LoginForm {
    /// Build a login form posting to `login_url`
    pub fn new(login_url: impl Into<String>, fields: &[FieldSpec]) -> Self {
        let mut form = Form::new(login_url);
        form.fields.extend_from_slice(fields);
        form.add_button("Submit", "submit");
        Self { form }
    }

    /// The underlying form
    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }
}

impl Component for LoginForm {
    fn render_html(&self) -> String {
        self.form.render_html()
    }

    fn render_css(&self) -> String {
        format!("{}\n{LOGIN_CSS}", self.form.render_css())
    }
}

/// Name, email and a 5-star `stars` rating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackForm {
    form: Form,
}

impl FeedbackForm {
    /// Build a feedback form
    pub fn new(action: impl Into<String>, method: impl Into<String>) -> Self {
        let mut form = Form::with_method(action, method);
        form.add_field("Name", "name", "text");
        form.add_field("Email", "email", "email");
        form.add_custom_component(StarRating::new("stars", 5).render_html());
        form.add_button("Submit", "submit");
        Self { form }
    }

    /// The underlying form
    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }
}

impl Component for FeedbackForm {
    fn render_html(&self) -> String {
        self.form.render_html()
    }

    fn render_css(&self) -> String {
        self.form.render_css()
    }
}
