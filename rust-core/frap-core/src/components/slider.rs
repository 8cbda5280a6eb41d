use super::Component;
use serde::Deserialize;

/// Range input with a live value display
///
/// The input's `name` is the label, so the submitted form field is named
/// after it (the demo site posts `Slider`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Slider {
    /// Label, also used as input id and name
    pub label: String,
    /// Minimum value
    pub min_value: i64,
    /// Maximum value
    pub max_value: i64,
    /// Initial value
    pub default_value: i64,
    /// Step size
    pub step: i64,
}

impl Slider {
    /// Create a slider
    pub fn new(label: impl Into<String>, min_value: i64, max_value: i64, default_value: i64, step: i64) -> Self {
        Self {
            label: label.into(),
            min_value,
            max_value,
            default_value,
            step,
        }
    }
}

impl Component for Slider {
    fn render_html(&self) -> String {
        format!(
            r#"
            <label>{label}</label>
            <input type="range" id="{label}" name="{label}"
                   min="{min}" max="{max}"
                   value="{value}" step="{step}">
            <span id="{label}-value">{value}</span>
            <br>
        "#,
            label = self.label,
            min = self.min_value,
            max = self.max_value,
            value = self.default_value,
            step = self.step,
        )
    }

    fn render_js(&self) -> String {
        format!(
            r#"
            $(document).ready(function() {{
                $('input[type="range"]').on('input', function() {{
                    var label = $(this).attr('id');
                    var value = $(this).val();
                    $('#{label}-value').text(value);
                }});
            }});
        "#,
            label = self.label
        )
    }
}
