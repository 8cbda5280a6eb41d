use super::Component;
use serde::Deserialize;
use std::fmt::Write;

const STAR_CSS: &str = r"
        <style>
            .star-rating {
                display: flex;
                align-items: center;
                width: 160px;
                flex-direction: row-reverse;
                justify-content: space-between;
                margin: 0px auto;
                position: relative;
            }
            /* hide the inputs */
            .star-rating input {
                display: none;
            }
            .star-rating > label {
                width: 30px;
                height: 30px;
                font-family: Arial;
                font-size: 30px;
                transition: 0.2s ease;
                color: orange;
            }
            .star-rating label:hover {
                color: #ff69b4;
                transition: 0.2s ease;
            }
            .star-rating label:active::before {
                transform:scale(1.1);
            }
            /* empty star */
            .star-rating label::before {
                content: '\2606';
                position: absolute;
                top: 0px;
                line-height: 26px;
            }
            /* checked label and the ones after it render as full stars */
            .star-rating input:checked ~ label:before {
                content:'\2605';
            }
            @-moz-document url-prefix() {
                .star-rating input:checked ~ label:before {
                    font-size: 36px;
                    line-height: 21px;
                }
            }
        </style>
        ";

/// Radio-button star rating
///
/// Inputs are emitted from `num_stars` down to 1; the row-reverse flex
/// layout puts star 1 on the left.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StarRating {
    /// Radio group name, the submitted form field
    pub name: String,
    /// Number of stars
    pub num_stars: u32,
}

impl StarRating {
    /// Create a rating
    pub fn new(name: impl Into<String>, num_stars: u32) -> Self {
        Self {
            name: name.into(),
            num_stars,
        }
    }
}

impl Component for StarRating {
    fn render_html(&self) -> String {
        let mut stars = String::new();
        for value in (1..=self.num_stars).rev() {
            let _ = write!(
                stars,
                r#"
            <input type="radio" name="{name}" id="{name}-{value}" value="{value}"/>
            <label for="{name}-{value}"></label>
            "#,
                name = self.name,
            );
        }

        format!(
            r#"
            {STAR_CSS}
            <div class="star-rating">
                {stars}
            </div>
        "#
        )
    }
}
