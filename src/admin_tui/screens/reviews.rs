//! Review screen

use ratatui::{
    text::{Line, Span},
    widgets::ListItem,
};

use super::resource::Resource;
use crate::admin_tui::{
    components::{DropdownOption, Form, FormError, FormField, FormFieldType},
    ui::{format_date, Styles},
};
use crate::models::{NewReview, ResourceKind, Review};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// `n` star glyphs
pub fn stars(n: i64) -> String {
    "★".repeat(n.clamp(0, MAX_RATING) as usize)
}

pub struct Reviews;

impl Resource for Reviews {
    type Record = Review;
    type Payload = NewReview;

    const KIND: ResourceKind = ResourceKind::Reviews;
    const MISSING_FIELDS_MESSAGE: &'static str = "Please fill in all fields";
    const LOAD_FAILED_MESSAGE: &'static str = "Failed to fetch reviews";
    const CREATE_FAILED_MESSAGE: &'static str = "Error creating review";
    const USES_SERVER_MESSAGE: bool = true;
    const COLUMNS: &'static [&'static str] = &["Review", "User", "Product", "Rating", "Date", "Text"];

    fn fields() -> Vec<FormField> {
        let ratings = (MIN_RATING..=MAX_RATING)
            .map(|n| DropdownOption {
                value: n.to_string(),
                label: format!("{} {}", n, stars(n)),
            })
            .collect();

        vec![
            FormField::new("product_id", "Product ID", FormFieldType::Number).with_placeholder("Product ID"),
            FormField::new("user_id", "User ID", FormFieldType::Number).with_placeholder("User ID"),
            FormField::new("rating", "Rating", FormFieldType::Dropdown)
                .with_placeholder("Select Rating")
                .with_dropdown_options(ratings),
            FormField::new("review_text", "Review", FormFieldType::TextArea)
                .with_placeholder("Write your review..."),
        ]
    }

    fn build_payload(form: &Form) -> Result<NewReview, FormError> {
        let rating = form.integer_in_range("rating", MIN_RATING, MAX_RATING)?;
        Ok(NewReview {
            user_id: form.integer("user_id")?,
            product_id: form.integer("product_id")?,
            rating: rating as u8,
            review_text: form.text("review_text"),
        })
    }

    fn record_item(review: &Review) -> ListItem<'static> {
        let mut footer = format!("Product #{}", review.product_id);
        if let Some(created_at) = &review.created_at {
            footer.push_str(&format!(" • {}", format_date(created_at)));
        }

        ListItem::new(vec![
            Line::from(vec![
                Span::styled(format!("User #{}", review.user_id), Styles::inactive()),
                Span::raw("  "),
                Span::styled(review.rating.to_string(), Styles::warning()),
            ]),
            Line::from(review.review_text.clone()),
            Line::from(Span::styled(footer, Styles::inactive())),
            Line::from(""),
        ])
    }

    fn table_row(review: &Review) -> Vec<String> {
        vec![
            review.review_id.to_string(),
            review.user_id.to_string(),
            review.product_id.to_string(),
            review.rating.to_string(),
            review.created_at.as_deref().map(format_date).unwrap_or_default(),
            review.review_text.clone(),
        ]
    }
}
