use tera::{Context, Tera};

use crate::domain::inquiry::Inquiry;

pub const INQUIRY_TEMPLATE: &str = "email/inquiry.html";

pub fn inquiry_subject(inquiry: &Inquiry) -> String {
    format!("New Travel Inquiry from {}", inquiry.name)
}

/// Renders the HTML body sent to the operator. Values are auto-escaped.
pub fn render_inquiry_email(tera: &Tera, inquiry: &Inquiry) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("inquiry", inquiry);
    context.insert(
        "submitted_at",
        &inquiry.created_at.format("%d %b %Y, %H:%M UTC").to_string(),
    );
    tera.render(INQUIRY_TEMPLATE, &context)
}
