//! Contact form submitted by site visitors.

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

use crate::domain::inquiry::NewInquiry;
use crate::domain::types::{
    EmailAddress, InquiryMessage, PersonName, RequiredText, TravelerCount,
};
use crate::forms::{FieldError, FormError, not_blank};

/// Raw inquiry payload. Missing fields fall back to empty values so that they
/// are reported as field errors instead of a body parse failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryForm {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "City of residence is required"))]
    pub city_of_residence: String,
    #[validate(custom(function = "not_blank", message = "Phone number is required"))]
    pub phone_number: String,
    pub whatsapp: Option<String>,
    #[validate(custom(function = "not_blank", message = "Travel destination is required"))]
    pub travel_destination: String,
    #[validate(custom(function = "not_blank", message = "Date of travel is required"))]
    pub date_of_travel: String,
    #[validate(range(min = 1, max = 100, message = "Number of people must be between 1 and 100"))]
    pub number_of_people: i64,
    #[validate(custom(function = "not_blank", message = "Vacation type is required"))]
    pub vacation_type: String,
    #[validate(custom(function = "not_blank", message = "Budget range is required"))]
    pub budget_range: String,
    pub message: Option<String>,
}

/// Reads a text field, accepting numbers as their decimal form.
fn text_field(body: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(_) => {
            errors.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}

/// Reads the traveler count, accepting integers and integer strings.
fn count_field(body: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> i64 {
    let count = match body.get(field) {
        None | Some(Value::Null) => return 0,
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        Some(_) => None,
    };
    count.unwrap_or_else(|| {
        errors.push(FieldError::new(field, "must be a whole number"));
        0
    })
}

impl TryFrom<Value> for InquiryForm {
    type Error = FormError;

    /// Builds the form from an arbitrary JSON body. Nulls count as missing,
    /// and values of the wrong type are reported under their field name.
    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let Value::Object(body) = body else {
            return Err(FormError::InvalidFields(vec![FieldError::new(
                "body",
                "must be a JSON object",
            )]));
        };

        let mut errors = Vec::new();
        let mut text = |field: &str| text_field(&body, field, &mut errors);

        let mut form = InquiryForm {
            name: text("name").unwrap_or_default(),
            email: text("email").unwrap_or_default(),
            city_of_residence: text("cityOfResidence").unwrap_or_default(),
            phone_number: text("phoneNumber").unwrap_or_default(),
            whatsapp: text("whatsapp"),
            travel_destination: text("travelDestination").unwrap_or_default(),
            date_of_travel: text("dateOfTravel").unwrap_or_default(),
            number_of_people: 0,
            vacation_type: text("vacationType").unwrap_or_default(),
            budget_range: text("budgetRange").unwrap_or_default(),
            message: text("message"),
        };
        form.number_of_people = count_field(&body, "numberOfPeople", &mut errors);

        if errors.is_empty() {
            Ok(form)
        } else {
            Err(FormError::InvalidFields(errors))
        }
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl TryFrom<InquiryForm> for NewInquiry {
    type Error = FormError;

    fn try_from(mut form: InquiryForm) -> Result<Self, Self::Error> {
        form.email = form.email.trim().to_string();
        form.validate()?;

        Ok(NewInquiry {
            name: PersonName::new(form.name)?,
            email: EmailAddress::new(form.email)?,
            city_of_residence: RequiredText::new(form.city_of_residence)?,
            phone_number: RequiredText::new(form.phone_number)?,
            whatsapp: optional_text(form.whatsapp),
            travel_destination: RequiredText::new(form.travel_destination)?,
            date_of_travel: RequiredText::new(form.date_of_travel)?,
            number_of_people: TravelerCount::new(form.number_of_people)?,
            vacation_type: RequiredText::new(form.vacation_type)?,
            budget_range: RequiredText::new(form.budget_range)?,
            // Markup-only messages sanitize to nothing and are dropped.
            message: optional_text(form.message).and_then(|m| InquiryMessage::new(m).ok()),
        })
    }
}
