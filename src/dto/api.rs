//! DTOs exposed by the JSON API endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::inquiry::Inquiry;
use crate::email::NotificationError;
use crate::forms::FieldError;
use crate::services::inquiries::{InquirySubmission, NotificationOutcome};

/// Body of a successful `POST /api/inquiries`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryCreatedResponse {
    #[serde(flatten)]
    pub inquiry: Inquiry,
    pub email_sent: bool,
    pub email_message_id: Option<String>,
    pub email_error: Option<String>,
    pub email_error_code: Option<&'static str>,
    pub timestamp: DateTime<Utc>,
}

impl From<InquirySubmission> for InquiryCreatedResponse {
    fn from(submission: InquirySubmission) -> Self {
        let (email_sent, email_message_id, email_error, email_error_code) =
            match submission.notification {
                NotificationOutcome::Delivered { message_id } => (true, Some(message_id), None, None),
                NotificationOutcome::Failed { code, reason } => {
                    (false, None, Some(reason), Some(code))
                }
            };

        Self {
            inquiry: submission.inquiry,
            email_sent,
            email_message_id,
            email_error,
            email_error_code,
            timestamp: Utc::now(),
        }
    }
}

/// Error body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    /// Internal detail, only populated in development.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
            error: None,
            timestamp: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.error = detail;
        self
    }

    pub fn stamped(mut self) -> Self {
        self.timestamp = Some(Utc::now());
        self
    }
}

/// Body of `GET /api/test-smtp` and `GET /api/test-email`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpCheckResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl SmtpCheckResponse {
    pub fn passed(message: impl Into<String>, message_id: Option<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            error_code: None,
            message_id,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(err: &NotificationError) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(err.to_string()),
            error_code: Some(err.code()),
            message_id: None,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inquiry::NewInquiry;
    use crate::domain::types::{EmailAddress, InquiryId, PersonName, RequiredText, TravelerCount};

    fn submission(notification: NotificationOutcome) -> InquirySubmission {
        let inquiry = NewInquiry {
            name: PersonName::new("Asha").unwrap(),
            email: EmailAddress::new("asha@example.com").unwrap(),
            city_of_residence: RequiredText::new("Pune").unwrap(),
            phone_number: RequiredText::new("123").unwrap(),
            whatsapp: None,
            travel_destination: RequiredText::new("Goa").unwrap(),
            date_of_travel: RequiredText::new("December").unwrap(),
            number_of_people: TravelerCount::new(2).unwrap(),
            vacation_type: RequiredText::new("beach").unwrap(),
            budget_range: RequiredText::new("any").unwrap(),
            message: None,
        }
        .into_inquiry(InquiryId::new(3).unwrap(), Utc::now());

        InquirySubmission {
            inquiry,
            notification,
        }
    }

    #[test]
    fn failed_notification_is_flattened_next_to_inquiry() {
        let response = InquiryCreatedResponse::from(submission(NotificationOutcome::Failed {
            code: "ETIMEDOUT",
            reason: "email delivery timed out after 25s".to_string(),
        }));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["cityOfResidence"], "Pune");
        assert_eq!(json["numberOfPeople"], 2);
        assert_eq!(json["emailSent"], false);
        assert!(json["emailMessageId"].is_null());
        assert_eq!(json["emailError"], "email delivery timed out after 25s");
        assert_eq!(json["emailErrorCode"], "ETIMEDOUT");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn delivered_notification_carries_message_id() {
        let response = InquiryCreatedResponse::from(submission(NotificationOutcome::Delivered {
            message_id: "<abc@example.com>".to_string(),
        }));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["emailSent"], true);
        assert_eq!(json["emailMessageId"], "<abc@example.com>");
        assert!(json["emailError"].is_null());
    }

    #[test]
    fn error_response_omits_empty_parts() {
        let json = serde_json::to_value(ErrorResponse::new("Package not found")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Package not found" }));
    }
}
