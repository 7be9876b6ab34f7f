use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    EmailAddress, InquiryId, InquiryMessage, PersonName, RequiredText, TravelerCount,
};

/// A stored visitor lead. Never updated once created.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub city_of_residence: RequiredText,
    pub phone_number: RequiredText,
    pub whatsapp: Option<String>,
    pub travel_destination: RequiredText,
    pub date_of_travel: RequiredText,
    pub number_of_people: TravelerCount,
    pub vacation_type: RequiredText,
    pub budget_range: RequiredText,
    pub message: Option<InquiryMessage>,
    pub created_at: DateTime<Utc>,
}

/// Validated inquiry waiting for the store to assign `id` and `created_at`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewInquiry {
    pub name: PersonName,
    pub email: EmailAddress,
    pub city_of_residence: RequiredText,
    pub phone_number: RequiredText,
    pub whatsapp: Option<String>,
    pub travel_destination: RequiredText,
    pub date_of_travel: RequiredText,
    pub number_of_people: TravelerCount,
    pub vacation_type: RequiredText,
    pub budget_range: RequiredText,
    pub message: Option<InquiryMessage>,
}

impl NewInquiry {
    #[must_use]
    pub fn into_inquiry(self, id: InquiryId, created_at: DateTime<Utc>) -> Inquiry {
        Inquiry {
            id,
            name: self.name,
            email: self.email,
            city_of_residence: self.city_of_residence,
            phone_number: self.phone_number,
            whatsapp: self.whatsapp,
            travel_destination: self.travel_destination,
            date_of_travel: self.date_of_travel,
            number_of_people: self.number_of_people,
            vacation_type: self.vacation_type,
            budget_range: self.budget_range,
            message: self.message,
            created_at,
        }
    }
}
