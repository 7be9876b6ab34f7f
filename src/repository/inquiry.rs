use chrono::Utc;

use crate::domain::inquiry::{Inquiry, NewInquiry};
use crate::domain::types::InquiryId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{InquiryReader, InquiryWriter, MemoryRepository};

impl InquiryReader for MemoryRepository {
    fn list_inquiries(&self) -> RepositoryResult<Vec<Inquiry>> {
        Ok(self.catalog.read().inquiries.clone())
    }
}

impl InquiryWriter for MemoryRepository {
    fn create_inquiry(&self, new_inquiry: NewInquiry) -> RepositoryResult<Inquiry> {
        let mut catalog = self.catalog.write();

        let id = InquiryId::new(catalog.next_inquiry_id)?;
        catalog.next_inquiry_id = catalog
            .next_inquiry_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Unexpected("inquiry id space exhausted".into()))?;

        // Stamped under the write lock so timestamps never run backwards against ids.
        let inquiry = new_inquiry.into_inquiry(id, Utc::now());
        catalog.inquiries.push(inquiry.clone());

        Ok(inquiry)
    }
}
