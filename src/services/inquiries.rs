//! Inquiry intake: validate, store, then attempt a one-shot notification.

use std::time::Duration;

use crate::domain::inquiry::{Inquiry, NewInquiry};
use crate::email::{InquiryNotifier, NotificationError};
use crate::forms::inquiries::InquiryForm;
use crate::repository::{InquiryReader, InquiryWriter};
use crate::services::{ServiceError, ServiceResult};

/// What happened to the notification for a stored inquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Delivered { message_id: String },
    Failed { code: &'static str, reason: String },
}

impl NotificationOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotificationOutcome::Delivered { .. })
    }
}

impl From<NotificationError> for NotificationOutcome {
    fn from(err: NotificationError) -> Self {
        NotificationOutcome::Failed {
            code: err.code(),
            reason: err.to_string(),
        }
    }
}

/// A stored inquiry together with the independent notification result.
#[derive(Debug, Clone)]
pub struct InquirySubmission {
    pub inquiry: Inquiry,
    pub notification: NotificationOutcome,
}

/// Returns every stored inquiry in creation order.
pub fn list_inquiries<R>(repo: &R) -> ServiceResult<Vec<Inquiry>>
where
    R: InquiryReader + ?Sized,
{
    repo.list_inquiries().map_err(|err| {
        log::error!("Failed to list inquiries: {err}");
        ServiceError::from(err)
    })
}

/// Validates and stores an inquiry, then notifies the operator.
///
/// Only validation and storage failures are errors. A failed or slow
/// notification is reported in [`InquirySubmission::notification`] and never
/// undoes the stored record.
pub async fn submit_inquiry<R, N>(
    repo: &R,
    notifier: &N,
    timeout: Duration,
    form: InquiryForm,
) -> ServiceResult<InquirySubmission>
where
    R: InquiryWriter + ?Sized,
    N: InquiryNotifier + ?Sized,
{
    let new_inquiry = NewInquiry::try_from(form).map_err(|err| {
        log::info!("Rejected inquiry: {err}");
        err
    })?;

    let inquiry = repo.create_inquiry(new_inquiry).map_err(|err| {
        log::error!("Failed to store inquiry: {err}");
        ServiceError::from(err)
    })?;

    log::info!("Stored inquiry #{}", inquiry.id);
    log::debug!(
        "Inquiry #{} from {} for {}",
        inquiry.id,
        inquiry.email,
        inquiry.travel_destination
    );

    let notification = match tokio::time::timeout(timeout, notifier.send_inquiry(&inquiry)).await
    {
        Ok(Ok(delivery)) => {
            log::info!(
                "Inquiry #{} notification sent: {} ({})",
                inquiry.id,
                delivery.message_id,
                delivery.response
            );
            NotificationOutcome::Delivered {
                message_id: delivery.message_id,
            }
        }
        Ok(Err(err)) => {
            log::warn!(
                "Inquiry #{} notification failed [{}]: {err}",
                inquiry.id,
                err.code()
            );
            err.into()
        }
        Err(_) => {
            let err = NotificationError::Timeout(timeout);
            log::warn!("Inquiry #{} notification failed [{}]: {err}", inquiry.id, err.code());
            err.into()
        }
    };

    Ok(InquirySubmission {
        inquiry,
        notification,
    })
}
