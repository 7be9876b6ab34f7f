//! Outbound notification of new inquiries.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::inquiry::Inquiry;

pub mod smtp;
pub mod template;

/// Successful hand-off of a notification to the mail provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// `Message-ID` assigned to the outgoing message.
    pub message_id: String,
    /// Final reply line from the provider.
    pub response: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("email transport is not configured: {0}")]
    Config(String),

    #[error("authentication with the mail server failed: {0}")]
    Auth(String),

    #[error("email delivery timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("invalid email envelope: {0}")]
    Envelope(String),

    #[error("email transport failed: {0}")]
    Transport(String),
}

impl NotificationError {
    /// Machine-readable code reported to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            NotificationError::Config(_) => "ECONFIG",
            NotificationError::Auth(_) => "EAUTH",
            NotificationError::Timeout(_) => "ETIMEDOUT",
            NotificationError::Envelope(_) => "EENVELOPE",
            NotificationError::Transport(_) => "ETRANSPORT",
        }
    }
}

/// Delivers inquiry notifications to the site operator.
#[async_trait]
pub trait InquiryNotifier: Send + Sync {
    async fn send_inquiry(&self, inquiry: &Inquiry) -> Result<Delivery, NotificationError>;

    /// Opens and authenticates a connection without sending anything.
    async fn verify_connection(&self) -> Result<(), NotificationError>;

    /// Sends a short test message to the operator mailbox.
    async fn send_test(&self) -> Result<Delivery, NotificationError>;
}
