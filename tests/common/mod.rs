#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use wandrivo::domain::inquiry::Inquiry;
use wandrivo::email::{Delivery, InquiryNotifier, NotificationError};
use wandrivo::models::config::{Environment, ServerConfig, SmtpConfig};

pub fn server_config(environment: Environment) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        environment,
        templates_dir: "templates/**/*".to_string(),
        static_dir: None,
        notification_timeout_secs: 1,
        smtp: SmtpConfig {
            host: "smtp.invalid".to_string(),
            port: 587,
            username: None,
            password: None,
            from_email: "site@wandrivo.test".to_string(),
            to_email: "bookings@wandrivo.test".to_string(),
            timeout_secs: 1,
        },
    }
}

/// Accepts every notification and counts the attempts.
#[derive(Default)]
pub struct RecordingNotifier {
    pub calls: AtomicUsize,
}

impl RecordingNotifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InquiryNotifier for RecordingNotifier {
    async fn send_inquiry(&self, inquiry: &Inquiry) -> Result<Delivery, NotificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Delivery {
            message_id: format!("<inquiry-{}@wandrivo.test>", inquiry.id),
            response: "250 2.0.0 OK".to_string(),
        })
    }

    async fn verify_connection(&self) -> Result<(), NotificationError> {
        Ok(())
    }

    async fn send_test(&self) -> Result<Delivery, NotificationError> {
        Ok(Delivery {
            message_id: "<test@wandrivo.test>".to_string(),
            response: "250 2.0.0 OK".to_string(),
        })
    }
}

/// Rejects every notification with the given error.
pub struct FailingNotifier(pub NotificationError);

#[async_trait]
impl InquiryNotifier for FailingNotifier {
    async fn send_inquiry(&self, _inquiry: &Inquiry) -> Result<Delivery, NotificationError> {
        Err(self.0.clone())
    }

    async fn verify_connection(&self) -> Result<(), NotificationError> {
        Err(self.0.clone())
    }

    async fn send_test(&self) -> Result<Delivery, NotificationError> {
        Err(self.0.clone())
    }
}

/// Never answers within any reasonable timeout.
pub struct HangingNotifier;

#[async_trait]
impl InquiryNotifier for HangingNotifier {
    async fn send_inquiry(&self, _inquiry: &Inquiry) -> Result<Delivery, NotificationError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(NotificationError::Transport("unreachable".to_string()))
    }

    async fn verify_connection(&self) -> Result<(), NotificationError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }

    async fn send_test(&self) -> Result<Delivery, NotificationError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(NotificationError::Transport("unreachable".to_string()))
    }
}

pub fn shared<N: InquiryNotifier + 'static>(notifier: N) -> Arc<N> {
    Arc::new(notifier)
}

/// Builds the API application around the given store, notifier and config.
macro_rules! api_app {
    ($repo:expr, $notifier:expr, $config:expr) => {{
        let notifier: std::sync::Arc<dyn wandrivo::email::InquiryNotifier> = $notifier;
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(wandrivo::configure_api)
                .app_data(actix_web::web::Data::new($repo))
                .app_data(actix_web::web::Data::from(notifier))
                .app_data(actix_web::web::Data::new($config)),
        )
        .await
    }};
}
