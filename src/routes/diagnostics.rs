//! Operational endpoints.

use std::future::Future;
use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::api::SmtpCheckResponse;
use crate::email::{InquiryNotifier, NotificationError};
use crate::models::config::ServerConfig;
use crate::routes::no_cache;

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

async fn bounded<T>(
    timeout: Duration,
    attempt: impl Future<Output = Result<T, NotificationError>>,
) -> Result<T, NotificationError> {
    tokio::time::timeout(timeout, attempt)
        .await
        .unwrap_or(Err(NotificationError::Timeout(timeout)))
}

fn check_failed(check: &str, err: &NotificationError) -> HttpResponse {
    log::warn!("{check} failed [{}]: {err}", err.code());
    no_cache(HttpResponse::InternalServerError()).json(SmtpCheckResponse::failed(err))
}

/// Checks that the mail server accepts our connection and credentials.
#[get("/test-smtp")]
pub async fn test_smtp(
    notifier: web::Data<dyn InquiryNotifier>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let timeout = server_config.notification_timeout();
    match bounded(timeout, notifier.verify_connection()).await {
        Ok(()) => no_cache(HttpResponse::Ok())
            .json(SmtpCheckResponse::passed("SMTP connection verified", None)),
        Err(err) => check_failed("SMTP check", &err),
    }
}

/// Sends a real test message to the operator mailbox.
#[get("/test-email")]
pub async fn test_email(
    notifier: web::Data<dyn InquiryNotifier>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let timeout = server_config.notification_timeout();
    match bounded(timeout, notifier.send_test()).await {
        Ok(delivery) => {
            log::info!("Test email sent: {} ({})", delivery.message_id, delivery.response);
            no_cache(HttpResponse::Ok())
                .json(SmtpCheckResponse::passed("Test email sent", Some(delivery.message_id)))
        }
        Err(err) => check_failed("Test email", &err),
    }
}
