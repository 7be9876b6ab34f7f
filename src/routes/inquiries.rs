use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::Value;

use crate::dto::api::InquiryCreatedResponse;
use crate::email::InquiryNotifier;
use crate::forms::inquiries::InquiryForm;
use crate::models::config::ServerConfig;
use crate::repository::MemoryRepository;
use crate::routes::{error_body, error_response, no_cache};
use crate::services::ServiceError;
use crate::services::inquiries as inquiry_service;

#[get("/inquiries")]
pub async fn list_inquiries(
    repo: web::Data<MemoryRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match inquiry_service::list_inquiries(repo.get_ref()) {
        Ok(inquiries) => HttpResponse::Ok().json(inquiries),
        Err(err) => error_response(&err, server_config.is_development()),
    }
}

#[post("/inquiries")]
pub async fn submit_inquiry(
    body: web::Json<Value>,
    repo: web::Data<MemoryRepository>,
    notifier: web::Data<dyn InquiryNotifier>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let result = match InquiryForm::try_from(body.into_inner()) {
        Ok(form) => {
            inquiry_service::submit_inquiry(
                repo.get_ref(),
                notifier.get_ref(),
                server_config.notification_timeout(),
                form,
            )
            .await
        }
        Err(err) => Err(ServiceError::from(err)),
    };

    match result {
        Ok(submission) => {
            no_cache(HttpResponse::Created()).json(InquiryCreatedResponse::from(submission))
        }
        Err(err) => {
            let (status, body) = error_body(&err, server_config.is_development());
            no_cache(HttpResponse::build(status)).json(body.stamped())
        }
    }
}
