#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::email::InquiryNotifier;
#[cfg(feature = "server")]
use crate::email::smtp::SmtpNotifier;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::MemoryRepository;

pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod email;
pub mod error_conversions;
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Registers the `/api` scope and its request body handlers.
#[cfg(feature = "server")]
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(routes::query_error_handler))
            .service(routes::packages::list_packages)
            .service(routes::packages::create_package)
            .service(routes::packages::package_by_destination)
            .service(routes::packages::show_package)
            .service(routes::inquiries::list_inquiries)
            .service(routes::inquiries::submit_inquiry)
            .service(routes::diagnostics::health)
            .service(routes::diagnostics::test_smtp)
            .service(routes::diagnostics::test_email),
    );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = MemoryRepository::seeded()
        .map_err(|e| std::io::Error::other(format!("Failed to load package catalog: {e}")))?;

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    if server_config.smtp.credentials().is_none() {
        log::warn!("SMTP credentials are not configured; inquiry emails will not be sent");
    }

    let notifier: Arc<dyn InquiryNotifier> =
        Arc::new(SmtpNotifier::new(server_config.smtp.clone(), tera));
    let notifier = web::Data::from(notifier);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting server on {}:{} ({:?})",
        bind_address.0,
        bind_address.1,
        server_config.environment
    );

    HttpServer::new(move || {
        let app = App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(configure_api)
            .app_data(web::Data::new(repo.clone()))
            .app_data(notifier.clone())
            .app_data(web::Data::new(server_config.clone()));

        match &server_config.static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind(bind_address)?
    .run()
    .await
}
