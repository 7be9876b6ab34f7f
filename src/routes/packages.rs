use actix_web::{HttpResponse, Responder, get, post, web};

use crate::forms::packages::{PackageForm, PackageSearchForm};
use crate::models::config::ServerConfig;
use crate::repository::MemoryRepository;
use crate::routes::error_response;
use crate::services::packages as package_service;

#[get("/packages")]
pub async fn list_packages(
    params: web::Query<PackageSearchForm>,
    repo: web::Data<MemoryRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match package_service::list_packages(repo.get_ref(), params.into_inner()) {
        Ok(packages) => HttpResponse::Ok().json(packages),
        Err(err) => error_response(&err, server_config.is_development()),
    }
}

#[get("/packages/by-destination/{name}")]
pub async fn package_by_destination(
    name: web::Path<String>,
    repo: web::Data<MemoryRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match package_service::get_package_by_destination(repo.get_ref(), &name) {
        Ok(package) => HttpResponse::Ok().json(package),
        Err(err) => error_response(&err, server_config.is_development()),
    }
}

#[get("/packages/{id}")]
pub async fn show_package(
    id: web::Path<String>,
    repo: web::Data<MemoryRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match package_service::get_package(repo.get_ref(), &id) {
        Ok(package) => HttpResponse::Ok().json(package),
        Err(err) => error_response(&err, server_config.is_development()),
    }
}

#[post("/packages")]
pub async fn create_package(
    form: web::Json<PackageForm>,
    repo: web::Data<MemoryRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match package_service::create_package(repo.get_ref(), form.into_inner()) {
        Ok(package) => HttpResponse::Created().json(package),
        Err(err) => error_response(&err, server_config.is_development()),
    }
}
