//! Business workflows shared by the HTTP routes.

pub mod errors;
pub mod inquiries;
pub mod packages;

pub use errors::{ServiceError, ServiceResult};
