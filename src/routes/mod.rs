use actix_web::error::{InternalError, JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::services::ServiceError;

pub mod categories;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Map a service failure onto its HTTP status and error code.
pub fn service_error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound(message) => {
            log::warn!("Category not found: {message}");
            HttpResponse::NotFound().json(ErrorResponse::new("CATEGORY_NOT_FOUND", message))
        }
        err @ ServiceError::HasChildren(_) => HttpResponse::BadRequest()
            .json(ErrorResponse::new("CATEGORY_HAS_CHILDREN", err.to_string())),
        err @ ServiceError::CircularReference { .. } => HttpResponse::BadRequest()
            .json(ErrorResponse::new("CIRCULAR_REFERENCE", err.to_string())),
        ServiceError::InvalidArgument(message) => {
            HttpResponse::BadRequest().json(ErrorResponse::new("INVALID_ARGUMENT", message))
        }
        ServiceError::Internal => HttpResponse::InternalServerError().json(ErrorResponse::new(
            "INTERNAL_ERROR",
            "An unexpected error occurred",
        )),
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body: {err}");
    let response =
        HttpResponse::BadRequest().json(ErrorResponse::new("VALIDATION_FAILED", err.to_string()));
    InternalError::from_response(err, response).into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ErrorResponse::new("INVALID_ARGUMENT", err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Register every route of the service together with JSON extractor errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(categories::create_category)
        .service(categories::get_all_categories)
        .service(categories::category_statistics)
        .service(categories::get_category)
        .service(categories::get_category_tree)
        .service(categories::update_category)
        .service(categories::delete_category);
}
