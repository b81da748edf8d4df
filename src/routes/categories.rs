use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::cache::CategoryCache;
use crate::domain::types::CategoryId;
use crate::forms::categories::CategoryForm;
use crate::repository::DieselRepository;
use crate::routes::{ErrorResponse, service_error_response};
use crate::services::categories::{
    CreateCategoryCommand, category_statistics as category_statistics_service,
    create_category as create_category_service, delete_category as delete_category_service,
    get_all_categories as get_all_categories_service, get_category as get_category_service,
    get_category_tree as get_category_tree_service, update_category as update_category_service,
};

fn invalid_argument(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new("INVALID_ARGUMENT", message))
}

fn validation_failed(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new("VALIDATION_FAILED", message))
}

fn path_category_id(category_id: web::Path<i32>) -> Result<CategoryId, HttpResponse> {
    CategoryId::new(category_id.into_inner()).map_err(|e| invalid_argument(e.to_string()))
}

#[post("/api/v1/categories")]
pub async fn create_category(
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let command: CreateCategoryCommand = match form.try_into() {
        Ok(command) => command,
        Err(e) => return validation_failed(e.to_string()),
    };

    match create_category_service(command, repo.get_ref(), cache.get_ref()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => service_error_response(err),
    }
}

#[get("/api/v1/categories")]
pub async fn get_all_categories(
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
) -> impl Responder {
    match get_all_categories_service(repo.get_ref(), cache.get_ref()) {
        Ok(tree) => HttpResponse::Ok().json(tree),
        Err(err) => service_error_response(err),
    }
}

#[get("/api/v1/categories/stats")]
pub async fn category_statistics(
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
) -> impl Responder {
    match category_statistics_service(repo.get_ref(), cache.get_ref()) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(err) => service_error_response(err),
    }
}

#[get("/api/v1/categories/{category_id}")]
pub async fn get_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
) -> impl Responder {
    let category_id = match path_category_id(category_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match get_category_service(category_id, repo.get_ref(), cache.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => service_error_response(err),
    }
}

#[get("/api/v1/categories/{category_id}/tree")]
pub async fn get_category_tree(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
) -> impl Responder {
    let category_id = match path_category_id(category_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match get_category_tree_service(category_id, repo.get_ref(), cache.get_ref()) {
        Ok(tree) => HttpResponse::Ok().json(tree),
        Err(err) => service_error_response(err),
    }
}

#[put("/api/v1/categories/{category_id}")]
pub async fn update_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let category_id = match path_category_id(category_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let command = match form.into_update_command(category_id) {
        Ok(command) => command,
        Err(e) => return validation_failed(e.to_string()),
    };

    match update_category_service(command, repo.get_ref(), cache.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => service_error_response(err),
    }
}

#[delete("/api/v1/categories/{category_id}")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
) -> impl Responder {
    let category_id = match path_category_id(category_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match delete_category_service(category_id, repo.get_ref(), cache.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err),
    }
}
