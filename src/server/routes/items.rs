//! Item CRUD and batch processing endpoints

use crate::core::items::ItemRequest;
use crate::server::AppState;
use crate::utils::error::{ApiError, ServiceError};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

/// Reject non-positive identifiers before they reach the store
fn positive(id: i64, req: &HttpRequest) -> Result<i64, ApiError> {
    if id <= 0 {
        return Err(ApiError::new(
            ServiceError::invalid_parameter("id: must be greater than 0"),
            req.path(),
        ));
    }
    Ok(id)
}

/// List all items
/// GET /items
pub async fn list_items(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let items = state
        .items
        .find_all()
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;
    Ok(HttpResponse::Ok().json(items))
}

/// Fetch a single item
/// GET /items/{id}
pub async fn get_item(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = positive(path.into_inner(), &req)?;

    let item = state
        .items
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::new(e, req.path()))?
        .ok_or_else(|| ApiError::new(ServiceError::not_found("Item not found"), req.path()))?;
    Ok(HttpResponse::Ok().json(item))
}

/// Create a new item from the validated request body
/// POST /items
pub async fn create_item(
    state: web::Data<AppState>,
    payload: web::Json<ItemRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let created = state
        .items
        .create(payload.into_inner())
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;
    Ok(HttpResponse::Created().json(created))
}

/// Update an existing item
/// PUT /items/{id}
pub async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<ItemRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = positive(path.into_inner(), &req)?;

    let updated = state
        .items
        .update(id, payload.into_inner())
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete an item
/// DELETE /items/{id}
pub async fn delete_item(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = positive(path.into_inner(), &req)?;

    state
        .items
        .delete(id)
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Process all items and return the ones that succeeded
/// GET /items/process
///
/// Always answers 200 with the (possibly empty) list of successfully
/// processed items; per-item failures are logged and excluded. Only a
/// failure of the initial bulk read surfaces as 500.
pub async fn process_items(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    info!("Batch processing requested");
    let processed = state
        .items
        .process_items()
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;
    Ok(HttpResponse::Ok().json(processed))
}

/// Configure item endpoints
///
/// `/items/process` is registered before `/items/{id}` so the literal
/// segment is not parsed as an identifier.
pub fn configure_item_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/items")
            .route("", web::get().to(list_items))
            .route("", web::post().to(create_item))
            .route("/process", web::get().to(process_items))
            .route("/{id}", web::get().to(get_item))
            .route("/{id}", web::put().to(update_item))
            .route("/{id}", web::delete().to(delete_item)),
    );
}
