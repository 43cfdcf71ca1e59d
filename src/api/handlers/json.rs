// src/api/handlers/json.rs

use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

use crate::api::types::{
    ErrorResponse, HistoryEntryResponse, HistoryListResponse, JsonRequest, JsonResponse,
    SuccessResponse,
};
use crate::api::utils::error_response;
use crate::api::AppState;
use crate::core::error::ToolError;
use crate::core::history::MAX_ENTRIES;
use crate::tools::json;
use crate::utils::format_bytes;

/// Pretty-print JSON
#[utoipa::path(
    post,
    path = "/json/format",
    tag = "JSON",
    request_body = JsonRequest,
    responses(
        (status = 200, description = "Formatted JSON", body = JsonResponse),
        (status = 400, description = "Invalid JSON", body = ErrorResponse)
    )
)]
pub async fn format_json(req: web::Json<JsonRequest>) -> impl Responder {
    match json::format(&req.content) {
        Ok(output) => HttpResponse::Ok().json(JsonResponse {
            success: true,
            output,
        }),
        Err(e) => error_response(&e),
    }
}

/// Minify JSON
#[utoipa::path(
    post,
    path = "/json/compress",
    tag = "JSON",
    request_body = JsonRequest,
    responses(
        (status = 200, description = "Compressed JSON", body = JsonResponse),
        (status = 400, description = "Invalid JSON", body = ErrorResponse)
    )
)]
pub async fn compress_json(req: web::Json<JsonRequest>) -> impl Responder {
    match json::compress(&req.content) {
        Ok(output) => HttpResponse::Ok().json(JsonResponse {
            success: true,
            output,
        }),
        Err(e) => error_response(&e),
    }
}

/// Check that text parses as JSON
#[utoipa::path(
    post,
    path = "/json/validate",
    tag = "JSON",
    request_body = JsonRequest,
    responses(
        (status = 200, description = "Valid JSON", body = SuccessResponse),
        (status = 400, description = "Invalid JSON", body = ErrorResponse)
    )
)]
pub async fn validate_json(req: web::Json<JsonRequest>) -> impl Responder {
    match json::validate(&req.content) {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse {
            success: true,
            message: Some("JSON is valid".to_string()),
            error: None,
        }),
        Err(e) => error_response(&e),
    }
}

/// List saved JSON history
///
/// Entries are returned oldest first.
#[utoipa::path(
    get,
    path = "/json/history",
    tag = "JSON",
    responses(
        (status = 200, description = "History entries", body = HistoryListResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_history(state: web::Data<AppState>) -> impl Responder {
    let history = match state.history() {
        Ok(history) => history,
        Err(e) => return error_response(&e),
    };

    let total_bytes = history.total_bytes();
    HttpResponse::Ok().json(HistoryListResponse {
        success: true,
        entries: history.list().to_vec(),
        count: history.len(),
        max_entries: MAX_ENTRIES,
        total_bytes,
        total_size: format_bytes(total_bytes),
    })
}

/// Save JSON text to history
///
/// The oldest entry is evicted once the history is full.
#[utoipa::path(
    post,
    path = "/json/history",
    tag = "JSON",
    request_body = JsonRequest,
    responses(
        (status = 200, description = "Saved entry", body = HistoryEntryResponse),
        (status = 400, description = "Empty content", body = ErrorResponse),
        (status = 413, description = "Content too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn save_history(state: web::Data<AppState>, req: web::Json<JsonRequest>) -> impl Responder {
    let mut history = match state.history() {
        Ok(history) => history,
        Err(e) => return error_response(&e),
    };

    match history.save(&req.content) {
        Ok(entry) => HttpResponse::Ok().json(HistoryEntryResponse {
            success: true,
            entry,
        }),
        Err(e) => error_response(&e),
    }
}

/// Fetch one history entry
#[utoipa::path(
    get,
    path = "/json/history/{id}",
    tag = "JSON",
    params(
        ("id" = Uuid, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "History entry", body = HistoryEntryResponse),
        (status = 404, description = "No such entry", body = ErrorResponse)
    )
)]
pub async fn get_history_entry(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    let history = match state.history() {
        Ok(history) => history,
        Err(e) => return error_response(&e),
    };

    match history.get(id) {
        Some(entry) => HttpResponse::Ok().json(HistoryEntryResponse {
            success: true,
            entry: entry.clone(),
        }),
        None => error_response(&ToolError::EntryNotFound(id.to_string())),
    }
}

/// Delete one history entry
///
/// Deleting an unknown ID succeeds and changes nothing.
#[utoipa::path(
    delete,
    path = "/json/history/{id}",
    tag = "JSON",
    params(
        ("id" = Uuid, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry removed, or nothing to remove", body = SuccessResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_history_entry(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    let mut history = match state.history() {
        Ok(history) => history,
        Err(e) => return error_response(&e),
    };

    match history.delete(id) {
        Ok(removed) => {
            let message = if removed {
                format!("Entry {} removed", id)
            } else {
                format!("No entry {}, nothing removed", id)
            };
            HttpResponse::Ok().json(SuccessResponse {
                success: true,
                message: Some(message),
                error: None,
            })
        }
        Err(e) => error_response(&e),
    }
}

/// Clear the whole history
#[utoipa::path(
    delete,
    path = "/json/history",
    tag = "JSON",
    responses(
        (status = 200, description = "History cleared", body = SuccessResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn clear_history(state: web::Data<AppState>) -> impl Responder {
    let mut history = match state.history() {
        Ok(history) => history,
        Err(e) => return error_response(&e),
    };

    match history.clear() {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse {
            success: true,
            message: Some("History cleared".to_string()),
            error: None,
        }),
        Err(e) => error_response(&e),
    }
}
