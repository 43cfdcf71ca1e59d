// src/api/handlers/id.rs

use actix_web::{web, HttpResponse, Responder};

use crate::api::types::{IdValidationRequest, IdValidationResponse};
use crate::validators::id_number;

/// Validate an ID number
///
/// Always answers 200; `is_valid` and `errors` carry the verdict.
#[utoipa::path(
    post,
    path = "/id/validate",
    tag = "ID",
    request_body = IdValidationRequest,
    responses(
        (status = 200, description = "Validation report", body = IdValidationResponse)
    )
)]
pub async fn validate_id(req: web::Json<IdValidationRequest>) -> impl Responder {
    let report = id_number::validate(&req.id_number);
    let info = id_number::decode(&req.id_number);
    log::debug!(
        "ID validation finished with {} errors and {} warnings",
        report.errors.len(),
        report.warnings.len()
    );

    HttpResponse::Ok().json(IdValidationResponse {
        success: true,
        is_valid: report.is_valid(),
        errors: report.errors.iter().map(|e| e.to_string()).collect(),
        warnings: report.warnings.iter().map(|w| w.to_string()).collect(),
        issues: report.errors,
        warning_details: report.warnings,
        info,
    })
}
