// src/api/handlers/generator.rs

use actix_web::{web, HttpResponse, Responder};

use crate::api::types::{
    ErrorResponse, PasswordAnalysisRequest, PasswordAnalysisResponse, PasswordGenerationRequest,
    PasswordGenerationResponse,
};
use crate::api::utils::{error_response, password_spec_from_request};
use crate::api::AppState;
use crate::generators::{analyze_password_strength, PasswordGenerator};

/// Generate a password
///
/// Generates a password from the selected character sources.
#[utoipa::path(
    post,
    path = "/generator/password",
    tag = "Generator",
    request_body = PasswordGenerationRequest,
    responses(
        (status = 200, description = "Generated password", body = PasswordGenerationResponse),
        (status = 400, description = "Empty charset, bad length or conflicting modes", body = ErrorResponse)
    )
)]
pub async fn generate_password(
    state: web::Data<AppState>,
    generation_req: web::Json<PasswordGenerationRequest>,
) -> impl Responder {
    let spec = match password_spec_from_request(&generation_req, state.config.default_password_length) {
        Ok(spec) => spec,
        Err(e) => return error_response(&e),
    };

    let generator = PasswordGenerator::new();
    let password = match generator.generate_password(&spec) {
        Ok(pwd) => pwd,
        Err(e) => return error_response(&e),
    };

    let report = generator.analyze_password_strength(&password);
    HttpResponse::Ok().json(PasswordGenerationResponse {
        success: true,
        password,
        strength: report.strength,
        score: report.score,
    })
}

/// Analyze password strength
///
/// The password travels in the body so it never lands in access logs.
#[utoipa::path(
    post,
    path = "/generator/analysis",
    tag = "Generator",
    request_body = PasswordAnalysisRequest,
    responses(
        (status = 200, description = "Password analysis result", body = PasswordAnalysisResponse)
    )
)]
pub async fn analyze_password(req: web::Json<PasswordAnalysisRequest>) -> impl Responder {
    let report = analyze_password_strength(&req.password);
    HttpResponse::Ok().json(PasswordAnalysisResponse {
        success: true,
        score: report.score,
        strength: report.strength,
        feedback: report.feedback,
    })
}
