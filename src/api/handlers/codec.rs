// src/api/handlers/codec.rs

use actix_web::{web, HttpResponse, Responder};

use crate::api::types::{
    ErrorResponse, SchemeInfo, SchemeListResponse, TransformRequest, TransformResponse,
};
use crate::api::utils::error_response;
use crate::codec;
use crate::models::CodecScheme;

/// List codec schemes
///
/// Returns every scheme with its key and reversibility flags.
#[utoipa::path(
    get,
    path = "/codec/schemes",
    tag = "Codec",
    responses(
        (status = 200, description = "Available schemes", body = SchemeListResponse)
    )
)]
pub async fn list_schemes() -> impl Responder {
    HttpResponse::Ok().json(SchemeListResponse {
        success: true,
        schemes: CodecScheme::ALL.iter().copied().map(SchemeInfo::from).collect(),
    })
}

/// Encode or decode text
///
/// Runs the text through the selected scheme. Hash schemes only encode.
#[utoipa::path(
    post,
    path = "/codec/transform",
    tag = "Codec",
    request_body = TransformRequest,
    responses(
        (status = 200, description = "Transformed text", body = TransformResponse),
        (status = 400, description = "Malformed input, missing key or unsupported direction", body = ErrorResponse)
    )
)]
pub async fn transform(req: web::Json<TransformRequest>) -> impl Responder {
    let req = req.into_inner();
    match codec::transform(&req.text, req.scheme, req.direction, req.key.as_deref()) {
        Ok(output) => HttpResponse::Ok().json(TransformResponse {
            success: true,
            output,
        }),
        Err(e) => error_response(&e),
    }
}
