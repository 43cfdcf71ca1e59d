// src/api/mod.rs
use std::sync::{Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::{error, web, App, HttpResponse, HttpServer};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::error::{Result, ToolError};
use crate::core::history::{HistoryStore, MAX_ENTRY_BYTES};
use crate::core::storage::{FileStore, KeyValueStore};

pub mod handlers;
pub mod routes;
pub mod types;
pub mod utils;

/// Request bodies carry JSON-escaped text, so allow headroom over the
/// history entry limit.
const JSON_BODY_LIMIT: usize = (MAX_ENTRY_BYTES as usize) * 2;

/// State shared by every worker.
pub struct AppState {
    pub config: Config,
    history: Mutex<HistoryStore<Box<dyn KeyValueStore>>>,
}

impl AppState {
    pub fn new(config: Config, storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            config,
            history: Mutex::new(HistoryStore::load(storage)),
        }
    }

    /// State backed by the file store under the configured data directory.
    pub fn from_config(config: Config) -> Result<Self> {
        let storage = FileStore::new(&config.data_dir)?;
        Ok(Self::new(config, Box::new(storage)))
    }

    pub fn history(&self) -> Result<MutexGuard<'_, HistoryStore<Box<dyn KeyValueStore>>>> {
        self.history
            .lock()
            .map_err(|_| ToolError::Storage("history lock poisoned".to_string()))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Codec endpoints
        crate::api::handlers::codec::list_schemes,
        crate::api::handlers::codec::transform,

        // Generator endpoints
        crate::api::handlers::generator::generate_password,
        crate::api::handlers::generator::analyze_password,

        // ID endpoints
        crate::api::handlers::id::validate_id,

        // JSON endpoints
        crate::api::handlers::json::format_json,
        crate::api::handlers::json::compress_json,
        crate::api::handlers::json::validate_json,
        crate::api::handlers::json::list_history,
        crate::api::handlers::json::save_history,
        crate::api::handlers::json::get_history_entry,
        crate::api::handlers::json::delete_history_entry,
        crate::api::handlers::json::clear_history,

        // Time endpoints
        crate::api::handlers::time::now,
        crate::api::handlers::time::list_zones,
        crate::api::handlers::time::convert,
        crate::api::handlers::time::parse,
        crate::api::handlers::time::diff
    ),
    components(
        schemas(
            crate::api::types::SuccessResponse,
            crate::api::types::ErrorResponse,

            // Codec
            crate::models::CodecScheme,
            crate::models::Direction,
            crate::api::types::TransformRequest,
            crate::api::types::TransformResponse,
            crate::api::types::SchemeInfo,
            crate::api::types::SchemeListResponse,

            // Generator
            crate::models::Strength,
            crate::api::types::PasswordGenerationRequest,
            crate::api::types::PasswordGenerationResponse,
            crate::api::types::PasswordAnalysisRequest,
            crate::api::types::PasswordAnalysisResponse,

            // ID
            crate::api::types::IdValidationRequest,
            crate::api::types::IdValidationResponse,

            // JSON
            crate::models::HistoryEntry,
            crate::api::types::JsonRequest,
            crate::api::types::JsonResponse,
            crate::api::types::HistoryEntryResponse,
            crate::api::types::HistoryListResponse,

            // Time
            crate::api::types::TimeConvertRequest,
            crate::api::types::TimeParseRequest,
            crate::api::types::TimeResponse,
            crate::api::types::TimeDiffRequest,
            crate::api::types::TimeDiffResponse,
            crate::api::types::TimezoneInfo,
            crate::api::types::TimezoneListResponse
        )
    ),
    tags(
        (name = "Codec", description = "Text encoding, ciphers and digests"),
        (name = "Generator", description = "Password generation and strength analysis"),
        (name = "ID", description = "Resident ID number validation"),
        (name = "JSON", description = "JSON formatting and saved history"),
        (name = "Time", description = "Timestamp conversion")
    ),
    info(
        title = "Rust Toolbox API",
        version = "0.1.0",
        description = "Developer utility toolbox: codecs, passwords, ID checks, JSON and time tools",
        license(name = "MIT")
    )
)]
struct ApiDoc;

/// Routes plus the body limits and error shape every endpoint shares.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            let body = types::ErrorResponse {
                success: false,
                kind: "malformed_input".to_string(),
                error: err.to_string(),
            };
            error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        });

    cfg.app_data(json_config).configure(routes::configure_routes);
}

pub async fn start_server(state: AppState, address: &str, port: u16) -> std::io::Result<()> {
    log::info!("Starting Rust Toolbox API server on {}:{}", address, port);

    let state = web::Data::new(state);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec!["Content-Type", "Accept", "X-Requested-With"])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi())
            )
            .service(Redoc::with_url("/redoc", ApiDoc::openapi()))
            .configure(configure_app)
    })
    .bind((address, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(Config::default(), Box::new(MemoryStore::new())))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(configure_app)).await
        };
    }

    #[actix_web::test]
    async fn transform_encodes_base64() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/codec/transform")
            .set_json(json!({"text": "hello", "scheme": "base64", "direction": "encode"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["output"], "aGVsbG8=");
    }

    #[actix_web::test]
    async fn decoding_a_digest_is_rejected() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/codec/transform")
            .set_json(json!({"text": "abc", "scheme": "sha256", "direction": "decode"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["kind"], "unsupported_operation");
    }

    #[actix_web::test]
    async fn substitution_without_key_is_rejected() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/codec/transform")
            .set_json(json!({"text": "abc", "scheme": "substitution", "direction": "encode"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "missing_key");
    }

    #[actix_web::test]
    async fn lists_all_schemes() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::get().uri("/codec/schemes").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let schemes = body["schemes"].as_array().unwrap();
        assert_eq!(schemes.len(), 7);
        assert!(schemes
            .iter()
            .any(|s| s["id"] == "substitution" && s["requires_key"] == true));
    }

    #[actix_web::test]
    async fn generates_digit_only_passwords() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/generator/password")
            .set_json(json!({"length": 16, "numbers_only": true}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let password = body["password"].as_str().unwrap();
        assert_eq!(password.len(), 16);
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[actix_web::test]
    async fn empty_charset_is_a_bad_request() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/generator/password")
            .set_json(json!({"lowercase": false, "uppercase": false, "numbers": false}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "empty_charset");
    }

    #[actix_web::test]
    async fn analysis_reports_weak_passwords() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/generator/analysis")
            .set_json(json!({"password": "abc"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["strength"], "weak");
    }

    #[actix_web::test]
    async fn validates_id_numbers() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/id/validate")
            .set_json(json!({"id_number": "11010519491231002X"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["is_valid"], true);
        assert_eq!(body["info"]["birth_date"], "1949-12-31");
        assert_eq!(body["info"]["gender"], "female");

        let req = test::TestRequest::post()
            .uri("/id/validate")
            .set_json(json!({"id_number": "123"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["is_valid"], false);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert!(body["info"].is_null());
    }

    #[actix_web::test]
    async fn history_round_trip() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/json/history")
            .set_json(json!({"content": "{\"a\":1}"}))
            .to_request();
        let saved: Value = test::call_and_read_body_json(&app, req).await;
        let id = saved["entry"]["id"].as_str().unwrap().to_string();
        assert_eq!(saved["entry"]["byte_size"], 7);

        let req = test::TestRequest::get().uri("/json/history").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed["count"], 1);
        assert_eq!(listed["total_size"], "7 B");

        let req = test::TestRequest::get()
            .uri(&format!("/json/history/{}", id))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["entry"]["content"], "{\"a\":1}");

        let req = test::TestRequest::delete()
            .uri(&format!("/json/history/{}", id))
            .to_request();
        let removed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(removed["message"], format!("Entry {} removed", id));

        let req = test::TestRequest::delete()
            .uri(&format!("/json/history/{}", id))
            .to_request();
        let again: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(again["success"], true);
        assert_eq!(again["message"], format!("No entry {}, nothing removed", id));

        let req = test::TestRequest::get()
            .uri(&format!("/json/history/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn blank_history_content_is_rejected() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/json/history")
            .set_json(json!({"content": "   "}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(state.history().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn formats_and_rejects_json() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/json/compress")
            .set_json(json!({"content": "{ \"a\" : [1, 2] }"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["output"], "{\"a\":[1,2]}");

        let req = test::TestRequest::post()
            .uri("/json/validate")
            .set_json(json!({"content": "{oops"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn converts_timestamps() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/time/convert")
            .set_json(json!({"timestamp": 1699900800, "timezone": "Asia/Shanghai"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["datetime"], "2023-11-14 02:40:00");

        let req = test::TestRequest::post()
            .uri("/time/convert")
            .set_json(json!({"timestamp": 0, "timezone": "Mars/Olympus"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn malformed_bodies_use_the_error_shape() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/codec/transform")
            .set_json(json!({"text": "x", "scheme": "rot13", "direction": "encode"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["kind"], "malformed_input");
    }
}
