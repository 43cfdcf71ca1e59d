// src/api/routes.rs
use actix_web::web;

use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Codec engine
    cfg.service(
        web::scope("/codec")
            .route("/schemes", web::get().to(handlers::codec::list_schemes))
            .route("/transform", web::post().to(handlers::codec::transform))
    );

    // Password generator
    cfg.service(
        web::scope("/generator")
            .route("/password", web::post().to(handlers::generator::generate_password))
            .route("/analysis", web::post().to(handlers::generator::analyze_password))
    );

    // ID number validation
    cfg.service(
        web::scope("/id")
            .route("/validate", web::post().to(handlers::id::validate_id))
    );

    // JSON tool and its history
    cfg.service(
        web::scope("/json")
            .route("/format", web::post().to(handlers::json::format_json))
            .route("/compress", web::post().to(handlers::json::compress_json))
            .route("/validate", web::post().to(handlers::json::validate_json))
            .route("/history", web::get().to(handlers::json::list_history))
            .route("/history", web::post().to(handlers::json::save_history))
            .route("/history", web::delete().to(handlers::json::clear_history))
            .route("/history/{id}", web::get().to(handlers::json::get_history_entry))
            .route("/history/{id}", web::delete().to(handlers::json::delete_history_entry))
    );

    // Time converter
    cfg.service(
        web::scope("/time")
            .route("/now", web::get().to(handlers::time::now))
            .route("/zones", web::get().to(handlers::time::list_zones))
            .route("/convert", web::post().to(handlers::time::convert))
            .route("/parse", web::post().to(handlers::time::parse))
            .route("/diff", web::post().to(handlers::time::diff))
    );
}
