// src/api/handlers/time.rs

use actix_web::{web, HttpResponse, Responder};

use crate::api::types::{
    ErrorResponse, TimeConvertRequest, TimeDiffRequest, TimeDiffResponse, TimeParseRequest,
    TimeResponse, TimezoneInfo, TimezoneListResponse,
};
use crate::api::utils::error_response;
use crate::api::AppState;
use crate::tools::time::{self, TIMEZONES};

fn conversion_response(timestamp: i64, zone: &str) -> HttpResponse {
    match time::convert(timestamp, zone) {
        Ok(conversion) => HttpResponse::Ok().json(TimeResponse {
            success: true,
            timestamp: conversion.timestamp,
            datetime: conversion.datetime,
            timezone: conversion.timezone,
        }),
        Err(e) => error_response(&e),
    }
}

/// Current time
///
/// Current Unix time rendered in the configured default zone.
#[utoipa::path(
    get,
    path = "/time/now",
    tag = "Time",
    responses(
        (status = 200, description = "Current time", body = TimeResponse)
    )
)]
pub async fn now(state: web::Data<AppState>) -> impl Responder {
    conversion_response(time::now_timestamp(), &state.config.default_timezone)
}

/// List supported zones
#[utoipa::path(
    get,
    path = "/time/zones",
    tag = "Time",
    responses(
        (status = 200, description = "Supported zones", body = TimezoneListResponse)
    )
)]
pub async fn list_zones() -> impl Responder {
    HttpResponse::Ok().json(TimezoneListResponse {
        success: true,
        timezones: TIMEZONES
            .iter()
            .map(|(name, hours)| TimezoneInfo {
                name: name.to_string(),
                offset_hours: *hours,
            })
            .collect(),
    })
}

/// Timestamp to date-time
#[utoipa::path(
    post,
    path = "/time/convert",
    tag = "Time",
    request_body = TimeConvertRequest,
    responses(
        (status = 200, description = "Rendered date-time", body = TimeResponse),
        (status = 400, description = "Unknown zone or timestamp out of range", body = ErrorResponse)
    )
)]
pub async fn convert(state: web::Data<AppState>, req: web::Json<TimeConvertRequest>) -> impl Responder {
    let zone = req
        .timezone
        .as_deref()
        .unwrap_or(&state.config.default_timezone);
    conversion_response(req.timestamp, zone)
}

/// Date-time to timestamp
#[utoipa::path(
    post,
    path = "/time/parse",
    tag = "Time",
    request_body = TimeParseRequest,
    responses(
        (status = 200, description = "Parsed timestamp", body = TimeResponse),
        (status = 400, description = "Unknown zone or unparseable date-time", body = ErrorResponse)
    )
)]
pub async fn parse(state: web::Data<AppState>, req: web::Json<TimeParseRequest>) -> impl Responder {
    let zone = req
        .timezone
        .as_deref()
        .unwrap_or(&state.config.default_timezone);
    match time::parse_datetime(&req.datetime, zone) {
        Ok(timestamp) => conversion_response(timestamp, zone),
        Err(e) => error_response(&e),
    }
}

/// Difference between two timestamps
#[utoipa::path(
    post,
    path = "/time/diff",
    tag = "Time",
    request_body = TimeDiffRequest,
    responses(
        (status = 200, description = "Absolute difference", body = TimeDiffResponse)
    )
)]
pub async fn diff(req: web::Json<TimeDiffRequest>) -> impl Responder {
    HttpResponse::Ok().json(TimeDiffResponse {
        success: true,
        seconds: req.from.abs_diff(req.to),
        human: time::format_time_diff(req.from, req.to),
    })
}
