// src/api/utils.rs

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use log::{error, warn};

use crate::api::types::{ErrorResponse, PasswordGenerationRequest};
use crate::core::error::{Result, ToolError};
use crate::models::{CharClass, CharsetMode, CharsetOption, PasswordSpec};

/// HTTP status for a tool failure.
pub fn status_for(err: &ToolError) -> StatusCode {
    match err {
        ToolError::EntryNotFound(_) => StatusCode::NOT_FOUND,
        ToolError::ContentTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        ToolError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Renders a tool failure as the common error body.
pub fn error_response(err: &ToolError) -> HttpResponse {
    let status = status_for(err);
    if status.is_server_error() {
        error!("❌ {}", err);
    } else {
        warn!("⚠️ Rejected request: {}", err);
    }

    HttpResponse::build(status).json(ErrorResponse {
        success: false,
        kind: err.kind().to_string(),
        error: err.to_string(),
    })
}

/// Builds a password spec from the flat request flags.
///
/// Class flags default to lowercase, uppercase and digits on. The two
/// exclusive modes override the class flags and cannot both be set.
pub fn password_spec_from_request(req: &PasswordGenerationRequest, default_length: usize) -> Result<PasswordSpec> {
    let numbers_only = req.numbers_only.unwrap_or(false);
    let letters_only = req.letters_only.unwrap_or(false);
    if numbers_only && letters_only {
        return Err(ToolError::MalformedInput(
            "numbers_only and letters_only cannot both be set".to_string(),
        ));
    }

    let flags = [
        (CharClass::Lower, req.lowercase.unwrap_or(true)),
        (CharClass::Upper, req.uppercase.unwrap_or(true)),
        (CharClass::Digit, req.numbers.unwrap_or(true)),
        (CharClass::Symbol, req.symbols.unwrap_or(false)),
    ];
    let mut mode = flags
        .iter()
        .fold(CharsetMode::regular(&[]), |mode, (class, on)| {
            mode.toggle(CharsetOption::Class(*class), *on)
        });
    if numbers_only {
        mode = mode.toggle(CharsetOption::DigitsOnly, true);
    } else if letters_only {
        mode = mode.toggle(CharsetOption::LettersOnly, true);
    }

    Ok(PasswordSpec {
        length: req.length.unwrap_or(default_length),
        mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_uses_three_classes() {
        let spec = password_spec_from_request(&PasswordGenerationRequest::default(), 12).unwrap();
        assert_eq!(spec.length, 12);
        assert_eq!(
            spec.mode,
            CharsetMode::regular(&[CharClass::Lower, CharClass::Upper, CharClass::Digit])
        );
    }

    #[test]
    fn exclusive_modes_override_classes() {
        let req = PasswordGenerationRequest {
            symbols: Some(true),
            numbers_only: Some(true),
            ..Default::default()
        };
        let spec = password_spec_from_request(&req, 8).unwrap();
        assert_eq!(spec.mode, CharsetMode::DigitsOnly);

        let both = PasswordGenerationRequest {
            numbers_only: Some(true),
            letters_only: Some(true),
            ..Default::default()
        };
        assert!(password_spec_from_request(&both, 8).is_err());
    }

    #[test]
    fn statuses() {
        assert_eq!(status_for(&ToolError::MissingKey), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&ToolError::EntryNotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&ToolError::Storage("disk".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
