// src/codec/mod.rs
//! Text codec engine: reversible encodings, toy ciphers and one-way digests
//! selected by [`CodecScheme`].

pub mod cipher;
pub mod digest;
pub mod text;

use crate::core::error::{Result, ToolError};
use crate::models::{CodecScheme, Direction};

/// Runs `text` through `scheme` in the given direction.
///
/// `key` is only consulted by keyed schemes; an empty key counts as missing.
pub fn transform(
    text: &str,
    scheme: CodecScheme,
    direction: Direction,
    key: Option<&str>,
) -> Result<String> {
    log::debug!("codec {} {:?} over {} bytes", scheme, direction, text.len());

    if direction == Direction::Decode && !scheme.reversible() {
        return Err(ToolError::UnsupportedOperation(format!(
            "{} is a one-way hash and cannot be decoded",
            scheme.label()
        )));
    }

    match (scheme, direction) {
        (CodecScheme::Base64, Direction::Encode) => Ok(text::base64_encode(text)),
        (CodecScheme::Base64, Direction::Decode) => text::base64_decode(text),
        (CodecScheme::UrlPercent, Direction::Encode) => Ok(text::url_encode(text)),
        (CodecScheme::UrlPercent, Direction::Decode) => text::url_decode(text),
        (CodecScheme::HtmlEntity, Direction::Encode) => Ok(text::html_encode(text)),
        (CodecScheme::HtmlEntity, Direction::Decode) => Ok(text::html_decode(text)),
        (CodecScheme::ToyHash, _) => Ok(digest::toy_hash(text)),
        (CodecScheme::SecureDigest, _) => Ok(digest::sha256_hex(text)),
        (CodecScheme::Caesar, Direction::Encode) => Ok(cipher::caesar(text, cipher::CAESAR_SHIFT)),
        (CodecScheme::Caesar, Direction::Decode) => {
            Ok(cipher::caesar(text, -cipher::CAESAR_SHIFT))
        }
        (CodecScheme::Substitution, Direction::Encode) => {
            cipher::substitution_encode(text, key.unwrap_or_default())
        }
        (CodecScheme::Substitution, Direction::Decode) => {
            cipher::substitution_decode(text, key.unwrap_or_default())
        }
    }
}
