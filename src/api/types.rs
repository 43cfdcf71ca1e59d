// src/api/types.rs
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{CodecScheme, Direction, HistoryEntry, Strength};
use crate::validators::{IdInfo, IdIssue, IdWarning};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Success message (only present on success)
    pub message: Option<String>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Machine-readable error kind
    pub kind: String,
    /// Human-readable message
    pub error: String,
}

// Codec types
#[derive(Serialize, Deserialize, ToSchema)]
pub struct TransformRequest {
    /// Text to transform
    pub text: String,
    /// Codec scheme identifier
    pub scheme: CodecScheme,
    /// Encode or decode
    pub direction: Direction,
    /// Key for keyed schemes (substitution)
    pub key: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TransformResponse {
    pub success: bool,
    /// Transformed text
    pub output: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SchemeInfo {
    pub id: String,
    pub label: String,
    pub description: String,
    pub requires_key: bool,
    pub reversible: bool,
}

impl From<CodecScheme> for SchemeInfo {
    fn from(scheme: CodecScheme) -> Self {
        Self {
            id: scheme.id().to_string(),
            label: scheme.label().to_string(),
            description: scheme.description().to_string(),
            requires_key: scheme.requires_key(),
            reversible: scheme.reversible(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SchemeListResponse {
    pub success: bool,
    pub schemes: Vec<SchemeInfo>,
}

// Generator types
#[derive(Serialize, Deserialize, ToSchema, Default)]
pub struct PasswordGenerationRequest {
    /// Password length (4-50)
    pub length: Option<usize>,
    /// Include lowercase letters (default true)
    pub lowercase: Option<bool>,
    /// Include uppercase letters (default true)
    pub uppercase: Option<bool>,
    /// Include digits (default true)
    pub numbers: Option<bool>,
    /// Include symbols (default false)
    pub symbols: Option<bool>,
    /// Digits only; overrides the class flags
    pub numbers_only: Option<bool>,
    /// Letters only; overrides the class flags
    pub letters_only: Option<bool>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordGenerationResponse {
    pub success: bool,
    pub password: String,
    pub strength: Strength,
    pub score: u8,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordAnalysisRequest {
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordAnalysisResponse {
    pub success: bool,
    pub score: u8,
    pub strength: Strength,
    pub feedback: Vec<String>,
}

// ID validation types
#[derive(Serialize, Deserialize, ToSchema)]
pub struct IdValidationRequest {
    /// 18-character ID number
    pub id_number: String,
}

#[derive(Serialize, ToSchema)]
pub struct IdValidationResponse {
    pub success: bool,
    pub is_valid: bool,
    /// Rendered error messages, in check order
    pub errors: Vec<String>,
    /// Rendered warnings
    pub warnings: Vec<String>,
    /// Structured errors
    #[schema(value_type = Vec<Object>)]
    pub issues: Vec<IdIssue>,
    /// Structured warnings
    #[schema(value_type = Vec<Object>)]
    pub warning_details: Vec<IdWarning>,
    /// Decoded fields, present for 18-digit input
    #[schema(value_type = Option<Object>)]
    pub info: Option<IdInfo>,
}

// JSON tool types
#[derive(Serialize, Deserialize, ToSchema)]
pub struct JsonRequest {
    pub content: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct JsonResponse {
    pub success: bool,
    pub output: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HistoryEntryResponse {
    pub success: bool,
    pub entry: HistoryEntry,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HistoryListResponse {
    pub success: bool,
    /// Entries, oldest first
    pub entries: Vec<HistoryEntry>,
    pub count: usize,
    pub max_entries: usize,
    /// Combined size of all entries in bytes
    pub total_bytes: u64,
    /// Combined size, human readable
    pub total_size: String,
}

// Time tool types
#[derive(Serialize, Deserialize, ToSchema)]
pub struct TimeConvertRequest {
    /// Unix timestamp in seconds
    pub timestamp: i64,
    /// Zone name, defaults to the configured zone
    pub timezone: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TimeParseRequest {
    /// `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`
    pub datetime: String,
    pub timezone: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TimeResponse {
    pub success: bool,
    pub timestamp: i64,
    pub datetime: String,
    pub timezone: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TimeDiffRequest {
    pub from: i64,
    pub to: i64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TimeDiffResponse {
    pub success: bool,
    pub seconds: u64,
    pub human: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TimezoneInfo {
    pub name: String,
    pub offset_hours: i32,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TimezoneListResponse {
    pub success: bool,
    pub timezones: Vec<TimezoneInfo>,
}
