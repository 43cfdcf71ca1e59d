// src/models.rs
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::ToolError;

/// A named text transformation offered by the codec engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CodecScheme {
    #[serde(rename = "base64")]
    Base64,
    #[serde(rename = "url")]
    UrlPercent,
    #[serde(rename = "html")]
    HtmlEntity,
    #[serde(rename = "toyhash")]
    ToyHash,
    #[serde(rename = "sha256")]
    SecureDigest,
    #[serde(rename = "caesar")]
    Caesar,
    #[serde(rename = "substitution")]
    Substitution,
}

impl CodecScheme {
    pub const ALL: [CodecScheme; 7] = [
        CodecScheme::Base64,
        CodecScheme::UrlPercent,
        CodecScheme::HtmlEntity,
        CodecScheme::ToyHash,
        CodecScheme::SecureDigest,
        CodecScheme::Caesar,
        CodecScheme::Substitution,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            CodecScheme::Base64 => "base64",
            CodecScheme::UrlPercent => "url",
            CodecScheme::HtmlEntity => "html",
            CodecScheme::ToyHash => "toyhash",
            CodecScheme::SecureDigest => "sha256",
            CodecScheme::Caesar => "caesar",
            CodecScheme::Substitution => "substitution",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CodecScheme::Base64 => "Base64",
            CodecScheme::UrlPercent => "URL encoding",
            CodecScheme::HtmlEntity => "HTML entities",
            CodecScheme::ToyHash => "Demo hash",
            CodecScheme::SecureDigest => "SHA-256",
            CodecScheme::Caesar => "Caesar cipher",
            CodecScheme::Substitution => "Substitution cipher",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CodecScheme::Base64 => "Standard Base64 over the UTF-8 bytes of the text",
            CodecScheme::UrlPercent => "Percent-encoding for use inside URL components",
            CodecScheme::HtmlEntity => "Escapes markup-significant characters as entities",
            CodecScheme::ToyHash => "32-bit rolling hash for demonstration, not secure",
            CodecScheme::SecureDigest => "SHA-256 digest rendered as lowercase hex",
            CodecScheme::Caesar => "Shifts ASCII letters by 3 positions",
            CodecScheme::Substitution => "Maps A-Z onto the characters of a key",
        }
    }

    pub fn requires_key(&self) -> bool {
        matches!(self, CodecScheme::Substitution)
    }

    /// Hash schemes are one-way and never accept a decode request.
    pub fn reversible(&self) -> bool {
        !matches!(self, CodecScheme::ToyHash | CodecScheme::SecureDigest)
    }
}

impl fmt::Display for CodecScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CodecScheme {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CodecScheme::ALL
            .into_iter()
            .find(|scheme| scheme.id() == wanted)
            .ok_or_else(|| ToolError::MalformedInput(format!("unknown scheme '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encode,
    Decode,
}

/// Regular password character classes, ordered the way they are
/// concatenated into the charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharClass {
    pub fn alphabet(&self) -> &'static str {
        match self {
            CharClass::Lower => "abcdefghijklmnopqrstuvwxyz",
            CharClass::Upper => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharClass::Digit => "0123456789",
            CharClass::Symbol => "!@#$%^&*()_+-=[]{}|;:,.<>?",
        }
    }
}

/// Where password characters are drawn from. Exactly one source is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "classes", rename_all = "snake_case")]
pub enum CharsetMode {
    Regular(BTreeSet<CharClass>),
    DigitsOnly,
    LettersOnly,
}

/// One checkbox of the password options panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetOption {
    Class(CharClass),
    DigitsOnly,
    LettersOnly,
}

impl CharsetMode {
    pub fn regular(classes: &[CharClass]) -> Self {
        CharsetMode::Regular(classes.iter().copied().collect())
    }

    /// Applies a checkbox change. Turning on an exclusive mode drops every
    /// regular class; turning on a regular class leaves any exclusive mode.
    pub fn toggle(self, option: CharsetOption, enabled: bool) -> Self {
        match (option, enabled) {
            (CharsetOption::DigitsOnly, true) => CharsetMode::DigitsOnly,
            (CharsetOption::LettersOnly, true) => CharsetMode::LettersOnly,
            (CharsetOption::DigitsOnly, false) => match self {
                CharsetMode::DigitsOnly => CharsetMode::Regular(BTreeSet::new()),
                other => other,
            },
            (CharsetOption::LettersOnly, false) => match self {
                CharsetMode::LettersOnly => CharsetMode::Regular(BTreeSet::new()),
                other => other,
            },
            (CharsetOption::Class(class), enabled) => {
                let mut classes = match self {
                    CharsetMode::Regular(classes) => classes,
                    CharsetMode::DigitsOnly | CharsetMode::LettersOnly => BTreeSet::new(),
                };
                if enabled {
                    classes.insert(class);
                } else {
                    classes.remove(&class);
                }
                CharsetMode::Regular(classes)
            }
        }
    }

    /// The characters a password may contain under this mode.
    pub fn charset(&self) -> String {
        match self {
            CharsetMode::DigitsOnly => CharClass::Digit.alphabet().to_string(),
            CharsetMode::LettersOnly => {
                format!("{}{}", CharClass::Lower.alphabet(), CharClass::Upper.alphabet())
            }
            CharsetMode::Regular(classes) => classes.iter().map(|c| c.alphabet()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordSpec {
    pub length: usize,
    pub mode: CharsetMode,
}

impl PasswordSpec {
    pub const MIN_LENGTH: usize = 4;
    pub const MAX_LENGTH: usize = 50;
}

impl Default for PasswordSpec {
    fn default() -> Self {
        Self {
            length: 12,
            mode: CharsetMode::regular(&[CharClass::Lower, CharClass::Upper, CharClass::Digit]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Weak => write!(f, "weak"),
            Strength::Medium => write!(f, "medium"),
            Strength::Strong => write!(f, "strong"),
        }
    }
}

/// One saved text blob in the JSON history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub byte_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes_parse_from_their_ids() {
        for scheme in CodecScheme::ALL {
            assert_eq!(scheme.id().parse::<CodecScheme>().unwrap(), scheme);
        }
        assert_eq!(" SHA256 ".parse::<CodecScheme>().unwrap(), CodecScheme::SecureDigest);
        assert!("rot13".parse::<CodecScheme>().is_err());
    }

    #[test]
    fn only_hashes_are_one_way() {
        let one_way: Vec<_> = CodecScheme::ALL.iter().filter(|s| !s.reversible()).collect();
        assert_eq!(one_way, vec![&CodecScheme::ToyHash, &CodecScheme::SecureDigest]);
        assert!(CodecScheme::Substitution.requires_key());
        assert!(!CodecScheme::Caesar.requires_key());
    }

    #[test]
    fn exclusive_mode_clears_regular_classes() {
        let mode = CharsetMode::regular(&[CharClass::Lower, CharClass::Symbol]);
        let mode = mode.toggle(CharsetOption::DigitsOnly, true);
        assert_eq!(mode, CharsetMode::DigitsOnly);

        let mode = mode.toggle(CharsetOption::LettersOnly, true);
        assert_eq!(mode, CharsetMode::LettersOnly);
    }

    #[test]
    fn regular_class_leaves_exclusive_mode() {
        let mode = CharsetMode::DigitsOnly.toggle(CharsetOption::Class(CharClass::Upper), true);
        assert_eq!(mode, CharsetMode::regular(&[CharClass::Upper]));
    }

    #[test]
    fn unchecking_exclusive_mode_leaves_nothing_selected() {
        let mode = CharsetMode::LettersOnly.toggle(CharsetOption::LettersOnly, false);
        assert_eq!(mode, CharsetMode::Regular(BTreeSet::new()));
        assert!(mode.charset().is_empty());
    }

    #[test]
    fn charset_follows_class_order() {
        let mode = CharsetMode::regular(&[CharClass::Symbol, CharClass::Lower]);
        let charset = mode.charset();
        assert!(charset.starts_with("abc"));
        assert!(charset.ends_with("<>?"));
        assert_eq!(CharsetMode::LettersOnly.charset().len(), 52);
    }

    #[test]
    fn charset_mode_serializes_tagged() {
        let json = serde_json::to_string(&CharsetMode::DigitsOnly).unwrap();
        assert_eq!(json, r#"{"mode":"digits_only"}"#);
        let back: CharsetMode =
            serde_json::from_str(r#"{"mode":"regular","classes":["upper","lower"]}"#).unwrap();
        assert_eq!(back, CharsetMode::regular(&[CharClass::Lower, CharClass::Upper]));
    }
}
