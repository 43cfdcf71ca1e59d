// src/generators/password.rs
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::Serialize;

use crate::core::error::{Result, ToolError};
use crate::models::{PasswordSpec, Strength};

pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    pub fn generate_password(&self, spec: &PasswordSpec) -> Result<String> {
        generate_password_with(spec, &mut rand::thread_rng())
    }

    pub fn analyze_password_strength(&self, password: &str) -> StrengthReport {
        analyze_password_strength(password)
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws every position independently and uniformly from the active charset.
pub fn generate_password_with<R: Rng + ?Sized>(spec: &PasswordSpec, rng: &mut R) -> Result<String> {
    let chars: Vec<char> = spec.mode.charset().chars().collect();
    if chars.is_empty() {
        return Err(ToolError::EmptyCharset);
    }

    if !(PasswordSpec::MIN_LENGTH..=PasswordSpec::MAX_LENGTH).contains(&spec.length) {
        return Err(ToolError::LengthOutOfRange {
            min: PasswordSpec::MIN_LENGTH,
            max: PasswordSpec::MAX_LENGTH,
            actual: spec.length,
        });
    }

    let dist = Uniform::from(0..chars.len());
    Ok((0..spec.length).map(|_| chars[dist.sample(rng)]).collect())
}

#[derive(Debug, Clone, Serialize)]
pub struct StrengthReport {
    pub score: u8,
    pub strength: Strength,
    pub feedback: Vec<String>,
}

/// One point each for length >= 8, length >= 12 and every character class
/// present. Anything shorter than 6 characters is weak regardless.
pub fn classify(password: &str) -> (u8, Strength) {
    let length = password.chars().count();
    let checks = [
        length >= 8,
        length >= 12,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|&&hit| hit).count() as u8;

    let strength = if length < 6 || score <= 2 {
        Strength::Weak
    } else if score <= 4 {
        Strength::Medium
    } else {
        Strength::Strong
    };
    (score, strength)
}

pub fn analyze_password_strength(password: &str) -> StrengthReport {
    let (score, strength) = classify(password);
    let length = password.chars().count();

    let mut feedback = Vec::new();
    if length < 6 {
        feedback.push("Passwords shorter than 6 characters are always weak".to_string());
    } else if length < 12 {
        feedback.push("Use at least 12 characters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        feedback.push("Add lowercase letters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        feedback.push("Add uppercase letters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        feedback.push("Add digits".to_string());
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        feedback.push("Add symbols".to_string());
    }

    StrengthReport {
        score,
        strength,
        feedback,
    }
}
