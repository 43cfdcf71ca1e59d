// src/generators/mod.rs
pub mod password;

pub use password::{analyze_password_strength, PasswordGenerator, StrengthReport};
