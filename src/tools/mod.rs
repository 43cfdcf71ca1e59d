// src/tools/mod.rs
pub mod json;
pub mod time;
