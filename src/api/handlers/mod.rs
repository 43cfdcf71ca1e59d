// src/api/handlers/mod.rs
pub mod codec;
pub mod generator;
pub mod id;
pub mod json;
pub mod time;
