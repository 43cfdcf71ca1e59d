// src/validators/mod.rs
pub mod id_number;
pub mod regions;

pub use id_number::{IdInfo, IdIssue, IdWarning, ValidationReport};
