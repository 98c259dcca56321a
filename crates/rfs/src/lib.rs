//! Recruitment Fit Score (RFS): a deterministic, explainable scoring pipeline
//! for applicant batches with pseudonymized review output.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
