//! Applicant screening: the Recruitment Fit Score pipeline.
//!
//! The pipeline turns a raw tabular batch into pseudonymized, deduplicated,
//! scored, and labeled applicants. All tunable behavior lives in a single
//! [`presets::ParameterSet`] value; the components themselves are pure.

pub mod bands;
pub mod domain;
mod evaluation;
pub mod identity;
pub mod ingest;
pub mod pipeline;
pub mod presets;
pub mod report;
pub mod router;
pub mod rubric;
pub mod sector;

#[cfg(test)]
mod tests;

pub use bands::{
    interpret_confirmation, normalize_language_band, normalize_time_band, LanguageBand, TimeBand,
};
pub use domain::{
    ApplicantRecord, DecisionLabel, FactorKind, FactorScore, Pid, PseudonymizedApplicant,
    ResolvedApplicant, ScoredApplicant, Sector,
};
pub use evaluation::ScoringEngine;
pub use identity::{hash_identifier, row_token, Salt};
pub use ingest::{read_batch, resolve_batch, ColumnMap, ImportError};
pub use pipeline::{DedupPolicy, ScreeningOutcome, ScreeningPipeline};
pub use presets::{
    EquityReserve, FactorWeights, FunctionLexicon, ParameterOverrides, ParameterSet, PresetName,
};
pub use report::{
    summarize, write_export_csv, write_review_csv, ReportError, ReviewRow, ScreeningSummary,
    SectorDecisionCount,
};
pub use router::{screening_router, ScreeningState};
pub use rubric::{score_motivation, RubricConfig, RubricCue, RubricPredicate, RubricScores};
pub use sector::{classify_sector, default_sector_rules, SectorRule};
