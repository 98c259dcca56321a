pub(crate) mod policy;
pub(crate) mod rules;

use super::domain::{PseudonymizedApplicant, ScoredApplicant};
use super::presets::ParameterSet;
use super::sector::classify_sector;

/// Stateless scorer applying one fully-resolved [`ParameterSet`] to a record.
/// Every record is scored independently; the engine holds no mutable state.
pub struct ScoringEngine {
    params: ParameterSet,
}

impl ScoringEngine {
    pub fn new(params: ParameterSet) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Classify, score each factor against its cap, aggregate, and label.
    pub fn score(&self, applicant: &PseudonymizedApplicant) -> ScoredApplicant {
        let sector = classify_sector(
            applicant.structured_sector.as_deref(),
            applicant.organisation.as_deref(),
            &self.params.sector_rules,
        );

        let (factors, rfs) = rules::score_factors(applicant, sector, &self.params);
        let label = policy::label_score(rfs, sector, &self.params);

        ScoredApplicant {
            pid: applicant.pid.clone(),
            raw_identifier: applicant.raw_identifier.clone(),
            hashed_extras: applicant.hashed_extras.clone(),
            sector,
            factors,
            rfs,
            label,
        }
    }
}
