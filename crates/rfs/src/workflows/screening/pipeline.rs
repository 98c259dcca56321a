use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantRecord, Pid, PseudonymizedApplicant, ResolvedApplicant, ScoredApplicant};
use super::evaluation::ScoringEngine;
use super::identity::{hash_identifier, row_token, Salt};
use super::ingest::{resolve_batch, ColumnMap};
use super::presets::ParameterSet;

/// Batch-level duplicate handling. Date-aware dedup applies whenever the
/// application-date role is mapped; otherwise the first-encountered row wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    KeepLatestByDate,
    KeepFirstSeen,
}

/// Result of one batch run: scored, deduplicated applicants plus run metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningOutcome {
    pub scored: Vec<ScoredApplicant>,
    pub policy: DedupPolicy,
    pub duplicates_removed: usize,
}

/// Batch orchestrator: resolve -> pseudonymize -> dedup -> score -> label.
///
/// The pipeline is synchronous and single-pass; each record's score depends
/// only on its own fields and the active [`ParameterSet`]. The salt is the
/// only shared resource and is read-only for the pipeline's lifetime.
pub struct ScreeningPipeline {
    engine: ScoringEngine,
    salt: Salt,
}

impl ScreeningPipeline {
    pub fn new(params: ParameterSet, salt: Salt) -> Self {
        Self {
            engine: ScoringEngine::new(params),
            salt,
        }
    }

    pub fn params(&self) -> &ParameterSet {
        self.engine.params()
    }

    /// Score a full batch. Total and terminating: every input row either
    /// contributes one scored applicant or is removed as a duplicate.
    pub fn run(&self, records: &[ApplicantRecord], mapping: &ColumnMap) -> ScreeningOutcome {
        let resolved = resolve_batch(records, mapping);
        let pseudonymized: Vec<PseudonymizedApplicant> = resolved
            .into_iter()
            .map(|applicant| self.pseudonymize(applicant))
            .collect();

        let policy = if mapping.application_date.is_some() {
            DedupPolicy::KeepLatestByDate
        } else {
            DedupPolicy::KeepFirstSeen
        };

        let before = pseudonymized.len();
        let deduped = dedup(pseudonymized, policy);
        let duplicates_removed = before - deduped.len();
        tracing::debug!(records = before, duplicates_removed, ?policy, "scoring batch");

        let scored = deduped
            .iter()
            .map(|applicant| self.engine.score(applicant))
            .collect();

        ScreeningOutcome {
            scored,
            policy,
            duplicates_removed,
        }
    }

    /// Replace the raw identifier with a PID. Rows without an identifier hash
    /// a row-local token so they still receive a stable, unique PID.
    fn pseudonymize(&self, applicant: ResolvedApplicant) -> PseudonymizedApplicant {
        let seed = applicant
            .identifier
            .clone()
            .unwrap_or_else(|| row_token(applicant.row));
        let pid = hash_identifier(&seed, &self.salt);

        let hashed_extras = applicant
            .extra_identifiers
            .iter()
            .map(|(column, value)| (column.clone(), hash_identifier(value, &self.salt)))
            .collect();

        PseudonymizedApplicant {
            pid,
            raw_identifier: applicant.identifier,
            hashed_extras,
            organisation: applicant.organisation,
            structured_sector: applicant.structured_sector,
            motivation: applicant.motivation,
            function_title: applicant.function_title,
            time_band: applicant.time_band,
            language: applicant.language,
            referee: applicant.referee,
            alumni: applicant.alumni,
            application_date: applicant.application_date,
        }
    }
}

/// Collapse duplicate PIDs according to the batch policy. Exactly one record
/// survives per distinct PID.
fn dedup(
    applicants: Vec<PseudonymizedApplicant>,
    policy: DedupPolicy,
) -> Vec<PseudonymizedApplicant> {
    match policy {
        DedupPolicy::KeepFirstSeen => {
            let mut seen: HashSet<Pid> = HashSet::new();
            applicants
                .into_iter()
                .filter(|applicant| seen.insert(applicant.pid.clone()))
                .collect()
        }
        DedupPolicy::KeepLatestByDate => {
            // Stable sort by date with missing dates ordered first, then keep
            // the last occurrence per PID: a dated row beats an undated one,
            // and the latest date (or latest arrival on ties) wins.
            let mut sorted = applicants;
            sorted.sort_by_key(|applicant| applicant.application_date);

            let mut last_index: HashMap<Pid, usize> = HashMap::new();
            for (index, applicant) in sorted.iter().enumerate() {
                last_index.insert(applicant.pid.clone(), index);
            }

            sorted
                .into_iter()
                .enumerate()
                .filter(|(index, applicant)| last_index[&applicant.pid] == *index)
                .map(|(_, applicant)| applicant)
                .collect()
        }
    }
}
