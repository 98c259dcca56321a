use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use super::domain::{DecisionLabel, FactorKind, ScoredApplicant, Sector};

/// One row of the primary review view: PID, sector, composite score, decision
/// label, and every factor contribution. The raw identifier is excluded by
/// construction — it exists only on the export channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRow {
    pub pid: String,
    pub sector: Sector,
    pub rfs: f64,
    pub decision: DecisionLabel,
    pub motivation_pts: f64,
    pub sector_pts: f64,
    pub referee_pts: f64,
    pub function_pts: f64,
    pub time_pts: f64,
    pub language_pts: f64,
    pub alumni_pts: f64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub hashed_extras: BTreeMap<String, String>,
}

impl ReviewRow {
    pub fn from_scored(scored: &ScoredApplicant) -> ReviewRow {
        ReviewRow {
            pid: scored.pid.0.clone(),
            sector: scored.sector,
            rfs: scored.rfs,
            decision: scored.label,
            motivation_pts: scored.factor_points(FactorKind::Motivation),
            sector_pts: scored.factor_points(FactorKind::Sector),
            referee_pts: scored.factor_points(FactorKind::Referee),
            function_pts: scored.factor_points(FactorKind::Function),
            time_pts: scored.factor_points(FactorKind::Time),
            language_pts: scored.factor_points(FactorKind::Language),
            alumni_pts: scored.factor_points(FactorKind::Alumni),
            hashed_extras: scored
                .hashed_extras
                .iter()
                .map(|(column, pid)| (format!("HASH_{column}"), pid.0.clone()))
                .collect(),
        }
    }
}

/// Decision and sector distribution for one scored batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreeningSummary {
    pub total: usize,
    pub decisions: BTreeMap<DecisionLabel, usize>,
    pub by_sector: Vec<SectorDecisionCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorDecisionCount {
    pub sector: Sector,
    pub decision: DecisionLabel,
    pub count: usize,
}

pub fn summarize(scored: &[ScoredApplicant]) -> ScreeningSummary {
    let mut decisions: BTreeMap<DecisionLabel, usize> = BTreeMap::new();
    let mut by_sector: BTreeMap<(Sector, DecisionLabel), usize> = BTreeMap::new();

    for applicant in scored {
        *decisions.entry(applicant.label).or_default() += 1;
        *by_sector.entry((applicant.sector, applicant.label)).or_default() += 1;
    }

    ScreeningSummary {
        total: scored.len(),
        decisions,
        by_sector: by_sector
            .into_iter()
            .map(|((sector, decision), count)| SectorDecisionCount {
                sector,
                decision,
                count,
            })
            .collect(),
    }
}

/// CSV writing failure for either artifact.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write scored CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush scored CSV: {0}")]
    Io(#[from] std::io::Error),
}

/// Hashed-extra columns present anywhere in the batch, in stable order.
fn extra_columns(scored: &[ScoredApplicant]) -> Vec<String> {
    let mut columns: Vec<String> = scored
        .iter()
        .flat_map(|applicant| applicant.hashed_extras.keys().cloned())
        .collect();
    columns.sort();
    columns.dedup();
    columns
}

fn format_points(value: f64) -> String {
    format!("{value:.2}")
}

fn write_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    scored: &[ScoredApplicant],
    include_identifier: bool,
) -> Result<(), ReportError> {
    let extras = extra_columns(scored);

    let mut header: Vec<String> = vec!["PID".to_string()];
    if include_identifier {
        header.push("Identifier".to_string());
    }
    header.extend(["Sector".to_string(), "RFS".to_string(), "Decision".to_string()]);
    header.extend(FactorKind::ALL.iter().map(|kind| kind.column().to_string()));
    header.extend(extras.iter().map(|column| format!("HASH_{column}")));
    writer.write_record(&header)?;

    for applicant in scored {
        let mut row: Vec<String> = vec![applicant.pid.0.clone()];
        if include_identifier {
            row.push(applicant.raw_identifier.clone().unwrap_or_default());
        }
        row.push(applicant.sector.label().to_string());
        row.push(format_points(applicant.rfs));
        row.push(applicant.label.label().to_string());
        for kind in FactorKind::ALL {
            row.push(format_points(applicant.factor_points(kind)));
        }
        for column in &extras {
            row.push(
                applicant
                    .hashed_extras
                    .get(column)
                    .map(|pid| pid.0.clone())
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the review artifact: pseudonymized rows only.
pub fn write_review_csv<W: Write>(
    writer: W,
    scored: &[ScoredApplicant],
) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_rows(&mut csv_writer, scored, false)
}

/// Write the export artifact for authorized local record-keeping: the review
/// view plus the original raw identifier column.
pub fn write_export_csv<W: Write>(
    writer: W,
    scored: &[ScoredApplicant],
) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_rows(&mut csv_writer, scored, true)
}
