use std::collections::BTreeMap;

use crate::workflows::screening::domain::{ApplicantRecord, PseudonymizedApplicant};
use crate::workflows::screening::identity::{hash_identifier, Salt};
use crate::workflows::screening::ingest::ColumnMap;
use crate::workflows::screening::pipeline::ScreeningPipeline;
use crate::workflows::screening::presets::{ParameterSet, PresetName};

pub(super) fn salt() -> Salt {
    Salt::new("screening-test-salt").expect("non-empty salt")
}

pub(super) fn standard_params() -> ParameterSet {
    ParameterSet::preset(PresetName::Standard)
}

pub(super) fn standard_pipeline() -> ScreeningPipeline {
    ScreeningPipeline::new(standard_params(), salt())
}

pub(super) fn record(row: usize, fields: &[(&str, &str)]) -> ApplicantRecord {
    ApplicantRecord {
        row,
        fields: fields
            .iter()
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect(),
    }
}

pub(super) fn full_mapping() -> ColumnMap {
    ColumnMap {
        identifier: Some("Email".to_string()),
        organisation: Some("Organisation".to_string()),
        sector: None,
        motivation: Some("MotivationText".to_string()),
        function_title: Some("FunctionTitle".to_string()),
        time_band: Some("WeeklyTimeBand".to_string()),
        language: Some("LanguageComfort".to_string()),
        referee: Some("RefereeConfirmsFit".to_string()),
        alumni: Some("AlumniReferral".to_string()),
        application_date: Some("ApplicationDate".to_string()),
        hash_columns: Vec::new(),
    }
}

/// Motivation statement comfortably past the 200-word target, carrying place,
/// data, planning, role, and domain vocabulary plus a numeric token.
pub(super) fn strong_motivation() -> String {
    let filler = "We will keep supporting county field teams with steady mentoring \
and practical sessions so new staff gain confidence quickly. "
        .repeat(12);
    format!(
        "{filler}We plan a pilot survey across 12 districts with policy officer \
colleagues and smallholder farmer groups."
    )
}

pub(super) fn applicant(fields: &[(&str, Option<&str>)]) -> PseudonymizedApplicant {
    let lookup = |key: &str| -> Option<String> {
        fields
            .iter()
            .find(|(name, _)| *name == key)
            .and_then(|(_, value)| value.map(|value| value.to_string()))
    };

    let identifier = lookup("identifier");
    let seed = identifier.clone().unwrap_or_else(|| "row_0".to_string());

    PseudonymizedApplicant {
        pid: hash_identifier(&seed, &salt()),
        raw_identifier: identifier,
        hashed_extras: BTreeMap::new(),
        organisation: lookup("organisation"),
        structured_sector: lookup("sector"),
        motivation: lookup("motivation"),
        function_title: lookup("function_title"),
        time_band: lookup("time_band"),
        language: lookup("language"),
        referee: lookup("referee"),
        alumni: lookup("alumni"),
        application_date: None,
    }
}
