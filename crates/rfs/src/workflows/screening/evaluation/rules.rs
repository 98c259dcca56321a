use super::super::bands::{
    interpret_confirmation, normalize_language_band, normalize_time_band,
};
use super::super::domain::{FactorKind, FactorScore, PseudonymizedApplicant, Sector};
use super::super::presets::{FunctionLexicon, ParameterSet};
use super::super::rubric::{score_motivation, RUBRIC_MAX};

/// Score all seven factors for one record. Each factor is clamped to its own
/// weight cap here, so the final aggregation is an unconditional sum.
pub(crate) fn score_factors(
    applicant: &PseudonymizedApplicant,
    sector: Sector,
    params: &ParameterSet,
) -> (Vec<FactorScore>, f64) {
    let weights = &params.weights;
    let mut factors = Vec::with_capacity(FactorKind::ALL.len());

    // Motivation: rubric total rescaled onto the configured cap.
    let rubric = applicant
        .motivation
        .as_deref()
        .map(|text| score_motivation(text, &params.rubric))
        .unwrap_or_default();
    let motivation = (rubric.total() as f64 / RUBRIC_MAX as f64) * weights.motivation;
    push(&mut factors, FactorKind::Motivation, motivation, weights.motivation);

    // Sector uplift; sectors absent from the table use the Other entry.
    let uplift = params
        .sector_uplift
        .get(&sector)
        .or_else(|| params.sector_uplift.get(&Sector::Other))
        .copied()
        .unwrap_or(0.0);
    push(&mut factors, FactorKind::Sector, uplift, weights.sector);

    let referee = interpret_confirmation(applicant.referee.as_deref(), weights.referee);
    push(&mut factors, FactorKind::Referee, referee, weights.referee);

    let function = function_points(
        applicant.function_title.as_deref(),
        &params.function_lexicon,
        weights.function,
    );
    push(&mut factors, FactorKind::Function, function, weights.function);

    // Band factors: unknown bands are "no signal" and contribute 0.
    let time = applicant
        .time_band
        .as_deref()
        .and_then(normalize_time_band)
        .and_then(|band| params.time_points.get(&band).copied())
        .unwrap_or(0.0);
    push(&mut factors, FactorKind::Time, time, weights.time);

    let language = applicant
        .language
        .as_deref()
        .and_then(normalize_language_band)
        .and_then(|band| params.language_points.get(&band).copied())
        .unwrap_or(0.0);
    push(&mut factors, FactorKind::Language, language, weights.language);

    let alumni = interpret_confirmation(applicant.alumni.as_deref(), weights.alumni);
    push(&mut factors, FactorKind::Alumni, alumni, weights.alumni);

    let rfs = round_score(factors.iter().map(|factor| factor.points).sum());
    (factors, rfs)
}

fn push(factors: &mut Vec<FactorScore>, kind: FactorKind, points: f64, cap: f64) {
    factors.push(FactorScore {
        factor: kind,
        points: clamp_points(points, cap),
    });
}

/// Bound a factor's contribution to `[0, cap]`.
fn clamp_points(points: f64, cap: f64) -> f64 {
    points.clamp(0.0, cap.max(0.0))
}

/// Round a composite score to two decimal places.
fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Function-title relevance: direct vocabulary scores the full cap, indirect
/// vocabulary the configured fraction, anything else 0.
fn function_points(title: Option<&str>, lexicon: &FunctionLexicon, cap: f64) -> f64 {
    let Some(title) = title else {
        return 0.0;
    };
    let lowered = title.trim().to_lowercase();
    if lowered.is_empty() {
        return 0.0;
    }

    let hit = |keywords: &[String]| {
        keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
    };

    if hit(&lexicon.direct) {
        cap
    } else if hit(&lexicon.indirect) {
        cap * lexicon.indirect_multiplier
    } else {
        0.0
    }
}
