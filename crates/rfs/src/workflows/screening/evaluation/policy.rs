use super::super::domain::{DecisionLabel, Sector};
use super::super::presets::ParameterSet;

/// Map a composite score to its outcome label. Bands are evaluated top-down
/// with first match wins; the equity carve-out is checked only after both
/// admission bands fail, so it can rescue otherwise-Reserve records without
/// touching higher outcomes.
///
/// `priority_threshold >= admit_threshold` is expected but not enforced: an
/// inverted configuration yields a labeler that never emits Admit. That is a
/// documented configuration hazard, not a runtime error.
pub(crate) fn label_score(rfs: f64, sector: Sector, params: &ParameterSet) -> DecisionLabel {
    if rfs >= params.priority_threshold {
        return DecisionLabel::Priority;
    }
    if rfs >= params.admit_threshold {
        return DecisionLabel::Admit;
    }

    let equity = &params.equity;
    if equity.enabled && sector == equity.sector && rfs >= equity.lower && rfs <= equity.upper {
        return DecisionLabel::ReserveEquity;
    }

    DecisionLabel::Reserve
}
