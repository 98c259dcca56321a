use std::io::Cursor;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::identity::Salt;
use super::ingest::{read_batch, ColumnMap};
use super::pipeline::{DedupPolicy, ScreeningPipeline};
use super::presets::{ParameterOverrides, ParameterSet, PresetName};
use super::report::{summarize, ReviewRow, ScreeningSummary};

/// Shared state for the screening endpoints: the process-wide salt only. A
/// pipeline is constructed per request from the requested parameters.
#[derive(Clone)]
pub struct ScreeningState {
    pub salt: Salt,
}

/// Router builder exposing the scoring and preset endpoints.
pub fn screening_router(state: ScreeningState) -> Router {
    Router::new()
        .route("/api/v1/screening/score", post(score_handler))
        .route("/api/v1/screening/presets", get(presets_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    /// Raw CSV content of the applications batch.
    pub(crate) csv: String,
    /// Column -> role mapping; guessed from the header row when omitted.
    #[serde(default)]
    pub(crate) mapping: Option<ColumnMap>,
    /// Preset name; defaults to `standard`.
    #[serde(default)]
    pub(crate) preset: Option<String>,
    /// Field-by-field replacements over the chosen preset's defaults.
    #[serde(default)]
    pub(crate) overrides: Option<ParameterOverrides>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    pub(crate) preset: PresetName,
    pub(crate) dedup_policy: DedupPolicy,
    pub(crate) duplicates_removed: usize,
    pub(crate) applicants: Vec<ReviewRow>,
    pub(crate) summary: ScreeningSummary,
}

pub(crate) async fn score_handler(
    State(state): State<ScreeningState>,
    Json(request): Json<ScoreRequest>,
) -> Response {
    let preset = match &request.preset {
        Some(raw) => match PresetName::parse(raw) {
            Some(preset) => preset,
            None => {
                let payload = json!({
                    "error": format!("unknown preset '{raw}'"),
                    "known_presets": PresetName::ALL
                        .iter()
                        .map(|preset| preset.key())
                        .collect::<Vec<_>>(),
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
            }
        },
        None => PresetName::Standard,
    };

    let (headers, records) = match read_batch(Cursor::new(request.csv.into_bytes())) {
        Ok(batch) => batch,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    let mapping = request
        .mapping
        .unwrap_or_else(|| ColumnMap::guess(&headers));

    let params = ParameterSet::resolve(preset, request.overrides);
    let pipeline = ScreeningPipeline::new(params, state.salt.clone());
    let outcome = pipeline.run(&records, &mapping);

    let response = ScoreResponse {
        preset,
        dedup_policy: outcome.policy,
        duplicates_removed: outcome.duplicates_removed,
        applicants: outcome.scored.iter().map(ReviewRow::from_scored).collect(),
        summary: summarize(&outcome.scored),
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[derive(Debug, Serialize)]
pub(crate) struct PresetView {
    pub(crate) name: PresetName,
    pub(crate) description: &'static str,
    pub(crate) parameters: ParameterSet,
}

pub(crate) async fn presets_handler() -> Json<Vec<PresetView>> {
    let views = PresetName::ALL
        .iter()
        .map(|preset| PresetView {
            name: *preset,
            description: preset.description(),
            parameters: ParameterSet::preset(*preset),
        })
        .collect();
    Json(views)
}
