use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bands::{LanguageBand, TimeBand};
use super::domain::{FactorKind, Sector};
use super::rubric::RubricConfig;
use super::sector::{default_sector_rules, SectorRule};

/// Named parameter presets. Each resolves to a complete, internally
/// consistent [`ParameterSet`]; presets are pure data, never code forks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetName {
    Standard,
    Balanced,
    FinanceOptimized,
}

impl PresetName {
    pub const ALL: [PresetName; 3] = [
        PresetName::Standard,
        PresetName::Balanced,
        PresetName::FinanceOptimized,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            PresetName::Standard => "standard",
            PresetName::Balanced => "balanced",
            PresetName::FinanceOptimized => "finance_optimized",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            PresetName::Standard => "Reference weighting with the 60/70 thresholds",
            PresetName::Balanced => "General cohort weighting with a tightened word gate",
            PresetName::FinanceOptimized => {
                "Recalibrated for finance cohorts: function and referee signals lead"
            }
        }
    }

    pub fn parse(value: &str) -> Option<PresetName> {
        let trimmed = value.trim();
        PresetName::ALL
            .iter()
            .copied()
            .find(|preset| preset.key().eq_ignore_ascii_case(trimmed))
    }
}

/// Equity carve-out: a score band, restricted to one designated sector, that
/// rescues otherwise-Reserve applicants into a distinct outcome. Both band
/// ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityReserve {
    pub enabled: bool,
    pub sector: Sector,
    pub lower: f64,
    pub upper: f64,
}

/// Per-factor maximum points. Every factor's contribution is clamped to its
/// cap by the producing rule; the aggregate maximum is the sum of caps and may
/// exceed 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub motivation: f64,
    pub sector: f64,
    pub referee: f64,
    pub function: f64,
    pub time: f64,
    pub language: f64,
    pub alumni: f64,
}

impl FactorWeights {
    pub fn cap(&self, factor: FactorKind) -> f64 {
        match factor {
            FactorKind::Motivation => self.motivation,
            FactorKind::Sector => self.sector,
            FactorKind::Referee => self.referee,
            FactorKind::Function => self.function,
            FactorKind::Time => self.time,
            FactorKind::Language => self.language,
            FactorKind::Alumni => self.alumni,
        }
    }
}

/// Function-title vocabulary: direct hits score the full cap, indirect hits a
/// configured fraction of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionLexicon {
    pub direct: Vec<String>,
    pub indirect: Vec<String>,
    pub indirect_multiplier: f64,
}

impl FunctionLexicon {
    fn standard() -> FunctionLexicon {
        FunctionLexicon {
            direct: to_strings(&[
                "lecturer",
                "extension",
                "analyst",
                "programme",
                "program officer",
                "policy",
                "teacher",
                "advisor",
            ]),
            indirect: to_strings(&["assistant", "admin", "coordinator", "student", "intern"]),
            indirect_multiplier: 0.5,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Complete, immutable bundle of every tunable scoring parameter. Exactly one
/// ParameterSet is active per scoring run; there is no implicit partial merge
/// across presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub admit_threshold: f64,
    pub priority_threshold: f64,
    pub equity: EquityReserve,
    pub weights: FactorWeights,
    pub sector_uplift: BTreeMap<Sector, f64>,
    pub sector_rules: Vec<SectorRule>,
    pub rubric: RubricConfig,
    pub function_lexicon: FunctionLexicon,
    pub time_points: BTreeMap<TimeBand, f64>,
    pub language_points: BTreeMap<LanguageBand, f64>,
}

fn standard_time_points() -> BTreeMap<TimeBand, f64> {
    BTreeMap::from([
        (TimeBand::UnderOne, 0.0),
        (TimeBand::OneToTwo, 3.0),
        (TimeBand::TwoToThree, 6.0),
        (TimeBand::ThreePlus, 10.0),
    ])
}

fn standard_language_points() -> BTreeMap<LanguageBand, f64> {
    BTreeMap::from([
        (LanguageBand::Basic, 0.0),
        (LanguageBand::Working, 3.0),
        (LanguageBand::Fluent, 5.0),
    ])
}

fn uplift(entries: &[(Sector, f64)]) -> BTreeMap<Sector, f64> {
    entries.iter().copied().collect()
}

impl ParameterSet {
    /// Resolve a named preset, optionally replacing fields from an override
    /// set seeded with the preset's defaults. Re-resolution is pure and has no
    /// memory of prior runs.
    pub fn resolve(preset: PresetName, overrides: Option<ParameterOverrides>) -> ParameterSet {
        let mut params = ParameterSet::preset(preset);
        if let Some(overrides) = overrides {
            overrides.apply(&mut params);
        }
        params
    }

    pub fn preset(name: PresetName) -> ParameterSet {
        match name {
            PresetName::Standard => ParameterSet::standard(),
            PresetName::Balanced => ParameterSet::balanced(),
            PresetName::FinanceOptimized => ParameterSet::finance_optimized(),
        }
    }

    fn standard() -> ParameterSet {
        ParameterSet {
            admit_threshold: 60.0,
            priority_threshold: 70.0,
            equity: EquityReserve {
                enabled: true,
                sector: Sector::FarmerOrg,
                lower: 50.0,
                upper: 59.0,
            },
            weights: FactorWeights {
                motivation: 30.0,
                sector: 20.0,
                referee: 10.0,
                function: 10.0,
                time: 10.0,
                language: 5.0,
                alumni: 5.0,
            },
            sector_uplift: uplift(&[
                (Sector::Education, 20.0),
                (Sector::NgoCso, 15.0),
                (Sector::Government, 10.0),
                (Sector::Multilateral, 10.0),
                (Sector::Private, 10.0),
                (Sector::FarmerOrg, 0.0),
                (Sector::Consultancy, 10.0),
                (Sector::Finance, 10.0),
                (Sector::Other, 0.0),
            ]),
            sector_rules: default_sector_rules(),
            rubric: RubricConfig::standard(30),
            function_lexicon: FunctionLexicon::standard(),
            time_points: standard_time_points(),
            language_points: standard_language_points(),
        }
    }

    fn balanced() -> ParameterSet {
        ParameterSet {
            admit_threshold: 55.0,
            priority_threshold: 70.0,
            equity: EquityReserve {
                enabled: true,
                sector: Sector::FarmerOrg,
                lower: 45.0,
                upper: 54.0,
            },
            weights: FactorWeights {
                motivation: 25.0,
                sector: 10.0,
                referee: 28.0,
                function: 15.0,
                time: 10.0,
                language: 20.0,
                alumni: 5.0,
            },
            sector_uplift: uplift(&[
                (Sector::NgoCso, 10.0),
                (Sector::Government, 8.0),
                (Sector::Education, 8.0),
                (Sector::Private, 5.0),
                (Sector::FarmerOrg, 5.0),
                (Sector::Other, 0.0),
            ]),
            sector_rules: default_sector_rules(),
            rubric: RubricConfig::standard(50),
            function_lexicon: FunctionLexicon::standard(),
            time_points: standard_time_points(),
            language_points: standard_language_points(),
        }
    }

    fn finance_optimized() -> ParameterSet {
        ParameterSet {
            admit_threshold: 50.0,
            priority_threshold: 65.0,
            equity: EquityReserve {
                enabled: true,
                sector: Sector::FarmerOrg,
                lower: 40.0,
                upper: 49.0,
            },
            weights: FactorWeights {
                motivation: 15.0,
                sector: 5.0,
                referee: 28.0,
                function: 25.0,
                time: 10.0,
                language: 15.0,
                alumni: 5.0,
            },
            sector_uplift: uplift(&[
                (Sector::Finance, 8.0),
                (Sector::Private, 5.0),
                (Sector::Government, 5.0),
                (Sector::NgoCso, 5.0),
                (Sector::FarmerOrg, 2.0),
                (Sector::Other, 0.0),
            ]),
            sector_rules: default_sector_rules(),
            rubric: RubricConfig::standard(30),
            function_lexicon: FunctionLexicon::standard(),
            time_points: standard_time_points(),
            language_points: standard_language_points(),
        }
    }
}

/// Field-by-field replacement over a chosen preset's defaults. A scoring run
/// always uses a fully-specified set; absent fields keep the preset value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterOverrides {
    pub admit_threshold: Option<f64>,
    pub priority_threshold: Option<f64>,
    pub equity: Option<EquityReserve>,
    pub weights: Option<FactorWeights>,
    pub sector_uplift: Option<BTreeMap<Sector, f64>>,
    pub sector_rules: Option<Vec<SectorRule>>,
    pub min_motivation_words: Option<usize>,
    pub rubric: Option<RubricConfig>,
    pub function_lexicon: Option<FunctionLexicon>,
    pub time_points: Option<BTreeMap<TimeBand, f64>>,
    pub language_points: Option<BTreeMap<LanguageBand, f64>>,
}

impl ParameterOverrides {
    fn apply(self, params: &mut ParameterSet) {
        if let Some(value) = self.admit_threshold {
            params.admit_threshold = value;
        }
        if let Some(value) = self.priority_threshold {
            params.priority_threshold = value;
        }
        if let Some(value) = self.equity {
            params.equity = value;
        }
        if let Some(value) = self.weights {
            params.weights = value;
        }
        if let Some(value) = self.sector_uplift {
            params.sector_uplift = value;
        }
        if let Some(value) = self.sector_rules {
            params.sector_rules = value;
        }
        if let Some(value) = self.rubric {
            params.rubric = value;
        }
        // The word gate can be overridden alone, after any full rubric swap.
        if let Some(value) = self.min_motivation_words {
            params.rubric.min_words = value;
        }
        if let Some(value) = self.function_lexicon {
            params.function_lexicon = value;
        }
        if let Some(value) = self.time_points {
            params.time_points = value;
        }
        if let Some(value) = self.language_points {
            params.language_points = value;
        }
    }
}
