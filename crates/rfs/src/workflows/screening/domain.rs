use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pseudonymous identifier: a fixed-length hex prefix of a salted one-way hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pid(pub String);

/// One raw intake row: an open column -> value mapping with no fixed schema.
/// Only mapped roles are interpreted; every other field passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub row: usize,
    pub fields: BTreeMap<String, String>,
}

/// Closed sector enumeration. `Other` is the total fallback and always exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    Education,
    #[serde(rename = "NGO/CSO")]
    NgoCso,
    Government,
    Multilateral,
    Private,
    #[serde(rename = "Farmer Org")]
    FarmerOrg,
    Consultancy,
    Finance,
    #[serde(rename = "Other/Unclassified")]
    Other,
}

impl Sector {
    pub const ALL: [Sector; 9] = [
        Sector::Education,
        Sector::NgoCso,
        Sector::Government,
        Sector::Multilateral,
        Sector::Private,
        Sector::FarmerOrg,
        Sector::Consultancy,
        Sector::Finance,
        Sector::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Sector::Education => "Education",
            Sector::NgoCso => "NGO/CSO",
            Sector::Government => "Government",
            Sector::Multilateral => "Multilateral",
            Sector::Private => "Private",
            Sector::FarmerOrg => "Farmer Org",
            Sector::Consultancy => "Consultancy",
            Sector::Finance => "Finance",
            Sector::Other => "Other/Unclassified",
        }
    }

    /// Validate a structured sector value against the closed label set.
    pub fn parse(value: &str) -> Option<Sector> {
        let trimmed = value.trim();
        Sector::ALL
            .iter()
            .copied()
            .find(|sector| sector.label().eq_ignore_ascii_case(trimmed))
    }
}

/// The seven named factors contributing to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FactorKind {
    Motivation,
    Sector,
    Referee,
    Function,
    Time,
    Language,
    Alumni,
}

impl FactorKind {
    pub const ALL: [FactorKind; 7] = [
        FactorKind::Motivation,
        FactorKind::Sector,
        FactorKind::Referee,
        FactorKind::Function,
        FactorKind::Time,
        FactorKind::Language,
        FactorKind::Alumni,
    ];

    /// Column label used by review and export artifacts.
    pub const fn column(self) -> &'static str {
        match self {
            FactorKind::Motivation => "MotivationPts",
            FactorKind::Sector => "SectorPts",
            FactorKind::Referee => "RefereePts",
            FactorKind::Function => "FunctionPts",
            FactorKind::Time => "TimePts",
            FactorKind::Language => "LanguagePts",
            FactorKind::Alumni => "AlumniPts",
        }
    }
}

/// Discrete capped contribution to the RFS, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: FactorKind,
    pub points: f64,
}

/// Ordered outcome labels: Priority > Admit > Reserve (Equity) / Reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DecisionLabel {
    Priority,
    Admit,
    #[serde(rename = "Reserve (Equity)")]
    ReserveEquity,
    Reserve,
}

impl DecisionLabel {
    pub const fn label(self) -> &'static str {
        match self {
            DecisionLabel::Priority => "Priority",
            DecisionLabel::Admit => "Admit",
            DecisionLabel::ReserveEquity => "Reserve (Equity)",
            DecisionLabel::Reserve => "Reserve",
        }
    }

    /// Ordering tier; both reserve outcomes share the lowest tier.
    pub const fn tier(self) -> u8 {
        match self {
            DecisionLabel::Priority => 2,
            DecisionLabel::Admit => 1,
            DecisionLabel::ReserveEquity | DecisionLabel::Reserve => 0,
        }
    }
}

/// Typed view of one record after the column -> role mapping has been resolved.
/// Downstream components never perform raw column lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedApplicant {
    pub row: usize,
    pub identifier: Option<String>,
    pub organisation: Option<String>,
    pub structured_sector: Option<String>,
    pub motivation: Option<String>,
    pub function_title: Option<String>,
    pub time_band: Option<String>,
    pub language: Option<String>,
    pub referee: Option<String>,
    pub alumni: Option<String>,
    pub application_date: Option<NaiveDate>,
    /// Additional identifier columns selected for hashing, column -> raw value.
    pub extra_identifiers: BTreeMap<String, String>,
}

/// Record once the raw identifier has been replaced by a PID. The raw value is
/// retained only for the export channel, never for the review view.
#[derive(Debug, Clone, PartialEq)]
pub struct PseudonymizedApplicant {
    pub pid: Pid,
    pub raw_identifier: Option<String>,
    pub hashed_extras: BTreeMap<String, Pid>,
    pub organisation: Option<String>,
    pub structured_sector: Option<String>,
    pub motivation: Option<String>,
    pub function_title: Option<String>,
    pub time_band: Option<String>,
    pub language: Option<String>,
    pub referee: Option<String>,
    pub alumni: Option<String>,
    pub application_date: Option<NaiveDate>,
}

/// Fully scored and labeled applicant.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredApplicant {
    pub pid: Pid,
    /// Export-channel copy of the raw identifier; excluded from review output.
    pub raw_identifier: Option<String>,
    pub hashed_extras: BTreeMap<String, Pid>,
    pub sector: Sector,
    pub factors: Vec<FactorScore>,
    pub rfs: f64,
    pub label: DecisionLabel,
}

impl ScoredApplicant {
    pub fn factor_points(&self, kind: FactorKind) -> f64 {
        self.factors
            .iter()
            .find(|score| score.factor == kind)
            .map(|score| score.points)
            .unwrap_or(0.0)
    }
}
