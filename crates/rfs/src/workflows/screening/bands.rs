use serde::{Deserialize, Serialize};

/// Canonical weekly time commitment bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeBand {
    #[serde(rename = "<1h")]
    UnderOne,
    #[serde(rename = "1-2h")]
    OneToTwo,
    #[serde(rename = "2-3h")]
    TwoToThree,
    #[serde(rename = ">=3h")]
    ThreePlus,
}

impl TimeBand {
    pub const fn label(self) -> &'static str {
        match self {
            TimeBand::UnderOne => "<1h",
            TimeBand::OneToTwo => "1-2h",
            TimeBand::TwoToThree => "2-3h",
            TimeBand::ThreePlus => ">=3h",
        }
    }
}

/// Canonical language comfort bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LanguageBand {
    #[serde(rename = "Basic/With support")]
    Basic,
    Working,
    Fluent,
}

impl LanguageBand {
    pub const fn label(self) -> &'static str {
        match self {
            LanguageBand::Basic => "Basic/With support",
            LanguageBand::Working => "Working",
            LanguageBand::Fluent => "Fluent",
        }
    }
}

/// Unify visually-equivalent punctuation, strip all whitespace, lowercase.
fn canonicalize(raw: &str) -> String {
    let unified = raw.replace(['\u{2013}', '\u{2014}'], "-").replace('\u{2265}', ">=");
    let mut compact = String::with_capacity(unified.len());
    for ch in unified.chars() {
        if !ch.is_whitespace() {
            for lowered in ch.to_lowercase() {
                compact.push(lowered);
            }
        }
    }
    compact
}

/// Strip accepted hour-suffix spelling variants down to the canonical `h`.
fn strip_hour_suffix(value: &str) -> String {
    for suffix in ["hours", "hour", "hrs", "hr"] {
        if let Some(prefix) = value.strip_suffix(suffix) {
            return format!("{prefix}h");
        }
    }
    value.to_string()
}

/// Normalize a free-text weekly time value to a canonical band.
/// Unrecognized values are "no signal", never an error.
pub fn normalize_time_band(raw: &str) -> Option<TimeBand> {
    let compact = strip_hour_suffix(&canonicalize(raw));
    match compact.as_str() {
        "<1h" => Some(TimeBand::UnderOne),
        "1-2h" => Some(TimeBand::OneToTwo),
        "2-3h" => Some(TimeBand::TwoToThree),
        ">=3h" => Some(TimeBand::ThreePlus),
        _ => None,
    }
}

/// Normalize a free-text language comfort value to a canonical band.
pub fn normalize_language_band(raw: &str) -> Option<LanguageBand> {
    match canonicalize(raw).as_str() {
        "fluent" => Some(LanguageBand::Fluent),
        "working" => Some(LanguageBand::Working),
        "basic" | "basic/withsupport" | "withsupport" => Some(LanguageBand::Basic),
        _ => None,
    }
}

/// Explicit-negative prefixes for free-text yes/no fields.
const NEGATIVE_PREFIXES: [&str; 6] = ["no", "none", "n/a", "na", "not applicable", "0"];

/// Interpret a free-text confirmation field (referee confirmation, alumni
/// referral). Missing or empty input scores 0; text opening with an explicit
/// negative scores 0; any other non-empty text scores the full cap. Free text
/// such as a recommender's name counts as confirmation — the permissive
/// default is intentional and the asymmetry must not be "fixed".
pub fn interpret_confirmation(raw: Option<&str>, cap: f64) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return 0.0;
    }

    let negative = NEGATIVE_PREFIXES.iter().any(|prefix| {
        text == *prefix
            || text.starts_with(&format!("{prefix} "))
            || text.starts_with(&format!("{prefix},"))
    });

    if negative {
        0.0
    } else {
        cap
    }
}
