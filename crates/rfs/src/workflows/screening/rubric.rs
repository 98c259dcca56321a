use serde::{Deserialize, Serialize};

/// Maximum for each rubric dimension; cues are additive and then clamped.
pub const DIMENSION_MAX: u32 = 10;
/// Maximum rubric total (three dimensions), the basis for rescaling onto the
/// configured Motivation weight cap.
pub const RUBRIC_MAX: u32 = 30;

/// Boolean predicate evaluated over the lowercased motivation text. Predicates
/// are order-independent within a dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RubricPredicate {
    /// Word count reaches a target.
    MinWords(usize),
    /// Any keyword from the set occurs as a substring.
    ContainsAny(Vec<String>),
    /// A standalone numeric token occurs anywhere in the text.
    ContainsNumber,
}

impl RubricPredicate {
    fn matches(&self, lowered: &str, words: usize) -> bool {
        match self {
            RubricPredicate::MinWords(target) => words >= *target,
            RubricPredicate::ContainsAny(keywords) => keywords
                .iter()
                .any(|keyword| lowered.contains(keyword.as_str())),
            RubricPredicate::ContainsNumber => contains_numeric_token(lowered),
        }
    }
}

/// One named additive contribution to a rubric dimension. Cue lists are
/// ParameterSet data so presets can tighten or loosen every predicate's
/// vocabulary and thresholds independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricCue {
    pub name: String,
    pub points: u32,
    pub predicate: RubricPredicate,
}

impl RubricCue {
    pub fn new(name: &str, points: u32, predicate: RubricPredicate) -> RubricCue {
        RubricCue {
            name: name.to_string(),
            points,
            predicate,
        }
    }
}

/// Full rubric configuration: the minimum-word gate plus the cue list for each
/// dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricConfig {
    pub min_words: usize,
    pub specificity: Vec<RubricCue>,
    pub feasibility: Vec<RubricCue>,
    pub relevance: Vec<RubricCue>,
}

fn keywords(set: &[&str]) -> Vec<String> {
    set.iter().map(|keyword| keyword.to_string()).collect()
}

pub(crate) const PLACE_VOCABULARY: [&str; 6] =
    ["district", "province", "country", "region", "university", "ministry"];
pub(crate) const DATA_VOCABULARY: [&str; 6] =
    ["data", "dataset", "dashboard", "faostat", "survey", "indicator"];
pub(crate) const ROLE_VOCABULARY: [&str; 6] =
    ["lecturer", "extension", "officer", "analyst", "programme", "policy"];
pub(crate) const PLANNING_VOCABULARY: [&str; 5] =
    ["week", "month", "timeline", "plan", "schedule"];
pub(crate) const DOMAIN_VOCABULARY: [&str; 6] =
    ["food system", "seed", "agric", "market", "value chain", "policy"];

impl RubricConfig {
    /// Default cue set with the reference word-count targets (200/300) and
    /// minimum-word gate.
    pub fn standard(min_words: usize) -> RubricConfig {
        let grounding: Vec<String> = PLACE_VOCABULARY
            .iter()
            .chain(DATA_VOCABULARY.iter())
            .map(|keyword| keyword.to_string())
            .collect();

        RubricConfig {
            min_words,
            specificity: vec![
                RubricCue::new("length_target", 5, RubricPredicate::MinWords(200)),
                RubricCue::new("length_stretch", 2, RubricPredicate::MinWords(300)),
                RubricCue::new("grounding", 2, RubricPredicate::ContainsAny(grounding)),
                RubricCue::new(
                    "role_vocabulary",
                    1,
                    RubricPredicate::ContainsAny(keywords(&ROLE_VOCABULARY)),
                ),
            ],
            feasibility: vec![
                RubricCue::new("quantified", 3, RubricPredicate::ContainsNumber),
                RubricCue::new(
                    "planning_vocabulary",
                    4,
                    RubricPredicate::ContainsAny(keywords(&PLANNING_VOCABULARY)),
                ),
                RubricCue::new(
                    "piloting",
                    2,
                    RubricPredicate::ContainsAny(keywords(&["pilot", "test"])),
                ),
                RubricCue::new(
                    "duration_phrase",
                    1,
                    RubricPredicate::ContainsAny(keywords(&["5\u{2013}6 weeks", "5-6 weeks"])),
                ),
            ],
            relevance: vec![
                RubricCue::new(
                    "domain_vocabulary",
                    4,
                    RubricPredicate::ContainsAny(keywords(&DOMAIN_VOCABULARY)),
                ),
                RubricCue::new(
                    "place_vocabulary",
                    3,
                    RubricPredicate::ContainsAny(keywords(&PLACE_VOCABULARY)),
                ),
                RubricCue::new(
                    "data_vocabulary",
                    2,
                    RubricPredicate::ContainsAny(keywords(&DATA_VOCABULARY)),
                ),
                RubricCue::new(
                    "beneficiary",
                    1,
                    RubricPredicate::ContainsAny(keywords(&["student", "farmer"])),
                ),
            ],
        }
    }
}

/// Per-dimension rubric result, each in `[0, DIMENSION_MAX]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricScores {
    pub specificity: u32,
    pub feasibility: u32,
    pub relevance: u32,
}

impl RubricScores {
    pub fn total(self) -> u32 {
        self.specificity + self.feasibility + self.relevance
    }
}

/// Score a motivation statement along the three heuristic dimensions.
///
/// The minimum-word gate is a hard cliff: below it every dimension is 0
/// regardless of keyword content. Cues accumulate independently per dimension
/// and clamp at [`DIMENSION_MAX`].
pub fn score_motivation(text: &str, config: &RubricConfig) -> RubricScores {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return RubricScores::default();
    }

    let words = trimmed.split_whitespace().count();
    if words < config.min_words {
        return RubricScores::default();
    }

    let lowered = trimmed.to_lowercase();
    let score_dimension = |cues: &[RubricCue]| -> u32 {
        let sum: u32 = cues
            .iter()
            .filter(|cue| cue.predicate.matches(&lowered, words))
            .map(|cue| cue.points)
            .sum();
        sum.min(DIMENSION_MAX)
    };

    RubricScores {
        specificity: score_dimension(&config.specificity),
        feasibility: score_dimension(&config.feasibility),
        relevance: score_dimension(&config.relevance),
    }
}

/// Word-boundary numeric token detection: a maximal digit run not glued to a
/// letter or underscore on either side.
fn contains_numeric_token(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        if chars[index].is_ascii_digit() {
            let start = index;
            while index < chars.len() && chars[index].is_ascii_digit() {
                index += 1;
            }
            let bounded_left = start == 0 || !is_word_char(chars[start - 1]);
            let bounded_right = index == chars.len() || !is_word_char(chars[index]);
            if bounded_left && bounded_right {
                return true;
            }
        } else {
            index += 1;
        }
    }
    false
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RubricConfig {
        RubricConfig::standard(30)
    }

    fn long_text(words: usize, extra: &str) -> String {
        let mut text = "steady ".repeat(words);
        text.push_str(extra);
        text
    }

    #[test]
    fn short_text_hits_the_gate() {
        let keyword_rich = "district survey policy plan pilot 12";
        let scores = score_motivation(keyword_rich, &config());
        assert_eq!(scores, RubricScores::default());
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(score_motivation("", &config()), RubricScores::default());
        assert_eq!(score_motivation("   ", &config()), RubricScores::default());
    }

    #[test]
    fn cues_accumulate_and_clamp_per_dimension() {
        let text = long_text(
            300,
            "district survey policy officer plan pilot 12 farmer market seed data",
        );
        let scores = score_motivation(&text, &config());
        assert_eq!(scores.specificity, 10);
        assert_eq!(scores.feasibility, 9);
        assert_eq!(scores.relevance, 10);
        assert!(scores.total() <= RUBRIC_MAX);
    }

    #[test]
    fn word_count_targets_step_the_specificity_score() {
        let base = long_text(100, "nothing notable here");
        assert_eq!(score_motivation(&base, &config()).specificity, 0);

        let mid = long_text(220, "nothing notable here");
        assert_eq!(score_motivation(&mid, &config()).specificity, 5);

        let long = long_text(320, "nothing notable here");
        assert_eq!(score_motivation(&long, &config()).specificity, 7);
    }

    #[test]
    fn numeric_tokens_require_word_boundaries() {
        assert!(contains_numeric_token("we cover 12 districts"));
        assert!(contains_numeric_token("5-6 weeks"));
        assert!(!contains_numeric_token("route66 crew"));
        assert!(!contains_numeric_token("b2b outreach"));
        assert!(!contains_numeric_token("no digits at all"));
    }
}
