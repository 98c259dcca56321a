use serde::{Deserialize, Serialize};

use super::domain::Sector;

/// One ordered classification rule: the first rule with any substring hit
/// wins. The ordering is the documented tie-break (an organisation mentioning
/// both "university" and "bank" resolves to whichever rule is listed first),
/// a product decision rather than an incident of implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRule {
    pub sector: Sector,
    pub keywords: Vec<String>,
}

impl SectorRule {
    fn new(sector: Sector, keywords: &[&str]) -> SectorRule {
        SectorRule {
            sector,
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        }
    }
}

/// Default keyword table, checked top to bottom.
pub fn default_sector_rules() -> Vec<SectorRule> {
    vec![
        SectorRule::new(Sector::Education, &["universit", "school", "educat"]),
        SectorRule::new(
            Sector::NgoCso,
            &["ngo", "foundation", "association", "civil", "non profit", "non-profit"],
        ),
        SectorRule::new(
            Sector::Government,
            &["ministry", "gov", "municipal", "department of", "bureau"],
        ),
        SectorRule::new(
            Sector::Multilateral,
            &["united nations", "world bank", "fao", "ifad", "ifpri", "undp", "unesco"],
        ),
        SectorRule::new(
            Sector::Private,
            &["ltd", "company", "bv", "inc", "plc", "gmbh", "sarl"],
        ),
        SectorRule::new(Sector::FarmerOrg, &["farmer", "coop", "co-op", "cooperative"]),
        SectorRule::new(Sector::Consultancy, &["consult"]),
        SectorRule::new(Sector::Finance, &["bank", "finance", "microfinance"]),
    ]
}

/// Total classification: every input maps to exactly one sector.
///
/// A non-empty structured value is used verbatim after validation against the
/// closed enumeration; unknown values fall back to `Other`. Otherwise the
/// organisation text is matched against the ordered keyword rules.
pub fn classify_sector(
    structured: Option<&str>,
    org_text: Option<&str>,
    rules: &[SectorRule],
) -> Sector {
    if let Some(value) = structured {
        if !value.trim().is_empty() {
            return Sector::parse(value).unwrap_or(Sector::Other);
        }
    }

    let Some(text) = org_text else {
        return Sector::Other;
    };
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return Sector::Other;
    }

    for rule in rules {
        if rule
            .keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
        {
            return rule.sector;
        }
    }
    Sector::Other
}
