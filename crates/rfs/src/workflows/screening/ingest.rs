use std::collections::BTreeMap;
use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicantRecord, ResolvedApplicant};

/// Logical role -> column header mapping, supplied by the caller and resolved
/// once per batch before scoring begins. Every role is optional; unmapped
/// roles degrade to defined defaults downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub identifier: Option<String>,
    pub organisation: Option<String>,
    pub sector: Option<String>,
    pub motivation: Option<String>,
    pub function_title: Option<String>,
    pub time_band: Option<String>,
    pub language: Option<String>,
    pub referee: Option<String>,
    pub alumni: Option<String>,
    pub application_date: Option<String>,
    /// Additional identifier columns to hash into `HASH_<col>` fields.
    pub hash_columns: Vec<String>,
}

impl ColumnMap {
    /// Guess a mapping from common header spellings. Used when the caller
    /// supplies no explicit mapping; any guess can be overridden per role.
    pub fn guess(headers: &[String]) -> ColumnMap {
        let find = |candidates: &[&str]| -> Option<String> {
            candidates
                .iter()
                .find_map(|candidate| headers.iter().find(|header| header.as_str() == *candidate))
                .cloned()
        };

        ColumnMap {
            identifier: find(&["Email", "email", "E-mail", "EMAIL"]),
            organisation: find(&[
                "Organisation",
                "Organization",
                "organisation",
                "organization",
                "Organisation / SectorText",
            ]),
            sector: find(&["Sector", "sector", "SECTOR"]),
            motivation: find(&["MotivationText", "Motivation", "motivation"]),
            function_title: find(&["FunctionTitle", "Function", "function", "Position", "Job Title"]),
            time_band: find(&["WeeklyTimeBand", "TimeBand", "Time", "Weekly Time"]),
            language: find(&["LanguageComfort", "Language", "language"]),
            referee: find(&[
                "RefereeConfirmsFit",
                "Referee",
                "referee",
                "Recommendation",
                "Recommender",
            ]),
            alumni: find(&["AlumniReferral", "Alumni", "alumni", "Referral", "AlumniRef"]),
            application_date: find(&["ApplicationDate", "Date", "date", "Timestamp"]),
            hash_columns: Vec::new(),
        }
    }
}

/// Batch-level ingestion failure. Per-field problems never raise; only an
/// unreadable or structurally invalid CSV aborts the batch.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read applications file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid applications CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Read a full applications CSV into raw records. Returns the header row and
/// one open field mapping per data row.
pub fn read_batch<R: Read>(reader: R) -> Result<(Vec<String>, Vec<ApplicantRecord>), ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.to_string())
        .collect();

    let mut records = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let fields: BTreeMap<String, String> = headers
            .iter()
            .cloned()
            .zip(record.iter().map(|value| value.to_string()))
            .collect();
        records.push(ApplicantRecord { row, fields });
    }

    Ok((headers, records))
}

/// Resolve the column -> role mapping for every record, yielding the typed
/// view the pipeline consumes. Resolution happens exactly once per batch.
pub fn resolve_batch(records: &[ApplicantRecord], mapping: &ColumnMap) -> Vec<ResolvedApplicant> {
    records
        .iter()
        .map(|record| resolve_record(record, mapping))
        .collect()
}

fn resolve_record(record: &ApplicantRecord, mapping: &ColumnMap) -> ResolvedApplicant {
    let take = |column: &Option<String>| -> Option<String> {
        column
            .as_deref()
            .and_then(|column| record.fields.get(column))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(|value| value.to_string())
    };

    let extra_identifiers: BTreeMap<String, String> = mapping
        .hash_columns
        .iter()
        .filter_map(|column| {
            record
                .fields
                .get(column)
                .map(|value| (column.clone(), value.clone()))
        })
        .collect();

    ResolvedApplicant {
        row: record.row,
        identifier: take(&mapping.identifier),
        organisation: take(&mapping.organisation),
        structured_sector: take(&mapping.sector),
        motivation: take(&mapping.motivation),
        function_title: take(&mapping.function_title),
        time_band: take(&mapping.time_band),
        language: take(&mapping.language),
        referee: take(&mapping.referee),
        alumni: take(&mapping.alumni),
        application_date: take(&mapping.application_date)
            .as_deref()
            .and_then(parse_application_date),
        extra_identifiers,
    }
}

/// Lenient date parsing for the dedup ordering column. Unparseable values are
/// treated as missing, never as errors.
fn parse_application_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.naive_utc().date());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_csv() -> &'static str {
        "Email,Organisation,MotivationText,ApplicationDate,Badge\n\
         a@x.org,Ministry of Water,long text here,2024-01-05,B-1\n\
         ,University of Nowhere,,not a date,B-2\n"
    }

    #[test]
    fn read_batch_keeps_every_column() {
        let (headers, records) = read_batch(sample_csv().as_bytes()).expect("csv parses");
        assert_eq!(headers.len(), 5);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields["Badge"], "B-1");
        assert_eq!(records[1].fields["Email"], "");
    }

    #[test]
    fn guessed_mapping_finds_common_headers() {
        let (headers, _) = read_batch(sample_csv().as_bytes()).expect("csv parses");
        let mapping = ColumnMap::guess(&headers);
        assert_eq!(mapping.identifier.as_deref(), Some("Email"));
        assert_eq!(mapping.organisation.as_deref(), Some("Organisation"));
        assert_eq!(mapping.application_date.as_deref(), Some("ApplicationDate"));
        assert!(mapping.sector.is_none());
    }

    #[test]
    fn resolution_yields_typed_values_and_defaults() {
        let (headers, records) = read_batch(sample_csv().as_bytes()).expect("csv parses");
        let mut mapping = ColumnMap::guess(&headers);
        mapping.hash_columns = vec!["Badge".to_string()];
        let resolved = resolve_batch(&records, &mapping);

        assert_eq!(resolved[0].identifier.as_deref(), Some("a@x.org"));
        assert_eq!(
            resolved[0].application_date,
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(resolved[0].extra_identifiers["Badge"], "B-1");

        // Missing identifier and unparseable date degrade to None.
        assert_eq!(resolved[1].identifier, None);
        assert_eq!(resolved[1].application_date, None);
        assert_eq!(resolved[1].motivation, None);
    }

    #[test]
    fn date_formats_are_parsed_leniently() {
        assert_eq!(
            parse_application_date("2024-06-01T10:30:00Z"),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(
            parse_application_date("2024-06-01 08:00:00"),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(
            parse_application_date("01/06/2024"),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(parse_application_date("yesterday"), None);
    }

    #[test]
    fn malformed_csv_is_a_batch_level_error() {
        let broken = "Email,Organisation\na@x.org,one,too many\n";
        assert!(read_batch(broken.as_bytes()).is_err());
    }
}
