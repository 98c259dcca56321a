//! End-to-end specifications for the screening pipeline: CSV in, scored and
//! pseudonymized applicants out, exercised through the public crate API only.

mod common {
    use rfs::workflows::screening::{
        read_batch, ApplicantRecord, ColumnMap, ParameterSet, PresetName, Salt, ScreeningPipeline,
    };

    pub(super) fn salt() -> Salt {
        Salt::new("integration-salt").expect("non-empty salt")
    }

    pub(super) fn pipeline(preset: PresetName) -> ScreeningPipeline {
        ScreeningPipeline::new(ParameterSet::preset(preset), salt())
    }

    pub(super) fn batch(csv: &str) -> (ColumnMap, Vec<ApplicantRecord>) {
        let (headers, records) = read_batch(csv.as_bytes()).expect("csv parses");
        (ColumnMap::guess(&headers), records)
    }

    pub(super) fn motivation() -> String {
        let filler = "Our team mentors junior colleagues through practical field visits \
and keeps partners informed about progress at every stage of delivery. "
            .repeat(11);
        format!(
            "{filler}Next year we plan a pilot survey across 14 districts together \
with policy officer colleagues, extension workers, and farmer groups."
        )
    }

    pub(super) fn scenario_csv(motivation: &str) -> String {
        format!(
            "Email,Organisation,MotivationText,FunctionTitle,WeeklyTimeBand,LanguageComfort,RefereeConfirmsFit,AlumniReferral,ApplicationDate\n\
             gov@x.org,Ministry of Agriculture,\"{motivation}\",Policy Officer,\u{2265}3h,Fluent,yes,,2024-02-01\n\
             coop@x.org,Smallholder Farmers Cooperative,,,1-2h,Working,Jane Doe,,2024-02-02\n\
             coop@x.org,Smallholder Farmers Cooperative,,,2-3h,Working,Jane Doe,,2024-03-10\n\
             anon@x.org,,,,,,no thanks,,2024-02-03\n"
        )
    }
}

mod scoring {
    use super::common::*;
    use rfs::workflows::screening::{
        DecisionLabel, DedupPolicy, FactorKind, PresetName, Sector,
    };

    #[test]
    fn batch_run_is_total_and_reproducible() {
        let csv = scenario_csv(&motivation());
        let (mapping, records) = batch(&csv);
        let pipeline = pipeline(PresetName::Standard);

        let first = pipeline.run(&records, &mapping);
        let second = pipeline.run(&records, &mapping);
        assert_eq!(first.scored, second.scored);

        // Four rows, one duplicate PID.
        assert_eq!(first.policy, DedupPolicy::KeepLatestByDate);
        assert_eq!(first.scored.len(), 3);
        assert_eq!(first.duplicates_removed, 1);
    }

    #[test]
    fn ministry_applicant_reaches_priority() {
        let csv = scenario_csv(&motivation());
        let (mapping, records) = batch(&csv);
        let outcome = pipeline(PresetName::Standard).run(&records, &mapping);

        let gov = outcome
            .scored
            .iter()
            .find(|scored| scored.raw_identifier.as_deref() == Some("gov@x.org"))
            .expect("ministry applicant present");

        assert_eq!(gov.sector, Sector::Government);
        assert!(gov.factor_points(FactorKind::Motivation) >= 25.0);
        assert_eq!(gov.factor_points(FactorKind::Sector), 10.0);
        assert_eq!(gov.factor_points(FactorKind::Referee), 10.0);
        assert_eq!(gov.factor_points(FactorKind::Time), 10.0);
        assert_eq!(gov.factor_points(FactorKind::Language), 5.0);
        assert!(gov.rfs >= 70.0);
        assert_eq!(gov.label, DecisionLabel::Priority);
    }

    #[test]
    fn duplicate_cooperative_rows_keep_the_later_submission() {
        let csv = scenario_csv(&motivation());
        let (mapping, records) = batch(&csv);
        let outcome = pipeline(PresetName::Standard).run(&records, &mapping);

        let coop = outcome
            .scored
            .iter()
            .find(|scored| scored.raw_identifier.as_deref() == Some("coop@x.org"))
            .expect("cooperative applicant present");

        assert_eq!(coop.sector, Sector::FarmerOrg);
        // The March submission survives, carrying the 2-3h band.
        assert_eq!(coop.factor_points(FactorKind::Time), 6.0);
        // A recommender's name counts as referee confirmation.
        assert_eq!(coop.factor_points(FactorKind::Referee), 10.0);
    }

    #[test]
    fn explicit_negative_confirmation_scores_zero() {
        let csv = scenario_csv(&motivation());
        let (mapping, records) = batch(&csv);
        let outcome = pipeline(PresetName::Standard).run(&records, &mapping);

        let anon = outcome
            .scored
            .iter()
            .find(|scored| scored.raw_identifier.as_deref() == Some("anon@x.org"))
            .expect("anonymous applicant present");

        assert_eq!(anon.sector, Sector::Other);
        assert_eq!(anon.factor_points(FactorKind::Referee), 0.0);
        assert_eq!(anon.rfs, 0.0);
        assert_eq!(anon.label, DecisionLabel::Reserve);
    }

    #[test]
    fn preset_swap_relabels_without_touching_inputs() {
        let csv = scenario_csv(&motivation());
        let (mapping, records) = batch(&csv);

        let standard = pipeline(PresetName::Standard).run(&records, &mapping);
        let finance = pipeline(PresetName::FinanceOptimized).run(&records, &mapping);

        // Same records, same PIDs, different parameterization.
        assert_eq!(standard.scored.len(), finance.scored.len());
        for (left, right) in standard.scored.iter().zip(finance.scored.iter()) {
            assert_eq!(left.pid, right.pid);
            assert_eq!(left.sector, right.sector);
        }
    }
}

mod artifacts {
    use super::common::*;
    use rfs::workflows::screening::{
        summarize, write_export_csv, write_review_csv, PresetName,
    };

    #[test]
    fn review_and_export_artifacts_differ_only_by_identifier() {
        let csv = scenario_csv(&motivation());
        let (mapping, records) = batch(&csv);
        let outcome = pipeline(PresetName::Standard).run(&records, &mapping);

        let mut review = Vec::new();
        write_review_csv(&mut review, &outcome.scored).expect("review csv");
        let review = String::from_utf8(review).expect("utf-8");

        let mut export = Vec::new();
        write_export_csv(&mut export, &outcome.scored).expect("export csv");
        let export = String::from_utf8(export).expect("utf-8");

        for identifier in ["gov@x.org", "coop@x.org", "anon@x.org"] {
            assert!(!review.contains(identifier));
            assert!(export.contains(identifier));
        }
        assert!(review.contains("MotivationPts"));
        assert!(export.contains("Identifier"));

        let summary = summarize(&outcome.scored);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.decisions.values().sum::<usize>(), 3);
    }
}
