use std::fs::File;
use std::io::BufReader;

use rfs::config::AppConfig;
use rfs::error::AppError;
use rfs::workflows::screening::{
    read_batch, summarize, write_export_csv, write_review_csv, ColumnMap, ParameterSet,
    PresetName, ReviewRow, ScreeningPipeline,
};

use crate::cli::ScoreArgs;

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    // Loading the configuration up front makes a missing salt fatal before
    // any file is touched.
    let config = AppConfig::load()?;

    let Some(preset) = PresetName::parse(&args.preset) else {
        eprintln!(
            "unknown preset '{}'; known presets: {}",
            args.preset,
            PresetName::ALL
                .iter()
                .map(|preset| preset.key())
                .collect::<Vec<_>>()
                .join(", ")
        );
        std::process::exit(2);
    };

    let file = File::open(&args.input)?;
    let (headers, records) = read_batch(BufReader::new(file))?;

    let mapping = apply_column_overrides(ColumnMap::guess(&headers), &args);
    warn_about_gaps(&mapping);

    let pipeline = ScreeningPipeline::new(ParameterSet::preset(preset), config.salt.clone());
    let outcome = pipeline.run(&records, &mapping);

    println!(
        "Scored {} applicant(s) with the {} preset ({} duplicate(s) removed)",
        outcome.scored.len(),
        preset.key(),
        outcome.duplicates_removed
    );
    println!();
    print_review_table(&outcome.scored.iter().map(ReviewRow::from_scored).collect::<Vec<_>>());

    if args.summary {
        print_summary(&outcome.scored);
    }

    if let Some(path) = &args.review {
        write_review_csv(File::create(path)?, &outcome.scored)?;
        println!("\nReview CSV (PIDs only) written to {}", path.display());
    }

    if let Some(path) = &args.export {
        write_export_csv(File::create(path)?, &outcome.scored)?;
        println!(
            "\nExport CSV written to {} — includes raw identifiers, for authorized local record-keeping only",
            path.display()
        );
    }

    Ok(())
}

fn apply_column_overrides(mut mapping: ColumnMap, args: &ScoreArgs) -> ColumnMap {
    let override_role = |slot: &mut Option<String>, value: &Option<String>| {
        if let Some(column) = value {
            *slot = Some(column.clone());
        }
    };

    override_role(&mut mapping.identifier, &args.identifier_column);
    override_role(&mut mapping.organisation, &args.organisation_column);
    override_role(&mut mapping.sector, &args.sector_column);
    override_role(&mut mapping.motivation, &args.motivation_column);
    override_role(&mut mapping.function_title, &args.function_column);
    override_role(&mut mapping.time_band, &args.time_column);
    override_role(&mut mapping.language, &args.language_column);
    override_role(&mut mapping.referee, &args.referee_column);
    override_role(&mut mapping.alumni, &args.alumni_column);
    override_role(&mut mapping.application_date, &args.date_column);
    if !args.hash_column.is_empty() {
        mapping.hash_columns = args.hash_column.clone();
    }
    mapping
}

fn warn_about_gaps(mapping: &ColumnMap) {
    if mapping.identifier.is_none() {
        eprintln!("note: no identifier column mapped; row-based PIDs will be generated");
    }
    if mapping.motivation.is_none() {
        eprintln!("note: no motivation column mapped; motivation scores will be 0");
    }
    if mapping.organisation.is_none() && mapping.sector.is_none() {
        eprintln!("note: no organisation or sector column mapped; sector defaults to Other/Unclassified");
    }
}

fn print_review_table(rows: &[ReviewRow]) {
    println!(
        "{:<16}  {:<18}  {:>7}  {:<16}  {:>5}  {:>5}  {:>5}  {:>5}  {:>5}  {:>5}  {:>5}",
        "PID", "Sector", "RFS", "Decision", "Mot", "Sec", "Ref", "Fun", "Time", "Lang", "Alum"
    );
    for row in rows {
        println!(
            "{:<16}  {:<18}  {:>7.2}  {:<16}  {:>5.1}  {:>5.1}  {:>5.1}  {:>5.1}  {:>5.1}  {:>5.1}  {:>5.1}",
            row.pid,
            row.sector.label(),
            row.rfs,
            row.decision.label(),
            row.motivation_pts,
            row.sector_pts,
            row.referee_pts,
            row.function_pts,
            row.time_pts,
            row.language_pts,
            row.alumni_pts
        );
    }
}

fn print_summary(scored: &[rfs::workflows::screening::ScoredApplicant]) {
    let summary = summarize(scored);

    println!("\nDecisions");
    for (decision, count) in &summary.decisions {
        println!("- {}: {}", decision.label(), count);
    }

    println!("\nBy sector");
    for entry in &summary.by_sector {
        println!(
            "- {} / {}: {}",
            entry.sector.label(),
            entry.decision.label(),
            entry.count
        );
    }
}

pub(crate) fn run_presets() {
    for preset in PresetName::ALL {
        let params = ParameterSet::preset(preset);
        println!("{} — {}", preset.key(), preset.description());
        println!(
            "  thresholds: admit {} / priority {}, equity {}..={} on {} ({})",
            params.admit_threshold,
            params.priority_threshold,
            params.equity.lower,
            params.equity.upper,
            params.equity.sector.label(),
            if params.equity.enabled { "enabled" } else { "disabled" }
        );
        let weights = params.weights;
        println!(
            "  weights: motivation {} sector {} referee {} function {} time {} language {} alumni {}",
            weights.motivation,
            weights.sector,
            weights.referee,
            weights.function,
            weights.time,
            weights.language,
            weights.alumni
        );
        println!("  minimum motivation words: {}", params.rubric.min_words);
    }
}
