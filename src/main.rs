use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use fossi::algorithm::cohort::{CohortResult, evaluate_cohort_with_progress};
use fossi::utils::format::{format_count, format_number, format_optional};
use fossi::utils::logging::{create_main_progress_bar, finish_and_clear, init_logging};
use fossi::{
    Assessment, EngineConfig, LipidPanel, LipidUnit, MemoryUsageSink, PatientInput,
    PatientRecord, Sex, UsageSink, UsageTracker, build_curve_with, evaluate_with,
};

#[derive(Debug, Parser)]
#[command(
    name = "fossi",
    version,
    about = "Fast Ossifier Stratification Index (FOSSI) calculator",
    long_about = "Computes the sex-specific FOSSI score for diffuse idiopathic skeletal\n\
        hyperostosis, classifies it into risk bands and samples the probability curve.\n\n\
        EXAMPLES:\n\
        \n  fossi score --sex female --age 62 --bmi 31 --height 160 --waist 98 --tg 1.9 --hdl 1.0 --hypertension\
        \n  fossi file patient.json --json\
        \n  fossi cohort cohort.json\
        \n  fossi curve --sex male"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of samples on each probability curve
    #[arg(long, global = true, value_name = "N")]
    samples: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a single patient given on the command line
    Score(ScoreArgs),

    /// Score a single patient record stored as JSON
    File(FileArgs),

    /// Score a JSON array of patient records
    Cohort(FileArgs),

    /// Print the probability curve for one sex
    Curve(CurveArgs),
}

#[derive(Debug, Args)]
struct ScoreArgs {
    /// Sex (female or male)
    #[arg(long)]
    sex: Sex,

    /// Age in years
    #[arg(long)]
    age: u32,

    /// Body mass index in kg/m²
    #[arg(long)]
    bmi: f64,

    /// Height in cm
    #[arg(long)]
    height: f64,

    /// Waist circumference in cm
    #[arg(long)]
    waist: f64,

    /// Triglycerides
    #[arg(long)]
    tg: f64,

    /// HDL cholesterol
    #[arg(long)]
    hdl: f64,

    /// Unit of the lipid values (mmol/L or mg/dL)
    #[arg(long, default_value = "mmol/L")]
    unit: LipidUnit,

    /// Patient has hypertension
    #[arg(long)]
    hypertension: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct FileArgs {
    /// JSON input file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CurveArgs {
    /// Sex whose curve to print
    #[arg(long)]
    sex: Sex,

    /// Emit JSON instead of CSV
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.samples {
        Some(samples) => EngineConfig::new().with_samples(samples),
        None => EngineConfig::new(),
    };

    let mut tracker = UsageTracker::new(Some(MemoryUsageSink::new()));

    match cli.command {
        Command::Score(args) => {
            let patient = PatientInput::new(
                args.sex,
                args.age,
                args.bmi,
                args.height,
                args.waist,
                LipidPanel::new(args.tg, args.hdl, args.unit),
                args.hypertension,
            )?;
            let assessment = evaluate_with(&patient, &config)?;
            tracker.observe(&patient, &assessment.risk);
            print_assessment(&patient, &assessment, &tracker, args.json)
        }
        Command::File(args) => {
            let record: PatientRecord = read_json(&args.input)?;
            let patient = PatientInput::try_from(record)?;
            let assessment = evaluate_with(&patient, &config)?;
            tracker.observe(&patient, &assessment.risk);
            print_assessment(&patient, &assessment, &tracker, args.json)
        }
        Command::Cohort(args) => run_cohort(&args, &config, &mut tracker),
        Command::Curve(args) => {
            let curve = build_curve_with(args.sex, &config.curve_for(args.sex))?;
            let mut out = io::stdout().lock();
            if args.json {
                serde_json::to_writer_pretty(&mut out, &curve)?;
                writeln!(out)?;
            } else {
                writeln!(out, "x,probability")?;
                for point in curve.points() {
                    writeln!(out, "{},{}", point.x, point.probability)?;
                }
            }
            Ok(())
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_usage<S: UsageSink>(out: &mut impl Write, tracker: &UsageTracker<S>) -> Result<()> {
    writeln!(out, "Usage")?;
    writeln!(
        out,
        "  Your session calculations: {}",
        format_count(Some(tracker.session_count()))
    )?;
    writeln!(out, "  Global calculations: {}", format_count(tracker.global_count()))?;
    Ok(())
}

fn print_assessment<S: UsageSink>(
    patient: &PatientInput,
    assessment: &Assessment,
    tracker: &UsageTracker<S>,
    json: bool,
) -> Result<()> {
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, assessment)?;
        writeln!(out)?;
        return Ok(());
    }

    let risk = &assessment.risk;
    writeln!(out, "Results")?;
    writeln!(out, "  FOSSI value: {}", format_number(risk.score, 2))?;
    writeln!(out, "  Risk category: {}", risk.category)?;
    writeln!(out, "  {}", risk.explanation)?;
    writeln!(out)?;
    writeln!(out, "Details and derived indices")?;
    writeln!(out, "  CMI: {}", format_number(assessment.indices.cmi(), 3))?;
    match patient.sex() {
        Sex::Female => writeln!(
            out,
            "  VAI (females): {}",
            format_optional(assessment.indices.vai(), 3)
        )?,
        Sex::Male => writeln!(out, "  Waist (cm): {}", format_number(patient.waist_cm(), 1))?,
    }
    writeln!(out, "  TG (mmol/L): {}", format_number(assessment.lipids.tg_mmol, 3))?;
    writeln!(out, "  HDL (mmol/L): {}", format_number(assessment.lipids.hdl_mmol, 3))?;
    if let Some(marker) = assessment.curve.patient() {
        writeln!(
            out,
            "  Probability on curve: {}",
            format_number(marker.probability, 3)
        )?;
    }
    writeln!(out)?;
    print_usage(&mut out, tracker)
}

fn run_cohort<S: UsageSink>(
    args: &FileArgs,
    config: &EngineConfig,
    tracker: &mut UsageTracker<S>,
) -> Result<()> {
    let records: Vec<PatientRecord> = read_json(&args.input)?;
    info!("Loaded {} records from {}", records.len(), args.input.display());

    let start = Instant::now();
    let pb = create_main_progress_bar(records.len() as u64, Some("Scoring"));
    let report = evaluate_cohort_with_progress(&records, config, &pb)?;
    finish_and_clear(&pb);
    info!("Scored cohort in {:?}", start.elapsed());
    let counted = tracker.observe_cohort(&records, &report);
    info!("Counted {counted} distinct evaluations");

    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    for outcome in &report.outcomes {
        match &outcome.result {
            CohortResult::Scored(row) => writeln!(
                out,
                "{:>5}  {:<6}  {:>7}  {}",
                outcome.index,
                row.sex.label(),
                format_number(row.score, 2),
                row.category
            )?,
            CohortResult::Rejected(reason) => {
                writeln!(out, "{:>5}  rejected: {reason}", outcome.index)?;
            }
        }
    }
    writeln!(out)?;
    write!(out, "{}", report.summary.render())?;
    writeln!(out)?;
    print_usage(&mut out, tracker)
}
