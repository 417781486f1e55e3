use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use survey_score::config::{self, Config};
use survey_score::output::{self, ResultsReport};
use survey_score::scoring::{self, QuestionContribution, ScoringSpec};
use survey_score::sections::resolve_section_flags;
use survey_score::survey::{self, SurveyDocument};
use survey_score::telemetry;

const EXIT_SUCCESS: i32 = 0;
const EXIT_SCORING: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_OUTPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

/// JSON report with the per-question trail appended.
#[derive(Serialize)]
struct DetailedReport<'a> {
    #[serde(flatten)]
    report: &'a ResultsReport,
    contributions: &'a [QuestionContribution],
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a questionnaire submission
    Score {
        /// Submission JSON with survey values and question metadata
        submission: PathBuf,

        /// Scoring spec (JSON or YAML); overrides `spec` from the config file
        #[arg(short, long)]
        spec: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show each question's contribution
        #[arg(short, long)]
        breakdown: bool,
    },
    /// Check a scoring spec against the configured sections
    Validate {
        /// Scoring spec (JSON or YAML); overrides `spec` from the config file
        #[arg(short, long)]
        spec: Option<PathBuf>,
    },
    /// Show which sections a submission enables
    Sections {
        /// Submission JSON with survey values and question metadata
        submission: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(name = "survey-score")]
#[command(about = "Section-based questionnaire scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/survey-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(telemetry::default_filter(cli.verbose)) {
        eprintln!("Logging disabled: {}", e);
    }

    let config = match config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let code = match cli.command {
        Commands::Score {
            submission,
            spec,
            format,
            output,
            breakdown,
        } => run_score(&config, submission, spec, format, output, breakdown),
        Commands::Validate { spec } => run_validate(&config, spec),
        Commands::Sections { submission } => run_sections(&config, submission),
    };

    std::process::exit(code);
}

/// Load the spec named on the command line, or the configured one.
fn load_spec(config: &Config, cli_spec: Option<PathBuf>) -> Result<ScoringSpec, i32> {
    let Some(path) = cli_spec.or_else(|| config.spec.clone()) else {
        eprintln!("No scoring spec given. Pass --spec or set `spec` in the config file.");
        return Err(EXIT_CONFIG);
    };

    scoring::load_scoring_spec(&path).map_err(|e| {
        eprintln!("Spec error: {}", error_chain(&e));
        EXIT_CONFIG
    })
}

fn load_submission(config: &Config, path: PathBuf) -> Result<SurveyDocument, i32> {
    match survey::load_survey_document(&path) {
        Ok(doc) => Ok(doc.with_unanswered(config.include_unanswered)),
        Err(e) => {
            eprintln!("Submission error: {:#}", e);
            Err(EXIT_INPUT)
        }
    }
}

fn run_score(
    config: &Config,
    submission: PathBuf,
    spec: Option<PathBuf>,
    format: OutputFormat,
    output_path: Option<PathBuf>,
    breakdown: bool,
) -> i32 {
    let start_time = Instant::now();

    let spec = match load_spec(config, spec) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let document = match load_submission(config, submission) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let catalog = config.catalog();
    let flags = resolve_section_flags(&catalog, &document);
    let answers = survey::collect_answers(&document);
    debug!(answers = answers.len(), "collected answers");

    let scored = match scoring::calculate_scores_with_breakdown(&flags, &spec, &answers) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Scoring error: {}", e);
            return EXIT_SCORING;
        }
    };

    info!(
        sections = scored.result.len(),
        elapsed = ?start_time.elapsed(),
        "scored submission"
    );

    let report = ResultsReport::new(scored.result.clone(), flags.clone());

    if let Some(path) = output_path {
        if let Err(e) = output::write_report(&path, &report) {
            eprintln!("Output error: {:#}", e);
            return EXIT_OUTPUT;
        }
    }

    match format {
        OutputFormat::Table => {
            let use_colors = output::should_use_colors();
            println!(
                "{}",
                output::format_results_table(&scored.result, &flags, use_colors)
            );
            if breakdown {
                println!();
                println!(
                    "{}",
                    output::format_breakdown(&scored.contributions, use_colors)
                );
            }
        }
        OutputFormat::Json => {
            let rendered = if breakdown {
                serde_json::to_string_pretty(&DetailedReport {
                    report: &report,
                    contributions: &scored.contributions,
                })
                .map_err(anyhow::Error::from)
            } else {
                report.to_json_pretty()
            };
            match rendered {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Output error: {:#}", e);
                    return EXIT_OUTPUT;
                }
            }
        }
    }

    EXIT_SUCCESS
}

fn run_validate(config: &Config, spec: Option<PathBuf>) -> i32 {
    let spec = match load_spec(config, spec) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match scoring::validate_scoring_spec(&spec, &config.catalog()) {
        Ok(()) => {
            println!(
                "Scoring spec OK: {} sections, {} questions",
                spec.sections.len(),
                spec.question_count()
            );
            EXIT_SUCCESS
        }
        Err(errors) => {
            eprintln!("Scoring spec errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            EXIT_CONFIG
        }
    }
}

fn run_sections(config: &Config, submission: PathBuf) -> i32 {
    let document = match load_submission(config, submission) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let flags = resolve_section_flags(&config.catalog(), &document);
    for (name, enabled) in flags.iter() {
        println!("{}\t{}", name, if enabled { "enabled" } else { "disabled" });
    }

    EXIT_SUCCESS
}

/// Render an error with its sources, "outer: inner: root"
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join(name)
    }

    fn score_fixture(output_path: Option<PathBuf>) -> i32 {
        run_score(
            &Config::default(),
            fixture("submission.json"),
            Some(fixture("survey-results.json")),
            OutputFormat::Json,
            output_path,
            false,
        )
    }

    #[test]
    fn test_score_writes_report() {
        let path = env::temp_dir().join("survey_score_test_report.json");
        let _ = fs::remove_file(&path);

        assert_eq!(score_fixture(Some(path.clone())), EXIT_SUCCESS);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("sectionsEnabled"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_output_is_not_an_input_error() {
        let path = env::temp_dir()
            .join("survey_score_test_no_such_dir")
            .join("report.json");

        assert_eq!(score_fixture(Some(path)), EXIT_OUTPUT);
    }

    #[test]
    fn test_unreadable_submission_is_an_input_error() {
        let code = run_score(
            &Config::default(),
            fixture("no-such-submission.json"),
            Some(fixture("survey-results.json")),
            OutputFormat::Json,
            None,
            false,
        );
        assert_eq!(code, EXIT_INPUT);
    }
}
