//! quizbank CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizbank", version, about = "Exam question bank sanitizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine per-topic source files into one corpus document
    Combine {
        /// Directory containing topic_*.json files
        #[arg(long)]
        data_dir: PathBuf,

        /// Output corpus file
        #[arg(long, default_value = "questions.json")]
        output: PathBuf,

        /// Course name stored in the metadata
        #[arg(long, default_value = "")]
        course: String,

        /// Exam date stored in the metadata (YYYY-MM-DD)
        #[arg(long)]
        exam_date: Option<String>,
    },

    /// Validate a corpus document and report quality warnings
    Validate {
        /// Path to the corpus JSON file
        #[arg(long)]
        corpus: PathBuf,
    },

    /// Measure how exploitable the question set currently is
    Analyze {
        /// Path to the corpus JSON file
        #[arg(long)]
        corpus: PathBuf,

        /// Save the analysis snapshot as JSON for later comparison
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Lengthen incorrect options until the bias target is met
    Rebalance {
        /// Path to the corpus JSON file
        #[arg(long)]
        corpus: PathBuf,

        /// Output file (defaults to rewriting the corpus in place)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Override the configured target bias ratio
        #[arg(long)]
        target_ratio: Option<f64>,

        /// Override the configured pass budget
        #[arg(long)]
        max_passes: Option<u32>,

        /// Override the configured length slack
        #[arg(long)]
        slack: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Remove out-of-scope questions by stem pattern
    Filter {
        /// Path to the corpus JSON file
        #[arg(long)]
        corpus: PathBuf,

        /// Output file (defaults to rewriting the corpus in place)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Only report what would be removed, write nothing
        #[arg(long)]
        dry_run: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Merge topic context blocks into short explanations
    Enrich {
        /// Path to the corpus JSON file
        #[arg(long)]
        corpus: PathBuf,

        /// Output file (defaults to rewriting the corpus in place)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Override the configured length threshold
        #[arg(long)]
        threshold: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Shuffle answer options with a deterministic seed
    Shuffle {
        /// Path to the corpus JSON file
        #[arg(long)]
        corpus: PathBuf,

        /// Output file (defaults to rewriting the corpus in place)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Override the configured seed
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Remove every known filler marker from option texts
    Strip {
        /// Path to the corpus JSON file
        #[arg(long)]
        corpus: PathBuf,

        /// Output file (defaults to rewriting the corpus in place)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run the full pipeline: filter, rebalance, enrich, shuffle
    Run {
        /// Path to the corpus JSON file
        #[arg(long)]
        corpus: PathBuf,

        /// Output file (defaults to rewriting the corpus in place)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats: json, markdown, html, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Directory for run reports
        #[arg(long, default_value = "./quizbank-reports")]
        report_dir: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two analysis snapshots
    Compare {
        /// Baseline analysis JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current analysis JSON
        #[arg(long)]
        current: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter config and example topic file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizbank=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Combine {
            data_dir,
            output,
            course,
            exam_date,
        } => commands::combine::execute(data_dir, output, course, exam_date),
        Commands::Validate { corpus } => commands::validate::execute(corpus),
        Commands::Analyze { corpus, report } => commands::analyze::execute(corpus, report),
        Commands::Rebalance {
            corpus,
            output,
            target_ratio,
            max_passes,
            slack,
            config,
        } => commands::rebalance::execute(corpus, output, target_ratio, max_passes, slack, config),
        Commands::Filter {
            corpus,
            output,
            dry_run,
            config,
        } => commands::filter::execute(corpus, output, dry_run, config),
        Commands::Enrich {
            corpus,
            output,
            threshold,
            config,
        } => commands::enrich::execute(corpus, output, threshold, config),
        Commands::Shuffle {
            corpus,
            output,
            seed,
            config,
        } => commands::shuffle::execute(corpus, output, seed, config),
        Commands::Strip { corpus, output } => commands::strip::execute(corpus, output),
        Commands::Run {
            corpus,
            output,
            format,
            report_dir,
            config,
        } => commands::run::execute(corpus, output, format, report_dir, config),
        Commands::Compare {
            baseline,
            current,
            format,
        } => commands::compare::execute(baseline, current, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
