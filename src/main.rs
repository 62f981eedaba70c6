//! tfidf-matcher CLI
//!
//! ```bash
//! tfidf-matcher --job job.txt resumes/
//! tfidf-matcher --job-text "Senior Python engineer" a.pdf b.docx -k 5 --csv out.csv
//! RUST_LOG=tfidf_matcher=debug tfidf-matcher --job job.txt resumes/ --json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tfidf_matcher::{
    error::{Error, Result},
    explain::ExplanationService,
    export,
    pipeline::{Candidate, Explanation, MatchPipeline, MatchReport},
    source::{collect_supported, DocumentSource, FileSource},
    MatcherConfig,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Rank résumés against a job description by TF-IDF cosine similarity.
#[derive(Parser, Debug)]
#[command(name = "tfidf-matcher", version, about)]
struct Cli {
    /// Job description file (.txt, .pdf, .docx)
    #[arg(long, conflicts_with = "job_text", required_unless_present = "job_text")]
    job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    job_text: Option<String>,

    /// Résumé files, or directories to scan for them
    #[arg(required = true)]
    resumes: Vec<PathBuf>,

    /// Number of candidates to return (clamped to the configured range)
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ask an LLM provider to explain each match (needs an API key)
    #[arg(long)]
    explain: bool,

    /// Write the ranking as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tfidf_matcher=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => MatcherConfig::from_file(path)?,
        None => MatcherConfig::default(),
    };
    if cli.explain {
        config.explain.enabled = true;
    }

    let source = FileSource::new(&config.source);
    let query = match (&cli.job, &cli.job_text) {
        (Some(path), _) => source.load(path)?.text,
        (None, Some(text)) => text.clone(),
        (None, None) => return Err(Error::Config("either --job or --job-text is required".into())),
    };

    let paths = expand_paths(&cli.resumes)?;
    let (docs, failures) = source.load_all(&paths);
    for f in &failures {
        eprintln!("skipped {f}");
    }
    info!(loaded = docs.len(), failed = failures.len(), "résumés loaded");
    let candidates: Vec<Candidate> = docs.into_iter().map(Candidate::from).collect();

    let explainer = if config.explain.enabled {
        let service = ExplanationService::from_env(config.explain.clone());
        if !service.is_available() {
            warn!("explanations requested but no provider is configured");
        }
        service
    } else {
        ExplanationService::disabled(config.explain.clone())
    };
    let pipeline = MatchPipeline::new(config)?.with_explainer(explainer);
    let report = pipeline.run(&query, &candidates, cli.top_k)?;

    if let Some(path) = &cli.csv {
        let file = std::fs::File::create(path)?;
        export::write_csv(&report, std::io::BufWriter::new(file))?;
        info!(path = %path.display(), "csv written");
    }
    if cli.json {
        println!("{}", export::to_json(&report)?);
    } else {
        print_table(&report);
    }
    Ok(())
}

/// Directories expand to the supported files they contain
fn expand_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            paths.extend(collect_supported(Path::new(input))?);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

fn print_table(report: &MatchReport) {
    println!("{:>4}  {:>7}  {:<16}  Candidate", "Rank", "Score", "Match");
    for r in &report.ranked {
        println!(
            "{:>4}  {:>6.2}%  {:<16}  {}",
            r.rank,
            r.score * 100.0,
            r.category.label(),
            r.name
        );
        if let Explanation::Generated(text) = &r.explanation {
            for line in text.lines() {
                println!("        {line}");
            }
        }
    }
    println!();
    println!(
        "analyzed {} candidate(s), best {:.2}%, top-{} average {:.2}%",
        report.total_analyzed,
        report.best_score * 100.0,
        report.ranked.len(),
        report.average_top_score * 100.0
    );
    if let Some(stats) = &report.statistics {
        println!(
            "mean {:.4}  std {:.4}  median {:.4}  >70%: {}  >50%: {}  >30%: {}",
            stats.mean, stats.std, stats.median, stats.above_70_percent, stats.above_50_percent, stats.above_30_percent
        );
    }
}
