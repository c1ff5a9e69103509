use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cvp_extractor_lib::commands::{analyze_files, classify_text, extract_section, ExtractReport, ExtractRequest};
use cvp_extractor_lib::models::Section;
use cvp_extractor_lib::pipeline_config::PipelineConfig;

#[derive(Parser)]
#[command(
    name = "cvp-extractor",
    about = "Extract and classify customer value proposition statements",
    version
)]
struct Cli {
    /// JSON pipeline configuration file (overrides CVP_EXTRACTOR_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract CVP statements from files and URLs
    Extract {
        /// Source files (PDF, DOCX, XLSX, .url shortcuts, plain text)
        files: Vec<PathBuf>,
        /// Web page to fetch. Can be repeated.
        #[arg(long = "url")]
        urls: Vec<String>,
        /// Section the sources belong to
        #[arg(long, default_value = "academic")]
        section: Section,
        /// Only show and export records matching this text
        #[arg(long)]
        search: Option<String>,
        /// Export to CSV; without a path, writes <section>-cvps.csv
        #[arg(long, value_name = "PATH")]
        csv: Option<Option<PathBuf>>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count documents and extracted characters
    Analyze {
        files: Vec<PathBuf>,
        #[arg(long, default_value = "academic")]
        section: Section,
        #[arg(long)]
        json: bool,
    },
    /// Score one statement and explain the verdict
    Classify {
        text: String,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cvp_extractor_lib::init_tracing(cli.verbose);

    let config = PipelineConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Extract {
            files,
            urls,
            section,
            search,
            csv,
            json,
        } => {
            let request = ExtractRequest {
                section,
                files,
                urls,
                search,
                csv,
            };
            let report = extract_section(request, &config).map_err(anyhow::Error::msg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_extract_report(&report);
            }
        }
        Commands::Analyze {
            files,
            section,
            json,
        } => {
            let report = analyze_files(section, files, &config).map_err(anyhow::Error::msg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.message());
            }
        }
        Commands::Classify { text, json } => {
            let report = classify_text(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("CVP:            {}", if report.is_cvp { "yes" } else { "no" });
                println!("Pre-filter:     {}", report.prefilter_rejection.unwrap_or("passed"));
                println!("Criteria ({}):   {}", report.criteria.count, report.satisfied.join(", "));
                println!("VP word:        {}", report.criteria.has_vp_word);
                println!("Decision rule:  {}", report.verdict.rule);
                println!("Classification: {}", report.resource_class.map(|c| c.label()).unwrap_or("-"));
                println!("PoP/PoD:        {}", report.posture.map(|p| p.label()).unwrap_or("-"));
                for m in &report.matched {
                    println!("  {}: {}", m.lexicon, m.phrases.join(", "));
                }
            }
        }
    }

    Ok(())
}

fn print_extract_report(report: &ExtractReport) {
    println!("{}", report.title);
    for source in &report.sources {
        match &source.error {
            Some(error) => println!("  {}: skipped ({error})", source.name),
            None => println!(
                "  {}: {} unit(s) examined, {} accepted",
                source.name, source.units_examined, source.accepted
            ),
        }
    }
    println!(
        "{} CVP record(s), {} shown",
        report.total_records,
        report.records.len()
    );

    for record in &report.records {
        println!();
        println!("{}", record.text);
        println!(
            "  source: {}  page: {}  classification: {}  PoP/PoD: {}",
            record.source,
            if record.page.is_some() { record.page_label() } else { "-".to_string() },
            record.resource_class.map(|c| c.label()).unwrap_or("-"),
            record.pop.map(|p| p.label()).unwrap_or("-"),
        );
    }

    if let Some(path) = &report.csv_path {
        println!();
        println!("Exported to {}", path.display());
    }
}
