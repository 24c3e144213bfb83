use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use kegg_pathway_crawler::app::{CrawlOutcome, CrawlReport, Crawler};
use kegg_pathway_crawler::config::{ConfigLoader, apply_overrides};
use kegg_pathway_crawler::fetch::KeggHttpClient;
use kegg_pathway_crawler::output::{CsvFileSink, JsonOutput};
use kegg_pathway_crawler::progress::{LogWriter, QuietProgress, TerminalProgress};

#[derive(Parser)]
#[command(name = "kegg-crawl")]
#[command(about = "Crawl KEGG pathway maps for every organism in a category into a CSV file")]
#[command(version, author)]
struct Cli {
    /// Path to a JSON config file (defaults to ./kegg-crawl.json when present)
    #[arg(long)]
    config: Option<String>,

    /// CSV file to write; an existing file is overwritten
    #[arg(long, short)]
    output: Option<String>,

    /// KEGG organism category to list (e.g. Plants, Animals)
    #[arg(long)]
    category: Option<String>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Disable the progress line
    #[arg(long)]
    non_interactive: bool,
}

// The crawler reports failures through messages only; the exit status stays zero.
fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
    }
    ExitCode::SUCCESS
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(LogWriter::stderr())
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::resolve(cli.config.as_deref()).into_diagnostic()?;
    let config = apply_overrides(config, cli.output, cli.category).into_diagnostic()?;

    let client = KeggHttpClient::new(&config).into_diagnostic()?;
    let sink = CsvFileSink::new(config.output_path.clone());
    let crawler = Crawler::new(config, client, sink);

    let report = if cli.json || cli.non_interactive {
        crawler.run(&QuietProgress).into_diagnostic()?
    } else {
        let progress = TerminalProgress::new();
        let result = crawler.run(&progress);
        progress.finish();
        result.into_diagnostic()?
    };

    if cli.json {
        JsonOutput::print_report(&report).into_diagnostic()?;
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &CrawlReport) {
    match report.outcome {
        CrawlOutcome::NoOrganisms => {
            println!("Could not retrieve organism list. Exiting.");
        }
        CrawlOutcome::NoRecords => {
            println!(
                "Warning: No pathway data was collected from {} organisms. This might be due to \
                 network issues or all target organisms lacking pathway maps.",
                report.organisms_listed
            );
        }
        CrawlOutcome::Written => {
            let path = report.output_path.as_deref().unwrap_or_default();
            println!(
                "Done! Data for {} organisms has been saved to {path}.",
                report.organisms_with_records
            );
            println!("Total pathways found: {}", report.records);
        }
    }
}
