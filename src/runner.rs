use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use crate::cli::Cli;
use crt_scraper::discover::{validate_domain, CrtSh, SourceFormat};
use crt_scraper::http_client::{create_probe_client, create_search_client, SearchTransport};
use crt_scraper::output::{default_output_path, format_results, status_summary, write_domains};
use crt_scraper::probe::Prober;

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    init_tracing(&cli);
    run(&cli, create_search_client).await
}

fn init_tracing(cli: &Cli) {
    // Keep reqwest/hyper at INFO so --debug only floods with our own events.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let filter_str = format!("crt_scraper={level},reqwest=info,hyper=info", level = crate_level);
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reject a target without a `.`; runs before any client exists.
pub fn check_target(cli: &Cli) -> anyhow::Result<()> {
    validate_domain(&cli.domain)?;
    Ok(())
}

async fn run<T, F>(cli: &Cli, make_client: F) -> anyhow::Result<()>
where
    T: SearchTransport,
    F: FnOnce(u64) -> crt_scraper::error::Result<T>,
{
    check_target(cli)?;

    let search = cli.search_options();
    tracing::info!(domain=%search.domain, wildcard=search.include_wildcard, exclude_expired=search.exclude_expired, json=cli.json, timeout=search.timeout_secs, "Starting crt.sh query");
    println!("Starting crt.sh scraper for domain: {}", search.domain);

    let client = make_client(search.timeout_secs).context("building crt.sh client")?;
    let format = if cli.json { SourceFormat::Json } else { SourceFormat::Html };
    let domains = CrtSh::new(client).domains(&search, format).await;

    if domains.is_empty() {
        println!("No domains found.");
        return Ok(());
    }

    let output = cli
        .output
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(&search.domain));
    let written = write_domains(&output, &domains)
        .with_context(|| format!("writing results to {}", output.display()))?;

    println!("Found {} unique domains.", domains.len());
    println!("Results saved to: {}", written.display());

    if cli.check {
        run_status_checks(cli, &domains).await?;
    } else if cli.verbose {
        println!("\nDomains found:");
        for domain in &domains {
            println!("- {}", domain);
        }
    }

    Ok(())
}

async fn run_status_checks(cli: &Cli, domains: &[String]) -> anyhow::Result<()> {
    let opts = cli.check_options();
    println!("\nChecking HTTP status for each domain...");

    let client = create_probe_client(opts.timeout_secs, opts.max_workers).context("building probe client")?;
    let pb = ProgressBar::new(domains.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let results = Prober::new(client, opts).with_progress(pb.clone()).check_all(domains).await;
    pb.finish_and_clear();

    println!("\nDomain Status Results:");
    for line in format_results(&results, !cli.no_color) {
        println!("{}", line);
    }
    println!("\n{}", status_summary(&results));
    Ok(())
}
