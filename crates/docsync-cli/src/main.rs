//! `docsync`: keeps a documentation corpus in step with research findings

mod cli;
mod stages;

use clap::Parser;
use cli::{Cli, Commands};
use stages::Clock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the selected command, returning the process exit status
fn dispatch(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.pipeline_config();
    match cli.command {
        Commands::Research => {
            let findings = stages::research(&config, &cli.credentials, &Clock::now())?;
            if cli.json {
                print_json(&findings)?;
            } else {
                println!(
                    "Research complete: {} search results, {} releases, {} issues, {} errors",
                    findings.perplexity_results.len(),
                    findings.release_count(),
                    findings.issue_count(),
                    findings.errors.len()
                );
            }
        }
        Commands::Analyze => {
            let summary = stages::analyze(&config, &cli.credentials, &Clock::now())?;
            if cli.json {
                print_json(&summary)?;
            } else {
                println!("Summary: {}", summary.summary);
                println!(
                    "Updates: {} ({} high impact), has updates: {}",
                    summary.updates.len(),
                    summary.high_impact_count,
                    summary.has_updates
                );
            }
        }
        Commands::Update => {
            let log = stages::update(&config, &Clock::now())?;
            if cli.json {
                print_json(&log)?;
            } else if let Some(log) = log {
                println!(
                    "Version {} -> {} ({}); updated: {}",
                    log.previous_version,
                    log.new_version,
                    log.bump_type,
                    log.files_updated.join(", ")
                );
            } else {
                println!("No updates to apply");
            }
        }
        Commands::Validate => return report(cli, &stages::validate(&config)),
        Commands::Run => {
            if let Err(e) = stages::research(&config, &cli.credentials, &Clock::now()) {
                tracing::error!("Research stage failed: {:#}", e);
            }
            if let Err(e) = stages::analyze(&config, &cli.credentials, &Clock::now()) {
                tracing::error!("Analysis stage failed: {:#}", e);
            }
            if let Err(e) = stages::update(&config, &Clock::now()) {
                tracing::error!("Update stage failed: {:#}", e);
            }
            return report(cli, &stages::validate(&config));
        }
    }
    Ok(0)
}

fn report(cli: &Cli, report: &docsync_validate::ValidationReport) -> anyhow::Result<i32> {
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(report.exit_code())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = dispatch(&cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
