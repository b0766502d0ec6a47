//! Replay entry point.

use clap::Parser;
use mapoverlay_replay::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Starting map overlay replay of {:?}", cli.path);

    match mapoverlay_replay::replay_file(&cli.path, cli.strict) {
        Ok((report, summary)) => {
            println!(
                "Applied {} actions, {} rejected, {} shapes committed",
                report.applied,
                report.rejections.len(),
                report.commits.len()
            );
            for rejection in &report.rejections {
                println!("  #{} {}: {}", rejection.index, rejection.action, rejection.error);
            }
            for commit in &report.commits {
                println!("  {} {}: {}", commit.kind, commit.id, commit.measurement.display());
            }
            for line in summary.lines() {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
