use anyhow::{Result, bail};
use clap::Parser;
use console::{Term, style};
use log::{info, warn};
use neodata_prep::cli::{Cli, Commands};
use neodata_prep::component::{
    CatalogueBuilder, NameNormalizer, VideoConverter, run_full_pipeline,
};
use neodata_prep::config::Config;
use neodata_prep::init;
use neodata_prep::menu::show_main_menu;
use neodata_prep::signal::setup_shutdown_signal;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

fn main() -> Result<()> {
    init::init();
    let cli = Cli::parse();
    let shutdown_signal = setup_shutdown_signal();
    let config = Config::new()?;

    match cli.command {
        Some(command) => run_stage(&command, config, &shutdown_signal),
        None => run_menu(config, &shutdown_signal),
    }
}

fn run_stage(
    command: &Commands,
    config: Config,
    shutdown_signal: &Arc<AtomicBool>,
) -> Result<()> {
    match command {
        Commands::Normalize { directory } => {
            NameNormalizer::new(Arc::clone(shutdown_signal)).run(directory)?;
            Ok(())
        }
        Commands::Convert { directory } => {
            let report =
                VideoConverter::new(config, Arc::clone(shutdown_signal)).run(directory)?;
            fail_on_conversion_errors(report.failed, report.candidates)
        }
        Commands::Catalogue { directory } => {
            CatalogueBuilder::new(config, Arc::clone(shutdown_signal)).run(directory)?;
            Ok(())
        }
        Commands::Pipeline { directory } => {
            let report = run_full_pipeline(&config, shutdown_signal, directory)?;
            fail_on_conversion_errors(report.conversion.failed, report.conversion.candidates)
        }
    }
}

/// Scripted callers rely on the exit code to notice partial batches.
fn fail_on_conversion_errors(failed: usize, candidates: usize) -> Result<()> {
    if failed > 0 {
        bail!("{failed} of {candidates} conversions failed");
    }
    Ok(())
}

fn run_menu(mut config: Config, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    let term = Term::stdout();

    loop {
        match show_main_menu(&term, shutdown_signal, &mut config) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style("goodbye!").green().bold());
                info!("program exited normally");
                break;
            }
            Err(e) => {
                warn!("program error: {e}");
                eprintln!("{} {}", style("error:").red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
