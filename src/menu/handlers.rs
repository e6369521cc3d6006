use crate::component::{CatalogueBuilder, NameNormalizer, VideoConverter, run_full_pipeline};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use dialoguer::Input;
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Ask for the dataset directory, offering the most recent choice as the
/// default.
fn prompt_directory(config: &Config) -> Result<PathBuf> {
    let default = config
        .settings
        .recent_paths
        .first()
        .cloned()
        .unwrap_or_else(|| ".".to_string());

    let path: String = Input::new()
        .with_prompt("dataset directory")
        .default(default)
        .interact_text()?;

    Ok(PathBuf::from(path.trim()))
}

fn remember_directory(config: &mut Config, directory: &Path) {
    add_recent_path(&mut config.settings, &directory.to_string_lossy());
    if let Err(e) = save_settings(&config.settings) {
        warn!("could not save settings: {e}");
    }
}

pub fn run_name_normalizer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let directory = prompt_directory(config)?;
    let normalizer = NameNormalizer::new(Arc::clone(shutdown_signal));

    match normalizer.run(&directory) {
        Ok(_) => remember_directory(config, &directory),
        Err(e) => eprintln!("{} {}", style("error:").red().bold(), e),
    }

    pause(term)?;
    Ok(())
}

pub fn run_video_converter(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let directory = prompt_directory(config)?;
    let converter = VideoConverter::new(config.clone(), Arc::clone(shutdown_signal));

    match converter.run(&directory) {
        Ok(_) => remember_directory(config, &directory),
        Err(e) => eprintln!("{} {}", style("error:").red().bold(), e),
    }

    pause(term)?;
    Ok(())
}

pub fn run_catalogue_builder(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let directory = prompt_directory(config)?;
    let builder = CatalogueBuilder::new(config.clone(), Arc::clone(shutdown_signal));

    match builder.run(&directory) {
        Ok(_) => remember_directory(config, &directory),
        Err(e) => eprintln!("{} {}", style("error:").red().bold(), e),
    }

    pause(term)?;
    Ok(())
}

pub fn run_pipeline(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let directory = prompt_directory(config)?;

    match run_full_pipeline(config, shutdown_signal, &directory) {
        Ok(_) => remember_directory(config, &directory),
        Err(e) => eprintln!("{} {}", style("error:").red().bold(), e),
    }

    pause(term)?;
    Ok(())
}
