use crate::config::Config;
use crate::menu::handlers::{
    run_catalogue_builder, run_name_normalizer, run_pipeline, run_video_converter,
};
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!(
        "{}",
        style("=== neonatal video dataset preparation ===").cyan().bold()
    );
    println!("{}", style("press ESC to exit").dim());

    let options = vec![
        "normalize file and directory names",
        "convert videos to low resolution",
        "build the dataset catalogue",
        "run the full pipeline",
        "exit",
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("choose a stage")
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_name_normalizer(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            run_video_converter(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(2) => {
            run_catalogue_builder(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(3) => {
            run_pipeline(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(4) => Ok(false),
        None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}
