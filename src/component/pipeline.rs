//! Runs the three stages back to back over one root directory.

use super::catalogue_builder::{CatalogueBuilder, CatalogueReport};
use super::name_normalizer::{NameNormalizer, NormalizeReport};
use super::video_converter::{ConversionReport, VideoConverter};
use crate::config::Config;
use anyhow::Result;
use console::style;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
pub struct PipelineReport {
    pub normalize: NormalizeReport,
    pub conversion: ConversionReport,
    /// `None` when an interrupt stopped the run before the catalogue.
    pub catalogue: Option<CatalogueReport>,
}

/// Normalize names, convert videos, then build the catalogue. An interrupt
/// between stages skips whatever has not started yet; a per-file conversion
/// failure does not block the catalogue of the files that did convert.
pub fn run_full_pipeline(
    config: &Config,
    shutdown_signal: &Arc<AtomicBool>,
    directory: &Path,
) -> Result<PipelineReport> {
    println!("{}", style("=== full pipeline ===").cyan().bold());
    info!("running the full pipeline over {}", directory.display());
    println!();

    let normalize = NameNormalizer::new(Arc::clone(shutdown_signal)).run(directory)?;
    println!();

    if shutdown_signal.load(Ordering::SeqCst) {
        warn!("interrupt received, skipping conversion and catalogue");
        return Ok(PipelineReport {
            normalize,
            conversion: ConversionReport {
                interrupted: true,
                ..ConversionReport::default()
            },
            catalogue: None,
        });
    }

    let conversion =
        VideoConverter::new(config.clone(), Arc::clone(shutdown_signal)).run(directory)?;
    println!();

    if conversion.interrupted {
        warn!("conversion was interrupted, skipping the catalogue");
        return Ok(PipelineReport {
            normalize,
            conversion,
            catalogue: None,
        });
    }

    let catalogue =
        CatalogueBuilder::new(config.clone(), Arc::clone(shutdown_signal)).run(directory)?;

    Ok(PipelineReport {
        normalize,
        conversion,
        catalogue: Some(catalogue),
    })
}
