//! `waymark build` command implementation.

use std::path::PathBuf;

use clap::Args;
use waymark_build::Pipeline;
use waymark_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover waymark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Site base URL for canonical links (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the build fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            base_url: self.base_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Building {} -> {}",
            config.build_resolved.source_dir.display(),
            config.build_resolved.output_dir.display()
        ));

        let pipeline = Pipeline::new(
            config.build_resolved.source_dir.clone(),
            config.build_resolved.output_dir.clone(),
            config.site.base_url.clone(),
        );
        let summary = pipeline.build()?;

        output.success(&format!(
            "Built {} pages, sitemap with {} urls",
            summary.pages, summary.sitemap_urls
        ));
        Ok(())
    }
}
