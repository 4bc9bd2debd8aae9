//! `waymark check` command implementation.

use std::path::PathBuf;

use clap::Args;
use waymark_build::{LintSeverity, Pipeline};
use waymark_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover waymark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if sources are unreadable or any rule reports an
    /// error-severity finding.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let pipeline = Pipeline::new(
            config.build_resolved.source_dir.clone(),
            config.build_resolved.output_dir.clone(),
            config.site.base_url.clone(),
        );
        let findings = pipeline.check()?;

        if findings.is_empty() {
            output.success("No issues found");
            return Ok(());
        }

        let mut errors = 0;
        for (key, issues) in &findings {
            for issue in issues {
                let line = format!("{key}: [{}] {}", issue.rule, issue.message);
                match issue.severity {
                    LintSeverity::Error => {
                        errors += 1;
                        output.error(&line);
                    }
                    LintSeverity::Warning => output.warning(&line),
                }
            }
        }

        if errors > 0 {
            return Err(CliError::Check(format!("{errors} error(s) found")));
        }
        Ok(())
    }
}
