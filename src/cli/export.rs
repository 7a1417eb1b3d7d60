use std::path::PathBuf;

use alarm_tags::{
    Config, Conversion,
    storage::{default_output_path, write_workbook},
};
use anyhow::Context;
use tracing::instrument;

use super::{Outcome, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Export {
    /// Alarm export files, or directories to search for them
    #[arg(required = true, value_name = "PATH")]
    inputs: Vec<PathBuf>,

    /// Where to write the spreadsheet (defaults to the configured file name
    /// next to the first input)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Leave out rows whose description is blank
    #[arg(long)]
    ignore_blank_descriptions: bool,

    /// Write nothing if any file fails to parse
    #[arg(long)]
    strict: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

impl Export {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<Outcome> {
        let ignore_blank = self.ignore_blank_descriptions || config.ignore_blank_descriptions;
        let conversion = Conversion::new().ignore_blank_descriptions(ignore_blank);

        let (paths, report) = super::convert_inputs(&self.inputs, conversion, !self.quiet)?;
        super::print_failures(report.failures());

        if report.files_parsed() == 0 {
            anyhow::bail!("None of the {} files could be parsed", paths.len());
        }
        if self.strict && report.has_failures() {
            anyhow::bail!(
                "{} of {} files failed to parse; no spreadsheet written",
                report.failures().len(),
                paths.len()
            );
        }

        let output = match self.output {
            Some(output) => output,
            None => default_output_path(&paths[0], config.output_file_name()),
        };

        write_workbook(&output, report.rows(), config)
            .with_context(|| format!("failed to export to {}", output.display()))?;

        println!(
            "{}",
            format!(
                "Exported {} of {} rows to {} (skipped {})",
                report.exported_rows(),
                report.total_rows(),
                output.display(),
                report.skipped_rows()
            )
            .success()
        );

        if report.has_failures() {
            Ok(Outcome::PartialFailure)
        } else {
            Ok(Outcome::Success)
        }
    }
}

#[cfg(test)]
impl Export {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            output: None,
            ignore_blank_descriptions: false,
            strict: false,
            quiet: true,
        }
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}
