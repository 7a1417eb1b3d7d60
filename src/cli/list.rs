use std::path::PathBuf;

use alarm_tags::{AlarmRow, Config, Conversion};
use clap::{Parser, ValueEnum};
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

const MAX_TAG_WIDTH: usize = 60;

/// Command arguments for `alarm-tags list`.
#[derive(Debug, Parser)]
pub struct List {
    /// Alarm export files, or directories to search for them
    #[arg(required = true, value_name = "PATH")]
    inputs: Vec<PathBuf>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Leave out rows whose description is blank
    #[arg(long)]
    ignore_blank_descriptions: bool,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl List {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let rows = self.rows(config)?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            OutputFormat::Table if self.quiet => output_quiet(&rows),
            OutputFormat::Table => output_table(&rows),
        }

        Ok(())
    }

    /// Converts the inputs, reporting files that failed, and returns the
    /// ordered rows.
    pub fn rows(&self, config: &Config) -> anyhow::Result<Vec<AlarmRow>> {
        let ignore_blank = self.ignore_blank_descriptions || config.ignore_blank_descriptions;
        let conversion = Conversion::new().ignore_blank_descriptions(ignore_blank);

        let (_, report) = super::convert_inputs(&self.inputs, conversion, false)?;
        super::print_failures(report.failures());

        Ok(report.into_rows())
    }
}

fn output_quiet(rows: &[AlarmRow]) {
    for row in rows {
        println!("{}\t{}", row.tag(), row.description());
    }
}

fn output_table(rows: &[AlarmRow]) {
    if rows.is_empty() {
        println!("No alarm rows found.");
        return;
    }

    if is_narrow() {
        // Stacked output for narrow terminals
        for row in rows {
            println!("{}", row.tag().info());
            if !row.has_blank_description() {
                println!("  {}", row.description());
            }
        }
    } else {
        let width = rows
            .iter()
            .map(|row| row.tag().chars().count())
            .max()
            .unwrap_or_default()
            .clamp("Tag".len(), MAX_TAG_WIDTH);

        println!("{:<width$}  Description", "Tag");
        println!("{}", "─".repeat(width + 13).dim());
        for row in rows {
            println!("{:<width$}  {}", row.tag(), row.description());
        }
    }

    println!();
    println!("{}", format!("{} rows", rows.len()).dim());
}

#[cfg(test)]
impl List {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            output: OutputFormat::Table,
            ignore_blank_descriptions: false,
            quiet: true,
        }
    }
}
