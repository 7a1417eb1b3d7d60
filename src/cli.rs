use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

mod export;
mod init;
mod list;
mod terminal;

use alarm_tags::{
    Config, Conversion, ConversionReport,
    domain::CONFIG_FILE_NAME,
    storage::{FileFailure, collect_xml_paths},
};
use clap::ArgAction;
use export::Export;
use indicatif::{ProgressBar, ProgressStyle};
use init::Init;
use list::List;
use terminal::Colorize;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE_NAME, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<ExitCode> {
        Self::setup_logging(self.verbose);
        self.command.run(&self.config).map(ExitCode::from)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Convert alarm exports into a spreadsheet of tags
    Export(Export),

    /// Print the converted rows without writing a spreadsheet
    List(List),

    /// Write a default configuration file
    Init(Init),
}

impl Command {
    fn run(self, config_path: &Path) -> anyhow::Result<Outcome> {
        match self {
            Self::Export(command) => command.run(&Config::load_or_default(config_path)),
            Self::List(command) => {
                command.run(&Config::load_or_default(config_path))?;
                Ok(Outcome::Success)
            }
            Self::Init(command) => {
                command.run(config_path)?;
                Ok(Outcome::Success)
            }
        }
    }
}

/// How a command that did not fail outright finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every input was handled.
    Success,
    /// Output was written, but some inputs could not be parsed.
    PartialFailure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::PartialFailure => Self::from(2),
        }
    }
}

/// Discovers the XML files among `inputs` and converts them.
///
/// # Errors
///
/// Fails if no XML files are found, or the progress bar template is invalid.
fn convert_inputs(
    inputs: &[PathBuf],
    conversion: Conversion,
    show_progress: bool,
) -> anyhow::Result<(Vec<PathBuf>, ConversionReport)> {
    let paths = collect_xml_paths(inputs);
    if paths.is_empty() {
        anyhow::bail!("No XML files found in the given inputs");
    }
    tracing::info!("Converting {} files", paths.len());

    let progress = if show_progress {
        let bar = ProgressBar::new(paths.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} {wide_msg}")?.progress_chars("=> "),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let report = conversion.run_with_progress(&paths, |path| {
        if let Some(name) = path.file_name() {
            progress.set_message(name.to_string_lossy().into_owned());
        }
        progress.inc(1);
    });
    progress.finish_and_clear();

    Ok((paths, report))
}

fn print_failures(failures: &[FileFailure]) {
    if failures.is_empty() {
        return;
    }
    eprintln!(
        "{}",
        format!("⚠️  {} files could not be parsed:", failures.len()).warning()
    );
    for failure in failures {
        eprintln!("  - {}: {}", failure.path.display(), failure.error);
    }
}
