use std::path::Path;

use alarm_tags::Config;
use tracing::instrument;

#[derive(Debug, Default, clap::Parser)]
pub struct Init {
    /// Leave rows with blank descriptions out of exports by default
    #[arg(long)]
    ignore_blank_descriptions: bool,
}

impl Init {
    #[instrument]
    pub fn run(self, path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Configuration already exists at {} (remove it to start over)",
                path.display()
            );
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", parent.display()))?;
        }

        let mut config = Config::default();
        config.ignore_blank_descriptions = self.ignore_blank_descriptions;
        config
            .save(path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", path.display()))?;

        println!("Created {}", path.display());
        println!();
        println!("Next steps:");
        println!("  alarm-tags export path/to/exports/");

        Ok(())
    }
}
