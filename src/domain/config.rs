use std::path::Path;

use serde::{Deserialize, Serialize};

/// The file name the configuration is read from by default.
pub const CONFIG_FILE_NAME: &str = "alarm-tags.toml";

/// Configuration for alarm tag conversion.
///
/// This struct holds settings that control which rows are exported and how
/// the output workbook is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Whether rows whose description is empty or whitespace are left out of
    /// the export.
    pub ignore_blank_descriptions: bool,

    /// The file name used for the workbook when no output path is given.
    ///
    /// The workbook is placed next to the first input file.
    output_file_name: String,

    /// The name of the worksheet holding the rows.
    worksheet_name: String,

    /// Width of the tag column, in characters.
    tag_column_width: u16,

    /// Width of the description column, in characters.
    description_column_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_blank_descriptions: false,
            output_file_name: default_output_file_name(),
            worksheet_name: default_worksheet_name(),
            tag_column_width: default_tag_column_width(),
            description_column_width: default_description_column_width(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration from the given path, falling back to the
    /// defaults if the file is missing or invalid.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config from {}: {e}", path.display());
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the default workbook file name.
    #[must_use]
    pub fn output_file_name(&self) -> &str {
        &self.output_file_name
    }

    /// Returns the worksheet name.
    #[must_use]
    pub fn worksheet_name(&self) -> &str {
        &self.worksheet_name
    }

    /// Returns the tag column width.
    #[must_use]
    pub const fn tag_column_width(&self) -> u16 {
        self.tag_column_width
    }

    /// Returns the description column width.
    #[must_use]
    pub const fn description_column_width(&self) -> u16 {
        self.description_column_width
    }
}

fn default_output_file_name() -> String {
    "Alarm_Tags.xlsx".to_string()
}

fn default_worksheet_name() -> String {
    "Alarm Tags".to_string()
}

const fn default_tag_column_width() -> u16 {
    40
}

const fn default_description_column_width() -> u16 {
    90
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        ignore_blank_descriptions: bool,

        #[serde(default = "default_output_file_name")]
        output_file_name: String,

        #[serde(default = "default_worksheet_name")]
        worksheet_name: String,

        #[serde(default = "default_tag_column_width")]
        tag_column_width: u16,

        #[serde(default = "default_description_column_width")]
        description_column_width: u16,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                ignore_blank_descriptions,
                output_file_name,
                worksheet_name,
                tag_column_width,
                description_column_width,
            } => Self {
                ignore_blank_descriptions,
                output_file_name,
                worksheet_name,
                tag_column_width,
                description_column_width,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            ignore_blank_descriptions: config.ignore_blank_descriptions,
            output_file_name: config.output_file_name,
            worksheet_name: config.worksheet_name,
            tag_column_width: config.tag_column_width,
            description_column_width: config.description_column_width,
        }
    }
}
