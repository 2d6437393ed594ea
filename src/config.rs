use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerFormat;
use crate::portfolio::{GroupBy, GroupingOptions, ReportOptions, UnnamedHoldings};

const CONFIG_FILE_NAME: &str = "holdings-report.toml";

fn default_delimiter() -> char {
    ';'
}

fn default_decimal_separator() -> char {
    '.'
}

fn default_unclassified_label() -> String {
    "Unclassified".to_string()
}

/// Layout of the input ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Field separator. Must be a single ASCII character.
    pub delimiter: char,

    /// Whether the first row is a header to discard.
    pub has_header: bool,

    /// Decimal separator used in the numeric columns (`.` or `,`).
    pub decimal_separator: char,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            has_header: true,
            decimal_separator: default_decimal_separator(),
        }
    }
}

impl LedgerConfig {
    pub fn to_format(&self) -> Result<LedgerFormat> {
        if !self.delimiter.is_ascii() {
            anyhow::bail!("ledger.delimiter must be an ASCII character, got {:?}", self.delimiter);
        }
        if self.decimal_separator != '.' && self.decimal_separator != ',' {
            anyhow::bail!(
                "ledger.decimal_separator must be '.' or ',', got {:?}",
                self.decimal_separator
            );
        }
        if self.delimiter == self.decimal_separator {
            anyhow::bail!("ledger.delimiter and ledger.decimal_separator must differ");
        }

        Ok(LedgerFormat {
            delimiter: self.delimiter as u8,
            has_header: self.has_header,
            decimal_separator: self.decimal_separator,
        })
    }
}

/// How holdings are folded into summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// `name` merges everything sharing a display name; `instrument` also
    /// splits by type and currency.
    pub group_by: GroupBy,

    /// `exclude` drops unnamed holdings from the summaries (they still count
    /// toward the total); `unclassified` collects them into one summary.
    pub unnamed: UnnamedHoldings,

    /// Summary name used for unnamed holdings with `unnamed = "unclassified"`.
    #[serde(default = "default_unclassified_label")]
    pub unclassified_label: String,

    /// Abort on undefined averages or shares instead of emitting null.
    pub strict: bool,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            group_by: GroupBy::default(),
            unnamed: UnnamedHoldings::default(),
            unclassified_label: default_unclassified_label(),
            strict: false,
        }
    }
}

/// Output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// If set, reported values are rounded (half away from zero) to this many
    /// decimal places. Shares always carry two.
    pub decimals: Option<u32>,

    /// Pretty-print the JSON report.
    pub pretty: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: None,
            pretty: true,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pin the report date instead of using the current time.
    pub as_of: Option<DateTime<Utc>>,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub aggregation: AggregationConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            grouping: GroupingOptions {
                group_by: self.aggregation.group_by,
                unnamed: self.aggregation.unnamed,
                unclassified_label: self.aggregation.unclassified_label.clone(),
            },
            strict: self.aggregation.strict,
            decimals: self.display.decimals,
        }
    }
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./holdings-report.toml` if it exists in current directory
/// 2. `~/.config/holdings-report/config.toml` (XDG config directory)
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from(CONFIG_FILE_NAME);
    if local_config.exists() {
        return local_config;
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("holdings-report").join("config.toml");
    }

    local_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_ledger_format() -> Result<()> {
        let config = Config::default();
        assert_eq!(config.ledger.to_format()?, LedgerFormat::default());
        assert_eq!(config.report_options(), ReportOptions::default());
        assert!(config.display.pretty);
        assert!(config.as_of.is_none());
        Ok(())
    }

    #[test]
    fn test_load_empty_config() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        std::fs::File::create(&config_path)?;

        let config = Config::load(&config_path)?;
        assert_eq!(config.ledger.delimiter, ';');
        assert_eq!(config.aggregation.group_by, GroupBy::Name);
        assert_eq!(config.aggregation.unclassified_label, "Unclassified");

        Ok(())
    }

    #[test]
    fn test_load_full_config() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = std::fs::File::create(&config_path)?;
        writeln!(file, "as_of = \"2024-06-30T00:00:00Z\"")?;
        writeln!(file, "[ledger]")?;
        writeln!(file, "delimiter = \"\\t\"")?;
        writeln!(file, "has_header = false")?;
        writeln!(file, "decimal_separator = \",\"")?;
        writeln!(file, "[aggregation]")?;
        writeln!(file, "group_by = \"instrument\"")?;
        writeln!(file, "unnamed = \"unclassified\"")?;
        writeln!(file, "unclassified_label = \"Other\"")?;
        writeln!(file, "strict = true")?;
        writeln!(file, "[display]")?;
        writeln!(file, "decimals = 2")?;
        writeln!(file, "pretty = false")?;

        let config = Config::load(&config_path)?;
        let format = config.ledger.to_format()?;
        assert_eq!(format.delimiter, b'\t');
        assert!(!format.has_header);
        assert_eq!(format.decimal_separator, ',');

        let options = config.report_options();
        assert_eq!(options.grouping.group_by, GroupBy::Instrument);
        assert_eq!(options.grouping.unnamed, UnnamedHoldings::Unclassified);
        assert_eq!(options.grouping.unclassified_label, "Other");
        assert!(options.strict);
        assert_eq!(options.decimals, Some(2));
        assert!(!config.display.pretty);
        assert_eq!(
            config.as_of.map(|d| d.to_rfc3339()),
            Some("2024-06-30T00:00:00+00:00".to_string())
        );

        Ok(())
    }

    #[test]
    fn test_load_or_default_missing_file() -> Result<()> {
        let dir = TempDir::new()?;
        let config = Config::load_or_default(&dir.path().join("absent.toml"))?;
        assert_eq!(config.ledger.delimiter, ';');
        Ok(())
    }

    #[test]
    fn test_unknown_group_by_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "[aggregation]\ngroup_by = \"isin\"\n")?;

        assert!(Config::load(&config_path).is_err());
        Ok(())
    }

    #[test]
    fn test_delimiter_must_differ_from_decimal_separator() {
        let ledger = LedgerConfig {
            delimiter: ',',
            decimal_separator: ',',
            ..LedgerConfig::default()
        };
        assert!(ledger.to_format().is_err());
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let ledger = LedgerConfig {
            delimiter: '§',
            ..LedgerConfig::default()
        };
        assert!(ledger.to_format().is_err());
    }
}
