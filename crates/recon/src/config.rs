use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReconConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub registry: RegistrySourceConfig,
    pub operational: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub report: ReportLabels,
}

fn default_name() -> String {
    "address reconciliation".into()
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// One CSV export: where it lives and which columns hold the id and address.
///
/// Column names left out of the TOML (or set to "") fall back to the
/// export's standard header, filled in by `ReconConfig::from_toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub file: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default)]
    pub id_column: String,
    #[serde(default)]
    pub address_column: String,
}

/// Registry export. Its address column is split into positional segments.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySourceConfig {
    #[serde(flatten)]
    pub source: SourceConfig,
    #[serde(default = "default_segment_delimiter")]
    pub segment_delimiter: String,
}

fn default_delimiter() -> String {
    ";".into()
}

fn default_segment_delimiter() -> String {
    ",".into()
}

pub const DEFAULT_REGISTRY_ID_COLUMN: &str = "Регистрационный номер";
pub const DEFAULT_REGISTRY_ADDRESS_COLUMN: &str = "Адрес места установки";
pub const DEFAULT_OPERATIONAL_ID_COLUMN: &str = "Регистрационный номер ККТ";
pub const DEFAULT_OPERATIONAL_ADDRESS_COLUMN: &str = "Адрес расчетов";

impl SourceConfig {
    /// Field delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, ReconError> {
        self.parse_delimiter().map_err(ReconError::ConfigValidation)
    }

    fn parse_delimiter(&self) -> Result<u8, String> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )),
        }
    }

    fn fill_column_defaults(&mut self, id_column: &str, address_column: &str) {
        if self.id_column.is_empty() {
            self.id_column = id_column.into();
        }
        if self.address_column.is_empty() {
            self.address_column = address_column.into();
        }
    }

    fn validate(&self, label: &str) -> Result<(), ReconError> {
        if self.file.trim().is_empty() {
            return Err(ReconError::ConfigValidation(format!("{label}: file is empty")));
        }
        self.parse_delimiter()
            .map_err(|e| ReconError::ConfigValidation(format!("{label}: {e}")))?;
        if self.id_column.is_empty() || self.address_column.is_empty() {
            return Err(ReconError::ConfigValidation(format!(
                "{label}: id_column and address_column must be set"
            )));
        }
        if self.id_column == self.address_column {
            return Err(ReconError::ConfigValidation(format!(
                "{label}: id_column and address_column must differ"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output + report labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub xlsx: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub json: Option<String>,
}

/// Text rendered for the overall mismatch flag in exported reports.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportLabels {
    #[serde(default = "default_flag_present")]
    pub flag_present: String,
    #[serde(default = "default_flag_absent")]
    pub flag_absent: String,
}

fn default_flag_present() -> String {
    "есть".into()
}

fn default_flag_absent() -> String {
    "отсутствует".into()
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            flag_present: default_flag_present(),
            flag_absent: default_flag_absent(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let mut config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config
            .registry
            .source
            .fill_column_defaults(DEFAULT_REGISTRY_ID_COLUMN, DEFAULT_REGISTRY_ADDRESS_COLUMN);
        config
            .operational
            .fill_column_defaults(DEFAULT_OPERATIONAL_ID_COLUMN, DEFAULT_OPERATIONAL_ADDRESS_COLUMN);
        config.validate()?;
        Ok(config)
    }

    /// Default column layout of both exports, with the given input files.
    pub fn with_files(registry_file: impl Into<String>, operational_file: impl Into<String>) -> Self {
        Self {
            name: default_name(),
            registry: RegistrySourceConfig {
                source: SourceConfig {
                    file: registry_file.into(),
                    delimiter: default_delimiter(),
                    id_column: DEFAULT_REGISTRY_ID_COLUMN.into(),
                    address_column: DEFAULT_REGISTRY_ADDRESS_COLUMN.into(),
                },
                segment_delimiter: default_segment_delimiter(),
            },
            operational: SourceConfig {
                file: operational_file.into(),
                delimiter: default_delimiter(),
                id_column: DEFAULT_OPERATIONAL_ID_COLUMN.into(),
                address_column: DEFAULT_OPERATIONAL_ADDRESS_COLUMN.into(),
            },
            output: OutputConfig::default(),
            report: ReportLabels::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        self.registry.source.validate("registry")?;
        self.operational.validate("operational")?;

        if self.registry.segment_delimiter.is_empty() {
            return Err(ReconError::ConfigValidation(
                "registry: segment_delimiter must not be empty".into(),
            ));
        }

        if self.report.flag_present == self.report.flag_absent {
            return Err(ReconError::ConfigValidation(
                "report: flag_present and flag_absent must differ".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
