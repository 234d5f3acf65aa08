//! Report configuration.
//!
//! Everything that used to be a module-level constant (field list, result
//! directory, business mapping) lives in an immutable [`ReportConfig`] that
//! is built once at startup and passed by reference to every builder.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults from [`constants`]
//! 2. a TOML file (`--config`, `$SLURM_ACCTS_CONFIG`, or
//!    `<config dir>/slurm-accts/config.toml`)
//! 3. CLI flags (`--fields`, `--resultdir`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::constants;
use crate::error::{Error, Result};

/// One business-mode report: an optional partition filter and the file
/// suffix its output is written under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BusinessGroup {
    /// Comma-separated partition list, `None` for "no filter".
    #[serde(default)]
    pub partition: Option<String>,
    /// Suffix in `<year>-<month>-HPC-slurm-<suffix>.txt`.
    pub suffix: String,
}

/// Ordered partition-group to suffix mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessMapping(Vec<BusinessGroup>);

impl BusinessMapping {
    #[must_use]
    pub fn new(groups: Vec<BusinessGroup>) -> Self {
        Self(groups)
    }

    #[must_use]
    pub fn groups(&self) -> &[BusinessGroup] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for BusinessMapping {
    fn default() -> Self {
        Self(
            constants::DEFAULT_BUSINESS_MAPPING
                .iter()
                .map(|(partition, suffix)| BusinessGroup {
                    partition: partition.map(str::to_string),
                    suffix: (*suffix).to_string(),
                })
                .collect(),
        )
    }
}

/// Immutable settings shared by every command built in one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Accounting binary, normally `sacct`.
    pub sacct: String,
    /// Shell that runs the command string in execute mode.
    pub shell: String,
    /// Comma-separated `-o` field list.
    pub fields: String,
    /// Where report files are written.
    pub result_dir: PathBuf,
    /// Business mode groups, in output order.
    pub business: BusinessMapping,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sacct: constants::DEFAULT_SACCT.to_string(),
            shell: constants::DEFAULT_SHELL.to_string(),
            fields: constants::DEFAULT_FIELDS.to_string(),
            result_dir: PathBuf::from(constants::DEFAULT_RESULT_DIR),
            business: BusinessMapping::default(),
        }
    }
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    sacct: Option<String>,
    shell: Option<String>,
    fields: Option<String>,
    result_dir: Option<PathBuf>,
    business: Option<Vec<BusinessGroup>>,
}

impl ReportConfig {
    /// Load configuration, layering the file at `explicit` (or the default
    /// location) over the built-in defaults.
    ///
    /// A missing default file is not an error; a missing explicit file is.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if an explicit file can't be read, [`Error::Config`] if
    /// any file present fails to parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.is_file() => p,
                _ => {
                    debug!("no config file found, using defaults");
                    return Ok(config);
                }
            },
        };

        let content = fs::read_to_string(&path)?;
        config.apply_toml(&content).map_err(|message| Error::Config {
            path: path.clone(),
            message,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Overlay values from a TOML document.
    fn apply_toml(&mut self, content: &str) -> std::result::Result<(), String> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| e.to_string())?;

        if let Some(sacct) = file.sacct {
            self.sacct = sacct;
        }
        if let Some(shell) = file.shell {
            self.shell = shell;
        }
        if let Some(fields) = file.fields {
            self.fields = fields;
        }
        if let Some(dir) = file.result_dir {
            self.result_dir = dir;
        }
        if let Some(groups) = file.business {
            if groups.is_empty() {
                return Err("business mapping must have at least one entry".to_string());
            }
            self.business = BusinessMapping::new(groups);
        }
        Ok(())
    }

    /// Apply CLI overrides on top of the loaded config.
    #[must_use]
    pub fn with_overrides(mut self, fields: Option<String>, result_dir: Option<PathBuf>) -> Self {
        if let Some(fields) = fields {
            self.fields = fields;
        }
        if let Some(dir) = result_dir {
            self.result_dir = dir;
        }
        self
    }
}

/// `<config dir>/slurm-accts/config.toml`, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| {
        d.join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME)
    })
}
