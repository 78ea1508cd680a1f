//! Configuration file support
//!
//! Precedence order (highest to lowest):
//! 1. Command-line arguments
//! 2. Project config (./.doctext.toml)
//! 3. User config (~/.doctext.toml)
//! 4. Built-in defaults

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of both the user and the project configuration file
pub const CONFIG_FILE_NAME: &str = ".doctext.toml";

/// PDF read when no input is given
pub const DEFAULT_PDF_INPUT: &str = "tmp/QUESTIONNAIRE EXPORT COMPTA NEW.pdf";

/// Word document read when no input is given
pub const DEFAULT_DOCX_INPUT: &str = "tmp/QUESTIONNAIRE EXPORT COMPTA NEW.docx";

/// Page dump destination when no output is given
pub const DEFAULT_PDF_OUTPUT: &str = "pdf_dump.txt";

/// Template written by `doctext config init`
pub const CONFIG_TEMPLATE: &str = r#"# doctext configuration file

# Defaults for `doctext pdf`
[pdf]
# input = "tmp/QUESTIONNAIRE EXPORT COMPTA NEW.pdf"
# output = "pdf_dump.txt"
# max_pages = 10

# Defaults for `doctext docx`
[docx]
# input = "tmp/QUESTIONNAIRE EXPORT COMPTA NEW.docx"
# limit = 100

# Defaults for `doctext extract`
[extract]
# Output format: text or json
# format = "text"
# compact = false
"#;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for the pdf command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf: Option<PdfConfig>,

    /// Defaults for the docx command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docx: Option<DocxConfig>,

    /// Defaults for the extract command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract: Option<ExtractConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// PDF to dump
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Page dump destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Only extract the first N pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocxConfig {
    /// Word document to list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Number of paragraphs in the listing window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Default output format (text, json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default compact JSON output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact: Option<bool>,
}

impl PdfConfig {
    fn merge_from(&mut self, other: Self) {
        self.input = other.input.or(self.input.take());
        self.output = other.output.or(self.output.take());
        self.max_pages = other.max_pages.or(self.max_pages);
    }
}

impl DocxConfig {
    fn merge_from(&mut self, other: Self) {
        self.input = other.input.or(self.input.take());
        self.limit = other.limit.or(self.limit);
    }
}

impl ExtractConfig {
    fn merge_from(&mut self, other: Self) {
        self.format = other.format.or(self.format.take());
        self.compact = other.compact.or(self.compact);
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Find and load configuration files
    /// Returns (`user_config`, `project_config`)
    pub fn discover_configs() -> (Option<Self>, Option<Self>) {
        let user_config = Self::user_config_path().and_then(|p| Self::load_if_present(&p, "user"));
        let project_config = Self::load_if_present(&Self::project_config_path(), "project");
        (user_config, project_config)
    }

    /// Path of the user config (~/.doctext.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Path of the project config (./.doctext.toml)
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Load a config file if it exists; a broken file is reported and ignored
    fn load_if_present(path: &Path, kind: &str) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match Self::load_from_file(path) {
            Ok(config) => {
                log::debug!("Loaded {kind} config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                eprintln!(
                    "{} Failed to load {} config from {}: {:#}",
                    "Warning:".yellow().bold(),
                    kind,
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Merge configs with precedence: project config > user config > defaults
    pub fn merge(user_config: Option<Self>, project_config: Option<Self>) -> Self {
        let mut merged = Self::default();

        for config in [user_config, project_config].into_iter().flatten() {
            if let Some(pdf) = config.pdf {
                merged.pdf.get_or_insert_with(PdfConfig::default).merge_from(pdf);
            }
            if let Some(docx) = config.docx {
                merged.docx.get_or_insert_with(DocxConfig::default).merge_from(docx);
            }
            if let Some(extract) = config.extract {
                merged
                    .extract
                    .get_or_insert_with(ExtractConfig::default)
                    .merge_from(extract);
            }
        }

        merged
    }
}
