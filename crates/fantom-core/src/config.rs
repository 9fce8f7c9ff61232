use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::i18n::Language;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub language: Language,
    /// Where the state snapshot lives. `None` means the platform data dir.
    pub data_dir: Option<PathBuf>,
    /// Directory with `<code>.json` / `<code>.yaml` translation overrides.
    pub translations_dir: Option<PathBuf>,
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::En,
            data_dir: None,
            translations_dir: None,
            export: ExportConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    pub include_format_version: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_format_version: true,
        }
    }
}
