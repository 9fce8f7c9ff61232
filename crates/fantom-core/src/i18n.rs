//! Translation tables and the lookup contract the prompt generator uses.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use super::error::TranslationError;

const ENGLISH_TABLE: &str = include_str!("../lang/en.yaml");
const SPANISH_TABLE: &str = include_str!("../lang/es.yaml");

/// Key → display string. Unresolved keys fall back to the key itself.
pub trait Translator {
    fn lookup(&self, key: &str) -> Option<&str>;

    fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }

    /// `t` plus `{name}` placeholder substitution.
    fn t_with(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let mut text = self.t(key);
        for (name, value) in vars {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }
}

impl Translator for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Resolves nothing; every key renders as itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translator for Untranslated {
    fn lookup(&self, _key: &str) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Da,
    Zh,
    Hi,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Es,
        Language::Da,
        Language::Zh,
        Language::Hi,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Da => "da",
            Self::Zh => "zh",
            Self::Hi => "hi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
            Self::Da => "Dansk",
            Self::Zh => "中文",
            Self::Hi => "हिन्दी",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Like `from_code`, but unsupported codes become English.
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or_else(|| {
            tracing::warn!(code, "unsupported language; defaulting to en");
            Self::En
        })
    }

    fn builtin_table(self) -> Option<&'static str> {
        match self {
            Self::En => Some(ENGLISH_TABLE),
            Self::Es => Some(SPANISH_TABLE),
            Self::Da | Self::Zh | Self::Hi => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    language: Language,
    entries: BTreeMap<String, String>,
}

impl Translations {
    pub fn empty(language: Language) -> Self {
        Self {
            language,
            entries: BTreeMap::new(),
        }
    }

    pub fn from_entries(language: Language, entries: BTreeMap<String, String>) -> Self {
        Self { language, entries }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The embedded English table.
    pub fn english() -> Self {
        Self::builtin(Language::En)
    }

    /// Embedded table for `language` layered over English. Languages without
    /// an embedded table get plain English.
    pub fn builtin(language: Language) -> Self {
        let mut translations = match parse_yaml(ENGLISH_TABLE) {
            Ok(entries) => Self::from_entries(language, entries),
            Err(err) => {
                tracing::warn!(error = %err, "built-in English table is invalid");
                Self::empty(language)
            }
        };
        if language == Language::En {
            return translations;
        }
        match language.builtin_table().map(parse_yaml) {
            Some(Ok(entries)) => translations.overlay(entries),
            Some(Err(err)) => {
                tracing::warn!(language = language.code(), error = %err, "built-in table is invalid");
            }
            None => {
                tracing::debug!(language = language.code(), "no built-in table; using English");
            }
        }
        translations
    }

    /// Read `<dir>/<code>.json`, `<dir>/<code>.yaml` or `<dir>/<code>.yml`
    /// and layer it over the built-in tables.
    pub fn load(dir: &Path, language: Language) -> Result<Self, TranslationError> {
        let code = language.code();
        let mut translations = Self::builtin(language);

        let json_path = dir.join(format!("{code}.json"));
        if json_path.exists() {
            let raw = std::fs::read_to_string(&json_path)?;
            let entries: BTreeMap<String, String> = serde_json::from_str(&raw)?;
            translations.overlay(entries);
            return Ok(translations);
        }
        for extension in ["yaml", "yml"] {
            let yaml_path = dir.join(format!("{code}.{extension}"));
            if yaml_path.exists() {
                let raw = std::fs::read_to_string(&yaml_path)?;
                translations.overlay(parse_yaml(&raw)?);
                return Ok(translations);
            }
        }
        Err(TranslationError::NotFound {
            code,
            dir: dir.to_path_buf(),
        })
    }

    /// `load`, falling back to the built-in tables on any error.
    pub fn load_or_builtin(dir: &Path, language: Language) -> Self {
        match Self::load(dir, language) {
            Ok(translations) => translations,
            Err(err) => {
                tracing::warn!(language = language.code(), error = %err, "using built-in translations");
                Self::builtin(language)
            }
        }
    }

    pub fn overlay(&mut self, entries: BTreeMap<String, String>) {
        self.entries.extend(entries);
    }
}

impl Translator for Translations {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

fn parse_yaml(raw: &str) -> Result<BTreeMap<String, String>, serde_yaml::Error> {
    serde_yaml::from_str(raw)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn builtin_tables_parse() {
        parse_yaml(ENGLISH_TABLE).expect("en.yaml");
        parse_yaml(SPANISH_TABLE).expect("es.yaml");
    }

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        let en = Translations::english();
        assert_eq!(en.t("prompt.caseTitleLabel"), "Title");
        assert_eq!(en.t("Hair Color"), "Hair Color");
        assert_eq!(Untranslated.t("style.Sketch.prefix"), "style.Sketch.prefix");
    }

    #[test]
    fn interpolates_named_placeholders() {
        let en = Translations::english();
        assert_eq!(
            en.t_with("parameterNameExists", &[("name", "Scar")]),
            "Parameter \"Scar\" already exists."
        );
    }

    #[test]
    fn spanish_overlays_english() {
        let es = Translations::builtin(Language::Es);
        assert_eq!(es.language(), Language::Es);
        assert_eq!(es.t("Hair Color"), "Color del cabello");
        // Only in the English table.
        assert_eq!(es.t("exportError"), "Error exporting data.");
    }

    #[test]
    fn languages_without_a_table_use_english() {
        let da = Translations::builtin(Language::Da);
        assert_eq!(da.t("prompt.caseDateLabel"), "Date");
    }

    #[test]
    fn resolve_defaults_unknown_codes_to_english() {
        assert_eq!(Language::resolve("ES"), Language::Es);
        assert_eq!(Language::resolve("fr"), Language::En);
    }

    #[test]
    fn loads_json_and_yaml_files() {
        let dir = tempdir().expect("tmpdir");
        std::fs::write(
            dir.path().join("da.json"),
            r#"{ "prompt.caseDateLabel": "Dato" }"#,
        )
        .expect("write json");
        std::fs::write(dir.path().join("hi.yml"), "\"prompt.caseTitleLabel\": \"शीर्षक\"\n")
            .expect("write yaml");

        let da = Translations::load(dir.path(), Language::Da).expect("da");
        assert_eq!(da.t("prompt.caseDateLabel"), "Dato");
        assert_eq!(da.t("prompt.caseTitleLabel"), "Title");

        let hi = Translations::load(dir.path(), Language::Hi).expect("hi");
        assert_eq!(hi.t("prompt.caseTitleLabel"), "शीर्षक");
    }

    #[test]
    fn missing_or_broken_files_fall_back_to_builtin() {
        let dir = tempdir().expect("tmpdir");
        assert!(matches!(
            Translations::load(dir.path(), Language::Zh),
            Err(TranslationError::NotFound { code: "zh", .. })
        ));

        std::fs::write(dir.path().join("es.json"), "{ broken").expect("write");
        let es = Translations::load_or_builtin(dir.path(), Language::Es);
        assert_eq!(es, Translations::builtin(Language::Es));
    }
}
