//! Case-record files: JSON export/import and the plain-text prompt export.
//!
//! Import validates the whole document before touching the store, then
//! applies it through the ordinary setters, so one import produces four
//! notifications (parameters, caseInfo, renderStyle, freeText).

use chrono::NaiveDate;
use serde_json::Value;

use super::error::ImportError;
use super::i18n::Translator;
use super::persistence::merge_case_info;
use super::persistence::SnapshotStorage;
use super::prompt::generate_prompt;
use super::state::AppState;
use super::state::CaseInfo;
use super::state::Parameter;
use super::state::DEFAULT_RENDER_STYLE;
use super::store::AppStore;

pub const EXPORT_FORMAT_VERSION: u64 = 1;
const EXPORT_FORMAT_VERSION_KEY: &str = "exportFormatVersion";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Json,
    Text,
}

impl ExportKind {
    fn stem(self) -> &'static str {
        match self {
            Self::Json => "fantom-sketch-data",
            Self::Text => "fantom-sketch",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

/// A validated import document, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPayload {
    pub case_info: CaseInfo,
    pub parameters: Vec<Parameter>,
    pub render_style: String,
    pub free_text: String,
}

pub fn parse_import(text: &str) -> Result<ImportPayload, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(root) = value else {
        return Err(ImportError::NotAnObject);
    };
    let case_info = match root.get("caseInfo") {
        Some(Value::Object(fields)) => merge_case_info(&CaseInfo::default(), fields),
        _ => return Err(ImportError::MissingCaseInfo),
    };
    let parameters = match root.get("parameters") {
        Some(parameters @ Value::Array(_)) => {
            serde_json::from_value::<Vec<Parameter>>(parameters.clone())
                .map_err(|err| ImportError::InvalidParameters(err.to_string()))?
        }
        _ => return Err(ImportError::MissingParameters),
    };
    let render_style = match root.get("renderStyle") {
        Some(Value::String(style)) if !style.is_empty() => style.clone(),
        _ => DEFAULT_RENDER_STYLE.to_string(),
    };
    let free_text = match root.get("freeText") {
        Some(Value::String(text)) => text.clone(),
        _ => String::new(),
    };
    Ok(ImportPayload {
        case_info,
        parameters,
        render_style,
        free_text,
    })
}

/// Apply a validated payload field by field.
pub fn apply_import<S: SnapshotStorage>(store: &mut AppStore<S>, payload: ImportPayload) {
    store.save_parameters(payload.parameters);
    store.save_case_info(payload.case_info);
    store.save_render_style(payload.render_style);
    store.save_free_text(payload.free_text);
}

/// Parse then apply. On error the store is untouched.
pub fn import_json<S: SnapshotStorage>(
    store: &mut AppStore<S>,
    text: &str,
) -> Result<(), ImportError> {
    let payload = parse_import(text)?;
    apply_import(store, payload);
    Ok(())
}

/// Pretty-printed JSON of the full state.
pub fn export_json(state: &AppState, include_version: bool) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(state)?;
    if let Value::Object(root) = &mut value {
        if include_version {
            root.insert(
                EXPORT_FORMAT_VERSION_KEY.to_string(),
                Value::from(EXPORT_FORMAT_VERSION),
            );
        } else {
            root.remove(EXPORT_FORMAT_VERSION_KEY);
        }
    }
    serde_json::to_string_pretty(&value)
}

pub fn export_text(state: &AppState, translator: &dyn Translator) -> String {
    generate_prompt(state, translator)
}

/// `fantom-sketch-data-<case>-<date>.json` or `fantom-sketch-<case>-<date>.txt`,
/// where `<case>` is the case number, else the title, else `untitled`.
pub fn export_file_name(
    case_info: &CaseInfo,
    date: NaiveDate,
    kind: ExportKind,
) -> String {
    let source = [&case_info.case_number, &case_info.title]
        .into_iter()
        .map(|field| field.trim())
        .find(|field| !field.is_empty())
        .unwrap_or("untitled");
    format!(
        "{}-{}-{}.{}",
        kind.stem(),
        sanitize_file_token(source),
        date.format("%Y-%m-%d"),
        kind.extension()
    )
}

/// Collapse runs of anything outside `[A-Za-z0-9._-]` to `_`.
pub fn sanitize_file_token(raw: &str) -> String {
    let mut replaced = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            replaced.push(c);
        } else if !replaced.ends_with('_') {
            replaced.push('_');
        }
    }
    let token = replaced.trim_matches(|c| c == '_' || c == '.');
    if token.is_empty() {
        "untitled".to_string()
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::actions::ChangeTag;
    use crate::i18n::Translations;
    use crate::persistence::MemoryStorage;
    use crate::state::default_parameters;
    use crate::state::default_state;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).expect("date")
    }

    #[test]
    fn malformed_documents_are_rejected_without_touching_state() {
        let mut store = AppStore::initialize(MemoryStorage::new());
        store.save_free_text("keep me");
        let before = store.state().clone();
        let writes = store.storage().writes();

        for (doc, expect) in [
            ("{}", "caseInfo"),
            (r#"{"caseInfo": {}}"#, "parameters"),
            (r#"{"parameters": "not-an-array"}"#, "caseInfo"),
            (r#"{"caseInfo": {}, "parameters": "not-an-array"}"#, "parameters"),
            (r#"{"caseInfo": "x", "parameters": []}"#, "caseInfo"),
            ("[]", "object"),
            ("not json", "JSON"),
            (r#"{"caseInfo": {}, "parameters": [{"id": 3}]}"#, "parameter"),
        ] {
            let err = import_json(&mut store, doc).expect_err(doc);
            assert!(err.to_string().contains(expect), "{doc}: {err}");
        }

        assert_eq!(store.state(), &before);
        assert_eq!(store.storage().writes(), writes);
    }

    #[test]
    fn import_applies_each_field_with_defaults() {
        let mut store = AppStore::initialize(MemoryStorage::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |_, tag| sink.borrow_mut().push(tag));

        let doc = json!({
            "caseInfo": { "title": "Robbery", "caseNumber": 42 },
            "parameters": [
                { "id": "custom-1", "name": "Scar", "shades": ["None", "Visible"], "value": "Visible", "isCustom": true }
            ],
            "renderStyle": "",
            "exportFormatVersion": 1
        });
        import_json(&mut store, &doc.to_string()).expect("import");

        assert_eq!(store.case_info(), &CaseInfo::new("Robbery", "", ""));
        assert_eq!(store.parameters().len(), 1);
        assert_eq!(store.render_style(), "Sketch");
        assert_eq!(store.free_text(), "");
        assert!(store.state().extra.is_empty());
        assert_eq!(
            *seen.borrow(),
            vec![
                ChangeTag::Parameters,
                ChangeTag::CaseInfo,
                ChangeTag::RenderStyle,
                ChangeTag::FreeText,
            ]
        );
    }

    #[test]
    fn export_then_import_restores_the_state() {
        let mut source = default_state();
        source.case_info = CaseInfo::new("The informant", "C-123", "2024-01-01");
        source.render_style = "3D Model".to_string();
        source.free_text = "tattoo".to_string();

        let exported = export_json(&source, true).expect("export");
        let value: Value = serde_json::from_str(&exported).expect("json");
        assert_eq!(value["exportFormatVersion"], json!(1));
        assert!(exported.contains("\n  \"caseInfo\""));

        let mut store = AppStore::initialize(MemoryStorage::new());
        import_json(&mut store, &exported).expect("import");
        assert_eq!(store.state(), &source);
    }

    #[test]
    fn export_without_version_drops_a_passed_through_version() {
        let mut state = default_state();
        state.extra.insert("exportFormatVersion".to_string(), json!(1));
        state.extra.insert("theme".to_string(), json!("dark"));

        let value: Value =
            serde_json::from_str(&export_json(&state, false).expect("export")).expect("json");
        assert!(value.get("exportFormatVersion").is_none());
        assert_eq!(value["theme"], json!("dark"));
        assert_eq!(value["parameters"].as_array().map(Vec::len), Some(default_parameters().len()));
    }

    #[test]
    fn file_names_prefer_case_number_then_title() {
        let mut case_info = CaseInfo::new("Bank job / East", "", "");
        assert_eq!(
            export_file_name(&case_info, date(), ExportKind::Json),
            "fantom-sketch-data-Bank_job_East-2024-03-09.json"
        );

        case_info.case_number = "C-123/45".to_string();
        assert_eq!(
            export_file_name(&case_info, date(), ExportKind::Text),
            "fantom-sketch-C-123_45-2024-03-09.txt"
        );

        assert_eq!(
            export_file_name(&CaseInfo::default(), date(), ExportKind::Json),
            "fantom-sketch-data-untitled-2024-03-09.json"
        );
    }

    #[test]
    fn sanitized_tokens_never_escape_the_directory() {
        assert_eq!(sanitize_file_token("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_file_token("////"), "untitled");
        assert_eq!(sanitize_file_token("Case 12 / ünï"), "Case_12_n");
    }

    #[test]
    fn text_export_is_the_prompt() {
        let state = default_state();
        let en = Translations::english();
        assert_eq!(export_text(&state, &en), generate_prompt(&state, &en));
    }
}
