use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;

use super::state::default_state;
use super::state::AppState;
use super::state::CaseInfo;
use super::state::Parameter;

/// Fixed key the whole snapshot lives under.
pub const STORAGE_KEY: &str = "fantomAppState";

/// Durable home for one serialized `AppState`.
pub trait SnapshotStorage {
    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> std::io::Result<Option<String>>;

    fn write(&mut self, contents: &str) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at `<dir>/fantomAppState.json`, creating `dir` if needed.
    pub fn open(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(format!("{STORAGE_KEY}.json")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStorage for FileStorage {
    fn read(&self) -> std::io::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&self.path).map(Some)
    }

    fn write(&mut self, contents: &str) -> std::io::Result<()> {
        let mut opts = OpenOptions::new();
        opts.create(true).write(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o600);
        }
        let mut file = opts.open(&self.path)?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// In-process storage. `fail_writes` simulates a full or disabled backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn set_contents(&mut self, contents: Option<String>) {
        self.contents = contents;
    }

    /// Successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self) -> std::io::Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> std::io::Result<()> {
        if self.fail_writes {
            return Err(std::io::Error::other("storage quota exceeded"));
        }
        self.contents = Some(contents.to_string());
        self.writes += 1;
        Ok(())
    }
}

pub fn encode_snapshot(state: &AppState) -> std::io::Result<String> {
    serde_json::to_string(state).map_err(|err| std::io::Error::other(format!("serialize: {err}")))
}

/// Load whatever `storage` holds and merge it over the defaults.
///
/// Never fails: a read error, unparsable JSON, or a non-object root are all
/// treated as "nothing stored" and yield `default_state()`.
pub fn load_snapshot(storage: &dyn SnapshotStorage) -> AppState {
    let raw = match storage.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => return default_state(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read stored state; using defaults");
            return default_state();
        }
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => merge_snapshot(value),
        Err(err) => {
            tracing::warn!(error = %err, "stored state is not valid JSON; using defaults");
            default_state()
        }
    }
}

/// Overlay a possibly partial persisted object on the defaults.
///
/// Scalars are overlaid, `caseInfo` is merged field by field, and
/// `parameters` is taken whole or not at all. Unknown keys pass through.
pub fn merge_snapshot(loaded: Value) -> AppState {
    let mut state = default_state();
    let Value::Object(loaded) = loaded else {
        tracing::warn!("stored state is not an object; using defaults");
        return state;
    };

    for (key, value) in loaded {
        match key.as_str() {
            "caseInfo" => {
                if let Value::Object(fields) = &value {
                    state.case_info = merge_case_info(&state.case_info, fields);
                }
            }
            "parameters" => {
                if let Some(parameters) = decode_parameters(value) {
                    state.parameters = parameters;
                }
            }
            "renderStyle" => {
                if let Value::String(style) = value {
                    state.render_style = style;
                }
            }
            "freeText" => {
                if let Value::String(text) = value {
                    state.free_text = text;
                }
            }
            _ => {
                state.extra.insert(key, value);
            }
        }
    }
    state
}

/// Field-wise merge; a field in `fields` wins only when it is a string.
pub fn merge_case_info(base: &CaseInfo, fields: &Map<String, Value>) -> CaseInfo {
    let pick = |key: &str, fallback: &str| -> String {
        match fields.get(key) {
            Some(Value::String(value)) => value.clone(),
            _ => fallback.to_string(),
        }
    };
    CaseInfo {
        title: pick("title", &base.title),
        case_number: pick("caseNumber", &base.case_number),
        date: pick("date", &base.date),
    }
}

/// `Some` only for an array in which every element is a parameter.
pub fn decode_parameters(value: Value) -> Option<Vec<Parameter>> {
    if !value.is_array() {
        return None;
    }
    match serde_json::from_value::<Vec<Parameter>>(value) {
        Ok(parameters) => Some(parameters),
        Err(err) => {
            tracing::warn!(error = %err, "stored parameters are malformed; using defaults");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;
    use crate::state::default_parameters;

    #[test]
    fn empty_storage_loads_defaults() {
        let storage = MemoryStorage::new();
        assert_eq!(load_snapshot(&storage), default_state());
    }

    #[test]
    fn corrupt_storage_loads_defaults() {
        let storage = MemoryStorage::with_contents("{not json");
        assert_eq!(load_snapshot(&storage), default_state());

        let storage = MemoryStorage::with_contents("[1, 2, 3]");
        assert_eq!(load_snapshot(&storage), default_state());
    }

    #[test]
    fn partial_case_info_is_merged_per_field() {
        let state = merge_snapshot(json!({
            "caseInfo": { "title": "Robbery", "date": null }
        }));

        assert_eq!(state.case_info, CaseInfo::new("Robbery", "", ""));
        assert_eq!(state.parameters, default_parameters());
        assert_eq!(state.render_style, "Sketch");
    }

    #[test]
    fn parameters_are_replaced_wholesale() {
        let state = merge_snapshot(json!({
            "parameters": [
                { "id": "custom-1", "name": "Scar", "shades": ["None", "Visible"], "value": "Visible", "isCustom": true }
            ]
        }));

        assert_eq!(state.parameters.len(), 1);
        assert_eq!(state.parameters[0].id, "custom-1");
        assert!(state.parameters[0].is_custom);
    }

    #[test]
    fn malformed_parameters_fall_back_to_defaults() {
        let state = merge_snapshot(json!({ "parameters": "not-an-array" }));
        assert_eq!(state.parameters, default_parameters());

        let state = merge_snapshot(json!({ "parameters": [{ "id": "x" }] }));
        assert_eq!(state.parameters, default_parameters());
    }

    #[test]
    fn null_value_or_custom_flag_keeps_the_stored_list() {
        let state = merge_snapshot(json!({
            "parameters": [
                { "id": "custom-1", "name": "Scar", "shades": ["None", "Visible"], "value": "Visible", "isCustom": true },
                { "id": "custom-2", "name": "Tattoo", "shades": ["None", "Arm"], "value": null, "isCustom": null }
            ]
        }));

        let ids: Vec<&str> = state.parameters.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["custom-1", "custom-2"]);
        assert_eq!(state.parameters[1].value, "");
        assert!(!state.parameters[1].is_custom);
    }

    #[test]
    fn unknown_keys_pass_through_and_are_written_back() {
        let state = merge_snapshot(json!({
            "renderStyle": "Watercolor",
            "exportFormatVersion": 1
        }));

        assert_eq!(state.render_style, "Watercolor");
        assert_eq!(state.extra.get("exportFormatVersion"), Some(&json!(1)));

        let encoded: Value =
            serde_json::from_str(&encode_snapshot(&state).expect("encode")).expect("json");
        assert_eq!(encoded["exportFormatVersion"], json!(1));
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempdir().expect("tmpdir");
        let mut storage = FileStorage::open(dir.path().join("nested")).expect("open");
        assert_eq!(storage.read().expect("read"), None);

        let mut state = default_state();
        state.free_text = "limp on left leg".to_string();
        storage
            .write(&encode_snapshot(&state).expect("encode"))
            .expect("write");

        assert!(storage.path().ends_with("fantomAppState.json"));
        assert_eq!(load_snapshot(&storage), state);
    }

    #[test]
    fn failing_memory_storage_reports_errors() {
        let mut storage = MemoryStorage::failing();
        assert!(storage.write("{}").is_err());
        assert_eq!(storage.writes(), 0);
        assert_eq!(storage.contents(), None);
    }
}
