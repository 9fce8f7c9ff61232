use std::cell::RefCell;
use std::rc::Rc;

pub(super) use super::AppStore;
pub(super) use crate::actions::ChangeTag;
pub(super) use crate::persistence::encode_snapshot;
pub(super) use crate::persistence::MemoryStorage;
pub(super) use crate::state::default_parameters;
pub(super) use crate::state::default_state;
pub(super) use crate::state::AppState;
pub(super) use crate::state::CaseInfo;
pub(super) use crate::state::Parameter;

mod initialize;
mod parameter_edits;

type Seen = Rc<RefCell<Vec<(ChangeTag, AppState)>>>;

fn store() -> AppStore<MemoryStorage> {
    AppStore::initialize(MemoryStorage::new())
}

/// Subscribe a listener that records every notification it receives.
fn record(store: &mut AppStore<MemoryStorage>) -> Seen {
    let seen: Seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |state, tag| sink.borrow_mut().push((tag, state.clone())));
    seen
}

fn tags(seen: &Seen) -> Vec<ChangeTag> {
    seen.borrow().iter().map(|(tag, _)| *tag).collect()
}

fn scar() -> Parameter {
    Parameter {
        id: "custom-1".to_string(),
        name: "Scar".to_string(),
        shades: vec!["None".to_string(), "Visible".to_string()],
        value: "Visible".to_string(),
        is_custom: true,
    }
}

fn informant() -> CaseInfo {
    CaseInfo::new("The informant", "C-123", "2024-01-01")
}
