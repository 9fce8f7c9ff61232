//! The application state store.
//!
//! `AppStore` owns the live `AppState`. Every mutation goes through
//! [`AppStore::dispatch`]: the reducer applies it, the full state is written to
//! storage, and every listener is called in registration order with the new
//! state and a [`ChangeTag`]. A failed write is logged and does not stop the
//! notification; the in-memory state stays authoritative for the session.

use super::actions::ChangeTag;
use super::actions::StoreAction;
use super::persistence::encode_snapshot;
use super::persistence::load_snapshot;
use super::persistence::SnapshotStorage;
use super::reducer::reduce;
use super::state::is_default_parameter;
use super::state::AppState;
use super::state::CaseInfo;
use super::state::Parameter;

pub type Listener = Box<dyn FnMut(&AppState, ChangeTag)>;

/// Handle returned by [`AppStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct AppStore<S: SnapshotStorage> {
    state: AppState,
    storage: S,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl<S: SnapshotStorage + std::fmt::Debug> std::fmt::Debug for AppStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("state", &self.state)
            .field("storage", &self.storage)
            .field("listeners_count", &self.listeners.len())
            .finish()
    }
}

impl<S: SnapshotStorage> AppStore<S> {
    /// Build a store from whatever `storage` holds, or from the defaults.
    pub fn initialize(storage: S) -> Self {
        let state = load_snapshot(&storage);
        Self {
            state,
            storage,
            listeners: Vec::new(),
            next_listener_id: 1,
        }
    }

    /// Replace the working state from storage again. Listeners are kept and
    /// not notified.
    pub fn reinitialize(&mut self) {
        self.state = load_snapshot(&self.storage);
    }

    /// Current snapshot. Mutate only through the store's operations.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn case_info(&self) -> &CaseInfo {
        &self.state.case_info
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.state.parameters
    }

    pub fn render_style(&self) -> &str {
        &self.state.render_style
    }

    pub fn free_text(&self) -> &str {
        &self.state.free_text
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&AppState, ChangeTag) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id = self.next_listener_id.saturating_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when `id` was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Apply one action, persist, notify.
    ///
    /// Returns the tag listeners were notified with, or `None` when the
    /// action matched nothing; in that case nothing is written and no one is
    /// notified.
    pub fn dispatch(&mut self, action: StoreAction) -> Option<ChangeTag> {
        let name = action.name();
        let Some(tag) = reduce(&mut self.state, action) else {
            tracing::debug!(action = name, "action left state unchanged");
            return None;
        };
        tracing::debug!(action = name, tag = %tag, "action applied");
        self.persist();
        self.notify(tag);
        Some(tag)
    }

    pub fn save_case_info(&mut self, case_info: CaseInfo) {
        self.dispatch(StoreAction::SaveCaseInfo(case_info));
    }

    pub fn save_parameters(&mut self, parameters: Vec<Parameter>) {
        self.dispatch(StoreAction::SaveParameters(parameters));
    }

    pub fn save_render_style(&mut self, style: impl Into<String>) {
        self.dispatch(StoreAction::SaveRenderStyle(style.into()));
    }

    pub fn save_free_text(&mut self, text: impl Into<String>) {
        self.dispatch(StoreAction::SaveFreeText(text.into()));
    }

    /// Restore the built-in parameters; case info, style and notes stay.
    pub fn reset_parameters(&mut self) {
        self.dispatch(StoreAction::ResetParameters);
    }

    pub fn reset_all(&mut self) {
        self.dispatch(StoreAction::ResetAll);
    }

    pub fn is_default_parameter(&self, id: &str) -> bool {
        is_default_parameter(id)
    }

    pub fn set_parameter_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        self.dispatch(StoreAction::SetParameterValue {
            id: id.to_string(),
            value: value.into(),
        })
        .is_some()
    }

    pub fn set_parameter_position(&mut self, id: &str, index: usize) -> bool {
        self.dispatch(StoreAction::SetParameterPosition {
            id: id.to_string(),
            index,
        })
        .is_some()
    }

    pub fn add_parameter(&mut self, parameter: Parameter) -> bool {
        self.dispatch(StoreAction::AddParameter(parameter)).is_some()
    }

    pub fn update_parameter(&mut self, id: &str, name: String, shades: Vec<String>) -> bool {
        self.dispatch(StoreAction::UpdateParameter {
            id: id.to_string(),
            name,
            shades,
        })
        .is_some()
    }

    /// Does not check `is_default_parameter`; guarding built-ins is the
    /// caller's job.
    pub fn delete_parameter(&mut self, id: &str) -> bool {
        self.dispatch(StoreAction::DeleteParameter { id: id.to_string() })
            .is_some()
    }

    fn persist(&mut self) {
        let result =
            encode_snapshot(&self.state).and_then(|encoded| self.storage.write(&encoded));
        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to persist state; continuing in memory");
        }
    }

    fn notify(&mut self, tag: ChangeTag) {
        let state = &self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(state, tag);
        }
    }
}

#[cfg(test)]
mod tests;
