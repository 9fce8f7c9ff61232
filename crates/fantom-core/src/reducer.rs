use super::actions::ChangeTag;
use super::actions::StoreAction;
use super::state::default_parameters;
use super::state::default_state;
use super::state::AppState;

/// Apply `action` to `state`.
///
/// Returns the tag to notify with, or `None` when the action matched nothing
/// (unknown parameter id, out-of-range slider position, duplicate id on add)
/// and the state was left untouched.
pub fn reduce(state: &mut AppState, action: StoreAction) -> Option<ChangeTag> {
    match action {
        StoreAction::SaveCaseInfo(case_info) => {
            state.case_info = case_info;
            Some(ChangeTag::CaseInfo)
        }
        StoreAction::SaveParameters(parameters) => {
            state.parameters = parameters;
            Some(ChangeTag::Parameters)
        }
        StoreAction::SaveRenderStyle(style) => {
            state.render_style = style;
            Some(ChangeTag::RenderStyle)
        }
        StoreAction::SaveFreeText(text) => {
            state.free_text = text;
            Some(ChangeTag::FreeText)
        }
        StoreAction::ResetParameters => {
            state.parameters = default_parameters();
            Some(ChangeTag::Parameters)
        }
        StoreAction::ResetAll => {
            *state = default_state();
            Some(ChangeTag::FullReset)
        }
        StoreAction::SetParameterValue { id, value } => {
            let parameter = state.parameters.iter_mut().find(|p| p.id == id)?;
            parameter.value = value;
            Some(ChangeTag::Parameters)
        }
        StoreAction::SetParameterPosition { id, index } => {
            let parameter = state.parameters.iter_mut().find(|p| p.id == id)?;
            let shade = parameter.shades.get(index)?.clone();
            parameter.value = shade;
            Some(ChangeTag::Parameters)
        }
        StoreAction::AddParameter(parameter) => {
            if state.parameters.iter().any(|p| p.id == parameter.id) {
                tracing::warn!(id = %parameter.id, "refusing to add parameter with duplicate id");
                return None;
            }
            state.parameters.push(parameter);
            Some(ChangeTag::Parameters)
        }
        StoreAction::UpdateParameter { id, name, shades } => {
            let parameter = state.parameters.iter_mut().find(|p| p.id == id)?;
            if !shades.contains(&parameter.value) {
                parameter.value = shades.first().cloned().unwrap_or_default();
            }
            parameter.name = name;
            parameter.shades = shades;
            Some(ChangeTag::Parameters)
        }
        StoreAction::DeleteParameter { id } => {
            let before = state.parameters.len();
            state.parameters.retain(|p| p.id != id);
            (state.parameters.len() != before).then_some(ChangeTag::Parameters)
        }
    }
}
