use super::state::CaseInfo;
use super::state::Parameter;

/// Every mutation the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    SaveCaseInfo(CaseInfo),
    SaveParameters(Vec<Parameter>),
    SaveRenderStyle(String),
    SaveFreeText(String),
    ResetParameters,
    ResetAll,
    SetParameterValue {
        id: String,
        value: String,
    },
    SetParameterPosition {
        id: String,
        index: usize,
    },
    AddParameter(Parameter),
    UpdateParameter {
        id: String,
        name: String,
        shades: Vec<String>,
    },
    DeleteParameter {
        id: String,
    },
}

impl StoreAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SaveCaseInfo(_) => "SaveCaseInfo",
            Self::SaveParameters(_) => "SaveParameters",
            Self::SaveRenderStyle(_) => "SaveRenderStyle",
            Self::SaveFreeText(_) => "SaveFreeText",
            Self::ResetParameters => "ResetParameters",
            Self::ResetAll => "ResetAll",
            Self::SetParameterValue { .. } => "SetParameterValue",
            Self::SetParameterPosition { .. } => "SetParameterPosition",
            Self::AddParameter(_) => "AddParameter",
            Self::UpdateParameter { .. } => "UpdateParameter",
            Self::DeleteParameter { .. } => "DeleteParameter",
        }
    }
}

/// Which top-level aspect of the state a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeTag {
    CaseInfo,
    Parameters,
    RenderStyle,
    FreeText,
    FullReset,
}

impl ChangeTag {
    pub fn label(self) -> &'static str {
        match self {
            Self::CaseInfo => "caseInfo",
            Self::Parameters => "parameters",
            Self::RenderStyle => "renderStyle",
            Self::FreeText => "freeText",
            Self::FullReset => "fullReset",
        }
    }
}

impl std::fmt::Display for ChangeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
