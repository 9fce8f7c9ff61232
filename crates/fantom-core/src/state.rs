use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

pub const DEFAULT_RENDER_STYLE: &str = "Sketch";

/// Case metadata attached to a description. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseInfo {
    pub title: String,
    pub case_number: String,
    pub date: String,
}

impl CaseInfo {
    pub fn new(
        title: impl Into<String>,
        case_number: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            case_number: case_number.into(),
            date: date.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.case_number.is_empty() && self.date.is_empty()
    }
}

/// A named, enumerated trait. `shades` is ordered; the position of `value`
/// inside it is the slider position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub id: String,
    pub name: String,
    pub shades: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_false"
    )]
    pub is_custom: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppState {
    pub case_info: CaseInfo,
    pub parameters: Vec<Parameter>,
    pub render_style: String,
    pub free_text: String,
    /// Top-level keys this version does not know about. Kept so that a
    /// snapshot written by a newer build survives a load/save cycle.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AppState {
    fn default() -> Self {
        default_state()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    Sketch,
    Realistic,
    Cartoon,
    ThreeDModel,
    Painting,
}

impl RenderStyle {
    pub const ALL: [RenderStyle; 5] = [
        RenderStyle::Sketch,
        RenderStyle::Realistic,
        RenderStyle::Cartoon,
        RenderStyle::ThreeDModel,
        RenderStyle::Painting,
    ];

    /// The value stored in `AppState::render_style`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sketch => "Sketch",
            Self::Realistic => "Realistic",
            Self::Cartoon => "Cartoon",
            Self::ThreeDModel => "3D Model",
            Self::Painting => "Painting",
        }
    }

    /// Translation key for the style's display name.
    pub fn option_key(self) -> &'static str {
        match self {
            Self::Sketch => "styleSketch",
            Self::Realistic => "styleRealistic",
            Self::Cartoon => "styleCartoon",
            Self::ThreeDModel => "style3DModel",
            Self::Painting => "stylePainting",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.label().eq_ignore_ascii_case(label))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultParameterSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub shades: &'static [&'static str],
    pub value: &'static str,
}

impl DefaultParameterSpec {
    pub fn to_parameter(&self) -> Parameter {
        Parameter {
            id: self.id.to_string(),
            name: self.name.to_string(),
            shades: self.shades.iter().map(|shade| shade.to_string()).collect(),
            value: self.value.to_string(),
            is_custom: false,
        }
    }
}

pub const DEFAULT_PARAMETERS: [DefaultParameterSpec; 9] = [
    DefaultParameterSpec {
        id: "hair-length",
        name: "Hair Length",
        shades: &["Very short", "Short", "Medium", "Long", "Very long"],
        value: "Medium",
    },
    DefaultParameterSpec {
        id: "hair-color",
        name: "Hair Color",
        shades: &["Black", "Brown", "Blonde", "Red", "Gray", "White"],
        value: "Brown",
    },
    DefaultParameterSpec {
        id: "eye-color",
        name: "Eye Color",
        shades: &["Blue", "Green", "Brown", "Hazel", "Gray", "Black"],
        value: "Brown",
    },
    DefaultParameterSpec {
        id: "skin-tone",
        name: "Skin Tone",
        shades: &["Pale", "Light", "Medium", "Olive", "Dark", "Very Dark"],
        value: "Medium",
    },
    DefaultParameterSpec {
        id: "sex",
        name: "Sex",
        shades: &["Male", "Female", "Other/Unspecified"],
        value: "Male",
    },
    DefaultParameterSpec {
        id: "age",
        name: "Age",
        shades: &["Child", "Teenager", "Young Adult", "Middle-aged", "Senior"],
        value: "Young Adult",
    },
    DefaultParameterSpec {
        id: "build",
        name: "Build",
        shades: &["Slim", "Medium", "Heavy", "Muscular"],
        value: "Medium",
    },
    DefaultParameterSpec {
        id: "facial-hair",
        name: "Facial Hair",
        shades: &["None", "Moustache", "Goatee", "Short Beard", "Full Beard"],
        value: "None",
    },
    DefaultParameterSpec {
        id: "face-shape",
        name: "Face Shape",
        shades: &["Oval", "Round", "Square", "Heart", "Long"],
        value: "Oval",
    },
];

/// Fresh, owned copy of the built-in parameter set.
pub fn default_parameters() -> Vec<Parameter> {
    DEFAULT_PARAMETERS
        .iter()
        .map(DefaultParameterSpec::to_parameter)
        .collect()
}

pub fn default_state() -> AppState {
    AppState {
        case_info: CaseInfo::default(),
        parameters: default_parameters(),
        render_style: DEFAULT_RENDER_STYLE.to_string(),
        free_text: String::new(),
        extra: Map::new(),
    }
}

/// Built-in parameters cannot be deleted by the editor; this is the guard.
pub fn is_default_parameter(id: &str) -> bool {
    DEFAULT_PARAMETERS.iter().any(|spec| spec.id == id)
}
