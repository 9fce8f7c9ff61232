//! Validation and id helpers for the parameter editor.

use super::error::ParameterError;
use super::state::Parameter;

/// Split a comma-separated shade list, trimming and dropping empty entries.
pub fn parse_shades(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|shade| !shade.is_empty())
        .map(str::to_string)
        .collect()
}

/// What the operator typed into the add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDraft {
    pub name: String,
    pub shades: Vec<String>,
}

impl ParameterDraft {
    pub fn new(name: &str, shades: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            shades: parse_shades(shades),
        }
    }

    /// `editing_id` is the parameter being edited, which may keep its own
    /// name.
    pub fn validate(
        &self,
        existing: &[Parameter],
        editing_id: Option<&str>,
    ) -> Result<(), ParameterError> {
        if self.name.is_empty() {
            return Err(ParameterError::EmptyName);
        }
        if self.shades.is_empty() {
            return Err(ParameterError::NoShades);
        }
        let clash = existing.iter().any(|p| {
            p.name.to_lowercase() == self.name.to_lowercase() && Some(p.id.as_str()) != editing_id
        });
        if clash {
            return Err(ParameterError::DuplicateName(self.name.clone()));
        }
        Ok(())
    }

    /// Validate and build a new custom parameter with a unique slug id.
    pub fn into_custom(self, existing: &[Parameter]) -> Result<Parameter, ParameterError> {
        self.validate(existing, None)?;
        let id = slug_id(&self.name, existing);
        Ok(Parameter::custom(id, self.name, self.shades))
    }
}

/// Lower-case slug of `name`, suffixed until it collides with no existing id.
pub fn slug_id(name: &str, existing: &[Parameter]) -> String {
    let slug = slugify(name);
    let base = if slug.is_empty() { "custom" } else { &slug };
    let taken = |id: &str| existing.iter().any(|p| p.id == id);
    if !taken(base) {
        return base.to_string();
    }
    let mut suffix = 2usize;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Runs of anything outside `[a-z0-9]` become one `-`; none at either end.
fn slugify(name: &str) -> String {
    let mut slug = String::new();
    let mut gap = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.push(c);
        } else {
            gap = true;
        }
    }
    slug
}

pub fn find_parameter<'a>(parameters: &'a [Parameter], id: &str) -> Option<&'a Parameter> {
    parameters.iter().find(|p| p.id == id)
}

impl Parameter {
    /// User-added parameter starting at its first shade.
    pub fn custom(id: String, name: String, shades: Vec<String>) -> Self {
        let value = shades.first().cloned().unwrap_or_default();
        Self {
            id,
            name,
            shades,
            value,
            is_custom: true,
        }
    }

    /// Slider position of the current value.
    pub fn position(&self) -> Option<usize> {
        self.shades.iter().position(|shade| *shade == self.value)
    }

    pub fn shade_at(&self, index: usize) -> Option<&str> {
        self.shades.get(index).map(String::as_str)
    }
}
