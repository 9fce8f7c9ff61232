//! Prompt text derived from a state snapshot.
//!
//! `generate_prompt` is a pure projection: the same state and the same
//! translation table always give byte-identical output.

use super::i18n::Translator;
use super::state::AppState;
use super::state::CaseInfo;
use super::state::DEFAULT_RENDER_STYLE;

const CASE_HEADER_KEY: &str = "prompt.caseInfoHeader";
const CASE_TITLE_KEY: &str = "prompt.caseTitleLabel";
const CASE_NUMBER_KEY: &str = "prompt.caseNumberLabel";
const CASE_DATE_KEY: &str = "prompt.caseDateLabel";

pub fn generate_prompt(state: &AppState, translator: &dyn Translator) -> String {
    let (prefix, keywords) = style_phrases(&state.render_style, translator);
    let mut fragments = vec![prefix, keywords];

    fragments.extend(
        state
            .parameters
            .iter()
            .map(|p| format!("{}: {}", translator.t(&p.name), translator.t(&p.value))),
    );

    let notes = state.free_text.trim();
    if !notes.is_empty() {
        fragments.push(notes.to_string());
    }

    fragments.retain(|fragment| !fragment.is_empty());
    let mut prompt = fragments.join(", ");
    prompt.push('.');

    if let Some(block) = case_block(&state.case_info, translator) {
        prompt.push_str("\n\n");
        prompt.push_str(&block);
    }
    prompt
}

/// Prefix and keyword phrases for `render_style`. Empty styles mean Sketch.
/// Each phrase the style's table lacks is taken from Sketch on its own.
pub fn style_phrases(render_style: &str, translator: &dyn Translator) -> (String, String) {
    let style = match render_style.trim() {
        "" => DEFAULT_RENDER_STYLE,
        style => style,
    };
    let phrase = |part: &str| match translator.lookup(&style_key(style, part)) {
        Some(text) => text.to_string(),
        None => translator.t(&style_key(DEFAULT_RENDER_STYLE, part)),
    };
    (phrase("prefix"), phrase("keywords"))
}

fn style_key(style: &str, part: &str) -> String {
    format!("style.{style}.{part}")
}

/// Header plus one line per non-empty field, or `None` when all are empty.
pub fn case_block(case_info: &CaseInfo, translator: &dyn Translator) -> Option<String> {
    if case_info.is_empty() {
        return None;
    }
    let mut lines = vec![translator.t(CASE_HEADER_KEY)];
    let fields = [
        (CASE_TITLE_KEY, &case_info.title),
        (CASE_NUMBER_KEY, &case_info.case_number),
        (CASE_DATE_KEY, &case_info.date),
    ];
    for (label_key, value) in fields {
        if !value.is_empty() {
            lines.push(format!("{}: {}", translator.t(label_key), value));
        }
    }
    Some(lines.join("\n"))
}
