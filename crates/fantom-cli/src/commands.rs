use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use chrono::NaiveDate;
use fantom_core::config::Config;
use fantom_core::error::ParameterError;
use fantom_core::i18n::Language;
use fantom_core::i18n::Translations;
use fantom_core::i18n::Translator;
use fantom_core::import_export::export_file_name;
use fantom_core::import_export::export_json;
use fantom_core::import_export::export_text;
use fantom_core::import_export::import_json;
use fantom_core::import_export::ExportKind;
use fantom_core::parameters::find_parameter;
use fantom_core::parameters::ParameterDraft;
use fantom_core::persistence::SnapshotStorage;
use fantom_core::prompt::generate_prompt;
use fantom_core::state::RenderStyle;
use fantom_core::store::AppStore;

use crate::settings;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetTarget {
    Value(String),
    Position(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Prompt,
    Copy,
    Params,
    Case {
        title: Option<String>,
        number: Option<String>,
        date: Option<String>,
    },
    Style(String),
    Notes(String),
    Set {
        id: String,
        target: SetTarget,
    },
    AddParam {
        name: String,
        shades: String,
    },
    EditParam {
        id: String,
        name: String,
        shades: String,
    },
    DeleteParam {
        id: String,
    },
    ResetParams,
    Reset,
    Export {
        out: Option<PathBuf>,
    },
    ExportTxt {
        out: Option<PathBuf>,
    },
    Import {
        path: PathBuf,
    },
    Languages,
    Lang(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub lang: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub command: Option<Command>,
}

pub fn parse_args(args: Vec<String>) -> Result<Invocation, String> {
    let mut lang = None;
    let mut data_dir = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--lang" => {
                lang = Some(option_value(&args, i, "--lang")?.to_string());
                i += 2;
            }
            "--data-dir" => {
                data_dir = Some(PathBuf::from(option_value(&args, i, "--data-dir")?));
                i += 2;
            }
            _ => break,
        }
    }
    let rest = args[i..].to_vec();
    let command = match rest.split_first() {
        None => None,
        Some((name, tail)) => Some(parse_command(name, tail)?),
    };
    Ok(Invocation {
        lang,
        data_dir,
        command,
    })
}

fn option_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_command(name: &str, args: &[String]) -> Result<Command, String> {
    let command = match name {
        "show" => Command::Show,
        "prompt" => Command::Prompt,
        "copy" => Command::Copy,
        "params" => Command::Params,
        "languages" => Command::Languages,
        "lang" => Command::Lang(required(args, 0, "language code")?.to_string()),
        "reset-params" => Command::ResetParams,
        "reset" => Command::Reset,
        "case" => parse_case(args)?,
        "style" => Command::Style(required(args, 0, "style name")?.to_string()),
        "notes" => Command::Notes(args.join(" ")),
        "set" => {
            let id = required(args, 0, "parameter id")?.to_string();
            let target = match args.get(1).map(String::as_str) {
                Some("--position") => {
                    let raw = required(args, 2, "position")?;
                    let index = raw
                        .parse::<usize>()
                        .map_err(|_| format!("invalid position: {raw}"))?;
                    SetTarget::Position(index)
                }
                Some(value) => SetTarget::Value(value.to_string()),
                None => return Err("set requires a value or --position <n>".to_string()),
            };
            Command::Set { id, target }
        }
        "add-param" => Command::AddParam {
            name: required(args, 0, "name")?.to_string(),
            shades: required(args, 1, "comma-separated shades")?.to_string(),
        },
        "edit-param" => Command::EditParam {
            id: required(args, 0, "parameter id")?.to_string(),
            name: required(args, 1, "name")?.to_string(),
            shades: required(args, 2, "comma-separated shades")?.to_string(),
        },
        "delete-param" => Command::DeleteParam {
            id: required(args, 0, "parameter id")?.to_string(),
        },
        "export" => Command::Export {
            out: parse_out(args)?,
        },
        "export-txt" => Command::ExportTxt {
            out: parse_out(args)?,
        },
        "import" => Command::Import {
            path: PathBuf::from(required(args, 0, "file")?),
        },
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(command)
}

fn required<'a>(args: &'a [String], index: usize, what: &str) -> Result<&'a str, String> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("missing {what}"))
}

fn parse_case(args: &[String]) -> Result<Command, String> {
    let mut title = None;
    let mut number = None;
    let mut date = None;
    let mut i = 0;
    while i < args.len() {
        let value = Some(option_value(args, i, &args[i])?.to_string());
        match args[i].as_str() {
            "--title" => title = value,
            "--number" => number = value,
            "--date" => date = value,
            other => return Err(format!("unsupported argument: {other}")),
        }
        i += 2;
    }
    Ok(Command::Case {
        title,
        number,
        date,
    })
}

fn parse_out(args: &[String]) -> Result<Option<PathBuf>, String> {
    match args {
        [] => Ok(None),
        [flag, dir] if flag == "--out" => Ok(Some(PathBuf::from(dir))),
        _ => Err("expected --out <dir>".to_string()),
    }
}

/// Everything a command needs: the store, the active strings, the config and
/// today's date for export file names. `config_path` is where `lang` saves
/// the chosen language; `None` keeps the choice for this run only.
pub struct Session<S: SnapshotStorage> {
    pub store: AppStore<S>,
    pub translations: Translations,
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub today: NaiveDate,
}

impl<S: SnapshotStorage> Session<S> {
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> CliResult<()> {
        match command {
            Command::Show => {
                let json = export_json(self.store.state(), false)?;
                writeln!(out, "{json}")?;
            }
            Command::Prompt => {
                writeln!(out, "{}", self.prompt())?;
            }
            Command::Copy => {
                let prompt = self.prompt();
                let mut clipboard = arboard::Clipboard::new()
                    .map_err(|err| format!("{} {err}", self.translations.t("copyError")))?;
                clipboard
                    .set_text(prompt)
                    .map_err(|err| format!("{} {err}", self.translations.t("copyError")))?;
                writeln!(out, "{}", self.translations.t("copySuccess"))?;
            }
            Command::Params => self.list_parameters(out)?,
            Command::Languages => {
                for lang in Language::ALL {
                    let marker = if lang == self.translations.language() {
                        "*"
                    } else {
                        " "
                    };
                    writeln!(out, "{marker} {} {}", lang.code(), lang.label())?;
                }
            }
            Command::Case {
                title,
                number,
                date,
            } => {
                let mut case_info = self.store.case_info().clone();
                if let Some(title) = title {
                    case_info.title = title;
                }
                if let Some(number) = number {
                    case_info.case_number = number;
                }
                if let Some(date) = date {
                    case_info.date = date;
                }
                self.store.save_case_info(case_info);
            }
            Command::Style(style) => {
                let t = &self.translations;
                let (stored, message) = match RenderStyle::from_label(&style) {
                    Some(known) => {
                        let name = t.t(known.option_key());
                        let message = t.t_with("renderStyleSaved", &[("style", name.as_str())]);
                        (known.label().to_string(), message)
                    }
                    None => {
                        tracing::warn!(style = %style, "unknown render style");
                        let styles = RenderStyle::ALL
                            .iter()
                            .map(|known| t.t(known.option_key()))
                            .collect::<Vec<_>>()
                            .join(", ");
                        let message = t.t_with(
                            "renderStyleUnknown",
                            &[("style", style.as_str()), ("styles", styles.as_str())],
                        );
                        (style, message)
                    }
                };
                self.store.save_render_style(stored);
                writeln!(out, "{message}")?;
            }
            Command::Lang(code) => {
                let language = Language::from_code(&code).ok_or_else(|| {
                    let codes = Language::ALL.map(Language::code).join(", ");
                    format!("unsupported language: {code} (expected one of: {codes})")
                })?;
                if let Some(path) = &self.config_path {
                    let mut stored = settings::load_config_from(path)?;
                    stored.language = language;
                    settings::save_config_to(path, &stored)?;
                }
                self.config.language = language;
                self.translations = translations_for(&self.config, language);
                writeln!(
                    out,
                    "{}",
                    self.translations
                        .t_with("languageSaved", &[("language", language.label())])
                )?;
            }
            Command::Notes(text) => self.store.save_free_text(text),
            Command::Set { id, target } => self.set_parameter(&id, target)?,
            Command::AddParam { name, shades } => {
                let draft = ParameterDraft::new(&name, &shades);
                let parameter = draft
                    .into_custom(self.store.parameters())
                    .map_err(|err| self.parameter_message(err))?;
                let id = parameter.id.clone();
                self.store.add_parameter(parameter);
                writeln!(out, "{} ({id})", self.translations.t("parameterSaved"))?;
            }
            Command::EditParam { id, name, shades } => {
                if find_parameter(self.store.parameters(), &id).is_none() {
                    return Err(self.parameter_message(ParameterError::NotFound(id)).into());
                }
                let draft = ParameterDraft::new(&name, &shades);
                draft
                    .validate(self.store.parameters(), Some(&id))
                    .map_err(|err| self.parameter_message(err))?;
                self.store.update_parameter(&id, draft.name, draft.shades);
                writeln!(out, "{}", self.translations.t("parameterSaved"))?;
            }
            Command::DeleteParam { id } => {
                if self.store.is_default_parameter(&id) {
                    return Err(self
                        .parameter_message(ParameterError::DefaultProtected(id))
                        .into());
                }
                if !self.store.delete_parameter(&id) {
                    return Err(self.parameter_message(ParameterError::NotFound(id)).into());
                }
                writeln!(out, "{}", self.translations.t("parameterDeleted"))?;
            }
            Command::ResetParams => {
                self.store.reset_parameters();
                writeln!(out, "{}", self.translations.t("resetParamsDone"))?;
            }
            Command::Reset => {
                self.store.reset_all();
                writeln!(out, "{}", self.translations.t("resetAllDone"))?;
            }
            Command::Export { out: dir } => {
                let json = export_json(
                    self.store.state(),
                    self.config.export.include_format_version,
                )
                .map_err(|err| format!("{} {err}", self.translations.t("exportError")))?;
                let path = self.export_path(dir.as_deref(), ExportKind::Json)?;
                fs::write(&path, json)?;
                writeln!(
                    out,
                    "{} {}",
                    self.translations.t("exportSuccess"),
                    path.display()
                )?;
            }
            Command::ExportTxt { out: dir } => {
                let text = export_text(self.store.state(), &self.translations);
                let path = self.export_path(dir.as_deref(), ExportKind::Text)?;
                fs::write(&path, text)?;
                writeln!(
                    out,
                    "{} {}",
                    self.translations.t("exportSuccess"),
                    path.display()
                )?;
            }
            Command::Import { path } => {
                let raw = fs::read_to_string(&path)
                    .map_err(|err| format!("{} {err}", self.translations.t("importFileReadError")))?;
                import_json(&mut self.store, &raw)
                    .map_err(|err| format!("{} {err}", self.translations.t("importError")))?;
                writeln!(out, "{}", self.translations.t("importSuccess"))?;
            }
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        generate_prompt(self.store.state(), &self.translations)
    }

    fn list_parameters<W: Write>(&self, out: &mut W) -> CliResult<()> {
        for parameter in self.store.parameters() {
            let position = parameter
                .position()
                .map(|index| format!("{}/{}", index + 1, parameter.shades.len()))
                .unwrap_or_else(|| "-".to_string());
            let kind = if self.store.is_default_parameter(&parameter.id) {
                "default"
            } else {
                "custom"
            };
            writeln!(
                out,
                "{:<16} {:<20} {:<20} {:>5}  {kind}",
                parameter.id,
                self.translations.t(&parameter.name),
                self.translations.t(&parameter.value),
                position
            )?;
        }
        Ok(())
    }

    fn set_parameter(&mut self, id: &str, target: SetTarget) -> CliResult<()> {
        let Some(parameter) = find_parameter(self.store.parameters(), id) else {
            return Err(self
                .parameter_message(ParameterError::NotFound(id.to_string()))
                .into());
        };
        let index = match target {
            SetTarget::Position(index) => index,
            SetTarget::Value(value) => parameter
                .shades
                .iter()
                .position(|shade| shade.eq_ignore_ascii_case(&value))
                .ok_or_else(|| {
                    format!(
                        "\"{value}\" is not a shade of {id}; expected one of: {}",
                        parameter.shades.join(", ")
                    )
                })?,
        };
        if !self.store.set_parameter_position(id, index) {
            return Err(ParameterError::PositionOutOfRange {
                id: id.to_string(),
                index,
            }
            .into());
        }
        Ok(())
    }

    fn parameter_message(&self, err: ParameterError) -> String {
        let t = &self.translations;
        match err {
            ParameterError::EmptyName | ParameterError::NoShades => t.t("validationRequired"),
            ParameterError::DuplicateName(name) => {
                t.t_with("parameterNameExists", &[("name", name.as_str())])
            }
            ParameterError::NotFound(id) => format!("{} ({id})", t.t("parameterNotFound")),
            ParameterError::DefaultProtected(_) => t.t("cannotDeleteDefault"),
            other => other.to_string(),
        }
    }

    fn export_path(&self, dir: Option<&Path>, kind: ExportKind) -> CliResult<PathBuf> {
        let name = export_file_name(self.store.case_info(), self.today, kind);
        let dir = dir.unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        Ok(dir.join(name))
    }
}

pub fn translations_for(config: &Config, language: Language) -> Translations {
    match &config.translations_dir {
        Some(dir) => Translations::load_or_builtin(dir, language),
        None => Translations::builtin(language),
    }
}
