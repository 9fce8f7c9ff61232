use std::env;
use std::io;

use chrono::Local;
use fantom_core::i18n::Language;
use fantom_core::persistence::FileStorage;
use fantom_core::store::AppStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod settings;

use commands::parse_args;
use commands::translations_for;
use commands::Session;

const LOG_ENV: &str = "FANTOM_LOG";

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);
    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    match args.first().map(String::as_str) {
        Some("--help" | "-h" | "help") => {
            print_help();
            return Ok(());
        }
        Some("--version" | "-V" | "version") => {
            println!("fantom {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let invocation = parse_args(args)?;
    let Some(command) = invocation.command else {
        print_help();
        return Ok(());
    };

    let mut config = settings::load_config()?;
    if let Some(code) = invocation.lang.as_deref() {
        config.language = Language::resolve(code);
    }
    if let Some(dir) = invocation.data_dir {
        config.data_dir = Some(dir);
    }

    let data_dir = settings::data_dir(&config);
    let storage = FileStorage::open(&data_dir)?;
    tracing::debug!(path = %storage.path().display(), "using snapshot file");

    let mut store = AppStore::initialize(storage);
    store.subscribe(|_, tag| tracing::info!(change = %tag, "state saved"));

    let translations = translations_for(&config, config.language);
    let mut session = Session {
        store,
        translations,
        config,
        config_path: settings::config_path(),
        today: Local::now().date_naive(),
    };
    let stdout = io::stdout();
    session.execute(command, &mut stdout.lock())
}

fn print_help() {
    println!(
        "fantom {}

Describe a subject's traits and generate a composite sketch prompt.

Usage: fantom [--lang <code>] [--data-dir <dir>] <command> [args]

Commands:
  show                                  Print the current state as JSON
  prompt                                Print the generated prompt
  copy                                  Copy the generated prompt to the clipboard
  params                                List parameters and their current shades
  case [--title T] [--number N] [--date D]
                                        Update case information
  style <name>                          Sketch, Realistic, Cartoon, 3D Model or Painting;
                                        other names are kept and render as Sketch
  notes [text...]                       Replace the free-text notes
  set <id> <shade>                      Select a shade by name
  set <id> --position <n>               Select a shade by index (0-based)
  add-param <name> <shades>             Add a custom parameter; shades are comma-separated
  edit-param <id> <name> <shades>       Rename or reshade a parameter
  delete-param <id>                     Delete a custom parameter
  reset-params                          Restore the default parameters
  reset                                 Restore everything to defaults
  export [--out <dir>]                  Write the state as a JSON case record
  export-txt [--out <dir>]              Write the prompt as a text file
  import <file>                         Load a JSON case record
  languages                             List interface languages
  lang <code>                           Switch and remember the interface language

Environment:
  FANTOM_DATA_DIR                       Where the state snapshot is kept
  FANTOM_LOG                            Log filter (default: warn)",
        env!("CARGO_PKG_VERSION")
    );
}
