pub mod actions;
pub mod config;
pub mod error;
pub mod i18n;
pub mod import_export;
pub mod parameters;
pub mod persistence;
pub mod prompt;
pub mod reducer;
pub mod state;
pub mod store;

pub use actions::*;
pub use error::*;
pub use i18n::*;
pub use prompt::*;
pub use reducer::*;
pub use state::*;
pub use store::*;

pub use persistence::*;
