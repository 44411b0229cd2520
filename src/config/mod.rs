//! Service configuration.

mod settings;

pub use settings::{ExecuteSettings, SearchSettings, Settings, SettingsError};
