//! Export settings: file loading, validation and command-line overrides.
mod loader;
mod manager;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    DEFAULT_ENCODING,
    ExportSettings,
    SettingsOverrides,
    ValidationError,
};
