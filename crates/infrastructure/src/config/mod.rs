//! Loading settings and suites from disk.

mod error;
mod settings;
mod suite;

pub use error::ConfigError;
pub use settings::{
    ENV_DEFAULT_MAX_RESPONSE_MS, ENV_DEFAULT_STATUS, ENV_DESCRIPTION_VARIABLE, ENV_MATCH_MODE,
    SettingsLoader,
};
pub use suite::SuiteLoader;
