use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    CalculationConstants, DatabaseSettings, LoggingSettings, ServerSettings, Settings,
};

/// Prefix for environment overrides, e.g. `ROI__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "ROI";

/// Loads the application configuration from `config.toml` (optional) and the
/// environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from("config.toml")
}

/// Loads the application configuration from the given file (which may be
/// absent), layered under `ROI__`-prefixed environment variables.
///
/// The result is validated before it is returned.
pub fn load_settings_from(path: &str) -> Result<Settings, ConfigError> {
    let file = config::File::with_name(path).required(false);
    build_settings(file)
}

fn build_settings<S>(file: S) -> Result<Settings, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
