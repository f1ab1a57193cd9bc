use crate::{AppSettings, DEFAULT_SETTINGS_YAML, ENV_PREFIX, ENV_SEPARATOR, RawSettings, SETTINGS_PATH};
use color_eyre::eyre::Result;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Load settings from the built-in defaults, `config/settings.yaml` (if present) and
/// `APP__*` environment variables, in that order of precedence.
pub fn load_app_settings() -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite the db url from env.
    dotenv::from_path(".env").ok();
    load_settings_from(Some(Path::new(SETTINGS_PATH)))
}

/// Same as [`load_app_settings`], with an explicit override file and without `.env`.
/// A missing override file is not an error.
pub fn load_settings_from(settings_file: Option<&Path>) -> Result<AppSettings> {
    let mut builder =
        Config::builder().add_source(File::from_str(DEFAULT_SETTINGS_YAML, FileFormat::Yaml));

    if let Some(path) = settings_file {
        debug!("Layering settings from {}", path.display());
        builder = builder.add_source(File::from(path).required(false));
    }

    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    AppSettings::try_from(raw_settings)
}
