/// Built-in defaults, layered below `config/settings.yaml` and the environment.
pub const DEFAULT_SETTINGS_YAML: &str = include_str!("../defaults.yaml");

/// Location of the optional settings override file, relative to the working dir.
pub const SETTINGS_PATH: &str = "config/settings.yaml";

/// Prefix for environment overrides, e.g. `APP__MODEL__ENDPOINT`.
pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";
