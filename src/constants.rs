//! Application-wide constants.
//!
//! Names, environment variables, and on-disk layout conventions shared by
//! the library and the CLI.

/// The display name of the application.
pub const APP_NAME: &str = "Programmable Palette Renderer";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "ppr";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "PPR_CONFIG_DIR";

/// Name of the session config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Subdirectory of the output root holding named and timestamped variants.
pub const VARIANTS_DIR: &str = "ppr";

/// File name of the canonical "last generated" image.
pub const CURRENT_IMAGE: &str = "current.png";

/// Prefix of cache-busting wallpaper copies.
pub const TEMP_COPY_PREFIX: &str = "current_temp";

/// Timestamp format used in output file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Sentinel entry in `preferred_templates` meaning "every template on disk".
pub const ALL_TEMPLATES: &str = "all";
