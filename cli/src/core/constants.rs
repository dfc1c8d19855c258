// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Formbase";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "formbase";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".formbase";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "formbase.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "FORMBASE_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "FORMBASE_LOG";

// =============================================================================
// Environment Variables - API
// =============================================================================

/// Environment variable for the PostgREST base URL
pub const ENV_API_URL: &str = "FORMBASE_API_URL";

/// Environment variable for the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "FORMBASE_TIMEOUT_SECS";

// =============================================================================
// API Defaults
// =============================================================================

/// Default PostgREST base URL (PostgREST listens on 3000 by default)
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Path argument meaning "read from stdin"
pub const STDIN_PATH: &str = "-";
