//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Storefront
// =============================================================================

/// Name shown in the page header and title
pub const SITE_NAME: &str = "Delícias da Fa";

/// Number of products shown on the home page
pub const FEATURED_PRODUCTS_LIMIT: u64 = 3;

// =============================================================================
// Authentication & Sessions
// =============================================================================

/// Default session lifetime in hours
pub const DEFAULT_SESSION_EXPIRATION_HOURS: i64 = 24;

/// Minimum session signing secret length (security requirement)
pub const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "session";

/// Cookie carrying the one-shot flash message code
pub const FLASH_COOKIE: &str = "flash";

/// Username of the bootstrap administrator
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Bootstrap administrator password, meant to be changed after deploy
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://site.db?mode=rwc";

// =============================================================================
// Uploads
// =============================================================================

/// Directory holding uploaded product images
pub const DEFAULT_UPLOAD_DIR: &str = "static/uploads";

/// Directory served under `/static`
pub const STATIC_DIR: &str = "static";

/// Maximum accepted upload size (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Image extensions accepted by the upload form
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Placeholder that keeps the upload directory in version control
pub const UPLOAD_DIR_KEEPER: &str = ".gitkeep";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;
