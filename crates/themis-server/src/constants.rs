//! Server constants

/// Body of 403 responses
pub const FORBIDDEN_MESSAGE: &str = "Invalid or missing API key";

/// Body of 400 responses Rocket raises before a handler runs
pub const BAD_REQUEST_MESSAGE: &str = "Malformed request body";

/// Body of 400 responses for well-formed JSON with mistyped fields
pub const INVALID_FIELDS_MESSAGE: &str = "Request body does not match the expected schema";

/// Body of 404 responses for unknown routes
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Body of 500 responses
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// `status` of a healthy service
pub const HEALTH_OK: &str = "ok";

/// `status` when the store cannot be read
pub const HEALTH_DEGRADED: &str = "degraded";
