/// Maximum hits taken from each collection by the search aggregator
pub const SEARCH_LIMIT_PER_COLLECTION: i64 = 5;

/// Quiet period before a typed search query is sent
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Path prefix under which stored image files are served
pub const INTERNAL_FILE_PREFIX: &str = "/api/files/";

/// Stand-in slug for a missing ancestor in navigation URLs
pub const MISSING_SLUG: &str = "_";

/// Cookie carrying the admin session token
pub const ADMIN_TOKEN_COOKIE: &str = "token";
