/// State key holding the ledger as a JSON array
pub const CUSTOM_ASSETS_KEY: &str = "customAssets";

/// State key holding the project registry as a JSON object keyed by name
pub const PROJECTS_KEY: &str = "projects";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Upper bound for a project's token percentage
pub const MAX_TOKEN_PERCENT: u32 = 100;
