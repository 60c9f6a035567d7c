/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema version of the JSON check report.
/// Bump this when changing the report shape in a breaking way.
pub const REPORT_SCHEMA_VERSION: u32 = 1;
