//! Compile-time build metadata
//!
//! The build script stamps each compilation with a sequence number and a
//! UTC timestamp; both surface in the startup banner.

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: &str = match option_env!("BEWELL_BUILD_NUMBER") {
    Some(s) => s,
    None => "0",
};

/// UTC timestamp of this build, ISO 8601
pub const BUILD_TIMESTAMP: &str = match option_env!("BEWELL_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!(
        "BeWell Tracker v{} (build {}, compiled {})",
        VERSION, BUILD_NUMBER, BUILD_TIMESTAMP
    );
}
