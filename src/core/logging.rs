//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g. `RUST_LOG=wizbuild=debug`
/// to see per-tick placement detail.
///
/// # Example
/// ```
/// wizbuild::core::logging::init();
/// log::info!("Build session started");
/// ```
pub fn init() {
    // A logger may already be installed (tests, embedding engine)
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}
