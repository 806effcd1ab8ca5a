//! Shared helpers used by the library and the CLI

/// Returns the current version of the `advising-assistant` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
