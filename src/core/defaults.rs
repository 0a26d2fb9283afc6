//! Fixed defaults for the stripper.
//!
//! There is no config file and no environment lookup. The CLI exposes
//! overrides for tests and one-off runs; these constants are the baseline.

/// Directory scanned when no --path override is given.
pub const UI_COMPONENTS_DIR: &str = "src/components/ui";

/// Filename suffix a directory entry must carry to be processed.
pub const CANDIDATE_EXTENSION: &str = ".tsx";
