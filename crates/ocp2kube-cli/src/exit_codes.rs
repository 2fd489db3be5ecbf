//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Validation error - the resources cannot be translated together
pub const VALIDATION_ERROR: i32 = 2;

/// Input error - a source document is malformed or of the wrong kind
pub const INPUT_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Configuration error - bad settings file or pattern (sysexits.h EX_CONFIG)
pub const CONFIG_ERROR: i32 = 78;
