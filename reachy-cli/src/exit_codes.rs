//! Process exit codes shared by every subcommand.

pub const SUCCESS: i32 = 0;
/// Bad catalog or malformed request.
pub const VALIDATION_FAILED: i32 = 2;
/// Dispatch ran but at least one step failed.
pub const RUN_FAILED: i32 = 3;
pub const RUNTIME_ERROR: i32 = 4;
