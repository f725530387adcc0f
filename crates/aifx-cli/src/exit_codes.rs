//! Exit codes for the `aifx` binary.
//! These codes are part of the public contract; scripts branch on them.

use aifx_container::{ContainerError, ErrorClass};

pub const SUCCESS: i32 = 0;
pub const INPUT_ERROR: i32 = 1; // Missing source file or container not found
pub const INTEGRITY_FAILED: i32 = 2; // Ledger verification reported discrepancies
pub const INVALID_CONTAINER: i32 = 3; // Not a ZIP, or a mandatory entry is missing
pub const OTHER_ERROR: i32 = 4; // Manifest parse, I/O, limits, config

/// Exit code for a library error.
pub fn for_error(err: &ContainerError) -> i32 {
    match err.class() {
        ErrorClass::Precondition => INPUT_ERROR,
        ErrorClass::Structure => INVALID_CONTAINER,
        ErrorClass::Parse | ErrorClass::Limits | ErrorClass::Io => OTHER_ERROR,
    }
}
