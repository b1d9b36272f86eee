//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success, no address mismatches                       |
//! | 1    | Run completed, at least one device has a mismatch    |
//! | 2    | CLI usage error (bad args)                           |
//! | 3    | Invalid config (parse or validation)                 |
//! | 4    | Input error (unreadable file, missing column, etc.)  |
//! | 5    | Output error (cannot write report)                   |

use addrcheck_recon::ReconError;

/// Success - command completed, nothing to report.
pub const EXIT_SUCCESS: u8 = 0;

/// Mismatches found. Like `diff(1)`, exit 1 means "sources differ."
pub const EXIT_MISMATCH: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Input file unreadable, malformed CSV, missing column, malformed record.
pub const EXIT_INPUT: u8 = 4;

/// Report could not be written.
pub const EXIT_OUTPUT: u8 = 5;

/// Map a ReconError to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ReconError::MissingColumn { .. }
        | ReconError::Csv { .. }
        | ReconError::MalformedRecord { .. }
        | ReconError::Io(_) => EXIT_INPUT,
    }
}
