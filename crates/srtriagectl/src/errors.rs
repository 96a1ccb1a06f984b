//! Exit codes for srtriagectl

use crate::client::ClientError;
use srtriage_common::TriageError;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when a classifier model cannot be loaded (EX_UNAVAILABLE)
pub const EXIT_CLASSIFIER_UNAVAILABLE: i32 = 69;

/// Exit code when the daemon is unavailable/unreachable
pub const EXIT_DAEMON_UNAVAILABLE: i32 = 70;

/// Pick the exit code for a failed command from anywhere in its cause chain
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(TriageError::ClassifierUnavailable { .. }) = cause.downcast_ref::<TriageError>()
        {
            return EXIT_CLASSIFIER_UNAVAILABLE;
        }
        if let Some(ClientError::Unreachable { .. }) = cause.downcast_ref::<ClientError>() {
            return EXIT_DAEMON_UNAVAILABLE;
        }
    }
    EXIT_GENERAL_ERROR
}
