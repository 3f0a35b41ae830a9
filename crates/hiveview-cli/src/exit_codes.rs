//! Exit codes for the hiveview CLI.
//! Fetch failures use the same numbering as `ViewerError::exit_code`.

use hiveview_client::ViewerError;

pub const SUCCESS: i32 = 0;
pub const NOT_FOUND: i32 = 1; // No runs, unknown directory, group or card
pub const CONFIG_ERROR: i32 = 2; // Bad arguments or configuration
pub const DATA_ERROR: i32 = 3; // Malformed discovery, listing or suite document
pub const NETWORK_ERROR: i32 = 4; // HTTP or transport failure

/// Exit code for a failed command.
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ViewerError>() {
        Some(ViewerError::NotFound { .. }) => NOT_FOUND,
        Some(ViewerError::Config { .. } | ViewerError::InvalidRange { .. }) => CONFIG_ERROR,
        Some(ViewerError::Parse { .. }) => DATA_ERROR,
        Some(_) => NETWORK_ERROR,
        None => CONFIG_ERROR,
    }
}
