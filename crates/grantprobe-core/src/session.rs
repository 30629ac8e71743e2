//! Session validation.

use tracing::{debug, error};

use crate::api::StorageApi;

/// Check that the invoking credentials are usable.
///
/// Issues one identity call. Never fails: any error is logged and reported
/// as `false`. Not retried, since a credential failure is assumed to last
/// for the life of the process.
pub async fn validate_session(api: &dyn StorageApi) -> bool {
    match api.caller_identity().await {
        Ok(identity) => {
            debug!(
                account = identity.account.as_deref().unwrap_or("-"),
                arn = identity.arn.as_deref().unwrap_or("-"),
                "session validated"
            );
            true
        }
        Err(e) => {
            error!(error = %e, "error checking AWS credentials");
            false
        }
    }
}
