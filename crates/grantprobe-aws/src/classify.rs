//! SDK error classification.

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use grantprobe_core::ApiError;
use grantprobe_core::api::{HeadBucketOutcome, PutAclOutcome, is_unresolvable_grant};

/// Extract code and message from an SDK error.
///
/// Service errors keep their code; transport and construction failures only
/// carry the rendered error chain.
pub(crate) fn api_error<E>(err: &SdkError<E, HttpResponse>) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let rendered = || DisplayErrorContext(err).to_string();
    match err.as_service_error() {
        Some(service) => ApiError {
            code: service.code().map(ToOwned::to_owned),
            message: service.message().map_or_else(rendered, ToOwned::to_owned),
        },
        None => ApiError::local(rendered()),
    }
}

/// HTTP status of the raw response, if one was received.
pub(crate) fn http_status<E>(err: &SdkError<E, HttpResponse>) -> Option<u16> {
    err.raw_response().map(|r| r.status().as_u16())
}

/// Classify a failed `HeadBucket`.
///
/// `HEAD` responses have no body, so the status code is all there is to go
/// on.
pub(crate) fn classify_head(
    status: Option<u16>,
    not_found: bool,
    err: ApiError,
) -> HeadBucketOutcome {
    if not_found {
        return HeadBucketOutcome::NotFound;
    }
    match status {
        Some(404) => HeadBucketOutcome::NotFound,
        Some(403) => HeadBucketOutcome::Forbidden,
        _ => HeadBucketOutcome::Failed(err),
    }
}

/// Classify a failed `PutBucketAcl`.
pub(crate) fn classify_put_acl(err: ApiError) -> PutAclOutcome {
    if is_unresolvable_grant(err.code.as_deref(), &err.message) {
        PutAclOutcome::UnresolvableGrantee
    } else {
        PutAclOutcome::Failed(err)
    }
}
