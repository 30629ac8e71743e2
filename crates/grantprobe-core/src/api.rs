//! The object-storage collaborator.
//!
//! [`StorageApi`] exposes exactly the calls the protocol needs. Each call
//! returns a closed outcome type instead of an opaque error, so the
//! provisioner and prober classify results with a total `match`.
//!
//! # Object safety
//!
//! The trait uses `#[async_trait]` so components can take `&dyn StorageApi`.

use async_trait::async_trait;

use crate::acl::{AccessControlPolicy, PublicAccessBlock};
use crate::error::ApiError;
use crate::types::{AwsRegion, BucketName};

/// Service error code S3 returns when an email grantee has no account.
///
/// This is external, unversioned service text; [`is_unresolvable_grant`] is
/// the single place that matches it.
pub const UNRESOLVABLE_GRANT_CODE: &str = "UnresolvableGrantByEmailAddress";

/// Whether a failed ACL publish means "no account for this email".
///
/// Matches the service error code first. Some transports only surface the
/// rendered error text, so the code is also looked for as a substring of the
/// message.
///
/// # Examples
///
/// ```
/// use grantprobe_core::api::is_unresolvable_grant;
///
/// assert!(is_unresolvable_grant(Some("UnresolvableGrantByEmailAddress"), ""));
/// assert!(is_unresolvable_grant(None, "service error: UnresolvableGrantByEmailAddress"));
/// assert!(!is_unresolvable_grant(Some("AccessDenied"), "Access Denied"));
/// ```
#[must_use]
pub fn is_unresolvable_grant(code: Option<&str>, message: &str) -> bool {
    code == Some(UNRESOLVABLE_GRANT_CODE) || message.contains(UNRESOLVABLE_GRANT_CODE)
}

/// Identity of the invoking credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Account ID.
    pub account: Option<String>,
    /// Principal ARN.
    pub arn: Option<String>,
    /// Unique principal ID.
    pub user_id: Option<String>,
}

/// Result of a bucket existence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadBucketOutcome {
    /// The bucket exists and the caller can reach it.
    Found,
    /// No bucket with that name exists.
    NotFound,
    /// The bucket exists but the caller may not access it.
    Forbidden,
    /// Any other failure.
    Failed(ApiError),
}

/// Parameters of a bucket creation call.
///
/// Probe buckets are always created with `ObjectWriter` ownership and the
/// `private` canned ACL, so only the location varies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBucketRequest {
    /// Explicit location constraint; `None` for the default region.
    pub location_constraint: Option<AwsRegion>,
}

impl CreateBucketRequest {
    /// The creation request for a probe bucket in `region`.
    ///
    /// S3 rejects an explicit location constraint equal to the default
    /// region, so none is sent there.
    #[must_use]
    pub fn for_region(region: &AwsRegion) -> Self {
        Self {
            location_constraint: (!region.is_default()).then(|| region.clone()),
        }
    }
}

/// Result of a bucket creation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateBucketOutcome {
    /// The bucket was created.
    Created,
    /// The name is taken by another account.
    AlreadyExists,
    /// The caller already owns the bucket.
    AlreadyOwnedByYou,
    /// Any other failure.
    Failed(ApiError),
}

/// Result of publishing a bucket ACL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutAclOutcome {
    /// The ACL was accepted.
    Applied,
    /// An email grantee did not resolve to an account.
    UnresolvableGrantee,
    /// Any other failure.
    Failed(ApiError),
}

/// Object storage and identity operations used by the protocol.
#[async_trait]
pub trait StorageApi: Send + Sync {
    /// Region of the active session.
    fn region(&self) -> AwsRegion;

    /// Check that the credentials are valid and reachable.
    async fn caller_identity(&self) -> Result<CallerIdentity, ApiError>;

    /// Check whether `bucket` exists and is reachable.
    async fn head_bucket(&self, bucket: &BucketName) -> HeadBucketOutcome;

    /// Create `bucket`.
    async fn create_bucket(
        &self,
        bucket: &BucketName,
        request: &CreateBucketRequest,
    ) -> CreateBucketOutcome;

    /// Apply a public access block to `bucket`.
    async fn put_public_access_block(
        &self,
        bucket: &BucketName,
        block: PublicAccessBlock,
    ) -> Result<(), ApiError>;

    /// Fetch the current ACL of `bucket`.
    async fn get_bucket_acl(&self, bucket: &BucketName) -> Result<AccessControlPolicy, ApiError>;

    /// Replace the ACL of `bucket` with `policy`.
    async fn put_bucket_acl(
        &self,
        bucket: &BucketName,
        policy: &AccessControlPolicy,
    ) -> PutAclOutcome;
}
