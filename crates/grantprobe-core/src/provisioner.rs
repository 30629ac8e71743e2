//! Bucket provisioning.
//!
//! [`ensure_bucket`] makes sure the probe bucket exists before any email is
//! probed. Failures split in two: a bucket that cannot be created ends the
//! run, while an ambiguous bucket (forbidden, owned elsewhere, unexpected
//! lookup error) only produces a warning and probing goes ahead.

use std::fmt;

use tracing::{debug, info, warn};

use crate::acl::PublicAccessBlock;
use crate::api::{CreateBucketOutcome, CreateBucketRequest, HeadBucketOutcome, StorageApi};
use crate::error::{ApiError, ProbeError, ProbeResult};
use crate::types::BucketHandle;

/// Outcome of [`ensure_bucket`] that lets the run continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketStatus {
    /// The bucket was created and locked down for probing.
    Created,
    /// The bucket already exists.
    ///
    /// `owned_elsewhere` is set when creation was refused because another
    /// account holds the name; the bucket is then unusable for this caller.
    AlreadyExists {
        /// Whether another account owns the bucket.
        owned_elsewhere: bool,
    },
    /// Creation raced with an earlier request from this caller; safe to reuse.
    AlreadyOwnedByCaller,
    /// The lookup was forbidden; the bucket may exist under another account.
    AccessDenied,
    /// The lookup failed for another reason.
    Error(ApiError),
}

impl BucketStatus {
    /// Operator-facing warning for statuses that leave the bucket ambiguous.
    #[must_use]
    pub fn warning(&self, bucket: &BucketHandle) -> Option<String> {
        let name = &bucket.name;
        match self {
            Self::Created | Self::AlreadyOwnedByCaller => None,
            Self::AlreadyExists { owned_elsewhere } => owned_elsewhere
                .then(|| format!("The bucket {name} already exists in another AWS account.")),
            Self::AccessDenied => Some(format!(
                "Access denied to bucket {name}. It might already exist in another account."
            )),
            Self::Error(e) => Some(format!("Error accessing bucket {name}: {e}")),
        }
    }
}

impl fmt::Display for BucketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::AlreadyExists { .. } => f.write_str("already exists"),
            Self::AlreadyOwnedByCaller => f.write_str("already owned by caller"),
            Self::AccessDenied => f.write_str("access denied"),
            Self::Error(_) => f.write_str("error"),
        }
    }
}

/// Ensure the probe bucket exists.
///
/// 1. `HEAD` the bucket; if it is there it is reused untouched.
/// 2. If it is missing, create it (with a location constraint outside the
///    default region) and apply [`PublicAccessBlock::PROBE`].
/// 3. A forbidden or failed lookup is reported, not fatal.
///
/// # Errors
///
/// Returns [`ProbeError::BucketCreation`] when the bucket is missing and
/// cannot be created or locked down. No email can be probed in that case.
pub async fn ensure_bucket(
    api: &dyn StorageApi,
    bucket: &BucketHandle,
) -> ProbeResult<BucketStatus> {
    let status = match api.head_bucket(&bucket.name).await {
        HeadBucketOutcome::Found => BucketStatus::AlreadyExists {
            owned_elsewhere: false,
        },
        HeadBucketOutcome::NotFound => create_bucket(api, bucket).await?,
        HeadBucketOutcome::Forbidden => BucketStatus::AccessDenied,
        HeadBucketOutcome::Failed(e) => BucketStatus::Error(e),
    };

    info!(bucket = %bucket.name, %status, "bucket ready");
    Ok(status)
}

async fn create_bucket(api: &dyn StorageApi, bucket: &BucketHandle) -> ProbeResult<BucketStatus> {
    let request = CreateBucketRequest::for_region(&bucket.region);
    debug!(
        bucket = %bucket.name,
        region = %bucket.region,
        location_constraint = request.location_constraint.is_some(),
        "creating bucket"
    );

    match api.create_bucket(&bucket.name, &request).await {
        CreateBucketOutcome::Created => {
            api.put_public_access_block(&bucket.name, PublicAccessBlock::PROBE)
                .await
                .map_err(|source| creation_failed(bucket, source))?;
            Ok(BucketStatus::Created)
        }
        CreateBucketOutcome::AlreadyExists => {
            warn!(bucket = %bucket.name, "bucket name is owned by another account");
            Ok(BucketStatus::AlreadyExists {
                owned_elsewhere: true,
            })
        }
        CreateBucketOutcome::AlreadyOwnedByYou => Ok(BucketStatus::AlreadyOwnedByCaller),
        CreateBucketOutcome::Failed(source) => Err(creation_failed(bucket, source)),
    }
}

fn creation_failed(bucket: &BucketHandle, source: ApiError) -> ProbeError {
    ProbeError::BucketCreation {
        bucket: bucket.name.to_string(),
        source,
    }
}
