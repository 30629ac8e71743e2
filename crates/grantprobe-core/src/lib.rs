//! Account-existence probing over S3 bucket ACL grants.
//!
//! S3 rejects a bucket ACL grant addressed to an email that has no AWS
//! account (`UnresolvableGrantByEmailAddress`) and accepts it otherwise. This
//! crate turns that behavior into a per-email verdict.
//!
//! # Architecture
//!
//! ```text
//!   Runner (orchestration, one run per invocation)
//!      |
//!      +--> session   validate credentials once
//!      +--> provisioner  ensure the disposable bucket exists
//!      +--> prober    one ACL grant attempt per email -> Verdict
//!      |
//!      v
//!   StorageApi (object storage + identity collaborator)
//! ```
//!
//! The [`api::StorageApi`] trait is the only seam to the outside world. The
//! `grantprobe-aws` crate implements it on top of the AWS SDK.

pub mod acl;
pub mod api;
pub mod config;
pub mod error;
pub mod input;
pub mod prober;
pub mod provisioner;
pub mod report;
pub mod runner;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ProbeConfig;
pub use error::{ApiError, ProbeError, ProbeResult};
pub use prober::Verdict;
pub use provisioner::BucketStatus;
pub use runner::{RunSummary, Runner};
pub use types::{AwsRegion, BucketHandle, BucketName, ProbeTarget};
