//! AWS SDK implementation of [`grantprobe_core::api::StorageApi`].
//!
//! [`AwsStorage`] wraps an `aws-sdk-s3` client for bucket and ACL calls and an
//! `aws-sdk-sts` client for the identity check. SDK errors are classified
//! into the closed outcome types of the core crate at this boundary.

mod classify;
mod client;
mod convert;

pub use client::AwsStorage;
