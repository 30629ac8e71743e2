//! [`AwsStorage`]: the SDK-backed storage collaborator.

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::config::Region;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::types::{
    BucketCannedAcl, BucketLocationConstraint, CreateBucketConfiguration, ObjectOwnership,
    PublicAccessBlockConfiguration,
};
use grantprobe_core::acl::{AccessControlPolicy, PublicAccessBlock};
use grantprobe_core::api::{
    CallerIdentity, CreateBucketOutcome, CreateBucketRequest, HeadBucketOutcome, PutAclOutcome,
    StorageApi,
};
use grantprobe_core::{ApiError, AwsRegion, BucketName, ProbeConfig};
use tracing::debug;

use crate::classify::{api_error, classify_head, classify_put_acl, http_status};
use crate::convert::{acl_from_output, acl_to_sdk};

/// Storage collaborator backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct AwsStorage {
    s3: aws_sdk_s3::Client,
    sts: aws_sdk_sts::Client,
    region: AwsRegion,
}

impl AwsStorage {
    /// Resolve credentials and region through the SDK's default chains.
    ///
    /// An explicit region in `config` wins over the environment and profile;
    /// with none configured anywhere, the default region is used.
    pub async fn from_config(config: &ProbeConfig) -> Self {
        let region = RegionProviderChain::first_try(config.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(AwsRegion::DEFAULT);

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Some(url) = &config.endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;

        Self::from_sdk_config(&sdk_config, config.force_path_style)
    }

    /// Build clients from an already loaded SDK configuration.
    #[must_use]
    pub fn from_sdk_config(sdk_config: &SdkConfig, force_path_style: bool) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(force_path_style)
            .build();

        Self {
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            sts: aws_sdk_sts::Client::new(sdk_config),
            region: session_region(sdk_config),
        }
    }

    /// Build from existing clients.
    #[must_use]
    pub fn from_clients(s3: aws_sdk_s3::Client, sts: aws_sdk_sts::Client) -> Self {
        let region = s3
            .config()
            .region()
            .map_or_else(AwsRegion::default, |r| AwsRegion::new(r.as_ref()));
        Self { s3, sts, region }
    }
}

fn session_region(sdk_config: &SdkConfig) -> AwsRegion {
    sdk_config
        .region()
        .map_or_else(AwsRegion::default, |r| AwsRegion::new(r.as_ref()))
}

#[async_trait]
impl StorageApi for AwsStorage {
    fn region(&self) -> AwsRegion {
        self.region.clone()
    }

    async fn caller_identity(&self) -> Result<CallerIdentity, ApiError> {
        let output = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| api_error(&e))?;

        Ok(CallerIdentity {
            account: output.account().map(ToOwned::to_owned),
            arn: output.arn().map(ToOwned::to_owned),
            user_id: output.user_id().map(ToOwned::to_owned),
        })
    }

    async fn head_bucket(&self, bucket: &BucketName) -> HeadBucketOutcome {
        match self.s3.head_bucket().bucket(bucket.as_str()).send().await {
            Ok(_) => HeadBucketOutcome::Found,
            Err(err) => {
                let status = http_status(&err);
                let not_found = err
                    .as_service_error()
                    .is_some_and(HeadBucketError::is_not_found);
                debug!(%bucket, ?status, "head bucket failed");
                classify_head(status, not_found, api_error(&err))
            }
        }
    }

    async fn create_bucket(
        &self,
        bucket: &BucketName,
        request: &CreateBucketRequest,
    ) -> CreateBucketOutcome {
        let mut req = self
            .s3
            .create_bucket()
            .bucket(bucket.as_str())
            .object_ownership(ObjectOwnership::ObjectWriter)
            .acl(BucketCannedAcl::Private);
        if let Some(region) = &request.location_constraint {
            req = req.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region.as_str()))
                    .build(),
            );
        }

        match req.send().await {
            Ok(_) => CreateBucketOutcome::Created,
            Err(err) => match err.as_service_error() {
                Some(e) if e.is_bucket_already_exists() => CreateBucketOutcome::AlreadyExists,
                Some(e) if e.is_bucket_already_owned_by_you() => {
                    CreateBucketOutcome::AlreadyOwnedByYou
                }
                _ => CreateBucketOutcome::Failed(api_error(&err)),
            },
        }
    }

    async fn put_public_access_block(
        &self,
        bucket: &BucketName,
        block: PublicAccessBlock,
    ) -> Result<(), ApiError> {
        let configuration = PublicAccessBlockConfiguration::builder()
            .block_public_acls(block.block_public_acls)
            .ignore_public_acls(block.ignore_public_acls)
            .block_public_policy(block.block_public_policy)
            .restrict_public_buckets(block.restrict_public_buckets)
            .build();

        self.s3
            .put_public_access_block()
            .bucket(bucket.as_str())
            .public_access_block_configuration(configuration)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| api_error(&e))
    }

    async fn get_bucket_acl(&self, bucket: &BucketName) -> Result<AccessControlPolicy, ApiError> {
        let output = self
            .s3
            .get_bucket_acl()
            .bucket(bucket.as_str())
            .send()
            .await
            .map_err(|e| api_error(&e))?;
        acl_from_output(&output)
    }

    async fn put_bucket_acl(
        &self,
        bucket: &BucketName,
        policy: &AccessControlPolicy,
    ) -> PutAclOutcome {
        let policy = match acl_to_sdk(policy) {
            Ok(policy) => policy,
            Err(e) => return PutAclOutcome::Failed(e),
        };

        match self
            .s3
            .put_bucket_acl()
            .bucket(bucket.as_str())
            .access_control_policy(policy)
            .send()
            .await
        {
            Ok(_) => PutAclOutcome::Applied,
            Err(err) => classify_put_acl(api_error(&err)),
        }
    }
}
