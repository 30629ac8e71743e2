//! In-memory [`StorageApi`] used by unit tests.
//!
//! Models buckets owned by the caller or by another account, a set of
//! emails that resolve to accounts, and per-call failure overrides. Every
//! call is recorded so tests can assert on ordering.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::acl::{AccessControlPolicy, Grant, Grantee, Owner, Permission, PublicAccessBlock};
use crate::api::{
    CallerIdentity, CreateBucketOutcome, CreateBucketRequest, HeadBucketOutcome, PutAclOutcome,
    StorageApi,
};
use crate::error::ApiError;
use crate::types::{AwsRegion, BucketName};

/// A recorded collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    CallerIdentity,
    HeadBucket(String),
    CreateBucket {
        bucket: String,
        location_constraint: Option<String>,
    },
    PutPublicAccessBlock(String, PublicAccessBlock),
    GetBucketAcl(String),
    PutBucketAcl(String),
}

#[derive(Debug)]
struct FakeBucket {
    foreign: bool,
    forbidden: bool,
    acl: AccessControlPolicy,
}

#[derive(Debug, Default)]
struct State {
    buckets: HashMap<String, FakeBucket>,
    calls: Vec<Call>,
}

#[derive(Debug)]
pub(crate) struct FakeStorage {
    region: AwsRegion,
    accounts: HashSet<String>,
    identity_failure: Option<ApiError>,
    head_outcome: Option<HeadBucketOutcome>,
    create_outcome: Option<CreateBucketOutcome>,
    public_access_block_failure: Option<ApiError>,
    put_acl_failure: Option<ApiError>,
    state: Mutex<State>,
}

fn owner_acl() -> AccessControlPolicy {
    AccessControlPolicy {
        owner: Owner {
            id: Some("fake-owner-id".to_owned()),
            display_name: Some("fake-owner".to_owned()),
        },
        grants: vec![Grant {
            grantee: Grantee::CanonicalUser {
                id: "fake-owner-id".to_owned(),
                display_name: Some("fake-owner".to_owned()),
            },
            permission: Permission::FullControl,
        }],
    }
}

fn access_denied() -> ApiError {
    ApiError::service("AccessDenied", "Access Denied")
}

fn no_such_bucket() -> ApiError {
    ApiError::service("NoSuchBucket", "The specified bucket does not exist")
}

impl FakeStorage {
    pub(crate) fn new(region: &str) -> Self {
        Self {
            region: AwsRegion::new(region),
            accounts: HashSet::new(),
            identity_failure: None,
            head_outcome: None,
            create_outcome: None,
            public_access_block_failure: None,
            put_acl_failure: None,
            state: Mutex::new(State::default()),
        }
    }

    pub(crate) fn with_account(mut self, email: &str) -> Self {
        self.accounts.insert(email.to_owned());
        self
    }

    pub(crate) fn with_own_bucket(self, name: &str) -> Self {
        self.with_bucket_acl(name, owner_acl())
    }

    pub(crate) fn with_bucket_acl(self, name: &str, acl: AccessControlPolicy) -> Self {
        self.state.lock().buckets.insert(
            name.to_owned(),
            FakeBucket {
                foreign: false,
                forbidden: false,
                acl,
            },
        );
        self
    }

    /// A bucket held by another account. When `forbidden` is false the
    /// lookup reports it as missing and only creation reveals the conflict.
    pub(crate) fn with_foreign_bucket(self, name: &str, forbidden: bool) -> Self {
        self.state.lock().buckets.insert(
            name.to_owned(),
            FakeBucket {
                foreign: true,
                forbidden,
                acl: AccessControlPolicy::default(),
            },
        );
        self
    }

    pub(crate) fn with_identity_failure(mut self, err: ApiError) -> Self {
        self.identity_failure = Some(err);
        self
    }

    pub(crate) fn with_head_outcome(mut self, outcome: HeadBucketOutcome) -> Self {
        self.head_outcome = Some(outcome);
        self
    }

    pub(crate) fn with_create_outcome(mut self, outcome: CreateBucketOutcome) -> Self {
        self.create_outcome = Some(outcome);
        self
    }

    pub(crate) fn with_public_access_block_failure(mut self, err: ApiError) -> Self {
        self.public_access_block_failure = Some(err);
        self
    }

    pub(crate) fn with_put_acl_failure(mut self, err: ApiError) -> Self {
        self.put_acl_failure = Some(err);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub(crate) fn acl(&self, bucket: &str) -> Option<AccessControlPolicy> {
        self.state
            .lock()
            .buckets
            .get(bucket)
            .filter(|b| !b.foreign)
            .map(|b| b.acl.clone())
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push(call);
    }
}

#[async_trait]
impl StorageApi for FakeStorage {
    fn region(&self) -> AwsRegion {
        self.region.clone()
    }

    async fn caller_identity(&self) -> Result<CallerIdentity, ApiError> {
        self.record(Call::CallerIdentity);
        match &self.identity_failure {
            Some(err) => Err(err.clone()),
            None => Ok(CallerIdentity {
                account: Some("111122223333".to_owned()),
                arn: Some("arn:aws:iam::111122223333:user/prober".to_owned()),
                user_id: Some("AIDAEXAMPLE".to_owned()),
            }),
        }
    }

    async fn head_bucket(&self, bucket: &BucketName) -> HeadBucketOutcome {
        self.record(Call::HeadBucket(bucket.to_string()));
        if let Some(outcome) = &self.head_outcome {
            return outcome.clone();
        }
        match self.state.lock().buckets.get(bucket.as_str()) {
            Some(b) if b.foreign && b.forbidden => HeadBucketOutcome::Forbidden,
            Some(b) if b.foreign => HeadBucketOutcome::NotFound,
            Some(_) => HeadBucketOutcome::Found,
            None => HeadBucketOutcome::NotFound,
        }
    }

    async fn create_bucket(
        &self,
        bucket: &BucketName,
        request: &CreateBucketRequest,
    ) -> CreateBucketOutcome {
        self.record(Call::CreateBucket {
            bucket: bucket.to_string(),
            location_constraint: request
                .location_constraint
                .as_ref()
                .map(ToString::to_string),
        });
        if let Some(outcome) = &self.create_outcome {
            return outcome.clone();
        }

        let mut state = self.state.lock();
        let existing = state.buckets.get(bucket.as_str()).map(|b| b.foreign);
        match existing {
            Some(true) => CreateBucketOutcome::AlreadyExists,
            Some(false) => CreateBucketOutcome::AlreadyOwnedByYou,
            None => {
                state.buckets.insert(
                    bucket.to_string(),
                    FakeBucket {
                        foreign: false,
                        forbidden: false,
                        acl: owner_acl(),
                    },
                );
                CreateBucketOutcome::Created
            }
        }
    }

    async fn put_public_access_block(
        &self,
        bucket: &BucketName,
        block: PublicAccessBlock,
    ) -> Result<(), ApiError> {
        self.record(Call::PutPublicAccessBlock(bucket.to_string(), block));
        match &self.public_access_block_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn get_bucket_acl(&self, bucket: &BucketName) -> Result<AccessControlPolicy, ApiError> {
        self.record(Call::GetBucketAcl(bucket.to_string()));
        match self.state.lock().buckets.get(bucket.as_str()) {
            Some(b) if b.foreign => Err(access_denied()),
            Some(b) => Ok(b.acl.clone()),
            None => Err(no_such_bucket()),
        }
    }

    async fn put_bucket_acl(
        &self,
        bucket: &BucketName,
        policy: &AccessControlPolicy,
    ) -> PutAclOutcome {
        self.record(Call::PutBucketAcl(bucket.to_string()));
        if let Some(err) = &self.put_acl_failure {
            return PutAclOutcome::Failed(err.clone());
        }

        let unresolved = policy.grants.iter().any(|g| match &g.grantee {
            Grantee::AmazonCustomerByEmail { email } => !self.accounts.contains(email),
            _ => false,
        });

        let mut state = self.state.lock();
        match state.buckets.get_mut(bucket.as_str()) {
            Some(b) if b.foreign => PutAclOutcome::Failed(access_denied()),
            Some(_) if unresolved => PutAclOutcome::UnresolvableGrantee,
            Some(b) => {
                b.acl = policy.clone();
                PutAclOutcome::Applied
            }
            None => PutAclOutcome::Failed(no_such_bucket()),
        }
    }
}
