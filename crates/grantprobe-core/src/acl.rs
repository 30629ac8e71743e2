//! Bucket access control model.
//!
//! Mirrors the subset of the S3 ACL document the prober reads and
//! republishes: an owner plus an ordered list of grants. The list is treated
//! as append-only for the duration of a run.

use std::fmt;

/// Owner of a bucket ACL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Owner {
    /// Canonical user ID.
    pub id: Option<String>,
    /// Display name, if the service returns one.
    pub display_name: Option<String>,
}

/// The subject of a grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grantee {
    /// A canonical user identified by ID.
    CanonicalUser {
        /// Canonical user ID.
        id: String,
        /// Display name, if known.
        display_name: Option<String>,
    },
    /// An AWS customer identified by email, resolved by the service at grant time.
    AmazonCustomerByEmail {
        /// Email address.
        email: String,
    },
    /// A predefined group identified by URI.
    Group {
        /// Group URI.
        uri: String,
    },
}

/// Permission carried by a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// `FULL_CONTROL`
    FullControl,
    /// `READ`
    Read,
    /// `WRITE`
    Write,
    /// `READ_ACP`
    ReadAcp,
    /// `WRITE_ACP`
    WriteAcp,
}

impl Permission {
    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullControl => "FULL_CONTROL",
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::ReadAcp => "READ_ACP",
            Self::WriteAcp => "WRITE_ACP",
        }
    }

    /// Parse the wire representation.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "FULL_CONTROL" => Some(Self::FullControl),
            "READ" => Some(Self::Read),
            "WRITE" => Some(Self::Write),
            "READ_ACP" => Some(Self::ReadAcp),
            "WRITE_ACP" => Some(Self::WriteAcp),
            _ => None,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single grantee/permission pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    /// Who the grant applies to.
    pub grantee: Grantee,
    /// What the grantee may do.
    pub permission: Permission,
}

impl Grant {
    /// The grant a probe appends: `READ_ACP` for the given email.
    #[must_use]
    pub fn email_probe(email: &str) -> Self {
        Self {
            grantee: Grantee::AmazonCustomerByEmail {
                email: email.to_owned(),
            },
            permission: Permission::ReadAcp,
        }
    }
}

/// A bucket ACL: owner plus ordered grants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessControlPolicy {
    /// Bucket owner.
    pub owner: Owner,
    /// Grants, in service order.
    pub grants: Vec<Grant>,
}

impl AccessControlPolicy {
    /// Append `grant` to the end of the list.
    ///
    /// Grants already present are kept as-is; a repeated grant is appended
    /// again.
    #[must_use]
    pub fn with_grant(mut self, grant: Grant) -> Self {
        self.grants.push(grant);
        self
    }
}

/// Public access block settings applied to a freshly created bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicAccessBlock {
    /// Reject requests that add public ACLs.
    pub block_public_acls: bool,
    /// Ignore public ACLs already present.
    pub ignore_public_acls: bool,
    /// Reject public bucket policies.
    pub block_public_policy: bool,
    /// Restrict access to buckets with public policies.
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlock {
    /// Locks down policies while leaving per-grantee ACL entries effective.
    ///
    /// Email grants only take effect while ACLs are neither blocked nor
    /// ignored, so both ACL switches stay off.
    pub const PROBE: Self = Self {
        block_public_acls: false,
        ignore_public_acls: false,
        block_public_policy: true,
        restrict_public_buckets: true,
    };
}
