//! Account probing.
//!
//! For one email: fetch the bucket ACL, append a `READ_ACP` grant addressed
//! to the email, republish the whole list and classify the response.

use std::fmt;

use tracing::debug;

use crate::acl::Grant;
use crate::api::{PutAclOutcome, StorageApi};
use crate::types::{BucketHandle, ProbeTarget};

/// Classified result of probing one email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The grant was accepted: the email belongs to an AWS account.
    AccountExists,
    /// The service could not resolve the email to an account.
    NoAccount,
    /// The probe failed for another reason; carries the raw detail.
    Indeterminate(String),
}

impl Verdict {
    /// Human-readable label used in output lines.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AccountExists => "AWS account found".to_owned(),
            Self::NoAccount => "No AWS account".to_owned(),
            Self::Indeterminate(detail) => format!("Indeterminate: {detail}"),
        }
    }

    /// Whether the verdict is a positive match.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::AccountExists)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Probe a single email against `bucket`.
///
/// Always yields a verdict; errors are folded into
/// [`Verdict::Indeterminate`]. Only an unresolvable email grantee yields
/// [`Verdict::NoAccount`].
pub async fn probe(api: &dyn StorageApi, bucket: &BucketHandle, target: &ProbeTarget) -> Verdict {
    let acl = match api.get_bucket_acl(&bucket.name).await {
        Ok(acl) => acl,
        Err(e) => {
            debug!(email = %target, error = %e, "failed to fetch bucket ACL");
            return Verdict::Indeterminate(e.to_string());
        }
    };

    let acl = acl.with_grant(Grant::email_probe(target.email()));

    let verdict = match api.put_bucket_acl(&bucket.name, &acl).await {
        PutAclOutcome::Applied => Verdict::AccountExists,
        PutAclOutcome::UnresolvableGrantee => Verdict::NoAccount,
        PutAclOutcome::Failed(e) => Verdict::Indeterminate(e.to_string()),
    };

    debug!(email = %target, grants = acl.grants.len(), verdict = %verdict, "probe complete");
    verdict
}
