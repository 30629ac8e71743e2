//! Conversions between the SDK ACL types and the core ACL model.

use aws_sdk_s3::operation::get_bucket_acl::GetBucketAclOutput;
use aws_sdk_s3::types::{
    AccessControlPolicy as SdkPolicy, Grant as SdkGrant, Grantee as SdkGrantee,
    Owner as SdkOwner, Permission as SdkPermission, Type,
};
use grantprobe_core::ApiError;
use grantprobe_core::acl::{AccessControlPolicy, Grant, Grantee, Owner, Permission};

/// Build the core ACL from a `GetBucketAcl` response.
///
/// Fails on grants the model cannot represent, rather than dropping them
/// from the list that is about to be republished.
pub(crate) fn acl_from_output(output: &GetBucketAclOutput) -> Result<AccessControlPolicy, ApiError> {
    let owner = output
        .owner()
        .map(|o| Owner {
            id: o.id().map(ToOwned::to_owned),
            display_name: o.display_name().map(ToOwned::to_owned),
        })
        .unwrap_or_default();

    let grants = output
        .grants()
        .iter()
        .map(grant_from_sdk)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AccessControlPolicy { owner, grants })
}

fn grant_from_sdk(grant: &SdkGrant) -> Result<Grant, ApiError> {
    let grantee = grant
        .grantee()
        .ok_or_else(|| ApiError::local("bucket ACL grant has no grantee"))?;
    let permission = grant
        .permission()
        .and_then(|p| Permission::from_wire(p.as_str()))
        .ok_or_else(|| ApiError::local("bucket ACL grant has no recognized permission"))?;

    let grantee = match grantee.r#type() {
        Type::CanonicalUser => Grantee::CanonicalUser {
            id: grantee.id().unwrap_or_default().to_owned(),
            display_name: grantee.display_name().map(ToOwned::to_owned),
        },
        Type::AmazonCustomerByEmail => Grantee::AmazonCustomerByEmail {
            email: grantee.email_address().unwrap_or_default().to_owned(),
        },
        Type::Group => Grantee::Group {
            uri: grantee.uri().unwrap_or_default().to_owned(),
        },
        other => {
            return Err(ApiError::local(format!(
                "unsupported grantee type in bucket ACL: {}",
                other.as_str()
            )));
        }
    };

    Ok(Grant {
        grantee,
        permission,
    })
}

/// Build the SDK policy for a `PutBucketAcl` request.
pub(crate) fn acl_to_sdk(policy: &AccessControlPolicy) -> Result<SdkPolicy, ApiError> {
    let owner = SdkOwner::builder()
        .set_id(policy.owner.id.clone())
        .set_display_name(policy.owner.display_name.clone())
        .build();

    let grants = policy
        .grants
        .iter()
        .map(grant_to_sdk)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SdkPolicy::builder()
        .owner(owner)
        .set_grants(Some(grants))
        .build())
}

fn grant_to_sdk(grant: &Grant) -> Result<SdkGrant, ApiError> {
    let grantee = match &grant.grantee {
        Grantee::CanonicalUser { id, display_name } => SdkGrantee::builder()
            .r#type(Type::CanonicalUser)
            .id(id)
            .set_display_name(display_name.clone()),
        Grantee::AmazonCustomerByEmail { email } => SdkGrantee::builder()
            .r#type(Type::AmazonCustomerByEmail)
            .email_address(email),
        Grantee::Group { uri } => SdkGrantee::builder().r#type(Type::Group).uri(uri),
    }
    .build()
    .map_err(|e| ApiError::local(format!("invalid grantee: {e}")))?;

    Ok(SdkGrant::builder()
        .grantee(grantee)
        .permission(SdkPermission::from(grant.permission.as_str()))
        .build())
}
