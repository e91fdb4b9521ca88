// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resource IDs for the `Microsoft.ManagedIdentity` resource provider.

use resourceids::{ParseError, ParsedId, ResourceGroupId, ResourceId, Segment};

const USER_ASSIGNED_IDENTITY: &[Segment] = &[
    Segment::static_segment("staticSubscriptions", "subscriptions"),
    Segment::subscription_id("subscriptionId"),
    Segment::static_segment("staticResourceGroups", "resourceGroups"),
    Segment::resource_group("resourceGroupName"),
    Segment::static_segment("staticProviders", "providers"),
    Segment::resource_provider("staticMicrosoftManagedIdentity", "Microsoft.ManagedIdentity"),
    Segment::static_segment("staticUserAssignedIdentities", "userAssignedIdentities"),
    Segment::user_specified("userAssignedIdentityName"),
];

const FEDERATED_IDENTITY_CREDENTIAL: &[Segment] = &[
    Segment::static_segment("staticSubscriptions", "subscriptions"),
    Segment::subscription_id("subscriptionId"),
    Segment::static_segment("staticResourceGroups", "resourceGroups"),
    Segment::resource_group("resourceGroupName"),
    Segment::static_segment("staticProviders", "providers"),
    Segment::resource_provider("staticMicrosoftManagedIdentity", "Microsoft.ManagedIdentity"),
    Segment::static_segment("staticUserAssignedIdentities", "userAssignedIdentities"),
    Segment::user_specified("userAssignedIdentityName"),
    Segment::static_segment("staticFederatedIdentityCredentials", "federatedIdentityCredentials"),
    Segment::user_specified("federatedIdentityCredentialName"),
];

/// Identifies a user-assigned identity.
///
/// # Example
/// ```
/// # use azure_rm_managedidentity::ids::UserAssignedIdentityId;
/// use resourceids::ResourceId;
/// let input = "/subscriptions/abc/resourceGroups/RG1/providers/Microsoft.ManagedIdentity/userAssignedIdentities/id1";
/// let id = UserAssignedIdentityId::parse(input)?;
/// assert_eq!(id, UserAssignedIdentityId::new("abc", "RG1", "id1"));
/// assert_eq!(id.to_string(), input);
/// # Ok::<(), resourceids::ParseError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserAssignedIdentityId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub user_assigned_identity_name: String,
}

impl UserAssignedIdentityId {
    pub fn new<S, R, N>(subscription_id: S, resource_group_name: R, name: N) -> Self
    where
        S: Into<String>,
        R: Into<String>,
        N: Into<String>,
    {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            user_assigned_identity_name: name.into(),
        }
    }

    /// The resource group containing the identity.
    pub fn resource_group(&self) -> ResourceGroupId {
        ResourceGroupId::new(&self.subscription_id, &self.resource_group_name)
    }
}

impl ResourceId for UserAssignedIdentityId {
    fn segments() -> &'static [Segment] {
        USER_ASSIGNED_IDENTITY
    }

    fn from_parsed(parsed: &ParsedId) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: parsed.required(&USER_ASSIGNED_IDENTITY[1])?,
            resource_group_name: parsed.required(&USER_ASSIGNED_IDENTITY[3])?,
            user_assigned_identity_name: parsed.required(&USER_ASSIGNED_IDENTITY[7])?,
        })
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.subscription_id.as_str(),
            self.resource_group_name.as_str(),
            self.user_assigned_identity_name.as_str(),
        ]
    }
}

resourceids::impl_resource_id!(UserAssignedIdentityId);

/// Identifies a federated identity credential of a user-assigned identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FederatedIdentityCredentialId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub user_assigned_identity_name: String,
    pub federated_identity_credential_name: String,
}

impl FederatedIdentityCredentialId {
    pub fn new<N: Into<String>>(identity: &UserAssignedIdentityId, name: N) -> Self {
        Self {
            subscription_id: identity.subscription_id.clone(),
            resource_group_name: identity.resource_group_name.clone(),
            user_assigned_identity_name: identity.user_assigned_identity_name.clone(),
            federated_identity_credential_name: name.into(),
        }
    }

    /// The identity owning this credential.
    pub fn identity(&self) -> UserAssignedIdentityId {
        UserAssignedIdentityId::new(
            &self.subscription_id,
            &self.resource_group_name,
            &self.user_assigned_identity_name,
        )
    }
}

impl ResourceId for FederatedIdentityCredentialId {
    fn segments() -> &'static [Segment] {
        FEDERATED_IDENTITY_CREDENTIAL
    }

    fn from_parsed(parsed: &ParsedId) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: parsed.required(&FEDERATED_IDENTITY_CREDENTIAL[1])?,
            resource_group_name: parsed.required(&FEDERATED_IDENTITY_CREDENTIAL[3])?,
            user_assigned_identity_name: parsed.required(&FEDERATED_IDENTITY_CREDENTIAL[7])?,
            federated_identity_credential_name: parsed
                .required(&FEDERATED_IDENTITY_CREDENTIAL[9])?,
        })
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.subscription_id.as_str(),
            self.resource_group_name.as_str(),
            self.user_assigned_identity_name.as_str(),
            self.federated_identity_credential_name.as_str(),
        ]
    }
}

resourceids::impl_resource_id!(FederatedIdentityCredentialId);
