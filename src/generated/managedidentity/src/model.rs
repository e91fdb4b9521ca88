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

//! The request and response messages for `Microsoft.ManagedIdentity`.

use crate::ids::{FederatedIdentityCredentialId, UserAssignedIdentityId};
use gax::paginator::Predicate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Metadata about the creation and last modification of a resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SystemData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<String>,
}

/// Describes an identity resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Identity {
    /// The fully qualified resource ID. Output only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserAssignedIdentityId>,

    /// The name of the resource. Output only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The type of the resource, `Microsoft.ManagedIdentity/userAssignedIdentities`.
    /// Output only.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// The geo-location where the resource lives.
    pub location: String,

    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<UserAssignedIdentityProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_data: Option<SystemData>,
}

impl Identity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [location][Identity::location].
    pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
        self.location = v.into();
        self
    }

    /// Sets the value of [tags][Identity::tags].
    pub fn set_tags<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// The properties assigned by the service, if any.
    pub fn properties(&self) -> Option<&UserAssignedIdentityProperties> {
        self.properties.as_ref()
    }
}

/// The properties associated with the identity. Output only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct UserAssignedIdentityProperties {
    /// The id of the tenant which the identity belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// The id of the service principal object associated with the identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,

    /// The id of the app associated with the identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// The fields of an identity that can be updated with `PATCH`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct IdentityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

impl IdentityUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [location][IdentityUpdate::location].
    pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
        self.location = Some(v.into());
        self
    }

    /// Sets the value of [tags][IdentityUpdate::tags].
    pub fn set_tags<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags = Some(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }
}

/// Describes a federated identity credential.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct FederatedIdentityCredential {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<FederatedIdentityCredentialId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<FederatedIdentityCredentialProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_data: Option<SystemData>,
}

impl FederatedIdentityCredential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [properties][FederatedIdentityCredential::properties].
    pub fn set_properties<T: Into<FederatedIdentityCredentialProperties>>(mut self, v: T) -> Self {
        self.properties = Some(v.into());
        self
    }
}

/// The properties of a federated identity credential.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct FederatedIdentityCredentialProperties {
    /// The URL of the issuer to be trusted.
    pub issuer: String,

    /// The identifier of the external identity.
    pub subject: String,

    /// The list of audiences that can appear in the issued token.
    pub audiences: Vec<String>,
}

impl FederatedIdentityCredentialProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_issuer<T: Into<String>>(mut self, v: T) -> Self {
        self.issuer = v.into();
        self
    }

    pub fn set_subject<T: Into<String>>(mut self, v: T) -> Self {
        self.subject = v.into();
        self
    }

    pub fn set_audiences<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.audiences = v.into_iter().map(|v| v.into()).collect();
        self
    }
}

/// Selects identities after listing them.
///
/// Each field that is set must match exactly. Unset fields match any value.
///
/// # Example
/// ```
/// # use azure_rm_managedidentity::model::{Identity, UserAssignedIdentityOperationPredicate};
/// use gax::paginator::Predicate;
/// let predicate = UserAssignedIdentityOperationPredicate::new().set_location("westus");
/// assert!(predicate.matches(&Identity::new().set_location("westus")));
/// assert!(!predicate.matches(&Identity::new().set_location("eastus")));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct UserAssignedIdentityOperationPredicate {
    pub id: Option<String>,
    pub location: Option<String>,
    pub name: Option<String>,
    pub r#type: Option<String>,
}

impl UserAssignedIdentityOperationPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id<T: Into<String>>(mut self, v: T) -> Self {
        self.id = Some(v.into());
        self
    }

    pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
        self.location = Some(v.into());
        self
    }

    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = Some(v.into());
        self
    }

    pub fn set_type<T: Into<String>>(mut self, v: T) -> Self {
        self.r#type = Some(v.into());
        self
    }
}

impl Predicate<Identity> for UserAssignedIdentityOperationPredicate {
    fn matches(&self, item: &Identity) -> bool {
        fn check(want: &Option<String>, got: Option<&str>) -> bool {
            match want {
                None => true,
                Some(w) => got == Some(w.as_str()),
            }
        }
        let id = item.id.as_ref().map(|id| id.to_string());
        check(&self.id, id.as_deref())
            && check(&self.location, Some(item.location.as_str()))
            && check(&self.name, item.name.as_deref())
            && check(&self.r#type, item.r#type.as_deref())
    }
}

/// The managed service identity block of a resource.
///
/// Resources that can authenticate to other services carry an `identity`
/// field. On the wire this is a single object whose `type` field selects which
/// of the other fields are meaningful.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "wire::Identity", into = "wire::Identity")]
#[non_exhaustive]
pub enum ManagedServiceIdentity {
    #[default]
    None,
    SystemAssigned(SystemAssignedIdentity),
    UserAssigned(UserAssignedIdentities),
    SystemAssignedUserAssigned(SystemAssignedIdentity, UserAssignedIdentities),
}

/// The service principal created for a system-assigned identity.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct SystemAssignedIdentity {
    pub principal_id: Option<String>,
    pub tenant_id: Option<String>,
}

/// The user-assigned identities attached to a resource, keyed by ID.
pub type UserAssignedIdentities = BTreeMap<UserAssignedIdentityId, UserAssignedIdentityDetails>;

/// The details of a user-assigned identity attached to a resource. Output only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct UserAssignedIdentityDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl ManagedServiceIdentity {
    /// The wire name of the identity type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::SystemAssigned(_) => "SystemAssigned",
            Self::UserAssigned(_) => "UserAssigned",
            Self::SystemAssignedUserAssigned(_, _) => "SystemAssigned, UserAssigned",
        }
    }

    /// The user-assigned identities, if any.
    pub fn user_assigned(&self) -> Option<&UserAssignedIdentities> {
        match self {
            Self::UserAssigned(ids) | Self::SystemAssignedUserAssigned(_, ids) => Some(ids),
            Self::None | Self::SystemAssigned(_) => None,
        }
    }
}

mod wire {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Identity {
        #[serde(rename = "type")]
        pub r#type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub principal_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub tenant_id: Option<String>,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        pub user_assigned_identities: BTreeMap<String, UserAssignedIdentityDetails>,
    }

    #[derive(thiserror::Error, Debug, PartialEq)]
    pub enum Error {
        #[error("unknown managed service identity type {0:?}")]
        UnknownType(String),
        #[error("invalid user-assigned identity key: {0}")]
        BadKey(#[source] resourceids::ParseError),
    }

    fn user_assigned(
        ids: BTreeMap<String, UserAssignedIdentityDetails>,
    ) -> Result<UserAssignedIdentities, Error> {
        use resourceids::ResourceId;
        ids.into_iter()
            .map(|(k, v)| {
                UserAssignedIdentityId::parse_insensitively(&k)
                    .map(|id| (id, v))
                    .map_err(Error::BadKey)
            })
            .collect()
    }

    impl TryFrom<Identity> for ManagedServiceIdentity {
        type Error = Error;
        fn try_from(value: Identity) -> Result<Self, Self::Error> {
            let system = || SystemAssignedIdentity {
                principal_id: value.principal_id.clone(),
                tenant_id: value.tenant_id.clone(),
            };
            let normalized = value
                .r#type
                .split(',')
                .map(|s| s.trim().to_ascii_lowercase())
                .collect::<Vec<_>>();
            let normalized = normalized.iter().map(String::as_str).collect::<Vec<_>>();
            match normalized.as_slice() {
                [""] | ["none"] => Ok(Self::None),
                ["systemassigned"] => Ok(Self::SystemAssigned(system())),
                ["userassigned"] => Ok(Self::UserAssigned(user_assigned(
                    value.user_assigned_identities,
                )?)),
                ["systemassigned", "userassigned"] => {
                    let system = system();
                    Ok(Self::SystemAssignedUserAssigned(
                        system,
                        user_assigned(value.user_assigned_identities)?,
                    ))
                }
                _ => Err(Error::UnknownType(value.r#type)),
            }
        }
    }

    impl From<ManagedServiceIdentity> for Identity {
        fn from(value: ManagedServiceIdentity) -> Self {
            let r#type = value.type_name().to_string();
            let keys = |ids: UserAssignedIdentities| {
                ids.into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect::<BTreeMap<_, _>>()
            };
            match value {
                ManagedServiceIdentity::None => Self {
                    r#type,
                    ..Default::default()
                },
                ManagedServiceIdentity::SystemAssigned(s) => Self {
                    r#type,
                    principal_id: s.principal_id,
                    tenant_id: s.tenant_id,
                    ..Default::default()
                },
                ManagedServiceIdentity::UserAssigned(ids) => Self {
                    r#type,
                    user_assigned_identities: keys(ids),
                    ..Default::default()
                },
                ManagedServiceIdentity::SystemAssignedUserAssigned(s, ids) => Self {
                    r#type,
                    principal_id: s.principal_id,
                    tenant_id: s.tenant_id,
                    user_assigned_identities: keys(ids),
                },
            }
        }
    }
}
