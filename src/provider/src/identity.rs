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

//! The `azurerm_user_assigned_identity` resource.

use crate::adapter::ResourceAdapter;
use crate::{Error, Result};
use gax::context::CallContext;
use lro::Poller;
use managedidentity::client::UserAssignedIdentities;
use managedidentity::ids::UserAssignedIdentityId;
use managedidentity::model::{Identity, IdentityUpdate};
use resourceids::validate::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The configuration of a user-assigned identity.
///
/// `name`, `resource_group_name` and `location` cannot change once the
/// identity is created. The `principal_id`, `client_id` and `tenant_id`
/// attributes are computed by the service and ignored on create and update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAssignedIdentityConfig {
    pub name: String,
    pub resource_group_name: String,
    pub location: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Converts the configuration to the request body.
pub fn expand(config: &UserAssignedIdentityConfig) -> Identity {
    Identity::new()
        .set_location(normalize_location(&config.location))
        .set_tags(config.tags.clone())
}

/// Converts the service representation back to the configuration.
///
/// The name and resource group come from `id`, the service may echo them
/// with a different casing.
pub fn flatten(id: &UserAssignedIdentityId, identity: Identity) -> UserAssignedIdentityConfig {
    let properties = identity.properties.unwrap_or_default();
    UserAssignedIdentityConfig {
        name: id.user_assigned_identity_name.clone(),
        resource_group_name: id.resource_group_name.clone(),
        location: normalize_location(&identity.location),
        tags: identity.tags.into_iter().collect(),
        principal_id: properties.principal_id,
        client_id: properties.client_id,
        tenant_id: properties.tenant_id,
    }
}

/// Azure accepts both `West Europe` and `westeurope`, and returns the latter.
fn normalize_location(location: &str) -> String {
    location.replace(' ', "").to_lowercase()
}

/// Manages user-assigned identities in one subscription.
#[derive(Clone, Debug)]
pub struct UserAssignedIdentity {
    client: UserAssignedIdentities,
    subscription_id: String,
}

impl UserAssignedIdentity {
    pub fn new<S: Into<String>>(client: UserAssignedIdentities, subscription_id: S) -> Self {
        Self {
            client,
            subscription_id: subscription_id.into(),
        }
    }
}

impl ResourceAdapter for UserAssignedIdentity {
    type Config = UserAssignedIdentityConfig;
    type Id = UserAssignedIdentityId;
    const TYPE_NAME: &'static str = "azurerm_user_assigned_identity";

    fn id(&self, config: &Self::Config) -> Result<Self::Id> {
        Ok(UserAssignedIdentityId::new(
            &self.subscription_id,
            &config.resource_group_name,
            &config.name,
        ))
    }

    fn validate(&self, config: &Self::Config) -> Result<()> {
        let errors = [
            managedidentity::validate::user_assigned_identity_name("name", &config.name),
            resourceids::validate::resource_group_name(
                "resource_group_name",
                &config.resource_group_name,
            ),
            resourceids::validate::not_blank("location", &config.location),
        ]
        .into_iter()
        .filter_map(std::result::Result::err)
        .collect::<Vec<_>>();
        if errors.is_empty() {
            return Ok(());
        }
        Err(Error::binding(InvalidConfig(errors)))
    }

    async fn create(&self, ctx: &CallContext, id: &Self::Id, config: &Self::Config) -> Result<()> {
        self.client
            .create_or_update(id.clone())
            .with_request(expand(config))
            .poller()
            .until_done_with(ctx)
            .await
            .map(|_| ())
    }

    async fn read(&self, ctx: &CallContext, id: &Self::Id) -> Result<Self::Config> {
        let identity = ctx.run(self.client.get(id.clone()).send()).await?;
        Ok(flatten(id, identity))
    }

    async fn update(&self, ctx: &CallContext, id: &Self::Id, config: &Self::Config) -> Result<()> {
        let request = IdentityUpdate::new().set_tags(config.tags.clone());
        ctx.run(self.client.update(id.clone()).with_request(request).send())
            .await
            .map(|_| ())
    }

    async fn delete(&self, ctx: &CallContext, id: &Self::Id) -> Result<()> {
        self.client
            .delete(id.clone())
            .poller()
            .until_done_with(ctx)
            .await
    }
}

/// One or more configuration values are invalid.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
pub struct InvalidConfig(pub Vec<ValidationError>);
