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

use crate::builder::{federated_identity_credentials, user_assigned_identities};
use crate::ids::{FederatedIdentityCredentialId, UserAssignedIdentityId};
use gaxi::http::ReqwestClient;
use gaxi::options::ClientConfig;
use resourceids::{ResourceGroupId, SubscriptionId};

/// Manages user-assigned identities.
///
/// # Example
/// ```no_run
/// # tokio_test::block_on(async {
/// # use azure_rm_managedidentity::client::UserAssignedIdentities;
/// use azure_rm_managedidentity::model::UserAssignedIdentityOperationPredicate;
/// use gax::context::CallContext;
/// use resourceids::ResourceGroupId;
/// let client = UserAssignedIdentities::builder().build().await?;
/// let identities = client
///     .list_by_resource_group(ResourceGroupId::new("my-subscription", "my-resource-group"))
///     .complete_matching(&CallContext::new(), UserAssignedIdentityOperationPredicate::new().set_location("westus"))
///     .await?;
/// for identity in identities {
///     println!("{identity:?}");
/// }
/// # Result::<(), Box<dyn std::error::Error>>::Ok(()) });
/// ```
///
/// # Configuration
///
/// To configure `UserAssignedIdentities` use the `with_*` methods in the type
/// returned by [builder()][UserAssignedIdentities::builder]. The default
/// configuration should work for most applications. Common configuration
/// changes include
///
/// * [with_endpoint()]: by default this client uses the Azure public cloud
///   endpoint. Applications using sovereign clouds need to override it.
/// * [with_credentials()]: by default this client sends anonymous requests.
///
/// [with_endpoint()]: gax::client_builder::ClientBuilder::with_endpoint
/// [with_credentials()]: gax::client_builder::ClientBuilder::with_credentials
///
/// # Pooling and Cloning
///
/// `UserAssignedIdentities` holds a connection pool internally, it is advised
/// to create one and reuse it. You do not need to wrap it in an
/// [Rc](std::rc::Rc) or [Arc](std::sync::Arc) to reuse it, because it already
/// uses an `Arc` internally.
#[derive(Clone, Debug)]
pub struct UserAssignedIdentities {
    inner: ReqwestClient,
}

impl UserAssignedIdentities {
    /// Returns a builder for [UserAssignedIdentities].
    pub fn builder() -> ClientBuilder<user_assigned_identities::client::Factory> {
        gax::client_builder::internal::new_builder(user_assigned_identities::client::Factory)
    }

    pub(crate) async fn new(config: ClientConfig) -> gax::client_builder::Result<Self> {
        let inner = ReqwestClient::with_default_endpoint(config)
            .await?
            .with_instrumentation(&crate::info::INSTRUMENTATION_CLIENT_INFO);
        Ok(Self { inner })
    }

    /// Gets an identity.
    pub fn get(&self, id: UserAssignedIdentityId) -> user_assigned_identities::Get {
        user_assigned_identities::Get::new(self.inner.clone(), id)
    }

    /// Creates or updates an identity.
    pub fn create_or_update(
        &self,
        id: UserAssignedIdentityId,
    ) -> user_assigned_identities::CreateOrUpdate {
        user_assigned_identities::CreateOrUpdate::new(self.inner.clone(), id)
    }

    /// Updates the tags of an identity.
    pub fn update(&self, id: UserAssignedIdentityId) -> user_assigned_identities::Update {
        user_assigned_identities::Update::new(self.inner.clone(), id)
    }

    /// Deletes an identity.
    pub fn delete(&self, id: UserAssignedIdentityId) -> user_assigned_identities::Delete {
        user_assigned_identities::Delete::new(self.inner.clone(), id)
    }

    /// Lists the identities in a resource group.
    pub fn list_by_resource_group(
        &self,
        id: ResourceGroupId,
    ) -> user_assigned_identities::ListByResourceGroup {
        user_assigned_identities::ListByResourceGroup::new(self.inner.clone(), id)
    }

    /// Lists the identities in a subscription.
    pub fn list_by_subscription(
        &self,
        id: SubscriptionId,
    ) -> user_assigned_identities::ListBySubscription {
        user_assigned_identities::ListBySubscription::new(self.inner.clone(), id)
    }
}

/// Manages the federated identity credentials of user-assigned identities.
#[derive(Clone, Debug)]
pub struct FederatedIdentityCredentials {
    inner: ReqwestClient,
}

impl FederatedIdentityCredentials {
    /// Returns a builder for [FederatedIdentityCredentials].
    pub fn builder() -> ClientBuilder<federated_identity_credentials::client::Factory> {
        gax::client_builder::internal::new_builder(federated_identity_credentials::client::Factory)
    }

    pub(crate) async fn new(config: ClientConfig) -> gax::client_builder::Result<Self> {
        let inner = ReqwestClient::with_default_endpoint(config)
            .await?
            .with_instrumentation(&crate::info::INSTRUMENTATION_CLIENT_INFO);
        Ok(Self { inner })
    }

    /// Gets a federated identity credential.
    pub fn get(&self, id: FederatedIdentityCredentialId) -> federated_identity_credentials::Get {
        federated_identity_credentials::Get::new(self.inner.clone(), id)
    }

    /// Creates or updates a federated identity credential.
    pub fn create_or_update(
        &self,
        id: FederatedIdentityCredentialId,
    ) -> federated_identity_credentials::CreateOrUpdate {
        federated_identity_credentials::CreateOrUpdate::new(self.inner.clone(), id)
    }

    /// Deletes a federated identity credential.
    pub fn delete(
        &self,
        id: FederatedIdentityCredentialId,
    ) -> federated_identity_credentials::Delete {
        federated_identity_credentials::Delete::new(self.inner.clone(), id)
    }

    /// Lists the federated identity credentials of an identity.
    pub fn list(&self, id: UserAssignedIdentityId) -> federated_identity_credentials::List {
        federated_identity_credentials::List::new(self.inner.clone(), id)
    }
}

/// The builder type for the clients in this crate.
pub type ClientBuilder<F> = gax::client_builder::ClientBuilder<F, gax::credentials::Credentials>;
