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

//! Request builders for each operation.
//!
//! Each builder holds the ID of the target resource, the request body (if
//! any), and the [RequestOptions]. Use the `set_*` methods to configure the
//! request, the `with_*` methods from [RequestOptionsBuilder] to change the
//! options, and then `send()` the request.
//!
//! [RequestOptionsBuilder]: gax::options::RequestOptionsBuilder

use crate::API_VERSION;
use crate::Result;
use futures::future::BoxFuture;
use gax::options::RequestOptions;
use gax::paginator::{Page, PageCursor};
use gax::response::Response;
use gaxi::http::{ExpectedStatus, NoBody, ReqwestClient};
use resourceids::ResourceId;
use serde::de::DeserializeOwned;

/// Fetches the page at a `nextLink` URL.
pub type NextPage<T> = Box<dyn Fn(String) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync>;

/// A cursor over the results of a list operation.
pub type Cursor<T> = PageCursor<T, NextPage<T>>;

fn request<I: ResourceId>(
    stub: &ReqwestClient,
    method: reqwest::Method,
    id: &I,
) -> reqwest::RequestBuilder {
    let builder = stub.builder(method, id.id());
    gaxi::query_parameter::api_version(builder, API_VERSION)
}

fn collection<I: ResourceId>(
    stub: &ReqwestClient,
    parent: &I,
    suffix: &str,
) -> reqwest::RequestBuilder {
    let builder = stub.builder(reqwest::Method::GET, format!("{parent}{suffix}"));
    gaxi::query_parameter::api_version(builder, API_VERSION)
}

fn resource_url<I: ResourceId>(stub: &ReqwestClient, id: &I) -> String {
    format!("{}{}?api-version={API_VERSION}", stub.endpoint(), id.id())
}

/// Issues a GET against a URL returned by the service, without changes.
async fn get_url(
    stub: ReqwestClient,
    url: String,
    options: RequestOptions,
) -> Result<Response<bytes::Bytes>> {
    let builder = stub.builder_for_url(reqwest::Method::GET, &url);
    stub.execute_raw::<NoBody>(builder, None, ExpectedStatus::Success, options)
        .await
}

async fn list<T>(
    stub: ReqwestClient,
    builder: reqwest::RequestBuilder,
    options: RequestOptions,
) -> Result<Cursor<T>>
where
    T: DeserializeOwned + Send + 'static,
{
    let first = stub
        .execute::<NoBody, Page<T>>(builder, None, ExpectedStatus::OK, options.clone())
        .await?
        .into_body();
    let fetch: NextPage<T> = Box::new(move |link: String| -> BoxFuture<'static, Result<Page<T>>> {
        let stub = stub.clone();
        let options = options.clone();
        Box::pin(async move {
            let builder = stub.builder_for_url(reqwest::Method::GET, &link);
            stub.execute::<NoBody, Page<T>>(builder, None, ExpectedStatus::OK, options)
                .await
                .map(Response::into_body)
        })
    });
    Ok(PageCursor::new(first, fetch))
}

pub mod user_assigned_identities {
    use super::*;
    use crate::ids::UserAssignedIdentityId;
    use crate::model::{Identity, IdentityUpdate};
    use gax::context::CallContext;
    use gax::paginator::Predicate;
    use resourceids::{ResourceGroupId, SubscriptionId};

    const COLLECTION: &str = "/providers/Microsoft.ManagedIdentity/userAssignedIdentities";

    pub mod client {
        /// Creates [UserAssignedIdentities][crate::client::UserAssignedIdentities]
        /// clients from a configuration.
        pub struct Factory;
        impl gax::client_builder::internal::ClientFactory for Factory {
            type Client = crate::client::UserAssignedIdentities;
            type Credentials = gax::credentials::Credentials;
            async fn build(
                self,
                config: gaxi::options::ClientConfig,
            ) -> gax::client_builder::Result<Self::Client> {
                Self::Client::new(config).await
            }
        }
    }

    /// The request builder for [UserAssignedIdentities::get][crate::client::UserAssignedIdentities::get] calls.
    #[derive(Clone, Debug)]
    pub struct Get {
        stub: ReqwestClient,
        id: UserAssignedIdentityId,
        options: RequestOptions,
    }

    impl Get {
        pub(crate) fn new(stub: ReqwestClient, id: UserAssignedIdentityId) -> Self {
            Self {
                stub,
                id,
                options: RequestOptions::default(),
            }
        }

        /// Sends the request.
        ///
        /// Returns a [not found][gax::error::Error::is_not_found] error if
        /// the identity does not exist.
        pub async fn send(self) -> Result<Identity> {
            let builder = request(&self.stub, reqwest::Method::GET, &self.id);
            self.stub
                .execute::<NoBody, Identity>(builder, None, ExpectedStatus::OK, self.options)
                .await
                .map(Response::into_body)
        }
    }

    impl gax::options::internal::RequestBuilder for Get {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [UserAssignedIdentities::create_or_update][crate::client::UserAssignedIdentities::create_or_update] calls.
    #[derive(Clone, Debug)]
    pub struct CreateOrUpdate {
        stub: ReqwestClient,
        id: UserAssignedIdentityId,
        request: Identity,
        options: RequestOptions,
    }

    impl CreateOrUpdate {
        pub(crate) fn new(stub: ReqwestClient, id: UserAssignedIdentityId) -> Self {
            Self {
                stub,
                id,
                request: Identity::default(),
                options: RequestOptions::default(),
            }
        }

        /// Sets the full request body.
        pub fn with_request<V: Into<Identity>>(mut self, v: V) -> Self {
            self.request = v.into();
            self
        }

        /// Sets the value of [location][Identity::location].
        pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
            self.request.location = v.into();
            self
        }

        /// Sets the value of [tags][Identity::tags].
        pub fn set_tags<T, K, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: Into<String>,
        {
            self.request = self.request.set_tags(v);
            self
        }

        async fn start(self) -> Result<Response<bytes::Bytes>> {
            if self.request.location.is_empty() {
                return Err(gaxi::path_parameter::missing("location"));
            }
            let builder = request(&self.stub, reqwest::Method::PUT, &self.id);
            self.stub
                .execute_raw(
                    builder,
                    Some(self.request),
                    ExpectedStatus::Codes(&[200, 201]),
                    self.options,
                )
                .await
        }

        /// Sends the request, returning the identity in the response.
        ///
        /// Identities are created synchronously. Use
        /// [poller()][CreateOrUpdate::poller] to handle any asynchronous
        /// response.
        pub async fn send(self) -> Result<Identity> {
            let response = self.start().await?;
            gaxi::http::to_json_response::<Identity>(response).map(Response::into_body)
        }

        /// Creates a [Poller][lro::Poller] to follow the operation until it
        /// completes.
        pub fn poller(self) -> impl lro::Poller<Identity> {
            let (error_policy, backoff_policy) = self.stub.polling_policies(&self.options);
            let resource_url = resource_url(&self.stub, &self.id);
            let stub = self.stub.clone();
            let options = self.options.clone();
            let start = move || self.start();
            let query = move |url: String| get_url(stub.clone(), url, options.clone());
            lro::internal::new_poller(
                error_policy,
                backoff_policy,
                Some(resource_url),
                start,
                query,
            )
        }
    }

    impl gax::options::internal::RequestBuilder for CreateOrUpdate {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [UserAssignedIdentities::update][crate::client::UserAssignedIdentities::update] calls.
    #[derive(Clone, Debug)]
    pub struct Update {
        stub: ReqwestClient,
        id: UserAssignedIdentityId,
        request: IdentityUpdate,
        options: RequestOptions,
    }

    impl Update {
        pub(crate) fn new(stub: ReqwestClient, id: UserAssignedIdentityId) -> Self {
            Self {
                stub,
                id,
                request: IdentityUpdate::default(),
                options: RequestOptions::default(),
            }
        }

        /// Sets the full request body.
        pub fn with_request<V: Into<IdentityUpdate>>(mut self, v: V) -> Self {
            self.request = v.into();
            self
        }

        /// Sets the value of [tags][IdentityUpdate::tags].
        pub fn set_tags<T, K, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: Into<String>,
        {
            self.request = self.request.set_tags(v);
            self
        }

        /// Sends the request.
        pub async fn send(self) -> Result<Identity> {
            let builder = request(&self.stub, reqwest::Method::PATCH, &self.id);
            self.stub
                .execute::<IdentityUpdate, Identity>(
                    builder,
                    Some(self.request),
                    ExpectedStatus::OK,
                    self.options,
                )
                .await
                .map(Response::into_body)
        }
    }

    impl gax::options::internal::RequestBuilder for Update {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [UserAssignedIdentities::delete][crate::client::UserAssignedIdentities::delete] calls.
    #[derive(Clone, Debug)]
    pub struct Delete {
        stub: ReqwestClient,
        id: UserAssignedIdentityId,
        options: RequestOptions,
    }

    impl Delete {
        pub(crate) fn new(stub: ReqwestClient, id: UserAssignedIdentityId) -> Self {
            Self {
                stub,
                id,
                options: RequestOptions::default(),
            }
        }

        async fn start(self) -> Result<Response<bytes::Bytes>> {
            let builder = request(&self.stub, reqwest::Method::DELETE, &self.id);
            self.stub
                .execute_raw::<NoBody>(
                    builder,
                    None,
                    ExpectedStatus::Codes(&[200, 202, 204]),
                    self.options,
                )
                .await
        }

        /// Sends the request.
        ///
        /// A `204 No Content` response, returned when the identity does not
        /// exist, is treated as success.
        pub async fn send(self) -> Result<()> {
            self.start().await.map(|_| ())
        }

        /// Creates a [Poller][lro::Poller] to follow the operation until it
        /// completes.
        pub fn poller(self) -> impl lro::Poller<()> {
            let (error_policy, backoff_policy) = self.stub.polling_policies(&self.options);
            let stub = self.stub.clone();
            let options = self.options.clone();
            let start = move || self.start();
            let query = move |url: String| get_url(stub.clone(), url, options.clone());
            lro::internal::new_unit_poller(error_policy, backoff_policy, start, query)
        }
    }

    impl gax::options::internal::RequestBuilder for Delete {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [UserAssignedIdentities::list_by_resource_group][crate::client::UserAssignedIdentities::list_by_resource_group] calls.
    #[derive(Clone, Debug)]
    pub struct ListByResourceGroup {
        stub: ReqwestClient,
        id: ResourceGroupId,
        options: RequestOptions,
    }

    impl ListByResourceGroup {
        pub(crate) fn new(stub: ReqwestClient, id: ResourceGroupId) -> Self {
            Self {
                stub,
                id,
                options: RequestOptions::default(),
            }
        }

        /// Fetches the first page and returns a cursor over all pages.
        pub async fn send(self) -> Result<Cursor<Identity>> {
            let builder = collection(&self.stub, &self.id, COLLECTION);
            list(self.stub, builder, self.options).await
        }

        /// Returns all the identities in the resource group.
        pub async fn complete(self, ctx: &CallContext) -> Result<Vec<Identity>> {
            ctx.run(self.send()).await?.complete(ctx).await
        }

        /// Returns the identities in the resource group matching `predicate`.
        pub async fn complete_matching<P>(self, ctx: &CallContext, predicate: P) -> Result<Vec<Identity>>
        where
            P: Predicate<Identity>,
        {
            ctx.run(self.send())
                .await?
                .complete_matching(ctx, predicate)
                .await
        }
    }

    impl gax::options::internal::RequestBuilder for ListByResourceGroup {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [UserAssignedIdentities::list_by_subscription][crate::client::UserAssignedIdentities::list_by_subscription] calls.
    #[derive(Clone, Debug)]
    pub struct ListBySubscription {
        stub: ReqwestClient,
        id: SubscriptionId,
        options: RequestOptions,
    }

    impl ListBySubscription {
        pub(crate) fn new(stub: ReqwestClient, id: SubscriptionId) -> Self {
            Self {
                stub,
                id,
                options: RequestOptions::default(),
            }
        }

        /// Fetches the first page and returns a cursor over all pages.
        pub async fn send(self) -> Result<Cursor<Identity>> {
            let builder = collection(&self.stub, &self.id, COLLECTION);
            list(self.stub, builder, self.options).await
        }

        /// Returns all the identities in the subscription.
        pub async fn complete(self, ctx: &CallContext) -> Result<Vec<Identity>> {
            ctx.run(self.send()).await?.complete(ctx).await
        }

        /// Returns the identities in the subscription matching `predicate`.
        pub async fn complete_matching<P>(self, ctx: &CallContext, predicate: P) -> Result<Vec<Identity>>
        where
            P: Predicate<Identity>,
        {
            ctx.run(self.send())
                .await?
                .complete_matching(ctx, predicate)
                .await
        }
    }

    impl gax::options::internal::RequestBuilder for ListBySubscription {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }
}

pub mod federated_identity_credentials {
    use super::*;
    use crate::ids::{FederatedIdentityCredentialId, UserAssignedIdentityId};
    use crate::model::{FederatedIdentityCredential, FederatedIdentityCredentialProperties};
    use gax::context::CallContext;

    const COLLECTION: &str = "/federatedIdentityCredentials";

    pub mod client {
        /// Creates [FederatedIdentityCredentials][crate::client::FederatedIdentityCredentials]
        /// clients from a configuration.
        pub struct Factory;
        impl gax::client_builder::internal::ClientFactory for Factory {
            type Client = crate::client::FederatedIdentityCredentials;
            type Credentials = gax::credentials::Credentials;
            async fn build(
                self,
                config: gaxi::options::ClientConfig,
            ) -> gax::client_builder::Result<Self::Client> {
                Self::Client::new(config).await
            }
        }
    }

    /// The request builder for [FederatedIdentityCredentials::get][crate::client::FederatedIdentityCredentials::get] calls.
    #[derive(Clone, Debug)]
    pub struct Get {
        stub: ReqwestClient,
        id: FederatedIdentityCredentialId,
        options: RequestOptions,
    }

    impl Get {
        pub(crate) fn new(stub: ReqwestClient, id: FederatedIdentityCredentialId) -> Self {
            Self {
                stub,
                id,
                options: RequestOptions::default(),
            }
        }

        /// Sends the request.
        pub async fn send(self) -> Result<FederatedIdentityCredential> {
            let builder = request(&self.stub, reqwest::Method::GET, &self.id);
            self.stub
                .execute::<NoBody, FederatedIdentityCredential>(
                    builder,
                    None,
                    ExpectedStatus::OK,
                    self.options,
                )
                .await
                .map(Response::into_body)
        }
    }

    impl gax::options::internal::RequestBuilder for Get {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [FederatedIdentityCredentials::create_or_update][crate::client::FederatedIdentityCredentials::create_or_update] calls.
    #[derive(Clone, Debug)]
    pub struct CreateOrUpdate {
        stub: ReqwestClient,
        id: FederatedIdentityCredentialId,
        request: FederatedIdentityCredential,
        options: RequestOptions,
    }

    impl CreateOrUpdate {
        pub(crate) fn new(stub: ReqwestClient, id: FederatedIdentityCredentialId) -> Self {
            Self {
                stub,
                id,
                request: FederatedIdentityCredential::default(),
                options: RequestOptions::default(),
            }
        }

        /// Sets the value of [properties][FederatedIdentityCredential::properties].
        pub fn set_properties<T: Into<FederatedIdentityCredentialProperties>>(mut self, v: T) -> Self {
            self.request = self.request.set_properties(v);
            self
        }

        /// Sends the request.
        pub async fn send(self) -> Result<FederatedIdentityCredential> {
            let builder = request(&self.stub, reqwest::Method::PUT, &self.id);
            self.stub
                .execute::<FederatedIdentityCredential, FederatedIdentityCredential>(
                    builder,
                    Some(self.request),
                    ExpectedStatus::Codes(&[200, 201]),
                    self.options,
                )
                .await
                .map(Response::into_body)
        }
    }

    impl gax::options::internal::RequestBuilder for CreateOrUpdate {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [FederatedIdentityCredentials::delete][crate::client::FederatedIdentityCredentials::delete] calls.
    #[derive(Clone, Debug)]
    pub struct Delete {
        stub: ReqwestClient,
        id: FederatedIdentityCredentialId,
        options: RequestOptions,
    }

    impl Delete {
        pub(crate) fn new(stub: ReqwestClient, id: FederatedIdentityCredentialId) -> Self {
            Self {
                stub,
                id,
                options: RequestOptions::default(),
            }
        }

        /// Sends the request.
        pub async fn send(self) -> Result<()> {
            let builder = request(&self.stub, reqwest::Method::DELETE, &self.id);
            self.stub
                .execute_raw::<NoBody>(builder, None, ExpectedStatus::Codes(&[200, 204]), self.options)
                .await
                .map(|_| ())
        }
    }

    impl gax::options::internal::RequestBuilder for Delete {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [FederatedIdentityCredentials::list][crate::client::FederatedIdentityCredentials::list] calls.
    #[derive(Clone, Debug)]
    pub struct List {
        stub: ReqwestClient,
        id: UserAssignedIdentityId,
        top: Option<i32>,
        skiptoken: Option<String>,
        options: RequestOptions,
    }

    impl List {
        pub(crate) fn new(stub: ReqwestClient, id: UserAssignedIdentityId) -> Self {
            Self {
                stub,
                id,
                top: None,
                skiptoken: None,
                options: RequestOptions::default(),
            }
        }

        /// Sets the maximum number of credentials in each page.
        pub fn set_top(mut self, v: i32) -> Self {
            self.top = Some(v);
            self
        }

        /// Starts the listing from a `$skiptoken` returned in a previous
        /// `nextLink`.
        pub fn set_skiptoken<T: Into<String>>(mut self, v: T) -> Self {
            self.skiptoken = Some(v.into());
            self
        }

        /// Fetches the first page and returns a cursor over all pages.
        pub async fn send(self) -> Result<Cursor<FederatedIdentityCredential>> {
            let builder = collection(&self.stub, &self.id, COLLECTION);
            let builder = gaxi::query_parameter::add(builder, "$top", self.top);
            let builder = gaxi::query_parameter::add(builder, "$skiptoken", self.skiptoken);
            list(self.stub, builder, self.options).await
        }

        /// Returns all the credentials of the identity.
        pub async fn complete(self, ctx: &CallContext) -> Result<Vec<FederatedIdentityCredential>> {
            ctx.run(self.send()).await?.complete(ctx).await
        }
    }

    impl gax::options::internal::RequestBuilder for List {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }
}
