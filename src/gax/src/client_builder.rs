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

//! Configure and build Azure Resource Manager clients.
//!
//! Each client type has a `builder()` function returning a [ClientBuilder].
//! The defaults target the Azure public cloud, send anonymous requests, and
//! poll long-running operations with [ArmStrict][crate::polling::ArmStrict]
//! and the default [ExponentialBackoff][crate::polling::ExponentialBackoff].
//!
//! # Example
//! ```
//! # use azure_rm_gax::client_builder::{Cloud, Result, examples::Client};
//! # use azure_rm_gax::credentials::BearerToken;
//! # tokio_test::block_on(async {
//! let client = Client::builder()
//!     .with_cloud(Cloud::AzureUsGovernment)
//!     .with_credentials(BearerToken::new("token-for-management.usgovcloudapi.net"))
//!     .build()
//!     .await?;
//! # Result::<()>::Ok(()) });
//! ```

use crate::polling::{PollingBackoffPolicyArg, PollingErrorPolicyArg, PollingOptions};

pub type Result<T> = std::result::Result<T, Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A client could not be built.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The endpoint is not a valid URL.
    #[error("the endpoint is not a valid URL")]
    Endpoint(#[source] BoxError),
    /// The HTTP client could not be initialized, for example, because the
    /// TLS roots are not available.
    #[error("cannot initialize the HTTP client")]
    Transport(#[source] BoxError),
}

impl Error {
    pub fn is_endpoint(&self) -> bool {
        matches!(self, Self::Endpoint(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    #[cfg_attr(not(feature = "_internal-semver"), doc(hidden))]
    pub fn endpoint<T: Into<BoxError>>(source: T) -> Self {
        Self::Endpoint(source.into())
    }

    #[cfg_attr(not(feature = "_internal-semver"), doc(hidden))]
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self::Transport(source.into())
    }
}

/// The Azure clouds with a Resource Manager endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Cloud {
    AzurePublic,
    AzureUsGovernment,
    AzureChina,
}

impl Cloud {
    /// The Resource Manager endpoint of the cloud.
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::AzurePublic => "https://management.azure.com",
            Self::AzureUsGovernment => "https://management.usgovcloudapi.net",
            Self::AzureChina => "https://management.chinacloudapi.cn",
        }
    }
}

/// Builds a client of type `C`, using the factory `F`.
///
/// `Cr` is the credentials type, applications only see
/// [Credentials][crate::credentials::Credentials].
#[derive(Clone, Debug)]
pub struct ClientBuilder<F, Cr> {
    config: internal::ClientConfig<Cr>,
    factory: F,
}

impl<F, Cr> ClientBuilder<F, Cr> {
    pub async fn build<C>(self) -> Result<C>
    where
        F: internal::ClientFactory<Client = C, Credentials = Cr>,
    {
        self.factory.build(self.config).await
    }

    /// Sends requests to `v` instead of the public cloud.
    ///
    /// Use it for private endpoints and test servers. For sovereign clouds
    /// prefer [with_cloud][ClientBuilder::with_cloud].
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.config.endpoint = Some(v.into());
        self
    }

    /// Sends requests to the Resource Manager endpoint of `cloud`.
    pub fn with_cloud(self, cloud: Cloud) -> Self {
        self.with_endpoint(cloud.endpoint())
    }

    /// Instruments each HTTP attempt with a `tracing` span.
    ///
    /// Setting `AZURE_RM_RUST_LOGGING=true` in the environment has the same
    /// effect.
    pub fn with_tracing(mut self) -> Self {
        self.config.tracing = true;
        self
    }

    /// Authenticates requests with `v`.
    pub fn with_credentials<T: Into<Cr>>(mut self, v: T) -> Self {
        self.config.cred = Some(v.into());
        self
    }

    /// Classifies failed status queries of long-running operations.
    ///
    /// ```
    /// # use azure_rm_gax::client_builder::{Result, examples::Client};
    /// use azure_rm_gax::polling::{ArmStrict, PollingErrorPolicyExt};
    /// use std::time::Duration;
    /// # tokio_test::block_on(async {
    /// // Give up on operations still running after 90 minutes.
    /// let client = Client::builder()
    ///     .with_polling_error_policy(ArmStrict.with_time_limit(Duration::from_secs(90 * 60)))
    ///     .build()
    ///     .await?;
    /// # Result::<()>::Ok(()) });
    /// ```
    pub fn with_polling_error_policy<V: Into<PollingErrorPolicyArg>>(mut self, v: V) -> Self {
        self.config.polling.set_error_policy(v);
        self
    }

    /// Chooses the wait between status queries, when the service does not
    /// send `Retry-After`.
    pub fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(mut self, v: V) -> Self {
        self.config.polling.set_backoff_policy(v);
        self
    }
}

#[cfg_attr(not(feature = "_internal-semver"), doc(hidden))]
pub mod internal {
    use super::*;

    /// Creates the client from the configuration collected by the builder.
    pub trait ClientFactory {
        type Client;
        type Credentials;
        fn build(
            self,
            config: ClientConfig<Self::Credentials>,
        ) -> impl Future<Output = Result<Self::Client>>;
    }

    pub fn new_builder<F, Cr, C>(factory: F) -> ClientBuilder<F, Cr>
    where
        F: ClientFactory<Client = C, Credentials = Cr>,
    {
        ClientBuilder {
            factory,
            config: ClientConfig::default(),
        }
    }

    /// The configuration collected by a [ClientBuilder].
    #[derive(Clone, Debug)]
    pub struct ClientConfig<Cr> {
        pub endpoint: Option<String>,
        pub cred: Option<Cr>,
        pub tracing: bool,
        pub polling: PollingOptions,
    }

    impl<Cr> Default for ClientConfig<Cr> {
        fn default() -> Self {
            Self {
                endpoint: None,
                cred: None,
                tracing: false,
                polling: PollingOptions::default(),
            }
        }
    }
}

#[doc(hidden)]
pub mod examples {
    //! A client that records its configuration, used in the documentation.

    use super::internal::{ClientConfig, ClientFactory, new_builder};
    use super::{ClientBuilder, Result};
    use crate::credentials::Credentials;

    pub struct Client(pub ClientConfig<Credentials>);

    impl Client {
        pub fn builder() -> ClientBuilder<Factory, Credentials> {
            new_builder(Factory)
        }
    }

    pub struct Factory;

    impl ClientFactory for Factory {
        type Client = Client;
        type Credentials = Credentials;
        async fn build(self, config: ClientConfig<Credentials>) -> Result<Client> {
            Ok(Client(config))
        }
    }
}
