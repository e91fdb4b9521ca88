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

//! Credentials used to authenticate requests.
//!
//! Azure Resource Manager authenticates requests using a bearer token issued
//! by Microsoft Entra ID. Obtaining those tokens (client secrets, managed
//! identities, the Azure CLI, workload identity federation) is outside the
//! scope of these libraries. Applications provide an implementation of
//! [CredentialsProvider], and the clients call it before each request.
//!
//! # Example
//! ```
//! # use azure_rm_gax::credentials::*;
//! # tokio_test::block_on(async {
//! let credentials = Credentials::from(BearerToken::new("my-token"));
//! let headers = credentials.headers().await?;
//! assert_eq!(headers.get(http::header::AUTHORIZATION).map(|v| v.as_bytes()), Some("Bearer my-token".as_bytes()));
//! # Ok::<(), azure_rm_gax::error::CredentialsError>(()) });
//! ```

use crate::error::CredentialsError;
use http::{HeaderMap, HeaderValue};
use std::future::Future;
use std::sync::Arc;

/// The result of a credentials operation.
pub type Result<T> = std::result::Result<T, CredentialsError>;

/// A type-erased, cheap to clone, credentials provider.
///
/// Clients hold one of these values and share it across threads.
#[derive(Clone, Debug)]
pub struct Credentials {
    inner: Arc<dyn dynamic::CredentialsProvider>,
}

impl<T> std::convert::From<T> for Credentials
where
    T: CredentialsProvider + Send + Sync + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Credentials {
    /// Returns the headers to authenticate a request.
    pub async fn headers(&self) -> Result<HeaderMap> {
        self.inner.headers().await
    }
}

impl Default for Credentials {
    /// Creates anonymous credentials.
    ///
    /// These are only useful in tests, Azure Resource Manager rejects
    /// unauthenticated requests.
    fn default() -> Self {
        Self::from(Anonymous)
    }
}

/// Implemented by all the credential types.
///
/// Applications implement this trait to integrate their own token source.
/// The implementation should cache and refresh tokens as needed, the clients
/// call [headers][CredentialsProvider::headers] before each request.
pub trait CredentialsProvider: std::fmt::Debug {
    /// Asynchronously constructs the authentication headers.
    fn headers(&self) -> impl Future<Output = Result<HeaderMap>> + Send;
}

pub mod dynamic {
    use super::{HeaderMap, Result};

    /// A dyn-compatible, crate-private version of `CredentialsProvider`.
    #[async_trait::async_trait]
    pub trait CredentialsProvider: Send + Sync + std::fmt::Debug {
        /// Asynchronously constructs the authentication headers.
        async fn headers(&self) -> Result<HeaderMap>;
    }

    /// The public CredentialsProvider implements the dyn-compatible version.
    #[async_trait::async_trait]
    impl<T> CredentialsProvider for T
    where
        T: super::CredentialsProvider + Send + Sync,
    {
        async fn headers(&self) -> Result<HeaderMap> {
            T::headers(self).await
        }
    }
}

/// Credentials that add no headers.
#[derive(Clone, Debug, Default)]
pub struct Anonymous;

impl CredentialsProvider for Anonymous {
    async fn headers(&self) -> Result<HeaderMap> {
        Ok(HeaderMap::new())
    }
}

/// Credentials using a fixed bearer token.
///
/// The token is never refreshed. This is useful for short-lived programs that
/// obtain a token out of band, e.g. via `az account get-access-token`.
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new<T: Into<String>>(token: T) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"[censored]")
            .finish()
    }
}

impl CredentialsProvider for BearerToken {
    async fn headers(&self) -> Result<HeaderMap> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|e| CredentialsError::from_source(false, e))?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(http::header::AUTHORIZATION, value);
        Ok(headers)
    }
}
