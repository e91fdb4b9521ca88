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

//! Response types.
//!
//! This module contains types related to Azure Resource Manager responses.
//! Notably it contains the `Response` type itself.
//!
//! # Examples
//!
//! Creating a response for mocks
//!
//! ```
//! # use azure_rm_gax::Result;
//! # use azure_rm_gax::response::Response;
//! // A type representing an Azure resource, for example, a user-assigned
//! // identity.
//! struct Resource {
//!   // ...
//! }
//!
//! fn make_mock_response(body: Resource) -> Result<Response<Resource>> {
//!     Ok(Response::from(body))
//! }
//! ```

/// Represents an Azure Resource Manager response.
///
/// A response consists of a body (potentially the unit type), the HTTP status
/// code, and the HTTP headers. The status code and headers matter for
/// long-running operations: a `201` or `202` with an `Azure-AsyncOperation` or
/// `Location` header indicates the operation continues in the background.
#[derive(Clone, Debug)]
pub struct Response<T> {
    parts: Parts,
    body: T,
}

impl<T> Response<T> {
    /// Creates a response from the body, with a `200 OK` status and no
    /// headers.
    ///
    /// # Example
    /// ```
    /// # use azure_rm_gax::response::Response;
    /// let response = Response::from("test".to_string());
    /// assert_eq!(response.status(), http::StatusCode::OK);
    /// ```
    pub fn from(body: T) -> Self {
        Self {
            body,
            parts: Parts::default(),
        }
    }

    /// Creates a response from the given parts.
    ///
    /// # Example
    /// ```
    /// # use azure_rm_gax::response::Response;
    /// # use azure_rm_gax::response::Parts;
    /// let mut headers = http::HeaderMap::new();
    /// headers.insert(http::header::RETRY_AFTER, http::HeaderValue::from_static("10"));
    /// let parts = Parts::new()
    ///     .set_status(http::StatusCode::ACCEPTED)
    ///     .set_headers(headers);
    /// let response = Response::from_parts(parts, ());
    /// assert_eq!(response.status(), http::StatusCode::ACCEPTED);
    /// assert!(response.headers().get(http::header::RETRY_AFTER).is_some());
    /// ```
    pub fn from_parts(parts: Parts, body: T) -> Self {
        Self { parts, body }
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> http::StatusCode {
        self.parts.status
    }

    /// Returns the headers associated with this response.
    pub fn headers(&self) -> &http::HeaderMap<http::HeaderValue> {
        &self.parts.headers
    }

    /// Returns the body associated with this response.
    pub fn body(&self) -> &T {
        &self.body
    }

    /// Consumes the response returning the metadata, and body.
    pub fn into_parts(self) -> (Parts, T) {
        (self.parts, self.body)
    }

    /// Consumes the response returning only its body.
    pub fn into_body(self) -> T {
        self.body
    }

    /// Transforms the body, keeping the status and headers.
    ///
    /// # Example
    /// ```
    /// # use azure_rm_gax::response::Response;
    /// let response = Response::from("42".to_string());
    /// let response = response.map(|b| b.len());
    /// assert_eq!(response.body(), &2);
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            parts: self.parts,
            body: f(self.body),
        }
    }
}

/// Component parts of a response.
///
/// The response parts, other than the body, consist of the status code and
/// the headers.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct Parts {
    /// The HTTP status code.
    pub status: http::StatusCode,
    /// The HTTP headers.
    pub headers: http::HeaderMap<http::HeaderValue>,
}

impl Parts {
    /// Create a new instance.
    pub fn new() -> Self {
        Parts::default()
    }

    /// Set the status code.
    pub fn set_status<V>(mut self, v: V) -> Self
    where
        V: Into<http::StatusCode>,
    {
        self.status = v.into();
        self
    }

    /// Set the headers.
    pub fn set_headers<V>(mut self, v: V) -> Self
    where
        V: Into<http::HeaderMap>,
    {
        self.headers = v.into();
        self
    }
}
