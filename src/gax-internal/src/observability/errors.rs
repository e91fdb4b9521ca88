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

use super::attributes::error_type_values as values;
use gax::error::Error;
use http::StatusCode;

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorType {
    HttpError {
        code: StatusCode,
        /// The ARM error code, e.g. `ResourceNotFound`, if the service
        /// returned one.
        reason: Option<String>,
    },
    ClientTimeout,
    ClientConnectionError,
    ClientRequestError,
    ClientRequestBodyError,
    ClientResponseDecodeError,
    ClientRedirectError,
    ClientAuthenticationError,
    Internal,
}

// Trait to abstract reqwest::Error for testing
pub trait ReqwestErrorDetails {
    fn is_timeout(&self) -> bool;
    fn is_connect(&self) -> bool;
    fn is_request(&self) -> bool;
    fn is_body(&self) -> bool;
    fn is_decode(&self) -> bool;
    fn is_redirect(&self) -> bool;
}

impl ReqwestErrorDetails for reqwest::Error {
    fn is_timeout(&self) -> bool {
        self.is_timeout()
    }
    fn is_connect(&self) -> bool {
        self.is_connect()
    }
    fn is_request(&self) -> bool {
        self.is_request()
    }
    fn is_body(&self) -> bool {
        self.is_body()
    }
    fn is_decode(&self) -> bool {
        self.is_decode()
    }
    fn is_redirect(&self) -> bool {
        self.is_redirect()
    }
}

impl ErrorType {
    pub(crate) fn from_reqwest_error<E>(err: &E) -> Self
    where
        E: ReqwestErrorDetails,
    {
        match err {
            e if e.is_timeout() => ErrorType::ClientTimeout,
            e if e.is_connect() => ErrorType::ClientConnectionError,
            e if e.is_request() => ErrorType::ClientRequestError,
            e if e.is_body() => ErrorType::ClientRequestBodyError,
            e if e.is_decode() => ErrorType::ClientResponseDecodeError,
            e if e.is_redirect() => ErrorType::ClientRedirectError,
            _ => ErrorType::Internal,
        }
    }

    pub(crate) fn from_gax_error(err: &Error) -> Self {
        if let Some(code) = err
            .http_status_code()
            .and_then(|c| StatusCode::from_u16(c).ok())
        {
            let reason = err.cloud_error().map(|e| e.code.clone());
            return ErrorType::HttpError { code, reason };
        }
        if err.is_timeout() {
            return ErrorType::ClientTimeout;
        }
        if err.is_authentication() {
            return ErrorType::ClientAuthenticationError;
        }
        if err.is_deserialization() {
            return ErrorType::ClientResponseDecodeError;
        }
        if err.is_transport() {
            use std::error::Error as _;
            return err
                .source()
                .and_then(|e| e.downcast_ref::<reqwest::Error>())
                .map(Self::from_reqwest_error)
                .unwrap_or(ErrorType::Internal);
        }
        ErrorType::Internal
    }

    pub(crate) fn as_str(&self) -> String {
        match self {
            ErrorType::HttpError {
                reason: Some(r), ..
            } if !r.is_empty() => r.clone(),
            ErrorType::HttpError { code, .. } => code.as_str().to_string(),
            ErrorType::ClientTimeout => values::CLIENT_TIMEOUT.to_string(),
            ErrorType::ClientConnectionError => values::CLIENT_CONNECTION_ERROR.to_string(),
            ErrorType::ClientRequestError => values::CLIENT_REQUEST_ERROR.to_string(),
            ErrorType::ClientRequestBodyError => values::CLIENT_REQUEST_BODY_ERROR.to_string(),
            ErrorType::ClientResponseDecodeError => {
                values::CLIENT_RESPONSE_DECODE_ERROR.to_string()
            }
            ErrorType::ClientRedirectError => values::CLIENT_REDIRECT_ERROR.to_string(),
            ErrorType::ClientAuthenticationError => {
                values::CLIENT_AUTHENTICATION_ERROR.to_string()
            }
            ErrorType::Internal => values::INTERNAL.to_string(),
        }
    }
}
