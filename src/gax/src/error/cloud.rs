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

use serde::{Deserialize, Serialize};

/// The error details returned by Azure Resource Manager.
///
/// This is the contents of the `error` field in the ARM error envelope. Some
/// services (and most long-running operation status endpoints) also use this
/// shape for the `error` field of an operation status.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct CloudError {
    /// A service-defined error code, e.g. `ResourceNotFound`.
    #[serde(default)]
    pub code: String,

    /// A human readable description of the problem.
    #[serde(default)]
    pub message: String,

    /// The target of the error, typically a property name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Nested errors, in the same format.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<CloudError>,

    /// Additional information, the format is service specific.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_info: Vec<serde_json::Value>,
}

impl CloudError {
    /// Creates a new error with the given code and message.
    pub fn new<C: Into<String>, M: Into<String>>(code: C, message: M) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// Sets the [target][CloudError::target] field.
    pub fn set_target<T: Into<String>>(mut self, v: T) -> Self {
        self.target = Some(v.into());
        self
    }

    /// Sets the [details][CloudError::details] field.
    pub fn set_details<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<CloudError>,
    {
        self.details = v.into_iter().map(|e| e.into()).collect();
        self
    }
}

impl std::fmt::Display for CloudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.target {
            Some(t) => write!(f, "{} ({t}): {}", self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    error: CloudError,
}

/// Parses the ARM error envelope.
///
/// Some services omit the envelope and return the error fields at the top
/// level. Both forms are accepted, but the flat form must at least include a
/// `code`.
impl TryFrom<&bytes::Bytes> for CloudError {
    type Error = serde_json::Error;

    fn try_from(value: &bytes::Bytes) -> Result<Self, Self::Error> {
        match serde_json::from_slice::<Envelope>(value) {
            Ok(e) => Ok(e.error),
            Err(e) => {
                let flat = serde_json::from_slice::<CloudError>(value)?;
                if flat.code.is_empty() {
                    return Err(e);
                }
                Ok(flat)
            }
        }
    }
}

/// The terminal failure of a long-running operation.
///
/// Reported when the operation status endpoint returns a `Failed` or
/// `Canceled` provisioning state. The `code` and `message` are copied verbatim
/// from the service.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct OperationFailure {
    /// The terminal provisioning state, e.g. `Failed` or `Canceled`.
    pub status: String,
    /// The service-reported error code, if any.
    pub code: String,
    /// The service-reported error message, if any.
    pub message: String,
}

impl OperationFailure {
    pub fn new<S: Into<String>>(status: S) -> Self {
        Self {
            status: status.into(),
            ..Default::default()
        }
    }

    pub fn set_code<T: Into<String>>(mut self, v: T) -> Self {
        self.code = v.into();
        self
    }

    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }
}

impl From<(String, Option<CloudError>)> for OperationFailure {
    fn from((status, error): (String, Option<CloudError>)) -> Self {
        let error = error.unwrap_or_default();
        Self {
            status,
            code: error.code,
            message: error.message,
        }
    }
}

impl std::fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "the long-running operation ended in state {}", self.status)?;
        if !self.code.is_empty() || !self.message.is_empty() {
            write!(f, " with code {}: {}", self.code, self.message)?;
        }
        Ok(())
    }
}
