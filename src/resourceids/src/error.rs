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

/// A failure to parse a resource ID.
///
/// These errors convert to [gax::error::Error] as binding errors. The
/// original error is available via [std::error::Error::source].
///
/// # Example
/// ```
/// # use azure_rm_resourceids::{ParseError, ResourceGroupId, ResourceId};
/// let err = ResourceGroupId::parse("/subscriptions/abc").unwrap_err();
/// assert!(matches!(err, ParseError::MissingSegment { name: "staticResourceGroups", .. }));
/// ```
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The input was empty.
    #[error("the resource ID is empty")]
    Empty,

    /// A segment did not match the expected value.
    #[error("parsing {input:?}: the segment `{name}` should be {expected:?}, found {found:?}")]
    Malformed {
        input: String,
        name: &'static str,
        expected: String,
        found: String,
    },

    /// The input ended before this segment.
    #[error("parsing {input:?}: the segment `{name}` is missing, expected a value like {example:?}")]
    MissingSegment {
        input: String,
        name: &'static str,
        example: String,
    },

    /// A segment that requires a value was empty.
    #[error("parsing {input:?}: the segment `{name}` has an empty value")]
    EmptyValue { input: String, name: &'static str },

    /// A constant segment had a value outside its allowed set.
    #[error("parsing {input:?}: the segment `{name}` should be one of {allowed:?}, found {found:?}")]
    InvalidConstant {
        input: String,
        name: &'static str,
        allowed: &'static [&'static str],
        found: String,
    },

    /// The input has more components than the ID template.
    #[error("parsing {input:?}: unexpected trailing data {extra:?}")]
    ExtraSegments { input: String, extra: String },
}

impl ParseError {
    /// The name of the segment that failed, if the error is about a specific
    /// segment.
    pub fn segment_name(&self) -> Option<&'static str> {
        match self {
            Self::Malformed { name, .. }
            | Self::MissingSegment { name, .. }
            | Self::EmptyValue { name, .. }
            | Self::InvalidConstant { name, .. } => Some(name),
            Self::Empty | Self::ExtraSegments { .. } => None,
        }
    }
}

impl From<ParseError> for gax::error::Error {
    fn from(value: ParseError) -> Self {
        gax::error::Error::binding(value)
    }
}
