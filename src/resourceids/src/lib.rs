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

//! Azure Resource Manager resource IDs.
//!
//! Resources in Azure Resource Manager are identified by hierarchical paths,
//! such as:
//!
//! ```norust
//! /subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.ManagedIdentity/userAssignedIdentities/{name}
//! ```
//!
//! Each type of ID is described by a list of [Segment]s. This crate parses
//! strings against such a list, and formats typed IDs back to their canonical
//! form. Generated clients define one type per ID shape and implement
//! [ResourceId] for it.
//!
//! IDs provided by the user (for example, in configuration) must be parsed
//! with [ResourceId::parse]. IDs returned by the service may use
//! inconsistent casing for the static segments, use
//! [ResourceId::parse_insensitively] for those.

mod common;
mod error;
mod parser;
mod segment;

/// Validate user-provided values.
pub mod validate;

pub use common::{ResourceGroupId, ScopeId, SubscriptionId};
pub use error::ParseError;
pub use parser::{ParsedId, Parser};
pub use segment::{Segment, SegmentKind, example_id};

/// A typed resource ID.
///
/// Implementations are plain structs holding the value of each non-fixed
/// segment. Use [impl_resource_id] to implement `Display`, `FromStr` and the
/// serde traits in terms of this trait.
///
/// # Example
/// ```
/// # use azure_rm_resourceids::{ResourceGroupId, ResourceId};
/// let id = ResourceGroupId::parse("/subscriptions/abc/resourceGroups/rg1")?;
/// assert_eq!(id.subscription_id, "abc");
/// assert_eq!(id.resource_group_name, "rg1");
/// assert_eq!(id.id(), "/subscriptions/abc/resourceGroups/rg1");
/// # Ok::<(), azure_rm_resourceids::ParseError>(())
/// ```
pub trait ResourceId: std::fmt::Display + Sized {
    /// The segments describing this type of ID.
    fn segments() -> &'static [Segment];

    /// Builds the ID from the result of parsing its segments.
    fn from_parsed(parsed: &ParsedId) -> Result<Self, ParseError>;

    /// The values of the non-fixed segments, in order.
    fn values(&self) -> Vec<&str>;

    /// Formats the ID using the canonical casing.
    fn id(&self) -> String {
        parser::format_id(Self::segments(), &self.values())
    }

    /// Parses `input`, all static segments must use the canonical casing.
    fn parse(input: &str) -> Result<Self, ParseError> {
        let parsed = Parser::new(Self::segments()).parse(input, false)?;
        Self::from_parsed(&parsed)
    }

    /// Parses `input`, ignoring the casing of the static segments.
    ///
    /// Do not use this function to validate IDs provided by the user.
    fn parse_insensitively(input: &str) -> Result<Self, ParseError> {
        let parsed = Parser::new(Self::segments()).parse(input, true)?;
        Self::from_parsed(&parsed)
    }
}

/// Implements `Display`, `FromStr`, `Serialize` and `Deserialize` for a
/// [ResourceId].
///
/// IDs serialize as their canonical string. They deserialize using
/// [ResourceId::parse_insensitively], as serialized IDs are expected to come
/// from the service.
#[macro_export]
macro_rules! impl_resource_id {
    ($t:ty) => {
        impl std::fmt::Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::ResourceId::id(self))
            }
        }

        impl std::str::FromStr for $t {
            type Err = $crate::ParseError;
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                <$t as $crate::ResourceId>::parse(s)
            }
        }

        impl $crate::__private::serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str(&$crate::ResourceId::id(self))
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                use $crate::__private::serde::de::Error as _;
                let s = <std::string::String as $crate::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                <$t as $crate::ResourceId>::parse_insensitively(&s).map_err(D::Error::custom)
            }
        }
    };
}

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
