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

//! IDs shared by all resource providers.

use crate::{ParseError, ParsedId, ResourceId, Segment};

const SUBSCRIPTION_SEGMENTS: &[Segment] = &[
    Segment::static_segment("staticSubscriptions", "subscriptions"),
    Segment::subscription_id("subscriptionId"),
];

const RESOURCE_GROUP_SEGMENTS: &[Segment] = &[
    Segment::static_segment("staticSubscriptions", "subscriptions"),
    Segment::subscription_id("subscriptionId"),
    Segment::static_segment("staticResourceGroups", "resourceGroups"),
    Segment::resource_group("resourceGroupName"),
];

const SCOPE_SEGMENTS: &[Segment] = &[Segment::scope("scope")];

/// Identifies a subscription: `/subscriptions/{subscriptionId}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    pub subscription_id: String,
}

impl SubscriptionId {
    pub fn new<T: Into<String>>(subscription_id: T) -> Self {
        Self {
            subscription_id: subscription_id.into(),
        }
    }
}

impl ResourceId for SubscriptionId {
    fn segments() -> &'static [Segment] {
        SUBSCRIPTION_SEGMENTS
    }

    fn from_parsed(parsed: &ParsedId) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: parsed.required(&SUBSCRIPTION_SEGMENTS[1])?,
        })
    }

    fn values(&self) -> Vec<&str> {
        vec![self.subscription_id.as_str()]
    }
}

crate::impl_resource_id!(SubscriptionId);

/// Identifies a resource group:
/// `/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceGroupId {
    pub subscription_id: String,
    pub resource_group_name: String,
}

impl ResourceGroupId {
    pub fn new<S, R>(subscription_id: S, resource_group_name: R) -> Self
    where
        S: Into<String>,
        R: Into<String>,
    {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
        }
    }

    /// The subscription containing this resource group.
    pub fn subscription(&self) -> SubscriptionId {
        SubscriptionId::new(&self.subscription_id)
    }
}

impl ResourceId for ResourceGroupId {
    fn segments() -> &'static [Segment] {
        RESOURCE_GROUP_SEGMENTS
    }

    fn from_parsed(parsed: &ParsedId) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: parsed.required(&RESOURCE_GROUP_SEGMENTS[1])?,
            resource_group_name: parsed.required(&RESOURCE_GROUP_SEGMENTS[3])?,
        })
    }

    fn values(&self) -> Vec<&str> {
        vec![self.subscription_id.as_str(), self.resource_group_name.as_str()]
    }
}

crate::impl_resource_id!(ResourceGroupId);

/// Any parent scope, such as a subscription, a resource group, or a resource.
///
/// Extension resources (locks, role assignments, diagnostic settings) are
/// children of an arbitrary scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId {
    pub scope: String,
}

impl ScopeId {
    pub fn new<T: Into<String>>(scope: T) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl ResourceId for ScopeId {
    fn segments() -> &'static [Segment] {
        SCOPE_SEGMENTS
    }

    fn from_parsed(parsed: &ParsedId) -> Result<Self, ParseError> {
        Ok(Self {
            scope: parsed.required(&SCOPE_SEGMENTS[0])?,
        })
    }

    fn values(&self) -> Vec<&str> {
        vec![self.scope.as_str()]
    }
}

crate::impl_resource_id!(ScopeId);
