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

//! The building blocks of resource ID templates.

/// One component of a resource ID template.
///
/// Each segment matches exactly one `/`-separated component of a resource ID,
/// except for [SegmentKind::Scope], which matches one or more components at
/// the start of the ID.
///
/// # Example
/// ```
/// # use azure_rm_resourceids::{Segment, SegmentKind};
/// const SEGMENTS: &[Segment] = &[
///     Segment::static_segment("staticSubscriptions", "subscriptions"),
///     Segment::subscription_id("subscriptionId"),
/// ];
/// assert_eq!(SEGMENTS[1].kind, SegmentKind::Subscription);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// The name of the segment, used as the key in parsed IDs and in error
    /// messages.
    pub name: &'static str,
    /// What values the segment accepts.
    pub kind: SegmentKind,
}

/// The type of values accepted by a [Segment].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// A fixed keyword, such as `resourceGroups`.
    Static(&'static str),
    /// A resource provider namespace, such as `Microsoft.ManagedIdentity`.
    ResourceProvider(&'static str),
    /// A subscription ID.
    Subscription,
    /// A resource group name.
    ResourceGroup,
    /// Any non-empty value, typically the name of a resource.
    UserSpecified,
    /// One of a fixed set of values.
    Constant(&'static [&'static str]),
    /// A parent scope spanning one or more components, such as
    /// `/subscriptions/abc/resourceGroups/rg1`. Only valid as the first
    /// segment.
    Scope,
}

impl Segment {
    pub const fn static_segment(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::Static(value),
        }
    }

    pub const fn resource_provider(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::ResourceProvider(value),
        }
    }

    pub const fn subscription_id(name: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::Subscription,
        }
    }

    pub const fn resource_group(name: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::ResourceGroup,
        }
    }

    pub const fn user_specified(name: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::UserSpecified,
        }
    }

    pub const fn constant(name: &'static str, values: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: SegmentKind::Constant(values),
        }
    }

    pub const fn scope(name: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::Scope,
        }
    }

    /// Returns the fixed value for static and resource provider segments.
    pub fn fixed_value(&self) -> Option<&'static str> {
        match self.kind {
            SegmentKind::Static(v) | SegmentKind::ResourceProvider(v) => Some(v),
            _ => None,
        }
    }

    /// An example value, used in error messages and documentation.
    pub fn example_value(&self) -> String {
        match self.kind {
            SegmentKind::Static(v) | SegmentKind::ResourceProvider(v) => v.to_string(),
            SegmentKind::Subscription => "12345678-1234-9876-4563-123456789012".to_string(),
            SegmentKind::ResourceGroup => "example-resource-group".to_string(),
            SegmentKind::UserSpecified => format!("{}Value", self.name),
            SegmentKind::Constant(values) => values.join(", "),
            SegmentKind::Scope => {
                "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/some-resource-group"
                    .to_string()
            }
        }
    }
}

/// Formats an example ID for the given segments.
///
/// # Example
/// ```
/// # use azure_rm_resourceids::{Segment, example_id};
/// const SEGMENTS: &[Segment] = &[
///     Segment::static_segment("staticSubscriptions", "subscriptions"),
///     Segment::subscription_id("subscriptionId"),
/// ];
/// assert_eq!(example_id(SEGMENTS), "/subscriptions/12345678-1234-9876-4563-123456789012");
/// ```
pub fn example_id(segments: &[Segment]) -> String {
    let values = segments
        .iter()
        .filter(|s| s.fixed_value().is_none())
        .map(|s| match s.kind {
            SegmentKind::Constant(values) => values.first().copied().unwrap_or_default().to_string(),
            _ => s.example_value(),
        })
        .collect::<Vec<_>>();
    let values = values.iter().map(String::as_str).collect::<Vec<_>>();
    crate::parser::format_id(segments, &values)
}
