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

//! Match resource IDs against a list of segments.

use crate::{ParseError, Segment, SegmentKind};
use std::collections::BTreeMap;

/// Parses resource IDs using a declarative list of segments.
///
/// Segments are matched left to right, each segment consumes one
/// `/`-separated component of the input. A leading [SegmentKind::Scope]
/// segment consumes all the components not needed by the remaining segments.
///
/// # Example
/// ```
/// # use azure_rm_resourceids::{Parser, Segment};
/// const SEGMENTS: &[Segment] = &[
///     Segment::static_segment("staticSubscriptions", "subscriptions"),
///     Segment::subscription_id("subscriptionId"),
///     Segment::static_segment("staticResourceGroups", "resourceGroups"),
///     Segment::resource_group("resourceGroupName"),
/// ];
/// let parsed = Parser::new(SEGMENTS).parse("/subscriptions/abc/resourceGroups/rg1", false)?;
/// assert_eq!(parsed.get("subscriptionId"), Some("abc"));
/// assert_eq!(parsed.get("resourceGroupName"), Some("rg1"));
/// # Ok::<(), azure_rm_resourceids::ParseError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Parser {
    segments: &'static [Segment],
}

impl Parser {
    pub fn new(segments: &'static [Segment]) -> Self {
        Self { segments }
    }

    /// Parses `input`.
    ///
    /// With `insensitive` set, static, resource provider and constant segments
    /// match regardless of ASCII case, and take their canonical casing in the
    /// result. Only use this for IDs returned by the service. IDs provided in
    /// user configuration must be parsed with `insensitive` unset.
    pub fn parse(&self, input: &str, insensitive: bool) -> Result<ParsedId, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty);
        }
        let trimmed = input.strip_prefix('/').unwrap_or(input);
        let mut components = trimmed.split('/').collect::<Vec<_>>();
        let trailing_slash = components.len() > 1 && components.last() == Some(&"");
        if trailing_slash || components == [""] {
            components.pop();
        }

        let (scope, components) = self.split_scope(input, components)?;
        let mut parsed = ParsedId::default();
        if let (Some(segment), Some(value)) = (self.segments.first(), scope) {
            parsed.values.insert(segment.name, value);
        }
        let segments = match scope_segment(self.segments) {
            Some(_) => &self.segments[1..],
            None => self.segments,
        };

        for (i, segment) in segments.iter().enumerate() {
            let Some(found) = components.get(i) else {
                return Err(ParseError::MissingSegment {
                    input: input.to_string(),
                    name: segment.name,
                    example: segment.example_value(),
                });
            };
            let value = match_segment(input, segment, found, insensitive)?;
            parsed.values.insert(segment.name, value);
        }
        if components.len() > segments.len() || trailing_slash {
            let extra = components[segments.len().min(components.len())..].join("/");
            return Err(ParseError::ExtraSegments {
                input: input.to_string(),
                extra: if trailing_slash { format!("{extra}/") } else { extra },
            });
        }
        Ok(parsed)
    }

    /// Splits the leading scope from the components.
    ///
    /// The scope takes every component not needed by the remaining segments,
    /// and at least one component.
    fn split_scope<'a>(
        &self,
        input: &str,
        components: Vec<&'a str>,
    ) -> Result<(Option<String>, Vec<&'a str>), ParseError> {
        let Some(segment) = scope_segment(self.segments) else {
            return Ok((None, components));
        };
        if components.is_empty() {
            return Err(ParseError::MissingSegment {
                input: input.to_string(),
                name: segment.name,
                example: segment.example_value(),
            });
        }
        let tail = self.segments.len() - 1;
        let count = components.len().saturating_sub(tail).max(1);
        let (scope, rest) = components.split_at(count);
        if scope.iter().any(|c| c.is_empty()) {
            return Err(ParseError::EmptyValue {
                input: input.to_string(),
                name: segment.name,
            });
        }
        Ok((Some(format!("/{}", scope.join("/"))), rest.to_vec()))
    }
}

fn scope_segment(segments: &[Segment]) -> Option<&Segment> {
    segments.first().filter(|s| s.kind == SegmentKind::Scope)
}

fn match_segment(
    input: &str,
    segment: &Segment,
    found: &str,
    insensitive: bool,
) -> Result<String, ParseError> {
    let same = |want: &str| {
        if insensitive {
            want.eq_ignore_ascii_case(found)
        } else {
            want == found
        }
    };
    match segment.kind {
        SegmentKind::Static(want) | SegmentKind::ResourceProvider(want) => {
            if same(want) {
                return Ok(want.to_string());
            }
            Err(ParseError::Malformed {
                input: input.to_string(),
                name: segment.name,
                expected: want.to_string(),
                found: found.to_string(),
            })
        }
        SegmentKind::Constant(allowed) => match allowed.iter().find(|&&v| same(v)) {
            Some(v) => Ok(v.to_string()),
            None if found.is_empty() => Err(ParseError::EmptyValue {
                input: input.to_string(),
                name: segment.name,
            }),
            None => Err(ParseError::InvalidConstant {
                input: input.to_string(),
                name: segment.name,
                allowed,
                found: found.to_string(),
            }),
        },
        SegmentKind::Subscription
        | SegmentKind::ResourceGroup
        | SegmentKind::UserSpecified
        | SegmentKind::Scope => {
            if found.is_empty() {
                return Err(ParseError::EmptyValue {
                    input: input.to_string(),
                    name: segment.name,
                });
            }
            Ok(found.to_string())
        }
    }
}

/// The result of parsing a resource ID.
///
/// Maps the segment names to their values. Static and resource provider
/// segments map to their canonical value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedId {
    values: BTreeMap<&'static str, String>,
}

impl ParsedId {
    /// Returns the value of the segment called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns the value of the segment called `name`, or an error if the
    /// segment was not parsed.
    pub fn required(&self, segment: &Segment) -> Result<String, ParseError> {
        self.values
            .get(segment.name)
            .cloned()
            .ok_or_else(|| ParseError::MissingSegment {
                input: String::new(),
                name: segment.name,
                example: segment.example_value(),
            })
    }
}

/// Formats an ID from its segments and the values of the non-fixed segments.
///
/// `values` must hold one value for each segment without a
/// [fixed value][Segment::fixed_value], in order.
pub fn format_id(segments: &[Segment], values: &[&str]) -> String {
    let mut values = values.iter();
    let mut id = String::new();
    for segment in segments {
        let value = match segment.fixed_value() {
            Some(v) => v,
            None => values.next().copied().unwrap_or_default(),
        };
        if segment.kind == SegmentKind::Scope {
            id.push_str(value.trim_end_matches('/'));
            continue;
        }
        id.push('/');
        id.push_str(value);
    }
    if id.is_empty() {
        id.push('/');
    }
    id
}
