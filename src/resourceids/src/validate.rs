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

//! Validation for values provided in user configuration.
//!
//! These functions report every problem found in a value, not just the first
//! one. IDs are always parsed case-sensitively here.

use crate::ResourceId;

/// A value in the user configuration is invalid.
///
/// # Example
/// ```
/// # use azure_rm_resourceids::validate;
/// let err = validate::resource_group_name("resource_group_name", "bad/name.").unwrap_err();
/// assert_eq!(err.key, "resource_group_name");
/// assert_eq!(err.problems.len(), 2);
/// ```
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("invalid value for `{key}`: {}", .problems.join("; "))]
#[non_exhaustive]
pub struct ValidationError {
    /// The configuration key holding the value.
    pub key: String,
    /// A description of each problem found.
    pub problems: Vec<String>,
}

impl ValidationError {
    pub fn new<K: Into<String>>(key: K, problems: Vec<String>) -> Self {
        Self {
            key: key.into(),
            problems,
        }
    }

    fn check<K: Into<String>>(key: K, problems: Vec<String>) -> Result<(), Self> {
        if problems.is_empty() {
            return Ok(());
        }
        Err(Self::new(key, problems))
    }
}

impl From<ValidationError> for gax::error::Error {
    fn from(value: ValidationError) -> Self {
        gax::error::Error::binding(value)
    }
}

/// Validates a resource ID of type `T`.
///
/// # Example
/// ```
/// # use azure_rm_resourceids::{validate, ResourceGroupId};
/// assert!(validate::resource_id::<ResourceGroupId>("id", "/subscriptions/abc/resourceGroups/rg1").is_ok());
/// assert!(validate::resource_id::<ResourceGroupId>("id", "/subscriptions/abc/resourcegroups/rg1").is_err());
/// ```
pub fn resource_id<T: ResourceId>(key: &str, value: &str) -> Result<T, ValidationError> {
    T::parse(value).map_err(|e| ValidationError::new(key, vec![e.to_string()]))
}

/// Validates a subscription ID, which must be a UUID.
pub fn subscription_id(key: &str, value: &str) -> Result<(), ValidationError> {
    let problems = match uuid::Uuid::parse_str(value) {
        Ok(_) => Vec::new(),
        Err(e) => vec![format!("{value:?} is not a valid UUID: {e}")],
    };
    ValidationError::check(key, problems)
}

const RESOURCE_GROUP_NAME_MAX: usize = 90;

/// Validates a resource group name.
///
/// Resource group names are between 1 and 90 characters long, may contain
/// alphanumerics, underscores, parentheses, hyphens and periods, and cannot
/// end in a period.
pub fn resource_group_name(key: &str, value: &str) -> Result<(), ValidationError> {
    let mut problems = Vec::new();
    let len = value.chars().count();
    if len == 0 {
        problems.push("the name cannot be empty".to_string());
    }
    if len > RESOURCE_GROUP_NAME_MAX {
        problems.push(format!(
            "the name may be at most {RESOURCE_GROUP_NAME_MAX} characters, got {len}"
        ));
    }
    let invalid = value
        .chars()
        .filter(|c| !(c.is_alphanumeric() || matches!(c, '_' | '(' | ')' | '-' | '.')))
        .collect::<String>();
    if !invalid.is_empty() {
        problems.push(format!("the name contains invalid characters {invalid:?}"));
    }
    if value.ends_with('.') {
        problems.push("the name cannot end in a period".to_string());
    }
    ValidationError::check(key, problems)
}

/// Validates a value that must not be empty or only whitespace.
pub fn not_blank(key: &str, value: &str) -> Result<(), ValidationError> {
    let problems = match value.trim() {
        "" => vec!["the value cannot be empty".to_string()],
        _ => Vec::new(),
    };
    ValidationError::check(key, problems)
}
