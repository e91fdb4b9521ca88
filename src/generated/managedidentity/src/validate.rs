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

use resourceids::validate::ValidationError;

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 128;

/// Validates the name of a user-assigned identity.
///
/// Names are between 3 and 128 characters long, start with a letter or digit,
/// and contain only letters, digits, hyphens and underscores.
///
/// # Example
/// ```
/// # use azure_rm_managedidentity::validate;
/// assert!(validate::user_assigned_identity_name("name", "my-identity_1").is_ok());
/// let err = validate::user_assigned_identity_name("name", "-x").unwrap_err();
/// assert_eq!(err.problems.len(), 2);
/// ```
pub fn user_assigned_identity_name(key: &str, value: &str) -> Result<(), ValidationError> {
    let mut problems = Vec::new();
    let len = value.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        problems.push(format!(
            "the name must be between {NAME_MIN} and {NAME_MAX} characters, got {len}"
        ));
    }
    if value.starts_with(|c: char| !c.is_ascii_alphanumeric()) {
        problems.push("the name must start with a letter or digit".to_string());
    }
    let invalid = value
        .chars()
        .filter(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
        .collect::<String>();
    if !invalid.is_empty() {
        problems.push(format!("the name contains invalid characters {invalid:?}"));
    }
    match problems.is_empty() {
        true => Ok(()),
        false => Err(ValidationError::new(key, problems)),
    }
}

/// Validates the name of a federated identity credential.
///
/// Names are between 3 and 120 characters long, start with a letter or digit,
/// and contain only letters, digits, hyphens and underscores.
pub fn federated_identity_credential_name(key: &str, value: &str) -> Result<(), ValidationError> {
    user_assigned_identity_name(key, value)?;
    let len = value.chars().count();
    if len > 120 {
        return Err(ValidationError::new(
            key,
            vec![format!("the name may be at most 120 characters, got {len}")],
        ));
    }
    Ok(())
}
