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

/// The provisioning state of a resource, or the status of an operation.
///
/// Azure Resource Manager reports the progress of long-running operations
/// using these values, both in operation status resources (the `status` field)
/// and in the resources themselves (the `properties.provisioningState` field).
///
/// Parsing is case-insensitive, and the British spelling `Cancelled` is
/// accepted as [Canceled][ProvisioningState::Canceled]. Values not known to
/// this library are preserved in [Other][ProvisioningState::Other].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ProvisioningState {
    Accepted,
    Creating,
    Updating,
    Deleting,
    Running,
    InProgress,
    Succeeded,
    Failed,
    Canceled,
    Unknown,
    /// A state not known to this library, e.g. a service-specific state such
    /// as `Provisioning` or `Migrating`.
    Other(String),
}

impl ProvisioningState {
    /// The canonical name of the state.
    pub fn name(&self) -> &str {
        match self {
            Self::Accepted => "Accepted",
            Self::Creating => "Creating",
            Self::Updating => "Updating",
            Self::Deleting => "Deleting",
            Self::Running => "Running",
            Self::InProgress => "InProgress",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Canceled => "Canceled",
            Self::Unknown => "Unknown",
            Self::Other(s) => s,
        }
    }

    /// Returns true if the operation reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }

    /// Returns true if the operation completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns true if the operation failed or was canceled.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Canceled)
    }
}

impl From<&str> for ProvisioningState {
    fn from(value: &str) -> Self {
        const KNOWN: [ProvisioningState; 10] = [
            ProvisioningState::Accepted,
            ProvisioningState::Creating,
            ProvisioningState::Updating,
            ProvisioningState::Deleting,
            ProvisioningState::Running,
            ProvisioningState::InProgress,
            ProvisioningState::Succeeded,
            ProvisioningState::Failed,
            ProvisioningState::Canceled,
            ProvisioningState::Unknown,
        ];
        if value.eq_ignore_ascii_case("Cancelled") {
            return Self::Canceled;
        }
        KNOWN
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(value))
            .unwrap_or_else(|| Self::Other(value.to_string()))
    }
}

impl From<String> for ProvisioningState {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl std::fmt::Display for ProvisioningState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl serde::ser::Serialize for ProvisioningState {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::de::Deserialize<'de> for ProvisioningState {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from(value))
    }
}

/// Extracts `properties.provisioningState` from a resource body.
pub(crate) fn from_resource(body: &[u8]) -> Option<ProvisioningState> {
    let value = serde_json::from_slice::<serde_json::Value>(body).ok()?;
    value
        .get("properties")?
        .get("provisioningState")?
        .as_str()
        .map(ProvisioningState::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("Accepted", ProvisioningState::Accepted)]
    #[test_case("creating", ProvisioningState::Creating)]
    #[test_case("UPDATING", ProvisioningState::Updating)]
    #[test_case("Deleting", ProvisioningState::Deleting)]
    #[test_case("Running", ProvisioningState::Running)]
    #[test_case("inprogress", ProvisioningState::InProgress)]
    #[test_case("Succeeded", ProvisioningState::Succeeded)]
    #[test_case("failed", ProvisioningState::Failed)]
    #[test_case("Canceled", ProvisioningState::Canceled)]
    #[test_case("Cancelled", ProvisioningState::Canceled)]
    #[test_case("CANCELLED", ProvisioningState::Canceled)]
    #[test_case("Unknown", ProvisioningState::Unknown)]
    fn parse(input: &str, want: ProvisioningState) {
        assert_eq!(ProvisioningState::from(input), want);
    }

    #[test]
    fn other() {
        let got = ProvisioningState::from("Migrating");
        assert_eq!(got, ProvisioningState::Other("Migrating".to_string()));
        assert_eq!(got.to_string(), "Migrating");
        assert!(!got.is_terminal(), "{got:?}");
    }

    #[test]
    fn terminal() {
        use ProvisioningState::*;
        for s in [Succeeded, Failed, Canceled] {
            assert!(s.is_terminal(), "{s:?}");
        }
        for s in [Accepted, Creating, Updating, Deleting, Running, InProgress, Unknown] {
            assert!(!s.is_terminal(), "{s:?}");
            assert!(!s.is_success(), "{s:?}");
            assert!(!s.is_failure(), "{s:?}");
        }
        assert!(Succeeded.is_success());
        assert!(Failed.is_failure());
        assert!(Canceled.is_failure());
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        let got = serde_json::from_value::<ProvisioningState>(json!("cancelled"))?;
        assert_eq!(got, ProvisioningState::Canceled);
        assert_eq!(serde_json::to_value(&got)?, json!("Canceled"));
        Ok(())
    }

    #[test]
    fn resource() {
        let body = json!({"properties": {"provisioningState": "Creating"}}).to_string();
        assert_eq!(
            from_resource(body.as_bytes()),
            Some(ProvisioningState::Creating)
        );
        let body = json!({"properties": {}}).to_string();
        assert_eq!(from_resource(body.as_bytes()), None);
        assert_eq!(from_resource(b""), None);
        assert_eq!(from_resource(b"not json"), None);
    }
}
