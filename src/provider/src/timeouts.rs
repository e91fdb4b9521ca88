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

use gax::context::CallContext;
use std::time::Duration;

/// The lifecycle phases of a managed resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Create,
    Read,
    Update,
    Delete,
}

impl Phase {
    /// The name used in error messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The maximum duration of each lifecycle phase.
///
/// Each phase runs under its own [CallContext]. Once the deadline expires no
/// new requests are sent, and the phase fails with an error where
/// [is_timeout][gax::error::Error::is_timeout] is true.
///
/// # Example
/// ```
/// # use azure_rm_provider::timeouts::{Phase, Timeouts};
/// use std::time::Duration;
/// let timeouts = Timeouts::default().set_read(Duration::from_secs(60));
/// assert_eq!(timeouts.get(Phase::Read), Duration::from_secs(60));
/// assert_eq!(timeouts.get(Phase::Create), Duration::from_secs(30 * 60));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeouts {
    create: Duration,
    read: Duration,
    update: Duration,
    delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: Duration::from_secs(30 * 60),
            read: Duration::from_secs(5 * 60),
            update: Duration::from_secs(30 * 60),
            delete: Duration::from_secs(30 * 60),
        }
    }
}

impl Timeouts {
    pub fn set_create(mut self, v: Duration) -> Self {
        self.create = v;
        self
    }

    pub fn set_read(mut self, v: Duration) -> Self {
        self.read = v;
        self
    }

    pub fn set_update(mut self, v: Duration) -> Self {
        self.update = v;
        self
    }

    pub fn set_delete(mut self, v: Duration) -> Self {
        self.delete = v;
        self
    }

    /// The timeout for `phase`.
    pub fn get(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Create => self.create,
            Phase::Read => self.read,
            Phase::Update => self.update,
            Phase::Delete => self.delete,
        }
    }

    /// Returns a context for `phase`, bounded by its timeout.
    ///
    /// The context is a child of `parent`, cancelling the parent cancels the
    /// phase.
    pub fn context(&self, parent: &CallContext, phase: Phase) -> CallContext {
        parent.child().with_timeout(self.get(phase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Phase::Create, 1800)]
    #[test_case(Phase::Read, 300)]
    #[test_case(Phase::Update, 1800)]
    #[test_case(Phase::Delete, 1800)]
    fn defaults(phase: Phase, want: u64) {
        assert_eq!(Timeouts::default().get(phase), Duration::from_secs(want));
    }

    #[test]
    fn setters() {
        let t = Timeouts::default()
            .set_create(Duration::from_secs(1))
            .set_read(Duration::from_secs(2))
            .set_update(Duration::from_secs(3))
            .set_delete(Duration::from_secs(4));
        let got = [Phase::Create, Phase::Read, Phase::Update, Phase::Delete].map(|p| t.get(p));
        assert_eq!(got, [1, 2, 3, 4].map(Duration::from_secs));
    }

    #[tokio::test(start_paused = true)]
    async fn context() {
        let parent = CallContext::new();
        let start = tokio::time::Instant::now();
        let ctx = Timeouts::default().context(&parent, Phase::Read);
        assert_eq!(ctx.deadline(), Some(start + Duration::from_secs(300)));

        parent.cancel();
        let err = ctx.check().unwrap_err();
        assert!(err.is_cancelled(), "{err:?}");
    }

    #[test]
    fn phase_names() {
        assert_eq!(Phase::Delete.to_string(), "delete");
    }
}
