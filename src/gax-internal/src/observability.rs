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

//! Tracing instrumentation for HTTP requests.
//!
//! The span and attribute names follow the OpenTelemetry semantic conventions
//! for HTTP client spans, so any `tracing` to OpenTelemetry bridge exports
//! them with the expected names.

pub mod attributes;
pub(crate) mod errors;
mod http_tracing;

pub(crate) use http_tracing::{create_http_attempt_span, record_http_result};

#[cfg(test)]
pub(crate) mod test_layer {
    //! Captures span attributes in unit tests.

    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::subscriber::DefaultGuard;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    #[derive(Clone, Debug, PartialEq)]
    pub struct CapturedSpan {
        pub name: &'static str,
        pub attributes: BTreeMap<String, String>,
    }

    #[derive(Clone, Default)]
    pub struct TestLayer {
        spans: Arc<Mutex<Vec<(Id, CapturedSpan)>>>,
    }

    impl TestLayer {
        /// Installs the layer as the default subscriber for this thread.
        pub fn initialize() -> (Self, DefaultGuard) {
            let layer = Self::default();
            let subscriber = tracing_subscriber::registry().with(layer.clone());
            (layer, tracing::subscriber::set_default(subscriber))
        }

        pub fn capture(&self) -> Vec<CapturedSpan> {
            self.spans
                .lock()
                .expect("span capture mutex is never poisoned")
                .iter()
                .map(|(_, s)| s.clone())
                .collect()
        }
    }

    struct Visitor<'a>(&'a mut BTreeMap<String, String>);

    impl Visit for Visitor<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0
                .insert(field.name().to_string(), format!("{value:?}"));
        }
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for TestLayer {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, _ctx: Context<'_, S>) {
            let mut attributes = BTreeMap::new();
            attrs.record(&mut Visitor(&mut attributes));
            let span = CapturedSpan {
                name: attrs.metadata().name(),
                attributes,
            };
            if let Ok(mut spans) = self.spans.lock() {
                spans.push((id.clone(), span));
            }
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
            if let Ok(mut spans) = self.spans.lock() {
                if let Some((_, span)) = spans.iter_mut().rev().find(|(i, _)| i == id) {
                    values.record(&mut Visitor(&mut span.attributes));
                }
            }
        }
    }
}
