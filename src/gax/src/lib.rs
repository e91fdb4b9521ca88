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

//! Azure Resource Manager client helpers.
//!
//! This crate contains a number of types and functions used in the
//! implementation of the Azure Resource Manager client libraries for Rust:
//! the error taxonomy, the policies that control long-running operation
//! polling, OData list pages and cursors, call cancellation, and client
//! configuration.
//!
//! <div class="warning">
//! Types and functions in modules named <code>internal</code> are <b>not</b>
//! intended for general use. They are shared with the generated clients and
//! may change without notice.
//! </div>

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions that make HTTP requests.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by generated clients.
pub mod error;

/// Types to construct clients.
pub mod client_builder;

/// Credentials used to authenticate requests.
pub mod credentials;

/// Cancellation and deadlines for a logical call.
pub mod context;

/// OData list pages and a cursor to traverse them.
///
/// Converting a cursor into a `Stream` requires the `unstable-stream`
/// feature. Async streams are not yet stable, so neither is the use of this
/// feature.
pub mod paginator;

pub mod options;
pub mod response;

pub mod polling;
