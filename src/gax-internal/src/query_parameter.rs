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

//! Defines traits and helpers to serialize query parameters.
//!
//! Every Azure Resource Manager request carries a required `api-version`
//! query parameter. List operations may add OData parameters such as
//! `$filter` or `$top`, which are optional. The generated code is simpler if
//! all the query parameters can be treated uniformly, without any
//! conditionally generated code to handle missing values.
//!
//! The types are not intended for application developers to use. They are
//! public because we will generate many crates (roughly one per resource
//! provider), and most of these crates will use these helpers.

/// The name of the query parameter carrying the API version.
pub const API_VERSION: &str = "api-version";

/// [QueryParameter] is a trait representing types that can be used as a query
/// parameter.
pub trait QueryParameter {
    fn add(self, builder: reqwest::RequestBuilder, name: &str) -> reqwest::RequestBuilder;
}

/// Adds `value` to the query string of `builder` as `name`.
pub fn add<T: QueryParameter>(
    builder: reqwest::RequestBuilder,
    name: &str,
    value: T,
) -> reqwest::RequestBuilder {
    value.add(builder, name)
}

/// Adds the `api-version` query parameter.
pub fn api_version(builder: reqwest::RequestBuilder, version: &str) -> reqwest::RequestBuilder {
    builder.query(&[(API_VERSION, version)])
}

impl<T: QueryParameter> QueryParameter for Option<T> {
    fn add(self, builder: reqwest::RequestBuilder, name: &str) -> reqwest::RequestBuilder {
        match self {
            None => builder,
            Some(v) => v.add(builder, name),
        }
    }
}

impl QueryParameter for &str {
    fn add(self, builder: reqwest::RequestBuilder, name: &str) -> reqwest::RequestBuilder {
        builder.query(&[(name, self)])
    }
}

impl QueryParameter for String {
    fn add(self, builder: reqwest::RequestBuilder, name: &str) -> reqwest::RequestBuilder {
        builder.query(&[(name, self)])
    }
}

impl QueryParameter for i32 {
    fn add(self, builder: reqwest::RequestBuilder, name: &str) -> reqwest::RequestBuilder {
        builder.query(&[(name, self)])
    }
}

impl QueryParameter for bool {
    fn add(self, builder: reqwest::RequestBuilder, name: &str) -> reqwest::RequestBuilder {
        builder.query(&[(name, self)])
    }
}

impl QueryParameter for serde_json::Value {
    fn add(self, builder: reqwest::RequestBuilder, name: &str) -> reqwest::RequestBuilder {
        match self {
            Self::Object(object) => object.into_iter().fold(builder, |builder, (k, v)| {
                v.add(builder, format!("{name}.{k}").as_str())
            }),
            Self::Array(array) => array
                .into_iter()
                .fold(builder, |builder, v| v.add(builder, name)),
            Self::Null => builder,
            Self::String(s) => builder.query(&[(name, s)]),
            Self::Number(n) => builder.query(&[(name, format!("{n}"))]),
            Self::Bool(b) => builder.query(&[(name, b)]),
        }
    }
}
