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

use super::CredentialsError;
use super::cloud::{CloudError, OperationFailure};
use http::HeaderMap;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The core error returned by all client libraries.
///
/// The client libraries report errors from multiple sources. For example, the
/// service may return an unexpected status code, the transport may be unable
/// to create the necessary connection to make a request, the long-running
/// operation may fail, the caller may cancel the operation, or the library may
/// be unable to format the request due to invalid or missing inputs.
///
/// Most applications will just return the error or log it, without any further
/// action. However, some applications may need to interrogate the error
/// details. This type offers a series of predicates to determine the error
/// kind. The type also offers accessors to query the most common error details.
/// Applications can query the error [source][std::error::Error::source] for
/// deeper information.
///
/// # Example
/// ```
/// use azure_rm_gax::error::Error;
/// match example_function() {
///     Err(e) if e.is_not_found() => { println!("gone {e}"); },
///     Err(e) if e.is_timeout() => { println!("not enough time {e}"); },
///     Err(e) => { println!("some other error {e}"); },
///     Ok(_) => { println!("success, how boring"); },
/// }
///
/// fn example_function() -> Result<String, Error> {
///     // ... details omitted ...
///     # Err(Error::service_with_http_metadata(404, http::HeaderMap::new(), bytes::Bytes::new()))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
    context: Option<Box<ErrorContext>>,
}

/// The operation and resource associated with an error.
///
/// Attached by higher layers, for example the resource adapters, so the
/// error message names what was being attempted.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ErrorContext {
    /// The name of the operation, e.g. `create` or `read`.
    pub operation: String,
    /// The resource identifier, typically a full ARM resource ID.
    pub resource_id: String,
}

impl Error {
    fn new(kind: ErrorKind, source: Option<BoxError>) -> Self {
        Self {
            kind,
            source,
            context: None,
        }
    }

    /// Attaches the operation name and resource identifier to the error.
    ///
    /// # Example
    /// ```
    /// use azure_rm_gax::error::Error;
    /// let error = Error::timeout("simulated").with_context("create", "/subscriptions/abc");
    /// assert!(error.is_timeout());
    /// assert!(error.to_string().starts_with("create /subscriptions/abc: "));
    /// ```
    pub fn with_context<O: Into<String>, R: Into<String>>(
        mut self,
        operation: O,
        resource_id: R,
    ) -> Self {
        self.context = Some(Box::new(ErrorContext {
            operation: operation.into(),
            resource_id: resource_id.into(),
        }));
        self
    }

    /// The context attached via [with_context][Error::with_context], if any.
    pub fn context(&self) -> Option<&ErrorContext> {
        self.context.as_deref()
    }

    /// Creates an error representing a timeout.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use azure_rm_gax::error::Error;
    /// let error = Error::timeout("simulated timeout");
    /// assert!(error.is_timeout());
    /// assert!(error.source().is_some());
    /// ```
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Timeout, Some(source.into()))
    }

    /// The operation could not be completed before its deadline.
    ///
    /// This is always a client-side generated error, raised when the deadline
    /// of a [CallContext][crate::context::CallContext] expires. Note that the
    /// request may or may not have started, and it may or may not complete in
    /// the service. For long-running operations the operation continues in the
    /// service, only the client stopped waiting for it.
    ///
    /// A single HTTP attempt exceeding its attempt timeout is reported as a
    /// [transport][Error::is_transport] error instead.
    ///
    /// # Troubleshooting
    ///
    /// Some Azure operations take tens of minutes. Consider increasing the
    /// timeout for the operation.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// Creates an error representing a cancelled operation.
    ///
    /// # Example
    /// ```
    /// use azure_rm_gax::error::Error;
    /// let error = Error::cancelled("caller went away");
    /// assert!(error.is_cancelled());
    /// ```
    pub fn cancelled<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Cancelled, Some(source.into()))
    }

    /// The caller cancelled the operation.
    ///
    /// This is always a client-side generated error. No further requests are
    /// made after the cancellation is observed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled)
    }

    /// Creates an error representing an exhausted policy.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use azure_rm_gax::error::Error;
    /// let error = Error::exhausted("too many polling attempts");
    /// assert!(error.is_exhausted());
    /// assert!(error.source().is_some());
    /// ```
    pub fn exhausted<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Exhausted, Some(source.into()))
    }

    /// The operation could not complete before the polling policy expired.
    ///
    /// This is always a client-side generated error, but it may be the result
    /// of multiple errors received from the service.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.kind, ErrorKind::Exhausted)
    }

    /// Creates an error representing a pagination problem.
    ///
    /// # Example
    /// ```
    /// use azure_rm_gax::error::Error;
    /// let error = Error::pagination("no more pages");
    /// assert!(error.is_pagination());
    /// ```
    pub fn pagination<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Pagination, Some(source.into()))
    }

    /// The application requested a page after the last page was loaded.
    pub fn is_pagination(&self) -> bool {
        matches!(self.kind, ErrorKind::Pagination)
    }

    /// Creates an error representing a failed long-running operation.
    ///
    /// # Example
    /// ```
    /// use azure_rm_gax::error::{Error, cloud::OperationFailure};
    /// let failure = OperationFailure::new("Failed").set_code("Conflict").set_message("in use");
    /// let error = Error::operation_failed(failure.clone());
    /// assert_eq!(error.operation_failure(), Some(&failure));
    /// ```
    pub fn operation_failed(failure: OperationFailure) -> Self {
        Self::new(ErrorKind::OperationFailed(Box::new(failure)), None)
    }

    /// The long-running operation completed, but in a `Failed` or `Canceled`
    /// state.
    pub fn is_operation_failed(&self) -> bool {
        matches!(self.kind, ErrorKind::OperationFailed(_))
    }

    /// The failure details of a long-running operation, if any.
    ///
    /// # Troubleshooting
    ///
    /// The `code` and `message` are reported by the service. Consult the
    /// service documentation for the meaning of each code.
    pub fn operation_failure(&self) -> Option<&OperationFailure> {
        match &self.kind {
            ErrorKind::OperationFailed(f) => Some(f.as_ref()),
            _ => None,
        }
    }

    /// Not part of the public API, subject to change without notice.
    ///
    /// Creates an error representing a deserialization problem.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use azure_rm_gax::error::Error;
    /// let error = Error::deser("simulated problem");
    /// assert!(error.is_deserialization());
    /// assert!(error.source().is_some());
    /// ```
    #[cfg_attr(not(feature = "_internal-semver"), doc(hidden))]
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Deserialization, Some(source.into()))
    }

    /// The response could not be deserialized.
    ///
    /// This is always a client-side generated error. Note that the request may
    /// or may not have started, and it may or may not complete in the service.
    ///
    /// # Troubleshooting
    ///
    /// The most common cause for deserialization problems are bugs in the
    /// client library, or a service returning a newer API version payload than
    /// the one requested.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// Not part of the public API, subject to change without notice.
    ///
    /// Creates an error representing a serialization problem.
    #[cfg_attr(not(feature = "_internal-semver"), doc(hidden))]
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Serialization, Some(source.into()))
    }

    /// The request could not be serialized.
    ///
    /// This is always a client-side generated error, generated before the
    /// request is made.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// Not part of the public API, subject to change without notice.
    ///
    /// The service returned a status code outside the set expected by the
    /// operation.
    ///
    /// The payload is parsed as an ARM error envelope when possible.
    #[cfg_attr(not(feature = "_internal-semver"), doc(hidden))]
    pub fn service_with_http_metadata(
        status_code: u16,
        headers: HeaderMap,
        payload: bytes::Bytes,
    ) -> Self {
        let cloud_error = CloudError::try_from(&payload).ok();
        let details = ServiceDetails {
            status_code,
            headers,
            payload,
            cloud_error,
        };
        Self::new(ErrorKind::Service(Box::new(details)), None)
    }

    /// The service returned a status code the operation does not expect.
    ///
    /// # Troubleshooting
    ///
    /// Examine the [cloud_error][Error::cloud_error] for the ARM error code and
    /// message. If the payload is not an ARM error, the raw
    /// [http_payload][Error::http_payload] may help. Errors generated by
    /// proxies or load balancers often have HTML payloads.
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self.kind, ErrorKind::Service(_))
    }

    /// The service reported the resource does not exist.
    ///
    /// # Example
    /// ```
    /// use azure_rm_gax::error::Error;
    /// let error = Error::service_with_http_metadata(404, http::HeaderMap::new(), bytes::Bytes::new());
    /// assert!(error.is_not_found());
    /// ```
    pub fn is_not_found(&self) -> bool {
        self.http_status_code() == Some(404)
    }

    /// The HTTP status code, if any, associated with this error.
    ///
    /// # Example
    /// ```
    /// use azure_rm_gax::error::Error;
    /// let e = search_for_thing("the thing");
    /// if let Some(code) = e.http_status_code() {
    ///     if code == 404 {
    ///         println!("cannot find the thing, more details in {e}");
    ///     }
    /// }
    ///
    /// fn search_for_thing(name: &str) -> Error {
    ///     # Error::service_with_http_metadata(400, http::HeaderMap::new(), bytes::Bytes::from_static(b"NOT FOUND"))
    /// }
    /// ```
    pub fn http_status_code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Service(d) => Some(d.status_code),
            _ => None,
        }
    }

    /// The headers, if any, associated with this error.
    ///
    /// Azure services include request identifiers such as
    /// `x-ms-request-id` and `x-ms-correlation-request-id` in the headers.
    /// These are useful when contacting Azure support.
    pub fn http_headers(&self) -> Option<&http::HeaderMap> {
        match &self.kind {
            ErrorKind::Service(d) => Some(&d.headers),
            _ => None,
        }
    }

    /// The payload, if any, associated with this error.
    ///
    /// # Example
    /// ```
    /// use azure_rm_gax::error::Error;
    /// let e = Error::service_with_http_metadata(502, http::HeaderMap::new(), bytes::Bytes::from_static(b"bad gateway"));
    /// if let Some(payload) = e.http_payload() {
    ///    println!("the error included some extra payload {payload:?}");
    /// }
    /// ```
    pub fn http_payload(&self) -> Option<&bytes::Bytes> {
        match &self.kind {
            ErrorKind::Service(d) => Some(&d.payload),
            _ => None,
        }
    }

    /// The ARM error envelope, if the payload contained one.
    pub fn cloud_error(&self) -> Option<&CloudError> {
        match &self.kind {
            ErrorKind::Service(d) => d.cloud_error.as_ref(),
            _ => None,
        }
    }

    /// Not part of the public API, subject to change without notice.
    ///
    /// Cannot find a valid HTTP binding to make the request.
    ///
    /// This indicates the request is missing required parameters, or the
    /// required parameters do not have a valid format. Most commonly a
    /// resource ID that does not parse.
    #[cfg_attr(not(feature = "_internal-semver"), doc(hidden))]
    pub fn binding<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Binding, Some(source.into()))
    }

    /// If true, the request was missing required parameters or the parameters
    /// did not match any of the expected formats.
    ///
    /// # Troubleshooting
    ///
    /// Typically this indicates a problem in the application. A resource ID
    /// is malformed, is missing segments, or has extra segments. The
    /// [source][std::error::Error::source] describes the first problem.
    pub fn is_binding(&self) -> bool {
        matches!(&self.kind, ErrorKind::Binding)
    }

    /// Not part of the public API, subject to change without notice.
    ///
    /// Cannot create the authentication headers.
    #[cfg_attr(not(feature = "_internal-semver"), doc(hidden))]
    pub fn authentication(source: CredentialsError) -> Self {
        Self::new(ErrorKind::Authentication, Some(source.into()))
    }

    /// Could not create the authentication headers before sending the request.
    ///
    /// # Troubleshooting
    ///
    /// Typically this indicates a misconfigured authentication environment for
    /// your application, or a failure to contact the token endpoint.
    pub fn is_authentication(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication)
    }

    /// Not part of the public API, subject to change without notice.
    ///
    /// A problem in the transport layer without a full HTTP response.
    ///
    /// Examples include: a broken connection after the request is sent, a
    /// DNS failure, a TLS handshake failure, or an attempt that exceeds its
    /// attempt timeout.
    #[cfg_attr(not(feature = "_internal-semver"), doc(hidden))]
    pub fn io<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Transport, Some(source.into()))
    }

    /// A problem in the transport layer.
    ///
    /// # Troubleshooting
    ///
    /// This indicates a problem completing the request. It is not possible to
    /// know if the service received the request. Long-running operations may
    /// continue polling after this kind of error, see
    /// [PollingErrorPolicy][crate::polling::PollingErrorPolicy].
    pub fn is_transport(&self) -> bool {
        matches!(&self.kind, ErrorKind::Transport)
    }

    #[doc(hidden)]
    pub fn other<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Other, Some(source.into()))
    }

    /// The error was generated before the request started and is transient.
    pub(crate) fn is_transient_and_before_rpc(&self) -> bool {
        if !matches!(&self.kind, ErrorKind::Authentication) {
            return false;
        }
        self.source
            .as_ref()
            .and_then(|e| e.downcast_ref::<CredentialsError>())
            .map(|e| e.is_transient())
            .unwrap_or(false)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(c) = &self.context {
            write!(f, "{} {}: ", c.operation, c.resource_id)?;
        }
        match (&self.kind, &self.source) {
            (ErrorKind::Binding, Some(e)) => {
                write!(f, "cannot find a matching binding to send the request {e}")
            }
            (ErrorKind::Serialization, Some(e)) => write!(f, "cannot serialize the request {e}"),
            (ErrorKind::Deserialization, Some(e)) => {
                write!(f, "cannot deserialize the response {e}")
            }
            (ErrorKind::Authentication, Some(e)) => {
                write!(f, "cannot create the authentication headers {e}")
            }
            (ErrorKind::Timeout, Some(e)) => {
                write!(f, "the operation exceeded its deadline {e}")
            }
            (ErrorKind::Cancelled, Some(e)) => write!(f, "the operation was cancelled {e}"),
            (ErrorKind::Exhausted, Some(e)) => write!(f, "{e}"),
            (ErrorKind::Pagination, Some(e)) => write!(f, "cannot load more pages {e}"),
            (ErrorKind::Transport, Some(e)) => write!(f, "the transport reports an error: {e}"),
            (ErrorKind::OperationFailed(d), _) => write!(f, "{d}"),
            (ErrorKind::Service(d), _) => d.display(f),
            (ErrorKind::Other, Some(e)) => {
                write!(f, "an unclassified problem making a request: {e}")
            }
            (_, None) => unreachable!("no constructor allows this"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error))
    }
}

/// The type of error held by an [Error] instance.
#[derive(Debug)]
enum ErrorKind {
    Binding,
    Serialization,
    Deserialization,
    Authentication,
    Timeout,
    Cancelled,
    Exhausted,
    Pagination,
    Transport,
    Service(Box<ServiceDetails>),
    OperationFailed(Box<OperationFailure>),
    /// A uncategorized error.
    Other,
}

#[derive(Debug)]
struct ServiceDetails {
    status_code: u16,
    headers: HeaderMap,
    payload: bytes::Bytes,
    cloud_error: Option<CloudError>,
}

impl ServiceDetails {
    fn display(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = self.status_code;
        if let Some(e) = &self.cloud_error {
            return write!(
                f,
                "the service reports an unexpected status [{code}] with error code {} described as: {}",
                e.code, e.message
            );
        }
        match std::str::from_utf8(self.payload.as_ref()) {
            Ok(message) => write!(f, "the service reports an unexpected status [{code}]: {message}"),
            Err(_) => write!(
                f,
                "the service reports an unexpected status [{code}]: {:?}",
                self.payload
            ),
        }
    }
}
