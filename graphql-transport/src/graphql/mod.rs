//! Types related to GraphQL responses.

use std::fmt;

use http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::error::TransportError;
use crate::json_ext::Object;
use crate::json_ext::Path;
use crate::json_ext::Value;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
/// The error location
pub struct Location {
    /// The line number
    pub line: u32,
    /// The column number
    pub column: u32,
}

/// A [GraphQL error](https://spec.graphql.org/October2021/#sec-Errors)
/// as may be found in the `errors` field of a GraphQL [`Response`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
#[non_exhaustive]
pub struct Error {
    /// The error message.
    pub message: String,

    /// The locations of the error in the GraphQL document of the originating request.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_null_default"
    )]
    pub locations: Vec<Location>,

    /// If this is a field error, the JSON path to that field in [`Response::data`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,

    /// The optional GraphQL extensions for this error.
    #[serde(
        skip_serializing_if = "Object::is_empty",
        deserialize_with = "deserialize_null_default"
    )]
    pub extensions: Object,

    /// Top-level keys outside the GraphQL error format, e.g. `"type"`.
    #[serde(flatten)]
    pub other: Object,
}

#[buildstructor::buildstructor]
impl Error {
    /// Returns a builder that builds a GraphQL [`Error`] from its components.
    ///
    /// `.message()` is required, `.locations()`, `.path()`, `.extensions()` and
    /// `.other()` are optional.
    #[builder(visibility = "pub")]
    fn new(
        message: String,
        locations: Vec<Location>,
        path: Option<Path>,
        extensions: Option<Object>,
        other: Option<Object>,
    ) -> Self {
        Self {
            message,
            locations,
            path,
            extensions: extensions.unwrap_or_default(),
            other: other.unwrap_or_default(),
        }
    }
}

// NOTE: this deserialize helper is used to transform `null` to Default::default()
fn deserialize_null_default<'de, D, T: Default + Deserialize<'de>>(
    deserializer: D,
) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
{
    <Option<T>>::deserialize(deserializer).map(|x| x.unwrap_or_default())
}

// `"data": null` is kept as `Some(Value::Null)`, only a missing key is `None`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A GraphQL response, as returned by the server or synthesized from an HTTP status.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Response {
    /// The response data. `Some(Value::Null)` when the server sent `"data": null`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "deserialize_present"
    )]
    pub data: Option<Value>,

    /// The optional graphql errors encountered.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub errors: Vec<Error>,

    /// The optional graphql extensions.
    #[serde(
        skip_serializing_if = "Object::is_empty",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub extensions: Object,
}

#[buildstructor::buildstructor]
impl Response {
    /// Constructor
    #[builder(visibility = "pub")]
    fn new(data: Option<Value>, errors: Vec<Error>, extensions: Option<Object>) -> Self {
        Self {
            data,
            errors,
            extensions: extensions.unwrap_or_default(),
        }
    }

    /// Parse a response body returned by the server.
    pub(crate) fn from_bytes(body: &[u8]) -> Result<Response, TransportError> {
        let malformed = |reason: String| TransportError::MalformedResponse { reason };
        let value: Value =
            serde_json::from_slice(body).map_err(|error| malformed(error.to_string()))?;
        if !value.is_object() {
            return Err(malformed("expected a JSON object".to_string()));
        }
        serde_json_bytes::from_value(value).map_err(|error| malformed(error.to_string()))
    }

    /// A response carrying a single error that describes an unexpected HTTP status,
    /// e.g. `404 Not Found`.
    pub(crate) fn from_status(status: StatusCode) -> Response {
        let message = match status.canonical_reason() {
            Some(reason) => format!("{} {reason}", status.as_u16()),
            None => status.as_u16().to_string(),
        };
        Response::builder()
            .error(Error::builder().message(message).build())
            .build()
    }

    /// Returns the data, or a [`QueryError`] when the server returned no data or
    /// `"data": null`.
    ///
    /// Partial responses (data alongside errors) are returned as `Ok`; callers can still
    /// inspect [`Response::errors`] before calling this.
    pub fn into_data(self) -> Result<Value, QueryError> {
        match self.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(QueryError {
                errors: self.errors,
            }),
        }
    }
}

/// The server returned no data while executing a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("query failed: {}", Messages(.errors))]
pub struct QueryError {
    /// The errors reported by the server, possibly empty.
    pub errors: Vec<Error>,
}

struct Messages<'a>(&'a [Error]);

impl fmt::Display for Messages<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "no data returned");
        }
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error.message)?;
        }
        Ok(())
    }
}
