//! Transport and deprecation errors.
use displaydoc::Display;
use thiserror::Error;

/// Errors returned by [`Transport::execute`](crate::Transport::execute).
///
/// GraphQL errors reported by the server are not represented here: they are
/// returned as entries of [`Response::errors`](crate::Response::errors).
#[derive(Error, Display, Debug)]
#[ignore_extra_doc_attributes]
#[non_exhaustive]
pub enum TransportError {
    /// exceeded the limit of {max} redirects
    TooManyRedirects {
        /// The redirect budget that was exhausted.
        max: usize,
    },

    /// HTTP request failed: {0}
    ///
    /// note that this relates to a transport error and not a GraphQL error
    Http(#[from] reqwest::Error),

    /// invalid endpoint URL: {0}
    InvalidEndpoint(#[from] url::ParseError),

    /// invalid redirect location '{location}'
    InvalidRedirectLocation {
        /// The raw `Location` header value.
        location: String,
    },

    /// invalid header value: {0}
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    /// invalid upload content type '{content_type}'
    InvalidContentType {
        /// The content type set on the upload.
        content_type: String,
    },

    /// could not open upload '{path}': {source}
    Io {
        /// The upload's path on disk.
        path: String,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// request was malformed: {reason}
    MalformedRequest {
        /// The reason the serialization failed.
        reason: String,
    },

    /// response was malformed: {reason}
    MalformedResponse {
        /// The reason the deserialization failed.
        reason: String,
    },
}

/// A document does not match the schema it is checked against.
#[derive(Error, Display, Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum DeprecationError {
    /// schema does not define a root type for {operation_type} operations
    MissingRootOperation {
        /// The operation kind, e.g. `mutation`.
        operation_type: String,
    },

    /// type `{name}` not defined
    UnknownType {
        /// The type name.
        name: String,
    },

    /// no field `{field}` in type `{type_name}`
    UnknownField {
        /// The enclosing type.
        type_name: String,
        /// The field name.
        field: String,
    },

    /// directive `@{name}` not defined
    UnknownDirective {
        /// The directive name.
        name: String,
    },

    /// no argument `{name}` on `{owner}`
    UnknownArgument {
        /// The field, directive or input object the argument belongs to.
        owner: String,
        /// The argument name.
        name: String,
    },

    /// type `{name}` is not an enum
    NotAnEnum {
        /// The type name.
        name: String,
    },

    /// no value `{value}` in enum `{enum_type}`
    UnknownEnumValue {
        /// The enum type.
        enum_type: String,
        /// The enum value.
        value: String,
    },
}
