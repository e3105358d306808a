//! GraphQL over HTTP: a client transport and a static deprecation checker.
//!
//! [`Transport`] posts GraphQL documents to a single endpoint. Variables holding
//! [`Upload`]s are sent following the
//! [GraphQL multipart request spec](https://github.com/jaydenseric/graphql-multipart-request-spec),
//! redirects are followed up to [`MAX_REDIRECTS`] hops, and responses are classified
//! into a GraphQL [`Response`].
//!
//! [`DeprecationVisitor`] walks a parsed document against a schema and reports
//! every deprecated field or enum value the document uses.

#![warn(unreachable_pub)]

pub mod json_ext;

pub mod deprecation;
pub mod error;
pub mod file_uploads;
pub mod graphql;
mod request;
pub mod transport;
mod variables;

pub use deprecation::DeprecationNotice;
pub use deprecation::Deprecations;
pub use deprecation::DeprecationReporter;
pub use deprecation::DeprecationVisitor;
pub use deprecation::TracingReporter;
pub use error::DeprecationError;
pub use error::TransportError;
pub use file_uploads::Upload;
pub use graphql::QueryError;
pub use graphql::Response;
pub use request::Request;
pub use transport::MAX_REDIRECTS;
pub use transport::Transport;
pub use transport::TransportConfig;
pub use transport::TransportHooks;
pub use variables::Variable;
pub use variables::Variables;
