use apollo_compiler::ast;
use http::HeaderMap;

use crate::json_ext::Object;
use crate::variables::Variables;

/// A GraphQL request to send with [`Transport::execute`](crate::Transport::execute).
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Request {
    /// The parsed GraphQL document, sent as the `query` text.
    pub document: ast::Document,

    /// The operation to execute, when the document holds more than one.
    pub operation_name: Option<String>,

    /// The variables, which may hold file uploads.
    pub variables: Variables,

    /// Caller data handed to [`TransportHooks::headers`](crate::TransportHooks::headers).
    /// Never sent to the server.
    pub context: Object,

    /// Headers for this request only. They win over every other header source.
    pub headers: HeaderMap,
}

#[buildstructor::buildstructor]
impl Request {
    /// Returns a builder for a [`Request`].
    ///
    /// `.document()` is required, everything else is optional.
    #[builder(visibility = "pub")]
    fn new(
        document: ast::Document,
        operation_name: Option<String>,
        variables: Option<Variables>,
        context: Option<Object>,
        headers: Option<HeaderMap>,
    ) -> Self {
        Self {
            document,
            operation_name,
            variables: variables.unwrap_or_default(),
            context: context.unwrap_or_default(),
            headers: headers.unwrap_or_default(),
        }
    }
}
