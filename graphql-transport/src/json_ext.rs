//! JSON helpers shared by requests and responses.

use serde::Deserialize;
use serde::Serialize;
use serde_json_bytes::ByteString;
use serde_json_bytes::Map;
pub use serde_json_bytes::Value;

/// A JSON object.
pub type Object = Map<ByteString, Value>;

/// A path into a GraphQL response, made of field names and list indices.
pub type Path = Vec<PathElement>;

/// One element of a [`Path`].
/// e.g `/book/3/name`
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathElement {
    /// A list index.
    Index(usize),

    /// A field name or alias.
    Key(String),
}
