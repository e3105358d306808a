use indexmap::IndexMap;
use serde::Serialize;
use serde::Serializer;

use crate::file_uploads::Upload;
use crate::json_ext::Value;

/// Variables of a GraphQL request, by name.
pub type Variables = IndexMap<String, Variable>;

/// The value of a variable.
///
/// Plain JSON goes in [`Variable::Value`]. Lists and input objects that contain
/// uploads, at any depth, must be spelled out with [`Variable::List`] and
/// [`Variable::Object`] so the uploads can be found.
#[derive(Clone, Debug, PartialEq)]
pub enum Variable {
    /// A JSON value without uploads.
    Value(Value),
    /// A list that may contain uploads.
    List(Vec<Variable>),
    /// An input object that may contain uploads.
    Object(IndexMap<String, Variable>),
    /// A file, sent as a separate multipart field.
    Upload(Upload),
}

impl Variable {
    /// The JSON `null` value.
    pub fn null() -> Self {
        Variable::Value(Value::Null)
    }

    /// Returns `true` if this is a JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Variable::Value(Value::Null))
    }
}

// Uploads are never part of the JSON body: they are replaced by `null` and sent out of band.
impl Serialize for Variable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Variable::Value(value) => value.serialize(serializer),
            Variable::List(items) => items.serialize(serializer),
            Variable::Object(fields) => fields.serialize(serializer),
            Variable::Upload(_) => serializer.serialize_unit(),
        }
    }
}

impl From<Value> for Variable {
    fn from(value: Value) -> Self {
        Variable::Value(value)
    }
}

impl From<Upload> for Variable {
    fn from(upload: Upload) -> Self {
        Variable::Upload(upload)
    }
}

impl From<Vec<Variable>> for Variable {
    fn from(items: Vec<Variable>) -> Self {
        Variable::List(items)
    }
}

impl From<IndexMap<String, Variable>> for Variable {
    fn from(fields: IndexMap<String, Variable>) -> Self {
        Variable::Object(fields)
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexmap;
    use serde_json_bytes::json;

    use super::*;

    #[test]
    fn test_uploads_serialize_as_null() {
        let variables: Variables = indexmap! {
            "id".to_string() => Variable::from(json!("1001")),
            "input".to_string() => Variable::from(indexmap! {
                "avatar".to_string() => Variable::from(Upload::new("avatar.png")),
                "tags".to_string() => Variable::from(vec![
                    Variable::from(json!("a")),
                    Variable::from(Upload::new("b.txt")),
                ]),
            }),
        };

        assert_eq!(
            serde_json::to_value(&variables).unwrap(),
            serde_json::json!({
                "id": "1001",
                "input": { "avatar": null, "tags": ["a", null] },
            })
        );
    }
}
