use indexmap::IndexMap;

use super::Upload;
use crate::variables::Variable;
use crate::variables::Variables;

/// The `map` multipart field: form field name to the object paths the file is used at.
pub type FileMap = IndexMap<String, Vec<String>>;

/// One file taken out of the variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    /// Name of the multipart field carrying the file, `"1"` for the first file.
    pub form_index: String,
    /// Object path of the file in `operations`, starting with `variables`.
    pub path: Vec<String>,
    pub upload: Upload,
}

/// Files extracted from variables, in the order they were assigned a form index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedFiles {
    pub files: Vec<FilePart>,
    pub map: FileMap,
}

impl ExtractedFiles {
    /// The JSON text of the `map` field.
    pub fn map_field(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.map)
    }
}

/// Takes every [`Upload`] out of `variables`, leaving `null` in its place.
///
/// Returns `None`, and leaves `variables` untouched, if there is no upload.
///
/// The walk uses an explicit stack seeded with the top-level variables. Siblings are
/// pushed in order and popped last first, and form indices are given in pop order:
/// `{"images": [a, b]}` maps `"1"` to `variables.images.1` and `"2"` to
/// `variables.images.0`. Servers may rely on that numbering, keep it stable.
pub fn extract_files(variables: &mut Variables) -> Option<ExtractedFiles> {
    let mut files = Vec::new();
    let mut map = FileMap::new();

    let mut stack: Vec<(Vec<String>, &mut Variable)> = variables
        .iter_mut()
        .map(|(name, value)| (vec!["variables".to_string(), name.clone()], value))
        .collect();

    while let Some((path, value)) = stack.pop() {
        match value {
            Variable::Object(fields) => {
                for (key, field) in fields.iter_mut() {
                    stack.push((child_path(&path, key.clone()), field));
                }
            }
            Variable::List(items) => {
                for (index, item) in items.iter_mut().enumerate() {
                    stack.push((child_path(&path, index.to_string()), item));
                }
            }
            Variable::Upload(_) => {
                let Variable::Upload(upload) = std::mem::replace(value, Variable::null()) else {
                    continue;
                };
                let form_index = (files.len() + 1).to_string();
                map.insert(form_index.clone(), vec![path.join(".")]);
                files.push(FilePart {
                    form_index,
                    path,
                    upload,
                });
            }
            Variable::Value(_) => {}
        }
    }

    if files.is_empty() {
        None
    } else {
        Some(ExtractedFiles { files, map })
    }
}

fn child_path(path: &[String], segment: String) -> Vec<String> {
    let mut path = path.to_vec();
    path.push(segment);
    path
}
