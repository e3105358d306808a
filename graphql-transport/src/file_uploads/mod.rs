//! File uploads, following the [GraphQL multipart request
//! spec](https://github.com/jaydenseric/graphql-multipart-request-spec/).
//!
//! Example request form data:
//! ```text
//! operations: {"query": "…", "operationName": "addToGallery",
//!              "variables": {"galleryId": "…", "images": [null, null]}}
//! map: {"1": ["variables.images.1"], "2": ["variables.images.0"]}
//! 1: File
//! 2: File
//! ```

use std::path::Path;
use std::path::PathBuf;

use reqwest::multipart::Part;

use crate::error::TransportError;

mod map_field;
mod multipart_form_data;

pub use self::map_field::ExtractedFiles;
pub use self::map_field::FileMap;
pub use self::map_field::FilePart;
pub use self::map_field::extract_files;
pub use self::multipart_form_data::Payload;

/// A file to upload as a variable value.
///
/// The file is opened when the request is sent, once per attempt, so redirected
/// requests stream it again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    path: PathBuf,
    content_type: Option<String>,
}

impl Upload {
    /// An upload of the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content_type: None,
        }
    }

    /// Sets the content type sent with the file part.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The base name of the file, used as the part's filename.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub(crate) async fn part(&self) -> Result<Part, TransportError> {
        let io_error = |source| TransportError::Io {
            path: self.path.display().to_string(),
            source,
        };
        let file = tokio::fs::File::open(&self.path).await.map_err(io_error)?;
        let length = file.metadata().await.map_err(io_error)?.len();

        let part = Part::stream_with_length(file, length).file_name(self.file_name());
        Ok(match &self.content_type {
            Some(content_type) => part.mime_str(content_type).map_err(|_| {
                TransportError::InvalidContentType {
                    content_type: content_type.clone(),
                }
            })?,
            None => part,
        })
    }
}
