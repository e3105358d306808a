use http::HeaderValue;
use http::header::CONTENT_TYPE;
use reqwest::RequestBuilder;
use reqwest::multipart::Form;
use serde::Serialize;

use super::map_field::FilePart;
use super::map_field::extract_files;
use crate::error::TransportError;
use crate::request::Request;
use crate::variables::Variables;

/// The body of an outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// A plain `application/json` body.
    Json(String),
    /// A `multipart/form-data` body: `operations`, `map`, then one field per file.
    Multipart {
        operations: String,
        map: String,
        files: Vec<FilePart>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Operations<'a> {
    query: String,
    #[serde(skip_serializing_if = "is_empty")]
    variables: &'a Variables,
    #[serde(skip_serializing_if = "Option::is_none")]
    operation_name: Option<&'a str>,
}

fn is_empty(variables: &&Variables) -> bool {
    variables.is_empty()
}

impl Payload {
    /// Builds the payload for `request`, moving its uploads out of the variables.
    pub fn from_request(request: &mut Request) -> Result<Payload, TransportError> {
        let extracted = extract_files(&mut request.variables);

        let operations = serde_json::to_string(&Operations {
            query: request.document.to_string(),
            variables: &request.variables,
            operation_name: request.operation_name.as_deref(),
        })
        .map_err(malformed)?;

        Ok(match extracted {
            None => Payload::Json(operations),
            Some(extracted) => Payload::Multipart {
                operations,
                map: extracted.map_field().map_err(malformed)?,
                files: extracted.files,
            },
        })
    }

    /// The `operations` JSON text, which is the whole body for JSON payloads.
    pub fn operations(&self) -> &str {
        match self {
            Payload::Json(operations) | Payload::Multipart { operations, .. } => operations,
        }
    }

    /// Sets the body on `builder`. Upload files are opened anew on every call.
    pub(crate) async fn attach(
        &self,
        builder: RequestBuilder,
    ) -> Result<RequestBuilder, TransportError> {
        match self {
            Payload::Json(operations) => Ok(builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(operations.clone())),
            Payload::Multipart {
                operations,
                map,
                files,
            } => {
                let mut form = Form::new()
                    .text("operations", operations.clone())
                    .text("map", map.clone());
                for file in files {
                    form = form.part(file.form_index.clone(), file.upload.part().await?);
                }
                Ok(builder.multipart(form))
            }
        }
    }
}

fn malformed(error: serde_json::Error) -> TransportError {
    TransportError::MalformedRequest {
        reason: error.to_string(),
    }
}
