//! Transport-agnostic request description.

use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

/// One uploaded file inside a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

/// Text fields and files for a `multipart/form-data` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn into_reqwest(self) -> Result<reqwest::multipart::Form, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for file in self.files {
            let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
            if let Some(mime) = file.mime.as_deref() {
                part = part
                    .mime_str(mime)
                    .map_err(|e| ApiError::InvalidRequest(format!("mime '{mime}': {e}")))?;
            }
            form = form.part(file.name, part);
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// Method, query string, and body for one call through a [`crate::Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub query: Option<Value>,
    pub body: RequestBody,
}

impl ApiRequest {
    #[must_use]
    pub const fn get() -> Self {
        Self {
            method: Method::Get,
            query: None,
            body: RequestBody::Empty,
        }
    }

    #[must_use]
    pub const fn post() -> Self {
        Self {
            method: Method::Post,
            query: None,
            body: RequestBody::Empty,
        }
    }

    #[must_use]
    pub const fn delete() -> Self {
        Self {
            method: Method::Delete,
            query: None,
            body: RequestBody::Empty,
        }
    }

    #[must_use]
    pub const fn post_json(body: Value) -> Self {
        Self {
            method: Method::Post,
            query: None,
            body: RequestBody::Json(body),
        }
    }

    #[must_use]
    pub const fn patch_json(body: Value) -> Self {
        Self {
            method: Method::Patch,
            query: None,
            body: RequestBody::Json(body),
        }
    }

    #[must_use]
    pub const fn post_multipart(form: MultipartForm) -> Self {
        Self {
            method: Method::Post,
            query: None,
            body: RequestBody::Multipart(form),
        }
    }

    /// Attach query parameters. Empty objects are dropped.
    #[must_use]
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = match query {
            Value::Object(ref map) if map.is_empty() => None,
            Value::Null => None,
            other => Some(other),
        };
        self
    }

    /// JSON body, if this request carries one.
    #[must_use]
    pub const fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_dropped() {
        let req = ApiRequest::get().with_query(serde_json::json!({}));
        assert!(req.query.is_none());
    }

    #[test]
    fn multipart_field_lookup() {
        let form = MultipartForm::default()
            .text("company_name", "North Star")
            .text("contact_person", "Dana");
        assert_eq!(form.field("contact_person"), Some("Dana"));
        assert_eq!(form.field("missing"), None);
    }

    #[test]
    fn bad_mime_is_an_invalid_request() {
        let form = MultipartForm::default().file(FilePart {
            name: "documents[license]".into(),
            file_name: "license.pdf".into(),
            bytes: vec![1, 2, 3],
            mime: Some("not a mime".into()),
        });
        let err = form.into_reqwest().unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
