//! Profile update form.

use std::path::Path;

use medhire_client::{FilePart, MultipartForm};

use crate::error::SessionError;

/// A compliance document to upload with a profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub document_type: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl DocumentUpload {
    /// Read a document from disk, guessing its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the file cannot be read.
    pub fn from_path(document_type: impl Into<String>, path: &Path) -> Result<Self, SessionError> {
        let bytes = std::fs::read(path)
            .map_err(|e| SessionError::Storage(format!("read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        let mime = mime_guess::from_path(path).first_raw().map(str::to_string);
        Ok(Self {
            document_type: document_type.into(),
            file_name,
            bytes,
            mime,
        })
    }

    fn into_part(self) -> FilePart {
        FilePart {
            name: format!("documents[{}]", self.document_type),
            file_name: self.file_name,
            bytes: self.bytes,
            mime: self.mime,
        }
    }
}

/// Fields to change on the recruiter profile. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub company_name: Option<String>,
    pub organization_type: Option<String>,
    pub contact_person: Option<String>,
    pub documents: Vec<DocumentUpload>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn into_form(self) -> MultipartForm {
        let mut form = MultipartForm::default();
        let fields = [
            ("company_name", self.company_name),
            ("organization_type", self.organization_type),
            ("contact_person", self.contact_person),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                form = form.text(name, value);
            }
        }
        self.documents
            .into_iter()
            .fold(form, |form, doc| form.file(doc.into_part()))
    }
}
