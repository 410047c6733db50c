use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Profile commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProfileCommands {
    /// Fetch the recruiter profile and documents.
    Show,
    /// Update profile fields and/or upload documents.
    Update(ProfileUpdateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ProfileUpdateArgs {
    #[arg(long)]
    pub company_name: Option<String>,
    #[arg(long)]
    pub organization_type: Option<String>,
    #[arg(long)]
    pub contact_person: Option<String>,
    /// Document to upload as `type=path` (repeatable).
    #[arg(long = "document", value_parser = parse_document)]
    pub documents: Vec<DocumentArg>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentArg {
    pub document_type: String,
    pub path: PathBuf,
}

fn parse_document(value: &str) -> Result<DocumentArg, String> {
    let (document_type, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected type=path, got '{value}'"))?;
    let document_type = document_type.trim();
    let path = path.trim();
    if document_type.is_empty() || path.is_empty() {
        return Err(format!("expected type=path, got '{value}'"));
    }
    Ok(DocumentArg {
        document_type: document_type.to_string(),
        path: PathBuf::from(path),
    })
}
