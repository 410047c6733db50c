use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

/// The organization-level profile attached to a recruiter login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruiterProfile {
    pub id: RecordId,
    pub user_id: RecordId,
    pub company_name: Option<String>,
    pub organization_type: Option<String>,
    pub contact_person: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A compliance document uploaded against a recruiter profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruiterDocument {
    pub id: RecordId,
    pub recruiter_profile_id: RecordId,
    pub document_type: String,
    pub document_url: String,
    pub verification_status: String,
}

/// Profile and documents as one unit.
///
/// The two are always loaded, replaced, and cleared together; keeping them in
/// one value means a half-loaded state cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruiterAccount {
    pub profile: RecruiterProfile,
    #[serde(default)]
    pub documents: Vec<RecruiterDocument>,
}

impl RecruiterAccount {
    /// Documents that have not been approved yet.
    pub fn pending_documents(&self) -> impl Iterator<Item = &RecruiterDocument> {
        self.documents
            .iter()
            .filter(|d| !d.verification_status.eq_ignore_ascii_case("verified"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "profile": {
            "id": 11,
            "user_id": "usr_42",
            "company_name": "North Star Nursing",
            "organization_type": "agency",
            "contact_person": null,
            "status": "pending",
            "created_at": "2025-03-01T09:00:00Z",
            "updated_at": "2025-03-02T10:30:00Z"
        },
        "documents": [
            {
                "id": 1,
                "recruiter_profile_id": 11,
                "document_type": "business_license",
                "document_url": "https://files.example/license.pdf",
                "verification_status": "verified"
            },
            {
                "id": 2,
                "recruiter_profile_id": 11,
                "document_type": "insurance",
                "document_url": "https://files.example/insurance.pdf",
                "verification_status": "pending"
            }
        ]
    }"#;

    #[test]
    fn parses_profile_payload() {
        let account: RecruiterAccount = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(account.profile.id.as_str(), "11");
        assert_eq!(account.profile.company_name.as_deref(), Some("North Star Nursing"));
        assert!(account.profile.contact_person.is_none());
        assert_eq!(account.documents.len(), 2);
    }

    #[test]
    fn missing_documents_default_to_empty() {
        let json = r#"{
            "profile": {
                "id": 1, "user_id": 2, "status": "active",
                "company_name": null, "organization_type": null, "contact_person": null,
                "created_at": "2025-03-01T09:00:00Z", "updated_at": "2025-03-01T09:00:00Z"
            }
        }"#;
        let account: RecruiterAccount = serde_json::from_str(json).unwrap();
        assert!(account.documents.is_empty());
    }

    #[test]
    fn pending_documents_skips_verified() {
        let account: RecruiterAccount = serde_json::from_str(FIXTURE).unwrap();
        let pending: Vec<_> = account.pending_documents().map(|d| d.document_type.as_str()).collect();
        assert_eq!(pending, vec!["insurance"]);
    }
}
