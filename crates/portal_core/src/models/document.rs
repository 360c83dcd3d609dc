use serde::{Deserialize, Serialize};

use crate::validation::FieldError;

// ---------------------------------------------------------------------------
// Document slots. The upload surface accepts exactly these six kinds; each
// kind carries its own media-type allow-list and size bound, so a stray key
// or an oversized scan is rejected before anything reaches the blob store.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    PassportPhoto,
    Signature,
    Class10Marksheet,
    Class12Marksheet,
    ItiMarksheet,
    CasteCertificate,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        DocumentKind::PassportPhoto,
        DocumentKind::Signature,
        DocumentKind::Class10Marksheet,
        DocumentKind::Class12Marksheet,
        DocumentKind::ItiMarksheet,
        DocumentKind::CasteCertificate,
    ];

    /// The slots progression treats as mandatory. Deliberately three of
    /// six: the class-12 marksheet, ITI marksheet and caste certificate
    /// are conditional on the applicant's history.
    pub const MANDATORY: [DocumentKind; 3] = [
        DocumentKind::PassportPhoto,
        DocumentKind::Signature,
        DocumentKind::Class10Marksheet,
    ];

    /// Wire key for this slot, as the wizard sends it.
    pub fn key(self) -> &'static str {
        match self {
            DocumentKind::PassportPhoto => "passportPhoto",
            DocumentKind::Signature => "signature",
            DocumentKind::Class10Marksheet => "class10Marksheet",
            DocumentKind::Class12Marksheet => "class12Marksheet",
            DocumentKind::ItiMarksheet => "itiMarksheet",
            DocumentKind::CasteCertificate => "casteCertificate",
        }
    }

    pub fn from_key(key: &str) -> Option<DocumentKind> {
        DocumentKind::ALL.into_iter().find(|k| k.key() == key)
    }

    pub fn allowed_media_types(self) -> &'static [&'static str] {
        match self {
            // Camera captures only for the photo and the signature strip.
            DocumentKind::PassportPhoto | DocumentKind::Signature => {
                &["image/jpeg", "image/png"]
            }
            // Marksheets and certificates may also arrive as scans.
            DocumentKind::Class10Marksheet
            | DocumentKind::Class12Marksheet
            | DocumentKind::ItiMarksheet
            | DocumentKind::CasteCertificate => {
                &["application/pdf", "image/jpeg", "image/png"]
            }
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            DocumentKind::PassportPhoto => 2 * 1024 * 1024,
            DocumentKind::Signature => 1024 * 1024,
            DocumentKind::Class10Marksheet
            | DocumentKind::Class12Marksheet
            | DocumentKind::ItiMarksheet
            | DocumentKind::CasteCertificate => 5 * 1024 * 1024,
        }
    }

    /// Checks a decoded upload against this slot's rules. The media type is
    /// validated only when the client declared one; legacy clients omit it.
    pub fn validate_upload(
        self,
        declared_media_type: Option<&str>,
        decoded_len: usize,
    ) -> Result<(), FieldError> {
        if let Some(media_type) = declared_media_type {
            if !self.allowed_media_types().contains(&media_type) {
                return Err(FieldError {
                    field: self.key().to_string(),
                    message: format!(
                        "Media type {} is not accepted for {}",
                        media_type,
                        self.key()
                    ),
                });
            }
        }
        if decoded_len == 0 {
            return Err(FieldError {
                field: self.key().to_string(),
                message: "Uploaded file is empty".to_string(),
            });
        }
        if decoded_len > self.max_bytes() {
            return Err(FieldError {
                field: self.key().to_string(),
                message: format!(
                    "File exceeds the {} KB limit for {}",
                    self.max_bytes() / 1024,
                    self.key()
                ),
            });
        }
        Ok(())
    }
}

/// One entry of a document PUT body: inline base64 plus optional metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentUpload {
    pub data: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
}

/// The stored sub-profile: one opaque blob-store URL (or null) per slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentDetails {
    pub passport_photo: Option<String>,
    pub signature: Option<String>,
    pub class10_marksheet: Option<String>,
    pub class12_marksheet: Option<String>,
    pub iti_marksheet: Option<String>,
    pub caste_certificate: Option<String>,
}

impl DocumentDetails {
    pub fn url(&self, kind: DocumentKind) -> Option<&str> {
        match kind {
            DocumentKind::PassportPhoto => self.passport_photo.as_deref(),
            DocumentKind::Signature => self.signature.as_deref(),
            DocumentKind::Class10Marksheet => self.class10_marksheet.as_deref(),
            DocumentKind::Class12Marksheet => self.class12_marksheet.as_deref(),
            DocumentKind::ItiMarksheet => self.iti_marksheet.as_deref(),
            DocumentKind::CasteCertificate => self.caste_certificate.as_deref(),
        }
    }

    pub fn set_url(&mut self, kind: DocumentKind, url: String) {
        let slot = match kind {
            DocumentKind::PassportPhoto => &mut self.passport_photo,
            DocumentKind::Signature => &mut self.signature,
            DocumentKind::Class10Marksheet => &mut self.class10_marksheet,
            DocumentKind::Class12Marksheet => &mut self.class12_marksheet,
            DocumentKind::ItiMarksheet => &mut self.iti_marksheet,
            DocumentKind::CasteCertificate => &mut self.caste_certificate,
        };
        *slot = Some(url);
    }

    pub fn clear_all(&mut self) {
        *self = DocumentDetails::default();
    }

    /// All three mandatory slots are populated.
    pub fn mandatory_present(&self) -> bool {
        DocumentKind::MANDATORY
            .into_iter()
            .all(|kind| self.url(kind).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for kind in DocumentKind::ALL {
            assert_eq!(DocumentKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(DocumentKind::from_key("aadhaarCard"), None);
    }

    #[test]
    fn photo_rejects_pdf_but_marksheet_accepts_it() {
        assert!(DocumentKind::PassportPhoto
            .validate_upload(Some("application/pdf"), 1024)
            .is_err());
        assert!(DocumentKind::Class10Marksheet
            .validate_upload(Some("application/pdf"), 1024)
            .is_ok());
    }

    #[test]
    fn undeclared_media_type_is_tolerated() {
        assert!(DocumentKind::Signature.validate_upload(None, 1024).is_ok());
    }

    #[test]
    fn size_bounds_enforced_per_kind() {
        let over_signature = DocumentKind::Signature.max_bytes() + 1;
        assert!(DocumentKind::Signature
            .validate_upload(Some("image/png"), over_signature)
            .is_err());
        // The same payload is fine for a marksheet slot.
        assert!(DocumentKind::ItiMarksheet
            .validate_upload(Some("image/png"), over_signature)
            .is_ok());

        assert!(DocumentKind::PassportPhoto
            .validate_upload(Some("image/jpeg"), 0)
            .is_err());
    }

    #[test]
    fn mandatory_slots_are_the_three_fixed_ones() {
        let mut details = DocumentDetails::default();
        details.set_url(DocumentKind::Signature, "https://blob/sig".to_string());
        details.set_url(DocumentKind::CasteCertificate, "https://blob/cert".to_string());
        assert!(!details.mandatory_present());

        details.set_url(DocumentKind::PassportPhoto, "https://blob/photo".to_string());
        details.set_url(DocumentKind::Class10Marksheet, "https://blob/c10".to_string());
        assert!(details.mandatory_present());
    }
}
