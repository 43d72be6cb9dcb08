//! Rule checks applied to raw candidate payloads before they reach storage.
//!
//! Every check stops at the first violation; callers always see exactly one
//! [`ValidationError`].

mod attachment;
mod fields;
mod policy;
mod records;

pub use policy::{
    IntakeLocale, IntakePolicy, PolicyError, ADDRESS_MAX_CHARS, ATTACHMENT_PATH_MAX_CHARS,
    DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS, NAME_MIN_CHARS, RECORD_FIELD_MAX_CHARS,
};

use serde_json::Value;

use super::domain::{
    CandidatePayload, Collection, Field, ValidationMode, FIELD_ADDRESS, FIELD_EDUCATION,
    FIELD_EMAIL, FIELD_EXPERIENCE, FIELD_FIRST_NAME, FIELD_LAST_NAME, FIELD_PHONE, FIELD_RESUMES,
};

/// Rule violations; the message text is part of the public contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid name")]
    InvalidName,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid phone")]
    InvalidPhone,
    #[error("Invalid address")]
    InvalidAddress,
    #[error("Invalid date")]
    InvalidDate,
    #[error("Invalid institution")]
    InvalidInstitution,
    #[error("Invalid title")]
    InvalidTitle,
    #[error("Invalid end date")]
    InvalidEndDate,
    #[error("Invalid company")]
    InvalidCompany,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Invalid description")]
    InvalidDescription,
    #[error("Invalid attachment")]
    InvalidAttachment,
    #[error("Too many attachments: at most {max} allowed, found {found}")]
    TooManyAttachments { max: usize, found: usize },
}

impl ValidationError {
    /// Stable machine-readable code for API consumers.
    pub const fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidName => "invalid_name",
            ValidationError::InvalidEmail => "invalid_email",
            ValidationError::InvalidPhone => "invalid_phone",
            ValidationError::InvalidAddress => "invalid_address",
            ValidationError::InvalidDate => "invalid_date",
            ValidationError::InvalidInstitution => "invalid_institution",
            ValidationError::InvalidTitle => "invalid_title",
            ValidationError::InvalidEndDate => "invalid_end_date",
            ValidationError::InvalidCompany => "invalid_company",
            ValidationError::InvalidPosition => "invalid_position",
            ValidationError::InvalidDescription => "invalid_description",
            ValidationError::InvalidAttachment => "invalid_attachment",
            ValidationError::TooManyAttachments { .. } => "too_many_attachments",
        }
    }
}

/// Stateless validator applying the intake policy to candidate payloads.
#[derive(Debug, Clone, Default)]
pub struct CandidateValidator {
    policy: IntakePolicy,
}

impl CandidateValidator {
    pub fn new(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Check a full payload in a fixed order: scalars, education, experience,
    /// then attachments.
    pub fn validate_candidate(&self, raw: &Value) -> Result<(), ValidationError> {
        let payload = CandidatePayload::new(raw);

        match payload.mode() {
            ValidationMode::Edit => {
                for key in [FIELD_FIRST_NAME, FIELD_LAST_NAME] {
                    optional(payload.field(key), ValidationError::InvalidName, |value| {
                        self.validate_name(value)
                    })?;
                }
                optional(
                    payload.field(FIELD_EMAIL),
                    ValidationError::InvalidEmail,
                    |value| self.validate_email(value),
                )?;
            }
            ValidationMode::Create => {
                self.validate_name(payload.field(FIELD_FIRST_NAME).text())?;
                self.validate_name(payload.field(FIELD_LAST_NAME).text())?;
                self.validate_email(payload.field(FIELD_EMAIL).text())?;
            }
        }

        optional(
            payload.field(FIELD_PHONE),
            ValidationError::InvalidPhone,
            |value| self.validate_phone(value),
        )?;
        optional(
            payload.field(FIELD_ADDRESS),
            ValidationError::InvalidAddress,
            |value| self.validate_address(value),
        )?;

        if let Collection::Sequence(entries) = payload.collection(FIELD_EDUCATION) {
            for entry in entries {
                self.validate_education(entry)?;
            }
        }

        if let Collection::Sequence(entries) = payload.collection(FIELD_EXPERIENCE) {
            for entry in entries {
                self.validate_experience(entry)?;
            }
        }

        match payload.collection(FIELD_RESUMES) {
            Collection::Absent => {}
            Collection::Malformed => return Err(ValidationError::InvalidAttachment),
            Collection::Sequence(entries) => {
                let max = self.policy.max_attachments();
                if entries.len() > max {
                    return Err(ValidationError::TooManyAttachments {
                        max,
                        found: entries.len(),
                    });
                }
                for entry in entries {
                    self.validate_attachment(Some(entry))?;
                }
            }
        }

        Ok(())
    }
}

/// Run `check` only when the field was supplied; non-string values fail with `malformed`.
fn optional<'a, F>(
    field: Field<'a>,
    malformed: ValidationError,
    check: F,
) -> Result<(), ValidationError>
where
    F: FnOnce(Option<&'a str>) -> Result<(), ValidationError>,
{
    match field {
        Field::Absent => Ok(()),
        Field::Text(value) => check(Some(value)),
        Field::Malformed => Err(malformed),
    }
}

pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}
