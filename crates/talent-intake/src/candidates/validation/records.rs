use serde_json::Value;

use super::policy::{DESCRIPTION_MAX_CHARS, RECORD_FIELD_MAX_CHARS};
use super::{char_len, CandidateValidator, ValidationError};
use crate::candidates::domain::{Field, ObjectView};

const INSTITUTION: &str = "institution";
const TITLE: &str = "title";
const COMPANY: &str = "company";
const POSITION: &str = "position";
const DESCRIPTION: &str = "description";
const START_DATE: &str = "startDate";
const END_DATE: &str = "endDate";

fn required_text(field: Field<'_>, error: ValidationError) -> Result<(), ValidationError> {
    match field.text() {
        Some(text) if !text.is_empty() && char_len(text) <= RECORD_FIELD_MAX_CHARS => Ok(()),
        _ => Err(error),
    }
}

impl CandidateValidator {
    /// Education entries must not end before they start; a missing end date
    /// means the studies are still in progress.
    pub fn validate_education(&self, entry: &Value) -> Result<(), ValidationError> {
        let view = ObjectView::new(entry);

        required_text(view.field(INSTITUTION), ValidationError::InvalidInstitution)?;
        required_text(view.field(TITLE), ValidationError::InvalidTitle)?;

        let start = self.validate_date(view.field(START_DATE).text())?;
        let end = match view.field(END_DATE) {
            Field::Absent => None,
            field => Some(self.validate_date(field.text())?),
        };

        if let Some(end) = end {
            if end < start {
                return Err(ValidationError::InvalidEndDate);
            }
        }

        Ok(())
    }

    /// Experience end dates are only shape-checked, never ordered against the start.
    pub fn validate_experience(&self, entry: &Value) -> Result<(), ValidationError> {
        let view = ObjectView::new(entry);

        required_text(view.field(COMPANY), ValidationError::InvalidCompany)?;
        required_text(view.field(POSITION), ValidationError::InvalidPosition)?;

        match view.field(DESCRIPTION) {
            Field::Absent => {}
            Field::Text(description) if char_len(description) <= DESCRIPTION_MAX_CHARS => {}
            _ => return Err(ValidationError::InvalidDescription),
        }

        self.validate_date(view.field(START_DATE).text())?;
        if view.field(END_DATE).is_present() {
            self.validate_date(view.field(END_DATE).text())?;
        }

        Ok(())
    }
}
