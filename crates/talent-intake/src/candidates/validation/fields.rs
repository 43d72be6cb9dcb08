use chrono::NaiveDate;

use super::policy::{ADDRESS_MAX_CHARS, NAME_MAX_CHARS, NAME_MIN_CHARS};
use super::{char_len, CandidateValidator, ValidationError};

impl CandidateValidator {
    pub fn validate_name(&self, value: Option<&str>) -> Result<(), ValidationError> {
        let name = value.ok_or(ValidationError::InvalidName)?;
        let length = char_len(name);
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&length)
            || !self.policy.name_pattern().is_match(name)
        {
            return Err(ValidationError::InvalidName);
        }
        Ok(())
    }

    pub fn validate_email(&self, value: Option<&str>) -> Result<(), ValidationError> {
        match value {
            Some(email) if self.policy.email_pattern().is_match(email) => Ok(()),
            _ => Err(ValidationError::InvalidEmail),
        }
    }

    /// Phone is optional everywhere, so `None` passes.
    pub fn validate_phone(&self, value: Option<&str>) -> Result<(), ValidationError> {
        match value {
            Some(phone) if !self.policy.phone_pattern().is_match(phone) => {
                Err(ValidationError::InvalidPhone)
            }
            _ => Ok(()),
        }
    }

    pub fn validate_address(&self, value: Option<&str>) -> Result<(), ValidationError> {
        match value {
            Some(address) if char_len(address) > ADDRESS_MAX_CHARS => {
                Err(ValidationError::InvalidAddress)
            }
            _ => Ok(()),
        }
    }

    /// Shape first (`YYYY-MM-DD`), then calendar validity.
    pub fn validate_date(&self, value: Option<&str>) -> Result<NaiveDate, ValidationError> {
        let raw = value.ok_or(ValidationError::InvalidDate)?;
        if !self.policy.date_shape().is_match(raw) {
            return Err(ValidationError::InvalidDate);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
    }
}
