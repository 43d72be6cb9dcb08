use serde_json::Value;

use super::policy::ATTACHMENT_PATH_MAX_CHARS;
use super::{char_len, CandidateValidator, ValidationError};
use crate::candidates::domain::ObjectView;

const FILE_PATH: &str = "filePath";
const FILE_TYPE: &str = "fileType";

impl CandidateValidator {
    /// Only the path and the declared MIME type are checked, never file bytes.
    /// Every failure reports the same [`ValidationError::InvalidAttachment`].
    pub fn validate_attachment(&self, reference: Option<&Value>) -> Result<(), ValidationError> {
        let view = reference
            .map(ObjectView::new)
            .filter(ObjectView::is_object)
            .ok_or(ValidationError::InvalidAttachment)?;

        let path_ok = view
            .field(FILE_PATH)
            .text()
            .is_some_and(|path| !path.is_empty() && char_len(path) <= ATTACHMENT_PATH_MAX_CHARS);
        let type_ok = view
            .field(FILE_TYPE)
            .text()
            .is_some_and(|declared| self.policy.allows_attachment_type(declared));

        if path_ok && type_ok {
            Ok(())
        } else {
            Err(ValidationError::InvalidAttachment)
        }
    }
}
