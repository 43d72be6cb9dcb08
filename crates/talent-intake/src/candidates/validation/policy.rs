use regex::Regex;

use crate::config::IntakeConfig;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const ADDRESS_MAX_CHARS: usize = 100;
pub const RECORD_FIELD_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 200;
pub const ATTACHMENT_PATH_MAX_CHARS: usize = 255;

const DEFAULT_MAX_ATTACHMENTS: usize = 5;
const MSWORD: &str = "application/msword";
const WORDPROCESSING_ML: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const EMAIL_PATTERN: &str = r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$";
const DATE_SHAPE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";

/// Country-specific assumptions baked into the name and phone rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeLocale {
    /// Letters accepted in names on top of ASCII `a-z`/`A-Z`.
    pub name_extra_letters: String,
    /// Leading digits allowed for a mobile number.
    pub phone_prefixes: Vec<char>,
    pub phone_digits: usize,
}

impl IntakeLocale {
    /// Spanish mobile numbers: nine digits starting with 6, 7 or 9.
    pub fn spain() -> Self {
        Self {
            name_extra_letters: "áéíóúÁÉÍÓÚñÑüÜ".to_string(),
            phone_prefixes: vec!['6', '7', '9'],
            phone_digits: 9,
        }
    }
}

impl Default for IntakeLocale {
    fn default() -> Self {
        Self::spain()
    }
}

impl From<&IntakeConfig> for IntakeLocale {
    fn from(config: &IntakeConfig) -> Self {
        Self {
            name_extra_letters: config.name_extra_letters.clone(),
            phone_prefixes: config.phone_prefixes.chars().collect(),
            phone_digits: config.phone_digits,
        }
    }
}

/// Reasons a locale cannot be turned into working patterns.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("phone prefixes must be a non-empty set of ASCII digits")]
    InvalidPhonePrefixes,
    #[error("phone numbers must have at least one digit")]
    InvalidPhoneLength,
    #[error("failed to compile intake pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Compiled patterns and limits shared by every rule check.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    locale: IntakeLocale,
    name_pattern: Regex,
    email_pattern: Regex,
    phone_pattern: Regex,
    date_shape: Regex,
    max_attachments: usize,
    allowed_attachment_types: Vec<String>,
}

impl IntakePolicy {
    pub fn new(locale: IntakeLocale) -> Result<Self, PolicyError> {
        if locale.phone_prefixes.is_empty()
            || !locale.phone_prefixes.iter().all(|c| c.is_ascii_digit())
        {
            return Err(PolicyError::InvalidPhonePrefixes);
        }
        if locale.phone_digits == 0 {
            return Err(PolicyError::InvalidPhoneLength);
        }

        let name_pattern = Regex::new(&format!(
            r"^[a-zA-Z{}\s-]+$",
            regex::escape(&locale.name_extra_letters)
        ))?;
        let prefixes: String = locale.phone_prefixes.iter().collect();
        let phone_pattern = Regex::new(&format!(
            "^[{}][0-9]{{{}}}$",
            prefixes,
            locale.phone_digits - 1
        ))?;

        Ok(Self {
            locale,
            name_pattern,
            email_pattern: Regex::new(EMAIL_PATTERN)?,
            phone_pattern,
            date_shape: Regex::new(DATE_SHAPE_PATTERN)?,
            max_attachments: DEFAULT_MAX_ATTACHMENTS,
            allowed_attachment_types: vec![
                mime::APPLICATION_PDF.essence_str().to_string(),
                MSWORD.to_string(),
                WORDPROCESSING_ML.to_string(),
            ],
        })
    }

    pub fn from_config(config: &IntakeConfig) -> Result<Self, PolicyError> {
        Ok(Self::new(IntakeLocale::from(config))?.with_max_attachments(config.max_attachments))
    }

    pub fn with_max_attachments(mut self, max_attachments: usize) -> Self {
        self.max_attachments = max_attachments;
        self
    }

    pub fn locale(&self) -> &IntakeLocale {
        &self.locale
    }

    pub fn max_attachments(&self) -> usize {
        self.max_attachments
    }

    pub fn allowed_attachment_types(&self) -> &[String] {
        &self.allowed_attachment_types
    }

    pub fn allows_attachment_type(&self, declared: &str) -> bool {
        self.allowed_attachment_types
            .iter()
            .any(|allowed| allowed == declared)
    }

    pub(crate) fn name_pattern(&self) -> &Regex {
        &self.name_pattern
    }

    pub(crate) fn email_pattern(&self) -> &Regex {
        &self.email_pattern
    }

    pub(crate) fn phone_pattern(&self) -> &Regex {
        &self.phone_pattern
    }

    pub(crate) fn date_shape(&self) -> &Regex {
        &self.date_shape
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::new(IntakeLocale::default()).expect("built-in intake locale compiles")
    }
}
