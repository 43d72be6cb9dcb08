use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FIELD_ID: &str = "id";
pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_ADDRESS: &str = "address";
pub const FIELD_EDUCATION: &str = "education";
pub const FIELD_EXPERIENCE: &str = "experience";
pub const FIELD_RESUMES: &str = "resumes";

/// Identifier wrapper for stored candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl CandidateId {
    /// Accepts string and numeric identifiers; anything else is not an id.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(id) => Some(Self(id.clone())),
            Value::Number(id) => Some(Self(id.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a payload describes a new candidate or changes to an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Edit,
}

impl ValidationMode {
    pub const fn label(self) -> &'static str {
        match self {
            ValidationMode::Create => "create",
            ValidationMode::Edit => "edit",
        }
    }
}

/// One slot of a loosely-typed object after the shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// Key missing or explicitly `null`.
    Absent,
    Text(&'a str),
    /// Present but not a string.
    Malformed,
}

impl<'a> Field<'a> {
    fn read(object: &'a Map<String, Value>, key: &str) -> Self {
        match object.get(key) {
            None | Some(Value::Null) => Field::Absent,
            Some(Value::String(text)) => Field::Text(text),
            Some(_) => Field::Malformed,
        }
    }

    pub fn is_present(self) -> bool {
        !matches!(self, Field::Absent)
    }

    /// Text content, or `None` when absent or malformed.
    pub fn text(self) -> Option<&'a str> {
        match self {
            Field::Text(text) => Some(text),
            Field::Absent | Field::Malformed => None,
        }
    }
}

/// Read-only view over one JSON object; non-objects read as empty.
#[derive(Debug, Clone, Copy)]
pub struct ObjectView<'a> {
    object: Option<&'a Map<String, Value>>,
}

impl<'a> ObjectView<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            object: value.as_object(),
        }
    }

    pub fn is_object(&self) -> bool {
        self.object.is_some()
    }

    pub fn field(&self, key: &str) -> Field<'a> {
        match self.object {
            Some(object) => Field::read(object, key),
            None => Field::Absent,
        }
    }

    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.object
            .and_then(|object| object.get(key))
            .filter(|value| !value.is_null())
    }
}

/// A collection slot: absent, a proper array, or something else.
#[derive(Debug, Clone, Copy)]
pub enum Collection<'a> {
    Absent,
    Sequence(&'a [Value]),
    Malformed,
}

/// Shape-checked view of a raw candidate payload.
#[derive(Debug, Clone, Copy)]
pub struct CandidatePayload<'a> {
    view: ObjectView<'a>,
}

impl<'a> CandidatePayload<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self {
            view: ObjectView::new(raw),
        }
    }

    pub fn id(&self) -> Option<&'a Value> {
        self.view.raw(FIELD_ID)
    }

    pub fn mode(&self) -> ValidationMode {
        if self.id().is_some() {
            ValidationMode::Edit
        } else {
            ValidationMode::Create
        }
    }

    pub fn field(&self, key: &str) -> Field<'a> {
        self.view.field(key)
    }

    pub fn collection(&self, key: &str) -> Collection<'a> {
        match self.view.raw(key) {
            None => Collection::Absent,
            Some(Value::Array(items)) => Collection::Sequence(items),
            Some(_) => Collection::Malformed,
        }
    }
}
