use serde_json::{Value, json};

use crate::attrs;
use crate::error::MessageError;

/// A single titled line of data rendered inside an attachment.
///
/// Fields are owned exclusively by the [`Attachment`](crate::Attachment)
/// holding them; the serializer never mutates them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentField {
    title: Option<String>,
    value: Option<String>,
    short: bool,
}

impl AttachmentField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a field from a loosely-typed attribute map.
    ///
    /// Recognized keys: `title`, `value`, `short`. Unrecognized keys are
    /// silently ignored; `null` values count as absent.
    pub fn from_value(value: &Value) -> Result<Self, MessageError> {
        let attrs = attrs::attribute_map(value, "an attachment field")?;
        let mut field = Self::new();
        if let Some(title) = attrs::string(attrs, "title")? {
            field.title = Some(title);
        }
        if let Some(text) = attrs::string(attrs, "value")? {
            field.value = Some(text);
        }
        if let Some(short) = attrs::boolean(attrs, "short")? {
            field.short = short;
        }
        Ok(field)
    }

    /// Set the field title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the field value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Mark whether the field is short enough to render side by side with a
    /// neighbour.
    #[must_use]
    pub fn with_short(mut self, short: bool) -> Self {
        self.short = short;
        self
    }

    /// The field title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The field value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether the field renders side by side with its neighbour.
    pub fn short(&self) -> bool {
        self.short
    }

    /// Canonical serialized form: `{title, value, short}`.
    pub fn to_value(&self) -> Value {
        json!({
            "title": self.title,
            "value": self.value,
            "short": self.short,
        })
    }
}

/// Input accepted by [`Attachment::add_field`](crate::Attachment::add_field):
/// an already-built field or a raw attribute map.
#[derive(Debug, Clone)]
pub enum FieldArg {
    /// A field built through the typed API.
    Built(AttachmentField),
    /// A loosely-typed JSON value. Anything other than an attribute map is
    /// rejected at the point of addition.
    Raw(Value),
}

impl From<AttachmentField> for FieldArg {
    fn from(field: AttachmentField) -> Self {
        Self::Built(field)
    }
}

impl From<Value> for FieldArg {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl FieldArg {
    pub(crate) fn build(self) -> Result<AttachmentField, MessageError> {
        match self {
            Self::Built(field) => Ok(field),
            Self::Raw(value) => AttachmentField::from_value(&value),
        }
    }
}
