use serde_json::{Value, json};

use crate::attrs;
use crate::error::MessageError;

/// Confirmation dialog shown before an interactive action fires.
///
/// All attributes are optional; absent ones serialize as `null` rather than
/// being omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionConfirmation {
    title: Option<String>,
    text: Option<String>,
    ok_text: Option<String>,
    dismiss_text: Option<String>,
}

impl ActionConfirmation {
    /// Create an empty confirmation dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a confirmation from a loosely-typed attribute map.
    ///
    /// Recognized keys: `title`, `text`, `ok_text`, `dismiss_text`.
    /// Unrecognized keys are silently ignored; `null` values count as absent.
    pub fn from_value(value: &Value) -> Result<Self, MessageError> {
        let attrs = attrs::attribute_map(value, "an action confirmation")?;
        let mut confirmation = Self::new();
        if let Some(title) = attrs::string(attrs, "title")? {
            confirmation.title = Some(title);
        }
        if let Some(text) = attrs::string(attrs, "text")? {
            confirmation.text = Some(text);
        }
        if let Some(ok_text) = attrs::string(attrs, "ok_text")? {
            confirmation.ok_text = Some(ok_text);
        }
        if let Some(dismiss_text) = attrs::string(attrs, "dismiss_text")? {
            confirmation.dismiss_text = Some(dismiss_text);
        }
        Ok(confirmation)
    }

    /// Set the dialog title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the dialog body text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the confirm-button label.
    #[must_use]
    pub fn with_ok_text(mut self, ok_text: impl Into<String>) -> Self {
        self.ok_text = Some(ok_text.into());
        self
    }

    /// Set the dismiss-button label.
    #[must_use]
    pub fn with_dismiss_text(mut self, dismiss_text: impl Into<String>) -> Self {
        self.dismiss_text = Some(dismiss_text.into());
        self
    }

    /// The dialog title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The dialog body text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The confirm-button label.
    pub fn ok_text(&self) -> Option<&str> {
        self.ok_text.as_deref()
    }

    /// The dismiss-button label.
    pub fn dismiss_text(&self) -> Option<&str> {
        self.dismiss_text.as_deref()
    }

    /// Canonical serialized form: `{title, text, ok_text, dismiss_text}`.
    pub fn to_value(&self) -> Value {
        json!({
            "title": self.title,
            "text": self.text,
            "ok_text": self.ok_text,
            "dismiss_text": self.dismiss_text,
        })
    }
}

/// An interactive control (typically a button) attached to an attachment.
///
/// The action itself enforces no count limit; the attachment holding it does,
/// at the point of addition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentAction {
    name: Option<String>,
    text: Option<String>,
    style: Option<String>,
    /// Serialized under the `type` key.
    kind: String,
    value: Option<String>,
    confirm: Option<ActionConfirmation>,
}

impl Default for AttachmentAction {
    fn default() -> Self {
        Self {
            name: None,
            text: None,
            style: None,
            kind: "button".to_owned(),
            value: None,
            confirm: None,
        }
    }
}

impl AttachmentAction {
    /// Create an action of the default `button` type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an action from a loosely-typed attribute map.
    ///
    /// Recognized keys: `name`, `text`, `style`, `type`, `value`, `confirm`.
    /// Unrecognized keys are silently ignored; `null` values count as absent;
    /// `type` defaults to `"button"`.
    pub fn from_value(value: &Value) -> Result<Self, MessageError> {
        let attrs = attrs::attribute_map(value, "an attachment action")?;
        let mut action = Self::new();
        if let Some(name) = attrs::string(attrs, "name")? {
            action.name = Some(name);
        }
        if let Some(text) = attrs::string(attrs, "text")? {
            action.text = Some(text);
        }
        if let Some(style) = attrs::string(attrs, "style")? {
            action.style = Some(style);
        }
        if let Some(kind) = attrs::string(attrs, "type")? {
            action.kind = kind;
        }
        if let Some(value) = attrs::string(attrs, "value")? {
            action.value = Some(value);
        }
        match attrs.get("confirm") {
            None | Some(Value::Null) => {}
            Some(confirm) => action.confirm = Some(ActionConfirmation::from_value(confirm)?),
        }
        Ok(action)
    }

    /// Set the action name reported back on interaction.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the visible label.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the visual style (e.g. `primary`, `danger`).
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Set the control type. Defaults to `button`.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the value reported back on interaction.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach a confirmation dialog.
    #[must_use]
    pub fn with_confirm(mut self, confirm: ActionConfirmation) -> Self {
        self.confirm = Some(confirm);
        self
    }

    /// The action name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The visible label.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The visual style.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// The control type, serialized under the `type` key.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The value reported back on interaction.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The confirmation dialog, if any.
    pub fn confirm(&self) -> Option<&ActionConfirmation> {
        self.confirm.as_ref()
    }

    /// Canonical serialized form:
    /// `{name, text, style, type, value, confirm}`.
    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "text": self.text,
            "style": self.style,
            "type": self.kind,
            "value": self.value,
            "confirm": self.confirm.as_ref().map(ActionConfirmation::to_value),
        })
    }
}

/// Input accepted by [`Attachment::add_action`](crate::Attachment::add_action):
/// an already-built action or a raw attribute map.
#[derive(Debug, Clone)]
pub enum ActionArg {
    /// An action built through the typed API.
    Built(AttachmentAction),
    /// A loosely-typed JSON value. Anything other than an attribute map is
    /// rejected at the point of addition.
    Raw(Value),
}

impl From<AttachmentAction> for ActionArg {
    fn from(action: AttachmentAction) -> Self {
        Self::Built(action)
    }
}

impl From<Value> for ActionArg {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl ActionArg {
    pub(crate) fn build(self) -> Result<AttachmentAction, MessageError> {
        match self {
            Self::Built(action) => Ok(action),
            Self::Raw(value) => AttachmentAction::from_value(&value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_from_value() {
        let confirmation = ActionConfirmation::from_value(&json!({
            "title": "Are you sure?",
            "text": "This pages the on-call engineer.",
            "ok_text": "Page",
            "dismiss_text": "Cancel",
        }))
        .unwrap();
        assert_eq!(confirmation.title(), Some("Are you sure?"));
        assert_eq!(confirmation.ok_text(), Some("Page"));
        assert_eq!(confirmation.dismiss_text(), Some("Cancel"));
    }

    #[test]
    fn confirmation_serializes_absent_attributes_as_null() {
        let confirmation = ActionConfirmation::new().with_title("t");
        assert_eq!(
            confirmation.to_value(),
            json!({"title": "t", "text": null, "ok_text": null, "dismiss_text": null})
        );
    }

    #[test]
    fn action_type_defaults_to_button() {
        let action = AttachmentAction::from_value(&json!({"name": "ack"})).unwrap();
        assert_eq!(action.kind(), "button");
        assert_eq!(action.to_value()["type"], "button");
    }

    #[test]
    fn action_from_value_with_nested_confirm() {
        let action = AttachmentAction::from_value(&json!({
            "name": "ack",
            "text": "Acknowledge",
            "style": "primary",
            "type": "button",
            "value": "ack-1",
            "confirm": {"title": "Confirm", "ok_text": "Yes"},
        }))
        .unwrap();
        assert_eq!(action.name(), Some("ack"));
        assert_eq!(action.style(), Some("primary"));
        assert_eq!(action.confirm().unwrap().ok_text(), Some("Yes"));
    }

    #[test]
    fn action_invalid_confirm_shape_is_rejected() {
        let err = AttachmentAction::from_value(&json!({"confirm": "nope"})).unwrap_err();
        assert!(matches!(
            err,
            MessageError::InvalidShape { entity: "an action confirmation", .. }
        ));
    }

    #[test]
    fn action_non_object_is_rejected() {
        let err = AttachmentAction::from_value(&json!(["a"])).unwrap_err();
        assert!(matches!(err, MessageError::InvalidShape { found: "an array", .. }));
    }

    #[test]
    fn action_serialization_includes_all_keys() {
        let action = AttachmentAction::new()
            .with_name("ack")
            .with_text("Acknowledge")
            .with_value("ack-1")
            .with_confirm(ActionConfirmation::new().with_title("Confirm"));
        let value = action.to_value();
        assert_eq!(value["name"], "ack");
        assert_eq!(value["style"], Value::Null);
        assert_eq!(value["confirm"]["title"], "Confirm");
        assert_eq!(value["confirm"]["ok_text"], Value::Null);
    }

    #[test]
    fn absent_confirm_serializes_as_null() {
        let action = AttachmentAction::new().with_name("ack");
        assert_eq!(action.to_value()["confirm"], Value::Null);
    }
}
