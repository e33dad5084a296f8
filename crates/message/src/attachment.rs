use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::action::{ActionArg, AttachmentAction};
use crate::attrs;
use crate::error::MessageError;
use crate::field::{AttachmentField, FieldArg};

/// Maximum number of interactive actions a single attachment may carry,
/// enforced at the point of addition.
pub const MAX_ACTIONS: usize = 5;

/// A unit of rich notification content: text, metadata, fields, and
/// interactive actions.
///
/// An attachment exclusively owns its fields and actions; both sequences
/// preserve insertion order in serialized output. `fallback` is the only
/// attribute a rendering endpoint requires; everything else is optional and
/// `color` defaults to `"good"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    fallback: Option<String>,
    text: Option<String>,
    pretext: Option<String>,
    color: String,
    footer: Option<String>,
    footer_icon: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    image_url: Option<String>,
    thumb_url: Option<String>,
    title: Option<String>,
    title_link: Option<String>,
    author_name: Option<String>,
    author_link: Option<String>,
    author_icon: Option<String>,
    fields: Vec<AttachmentField>,
    markdown_fields: Vec<String>,
    actions: Vec<AttachmentAction>,
}

impl Default for Attachment {
    fn default() -> Self {
        Self {
            fallback: None,
            text: None,
            pretext: None,
            color: "good".to_owned(),
            footer: None,
            footer_icon: None,
            timestamp: None,
            image_url: None,
            thumb_url: None,
            title: None,
            title_link: None,
            author_name: None,
            author_link: None,
            author_icon: None,
            fields: Vec::new(),
            markdown_fields: Vec::new(),
            actions: Vec::new(),
        }
    }
}

impl Attachment {
    /// Create an empty attachment with the default `good` color.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an attachment from a loosely-typed attribute map.
    ///
    /// Recognized keys: `fallback`, `text`, `image_url`, `thumb_url`,
    /// `pretext`, `color`, `footer`, `footer_icon`, `timestamp` (epoch
    /// seconds), `fields`, `mrkdwn_in`, `title`, `title_link`, `author_name`,
    /// `author_link`, `author_icon`, `actions`. Unrecognized keys are
    /// silently ignored; `null` values count as absent.
    pub fn from_value(value: &Value) -> Result<Self, MessageError> {
        let attrs = attrs::attribute_map(value, "an attachment")?;
        let mut attachment = Self::new();
        if let Some(fallback) = attrs::string(attrs, "fallback")? {
            attachment.fallback = Some(fallback);
        }
        if let Some(text) = attrs::string(attrs, "text")? {
            attachment.text = Some(text);
        }
        if let Some(image_url) = attrs::string(attrs, "image_url")? {
            attachment.image_url = Some(image_url);
        }
        if let Some(thumb_url) = attrs::string(attrs, "thumb_url")? {
            attachment.thumb_url = Some(thumb_url);
        }
        if let Some(pretext) = attrs::string(attrs, "pretext")? {
            attachment.pretext = Some(pretext);
        }
        if let Some(color) = attrs::string(attrs, "color")? {
            attachment.color = color;
        }
        if let Some(footer) = attrs::string(attrs, "footer")? {
            attachment.footer = Some(footer);
        }
        if let Some(footer_icon) = attrs::string(attrs, "footer_icon")? {
            attachment.footer_icon = Some(footer_icon);
        }
        if let Some(epoch) = attrs::integer(attrs, "timestamp")? {
            let timestamp = DateTime::from_timestamp(epoch, 0).ok_or(
                MessageError::InvalidAttribute {
                    key: "timestamp",
                    expected: "epoch seconds in the representable range",
                    found: "a number",
                },
            )?;
            attachment.timestamp = Some(timestamp);
        }
        if let Some(fields) = attrs::array(attrs, "fields")? {
            attachment = attachment.set_fields(fields.iter().cloned())?;
        }
        if let Some(markdown_fields) = attrs::string_list(attrs, "mrkdwn_in")? {
            attachment.markdown_fields = markdown_fields;
        }
        if let Some(title) = attrs::string(attrs, "title")? {
            attachment.title = Some(title);
        }
        if let Some(title_link) = attrs::string(attrs, "title_link")? {
            attachment.title_link = Some(title_link);
        }
        if let Some(author_name) = attrs::string(attrs, "author_name")? {
            attachment.author_name = Some(author_name);
        }
        if let Some(author_link) = attrs::string(attrs, "author_link")? {
            attachment.author_link = Some(author_link);
        }
        if let Some(author_icon) = attrs::string(attrs, "author_icon")? {
            attachment.author_icon = Some(author_icon);
        }
        if let Some(actions) = attrs::array(attrs, "actions")? {
            attachment = attachment.set_actions(actions.iter().cloned())?;
        }
        Ok(attachment)
    }

    /// Set the plain-text fallback shown when rich rendering is unsupported.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Set the body text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the text shown above the formatted content.
    #[must_use]
    pub fn with_pretext(mut self, pretext: impl Into<String>) -> Self {
        self.pretext = Some(pretext.into());
        self
    }

    /// Set the accent color (a name like `good`/`warning`/`danger` or a hex
    /// code).
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the footer text.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Set the footer icon URL.
    #[must_use]
    pub fn with_footer_icon(mut self, footer_icon: impl Into<String>) -> Self {
        self.footer_icon = Some(footer_icon.into());
        self
    }

    /// Set the timestamp shown alongside the footer.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Set the thumbnail URL.
    #[must_use]
    pub fn with_thumb_url(mut self, thumb_url: impl Into<String>) -> Self {
        self.thumb_url = Some(thumb_url.into());
        self
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title link.
    #[must_use]
    pub fn with_title_link(mut self, title_link: impl Into<String>) -> Self {
        self.title_link = Some(title_link.into());
        self
    }

    /// Set the author name.
    #[must_use]
    pub fn with_author_name(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = Some(author_name.into());
        self
    }

    /// Set the author link.
    #[must_use]
    pub fn with_author_link(mut self, author_link: impl Into<String>) -> Self {
        self.author_link = Some(author_link.into());
        self
    }

    /// Set the author icon URL.
    #[must_use]
    pub fn with_author_icon(mut self, author_icon: impl Into<String>) -> Self {
        self.author_icon = Some(author_icon.into());
        self
    }

    /// Name the attributes the endpoint should interpret as lightweight
    /// markup (serialized under `mrkdwn_in`).
    #[must_use]
    pub fn with_markdown_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.markdown_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Append a field, accepting a built [`AttachmentField`] or a raw
    /// attribute map. Any other shape fails with
    /// [`MessageError::InvalidShape`].
    pub fn add_field(mut self, field: impl Into<FieldArg>) -> Result<Self, MessageError> {
        self.fields.push(field.into().build()?);
        Ok(self)
    }

    /// Replace the field sequence. The replacement is atomic: every element
    /// is validated before the existing sequence is touched.
    pub fn set_fields<I>(mut self, fields: I) -> Result<Self, MessageError>
    where
        I: IntoIterator,
        I::Item: Into<FieldArg>,
    {
        let built = fields
            .into_iter()
            .map(|field| field.into().build())
            .collect::<Result<Vec<_>, _>>()?;
        self.fields = built;
        Ok(self)
    }

    /// Remove all fields.
    #[must_use]
    pub fn clear_fields(mut self) -> Self {
        self.fields.clear();
        self
    }

    /// Append an action, accepting a built [`AttachmentAction`] or a raw
    /// attribute map. Fails with [`MessageError::TooManyActions`] once
    /// [`MAX_ACTIONS`] are present, and with [`MessageError::InvalidShape`]
    /// for any other input shape.
    pub fn add_action(mut self, action: impl Into<ActionArg>) -> Result<Self, MessageError> {
        if self.actions.len() >= MAX_ACTIONS {
            return Err(MessageError::TooManyActions { limit: MAX_ACTIONS });
        }
        self.actions.push(action.into().build()?);
        Ok(self)
    }

    /// Replace the action sequence. The replacement is atomic: every element
    /// is validated (including the count limit) before the existing sequence
    /// is touched.
    pub fn set_actions<I>(mut self, actions: I) -> Result<Self, MessageError>
    where
        I: IntoIterator,
        I::Item: Into<ActionArg>,
    {
        let built = actions
            .into_iter()
            .map(|action| action.into().build())
            .collect::<Result<Vec<_>, _>>()?;
        if built.len() > MAX_ACTIONS {
            return Err(MessageError::TooManyActions { limit: MAX_ACTIONS });
        }
        self.actions = built;
        Ok(self)
    }

    /// Remove all actions.
    #[must_use]
    pub fn clear_actions(mut self) -> Self {
        self.actions.clear();
        self
    }

    /// The fallback text.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// The body text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The pretext.
    pub fn pretext(&self) -> Option<&str> {
        self.pretext.as_deref()
    }

    /// The accent color.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// The footer text.
    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    /// The footer icon URL.
    pub fn footer_icon(&self) -> Option<&str> {
        self.footer_icon.as_deref()
    }

    /// The timestamp.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// The image URL.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// The thumbnail URL.
    pub fn thumb_url(&self) -> Option<&str> {
        self.thumb_url.as_deref()
    }

    /// The title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The title link.
    pub fn title_link(&self) -> Option<&str> {
        self.title_link.as_deref()
    }

    /// The author name.
    pub fn author_name(&self) -> Option<&str> {
        self.author_name.as_deref()
    }

    /// The author link.
    pub fn author_link(&self) -> Option<&str> {
        self.author_link.as_deref()
    }

    /// The author icon URL.
    pub fn author_icon(&self) -> Option<&str> {
        self.author_icon.as_deref()
    }

    /// The fields, in insertion order.
    pub fn fields(&self) -> &[AttachmentField] {
        &self.fields
    }

    /// The attribute names flagged for markup interpretation.
    pub fn markdown_fields(&self) -> &[String] {
        &self.markdown_fields
    }

    /// The actions, in insertion order.
    pub fn actions(&self) -> &[AttachmentAction] {
        &self.actions
    }

    /// Canonical serialized form.
    ///
    /// `ts` carries the timestamp's epoch seconds or `null`; unset string
    /// attributes serialize as `null`, never as empty strings; `fields` and
    /// `actions` hold their members' canonical forms in insertion order.
    pub fn to_value(&self) -> Value {
        json!({
            "fallback": self.fallback,
            "text": self.text,
            "pretext": self.pretext,
            "color": self.color,
            "footer": self.footer,
            "footer_icon": self.footer_icon,
            "ts": self.timestamp.map(|timestamp| timestamp.timestamp()),
            "mrkdwn_in": self.markdown_fields,
            "image_url": self.image_url,
            "thumb_url": self.thumb_url,
            "title": self.title,
            "title_link": self.title_link,
            "author_name": self.author_name,
            "author_link": self.author_link,
            "author_icon": self.author_icon,
            "fields": self.fields.iter().map(AttachmentField::to_value).collect::<Vec<_>>(),
            "actions": self.actions.iter().map(AttachmentAction::to_value).collect::<Vec<_>>(),
        })
    }
}

/// Input accepted by [`Message::add_attachment`](crate::Message::add_attachment):
/// an already-built attachment or a raw attribute map.
#[derive(Debug, Clone)]
pub enum AttachmentArg {
    /// An attachment built through the typed API.
    Built(Attachment),
    /// A loosely-typed JSON value. Anything other than an attribute map is
    /// rejected at the point of addition.
    Raw(Value),
}

impl From<Attachment> for AttachmentArg {
    fn from(attachment: Attachment) -> Self {
        Self::Built(attachment)
    }
}

impl From<Value> for AttachmentArg {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl AttachmentArg {
    pub(crate) fn build(self) -> Result<Attachment, MessageError> {
        match self {
            Self::Built(attachment) => Ok(attachment),
            Self::Raw(value) => Attachment::from_value(&value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionConfirmation;

    #[test]
    fn defaults() {
        let attachment = Attachment::new();
        assert_eq!(attachment.color(), "good");
        assert_eq!(attachment.fallback(), None);
        assert!(attachment.fields().is_empty());
        assert!(attachment.actions().is_empty());
        assert_eq!(attachment.timestamp(), None);
    }

    #[test]
    fn single_key_construction_populates_only_that_attribute() {
        let attachment = Attachment::from_value(&json!({"fallback": "x"})).unwrap();
        assert_eq!(attachment.fallback(), Some("x"));
        assert_eq!(attachment.text(), None);
        assert_eq!(attachment.color(), "good");
        assert!(attachment.fields().is_empty());
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let attachment =
            Attachment::from_value(&json!({"fallback": "x", "not_a_key": {"deep": true}})).unwrap();
        assert_eq!(attachment.fallback(), Some("x"));
    }

    #[test]
    fn timestamp_from_epoch_seconds() {
        let attachment = Attachment::from_value(&json!({"timestamp": 1000})).unwrap();
        assert_eq!(attachment.timestamp().unwrap().timestamp(), 1000);
        assert_eq!(attachment.to_value()["ts"], 1000);
    }

    #[test]
    fn unset_timestamp_serializes_ts_as_null() {
        let attachment = Attachment::new().with_fallback("x");
        assert_eq!(attachment.to_value()["ts"], Value::Null);
    }

    #[test]
    fn field_order_is_preserved() {
        let attachment = Attachment::new()
            .add_field(json!({"title": "A"}))
            .unwrap()
            .add_field(json!({"title": "B"}))
            .unwrap()
            .add_field(json!({"title": "C"}))
            .unwrap();
        let serialized = attachment.to_value();
        let titles: Vec<_> = serialized["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|field| field["title"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[test]
    fn add_field_accepts_built_and_raw_inputs() {
        let attachment = Attachment::new()
            .add_field(AttachmentField::new().with_title("built"))
            .unwrap()
            .add_field(json!({"title": "raw"}))
            .unwrap();
        assert_eq!(attachment.fields().len(), 2);
    }

    #[test]
    fn add_field_rejects_non_map_input() {
        let err = Attachment::new().add_field(json!(7)).unwrap_err();
        assert!(matches!(
            err,
            MessageError::InvalidShape { entity: "an attachment field", found: "a number" }
        ));
    }

    #[test]
    fn add_action_rejects_non_map_input() {
        let err = Attachment::new().add_action(json!(7)).unwrap_err();
        assert!(matches!(
            err,
            MessageError::InvalidShape { entity: "an attachment action", found: "a number" }
        ));
    }

    #[test]
    fn sixth_action_is_rejected_at_addition() {
        let mut attachment = Attachment::new();
        for index in 0..MAX_ACTIONS {
            attachment = attachment
                .add_action(AttachmentAction::new().with_name(format!("a{index}")))
                .unwrap();
        }
        let err = attachment
            .clone()
            .add_action(AttachmentAction::new().with_name("a5"))
            .unwrap_err();
        assert_eq!(err, MessageError::TooManyActions { limit: MAX_ACTIONS });
        assert_eq!(attachment.actions().len(), MAX_ACTIONS);
    }

    #[test]
    fn set_fields_is_atomic_on_invalid_element() {
        let attachment = Attachment::new().add_field(json!({"title": "keep"})).unwrap();
        let err = attachment
            .clone()
            .set_fields([json!({"title": "new"}), json!(42)])
            .unwrap_err();
        assert!(matches!(err, MessageError::InvalidShape { .. }));
        // The original sequence is untouched.
        assert_eq!(attachment.fields()[0].title(), Some("keep"));
        assert_eq!(attachment.fields().len(), 1);
    }

    #[test]
    fn set_actions_rejects_oversized_sequence_atomically() {
        let attachment = Attachment::new()
            .add_action(json!({"name": "keep"}))
            .unwrap();
        let oversized: Vec<Value> = (0..=MAX_ACTIONS)
            .map(|index| json!({"name": format!("a{index}")}))
            .collect();
        let err = attachment.clone().set_actions(oversized).unwrap_err();
        assert_eq!(err, MessageError::TooManyActions { limit: MAX_ACTIONS });
        assert_eq!(attachment.actions().len(), 1);
    }

    #[test]
    fn clear_fields_and_actions() {
        let attachment = Attachment::new()
            .add_field(json!({"title": "f"}))
            .unwrap()
            .add_action(json!({"name": "a"}))
            .unwrap()
            .clear_fields()
            .clear_actions();
        assert!(attachment.fields().is_empty());
        assert!(attachment.actions().is_empty());
    }

    #[test]
    fn to_value_has_canonical_keys() {
        let serialized = Attachment::new().with_fallback("x").to_value();
        let map = serialized.as_object().unwrap();
        for key in [
            "fallback",
            "text",
            "pretext",
            "color",
            "footer",
            "footer_icon",
            "ts",
            "mrkdwn_in",
            "image_url",
            "thumb_url",
            "title",
            "title_link",
            "author_name",
            "author_link",
            "author_icon",
            "fields",
            "actions",
        ] {
            assert!(map.contains_key(key), "missing key {key}");
        }
        assert_eq!(map.len(), 17);
    }

    #[test]
    fn unset_strings_serialize_as_null_not_empty() {
        let serialized = Attachment::new().to_value();
        assert_eq!(serialized["text"], Value::Null);
        assert_eq!(serialized["author_name"], Value::Null);
        assert_eq!(serialized["color"], "good");
    }

    #[test]
    fn serialize_then_reconstruct_reproduces_equal_tree() {
        let original = Attachment::new()
            .with_fallback("deploy failed")
            .with_color("danger")
            .with_title("Deploy")
            .with_title_link("https://ci.example.com/42")
            .with_author_name("ci-bot")
            .with_footer("courier")
            .with_timestamp(DateTime::from_timestamp(1_700_000_000, 0).unwrap())
            .with_markdown_fields(["text"])
            .add_field(json!({"title": "env", "value": "prod", "short": true}))
            .unwrap()
            .add_action(
                AttachmentAction::new()
                    .with_name("rollback")
                    .with_confirm(ActionConfirmation::new().with_title("Roll back?")),
            )
            .unwrap();

        // Remap serialized keys back to constructor keys (`ts` -> `timestamp`).
        let mut serialized = original.to_value();
        let map = serialized.as_object_mut().unwrap();
        let ts = map.remove("ts").unwrap();
        map.insert("timestamp".to_owned(), ts);

        let rebuilt = Attachment::from_value(&serialized).unwrap();
        assert_eq!(rebuilt.to_value(), original.to_value());
    }
}
