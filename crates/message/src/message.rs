use serde_json::{Map, Value};

use crate::attachment::{Attachment, AttachmentArg};
use crate::attrs;
use crate::error::MessageError;

/// The envelope carrying an attachment tree to the webhook endpoint.
///
/// Channel, username, and icon are per-message overrides; when left unset the
/// keys are omitted from the serialized tree so endpoint-level defaults can
/// fill them. Icons of the form `:name:` serialize under `icon_emoji`, any
/// other icon under `icon_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: Option<String>,
    channel: Option<String>,
    username: Option<String>,
    icon: Option<String>,
    link_names: bool,
    unfurl_links: Option<bool>,
    unfurl_media: Option<bool>,
    markdown: bool,
    attachments: Vec<Attachment>,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            text: None,
            channel: None,
            username: None,
            icon: None,
            link_names: false,
            unfurl_links: None,
            unfurl_media: None,
            markdown: true,
            attachments: Vec::new(),
        }
    }
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a message from a loosely-typed attribute map.
    ///
    /// Recognized keys: `text`, `channel`, `username`, `icon`, `link_names`,
    /// `unfurl_links`, `unfurl_media`, `mrkdwn`, `attachments`. Unrecognized
    /// keys are silently ignored; `null` values count as absent.
    pub fn from_value(value: &Value) -> Result<Self, MessageError> {
        let attrs = attrs::attribute_map(value, "a message")?;
        let mut message = Self::new();
        if let Some(text) = attrs::string(attrs, "text")? {
            message.text = Some(text);
        }
        if let Some(channel) = attrs::string(attrs, "channel")? {
            message.channel = Some(channel);
        }
        if let Some(username) = attrs::string(attrs, "username")? {
            message.username = Some(username);
        }
        if let Some(icon) = attrs::string(attrs, "icon")? {
            message.icon = Some(icon);
        }
        if let Some(link_names) = attrs::boolean(attrs, "link_names")? {
            message.link_names = link_names;
        }
        if let Some(unfurl_links) = attrs::boolean(attrs, "unfurl_links")? {
            message.unfurl_links = Some(unfurl_links);
        }
        if let Some(unfurl_media) = attrs::boolean(attrs, "unfurl_media")? {
            message.unfurl_media = Some(unfurl_media);
        }
        if let Some(markdown) = attrs::boolean(attrs, "mrkdwn")? {
            message.markdown = markdown;
        }
        if let Some(attachments) = attrs::array(attrs, "attachments")? {
            message = message.set_attachments(attachments.iter().cloned())?;
        }
        Ok(message)
    }

    /// Set the message text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Override the destination channel.
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Override the sending username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Override the sender icon: an emoji name like `:ghost:` or an image
    /// URL.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Ask the endpoint to link channel and user names found in the text.
    #[must_use]
    pub fn with_link_names(mut self, link_names: bool) -> Self {
        self.link_names = link_names;
        self
    }

    /// Control link unfurling on the endpoint.
    #[must_use]
    pub fn with_unfurl_links(mut self, unfurl_links: bool) -> Self {
        self.unfurl_links = Some(unfurl_links);
        self
    }

    /// Control media unfurling on the endpoint.
    #[must_use]
    pub fn with_unfurl_media(mut self, unfurl_media: bool) -> Self {
        self.unfurl_media = Some(unfurl_media);
        self
    }

    /// Control whether the endpoint may interpret markup in the text.
    /// Defaults to `true`.
    #[must_use]
    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    /// Append an attachment, accepting a built [`Attachment`] or a raw
    /// attribute map. Any other shape fails with
    /// [`MessageError::InvalidShape`].
    pub fn add_attachment(
        mut self,
        attachment: impl Into<AttachmentArg>,
    ) -> Result<Self, MessageError> {
        self.attachments.push(attachment.into().build()?);
        Ok(self)
    }

    /// Replace the attachment sequence. The replacement is atomic: every
    /// element is validated before the existing sequence is touched.
    pub fn set_attachments<I>(mut self, attachments: I) -> Result<Self, MessageError>
    where
        I: IntoIterator,
        I::Item: Into<AttachmentArg>,
    {
        let built = attachments
            .into_iter()
            .map(|attachment| attachment.into().build())
            .collect::<Result<Vec<_>, _>>()?;
        self.attachments = built;
        Ok(self)
    }

    /// Remove all attachments.
    #[must_use]
    pub fn clear_attachments(mut self) -> Self {
        self.attachments.clear();
        self
    }

    /// The message text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The channel override.
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// The username override.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The icon override.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Whether name linking was requested.
    pub fn link_names(&self) -> bool {
        self.link_names
    }

    /// The link-unfurling override.
    pub fn unfurl_links(&self) -> Option<bool> {
        self.unfurl_links
    }

    /// The media-unfurling override.
    pub fn unfurl_media(&self) -> Option<bool> {
        self.unfurl_media
    }

    /// Whether the endpoint may interpret markup in the text.
    pub fn markdown(&self) -> bool {
        self.markdown
    }

    /// The attachments, in insertion order.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Canonical serialized form, ready for wire transmission.
    ///
    /// Unset envelope attributes are omitted; `link_names` serializes as `1`
    /// when requested; the icon lands under `icon_emoji` or `icon_url`
    /// depending on its form; `mrkdwn` and `attachments` are always present.
    pub fn to_value(&self) -> Value {
        let mut payload = Map::new();
        if let Some(text) = &self.text {
            payload.insert("text".to_owned(), Value::from(text.clone()));
        }
        if let Some(channel) = &self.channel {
            payload.insert("channel".to_owned(), Value::from(channel.clone()));
        }
        if let Some(username) = &self.username {
            payload.insert("username".to_owned(), Value::from(username.clone()));
        }
        if let Some(icon) = &self.icon {
            payload.insert(icon_key(icon).to_owned(), Value::from(icon.clone()));
        }
        if self.link_names {
            payload.insert("link_names".to_owned(), Value::from(1));
        }
        if let Some(unfurl_links) = self.unfurl_links {
            payload.insert("unfurl_links".to_owned(), Value::from(unfurl_links));
        }
        if let Some(unfurl_media) = self.unfurl_media {
            payload.insert("unfurl_media".to_owned(), Value::from(unfurl_media));
        }
        payload.insert("mrkdwn".to_owned(), Value::from(self.markdown));
        payload.insert(
            "attachments".to_owned(),
            Value::from(
                self.attachments
                    .iter()
                    .map(Attachment::to_value)
                    .collect::<Vec<_>>(),
            ),
        );
        Value::Object(payload)
    }
}

/// Payload key an icon value belongs under. Emoji icons are written
/// `:name:`; everything else is treated as an image URL.
fn icon_key(icon: &str) -> &'static str {
    if icon.len() > 2 && icon.starts_with(':') && icon.ends_with(':') {
        "icon_emoji"
    } else {
        "icon_url"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults() {
        let message = Message::new();
        assert_eq!(message.text(), None);
        assert!(!message.link_names());
        assert!(message.markdown());
        assert!(message.attachments().is_empty());
    }

    #[test]
    fn from_value_populates_envelope_attributes() {
        let message = Message::from_value(&json!({
            "text": "hi",
            "channel": "#ops",
            "username": "courier",
            "icon": ":ghost:",
            "link_names": true,
            "unfurl_links": false,
            "mrkdwn": false,
        }))
        .unwrap();
        assert_eq!(message.text(), Some("hi"));
        assert_eq!(message.channel(), Some("#ops"));
        assert_eq!(message.icon(), Some(":ghost:"));
        assert!(message.link_names());
        assert_eq!(message.unfurl_links(), Some(false));
        assert!(!message.markdown());
    }

    #[test]
    fn from_value_builds_nested_attachments() {
        let message = Message::from_value(&json!({
            "attachments": [{"fallback": "x", "color": "danger"}],
        }))
        .unwrap();
        assert_eq!(message.attachments().len(), 1);
        assert_eq!(message.attachments()[0].color(), "danger");
    }

    #[test]
    fn emoji_icon_serializes_under_icon_emoji() {
        let payload = Message::new().with_icon(":ghost:").to_value();
        assert_eq!(payload["icon_emoji"], ":ghost:");
        assert!(payload.get("icon_url").is_none());
    }

    #[test]
    fn url_icon_serializes_under_icon_url() {
        let payload = Message::new()
            .with_icon("https://example.com/icon.png")
            .to_value();
        assert_eq!(payload["icon_url"], "https://example.com/icon.png");
        assert!(payload.get("icon_emoji").is_none());
    }

    #[test]
    fn unset_envelope_keys_are_omitted() {
        let payload = Message::new().to_value();
        let map = payload.as_object().unwrap();
        assert!(!map.contains_key("text"));
        assert!(!map.contains_key("channel"));
        assert!(!map.contains_key("username"));
        assert!(!map.contains_key("link_names"));
        assert!(map.contains_key("mrkdwn"));
        assert_eq!(payload["attachments"], json!([]));
    }

    #[test]
    fn link_names_serializes_as_one() {
        let payload = Message::new().with_link_names(true).to_value();
        assert_eq!(payload["link_names"], 1);
    }

    #[test]
    fn add_attachment_rejects_non_map_input() {
        let err = Message::new().add_attachment(json!("nope")).unwrap_err();
        assert!(matches!(
            err,
            MessageError::InvalidShape { entity: "an attachment", found: "a string" }
        ));
    }

    #[test]
    fn set_attachments_is_atomic_on_invalid_element() {
        let message = Message::new()
            .add_attachment(json!({"fallback": "keep"}))
            .unwrap();
        let err = message
            .clone()
            .set_attachments([json!({"fallback": "new"}), json!(1)])
            .unwrap_err();
        assert!(matches!(err, MessageError::InvalidShape { .. }));
        assert_eq!(message.attachments().len(), 1);
        assert_eq!(message.attachments()[0].fallback(), Some("keep"));
    }

    #[test]
    fn attachment_order_is_preserved() {
        let message = Message::new()
            .add_attachment(json!({"fallback": "first"}))
            .unwrap()
            .add_attachment(json!({"fallback": "second"}))
            .unwrap();
        let payload = message.to_value();
        assert_eq!(payload["attachments"][0]["fallback"], "first");
        assert_eq!(payload["attachments"][1]["fallback"], "second");
    }
}
