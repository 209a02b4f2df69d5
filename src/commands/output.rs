//! Transport-agnostic command output types.
//!
//! These types describe what the bot wants to show independently of the chat
//! platform. A transport converts them to its own wire representation.

/// Maximum number of characters in an embed description.
pub const MAX_DESCRIPTION_LEN: usize = 4096;

/// Maximum number of characters in an embed field value.
pub const MAX_FIELD_VALUE_LEN: usize = 1024;

/// Maximum number of fields in one embed.
pub const MAX_FIELDS: usize = 25;

/// A message to send or to replace an existing message with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Plain text content.
    pub content: Option<String>,
    /// Rich embeds.
    pub embeds: Vec<Embed>,
    /// Interactive controls, one inner vector per row.
    pub components: Vec<Vec<Button>>,
}

impl OutgoingMessage {
    /// Creates a plain text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Creates a message with a single embed.
    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Self::default()
        }
    }

    /// Adds a row of buttons.
    pub fn with_row(mut self, row: Vec<Button>) -> Self {
        self.components.push(row);
        self
    }

    /// Returns every button across all rows.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.components.iter().flatten()
    }

    /// Finds a button by its custom id.
    pub fn button(&self, custom_id: &str) -> Option<&Button> {
        self.buttons().find(|b| b.custom_id == custom_id)
    }
}

/// A rich embed, built with chained setters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    /// Title line.
    pub title: Option<String>,
    /// Body text.
    pub description: Option<String>,
    /// RGB colour packed as 0xRRGGBB.
    pub color: u32,
    /// Named fields.
    pub fields: Vec<EmbedField>,
    /// Footer text and optional icon URL.
    pub footer: Option<(String, Option<String>)>,
    /// Thumbnail URL.
    pub thumbnail: Option<String>,
}

/// A named section inside an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    /// Field heading.
    pub name: String,
    /// Field body.
    pub value: String,
    /// Whether the field is rendered inline.
    pub inline: bool,
}

impl Embed {
    /// Creates an empty embed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the colour from RGB components.
    pub fn color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.color = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
        self
    }

    /// Appends a non-inline field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }

    /// Sets the footer. An empty icon is omitted.
    pub fn footer(mut self, text: impl Into<String>, icon: &str) -> Self {
        let icon = (!icon.is_empty()).then(|| icon.to_string());
        self.footer = Some((text.into(), icon));
        self
    }

    /// Sets the thumbnail. An empty URL is ignored.
    pub fn thumbnail(mut self, url: &str) -> Self {
        if !url.is_empty() {
            self.thumbnail = Some(url.to_string());
        }
        self
    }

    /// Clips the embed to platform limits.
    pub fn truncate(mut self) -> Self {
        if let Some(description) = self.description.as_mut() {
            truncate_chars(description, MAX_DESCRIPTION_LEN);
        }
        self.fields.truncate(MAX_FIELDS);
        for field in &mut self.fields {
            truncate_chars(&mut field.value, MAX_FIELD_VALUE_LEN);
        }
        self
    }

    /// Returns the field with the given heading prefix.
    pub fn field_starting_with(&self, prefix: &str) -> Option<&EmbedField> {
        self.fields.iter().find(|f| f.name.starts_with(prefix))
    }
}

fn truncate_chars(text: &mut String, max: usize) {
    if let Some((idx, _)) = text.char_indices().nth(max) {
        text.truncate(idx);
    }
}

/// Visual style of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    /// Highlighted call to action.
    Primary,
    /// Neutral grey.
    Secondary,
    /// Red, used for destructive or closing actions.
    Danger,
}

/// A clickable control attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Routing key echoed back on click.
    pub custom_id: String,
    /// Visible label.
    pub label: String,
    /// Visual style.
    pub style: ButtonStyle,
    /// Disabled buttons are rendered but cannot be clicked.
    pub disabled: bool,
}

impl Button {
    /// Creates an enabled button.
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
            disabled: false,
        }
    }

    /// Sets the disabled state.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// How an interaction is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// A new message visible to the channel.
    Reply,
    /// A new message visible only to the invoking user.
    Ephemeral,
    /// Replace the message the interaction was attached to.
    UpdateMessage,
}

/// Answer to an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionResponse {
    /// Response mode.
    pub kind: ResponseKind,
    /// Response payload.
    pub message: OutgoingMessage,
}

impl InteractionResponse {
    /// Creates a public reply.
    pub fn reply(message: OutgoingMessage) -> Self {
        Self {
            kind: ResponseKind::Reply,
            message,
        }
    }

    /// Creates an ephemeral text notice.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::Ephemeral,
            message: OutgoingMessage::text(content),
        }
    }

    /// Creates an in-place update of the originating message.
    pub fn update(message: OutgoingMessage) -> Self {
        Self {
            kind: ResponseKind::UpdateMessage,
            message,
        }
    }
}
