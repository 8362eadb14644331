//! Response descriptors handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// Delay used when a message does not declare one.
pub const DEFAULT_DELAY_MS: u64 = 1000;

const BASE_DELAY_MS: u64 = 500;
const PER_UNIT_DELAY_MS: u64 = 35;

/// Display delay for `text`: at least `declared`, and long enough to read it.
///
/// Length is measured in UTF-16 code units.
pub fn display_delay(text: &str, declared: u64) -> u64 {
    let units = text.encode_utf16().count() as u64;
    declared.max(BASE_DELAY_MS + PER_UNIT_DELAY_MS * units)
}

/// Who a message comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Terminal or system output.
    System,
    /// TZ speaking.
    Npc,
}

/// One displayed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who is speaking.
    pub kind: MessageKind,
    /// Text to display.
    pub text: String,
    /// Pause before showing the text, in milliseconds.
    pub delay_ms: u64,
}

impl Message {
    /// Create a message with a declared delay.
    pub fn new(kind: MessageKind, text: impl Into<String>, declared_delay_ms: u64) -> Self {
        let text = text.into();
        let delay_ms = display_delay(&text, declared_delay_ms);
        Self {
            kind,
            text,
            delay_ms,
        }
    }

    /// A system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(MessageKind::System, text, DEFAULT_DELAY_MS)
    }

    /// An NPC message.
    pub fn npc(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Npc, text, DEFAULT_DELAY_MS)
    }

    /// Replace the declared delay.
    pub fn with_delay(self, declared_delay_ms: u64) -> Self {
        Self::new(self.kind, self.text, declared_delay_ms)
    }
}

/// Everything produced by one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Messages in display order.
    pub messages: Vec<Message>,
    /// Ask the presentation layer to offer yes/no shortcuts.
    pub quick_yes_no: bool,
}

impl Response {
    /// An empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// A response with a single system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new().with(Message::system(text))
    }

    /// A response with a single NPC message.
    pub fn npc(text: impl Into<String>) -> Self {
        Self::new().with(Message::npc(text))
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append a message, builder style.
    pub fn with(mut self, message: Message) -> Self {
        self.push(message);
        self
    }

    /// Append fixed system lines.
    pub fn extend_system(&mut self, lines: &[&str]) {
        self.messages.extend(lines.iter().map(|&line| Message::system(line)));
    }

    /// Append all messages of another response, keeping its yes/no flag if set.
    pub fn append(&mut self, other: Response) {
        self.messages.extend(other.messages);
        self.quick_yes_no |= other.quick_yes_no;
    }

    /// Request yes/no shortcuts.
    pub fn yes_no(mut self) -> Self {
        self.quick_yes_no = true;
        self
    }

    /// All message texts joined by newlines.
    pub fn text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Text of the last message.
    pub fn last_text(&self) -> Option<&str> {
        self.messages.last().map(|m| m.text.as_str())
    }
}
