//! Wire types for the Rubika bot HTTP API: updates, message payloads, keypads,
//! and the generic response envelope.
//!
//! Every optional sub-object of a message (file, sticker, poll, ...) is a typed
//! `Option` field populated only when the corresponding key is present in the
//! payload; absent keys deserialize to `None`.

use serde::{Deserialize, Serialize};

/// Generic response envelope: `{"status": ..., "data": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: Option<String>,
    pub data: Option<T>,
}

/// Payload of a `getUpdates` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatesData {
    #[serde(default)]
    pub updates: Vec<Update>,
    pub next_offset_id: Option<String>,
}

/// Category tag of an incoming update. Unrecognized tags map to `Unknown`
/// instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpdateKind {
    NewMessage,
    UpdatedMessage,
    ReceiveQuery,
    StartedBot,
    StoppedBot,
    RemovedMessage,
    #[serde(other)]
    #[default]
    Unknown,
}

/// One event emitted by the platform. The payload field that is populated
/// depends on `kind`; chat identity arrives as `object_guid` or `chat_id`
/// depending on the update source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Update {
    #[serde(rename = "type", default)]
    pub kind: UpdateKind,
    pub object_guid: Option<String>,
    pub chat_id: Option<String>,
    pub removed_message_id: Option<String>,
    pub new_message: Option<RawMessage>,
    pub updated_message: Option<RawMessage>,
    pub inline_message: Option<RawInlineMessage>,
}

impl Update {
    /// Chat identity for message-bearing updates: `object_guid` wins, then
    /// `chat_id`. `None` means the update cannot be routed.
    pub fn resolve_chat_id(&self) -> Option<String> {
        self.object_guid.clone().or_else(|| self.chat_id.clone())
    }
}

/// Message payload as it appears inside `new_message` / `updated_message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMessage {
    pub message_id: Option<String>,
    pub sender_id: Option<String>,
    pub text: Option<String>,
    pub time: Option<String>,
    #[serde(default)]
    pub is_edited: bool,
    pub sender_type: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub reply_to_message_id: Option<String>,
    pub aux_data: Option<AuxData>,
    pub file: Option<FileInfo>,
    pub sticker: Option<Sticker>,
    pub poll: Option<Poll>,
    pub location: Option<Location>,
    pub live_location: Option<LiveLocation>,
    pub contact_message: Option<ContactMessage>,
    pub forwarded_from: Option<ForwardedFrom>,
}

/// Reduced payload delivered with `ReceiveQuery` updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInlineMessage {
    pub chat_id: Option<String>,
    pub message_id: Option<String>,
    pub sender_id: Option<String>,
    pub text: Option<String>,
    pub aux_data: Option<AuxData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_id: Option<String>,
    pub file_name: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sticker {
    pub sticker_id: Option<String>,
    pub emoji_character: Option<String>,
    pub file: Option<FileInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollStatus {
    pub state: Option<String>,
    pub selection_index: Option<i64>,
    #[serde(default)]
    pub percent_vote_options: Vec<i64>,
    pub total_vote: Option<i64>,
    pub show_total_votes: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Poll {
    pub question: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    pub poll_status: Option<PollStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveLocation {
    pub start_time: Option<String>,
    pub live_period: Option<i64>,
    pub current_location: Option<Location>,
    pub user_id: Option<String>,
    pub status: Option<String>,
    pub last_update_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactMessage {
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForwardedFrom {
    pub type_from: Option<String>,
    pub message_id: Option<String>,
    pub from_chat_id: Option<String>,
    pub from_sender_id: Option<String>,
}

/// Auxiliary data attached to button-click messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuxData {
    pub start_id: Option<String>,
    pub button_id: Option<String>,
}

// --- Keypads (shared by inbound payloads and outbound builders) ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keypad {
    #[serde(default)]
    pub rows: Vec<KeypadRow>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub resize_keyboard: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub on_time_keyboard: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeypadRow {
    #[serde(default)]
    pub buttons: Vec<Button>,
}

/// An inline or chat-keypad button. `kind` is the platform's type string
/// ("Simple", "Link", "Selection", ...); exactly the sub-payload matching the
/// kind is populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Button {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_selection: Option<ButtonSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_calendar: Option<ButtonCalendar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_number_picker: Option<ButtonNumberPicker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_string_picker: Option<ButtonStringPicker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_location: Option<ButtonLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_textbox: Option<ButtonTextbox>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButtonSelectionItem {
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButtonSelection {
    pub selection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_type: Option<String>,
    #[serde(default)]
    pub items: Vec<ButtonSelectionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_multi_selection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButtonCalendar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButtonNumberPicker {
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButtonStringPicker {
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButtonLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_pointer_location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_map_location: Option<Location>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButtonTextbox {
    pub type_line: Option<String>,
    pub type_keypad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_holder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

// --- Chats, bot info, commands ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chat {
    pub chat_id: Option<String>,
    pub chat_type: Option<String>,
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub username: Option<String>,
}

/// A command entry for `setCommands`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// `chat_keypad_type` values accepted by the send/edit endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatKeypadType {
    New,
    Removed,
}

/// Endpoint categories accepted by `updateBotEndpoints`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateEndpointType {
    ReceiveUpdate,
    ReceiveInlineMessage,
    GetSelectionItem,
}

/// Chat category derived from the prefix code of a chat identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatType {
    Group,
    Channel,
    User,
    Bot,
    Unknown,
}

impl ChatType {
    /// Classifies a chat id by its prefix code. A bot-prefixed chat whose
    /// sender id carries the user prefix is a user conversation.
    pub fn classify(chat_id: &str, sender_id: Option<&str>) -> ChatType {
        if chat_id.starts_with('g') {
            ChatType::Group
        } else if chat_id.starts_with('c') {
            ChatType::Channel
        } else if chat_id.starts_with('u') {
            ChatType::User
        } else if chat_id.starts_with('b') {
            if sender_id.is_some_and(|s| s.starts_with('u')) {
                ChatType::User
            } else {
                ChatType::Bot
            }
        } else {
            ChatType::Unknown
        }
    }
}

impl std::fmt::Display for ChatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChatType::Group => "Group",
            ChatType::Channel => "Channel",
            ChatType::User => "User",
            ChatType::Bot => "Bot",
            ChatType::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}
