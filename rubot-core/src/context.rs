//! Message contexts: derived views over an update payload handed to handlers.

use std::sync::Arc;

use serde_json::Value;

use crate::api::{Api, SendMessageOptions};
use crate::error::{Result, RubotError};
use crate::types::{
    AuxData, ChatType, ContactMessage, FileInfo, ForwardedFrom, LiveLocation, Location, Poll,
    RawInlineMessage, RawMessage, Sticker,
};

/// View over a new or edited message, created fresh per update. Carries an
/// [`Api`] handle so handlers can answer in place (`ctx.reply(...)`).
///
/// `args` is empty unless a command filter (or the dispatcher's command gate)
/// matched; it then holds the whitespace-split text after the command name.
#[derive(Clone)]
pub struct MessageContext {
    api: Arc<dyn Api>,
    pub chat_id: String,
    pub message_id: Option<String>,
    pub sender_id: Option<String>,
    pub text: Option<String>,
    pub args: Vec<String>,
    pub time: Option<String>,
    pub is_edited: bool,
    pub sender_type: Option<String>,
    pub sender_first_name: Option<String>,
    pub sender_last_name: Option<String>,
    pub sender_username: Option<String>,
    pub reply_to_message_id: Option<String>,
    pub forwarded_from: Option<ForwardedFrom>,
    pub file: Option<FileInfo>,
    pub sticker: Option<Sticker>,
    pub contact_message: Option<ContactMessage>,
    pub poll: Option<Poll>,
    pub location: Option<Location>,
    pub live_location: Option<LiveLocation>,
    pub aux_data: Option<AuxData>,
}

impl MessageContext {
    /// Empty context for the given chat. Tests and custom tooling fill in the
    /// public fields they need.
    pub fn new(api: Arc<dyn Api>, chat_id: impl Into<String>) -> Self {
        Self {
            api,
            chat_id: chat_id.into(),
            message_id: None,
            sender_id: None,
            text: None,
            args: Vec::new(),
            time: None,
            is_edited: false,
            sender_type: None,
            sender_first_name: None,
            sender_last_name: None,
            sender_username: None,
            reply_to_message_id: None,
            forwarded_from: None,
            file: None,
            sticker: None,
            contact_message: None,
            poll: None,
            location: None,
            live_location: None,
            aux_data: None,
        }
    }

    /// Builds a context from a raw message payload.
    pub fn from_raw(api: Arc<dyn Api>, chat_id: impl Into<String>, raw: RawMessage) -> Self {
        let mut ctx = Self::new(api, chat_id);
        ctx.message_id = raw.message_id;
        ctx.sender_id = raw.sender_id;
        ctx.text = raw.text;
        ctx.time = raw.time;
        ctx.is_edited = raw.is_edited;
        ctx.sender_type = raw.sender_type;
        ctx.sender_first_name = raw.first_name;
        ctx.sender_last_name = raw.last_name;
        ctx.sender_username = raw.username;
        ctx.reply_to_message_id = raw.reply_to_message_id;
        ctx.forwarded_from = raw.forwarded_from;
        ctx.file = raw.file;
        ctx.sticker = raw.sticker;
        ctx.contact_message = raw.contact_message;
        ctx.poll = raw.poll;
        ctx.location = raw.location;
        ctx.live_location = raw.live_location;
        ctx.aux_data = raw.aux_data;
        ctx
    }

    pub fn api(&self) -> &Arc<dyn Api> {
        &self.api
    }

    /// Chat category classified from the chat-id prefix code.
    pub fn chat_type(&self) -> ChatType {
        ChatType::classify(&self.chat_id, self.sender_id.as_deref())
    }

    pub fn is_reply(&self) -> bool {
        self.reply_to_message_id.is_some()
    }

    pub fn is_forward(&self) -> bool {
        self.forwarded_from.is_some()
    }

    fn require_message_id(&self) -> Result<&str> {
        self.message_id
            .as_deref()
            .ok_or_else(|| RubotError::Context("message has no message_id".to_string()))
    }

    /// Sends a text reply to this message.
    pub async fn reply(&self, text: &str) -> Result<Value> {
        self.reply_with(text, SendMessageOptions::default()).await
    }

    /// Sends a text reply with explicit options; `reply_to_message_id` is set
    /// to this message unless the caller already set it.
    pub async fn reply_with(&self, text: &str, mut opts: SendMessageOptions) -> Result<Value> {
        if opts.reply_to_message_id.is_none() {
            opts.reply_to_message_id = self.message_id.clone();
        }
        self.api.send_message(&self.chat_id, text, opts).await
    }

    /// Edits this message's text.
    pub async fn edit(&self, new_text: &str) -> Result<Value> {
        let message_id = self.require_message_id()?;
        self.api
            .edit_message_text(&self.chat_id, message_id, new_text)
            .await
    }

    /// Deletes this message.
    pub async fn delete(&self) -> Result<Value> {
        let message_id = self.require_message_id()?;
        self.api.delete_message(&self.chat_id, message_id).await
    }

    /// Forwards this message to another chat.
    pub async fn forward(&self, to_chat_id: &str) -> Result<Value> {
        let message_id = self.require_message_id()?;
        self.api
            .forward_message(&self.chat_id, message_id, to_chat_id, false)
            .await
    }

    pub async fn reply_poll(&self, question: &str, options: &[String]) -> Result<Value> {
        self.api
            .send_poll(&self.chat_id, question, options, self.message_id.as_deref())
            .await
    }

    pub async fn reply_contact(
        &self,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
    ) -> Result<Value> {
        self.api
            .send_contact(
                &self.chat_id,
                first_name,
                last_name,
                phone_number,
                self.message_id.as_deref(),
            )
            .await
    }

    pub async fn reply_location(&self, latitude: &str, longitude: &str) -> Result<Value> {
        self.api
            .send_location(
                &self.chat_id,
                latitude,
                longitude,
                self.message_id.as_deref(),
            )
            .await
    }

    pub async fn reply_sticker(&self, sticker_id: &str) -> Result<Value> {
        self.api
            .send_sticker(&self.chat_id, sticker_id, self.message_id.as_deref())
            .await
    }

    pub async fn reply_file(&self, file_id: &str) -> Result<Value> {
        self.api
            .send_file(&self.chat_id, file_id, self.message_id.as_deref())
            .await
    }

    pub async fn reply_photo(&self, file_id: &str, caption: Option<&str>) -> Result<Value> {
        self.api
            .send_photo(&self.chat_id, file_id, caption, self.message_id.as_deref())
            .await
    }

    pub async fn reply_video(&self, file_id: &str, caption: Option<&str>) -> Result<Value> {
        self.api
            .send_video(&self.chat_id, file_id, caption, self.message_id.as_deref())
            .await
    }

    pub async fn reply_document(&self, file_id: &str, caption: Option<&str>) -> Result<Value> {
        self.api
            .send_document(&self.chat_id, file_id, caption, self.message_id.as_deref())
            .await
    }
}

/// View over an inline-query payload. Reduced field set: no media sub-objects.
#[derive(Clone)]
pub struct InlineContext {
    api: Arc<dyn Api>,
    pub chat_id: Option<String>,
    pub message_id: Option<String>,
    pub sender_id: Option<String>,
    pub text: Option<String>,
    pub aux_data: Option<AuxData>,
}

impl InlineContext {
    pub fn from_raw(api: Arc<dyn Api>, raw: RawInlineMessage) -> Self {
        Self {
            api,
            chat_id: raw.chat_id,
            message_id: raw.message_id,
            sender_id: raw.sender_id,
            text: raw.text,
            aux_data: raw.aux_data,
        }
    }

    pub fn api(&self) -> &Arc<dyn Api> {
        &self.api
    }

    fn require_chat_id(&self) -> Result<&str> {
        self.chat_id
            .as_deref()
            .ok_or_else(|| RubotError::Context("inline message has no chat_id".to_string()))
    }

    pub async fn reply(&self, text: &str) -> Result<Value> {
        let chat_id = self.require_chat_id()?;
        let opts = SendMessageOptions {
            reply_to_message_id: self.message_id.clone(),
            ..Default::default()
        };
        self.api.send_message(chat_id, text, opts).await
    }

    pub async fn edit(&self, new_text: &str) -> Result<Value> {
        let chat_id = self.require_chat_id()?;
        let message_id = self
            .message_id
            .as_deref()
            .ok_or_else(|| RubotError::Context("inline message has no message_id".to_string()))?;
        self.api.edit_message_text(chat_id, message_id, new_text).await
    }

    pub async fn delete(&self) -> Result<Value> {
        let chat_id = self.require_chat_id()?;
        let message_id = self
            .message_id
            .as_deref()
            .ok_or_else(|| RubotError::Context("inline message has no message_id".to_string()))?;
        self.api.delete_message(chat_id, message_id).await
    }
}
