//! Transport seam between contexts and the HTTP client.
//!
//! [`Api`] is transport-agnostic; the `rubot` crate implements it over reqwest.
//! Contexts hold an `Arc<dyn Api>` so `ctx.reply(...)` works without knowing
//! the concrete client, and tests can substitute [`crate::testing::NoopApi`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{ChatKeypadType, Keypad};

/// Optional fields of a `sendMessage` call. `auto_delete` is client-side: when
/// set, the sent message is deleted after the given delay.
#[derive(Debug, Clone, Default)]
pub struct SendMessageOptions {
    pub chat_keypad: Option<Keypad>,
    pub inline_keypad: Option<Keypad>,
    pub disable_notification: bool,
    pub reply_to_message_id: Option<String>,
    pub chat_keypad_type: Option<ChatKeypadType>,
    pub auto_delete: Option<Duration>,
}

/// Outbound operations a message context can perform. Each method returns the
/// raw response record from the platform.
#[async_trait]
pub trait Api: Send + Sync {
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        opts: SendMessageOptions,
    ) -> Result<Value>;

    async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: &str,
        text: &str,
    ) -> Result<Value>;

    async fn delete_message(&self, chat_id: &str, message_id: &str) -> Result<Value>;

    async fn forward_message(
        &self,
        from_chat_id: &str,
        message_id: &str,
        to_chat_id: &str,
        disable_notification: bool,
    ) -> Result<Value>;

    async fn send_poll(
        &self,
        chat_id: &str,
        question: &str,
        options: &[String],
        reply_to_message_id: Option<&str>,
    ) -> Result<Value>;

    async fn send_contact(
        &self,
        chat_id: &str,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value>;

    async fn send_location(
        &self,
        chat_id: &str,
        latitude: &str,
        longitude: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value>;

    async fn send_sticker(
        &self,
        chat_id: &str,
        sticker_id: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value>;

    async fn send_file(
        &self,
        chat_id: &str,
        file_id: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value>;

    async fn send_photo(
        &self,
        chat_id: &str,
        file_id: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value>;

    async fn send_video(
        &self,
        chat_id: &str,
        file_id: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value>;

    async fn send_document(
        &self,
        chat_id: &str,
        file_id: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value>;
}
