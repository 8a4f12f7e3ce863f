//! The [`Robot`] client: HTTP access to the bot API plus the handler registry.
//!
//! Every API method POSTs JSON to `<base>/<token>/<method>` and returns the
//! raw response record. Transport failures of any kind (connect, timeout,
//! non-success status) surface as [`RubotError::Api`] so the poll loop can
//! treat them uniformly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::{debug, error, warn};

use rubot_core::{
    Api, BotCommand, Chat, Envelope, Keypad, Result, RubotError, SendMessageOptions,
    UpdateEndpointType, UpdatesData,
};

use crate::config::RobotConfig;
use crate::dispatch::Handlers;
use crate::offset::OffsetStore;

/// Rubika bot client. Cheap to clone; clones share nothing mutable, so one
/// instance can be handed to every dispatched task.
#[derive(Clone)]
pub struct Robot {
    pub(crate) config: RobotConfig,
    http: reqwest::Client,
    pub(crate) handlers: Handlers,
}

impl Robot {
    pub fn new(config: RobotConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RubotError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            http,
            handlers: Handlers::default(),
        })
    }

    /// Client with default configuration for the given token.
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        Self::new(RobotConfig::new(token))
    }

    /// Client configured from the environment (see [`RobotConfig::from_env`]).
    pub fn from_env() -> anyhow::Result<Self> {
        let config = RobotConfig::from_env()?;
        config.validate()?;
        Ok(Self::new(config)?)
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    /// The offset store for this credential: explicit path if configured,
    /// otherwise a file name derived from the token.
    pub fn offset_store(&self) -> OffsetStore {
        match &self.config.offset_file {
            Some(path) => OffsetStore::at(path.clone()),
            None => OffsetStore::for_token(&self.config.token),
        }
    }

    /// `Arc<dyn Api>` handle for building contexts.
    pub(crate) fn api_handle(&self) -> Arc<dyn Api> {
        Arc::new(self.clone())
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}/{}", self.config.api_url, self.config.token, method)
    }

    pub(crate) async fn post(&self, method: &str, payload: Value) -> Result<Value> {
        let url = self.method_url(method);
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RubotError::Api(format!("{method}: {e}")))?
            .error_for_status()
            .map_err(|e| RubotError::Api(format!("{method}: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| RubotError::Api(format!("{method}: {e}")))?;
        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) => {
                error!(method, body = %body, "invalid JSON response");
                return Err(RubotError::InvalidResponse {
                    method: method.to_string(),
                    body,
                });
            }
        };

        if method != "getUpdates" {
            debug!(method, response = %value, "API response");
        }
        Ok(value)
    }

    // --- Updates ---

    /// Fetches a batch of updates since `offset_id`. A response without a
    /// `data` payload yields an empty batch.
    pub async fn get_updates(
        &self,
        offset_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<UpdatesData> {
        let mut payload = Map::new();
        if let Some(offset_id) = offset_id {
            payload.insert("offset_id".to_string(), json!(offset_id));
        }
        if let Some(limit) = limit {
            payload.insert("limit".to_string(), json!(limit));
        }
        let value = self.post("getUpdates", Value::Object(payload)).await?;
        let envelope: Envelope<UpdatesData> = serde_json::from_value(value)?;
        Ok(envelope.data.unwrap_or_default())
    }

    // --- Sending ---

    /// Sends a plain text message.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<Value> {
        self.send_message_with(chat_id, text, SendMessageOptions::default())
            .await
    }

    /// Sends a text message with keypads, reply target, notification flag and
    /// optional auto-delete delay.
    pub async fn send_message_with(
        &self,
        chat_id: &str,
        text: &str,
        opts: SendMessageOptions,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("chat_id".to_string(), json!(chat_id));
        payload.insert("text".to_string(), json!(text));
        payload.insert(
            "disable_notification".to_string(),
            json!(opts.disable_notification),
        );
        if let Some(keypad) = &opts.chat_keypad {
            payload.insert("chat_keypad".to_string(), serde_json::to_value(keypad)?);
        }
        if let Some(keypad) = &opts.inline_keypad {
            payload.insert("inline_keypad".to_string(), serde_json::to_value(keypad)?);
        }
        if let Some(reply_to) = &opts.reply_to_message_id {
            payload.insert("reply_to_message_id".to_string(), json!(reply_to));
        }
        if let Some(keypad_type) = opts.chat_keypad_type {
            payload.insert(
                "chat_keypad_type".to_string(),
                serde_json::to_value(keypad_type)?,
            );
        }

        let result = self.post("sendMessage", Value::Object(payload)).await?;

        if let Some(delay) = opts.auto_delete {
            if let Some(message_id) = sent_message_id(&result) {
                let bot = self.clone();
                let chat_id = chat_id.to_string();
                tokio::spawn(async move {
                    bot.auto_delete_message(&chat_id, &message_id, delay).await;
                });
            }
        }
        Ok(result)
    }

    /// Sleeps, then deletes the message; failures are logged, not surfaced.
    pub async fn auto_delete_message(&self, chat_id: &str, message_id: &str, delay: Duration) {
        tokio::time::sleep(delay).await;
        if let Err(e) = self.delete_message(chat_id, message_id).await {
            warn!(message_id, error = %e, "could not auto-delete message");
        }
    }

    pub async fn send_poll(
        &self,
        chat_id: &str,
        question: &str,
        options: &[String],
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("chat_id".to_string(), json!(chat_id));
        payload.insert("question".to_string(), json!(question));
        payload.insert("options".to_string(), json!(options));
        if let Some(reply_to) = reply_to_message_id {
            payload.insert("reply_to_message_id".to_string(), json!(reply_to));
        }
        self.post("sendPoll", Value::Object(payload)).await
    }

    pub async fn send_location(
        &self,
        chat_id: &str,
        latitude: &str,
        longitude: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("chat_id".to_string(), json!(chat_id));
        payload.insert("latitude".to_string(), json!(latitude));
        payload.insert("longitude".to_string(), json!(longitude));
        if let Some(reply_to) = reply_to_message_id {
            payload.insert("reply_to_message_id".to_string(), json!(reply_to));
        }
        self.post("sendLocation", Value::Object(payload)).await
    }

    pub async fn send_contact(
        &self,
        chat_id: &str,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("chat_id".to_string(), json!(chat_id));
        payload.insert("first_name".to_string(), json!(first_name));
        payload.insert("last_name".to_string(), json!(last_name));
        payload.insert("phone_number".to_string(), json!(phone_number));
        if let Some(reply_to) = reply_to_message_id {
            payload.insert("reply_to_message_id".to_string(), json!(reply_to));
        }
        self.post("sendContact", Value::Object(payload)).await
    }

    pub async fn send_sticker(
        &self,
        chat_id: &str,
        sticker_id: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("chat_id".to_string(), json!(chat_id));
        payload.insert("sticker_id".to_string(), json!(sticker_id));
        if let Some(reply_to) = reply_to_message_id {
            payload.insert("reply_to_message_id".to_string(), json!(reply_to));
        }
        self.post("sendSticker", Value::Object(payload)).await
    }

    pub async fn send_file(
        &self,
        chat_id: &str,
        file_id: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("chat_id".to_string(), json!(chat_id));
        payload.insert("file_id".to_string(), json!(file_id));
        if let Some(reply_to) = reply_to_message_id {
            payload.insert("reply_to_message_id".to_string(), json!(reply_to));
        }
        self.post("sendFile", Value::Object(payload)).await
    }

    pub async fn send_photo(
        &self,
        chat_id: &str,
        file_id: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        self.send_media("sendPhoto", "photo", chat_id, file_id, caption, reply_to_message_id)
            .await
    }

    pub async fn send_video(
        &self,
        chat_id: &str,
        file_id: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        self.send_media("sendVideo", "video", chat_id, file_id, caption, reply_to_message_id)
            .await
    }

    pub async fn send_document(
        &self,
        chat_id: &str,
        file_id: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        self.send_media(
            "sendDocument",
            "document",
            chat_id,
            file_id,
            caption,
            reply_to_message_id,
        )
        .await
    }

    async fn send_media(
        &self,
        method: &str,
        media_key: &str,
        chat_id: &str,
        file_id: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("chat_id".to_string(), json!(chat_id));
        payload.insert(media_key.to_string(), json!(file_id));
        if let Some(caption) = caption {
            payload.insert("caption".to_string(), json!(caption));
        }
        if let Some(reply_to) = reply_to_message_id {
            payload.insert("reply_to_message_id".to_string(), json!(reply_to));
        }
        self.post(method, Value::Object(payload)).await
    }

    // --- Editing and chat management ---

    pub async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: &str,
        text: &str,
    ) -> Result<Value> {
        self.post(
            "editMessageText",
            json!({"chat_id": chat_id, "message_id": message_id, "text": text}),
        )
        .await
    }

    pub async fn edit_inline_keypad(
        &self,
        chat_id: &str,
        message_id: &str,
        inline_keypad: &Keypad,
    ) -> Result<Value> {
        self.post(
            "editMessageKeypad",
            json!({
                "chat_id": chat_id,
                "message_id": message_id,
                "inline_keypad": inline_keypad,
            }),
        )
        .await
    }

    pub async fn delete_message(&self, chat_id: &str, message_id: &str) -> Result<Value> {
        self.post(
            "deleteMessage",
            json!({"chat_id": chat_id, "message_id": message_id}),
        )
        .await
    }

    pub async fn forward_message(
        &self,
        from_chat_id: &str,
        message_id: &str,
        to_chat_id: &str,
        disable_notification: bool,
    ) -> Result<Value> {
        self.post(
            "forwardMessage",
            json!({
                "from_chat_id": from_chat_id,
                "message_id": message_id,
                "to_chat_id": to_chat_id,
                "disable_notification": disable_notification,
            }),
        )
        .await
    }

    /// Installs a new chat keypad.
    pub async fn edit_chat_keypad(&self, chat_id: &str, chat_keypad: &Keypad) -> Result<Value> {
        self.post(
            "editChatKeypad",
            json!({
                "chat_id": chat_id,
                "chat_keypad_type": "New",
                "chat_keypad": chat_keypad,
            }),
        )
        .await
    }

    /// Removes the chat keypad.
    pub async fn remove_keypad(&self, chat_id: &str) -> Result<Value> {
        self.post(
            "editChatKeypad",
            json!({"chat_id": chat_id, "chat_keypad_type": "Removed"}),
        )
        .await
    }

    pub async fn set_commands(&self, bot_commands: &[BotCommand]) -> Result<Value> {
        self.post("setCommands", json!({ "bot_commands": bot_commands }))
            .await
    }

    pub async fn update_bot_endpoint(
        &self,
        url: &str,
        endpoint_type: UpdateEndpointType,
    ) -> Result<Value> {
        self.post(
            "updateBotEndpoints",
            json!({"url": url, "type": endpoint_type}),
        )
        .await
    }

    // --- Chat info ---

    pub async fn get_chat(&self, chat_id: &str) -> Result<Value> {
        self.post("getChat", json!({ "chat_id": chat_id })).await
    }

    /// First name of a user, from their chat record.
    pub async fn get_name(&self, user_id: &str) -> Result<Option<String>> {
        let envelope: Envelope<Chat> = serde_json::from_value(self.get_chat(user_id).await?)?;
        Ok(envelope.data.and_then(|chat| chat.first_name))
    }

    /// Username of a user, from their chat record.
    pub async fn get_username(&self, user_id: &str) -> Result<Option<String>> {
        let envelope: Envelope<Chat> = serde_json::from_value(self.get_chat(user_id).await?)?;
        Ok(envelope.data.and_then(|chat| chat.username))
    }

    // --- Blocking variants for non-loop callers ---
    //
    // These build a fresh blocking client per call. Do not call them from
    // inside an async runtime.

    pub fn send_message_sync(&self, chat_id: &str, text: &str) -> Result<Value> {
        self.post_sync(
            "sendMessage",
            json!({"chat_id": chat_id, "text": text, "disable_notification": false}),
        )
    }

    pub fn get_updates_sync(
        &self,
        offset_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<UpdatesData> {
        let mut payload = Map::new();
        if let Some(offset_id) = offset_id {
            payload.insert("offset_id".to_string(), json!(offset_id));
        }
        if let Some(limit) = limit {
            payload.insert("limit".to_string(), json!(limit));
        }
        let value = self.post_sync("getUpdates", Value::Object(payload))?;
        let envelope: Envelope<UpdatesData> = serde_json::from_value(value)?;
        Ok(envelope.data.unwrap_or_default())
    }

    fn post_sync(&self, method: &str, payload: Value) -> Result<Value> {
        let url = self.method_url(method);
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| RubotError::Config(format!("failed to build HTTP client: {e}")))?;
        let response = client
            .post(&url)
            .json(&payload)
            .send()
            .map_err(|e| RubotError::Api(format!("{method}: {e}")))?
            .error_for_status()
            .map_err(|e| RubotError::Api(format!("{method}: {e}")))?;
        let body = response
            .text()
            .map_err(|e| RubotError::Api(format!("{method}: {e}")))?;
        serde_json::from_str(&body).map_err(|_| RubotError::InvalidResponse {
            method: method.to_string(),
            body,
        })
    }
}

/// Message id of a just-sent message, from the send response. The platform has
/// returned both string and numeric ids here.
fn sent_message_id(result: &Value) -> Option<String> {
    match result.pointer("/data/message_update/message_id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl Api for Robot {
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        opts: SendMessageOptions,
    ) -> Result<Value> {
        self.send_message_with(chat_id, text, opts).await
    }

    async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: &str,
        text: &str,
    ) -> Result<Value> {
        Robot::edit_message_text(self, chat_id, message_id, text).await
    }

    async fn delete_message(&self, chat_id: &str, message_id: &str) -> Result<Value> {
        Robot::delete_message(self, chat_id, message_id).await
    }

    async fn forward_message(
        &self,
        from_chat_id: &str,
        message_id: &str,
        to_chat_id: &str,
        disable_notification: bool,
    ) -> Result<Value> {
        Robot::forward_message(self, from_chat_id, message_id, to_chat_id, disable_notification)
            .await
    }

    async fn send_poll(
        &self,
        chat_id: &str,
        question: &str,
        options: &[String],
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        Robot::send_poll(self, chat_id, question, options, reply_to_message_id).await
    }

    async fn send_contact(
        &self,
        chat_id: &str,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        Robot::send_contact(
            self,
            chat_id,
            first_name,
            last_name,
            phone_number,
            reply_to_message_id,
        )
        .await
    }

    async fn send_location(
        &self,
        chat_id: &str,
        latitude: &str,
        longitude: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        Robot::send_location(self, chat_id, latitude, longitude, reply_to_message_id).await
    }

    async fn send_sticker(
        &self,
        chat_id: &str,
        sticker_id: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        Robot::send_sticker(self, chat_id, sticker_id, reply_to_message_id).await
    }

    async fn send_file(
        &self,
        chat_id: &str,
        file_id: &str,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        Robot::send_file(self, chat_id, file_id, reply_to_message_id).await
    }

    async fn send_photo(
        &self,
        chat_id: &str,
        file_id: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        Robot::send_photo(self, chat_id, file_id, caption, reply_to_message_id).await
    }

    async fn send_video(
        &self,
        chat_id: &str,
        file_id: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        Robot::send_video(self, chat_id, file_id, caption, reply_to_message_id).await
    }

    async fn send_document(
        &self,
        chat_id: &str,
        file_id: &str,
        caption: Option<&str>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Value> {
        Robot::send_document(self, chat_id, file_id, caption, reply_to_message_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_url_joins_base_token_method() {
        let bot = Robot::with_token("tok123").unwrap();
        assert_eq!(
            bot.method_url("sendMessage"),
            format!("{}/tok123/sendMessage", crate::config::DEFAULT_API_URL)
        );
    }

    #[test]
    fn sent_message_id_handles_string_and_number() {
        let string_id = json!({"data": {"message_update": {"message_id": "m42"}}});
        assert_eq!(sent_message_id(&string_id).as_deref(), Some("m42"));

        let numeric_id = json!({"data": {"message_update": {"message_id": 42}}});
        assert_eq!(sent_message_id(&numeric_id).as_deref(), Some("42"));

        assert_eq!(sent_message_id(&json!({"data": {}})), None);
    }
}
