//! Test doubles for the [`Api`] trait.
//!
//! Lets filter and dispatch tests build contexts without a network client.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{Api, SendMessageOptions};
use crate::error::Result;

/// An [`Api`] that accepts every call and returns `Value::Null`.
#[derive(Debug, Default)]
pub struct NoopApi;

/// An [`Api`] that records `"<method> <chat_id>"` for every call and returns
/// `Value::Null`. Inspect with [`RecordingApi::calls`].
#[derive(Debug, Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<String>>,
}

impl RecordingApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    fn record(&self, method: &str, chat_id: &str) -> Result<Value> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(format!("{method} {chat_id}"));
        Ok(Value::Null)
    }
}

/// Convenience: a `NoopApi` behind the `Arc<dyn Api>` the contexts expect.
pub fn noop_api() -> Arc<dyn Api> {
    Arc::new(NoopApi)
}

#[async_trait]
impl Api for NoopApi {
    async fn send_message(&self, _: &str, _: &str, _: SendMessageOptions) -> Result<Value> {
        Ok(Value::Null)
    }
    async fn edit_message_text(&self, _: &str, _: &str, _: &str) -> Result<Value> {
        Ok(Value::Null)
    }
    async fn delete_message(&self, _: &str, _: &str) -> Result<Value> {
        Ok(Value::Null)
    }
    async fn forward_message(&self, _: &str, _: &str, _: &str, _: bool) -> Result<Value> {
        Ok(Value::Null)
    }
    async fn send_poll(&self, _: &str, _: &str, _: &[String], _: Option<&str>) -> Result<Value> {
        Ok(Value::Null)
    }
    async fn send_contact(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: &str,
        _: Option<&str>,
    ) -> Result<Value> {
        Ok(Value::Null)
    }
    async fn send_location(&self, _: &str, _: &str, _: &str, _: Option<&str>) -> Result<Value> {
        Ok(Value::Null)
    }
    async fn send_sticker(&self, _: &str, _: &str, _: Option<&str>) -> Result<Value> {
        Ok(Value::Null)
    }
    async fn send_file(&self, _: &str, _: &str, _: Option<&str>) -> Result<Value> {
        Ok(Value::Null)
    }
    async fn send_photo(&self, _: &str, _: &str, _: Option<&str>, _: Option<&str>) -> Result<Value> {
        Ok(Value::Null)
    }
    async fn send_video(&self, _: &str, _: &str, _: Option<&str>, _: Option<&str>) -> Result<Value> {
        Ok(Value::Null)
    }
    async fn send_document(
        &self,
        _: &str,
        _: &str,
        _: Option<&str>,
        _: Option<&str>,
    ) -> Result<Value> {
        Ok(Value::Null)
    }
}

#[async_trait]
impl Api for RecordingApi {
    async fn send_message(
        &self,
        chat_id: &str,
        _: &str,
        _: SendMessageOptions,
    ) -> Result<Value> {
        self.record("sendMessage", chat_id)
    }
    async fn edit_message_text(&self, chat_id: &str, _: &str, _: &str) -> Result<Value> {
        self.record("editMessageText", chat_id)
    }
    async fn delete_message(&self, chat_id: &str, _: &str) -> Result<Value> {
        self.record("deleteMessage", chat_id)
    }
    async fn forward_message(&self, chat_id: &str, _: &str, _: &str, _: bool) -> Result<Value> {
        self.record("forwardMessage", chat_id)
    }
    async fn send_poll(
        &self,
        chat_id: &str,
        _: &str,
        _: &[String],
        _: Option<&str>,
    ) -> Result<Value> {
        self.record("sendPoll", chat_id)
    }
    async fn send_contact(
        &self,
        chat_id: &str,
        _: &str,
        _: &str,
        _: &str,
        _: Option<&str>,
    ) -> Result<Value> {
        self.record("sendContact", chat_id)
    }
    async fn send_location(
        &self,
        chat_id: &str,
        _: &str,
        _: &str,
        _: Option<&str>,
    ) -> Result<Value> {
        self.record("sendLocation", chat_id)
    }
    async fn send_sticker(&self, chat_id: &str, _: &str, _: Option<&str>) -> Result<Value> {
        self.record("sendSticker", chat_id)
    }
    async fn send_file(&self, chat_id: &str, _: &str, _: Option<&str>) -> Result<Value> {
        self.record("sendFile", chat_id)
    }
    async fn send_photo(
        &self,
        chat_id: &str,
        _: &str,
        _: Option<&str>,
        _: Option<&str>,
    ) -> Result<Value> {
        self.record("sendPhoto", chat_id)
    }
    async fn send_video(
        &self,
        chat_id: &str,
        _: &str,
        _: Option<&str>,
        _: Option<&str>,
    ) -> Result<Value> {
        self.record("sendVideo", chat_id)
    }
    async fn send_document(
        &self,
        chat_id: &str,
        _: &str,
        _: Option<&str>,
        _: Option<&str>,
    ) -> Result<Value> {
        self.record("sendDocument", chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MessageContext;

    #[tokio::test]
    async fn recording_api_sees_context_replies() {
        let api = Arc::new(RecordingApi::default());
        let mut ctx = MessageContext::new(api.clone(), "u0abc");
        ctx.message_id = Some("m1".into());

        ctx.reply("hello").await.unwrap();
        ctx.delete().await.unwrap();

        assert_eq!(api.calls(), vec!["sendMessage u0abc", "deleteMessage u0abc"]);
    }
}
