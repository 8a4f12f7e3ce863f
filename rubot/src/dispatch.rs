//! Handler registry and update dispatch.
//!
//! Each event category has a single registration slot: registering again
//! silently replaces the previous handler. Callback-button bindings are the
//! exception and may coexist, keyed by button id.
//!
//! Handlers must be async; the registration signatures only accept closures
//! returning a `Future`, so the "handler must be async" rule is enforced at
//! compile time rather than at registration time.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info};

use rubot_core::{InlineContext, MessageContext, Result, Update, UpdateKind};
use rubot_filters::{parse_command, Filter};

use crate::client::Robot;

type BoxFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;
type MessageHandlerFn = Arc<dyn Fn(Robot, MessageContext) -> BoxFuture + Send + Sync>;
type InlineHandlerFn = Arc<dyn Fn(Robot, InlineContext) -> BoxFuture + Send + Sync>;
type ChatEventHandlerFn = Arc<dyn Fn(Robot, String) -> BoxFuture + Send + Sync>;

/// Message-handler slot: callback plus its optional filter and command gate.
#[derive(Clone)]
struct MessageRegistration {
    func: MessageHandlerFn,
    filter: Option<Filter>,
    commands: Option<Vec<String>>,
}

/// Registered handlers, one slot per event category plus the callback-binding
/// map. Cheap to clone; the poll loop snapshots it once at startup.
#[derive(Clone, Default)]
pub struct Handlers {
    message: Option<MessageRegistration>,
    edited_message: Option<MessageHandlerFn>,
    inline_query: Option<InlineHandlerFn>,
    started: Option<ChatEventHandlerFn>,
    stopped: Option<ChatEventHandlerFn>,
    callbacks: HashMap<String, MessageHandlerFn>,
}

fn boxed_message_handler<F, Fut>(func: F) -> MessageHandlerFn
where
    F: Fn(Robot, MessageContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(move |bot, ctx| -> BoxFuture { Box::pin(func(bot, ctx)) })
}

impl Robot {
    /// Registers the handler for new messages, with an optional filter and an
    /// optional list of accepted command names. Last registration wins.
    pub fn on_message<F, Fut>(
        &mut self,
        filter: Option<Filter>,
        commands: Option<Vec<String>>,
        func: F,
    ) where
        F: Fn(Robot, MessageContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.handlers.message = Some(MessageRegistration {
            func: boxed_message_handler(func),
            filter,
            commands,
        });
    }

    /// Registers the handler for edited messages. Edited messages are not
    /// filter- or command-gated.
    pub fn on_edited_message<F, Fut>(&mut self, func: F)
    where
        F: Fn(Robot, MessageContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.handlers.edited_message = Some(boxed_message_handler(func));
    }

    /// Registers the handler for inline queries.
    pub fn on_inline_query<F, Fut>(&mut self, func: F)
    where
        F: Fn(Robot, InlineContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.handlers.inline_query =
            Some(Arc::new(move |bot, ctx| -> BoxFuture { Box::pin(func(bot, ctx)) }));
    }

    /// Registers the handler invoked when a user starts the bot. The handler
    /// receives the raw chat id.
    pub fn on_started_bot<F, Fut>(&mut self, func: F)
    where
        F: Fn(Robot, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.handlers.started =
            Some(Arc::new(move |bot, chat_id| -> BoxFuture { Box::pin(func(bot, chat_id)) }));
    }

    /// Registers the handler invoked when a user stops the bot.
    pub fn on_stopped_bot<F, Fut>(&mut self, func: F)
    where
        F: Fn(Robot, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.handlers.stopped =
            Some(Arc::new(move |bot, chat_id| -> BoxFuture { Box::pin(func(bot, chat_id)) }));
    }

    /// Binds a handler to clicks of the button with the given id. Many
    /// bindings may coexist; a matching binding takes priority over the
    /// general message handler.
    pub fn on_callback<F, Fut>(&mut self, button_id: impl Into<String>, func: F)
    where
        F: Fn(Robot, MessageContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.handlers
            .callbacks
            .insert(button_id.into(), boxed_message_handler(func));
    }
}

/// Routes one update to its handler. Returns the handler's result; updates
/// with no matching handler, or with unresolvable routing data, resolve to
/// `Ok(())` after a low-severity diagnostic.
pub async fn process_update(bot: Robot, handlers: Arc<Handlers>, update: Update) -> Result<()> {
    match update.kind {
        UpdateKind::NewMessage => {
            let chat_id = update.resolve_chat_id();
            let msg = update.new_message.unwrap_or_default();

            // Button-click bindings take priority; the general message
            // handler never sees a bound click.
            let button_id = msg.aux_data.as_ref().and_then(|a| a.button_id.clone());
            if let Some(button_id) = button_id {
                if let Some(callback) = handlers.callbacks.get(&button_id) {
                    let Some(chat_id) = chat_id else {
                        debug!(button_id = %button_id, "dropping button click without chat id");
                        return Ok(());
                    };
                    let ctx = MessageContext::from_raw(bot.api_handle(), chat_id, msg);
                    return callback(bot, ctx).await;
                }
            }

            let Some(registration) = &handlers.message else {
                return Ok(());
            };
            let Some(chat_id) = chat_id else {
                debug!("dropping message update without chat id");
                return Ok(());
            };
            let mut ctx = MessageContext::from_raw(bot.api_handle(), chat_id, msg);

            if let Some(filter) = &registration.filter {
                if !filter.check(&mut ctx) {
                    return Ok(());
                }
            }
            if let Some(commands) = &registration.commands {
                let Some(text) = ctx.text.clone() else {
                    return Ok(());
                };
                let Some((name, args)) = parse_command(&text) else {
                    return Ok(());
                };
                if !commands.iter().any(|c| c == &name) {
                    return Ok(());
                }
                ctx.args = args;
            }
            (registration.func)(bot.clone(), ctx).await
        }
        UpdateKind::UpdatedMessage => {
            let Some(handler) = &handlers.edited_message else {
                return Ok(());
            };
            let Some(chat_id) = update.resolve_chat_id() else {
                debug!("dropping edited-message update without chat id");
                return Ok(());
            };
            let msg = update.updated_message.unwrap_or_default();
            let ctx = MessageContext::from_raw(bot.api_handle(), chat_id, msg);
            handler(bot.clone(), ctx).await
        }
        UpdateKind::ReceiveQuery => {
            let Some(handler) = &handlers.inline_query else {
                return Ok(());
            };
            let raw = update.inline_message.unwrap_or_default();
            let ctx = InlineContext::from_raw(bot.api_handle(), raw);
            handler(bot.clone(), ctx).await
        }
        UpdateKind::StartedBot => {
            if let (Some(handler), Some(chat_id)) = (&handlers.started, update.chat_id) {
                handler(bot.clone(), chat_id).await
            } else {
                Ok(())
            }
        }
        UpdateKind::StoppedBot => {
            if let (Some(handler), Some(chat_id)) = (&handlers.stopped, update.chat_id) {
                handler(bot.clone(), chat_id).await
            } else {
                Ok(())
            }
        }
        UpdateKind::RemovedMessage => {
            info!(
                removed_message_id = ?update.removed_message_id,
                "message was removed in a chat"
            );
            Ok(())
        }
        UpdateKind::Unknown => {
            debug!("received an unhandled update kind");
            Ok(())
        }
    }
}
