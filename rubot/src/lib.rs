//! # rubot
//!
//! Client SDK for the Rubika bot HTTP API: long-polling client, handler
//! registration and dispatch, composable message filters, anti-spam manager,
//! and keyboard builders.
//!
//! ```rust,no_run
//! use rubot::{filters, Robot};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut bot = Robot::with_token("BOT_TOKEN")?;
//!
//!     bot.on_message(Some(filters::command(["start"])), None, |_bot, ctx| async move {
//!         ctx.reply("hello!").await?;
//!         Ok(())
//!     });
//!
//!     bot.run().await?;
//!     Ok(())
//! }
//! ```

pub mod antispam;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod jobs;
pub mod keyboards;
pub mod offset;
pub mod runner;
pub mod utils;

/// The filter-composition DSL, re-exported for handler registration.
pub use rubot_filters as filters;

pub use antispam::AntiSpamManager;
pub use client::Robot;
pub use config::{RobotConfig, DEFAULT_API_URL};
pub use dispatch::{process_update, Handlers};
pub use jobs::Job;
pub use keyboards::{simple_keyboard, ChatKeyboardBuilder, InlineKeyboardBuilder};
pub use offset::OffsetStore;

pub use rubot_core::{
    init_tracing, Api, BotCommand, ChatKeypadType, ChatType, InlineContext, Keypad,
    MessageContext, Result, RubotError, SendMessageOptions, Update, UpdateEndpointType,
    UpdateKind, UpdatesData,
};
