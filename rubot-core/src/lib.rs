//! # rubot-core
//!
//! Core types and traits for the Rubika bot SDK: wire DTOs for updates and
//! keypads, the [`Api`] trait, message contexts, error types, and tracing
//! initialization. Transport-agnostic; used by rubot-filters and rubot.

pub mod api;
pub mod context;
pub mod error;
pub mod logger;
pub mod testing;
pub mod types;

pub use api::{Api, SendMessageOptions};
pub use context::{InlineContext, MessageContext};
pub use error::{Result, RubotError};
pub use logger::init_tracing;
pub use types::{
    AuxData, BotCommand, Button, ButtonCalendar, ButtonLocation, ButtonNumberPicker,
    ButtonSelection, ButtonSelectionItem, ButtonStringPicker, ButtonTextbox, Chat,
    ChatKeypadType, ChatType, ContactMessage, Envelope, FileInfo, ForwardedFrom, Keypad,
    KeypadRow, LiveLocation, Location, Poll, PollStatus, RawInlineMessage, RawMessage, Sticker,
    Update, UpdateEndpointType, UpdateKind, UpdatesData,
};
