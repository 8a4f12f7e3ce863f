//! # Message filters
//!
//! Composable boolean predicates over a [`MessageContext`]. A filter is a
//! shared closure; [`Filter::and`], [`Filter::or`] and [`Filter::not`] each
//! produce another filter, so arbitrary boolean expression trees compose.
//!
//! Every built-in is pure except [`command`], which writes the parsed
//! arguments into the context it matched (the dispatcher relies on this).

use std::collections::HashSet;
use std::sync::Arc;

use rubot_core::{ChatType, MessageContext};

/// A boolean predicate over a message context.
#[derive(Clone)]
pub struct Filter(Arc<dyn Fn(&mut MessageContext) -> bool + Send + Sync>);

impl Filter {
    /// Evaluates the filter against a context.
    pub fn check(&self, ctx: &mut MessageContext) -> bool {
        (self.0)(ctx)
    }

    /// Both filters must match. Short-circuits: `other` is not evaluated when
    /// `self` rejects.
    pub fn and(self, other: Filter) -> Filter {
        custom(move |ctx| self.check(ctx) && other.check(ctx))
    }

    /// Either filter may match. Short-circuits on the first match.
    pub fn or(self, other: Filter) -> Filter {
        custom(move |ctx| self.check(ctx) || other.check(ctx))
    }

    /// Inverts the filter.
    pub fn not(self) -> Filter {
        custom(move |ctx| !self.check(ctx))
    }
}

/// Wraps any predicate as a first-class filter.
pub fn custom<F>(f: F) -> Filter
where
    F: Fn(&mut MessageContext) -> bool + Send + Sync + 'static,
{
    Filter(Arc::new(f))
}

/// Matches every message.
pub fn all() -> Filter {
    custom(|_| true)
}

/// Non-empty text present.
pub fn text() -> Filter {
    custom(|ctx| ctx.text.as_deref().is_some_and(|t| !t.is_empty()))
}

pub fn sticker() -> Filter {
    custom(|ctx| ctx.sticker.is_some())
}

pub fn poll() -> Filter {
    custom(|ctx| ctx.poll.is_some())
}

pub fn location() -> Filter {
    custom(|ctx| ctx.location.is_some())
}

pub fn contact() -> Filter {
    custom(|ctx| ctx.contact_message.is_some())
}

/// Any file attachment present, regardless of subtype.
pub fn file() -> Filter {
    custom(|ctx| ctx.file.is_some())
}

// File subtypes are classified by file-name extension; the payload does not
// carry a reliable media type.
const PHOTO_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];
const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mov", ".mkv", ".webm"];
const VOICE_EXTENSIONS: &[&str] = &[".ogg", ".oga", ".opus"];
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".flac"];

fn file_name_matches(ctx: &MessageContext, extensions: &[&str]) -> bool {
    let Some(name) = ctx.file.as_ref().and_then(|f| f.file_name.as_deref()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    extensions.iter().any(|ext| name.ends_with(ext))
}

pub fn photo() -> Filter {
    custom(|ctx| file_name_matches(ctx, PHOTO_EXTENSIONS))
}

pub fn video() -> Filter {
    custom(|ctx| file_name_matches(ctx, VIDEO_EXTENSIONS))
}

pub fn voice() -> Filter {
    custom(|ctx| file_name_matches(ctx, VOICE_EXTENSIONS))
}

pub fn audio() -> Filter {
    custom(|ctx| file_name_matches(ctx, AUDIO_EXTENSIONS))
}

/// A file that is none of photo/video/voice/audio and not a sticker. Mutual
/// exclusion with the other subtypes holds by construction.
pub fn document() -> Filter {
    custom(|ctx| {
        ctx.file.is_some()
            && ctx.sticker.is_none()
            && !file_name_matches(ctx, PHOTO_EXTENSIONS)
            && !file_name_matches(ctx, VIDEO_EXTENSIONS)
            && !file_name_matches(ctx, VOICE_EXTENSIONS)
            && !file_name_matches(ctx, AUDIO_EXTENSIONS)
    })
}

pub fn group() -> Filter {
    custom(|ctx| ctx.chat_type() == ChatType::Group)
}

pub fn private() -> Filter {
    custom(|ctx| ctx.chat_type() == ChatType::User)
}

pub fn channel() -> Filter {
    custom(|ctx| ctx.chat_type() == ChatType::Channel)
}

pub fn is_reply() -> Filter {
    custom(|ctx| ctx.is_reply())
}

pub fn is_forward() -> Filter {
    custom(|ctx| ctx.is_forward())
}

/// Splits `"/name arg1 arg2"` into the command name (without the slash) and
/// the whitespace-split arguments. Returns `None` unless the text starts with
/// `/`.
pub fn parse_command(text: &str) -> Option<(String, Vec<String>)> {
    if !text.starts_with('/') {
        return None;
    }
    let mut parts = text.split_whitespace();
    let name = parts.next()?.strip_prefix('/')?.to_string();
    Some((name, parts.map(str::to_string).collect()))
}

/// Matches text of the form `/name args...` where `name` is one of the given
/// command names. On match, writes the arguments into `ctx.args`; on a miss,
/// `ctx.args` is left untouched.
pub fn command<I, S>(names: I) -> Filter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: HashSet<String> = names.into_iter().map(Into::into).collect();
    custom(move |ctx| {
        let Some(text) = ctx.text.clone() else {
            return false;
        };
        match parse_command(&text) {
            Some((name, args)) if names.contains(&name) => {
                ctx.args = args;
                true
            }
            _ => false,
        }
    })
}
