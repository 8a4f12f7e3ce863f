//! Integration tests for [`rubot_filters`].
//!
//! Covers: boolean composition laws (and/or/not), the command filter's arg
//! side effect, file-subtype mutual exclusion, and chat-type / reply / forward
//! filters.

use rubot_core::testing::noop_api;
use rubot_core::{FileInfo, ForwardedFrom, MessageContext, Sticker};
use rubot_filters as filters;
use rubot_filters::{parse_command, Filter};

fn context_in(chat_id: &str) -> MessageContext {
    MessageContext::new(noop_api(), chat_id)
}

fn text_context(text: &str) -> MessageContext {
    let mut ctx = context_in("u0abc");
    ctx.text = Some(text.to_string());
    ctx
}

fn file_context(file_name: &str) -> MessageContext {
    let mut ctx = context_in("u0abc");
    ctx.file = Some(FileInfo {
        file_id: Some("f1".into()),
        file_name: Some(file_name.into()),
        size: None,
    });
    ctx
}

/// **Test: and/or/not agree with plain boolean operators.**
///
/// **Setup:** `text` filter (true on a text message) and `sticker` filter
/// (false on it).
/// **Expected:** `and` = `t && s`, `or` = `t || s`, `not` negates, for every
/// pairing.
#[test]
fn composition_matches_boolean_operators() {
    let cases: Vec<(Filter, bool)> = vec![
        (filters::text(), true),
        (filters::sticker(), false),
    ];

    for (f, f_expected) in &cases {
        for (g, g_expected) in &cases {
            let mut ctx = text_context("hello");
            assert_eq!(
                f.clone().and(g.clone()).check(&mut ctx),
                *f_expected && *g_expected
            );
            let mut ctx = text_context("hello");
            assert_eq!(
                f.clone().or(g.clone()).check(&mut ctx),
                *f_expected || *g_expected
            );
        }
        let mut ctx = text_context("hello");
        assert_eq!(f.clone().not().check(&mut ctx), !*f_expected);
    }
}

/// **Test: composition closes over composition — nested trees evaluate.**
#[test]
fn nested_composition() {
    let tree = filters::text()
        .and(filters::sticker().not())
        .or(filters::poll());

    let mut ctx = text_context("hello");
    assert!(tree.check(&mut ctx));

    let mut empty = context_in("u0abc");
    assert!(!tree.clone().check(&mut empty));
}

/// **Test: empty text does not count as text.**
#[test]
fn text_filter_requires_non_empty() {
    let mut ctx = text_context("");
    assert!(!filters::text().check(&mut ctx));

    let mut ctx = context_in("u0abc");
    assert!(!filters::text().check(&mut ctx));
}

/// **Test: command filter matches and writes args.**
///
/// **Setup:** text `"/start hello world"`, registered name `start`.
/// **Expected:** filter returns true and `args == ["hello", "world"]`.
#[test]
fn command_filter_sets_args_on_match() {
    let mut ctx = text_context("/start hello world");
    assert!(filters::command(["start"]).check(&mut ctx));
    assert_eq!(ctx.args, vec!["hello".to_string(), "world".to_string()]);
}

/// **Test: command filter misses and leaves args untouched.**
///
/// **Setup:** text `"/stop"`, registered name `start`; args pre-seeded.
/// **Expected:** filter returns false, args unchanged.
#[test]
fn command_filter_leaves_args_on_miss() {
    let mut ctx = text_context("/stop");
    ctx.args = vec!["seeded".to_string()];
    assert!(!filters::command(["start"]).check(&mut ctx));
    assert_eq!(ctx.args, vec!["seeded".to_string()]);
}

/// **Test: command filter requires the slash prefix.**
#[test]
fn command_filter_requires_slash() {
    let mut ctx = text_context("start now");
    assert!(!filters::command(["start"]).check(&mut ctx));
}

#[test]
fn parse_command_splits_name_and_args() {
    assert_eq!(
        parse_command("/start hello world"),
        Some(("start".to_string(), vec!["hello".into(), "world".into()]))
    );
    assert_eq!(parse_command("/stop"), Some(("stop".to_string(), vec![])));
    assert_eq!(parse_command("start"), None);
    assert_eq!(parse_command(" /start"), None);
}

/// **Test: at most one of photo/video/voice/audio matches any file name; a
/// file matching none is a document.**
#[test]
fn file_subtypes_are_mutually_exclusive() {
    let names = [
        "pic.JPG", "clip.mp4", "note.ogg", "song.mp3", "report.pdf", "archive.tar.gz",
    ];
    for name in names {
        let mut ctx = file_context(name);
        let matches = [
            filters::photo().check(&mut ctx),
            filters::video().check(&mut ctx),
            filters::voice().check(&mut ctx),
            filters::audio().check(&mut ctx),
        ];
        let hit_count = matches.iter().filter(|m| **m).count();
        assert!(hit_count <= 1, "{name} matched {hit_count} subtypes");
        assert_eq!(
            filters::document().check(&mut ctx),
            hit_count == 0,
            "document mismatch for {name}"
        );
    }
}

/// **Test: extension matching is case-insensitive.**
#[test]
fn photo_extension_case_insensitive() {
    let mut ctx = file_context("HOLIDAY.PNG");
    assert!(filters::photo().check(&mut ctx));
}

/// **Test: a sticker with an image file name is not a document.**
#[test]
fn sticker_is_not_document() {
    let mut ctx = file_context("sticker.bin");
    ctx.sticker = Some(Sticker::default());
    assert!(!filters::document().check(&mut ctx));
}

/// **Test: chat-type filters follow the chat-id prefix.**
#[test]
fn chat_type_filters() {
    let mut group_ctx = context_in("g0abc");
    assert!(filters::group().check(&mut group_ctx));
    assert!(!filters::private().check(&mut group_ctx));

    let mut private_ctx = context_in("u0abc");
    assert!(filters::private().check(&mut private_ctx));

    let mut channel_ctx = context_in("c0abc");
    assert!(filters::channel().check(&mut channel_ctx));
}

/// **Test: reply and forward filters key on the derived flags.**
#[test]
fn reply_and_forward_filters() {
    let mut ctx = context_in("u0abc");
    assert!(!filters::is_reply().check(&mut ctx));
    assert!(!filters::is_forward().check(&mut ctx));

    ctx.reply_to_message_id = Some("m9".into());
    ctx.forwarded_from = Some(ForwardedFrom::default());
    assert!(filters::is_reply().check(&mut ctx));
    assert!(filters::is_forward().check(&mut ctx));
}

/// **Test: custom wraps an arbitrary predicate and composes.**
#[test]
fn custom_filter_composes() {
    let long_text = filters::custom(|ctx| ctx.text.as_deref().is_some_and(|t| t.len() > 5));

    let mut short = text_context("hi");
    assert!(!long_text.check(&mut short));

    let mut long = text_context("hello there");
    assert!(long_text.clone().and(filters::text()).check(&mut long));
}
