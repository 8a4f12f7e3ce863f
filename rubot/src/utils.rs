//! Text helpers: Rubika link/username detection and extraction, plus markdown
//! formatting.

use lazy_regex::regex;

/// Digit-only phone number of plausible length (10 to 15 digits).
pub fn is_valid_phone_number(phone: &str) -> bool {
    !phone.is_empty()
        && phone.chars().all(|c| c.is_ascii_digit())
        && (10..=15).contains(&phone.len())
}

/// Any `rubika.ir/...` link, with or without scheme.
pub fn is_rubika_link(text: &str) -> bool {
    regex!(r"(?:https?://)?rubika\.ir/\S*").is_match(text)
}

/// A group join link (`https://rubika.ir/joing/...`).
pub fn is_group_link(text: &str) -> bool {
    regex!(r"https://rubika\.ir/joing/[A-Za-z0-9]+").is_match(text)
}

/// A channel link (`https://rubika.ir/<name>`).
pub fn is_channel_link(text: &str) -> bool {
    regex!(r"https://rubika\.ir/[A-Za-z0-9_]+").is_match(text)
}

/// An `@username` mention.
pub fn is_username(text: &str) -> bool {
    regex!(r"@([a-zA-Z0-9_]{3,32})").is_match(text)
}

/// All Rubika links in the text.
pub fn rubika_links(text: &str) -> Vec<String> {
    regex!(r"(?:https?://)?rubika\.ir/\S*")
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// All group join links in the text.
pub fn group_links(text: &str) -> Vec<String> {
    regex!(r"https://rubika\.ir/joing/[A-Za-z0-9]+")
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// All channel links in the text.
pub fn channel_links(text: &str) -> Vec<String> {
    regex!(r"https://rubika\.ir/[A-Za-z0-9_]+")
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// All `@username` mentions in the text, including the `@`.
pub fn usernames(text: &str) -> Vec<String> {
    regex!(r"@([a-zA-Z0-9_]{3,32})")
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

// --- Markdown formatting ---

pub fn bold(text: &str) -> String {
    format!("**{}**", text.trim())
}

pub fn italic(text: &str) -> String {
    format!("_{}_", text.trim())
}

pub fn underline(text: &str) -> String {
    format!("--{}--", text.trim())
}

pub fn strike(text: &str) -> String {
    format!("~~{}~~", text.trim())
}

pub fn spoiler(text: &str) -> String {
    format!("||{}||", text.trim())
}

pub fn code(text: &str) -> String {
    format!("`{}`", text.trim())
}

/// Text mention pointing at a user guid.
pub fn mention(text: &str, object_guid: &str) -> String {
    format!("[{}]({})", text.trim(), object_guid.trim())
}

pub fn hyperlink(text: &str, link: &str) -> String {
    format!("[{}]({})", text.trim(), link.trim())
}
