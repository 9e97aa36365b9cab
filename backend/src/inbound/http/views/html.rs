//! Minimal HTML building blocks: escaping and the shared page shell.

use super::PageContext;
use crate::inbound::http::flash::FlashLevel;

/// Escape text for safe interpolation into element bodies and quoted attributes.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Shorten `text` to at most `max` characters, appending an ellipsis when cut.
#[must_use]
pub fn excerpt(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

fn nav(ctx: &PageContext) -> String {
    match &ctx.user {
        Some(user) => format!(
            concat!(
                "<nav><a href=\"/\">Blog Journal</a> ",
                "<a href=\"/home\">Home</a> <a href=\"/compose\">Compose</a> ",
                "<a href=\"/about\">About</a> ",
                "<span>Signed in as {}</span> <a href=\"/logout\">Log out</a></nav>"
            ),
            escape(&user.username)
        ),
        None => concat!(
            "<nav><a href=\"/\">Blog Journal</a> <a href=\"/about\">About</a> ",
            "<a href=\"/login\">Log in</a> <a href=\"/register\">Register</a></nav>"
        )
        .to_owned(),
    }
}

fn flashes(ctx: &PageContext) -> String {
    let mut out = String::new();
    for flash in &ctx.flashes {
        let class = match flash.level {
            FlashLevel::Success => "flash flash-success",
            FlashLevel::Error => "flash flash-error",
        };
        out.push_str(&format!(
            "<div class=\"{class}\" role=\"alert\">{}</div>",
            escape(&flash.message)
        ));
    }
    out
}

/// Wrap a rendered body in the document shell with navigation and flashes.
#[must_use]
pub fn layout(title: &str, ctx: &PageContext, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            "<title>{title} | Blog Journal</title></head><body>",
            "{nav}<main>{flashes}{body}</main></body></html>"
        ),
        title = escape(title),
        nav = nav(ctx),
        flashes = flashes(ctx),
        body = body,
    )
}
