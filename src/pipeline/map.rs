// src/pipeline/map.rs

//! Post to document mapping.
//!
//! The document id is the MD5 of the post text only, so two posts with the
//! same text map to the same id. The sink's "send if new" check relies on it.

use chrono::{DateTime, Datelike};

use crate::error::{AppError, Result};
use crate::models::{Document, OutputLayer, Post};
use crate::utils::strip_quotes;
use crate::utils::xml::Element;

/// Layout of `created_at` after its leading weekday token, e.g.
/// `Apr 18 12:00:00 +0000 2013` from `Thu Apr 18 12:00:00 +0000 2013`.
const CREATED_AT_FORMAT: &str = "%b %d %H:%M:%S %z %Y";

/// Build the document for one post fetched from `user`'s timeline.
pub fn map_post(post: &Post, user: &str, layer: OutputLayer) -> Result<Document> {
    let root = build_tweet(post)?;
    Ok(Document {
        id: content_id(&post.text),
        x_id: user.to_string(),
        layer,
        body: root.to_document_string(),
    })
}

/// Lowercase hex MD5 of the UTF-8 text.
pub fn content_id(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

/// Build the `tweet` element tree for a post.
pub fn build_tweet(post: &Post) -> Result<Element> {
    let mut root = Element::new("tweet");
    root.set_attr("id", post.id);

    let user = &post.user;
    let mut author = Element::new("author");
    author.push(Element::with_text("userScreenName", strip_quotes(&user.screen_name)));
    author.push(Element::with_text("userImg", strip_quotes(&user.profile_image_url)));
    author.push(Element::with_text("userName", strip_quotes(&user.name)));
    if let Some(description) = user.description.as_deref().map(strip_quotes) {
        if description != "null" {
            author.push(Element::with_text("userDescription", description));
        }
    }
    root.push(author);

    let date = format_date(&post.created_at).map_err(|e| AppError::mapping(post.id, e))?;
    root.push(Element::with_text("date", date));

    let hashtags = &post.entities.hashtags;
    let mut hashtags_el = Element::new("hashtags");
    hashtags_el.set_attr("number", hashtags.len());
    for tag in hashtags {
        hashtags_el.push(Element::with_text("hashtag", strip_quotes(&tag.text)));
    }
    root.push(hashtags_el);

    let mentions = &post.entities.user_mentions;
    let mut mentions_el = Element::new("userMentions");
    mentions_el.set_attr("number", mentions.len());
    for mention in mentions {
        mentions_el.push(Element::with_text("userMention", strip_quotes(&mention.screen_name)));
    }
    root.push(mentions_el);

    root.push(Element::with_text("text", strip_quotes(&post.text)));
    Ok(root)
}

/// Reformat a `created_at` timestamp as `day/month/year` without padding.
///
/// The weekday token is not checked against the date.
pub fn format_date(created_at: &str) -> std::result::Result<String, String> {
    let (_weekday, rest) = created_at
        .split_once(' ')
        .ok_or_else(|| format!("invalid created_at '{created_at}': missing weekday"))?;
    let parsed = DateTime::parse_from_str(rest, CREATED_AT_FORMAT)
        .map_err(|e| format!("invalid created_at '{created_at}': {e}"))?;
    Ok(format!("{}/{}/{}", parsed.day(), parsed.month(), parsed.year()))
}
