//! Post records as returned by the user timeline endpoint.
//!
//! Only the fields the mapper reads are modelled; everything else in the
//! API payload is ignored. Every modelled field is required so that a
//! payload of the wrong shape fails at decode time.

use serde::{Deserialize, Serialize};

/// A single timeline post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Numeric post identifier
    pub id: u64,

    /// Post body
    pub text: String,

    /// Creation timestamp, e.g. `Thu Apr 18 12:00:00 +0000 2013`
    pub created_at: String,

    /// Author of the post
    pub user: Author,

    /// Hashtag and mention entities
    pub entities: Entities,
}

/// Author sub-record of a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub screen_name: String,

    /// Display name
    pub name: String,

    /// Avatar URL
    pub profile_image_url: String,

    /// Biography; the API sends `null` or an empty string when unset
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entities {
    pub hashtags: Vec<Hashtag>,
    pub user_mentions: Vec<UserMention>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hashtag {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserMention {
    /// Screen name of the mentioned account
    pub screen_name: String,
}
