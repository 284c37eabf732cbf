//! Service layer for the tweet loader.
//!
//! This module contains the Twitter API plumbing:
//! - OAuth 1.0a request signing (`OAuthSigner`)
//! - Authenticated session handling (`TwitterSession`)
//! - Timeline fetching (`TimelineSource`)

mod oauth;
mod session;
mod timeline;

pub use oauth::OAuthSigner;
pub use session::{Account, TwitterSession};
pub use timeline::{TimelineSource, decode_timeline};
