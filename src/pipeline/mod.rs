//! Pipeline entry points.
//!
//! - `run`: validate configuration, open a session, generate documents
//! - `run_generator`: generate documents from any timeline source
//! - `map_post`: turn one post into a document

pub mod generate;
pub mod map;

pub use generate::{run, run_generator};
pub use map::{content_id, map_post};
