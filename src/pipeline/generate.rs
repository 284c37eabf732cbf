// src/pipeline/generate.rs

//! Document generation pipeline.

use crate::error::Result;
use crate::models::{Config, GenerateStats};
use crate::pipeline::map::map_post;
use crate::services::{TimelineSource, TwitterSession};
use crate::storage::{DocumentSink, SendOutcome};

/// Open a session from the configuration and run the generator against it.
///
/// The configuration is validated before any network call is made.
pub async fn run(config: &Config, sink: &dyn DocumentSink) -> Result<GenerateStats> {
    config.validate()?;
    let session = TwitterSession::open(&config.credentials, &config.api).await?;
    run_generator(config, &session, sink).await
}

/// Fetch each configured user's timeline and send one document per post.
///
/// Users are processed in order, one at a time. The first error aborts the
/// remaining users.
pub async fn run_generator(
    config: &Config,
    source: &dyn TimelineSource,
    sink: &dyn DocumentSink,
) -> Result<GenerateStats> {
    log::info!("Generate step");
    let mut stats = GenerateStats::default();

    for user in &config.users {
        log::info!("Get timeline for {user}");
        let posts = source.user_timeline(user, config.max).await?;
        stats.users += 1;
        stats.posts_fetched += posts.len();
        log::debug!("{} posts fetched for {user}", posts.len());

        for post in &posts {
            let doc = map_post(post, user, config.output_layer)?;
            log::info!("URI created : {}", doc.uri());

            match sink.send_if_new(&doc).await? {
                SendOutcome::Sent => stats.documents_sent += 1,
                SendOutcome::Duplicate => stats.duplicates += 1,
            }
        }
    }

    log::info!(
        "Generated {} documents from {} posts of {} users ({} already present)",
        stats.documents_sent,
        stats.posts_fetched,
        stats.users,
        stats.duplicates
    );
    Ok(stats)
}
