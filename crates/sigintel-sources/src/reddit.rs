use serde::Deserialize;
use sigintel_core::{Candidate, Source};

use crate::error::SourceError;
use crate::SourceClient;

/// Permalinks are rooted here regardless of which API host served them.
const REDDIT_WEB_URL: &str = "https://reddit.com";

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    permalink: Option<String>,
    #[serde(default)]
    score: Option<i64>,
}

impl SourceClient {
    /// Today's top posts of one subreddit.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on network failure, a non-2xx status, or an
    /// unexpected listing shape.
    pub async fn fetch_subreddit(&self, subreddit: &str) -> Result<Vec<Candidate>, SourceError> {
        let base = self.settings.reddit_base_url.trim_end_matches('/');
        let url = format!(
            "{base}/r/{subreddit}/top.json?limit={}&t=day",
            self.settings.reddit_max_posts
        );
        let listing: Listing = self.get_json(&url, &format!("r/{subreddit}")).await?;

        Ok(listing
            .data
            .children
            .into_iter()
            .filter_map(|post| {
                let PostData {
                    title,
                    permalink,
                    score,
                } = post.data;
                Some(Candidate {
                    title: title?,
                    url: format!("{REDDIT_WEB_URL}{}", permalink?),
                    source: Source::Reddit,
                    score,
                })
            })
            .collect())
    }

    /// Top posts across `subreddits`, in list order. A subreddit that fails
    /// is skipped with a warning.
    pub async fn fetch_reddit(&self, subreddits: &[String]) -> Vec<Candidate> {
        let mut posts = Vec::new();
        for sub in subreddits {
            match self.fetch_subreddit(sub).await {
                Ok(sub_posts) => {
                    tracing::debug!(subreddit = %sub, count = sub_posts.len(), "fetched subreddit");
                    posts.extend(sub_posts);
                }
                Err(e) => {
                    tracing::warn!(subreddit = %sub, error = %e, "failed to fetch subreddit");
                }
            }
        }
        tracing::info!(
            subreddits = subreddits.len(),
            count = posts.len(),
            "fetched Reddit posts"
        );
        posts
    }
}
