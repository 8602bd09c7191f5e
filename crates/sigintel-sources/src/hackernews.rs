use futures::stream::{self, StreamExt};
use serde::Deserialize;
use sigintel_core::{Candidate, Source};

use crate::error::SourceError;
use crate::SourceClient;

#[derive(Debug, Deserialize)]
struct HnItem {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    score: Option<i64>,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    dead: bool,
}

impl HnItem {
    fn into_candidate(self) -> Option<Candidate> {
        if self.deleted || self.dead {
            return None;
        }
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        // Ask HN and similar posts have no external link.
        let url = self
            .url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| format!("https://news.ycombinator.com/item?id={}", self.id));
        Some(Candidate {
            title,
            url,
            source: Source::HackerNews,
            score: self.score,
        })
    }
}

impl SourceClient {
    /// Top stories in front-page order.
    ///
    /// Item fetches run concurrently; an item that fails to load is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only when the top-story index itself cannot be read.
    pub async fn fetch_hacker_news(&self) -> Result<Vec<Candidate>, SourceError> {
        let base = self.settings.hn_base_url.trim_end_matches('/');
        let ids: Vec<u64> = self
            .get_json(&format!("{base}/v0/topstories.json"), "hackernews top stories")
            .await?;

        let fetched: Vec<(usize, u64, Result<Option<HnItem>, SourceError>)> =
            stream::iter(ids.into_iter().take(self.settings.hn_max_stories).enumerate())
                .map(|(rank, id)| {
                    let url = format!("{base}/v0/item/{id}.json");
                    async move {
                        let result = self
                            .get_json::<Option<HnItem>>(&url, "hackernews item")
                            .await;
                        (rank, id, result)
                    }
                })
                .buffer_unordered(self.settings.hn_max_concurrent.max(1))
                .collect()
                .await;

        let mut ranked: Vec<(usize, Candidate)> = Vec::with_capacity(fetched.len());
        for (rank, id, result) in fetched {
            match result {
                Ok(Some(item)) => {
                    if let Some(candidate) = item.into_candidate() {
                        ranked.push((rank, candidate));
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(id, error = %e, "failed to fetch HN story");
                }
            }
        }
        ranked.sort_by_key(|(rank, _)| *rank);

        let stories: Vec<Candidate> = ranked.into_iter().map(|(_, c)| c).collect();
        tracing::info!(count = stories.len(), "fetched HackerNews stories");
        Ok(stories)
    }
}
