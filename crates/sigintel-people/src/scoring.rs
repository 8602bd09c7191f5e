use chrono::{DateTime, SecondsFormat, Utc};

pub const REPORT_LIMIT: usize = 20;

/// A contributor merged across every watched repository they appear in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    pub username: String,
    pub contributions: u64,
    /// `owner/repo` names, in discovery order.
    pub repos: Vec<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredContributor {
    pub contributor: Contributor,
    pub score: u64,
}

/// `contributions * 2 + repos * 10`.
#[must_use]
pub fn score_contributor(contributor: &Contributor) -> u64 {
    let repos = u64::try_from(contributor.repos.len()).unwrap_or(u64::MAX);
    contributor
        .contributions
        .saturating_mul(2)
        .saturating_add(repos.saturating_mul(10))
}

/// Score and sort, highest first. Ties keep input order.
#[must_use]
pub fn rank_contributors(contributors: Vec<Contributor>) -> Vec<ScoredContributor> {
    let mut scored: Vec<ScoredContributor> = contributors
        .into_iter()
        .map(|contributor| ScoredContributor {
            score: score_contributor(&contributor),
            contributor,
        })
        .collect();
    scored.sort_by_key(|s| std::cmp::Reverse(s.score));
    scored
}

#[must_use]
pub fn format_candidates_markdown(
    ranked: &[ScoredContributor],
    generated_at: DateTime<Utc>,
    limit: usize,
) -> String {
    let mut md = String::from("# People Watcher Candidates\n\n");
    md.push_str(&format!(
        "*Last updated: {}*\n\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    md.push_str("## Top Contributors\n\n");

    for scored in ranked.iter().take(limit) {
        let c = &scored.contributor;
        let profile = c
            .html_url
            .clone()
            .unwrap_or_else(|| format!("https://github.com/{}", c.username));
        md.push_str(&format!("### {} (Score: {})\n\n", c.username, scored.score));
        md.push_str(&format!("- **Contributions:** {}\n", c.contributions));
        md.push_str(&format!("- **Repositories:** {}\n", c.repos.join(", ")));
        md.push_str(&format!("- **GitHub:** {profile}\n\n"));
    }

    md
}
