use std::collections::HashMap;

use sigintel_core::RepoRef;
use sigintel_github::GithubClient;

use crate::scoring::Contributor;

pub const CONTRIBUTORS_PER_REPO: usize = 50;

/// Merge the top contributors of every repository in `repos`.
///
/// A login seen in several repositories gets its contributions summed and
/// each repository appended. Output keeps first-seen order. Malformed
/// references and failing repositories are skipped with a warning.
pub async fn discover_contributors(
    github: &GithubClient,
    repos: &[String],
) -> Vec<Contributor> {
    tracing::info!(repos = repos.len(), "discovering contributors");

    let mut order: Vec<String> = Vec::new();
    let mut by_login: HashMap<String, Contributor> = HashMap::new();

    for repo in repos {
        let repo_ref: RepoRef = match repo.parse() {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(repo = %repo, error = %e, "skipping malformed repository");
                continue;
            }
        };

        let found = match github.list_contributors(&repo_ref, CONTRIBUTORS_PER_REPO).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(repo = %repo_ref, error = %e, "failed to list contributors");
                continue;
            }
        };
        tracing::debug!(repo = %repo_ref, count = found.len(), "listed contributors");

        let repo_name = repo_ref.to_string();
        for rc in found {
            match by_login.get_mut(&rc.login) {
                Some(existing) => {
                    existing.contributions =
                        existing.contributions.saturating_add(rc.contributions);
                    existing.repos.push(repo_name.clone());
                }
                None => {
                    order.push(rc.login.clone());
                    by_login.insert(
                        rc.login.clone(),
                        Contributor {
                            username: rc.login,
                            contributions: rc.contributions,
                            repos: vec![repo_name.clone()],
                            avatar_url: rc.avatar_url,
                            html_url: rc.html_url,
                        },
                    );
                }
            }
        }
    }

    let contributors: Vec<Contributor> = order
        .into_iter()
        .filter_map(|login| by_login.remove(&login))
        .collect();
    tracing::info!(unique = contributors.len(), "discovered contributors");
    contributors
}
