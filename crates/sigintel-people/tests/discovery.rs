use sigintel_github::GithubClient;
use sigintel_people::{discover_contributors, rank_contributors};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn contributor(login: &str, contributions: u64) -> serde_json::Value {
    serde_json::json!({
        "login": login,
        "contributions": contributions,
        "avatar_url": format!("https://avatars.example/{login}"),
        "html_url": format!("https://github.com/{login}")
    })
}

#[tokio::test]
async fn merges_contributors_across_repositories() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/tokio-rs/tokio/contributors"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            contributor("alice", 40),
            contributor("bob", 5)
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/hyperium/hyper/contributors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            contributor("bob", 30),
            contributor("carol", 2)
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/gone/away/contributors"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "Not Found"
        })))
        .mount(&server)
        .await;

    let github = GithubClient::with_base_url(None, 5, "sigintel-test", &server.uri()).unwrap();
    let contributors = discover_contributors(
        &github,
        &[
            "tokio-rs/tokio".to_string(),
            "no-slash".to_string(),
            "gone/away".to_string(),
            "hyperium/hyper".to_string(),
        ],
    )
    .await;

    let names: Vec<&str> = contributors.iter().map(|c| c.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);

    let bob = &contributors[1];
    assert_eq!(bob.contributions, 35);
    assert_eq!(bob.repos, vec!["tokio-rs/tokio", "hyperium/hyper"]);
    assert_eq!(bob.html_url.as_deref(), Some("https://github.com/bob"));

    let ranked = rank_contributors(contributors);
    // alice 40*2+10 = 90, bob 35*2+20 = 90, carol 2*2+10 = 14
    let order: Vec<&str> = ranked.iter().map(|s| s.contributor.username.as_str()).collect();
    assert_eq!(order, vec!["alice", "bob", "carol"]);
    assert_eq!(ranked[0].score, 90);
    assert_eq!(ranked[1].score, 90);
}
