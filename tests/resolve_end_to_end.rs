#![deny(clippy::all, clippy::pedantic)]

use httpmock::MockServer;
use serde_json::json;
use uferlos::application::catalog::Catalog;
use uferlos::application::resolve::{ResolvedTarget, TagResolver};
use uferlos::config::{RawSettings, Settings};
use uferlos::infra::http::FetchClient;

fn harness(server: &MockServer) -> (Catalog, Settings) {
    let raw: RawSettings = serde_json::from_value(json!({
        "site": { "base_url": server.base_url() }
    }))
    .expect("raw settings");
    let settings = Settings::from_raw(raw).expect("settings");
    let client = FetchClient::new(&settings.site.base_url).expect("client");
    let catalog = Catalog::new(client, settings.site.clone());
    (catalog, settings)
}

fn mock_posts(server: &MockServer, body: &str) {
    let body = body.to_string();
    server.mock(move |when, then| {
        when.method("GET").path("/api/posts.json");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });
}

#[tokio::test]
async fn single_post_hit_anchors_into_the_stream() {
    let server = MockServer::start();
    mock_posts(
        &server,
        r#"{"posts":[{"id":"42","title":"Reisebericht","tags":["reise"]}]}"#,
    );

    let (catalog, settings) = harness(&server);
    let resolver = TagResolver::new(&catalog, &settings.site);

    assert_eq!(
        resolver.resolve("Reise").await,
        ResolvedTarget::Navigate {
            url: "strom.html?post=42".to_string()
        }
    );
}

#[tokio::test]
async fn single_page_hit_navigates_to_the_page_itself() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/pages.json");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"pages":[{"title":"Über","url":"ueber.html","tags":["kontakt"]}]}"#);
    });

    let (catalog, settings) = harness(&server);
    let resolver = TagResolver::new(&catalog, &settings.site);

    assert_eq!(
        resolver.resolve("#Kontakt").await,
        ResolvedTarget::Navigate {
            url: "ueber.html".to_string()
        }
    );
}

#[tokio::test]
async fn several_hits_go_to_the_filtered_hub() {
    let server = MockServer::start();
    mock_posts(
        &server,
        r##"{"posts":[
            {"id":"1","title":"Eins","tags":["Politik"]},
            {"id":"2","title":"Zwei","tags":["#politik"]}
        ]}"##,
    );

    let (catalog, settings) = harness(&server);
    let resolver = TagResolver::new(&catalog, &settings.site);

    assert_eq!(
        resolver.resolve("#Politik").await,
        ResolvedTarget::Navigate {
            url: "themen.html?tag=politik".to_string()
        }
    );
}

#[tokio::test]
async fn static_pages_take_part_in_resolution() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/static.json");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"staticPages":[{"title":"Impressum","url":"impressum.html","tags":["rechtliches"]}]}"#);
    });

    let (catalog, settings) = harness(&server);
    let resolver = TagResolver::new(&catalog, &settings.site);

    assert_eq!(
        resolver.resolve("rechtliches").await,
        ResolvedTarget::Navigate {
            url: "impressum.html".to_string()
        }
    );
}

#[tokio::test]
async fn unknown_tag_yields_no_results() {
    let server = MockServer::start();
    mock_posts(&server, r#"{"posts":[{"id":"1","title":"Eins","tags":["reise"]}]}"#);

    let (catalog, settings) = harness(&server);
    let resolver = TagResolver::new(&catalog, &settings.site);

    assert_eq!(
        resolver.resolve("#NichtDa").await,
        ResolvedTarget::NoResults {
            tag: "nichtda".to_string()
        }
    );
}
