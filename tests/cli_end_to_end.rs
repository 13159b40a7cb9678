#![deny(clippy::all, clippy::pedantic)]

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn uferlos() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("uferlos"));
    cmd.env_remove("UFERLOS_SITE_URL");
    cmd
}

#[test]
fn resolve_prints_the_hub_url_for_a_shared_tag() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/posts.json");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"posts":[
                {"id":"1","title":"Eins","tags":["politik"]},
                {"id":"2","title":"Zwei","tags":["Politik"]}
            ]}"#);
    });

    uferlos()
        .env("UFERLOS_SITE_URL", server.base_url())
        .arg("resolve")
        .arg("#Politik")
        .assert()
        .success()
        .stdout(contains("themen.html?tag=politik"));
}

#[test]
fn resolve_reports_a_dead_tag_with_exit_code_two() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/posts.json");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"posts":[]}"#);
    });

    uferlos()
        .env("UFERLOS_SITE_URL", server.base_url())
        .arg("resolve")
        .arg("nichtda")
        .assert()
        .code(2)
        .stderr(contains("Keine Einträge für #nichtda gefunden."));
}

#[test]
fn missing_site_url_fails_fast() {
    uferlos()
        .arg("index")
        .assert()
        .failure()
        .stdout(contains("site base URL is required"));
}

#[test]
fn scheme_toggle_persists_across_invocations() {
    let dir = TempDir::new().expect("tmp dir");
    let scheme_file = dir.path().join("scheme");
    let config_file = dir.path().join("uferlos.toml");
    fs::write(
        &config_file,
        format!("[prefs]\nscheme_file = \"{}\"\n", scheme_file.display()),
    )
    .expect("write config");

    uferlos()
        .arg("--config-file")
        .arg(&config_file)
        .arg("--site-url")
        .arg("https://blog.example/")
        .arg("scheme")
        .arg("--toggle")
        .assert()
        .success()
        .stdout(contains("dark"));

    uferlos()
        .arg("--config-file")
        .arg(&config_file)
        .arg("--site-url")
        .arg("https://blog.example/")
        .arg("scheme")
        .arg("--toggle")
        .assert()
        .success()
        .stdout(contains("light"));
}
