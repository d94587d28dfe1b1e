use std::path::PathBuf;

use vitae_core::Environment;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn config(base_url: &str) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "debug".to_string(),
        targets_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/profiles.yaml"),
        output_path: std::env::temp_dir().join("vitae-cli-test.jsonl"),
        session_cookies: Some(r#"li_at=AQED; JSESSIONID="ajax:1""#.to_string()),
        base_url: base_url.to_string(),
        scraper_request_timeout_secs: 5,
        scraper_user_agent: "vitae-test/0.1".to_string(),
        scraper_inter_request_delay_ms: 0,
        scraper_max_retries: 0,
        scraper_retry_backoff_base_secs: 0,
    }
}

fn usernames(raw: &[&str]) -> Vec<String> {
    raw.iter().map(ToString::to_string).collect()
}

#[test]
fn profile_arguments_override_targets_file() {
    let targets = resolve_targets(
        &config("https://www.linkedin.com"),
        &usernames(&["https://www.linkedin.com/in/jane-doe/", "john-roe"]),
    )
    .unwrap();
    assert_eq!(targets, vec!["jane-doe", "john-roe"]);
}

#[test]
fn targets_file_is_used_without_arguments() {
    let targets = resolve_targets(&config("https://www.linkedin.com"), &[]).unwrap();
    assert!(!targets.is_empty());
}

#[test]
fn repeated_and_blank_profile_arguments_keep_their_slots() {
    let targets = resolve_targets(
        &config("https://www.linkedin.com"),
        &usernames(&["jane-doe", "john-roe", "jane-doe", " / "]),
    )
    .unwrap();
    assert_eq!(targets, vec!["jane-doe", "john-roe", "jane-doe", ""]);
}

#[test]
fn empty_targets_file_aborts_the_run() {
    let dir = std::env::temp_dir().join(format!("vitae-cli-targets-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("profiles.yaml");
    std::fs::write(&path, "profiles: []\n").unwrap();

    let mut cfg = config("https://www.linkedin.com");
    cfg.targets_path = path;
    let err = resolve_targets(&cfg, &[]).unwrap_err();
    assert!(format!("{err:#}").contains("no profiles"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_cookies_abort_the_run() {
    let mut cfg = config("https://www.linkedin.com");
    cfg.session_cookies = None;
    assert!(session_cookies(&cfg).is_err());

    cfg.session_cookies = Some("no-pairs-here".to_string());
    assert!(session_cookies(&cfg).is_err());
}

#[tokio::test]
async fn missing_cookies_fail_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut cfg = config(&server.uri());
    cfg.session_cookies = None;
    let err = run(&cfg, &usernames(&["jane-doe"]), None).await.unwrap_err();
    assert!(err.to_string().contains("LINKEDIN_COOKIES"));
}

#[tokio::test]
async fn every_target_yields_exactly_one_line() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/in/ok-user/overlay/contact-info/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<title>Ok User | LinkedIn</title>{"elements":["urn:li:fsd_profile:ACoAAOk"]}"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/in/no-urn/overlay/contact-info/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/in/gone/overlay/contact-info/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/voyager/api/graphql"))
        .and(query_param(
            "queryId",
            "voyagerIdentityDashProfiles.a1a483e719b20537a256b6853cdca711",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/voyager/api/graphql"))
        .and(query_param(
            "queryId",
            "voyagerIdentityDashProfileCards.55af784c21dc8640b500ab5b45937064",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = config(&server.uri());
    let client = build_profile_client(&cfg, session_cookies(&cfg).unwrap()).unwrap();
    let mut sink = JsonlSink::new(Vec::new());

    let summary = run_batch(
        &client,
        &usernames(&["ok-user", "gone", "no-urn"]),
        Duration::ZERO,
        &mut sink,
    )
    .await
    .unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            succeeded: 1,
            failed: 2
        }
    );

    let output = String::from_utf8(sink.into_inner()).unwrap();
    let rows: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0]["username"], "ok-user");
    assert_eq!(rows[0]["scrape_status"], "success");
    assert_eq!(rows[0]["basic_info"]["fullname"], "Ok User");
    assert_eq!(rows[0]["basic_info"]["urn"], "ACoAAOk");
    assert!(rows[0]["scraped_at"].is_string());

    assert_eq!(rows[1]["username"], "gone");
    assert_eq!(rows[1]["scrape_status"], "failed");
    assert_eq!(rows[1]["error_kind"], "transport");
    assert!(rows[1]["error"].as_str().unwrap().contains("404"));

    assert_eq!(rows[2]["username"], "no-urn");
    assert_eq!(rows[2]["error_kind"], "extraction");
    assert!(rows[2].get("basic_info").is_none());
}

#[tokio::test]
async fn repeated_and_blank_targets_each_yield_a_line() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/in/jane-doe/overlay/contact-info/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<title>Jane Doe | LinkedIn</title>{"elements":["urn:li:fsd_profile:ACoAAJd"]}"#),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/voyager/api/graphql"))
        .and(query_param(
            "queryId",
            "voyagerIdentityDashProfiles.a1a483e719b20537a256b6853cdca711",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/voyager/api/graphql"))
        .and(query_param(
            "queryId",
            "voyagerIdentityDashProfileCards.55af784c21dc8640b500ab5b45937064",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(2)
        .mount(&server)
        .await;

    let cfg = config(&server.uri());
    let client = build_profile_client(&cfg, session_cookies(&cfg).unwrap()).unwrap();
    let mut sink = JsonlSink::new(Vec::new());
    let targets = resolve_targets(&cfg, &usernames(&["jane-doe", "", "jane-doe"])).unwrap();

    let summary = run_batch(&client, &targets, Duration::ZERO, &mut sink)
        .await
        .unwrap();
    assert_eq!(
        summary,
        BatchSummary {
            succeeded: 2,
            failed: 1
        }
    );

    let output = String::from_utf8(sink.into_inner()).unwrap();
    let rows: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0]["username"], "jane-doe");
    assert_eq!(rows[0]["scrape_status"], "success");

    assert_eq!(rows[1]["username"], "");
    assert_eq!(rows[1]["scrape_status"], "failed");
    assert_eq!(rows[1]["error_kind"], "extraction");
    assert!(rows[1]["error"].as_str().unwrap().contains("entry 2"));

    assert_eq!(rows[2]["username"], "jane-doe");
    assert_eq!(rows[2]["scrape_status"], "success");
}
