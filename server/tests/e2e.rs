//! End to end test of sipd
use axum::BoxError;
use axum_test::TestServer;
use serde_json::json;
use server::{AppStateInner, config::AppConfig, make_app};
use uuid::Uuid;

/// Set-up for a test against a fresh in-memory store
struct Fixture {
    server: TestServer,
}

impl Fixture {
    pub fn new() -> Result<Fixture, BoxError> {
        let config = AppConfig::build_for_test()?;

        let app = make_app(AppStateInner::new(config));
        Ok(Fixture {
            server: TestServer::new(app)?,
        })
    }
}

#[tokio::test]
async fn put_then_get_sip() -> Result<(), BoxError> {
    let f = Fixture::new()?;
    let guid = Uuid::new_v4();

    f.server
        .put(&format!("/v0/sips/{guid}"))
        .json(&json!({
            "title": "All is flux",
            "text": "You cannot step into the same river twice.",
            "sourceUri": "https://plato.stanford.edu/entries/heraclitus/",
        }))
        .expect_success()
        .await;

    let resp = f
        .server
        .get(&format!("/v0/sips/{guid}"))
        .expect_success()
        .await;
    let body: serde_json::Value = resp.json();
    assert_eq!(body["guid"], json!(guid));
    assert_eq!(body["title"], "All is flux");
    assert_eq!(body["text"], "You cannot step into the same river twice.");
    assert_eq!(
        body["sourceUri"],
        "https://plato.stanford.edu/entries/heraclitus/"
    );

    Ok(())
}

#[tokio::test]
async fn put_replaces_existing_sip() -> Result<(), BoxError> {
    let f = Fixture::new()?;
    let guid = Uuid::new_v4();

    f.server
        .put(&format!("/v0/sips/{guid}"))
        .json(&json!({ "title": "first" }))
        .expect_success()
        .await;
    f.server
        .put(&format!("/v0/sips/{guid}"))
        .json(&json!({ "title": "second" }))
        .expect_success()
        .await;

    let body: serde_json::Value = f
        .server
        .get(&format!("/v0/sips/{guid}"))
        .expect_success()
        .await
        .json();
    assert_eq!(body["title"], "second");

    Ok(())
}

#[tokio::test]
async fn get_missing_sip_is_a_not_found_problem() -> Result<(), BoxError> {
    let f = Fixture::new()?;
    let guid = Uuid::new_v4();

    let resp = f
        .server
        .get(&format!("/v0/sips/{guid}"))
        .expect_failure()
        .await;
    resp.assert_status_not_found();
    assert_eq!(resp.header("content-type"), "application/problem+json");

    let body: serde_json::Value = resp.json();
    assert_eq!(body["type"], "urn:problem:SipNotFound");
    assert_eq!(body["title"], "Not Found");
    assert_eq!(body["status"], 404);
    assert_eq!(body["detail"], format!("sip {guid} not found"));
    assert!(
        body["instance"]
            .as_str()
            .unwrap()
            .starts_with("urn:problem-instance:")
    );

    Ok(())
}

#[tokio::test]
async fn garbage_guid_is_a_bad_request_problem() -> Result<(), BoxError> {
    let f = Fixture::new()?;

    let resp = f.server.get("/v0/sips/not-a-guid").expect_failure().await;
    resp.assert_status_bad_request();
    assert_eq!(resp.header("content-type"), "application/problem+json");

    let body: serde_json::Value = resp.json();
    assert_eq!(body["type"], "urn:problem:InvalidGuid");
    assert_eq!(body["title"], "Bad Request");
    assert_eq!(body["status"], 400);
    assert_eq!(body["detail"], "invalid sip guid: \"not-a-guid\"");

    Ok(())
}

#[tokio::test]
async fn problem_instances_are_fresh_but_types_are_stable() -> Result<(), BoxError> {
    let f = Fixture::new()?;
    let guid = Uuid::new_v4();

    let first: serde_json::Value = f
        .server
        .get(&format!("/v0/sips/{guid}"))
        .expect_failure()
        .await
        .json();
    let second: serde_json::Value = f
        .server
        .get(&format!("/v0/sips/{guid}"))
        .expect_failure()
        .await
        .json();

    assert_eq!(first["type"], second["type"]);
    assert_ne!(first["instance"], second["instance"]);

    Ok(())
}

#[tokio::test]
async fn healthcheck() -> Result<(), BoxError> {
    let f = Fixture::new()?;
    f.server
        .get("/healthcheck")
        .expect_success()
        .await
        .assert_text("ok");

    Ok(())
}
