use anyhow::Result;
use httpmock::prelude::*;
use web_recipe::config::HttpConfig;
use web_recipe::{CurlClient, FetchRequest, Fetcher};

fn client() -> CurlClient {
    CurlClient::new(&HttpConfig::default()).unwrap()
}

#[tokio::test]
async fn test_get_appends_form_data_to_query() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("q", "rust lang")
            .query_param("page", "2");
        then.status(200)
            .header("content-type", "text/plain")
            .body("found");
    });

    let request = FetchRequest::get(server.url("/search")).with_form([("q", "rust lang"), ("page", "2")]);
    let response = client().fetch(&request).await?;

    mock.assert();
    assert_eq!(response.contents, "found");
    assert_eq!(response.info.status, 200);
    assert_eq!(response.info.content_type.as_deref(), Some("text/plain"));
    assert_eq!(response.info.header("Content-Type"), Some("text/plain"));
    Ok(())
}

#[tokio::test]
async fn test_post_form_is_urlencoded() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/submit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("name=Recipe&note=two+words");
        then.status(201).body("created");
    });

    let request = FetchRequest::post(server.url("/submit"))
        .with_form([("name", "Recipe"), ("note", "two words")]);
    let response = client().fetch(&request).await?;

    mock.assert();
    assert_eq!(response.info.status, 201);
    assert_eq!(response.contents, "created");
    Ok(())
}

#[tokio::test]
async fn test_post_raw_body() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/raw").body(r#"{"k":1}"#);
        then.status(200).body("ok");
    });

    let request = FetchRequest::post(server.url("/raw"))
        .with_header("Content-Type", "application/json")
        .with_body(r#"{"k":1}"#);
    client().fetch(&request).await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_headers_and_basic_auth() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/private")
            .header("x-api-key", "secret")
            .header("authorization", "Basic dXNlcjpwYXNz");
        then.status(200).body("welcome");
    });

    let request = FetchRequest::get(server.url("/private"))
        .with_header("X-Api-Key", "secret")
        .with_basic_auth("user", "pass");
    let response = client().fetch(&request).await?;

    mock.assert();
    assert_eq!(response.contents, "welcome");
    Ok(())
}

#[tokio::test]
async fn test_basic_auth_skipped_when_password_empty() -> Result<()> {
    let server = MockServer::start();
    let with_auth = server.mock(|when, then| {
        when.path("/open").header_exists("authorization");
        then.status(401).body("unexpected credentials");
    });
    let without_auth = server.mock(|when, then| {
        when.method(GET).path("/open");
        then.status(200).body("anonymous");
    });

    let client = client();
    for (user, password) in [("user", ""), ("", "pass")] {
        let request = FetchRequest::get(server.url("/open")).with_basic_auth(user, password);
        let response = client.fetch(&request).await?;
        assert_eq!(response.info.status, 200);
        assert_eq!(response.contents, "anonymous");
    }

    with_auth.assert_hits(0);
    without_auth.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_redirects_followed_unless_disabled() -> Result<()> {
    let server = MockServer::start();
    let old = server.mock(|when, then| {
        when.method(GET).path("/old");
        then.status(302).header("location", "/new");
    });
    let new = server.mock(|when, then| {
        when.method(GET).path("/new");
        then.status(200).body("landed");
    });

    let client = client();

    let followed = client.fetch(&FetchRequest::get(server.url("/old"))).await?;
    assert_eq!(followed.contents, "landed");
    assert_eq!(followed.info.status, 200);
    assert!(followed.info.url.ends_with("/new"));

    let stopped = client
        .fetch(&FetchRequest::get(server.url("/old")).without_redirects())
        .await?;
    assert!(stopped.info.is_redirect());
    assert_eq!(stopped.info.header("location"), Some("/new"));

    old.assert_hits(2);
    new.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_configured_user_agent_and_fetch_contents() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/ua")
            .header("user-agent", "recipe-test/1.0");
        then.status(200).body("hello");
    });

    let config = HttpConfig {
        user_agent: Some("recipe-test/1.0".to_string()),
        ..HttpConfig::default()
    };
    let body = CurlClient::new(&config)?
        .fetch_contents(&server.url("/ua"))
        .await?;

    mock.assert();
    assert_eq!(body, "hello");
    Ok(())
}

#[tokio::test]
async fn test_error_status_still_returns_body() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/missing");
        then.status(404).body("not here");
    });

    let response = client().fetch(&FetchRequest::get(server.url("/missing"))).await?;
    assert_eq!(response.info.status, 404);
    assert_eq!(response.contents, "not here");
    Ok(())
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let err = client()
        .fetch(&FetchRequest::get("http://127.0.0.1:1/"))
        .await
        .unwrap_err();
    assert!(err.is_network());
}
