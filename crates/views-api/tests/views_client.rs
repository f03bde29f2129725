//! Integration tests for ViewsClient over the reqwest transport.
//!
//! Uses wiremock for HTTP mocking. Covers session bootstrap (cookies, status
//! failure), view listing (filtering, malformed body, cookie attachment), and
//! view-contents paging (query, cookies, pass-through, non-200 failure).

use connect::{ConnectError, PageRequest, ProjectId, ViewId, ViewName, ViewsService};
use serde_json::json;
use views_api::{ReqwestTransport, TransportConfig, ViewsClient, ViewsClientConfig};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(&TransportConfig::default()).expect("failed to create transport")
}

async fn mount_bootstrap(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/views/v1"))
        .respond_with(response)
        .up_to_n_times(1)
        .mount(server)
        .await;
}

fn session_response() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(json!({"views": []}))
        .append_header("set-cookie", "a=1; Path=/")
        .append_header("set-cookie", "b=2; Path=/; HttpOnly")
}

fn page_request(page_size: u32, offset: u64) -> PageRequest {
    PageRequest::new(
        ProjectId::new("p1").unwrap(),
        ViewName::new("v").unwrap(),
        page_size,
        offset,
    )
    .unwrap()
}

async fn connected_client(server: &MockServer, config: ViewsClientConfig) -> ViewsClient {
    mount_bootstrap(server, session_response()).await;
    ViewsClient::connect(&server.uri(), transport(), config)
        .await
        .expect("bootstrap failed")
}

#[tokio::test]
async fn test_bootstrap_captures_session_cookies() {
    let server = MockServer::start().await;
    let client = connected_client(&server, ViewsClientConfig::default()).await;

    assert_eq!(client.session().len(), 2);
    assert_eq!(client.session().get("a"), Some("1"));
    assert_eq!(client.session().get("b"), Some("2"));
}

#[tokio::test]
async fn test_bootstrap_without_cookies_gives_empty_session() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResponseTemplate::new(200).set_body_json(json!({"views": []}))).await;

    let client = ViewsClient::connect(&server.uri(), transport(), ViewsClientConfig::default())
        .await
        .expect("bootstrap failed");
    assert!(client.session().is_empty());
}

#[tokio::test]
async fn test_bootstrap_500_fails_construction() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResponseTemplate::new(500)).await;

    let result =
        ViewsClient::connect(&server.uri(), transport(), ViewsClientConfig::default()).await;
    assert!(matches!(
        result,
        Err(ConnectError::InitializationFailure { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_list_views_returns_only_named_issue_views() {
    let server = MockServer::start().await;
    let client = connected_client(&server, ViewsClientConfig::default()).await;

    Mock::given(method("GET"))
        .and(path("/api/views/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "views": [
                {"id": 1, "name": "X", "type": "issues"},
                {"id": 2, "name": "Y", "type": "project"},
                {"id": 3, "name": null, "type": "issues"}
            ]
        })))
        .mount(&server)
        .await;

    let first = client.list_views().await;
    let second = client.list_views().await;

    assert_eq!(first.len(), 1);
    assert_eq!(first.get(ViewId::new(1)), Some("X"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_views_malformed_body_is_empty() {
    let server = MockServer::start().await;
    let client = connected_client(&server, ViewsClientConfig::default()).await;

    Mock::given(method("GET"))
        .and(path("/api/views/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"views\": [ oops"))
        .mount(&server)
        .await;

    assert!(client.list_views().await.is_empty());
}

#[tokio::test]
async fn test_list_views_sends_no_cookies_by_default() {
    let server = MockServer::start().await;
    let client = connected_client(&server, ViewsClientConfig::default()).await;

    Mock::given(method("GET"))
        .and(path("/api/views/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"views": []})))
        .mount(&server)
        .await;
    client.list_views().await;

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 2);
    assert!(requests[1].headers.get("cookie").is_none());
}

#[tokio::test]
async fn test_list_views_sends_cookies_when_configured() {
    let server = MockServer::start().await;
    let config = ViewsClientConfig {
        attach_session_to_listing: true,
    };
    let client = connected_client(&server, config).await;

    Mock::given(method("GET"))
        .and(path("/api/views/v1"))
        .and(header("cookie", "a=1; b=2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "views": [{"id": 9, "name": "Outstanding", "type": "issues"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let views = client.list_views().await;
    assert_eq!(views.get(ViewId::new(9)), Some("Outstanding"));
}

#[tokio::test]
async fn test_view_contents_sends_query_and_session() {
    let server = MockServer::start().await;
    let client = connected_client(&server, ViewsClientConfig::default()).await;

    Mock::given(method("GET"))
        .and(path("/api/viewContents/issues/v1/v"))
        .and(query_param("projectId", "p1"))
        .and(query_param("rowCount", "50"))
        .and(query_param("offset", "100"))
        .and(header("cookie", "a=1; b=2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "viewContentsV1": {"rows": [{"cid": 10001}], "totalRows": 101}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .view_contents_page(&page_request(50, 100))
        .await
        .expect("fetch failed");
    assert_eq!(page.total_rows(), Some(101));
    assert_eq!(page.rows().map(<[_]>::len), Some(1));
}

#[tokio::test]
async fn test_view_contents_payload_is_passed_through_unchanged() {
    let server = MockServer::start().await;
    let client = connected_client(&server, ViewsClientConfig::default()).await;

    Mock::given(method("GET"))
        .and(path("/api/viewContents/issues/v1/v"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"viewContentsV1": {"rows": [], "totalRows": 0}}"#),
        )
        .mount(&server)
        .await;

    let page = client
        .view_contents_page(&page_request(50, 0))
        .await
        .expect("fetch failed");
    assert_eq!(
        serde_json::Value::Object(page.into_inner()),
        json!({"rows": [], "totalRows": 0})
    );
}

#[tokio::test]
async fn test_view_contents_403_reports_uri_status_and_body() {
    let server = MockServer::start().await;
    let client = connected_client(&server, ViewsClientConfig::default()).await;

    Mock::given(method("GET"))
        .and(path("/api/viewContents/issues/v1/v"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let err = client
        .view_contents_page(&page_request(50, 100))
        .await
        .expect_err("expected RemoteCallFailure");

    match &err {
        ConnectError::RemoteCallFailure { uri, status, body } => {
            assert!(uri.starts_with(&server.uri()));
            assert!(uri.contains("projectId=p1&rowCount=50&offset=100"));
            assert_eq!(*status, 403);
            assert_eq!(body, "forbidden");
        }
        other => panic!("expected RemoteCallFailure, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("403"));
    assert!(message.contains("forbidden"));
}

#[tokio::test]
async fn test_view_contents_malformed_body_is_empty_page() {
    let server = MockServer::start().await;
    let client = connected_client(&server, ViewsClientConfig::default()).await;

    Mock::given(method("GET"))
        .and(path("/api/viewContents/issues/v1/v"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let page = client
        .view_contents_page(&page_request(50, 0))
        .await
        .expect("parse failures are not errors");
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_unreachable_server_fails_bootstrap() {
    // Nothing listens on port 1.
    let result =
        ViewsClient::connect("http://127.0.0.1:1", transport(), ViewsClientConfig::default())
            .await;
    assert!(matches!(result, Err(ConnectError::Transport { .. })));
}
